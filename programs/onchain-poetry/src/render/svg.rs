//! Deterministic SVG layout for verse and poem documents.
//!
//! Identical inputs always produce byte-identical markup: no clock, no
//! randomness, no state reads. User-supplied text is XML-escaped before
//! interpolation and wrapped by a fixed character-width policy; verses
//! beyond the line cap are truncated with an ellipsis instead of
//! overflowing the canvas.

// Layout constants
pub const CANVAS_WIDTH: u32 = 350;
pub const LINE_CHARS: usize = 40;
pub const VERSE_MAX_LINES: usize = 4;
pub const LINE_HEIGHT: u32 = 18;
pub const BODY_TOP: u32 = 72;
pub const VERSE_GAP: u32 = 10;
pub const BOTTOM_PAD: u32 = 24;

const BACKGROUND: &str = "#1b1b2f";
const INK: &str = "#e0d8c3";
const DIM: &str = "#8a8577";

/// Escape characters that are structurally significant in XML markup.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Greedy word-wrap at `width` characters. Words longer than a full
/// line are hard-split so no line ever exceeds the width.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(width).collect();
            word = &word[head.len()..];
            lines.push(head);
        }
        if word.is_empty() {
            continue;
        }
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Truncate to `max_lines`, marking the cut with an ellipsis.
pub fn clamp_lines(mut lines: Vec<String>, max_lines: usize) -> Vec<String> {
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            while last.chars().count() >= LINE_CHARS {
                last.pop();
            }
            last.push('…');
        }
    }
    lines
}

fn wrapped_verse_lines(text: &str) -> Vec<String> {
    clamp_lines(wrap(text, LINE_CHARS), VERSE_MAX_LINES)
}

fn open_svg(height: u32) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
         viewBox=\"0 0 {w} {h}\"><rect width=\"100%\" height=\"100%\" fill=\"{bg}\"/>",
        w = CANVAS_WIDTH,
        h = height,
        bg = BACKGROUND,
    )
}

fn header_line(label: &str) -> String {
    format!(
        "<text x=\"20\" y=\"36\" font-family=\"Georgia, serif\" font-size=\"15\" \
         fill=\"{ink}\">{label}</text>\
         <line x1=\"20\" y1=\"50\" x2=\"{x2}\" y2=\"50\" stroke=\"{dim}\" stroke-width=\"1\"/>",
        ink = INK,
        dim = DIM,
        x2 = CANVAS_WIDTH - 20,
        label = label,
    )
}

fn body_line(y: u32, line: &str) -> String {
    format!(
        "<text x=\"20\" y=\"{y}\" font-family=\"Georgia, serif\" font-size=\"12\" \
         fill=\"{ink}\">{line}</text>",
        y = y,
        ink = INK,
        line = line,
    )
}

fn id_marker(y: u32, verse_id: u64) -> String {
    format!(
        "<text x=\"{x}\" y=\"{y}\" font-family=\"Georgia, serif\" font-size=\"9\" \
         fill=\"{dim}\" text-anchor=\"end\">#{id}</text>",
        x = CANVAS_WIDTH - 14,
        y = y,
        dim = DIM,
        id = verse_id,
    )
}

/// Render a single verse. `None` text renders the blank placeholder
/// variant.
pub fn verse_svg(verse_id: u64, text: Option<&str>) -> String {
    let lines = match text {
        Some(t) => wrapped_verse_lines(t),
        None => Vec::new(),
    };
    let line_count = lines.len().max(1) as u32;
    let height = BODY_TOP + line_count * LINE_HEIGHT + BOTTOM_PAD;

    let mut svg = open_svg(height);
    svg.push_str(&header_line(&format!("Verse #{}", verse_id)));

    if lines.is_empty() {
        svg.push_str(&format!(
            "<text x=\"20\" y=\"{y}\" font-family=\"Georgia, serif\" font-size=\"12\" \
             font-style=\"italic\" fill=\"{dim}\">yet unwritten</text>",
            y = BODY_TOP,
            dim = DIM,
        ));
    } else {
        let mut y = BODY_TOP;
        for line in &lines {
            svg.push_str(&body_line(y, &escape(line)));
            y += LINE_HEIGHT;
        }
    }
    svg.push_str("</svg>");
    svg
}

/// Render a poem: title header, then each verse's wrapped lines in the
/// stored order, with a dim id marker on each verse's first line.
pub fn poem_svg(poem_id: u64, title: &str, verses: &[(u64, &str)]) -> String {
    let blocks: Vec<(u64, Vec<String>)> = verses
        .iter()
        .map(|&(id, text)| (id, wrapped_verse_lines(text)))
        .collect();

    let total_lines: u32 = blocks.iter().map(|(_, b)| b.len().max(1) as u32).sum();
    let gaps = blocks.len().saturating_sub(1) as u32 * VERSE_GAP;
    let height = BODY_TOP + total_lines * LINE_HEIGHT + gaps + BOTTOM_PAD;

    let mut svg = open_svg(height);
    svg.push_str(&header_line(&format!(
        "Poem #{} · {}",
        poem_id,
        escape(title)
    )));

    let mut y = BODY_TOP;
    for (pos, (verse_id, lines)) in blocks.iter().enumerate() {
        if pos > 0 {
            y += VERSE_GAP;
        }
        svg.push_str(&id_marker(y, *verse_id));
        if lines.is_empty() {
            y += LINE_HEIGHT;
            continue;
        }
        for line in lines {
            svg.push_str(&body_line(y, &escape(line)));
            y += LINE_HEIGHT;
        }
    }
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape("<text x=\"1\" y='2'>&</text>"),
            "&lt;text x=&quot;1&quot; y=&apos;2&apos;&gt;&amp;&lt;/text&gt;"
        );
    }

    #[test]
    fn wrap_is_greedy_and_respects_width() {
        let lines = wrap("the brain is wider than the sky", 12);
        assert_eq!(lines, vec!["the brain is", "wider than", "the sky"]);
        for line in &lines {
            assert!(line.chars().count() <= 12);
        }
    }

    #[test]
    fn wrap_hard_splits_overlong_words() {
        let lines = wrap("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn clamp_marks_truncation_with_ellipsis() {
        let lines: Vec<String> = (0..6).map(|i| format!("line {}", i)).collect();
        let clamped = clamp_lines(lines, 4);
        assert_eq!(clamped.len(), 4);
        assert!(clamped[3].ends_with('…'));
    }

    #[test]
    fn verse_svg_is_deterministic() {
        let a = verse_svg(3, Some("Astronomy forces our soul to look up"));
        let b = verse_svg(3, Some("Astronomy forces our soul to look up"));
        assert_eq!(a, b);
    }
}
