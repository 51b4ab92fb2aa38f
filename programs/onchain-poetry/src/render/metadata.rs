//! Self-contained token documents: structured metadata plus the SVG
//! image, encoded as base64 data URIs so no off-ledger fetch is ever
//! needed to resolve them.

use base64::{engine::general_purpose, Engine as _};
use serde::Serialize;

use crate::render::svg;

/// A single metadata trait entry.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

impl Attribute {
    pub fn new(trait_type: &str, value: String) -> Self {
        Self {
            trait_type: trait_type.to_string(),
            value,
        }
    }
}

/// Wire shape of the metadata JSON. Field order is fixed by the struct,
/// so serialization is byte-stable.
#[derive(Serialize, Debug, Clone)]
pub struct TokenMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<Attribute>,
}

/// The rendered document for a verse or poem: name, description, the
/// SVG image and trait attributes, with data-URI encoders for the
/// externally consumed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub description: String,
    pub svg: String,
    pub attributes: Vec<Attribute>,
}

impl Document {
    pub fn image_uri(&self) -> String {
        format!(
            "data:image/svg+xml;base64,{}",
            general_purpose::STANDARD.encode(self.svg.as_bytes())
        )
    }

    pub fn token_uri(&self) -> String {
        let metadata = TokenMetadata {
            name: self.name.clone(),
            description: self.description.clone(),
            image: self.image_uri(),
            attributes: self.attributes.clone(),
        };
        let json = serde_json::to_string(&metadata).unwrap();
        format!(
            "data:application/json;base64,{}",
            general_purpose::STANDARD.encode(json.as_bytes())
        )
    }
}

/// Document for a verse. `None` text is the blank placeholder variant.
pub fn verse_document(verse_id: u64, text: Option<&str>) -> Document {
    let (description, status, characters) = match text {
        Some(t) => (
            "An individually owned verse of a collaborative onchain poem, \
             transferable until a poem consumes it."
                .to_string(),
            "Authored",
            t.chars().count(),
        ),
        None => (
            "A blank verse awaiting its one-time author.".to_string(),
            "Blank",
            0,
        ),
    };
    Document {
        name: format!("Verse #{}", verse_id),
        description,
        svg: svg::verse_svg(verse_id, text),
        attributes: vec![
            Attribute::new("Status", status.to_string()),
            Attribute::new("Characters", characters.to_string()),
        ],
    }
}

/// Document for a poem over its resolved `(verse id, text)` lines, in
/// stored order.
pub fn poem_document(poem_id: u64, title: &str, lines: &[(u64, &str)]) -> Document {
    Document {
        name: format!("Poem #{}: {}", poem_id, title),
        description: format!(
            "A poem assembled from {} consumed verses, rendered entirely from ledger state.",
            lines.len()
        ),
        svg: svg::poem_svg(poem_id, title, lines),
        attributes: vec![Attribute::new("Verses", lines.len().to_string())],
    }
}
