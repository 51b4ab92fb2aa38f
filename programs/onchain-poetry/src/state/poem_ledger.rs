use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{msg, program_error::ProgramError, pubkey::Pubkey};

use crate::error::PoetryError;
use crate::render::{self, Document};
use crate::state::VerseLedger;

/// A composed poem: an immutable ordered list of consumed verse ids
/// plus a title, owned and transferable like any other asset.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone)]
pub struct PoemRecord {
    pub id: u64,
    pub owner: Pubkey,
    pub title: String,
    /// Verse ids exactly as supplied at creation; rendering order
    pub verse_ids: Vec<u64>,
}

/// Poem ledger account. Holds the verse ledger reference it validates
/// against, the monotone poem id counter and the poem table.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone)]
pub struct PoemLedger {
    /// Account discriminator
    pub discriminator: [u8; 8],

    /// Is initialized flag
    pub is_initialized: bool,

    pub authority: Pubkey,

    /// The verse ledger this poem ledger composes over
    pub verse_ledger: Pubkey,

    /// Upper bound on title length, in characters
    pub max_title_len: u32,

    /// Next poem id; a namespace disjoint from verse ids, starting at 1
    pub next_poem_id: u64,

    pub poems: Vec<PoemRecord>,

    pub bump: u8,
}

impl PoemLedger {
    pub const DISCRIMINATOR: [u8; 8] = *b"POEMLDGR";

    /// Fixed allocation; the poem table grows into the padding.
    pub const SPACE: usize = 8_192;

    pub fn new(authority: Pubkey, verse_ledger: Pubkey, max_title_len: u32, bump: u8) -> Self {
        Self {
            discriminator: Self::DISCRIMINATOR,
            is_initialized: true,
            authority,
            verse_ledger,
            max_title_len,
            next_poem_id: 1,
            poems: Vec::new(),
            bump,
        }
    }

    /// Deserialize from a zero-padded account buffer.
    pub fn unpack(data: &[u8]) -> Result<Self, ProgramError> {
        let mut slice = data;
        let ledger =
            Self::deserialize(&mut slice).map_err(|_| ProgramError::InvalidAccountData)?;
        if ledger.discriminator != Self::DISCRIMINATOR {
            return Err(ProgramError::InvalidAccountData);
        }
        if !ledger.is_initialized {
            return Err(PoetryError::NotInitialized.into());
        }
        Ok(ledger)
    }

    pub fn poem(&self, poem_id: u64) -> Result<&PoemRecord, PoetryError> {
        self.poems
            .iter()
            .find(|p| p.id == poem_id)
            .ok_or(PoetryError::PoemNotFound)
    }

    fn poem_mut(&mut self, poem_id: u64) -> Result<&mut PoemRecord, PoetryError> {
        self.poems
            .iter_mut()
            .find(|p| p.id == poem_id)
            .ok_or(PoetryError::PoemNotFound)
    }

    /// Compose a poem from `verse_ids`, consuming the verses.
    ///
    /// Two-phase: every id is validated against the verse ledger with
    /// no mutation, then every verse is locked through the ledger's
    /// capability-gated path, then the poem record is stored. A failed
    /// validation leaves every verse untouched. `self_key` is this
    /// ledger's account address, the identity the verse ledger checks
    /// the lock capability against.
    pub fn create_poem(
        &mut self,
        self_key: &Pubkey,
        verses: &mut VerseLedger,
        creator: &Pubkey,
        verse_ids: Vec<u64>,
        title: String,
    ) -> Result<u64, PoetryError> {
        if title.chars().count() > self.max_title_len as usize {
            return Err(PoetryError::TitleTooLong);
        }
        if verse_ids.is_empty() {
            return Err(PoetryError::EmptyPoem);
        }

        // Phase 1: validate the whole list, no mutation.
        for (pos, &verse_id) in verse_ids.iter().enumerate() {
            if verse_ids[..pos].contains(&verse_id) {
                msg!("Duplicate verse {} in poem", verse_id);
                return Err(PoetryError::DuplicateVerse);
            }
            let verse = verses.verse(verse_id)?;
            if verse.owner != *creator {
                msg!("Verse {} not owned by creator", verse_id);
                return Err(PoetryError::VerseNotOwned);
            }
            if !verse.authored {
                msg!("Verse {} not authored", verse_id);
                return Err(PoetryError::VerseNotAuthored);
            }
            if verse.locked {
                msg!("Verse {} already locked", verse_id);
                return Err(PoetryError::VerseAlreadyLocked);
            }
        }

        // Phase 2: lock every verse, then store the poem.
        for &verse_id in &verse_ids {
            verses.lock(self_key, verse_id)?;
        }

        let poem_id = self.next_poem_id;
        self.next_poem_id = self
            .next_poem_id
            .checked_add(1)
            .ok_or(PoetryError::ArithmeticOverflow)?;
        self.poems.push(PoemRecord {
            id: poem_id,
            owner: *creator,
            title,
            verse_ids,
        });
        Ok(poem_id)
    }

    /// Standard ownership transfer of the poem asset.
    pub fn transfer_poem(
        &mut self,
        caller: &Pubkey,
        to: &Pubkey,
        poem_id: u64,
    ) -> Result<(), PoetryError> {
        if *to == Pubkey::default() {
            return Err(PoetryError::InvalidRecipient);
        }
        let poem = self.poem_mut(poem_id)?;
        if poem.owner != *caller {
            return Err(PoetryError::NotOwner);
        }
        poem.owner = *to;
        Ok(())
    }

    /// Render the poem document, resolving each referenced verse's
    /// current text through the verse ledger at render time.
    pub fn document_for(
        &self,
        verses: &VerseLedger,
        poem_id: u64,
    ) -> Result<Document, PoetryError> {
        let poem = self.poem(poem_id)?;
        let mut lines = Vec::with_capacity(poem.verse_ids.len());
        for &verse_id in &poem.verse_ids {
            let verse = verses.verse(verse_id)?;
            lines.push((verse_id, verse.text.as_str()));
        }
        Ok(render::poem_document(poem.id, &poem.title, &lines))
    }
}
