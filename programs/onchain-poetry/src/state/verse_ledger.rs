use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

use crate::error::PoetryError;
use crate::render::{self, Document};

/// A single verse asset. Minted blank, authored exactly once by its
/// owner, transferable while unlocked, locked permanently once a poem
/// consumes it. Records are never removed: a locked verse stays in the
/// table as the source of truth for poem rendering.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone)]
pub struct VerseRecord {
    pub id: u64,
    pub owner: Pubkey,
    /// Transfer delegate, cleared on every transfer
    pub approved: Option<Pubkey>,
    pub text: String,
    pub authored: bool,
    pub locked: bool,
}

/// Verse ledger account: config, the one-time poem-ledger wiring, the
/// monotone id counter and the verse table. Sole authority over verse
/// state; the only externally reachable mutation path is `lock`, gated
/// on the registered poem ledger identity.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone)]
pub struct VerseLedger {
    /// Account discriminator
    pub discriminator: [u8; 8],

    /// Is initialized flag
    pub is_initialized: bool,

    /// Authority that performed deployment wiring
    pub authority: Pubkey,

    /// Price per verse in lamports; 0 = free mint
    pub mint_price_lamports: u64,

    /// Upper bound on verses per mint call
    pub max_mint_per_call: u16,

    /// Upper bound on authored text length, in characters
    pub max_text_len: u32,

    /// The single collaborator permitted to lock verses, set exactly once
    pub poem_ledger: Option<Pubkey>,

    /// Next verse id; ids start at 1 and are never reused
    pub next_verse_id: u64,

    pub verses: Vec<VerseRecord>,

    pub bump: u8,
}

impl VerseLedger {
    pub const DISCRIMINATOR: [u8; 8] = *b"VERSELDG";

    /// Fixed allocation; the verse table grows into the padding.
    pub const SPACE: usize = 16_384;

    pub fn new(
        authority: Pubkey,
        mint_price_lamports: u64,
        max_mint_per_call: u16,
        max_text_len: u32,
        bump: u8,
    ) -> Self {
        Self {
            discriminator: Self::DISCRIMINATOR,
            is_initialized: true,
            authority,
            mint_price_lamports,
            max_mint_per_call,
            max_text_len,
            poem_ledger: None,
            next_verse_id: 1,
            verses: Vec::new(),
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

    pub fn verse(&self, verse_id: u64) -> Result<&VerseRecord, PoetryError> {
        self.verses
            .iter()
            .find(|v| v.id == verse_id)
            .ok_or(PoetryError::VerseNotFound)
    }

    fn verse_mut(&mut self, verse_id: u64) -> Result<&mut VerseRecord, PoetryError> {
        self.verses
            .iter_mut()
            .find(|v| v.id == verse_id)
            .ok_or(PoetryError::VerseNotFound)
    }

    /// Mint `count` blank verses to `owner`, returning the new ids in
    /// allocation order.
    pub fn mint(&mut self, owner: &Pubkey, count: u16) -> Result<Vec<u64>, PoetryError> {
        if count == 0 || count > self.max_mint_per_call {
            return Err(PoetryError::InvalidQuantity);
        }

        let mut ids = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let id = self.next_verse_id;
            self.next_verse_id = self
                .next_verse_id
                .checked_add(1)
                .ok_or(PoetryError::ArithmeticOverflow)?;
            self.verses.push(VerseRecord {
                id,
                owner: *owner,
                approved: None,
                text: String::new(),
                authored: false,
                locked: false,
            });
            ids.push(id);
        }
        Ok(ids)
    }

    /// One-time authoring. The stored text is the trimmed input.
    pub fn add_text(
        &mut self,
        caller: &Pubkey,
        verse_id: u64,
        text: &str,
    ) -> Result<(), PoetryError> {
        let max_text_len = self.max_text_len as usize;
        let verse = self.verse_mut(verse_id)?;
        if verse.owner != *caller {
            return Err(PoetryError::NotOwner);
        }
        if verse.authored {
            return Err(PoetryError::AlreadyAuthored);
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(PoetryError::EmptyText);
        }
        if trimmed.chars().count() > max_text_len {
            return Err(PoetryError::TextTooLong);
        }
        verse.text = trimmed.to_string();
        verse.authored = true;
        Ok(())
    }

    /// Set or clear the transfer delegate on an unlocked verse.
    pub fn approve(
        &mut self,
        caller: &Pubkey,
        verse_id: u64,
        delegate: Option<Pubkey>,
    ) -> Result<(), PoetryError> {
        let verse = self.verse_mut(verse_id)?;
        if verse.owner != *caller {
            return Err(PoetryError::NotOwner);
        }
        if verse.locked {
            return Err(PoetryError::VerseLocked);
        }
        verse.approved = delegate;
        Ok(())
    }

    /// Ownership transfer. `caller` must be the owner or the approved
    /// delegate, `from` must match the current owner, and the verse
    /// must be unlocked. Clears the delegate.
    pub fn transfer(
        &mut self,
        caller: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        verse_id: u64,
    ) -> Result<(), PoetryError> {
        if *to == Pubkey::default() {
            return Err(PoetryError::InvalidRecipient);
        }
        let verse = self.verse_mut(verse_id)?;
        if verse.owner != *from {
            return Err(PoetryError::NotOwner);
        }
        if *caller != verse.owner && verse.approved.as_ref() != Some(caller) {
            return Err(PoetryError::NotOwner);
        }
        if verse.locked {
            return Err(PoetryError::VerseLocked);
        }
        verse.owner = *to;
        verse.approved = None;
        Ok(())
    }

    /// One-time wiring of the poem ledger collaborator.
    pub fn set_poem_ledger(
        &mut self,
        caller: &Pubkey,
        poem_ledger: &Pubkey,
    ) -> Result<(), PoetryError> {
        if *caller != self.authority {
            return Err(PoetryError::Unauthorized);
        }
        if self.poem_ledger.is_some() {
            return Err(PoetryError::PoemLedgerAlreadySet);
        }
        self.poem_ledger = Some(*poem_ledger);
        Ok(())
    }

    /// Mark a verse as consumed by a poem. Callable only with the
    /// registered poem ledger identity; requires the verse to be
    /// authored and not yet locked. Locking is permanent.
    pub fn lock(&mut self, caller: &Pubkey, verse_id: u64) -> Result<(), PoetryError> {
        if self.poem_ledger != Some(*caller) {
            return Err(PoetryError::NotPoemLedger);
        }
        let verse = self.verse_mut(verse_id)?;
        if !verse.authored {
            return Err(PoetryError::NotAuthored);
        }
        if verse.locked {
            return Err(PoetryError::AlreadyLocked);
        }
        verse.locked = true;
        Ok(())
    }

    /// Render the verse document from current state. Blank verses get
    /// the placeholder variant.
    pub fn document_for(&self, verse_id: u64) -> Result<Document, PoetryError> {
        let verse = self.verse(verse_id)?;
        let text = if verse.authored {
            Some(verse.text.as_str())
        } else {
            None
        };
        Ok(render::verse_document(verse.id, text))
    }
}
