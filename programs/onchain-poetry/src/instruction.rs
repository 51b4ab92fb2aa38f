use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program, sysvar,
};

use crate::error::PoetryError;
use crate::state::{POEM_LEDGER_SEED, VERSE_LEDGER_SEED};

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone)]
pub enum PoetryInstruction {
    /// Create and initialize the verse ledger
    /// Accounts:
    /// 0. `[signer, writable]` Authority (pays for the account)
    /// 1. `[writable]` Verse ledger PDA
    /// 2. `[]` System program
    /// 3. `[]` Rent sysvar
    InitializeVerseLedger {
        mint_price_lamports: u64,
        max_mint_per_call: u16,
        max_text_len: u32,
    },

    /// Create and initialize the poem ledger, storing the verse ledger
    /// reference it composes over
    /// Accounts:
    /// 0. `[signer, writable]` Authority (pays for the account)
    /// 1. `[writable]` Poem ledger PDA
    /// 2. `[]` Verse ledger PDA
    /// 3. `[]` System program
    /// 4. `[]` Rent sysvar
    InitializePoemLedger { max_title_len: u32 },

    /// One-time wiring of the collaborator permitted to lock verses
    /// Accounts:
    /// 0. `[signer]` Authority
    /// 1. `[writable]` Verse ledger PDA
    /// 2. `[]` Poem ledger PDA
    SetPoemLedger,

    /// Mint blank verses to the caller; payable when a mint price is
    /// configured
    /// Accounts:
    /// 0. `[signer, writable]` Minter (pays the mint price)
    /// 1. `[writable]` Verse ledger PDA
    /// 2. `[]` System program
    MintVerses { count: u16 },

    /// One-time authoring of a blank verse
    /// Accounts:
    /// 0. `[signer]` Verse owner
    /// 1. `[writable]` Verse ledger PDA
    AddVerseText { verse_id: u64, text: String },

    /// Set or clear the transfer delegate of a verse
    /// Accounts:
    /// 0. `[signer]` Verse owner
    /// 1. `[writable]` Verse ledger PDA
    ApproveVerse {
        verse_id: u64,
        delegate: Option<Pubkey>,
    },

    /// Transfer an unlocked verse
    /// Accounts:
    /// 0. `[signer]` Owner or approved delegate
    /// 1. `[writable]` Verse ledger PDA
    TransferVerse {
        from: Pubkey,
        to: Pubkey,
        verse_id: u64,
    },

    /// Compose a poem from owned, authored, unlocked verses; locks
    /// every referenced verse
    /// Accounts:
    /// 0. `[signer]` Creator
    /// 1. `[writable]` Poem ledger PDA
    /// 2. `[writable]` Verse ledger PDA
    CreatePoem { verse_ids: Vec<u64>, title: String },

    /// Transfer a poem
    /// Accounts:
    /// 0. `[signer]` Poem owner
    /// 1. `[writable]` Poem ledger PDA
    TransferPoem { to: Pubkey, poem_id: u64 },
}

impl PoetryInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        Self::try_from_slice(input).map_err(|_| PoetryError::InvalidInstruction.into())
    }
}

pub fn verse_ledger_pda(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VERSE_LEDGER_SEED], program_id)
}

pub fn poem_ledger_pda(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POEM_LEDGER_SEED], program_id)
}

// Helper functions to create instructions
pub fn initialize_verse_ledger(
    program_id: &Pubkey,
    authority: &Pubkey,
    mint_price_lamports: u64,
    max_mint_per_call: u16,
    max_text_len: u32,
) -> Instruction {
    let (ledger_pda, _) = verse_ledger_pda(program_id);
    let accounts = vec![
        AccountMeta::new(*authority, true),
        AccountMeta::new(ledger_pda, false),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(sysvar::rent::id(), false),
    ];

    let data = borsh::to_vec(&PoetryInstruction::InitializeVerseLedger {
        mint_price_lamports,
        max_mint_per_call,
        max_text_len,
    })
    .unwrap();

    Instruction {
        program_id: *program_id,
        accounts,
        data,
    }
}

pub fn initialize_poem_ledger(
    program_id: &Pubkey,
    authority: &Pubkey,
    max_title_len: u32,
) -> Instruction {
    let (poem_pda, _) = poem_ledger_pda(program_id);
    let (verse_pda, _) = verse_ledger_pda(program_id);
    let accounts = vec![
        AccountMeta::new(*authority, true),
        AccountMeta::new(poem_pda, false),
        AccountMeta::new_readonly(verse_pda, false),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(sysvar::rent::id(), false),
    ];

    let data = borsh::to_vec(&PoetryInstruction::InitializePoemLedger { max_title_len }).unwrap();

    Instruction {
        program_id: *program_id,
        accounts,
        data,
    }
}

pub fn set_poem_ledger(program_id: &Pubkey, authority: &Pubkey) -> Instruction {
    let (verse_pda, _) = verse_ledger_pda(program_id);
    let (poem_pda, _) = poem_ledger_pda(program_id);
    let accounts = vec![
        AccountMeta::new_readonly(*authority, true),
        AccountMeta::new(verse_pda, false),
        AccountMeta::new_readonly(poem_pda, false),
    ];

    let data = borsh::to_vec(&PoetryInstruction::SetPoemLedger).unwrap();

    Instruction {
        program_id: *program_id,
        accounts,
        data,
    }
}

pub fn mint_verses(program_id: &Pubkey, minter: &Pubkey, count: u16) -> Instruction {
    let (verse_pda, _) = verse_ledger_pda(program_id);
    let accounts = vec![
        AccountMeta::new(*minter, true),
        AccountMeta::new(verse_pda, false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    let data = borsh::to_vec(&PoetryInstruction::MintVerses { count }).unwrap();

    Instruction {
        program_id: *program_id,
        accounts,
        data,
    }
}

pub fn add_verse_text(
    program_id: &Pubkey,
    owner: &Pubkey,
    verse_id: u64,
    text: &str,
) -> Instruction {
    let (verse_pda, _) = verse_ledger_pda(program_id);
    let accounts = vec![
        AccountMeta::new_readonly(*owner, true),
        AccountMeta::new(verse_pda, false),
    ];

    let data = borsh::to_vec(&PoetryInstruction::AddVerseText {
        verse_id,
        text: text.to_string(),
    })
    .unwrap();

    Instruction {
        program_id: *program_id,
        accounts,
        data,
    }
}

pub fn approve_verse(
    program_id: &Pubkey,
    owner: &Pubkey,
    verse_id: u64,
    delegate: Option<Pubkey>,
) -> Instruction {
    let (verse_pda, _) = verse_ledger_pda(program_id);
    let accounts = vec![
        AccountMeta::new_readonly(*owner, true),
        AccountMeta::new(verse_pda, false),
    ];

    let data = borsh::to_vec(&PoetryInstruction::ApproveVerse { verse_id, delegate }).unwrap();

    Instruction {
        program_id: *program_id,
        accounts,
        data,
    }
}

pub fn transfer_verse(
    program_id: &Pubkey,
    caller: &Pubkey,
    from: &Pubkey,
    to: &Pubkey,
    verse_id: u64,
) -> Instruction {
    let (verse_pda, _) = verse_ledger_pda(program_id);
    let accounts = vec![
        AccountMeta::new_readonly(*caller, true),
        AccountMeta::new(verse_pda, false),
    ];

    let data = borsh::to_vec(&PoetryInstruction::TransferVerse {
        from: *from,
        to: *to,
        verse_id,
    })
    .unwrap();

    Instruction {
        program_id: *program_id,
        accounts,
        data,
    }
}

pub fn create_poem(
    program_id: &Pubkey,
    creator: &Pubkey,
    verse_ids: Vec<u64>,
    title: &str,
) -> Instruction {
    let (poem_pda, _) = poem_ledger_pda(program_id);
    let (verse_pda, _) = verse_ledger_pda(program_id);
    let accounts = vec![
        AccountMeta::new_readonly(*creator, true),
        AccountMeta::new(poem_pda, false),
        AccountMeta::new(verse_pda, false),
    ];

    let data = borsh::to_vec(&PoetryInstruction::CreatePoem {
        verse_ids,
        title: title.to_string(),
    })
    .unwrap();

    Instruction {
        program_id: *program_id,
        accounts,
        data,
    }
}

pub fn transfer_poem(
    program_id: &Pubkey,
    owner: &Pubkey,
    to: &Pubkey,
    poem_id: u64,
) -> Instruction {
    let (poem_pda, _) = poem_ledger_pda(program_id);
    let accounts = vec![
        AccountMeta::new_readonly(*owner, true),
        AccountMeta::new(poem_pda, false),
    ];

    let data = borsh::to_vec(&PoetryInstruction::TransferPoem {
        to: *to,
        poem_id,
    })
    .unwrap();

    Instruction {
        program_id: *program_id,
        accounts,
        data,
    }
}
