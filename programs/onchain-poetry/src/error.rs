use num_derive::FromPrimitive;
use solana_program::{
    decode_error::DecodeError,
    program_error::{PrintProgramError, ProgramError},
};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, FromPrimitive, PartialEq)]
pub enum PoetryError {
    #[error("Invalid instruction")]
    InvalidInstruction = 0,

    #[error("Invalid PDA")]
    InvalidPDA = 1,

    #[error("Already initialized")]
    AlreadyInitialized = 2,

    #[error("Not initialized")]
    NotInitialized = 3,

    #[error("Unauthorized")]
    Unauthorized = 4,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow = 5,

    #[error("Invalid mint quantity")]
    InvalidQuantity = 6,

    #[error("Payment required")]
    PaymentRequired = 7,

    #[error("Verse not found")]
    VerseNotFound = 8,

    #[error("Poem not found")]
    PoemNotFound = 9,

    #[error("Not the owner")]
    NotOwner = 10,

    #[error("Invalid recipient")]
    InvalidRecipient = 11,

    #[error("Verse already authored")]
    AlreadyAuthored = 12,

    #[error("Empty verse text")]
    EmptyText = 13,

    #[error("Verse text too long")]
    TextTooLong = 14,

    #[error("Verse is locked")]
    VerseLocked = 15,

    #[error("Verse not authored")]
    NotAuthored = 16,

    #[error("Verse already locked")]
    AlreadyLocked = 17,

    #[error("Caller is not the registered poem ledger")]
    NotPoemLedger = 18,

    #[error("Poem ledger already set")]
    PoemLedgerAlreadySet = 19,

    #[error("Ledger reference mismatch")]
    LedgerMismatch = 20,

    #[error("Title too long")]
    TitleTooLong = 21,

    #[error("Poem has no verses")]
    EmptyPoem = 22,

    #[error("Duplicate verse in poem")]
    DuplicateVerse = 23,

    #[error("Verse not owned by poem creator")]
    VerseNotOwned = 24,

    #[error("Verse in poem not authored")]
    VerseNotAuthored = 25,

    #[error("Verse in poem already locked")]
    VerseAlreadyLocked = 26,
}

impl PrintProgramError for PoetryError {
    fn print<E>(&self) {
        use solana_program::msg;
        msg!("PoetryError: {}", self);
    }
}

impl From<PoetryError> for ProgramError {
    fn from(e: PoetryError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for PoetryError {
    fn type_of() -> &'static str {
        "PoetryError"
    }
}
