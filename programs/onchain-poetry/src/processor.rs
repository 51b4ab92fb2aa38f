use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    program_error::ProgramError,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction,
    sysvar::Sysvar,
};

use crate::{
    error::PoetryError,
    instruction::PoetryInstruction,
    state::{PoemLedger, VerseLedger, POEM_LEDGER_SEED, VERSE_LEDGER_SEED},
};

pub struct Processor;

impl Processor {
    pub fn process(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        let instruction = PoetryInstruction::unpack(instruction_data)?;

        match instruction {
            PoetryInstruction::InitializeVerseLedger {
                mint_price_lamports,
                max_mint_per_call,
                max_text_len,
            } => {
                msg!("Instruction: InitializeVerseLedger");
                Self::process_initialize_verse_ledger(
                    accounts,
                    program_id,
                    mint_price_lamports,
                    max_mint_per_call,
                    max_text_len,
                )
            }
            PoetryInstruction::InitializePoemLedger { max_title_len } => {
                msg!("Instruction: InitializePoemLedger");
                Self::process_initialize_poem_ledger(accounts, program_id, max_title_len)
            }
            PoetryInstruction::SetPoemLedger => {
                msg!("Instruction: SetPoemLedger");
                Self::process_set_poem_ledger(accounts, program_id)
            }
            PoetryInstruction::MintVerses { count } => {
                msg!("Instruction: MintVerses");
                Self::process_mint_verses(accounts, program_id, count)
            }
            PoetryInstruction::AddVerseText { verse_id, text } => {
                msg!("Instruction: AddVerseText");
                Self::process_add_verse_text(accounts, program_id, verse_id, text)
            }
            PoetryInstruction::ApproveVerse { verse_id, delegate } => {
                msg!("Instruction: ApproveVerse");
                Self::process_approve_verse(accounts, program_id, verse_id, delegate)
            }
            PoetryInstruction::TransferVerse { from, to, verse_id } => {
                msg!("Instruction: TransferVerse");
                Self::process_transfer_verse(accounts, program_id, from, to, verse_id)
            }
            PoetryInstruction::CreatePoem { verse_ids, title } => {
                msg!("Instruction: CreatePoem");
                Self::process_create_poem(accounts, program_id, verse_ids, title)
            }
            PoetryInstruction::TransferPoem { to, poem_id } => {
                msg!("Instruction: TransferPoem");
                Self::process_transfer_poem(accounts, program_id, to, poem_id)
            }
        }
    }

    fn process_initialize_verse_ledger(
        accounts: &[AccountInfo],
        program_id: &Pubkey,
        mint_price_lamports: u64,
        max_mint_per_call: u16,
        max_text_len: u32,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let authority_info = next_account_info(account_info_iter)?;
        let ledger_info = next_account_info(account_info_iter)?;
        let system_program = next_account_info(account_info_iter)?;
        let rent = &Rent::from_account_info(next_account_info(account_info_iter)?)?;

        if !authority_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        let (ledger_pubkey, bump) =
            Pubkey::find_program_address(&[VERSE_LEDGER_SEED], program_id);
        if ledger_pubkey != *ledger_info.key {
            return Err(PoetryError::InvalidPDA.into());
        }
        if !ledger_info.data_is_empty() {
            return Err(PoetryError::AlreadyInitialized.into());
        }

        let lamports = rent.minimum_balance(VerseLedger::SPACE);
        invoke_signed(
            &system_instruction::create_account(
                authority_info.key,
                ledger_info.key,
                lamports,
                VerseLedger::SPACE as u64,
                program_id,
            ),
            &[
                authority_info.clone(),
                ledger_info.clone(),
                system_program.clone(),
            ],
            &[&[VERSE_LEDGER_SEED, &[bump]]],
        )?;

        let ledger = VerseLedger::new(
            *authority_info.key,
            mint_price_lamports,
            max_mint_per_call,
            max_text_len,
            bump,
        );
        Self::store_verse_ledger(ledger_info, &ledger)?;

        msg!("Verse ledger initialized: authority={}", authority_info.key);
        Ok(())
    }

    fn process_initialize_poem_ledger(
        accounts: &[AccountInfo],
        program_id: &Pubkey,
        max_title_len: u32,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let authority_info = next_account_info(account_info_iter)?;
        let poem_ledger_info = next_account_info(account_info_iter)?;
        let verse_ledger_info = next_account_info(account_info_iter)?;
        let system_program = next_account_info(account_info_iter)?;
        let rent = &Rent::from_account_info(next_account_info(account_info_iter)?)?;

        if !authority_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        // The verse ledger must already exist; its address is the
        // composition reference the poem ledger stores.
        Self::load_verse_ledger(verse_ledger_info, program_id)?;

        let (poem_pubkey, bump) = Pubkey::find_program_address(&[POEM_LEDGER_SEED], program_id);
        if poem_pubkey != *poem_ledger_info.key {
            return Err(PoetryError::InvalidPDA.into());
        }
        if !poem_ledger_info.data_is_empty() {
            return Err(PoetryError::AlreadyInitialized.into());
        }

        let lamports = rent.minimum_balance(PoemLedger::SPACE);
        invoke_signed(
            &system_instruction::create_account(
                authority_info.key,
                poem_ledger_info.key,
                lamports,
                PoemLedger::SPACE as u64,
                program_id,
            ),
            &[
                authority_info.clone(),
                poem_ledger_info.clone(),
                system_program.clone(),
            ],
            &[&[POEM_LEDGER_SEED, &[bump]]],
        )?;

        let ledger = PoemLedger::new(
            *authority_info.key,
            *verse_ledger_info.key,
            max_title_len,
            bump,
        );
        Self::store_poem_ledger(poem_ledger_info, &ledger)?;

        msg!("Poem ledger initialized: authority={}", authority_info.key);
        Ok(())
    }

    fn process_set_poem_ledger(accounts: &[AccountInfo], program_id: &Pubkey) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let authority_info = next_account_info(account_info_iter)?;
        let verse_ledger_info = next_account_info(account_info_iter)?;
        let poem_ledger_info = next_account_info(account_info_iter)?;

        if !authority_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        let mut verses = Self::load_verse_ledger(verse_ledger_info, program_id)?;
        // The collaborator must be this program's initialized poem ledger.
        Self::load_poem_ledger(poem_ledger_info, program_id)?;

        verses.set_poem_ledger(authority_info.key, poem_ledger_info.key)?;
        Self::store_verse_ledger(verse_ledger_info, &verses)?;

        msg!("Poem ledger registered: {}", poem_ledger_info.key);
        Ok(())
    }

    fn process_mint_verses(
        accounts: &[AccountInfo],
        program_id: &Pubkey,
        count: u16,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let minter_info = next_account_info(account_info_iter)?;
        let ledger_info = next_account_info(account_info_iter)?;
        let system_program = next_account_info(account_info_iter)?;

        if !minter_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        let mut ledger = Self::load_verse_ledger(ledger_info, program_id)?;

        // Collect the payment before any state mutation.
        if ledger.mint_price_lamports > 0 {
            let total = ledger
                .mint_price_lamports
                .checked_mul(count as u64)
                .ok_or(PoetryError::ArithmeticOverflow)?;
            if minter_info.lamports() < total {
                return Err(PoetryError::PaymentRequired.into());
            }
            invoke(
                &system_instruction::transfer(minter_info.key, ledger_info.key, total),
                &[
                    minter_info.clone(),
                    ledger_info.clone(),
                    system_program.clone(),
                ],
            )?;
        }

        let ids = ledger.mint(minter_info.key, count)?;
        Self::store_verse_ledger(ledger_info, &ledger)?;

        msg!("VersesMinted: owner={} ids={:?}", minter_info.key, ids);
        Ok(())
    }

    fn process_add_verse_text(
        accounts: &[AccountInfo],
        program_id: &Pubkey,
        verse_id: u64,
        text: String,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let author_info = next_account_info(account_info_iter)?;
        let ledger_info = next_account_info(account_info_iter)?;

        if !author_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        let mut ledger = Self::load_verse_ledger(ledger_info, program_id)?;
        ledger.add_text(author_info.key, verse_id, &text)?;
        Self::store_verse_ledger(ledger_info, &ledger)?;

        msg!("TextAddedToVerse: verse_id={}", verse_id);
        Ok(())
    }

    fn process_approve_verse(
        accounts: &[AccountInfo],
        program_id: &Pubkey,
        verse_id: u64,
        delegate: Option<Pubkey>,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let owner_info = next_account_info(account_info_iter)?;
        let ledger_info = next_account_info(account_info_iter)?;

        if !owner_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        let mut ledger = Self::load_verse_ledger(ledger_info, program_id)?;
        ledger.approve(owner_info.key, verse_id, delegate)?;
        Self::store_verse_ledger(ledger_info, &ledger)?;

        msg!(
            "VerseApproved: verse_id={} delegate={:?}",
            verse_id,
            delegate
        );
        Ok(())
    }

    fn process_transfer_verse(
        accounts: &[AccountInfo],
        program_id: &Pubkey,
        from: Pubkey,
        to: Pubkey,
        verse_id: u64,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let caller_info = next_account_info(account_info_iter)?;
        let ledger_info = next_account_info(account_info_iter)?;

        if !caller_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        let mut ledger = Self::load_verse_ledger(ledger_info, program_id)?;
        ledger.transfer(caller_info.key, &from, &to, verse_id)?;
        Self::store_verse_ledger(ledger_info, &ledger)?;

        msg!(
            "VerseTransferred: verse_id={} from={} to={}",
            verse_id,
            from,
            to
        );
        Ok(())
    }

    fn process_create_poem(
        accounts: &[AccountInfo],
        program_id: &Pubkey,
        verse_ids: Vec<u64>,
        title: String,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let creator_info = next_account_info(account_info_iter)?;
        let poem_ledger_info = next_account_info(account_info_iter)?;
        let verse_ledger_info = next_account_info(account_info_iter)?;

        if !creator_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        let mut poems = Self::load_poem_ledger(poem_ledger_info, program_id)?;
        let mut verses = Self::load_verse_ledger(verse_ledger_info, program_id)?;

        if poems.verse_ledger != *verse_ledger_info.key {
            return Err(PoetryError::LedgerMismatch.into());
        }

        let poem_id = poems.create_poem(
            poem_ledger_info.key,
            &mut verses,
            creator_info.key,
            verse_ids,
            title,
        )?;

        Self::store_verse_ledger(verse_ledger_info, &verses)?;
        Self::store_poem_ledger(poem_ledger_info, &poems)?;

        msg!("PoemCreated: owner={} poem_id={}", creator_info.key, poem_id);
        Ok(())
    }

    fn process_transfer_poem(
        accounts: &[AccountInfo],
        program_id: &Pubkey,
        to: Pubkey,
        poem_id: u64,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let owner_info = next_account_info(account_info_iter)?;
        let ledger_info = next_account_info(account_info_iter)?;

        if !owner_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        let mut ledger = Self::load_poem_ledger(ledger_info, program_id)?;
        ledger.transfer_poem(owner_info.key, &to, poem_id)?;
        Self::store_poem_ledger(ledger_info, &ledger)?;

        msg!("PoemTransferred: poem_id={} to={}", poem_id, to);
        Ok(())
    }

    fn load_verse_ledger(
        info: &AccountInfo,
        program_id: &Pubkey,
    ) -> Result<VerseLedger, ProgramError> {
        if info.owner != program_id {
            return Err(ProgramError::IncorrectProgramId);
        }
        VerseLedger::unpack(&info.try_borrow_data()?)
    }

    fn load_poem_ledger(
        info: &AccountInfo,
        program_id: &Pubkey,
    ) -> Result<PoemLedger, ProgramError> {
        if info.owner != program_id {
            return Err(ProgramError::IncorrectProgramId);
        }
        PoemLedger::unpack(&info.try_borrow_data()?)
    }

    fn store_verse_ledger(info: &AccountInfo, ledger: &VerseLedger) -> ProgramResult {
        borsh::to_writer(&mut info.try_borrow_mut_data()?.as_mut(), ledger)
            .map_err(|_| ProgramError::InvalidAccountData)?;
        Ok(())
    }

    fn store_poem_ledger(info: &AccountInfo, ledger: &PoemLedger) -> ProgramResult {
        borsh::to_writer(&mut info.try_borrow_mut_data()?.as_mut(), ledger)
            .map_err(|_| ProgramError::InvalidAccountData)?;
        Ok(())
    }
}
