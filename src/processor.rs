use solana_program::{
    instruction::AccountMeta,
    program_error::ProgramError,
    program_option::COption,
    program_pack::{IsInitialized, Pack},
    pubkey::Pubkey,
    sysvar,
};

use crate::account_store::{Account, AccountStore};
use crate::config::{MintProfile, ProgramConfig};
use crate::error::{ArithmeticError, ErrorKind, StateError, StorageError, ValidationError};
use crate::instruction::TokenInstruction;
use crate::report::{Logs, Outcome};
use crate::state::{pack_prefix, unpack_prefix, unpack_rent, MintRecord, TokenAccountRecord};

/// Instruction processor.
///
/// Every precondition of an instruction is checked before any account is
/// written, so a failed instruction leaves the store untouched. The caller
/// must hold exclusive access to all referenced accounts while `process`
/// runs.
pub struct Processor;

impl Processor {
    pub fn process<S: AccountStore>(
        program_id: &Pubkey,
        config: &ProgramConfig,
        store: &mut S,
        accounts: &[AccountMeta],
        instruction_data: &[u8],
    ) -> Outcome {
        let mut logs = Logs::invoke(program_id);
        match Self::process_instruction(
            program_id,
            config,
            store,
            accounts,
            instruction_data,
            &mut logs,
        ) {
            Ok(()) => Outcome::success(program_id, logs),
            Err(kind) => Outcome::failure(program_id, kind, logs),
        }
    }

    fn process_instruction<S: AccountStore>(
        program_id: &Pubkey,
        config: &ProgramConfig,
        store: &mut S,
        accounts: &[AccountMeta],
        instruction_data: &[u8],
        logs: &mut Logs,
    ) -> Result<(), ErrorKind> {
        let instruction = TokenInstruction::unpack(instruction_data, config.initialize_mint_layout)?;
        match instruction {
            TokenInstruction::InitializeMint { decimals } => {
                logs.log("Instruction: InitializeMint");
                Self::process_initialize_mint(program_id, config, store, accounts, decimals, logs)
            }
            TokenInstruction::MintTo { amount } => {
                logs.log("Instruction: MintTo");
                Self::process_mint_to(program_id, config, store, accounts, amount, logs)
            }
        }
    }

    fn process_initialize_mint<S: AccountStore>(
        program_id: &Pubkey,
        config: &ProgramConfig,
        store: &mut S,
        accounts: &[AccountMeta],
        decimals: u8,
        logs: &mut Logs,
    ) -> Result<(), ErrorKind> {
        let [mint_meta, rent_meta, payer_meta, authority_meta, rest @ ..] = accounts else {
            return Err(ValidationError::MalformedAccountList.into());
        };
        let freeze_meta = match rest {
            [] => None,
            [freeze_meta] if !freeze_meta.is_writable => Some(freeze_meta),
            _ => return Err(ValidationError::MalformedAccountList.into()),
        };
        if !mint_meta.is_writable
            || rent_meta.is_writable
            || rent_meta.pubkey != sysvar::rent::id()
            || authority_meta.is_writable
        {
            return Err(ValidationError::MalformedAccountList.into());
        }
        if !payer_meta.is_signer || !authority_meta.is_signer {
            return Err(ValidationError::MissingSigner.into());
        }
        if config.mint_profile == MintProfile::NonTransferable && decimals != 0 {
            return Err(ValidationError::InvalidDecimals.into());
        }

        let mut mint_account = load_account(store, &mint_meta.pubkey)?;
        let rent_account = load_account(store, &rent_meta.pubkey)?;
        if mint_account.owner != *program_id || rent_account.owner != sysvar::id() {
            return Err(ValidationError::InvalidAccountOwner.into());
        }
        let mint = load_record::<MintRecord>(&mint_account.data)?;
        if mint.is_initialized() {
            return Err(StateError::AlreadyInitialized.into());
        }
        let rent = unpack_rent(&rent_account.data).map_err(record_error)?;
        if !rent.is_exempt(mint_account.lamports, mint_account.data.len()) {
            return Err(ValidationError::InsufficientRent.into());
        }

        let mint = MintRecord {
            mint_authority: authority_meta.pubkey,
            supply: 0,
            decimals,
            is_initialized: true,
            freeze_authority: COption::from(freeze_meta.map(|meta| meta.pubkey)),
        };
        pack_prefix(&mint, &mut mint_account.data).map_err(record_error)?;
        store.put(mint_meta.pubkey, mint_account)?;

        logs.log(format!(
            "Initialized mint {} with {} decimals",
            mint_meta.pubkey, decimals
        ));
        Ok(())
    }

    fn process_mint_to<S: AccountStore>(
        program_id: &Pubkey,
        config: &ProgramConfig,
        store: &mut S,
        accounts: &[AccountMeta],
        amount: u64,
        logs: &mut Logs,
    ) -> Result<(), ErrorKind> {
        let [mint_meta, destination_meta, authority_meta] = accounts else {
            return Err(ValidationError::MalformedAccountList.into());
        };
        if !mint_meta.is_writable
            || !destination_meta.is_writable
            || authority_meta.is_writable
            || mint_meta.pubkey == destination_meta.pubkey
        {
            return Err(ValidationError::MalformedAccountList.into());
        }
        if !authority_meta.is_signer {
            return Err(ValidationError::MissingSigner.into());
        }

        let mut mint_account = load_account(store, &mint_meta.pubkey)?;
        let mut destination_account = load_account(store, &destination_meta.pubkey)?;
        if mint_account.owner != *program_id || destination_account.owner != *program_id {
            return Err(ValidationError::InvalidAccountOwner.into());
        }
        let mut mint = load_record::<MintRecord>(&mint_account.data)?;
        let mut destination = load_token_account(&destination_account.data)?;

        let non_transferable = config.mint_profile == MintProfile::NonTransferable;
        if amount == 0 || (non_transferable && amount != 1) {
            return Err(ValidationError::InvalidAmount.into());
        }
        if !mint.is_initialized() {
            return Err(StateError::MintNotInitialized.into());
        }
        if mint.mint_authority != authority_meta.pubkey {
            return Err(StateError::AuthorityMismatch.into());
        }
        if !destination.is_initialized() {
            return Err(StateError::TokenAccountNotInitialized.into());
        }
        if destination.mint != mint_meta.pubkey {
            return Err(StateError::MintMismatch.into());
        }
        if destination.is_frozen {
            return Err(StateError::AccountFrozen.into());
        }
        if non_transferable && mint.supply != 0 {
            return Err(StateError::SupplyCapReached.into());
        }

        mint.supply = mint
            .supply
            .checked_add(amount)
            .ok_or(ArithmeticError::SupplyOverflow)?;
        destination.amount = destination
            .amount
            .checked_add(amount)
            .ok_or(ArithmeticError::BalanceOverflow)?;
        // The mint's freeze authority pins a non-transferable token to its
        // first holder.
        let freeze = non_transferable && mint.freeze_authority.is_some();
        destination.is_frozen = freeze;

        pack_prefix(&mint, &mut mint_account.data).map_err(record_error)?;
        pack_prefix(&destination, &mut destination_account.data).map_err(record_error)?;
        store.put_all(vec![
            (mint_meta.pubkey, mint_account),
            (destination_meta.pubkey, destination_account),
        ])?;

        logs.log(format!(
            "Minted {} to {}, supply {}",
            amount, destination_meta.pubkey, mint.supply
        ));
        if freeze {
            logs.log(format!("Froze token account {}", destination_meta.pubkey));
        }
        Ok(())
    }
}

fn load_account<S: AccountStore>(store: &S, address: &Pubkey) -> Result<Account, StorageError> {
    store.get(address).ok_or(StorageError::NotFound)
}

fn load_record<T: Pack>(data: &[u8]) -> Result<T, ErrorKind> {
    if data.len() < T::LEN {
        return Err(ValidationError::BufferTooSmall.into());
    }
    unpack_prefix(data).map_err(record_error)
}

/// Token accounts are exactly `TokenAccountRecord::LEN` bytes, which keeps
/// mint buffers from being read as one.
fn load_token_account(data: &[u8]) -> Result<TokenAccountRecord, ErrorKind> {
    let record = load_record::<TokenAccountRecord>(data)?;
    if data.len() != TokenAccountRecord::LEN {
        return Err(ValidationError::InvalidAccountData.into());
    }
    Ok(record)
}

fn record_error(err: ProgramError) -> ErrorKind {
    match err {
        ProgramError::AccountDataTooSmall => ValidationError::BufferTooSmall.into(),
        _ => ValidationError::InvalidAccountData.into(),
    }
}
