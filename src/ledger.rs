// In-process host for the program: owns account storage and rent
// parameters, and executes client batches in submission order.
use solana_program::{
    hash::{hashv, Hash},
    instruction::{AccountMeta, Instruction},
    msg,
    program_pack::Pack,
    pubkey::Pubkey,
    rent::Rent,
    sysvar,
};
use spl_associated_token_account::get_associated_token_address_with_program_id;

use crate::account_store::{Account, AccountAllocator, AccountStore, InMemoryAccountStore};
use crate::config::ProgramConfig;
use crate::error::{ErrorKind, StorageError, ValidationError};
use crate::processor::Processor;
use crate::report::{ExecutionReport, Logs, Outcome};
use crate::state::{pack_prefix, pack_rent, unpack_prefix, MintRecord, TokenAccountRecord};

pub struct Ledger {
    program_id: Pubkey,
    config: ProgramConfig,
    rent: Rent,
    slot: u64,
    store: InMemoryAccountStore,
}

impl Ledger {
    pub fn new(program_id: Pubkey) -> Self {
        Self::with_config(program_id, ProgramConfig::default(), Rent::default())
    }

    pub fn with_config(program_id: Pubkey, config: ProgramConfig, rent: Rent) -> Self {
        let data = pack_rent(&rent);
        let lamports = rent.minimum_balance(data.len());
        let store = InMemoryAccountStore::new().with_account(
            sysvar::rent::id(),
            Account {
                owner: sysvar::id(),
                data,
                lamports,
                executable: false,
            },
        );
        Self {
            program_id,
            config,
            rent,
            slot: 0,
            store,
        }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn minimum_rent_exemption(&self, space: usize) -> u64 {
        self.rent.minimum_balance(space)
    }

    /// Opaque reference to the current block, changes on every submit.
    pub fn current_block_reference(&self) -> Hash {
        hashv(&[b"block".as_ref(), &self.slot.to_le_bytes()])
    }

    /// Creates a zeroed account funded at the rent-exempt minimum.
    pub fn create_account(
        &mut self,
        address: Pubkey,
        space: usize,
        owner: Pubkey,
    ) -> Result<Account, StorageError> {
        let lamports = self.minimum_rent_exemption(space);
        self.store.allocate(address, owner, space, lamports)
    }

    pub fn create_mint_account(&mut self, address: Pubkey) -> Result<Account, StorageError> {
        self.create_account(address, MintRecord::LEN, self.program_id)
    }

    /// Creates a token account bound to `mint` and held by `owner`.
    pub fn create_token_account(
        &mut self,
        address: Pubkey,
        mint: Pubkey,
        owner: Pubkey,
    ) -> Result<Account, StorageError> {
        let mut account = self.create_account(address, TokenAccountRecord::LEN, self.program_id)?;
        let record = TokenAccountRecord {
            mint,
            owner,
            amount: 0,
            is_frozen: false,
        };
        pack_prefix(&record, &mut account.data).map_err(|_| StorageError::SizeMismatch)?;
        self.store.put(address, account.clone())?;
        msg!("Created token account {} for mint {}", address, mint);
        Ok(account)
    }

    /// Creates the wallet's token account at its associated address.
    pub fn create_associated_token_account(
        &mut self,
        wallet: &Pubkey,
        mint: &Pubkey,
    ) -> Result<Pubkey, StorageError> {
        let address =
            get_associated_token_address_with_program_id(wallet, mint, &self.program_id);
        self.create_token_account(address, *mint, *wallet)?;
        Ok(address)
    }

    pub fn account(&self, address: &Pubkey) -> Option<Account> {
        self.store.get(address)
    }

    pub fn mint(&self, address: &Pubkey) -> Option<MintRecord> {
        self.account(address)
            .and_then(|account| unpack_prefix(&account.data).ok())
    }

    pub fn token_account(&self, address: &Pubkey) -> Option<TokenAccountRecord> {
        self.account(address)
            .filter(|account| account.data.len() == TokenAccountRecord::LEN)
            .and_then(|account| unpack_prefix(&account.data).ok())
    }

    /// Executes `instructions` in order. A meta counts as signed only when
    /// its key is in `signers`. Execution stops at the first failure;
    /// instructions already applied stay applied.
    pub fn submit(&mut self, instructions: &[Instruction], signers: &[Pubkey]) -> ExecutionReport {
        let mut report = ExecutionReport::default();
        for instruction in instructions {
            let outcome = self.execute(instruction, signers);
            let failed = !outcome.is_success();
            report.outcomes.push(outcome);
            if failed {
                break;
            }
        }
        self.slot += 1;
        report
    }

    fn execute(&mut self, instruction: &Instruction, signers: &[Pubkey]) -> Outcome {
        if instruction.program_id != self.program_id {
            let kind = ErrorKind::from(ValidationError::IncorrectProgramId);
            return Outcome::failure(
                &instruction.program_id,
                kind,
                Logs::invoke(&instruction.program_id),
            );
        }
        let accounts: Vec<AccountMeta> = instruction
            .accounts
            .iter()
            .map(|meta| AccountMeta {
                pubkey: meta.pubkey,
                is_signer: meta.is_signer && signers.contains(&meta.pubkey),
                is_writable: meta.is_writable,
            })
            .collect();
        Processor::process(
            &self.program_id,
            &self.config,
            &mut self.store,
            &accounts,
            &instruction.data,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rent_sysvar_is_installed() {
        let ledger = Ledger::new(Pubkey::new_unique());
        let rent_account = ledger.account(&sysvar::rent::id()).unwrap();
        assert_eq!(rent_account.owner, sysvar::id());
        assert_eq!(
            crate::state::unpack_rent(&rent_account.data).unwrap(),
            Rent::default()
        );
    }

    #[test]
    fn block_reference_advances_per_submit() {
        let mut ledger = Ledger::new(Pubkey::new_unique());
        let before = ledger.current_block_reference();
        assert_eq!(before, ledger.current_block_reference());
        ledger.submit(&[], &[]);
        assert_ne!(before, ledger.current_block_reference());
    }

    #[test]
    fn accounts_are_funded_for_rent() {
        let mut ledger = Ledger::new(Pubkey::new_unique());
        let mint = Pubkey::new_unique();
        let account = ledger.create_mint_account(mint).unwrap();
        assert_eq!(account.lamports, ledger.minimum_rent_exemption(MintRecord::LEN));
        assert_eq!(account.owner, *ledger.program_id());
        assert_eq!(
            ledger.create_mint_account(mint),
            Err(StorageError::AlreadyExists)
        );
    }

    #[test]
    fn associated_token_account_is_deterministic() {
        let mut ledger = Ledger::new(Pubkey::new_unique());
        let wallet = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let address = ledger.create_associated_token_account(&wallet, &mint).unwrap();
        assert_eq!(
            address,
            get_associated_token_address_with_program_id(&wallet, &mint, ledger.program_id())
        );
        let record = ledger.token_account(&address).unwrap();
        assert_eq!(record.mint, mint);
        assert_eq!(record.owner, wallet);
        assert_eq!(record.amount, 0);
        assert!(!record.is_frozen);

        ledger.create_mint_account(mint).unwrap();
        assert!(ledger.token_account(&mint).is_none());
    }

    #[test]
    fn rent_sysvar_follows_configured_rent() {
        let rent = Rent {
            lamports_per_byte_year: 7,
            ..Rent::default()
        };
        let ledger = Ledger::with_config(Pubkey::new_unique(), ProgramConfig::default(), rent.clone());
        let rent_account = ledger.account(&sysvar::rent::id()).unwrap();
        assert_eq!(crate::state::unpack_rent(&rent_account.data).unwrap(), rent);
        assert_eq!(rent_account.lamports, rent.minimum_balance(rent_account.data.len()));
    }

    #[test]
    fn foreign_program_instructions_fail() {
        let mut ledger = Ledger::new(Pubkey::new_unique());
        let other = Pubkey::new_unique();
        let report = ledger.submit(&[Instruction::new_with_bytes(other, &[0, 6], vec![])], &[]);
        assert_eq!(
            report.error(),
            Some(ValidationError::IncorrectProgramId.into())
        );
        assert!(report.logs()[0].starts_with(&format!("Program {}", other)));
    }
}
