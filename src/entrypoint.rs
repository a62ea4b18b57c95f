// On-chain entry: adapts the runtime's account slice to `AccountStore`.
use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, instruction::AccountMeta,
    program_error::ProgramError, pubkey::Pubkey,
};

use crate::account_store::{Account, AccountStore};
use crate::config::ProgramConfig;
use crate::error::StorageError;
use crate::processor::Processor;

#[cfg(not(feature = "no-entrypoint"))]
solana_program::entrypoint!(process_instruction);

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let metas: Vec<AccountMeta> = accounts
        .iter()
        .map(|info| AccountMeta {
            pubkey: *info.key,
            is_signer: info.is_signer,
            is_writable: info.is_writable,
        })
        .collect();
    let mut store = AccountInfoStore::new(accounts);

    Processor::process(
        program_id,
        &ProgramConfig::default(),
        &mut store,
        &metas,
        instruction_data,
    )
    .into_result()
    .map_err(ProgramError::from)
}

/// `AccountStore` over the accounts the runtime passed to the program.
///
/// Only account data is written back; lamports and owner belong to the
/// runtime, and data cannot change size.
pub struct AccountInfoStore<'a, 'info> {
    accounts: &'a [AccountInfo<'info>],
}

impl<'a, 'info> AccountInfoStore<'a, 'info> {
    pub fn new(accounts: &'a [AccountInfo<'info>]) -> Self {
        Self { accounts }
    }

    fn find(&self, address: &Pubkey) -> Option<&'a AccountInfo<'info>> {
        self.accounts.iter().find(|info| info.key == address)
    }
}

impl AccountStore for AccountInfoStore<'_, '_> {
    fn get(&self, address: &Pubkey) -> Option<Account> {
        let info = self.find(address)?;
        let data = info.try_borrow_data().ok()?.to_vec();
        Some(Account {
            owner: *info.owner,
            data,
            lamports: info.lamports(),
            executable: info.executable,
        })
    }

    fn put(&mut self, address: Pubkey, account: Account) -> Result<(), StorageError> {
        let info = self.find(&address).ok_or(StorageError::NotFound)?;
        let mut data = info
            .try_borrow_mut_data()
            .map_err(|_| StorageError::BorrowFailed)?;
        if data.len() != account.data.len() {
            return Err(StorageError::SizeMismatch);
        }
        data.copy_from_slice(&account.data);
        Ok(())
    }

    /// Borrows and size-checks every target before copying into any of them.
    fn put_all(&mut self, writes: Vec<(Pubkey, Account)>) -> Result<(), StorageError> {
        let mut staged = Vec::with_capacity(writes.len());
        for (address, account) in &writes {
            let info = self.find(address).ok_or(StorageError::NotFound)?;
            let data = info
                .try_borrow_mut_data()
                .map_err(|_| StorageError::BorrowFailed)?;
            if data.len() != account.data.len() {
                return Err(StorageError::SizeMismatch);
            }
            staged.push((data, account));
        }
        for (mut data, account) in staged {
            data.copy_from_slice(&account.data);
        }
        Ok(())
    }
}
