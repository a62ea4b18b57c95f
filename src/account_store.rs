use std::collections::HashMap;

use solana_program::pubkey::Pubkey;

use crate::error::StorageError;

/// An addressed, owner-tagged byte buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Account {
    pub owner: Pubkey,
    pub data: Vec<u8>,
    pub lamports: u64,
    pub executable: bool,
}

impl Account {
    pub fn new(owner: Pubkey, space: usize, lamports: u64) -> Self {
        Self {
            owner,
            data: vec![0; space],
            lamports,
            executable: false,
        }
    }
}

/// Read and write access to accounts by address.
///
/// Callers hold exclusive access to every account they touch for the
/// duration of one instruction; implementations do no locking.
pub trait AccountStore {
    fn get(&self, address: &Pubkey) -> Option<Account>;

    fn put(&mut self, address: Pubkey, account: Account) -> Result<(), StorageError>;

    /// Writes several accounts as one unit. Stores that can fail part way
    /// through must check every write up front.
    fn put_all(&mut self, writes: Vec<(Pubkey, Account)>) -> Result<(), StorageError> {
        for (address, account) in writes {
            self.put(address, account)?;
        }
        Ok(())
    }
}

/// Stores that can create new accounts.
pub trait AccountAllocator: AccountStore {
    /// Size and lamports come from the caller; rent is not computed here.
    fn allocate(
        &mut self,
        address: Pubkey,
        owner: Pubkey,
        space: usize,
        lamports: u64,
    ) -> Result<Account, StorageError>;
}

/// Process-lifetime store. Accounts are never removed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InMemoryAccountStore {
    accounts: HashMap<Pubkey, Account>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an account at construction time, replacing any previous one.
    pub fn with_account(mut self, address: Pubkey, account: Account) -> Self {
        self.accounts.insert(address, account);
        self
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get(&self, address: &Pubkey) -> Option<Account> {
        self.accounts.get(address).cloned()
    }

    fn put(&mut self, address: Pubkey, account: Account) -> Result<(), StorageError> {
        self.accounts.insert(address, account);
        Ok(())
    }
}

impl AccountAllocator for InMemoryAccountStore {
    fn allocate(
        &mut self,
        address: Pubkey,
        owner: Pubkey,
        space: usize,
        lamports: u64,
    ) -> Result<Account, StorageError> {
        if self.accounts.contains_key(&address) {
            return Err(StorageError::AlreadyExists);
        }
        let account = Account::new(owner, space, lamports);
        self.accounts.insert(address, account.clone());
        Ok(account)
    }
}
