use solana_program::program_error::ProgramError;
use thiserror::Error;

/// Failures while reading instruction bytes.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unknown instruction discriminant {0}")]
    UnknownDiscriminant(u8),
    #[error("instruction data truncated")]
    Truncated,
}

/// Failures of the account list or of an account's shape.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("malformed account list")]
    MalformedAccountList,
    #[error("missing required signature")]
    MissingSigner,
    #[error("account buffer too small")]
    BufferTooSmall,
    #[error("account is not rent exempt")]
    InsufficientRent,
    #[error("account not owned by this program")]
    InvalidAccountOwner,
    #[error("invalid account data")]
    InvalidAccountData,
    #[error("invalid mint amount")]
    InvalidAmount,
    #[error("instruction addressed to another program")]
    IncorrectProgramId,
    #[error("decimals not allowed by this deployment")]
    InvalidDecimals,
}

/// Failures caused by the current state of a record.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("mint already initialized")]
    AlreadyInitialized,
    #[error("mint not initialized")]
    MintNotInitialized,
    #[error("mint authority mismatch")]
    AuthorityMismatch,
    #[error("token account not initialized")]
    TokenAccountNotInitialized,
    #[error("token account belongs to another mint")]
    MintMismatch,
    #[error("token account is frozen")]
    AccountFrozen,
    #[error("mint supply cap reached")]
    SupplyCapReached,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("mint supply overflow")]
    SupplyOverflow,
    #[error("token account balance overflow")]
    BalanceOverflow,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("account already exists")]
    AlreadyExists,
    #[error("account not found")]
    NotFound,
    #[error("account data size cannot change")]
    SizeMismatch,
    #[error("account data already borrowed")]
    BorrowFailed,
}

/// Stable error surface of a failed instruction. Clients branch on this.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ErrorKind {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ErrorKind {
    /// Numeric code reported as `ProgramError::Custom`. Grouped by hundreds.
    pub fn code(&self) -> u32 {
        match self {
            ErrorKind::Decode(e) => match e {
                DecodeError::UnknownDiscriminant(_) => 0,
                DecodeError::Truncated => 1,
            },
            ErrorKind::Validation(e) => match e {
                ValidationError::MalformedAccountList => 100,
                ValidationError::MissingSigner => 101,
                ValidationError::BufferTooSmall => 102,
                ValidationError::InsufficientRent => 103,
                ValidationError::InvalidAccountOwner => 104,
                ValidationError::InvalidAccountData => 105,
                ValidationError::InvalidAmount => 106,
                ValidationError::IncorrectProgramId => 107,
                ValidationError::InvalidDecimals => 108,
            },
            ErrorKind::State(e) => match e {
                StateError::AlreadyInitialized => 200,
                StateError::MintNotInitialized => 201,
                StateError::AuthorityMismatch => 202,
                StateError::TokenAccountNotInitialized => 203,
                StateError::MintMismatch => 204,
                StateError::AccountFrozen => 205,
                StateError::SupplyCapReached => 206,
            },
            ErrorKind::Arithmetic(e) => match e {
                ArithmeticError::SupplyOverflow => 300,
                ArithmeticError::BalanceOverflow => 301,
            },
            ErrorKind::Storage(e) => match e {
                StorageError::AlreadyExists => 400,
                StorageError::NotFound => 401,
                StorageError::SizeMismatch => 402,
                StorageError::BorrowFailed => 403,
            },
        }
    }
}

impl From<ErrorKind> for u32 {
    fn from(e: ErrorKind) -> u32 {
        e.code()
    }
}

impl From<ErrorKind> for ProgramError {
    fn from(e: ErrorKind) -> Self {
        ProgramError::Custom(e.into())
    }
}
