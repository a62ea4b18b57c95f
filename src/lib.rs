pub mod account_store;
pub mod config;
pub mod entrypoint;
pub mod error;
pub mod instruction;
pub mod ledger;
pub mod processor;
pub mod report;
pub mod state;

pub use entrypoint::process_instruction;
pub use solana_program;
