// Instructions understood by the program, their wire codec and
// client-side builders.
use borsh::BorshDeserialize;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};

use crate::{config::InitializeMintLayout, error::DecodeError};

pub const INITIALIZE_MINT: u8 = 0;
pub const MINT_TO: u8 = 1;

/// Wire format, one leading discriminant byte:
///
/// ```text
/// InitializeMint: [0][decimals: u8]      (or [0] under the implicit layout)
/// MintTo:         [1][amount: u64 LE]
/// ```
///
/// Payloads are borsh-encoded. Bytes past a payload are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenInstruction {
    /// Accounts:
    /// 0. `[writable]` mint
    /// 1. `[]` rent sysvar
    /// 2. `[signer]` payer
    /// 3. `[signer]` mint authority
    /// 4. `[]` freeze authority, optional
    InitializeMint { decimals: u8 },
    /// Accounts:
    /// 0. `[writable]` mint
    /// 1. `[writable]` destination token account
    /// 2. `[signer]` mint authority
    MintTo { amount: u64 },
}

#[derive(BorshDeserialize)]
struct InitializeMintPayload {
    decimals: u8,
}

#[derive(BorshDeserialize)]
struct MintToPayload {
    amount: u64,
}

fn read_payload<T: BorshDeserialize>(mut rest: &[u8]) -> Result<T, DecodeError> {
    T::deserialize(&mut rest).map_err(|_| DecodeError::Truncated)
}

impl TokenInstruction {
    pub fn unpack(input: &[u8], layout: InitializeMintLayout) -> Result<Self, DecodeError> {
        let (&tag, rest) = input.split_first().ok_or(DecodeError::Truncated)?;
        Ok(match tag {
            INITIALIZE_MINT => match layout {
                InitializeMintLayout::WithDecimals => {
                    let payload: InitializeMintPayload = read_payload(rest)?;
                    Self::InitializeMint {
                        decimals: payload.decimals,
                    }
                }
                InitializeMintLayout::Implicit { decimals } => Self::InitializeMint { decimals },
            },
            MINT_TO => {
                let payload: MintToPayload = read_payload(rest)?;
                Self::MintTo {
                    amount: payload.amount,
                }
            }
            other => return Err(DecodeError::UnknownDiscriminant(other)),
        })
    }

    pub fn pack(&self, layout: InitializeMintLayout) -> Vec<u8> {
        let mut buf = Vec::with_capacity(9);
        match self {
            Self::InitializeMint { decimals } => {
                buf.push(INITIALIZE_MINT);
                if layout == InitializeMintLayout::WithDecimals {
                    buf.push(*decimals);
                }
            }
            Self::MintTo { amount } => {
                buf.push(MINT_TO);
                buf.extend_from_slice(&amount.to_le_bytes());
            }
        }
        buf
    }
}

fn initialize_mint_accounts(
    mint: &Pubkey,
    payer: &Pubkey,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
) -> Vec<AccountMeta> {
    let mut accounts = vec![
        AccountMeta::new(*mint, false),
        AccountMeta::new_readonly(sysvar::rent::id(), false),
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(*mint_authority, true),
    ];
    if let Some(freeze_authority) = freeze_authority {
        accounts.push(AccountMeta::new_readonly(*freeze_authority, false));
    }
    accounts
}

/// Builds a canonical `InitializeMint` instruction.
pub fn initialize_mint(
    program_id: &Pubkey,
    mint: &Pubkey,
    payer: &Pubkey,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
    decimals: u8,
) -> Instruction {
    Instruction::new_with_bytes(
        *program_id,
        &TokenInstruction::InitializeMint { decimals }.pack(InitializeMintLayout::WithDecimals),
        initialize_mint_accounts(mint, payer, mint_authority, freeze_authority),
    )
}

/// Builds an `InitializeMint` for deployments using the implicit layout.
pub fn initialize_mint_implicit(
    program_id: &Pubkey,
    mint: &Pubkey,
    payer: &Pubkey,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
) -> Instruction {
    // The implicit layout drops the decimals byte, any value packs the same.
    let data = TokenInstruction::InitializeMint { decimals: 0 }
        .pack(InitializeMintLayout::Implicit { decimals: 0 });
    Instruction::new_with_bytes(
        *program_id,
        &data,
        initialize_mint_accounts(mint, payer, mint_authority, freeze_authority),
    )
}

pub fn mint_to(
    program_id: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    mint_authority: &Pubkey,
    amount: u64,
) -> Instruction {
    Instruction::new_with_bytes(
        *program_id,
        &TokenInstruction::MintTo { amount }.pack(InitializeMintLayout::WithDecimals),
        vec![
            AccountMeta::new(*mint, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(*mint_authority, true),
        ],
    )
}
