// Typed views over account buffers.
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{
    program_error::ProgramError,
    program_option::COption,
    program_pack::{IsInitialized, Pack, Sealed},
    pubkey::Pubkey,
    rent::Rent,
};

/// Mint metadata. Layout is byte-compatible with SPL Token's `Mint`.
///
/// ```text
/// 0   36  mint_authority    COption<Pubkey>, always Some once initialized
/// 36  8   supply            u64 LE
/// 44  1   decimals          u8
/// 45  1   is_initialized    0 | 1
/// 46  36  freeze_authority  COption<Pubkey>
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MintRecord {
    pub mint_authority: Pubkey,
    pub supply: u64,
    pub decimals: u8,
    pub is_initialized: bool,
    pub freeze_authority: COption<Pubkey>,
}

impl Sealed for MintRecord {}

impl IsInitialized for MintRecord {
    fn is_initialized(&self) -> bool {
        self.is_initialized
    }
}

impl Pack for MintRecord {
    const LEN: usize = 82;

    fn unpack_from_slice(src: &[u8]) -> Result<Self, ProgramError> {
        let src = array_ref![src, 0, 82];
        let (mint_authority, supply, decimals, is_initialized, freeze_authority) =
            array_refs![src, 36, 8, 1, 1, 36];
        let mint_authority = unpack_coption_key(mint_authority)?;
        let is_initialized = match is_initialized {
            [0] => false,
            [1] => true,
            _ => return Err(ProgramError::InvalidAccountData),
        };
        Ok(MintRecord {
            // An uninitialized mint decodes with the default authority.
            mint_authority: mint_authority.unwrap_or_default(),
            supply: u64::from_le_bytes(*supply),
            decimals: decimals[0],
            is_initialized,
            freeze_authority: unpack_coption_key(freeze_authority)?,
        })
    }

    fn pack_into_slice(&self, dst: &mut [u8]) {
        let dst = array_mut_ref![dst, 0, 82];
        let (mint_authority_dst, supply_dst, decimals_dst, is_initialized_dst, freeze_authority_dst) =
            mut_array_refs![dst, 36, 8, 1, 1, 36];
        let mint_authority = if self.is_initialized {
            COption::Some(self.mint_authority)
        } else {
            COption::None
        };
        pack_coption_key(&mint_authority, mint_authority_dst);
        *supply_dst = self.supply.to_le_bytes();
        decimals_dst[0] = self.decimals;
        is_initialized_dst[0] = self.is_initialized as u8;
        pack_coption_key(&self.freeze_authority, freeze_authority_dst);
    }
}

/// Balance of one owner in one mint. The first 72 bytes match SPL Token's
/// account layout. Token-account buffers are exactly `LEN` bytes, so they
/// can never pass for a mint, which needs at least `MintRecord::LEN`.
///
/// ```text
/// 0   32  mint       Pubkey, all zero while uninitialized
/// 32  32  owner      Pubkey
/// 64  8   amount     u64 LE
/// 72  1   is_frozen  0 | 1
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenAccountRecord {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub is_frozen: bool,
}

impl Sealed for TokenAccountRecord {}

impl IsInitialized for TokenAccountRecord {
    fn is_initialized(&self) -> bool {
        self.mint != Pubkey::default()
    }
}

impl Pack for TokenAccountRecord {
    const LEN: usize = 73;

    fn unpack_from_slice(src: &[u8]) -> Result<Self, ProgramError> {
        let src = array_ref![src, 0, 73];
        let (mint, owner, amount, is_frozen) = array_refs![src, 32, 32, 8, 1];
        let is_frozen = match is_frozen {
            [0] => false,
            [1] => true,
            _ => return Err(ProgramError::InvalidAccountData),
        };
        Ok(TokenAccountRecord {
            mint: Pubkey::new_from_array(*mint),
            owner: Pubkey::new_from_array(*owner),
            amount: u64::from_le_bytes(*amount),
            is_frozen,
        })
    }

    fn pack_into_slice(&self, dst: &mut [u8]) {
        let dst = array_mut_ref![dst, 0, 73];
        let (mint_dst, owner_dst, amount_dst, is_frozen_dst) = mut_array_refs![dst, 32, 32, 8, 1];
        mint_dst.copy_from_slice(self.mint.as_ref());
        owner_dst.copy_from_slice(self.owner.as_ref());
        *amount_dst = self.amount.to_le_bytes();
        is_frozen_dst[0] = self.is_frozen as u8;
    }
}

/// Reads a record from the front of a buffer that may be longer than the
/// record itself.
pub fn unpack_prefix<T: Pack>(data: &[u8]) -> Result<T, ProgramError> {
    match data.get(..T::LEN) {
        Some(src) => T::unpack_from_slice(src),
        None => Err(ProgramError::AccountDataTooSmall),
    }
}

/// Writes a record over the front of `data`, leaving trailing bytes alone.
pub fn pack_prefix<T: Pack>(record: &T, data: &mut [u8]) -> Result<(), ProgramError> {
    match data.get_mut(..T::LEN) {
        Some(dst) => {
            record.pack_into_slice(dst);
            Ok(())
        }
        None => Err(ProgramError::AccountDataTooSmall),
    }
}

/// Byte length of the rent sysvar account data.
pub const RENT_SYSVAR_LEN: usize = 17;

/// Rent sysvar data: `lamports_per_byte_year: u64 | exemption_threshold: f64 | burn_percent: u8`.
pub fn unpack_rent(data: &[u8]) -> Result<Rent, ProgramError> {
    let src = data
        .get(..RENT_SYSVAR_LEN)
        .ok_or(ProgramError::InvalidAccountData)?;
    let src = array_ref![src, 0, 17];
    let (lamports_per_byte_year, exemption_threshold, burn_percent) = array_refs![src, 8, 8, 1];
    Ok(Rent {
        lamports_per_byte_year: u64::from_le_bytes(*lamports_per_byte_year),
        exemption_threshold: f64::from_le_bytes(*exemption_threshold),
        burn_percent: burn_percent[0],
    })
}

pub fn pack_rent(rent: &Rent) -> Vec<u8> {
    let mut data = vec![0u8; RENT_SYSVAR_LEN];
    let dst = array_mut_ref![data, 0, 17];
    let (lamports_per_byte_year, exemption_threshold, burn_percent) =
        mut_array_refs![dst, 8, 8, 1];
    *lamports_per_byte_year = rent.lamports_per_byte_year.to_le_bytes();
    *exemption_threshold = rent.exemption_threshold.to_le_bytes();
    burn_percent[0] = rent.burn_percent;
    data
}

fn pack_coption_key(src: &COption<Pubkey>, dst: &mut [u8; 36]) {
    let (tag, body) = mut_array_refs![dst, 4, 32];
    match src {
        COption::Some(key) => {
            *tag = [1, 0, 0, 0];
            body.copy_from_slice(key.as_ref());
        }
        COption::None => {
            *tag = [0; 4];
            *body = [0; 32];
        }
    }
}

fn unpack_coption_key(src: &[u8; 36]) -> Result<COption<Pubkey>, ProgramError> {
    let (tag, body) = array_refs![src, 4, 32];
    match *tag {
        [0, 0, 0, 0] => Ok(COption::None),
        [1, 0, 0, 0] => Ok(COption::Some(Pubkey::new_from_array(*body))),
        _ => Err(ProgramError::InvalidAccountData),
    }
}
