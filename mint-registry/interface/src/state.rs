//! Record layouts and the versioned byte codec
//!
//! The registry's record schema has evolved without a version tag, so the
//! total byte length of an account is the only signal for picking a decode
//! path. Two layouts exist on-chain:
//!
//! * legacy, 67 bytes: `[is_initialized:1][mint:32][symbol:17][name:17]`
//! * current, 140 bytes: `[mint_authority:32][freeze_authority:32]
//!   [supply:8 LE][decimals:1][is_initialized:1][mint:32][symbol:17][name:17]`
//!
//! Symbol and name are stored as a 1-byte length prefix followed by a fixed
//! 16-byte field; trailing bytes beyond the declared length are undefined and
//! ignored on decode.
//!
//! The offset constants below are the single source of truth for both the
//! codec and the `memcmp` filters built by the client crate. Wrong offsets
//! produce garbage fields, not errors, so keep them in lock step.

use {
    crate::error::RegistryError,
    arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs},
    solana_program::{program_error::ProgramError, pubkey::Pubkey},
};

/// Maximum byte length of a symbol or name.
pub const MAX_SYMBOL_NAME_LEN: usize = 16;

/// Packed size of a length-prefixed string field.
const STRING_FIELD_LEN: usize = 1 + MAX_SYMBOL_NAME_LEN;

/// Total packed size of a legacy record.
pub const LEGACY_RECORD_LEN: usize = 67;
/// Total packed size of a current record.
pub const RECORD_LEN: usize = 140;

/// Byte offset of the mint authority in a current record.
pub const MINT_AUTHORITY_OFFSET: usize = 0;
/// Byte offset of the freeze authority in a current record.
pub const FREEZE_AUTHORITY_OFFSET: usize = 32;
/// Byte offset of the supply in a current record.
pub const SUPPLY_OFFSET: usize = 64;
/// Byte offset of the decimals in a current record.
pub const DECIMALS_OFFSET: usize = 72;
/// Byte offset of the initialization flag in a current record.
pub const IS_INITIALIZED_OFFSET: usize = 73;
/// Byte offset of the mint in a current record.
pub const MINT_OFFSET: usize = 74;
/// Byte offset of the symbol length prefix in a current record.
pub const SYMBOL_LEN_OFFSET: usize = 106;
/// Byte offset of the symbol payload in a current record.
pub const SYMBOL_OFFSET: usize = 107;
/// Byte offset of the name length prefix in a current record.
pub const NAME_LEN_OFFSET: usize = 123;
/// Byte offset of the name payload in a current record.
pub const NAME_OFFSET: usize = 124;

/// Byte offset of the mint in a legacy record.
pub const LEGACY_MINT_OFFSET: usize = 1;

/// Record schema version, keyed by total packed length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaVersion {
    /// Original 67-byte layout: initialization flag, mint, symbol, name.
    Legacy,
    /// Current 140-byte layout, which adds the mint authority, freeze
    /// authority, supply, and decimals ahead of the mint.
    Current,
}

impl SchemaVersion {
    /// Selects the schema for a packed record of `len` bytes.
    pub fn from_len(len: usize) -> Result<Self, ProgramError> {
        match len {
            LEGACY_RECORD_LEN => Ok(Self::Legacy),
            RECORD_LEN => Ok(Self::Current),
            _ if len < LEGACY_RECORD_LEN => Err(RegistryError::TruncatedRecord.into()),
            _ => Err(RegistryError::UnknownSchema.into()),
        }
    }

    /// Total packed size of a record in this schema.
    pub const fn packed_len(&self) -> usize {
        match self {
            Self::Legacy => LEGACY_RECORD_LEN,
            Self::Current => RECORD_LEN,
        }
    }
}

/// Mint extension record.
///
/// The mint authority, freeze authority, supply, and decimals are only
/// present in the current schema; decoding a legacy record leaves them at
/// their defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MintExtension {
    /// Set on creation; kept for legacy-format compatibility.
    pub is_initialized: bool,
    /// Authority allowed to mint new tokens.
    pub mint_authority: Pubkey,
    /// Authority allowed to freeze token accounts.
    pub freeze_authority: Pubkey,
    /// Total token supply at registration time.
    pub supply: u64,
    /// Number of base-10 digits to the right of the decimal place.
    pub decimals: u8,
    /// The token mint this record describes. Never mutated after creation.
    pub mint: Pubkey,
    /// Human-readable symbol, at most 16 UTF-8 bytes.
    pub symbol: String,
    /// Human-readable name, at most 16 UTF-8 bytes.
    pub name: String,
}

impl MintExtension {
    /// Packs the record into the byte layout of the given schema version.
    ///
    /// Fails with [`RegistryError::FieldTooLong`] if the symbol or name
    /// exceeds 16 UTF-8 bytes. Unused trailing bytes of the string fields are
    /// zeroed.
    pub fn pack(&self, version: SchemaVersion) -> Result<Vec<u8>, ProgramError> {
        let mut buf = vec![0u8; version.packed_len()];
        match version {
            SchemaVersion::Current => {
                let dst = array_mut_ref![buf, 0, RECORD_LEN];
                let (
                    mint_authority_dst,
                    freeze_authority_dst,
                    supply_dst,
                    decimals_dst,
                    is_initialized_dst,
                    mint_dst,
                    symbol_dst,
                    name_dst,
                ) = mut_array_refs![dst, 32, 32, 8, 1, 1, 32, 17, 17];
                mint_authority_dst.copy_from_slice(self.mint_authority.as_ref());
                freeze_authority_dst.copy_from_slice(self.freeze_authority.as_ref());
                *supply_dst = self.supply.to_le_bytes();
                decimals_dst[0] = self.decimals;
                is_initialized_dst[0] = self.is_initialized as u8;
                mint_dst.copy_from_slice(self.mint.as_ref());
                pack_string_field(&self.symbol, symbol_dst)?;
                pack_string_field(&self.name, name_dst)?;
            }
            SchemaVersion::Legacy => {
                let dst = array_mut_ref![buf, 0, LEGACY_RECORD_LEN];
                let (is_initialized_dst, mint_dst, symbol_dst, name_dst) =
                    mut_array_refs![dst, 1, 32, 17, 17];
                is_initialized_dst[0] = self.is_initialized as u8;
                mint_dst.copy_from_slice(self.mint.as_ref());
                pack_string_field(&self.symbol, symbol_dst)?;
                pack_string_field(&self.name, name_dst)?;
            }
        }
        Ok(buf)
    }

    /// Unpacks a record, selecting the schema by total buffer length.
    pub fn unpack(src: &[u8]) -> Result<Self, ProgramError> {
        match SchemaVersion::from_len(src.len())? {
            SchemaVersion::Current => {
                let src = array_ref![src, 0, RECORD_LEN];
                let (
                    mint_authority,
                    freeze_authority,
                    supply,
                    decimals,
                    is_initialized,
                    mint,
                    symbol,
                    name,
                ) = array_refs![src, 32, 32, 8, 1, 1, 32, 17, 17];
                Ok(Self {
                    is_initialized: unpack_bool(is_initialized)?,
                    mint_authority: Pubkey::new_from_array(*mint_authority),
                    freeze_authority: Pubkey::new_from_array(*freeze_authority),
                    supply: u64::from_le_bytes(*supply),
                    decimals: decimals[0],
                    mint: Pubkey::new_from_array(*mint),
                    symbol: unpack_string_field(symbol),
                    name: unpack_string_field(name),
                })
            }
            SchemaVersion::Legacy => {
                let src = array_ref![src, 0, LEGACY_RECORD_LEN];
                let (is_initialized, mint, symbol, name) = array_refs![src, 1, 32, 17, 17];
                Ok(Self {
                    is_initialized: unpack_bool(is_initialized)?,
                    mint: Pubkey::new_from_array(*mint),
                    symbol: unpack_string_field(symbol),
                    name: unpack_string_field(name),
                    ..Self::default()
                })
            }
        }
    }
}

fn pack_string_field(
    value: &str,
    dst: &mut [u8; STRING_FIELD_LEN],
) -> Result<(), ProgramError> {
    let bytes = value.as_bytes();
    if bytes.len() > MAX_SYMBOL_NAME_LEN {
        return Err(RegistryError::FieldTooLong.into());
    }
    dst[0] = bytes.len() as u8;
    dst[1..1 + bytes.len()].copy_from_slice(bytes);
    Ok(())
}

fn unpack_string_field(src: &[u8; STRING_FIELD_LEN]) -> String {
    // A corrupt prefix is clamped to the field capacity rather than read past
    // the field. Records were written before any UTF-8 validation existed, so
    // decode lossily instead of failing the whole query over a display field.
    let len = (src[0] as usize).min(MAX_SYMBOL_NAME_LEN);
    String::from_utf8_lossy(&src[1..1 + len]).into_owned()
}

fn unpack_bool(src: &[u8; 1]) -> Result<bool, ProgramError> {
    match src {
        [0] => Ok(false),
        [1] => Ok(true),
        _ => Err(ProgramError::InvalidAccountData),
    }
}
