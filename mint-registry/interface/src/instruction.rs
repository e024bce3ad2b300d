//! Instruction types

use {
    crate::{
        error::RegistryError,
        state::{MAX_SYMBOL_NAME_LEN, RECORD_LEN},
    },
    solana_program::{
        instruction::{AccountMeta, Instruction},
        program_error::ProgramError,
        pubkey::Pubkey,
    },
};

/// Instructions supported by the mint registry program.
///
/// The program indexes accounts and payload fields by position, not by name,
/// so account order, writable/signer flags, and payload field order are all
/// part of the wire contract.
#[derive(Clone, Debug, PartialEq)]
pub enum RegistryInstruction {
    /// Registers a new extension record for a mint.
    ///
    /// The extension account must be created in the same transaction, sized
    /// [`RECORD_LEN`] and owned by the registry program.
    ///
    /// Accounts expected by this instruction:
    ///   0. `[writable]` The mint to describe
    ///   1. `[writable, signer]` Fee payer
    ///   2. `[writable, signer]` The new extension account
    RegisterMint {
        /// Authority allowed to mint new tokens.
        mint_authority: Pubkey,
        /// Authority allowed to freeze token accounts.
        freeze_authority: Pubkey,
        /// Total token supply.
        supply: u64,
        /// Number of decimals.
        decimals: u8,
        /// The mint to describe.
        mint: Pubkey,
        /// Symbol, at most 16 UTF-8 bytes.
        symbol: String,
        /// Name, at most 16 UTF-8 bytes.
        name: String,
    },

    /// Closes an extension record and reclaims its rent. Terminal: the record
    /// will no longer be found by any query.
    ///
    /// Accounts expected by this instruction:
    ///   0. `[writable]` The extension account to close
    ///   1. `[writable, signer]` Fee payer, receives the reclaimed rent
    ///   2. `[writable]` The described mint
    CloseMint,

    /// Rewrites the symbol and name of an existing extension record in place.
    /// All other fields are immutable after registration.
    ///
    /// Accounts expected by this instruction:
    ///   0. `[writable]` The described mint
    ///   1. `[writable, signer]` Fee payer
    ///   2. `[writable]` The extension account to modify
    ModifyMint {
        /// New symbol, at most 16 UTF-8 bytes.
        symbol: String,
        /// New name, at most 16 UTF-8 bytes.
        name: String,
    },
}

impl RegistryInstruction {
    /// Packs the instruction into a byte buffer: a 1-byte tag followed by the
    /// payload in schema order.
    pub fn pack(&self) -> Result<Vec<u8>, ProgramError> {
        let mut buf = Vec::with_capacity(1 + RECORD_LEN);
        match self {
            Self::RegisterMint {
                mint_authority,
                freeze_authority,
                supply,
                decimals,
                mint,
                symbol,
                name,
            } => {
                buf.push(1);
                buf.extend_from_slice(mint_authority.as_ref());
                buf.extend_from_slice(freeze_authority.as_ref());
                buf.extend_from_slice(&supply.to_le_bytes());
                buf.push(*decimals);
                buf.extend_from_slice(mint.as_ref());
                pack_string(symbol, &mut buf)?;
                pack_string(name, &mut buf)?;
            }
            Self::CloseMint => buf.push(2),
            Self::ModifyMint { symbol, name } => {
                buf.push(3);
                pack_string(symbol, &mut buf)?;
                pack_string(name, &mut buf)?;
            }
        }
        Ok(buf)
    }

    /// Unpacks a byte buffer into a [`RegistryInstruction`].
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let (&tag, rest) = input
            .split_first()
            .ok_or(RegistryError::InvalidInstruction)?;
        Ok(match tag {
            1 => {
                let (mint_authority, rest) = unpack_pubkey(rest)?;
                let (freeze_authority, rest) = unpack_pubkey(rest)?;
                let (supply_bytes, rest) = unpack_bytes::<8>(rest)?;
                let (&decimals, rest) = rest
                    .split_first()
                    .ok_or(RegistryError::InvalidInstruction)?;
                let (mint, rest) = unpack_pubkey(rest)?;
                let (symbol, rest) = unpack_string(rest)?;
                let (name, _rest) = unpack_string(rest)?;
                Self::RegisterMint {
                    mint_authority,
                    freeze_authority,
                    supply: u64::from_le_bytes(supply_bytes),
                    decimals,
                    mint,
                    symbol,
                    name,
                }
            }
            2 => Self::CloseMint,
            3 => {
                let (symbol, rest) = unpack_string(rest)?;
                let (name, _rest) = unpack_string(rest)?;
                Self::ModifyMint { symbol, name }
            }
            _ => return Err(RegistryError::InvalidInstruction.into()),
        })
    }
}

fn pack_string(value: &str, buf: &mut Vec<u8>) -> Result<(), ProgramError> {
    let bytes = value.as_bytes();
    if bytes.len() > MAX_SYMBOL_NAME_LEN {
        return Err(RegistryError::FieldTooLong.into());
    }
    buf.push(bytes.len() as u8);
    buf.extend_from_slice(bytes);
    Ok(())
}

fn unpack_string(input: &[u8]) -> Result<(String, &[u8]), ProgramError> {
    let (&len, rest) = input
        .split_first()
        .ok_or(RegistryError::InvalidInstruction)?;
    if len as usize > MAX_SYMBOL_NAME_LEN || rest.len() < len as usize {
        return Err(RegistryError::InvalidInstruction.into());
    }
    let (bytes, rest) = rest.split_at(len as usize);
    let value = std::str::from_utf8(bytes)
        .map_err(|_| RegistryError::InvalidInstruction)?
        .to_string();
    Ok((value, rest))
}

fn unpack_pubkey(input: &[u8]) -> Result<(Pubkey, &[u8]), ProgramError> {
    if input.len() < 32 {
        return Err(RegistryError::InvalidInstruction.into());
    }
    let (key, rest) = input.split_at(32);
    Ok((Pubkey::new(key), rest))
}

fn unpack_bytes<const N: usize>(input: &[u8]) -> Result<([u8; N], &[u8]), ProgramError> {
    if input.len() < N {
        return Err(RegistryError::InvalidInstruction.into());
    }
    let (bytes, rest) = input.split_at(N);
    let bytes = bytes
        .try_into()
        .map_err(|_| RegistryError::InvalidInstruction)?;
    Ok((bytes, rest))
}

/// Creates a `RegisterMint` instruction.
#[allow(clippy::too_many_arguments)]
pub fn register_mint(
    program_id: &Pubkey,
    mint: &Pubkey,
    payer: &Pubkey,
    extension_account: &Pubkey,
    mint_authority: &Pubkey,
    freeze_authority: &Pubkey,
    supply: u64,
    decimals: u8,
    symbol: &str,
    name: &str,
) -> Result<Instruction, ProgramError> {
    let data = RegistryInstruction::RegisterMint {
        mint_authority: *mint_authority,
        freeze_authority: *freeze_authority,
        supply,
        decimals,
        mint: *mint,
        symbol: symbol.to_string(),
        name: name.to_string(),
    }
    .pack()?;
    let accounts = vec![
        AccountMeta::new(*mint, false),
        AccountMeta::new(*payer, true),
        AccountMeta::new(*extension_account, true),
    ];
    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

/// Creates a `ModifyMint` instruction.
pub fn modify_mint(
    program_id: &Pubkey,
    mint: &Pubkey,
    payer: &Pubkey,
    extension_account: &Pubkey,
    symbol: &str,
    name: &str,
) -> Result<Instruction, ProgramError> {
    let data = RegistryInstruction::ModifyMint {
        symbol: symbol.to_string(),
        name: name.to_string(),
    }
    .pack()?;
    let accounts = vec![
        AccountMeta::new(*mint, false),
        AccountMeta::new(*payer, true),
        AccountMeta::new(*extension_account, false),
    ];
    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

/// Creates a `CloseMint` instruction.
pub fn close_mint(
    program_id: &Pubkey,
    mint: &Pubkey,
    payer: &Pubkey,
    extension_account: &Pubkey,
) -> Result<Instruction, ProgramError> {
    let data = RegistryInstruction::CloseMint.pack()?;
    let accounts = vec![
        AccountMeta::new(*extension_account, false),
        AccountMeta::new(*payer, true),
        AccountMeta::new(*mint, false),
    ];
    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_register_mint_exact_bytes() {
        let instruction = RegistryInstruction::RegisterMint {
            mint_authority: Pubkey::new_from_array([0; 32]),
            freeze_authority: Pubkey::new_from_array([0; 32]),
            supply: 1000,
            decimals: 9,
            mint: Pubkey::new_from_array([1; 32]),
            symbol: "AAA".to_string(),
            name: "Test Coin".to_string(),
        };
        let packed = instruction.pack().unwrap();

        let mut expected = vec![1u8];
        expected.extend_from_slice(&[0; 32]);
        expected.extend_from_slice(&[0; 32]);
        expected.extend_from_slice(&[0xe8, 0x03, 0, 0, 0, 0, 0, 0]);
        expected.push(9);
        expected.extend_from_slice(&[1; 32]);
        expected.push(3);
        expected.extend_from_slice(b"AAA");
        expected.push(9);
        expected.extend_from_slice(b"Test Coin");
        assert_eq!(packed, expected);

        assert_eq!(RegistryInstruction::unpack(&packed).unwrap(), instruction);
    }

    #[test]
    fn pack_unpack_modify_and_close() {
        let modify = RegistryInstruction::ModifyMint {
            symbol: "SRM".to_string(),
            name: "Serum".to_string(),
        };
        let packed = modify.pack().unwrap();
        assert_eq!(packed[0], 3);
        assert_eq!(RegistryInstruction::unpack(&packed).unwrap(), modify);

        let packed = RegistryInstruction::CloseMint.pack().unwrap();
        assert_eq!(packed, vec![2]);
        assert_eq!(
            RegistryInstruction::unpack(&packed).unwrap(),
            RegistryInstruction::CloseMint
        );
    }

    #[test]
    fn pack_rejects_long_fields() {
        let instruction = RegistryInstruction::ModifyMint {
            symbol: "X".repeat(MAX_SYMBOL_NAME_LEN + 1),
            name: "ok".to_string(),
        };
        assert_eq!(
            instruction.pack().unwrap_err(),
            RegistryError::FieldTooLong.into()
        );
    }

    #[test]
    fn unpack_rejects_malformed_input() {
        assert_eq!(
            RegistryInstruction::unpack(&[]).unwrap_err(),
            RegistryError::InvalidInstruction.into()
        );
        assert_eq!(
            RegistryInstruction::unpack(&[0]).unwrap_err(),
            RegistryError::InvalidInstruction.into()
        );
        // modify whose declared symbol length runs past the buffer
        assert_eq!(
            RegistryInstruction::unpack(&[3, 5, b'A']).unwrap_err(),
            RegistryError::InvalidInstruction.into()
        );
    }

    #[test]
    fn register_mint_account_metas() {
        let program_id = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let payer = Pubkey::new_unique();
        let extension = Pubkey::new_unique();
        let instruction = register_mint(
            &program_id,
            &mint,
            &payer,
            &extension,
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            0,
            0,
            "AAA",
            "Test Coin",
        )
        .unwrap();
        assert_eq!(instruction.program_id, program_id);
        assert_eq!(
            instruction.accounts,
            vec![
                AccountMeta::new(mint, false),
                AccountMeta::new(payer, true),
                AccountMeta::new(extension, true),
            ]
        );
    }

    #[test]
    fn modify_and_close_account_metas() {
        let program_id = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let payer = Pubkey::new_unique();
        let extension = Pubkey::new_unique();

        let instruction =
            modify_mint(&program_id, &mint, &payer, &extension, "AAA", "Test Coin").unwrap();
        assert_eq!(
            instruction.accounts,
            vec![
                AccountMeta::new(mint, false),
                AccountMeta::new(payer, true),
                AccountMeta::new(extension, false),
            ]
        );

        let instruction = close_mint(&program_id, &mint, &payer, &extension).unwrap();
        assert_eq!(
            instruction.accounts,
            vec![
                AccountMeta::new(extension, false),
                AccountMeta::new(payer, true),
                AccountMeta::new(mint, false),
            ]
        );
    }
}
