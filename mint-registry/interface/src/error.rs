//! Error types

use {
    num_derive::FromPrimitive,
    num_traits::FromPrimitive,
    solana_program::{
        decode_error::DecodeError,
        msg,
        program_error::{PrintProgramError, ProgramError},
    },
    thiserror::Error,
};

/// Errors that may be returned by the mint registry interface.
#[derive(Clone, Debug, Eq, Error, FromPrimitive, PartialEq)]
pub enum RegistryError {
    /// Symbol or name exceeds the 16-byte field capacity.
    #[error("Symbol or name longer than 16 bytes")]
    FieldTooLong,
    /// Record length matches no known schema version.
    #[error("Record length matches no known schema version")]
    UnknownSchema,
    /// Record buffer is shorter than any schema's declared length.
    #[error("Record buffer is truncated")]
    TruncatedRecord,
    /// Instruction data could not be unpacked.
    #[error("Invalid instruction")]
    InvalidInstruction,
}

impl From<RegistryError> for ProgramError {
    fn from(e: RegistryError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for RegistryError {
    fn type_of() -> &'static str {
        "RegistryError"
    }
}

impl PrintProgramError for RegistryError {
    fn print<E>(&self)
    where
        E: 'static + std::error::Error + DecodeError<E> + PrintProgramError + FromPrimitive,
    {
        match self {
            RegistryError::FieldTooLong => msg!("Error: symbol or name longer than 16 bytes"),
            RegistryError::UnknownSchema => {
                msg!("Error: record length matches no known schema version")
            }
            RegistryError::TruncatedRecord => msg!("Error: record buffer is truncated"),
            RegistryError::InvalidInstruction => msg!("Error: invalid instruction"),
        }
    }
}
