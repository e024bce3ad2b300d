#![deny(missing_docs)]

//! Client-side interface for the mint registry program.
//!
//! The registry program attaches a human-readable symbol and name to a token
//! mint. This crate defines the on-chain record layouts (including the legacy
//! 67-byte format still found on-chain), the byte-exact instruction encoding,
//! and the field offsets shared between the record codec and `memcmp` account
//! filters. The program id is not baked in; clients pass it explicitly.

pub mod error;
pub mod instruction;
pub mod state;
