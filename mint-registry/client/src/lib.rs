#![deny(missing_docs)]

//! Mint Registry Client
//!
//! A thin blocking client for the mint registry program. It can register an
//! extension record binding a symbol and name to a token mint, rewrite or
//! close an existing record, and run server-side filtered queries over all
//! records by mint, symbol, or mint authority. Authority-scoped queries also
//! surface mints from the frozen pre-registry snapshot.
//!
//! All operations are single round-trips against the configured RPC endpoint;
//! nothing is cached or retried. The endpoint, registry program id, and
//! commitment level are supplied through [`config::ClientConfig`].

pub mod client;
pub mod config;
pub mod error;
pub mod legacy;

pub use {
    client::{MintExtensionRecord, RegistryClient},
    config::ClientConfig,
    error::RegistryClientError,
};
