//! Mint Registry Client Errors

use {
    solana_client::client_error::ClientError,
    solana_sdk::program_error::ProgramError,
    thiserror::Error,
};

/// Errors returned by [`crate::RegistryClient`].
///
/// RPC failures (rejected or unconfirmed transactions, failed reads) surface
/// verbatim; the client never retries on its own. Codec failures during a
/// query abort the whole query rather than silently dropping the record, since
/// a malformed record usually means a systemic offset mismatch.
#[derive(Debug, Error)]
pub enum RegistryClientError {
    /// The RPC endpoint rejected or could not confirm a request.
    #[error(transparent)]
    RpcClientError(#[from] ClientError),
    /// Record or instruction encoding failed.
    #[error(transparent)]
    ProgramError(#[from] ProgramError),
}
