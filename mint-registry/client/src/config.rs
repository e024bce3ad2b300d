//! Client configuration

use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};

/// Everything a [`crate::RegistryClient`] needs to talk to one registry
/// deployment. There is no process-wide default endpoint or program id; each
/// client carries its own.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// RPC endpoint, e.g. `https://api.mainnet-beta.solana.com`.
    pub json_rpc_url: String,
    /// Address of the deployed mint registry program.
    pub program_id: Pubkey,
    /// Commitment level used for transaction confirmation and reads. A looser
    /// level confirms faster but may be superseded by a competing fork.
    pub commitment: CommitmentConfig,
}

impl ClientConfig {
    /// Creates a config with the default `confirmed` commitment.
    pub fn new(json_rpc_url: &str, program_id: Pubkey) -> Self {
        Self {
            json_rpc_url: json_rpc_url.to_string(),
            program_id,
            commitment: CommitmentConfig::confirmed(),
        }
    }

    /// Creates a config with an explicit commitment level.
    pub fn new_with_commitment(
        json_rpc_url: &str,
        program_id: Pubkey,
        commitment: CommitmentConfig,
    ) -> Self {
        Self {
            json_rpc_url: json_rpc_url.to_string(),
            program_id,
            commitment,
        }
    }
}
