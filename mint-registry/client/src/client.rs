//! Mint Registry Client
//!
//! Blocking orchestration over the official Solana RPC client: transaction
//! assembly and submission for the write path, `getProgramAccounts` with
//! byte-offset filters for the read path. The underlying [`RpcClient`] is
//! public for callers that need raw access, e.g.
//! `client.rpc_client.get_latest_blockhash()`.

use {
    crate::{config::ClientConfig, error::RegistryClientError, legacy},
    log::debug,
    solana_account_decoder::UiAccountEncoding,
    solana_client::{
        rpc_client::RpcClient,
        rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
        rpc_filter::{Memcmp, MemcmpEncodedBytes, MemcmpEncoding, RpcFilterType},
    },
    solana_sdk::{
        instruction::Instruction,
        pubkey::Pubkey,
        signature::{Keypair, Signature},
        signer::Signer,
        signers::Signers,
        system_instruction,
        transaction::Transaction,
    },
    spl_mint_registry_interface::{
        instruction,
        state::{MintExtension, MINT_AUTHORITY_OFFSET, MINT_OFFSET, RECORD_LEN, SYMBOL_OFFSET},
    },
};

/// A logical extension record as returned to callers: the address of the
/// storage account plus the decoded fields. Plain immutable data, no behavior
/// beyond construction.
#[derive(Clone, Debug, PartialEq)]
pub struct MintExtensionRecord {
    /// Address of the storage account holding this record. Default (all
    /// zeros) for records synthesized from the legacy snapshot, which predate
    /// on-chain storage.
    pub extension: Pubkey,
    /// Whether the record has been initialized on-chain.
    pub is_initialized: bool,
    /// Authority allowed to mint new tokens.
    pub mint_authority: Pubkey,
    /// Authority allowed to freeze token accounts.
    pub freeze_authority: Pubkey,
    /// Token supply at registration time; zero for snapshot entries.
    pub supply: u64,
    /// Number of decimals.
    pub decimals: u8,
    /// The token mint this record describes.
    pub mint: Pubkey,
    /// Human-readable symbol.
    pub symbol: String,
    /// Human-readable name.
    pub name: String,
}

impl MintExtensionRecord {
    /// Builds a record from a storage-account address and its decoded state.
    pub fn new(extension: Pubkey, state: MintExtension) -> Self {
        Self {
            extension,
            is_initialized: state.is_initialized,
            mint_authority: state.mint_authority,
            freeze_authority: state.freeze_authority,
            supply: state.supply,
            decimals: state.decimals,
            mint: state.mint,
            symbol: state.symbol,
            name: state.name,
        }
    }
}

/// Mint Registry Client
pub struct RegistryClient {
    /// The underlying RPC client.
    pub rpc_client: RpcClient,
    program_id: Pubkey,
}

impl RegistryClient {
    /// Creates a client from an explicit configuration.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            rpc_client: RpcClient::new_with_commitment(
                config.json_rpc_url.clone(),
                config.commitment,
            ),
            program_id: config.program_id,
        }
    }

    /// The registry program id this client talks to.
    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// Minimum balance for a new extension account to be rent exempt.
    pub fn minimum_balance_for_rent_exemption(&self) -> Result<u64, RegistryClientError> {
        Ok(self
            .rpc_client
            .get_minimum_balance_for_rent_exemption(RECORD_LEN)?)
    }

    /// Registers a new extension record for `mint`.
    ///
    /// Allocates a fresh storage account owned by the registry program and
    /// writes the record in the same transaction, signed by `payer` and the
    /// generated account keypair. Not idempotent: every call allocates a new
    /// account, so a mint may accumulate multiple live records.
    #[allow(clippy::too_many_arguments)]
    pub fn register_mint(
        &self,
        payer: &Keypair,
        mint_authority: &Pubkey,
        freeze_authority: &Pubkey,
        supply: u64,
        decimals: u8,
        mint: &Pubkey,
        symbol: &str,
        name: &str,
    ) -> Result<MintExtensionRecord, RegistryClientError> {
        let extension_keypair = Keypair::new();
        let lamports = self
            .rpc_client
            .get_minimum_balance_for_rent_exemption(RECORD_LEN)?;

        let instructions = [
            system_instruction::create_account(
                &payer.pubkey(),
                &extension_keypair.pubkey(),
                lamports,
                RECORD_LEN as u64,
                &self.program_id,
            ),
            instruction::register_mint(
                &self.program_id,
                mint,
                &payer.pubkey(),
                &extension_keypair.pubkey(),
                mint_authority,
                freeze_authority,
                supply,
                decimals,
                symbol,
                name,
            )?,
        ];
        let signature =
            self.sign_and_send_instructions(&[payer, &extension_keypair], &instructions)?;
        debug!(
            "register_mint: extension {} for mint {} confirmed in {}",
            extension_keypair.pubkey(),
            mint,
            signature
        );

        Ok(MintExtensionRecord {
            extension: extension_keypair.pubkey(),
            is_initialized: true,
            mint_authority: *mint_authority,
            freeze_authority: *freeze_authority,
            supply,
            decimals,
            mint: *mint,
            symbol: symbol.to_string(),
            name: name.to_string(),
        })
    }

    /// Rewrites the symbol and name of an existing extension record.
    pub fn modify_mint(
        &self,
        payer: &Keypair,
        extension: &Pubkey,
        mint: &Pubkey,
        symbol: &str,
        name: &str,
    ) -> Result<Signature, RegistryClientError> {
        let instructions = [instruction::modify_mint(
            &self.program_id,
            mint,
            &payer.pubkey(),
            extension,
            symbol,
            name,
        )?];
        let signature = self.sign_and_send_instructions(&[payer], &instructions)?;
        debug!("modify_mint: extension {} confirmed in {}", extension, signature);
        Ok(signature)
    }

    /// Closes an extension record, reclaiming its rent to `payer`. Terminal:
    /// subsequent queries will not find the record.
    pub fn close_mint(
        &self,
        payer: &Keypair,
        extension: &Pubkey,
        mint: &Pubkey,
    ) -> Result<Signature, RegistryClientError> {
        let instructions = [instruction::close_mint(
            &self.program_id,
            mint,
            &payer.pubkey(),
            extension,
        )?];
        let signature = self.sign_and_send_instructions(&[payer], &instructions)?;
        debug!("close_mint: extension {} confirmed in {}", extension, signature);
        Ok(signature)
    }

    /// Fetches and decodes a single extension record by address.
    pub fn get_extension(
        &self,
        extension: &Pubkey,
    ) -> Result<MintExtensionRecord, RegistryClientError> {
        let data = self.rpc_client.get_account_data(extension)?;
        let state = MintExtension::unpack(&data)?;
        Ok(MintExtensionRecord::new(*extension, state))
    }

    /// Returns every extension record describing `mint`. An empty vector
    /// means no matches, not an error.
    pub fn get_extensions_by_mint(
        &self,
        mint: &Pubkey,
    ) -> Result<Vec<MintExtensionRecord>, RegistryClientError> {
        self.get_filtered_extensions(memcmp_filter(MINT_OFFSET, mint.as_ref()))
    }

    /// Returns every extension record whose symbol is byte-for-byte `symbol`.
    ///
    /// The filter value is the raw UTF-8 bytes of `symbol` in the same base58
    /// encoding used for addresses; this is an exact-bytes match, not a prefix
    /// or case-insensitive one.
    pub fn get_extensions_by_symbol(
        &self,
        symbol: &str,
    ) -> Result<Vec<MintExtensionRecord>, RegistryClientError> {
        self.get_filtered_extensions(memcmp_filter(SYMBOL_OFFSET, symbol.as_bytes()))
    }

    /// Returns every extension record whose mint authority is `mint_authority`,
    /// followed by matching entries from the frozen pre-registry snapshot.
    pub fn get_extensions_by_mint_authority(
        &self,
        mint_authority: &Pubkey,
    ) -> Result<Vec<MintExtensionRecord>, RegistryClientError> {
        let mut records = self.get_filtered_extensions(memcmp_filter(
            MINT_AUTHORITY_OFFSET,
            mint_authority.as_ref(),
        ))?;
        legacy::append_legacy_records(&mut records, mint_authority);
        Ok(records)
    }

    /// Runs a filtered scan over the registry program's accounts and decodes
    /// every match. A single malformed record fails the whole query; silently
    /// dropping it could hide a systemic offset mismatch.
    fn get_filtered_extensions(
        &self,
        filter: RpcFilterType,
    ) -> Result<Vec<MintExtensionRecord>, RegistryClientError> {
        let filters = vec![RpcFilterType::DataSize(RECORD_LEN as u64), filter];
        let accounts = self.rpc_client.get_program_accounts_with_config(
            &self.program_id,
            RpcProgramAccountsConfig {
                filters: Some(filters),
                account_config: RpcAccountInfoConfig {
                    encoding: Some(UiAccountEncoding::Base64),
                    ..RpcAccountInfoConfig::default()
                },
                ..RpcProgramAccountsConfig::default()
            },
        )?;
        debug!("extension scan matched {} account(s)", accounts.len());

        let mut records = Vec::with_capacity(accounts.len());
        for (address, account) in accounts {
            let state = MintExtension::unpack(&account.data)?;
            records.push(MintExtensionRecord::new(address, state));
        }
        Ok(records)
    }

    fn sign_and_send_instructions<S: Signers>(
        &self,
        signers: &S,
        instructions: &[Instruction],
    ) -> Result<Signature, RegistryClientError> {
        let recent_blockhash = self.rpc_client.get_latest_blockhash()?;
        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&signers.pubkeys()[0]),
            signers,
            recent_blockhash,
        );
        Ok(self.rpc_client.send_and_confirm_transaction(&transaction)?)
    }
}

fn memcmp_filter(offset: usize, bytes: &[u8]) -> RpcFilterType {
    RpcFilterType::Memcmp(Memcmp {
        offset,
        bytes: MemcmpEncodedBytes::Base58(bs58::encode(bytes).into_string()),
        encoding: Some(MemcmpEncoding::Binary),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_from_state() {
        solana_logger::setup();
        let state = MintExtension {
            is_initialized: true,
            mint_authority: Pubkey::new_unique(),
            freeze_authority: Pubkey::new_unique(),
            supply: 42,
            decimals: 6,
            mint: Pubkey::new_unique(),
            symbol: "AAA".to_string(),
            name: "Test Coin".to_string(),
        };
        let extension = Pubkey::new_unique();
        let record = MintExtensionRecord::new(extension, state.clone());
        assert_eq!(record.extension, extension);
        assert_eq!(record.mint, state.mint);
        assert_eq!(record.supply, 42);
        assert_eq!(record.symbol, "AAA");
        assert_eq!(record.name, "Test Coin");
    }

    #[test]
    fn symbol_filter_uses_identity_encoding() {
        // the filter re-uses the address encoding for a short byte string
        let filter = memcmp_filter(SYMBOL_OFFSET, "AAA".as_bytes());
        match filter {
            RpcFilterType::Memcmp(Memcmp {
                offset,
                bytes: MemcmpEncodedBytes::Base58(encoded),
                ..
            }) => {
                assert_eq!(offset, SYMBOL_OFFSET);
                assert_eq!(bs58::decode(&encoded).into_vec().unwrap(), b"AAA");
            }
            _ => panic!("expected a base58 memcmp filter"),
        }
    }

    #[test]
    fn authority_filter_at_offset_zero() {
        let authority = Pubkey::new_unique();
        let filter = memcmp_filter(MINT_AUTHORITY_OFFSET, authority.as_ref());
        match filter {
            RpcFilterType::Memcmp(Memcmp { offset, .. }) => assert_eq!(offset, 0),
            _ => panic!("expected a memcmp filter"),
        }
    }
}
