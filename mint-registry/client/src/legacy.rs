//! Frozen pre-registry snapshot
//!
//! Mints registered before the registry program was deployed have no on-chain
//! extension account. Their metadata lives in this frozen table and is merged
//! into authority-scoped query results so they still appear to callers.
//! Synthesized records carry a default extension address and zero supply; the
//! table is never written at runtime.

use {
    crate::client::MintExtensionRecord,
    solana_sdk::pubkey::Pubkey,
    std::str::FromStr,
};

/// One frozen snapshot entry. Addresses are stored as base58 text, the form
/// the snapshot was captured in.
#[derive(Clone, Copy, Debug)]
pub struct LegacySnapshotEntry {
    /// Authority allowed to mint new tokens.
    pub mint_authority: &'static str,
    /// Authority allowed to freeze token accounts; the system address when
    /// the mint had none.
    pub freeze_authority: &'static str,
    /// The token mint.
    pub mint: &'static str,
    /// Human-readable symbol.
    pub symbol: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Number of decimals.
    pub decimals: u8,
}

/// The pre-registry snapshot, frozen at migration time.
pub const LEGACY_SNAPSHOT: &[LegacySnapshotEntry] = &[
    LegacySnapshotEntry {
        mint_authority: "BFnCttWPPjKvtny554kDoV6Br1QHVP2A2BrpdodQJAxu",
        freeze_authority: "11111111111111111111111111111111",
        mint: "3TGzz7sWKbtyzNpwh1anAoo6mEwFGRt8JYLrgNAeJQSG",
        symbol: "CZCOIN",
        name: "CZ's Coin",
        decimals: 9,
    },
    LegacySnapshotEntry {
        mint_authority: "7xMDbYTCqQEcK2aM9LbetGtNFJpzKdfXzLL5juaLh4GJ",
        freeze_authority: "CDdR97S8y96v3To93aKvi3nCnjUrbuVSuumw8FLvbVeg",
        mint: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
        symbol: "USDC",
        name: "USD Coin",
        decimals: 6,
    },
    LegacySnapshotEntry {
        mint_authority: "TokenLend1ng1111111111111111111111111111111",
        freeze_authority: "11111111111111111111111111111111",
        mint: "So11111111111111111111111111111111111111112",
        symbol: "wSOL",
        name: "Wrapped SOL",
        decimals: 9,
    },
];

impl LegacySnapshotEntry {
    fn to_record(self) -> MintExtensionRecord {
        MintExtensionRecord {
            extension: Pubkey::default(),
            is_initialized: true,
            mint_authority: parse_pubkey(self.mint_authority),
            freeze_authority: parse_pubkey(self.freeze_authority),
            supply: 0,
            decimals: self.decimals,
            mint: parse_pubkey(self.mint),
            symbol: self.symbol.to_string(),
            name: self.name.to_string(),
        }
    }
}

/// Appends snapshot entries whose mint authority equals `mint_authority` to
/// `records`, after any on-chain matches already collected.
pub fn append_legacy_records(records: &mut Vec<MintExtensionRecord>, mint_authority: &Pubkey) {
    append_from_snapshot(LEGACY_SNAPSHOT, records, mint_authority)
}

fn append_from_snapshot(
    entries: &[LegacySnapshotEntry],
    records: &mut Vec<MintExtensionRecord>,
    mint_authority: &Pubkey,
) {
    for entry in entries {
        if parse_pubkey(entry.mint_authority) == *mint_authority {
            records.push(entry.to_record());
        }
    }
}

fn parse_pubkey(value: &str) -> Pubkey {
    // The table is frozen and validated by tests; an unparsable constant
    // degrades to the default address rather than panicking in a query path.
    Pubkey::from_str(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_constants_are_valid_addresses() {
        for entry in LEGACY_SNAPSHOT {
            assert_ne!(parse_pubkey(entry.mint_authority), Pubkey::default());
            assert_ne!(parse_pubkey(entry.mint), Pubkey::default());
            assert!(entry.symbol.len() <= 16);
            assert!(entry.name.len() <= 16);
        }
    }

    #[test]
    fn snapshot_only_authority_yields_one_synthesized_record() {
        let authority = parse_pubkey(LEGACY_SNAPSHOT[1].mint_authority);
        let mut records = Vec::new();
        append_legacy_records(&mut records, &authority);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.extension, Pubkey::default());
        assert_eq!(record.supply, 0);
        assert_eq!(record.symbol, "USDC");
        assert_eq!(record.name, "USD Coin");
        assert_eq!(record.decimals, 6);
        assert_eq!(record.mint, parse_pubkey(LEGACY_SNAPSHOT[1].mint));
    }

    #[test]
    fn unknown_authority_appends_nothing() {
        let mut records = Vec::new();
        append_legacy_records(&mut records, &Pubkey::new_unique());
        assert!(records.is_empty());
    }

    #[test]
    fn on_chain_records_come_first() {
        let authority = parse_pubkey(LEGACY_SNAPSHOT[0].mint_authority);
        let on_chain = MintExtensionRecord {
            extension: Pubkey::new_unique(),
            is_initialized: true,
            mint_authority: authority,
            freeze_authority: Pubkey::default(),
            supply: 500,
            decimals: 9,
            mint: Pubkey::new_unique(),
            symbol: "LIVE".to_string(),
            name: "Live Record".to_string(),
        };
        let mut records = vec![on_chain.clone()];
        append_legacy_records(&mut records, &authority);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], on_chain);
        assert_eq!(records[1].extension, Pubkey::default());
        assert_eq!(records[1].symbol, "CZCOIN");
    }
}
