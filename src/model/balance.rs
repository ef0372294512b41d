use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Wallet address as read from the input file. Never validated or normalized.
pub type WalletAddress = String;

/// USD value a wallet holds on a single chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainBalance {
    #[serde(rename = "id")]
    pub chain_id: String,
    #[serde(default)]
    pub usd_value: f64,
}

impl ChainBalance {
    pub fn new(chain_id: impl Into<String>, usd_value: f64) -> Self {
        Self {
            chain_id: chain_id.into(),
            usd_value,
        }
    }
}

/// Sort chains by descending USD value. Stable, so equal values keep upstream order.
pub fn sort_chains_desc(chains: &mut [ChainBalance]) {
    chains.sort_by(|a, b| {
        b.usd_value
            .partial_cmp(&a.usd_value)
            .unwrap_or(Ordering::Equal)
    });
}

/// Outcome of one wallet's lookup, after all retries.
///
/// A failed lookup degrades to a zero balance with no chains, so a value of 0
/// alone does not tell a confirmed empty wallet from an exhausted one; check
/// `succeeded`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    pub wallet: WalletAddress,
    pub balance_usd: i64,
    pub chains: Vec<ChainBalance>,
    pub succeeded: bool,
}

impl FetchResult {
    pub fn success(wallet: WalletAddress, balance_usd: i64, mut chains: Vec<ChainBalance>) -> Self {
        sort_chains_desc(&mut chains);
        Self {
            wallet,
            balance_usd,
            chains,
            succeeded: true,
        }
    }

    pub fn failure(wallet: WalletAddress) -> Self {
        Self {
            wallet,
            balance_usd: 0,
            chains: Vec::new(),
            succeeded: false,
        }
    }
}

/// Shortened address for log lines, e.g. `0x1234...abcd`.
pub fn short_wallet(wallet: &str) -> String {
    let chars: Vec<char> = wallet.chars().collect();
    if chars.len() <= 10 {
        return wallet.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
