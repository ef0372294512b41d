use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{ChainBalance, ProxyEntry};

// ── Errors ──────────────────────────────────────────────────────────

/// Why a single balance request produced nothing usable.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The upstream answered but the body had no numeric total.
    #[error("upstream returned no usable balance data")]
    Empty,

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("cannot route through proxy {proxy}: {source}")]
    Proxy {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// Soft failures got a response from the upstream; everything else never did.
    pub fn is_soft(&self) -> bool {
        matches!(self, FetchError::Empty)
    }
}

// ── Source trait ────────────────────────────────────────────────────

/// Balance as reported by the upstream for one wallet.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletBalance {
    /// Total USD value, truncated to whole dollars.
    pub total_usd: i64,
    pub chains: Vec<ChainBalance>,
}

/// One balance request against the upstream API.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Look up `wallet`, routed through `proxy` when given, otherwise direct.
    ///
    /// Implementations should abort their own I/O once `deadline` has passed.
    async fn fetch(
        &self,
        wallet: &str,
        proxy: Option<&ProxyEntry>,
        deadline: Duration,
    ) -> Result<WalletBalance, FetchError>;
}
