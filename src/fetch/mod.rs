pub mod pool;
pub mod rabby;
pub mod source;

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tracing::{debug, warn};

use crate::clock::Sleeper;
use crate::model::balance::short_wallet;
use crate::model::{FetchResult, ProxyEntry};

pub use pool::ProxyPool;
pub use rabby::RabbyClient;
pub use source::{BalanceSource, FetchError, WalletBalance};

pub const DEFAULT_MAX_RETRIES: u32 = 10;
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_SOFT_BACKOFF: Duration = Duration::from_secs(1);
pub const DEFAULT_TRANSPORT_BACKOFF: Duration = Duration::from_secs(2);

/// Retry limits and fixed backoff delays for one wallet lookup.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempts per wallet, including the first.
    pub max_retries: u32,
    /// Hard deadline for a single attempt.
    pub attempt_timeout: Duration,
    /// Delay after a response without usable data.
    pub soft_backoff: Duration,
    /// Delay after a transport error or timeout. Skipped after the last attempt.
    pub transport_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            soft_backoff: DEFAULT_SOFT_BACKOFF,
            transport_backoff: DEFAULT_TRANSPORT_BACKOFF,
        }
    }
}

/// Index draw used for proxy selection: `draw(len)` returns a value in `0..len`.
pub type ProxyDraw = Box<dyn FnMut(usize) -> usize + Send>;

/// Looks up one wallet's balance, rotating proxies across attempts.
pub struct RetryingFetcher {
    source: Arc<dyn BalanceSource>,
    pool: Arc<ProxyPool>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
    /// `None` draws from the thread RNG.
    draw: Option<Mutex<ProxyDraw>>,
}

impl RetryingFetcher {
    pub fn new(
        source: Arc<dyn BalanceSource>,
        pool: Arc<ProxyPool>,
        sleeper: Arc<dyn Sleeper>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            source,
            pool,
            sleeper,
            policy,
            draw: None,
        }
    }

    /// Replace the random proxy draw, e.g. with a seeded or scripted one.
    pub fn with_draw(mut self, draw: impl FnMut(usize) -> usize + Send + 'static) -> Self {
        self.draw = Some(Mutex::new(Box::new(draw)));
        self
    }

    fn pick_proxy(&self, tried: &HashSet<ProxyEntry>) -> Option<ProxyEntry> {
        match &self.draw {
            Some(draw) => {
                let mut draw = draw.lock().unwrap_or_else(PoisonError::into_inner);
                self.pool.pick_by(tried, |len| (*draw)(len))
            }
            None => self.pool.pick(tried),
        }
    }

    /// Fetch `wallet`'s balance. Never fails: after `max_retries` unsuccessful
    /// attempts the result is a zero balance with `succeeded == false`.
    pub async fn fetch_balance(&self, wallet: &str) -> FetchResult {
        let short = short_wallet(wallet);
        let deadline = self.policy.attempt_timeout;
        let mut tried: HashSet<ProxyEntry> = HashSet::new();
        let mut attempts = 0u32;

        while attempts < self.policy.max_retries {
            let proxy = self.pick_proxy(&tried);
            if let Some(p) = &proxy {
                tried.insert(p.clone());
            }
            let route = proxy
                .as_ref()
                .map_or_else(|| "direct".to_string(), ToString::to_string);

            let outcome = tokio::time::timeout(
                deadline,
                self.source.fetch(wallet, proxy.as_ref(), deadline),
            )
            .await
            .unwrap_or_else(|_| Err(FetchError::Timeout(deadline)));
            attempts += 1;

            match outcome {
                Ok(balance) => {
                    debug!(wallet = %short, attempt = attempts, %route, total = balance.total_usd, "balance fetched");
                    return FetchResult::success(wallet.to_string(), balance.total_usd, balance.chains);
                }
                Err(err) if err.is_soft() => {
                    debug!(wallet = %short, attempt = attempts, %route, "{err}, retrying");
                    self.sleeper.sleep(self.policy.soft_backoff).await;
                }
                Err(err) => {
                    debug!(wallet = %short, attempt = attempts, %route, "{err}");
                    if attempts < self.policy.max_retries {
                        self.sleeper.sleep(self.policy.transport_backoff).await;
                    }
                }
            }
        }

        warn!(wallet = %short, attempts, "giving up, recording zero balance");
        FetchResult::failure(wallet.to_string())
    }
}
