use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::RetryPolicy;

/// Everything a balance-check run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub wallets_path: PathBuf,
    /// `None` disables proxy rotation entirely.
    pub proxies_path: Option<PathBuf>,
    pub csv_path: PathBuf,
    pub json_path: Option<PathBuf>,
    pub api_url: String,
    /// Wallets fetched concurrently per batch.
    pub batch_size: usize,
    pub batch_delay: Duration,
    pub retry: RetryPolicy,
    pub show_progress: bool,
}
