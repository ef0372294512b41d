use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::fetch::rabby::DEFAULT_API_URL;
use crate::fetch::{DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_MAX_RETRIES, RetryPolicy};
use crate::run::RunConfig;
use crate::run::scheduler::{DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE};

/// Bulk wallet balance checker — queries the Rabby balance API for every
/// address in a list, rotating through proxies, and writes a table and CSV.
#[derive(Parser, Debug)]
#[command(name = "wallet-balance-checker", version, about)]
pub struct Cli {
    /// File with one wallet address per line
    #[arg(long, short = 'w', default_value = "wallets.txt")]
    pub wallets: PathBuf,

    /// File with one proxy per line (`host:port` or `scheme://[user:pass@]host:port`)
    #[arg(long, short = 'p', default_value = "proxies.txt")]
    pub proxies: PathBuf,

    /// Ignore the proxy file and connect directly
    #[arg(long)]
    pub no_proxies: bool,

    /// CSV report path
    #[arg(long, short = 'o', default_value = "wallet-balances.csv")]
    pub output: PathBuf,

    /// Also write the full report (with per-chain balances) as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Balance endpoint; the wallet is passed as `?id=<address>`
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Wallets fetched concurrently per batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE as u64, value_parser = clap::value_parser!(u64).range(1..))]
    pub batch_size: u64,

    /// Pause between batches, in seconds
    #[arg(long, default_value_t = DEFAULT_BATCH_DELAY.as_secs())]
    pub batch_delay_secs: u64,

    /// Attempts per wallet before recording a zero balance
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_retries: u32,

    /// Per-attempt request timeout, in seconds
    #[arg(long, default_value_t = DEFAULT_ATTEMPT_TIMEOUT.as_secs(), value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Do not draw the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            wallets_path: self.wallets.clone(),
            proxies_path: (!self.no_proxies).then(|| self.proxies.clone()),
            csv_path: self.output.clone(),
            json_path: self.json.clone(),
            api_url: self.api_url.clone(),
            batch_size: self.batch_size as usize,
            batch_delay: Duration::from_secs(self.batch_delay_secs),
            retry: RetryPolicy {
                max_retries: self.max_retries,
                attempt_timeout: Duration::from_secs(self.timeout_secs),
                ..RetryPolicy::default()
            },
            show_progress: !self.no_progress,
        }
    }

    /// Default log filter for the given `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tool_behaviour() {
        let cli = Cli::parse_from(["wallet-balance-checker"]);
        let config = cli.run_config();
        assert_eq!(config.batch_size, 3);
        assert_eq!(config.batch_delay, Duration::from_secs(3));
        assert_eq!(config.retry.max_retries, 10);
        assert_eq!(config.retry.attempt_timeout, Duration::from_secs(30));
        assert_eq!(config.proxies_path, Some(PathBuf::from("proxies.txt")));
        assert_eq!(config.csv_path, PathBuf::from("wallet-balances.csv"));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.show_progress);
    }

    #[test]
    fn no_proxies_flag() {
        let cli = Cli::parse_from(["wallet-balance-checker", "--no-proxies", "-vv"]);
        assert!(cli.run_config().proxies_path.is_none());
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn zero_batch_size_rejected() {
        assert!(Cli::try_parse_from(["wallet-balance-checker", "--batch-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["wallet-balance-checker", "--max-retries", "0"]).is_err());
    }

    #[test]
    fn help_shows_default_values() {
        let help = <Cli as clap::CommandFactory>::command().render_long_help().to_string();
        assert!(help.contains("[default: 3]"));
        assert!(help.contains("[default: 10]"));
        assert!(help.contains("[default: 30]"));
    }
}
