pub mod config;
pub mod progress;
pub mod scheduler;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::clock::{Sleeper, TokioSleeper};
use crate::fetch::{ProxyPool, RabbyClient, RetryingFetcher};
use crate::input;
use crate::model::WalletAddress;
use crate::report::{AggregateReport, ResultAggregator};

pub use config::RunConfig;
use progress::{BarProgress, NoProgress, ProgressSink};
pub use scheduler::BatchScheduler;

/// Check every address and return the finished report.
pub async fn check_wallets(
    addresses: &[WalletAddress],
    scheduler: &BatchScheduler,
    progress: &dyn ProgressSink,
) -> AggregateReport {
    let mut aggregator = ResultAggregator::new(addresses);
    scheduler.run_all(addresses, &mut aggregator, progress).await;
    progress.finish();
    aggregator.finalize()
}

/// Entry point for the CLI: load inputs, fetch, print and save the report.
pub fn run(config: &RunConfig) -> Result<AggregateReport> {
    let wallets = input::load_wallets(&config.wallets_path);
    println!("Loaded {} wallet addresses", wallets.len());

    let pool = match &config.proxies_path {
        Some(path) => {
            let pool = ProxyPool::new(input::load_proxies(path));
            println!("Loaded {} proxies", pool.len());
            pool
        }
        None => ProxyPool::default(),
    };
    if pool.is_empty() {
        info!("no proxies, connecting directly");
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("creating async runtime")?;
    let report = rt.block_on(run_async(config, &wallets, pool))?;

    println!(
        "\nDone. Ok: {}, Failed: {}",
        report.success_count, report.fail_count
    );
    report.print_table();

    report.write_csv_file(&config.csv_path)?;
    println!("Results saved to {}", config.csv_path.display());

    if let Some(path) = &config.json_path {
        write_json(&report, path)?;
        println!("JSON report saved to {}", path.display());
    }

    Ok(report)
}

async fn run_async(
    config: &RunConfig,
    wallets: &[WalletAddress],
    pool: ProxyPool,
) -> Result<AggregateReport> {
    let source = RabbyClient::new(config.api_url.as_str()).context("creating HTTP client")?;
    let sleeper: Arc<dyn Sleeper> = Arc::new(TokioSleeper);
    let fetcher = RetryingFetcher::new(
        Arc::new(source),
        Arc::new(pool),
        sleeper.clone(),
        config.retry.clone(),
    );
    let scheduler = BatchScheduler::new(fetcher, sleeper, config.batch_size, config.batch_delay);

    info!(
        wallets = wallets.len(),
        batch_size = config.batch_size,
        "checking wallets"
    );

    let progress: Box<dyn ProgressSink> = if config.show_progress {
        Box::new(BarProgress::new(wallets.len()))
    } else {
        Box::new(NoProgress)
    };

    Ok(check_wallets(wallets, &scheduler, progress.as_ref()).await)
}

fn write_json(report: &AggregateReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
