use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::info;

use crate::clock::Sleeper;
use crate::fetch::RetryingFetcher;
use crate::model::WalletAddress;
use crate::report::ResultAggregator;

use super::progress::ProgressSink;

pub const DEFAULT_BATCH_SIZE: usize = 3;
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_secs(3);

/// Runs wallet lookups in fixed-size groups, one group at a time.
pub struct BatchScheduler {
    fetcher: RetryingFetcher,
    sleeper: Arc<dyn Sleeper>,
    /// Wallets fetched concurrently per batch.
    batch_size: usize,
    /// Cooldown between consecutive batches.
    batch_delay: Duration,
}

impl BatchScheduler {
    pub fn new(
        fetcher: RetryingFetcher,
        sleeper: Arc<dyn Sleeper>,
        batch_size: usize,
        batch_delay: Duration,
    ) -> Self {
        BatchScheduler {
            fetcher,
            sleeper,
            batch_size: batch_size.max(1),
            batch_delay,
        }
    }

    /// Fetch every address, filing each result into `aggregator` under its
    /// input position.
    ///
    /// All lookups of a batch run concurrently on the current task and the
    /// batch ends when the last one returns. Progress is reported after each
    /// batch; the cooldown runs between batches, not after the last.
    pub async fn run_all(
        &self,
        addresses: &[WalletAddress],
        aggregator: &mut ResultAggregator,
        progress: &dyn ProgressSink,
    ) {
        let batch_count = addresses.len().div_ceil(self.batch_size);

        for (batch_idx, batch) in addresses.chunks(self.batch_size).enumerate() {
            let offset = batch_idx * self.batch_size;
            let results = join_all(
                batch
                    .iter()
                    .map(|wallet| self.fetcher.fetch_balance(wallet)),
            )
            .await;

            for (i, result) in results.into_iter().enumerate() {
                aggregator.record(offset + i, result);
            }

            let snapshot = aggregator.progress();
            progress.update(snapshot);
            info!(
                batch = batch_idx + 1,
                batches = batch_count,
                processed = snapshot.processed,
                ok = snapshot.succeeded,
                failed = snapshot.failed,
                "batch complete"
            );

            if batch_idx + 1 < batch_count {
                self.sleeper.sleep(self.batch_delay).await;
            }
        }
    }
}
