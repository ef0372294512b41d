pub mod csv;
pub mod table;

use serde::Serialize;
use tracing::warn;

use crate::model::balance::sort_chains_desc;
use crate::model::{ChainBalance, FetchResult, WalletAddress};

/// One wallet's line in the final report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// 1-based position in the input list.
    #[serde(rename = "n")]
    pub index: usize,
    pub wallet: WalletAddress,
    #[serde(rename = "balance")]
    pub balance_usd: i64,
    pub chains: Vec<ChainBalance>,
}

/// Finished run: one row per input address, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    #[serde(rename = "wallets")]
    pub rows: Vec<ReportRow>,
    #[serde(rename = "total")]
    pub total_usd: i64,
    pub success_count: usize,
    pub fail_count: usize,
}

/// Interim counters handed to the progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Collects per-wallet results as batches complete.
///
/// Results may arrive in any order; each is filed under the input position
/// the scheduler passes in, so duplicate addresses get their own rows.
#[derive(Debug)]
pub struct ResultAggregator {
    addresses: Vec<WalletAddress>,
    rows: Vec<Option<ReportRow>>,
    total_usd: i64,
    success_count: usize,
    fail_count: usize,
}

impl ResultAggregator {
    pub fn new(addresses: &[WalletAddress]) -> Self {
        Self {
            addresses: addresses.to_vec(),
            rows: vec![None; addresses.len()],
            total_usd: 0,
            success_count: 0,
            fail_count: 0,
        }
    }

    /// File `result` under input position `index` (0-based).
    pub fn record(&mut self, index: usize, result: FetchResult) {
        let Some(slot) = self.rows.get_mut(index) else {
            warn!(index, wallet = %result.wallet, "result for unknown position dropped");
            return;
        };
        if slot.is_some() {
            warn!(index, wallet = %result.wallet, "duplicate result ignored");
            return;
        }

        self.total_usd = self.total_usd.saturating_add(result.balance_usd);
        if result.succeeded {
            self.success_count += 1;
        } else {
            self.fail_count += 1;
        }

        let mut chains = result.chains;
        sort_chains_desc(&mut chains);
        *slot = Some(ReportRow {
            index: index + 1,
            wallet: result.wallet,
            balance_usd: result.balance_usd,
            chains,
        });
    }

    pub fn progress(&self) -> Progress {
        Progress {
            processed: self.success_count + self.fail_count,
            total: self.rows.len(),
            succeeded: self.success_count,
            failed: self.fail_count,
        }
    }

    /// Build the report. Positions never recorded count as failed zero rows.
    pub fn finalize(self) -> AggregateReport {
        let mut fail_count = self.fail_count;
        let rows = self
            .rows
            .into_iter()
            .zip(self.addresses)
            .enumerate()
            .map(|(i, (row, wallet))| {
                row.unwrap_or_else(|| {
                    fail_count += 1;
                    ReportRow {
                        index: i + 1,
                        wallet,
                        balance_usd: 0,
                        chains: Vec::new(),
                    }
                })
            })
            .collect();

        AggregateReport {
            rows,
            total_usd: self.total_usd,
            success_count: self.success_count,
            fail_count,
        }
    }
}

/// Whole dollars with thousands separators, e.g. `$1,234,567`.
pub fn format_usd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
