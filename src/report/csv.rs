use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::{AggregateReport, format_usd};

const HEADER: [&str; 3] = ["№", "Wallet", "Balance"];

impl AggregateReport {
    /// Write the CSV report: every field quoted, rows in input order, then an
    /// empty row and a totals row.
    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(out);

        wtr.write_record(HEADER)?;
        for row in &self.rows {
            wtr.write_record([
                row.index.to_string(),
                row.wallet.clone(),
                format!("${}", row.balance_usd),
            ])?;
        }
        wtr.write_record(["", "", ""])?;
        wtr.write_record(["", "TOTAL:", format_usd(self.total_usd).as_str()])?;
        wtr.flush()?;
        Ok(())
    }

    pub fn write_csv_file(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating CSV file {}", path.display()))?;
        self.write_csv(std::io::BufWriter::new(file))
            .with_context(|| format!("writing CSV file {}", path.display()))
    }
}
