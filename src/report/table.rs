use std::fmt::Write;

use super::{AggregateReport, format_usd};

impl AggregateReport {
    /// Render the console table: one line per wallet, then totals and stats.
    pub fn render_table(&self) -> String {
        let wallet_width = self
            .rows
            .iter()
            .map(|r| r.wallet.chars().count())
            .max()
            .unwrap_or(0)
            .max("Wallet".len());
        let index_width = self.rows.len().to_string().len().max(2);
        let stats = format!("Ok: {} | Failed: {}", self.success_count, self.fail_count);
        let total = format_usd(self.total_usd);
        let balance_width = self
            .rows
            .iter()
            .map(|r| format_usd(r.balance_usd).len())
            .chain([total.len(), stats.len(), "Balance".len()])
            .max()
            .unwrap_or(0);
        let rule_width = index_width + wallet_width + balance_width + 6;

        let mut out = String::new();
        let _ = writeln!(out, "{}", "═".repeat(rule_width));
        let _ = writeln!(
            out,
            "  {:>iw$} {:<ww$} {:>bw$}",
            "№",
            "Wallet",
            "Balance",
            iw = index_width,
            ww = wallet_width,
            bw = balance_width,
        );
        let _ = writeln!(out, "  {}", "-".repeat(rule_width - 2));
        for row in &self.rows {
            let _ = writeln!(
                out,
                "  {:>iw$} {:<ww$} {:>bw$}",
                row.index,
                row.wallet,
                format!("${}", row.balance_usd),
                iw = index_width,
                ww = wallet_width,
                bw = balance_width,
            );
        }
        let _ = writeln!(out, "  {}", "-".repeat(rule_width - 2));
        let _ = writeln!(
            out,
            "  {:>iw$} {:<ww$} {:>bw$}",
            "",
            "Total",
            total,
            iw = index_width,
            ww = wallet_width,
            bw = balance_width,
        );
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  {:>iw$} {:<ww$} {:>bw$}",
            "",
            "Stats",
            stats,
            iw = index_width,
            ww = wallet_width,
            bw = balance_width,
        );
        let _ = writeln!(out, "{}", "═".repeat(rule_width));
        out
    }

    pub fn print_table(&self) {
        print!("{}", self.render_table());
    }
}
