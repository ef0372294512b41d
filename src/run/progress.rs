use indicatif::{ProgressBar, ProgressStyle};

use crate::report::Progress;

/// Receives interim counters after every batch.
pub trait ProgressSink {
    fn update(&self, progress: Progress);
    fn finish(&self) {}
}

/// Discards updates.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&self, _progress: Progress) {}
}

/// Terminal progress bar with success/failure counters.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "Progress: [{bar:40}] {percent}% | {pos}/{len} | {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█░"),
        );
        bar.set_message(counters(0, 0));
        Self { bar }
    }
}

impl ProgressSink for BarProgress {
    fn update(&self, progress: Progress) {
        self.bar.set_position(progress.processed as u64);
        self.bar
            .set_message(counters(progress.succeeded, progress.failed));
    }

    fn finish(&self) {
        self.bar.finish();
    }
}

fn counters(succeeded: usize, failed: usize) -> String {
    format!("Ok: {succeeded} | Failed: {failed}")
}
