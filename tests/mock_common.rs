#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use wallet_balance_checker::clock::Sleeper;
use wallet_balance_checker::fetch::{BalanceSource, FetchError, RetryPolicy, WalletBalance};
use wallet_balance_checker::model::{ChainBalance, ProxyEntry};
use wallet_balance_checker::report::Progress;
use wallet_balance_checker::run::progress::ProgressSink;

// ── Scripted source ─────────────────────────────────────────────────

/// What the mock upstream does for one attempt.
#[derive(Clone)]
pub enum Reply {
    Balance(i64, Vec<ChainBalance>),
    /// Response without usable data.
    Empty,
    /// Transport failure.
    Down,
    /// Never answers; only the attempt deadline ends it.
    Hang,
}

pub fn ok(total: i64) -> Reply {
    Reply::Balance(total, Vec::new())
}

/// Replays a per-wallet script of replies; once a script runs out, the
/// fallback reply repeats.
pub struct ScriptedSource {
    scripts: Mutex<HashMap<String, VecDeque<Reply>>>,
    fallback: Reply,
    calls: Mutex<Vec<(String, Option<ProxyEntry>)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(fallback: Reply) -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            fallback,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn script(self, wallet: &str, replies: Vec<Reply>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(wallet.to_string(), replies.into());
        self
    }

    pub fn calls(&self) -> Vec<(String, Option<ProxyEntry>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, wallet: &str) -> usize {
        self.calls().iter().filter(|(w, _)| w == wallet).count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BalanceSource for ScriptedSource {
    async fn fetch(
        &self,
        wallet: &str,
        proxy: Option<&ProxyEntry>,
        _deadline: Duration,
    ) -> Result<WalletBalance, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((wallet.to_string(), proxy.cloned()));

        let reply = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(wallet)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| self.fallback.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match reply {
            Reply::Balance(total_usd, chains) => Ok(WalletBalance { total_usd, chains }),
            Reply::Empty => Err(FetchError::Empty),
            Reply::Down => Err(FetchError::Status(503)),
            Reply::Hang => std::future::pending().await,
        }
    }
}

// ── Recording sleeper ───────────────────────────────────────────────

/// Records requested delays and returns immediately.
#[derive(Default)]
pub struct RecordingSleeper {
    slept: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

// ── Recording progress ──────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingProgress {
    updates: Mutex<Vec<Progress>>,
    finished: Mutex<bool>,
}

impl RecordingProgress {
    pub fn updates(&self) -> Vec<Progress> {
        self.updates.lock().unwrap().clone()
    }

    pub fn finished(&self) -> bool {
        *self.finished.lock().unwrap()
    }
}

impl ProgressSink for RecordingProgress {
    fn update(&self, progress: Progress) {
        self.updates.lock().unwrap().push(progress);
    }

    fn finish(&self) {
        *self.finished.lock().unwrap() = true;
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

pub fn proxies(n: usize) -> Vec<ProxyEntry> {
    (0..n)
        .map(|i| ProxyEntry::parse(&format!("10.1.0.{i}:3128")).unwrap())
        .collect()
}

pub fn wallets(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("0x{:040x}", i + 1)).collect()
}

pub fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        attempt_timeout: Duration::from_millis(20),
        ..RetryPolicy::default()
    }
}
