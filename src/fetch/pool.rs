use std::collections::HashSet;

use rand::Rng;

use crate::model::ProxyEntry;

/// Upper bound on random draws per pick.
const MAX_DRAWS: usize = 10;

/// Fixed set of egress proxies, loaded once and shared read-only by all fetches.
#[derive(Debug, Default, Clone)]
pub struct ProxyPool {
    proxies: Vec<ProxyEntry>,
}

impl ProxyPool {
    pub fn new(proxies: Vec<ProxyEntry>) -> Self {
        Self { proxies }
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Pick a random proxy, preferring ones not in `excluded`.
    ///
    /// Returns `None` for an empty pool, meaning a direct connection.
    pub fn pick(&self, excluded: &HashSet<ProxyEntry>) -> Option<ProxyEntry> {
        let mut rng = rand::rng();
        self.pick_by(excluded, |len| rng.random_range(0..len))
    }

    /// Same as [`pick`](Self::pick) with a caller-supplied draw function.
    ///
    /// `draw(len)` must return an index in `0..len`. Up to `min(10, len)` draws
    /// are made; once `excluded` covers the whole pool the first draw is taken
    /// as is. If every draw lands on an excluded entry, the last one is returned.
    pub fn pick_by<F>(&self, excluded: &HashSet<ProxyEntry>, mut draw: F) -> Option<ProxyEntry>
    where
        F: FnMut(usize) -> usize,
    {
        if self.proxies.is_empty() {
            return None;
        }

        let len = self.proxies.len();
        let budget = MAX_DRAWS.min(len);
        let pool_covered = excluded.len() >= len;

        let mut choice = &self.proxies[draw(len) % len];
        for _ in 1..budget {
            if pool_covered || !excluded.contains(choice) {
                break;
            }
            choice = &self.proxies[draw(len) % len];
        }

        Some(choice.clone())
    }
}
