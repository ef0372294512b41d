use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::model::{ProxyEntry, WalletAddress};

/// Non-blank, trimmed lines of a text file.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Load the address list. An unreadable file is logged and yields no addresses.
pub fn load_wallets(path: &Path) -> Vec<WalletAddress> {
    read_lines(path).unwrap_or_else(|e| {
        warn!("cannot load wallet addresses: {e:#}");
        Vec::new()
    })
}

/// Load the proxy list. An unreadable file is logged and yields no proxies,
/// so every request goes out directly.
pub fn load_proxies(path: &Path) -> Vec<ProxyEntry> {
    match read_lines(path) {
        Ok(lines) => lines.iter().filter_map(|l| ProxyEntry::parse(l)).collect(),
        Err(e) => {
            warn!("cannot load proxies: {e:#}");
            Vec::new()
        }
    }
}
