use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use serde_json::Value;

use crate::model::{ChainBalance, ProxyEntry};

use super::source::{BalanceSource, FetchError, WalletBalance};

pub const DEFAULT_API_URL: &str = "https://api.rabby.io/v1/user/total_balance";

/// Headers the Rabby extension sends. The API expects this exact signature.
const CLIENT_HEADERS: [(&str, &str); 8] = [
    ("accept", "application/json, text/plain, */*"),
    ("accept-language", "en-US,en;q=0.9"),
    ("priority", "u=1, i"),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "none"),
    ("x-client", "Rabby"),
    ("x-version", "0.92.72"),
];

// ── API response types ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TotalBalanceResponse {
    total_usd_value: Option<Value>,
    chain_list: Option<Value>,
}

// ── Client ───────────────────────────────────────────────────────────

/// [`BalanceSource`] backed by the Rabby `total_balance` endpoint.
pub struct RabbyClient {
    api_url: String,
    direct: reqwest::Client,
}

impl RabbyClient {
    pub fn new(api_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            api_url: api_url.into(),
            direct: client_builder().build()?,
        })
    }

    /// Client for one attempt. Proxied clients are built fresh every time.
    fn client_for(&self, proxy: Option<&ProxyEntry>) -> Result<reqwest::Client, FetchError> {
        let Some(proxy) = proxy else {
            return Ok(self.direct.clone());
        };
        let proxy_err = |source| FetchError::Proxy {
            proxy: proxy.to_string(),
            source,
        };
        let route = reqwest::Proxy::all(proxy.url()).map_err(proxy_err)?;
        client_builder().proxy(route).build().map_err(proxy_err)
    }
}

#[async_trait]
impl BalanceSource for RabbyClient {
    async fn fetch(
        &self,
        wallet: &str,
        proxy: Option<&ProxyEntry>,
        deadline: Duration,
    ) -> Result<WalletBalance, FetchError> {
        let client = self.client_for(proxy)?;
        let response = client
            .get(&self.api_url)
            .query(&[("id", wallet)])
            .timeout(deadline)
            .send()
            .await
            .map_err(|e| classify(e, deadline))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| classify(e, deadline))?;
        parse_balance(&body)
    }
}

fn client_builder() -> reqwest::ClientBuilder {
    let mut headers = HeaderMap::new();
    for (name, value) in CLIENT_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    reqwest::Client::builder().default_headers(headers)
}

fn classify(err: reqwest::Error, deadline: Duration) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(deadline)
    } else {
        FetchError::Transport(err)
    }
}

// ── Body parsing ─────────────────────────────────────────────────────

/// Extract the total and per-chain values from a `total_balance` body.
///
/// Anything without a numeric `total_usd_value` is [`FetchError::Empty`].
/// The total is truncated toward zero and saturates at the `i64` range.
/// A `chain_list` that is not an array reads as no chains. Chain entries
/// without an `id` are dropped; a missing `usd_value` counts as 0.
pub fn parse_balance(body: &[u8]) -> Result<WalletBalance, FetchError> {
    let response: TotalBalanceResponse =
        serde_json::from_slice(body).map_err(|_| FetchError::Empty)?;

    let total = response
        .total_usd_value
        .as_ref()
        .and_then(as_number)
        .ok_or(FetchError::Empty)?;

    let chains = response
        .chain_list
        .as_ref()
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|entry| {
            let id = entry.get("id")?.as_str()?;
            let usd = entry.get("usd_value").and_then(as_number).unwrap_or(0.0);
            Some(ChainBalance::new(id, usd))
        })
        .collect();

    Ok(WalletBalance {
        total_usd: total.trunc() as i64,
        chains,
    })
}

fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}
