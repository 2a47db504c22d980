//! Gateway abstraction for fetching raw market data payloads

use crate::{
    constants::{API_URL_ENV, COINGECKO_API_URL, REQUEST_TIMEOUT_SECS, TIMEOUT_ENV, USER_AGENT},
    error::TransportError,
};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Trait for market data gateways
///
/// Implementations return the provider's JSON untouched; validation happens in
/// [`normalize`](crate::normalize). Every call is a fresh fetch, nothing is
/// cached between calls.
#[async_trait]
pub trait MarketDataGateway: Send + Sync {
    /// Fetches the trending search payload
    async fn fetch_trending(&self) -> Result<Value, TransportError>;

    /// Fetches the USD coin markets listing
    async fn fetch_markets(&self) -> Result<Value, TransportError>;

    /// Fetches the global market statistics payload
    async fn fetch_global_stats(&self) -> Result<Value, TransportError>;

    /// Returns the name of this gateway
    fn gateway_name(&self) -> &'static str;
}

/// Connection settings for an HTTP gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// API base URL without trailing slash
    pub base_url: String,

    /// Per-request timeout. `None` leaves the HTTP client's own default
    /// (no timeout) in place.
    pub timeout: Option<Duration>,

    /// User agent for HTTP requests
    pub user_agent: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO_API_URL.to_string(),
            timeout: timeout_from_secs(REQUEST_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl GatewayConfig {
    /// Builds a config from the defaults, overridden by
    /// `MARKET_DASHBOARD_API_URL` and `MARKET_DASHBOARD_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_ENV) {
            let url = url.trim().trim_end_matches('/');
            if !url.is_empty() {
                config.base_url = url.to_string();
            }
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.timeout = timeout_from_secs(secs),
                Err(e) => tracing::warn!(
                    value = %raw,
                    error = %e,
                    "Ignoring invalid {}, using default timeout",
                    TIMEOUT_ENV
                ),
            }
        }

        config
    }
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
