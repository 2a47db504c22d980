//! Constants for the market dashboard pipeline
//!
//! Defaults for the gateway live here as compile-time constants. The two
//! values a deployment usually needs to change (API base URL and request
//! timeout) can be overridden through the environment, see
//! [`GatewayConfig::from_env`](crate::gateway::GatewayConfig::from_env).

use crate::types::Stablecoin;

/// CoinGecko API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Trending search endpoint
pub const COINGECKO_TRENDING_ENDPOINT: &str = "/search/trending";

/// Coin markets listing endpoint
pub const COINGECKO_MARKETS_ENDPOINT: &str = "/coins/markets";

/// Global market statistics endpoint
pub const COINGECKO_GLOBAL_ENDPOINT: &str = "/global";

/// Quote currency for the markets listing
pub const VS_CURRENCY: &str = "usd";

/// HTTP request timeout (in seconds). Zero leaves the transport default in place.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding [`COINGECKO_API_URL`]
pub const API_URL_ENV: &str = "MARKET_DASHBOARD_API_URL";

/// Environment variable overriding [`REQUEST_TIMEOUT_SECS`]
pub const TIMEOUT_ENV: &str = "MARKET_DASHBOARD_TIMEOUT_SECS";

/// User agent for HTTP requests
pub const USER_AGENT: &str = "market-dashboard/0.1.0";

/// Number of trending coins shown on the dashboard
pub const TRENDING_LIMIT: usize = 3;

/// Stablecoins shown in the stablecoin widget
pub const STABLECOINS: &[Stablecoin] = &[Stablecoin::UsdCoin, Stablecoin::Tether];

/// Fractional digits for trending coin price changes
pub const TRENDING_CHANGE_PRECISION: u32 = 2;

/// Fractional digits for the global market cap change
pub const MARKET_CAP_SUMMARY_PRECISION: u32 = 2;

/// Fractional digits for price and market cap changes in the market table
pub const TABLE_CHANGE_PRECISION: u32 = 1;

/// Fractional digits for trending coin prices
pub const HIGH_PRECISION_PRICE_DIGITS: u32 = 10;
