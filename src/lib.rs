//! # Market Dashboard
//!
//! Turns CoinGecko market data into ready-to-insert HTML fragments for a
//! crypto dashboard: trending coins, stablecoin prices, total market cap,
//! active coin count and the market table.
//!
//! ## Usage
//!
//! ```no_run
//! use market_dashboard::{Dashboard, Widget};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dashboard = Dashboard::new()?;
//!
//! match dashboard.render(Widget::Trending).await {
//!     Ok(fragment) => println!("{}", fragment),
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! MarketDataGateway (CoinGecko)   raw JSON
//!     ↓
//! normalize                       typed records, or ValidationError
//!     ↓
//! indicator + format              badges and US-English figures
//!     ↓
//! render                          HTML fragment
//! ```
//!
//! Every render fetches fresh data. Nothing is cached or shared between
//! requests, so renders can run concurrently without coordination.
//!
//! ## Configuration
//!
//! Defaults live in [`constants`]. `MARKET_DASHBOARD_API_URL` and
//! `MARKET_DASHBOARD_TIMEOUT_SECS` override the API base URL and request
//! timeout (`0` disables the timeout).

pub mod constants;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod gateway;
pub mod gateways;
pub mod indicator;
pub mod normalize;
pub mod render;
pub mod types;

// Re-export commonly used types
pub use dashboard::Dashboard;
pub use error::{DataUnavailable, TransportError, ValidationError};
pub use gateway::{GatewayConfig, MarketDataGateway};
pub use indicator::indicator_for;
pub use types::{
    CoinSnapshot, ColorClass, GlobalStats, Indicator, Sign, Stablecoin, StablecoinSnapshot,
    TrendingItem, Widget,
};
