//! Types for the market dashboard pipeline

use crate::constants::STABLECOINS;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stablecoins tracked by the stablecoin widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stablecoin {
    /// USD Coin
    UsdCoin,
    /// Tether
    Tether,
}

impl Stablecoin {
    /// Get the CoinGecko ID for this stablecoin
    pub fn coingecko_id(&self) -> &'static str {
        match self {
            Stablecoin::UsdCoin => "usd-coin",
            Stablecoin::Tether => "tether",
        }
    }

    /// Look up one of the enabled stablecoins by its CoinGecko ID
    pub fn from_coingecko_id(id: &str) -> Option<Self> {
        STABLECOINS
            .iter()
            .copied()
            .find(|coin| coin.coingecko_id() == id)
    }
}

/// Dashboard widgets, one per render operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    Trending,
    Stablecoins,
    MarketCapSummary,
    CoinCount,
    MarketTable,
}

impl Widget {
    /// Get all widgets in page order
    pub fn all() -> &'static [Widget] {
        &[
            Widget::Trending,
            Widget::Stablecoins,
            Widget::MarketCapSummary,
            Widget::CoinCount,
            Widget::MarketTable,
        ]
    }

    /// Route the HTTP layer serves this widget's fragment on
    pub fn route(&self) -> &'static str {
        match self {
            Widget::Trending => "/trending",
            Widget::Stablecoins => "/usd_coin",
            Widget::MarketCapSummary => "/total_market_cap",
            Widget::CoinCount => "/total_coins",
            Widget::MarketTable => "/table",
        }
    }

    /// Generic failure text shown in place of the widget
    pub fn unavailable_message(&self) -> &'static str {
        match self {
            Widget::Trending => "Error fetching trending coins",
            Widget::Stablecoins | Widget::MarketTable => "Error fetching USD coins",
            Widget::MarketCapSummary => "Error fetching total market cap",
            Widget::CoinCount => "Error fetching total coins",
        }
    }
}

impl std::fmt::Display for Widget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Widget::Trending => "trending",
            Widget::Stablecoins => "stablecoins",
            Widget::MarketCapSummary => "market cap summary",
            Widget::CoinCount => "coin count",
            Widget::MarketTable => "market table",
        };
        f.write_str(name)
    }
}

/// Market snapshot for a single coin from the markets listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSnapshot {
    /// CoinGecko ID, e.g. `bitcoin`
    pub id: String,

    /// Display name
    pub name: String,

    /// Ticker symbol as supplied (usually lower case)
    pub symbol: String,

    /// Logo URL
    pub image_url: String,

    /// Price in USD, never negative
    pub current_price_usd: Decimal,

    /// 24h price change percentage
    pub price_change_pct_24h: Decimal,

    /// Market capitalization in USD
    pub market_cap_usd: Decimal,

    /// 24h market cap change percentage
    pub market_cap_change_pct_24h: Decimal,

    /// Market cap rank, starting at 1. Unranked coins have none.
    pub market_cap_rank: Option<u32>,
}

/// A coin from the trending search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingItem {
    /// CoinGecko ID
    pub coin_id: String,

    /// Display name
    pub name: String,

    /// Logo URL
    pub image_url: String,

    /// Price in USD. Trending coins are often sub-cent.
    pub price_usd: Decimal,

    /// 24h price change percentage against USD
    pub price_change_pct_24h_usd: Decimal,
}

/// A [`CoinSnapshot`] known to be one of the tracked [`Stablecoin`]s
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StablecoinSnapshot {
    pub stablecoin: Stablecoin,
    pub snapshot: CoinSnapshot,
}

impl StablecoinSnapshot {
    /// Narrows a snapshot to a stablecoin, or returns None for any other coin
    pub fn from_snapshot(snapshot: &CoinSnapshot) -> Option<Self> {
        Stablecoin::from_coingecko_id(&snapshot.id).map(|stablecoin| Self {
            stablecoin,
            snapshot: snapshot.clone(),
        })
    }
}

/// Whole-market statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    /// Total market capitalization in USD
    pub total_market_cap_usd: Decimal,

    /// 24h total market cap change percentage
    pub market_cap_change_pct_24h: Decimal,

    /// Number of actively traded cryptocurrencies
    pub active_cryptocurrencies: u64,

    /// When the provider last refreshed these figures
    pub updated_at: Option<DateTime<Utc>>,
}

/// Direction of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    Up,
    Down,
}

impl Sign {
    /// Badge glyph
    pub fn glyph(&self) -> &'static str {
        match self {
            Sign::Up => "▲",
            Sign::Down => "▼",
        }
    }
}

/// Color classification of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorClass {
    Positive,
    Negative,
}

impl ColorClass {
    /// CSS class used by the dashboard markup
    pub fn css_class(&self) -> &'static str {
        match self {
            ColorClass::Positive => "text-green-500",
            ColorClass::Negative => "text-red-500",
        }
    }
}

/// Presentation of a signed percentage: direction, rounded magnitude and color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub sign: Sign,

    /// Absolute value of the rounded change
    pub magnitude: Decimal,

    pub color_class: ColorClass,

    /// Fractional digits the magnitude was rounded to
    pub precision: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stablecoin_ids_round_trip() {
        for coin in [Stablecoin::UsdCoin, Stablecoin::Tether] {
            assert_eq!(Stablecoin::from_coingecko_id(coin.coingecko_id()), Some(coin));
        }
        assert_eq!(Stablecoin::from_coingecko_id("bitcoin"), None);
        assert_eq!(Stablecoin::from_coingecko_id("USD-COIN"), None);
    }

    #[test]
    fn test_widget_routes_are_distinct() {
        let mut routes: Vec<_> = Widget::all().iter().map(|w| w.route()).collect();
        routes.sort();
        routes.dedup();
        assert_eq!(routes.len(), Widget::all().len());
    }
}
