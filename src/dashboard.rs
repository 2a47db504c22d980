//! Dashboard service: one render pipeline per widget
//!
//! Each operation fetches a fresh payload through the injected gateway,
//! normalizes it and renders the fragment. A failure anywhere aborts that
//! widget only and surfaces as [`DataUnavailable`].

use crate::{
    error::{DataUnavailable, TransportError},
    gateway::{GatewayConfig, MarketDataGateway},
    gateways::CoinGeckoGateway,
    normalize, render,
    types::Widget,
};
use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Renders dashboard widgets from live market data
///
/// # Example
/// ```no_run
/// use market_dashboard::Dashboard;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let dashboard = Dashboard::new()?;
/// let table = dashboard.render_market_table().await?;
/// println!("{}", table);
/// # Ok(())
/// # }
/// ```
pub struct Dashboard {
    gateway: Arc<dyn MarketDataGateway>,
}

impl Dashboard {
    /// Creates a dashboard backed by CoinGecko
    ///
    /// Gateway settings come from [`GatewayConfig::from_env`].
    pub fn new() -> Result<Self, TransportError> {
        let gateway = CoinGeckoGateway::with_config(GatewayConfig::from_env())?;
        Ok(Self::with_gateway(Arc::new(gateway)))
    }

    /// Creates a dashboard with a custom gateway
    ///
    /// This is primarily for testing with mock gateways.
    pub fn with_gateway(gateway: Arc<dyn MarketDataGateway>) -> Self {
        Self { gateway }
    }

    /// Returns the name of the current gateway
    pub fn gateway_name(&self) -> &str {
        self.gateway.gateway_name()
    }

    /// Runs one widget pipeline inside its own span and logs the outcome
    async fn instrumented(
        &self,
        widget: Widget,
        pipeline: impl Future<Output = Result<String, DataUnavailable>>,
    ) -> Result<String, DataUnavailable> {
        let render_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "render",
            %widget,
            %render_id,
            gateway = self.gateway.gateway_name()
        );

        async move {
            let start = Instant::now();
            let result = pipeline.await;
            match &result {
                Ok(fragment) => tracing::debug!(
                    bytes = fragment.len(),
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Rendered widget"
                ),
                Err(e) => tracing::warn!(
                    error = %e,
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Widget data unavailable"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Top three trending coins
    pub async fn render_trending(&self) -> Result<String, DataUnavailable> {
        let widget = Widget::Trending;
        self.instrumented(widget, async {
            let payload = self
                .gateway
                .fetch_trending()
                .await
                .map_err(|e| DataUnavailable::transport(widget, e))?;
            let items =
                normalize::trending(&payload).map_err(|e| DataUnavailable::validation(widget, e))?;
            tracing::debug!(count = items.len(), "Normalized trending coins");
            Ok(render::render_trending(&items))
        })
        .await
    }

    /// USD Coin and Tether prices, in listing order
    pub async fn render_stablecoins(&self) -> Result<String, DataUnavailable> {
        let widget = Widget::Stablecoins;
        self.instrumented(widget, async {
            let payload = self
                .gateway
                .fetch_markets()
                .await
                .map_err(|e| DataUnavailable::transport(widget, e))?;
            let coins =
                normalize::markets(&payload).map_err(|e| DataUnavailable::validation(widget, e))?;
            let stablecoins = normalize::stablecoins(&coins);
            tracing::debug!(
                listed = coins.len(),
                count = stablecoins.len(),
                "Normalized stablecoins"
            );
            Ok(render::render_stablecoins(&stablecoins))
        })
        .await
    }

    /// Total market cap and its 24h change
    pub async fn render_market_cap_summary(&self) -> Result<String, DataUnavailable> {
        let widget = Widget::MarketCapSummary;
        self.instrumented(widget, async {
            let payload = self
                .gateway
                .fetch_global_stats()
                .await
                .map_err(|e| DataUnavailable::transport(widget, e))?;
            let stats = normalize::global_stats(&payload)
                .map_err(|e| DataUnavailable::validation(widget, e))?;
            tracing::debug!(updated_at = ?stats.updated_at, "Normalized global stats");
            Ok(render::render_market_cap_summary(&stats))
        })
        .await
    }

    /// Number of active cryptocurrencies
    pub async fn render_coin_count(&self) -> Result<String, DataUnavailable> {
        let widget = Widget::CoinCount;
        self.instrumented(widget, async {
            let payload = self
                .gateway
                .fetch_global_stats()
                .await
                .map_err(|e| DataUnavailable::transport(widget, e))?;
            let stats = normalize::global_stats(&payload)
                .map_err(|e| DataUnavailable::validation(widget, e))?;
            Ok(render::render_coin_count(&stats))
        })
        .await
    }

    /// Market table rows, one per listed coin
    pub async fn render_market_table(&self) -> Result<String, DataUnavailable> {
        let widget = Widget::MarketTable;
        self.instrumented(widget, async {
            let payload = self
                .gateway
                .fetch_markets()
                .await
                .map_err(|e| DataUnavailable::transport(widget, e))?;
            let coins =
                normalize::markets(&payload).map_err(|e| DataUnavailable::validation(widget, e))?;
            tracing::debug!(count = coins.len(), "Normalized market listing");
            Ok(render::render_market_table(&coins))
        })
        .await
    }

    /// Renders a single widget
    pub async fn render(&self, widget: Widget) -> Result<String, DataUnavailable> {
        match widget {
            Widget::Trending => self.render_trending().await,
            Widget::Stablecoins => self.render_stablecoins().await,
            Widget::MarketCapSummary => self.render_market_cap_summary().await,
            Widget::CoinCount => self.render_coin_count().await,
            Widget::MarketTable => self.render_market_table().await,
        }
    }

    /// Renders every widget concurrently
    ///
    /// Results come back in [`Widget::all`] order. One widget failing does not
    /// affect the others.
    pub async fn render_dashboard(&self) -> Vec<(Widget, Result<String, DataUnavailable>)> {
        let renders = Widget::all().iter().map(|widget| async move {
            (*widget, self.render(*widget).await)
        });
        join_all(renders).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::mock::MockGateway;
    use serde_json::{json, Value};

    fn trending_payload(ids: &[&str]) -> Value {
        let coins: Vec<Value> = ids
            .iter()
            .map(|id| {
                json!({
                    "item": {
                        "id": id,
                        "name": format!("{}-name", id),
                        "small": format!("https://img.example/{}.png", id),
                        "data": {
                            "price": 0.0123,
                            "price_change_percentage_24h": { "usd": -0.004 }
                        }
                    }
                })
            })
            .collect();
        json!({ "coins": coins })
    }

    fn markets_payload(ids: &[&str]) -> Value {
        let coins: Vec<Value> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                json!({
                    "id": id,
                    "symbol": &id[..3],
                    "name": format!("{}-name", id),
                    "image": format!("https://img.example/{}.png", id),
                    "current_price": 1.0,
                    "market_cap": 1000000,
                    "market_cap_rank": i + 1,
                    "price_change_percentage_24h": 0.5,
                    "market_cap_change_percentage_24h": -0.5
                })
            })
            .collect();
        Value::Array(coins)
    }

    fn global_payload() -> Value {
        json!({
            "data": {
                "active_cryptocurrencies": 13542,
                "total_market_cap": { "usd": 2512345678901.455 },
                "market_cap_change_percentage_24h_usd": 1.005,
                "updated_at": 1700000000
            }
        })
    }

    fn dashboard(gateway: MockGateway) -> (Dashboard, Arc<MockGateway>) {
        let gateway = Arc::new(gateway);
        (Dashboard::with_gateway(gateway.clone()), gateway)
    }

    #[tokio::test]
    async fn test_trending_renders_first_three_in_rank_order() {
        let mock = MockGateway::new();
        mock.set_trending(trending_payload(&["one", "two", "three", "four", "five"]));
        let (dashboard, _) = dashboard(mock);

        let html = dashboard.render_trending().await.unwrap();
        assert_eq!(html.matches("<img ").count(), 3);
        let one = html.find("one-name").unwrap();
        let two = html.find("two-name").unwrap();
        let three = html.find("three-name").unwrap();
        assert!(one < two && two < three);
        assert!(!html.contains("four-name"));
        assert!(!html.contains("five-name"));
        assert!(html.contains(r#"<span class="text-green-500">▲ 0.00%</span>"#));
        assert!(html.contains("$0.0123000000"));
    }

    #[tokio::test]
    async fn test_stablecoins_filtered_in_listing_order() {
        let mock = MockGateway::new();
        mock.set_markets(markets_payload(&["bitcoin", "usd-coin", "tether", "ethereum"]));
        let (dashboard, _) = dashboard(mock);

        let html = dashboard.render_stablecoins().await.unwrap();
        assert!(html.contains("usd-coin-name"));
        assert!(html.contains("tether-name"));
        assert!(!html.contains("bitcoin"));
        assert!(!html.contains("ethereum"));
        assert!(html.find("usd-coin-name").unwrap() < html.find("tether-name").unwrap());
        assert_eq!(html.matches("<div>$1.00</div>").count(), 2);
    }

    #[tokio::test]
    async fn test_global_widgets() {
        let mock = MockGateway::new();
        mock.set_global(global_payload());
        let (dashboard, gateway) = dashboard(mock);

        let summary = dashboard.render_market_cap_summary().await.unwrap();
        assert!(summary.contains("$2,512,345,678,901.46"));
        assert!(summary.contains(r#"<span class="text-green-500">▲ 1.01%</span>"#));

        let count = dashboard.render_coin_count().await.unwrap();
        assert!(count.contains("🪙 13542"));

        // no caching between renders
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn test_market_table_rows() {
        let mock = MockGateway::new();
        mock.set_markets(markets_payload(&["bitcoin", "ethereum", "tether"]));
        let (dashboard, _) = dashboard(mock);

        let html = dashboard.render_market_table().await.unwrap();
        assert_eq!(html.matches("<tr ").count(), 3);
        assert!(html.contains(r#"<h4 class="text-gray-400">ETH</h4>"#));
        assert!(html.contains(r#"<td class="text-green-500">▲ 0.5%</td>"#));
        assert!(html.contains(r#"<td class="text-red-500">▼ 0.5%</td>"#));
        assert!(html.contains("<td>$1,000,000.00</td>"));
    }

    #[tokio::test]
    async fn test_transport_failure_makes_every_widget_unavailable() {
        let (dashboard, _) = dashboard(MockGateway::failing(|| TransportError::Timeout));

        for widget in Widget::all() {
            let err = dashboard.render(*widget).await.unwrap_err();
            assert_eq!(err.widget(), *widget);
            assert!(matches!(
                err,
                DataUnavailable::Transport {
                    source: TransportError::Timeout,
                    ..
                }
            ));
        }

        let err = dashboard.render_trending().await.unwrap_err();
        assert_eq!(err.user_message(), "Error fetching trending coins");
    }

    #[tokio::test]
    async fn test_malformed_payload_is_unavailable() {
        let mock = MockGateway::new();
        let mut markets = markets_payload(&["bitcoin", "ethereum"]);
        markets[1]["current_price"] = Value::Null;
        mock.set_markets(markets);
        let (dashboard, _) = dashboard(mock);

        let err = dashboard.render_market_table().await.unwrap_err();
        match err {
            DataUnavailable::Validation { widget, source } => {
                assert_eq!(widget, Widget::MarketTable);
                assert_eq!(source.field(), "$[1].current_price");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_widgets_fail_independently() {
        let mock = MockGateway::new();
        mock.set_trending(trending_payload(&["one"]));
        mock.set_markets(markets_payload(&["bitcoin", "tether"]));
        mock.set_global_error(|| TransportError::RateLimitExceeded);
        let (dashboard, gateway) = dashboard(mock);

        let results = dashboard.render_dashboard().await;
        let widgets: Vec<_> = results.iter().map(|(w, _)| *w).collect();
        assert_eq!(widgets, Widget::all().to_vec());

        for (widget, result) in &results {
            match widget {
                Widget::MarketCapSummary | Widget::CoinCount => assert!(result.is_err()),
                _ => assert!(result.is_ok(), "{} should render", widget),
            }
        }
        assert_eq!(gateway.call_count(), 5);
    }
}
