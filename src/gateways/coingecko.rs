//! CoinGecko gateway implementation

use crate::{
    constants::{
        COINGECKO_GLOBAL_ENDPOINT, COINGECKO_MARKETS_ENDPOINT, COINGECKO_TRENDING_ENDPOINT,
        VS_CURRENCY,
    },
    error::TransportError,
    gateway::{GatewayConfig, MarketDataGateway},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// CoinGecko public API gateway
pub struct CoinGeckoGateway {
    client: Client,
    base_url: String,
}

impl CoinGeckoGateway {
    /// Creates a gateway with the default configuration
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(GatewayConfig::default())
    }

    /// Creates a gateway with the given configuration
    pub fn with_config(config: GatewayConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::NetworkError)?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    fn trending_url(&self) -> String {
        format!("{}{}", self.base_url, COINGECKO_TRENDING_ENDPOINT)
    }

    fn markets_url(&self) -> String {
        format!(
            "{}{}?vs_currency={}",
            self.base_url, COINGECKO_MARKETS_ENDPOINT, VS_CURRENCY
        )
    }

    fn global_url(&self) -> String {
        format!("{}{}", self.base_url, COINGECKO_GLOBAL_ENDPOINT)
    }

    /// GETs a URL and decodes the body as untyped JSON
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        tracing::debug!(url = url, "Fetching from CoinGecko");

        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(TransportError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(TransportError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            TransportError::InvalidResponse(format!(
                "Failed to parse CoinGecko response: {}. Response: {}",
                e, body
            ))
        })
    }
}

#[async_trait]
impl MarketDataGateway for CoinGeckoGateway {
    async fn fetch_trending(&self) -> Result<Value, TransportError> {
        self.get_json(&self.trending_url()).await
    }

    async fn fetch_markets(&self) -> Result<Value, TransportError> {
        self.get_json(&self.markets_url()).await
    }

    async fn fetch_global_stats(&self) -> Result<Value, TransportError> {
        self.get_json(&self.global_url()).await
    }

    fn gateway_name(&self) -> &'static str {
        "coingecko"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response on a local port and returns its base URL
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}", addr)
    }

    fn local_gateway(base_url: String) -> CoinGeckoGateway {
        let config = GatewayConfig {
            base_url,
            timeout: Some(std::time::Duration::from_secs(5)),
            ..GatewayConfig::default()
        };
        CoinGeckoGateway::with_config(config).unwrap()
    }

    #[tokio::test]
    async fn test_too_many_requests_is_rate_limit() {
        let gateway = local_gateway(serve_once("429 Too Many Requests", "").await);
        let err = gateway.fetch_trending().await.unwrap_err();
        assert!(matches!(err, TransportError::RateLimitExceeded));
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let gateway = local_gateway(serve_once("500 Internal Server Error", "boom").await);
        let err = gateway.fetch_markets().await.unwrap_err();
        match err {
            TransportError::ApiError(msg) => {
                assert!(msg.contains("500"), "{}", msg);
                assert!(msg.contains("boom"), "{}", msg);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_invalid_response() {
        let gateway = local_gateway(serve_once("200 OK", "<html>").await);
        let err = gateway.fetch_global_stats().await.unwrap_err();
        match err {
            TransportError::InvalidResponse(msg) => assert!(msg.contains("<html>"), "{}", msg),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_json_body_is_returned_untouched() {
        let gateway = local_gateway(serve_once("200 OK", r#"{"data":{"markets":1}}"#).await);
        let payload = gateway.fetch_global_stats().await.unwrap();
        assert_eq!(payload["data"]["markets"].as_u64(), Some(1));
    }

    #[test]
    fn test_endpoint_urls() {
        let gateway = CoinGeckoGateway::new().unwrap();
        assert_eq!(
            gateway.trending_url(),
            "https://api.coingecko.com/api/v3/search/trending"
        );
        assert_eq!(
            gateway.markets_url(),
            "https://api.coingecko.com/api/v3/coins/markets?vs_currency=usd"
        );
        assert_eq!(gateway.global_url(), "https://api.coingecko.com/api/v3/global");
    }

    #[test]
    fn test_custom_base_url() {
        let config = GatewayConfig {
            base_url: "http://127.0.0.1:9999".to_string(),
            timeout: None,
            ..GatewayConfig::default()
        };
        let gateway = CoinGeckoGateway::with_config(config).unwrap();
        assert_eq!(gateway.global_url(), "http://127.0.0.1:9999/global");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let config = GatewayConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Some(std::time::Duration::from_secs(2)),
            ..GatewayConfig::default()
        };
        let gateway = CoinGeckoGateway::with_config(config).unwrap();
        let err = gateway.fetch_global_stats().await.unwrap_err();
        assert!(matches!(
            err,
            TransportError::NetworkError(_) | TransportError::Timeout
        ));
    }
}
