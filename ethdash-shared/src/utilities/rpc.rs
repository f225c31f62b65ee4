use std::time::Duration;
use alloy_primitives::U256;
use ethers_core::types::Address;
use once_cell::sync::Lazy;
use reqwest::{Client, Response};
use serde_json::{json, Value};
use tokio::sync::OnceCell;
use crate::models::errors::SourceError;
use crate::utilities::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::utilities::gas::GasPriceSource;

static SHARED_CLIENT: Lazy<Client> = Lazy::new(|| {
    build_http_client(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)).unwrap_or_else(|_| Client::new())
});

pub fn build_http_client(timeout: Duration) -> Result<Client, SourceError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| SourceError::TransportUnavailable(format!("Failed to build HTTP client: {}", e)))
}

pub fn shared_http_client() -> Client {
    SHARED_CLIENT.clone()
}

/// Native balance of an account, in wei.
#[async_trait::async_trait]
pub trait BalanceSource: Send + Sync {
    async fn fetch_balance(&self, account: &Address) -> Result<U256, SourceError>;
}

/// JSON-RPC client over an ordered list of endpoints.
///
/// The first endpoint that answers `eth_blockNumber` is pinned for the life of
/// the client. While none has answered, every call probes the list again.
pub struct RpcClient {
    client: Client,
    urls: Vec<String>,
    endpoint: OnceCell<String>,
}

impl RpcClient {
    pub fn new(urls: Vec<String>) -> Self {
        Self::with_client(shared_http_client(), urls)
    }

    pub fn with_client(client: Client, urls: Vec<String>) -> Self {
        Self {
            client,
            urls,
            endpoint: OnceCell::new(),
        }
    }

    pub fn connected_endpoint(&self) -> Option<&str> {
        self.endpoint.get().map(String::as_str)
    }

    async fn endpoint(&self) -> Result<&str, SourceError> {
        self.endpoint
            .get_or_try_init(|| self.probe())
            .await
            .map(String::as_str)
    }

    async fn probe(&self) -> Result<String, SourceError> {
        for url in &self.urls {
            match self.call_at(url, "eth_blockNumber", json!([])).await {
                Ok(_) => {
                    log::info!("Connected to RPC endpoint {}", url);
                    return Ok(url.clone());
                }
                Err(e) => log::warn!("RPC endpoint {} unavailable: {}", url, e),
            }
        }

        Err(SourceError::TransportUnavailable("Could not connect to any RPC endpoint".to_string()))
    }

    async fn call_at(&self, url: &str, method: &str, params: Value) -> Result<Value, SourceError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        let response = self.client.post(url)
            .json(&payload)
            .send()
            .await;

        let body = validate_response(method, response).await?;
        extract_result(method, body)
    }

    pub async fn call(&self, method: &str, params: Value) -> Result<Value, SourceError> {
        let url = self.endpoint().await?;
        self.call_at(url, method, params).await
    }
}

#[async_trait::async_trait]
impl BalanceSource for RpcClient {
    async fn fetch_balance(&self, account: &Address) -> Result<U256, SourceError> {
        let result = self
            .call("eth_getBalance", json!([format!("0x{:x}", account), "latest"]))
            .await?;
        parse_hex_quantity("eth_getBalance", &result)
    }
}

#[async_trait::async_trait]
impl GasPriceSource for RpcClient {
    async fn fetch_gas_price(&self) -> Result<U256, SourceError> {
        let result = self.call("eth_gasPrice", json!([])).await?;
        parse_hex_quantity("eth_gasPrice", &result)
    }
}

pub async fn validate_response(
    endpoint: &str,
    response: Result<Response, reqwest::Error>,
) -> Result<Value, SourceError> {
    let resp = response.map_err(|e| {
        log::error!("[{}] HTTP request failed: {}", endpoint, e);
        SourceError::TransportUnavailable(format!("{} request failed: {}", endpoint, e))
    })?;

    let status = resp.status();
    let body = resp.text().await.map_err(|e| {
        SourceError::TransportUnavailable(format!("Failed to read {} response: {}", endpoint, e))
    })?;
    log::debug!("{} Response ({}): {}", endpoint, status, body);

    if !status.is_success() {
        return Err(SourceError::TransportUnavailable(format!("{} returned HTTP {}", endpoint, status)));
    }

    serde_json::from_str(&body).map_err(|e| SourceError::malformed(endpoint, format!("JSON parse error: {}", e)))
}

/// Unwraps a JSON-RPC envelope into its `result`.
pub fn extract_result(method: &str, mut body: Value) -> Result<Value, SourceError> {
    if let Some(error) = body.get("error") {
        return Err(SourceError::Rpc {
            method: method.to_string(),
            code: error.get("code").and_then(Value::as_i64).unwrap_or_default(),
            message: error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string(),
        });
    }

    match body.get_mut("result") {
        Some(result) => Ok(result.take()),
        None => Err(SourceError::malformed(method, "missing result field")),
    }
}

pub fn parse_hex_quantity(method: &str, value: &Value) -> Result<U256, SourceError> {
    let raw = value
        .as_str()
        .ok_or_else(|| SourceError::malformed(method, format!("expected hex string, got {}", value)))?;
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| SourceError::malformed(method, format!("missing 0x prefix: {}", raw)))?;

    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(digits, 16).map_err(|e| SourceError::malformed(method, format!("{}: {}", raw, e)))
}
