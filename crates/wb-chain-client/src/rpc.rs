use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;
use wb_api_types::ChainId;

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// JSON-RPC client permanently bound to one chain and one endpoint.
///
/// Two clients are equal when they are bound to the same chain and URL.
#[derive(Debug, Clone)]
pub struct TransportClient {
    chain: ChainId,
    url: String,
    http: reqwest::Client,
}

impl PartialEq for TransportClient {
    fn eq(&self, other: &Self) -> bool {
        self.chain == other.chain && self.url == other.url
    }
}

impl Eq for TransportClient {}

// ── JSON-RPC 2.0 wire types ──

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

impl TransportClient {
    pub(crate) fn new(chain: ChainId, url: &str, http: reqwest::Client) -> Self {
        Self {
            chain,
            url: url.to_owned(),
            http,
        }
    }

    pub fn chain(&self) -> ChainId {
        self.chain
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let body = RpcRequest {
            jsonrpc: "2.0",
            id: NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        debug!(chain = %self.chain, method, id = body.id, "rpc request");

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("rpc {method} transport"))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("rpc {method} HTTP {status}: {text}");
        }

        let parsed: RpcResponse = response
            .json()
            .await
            .with_context(|| format!("rpc {method} parse"))?;

        if let Some(err) = parsed.error {
            anyhow::bail!("rpc {method} error {}: {}", err.code, err.message);
        }

        parsed
            .result
            .ok_or_else(|| anyhow!("rpc {method} returned neither result nor error"))
    }

    /// `eth_chainId` as reported by the node.
    pub async fn chain_id(&self) -> Result<ChainId> {
        let value = self.request("eth_chainId", Value::Array(Vec::new())).await?;
        Ok(ChainId(quantity(&value)?))
    }

    pub async fn block_number(&self) -> Result<u64> {
        let value = self.request("eth_blockNumber", Value::Array(Vec::new())).await?;
        quantity(&value)
    }
}

fn quantity(value: &Value) -> Result<u64> {
    let raw = value
        .as_str()
        .ok_or_else(|| anyhow!("expected hex quantity, got {value}"))?;
    parse_quantity(raw)
}

/// Decodes an Ethereum JSON-RPC hex quantity such as `0x1a`.
pub fn parse_quantity(raw: &str) -> Result<u64> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .ok_or_else(|| anyhow!("quantity '{raw}' lacks 0x prefix"))?;
    if digits.is_empty() {
        anyhow::bail!("quantity '{raw}' has no digits");
    }
    u64::from_str_radix(digits, 16).with_context(|| format!("quantity '{raw}' is not hex"))
}
