//! Chain id → RPC endpoint resolution and transport construction.

mod rpc;

pub use rpc::{TransportClient, parse_quantity};

use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;
use wb_api_types::ChainId;

/// Used for every chain without a usable entry of its own.
pub const FALLBACK_RPC_URL: &str =
    "https://eth-mainnet.g.alchemy.com/v2/iUoZdhhu265uyKgw-V6FojhyO80OKfmV";

const PUBLIC_ENDPOINTS: &[(u64, &str, &str)] = &[
    (1, "Ethereum Mainnet", "https://cloudflare-eth.com"),
    (137, "Polygon", "https://polygon-rpc.com"),
    (10, "Optimism", "https://mainnet.optimism.io"),
    (42161, "Arbitrum", "https://arb1.arbitrum.io/rpc"),
    (56, "Binance Smart Chain", "https://rpc.ankr.com/bsc"),
    (100, "Gnosis Chain", "https://rpc.gnosischain.com"),
    (240, "Nexilix", "https://rpcurl.pos.nexilix.com"),
    (324, "zkSync Era", "https://mainnet.era.zksync.io"),
    (61, "Ethereum Classic", "https://etc.rivet.link"),
    (8453, "Base", "https://mainnet.base.org"),
];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("invalid RPC url '{url}'")]
    InvalidUrl { url: String },
    #[error("chain {0} already has an endpoint")]
    DuplicateChain(ChainId),
}

/// Human-readable name of a built-in network.
pub fn chain_name(chain: ChainId) -> Option<&'static str> {
    PUBLIC_ENDPOINTS
        .iter()
        .find(|(id, _, _)| *id == chain.0)
        .map(|(_, name, _)| *name)
}

/// Only absolute http(s) URLs with a host can back a transport.
pub fn is_usable_url(raw: &str) -> bool {
    match reqwest::Url::parse(raw.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTable {
    endpoints: BTreeMap<ChainId, String>,
    fallback: String,
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self::public()
    }
}

impl EndpointTable {
    /// Empty table; every chain resolves to `fallback`.
    pub fn new(fallback: &str) -> Result<Self, EndpointError> {
        Ok(Self {
            endpoints: BTreeMap::new(),
            fallback: validated(fallback)?,
        })
    }

    /// The built-in public endpoints with [`FALLBACK_RPC_URL`].
    pub fn public() -> Self {
        let endpoints = PUBLIC_ENDPOINTS
            .iter()
            .map(|(id, _, url)| (ChainId(*id), (*url).to_owned()))
            .collect();

        Self {
            endpoints,
            fallback: FALLBACK_RPC_URL.to_owned(),
        }
    }

    pub fn insert(&mut self, chain: ChainId, url: impl Into<String>) -> Result<(), EndpointError> {
        if self.endpoints.contains_key(&chain) {
            return Err(EndpointError::DuplicateChain(chain));
        }
        self.endpoints.insert(chain, url.into().trim().to_owned());
        Ok(())
    }

    pub fn with_fallback(mut self, fallback: &str) -> Result<Self, EndpointError> {
        self.fallback = validated(fallback)?;
        Ok(self)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn chains(&self) -> Vec<ChainId> {
        self.endpoints.keys().copied().collect()
    }

    /// Total: unknown chains and unusable entries both yield the fallback.
    pub fn resolve(&self, chain: ChainId) -> &str {
        match self.endpoints.get(&chain) {
            Some(url) if is_usable_url(url) => url,
            Some(url) => {
                warn!(%chain, url = %url, "unusable RPC endpoint, using fallback");
                &self.fallback
            }
            None => &self.fallback,
        }
    }
}

fn validated(url: &str) -> Result<String, EndpointError> {
    if !is_usable_url(url) {
        return Err(EndpointError::InvalidUrl { url: url.to_owned() });
    }
    Ok(url.trim().to_owned())
}

/// Builds [`TransportClient`]s from an [`EndpointTable`].
///
/// Built clients share one connection pool; nothing else is cached.
#[derive(Debug, Clone)]
pub struct TransportFactory {
    table: EndpointTable,
    http: reqwest::Client,
}

impl TransportFactory {
    pub fn new(table: EndpointTable) -> Self {
        Self {
            table,
            http: reqwest::Client::new(),
        }
    }

    pub fn table(&self) -> &EndpointTable {
        &self.table
    }

    pub fn resolve(&self, chain: ChainId) -> &str {
        self.table.resolve(chain)
    }

    pub fn build(&self, chain: ChainId) -> TransportClient {
        let url = self.table.resolve(chain);
        TransportClient::new(chain, url, self.http.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_chain_resolves_to_its_endpoint() {
        let table = EndpointTable::public();
        assert_eq!(table.resolve(ChainId(1)), "https://cloudflare-eth.com");
        assert_eq!(table.resolve(ChainId(42161)), "https://arb1.arbitrum.io/rpc");
        assert_eq!(table.resolve(ChainId(8453)), "https://mainnet.base.org");
    }

    #[test]
    fn unknown_chain_resolves_to_fallback() {
        let table = EndpointTable::public();
        assert_eq!(table.resolve(ChainId(999_999)), FALLBACK_RPC_URL);
        assert_eq!(table.resolve(ChainId(0)), FALLBACK_RPC_URL);
    }

    #[test]
    fn public_table_covers_exactly_the_built_in_chains() {
        let chains: Vec<u64> = EndpointTable::public().chains().iter().map(|c| c.0).collect();
        assert_eq!(chains, vec![1, 10, 56, 61, 100, 137, 240, 324, 8453, 42161]);
        assert!(is_usable_url(FALLBACK_RPC_URL));
        for chain in EndpointTable::public().chains() {
            assert!(chain_name(chain).is_some());
        }
    }

    #[test]
    fn unusable_entry_falls_back() -> anyhow::Result<()> {
        let mut table = EndpointTable::new("https://fallback.example")?;
        table.insert(ChainId(7), "not a url")?;
        table.insert(ChainId(8), "ftp://files.example")?;
        table.insert(ChainId(9), "https://nine.example")?;

        assert_eq!(table.resolve(ChainId(7)), "https://fallback.example");
        assert_eq!(table.resolve(ChainId(8)), "https://fallback.example");
        assert_eq!(table.resolve(ChainId(9)), "https://nine.example");
        Ok(())
    }

    #[test]
    fn padded_entry_resolves_trimmed() -> anyhow::Result<()> {
        let mut table = EndpointTable::new(" https://fallback.example ")?;
        table.insert(ChainId(5), "  https://five.example\n")?;

        assert_eq!(table.resolve(ChainId(5)), "https://five.example");
        assert_eq!(table.fallback(), "https://fallback.example");
        Ok(())
    }

    #[test]
    fn duplicate_chain_is_rejected() -> anyhow::Result<()> {
        let mut table = EndpointTable::new("https://fallback.example")?;
        table.insert(ChainId(1), "https://one.example")?;

        let err = table.insert(ChainId(1), "https://other.example").unwrap_err();
        assert_eq!(err, EndpointError::DuplicateChain(ChainId(1)));
        assert_eq!(table.resolve(ChainId(1)), "https://one.example");
        Ok(())
    }

    #[test]
    fn invalid_fallback_is_rejected() {
        assert!(matches!(
            EndpointTable::new(""),
            Err(EndpointError::InvalidUrl { .. })
        ));
        assert!(EndpointTable::public().with_fallback("mailto:ops@example.com").is_err());
    }

    #[test]
    fn build_is_idempotent_per_chain() {
        let factory = TransportFactory::new(EndpointTable::public());

        let first = factory.build(ChainId(137));
        let second = factory.build(ChainId(137));
        assert_eq!(first, second);
        assert_eq!(first.url(), "https://polygon-rpc.com");
        assert_eq!(first.chain(), ChainId(137));

        let unknown = factory.build(ChainId(31337));
        assert_eq!(unknown.url(), FALLBACK_RPC_URL);
        assert_ne!(unknown, first);
    }
}
