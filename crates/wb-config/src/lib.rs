//! Bootstrap configuration.
//!
//! Read once at startup and passed by reference to everything that needs it.
//! `from_env()` reads the process environment; `from_build_env()` uses the
//! values captured when the crate was compiled, which is what the browser
//! build relies on.

use tracing::{debug, warn};
use wb_api_types::{AppMetadata, Credential};
use wb_chain_client::EndpointTable;

pub const PROJECT_ID_VAR: &str = "WALLETCONNECT_PROJECT_ID";
pub const APP_NAME_VAR: &str = "WALLET_APP_NAME";
pub const FALLBACK_RPC_VAR: &str = "WALLET_FALLBACK_RPC_URL";

/// Public project id used when none is configured.
pub const DEFAULT_PROJECT_ID: &str = "dce4c19a5efd3cba4116b12d4fc3689a";
pub const DEFAULT_APP_NAME: &str = "RainbowKit App";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    pub credential: Credential,
    pub app_name: String,
    pub metadata: AppMetadata,
    pub fallback_rpc_url: Option<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

pub fn default_metadata() -> AppMetadata {
    AppMetadata {
        name: "Test App".to_owned(),
        description: "AppKit Example".to_owned(),
        url: "https://web3modal.com".to_owned(),
        icons: vec!["https://avatars.githubusercontent.com/u/37784886".to_owned()],
    }
}

impl BootstrapConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                PROJECT_ID_VAR => option_env!("WALLETCONNECT_PROJECT_ID"),
                APP_NAME_VAR => option_env!("WALLET_APP_NAME"),
                FALLBACK_RPC_VAR => option_env!("WALLET_FALLBACK_RPC_URL"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let credential = match read(PROJECT_ID_VAR) {
            Some(value) => Credential::new(value),
            None => {
                debug!("{PROJECT_ID_VAR} not set, using default project id");
                Credential::new(DEFAULT_PROJECT_ID)
            }
        };

        Self {
            credential,
            app_name: read(APP_NAME_VAR).unwrap_or_else(|| DEFAULT_APP_NAME.to_owned()),
            metadata: default_metadata(),
            fallback_rpc_url: read(FALLBACK_RPC_VAR),
        }
    }

    /// Public endpoints, with the configured fallback override when it is usable.
    pub fn endpoint_table(&self) -> EndpointTable {
        let table = EndpointTable::public();
        let Some(url) = self.fallback_rpc_url.as_deref() else {
            return table;
        };

        match table.clone().with_fallback(url) {
            Ok(overridden) => overridden,
            Err(err) => {
                warn!("ignoring {FALLBACK_RPC_VAR}: {err}");
                table
            }
        }
    }
}
