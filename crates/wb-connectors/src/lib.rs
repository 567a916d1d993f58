//! Selectable wallet integrations, grouped and de-duplicated.
//!
//! A connector that needs the project credential is never emitted without
//! one. When the credential is blank such an entry is logged and omitted;
//! the rest of the build continues.

pub mod wallets;

use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};
use wb_api_types::{ConnectorDescriptor, ConnectorGroup, Credential};

pub const RECOMMENDED_GROUP: &str = "Recommended";
pub const OTHERS_GROUP: &str = "Others";

/// Inputs every wallet factory is invoked with.
#[derive(Debug, Clone, Copy)]
pub struct WalletOptions<'a> {
    pub credential: &'a Credential,
    pub app_name: &'a str,
}

/// One wallet integration, before it is placed in a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConnector {
    pub id: &'static str,
    pub display_name: &'static str,
    pub requires_credential: bool,
    pub app_name: Option<String>,
}

pub type WalletFactory = fn(&WalletOptions<'_>) -> WalletConnector;

#[derive(Clone)]
pub struct WalletGroup {
    pub name: String,
    pub wallets: Vec<WalletFactory>,
}

impl WalletGroup {
    pub fn new(name: impl Into<String>, wallets: Vec<WalletFactory>) -> Self {
        Self {
            name: name.into(),
            wallets,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("connector '{connector_id}' in group '{group_name}' requires a credential but none is configured")]
    MisconfiguredCredential {
        connector_id: String,
        group_name: String,
    },
}

/// Output of [`ConnectorRegistry::build_report`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryBuild {
    pub groups: Vec<ConnectorGroup>,
    pub rejected: Vec<ConnectorError>,
}

#[derive(Clone, Default)]
pub struct ConnectorRegistry {
    groups: Vec<WalletGroup>,
}

/// "Recommended" and "Others", in display order.
pub fn default_groups() -> Vec<WalletGroup> {
    vec![
        WalletGroup::new(
            RECOMMENDED_GROUP,
            vec![
                wallets::coinbase_wallet,
                wallets::trust_wallet,
                wallets::rainbow_wallet,
                wallets::meta_mask_wallet,
                wallets::wallet_connect_wallet,
            ],
        ),
        WalletGroup::new(
            OTHERS_GROUP,
            vec![
                wallets::binance_wallet,
                wallets::bybit_wallet,
                wallets::okx_wallet,
                wallets::uniswap_wallet,
            ],
        ),
    ]
}

impl ConnectorRegistry {
    pub fn new(groups: Vec<WalletGroup>) -> Self {
        Self { groups }
    }

    pub fn with_defaults() -> Self {
        Self::new(default_groups())
    }

    pub fn register_group(&mut self, group: WalletGroup) {
        self.groups.push(group);
    }

    pub fn build(&self, credential: &Credential, app_name: &str) -> Vec<ConnectorGroup> {
        self.build_report(credential, app_name).groups
    }

    /// Group order and within-group order are preserved. The first
    /// occurrence of an id wins; groups left empty are dropped.
    pub fn build_report(&self, credential: &Credential, app_name: &str) -> RegistryBuild {
        let options = WalletOptions {
            credential,
            app_name,
        };
        let mut seen: HashSet<&'static str> = HashSet::new();
        let mut report = RegistryBuild::default();

        for group in &self.groups {
            let mut connectors = Vec::with_capacity(group.wallets.len());

            for factory in &group.wallets {
                let wallet = factory(&options);

                if seen.contains(wallet.id) {
                    debug!(connector = wallet.id, group = %group.name, "duplicate connector dropped");
                    continue;
                }

                if wallet.requires_credential && credential.is_blank() {
                    let err = ConnectorError::MisconfiguredCredential {
                        connector_id: wallet.id.to_owned(),
                        group_name: group.name.clone(),
                    };
                    warn!("{err}");
                    report.rejected.push(err);
                    continue;
                }

                seen.insert(wallet.id);
                connectors.push(ConnectorDescriptor {
                    id: wallet.id.to_owned(),
                    group_name: group.name.clone(),
                    display_name: wallet.display_name.to_owned(),
                    requires_credential: wallet.requires_credential,
                    credential: wallet.requires_credential.then(|| credential.clone()),
                    app_name: wallet.app_name,
                });
            }

            if !connectors.is_empty() {
                report.groups.push(ConnectorGroup {
                    group_name: group.name.clone(),
                    connectors,
                });
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(groups: &[ConnectorGroup]) -> Vec<(String, Vec<String>)> {
        groups
            .iter()
            .map(|g| (g.group_name.clone(), g.ids().map(str::to_owned).collect()))
            .collect()
    }

    fn injected_meta_mask(_: &WalletOptions<'_>) -> WalletConnector {
        WalletConnector {
            id: "metaMask",
            display_name: "MetaMask (injected)",
            requires_credential: false,
            app_name: None,
        }
    }

    #[test]
    fn default_groups_preserve_order() {
        let groups = ConnectorRegistry::with_defaults().build(&Credential::new("pid"), "App");

        assert_eq!(
            ids(&groups),
            vec![
                (
                    "Recommended".to_owned(),
                    vec!["coinbase", "trust", "rainbow", "metaMask", "walletConnect"]
                        .into_iter()
                        .map(str::to_owned)
                        .collect()
                ),
                (
                    "Others".to_owned(),
                    vec!["binance", "bybit", "okx", "uniswap"]
                        .into_iter()
                        .map(str::to_owned)
                        .collect()
                ),
            ]
        );
    }

    #[test]
    fn duplicate_across_groups_keeps_first_position() {
        let registry = ConnectorRegistry::new(vec![
            WalletGroup::new(
                RECOMMENDED_GROUP,
                vec![wallets::rainbow_wallet, wallets::meta_mask_wallet],
            ),
            WalletGroup::new(
                OTHERS_GROUP,
                vec![wallets::okx_wallet, wallets::rainbow_wallet, wallets::uniswap_wallet],
            ),
        ]);

        let groups = registry.build(&Credential::new("pid"), "App");
        let all: Vec<(&str, &str)> = groups
            .iter()
            .flat_map(|g| g.connectors.iter().map(|c| (c.group_name.as_str(), c.id.as_str())))
            .collect();

        assert_eq!(
            all,
            vec![
                ("Recommended", "rainbow"),
                ("Recommended", "metaMask"),
                ("Others", "okx"),
                ("Others", "uniswap"),
            ]
        );
    }

    #[test]
    fn duplicate_within_group_keeps_first_position() {
        let registry = ConnectorRegistry::new(vec![WalletGroup::new(
            RECOMMENDED_GROUP,
            vec![wallets::trust_wallet, wallets::bybit_wallet, wallets::trust_wallet],
        )]);

        let groups = registry.build(&Credential::new("pid"), "App");
        assert_eq!(groups[0].ids().collect::<Vec<_>>(), vec!["trust", "bybit"]);
    }

    #[test]
    fn blank_credential_omits_only_credentialed_connectors() {
        let report = ConnectorRegistry::with_defaults().build_report(&Credential::new(""), "App");

        assert_eq!(ids(&report.groups), vec![("Recommended".to_owned(), vec!["coinbase".to_owned()])]);
        assert_eq!(report.rejected.len(), 8);
        assert!(report.rejected.contains(&ConnectorError::MisconfiguredCredential {
            connector_id: "walletConnect".to_owned(),
            group_name: RECOMMENDED_GROUP.to_owned(),
        }));
        for group in &report.groups {
            for connector in &group.connectors {
                assert!(!connector.requires_credential);
                assert!(connector.credential.is_none());
            }
        }
    }

    #[test]
    fn rejected_connector_does_not_reserve_its_id() {
        let registry = ConnectorRegistry::new(vec![
            WalletGroup::new(RECOMMENDED_GROUP, vec![wallets::meta_mask_wallet]),
            WalletGroup::new(OTHERS_GROUP, vec![injected_meta_mask]),
        ]);

        let report = registry.build_report(&Credential::new(" "), "App");
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(
            ids(&report.groups),
            vec![("Others".to_owned(), vec!["metaMask".to_owned()])]
        );
    }

    #[test]
    fn credentialed_connectors_carry_the_credential() {
        let credential = Credential::new("pid");
        let groups = ConnectorRegistry::with_defaults().build(&credential, "App");

        let wallet_connect = groups
            .iter()
            .flat_map(|g| g.connectors.iter())
            .find(|c| c.id == "walletConnect")
            .expect("walletConnect present");
        assert_eq!(wallet_connect.credential.as_ref(), Some(&credential));

        let coinbase = &groups[0].connectors[0];
        assert_eq!(coinbase.id, "coinbase");
        assert!(coinbase.credential.is_none());
    }

    #[test]
    fn app_name_reaches_connectors_that_advertise_it() {
        let registry = ConnectorRegistry::with_defaults();
        let credential = Credential::new("pid");

        let first = registry.build(&credential, "App One");
        let second = registry.build(&credential, "Totally Different");
        assert_ne!(first, second);

        let coinbase = &second[0].connectors[0];
        assert_eq!(coinbase.id, "coinbase");
        assert_eq!(coinbase.app_name.as_deref(), Some("Totally Different"));

        let rainbow = second
            .iter()
            .flat_map(|g| g.connectors.iter())
            .find(|c| c.id == "rainbow")
            .expect("rainbow present");
        assert!(rainbow.app_name.is_none());
    }

    #[test]
    fn registered_groups_append_in_order() {
        let mut registry = ConnectorRegistry::default();
        registry.register_group(WalletGroup::new("More", vec![wallets::okx_wallet]));
        registry.register_group(WalletGroup::new("Empty", Vec::new()));

        let groups = registry.build(&Credential::new("pid"), "App");
        assert_eq!(ids(&groups), vec![("More".to_owned(), vec!["okx".to_owned()])]);
    }
}
