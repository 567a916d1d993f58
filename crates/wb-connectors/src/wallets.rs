//! Built-in wallet factories.
//!
//! Everything except Coinbase Wallet falls back to a WalletConnect pairing
//! and therefore needs the project credential. Coinbase Wallet instead
//! shows the application name in its own connection prompt.

use crate::{WalletConnector, WalletOptions};

pub fn coinbase_wallet(options: &WalletOptions<'_>) -> WalletConnector {
    WalletConnector {
        id: "coinbase",
        display_name: "Coinbase Wallet",
        requires_credential: false,
        app_name: Some(options.app_name.to_owned()),
    }
}

pub fn trust_wallet(_options: &WalletOptions<'_>) -> WalletConnector {
    walletconnect_backed("trust", "Trust Wallet")
}

pub fn rainbow_wallet(_options: &WalletOptions<'_>) -> WalletConnector {
    walletconnect_backed("rainbow", "Rainbow")
}

pub fn meta_mask_wallet(_options: &WalletOptions<'_>) -> WalletConnector {
    walletconnect_backed("metaMask", "MetaMask")
}

pub fn wallet_connect_wallet(_options: &WalletOptions<'_>) -> WalletConnector {
    walletconnect_backed("walletConnect", "WalletConnect")
}

pub fn binance_wallet(_options: &WalletOptions<'_>) -> WalletConnector {
    walletconnect_backed("binance", "Binance Wallet")
}

pub fn bybit_wallet(_options: &WalletOptions<'_>) -> WalletConnector {
    walletconnect_backed("bybit", "Bybit Wallet")
}

pub fn okx_wallet(_options: &WalletOptions<'_>) -> WalletConnector {
    walletconnect_backed("okx", "OKX Wallet")
}

pub fn uniswap_wallet(_options: &WalletOptions<'_>) -> WalletConnector {
    walletconnect_backed("uniswap", "Uniswap Wallet")
}

fn walletconnect_backed(id: &'static str, display_name: &'static str) -> WalletConnector {
    WalletConnector {
        id,
        display_name,
        requires_credential: true,
        app_name: None,
    }
}
