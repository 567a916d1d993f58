use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use wb_api_types::{AppMetadata, Credential};

/// The external wallet-connection SDK.
///
/// The initializer only relies on construction order; what the returned
/// objects do on the wire is the SDK's business. Futures are not `Send`
/// because the SDK lives on the browser's single thread.
#[async_trait(?Send)]
pub trait WalletSdk {
    type SignClient;
    type Core;
    type Wallet;

    async fn init_sign_client(&self, credential: &Credential) -> Result<Self::SignClient>;

    fn create_core(&self, credential: &Credential) -> Result<Self::Core>;

    async fn init_wallet(&self, core: Self::Core, metadata: &AppMetadata) -> Result<Self::Wallet>;
}

/// Handle published once the session is ready.
pub struct WalletSession<S: WalletSdk> {
    pub sign_client: S::SignClient,
    pub wallet: S::Wallet,
}

impl<S: WalletSdk> fmt::Debug for WalletSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSession").finish_non_exhaustive()
    }
}
