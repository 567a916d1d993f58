use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStep {
    SignalingClient,
    WalletCore,
    WalletHandle,
}

impl fmt::Display for InitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InitStep::SignalingClient => "signaling client",
            InitStep::WalletCore => "wallet core",
            InitStep::WalletHandle => "wallet handle",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("wallet session credential is empty")]
    MisconfiguredCredential,
    #[error("{step} initialization failed: {reason}")]
    ConnectionInitializationFailure { step: InitStep, reason: String },
    #[error("initialization was cancelled before it completed")]
    Cancelled,
}

impl SessionError {
    pub(crate) fn failure(step: InitStep, err: anyhow::Error) -> Self {
        Self::ConnectionInitializationFailure {
            step,
            reason: format!("{err:#}"),
        }
    }
}
