use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use wb_api_types::{AppMetadata, Credential};
use wb_config::BootstrapConfig;

use crate::error::{InitStep, SessionError};
use crate::gate::{MountGate, ReadinessGate, flip};
use crate::sdk::{WalletSdk, WalletSession};

pub enum SessionState<H> {
    Idle,
    Initializing,
    Ready(Rc<H>),
    Failed(SessionError),
}

impl<H> SessionState<H> {
    pub fn status(&self) -> SessionStatus {
        match self {
            SessionState::Idle => SessionStatus::Idle,
            SessionState::Initializing => SessionStatus::Initializing,
            SessionState::Ready(_) => SessionStatus::Ready,
            SessionState::Failed(_) => SessionStatus::Failed,
        }
    }

    pub fn error(&self) -> Option<&SessionError> {
        match self {
            SessionState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl<H> Clone for SessionState<H> {
    fn clone(&self) -> Self {
        match self {
            SessionState::Idle => SessionState::Idle,
            SessionState::Initializing => SessionState::Initializing,
            SessionState::Ready(handle) => SessionState::Ready(Rc::clone(handle)),
            SessionState::Failed(err) => SessionState::Failed(err.clone()),
        }
    }
}

impl<H> fmt::Debug for SessionState<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => f.write_str("Idle"),
            SessionState::Initializing => f.write_str("Initializing"),
            SessionState::Ready(_) => f.write_str("Ready(..)"),
            SessionState::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Initializing,
    Ready,
    Failed,
}

impl SessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Initializing => "initializing",
            SessionStatus::Ready => "ready",
            SessionStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account-level notifications from the wallet layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountEvent {
    Connected { address: String },
    Disconnected,
}

pub struct SessionInitializer<S: WalletSdk> {
    sdk: S,
    credential: Credential,
    metadata: AppMetadata,
    state: RefCell<SessionState<WalletSession<S>>>,
    ready: watch::Sender<bool>,
}

/// Marks an abandoned in-flight initialization as cancelled.
struct InFlight<'a, H> {
    state: &'a RefCell<SessionState<H>>,
    finished: bool,
}

impl<H> Drop for InFlight<'_, H> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Ok(mut state) = self.state.try_borrow_mut() {
            if matches!(*state, SessionState::Initializing) {
                warn!("wallet session initialization dropped while in flight");
                *state = SessionState::Failed(SessionError::Cancelled);
            }
        }
    }
}

impl<S: WalletSdk> SessionInitializer<S> {
    pub fn new(sdk: S, credential: Credential, metadata: AppMetadata) -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            sdk,
            credential,
            metadata,
            state: RefCell::new(SessionState::Idle),
            ready,
        }
    }

    pub fn from_config(sdk: S, config: &BootstrapConfig) -> Self {
        Self::new(sdk, config.credential.clone(), config.metadata.clone())
    }

    pub fn state(&self) -> SessionState<WalletSession<S>> {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.state.borrow().status()
    }

    pub fn handle(&self) -> Option<Rc<WalletSession<S>>> {
        match &*self.state.borrow() {
            SessionState::Ready(handle) => Some(Rc::clone(handle)),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    pub fn readiness(&self) -> ReadinessGate {
        ReadinessGate::new(self.ready.subscribe())
    }

    /// Waits for the gate, then initializes.
    pub async fn run(&self, gate: &MountGate) -> SessionStatus {
        gate.wait().await;
        self.initialize().await
    }

    /// Mount-ready signal. Does nothing while the gate is closed or once
    /// initialization has started.
    pub async fn on_mount_ready(&self, gate: &MountGate) -> SessionStatus {
        if !gate.is_open() {
            debug!("mount gate still closed, session not started");
            return self.status();
        }
        self.initialize().await
    }

    /// Explicit re-initialization. Only leaves `Failed`; any other state is
    /// returned unchanged.
    pub async fn retry(&self) -> SessionStatus {
        {
            let mut state = self.state.borrow_mut();
            if !matches!(*state, SessionState::Failed(_)) {
                debug!(status = %state.status(), "retry ignored");
                return state.status();
            }
            info!("retrying wallet session initialization");
            *state = SessionState::Idle;
        }
        self.initialize().await
    }

    /// Logs account changes. One session lives for the whole page, so
    /// neither a connect nor a disconnect re-runs initialization.
    pub fn on_account_event(&self, event: &AccountEvent) {
        match event {
            AccountEvent::Connected { address } => {
                info!(%address, status = %self.status(), "account connected")
            }
            AccountEvent::Disconnected => info!(status = %self.status(), "account disconnected"),
        }
    }

    async fn initialize(&self) -> SessionStatus {
        {
            let mut state = self.state.borrow_mut();
            if !matches!(*state, SessionState::Idle) {
                debug!(status = %state.status(), "wallet session already started");
                return state.status();
            }
            *state = SessionState::Initializing;
        }
        info!("initializing wallet session");

        let mut in_flight = InFlight {
            state: &self.state,
            finished: false,
        };
        let outcome = self.establish().await;
        in_flight.finished = true;

        let mut state = self.state.borrow_mut();
        match outcome {
            Ok(session) => {
                *state = SessionState::Ready(Rc::new(session));
                self.ready.send_if_modified(flip);
                info!("wallet session ready");
            }
            Err(err) => {
                error!("wallet session initialization failed: {err}");
                *state = SessionState::Failed(err);
            }
        }
        state.status()
    }

    async fn establish(&self) -> Result<WalletSession<S>, SessionError> {
        if self.credential.is_blank() {
            return Err(SessionError::MisconfiguredCredential);
        }

        let sign_client = self
            .sdk
            .init_sign_client(&self.credential)
            .await
            .map_err(|err| SessionError::failure(InitStep::SignalingClient, err))?;
        debug!("signaling client established");

        let core = self
            .sdk
            .create_core(&self.credential)
            .map_err(|err| SessionError::failure(InitStep::WalletCore, err))?;

        let wallet = self
            .sdk
            .init_wallet(core, &self.metadata)
            .await
            .map_err(|err| SessionError::failure(InitStep::WalletHandle, err))?;

        Ok(WalletSession {
            sign_client,
            wallet,
        })
    }
}
