//! One-shot wallet session bootstrap.
//!
//! [`MountGate`] opens once the host environment has hydrated. The
//! [`SessionInitializer`] then runs the SDK handshake exactly once:
//! signaling client first, then wallet core and wallet handle. Success flips
//! the [`ReadinessGate`] to true; failure is terminal until [`SessionInitializer::retry`]
//! is called explicitly.

mod error;
mod gate;
mod initializer;
mod sdk;

pub use error::{InitStep, SessionError};
pub use gate::{MountGate, ReadinessGate};
pub use initializer::{AccountEvent, SessionInitializer, SessionState, SessionStatus};
pub use sdk::{WalletSdk, WalletSession};
