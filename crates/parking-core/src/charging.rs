//! Charging collaborator seam: start, stop, and query EV charging sessions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// State of a charging session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Charging,
    Stopped,
}

/// Session record reported by a charging collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeStatus {
    pub status: SessionState,
    /// Charge delivered so far, in percent.
    pub charge: u32,
}

impl ChargeStatus {
    /// A freshly started session.
    pub fn started() -> Self {
        Self {
            status: SessionState::Charging,
            charge: 0,
        }
    }
}

/// Why a charging collaborator call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChargingError {
    /// The collaborator could not be reached.
    #[error("charging service unavailable: {0}")]
    Unavailable(String),
    /// The collaborator refused the request.
    #[error("charging request rejected: {0}")]
    Rejected(String),
}

/// Trait implemented by charging session providers.
#[async_trait::async_trait]
pub trait ChargingCollaborator: Send + Sync {
    /// Starts (or restarts) a session for `registration`.
    async fn start_charging(&self, registration: &str) -> Result<(), ChargingError>;

    /// Stops the session for `registration`.
    async fn stop_charging(&self, registration: &str) -> Result<(), ChargingError>;

    /// Current session for `registration`; `Ok(None)` when none is known.
    async fn status(&self, registration: &str) -> Result<Option<ChargeStatus>, ChargingError>;
}
