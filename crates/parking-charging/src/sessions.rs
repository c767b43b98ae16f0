//! DashMap-backed session store keyed by registration.

use dashmap::DashMap;
use parking_core::{ChargeStatus, ChargingCollaborator, ChargingError, SessionState};

/// Reported when a status lookup finds no session.
pub const NOT_FOUND: &str = "Vehicle not found";

/// Charging sessions, one per registration. Safe to share behind an `Arc`.
#[derive(Debug, Default)]
pub struct ChargingSessions {
    sessions: DashMap<String, ChargeStatus>,
}

impl ChargingSessions {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session, replacing any previous one with a fresh `charging` record at 0%.
    pub fn start(&self, registration: &str) -> String {
        self.sessions
            .insert(registration.to_string(), ChargeStatus::started());
        tracing::debug!(registration, "charging session started");
        format!("Charging started for {}", registration)
    }

    /// Marks the session as stopped. Unknown registrations are accepted and left untouched.
    pub fn stop(&self, registration: &str) -> String {
        match self.sessions.get_mut(registration) {
            Some(mut session) => {
                session.status = SessionState::Stopped;
                tracing::debug!(registration, charge = session.charge, "charging session stopped");
            }
            None => tracing::debug!(registration, "stop requested without a session"),
        }
        format!("Charging stopped for {}", registration)
    }

    /// Session record for `registration`, if one exists.
    pub fn status(&self, registration: &str) -> Option<ChargeStatus> {
        let status = self.sessions.get(registration).map(|s| *s);
        if status.is_none() {
            tracing::debug!(registration, "{}", NOT_FOUND);
        }
        status
    }

    /// Records delivered charge (capped at 100). Returns false when there is no session.
    pub fn set_charge(&self, registration: &str, charge: u32) -> bool {
        match self.sessions.get_mut(registration) {
            Some(mut session) => {
                session.charge = charge.min(100);
                true
            }
            None => false,
        }
    }

    /// Number of known sessions, stopped ones included.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True when no session was ever started.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait::async_trait]
impl ChargingCollaborator for ChargingSessions {
    async fn start_charging(&self, registration: &str) -> Result<(), ChargingError> {
        self.start(registration);
        Ok(())
    }

    async fn stop_charging(&self, registration: &str) -> Result<(), ChargingError> {
        self.stop(registration);
        Ok(())
    }

    async fn status(&self, registration: &str) -> Result<Option<ChargeStatus>, ChargingError> {
        Ok(ChargingSessions::status(self, registration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_creates_fresh_session() {
        let sessions = ChargingSessions::new();
        assert_eq!(sessions.start("EV001"), "Charging started for EV001");
        assert_eq!(sessions.status("EV001"), Some(ChargeStatus::started()));
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn test_restart_resets_charge_and_state() {
        let sessions = ChargingSessions::new();
        sessions.start("EV001");
        assert!(sessions.set_charge("EV001", 60));
        sessions.stop("EV001");
        sessions.start("EV001");
        assert_eq!(sessions.status("EV001"), Some(ChargeStatus::started()));
    }

    #[test]
    fn test_stop_marks_stopped_and_keeps_charge() {
        let sessions = ChargingSessions::new();
        sessions.start("EV001");
        sessions.set_charge("EV001", 250);
        assert_eq!(sessions.stop("EV001"), "Charging stopped for EV001");
        assert_eq!(
            sessions.status("EV001"),
            Some(ChargeStatus {
                status: SessionState::Stopped,
                charge: 100,
            })
        );
    }

    #[test]
    fn test_unknown_registration() {
        let sessions = ChargingSessions::new();
        assert_eq!(sessions.stop("GHOST"), "Charging stopped for GHOST");
        assert_eq!(sessions.status("GHOST"), None);
        assert!(!sessions.set_charge("GHOST", 10));
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn test_collaborator_never_fails() {
        let sessions = ChargingSessions::new();
        let collaborator: &dyn ChargingCollaborator = &sessions;
        assert_eq!(collaborator.status("EV001").await, Ok(None));
        assert_eq!(collaborator.start_charging("EV001").await, Ok(()));
        assert_eq!(collaborator.stop_charging("EV001").await, Ok(()));
        assert_eq!(
            collaborator.status("EV001").await.unwrap().map(|s| s.status),
            Some(SessionState::Stopped)
        );
    }
}
