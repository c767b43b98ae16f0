//! In-process EV charging sessions.
//!
//! [`ChargingSessions`] keeps one session per registration and implements
//! [`ChargingCollaborator`], so a [`parking_core::ParkingPresenter`] can use it
//! directly.

mod sessions;

pub use sessions::{ChargingSessions, NOT_FOUND};
