//! parking-core: vehicles, two-pool slot allocation, the presenter, and the charging seam.
//!
//! A [`ParkingLot`] holds one level with a regular pool and an EV pool. The
//! [`ParkingPresenter`] builds vehicles through a [`VehicleFactory`], routes
//! them by capability, and proxies charging requests to a
//! [`ChargingCollaborator`].

mod charging;
mod lot;
mod presenter;
mod shared;
mod vehicle;

pub use shared::LotConfig;

pub use vehicle::{
    build_vehicle, ChargeLevel, ParseCategoryError, Vehicle, VehicleCategory, VehicleFactory,
};

pub use lot::{OccupiedSlot, ParkingLot, Pool, SlotId};

pub use presenter::{ParkResult, ParkingPresenter, PARKING_FULL};

pub use charging::{ChargeStatus, ChargingCollaborator, ChargingError, SessionState};
