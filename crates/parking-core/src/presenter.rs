//! Presenter: turns flat caller requests into lot operations and charging calls.

use crate::charging::{ChargeStatus, ChargingCollaborator, ChargingError};
use crate::lot::{OccupiedSlot, ParkingLot, Pool, SlotId};
use crate::shared::LotConfig;
use crate::vehicle::{VehicleCategory, VehicleFactory};
use serde::Serialize;
use std::sync::Arc;

/// Message carried by a failed [`ParkResult`].
pub const PARKING_FULL: &str = "Parking is full";

/// Outcome of [`ParkingPresenter::park_vehicle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParkResult {
    pub success: bool,
    pub slot: Option<SlotId>,
    pub message: String,
}

impl ParkResult {
    fn parked(slot: SlotId) -> Self {
        Self {
            success: true,
            slot: Some(slot),
            message: String::new(),
        }
    }

    fn full() -> Self {
        Self {
            success: false,
            slot: None,
            message: PARKING_FULL.to_string(),
        }
    }
}

/// Mediates between callers, the lot, and the charging collaborator.
pub struct ParkingPresenter {
    lot: ParkingLot,
    charging: Arc<dyn ChargingCollaborator>,
}

impl ParkingPresenter {
    /// Wraps an existing lot and a charging collaborator.
    pub fn new(lot: ParkingLot, charging: Arc<dyn ChargingCollaborator>) -> Self {
        Self { lot, charging }
    }

    /// Builds the presenter over a fresh lot sized by `config`.
    pub fn from_config(config: &LotConfig, charging: Arc<dyn ChargingCollaborator>) -> Self {
        Self::new(ParkingLot::from_config(config), charging)
    }

    /// Read access to the underlying lot.
    pub fn lot(&self) -> &ParkingLot {
        &self.lot
    }

    /// Resets the lot to empty pools of the given sizes.
    pub fn create_lot(&mut self, capacity: usize, ev_capacity: usize, level: u32) {
        self.lot.recreate(capacity, ev_capacity, level);
    }

    /// Builds a vehicle with `factory` and parks it. The pool follows the built
    /// vehicle's capability: anything with a charge level goes to the EV pool.
    #[allow(clippy::too_many_arguments)]
    pub fn park_vehicle(
        &mut self,
        factory: VehicleFactory,
        category: VehicleCategory,
        registration: &str,
        make: &str,
        model: &str,
        color: &str,
        level_override: Option<u32>,
    ) -> ParkResult {
        let vehicle = factory.create(category, registration, make, model, color);
        let pool = Pool::for_vehicle(&vehicle);
        match self.lot.park(vehicle, pool, level_override) {
            Some(slot) => ParkResult::parked(slot),
            None => ParkResult::full(),
        }
    }

    /// Frees a regular slot. EV slots need [`Self::remove_vehicle_from`].
    pub fn remove_vehicle(&mut self, slot: usize) -> bool {
        self.lot.leave(slot, Pool::Regular)
    }

    /// Frees a slot of an explicit pool; the only way to release an EV slot.
    pub fn remove_vehicle_from(&mut self, slot: usize, pool: Pool) -> bool {
        self.lot.leave(slot, pool)
    }

    /// Occupied slots, regular pool first. See [`ParkingLot::status`].
    pub fn status(&self) -> Vec<OccupiedSlot<'_>> {
        self.lot.status()
    }

    /// Slots holding a vehicle of `color`, case-insensitive.
    pub fn slots_by_color(&self, color: &str) -> Vec<SlotId> {
        self.lot.slots_by_color(color)
    }

    /// First slot holding `registration`, exact match.
    pub fn slot_by_registration(&self, registration: &str) -> Option<SlotId> {
        self.lot.slot_by_registration(registration)
    }

    /// Registrations of all vehicles of `color`, case-insensitive.
    pub fn registrations_by_color(&self, color: &str) -> Vec<&str> {
        self.lot.registrations_by_color(color)
    }

    /// Starts charging and reports the collaborator's error, if any.
    pub async fn try_start_charging(&self, registration: &str) -> Result<(), ChargingError> {
        self.charging.start_charging(registration).await
    }

    /// Stops charging and reports the collaborator's error, if any.
    pub async fn try_stop_charging(&self, registration: &str) -> Result<(), ChargingError> {
        self.charging.stop_charging(registration).await
    }

    /// Session for `registration`, or the collaborator's error.
    pub async fn try_charge_status(&self, registration: &str) -> Result<Option<ChargeStatus>, ChargingError> {
        self.charging.status(registration).await
    }

    /// Starts charging; false when the collaborator fails.
    pub async fn start_charging(&self, registration: &str) -> bool {
        match self.try_start_charging(registration).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(registration, "start charging failed: {}", e);
                false
            }
        }
    }

    /// Stops charging; false when the collaborator fails.
    pub async fn stop_charging(&self, registration: &str) -> bool {
        match self.try_stop_charging(registration).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(registration, "stop charging failed: {}", e);
                false
            }
        }
    }

    /// Session for `registration`; `None` if unknown or the collaborator fails.
    pub async fn get_charge_status(&self, registration: &str) -> Option<ChargeStatus> {
        self.try_charge_status(registration).await.unwrap_or_else(|e| {
            tracing::warn!(registration, "charge status unavailable: {}", e);
            None
        })
    }
}
