//! Two-pool parking lot for a single level.
//!
//! | Pool    | Slot ids        | Routed vehicles         |
//! |---------|-----------------|-------------------------|
//! | Regular | `1`, `2`, ...   | combustion vehicles     |
//! | Ev      | `EV-1`, `EV-2`  | vehicles with a charge  |
//!
//! Allocation is first-fit: the lowest free index of the selected pool wins.
//! Full pools and invalid slots are reported through `None` / `false`, never
//! through errors.

use crate::shared::LotConfig;
use crate::vehicle::Vehicle;
use serde::{Serialize, Serializer};
use std::fmt;

/// Which slot array of a lot an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pool {
    Regular,
    Ev,
}

impl Pool {
    /// Pool a vehicle belongs in, by capability.
    #[inline]
    pub fn for_vehicle(vehicle: &Vehicle) -> Self {
        if vehicle.charge_level().is_some() {
            Self::Ev
        } else {
            Self::Regular
        }
    }
}

/// Caller-facing 1-based slot identifier.
///
/// Regular and EV slots share numbers but never compare equal: `Regular(1)`
/// is slot `1`, `Ev(1)` is slot `EV-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    Regular(usize),
    Ev(usize),
}

impl SlotId {
    fn from_index(pool: Pool, index: usize) -> Self {
        match pool {
            Pool::Regular => Self::Regular(index + 1),
            Pool::Ev => Self::Ev(index + 1),
        }
    }

    /// Pool this slot belongs to.
    #[inline]
    pub fn pool(&self) -> Pool {
        match self {
            Self::Regular(_) => Pool::Regular,
            Self::Ev(_) => Pool::Ev,
        }
    }

    /// 1-based position within its pool.
    #[inline]
    pub fn number(&self) -> usize {
        match *self {
            Self::Regular(n) | Self::Ev(n) => n,
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regular(n) => write!(f, "{}", n),
            Self::Ev(n) => write!(f, "EV-{}", n),
        }
    }
}

/// Regular slots serialize as integers, EV slots as `"EV-n"` strings.
impl Serialize for SlotId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Regular(n) => serializer.serialize_u64(*n as u64),
            Self::Ev(_) => serializer.collect_str(self),
        }
    }
}

/// One row of [`ParkingLot::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OccupiedSlot<'a> {
    pub slot: SlotId,
    pub level: u32,
    pub vehicle: &'a Vehicle,
}

/// Slot storage for one level: a regular pool and an EV pool of fixed size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingLot {
    slots: Vec<Option<Vehicle>>,
    ev_slots: Vec<Option<Vehicle>>,
    level: u32,
}

impl ParkingLot {
    /// Creates a lot with empty pools of the given sizes.
    pub fn new(capacity: usize, ev_capacity: usize, level: u32) -> Self {
        Self {
            slots: vec![None; capacity],
            ev_slots: vec![None; ev_capacity],
            level,
        }
    }

    /// Creates an empty lot sized by `config`.
    pub fn from_config(config: &LotConfig) -> Self {
        Self::new(config.capacity, config.ev_capacity, config.level)
    }

    /// Number of regular slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of EV slots.
    #[inline]
    pub fn ev_capacity(&self) -> usize {
        self.ev_slots.len()
    }

    /// Level tag this lot currently represents.
    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    fn pool(&self, pool: Pool) -> &[Option<Vehicle>] {
        match pool {
            Pool::Regular => &self.slots,
            Pool::Ev => &self.ev_slots,
        }
    }

    fn pool_mut(&mut self, pool: Pool) -> &mut [Option<Vehicle>] {
        match pool {
            Pool::Regular => &mut self.slots,
            Pool::Ev => &mut self.ev_slots,
        }
    }

    /// Occupied slots of both pools in scan order: regular ascending, then EV ascending.
    fn occupied(&self) -> impl Iterator<Item = (SlotId, &Vehicle)> + '_ {
        [Pool::Regular, Pool::Ev].into_iter().flat_map(move |pool| {
            self.pool(pool)
                .iter()
                .enumerate()
                .filter_map(move |(i, v)| v.as_ref().map(|v| (SlotId::from_index(pool, i), v)))
        })
    }

    /// Number of empty slots in `pool`.
    pub fn free_slots(&self, pool: Pool) -> usize {
        self.pool(pool).iter().filter(|s| s.is_none()).count()
    }

    /// Index of the first empty slot in `pool`, or `None` when the pool is full.
    pub fn find_free_slot(&self, pool: Pool) -> Option<usize> {
        self.pool(pool).iter().position(Option::is_none)
    }

    /// Parks `vehicle` in the first free slot of `pool`.
    ///
    /// A `level_override` replaces the lot's level before allocation is
    /// attempted and stays in place even when the pool turns out to be full.
    pub fn park(&mut self, vehicle: Vehicle, pool: Pool, level_override: Option<u32>) -> Option<SlotId> {
        if let Some(level) = level_override {
            self.level = level;
        }

        let Some(index) = self.find_free_slot(pool) else {
            tracing::debug!(?pool, registration = %vehicle.registration, "pool full, vehicle not parked");
            return None;
        };
        let slot = SlotId::from_index(pool, index);
        tracing::debug!(%slot, level = self.level, registration = %vehicle.registration, "vehicle parked");
        self.pool_mut(pool)[index] = Some(vehicle);
        Some(slot)
    }

    /// Frees the 1-based `slot` of `pool`. Returns false if the slot is out of range or already empty.
    pub fn leave(&mut self, slot: usize, pool: Pool) -> bool {
        let Some(index) = slot.checked_sub(1) else {
            return false;
        };
        let Some(cell) = self.pool_mut(pool).get_mut(index) else {
            return false;
        };
        let Some(left) = cell.take() else {
            return false;
        };
        tracing::debug!(
            slot = %SlotId::from_index(pool, index),
            registration = %left.registration,
            "vehicle left"
        );
        true
    }

    /// All occupied slots with the current level, regular pool first.
    pub fn status(&self) -> Vec<OccupiedSlot<'_>> {
        self.occupied()
            .map(|(slot, vehicle)| OccupiedSlot {
                slot,
                level: self.level,
                vehicle,
            })
            .collect()
    }

    /// Slots holding a vehicle of `color` (case-insensitive).
    pub fn slots_by_color(&self, color: &str) -> Vec<SlotId> {
        let color = color.to_lowercase();
        self.occupied()
            .filter(|(_, v)| v.color.to_lowercase() == color)
            .map(|(slot, _)| slot)
            .collect()
    }

    /// First slot holding `registration` (exact match), regular pool first.
    pub fn slot_by_registration(&self, registration: &str) -> Option<SlotId> {
        self.occupied()
            .find(|(_, v)| v.registration == registration)
            .map(|(slot, _)| slot)
    }

    /// Registrations of every vehicle of `color` (case-insensitive), duplicates included.
    pub fn registrations_by_color(&self, color: &str) -> Vec<&str> {
        let color = color.to_lowercase();
        self.occupied()
            .filter(|(_, v)| v.color.to_lowercase() == color)
            .map(|(_, v)| v.registration.as_str())
            .collect()
    }

    /// Replaces both pools with empty ones of the given sizes and sets `level`.
    /// Parked vehicles are discarded.
    pub fn recreate(&mut self, capacity: usize, ev_capacity: usize, level: u32) {
        let discarded = self.slots.iter().chain(&self.ev_slots).filter(|s| s.is_some()).count();
        *self = Self::new(capacity, ev_capacity, level);
        tracing::info!(capacity, ev_capacity, level, discarded, "parking lot created");
    }
}
