//! Vehicle values and the factory that builds them.
//!
//! A vehicle is a category tag (`Car`, `Motorcycle`, `Bus`) plus an optional
//! electric capability. The capability is what routes a vehicle to the EV pool.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Display labels indexed by category.
const CATEGORY_LABELS: [&str; 3] = ["Car", "Motorcycle", "Bus"];

/// Vehicle category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleCategory {
    Car = 0,
    Motorcycle = 1,
    Bus = 2,
}

impl VehicleCategory {
    /// Human-readable label for this category.
    #[inline]
    pub fn label(&self) -> &'static str {
        CATEGORY_LABELS[*self as usize]
    }

    /// Returns all categories in listing order.
    pub fn all() -> [Self; 3] {
        [Self::Car, Self::Motorcycle, Self::Bus]
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string names no [`VehicleCategory`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vehicle category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for VehicleCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::all()
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseCategoryError(trimmed.to_string()))
    }
}

/// Battery charge of an electric vehicle, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChargeLevel(pub u8);

/// A parked (or about to be parked) vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub registration: String,
    pub make: String,
    pub model: String,
    pub color: String,
    pub category: VehicleCategory,
    /// Present only on electric vehicles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    charge: Option<ChargeLevel>,
}

impl Vehicle {
    /// Builds a combustion vehicle.
    pub fn new(
        category: VehicleCategory,
        registration: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            registration: registration.into(),
            make: make.into(),
            model: model.into(),
            color: color.into(),
            category,
            charge: None,
        }
    }

    /// Builds an electric vehicle with an empty battery.
    pub fn electric(
        category: VehicleCategory,
        registration: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            charge: Some(ChargeLevel::default()),
            ..Self::new(category, registration, make, model, color)
        }
    }

    /// Category label ("Car", "Motorcycle", "Bus"). Electric variants keep their base label.
    #[inline]
    pub fn type_label(&self) -> &'static str {
        self.category.label()
    }

    /// Concrete variant name, e.g. `ElectricBike` for an electric motorcycle.
    pub fn variant_name(&self) -> &'static str {
        match (self.category, self.is_electric()) {
            (VehicleCategory::Motorcycle, true) => "ElectricBike",
            (_, true) => "ElectricCar",
            (category, false) => category.label(),
        }
    }

    /// Charge level; `None` for vehicles without the electric capability.
    #[inline]
    pub fn charge_level(&self) -> Option<ChargeLevel> {
        self.charge
    }

    /// Whether the vehicle carries the electric capability.
    #[inline]
    pub fn is_electric(&self) -> bool {
        self.charge.is_some()
    }

    /// Updates the charge level. Returns false (and does nothing) on a combustion vehicle.
    pub fn set_charge_level(&mut self, level: ChargeLevel) -> bool {
        match self.charge.as_mut() {
            Some(charge) => {
                *charge = ChargeLevel(level.0.min(100));
                true
            }
            None => false,
        }
    }
}

/// Selects which capability a built vehicle carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleFactory {
    #[default]
    Regular,
    Electric,
}

impl VehicleFactory {
    /// Picks the factory matching an "is electric" toggle, such as the
    /// electric-vehicle checkbox of a parking form.
    pub fn for_electric(electric: bool) -> Self {
        if electric {
            Self::Electric
        } else {
            Self::Regular
        }
    }

    /// Builds a vehicle of `category` with this factory's capability.
    pub fn create(
        &self,
        category: VehicleCategory,
        registration: &str,
        make: &str,
        model: &str,
        color: &str,
    ) -> Vehicle {
        build_vehicle(
            category,
            matches!(self, Self::Electric),
            registration,
            make,
            model,
            color,
        )
    }
}

/// Builds a vehicle of `category`, electric when asked.
///
/// There is no electric bus: an electric request for any category other than
/// `Motorcycle` yields an electric car.
pub fn build_vehicle(
    category: VehicleCategory,
    electric: bool,
    registration: &str,
    make: &str,
    model: &str,
    color: &str,
) -> Vehicle {
    if !electric {
        return Vehicle::new(category, registration, make, model, color);
    }
    let category = match category {
        VehicleCategory::Motorcycle => VehicleCategory::Motorcycle,
        _ => VehicleCategory::Car,
    };
    Vehicle::electric(category, registration, make, model, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("car".parse::<VehicleCategory>(), Ok(VehicleCategory::Car));
        assert_eq!(" Motorcycle ".parse::<VehicleCategory>(), Ok(VehicleCategory::Motorcycle));
        assert_eq!("BUS".parse::<VehicleCategory>(), Ok(VehicleCategory::Bus));
        assert_eq!(
            "Tractor".parse::<VehicleCategory>(),
            Err(ParseCategoryError("Tractor".to_string()))
        );
    }

    #[test]
    fn test_regular_factory_keeps_category_without_charge() {
        for category in VehicleCategory::all() {
            let v = VehicleFactory::Regular.create(category, "R1", "Make", "Model", "Blue");
            assert_eq!(v.category, category);
            assert_eq!(v.charge_level(), None);
            assert_eq!(v.type_label(), category.label());
            assert_eq!(v.variant_name(), category.label());
        }
    }

    #[test]
    fn test_electric_factory_variants() {
        let car = VehicleFactory::Electric.create(VehicleCategory::Car, "E1", "Tesla", "Model3", "Red");
        assert_eq!(car.variant_name(), "ElectricCar");
        assert_eq!(car.type_label(), "Car");
        assert_eq!(car.charge_level(), Some(ChargeLevel(0)));

        let bike = VehicleFactory::Electric.create(VehicleCategory::Motorcycle, "E2", "Zero", "SR", "Black");
        assert_eq!(bike.variant_name(), "ElectricBike");
        assert_eq!(bike.type_label(), "Motorcycle");

        // No electric bus exists; the factory falls back to a car.
        let bus = VehicleFactory::Electric.create(VehicleCategory::Bus, "E3", "BYD", "K9", "White");
        assert_eq!(bus.category, VehicleCategory::Car);
        assert_eq!(bus.variant_name(), "ElectricCar");
        assert!(bus.is_electric());
    }

    #[test]
    fn test_set_charge_level_only_on_electric() {
        let mut ev = Vehicle::electric(VehicleCategory::Car, "E1", "Tesla", "Model3", "Red");
        assert!(ev.set_charge_level(ChargeLevel(80)));
        assert_eq!(ev.charge_level(), Some(ChargeLevel(80)));
        assert!(ev.set_charge_level(ChargeLevel(250)));
        assert_eq!(ev.charge_level(), Some(ChargeLevel(100)));

        let mut car = Vehicle::new(VehicleCategory::Car, "C1", "Toyota", "Corolla", "Blue");
        assert!(!car.set_charge_level(ChargeLevel(50)));
        assert_eq!(car.charge_level(), None);
    }

    #[test]
    fn test_for_electric_toggle() {
        assert_eq!(VehicleFactory::for_electric(true), VehicleFactory::Electric);
        assert_eq!(VehicleFactory::for_electric(false), VehicleFactory::Regular);
    }
}
