//! Tenant units
//!
//! A unit is one lettable space inside a property (a flat, a room, a shop
//! front). Units carry the asking rent; the binding rent lives on the lease.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Money, PropertyId, UnitId};

/// A lettable unit within a property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantUnit {
    /// Unique identifier
    pub id: UnitId,
    /// Property this unit belongs to
    pub property_id: PropertyId,
    /// Short label shown to landlords ("A4", "Shop 2")
    pub label: String,
    /// Asking rent per month
    pub asking_rent: Money,
    /// Number of bedrooms, if residential
    pub bedrooms: Option<u8>,
    /// Whether the unit is currently occupied
    pub is_occupied: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl TenantUnit {
    /// Creates a vacant unit
    pub fn new(property_id: PropertyId, label: impl Into<String>, asking_rent: Money) -> Self {
        Self {
            id: UnitId::new_v7(),
            property_id,
            label: label.into(),
            asking_rent,
            bedrooms: None,
            is_occupied: false,
            created_at: Utc::now(),
        }
    }

    /// Sets the bedroom count
    pub fn with_bedrooms(mut self, bedrooms: u8) -> Self {
        self.bedrooms = Some(bedrooms);
        self
    }

    /// Marks the unit occupied when a lease activates
    pub fn occupy(&mut self) {
        self.is_occupied = true;
    }

    /// Marks the unit vacant when a lease ends
    pub fn vacate(&mut self) {
        self.is_occupied = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_unit_is_vacant() {
        let unit = TenantUnit::new(
            PropertyId::new(),
            "A4",
            Money::new(dec!(15000), Currency::KES),
        )
        .with_bedrooms(2);

        assert!(!unit.is_occupied);
        assert_eq!(unit.label, "A4");
        assert_eq!(unit.bedrooms, Some(2));
    }

    #[test]
    fn test_occupy_and_vacate() {
        let mut unit = TenantUnit::new(
            PropertyId::new(),
            "B1",
            Money::new(dec!(20000), Currency::KES),
        );

        unit.occupy();
        assert!(unit.is_occupied);

        unit.vacate();
        assert!(!unit.is_occupied);
    }
}
