//! Lease agreements
//!
//! The Lease binds a tenant to a unit for a monthly rent. It is the
//! consistency boundary for tenancy administration and the anchor every
//! ledger operation is scoped to.
//!
//! # Invariants
//!
//! - Monthly rent is strictly positive
//! - Term dates are ordered when an end date exists
//! - Status transitions follow Draft → Active → Terminated/Expired

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{LeaseId, Money, PartyId, UnitId};
use crate::error::LeaseError;

/// Lease lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseStatus {
    /// Drafted but not yet signed
    Draft,
    /// Signed and in force
    Active,
    /// Ended early by either party
    Terminated,
    /// Ran to its natural end date
    Expired,
}

/// A lease agreement between a landlord and a tenant over one unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lease {
    /// Unique identifier
    pub id: LeaseId,
    /// Unit being let
    pub unit_id: UnitId,
    /// Landlord party; every ledger operation is scoped to this identity
    pub landlord_id: PartyId,
    /// Tenant party
    pub tenant_id: PartyId,
    /// Rent per month
    pub monthly_rent: Money,
    /// Security deposit held
    pub deposit: Money,
    /// Day the term begins
    pub start_date: NaiveDate,
    /// Day the term ends, None for periodic tenancies
    pub end_date: Option<NaiveDate>,
    /// Lifecycle status
    pub status: LeaseStatus,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Lease {
    /// Drafts a new lease
    ///
    /// # Errors
    ///
    /// Rejects non-positive rent, negative deposits, and an end date on or
    /// before the start date.
    pub fn draft(
        unit_id: UnitId,
        landlord_id: PartyId,
        tenant_id: PartyId,
        monthly_rent: Money,
        deposit: Money,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, LeaseError> {
        if !monthly_rent.is_positive() {
            return Err(LeaseError::validation("Monthly rent must be positive"));
        }
        if deposit.is_negative() {
            return Err(LeaseError::validation("Deposit cannot be negative"));
        }
        if let Some(end) = end_date {
            if end <= start_date {
                return Err(LeaseError::validation(
                    "Lease end date must be after the start date",
                ));
            }
        }

        let now = Utc::now();
        Ok(Self {
            id: LeaseId::new_v7(),
            unit_id,
            landlord_id,
            tenant_id,
            monthly_rent,
            deposit,
            start_date,
            end_date,
            status: LeaseStatus::Draft,
            created_at: now,
            updated_at: now,
        })
    }

    /// Activates a drafted lease
    pub fn activate(&mut self) -> Result<(), LeaseError> {
        match self.status {
            LeaseStatus::Draft => {
                self.status = LeaseStatus::Active;
                self.updated_at = Utc::now();
                info!(lease = %self.id, "lease activated");
                Ok(())
            }
            other => Err(LeaseError::InvalidTransition(format!(
                "cannot activate lease in {:?} status",
                other
            ))),
        }
    }

    /// Terminates an active lease early
    pub fn terminate(&mut self) -> Result<(), LeaseError> {
        match self.status {
            LeaseStatus::Active => {
                self.status = LeaseStatus::Terminated;
                self.updated_at = Utc::now();
                info!(lease = %self.id, "lease terminated");
                Ok(())
            }
            other => Err(LeaseError::InvalidTransition(format!(
                "cannot terminate lease in {:?} status",
                other
            ))),
        }
    }

    /// Expires an active lease that reached its end date
    pub fn expire(&mut self) -> Result<(), LeaseError> {
        match self.status {
            LeaseStatus::Active => {
                self.status = LeaseStatus::Expired;
                self.updated_at = Utc::now();
                Ok(())
            }
            other => Err(LeaseError::InvalidTransition(format!(
                "cannot expire lease in {:?} status",
                other
            ))),
        }
    }

    /// Returns true while the lease is in force
    pub fn is_active(&self) -> bool {
        self.status == LeaseStatus::Active
    }

    /// Returns true if the given landlord owns this lease
    pub fn belongs_to(&self, landlord_id: PartyId) -> bool {
        self.landlord_id == landlord_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn kes(amount: i64) -> Money {
        Money::new(amount.into(), Currency::KES)
    }

    fn draft_lease() -> Lease {
        Lease::draft(
            UnitId::new(),
            PartyId::new(),
            PartyId::new(),
            kes(15000),
            kes(30000),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            Some(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn test_draft_lease() {
        let lease = draft_lease();

        assert_eq!(lease.status, LeaseStatus::Draft);
        assert!(!lease.is_active());
    }

    #[test]
    fn test_zero_rent_rejected() {
        let result = Lease::draft(
            UnitId::new(),
            PartyId::new(),
            PartyId::new(),
            kes(0),
            kes(0),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            None,
        );

        assert!(matches!(result, Err(LeaseError::Validation(_))));
    }

    #[test]
    fn test_inverted_term_rejected() {
        let result = Lease::draft(
            UnitId::new(),
            PartyId::new(),
            PartyId::new(),
            kes(15000),
            kes(0),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
        );

        assert!(matches!(result, Err(LeaseError::Validation(_))));
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut lease = draft_lease();

        lease.activate().unwrap();
        assert!(lease.is_active());

        lease.terminate().unwrap();
        assert_eq!(lease.status, LeaseStatus::Terminated);

        // Terminal state: nothing further is allowed.
        assert!(matches!(
            lease.activate(),
            Err(LeaseError::InvalidTransition(_))
        ));
    }

    #[test]
    fn test_landlord_scoping() {
        let landlord = PartyId::new();
        let lease = Lease::draft(
            UnitId::new(),
            landlord,
            PartyId::new(),
            kes(15000),
            kes(0),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            None,
        )
        .unwrap();

        assert!(lease.belongs_to(landlord));
        assert!(!lease.belongs_to(PartyId::new()));
    }

    #[test]
    fn test_negative_deposit_rejected() {
        let result = Lease::draft(
            UnitId::new(),
            PartyId::new(),
            PartyId::new(),
            kes(15000),
            Money::new(dec!(-1), Currency::KES),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            None,
        );

        assert!(matches!(result, Err(LeaseError::Validation(_))));
    }
}
