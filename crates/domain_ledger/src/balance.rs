//! Advance rent balance
//!
//! One balance exists per lease. It is the single source of truth for how
//! much prepaid rent was collected and how much of it settlement has
//! already consumed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{LeaseId, Money};
use crate::error::LedgerError;

/// Prepaid rent state for a single lease
///
/// # Invariants
///
/// - `advance_used` never goes negative and never exceeds `advance_amount`
/// - `advance_remaining` is always derived, never stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceBalance {
    /// Lease this balance belongs to
    pub lease_id: LeaseId,
    /// Monthly rent on the lease, used for coverage math
    pub monthly_rent: Money,
    /// Day the lease term begins
    pub lease_start: NaiveDate,
    /// Months of rent purchased upfront, 0 if none
    pub advance_months: u32,
    /// Total prepaid amount collected
    pub advance_amount: Money,
    /// Cumulative amount settled against invoices
    pub advance_used: Money,
    /// When the advance was (last) collected
    pub advance_collected_date: Option<NaiveDate>,
    /// Optimistic-lock version, bumped on every persisted mutation
    pub version: i64,
}

impl AdvanceBalance {
    /// Creates the empty balance that exists from the moment a lease begins
    pub fn open(lease_id: LeaseId, monthly_rent: Money, lease_start: NaiveDate) -> Self {
        let currency = monthly_rent.currency();
        Self {
            lease_id,
            monthly_rent,
            lease_start,
            advance_months: 0,
            advance_amount: Money::zero(currency),
            advance_used: Money::zero(currency),
            advance_collected_date: None,
            version: 0,
        }
    }

    /// Returns the unspent portion of the prepaid balance
    pub fn remaining(&self) -> Money {
        self.advance_amount - self.advance_used
    }

    /// Returns true if any advance rent was ever collected
    pub fn has_advance(&self) -> bool {
        self.advance_amount.is_positive()
    }

    /// Credits a collection event onto the balance
    ///
    /// Repeat collections are additive: months and amount accumulate, the
    /// collected date moves to the latest collection, and `advance_used`
    /// is untouched.
    pub fn credit(
        &mut self,
        months: u32,
        amount: Money,
        collected: NaiveDate,
    ) -> Result<(), LedgerError> {
        self.advance_amount = self.advance_amount.checked_add(&amount)?;
        self.advance_months += months;
        self.advance_collected_date = Some(collected);
        Ok(())
    }

    /// Draws an amount down from the balance
    ///
    /// # Errors
    ///
    /// Returns `BalanceExceeded` if the draw would push `advance_used`
    /// past `advance_amount`.
    pub fn draw(&mut self, amount: Money) -> Result<(), LedgerError> {
        if amount.is_negative() {
            return Err(LedgerError::validation("Draw amount cannot be negative"));
        }

        let remaining = self.remaining();
        if amount > remaining {
            return Err(LedgerError::BalanceExceeded {
                draw: amount.to_string(),
                remaining: remaining.to_string(),
            });
        }

        self.advance_used = self.advance_used.checked_add(&amount)?;
        Ok(())
    }

    /// Checks the `0 ≤ used ≤ amount` invariant
    pub fn is_consistent(&self) -> bool {
        !self.advance_used.is_negative() && self.advance_used <= self.advance_amount
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

    fn balance() -> AdvanceBalance {
        AdvanceBalance::open(
            LeaseId::new(),
            kes(15000),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_open_balance_is_empty() {
        let b = balance();

        assert_eq!(b.advance_months, 0);
        assert!(b.advance_amount.is_zero());
        assert!(b.advance_used.is_zero());
        assert!(b.advance_collected_date.is_none());
        assert!(!b.has_advance());
        assert!(b.is_consistent());
    }

    #[test]
    fn test_credit_is_additive() {
        let mut b = balance();
        let first = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let second = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();

        b.credit(3, kes(45000), first).unwrap();
        b.credit(2, kes(30000), second).unwrap();

        assert_eq!(b.advance_months, 5);
        assert_eq!(b.advance_amount, kes(75000));
        assert_eq!(b.advance_collected_date, Some(second));
        assert!(b.advance_used.is_zero());
    }

    #[test]
    fn test_draw_reduces_remaining() {
        let mut b = balance();
        b.credit(3, kes(45000), NaiveDate::from_ymd_opt(2025, 1, 5).unwrap())
            .unwrap();

        b.draw(kes(15000)).unwrap();

        assert_eq!(b.advance_used, kes(15000));
        assert_eq!(b.remaining(), kes(30000));
        assert!(b.is_consistent());
    }

    #[test]
    fn test_draw_cannot_exceed_remaining() {
        let mut b = balance();
        b.credit(1, kes(15000), NaiveDate::from_ymd_opt(2025, 1, 5).unwrap())
            .unwrap();
        b.draw(kes(10000)).unwrap();

        let result = b.draw(kes(6000));

        assert!(matches!(result, Err(LedgerError::BalanceExceeded { .. })));
        assert_eq!(b.advance_used, kes(10000));
    }

    #[test]
    fn test_draw_rejects_negative() {
        let mut b = balance();
        b.credit(1, kes(15000), NaiveDate::from_ymd_opt(2025, 1, 5).unwrap())
            .unwrap();

        let result = b.draw(Money::new(dec!(-1), Currency::KES));
        assert!(matches!(result, Err(LedgerError::Validation(_))));
    }
}
