//! Rent invoices
//!
//! Invoices are created by the issuance flow and mutated only through the
//! settlement engine. The advance-settlement fields (`advance_applied`,
//! `is_advance_covered`) track how much prepaid rent has been drawn against
//! each invoice.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{InvoiceId, LeaseId, Money};
use crate::error::LedgerError;

/// Invoice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Invoice has been generated but not delivered
    Generated,
    /// Invoice has been sent to the tenant
    Sent,
    /// Fully paid
    Paid,
    /// Past due date and unpaid
    Overdue,
    /// Cancelled/voided, permanently excluded from settlement
    Cancelled,
}

/// A rent invoice for one billing period of a lease
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentInvoice {
    /// Unique identifier
    pub id: InvoiceId,
    /// Lease this invoice bills
    pub lease_id: LeaseId,
    /// Invoice number (human-readable)
    pub invoice_number: String,
    /// Invoice date
    pub invoice_date: NaiveDate,
    /// Due date
    pub due_date: NaiveDate,
    /// Rent for the period
    pub rent_amount: Money,
    /// Late fee, zero unless assessed
    pub late_fee: Money,
    /// Prepaid rent already applied to this invoice
    pub advance_applied: Money,
    /// True only when advance_applied equals the total due
    pub is_advance_covered: bool,
    /// Status
    pub status: InvoiceStatus,
    /// Date the invoice was settled, if it was
    pub paid_date: Option<NaiveDate>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl RentInvoice {
    /// Creates a new invoice in `Generated` status
    pub fn new(
        lease_id: LeaseId,
        invoice_date: NaiveDate,
        due_date: NaiveDate,
        rent_amount: Money,
        late_fee: Money,
    ) -> Self {
        let now = Utc::now();
        let id = InvoiceId::new_v7();
        let currency = rent_amount.currency();

        Self {
            id,
            lease_id,
            invoice_number: generate_invoice_number(),
            invoice_date,
            due_date,
            rent_amount,
            late_fee,
            advance_applied: Money::zero(currency),
            is_advance_covered: false,
            status: InvoiceStatus::Generated,
            paid_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Total the tenant owes on this invoice
    pub fn total_due(&self) -> Money {
        self.rent_amount + self.late_fee
    }

    /// Amount still unsettled, floored at zero
    pub fn outstanding(&self) -> Result<Money, LedgerError> {
        Ok(self.total_due().saturating_sub(&self.advance_applied)?)
    }

    /// Returns true if this invoice can never be settled
    pub fn is_cancelled(&self) -> bool {
        self.status == InvoiceStatus::Cancelled
    }

    /// Marks the invoice as sent to the tenant
    pub fn mark_sent(&mut self) -> Result<(), LedgerError> {
        match self.status {
            InvoiceStatus::Generated => {
                self.status = InvoiceStatus::Sent;
                self.updated_at = Utc::now();
                Ok(())
            }
            other => Err(LedgerError::InvalidTransition(format!(
                "cannot send invoice in {:?} status",
                other
            ))),
        }
    }

    /// Marks the invoice as overdue
    pub fn mark_overdue(&mut self) -> Result<(), LedgerError> {
        match self.status {
            InvoiceStatus::Generated | InvoiceStatus::Sent => {
                self.status = InvoiceStatus::Overdue;
                self.updated_at = Utc::now();
                Ok(())
            }
            other => Err(LedgerError::InvalidTransition(format!(
                "cannot mark invoice overdue in {:?} status",
                other
            ))),
        }
    }

    /// Cancels the invoice, excluding it from settlement permanently
    pub fn cancel(&mut self) -> Result<(), LedgerError> {
        match self.status {
            InvoiceStatus::Paid => Err(LedgerError::InvalidTransition(
                "cannot cancel a paid invoice".to_string(),
            )),
            _ => {
                self.status = InvoiceStatus::Cancelled;
                self.updated_at = Utc::now();
                Ok(())
            }
        }
    }

    /// Credits prepaid rent against this invoice
    ///
    /// When the applied amount reaches the total due exactly, the invoice
    /// becomes covered and paid as of its own invoice date, not as of
    /// processing time.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the credit would push `advance_applied`
    /// past the total due.
    pub(crate) fn credit_advance(&mut self, amount: Money) -> Result<(), LedgerError> {
        let applied = self.advance_applied.checked_add(&amount)?;
        if applied > self.total_due() {
            return Err(LedgerError::validation(format!(
                "applying {} would exceed invoice total {}",
                amount,
                self.total_due()
            )));
        }

        self.advance_applied = applied;
        self.updated_at = Utc::now();

        if self.advance_applied == self.total_due() {
            self.is_advance_covered = true;
            self.status = InvoiceStatus::Paid;
            self.paid_date = Some(self.invoice_date);
        }

        Ok(())
    }
}

/// Generates a unique invoice number
fn generate_invoice_number() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("INV-{}", duration.as_nanos() % 10_000_000_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn invoice(rent: i64, late_fee: i64) -> RentInvoice {
        RentInvoice::new(
            LeaseId::new(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            Money::new(rent.into(), Currency::KES),
            Money::new(late_fee.into(), Currency::KES),
        )
    }

    #[test]
    fn test_new_invoice_defaults() {
        let inv = invoice(15000, 0);

        assert_eq!(inv.status, InvoiceStatus::Generated);
        assert!(inv.advance_applied.is_zero());
        assert!(!inv.is_advance_covered);
        assert!(inv.paid_date.is_none());
        assert!(inv.invoice_number.starts_with("INV-"));
    }

    #[test]
    fn test_total_due_includes_late_fee() {
        let inv = invoice(15000, 500);
        assert_eq!(inv.total_due().amount(), dec!(15500));
    }

    #[test]
    fn test_outstanding_floors_at_zero() {
        let mut inv = invoice(15000, 0);
        inv.credit_advance(Money::new(dec!(15000), Currency::KES)).unwrap();

        assert!(inv.outstanding().unwrap().is_zero());
    }

    #[test]
    fn test_full_credit_marks_paid_as_of_invoice_date() {
        let mut inv = invoice(15000, 0);
        inv.credit_advance(Money::new(dec!(15000), Currency::KES)).unwrap();

        assert!(inv.is_advance_covered);
        assert_eq!(inv.status, InvoiceStatus::Paid);
        assert_eq!(inv.paid_date, Some(inv.invoice_date));
    }

    #[test]
    fn test_partial_credit_leaves_status_untouched() {
        let mut inv = invoice(15000, 0);
        inv.mark_sent().unwrap();
        inv.credit_advance(Money::new(dec!(5000), Currency::KES)).unwrap();

        assert!(!inv.is_advance_covered);
        assert_eq!(inv.status, InvoiceStatus::Sent);
        assert!(inv.paid_date.is_none());
    }

    #[test]
    fn test_credit_past_total_is_rejected() {
        let mut inv = invoice(15000, 0);

        let result = inv.credit_advance(Money::new(dec!(15001), Currency::KES));
        assert!(matches!(result, Err(LedgerError::Validation(_))));
        assert!(inv.advance_applied.is_zero());
    }

    #[test]
    fn test_cancel_paid_invoice_is_rejected() {
        let mut inv = invoice(15000, 0);
        inv.credit_advance(Money::new(dec!(15000), Currency::KES)).unwrap();

        assert!(matches!(
            inv.cancel(),
            Err(LedgerError::InvalidTransition(_))
        ));
    }

    #[test]
    fn test_status_transitions() {
        let mut inv = invoice(15000, 0);
        inv.mark_sent().unwrap();
        assert_eq!(inv.status, InvoiceStatus::Sent);

        inv.mark_overdue().unwrap();
        assert_eq!(inv.status, InvoiceStatus::Overdue);

        inv.cancel().unwrap();
        assert_eq!(inv.status, InvoiceStatus::Cancelled);
        assert!(inv.is_cancelled());
    }
}
