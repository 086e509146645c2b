//! Ledger domain errors

use core_kernel::{InvoiceId, MoneyError};
use thiserror::Error;

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Money arithmetic failed (currency mismatch, overflow)
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Input rejected before any mutation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Retroactive application requested for a lease with no prepaid balance
    #[error("No advance rent found for this tenant unit")]
    NoAdvanceBalance,

    /// Settlement attempted against a cancelled invoice
    #[error("Invoice {0} is cancelled and cannot be settled")]
    CancelledInvoice(InvoiceId),

    /// Invoice does not belong to the balance's lease
    #[error("Invoice {invoice} does not belong to lease {lease}")]
    LeaseMismatch {
        invoice: InvoiceId,
        lease: String,
    },

    /// A draw would push cumulative usage past the collected amount
    #[error("Draw of {draw} exceeds remaining advance balance {remaining}")]
    BalanceExceeded {
        draw: String,
        remaining: String,
    },

    /// Illegal invoice status transition
    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),
}

impl LedgerError {
    pub fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation(message.into())
    }
}
