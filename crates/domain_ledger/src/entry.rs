//! Ledger entries
//!
//! An entry is the immutable audit record of a single cash-collection
//! event. Entries are append-only: nothing in the system mutates or
//! deletes one after it is recorded.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{LeaseId, LedgerEntryId, Money};
use crate::error::LedgerError;

/// What kind of cash movement an entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Rent collection
    Rent,
    /// Security deposit
    Deposit,
    /// Standalone fee
    Fee,
}

/// Finer-grained category within an entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryCategory {
    /// Regular or prepaid monthly rent
    MonthlyRent,
    /// Security deposit held against damages
    SecurityDeposit,
    /// Late payment fee
    LateFee,
    /// Maintenance charge passed to the tenant
    Maintenance,
}

/// Entry lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Funds confirmed received
    Completed,
    /// Recorded but awaiting confirmation
    Pending,
    /// Confirmed failed
    Failed,
}

/// How the cash was received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    MobileMoney,
    Check,
    Card,
}

/// An immutable record of a cash-collection event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier
    pub id: LedgerEntryId,
    /// Lease the cash was collected for
    pub lease_id: LeaseId,
    /// Kind of movement
    pub entry_type: EntryType,
    /// Category within the type
    pub category: EntryCategory,
    /// Amount collected
    pub amount: Money,
    /// Lifecycle status
    pub status: EntryStatus,
    /// How the cash was received
    pub payment_method: PaymentMethod,
    /// External reference (bank ref, receipt number)
    pub reference_number: Option<String>,
    /// Business date of the collection
    pub transaction_date: NaiveDate,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the entry was recorded
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Records a completed monthly-rent collection
    ///
    /// # Errors
    ///
    /// Returns a validation error for negative amounts; an audit record of
    /// cash received can never be negative.
    pub fn record_rent(
        lease_id: LeaseId,
        amount: Money,
        payment_method: PaymentMethod,
        reference_number: Option<String>,
        transaction_date: NaiveDate,
        notes: Option<String>,
    ) -> Result<Self, LedgerError> {
        if amount.is_negative() {
            return Err(LedgerError::validation(
                "Ledger entry amount cannot be negative",
            ));
        }

        Ok(Self {
            id: LedgerEntryId::new_v7(),
            lease_id,
            entry_type: EntryType::Rent,
            category: EntryCategory::MonthlyRent,
            amount,
            status: EntryStatus::Completed,
            payment_method,
            reference_number,
            transaction_date,
            notes,
            created_at: Utc::now(),
        })
    }
}
