//! Ledger Domain - Advance Rent & Invoice Settlement
//!
//! This crate implements the prepaid-rent subsystem of the rental core:
//! landlords may collect several months of rent upfront, and the system
//! holds that amount as a balance which is drawn down against rent invoices.
//!
//! # Invariants
//!
//! - `0 ≤ advance_used ≤ advance_amount` on every balance, at all times
//! - `advance_applied ≤ rent_amount + late_fee` on every invoice
//! - An invoice is marked covered only when its applied amount equals its
//!   total due exactly, and only then is it marked paid (as of its own
//!   invoice date)
//! - Cancelled invoices are permanently excluded from settlement
//! - Ledger entries are append-only and never mutated
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{AdvanceBalance, CollectAdvance, settlement};
//!
//! let entry = settlement::collect_advance(&mut balance, collect)?;
//! let outcome = settlement::retroactively_apply(&mut balance, &mut invoices)?;
//! ```

pub mod balance;
pub mod invoice;
pub mod entry;
pub mod settlement;
pub mod error;

pub use balance::AdvanceBalance;
pub use invoice::{RentInvoice, InvoiceStatus};
pub use entry::{LedgerEntry, EntryType, EntryCategory, EntryStatus, PaymentMethod};
pub use settlement::{
    CollectAdvance, CoverageStatus, Application, InvoiceApplication, RetroactiveOutcome,
};
pub use error::LedgerError;
