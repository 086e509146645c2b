//! Repository implementations
//!
//! Each repository owns the queries for one aggregate. Row structs and the
//! row-to-domain conversions live in `rows`, shared across repositories.

mod rows;

pub mod lease;
pub mod invoice;
pub mod ledger;
pub mod settlement;

pub use lease::LeaseRepository;
pub use invoice::{InvoiceRepository, NewInvoice};
pub use ledger::LedgerRepository;
pub use settlement::SettlementRepository;
