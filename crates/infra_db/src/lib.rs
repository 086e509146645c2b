//! Infrastructure Database Layer
//!
//! This crate provides the database infrastructure for the rental core,
//! implementing the repository pattern on PostgreSQL using SQLx.
//!
//! # Transaction discipline
//!
//! Every mutating ledger operation runs inside a single transaction that
//! locks the lease's balance row (`SELECT ... FOR UPDATE`) for the duration
//! of its read-modify-write and commits balance, invoice, and ledger-entry
//! mutations together. Updates are additionally guarded by an optimistic
//! version column; a conflict surfaces as `DatabaseError::VersionConflict`
//! and the caller retries the whole operation from a fresh read.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, SettlementRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/rental")).await?;
//! let repo = SettlementRepository::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;

pub use pool::{DatabasePool, create_pool, create_pool_from_url, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::{
    LeaseRepository, InvoiceRepository, NewInvoice, LedgerRepository, SettlementRepository,
};
