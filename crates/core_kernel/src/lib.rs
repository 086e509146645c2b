//! Core Kernel - Foundational types and utilities for the rental system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Calendar math for rent periods and coverage windows
//! - Common identifiers and value objects

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{DateRange, TemporalError, add_months, advance_window};
pub use identifiers::{
    LeaseId, UnitId, PropertyId, PartyId, InvoiceId, LedgerEntryId,
};
pub use error::CoreError;
