//! Lease Domain - Tenant Units and Lease Agreements
//!
//! This crate holds the records the settlement engine hangs off: the tenant
//! unit being let and the lease agreement binding a tenant to it. The engine
//! itself never sees these aggregates; it receives a `LeaseId` plus the
//! caller's landlord identity, resolved through this domain.

pub mod lease;
pub mod unit;
pub mod error;

pub use lease::{Lease, LeaseStatus};
pub use unit::TenantUnit;
pub use error::LeaseError;
