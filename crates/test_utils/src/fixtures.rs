//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the rental
//! system. These fixtures are designed to be consistent and predictable
//! for unit tests.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use fake::{faker::name::en::Name, Fake};
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;

/// Anchor date the fixture calendar is built around
static LEASE_EPOCH: Lazy<NaiveDate> = Lazy::new(|| NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The standard monthly rent used throughout the test suite
    pub fn monthly_rent() -> Money {
        Money::new(dec!(15000.00), Currency::KES)
    }

    /// Three months of rent collected upfront
    pub fn three_months_advance() -> Money {
        Money::new(dec!(45000.00), Currency::KES)
    }

    /// A typical security deposit (two months)
    pub fn deposit() -> Money {
        Money::new(dec!(30000.00), Currency::KES)
    }

    /// A typical late fee
    pub fn late_fee() -> Money {
        Money::new(dec!(500.00), Currency::KES)
    }

    /// A zero amount in the standard currency
    pub fn zero() -> Money {
        Money::zero(Currency::KES)
    }

    /// A USD amount for currency mismatch tests
    pub fn usd_rent() -> Money {
        Money::new(dec!(1200.00), Currency::USD)
    }

    /// A UGX amount (zero decimal places)
    pub fn ugx_rent() -> Money {
        Money::new(dec!(500000), Currency::UGX)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard lease start date (Jan 1, 2025)
    pub fn lease_start() -> NaiveDate {
        *LEASE_EPOCH
    }

    /// Standard advance collection date, a few days into the lease
    pub fn collection_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()
    }

    /// First-of-month invoice dates for the first quarter of 2025
    pub fn first_quarter_invoice_dates() -> [NaiveDate; 3] {
        [
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        ]
    }

    /// Standard lease end date (Dec 31, 2025)
    pub fn lease_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    /// A plausible payment reference
    pub fn payment_reference() -> &'static str {
        "MPESA-QX81KT4"
    }

    /// A plausible unit label
    pub fn unit_label() -> &'static str {
        "A4"
    }

    /// Standard collection notes
    pub fn advance_notes() -> &'static str {
        "3 months advance rent"
    }

    /// A random tenant display name
    pub fn tenant_name() -> String {
        Name().fake()
    }
}
