//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Days, NaiveDate};
use core_kernel::{Currency, Money};
use proptest::prelude::*;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::NGN),
        Just(Currency::KES),
        Just(Currency::GHS),
        Just(Currency::ZAR),
        Just(Currency::INR),
        Just(Currency::PHP),
        Just(Currency::UGX),
    ]
}

/// Strategy for generating positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for generating positive Money values in a fixed currency
pub fn rent_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|amount| Money::from_minor(amount, Currency::KES))
}

/// Strategy for generating valid advance month counts (1-12)
pub fn advance_months_strategy() -> impl Strategy<Value = u32> {
    1u32..=12u32
}

/// Strategy for generating invoice dates within a year of the lease start
pub fn invoice_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..365u64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + Days::new(offset)
    })
}
