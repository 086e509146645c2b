//! Integration tests for the Money type

use core_kernel::{Currency, Money, MoneyError};
use rust_decimal_macros::dec;

#[test]
fn construction_normalizes_to_minor_units() {
    // Computed amounts must compare equal to stored amounts, so every
    // constructor rounds to the currency's minor unit.
    let a = Money::new(dec!(14999.995), Currency::KES);
    let b = Money::new(dec!(15000.00), Currency::KES);

    assert_eq!(a, b);
}

#[test]
fn exact_equality_for_full_coverage_check() {
    let rent = Money::new(dec!(15000), Currency::KES);
    let late_fee = Money::new(dec!(500.50), Currency::KES);
    let applied = Money::new(dec!(15500.50), Currency::KES);

    assert_eq!(rent + late_fee, applied);
}

#[test]
fn ordering_within_a_currency() {
    let small = Money::new(dec!(5000), Currency::USD);
    let large = Money::new(dec!(15000), Currency::USD);

    assert!(small < large);
    assert_eq!(Money::min(&small, &large).unwrap(), small);
}

#[test]
fn cross_currency_operations_are_rejected() {
    let usd = Money::new(dec!(100), Currency::USD);
    let php = Money::new(dec!(100), Currency::PHP);

    assert!(matches!(
        usd.checked_sub(&php),
        Err(MoneyError::CurrencyMismatch(_, _))
    ));
    assert!(matches!(
        Money::min(&usd, &php),
        Err(MoneyError::CurrencyMismatch(_, _))
    ));
}

#[test]
fn display_uses_currency_symbol_and_places() {
    let rent = Money::new(dec!(15000), Currency::NGN);
    assert_eq!(rent.to_string(), "₦ 15000.00");

    let shillings = Money::new(dec!(15000), Currency::UGX);
    assert_eq!(shillings.to_string(), "USh 15000");
}

#[test]
fn serde_round_trip() {
    let money = Money::new(dec!(45000), Currency::KES);
    let json = serde_json::to_string(&money).unwrap();
    let back: Money = serde_json::from_str(&json).unwrap();

    assert_eq!(money, back);
}
