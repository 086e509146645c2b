//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_ledger::{AdvanceBalance, RentInvoice};

/// Asserts that two Money values are exactly equal
///
/// # Panics
///
/// Panics with both amounts in the message when they differ
pub fn assert_money_eq(actual: &Money, expected: &Money) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );
    assert_eq!(
        actual.amount(),
        expected.amount(),
        "Money amounts differ: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts the balance invariant `0 ≤ used ≤ amount`
pub fn assert_balance_consistent(balance: &AdvanceBalance) {
    assert!(
        balance.is_consistent(),
        "Balance invariant violated for lease {}: used={}, amount={}",
        balance.lease_id,
        balance.advance_used,
        balance.advance_amount
    );
}

/// Asserts that an invoice was never touched by settlement
pub fn assert_invoice_untouched(invoice: &RentInvoice) {
    assert!(
        invoice.advance_applied.is_zero(),
        "Invoice {} has advance applied: {}",
        invoice.invoice_number,
        invoice.advance_applied
    );
    assert!(
        !invoice.is_advance_covered,
        "Invoice {} is marked covered",
        invoice.invoice_number
    );
    assert!(
        invoice.paid_date.is_none(),
        "Invoice {} has a paid date",
        invoice.invoice_number
    );
}

/// Asserts that an invoice is fully covered and paid as of its own date
pub fn assert_invoice_covered(invoice: &RentInvoice) {
    assert!(
        invoice.is_advance_covered,
        "Invoice {} is not covered",
        invoice.invoice_number
    );
    assert_money_eq(&invoice.advance_applied, &invoice.total_due());
    assert_eq!(
        invoice.paid_date,
        Some(invoice.invoice_date),
        "Invoice {} paid date should be its invoice date",
        invoice.invoice_number
    );
}
