//! Comprehensive tests for the advance-rent settlement engine

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Currency, LeaseId, Money};
use domain_ledger::balance::AdvanceBalance;
use domain_ledger::entry::{EntryCategory, EntryStatus, EntryType, PaymentMethod};
use domain_ledger::invoice::{InvoiceStatus, RentInvoice};
use domain_ledger::settlement::{
    apply_to_invoice, check_coverage, collect_advance, retroactively_apply, CollectAdvance,
};
use domain_ledger::LedgerError;

fn kes(amount: i64) -> Money {
    Money::new(amount.into(), Currency::KES)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn lease_balance() -> AdvanceBalance {
    AdvanceBalance::open(LeaseId::new(), kes(15000), date(2025, 1, 1))
}

fn collect(months: u32, amount: i64) -> CollectAdvance {
    CollectAdvance {
        months,
        amount: kes(amount),
        transaction_date: date(2025, 1, 5),
        payment_method: PaymentMethod::MobileMoney,
        reference_number: Some("MPESA-7Q41".to_string()),
        notes: None,
    }
}

fn invoice_for(balance: &AdvanceBalance, y: i32, m: u32, d: u32, rent: i64) -> RentInvoice {
    RentInvoice::new(
        balance.lease_id,
        date(y, m, d),
        date(y, m, d) + chrono::Days::new(5),
        kes(rent),
        kes(0),
    )
}

// ============================================================================
// CollectAdvance
// ============================================================================

mod collect_advance_tests {
    use super::*;

    #[test]
    fn test_collect_three_months() {
        // Scenario: 3 months at 15000/month collected as 45000.
        let mut balance = lease_balance();

        let entry = collect_advance(&mut balance, collect(3, 45000)).unwrap();

        assert_eq!(balance.advance_months, 3);
        assert_eq!(balance.advance_amount, kes(45000));
        assert_eq!(balance.advance_used, kes(0));
        assert_eq!(balance.remaining(), kes(45000));
        assert_eq!(balance.advance_collected_date, Some(date(2025, 1, 5)));

        assert_eq!(entry.lease_id, balance.lease_id);
        assert_eq!(entry.amount, kes(45000));
        assert_eq!(entry.entry_type, EntryType::Rent);
        assert_eq!(entry.category, EntryCategory::MonthlyRent);
        assert_eq!(entry.status, EntryStatus::Completed);
        assert_eq!(entry.transaction_date, date(2025, 1, 5));
    }

    #[test]
    fn test_months_out_of_range_rejected() {
        let mut balance = lease_balance();

        assert!(matches!(
            collect_advance(&mut balance, collect(0, 15000)),
            Err(LedgerError::Validation(_))
        ));
        assert!(matches!(
            collect_advance(&mut balance, collect(13, 195000)),
            Err(LedgerError::Validation(_))
        ));

        // Rejected before any mutation.
        assert_eq!(balance.advance_months, 0);
        assert!(balance.advance_amount.is_zero());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut balance = lease_balance();
        let mut request = collect(2, 0);
        request.amount = Money::new(dec!(-30000), Currency::KES);

        assert!(matches!(
            collect_advance(&mut balance, request),
            Err(LedgerError::Validation(_))
        ));
        assert!(balance.advance_amount.is_zero());
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let mut balance = lease_balance();
        let mut request = collect(2, 0);
        request.amount = Money::new(dec!(30000), Currency::USD);

        assert!(matches!(
            collect_advance(&mut balance, request),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn test_repeat_collection_is_additive() {
        let mut balance = lease_balance();
        collect_advance(&mut balance, collect(3, 45000)).unwrap();

        // Spend one month, then top up with two more.
        let mut invoice = invoice_for(&balance, 2025, 1, 1, 15000);
        apply_to_invoice(&mut balance, &mut invoice).unwrap();

        let mut top_up = collect(2, 30000);
        top_up.transaction_date = date(2025, 3, 1);
        collect_advance(&mut balance, top_up).unwrap();

        assert_eq!(balance.advance_months, 5);
        assert_eq!(balance.advance_amount, kes(75000));
        assert_eq!(balance.advance_used, kes(15000));
        assert_eq!(balance.remaining(), kes(60000));
        assert_eq!(balance.advance_collected_date, Some(date(2025, 3, 1)));
    }
}

// ============================================================================
// CheckCoverage
// ============================================================================

mod coverage_tests {
    use super::*;

    #[test]
    fn test_covered_inside_window_with_balance() {
        let mut balance = lease_balance();
        collect_advance(&mut balance, collect(3, 45000)).unwrap();

        // Window starts at the collection date (later than lease start).
        let status = check_coverage(&balance, date(2025, 2, 15));

        assert!(status.covered);
        assert!(status.can_fully_cover);
        assert_eq!(status.remaining, kes(45000));

        let window = status.window.unwrap();
        assert_eq!(window.start, date(2025, 1, 5));
        assert_eq!(window.end, date(2025, 4, 4));
    }

    #[test]
    fn test_not_covered_outside_window() {
        let mut balance = lease_balance();
        collect_advance(&mut balance, collect(3, 45000)).unwrap();

        assert!(!check_coverage(&balance, date(2024, 12, 31)).covered);
        assert!(!check_coverage(&balance, date(2025, 4, 5)).covered);
    }

    #[test]
    fn test_not_covered_when_exhausted() {
        let mut balance = lease_balance();
        collect_advance(&mut balance, collect(1, 15000)).unwrap();

        let mut invoice = invoice_for(&balance, 2025, 1, 1, 15000);
        apply_to_invoice(&mut balance, &mut invoice).unwrap();

        let status = check_coverage(&balance, date(2025, 1, 15));
        assert!(!status.covered);
        assert!(status.remaining.is_zero());
    }

    #[test]
    fn test_no_window_before_any_collection() {
        let balance = lease_balance();

        let status = check_coverage(&balance, date(2025, 1, 15));
        assert!(!status.covered);
        assert!(status.window.is_none());
    }

    #[test]
    fn test_preview_has_no_side_effects() {
        let mut balance = lease_balance();
        collect_advance(&mut balance, collect(3, 45000)).unwrap();
        let before = balance.clone();

        check_coverage(&balance, date(2025, 2, 1));

        assert_eq!(balance.advance_used, before.advance_used);
        assert_eq!(balance.advance_amount, before.advance_amount);
    }
}

// ============================================================================
// ApplyToInvoice
// ============================================================================

mod apply_tests {
    use super::*;

    #[test]
    fn test_full_settlement() {
        // Scenario: invoice for one month of rent, balance covers it fully.
        let mut balance = lease_balance();
        collect_advance(&mut balance, collect(3, 45000)).unwrap();
        let mut invoice = invoice_for(&balance, 2025, 1, 1, 15000);

        let result = apply_to_invoice(&mut balance, &mut invoice).unwrap();

        assert_eq!(result.applied, kes(15000));
        assert!(result.fully_covered);

        assert_eq!(invoice.advance_applied, kes(15000));
        assert!(invoice.is_advance_covered);
        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.paid_date, Some(invoice.invoice_date));

        assert_eq!(balance.advance_used, kes(15000));
    }

    #[test]
    fn test_partial_settlement() {
        // Scenario: only 5000 remains; invoice is 15000.
        let mut balance = lease_balance();
        collect_advance(&mut balance, collect(3, 45000)).unwrap();
        balance.draw(kes(40000)).unwrap();

        let mut invoice = invoice_for(&balance, 2025, 4, 1, 15000);
        invoice.mark_sent().unwrap();

        let result = apply_to_invoice(&mut balance, &mut invoice).unwrap();

        assert_eq!(result.applied, kes(5000));
        assert!(!result.fully_covered);

        assert_eq!(invoice.advance_applied, kes(5000));
        assert!(!invoice.is_advance_covered);
        assert_eq!(invoice.status, InvoiceStatus::Sent);
        assert!(invoice.paid_date.is_none());

        assert_eq!(balance.advance_used, kes(45000));
        assert!(balance.remaining().is_zero());
    }

    #[test]
    fn test_late_fee_included_in_settlement() {
        let mut balance = lease_balance();
        collect_advance(&mut balance, collect(2, 30000)).unwrap();

        let mut invoice = RentInvoice::new(
            balance.lease_id,
            date(2025, 1, 1),
            date(2025, 1, 6),
            kes(15000),
            kes(750),
        );

        let result = apply_to_invoice(&mut balance, &mut invoice).unwrap();

        assert_eq!(result.applied, kes(15750));
        assert!(result.fully_covered);
        assert_eq!(balance.advance_used, kes(15750));
    }

    #[test]
    fn test_idempotent_on_settled_invoice() {
        let mut balance = lease_balance();
        collect_advance(&mut balance, collect(3, 45000)).unwrap();
        let mut invoice = invoice_for(&balance, 2025, 1, 1, 15000);

        apply_to_invoice(&mut balance, &mut invoice).unwrap();
        let snapshot_applied = invoice.advance_applied;
        let snapshot_used = balance.advance_used;

        // Re-invocation is a pure no-op.
        let repeat = apply_to_invoice(&mut balance, &mut invoice).unwrap();

        assert!(repeat.applied.is_zero());
        assert!(repeat.fully_covered);
        assert_eq!(invoice.advance_applied, snapshot_applied);
        assert_eq!(balance.advance_used, snapshot_used);
    }

    #[test]
    fn test_no_op_when_balance_empty() {
        let mut balance = lease_balance();
        let mut invoice = invoice_for(&balance, 2025, 1, 1, 15000);

        let result = apply_to_invoice(&mut balance, &mut invoice).unwrap();

        assert!(result.applied.is_zero());
        assert!(!result.fully_covered);
        assert_eq!(invoice.status, InvoiceStatus::Generated);
    }

    #[test]
    fn test_cancelled_invoice_rejected() {
        let mut balance = lease_balance();
        collect_advance(&mut balance, collect(3, 45000)).unwrap();

        let mut invoice = invoice_for(&balance, 2025, 1, 1, 15000);
        invoice.cancel().unwrap();

        assert!(matches!(
            apply_to_invoice(&mut balance, &mut invoice),
            Err(LedgerError::CancelledInvoice(_))
        ));
        assert!(invoice.advance_applied.is_zero());
        assert!(balance.advance_used.is_zero());
    }

    #[test]
    fn test_foreign_lease_invoice_rejected() {
        let mut balance = lease_balance();
        collect_advance(&mut balance, collect(3, 45000)).unwrap();

        let other = AdvanceBalance::open(LeaseId::new(), kes(15000), date(2025, 1, 1));
        let mut invoice = invoice_for(&other, 2025, 1, 1, 15000);

        assert!(matches!(
            apply_to_invoice(&mut balance, &mut invoice),
            Err(LedgerError::LeaseMismatch { .. })
        ));
    }
}

// ============================================================================
// RetroactivelyApply
// ============================================================================

mod retroactive_tests {
    use super::*;

    fn three_invoices(balance: &AdvanceBalance) -> Vec<RentInvoice> {
        vec![
            invoice_for(balance, 2025, 1, 1, 15000),
            invoice_for(balance, 2025, 2, 1, 15000),
            invoice_for(balance, 2025, 3, 1, 15000),
        ]
    }

    #[test]
    fn test_settles_all_when_balance_suffices() {
        // Scenario: three invoices, three months of advance.
        let mut balance = lease_balance();
        collect_advance(&mut balance, collect(3, 45000)).unwrap();
        let mut invoices = three_invoices(&balance);

        let outcome = retroactively_apply(&mut balance, &mut invoices).unwrap();

        assert_eq!(outcome.processed, 3);
        assert_eq!(outcome.applied_total, kes(45000));
        assert!(balance.remaining().is_zero());

        // Returned in date order.
        let dates: Vec<_> = outcome.invoices.iter().map(|i| i.invoice_date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 1, 1), date(2025, 2, 1), date(2025, 3, 1)]
        );
        assert!(outcome.invoices.iter().all(|i| i.fully_covered));
        assert!(invoices.iter().all(|i| i.status == InvoiceStatus::Paid));
    }

    #[test]
    fn test_exhaustion_stops_the_batch() {
        // Scenario: two months of advance against three invoices.
        let mut balance = lease_balance();
        collect_advance(&mut balance, collect(2, 30000)).unwrap();
        let mut invoices = three_invoices(&balance);

        let outcome = retroactively_apply(&mut balance, &mut invoices).unwrap();

        assert_eq!(outcome.processed, 2);
        assert_eq!(outcome.applied_total, kes(30000));

        // The third invoice is completely untouched.
        let third = &invoices[2];
        assert!(third.advance_applied.is_zero());
        assert!(!third.is_advance_covered);
        assert_eq!(third.status, InvoiceStatus::Generated);
    }

    #[test]
    fn test_visits_in_date_order_regardless_of_creation_order() {
        let mut balance = lease_balance();
        collect_advance(&mut balance, collect(2, 30000)).unwrap();

        // Created newest-first; settlement must still go oldest-first.
        let mut invoices = vec![
            invoice_for(&balance, 2025, 3, 1, 15000),
            invoice_for(&balance, 2025, 1, 1, 15000),
            invoice_for(&balance, 2025, 2, 1, 15000),
        ];

        let outcome = retroactively_apply(&mut balance, &mut invoices).unwrap();

        let dates: Vec<_> = outcome.invoices.iter().map(|i| i.invoice_date).collect();
        assert_eq!(dates, vec![date(2025, 1, 1), date(2025, 2, 1)]);

        // The March invoice (first in creation order) got nothing.
        assert!(invoices[0].advance_applied.is_zero());
    }

    #[test]
    fn test_same_date_ties_broken_by_invoice_id() {
        let mut balance = lease_balance();
        collect_advance(&mut balance, collect(1, 15000)).unwrap();

        let mut invoices = vec![
            invoice_for(&balance, 2025, 1, 1, 15000),
            invoice_for(&balance, 2025, 1, 1, 15000),
        ];
        let expected_first = invoices
            .iter()
            .map(|i| i.id)
            .min()
            .unwrap();

        let outcome = retroactively_apply(&mut balance, &mut invoices).unwrap();

        assert_eq!(outcome.processed, 1);
        assert_eq!(outcome.invoices[0].invoice_id, expected_first);
    }

    #[test]
    fn test_cancelled_invoices_skipped_and_untouched() {
        // Scenario: one of two eligible invoices is cancelled.
        let mut balance = lease_balance();
        collect_advance(&mut balance, collect(3, 45000)).unwrap();

        let mut invoices = vec![
            invoice_for(&balance, 2025, 1, 1, 15000),
            invoice_for(&balance, 2025, 2, 1, 15000),
        ];
        invoices[0].cancel().unwrap();

        let outcome = retroactively_apply(&mut balance, &mut invoices).unwrap();

        assert_eq!(outcome.processed, 1);
        assert_eq!(outcome.applied_total, kes(15000));
        assert_eq!(outcome.invoices[0].invoice_date, date(2025, 2, 1));

        assert!(invoices[0].advance_applied.is_zero());
        assert_eq!(invoices[0].status, InvoiceStatus::Cancelled);
    }

    #[test]
    fn test_partial_last_invoice() {
        let mut balance = lease_balance();
        collect_advance(&mut balance, collect(2, 30000)).unwrap();
        balance.draw(kes(10000)).unwrap();

        let mut invoices = three_invoices(&balance);
        let outcome = retroactively_apply(&mut balance, &mut invoices).unwrap();

        // 20000 remaining: first invoice fully, second partially.
        assert_eq!(outcome.processed, 2);
        assert_eq!(outcome.applied_total, kes(20000));
        assert!(outcome.invoices[0].fully_covered);
        assert!(!outcome.invoices[1].fully_covered);
        assert_eq!(outcome.invoices[1].amount_applied, kes(5000));
        assert!(invoices[2].advance_applied.is_zero());
    }

    #[test]
    fn test_no_advance_balance_rejected() {
        // Scenario: retroactive application with nothing collected.
        let mut balance = lease_balance();
        let mut invoices = three_invoices(&balance);

        let err = retroactively_apply(&mut balance, &mut invoices).unwrap_err();

        assert!(matches!(err, LedgerError::NoAdvanceBalance));
        assert_eq!(
            err.to_string(),
            "No advance rent found for this tenant unit"
        );
        assert!(invoices.iter().all(|i| i.advance_applied.is_zero()));
    }
}

// ============================================================================
// Conservation property
// ============================================================================

mod conservation_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// advance_used grows by exactly the sum of applied amounts and
        /// never exceeds advance_amount, for any mix of invoices.
        #[test]
        fn settlement_conserves_the_balance(
            advance_minor in 0i64..2_000_000i64,
            rents in proptest::collection::vec(1i64..50_000i64, 1..12)
        ) {
            let mut balance = AdvanceBalance::open(
                LeaseId::new(),
                Money::from_minor(1_500_000, Currency::KES),
                date(2025, 1, 1),
            );
            balance
                .credit(3, Money::from_minor(advance_minor, Currency::KES), date(2025, 1, 5))
                .unwrap();

            let mut invoices: Vec<RentInvoice> = rents
                .iter()
                .enumerate()
                .map(|(i, &rent)| {
                    RentInvoice::new(
                        balance.lease_id,
                        date(2025, 1, 1) + chrono::Days::new(i as u64),
                        date(2025, 1, 10) + chrono::Days::new(i as u64),
                        Money::from_minor(rent, Currency::KES),
                        Money::zero(Currency::KES),
                    )
                })
                .collect();

            let used_before = balance.advance_used;
            let mut applied_sum = Money::zero(Currency::KES);
            for invoice in invoices.iter_mut() {
                let result = apply_to_invoice(&mut balance, invoice).unwrap();
                applied_sum = applied_sum.checked_add(&result.applied).unwrap();
            }

            prop_assert_eq!(balance.advance_used, used_before + applied_sum);
            prop_assert!(balance.advance_used <= balance.advance_amount);
            prop_assert!(balance.is_consistent());

            // Invoice-side conservation: nothing applied beyond totals.
            for invoice in &invoices {
                prop_assert!(invoice.advance_applied <= invoice.total_due());
            }
        }
    }
}
