//! Invoice settlement engine
//!
//! Orchestrates the four advance-rent operations: collection, coverage
//! preview, single-invoice settlement, and retroactive batch settlement.
//! All functions here are pure over in-memory records; persistence and
//! transaction boundaries live in the infrastructure layer, which commits
//! the mutated records atomically after a successful call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use core_kernel::{advance_window, DateRange, InvoiceId, Money};

use crate::balance::AdvanceBalance;
use crate::entry::{LedgerEntry, PaymentMethod};
use crate::error::LedgerError;
use crate::invoice::RentInvoice;

/// Maximum months of rent a landlord may collect upfront
pub const MAX_ADVANCE_MONTHS: u32 = 12;

/// A validated request to collect advance rent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectAdvance {
    /// Months of rent being prepaid
    pub months: u32,
    /// Cash received
    pub amount: Money,
    /// Business date of the collection
    pub transaction_date: NaiveDate,
    /// How the cash was received
    pub payment_method: PaymentMethod,
    /// External reference (bank ref, receipt number)
    pub reference_number: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Result of a coverage preview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageStatus {
    /// True when the date falls inside the window and balance remains
    pub covered: bool,
    /// Unspent prepaid balance
    pub remaining: Money,
    /// Whether the balance can cover further invoices at all
    pub can_fully_cover: bool,
    /// The presented coverage window, if any months were purchased
    pub window: Option<DateRange>,
}

/// Result of settling a single invoice
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Application {
    /// Amount drawn from the balance by this call
    pub applied: Money,
    /// True when the invoice is now fully covered
    pub fully_covered: bool,
}

/// Per-invoice record inside a retroactive batch result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceApplication {
    pub invoice_id: InvoiceId,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    /// Amount applied by this batch
    pub amount_applied: Money,
    /// Cumulative amount applied to the invoice, all settlements included
    pub total_applied: Money,
    pub fully_covered: bool,
}

/// Result of a retroactive batch settlement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetroactiveOutcome {
    /// Invoices that received a non-zero application
    pub processed: usize,
    /// Total drawn from the balance by the batch
    pub applied_total: Money,
    /// Per-invoice detail, in settlement order
    pub invoices: Vec<InvoiceApplication>,
}

/// Collects advance rent onto a lease's balance
///
/// Validates the request, credits the balance (additively on repeat
/// collections), and returns the ledger entry recording the cash event.
/// The caller persists the balance and the entry as one atomic unit.
///
/// # Errors
///
/// Rejects, before any mutation: months outside 1–12, negative amounts,
/// and amounts in a different currency than the lease's rent.
pub fn collect_advance(
    balance: &mut AdvanceBalance,
    collect: CollectAdvance,
) -> Result<LedgerEntry, LedgerError> {
    if collect.months < 1 || collect.months > MAX_ADVANCE_MONTHS {
        return Err(LedgerError::validation(format!(
            "Advance months must be between 1 and {}, got {}",
            MAX_ADVANCE_MONTHS, collect.months
        )));
    }
    if collect.amount.is_negative() {
        return Err(LedgerError::validation(
            "Advance amount cannot be negative",
        ));
    }
    if collect.amount.currency() != balance.monthly_rent.currency() {
        return Err(LedgerError::validation(format!(
            "Advance currency {} does not match lease currency {}",
            collect.amount.currency(),
            balance.monthly_rent.currency()
        )));
    }

    let entry = LedgerEntry::record_rent(
        balance.lease_id,
        collect.amount,
        collect.payment_method,
        collect.reference_number,
        collect.transaction_date,
        collect.notes,
    )?;

    balance.credit(collect.months, collect.amount, collect.transaction_date)?;

    info!(
        lease = %balance.lease_id,
        months = collect.months,
        amount = %collect.amount,
        "advance rent collected"
    );

    Ok(entry)
}

/// Previews whether prepaid rent is presented as applicable on a date
///
/// The window starts at the later of the lease start and the collection
/// date and spans the purchased months. This is a preview surface only:
/// settlement draws the balance down as fungible cash and never consults
/// the window.
pub fn check_coverage(balance: &AdvanceBalance, as_of: NaiveDate) -> CoverageStatus {
    let remaining = balance.remaining();

    let window = balance.advance_collected_date.and_then(|collected| {
        let start = balance.lease_start.max(collected);
        advance_window(start, balance.advance_months)
    });

    let covered = window
        .map(|w| w.contains(as_of) && remaining.is_positive())
        .unwrap_or(false);

    CoverageStatus {
        covered,
        remaining,
        can_fully_cover: covered,
        window,
    }
}

/// Settles a single invoice against the lease's prepaid balance
///
/// Applies the smaller of the invoice's outstanding amount and the
/// balance's remaining amount. A fully covered invoice is marked paid as
/// of its own invoice date. Calling this on an already-settled invoice is
/// a no-op returning `applied = 0`.
///
/// # Errors
///
/// - `CancelledInvoice` when the invoice was voided
/// - `LeaseMismatch` when the invoice belongs to a different lease
pub fn apply_to_invoice(
    balance: &mut AdvanceBalance,
    invoice: &mut RentInvoice,
) -> Result<Application, LedgerError> {
    if invoice.is_cancelled() {
        return Err(LedgerError::CancelledInvoice(invoice.id));
    }
    if invoice.lease_id != balance.lease_id {
        return Err(LedgerError::LeaseMismatch {
            invoice: invoice.id,
            lease: balance.lease_id.to_string(),
        });
    }

    let outstanding = invoice.outstanding()?;
    let remaining = balance.remaining();
    let to_apply = Money::min(&outstanding, &remaining)?;

    if to_apply.is_positive() {
        invoice.credit_advance(to_apply)?;
        balance.draw(to_apply)?;

        debug!(
            invoice = %invoice.id,
            applied = %to_apply,
            covered = invoice.is_advance_covered,
            "advance applied to invoice"
        );
    }

    Ok(Application {
        applied: to_apply,
        fully_covered: invoice.is_advance_covered,
    })
}

/// Retroactively settles a lease's existing invoices, oldest first
///
/// Visits non-cancelled invoices in ascending invoice-date order (ties
/// broken by invoice id) and stops the moment the balance is exhausted;
/// invoices after the stopping point are left completely untouched.
/// Cancelled invoices are never counted and never mutated.
///
/// # Errors
///
/// - `NoAdvanceBalance` when no advance rent was ever collected
pub fn retroactively_apply(
    balance: &mut AdvanceBalance,
    invoices: &mut [RentInvoice],
) -> Result<RetroactiveOutcome, LedgerError> {
    if !balance.has_advance() {
        return Err(LedgerError::NoAdvanceBalance);
    }

    let mut order: Vec<usize> = invoices
        .iter()
        .enumerate()
        .filter(|(_, inv)| !inv.is_cancelled())
        .map(|(i, _)| i)
        .collect();
    order.sort_by_key(|&i| (invoices[i].invoice_date, invoices[i].id));

    let mut outcome = RetroactiveOutcome {
        processed: 0,
        applied_total: Money::zero(balance.advance_amount.currency()),
        invoices: Vec::new(),
    };

    for idx in order {
        if !balance.remaining().is_positive() {
            break;
        }

        let invoice = &mut invoices[idx];
        let application = apply_to_invoice(balance, invoice)?;

        if application.applied.is_positive() {
            outcome.processed += 1;
            outcome.applied_total = outcome.applied_total.checked_add(&application.applied)?;
            outcome.invoices.push(InvoiceApplication {
                invoice_id: invoice.id,
                invoice_number: invoice.invoice_number.clone(),
                invoice_date: invoice.invoice_date,
                amount_applied: application.applied,
                total_applied: invoice.advance_applied,
                fully_covered: application.fully_covered,
            });
        }
    }

    info!(
        lease = %balance.lease_id,
        processed = outcome.processed,
        applied = %outcome.applied_total,
        "retroactive settlement complete"
    );

    Ok(outcome)
}
