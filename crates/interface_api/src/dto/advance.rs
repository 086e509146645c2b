//! Advance rent DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_ledger::entry::PaymentMethod;
use domain_ledger::settlement::{CoverageStatus, RetroactiveOutcome};
use domain_ledger::{AdvanceBalance, LedgerEntry};

#[derive(Debug, Deserialize, Validate)]
pub struct CollectAdvanceRequest {
    #[validate(range(min = 1, max = 12))]
    pub months: u32,
    /// Must be non-negative; enforced by the settlement engine
    pub amount: Decimal,
    /// Required; a collection without a business date is rejected
    pub transaction_date: Option<NaiveDate>,
    pub payment_method: String,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoverageQuery {
    /// Defaults to today when omitted
    pub as_of: Option<NaiveDate>,
}

/// Advance-rent state surfaced on the lease
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub advance_months: u32,
    pub advance_amount: Decimal,
    pub advance_used: Decimal,
    pub advance_remaining: Decimal,
    pub advance_collected_date: Option<NaiveDate>,
}

impl From<&AdvanceBalance> for BalanceResponse {
    fn from(balance: &AdvanceBalance) -> Self {
        Self {
            advance_months: balance.advance_months,
            advance_amount: balance.advance_amount.amount(),
            advance_used: balance.advance_used.amount(),
            advance_remaining: balance.remaining().amount(),
            advance_collected_date: balance.advance_collected_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LedgerEntryResponse {
    pub id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub payment_method: String,
    pub reference_number: Option<String>,
    pub transaction_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&LedgerEntry> for LedgerEntryResponse {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            id: *entry.id.as_uuid(),
            amount: entry.amount.amount(),
            currency: entry.amount.currency().code().to_string(),
            payment_method: payment_method_label(entry.payment_method).to_string(),
            reference_number: entry.reference_number.clone(),
            transaction_date: entry.transaction_date,
            notes: entry.notes.clone(),
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CollectAdvanceResponse {
    pub balance: BalanceResponse,
    pub ledger_entry: LedgerEntryResponse,
}

#[derive(Debug, Serialize)]
pub struct CoverageResponse {
    pub covered: bool,
    pub remaining: Decimal,
    pub can_fully_cover: bool,
    pub window_start: Option<NaiveDate>,
    pub window_end: Option<NaiveDate>,
}

impl From<&CoverageStatus> for CoverageResponse {
    fn from(status: &CoverageStatus) -> Self {
        Self {
            covered: status.covered,
            remaining: status.remaining.amount(),
            can_fully_cover: status.can_fully_cover,
            window_start: status.window.map(|w| w.start),
            window_end: status.window.map(|w| w.end),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AppliedInvoiceResponse {
    pub id: Uuid,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub amount_applied: Decimal,
    pub total_applied: Decimal,
    pub fully_covered: bool,
}

#[derive(Debug, Serialize)]
pub struct RetroactiveResponse {
    pub processed: usize,
    pub applied: Decimal,
    pub invoices: Vec<AppliedInvoiceResponse>,
}

impl From<&RetroactiveOutcome> for RetroactiveResponse {
    fn from(outcome: &RetroactiveOutcome) -> Self {
        Self {
            processed: outcome.processed,
            applied: outcome.applied_total.amount(),
            invoices: outcome
                .invoices
                .iter()
                .map(|i| AppliedInvoiceResponse {
                    id: *i.invoice_id.as_uuid(),
                    invoice_number: i.invoice_number.clone(),
                    invoice_date: i.invoice_date,
                    amount_applied: i.amount_applied.amount(),
                    total_applied: i.total_applied.amount(),
                    fully_covered: i.fully_covered,
                })
                .collect(),
        }
    }
}

pub(crate) fn payment_method_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "cash",
        PaymentMethod::BankTransfer => "bank_transfer",
        PaymentMethod::MobileMoney => "mobile_money",
        PaymentMethod::Check => "check",
        PaymentMethod::Card => "card",
    }
}

pub(crate) fn parse_payment_method(s: &str) -> Option<PaymentMethod> {
    match s {
        "cash" => Some(PaymentMethod::Cash),
        "bank_transfer" => Some(PaymentMethod::BankTransfer),
        "mobile_money" => Some(PaymentMethod::MobileMoney),
        "check" => Some(PaymentMethod::Check),
        "card" => Some(PaymentMethod::Card),
        _ => None,
    }
}
