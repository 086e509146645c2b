//! Database rows and their domain conversions
//!
//! Status enums are stored as TEXT (constrained by CHECK clauses in the
//! migrations) and mapped here; a value outside the known set surfaces as
//! `DatabaseError::CorruptRow` rather than a panic.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use core_kernel::{Currency, Money};
use domain_lease::{Lease, LeaseStatus};
use domain_ledger::entry::{EntryCategory, EntryStatus, EntryType, PaymentMethod};
use domain_ledger::{AdvanceBalance, InvoiceStatus, LedgerEntry, RentInvoice};

use crate::error::DatabaseError;

pub(crate) fn money_from(amount: Decimal, code: &str) -> Result<Money, DatabaseError> {
    let currency = Currency::from_code(code)
        .ok_or_else(|| DatabaseError::CorruptRow(format!("unknown currency code '{}'", code)))?;
    Ok(Money::new(amount, currency))
}

// ---------------------------------------------------------------------------
// Status <-> TEXT mappings
// ---------------------------------------------------------------------------

pub(crate) fn lease_status_str(status: LeaseStatus) -> &'static str {
    match status {
        LeaseStatus::Draft => "draft",
        LeaseStatus::Active => "active",
        LeaseStatus::Terminated => "terminated",
        LeaseStatus::Expired => "expired",
    }
}

pub(crate) fn lease_status_from(s: &str) -> Result<LeaseStatus, DatabaseError> {
    match s {
        "draft" => Ok(LeaseStatus::Draft),
        "active" => Ok(LeaseStatus::Active),
        "terminated" => Ok(LeaseStatus::Terminated),
        "expired" => Ok(LeaseStatus::Expired),
        other => Err(DatabaseError::CorruptRow(format!(
            "unknown lease status '{}'",
            other
        ))),
    }
}

pub(crate) fn invoice_status_str(status: InvoiceStatus) -> &'static str {
    match status {
        InvoiceStatus::Generated => "generated",
        InvoiceStatus::Sent => "sent",
        InvoiceStatus::Paid => "paid",
        InvoiceStatus::Overdue => "overdue",
        InvoiceStatus::Cancelled => "cancelled",
    }
}

pub(crate) fn invoice_status_from(s: &str) -> Result<InvoiceStatus, DatabaseError> {
    match s {
        "generated" => Ok(InvoiceStatus::Generated),
        "sent" => Ok(InvoiceStatus::Sent),
        "paid" => Ok(InvoiceStatus::Paid),
        "overdue" => Ok(InvoiceStatus::Overdue),
        "cancelled" => Ok(InvoiceStatus::Cancelled),
        other => Err(DatabaseError::CorruptRow(format!(
            "unknown invoice status '{}'",
            other
        ))),
    }
}

pub(crate) fn entry_type_str(entry_type: EntryType) -> &'static str {
    match entry_type {
        EntryType::Rent => "rent",
        EntryType::Deposit => "deposit",
        EntryType::Fee => "fee",
    }
}

pub(crate) fn entry_type_from(s: &str) -> Result<EntryType, DatabaseError> {
    match s {
        "rent" => Ok(EntryType::Rent),
        "deposit" => Ok(EntryType::Deposit),
        "fee" => Ok(EntryType::Fee),
        other => Err(DatabaseError::CorruptRow(format!(
            "unknown entry type '{}'",
            other
        ))),
    }
}

pub(crate) fn entry_category_str(category: EntryCategory) -> &'static str {
    match category {
        EntryCategory::MonthlyRent => "monthly_rent",
        EntryCategory::SecurityDeposit => "security_deposit",
        EntryCategory::LateFee => "late_fee",
        EntryCategory::Maintenance => "maintenance",
    }
}

pub(crate) fn entry_category_from(s: &str) -> Result<EntryCategory, DatabaseError> {
    match s {
        "monthly_rent" => Ok(EntryCategory::MonthlyRent),
        "security_deposit" => Ok(EntryCategory::SecurityDeposit),
        "late_fee" => Ok(EntryCategory::LateFee),
        "maintenance" => Ok(EntryCategory::Maintenance),
        other => Err(DatabaseError::CorruptRow(format!(
            "unknown entry category '{}'",
            other
        ))),
    }
}

pub(crate) fn entry_status_str(status: EntryStatus) -> &'static str {
    match status {
        EntryStatus::Completed => "completed",
        EntryStatus::Pending => "pending",
        EntryStatus::Failed => "failed",
    }
}

pub(crate) fn entry_status_from(s: &str) -> Result<EntryStatus, DatabaseError> {
    match s {
        "completed" => Ok(EntryStatus::Completed),
        "pending" => Ok(EntryStatus::Pending),
        "failed" => Ok(EntryStatus::Failed),
        other => Err(DatabaseError::CorruptRow(format!(
            "unknown entry status '{}'",
            other
        ))),
    }
}

pub(crate) fn payment_method_str(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "cash",
        PaymentMethod::BankTransfer => "bank_transfer",
        PaymentMethod::MobileMoney => "mobile_money",
        PaymentMethod::Check => "check",
        PaymentMethod::Card => "card",
    }
}

pub(crate) fn payment_method_from(s: &str) -> Result<PaymentMethod, DatabaseError> {
    match s {
        "cash" => Ok(PaymentMethod::Cash),
        "bank_transfer" => Ok(PaymentMethod::BankTransfer),
        "mobile_money" => Ok(PaymentMethod::MobileMoney),
        "check" => Ok(PaymentMethod::Check),
        "card" => Ok(PaymentMethod::Card),
        other => Err(DatabaseError::CorruptRow(format!(
            "unknown payment method '{}'",
            other
        ))),
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// Database row for a lease
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct LeaseRow {
    pub lease_id: Uuid,
    pub unit_id: Uuid,
    pub landlord_id: Uuid,
    pub tenant_id: Uuid,
    pub monthly_rent: Decimal,
    pub deposit: Decimal,
    pub currency: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeaseRow {
    pub fn into_domain(self) -> Result<Lease, DatabaseError> {
        Ok(Lease {
            id: self.lease_id.into(),
            unit_id: self.unit_id.into(),
            landlord_id: self.landlord_id.into(),
            tenant_id: self.tenant_id.into(),
            monthly_rent: money_from(self.monthly_rent, &self.currency)?,
            deposit: money_from(self.deposit, &self.currency)?,
            start_date: self.start_date,
            end_date: self.end_date,
            status: lease_status_from(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Database row for an advance balance
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct BalanceRow {
    pub lease_id: Uuid,
    pub monthly_rent: Decimal,
    pub currency: String,
    pub lease_start: NaiveDate,
    pub advance_months: i32,
    pub advance_amount: Decimal,
    pub advance_used: Decimal,
    pub advance_collected_date: Option<NaiveDate>,
    pub version: i64,
}

impl BalanceRow {
    pub fn into_domain(self) -> Result<AdvanceBalance, DatabaseError> {
        Ok(AdvanceBalance {
            lease_id: self.lease_id.into(),
            monthly_rent: money_from(self.monthly_rent, &self.currency)?,
            lease_start: self.lease_start,
            advance_months: self.advance_months as u32,
            advance_amount: money_from(self.advance_amount, &self.currency)?,
            advance_used: money_from(self.advance_used, &self.currency)?,
            advance_collected_date: self.advance_collected_date,
            version: self.version,
        })
    }
}

/// Database row for a rent invoice
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct InvoiceRow {
    pub invoice_id: Uuid,
    pub lease_id: Uuid,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub rent_amount: Decimal,
    pub late_fee: Decimal,
    pub currency: String,
    pub advance_applied: Decimal,
    pub is_advance_covered: bool,
    pub status: String,
    pub paid_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InvoiceRow {
    pub fn into_domain(self) -> Result<RentInvoice, DatabaseError> {
        Ok(RentInvoice {
            id: self.invoice_id.into(),
            lease_id: self.lease_id.into(),
            invoice_number: self.invoice_number,
            invoice_date: self.invoice_date,
            due_date: self.due_date,
            rent_amount: money_from(self.rent_amount, &self.currency)?,
            late_fee: money_from(self.late_fee, &self.currency)?,
            advance_applied: money_from(self.advance_applied, &self.currency)?,
            is_advance_covered: self.is_advance_covered,
            status: invoice_status_from(&self.status)?,
            paid_date: self.paid_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Database row for a ledger entry
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct LedgerEntryRow {
    pub entry_id: Uuid,
    pub lease_id: Uuid,
    pub entry_type: String,
    pub category: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: String,
    pub payment_method: String,
    pub reference_number: Option<String>,
    pub transaction_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntryRow {
    pub fn into_domain(self) -> Result<LedgerEntry, DatabaseError> {
        Ok(LedgerEntry {
            id: self.entry_id.into(),
            lease_id: self.lease_id.into(),
            entry_type: entry_type_from(&self.entry_type)?,
            category: entry_category_from(&self.category)?,
            amount: money_from(self.amount, &self.currency)?,
            status: entry_status_from(&self.status)?,
            payment_method: payment_method_from(&self.payment_method)?,
            reference_number: self.reference_number,
            transaction_date: self.transaction_date,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}
