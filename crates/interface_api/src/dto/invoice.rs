//! Invoice DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain_ledger::{InvoiceStatus, RentInvoice};

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Defaults to the lease's monthly rent when omitted
    pub rent_amount: Option<Decimal>,
    pub late_fee: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: Uuid,
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
}

pub(crate) fn invoice_status_label(status: InvoiceStatus) -> &'static str {
    match status {
        InvoiceStatus::Generated => "generated",
        InvoiceStatus::Sent => "sent",
        InvoiceStatus::Paid => "paid",
        InvoiceStatus::Overdue => "overdue",
        InvoiceStatus::Cancelled => "cancelled",
    }
}

impl From<&RentInvoice> for InvoiceResponse {
    fn from(invoice: &RentInvoice) -> Self {
        Self {
            id: *invoice.id.as_uuid(),
            lease_id: *invoice.lease_id.as_uuid(),
            invoice_number: invoice.invoice_number.clone(),
            invoice_date: invoice.invoice_date,
            due_date: invoice.due_date,
            rent_amount: invoice.rent_amount.amount(),
            late_fee: invoice.late_fee.amount(),
            currency: invoice.rent_amount.currency().code().to_string(),
            advance_applied: invoice.advance_applied.amount(),
            is_advance_covered: invoice.is_advance_covered,
            status: invoice_status_label(invoice.status).to_string(),
            paid_date: invoice.paid_date,
            created_at: invoice.created_at,
        }
    }
}
