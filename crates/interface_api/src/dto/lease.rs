//! Lease DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_lease::{Lease, LeaseStatus};
use domain_ledger::AdvanceBalance;

use super::advance::BalanceResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLeaseRequest {
    pub unit_id: Uuid,
    pub tenant_id: Uuid,
    /// Must be positive; enforced by the lease domain
    pub monthly_rent: Decimal,
    /// ISO 4217 code, e.g. "KES"
    #[validate(length(min = 3, max = 3))]
    pub currency: String,
    pub deposit: Option<Decimal>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Lease summary for list views
#[derive(Debug, Serialize)]
pub struct LeaseSummaryResponse {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub tenant_id: Uuid,
    pub monthly_rent: Decimal,
    pub currency: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Full lease detail, advance-rent state included
#[derive(Debug, Serialize)]
pub struct LeaseResponse {
    #[serde(flatten)]
    pub lease: LeaseSummaryResponse,
    pub deposit: Decimal,
    pub advance: BalanceResponse,
}

pub(crate) fn lease_status_label(status: LeaseStatus) -> &'static str {
    match status {
        LeaseStatus::Draft => "draft",
        LeaseStatus::Active => "active",
        LeaseStatus::Terminated => "terminated",
        LeaseStatus::Expired => "expired",
    }
}

impl From<&Lease> for LeaseSummaryResponse {
    fn from(lease: &Lease) -> Self {
        Self {
            id: *lease.id.as_uuid(),
            unit_id: *lease.unit_id.as_uuid(),
            tenant_id: *lease.tenant_id.as_uuid(),
            monthly_rent: lease.monthly_rent.amount(),
            currency: lease.monthly_rent.currency().code().to_string(),
            start_date: lease.start_date,
            end_date: lease.end_date,
            status: lease_status_label(lease.status).to_string(),
            created_at: lease.created_at,
        }
    }
}

impl LeaseResponse {
    pub fn from_parts(lease: &Lease, balance: &AdvanceBalance) -> Self {
        Self {
            lease: lease.into(),
            deposit: lease.deposit.amount(),
            advance: balance.into(),
        }
    }
}
