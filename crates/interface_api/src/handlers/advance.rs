//! Advance rent handlers
//!
//! The HTTP surface of the settlement engine: collection, coverage preview,
//! and retroactive application.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use core_kernel::Money;
use domain_ledger::settlement::CollectAdvance;
use infra_db::{LedgerRepository, SettlementRepository};

use crate::auth::Claims;
use crate::dto::advance::*;
use crate::{error::ApiError, AppState};

/// Collects advance rent onto a lease's balance
pub async fn collect_advance(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<CollectAdvanceRequest>,
) -> Result<Json<CollectAdvanceResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let landlord_id = claims.landlord_id().ok_or(ApiError::Unauthorized)?;

    let transaction_date = request
        .transaction_date
        .ok_or_else(|| ApiError::Validation("Transaction date is required".to_string()))?;
    let payment_method = parse_payment_method(&request.payment_method).ok_or_else(|| {
        ApiError::Validation(format!(
            "Unknown payment method '{}'",
            request.payment_method
        ))
    })?;

    let repo = SettlementRepository::new(state.pool.clone());
    let balance = repo.get_balance(landlord_id, id.into()).await?;

    let collect = CollectAdvance {
        months: request.months,
        amount: Money::new(request.amount, balance.monthly_rent.currency()),
        transaction_date,
        payment_method,
        reference_number: request.reference_number,
        notes: request.notes,
    };

    let (balance, entry) = repo
        .collect_advance(landlord_id, id.into(), collect)
        .await?;

    Ok(Json(CollectAdvanceResponse {
        balance: (&balance).into(),
        ledger_entry: (&entry).into(),
    }))
}

/// Previews advance-rent coverage on a date
pub async fn check_coverage(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Query(query): Query<CoverageQuery>,
) -> Result<Json<CoverageResponse>, ApiError> {
    let landlord_id = claims.landlord_id().ok_or(ApiError::Unauthorized)?;
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let status = SettlementRepository::new(state.pool.clone())
        .check_coverage(landlord_id, id.into(), as_of)
        .await?;

    Ok(Json((&status).into()))
}

/// Retroactively applies the balance to the lease's existing invoices
pub async fn retroactively_apply(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<RetroactiveResponse>, ApiError> {
    let landlord_id = claims.landlord_id().ok_or(ApiError::Unauthorized)?;

    let outcome = SettlementRepository::new(state.pool.clone())
        .retroactively_apply(landlord_id, id.into())
        .await?;

    Ok(Json((&outcome).into()))
}

/// Lists the lease's cash-collection audit trail
pub async fn list_ledger_entries(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<LedgerEntryResponse>>, ApiError> {
    let landlord_id = claims.landlord_id().ok_or(ApiError::Unauthorized)?;

    let entries = LedgerRepository::new(state.pool.clone())
        .list_for_lease(landlord_id, id.into())
        .await?;

    Ok(Json(entries.iter().map(Into::into).collect()))
}
