//! Lease handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{Currency, Money};
use domain_lease::Lease;
use infra_db::{LeaseRepository, SettlementRepository};

use crate::auth::Claims;
use crate::dto::lease::*;
use crate::{error::ApiError, AppState};

/// Creates a lease together with its empty advance balance
pub async fn create_lease(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateLeaseRequest>,
) -> Result<Json<LeaseResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let landlord_id = claims.landlord_id().ok_or(ApiError::Unauthorized)?;

    let currency: Currency = request
        .currency
        .parse()
        .map_err(|_| ApiError::Validation(format!("Unknown currency '{}'", request.currency)))?;

    let lease = Lease::draft(
        request.unit_id.into(),
        landlord_id,
        request.tenant_id.into(),
        Money::new(request.monthly_rent, currency),
        Money::new(request.deposit.unwrap_or_default(), currency),
        request.start_date,
        request.end_date,
    )
    .map_err(|e| ApiError::Validation(e.to_string()))?;

    LeaseRepository::new(state.pool.clone())
        .create_lease(&lease)
        .await?;

    let balance = SettlementRepository::new(state.pool.clone())
        .get_balance(landlord_id, lease.id)
        .await?;

    Ok(Json(LeaseResponse::from_parts(&lease, &balance)))
}

/// Lists the caller's leases
pub async fn list_leases(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<LeaseSummaryResponse>>, ApiError> {
    let landlord_id = claims.landlord_id().ok_or(ApiError::Unauthorized)?;

    let leases = LeaseRepository::new(state.pool.clone())
        .list_leases(landlord_id)
        .await?;

    Ok(Json(leases.iter().map(Into::into).collect()))
}

/// Gets one lease with its advance-rent state
pub async fn get_lease(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<LeaseResponse>, ApiError> {
    let landlord_id = claims.landlord_id().ok_or(ApiError::Unauthorized)?;
    let lease_id = id.into();

    let lease = LeaseRepository::new(state.pool.clone())
        .get_lease(landlord_id, lease_id)
        .await?;
    let balance = SettlementRepository::new(state.pool.clone())
        .get_balance(landlord_id, lease_id)
        .await?;

    Ok(Json(LeaseResponse::from_parts(&lease, &balance)))
}
