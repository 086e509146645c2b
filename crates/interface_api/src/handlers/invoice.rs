//! Invoice handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use core_kernel::Money;
use infra_db::{InvoiceRepository, NewInvoice, SettlementRepository};

use crate::auth::Claims;
use crate::dto::invoice::*;
use crate::{error::ApiError, AppState};

/// Issues an invoice, settling it against any prepaid balance
pub async fn create_invoice(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let landlord_id = claims.landlord_id().ok_or(ApiError::Unauthorized)?;

    if request.due_date < request.invoice_date {
        return Err(ApiError::Validation(
            "Due date cannot precede the invoice date".to_string(),
        ));
    }

    // Amounts arrive as bare decimals; they take the lease's currency.
    let currency = SettlementRepository::new(state.pool.clone())
        .get_balance(landlord_id, id.into())
        .await?
        .monthly_rent
        .currency();

    let new_invoice = NewInvoice {
        invoice_date: request.invoice_date,
        due_date: request.due_date,
        rent_amount: request.rent_amount.map(|a| Money::new(a, currency)),
        late_fee: request.late_fee.map(|a| Money::new(a, currency)),
    };

    let invoice = InvoiceRepository::new(state.pool.clone())
        .create_invoice(landlord_id, id.into(), new_invoice)
        .await?;

    Ok(Json((&invoice).into()))
}

/// Lists a lease's invoices
pub async fn list_invoices(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<InvoiceResponse>>, ApiError> {
    let landlord_id = claims.landlord_id().ok_or(ApiError::Unauthorized)?;

    let invoices = InvoiceRepository::new(state.pool.clone())
        .list_for_lease(landlord_id, id.into())
        .await?;

    Ok(Json(invoices.iter().map(Into::into).collect()))
}

/// Cancels an invoice
pub async fn cancel_invoice(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let landlord_id = claims.landlord_id().ok_or(ApiError::Unauthorized)?;

    let invoice = InvoiceRepository::new(state.pool.clone())
        .cancel_invoice(landlord_id, id.into())
        .await?;

    Ok(Json((&invoice).into()))
}
