//! Invoice repository
//!
//! Owns invoice issuance and reads. Issuance is the settlement hook: when
//! the lease holds unspent advance rent, the freshly created invoice is
//! settled synchronously inside the same transaction, so callers never see
//! an unsettled invoice on a lease with prepaid balance.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{InvoiceId, LeaseId, Money, PartyId};
use domain_ledger::settlement;
use domain_ledger::RentInvoice;

use crate::error::DatabaseError;
use super::rows::{InvoiceRow, LeaseRow};
use super::settlement::{insert_invoice, lock_balance, persist_balance, persist_invoice_settlement};

/// Data for issuing a new invoice
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Rent to bill; defaults to the lease's monthly rent when None
    pub rent_amount: Option<Money>,
    /// Late fee; defaults to zero
    pub late_fee: Option<Money>,
}

/// Repository for rent invoices
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Issues an invoice for a lease, settling it against any prepaid balance
    ///
    /// Invoice insert, settlement, and balance update commit as one unit.
    #[instrument(skip(self, new_invoice), fields(lease = %lease_id))]
    pub async fn create_invoice(
        &self,
        landlord_id: PartyId,
        lease_id: LeaseId,
        new_invoice: NewInvoice,
    ) -> Result<RentInvoice, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let lease = sqlx::query_as::<_, LeaseRow>(
            "SELECT * FROM leases WHERE lease_id = $1 AND landlord_id = $2",
        )
        .bind(lease_id.as_uuid())
        .bind(landlord_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Lease", lease_id))?
        .into_domain()?;

        let rent_amount = new_invoice.rent_amount.unwrap_or(lease.monthly_rent);
        let late_fee = new_invoice
            .late_fee
            .unwrap_or_else(|| Money::zero(rent_amount.currency()));

        let mut invoice = RentInvoice::new(
            lease.id,
            new_invoice.invoice_date,
            new_invoice.due_date,
            rent_amount,
            late_fee,
        );

        let mut balance = lock_balance(&mut tx, landlord_id, lease_id).await?;
        if balance.remaining().is_positive() {
            let expected_version = balance.version;
            settlement::apply_to_invoice(&mut balance, &mut invoice)?;
            persist_balance(&mut tx, &balance, expected_version).await?;
        }

        insert_invoice(&mut tx, &invoice).await?;
        tx.commit().await?;

        Ok(invoice)
    }

    /// Fetches one invoice, scoped to a landlord
    pub async fn get_invoice(
        &self,
        landlord_id: PartyId,
        invoice_id: InvoiceId,
    ) -> Result<RentInvoice, DatabaseError> {
        let row = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT i.*
            FROM rent_invoices i
            JOIN leases l ON l.lease_id = i.lease_id
            WHERE i.invoice_id = $1 AND l.landlord_id = $2
            "#,
        )
        .bind(invoice_id.as_uuid())
        .bind(landlord_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Invoice", invoice_id))?;

        row.into_domain()
    }

    /// Lists a lease's invoices in issue order
    pub async fn list_for_lease(
        &self,
        landlord_id: PartyId,
        lease_id: LeaseId,
    ) -> Result<Vec<RentInvoice>, DatabaseError> {
        let rows = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT i.*
            FROM rent_invoices i
            JOIN leases l ON l.lease_id = i.lease_id
            WHERE i.lease_id = $1 AND l.landlord_id = $2
            ORDER BY i.invoice_date ASC, i.invoice_id ASC
            "#,
        )
        .bind(lease_id.as_uuid())
        .bind(landlord_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_domain()).collect()
    }

    /// Cancels an invoice, excluding it from settlement permanently
    #[instrument(skip(self), fields(invoice = %invoice_id))]
    pub async fn cancel_invoice(
        &self,
        landlord_id: PartyId,
        invoice_id: InvoiceId,
    ) -> Result<RentInvoice, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT i.*
            FROM rent_invoices i
            JOIN leases l ON l.lease_id = i.lease_id
            WHERE i.invoice_id = $1 AND l.landlord_id = $2
            FOR UPDATE OF i
            "#,
        )
        .bind(invoice_id.as_uuid())
        .bind(landlord_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Invoice", invoice_id))?;

        let mut invoice = row.into_domain()?;
        invoice.cancel()?;

        persist_invoice_settlement(&mut tx, &invoice).await?;
        tx.commit().await?;

        Ok(invoice)
    }
}
