//! Settlement repository
//!
//! Wraps every advance-rent engine operation in a single transaction. The
//! lease's balance row is locked `FOR UPDATE` for the duration of the
//! read-modify-write, and the balance update is guarded by the optimistic
//! version column; a guard miss surfaces as `VersionConflict` and the caller
//! retries the whole operation from a fresh read.

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use core_kernel::{InvoiceId, LeaseId, PartyId};
use domain_ledger::settlement::{self, Application, CollectAdvance, CoverageStatus, RetroactiveOutcome};
use domain_ledger::{AdvanceBalance, LedgerEntry, RentInvoice};

use crate::error::DatabaseError;
use super::rows::{
    entry_category_str, entry_status_str, entry_type_str, invoice_status_str,
    payment_method_str, BalanceRow, InvoiceRow,
};

/// Repository for the advance-rent settlement engine
///
/// All mutating methods commit balance, invoice, and ledger-entry changes
/// as one atomic unit; a mid-operation failure leaves nothing applied.
#[derive(Debug, Clone)]
pub struct SettlementRepository {
    pool: PgPool,
}

impl SettlementRepository {
    /// Creates a new SettlementRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Collects advance rent for a lease
    ///
    /// Validates and credits the balance, appends the ledger entry, and
    /// commits both together.
    #[instrument(skip(self, collect), fields(lease = %lease_id))]
    pub async fn collect_advance(
        &self,
        landlord_id: PartyId,
        lease_id: LeaseId,
        collect: CollectAdvance,
    ) -> Result<(AdvanceBalance, LedgerEntry), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let mut balance = lock_balance(&mut tx, landlord_id, lease_id).await?;
        let expected_version = balance.version;

        let entry = settlement::collect_advance(&mut balance, collect)?;

        persist_balance(&mut tx, &balance, expected_version).await?;
        insert_entry(&mut tx, &entry).await?;

        tx.commit().await?;

        balance.version = expected_version + 1;
        Ok((balance, entry))
    }

    /// Settles a single invoice against the lease's prepaid balance
    #[instrument(skip(self), fields(invoice = %invoice_id))]
    pub async fn apply_to_invoice(
        &self,
        landlord_id: PartyId,
        invoice_id: InvoiceId,
    ) -> Result<(RentInvoice, Application), DatabaseError> {
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

        let mut balance = lock_balance(&mut tx, landlord_id, invoice.lease_id).await?;
        let expected_version = balance.version;

        let application = settlement::apply_to_invoice(&mut balance, &mut invoice)?;

        if application.applied.is_positive() {
            persist_balance(&mut tx, &balance, expected_version).await?;
            persist_invoice_settlement(&mut tx, &invoice).await?;
        }

        tx.commit().await?;
        Ok((invoice, application))
    }

    /// Retroactively settles a lease's existing invoices, oldest first
    ///
    /// The whole batch runs in one transaction: either every application in
    /// the iteration commits or none of them do.
    #[instrument(skip(self), fields(lease = %lease_id))]
    pub async fn retroactively_apply(
        &self,
        landlord_id: PartyId,
        lease_id: LeaseId,
    ) -> Result<RetroactiveOutcome, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let mut balance = lock_balance(&mut tx, landlord_id, lease_id).await?;
        let expected_version = balance.version;

        let rows = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT *
            FROM rent_invoices
            WHERE lease_id = $1 AND status <> 'cancelled'
            ORDER BY invoice_date ASC, invoice_id ASC
            FOR UPDATE
            "#,
        )
        .bind(lease_id.as_uuid())
        .fetch_all(&mut *tx)
        .await?;

        let mut invoices = rows
            .into_iter()
            .map(|r| r.into_domain())
            .collect::<Result<Vec<_>, _>>()?;

        let outcome = settlement::retroactively_apply(&mut balance, &mut invoices)?;

        if outcome.processed > 0 {
            persist_balance(&mut tx, &balance, expected_version).await?;
            for touched in &outcome.invoices {
                let invoice = invoices
                    .iter()
                    .find(|i| i.id == touched.invoice_id)
                    .expect("settled invoice came from this batch");
                persist_invoice_settlement(&mut tx, invoice).await?;
            }
        }

        tx.commit().await?;
        Ok(outcome)
    }

    /// Previews advance-rent coverage for a date; read-only
    pub async fn check_coverage(
        &self,
        landlord_id: PartyId,
        lease_id: LeaseId,
        as_of: NaiveDate,
    ) -> Result<CoverageStatus, DatabaseError> {
        let balance = self.get_balance(landlord_id, lease_id).await?;
        Ok(settlement::check_coverage(&balance, as_of))
    }

    /// Loads a lease's balance without locking it
    pub async fn get_balance(
        &self,
        landlord_id: PartyId,
        lease_id: LeaseId,
    ) -> Result<AdvanceBalance, DatabaseError> {
        let row = sqlx::query_as::<_, BalanceRow>(
            r#"
            SELECT b.*
            FROM advance_balances b
            JOIN leases l ON l.lease_id = b.lease_id
            WHERE b.lease_id = $1 AND l.landlord_id = $2
            "#,
        )
        .bind(lease_id.as_uuid())
        .bind(landlord_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Balance for lease", lease_id))?;

        row.into_domain()
    }
}

/// Locks a lease's balance row for the remainder of the transaction
pub(crate) async fn lock_balance(
    conn: &mut PgConnection,
    landlord_id: PartyId,
    lease_id: LeaseId,
) -> Result<AdvanceBalance, DatabaseError> {
    let row = sqlx::query_as::<_, BalanceRow>(
        r#"
        SELECT b.*
        FROM advance_balances b
        JOIN leases l ON l.lease_id = b.lease_id
        WHERE b.lease_id = $1 AND l.landlord_id = $2
        FOR UPDATE OF b
        "#,
    )
    .bind(lease_id.as_uuid())
    .bind(landlord_id.as_uuid())
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| DatabaseError::not_found("Balance for lease", lease_id))?;

    row.into_domain()
}

/// Writes a mutated balance back, guarded by the version column
pub(crate) async fn persist_balance(
    conn: &mut PgConnection,
    balance: &AdvanceBalance,
    expected_version: i64,
) -> Result<(), DatabaseError> {
    let result = sqlx::query(
        r#"
        UPDATE advance_balances
        SET advance_months = $2,
            advance_amount = $3,
            advance_used = $4,
            advance_collected_date = $5,
            version = version + 1
        WHERE lease_id = $1 AND version = $6
        "#,
    )
    .bind(balance.lease_id.as_uuid())
    .bind(balance.advance_months as i32)
    .bind(balance.advance_amount.amount())
    .bind(balance.advance_used.amount())
    .bind(balance.advance_collected_date)
    .bind(expected_version)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::version_conflict(balance.lease_id));
    }

    Ok(())
}

/// Writes an invoice's settlement fields back
pub(crate) async fn persist_invoice_settlement(
    conn: &mut PgConnection,
    invoice: &RentInvoice,
) -> Result<(), DatabaseError> {
    sqlx::query(
        r#"
        UPDATE rent_invoices
        SET advance_applied = $2,
            is_advance_covered = $3,
            status = $4,
            paid_date = $5,
            updated_at = $6
        WHERE invoice_id = $1
        "#,
    )
    .bind(invoice.id.as_uuid())
    .bind(invoice.advance_applied.amount())
    .bind(invoice.is_advance_covered)
    .bind(invoice_status_str(invoice.status))
    .bind(invoice.paid_date)
    .bind(invoice.updated_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Appends a ledger entry; entries are never updated afterwards
pub(crate) async fn insert_entry(
    conn: &mut PgConnection,
    entry: &LedgerEntry,
) -> Result<(), DatabaseError> {
    sqlx::query(
        r#"
        INSERT INTO ledger_entries (
            entry_id, lease_id, entry_type, category, amount, currency,
            status, payment_method, reference_number, transaction_date,
            notes, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(entry.id.as_uuid())
    .bind(entry.lease_id.as_uuid())
    .bind(entry_type_str(entry.entry_type))
    .bind(entry_category_str(entry.category))
    .bind(entry.amount.amount())
    .bind(entry.amount.currency().code())
    .bind(entry_status_str(entry.status))
    .bind(payment_method_str(entry.payment_method))
    .bind(entry.reference_number.as_deref())
    .bind(entry.transaction_date)
    .bind(entry.notes.as_deref())
    .bind(entry.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Inserts a freshly issued invoice row
pub(crate) async fn insert_invoice(
    conn: &mut PgConnection,
    invoice: &RentInvoice,
) -> Result<(), DatabaseError> {
    sqlx::query(
        r#"
        INSERT INTO rent_invoices (
            invoice_id, lease_id, invoice_number, invoice_date, due_date,
            rent_amount, late_fee, currency, advance_applied,
            is_advance_covered, status, paid_date, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        "#,
    )
    .bind(invoice.id.as_uuid())
    .bind(invoice.lease_id.as_uuid())
    .bind(&invoice.invoice_number)
    .bind(invoice.invoice_date)
    .bind(invoice.due_date)
    .bind(invoice.rent_amount.amount())
    .bind(invoice.late_fee.amount())
    .bind(invoice.rent_amount.currency().code())
    .bind(invoice.advance_applied.amount())
    .bind(invoice.is_advance_covered)
    .bind(invoice_status_str(invoice.status))
    .bind(invoice.paid_date)
    .bind(invoice.created_at)
    .bind(invoice.updated_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
