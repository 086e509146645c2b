//! Ledger entry repository
//!
//! Read-only access to the append-only audit trail. Inserts happen inside
//! settlement transactions; nothing here ever updates or deletes a row.

use sqlx::PgPool;

use core_kernel::{LeaseId, PartyId};
use domain_ledger::LedgerEntry;

use crate::error::DatabaseError;
use super::rows::LedgerEntryRow;

/// Repository for ledger entries
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists a lease's entries in collection order
    pub async fn list_for_lease(
        &self,
        landlord_id: PartyId,
        lease_id: LeaseId,
    ) -> Result<Vec<LedgerEntry>, DatabaseError> {
        let rows = sqlx::query_as::<_, LedgerEntryRow>(
            r#"
            SELECT e.*
            FROM ledger_entries e
            JOIN leases l ON l.lease_id = e.lease_id
            WHERE e.lease_id = $1 AND l.landlord_id = $2
            ORDER BY e.transaction_date ASC, e.created_at ASC
            "#,
        )
        .bind(lease_id.as_uuid())
        .bind(landlord_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_domain()).collect()
    }
}
