//! Lease repository
//!
//! Creating a lease also opens its (empty) advance balance in the same
//! transaction; the balance row exists from the moment the lease does.

use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{LeaseId, PartyId};
use domain_lease::Lease;
use domain_ledger::AdvanceBalance;

use crate::error::DatabaseError;
use super::rows::{lease_status_str, LeaseRow};

/// Repository for lease agreements
#[derive(Debug, Clone)]
pub struct LeaseRepository {
    pool: PgPool,
}

impl LeaseRepository {
    /// Creates a new LeaseRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a new lease together with its empty advance balance
    #[instrument(skip(self, lease), fields(lease = %lease.id))]
    pub async fn create_lease(&self, lease: &Lease) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO leases (
                lease_id, unit_id, landlord_id, tenant_id, monthly_rent,
                deposit, currency, start_date, end_date, status,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(lease.id.as_uuid())
        .bind(lease.unit_id.as_uuid())
        .bind(lease.landlord_id.as_uuid())
        .bind(lease.tenant_id.as_uuid())
        .bind(lease.monthly_rent.amount())
        .bind(lease.deposit.amount())
        .bind(lease.monthly_rent.currency().code())
        .bind(lease.start_date)
        .bind(lease.end_date)
        .bind(lease_status_str(lease.status))
        .bind(lease.created_at)
        .bind(lease.updated_at)
        .execute(&mut *tx)
        .await?;

        let balance = AdvanceBalance::open(lease.id, lease.monthly_rent, lease.start_date);
        sqlx::query(
            r#"
            INSERT INTO advance_balances (
                lease_id, monthly_rent, currency, lease_start,
                advance_months, advance_amount, advance_used,
                advance_collected_date, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(balance.lease_id.as_uuid())
        .bind(balance.monthly_rent.amount())
        .bind(balance.monthly_rent.currency().code())
        .bind(balance.lease_start)
        .bind(balance.advance_months as i32)
        .bind(balance.advance_amount.amount())
        .bind(balance.advance_used.amount())
        .bind(balance.advance_collected_date)
        .bind(balance.version)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Fetches one lease, scoped to a landlord
    pub async fn get_lease(
        &self,
        landlord_id: PartyId,
        lease_id: LeaseId,
    ) -> Result<Lease, DatabaseError> {
        let row = sqlx::query_as::<_, LeaseRow>(
            "SELECT * FROM leases WHERE lease_id = $1 AND landlord_id = $2",
        )
        .bind(lease_id.as_uuid())
        .bind(landlord_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Lease", lease_id))?;

        row.into_domain()
    }

    /// Lists a landlord's leases, newest first
    pub async fn list_leases(&self, landlord_id: PartyId) -> Result<Vec<Lease>, DatabaseError> {
        let rows = sqlx::query_as::<_, LeaseRow>(
            "SELECT * FROM leases WHERE landlord_id = $1 ORDER BY created_at DESC",
        )
        .bind(landlord_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_domain()).collect()
    }

    /// Updates a lease's status after a domain transition
    pub async fn update_status(&self, lease: &Lease) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE leases SET status = $2, updated_at = $3 WHERE lease_id = $1",
        )
        .bind(lease.id.as_uuid())
        .bind(lease_status_str(lease.status))
        .bind(lease.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Lease", lease.id));
        }

        Ok(())
    }
}
