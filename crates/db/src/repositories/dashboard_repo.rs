//! Aggregate queries for the role-specific dashboards.

use sqlx::PgPool;
use vagas_core::types::DbId;

use crate::models::dashboard::{PlatformTotals, StatusCount};

pub struct DashboardRepo;

impl DashboardRepo {
    /// Posting counts per status name for one company.
    pub async fn vagas_by_status(
        pool: &PgPool,
        empresa_id: DbId,
    ) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT s.name AS status, COUNT(*) AS total
             FROM vagas v
             JOIN vaga_statuses s ON s.id = v.status_id
             WHERE v.empresa_id = $1
             GROUP BY s.id, s.name
             ORDER BY s.id",
        )
        .bind(empresa_id)
        .fetch_all(pool)
        .await
    }

    /// Active user counts per role name.
    pub async fn usuarios_by_role(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT r.name AS status, COUNT(u.id) AS total
             FROM roles r
             LEFT JOIN usuarios u ON u.role_id = r.id AND u.is_active
             GROUP BY r.id, r.name
             ORDER BY r.id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn totals(pool: &PgPool) -> Result<PlatformTotals, sqlx::Error> {
        sqlx::query_as::<_, PlatformTotals>(
            "SELECT
                (SELECT COUNT(*) FROM usuarios) AS usuarios,
                (SELECT COUNT(*) FROM empresas) AS empresas,
                (SELECT COUNT(*) FROM vagas) AS vagas,
                (SELECT COUNT(*) FROM candidaturas) AS candidaturas",
        )
        .fetch_one(pool)
        .await
    }
}
