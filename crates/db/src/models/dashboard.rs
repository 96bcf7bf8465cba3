//! Aggregate rows behind the role-specific dashboards.

use serde::Serialize;
use sqlx::FromRow;

/// A `GROUP BY` count keyed by a status code or role name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub total: i64,
}

/// Platform-wide totals for the admin dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlatformTotals {
    pub usuarios: i64,
    pub empresas: i64,
    pub vagas: i64,
    pub candidaturas: i64,
}
