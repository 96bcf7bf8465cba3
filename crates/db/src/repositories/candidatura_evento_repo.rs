//! Repository for the `candidatura_eventos` status history.

use sqlx::PgPool;
use vagas_core::types::DbId;

use crate::models::candidatura::CandidaturaEvento;

/// Read access to application history. Rows are written by
/// [`CandidaturaRepo`](super::CandidaturaRepo).
pub struct CandidaturaEventoRepo;

impl CandidaturaEventoRepo {
    /// Events for one application, oldest first.
    pub async fn list_by_candidatura(
        pool: &PgPool,
        candidatura_id: DbId,
    ) -> Result<Vec<CandidaturaEvento>, sqlx::Error> {
        sqlx::query_as::<_, CandidaturaEvento>(
            "SELECT ev.id, ev.candidatura_id,
                    sa.code AS status_anterior, sn.code AS status_novo,
                    ev.autor_id, u.nome AS autor_nome, ev.observacao, ev.created_at
             FROM candidatura_eventos ev
             LEFT JOIN candidatura_statuses sa ON sa.id = ev.status_anterior
             JOIN candidatura_statuses sn ON sn.id = ev.status_novo
             LEFT JOIN usuarios u ON u.id = ev.autor_id
             WHERE ev.candidatura_id = $1
             ORDER BY ev.created_at, ev.id",
        )
        .bind(candidatura_id)
        .fetch_all(pool)
        .await
    }
}
