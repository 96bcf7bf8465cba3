//! Repository for the `candidaturas` table.
//!
//! Every status change writes a `candidatura_eventos` row in the same
//! transaction (or statement) as the update.

use sqlx::PgPool;
use vagas_core::candidatura::CandidaturaStatus;
use vagas_core::types::DbId;

use crate::models::candidatura::{Candidatura, CandidaturaDetalhe};
use crate::models::dashboard::StatusCount;

const COLUMNS: &str = "id, usuario_id, vaga_id, status_id, mensagem, visualizada_em, \
                       created_at, updated_at";

const DETALHE_SELECT: &str = "SELECT c.id, c.usuario_id, c.vaga_id, c.status_id, c.mensagem, \
        c.visualizada_em, c.created_at, c.updated_at, \
        cs.code AS status, v.titulo AS vaga_titulo, v.empresa_id, e.nome AS empresa_nome, \
        u.nome AS candidato_nome, u.email AS candidato_email \
    FROM candidaturas c \
    JOIN candidatura_statuses cs ON cs.id = c.status_id \
    JOIN vagas v ON v.id = c.vaga_id \
    JOIN empresas e ON e.id = v.empresa_id \
    JOIN usuarios u ON u.id = c.usuario_id";

/// Optional narrowing applied by the listing methods.
#[derive(Debug, Clone, Copy, Default)]
struct Scope {
    usuario_id: Option<DbId>,
    empresa_id: Option<DbId>,
    vaga_id: Option<DbId>,
}

/// Provides application storage and the status workflow.
pub struct CandidaturaRepo;

impl CandidaturaRepo {
    /// Insert an `INSCRITO` application and its first history event.
    ///
    /// A second application to the same posting fails with a unique
    /// violation on `uq_candidaturas_usuario_vaga`.
    pub async fn create(
        pool: &PgPool,
        usuario_id: DbId,
        vaga_id: DbId,
        mensagem: Option<&str>,
    ) -> Result<Candidatura, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO candidaturas (usuario_id, vaga_id, status_id, mensagem)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let candidatura = sqlx::query_as::<_, Candidatura>(&query)
            .bind(usuario_id)
            .bind(vaga_id)
            .bind(CandidaturaStatus::Inscrito.id())
            .bind(mensagem)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO candidatura_eventos (candidatura_id, status_anterior, status_novo, autor_id)
             VALUES ($1, NULL, $2, $3)",
        )
        .bind(candidatura.id)
        .bind(CandidaturaStatus::Inscrito.id())
        .bind(usuario_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(candidatura)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Candidatura>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM candidaturas WHERE id = $1");
        sqlx::query_as::<_, Candidatura>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Application with status code, posting title, company and applicant.
    pub async fn find_detalhe(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CandidaturaDetalhe>, sqlx::Error> {
        let query = format!("{DETALHE_SELECT} WHERE c.id = $1");
        sqlx::query_as::<_, CandidaturaDetalhe>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, usuario_id: DbId, vaga_id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM candidaturas WHERE usuario_id = $1 AND vaga_id = $2)",
        )
        .bind(usuario_id)
        .bind(vaga_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// A candidate's own applications.
    pub async fn list_by_usuario(
        pool: &PgPool,
        usuario_id: DbId,
        status: Option<CandidaturaStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CandidaturaDetalhe>, sqlx::Error> {
        let scope = Scope { usuario_id: Some(usuario_id), ..Scope::default() };
        Self::list_scoped(pool, scope, status, Some(limit), offset).await
    }

    /// Every application to a company's postings.
    pub async fn list_by_empresa(
        pool: &PgPool,
        empresa_id: DbId,
        status: Option<CandidaturaStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CandidaturaDetalhe>, sqlx::Error> {
        let scope = Scope { empresa_id: Some(empresa_id), ..Scope::default() };
        Self::list_scoped(pool, scope, status, Some(limit), offset).await
    }

    /// Every applicant of one posting, unpaged.
    pub async fn list_by_vaga(
        pool: &PgPool,
        vaga_id: DbId,
    ) -> Result<Vec<CandidaturaDetalhe>, sqlx::Error> {
        let scope = Scope { vaga_id: Some(vaga_id), ..Scope::default() };
        Self::list_scoped(pool, scope, None, None, 0).await
    }

    pub async fn list_all(
        pool: &PgPool,
        status: Option<CandidaturaStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CandidaturaDetalhe>, sqlx::Error> {
        Self::list_scoped(pool, Scope::default(), status, Some(limit), offset).await
    }

    /// `LIMIT NULL` means no limit in PostgreSQL.
    async fn list_scoped(
        pool: &PgPool,
        scope: Scope,
        status: Option<CandidaturaStatus>,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<CandidaturaDetalhe>, sqlx::Error> {
        let query = format!(
            "{DETALHE_SELECT}
             WHERE ($1::BIGINT IS NULL OR c.usuario_id = $1)
               AND ($2::BIGINT IS NULL OR v.empresa_id = $2)
               AND ($3::BIGINT IS NULL OR c.vaga_id = $3)
               AND ($4::SMALLINT IS NULL OR c.status_id = $4)
             ORDER BY c.created_at DESC, c.id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, CandidaturaDetalhe>(&query)
            .bind(scope.usuario_id)
            .bind(scope.empresa_id)
            .bind(scope.vaga_id)
            .bind(status.map(CandidaturaStatus::id))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Move an application from `from` to `to` and record the event.
    ///
    /// The update only applies while the row is still in `from`, so a
    /// concurrent change makes this return `None` instead of overwriting it.
    /// With `mark_viewed`, `visualizada_em` is stamped if still empty.
    /// Transition legality is the caller's job.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        from: CandidaturaStatus,
        to: CandidaturaStatus,
        autor_id: DbId,
        observacao: Option<&str>,
        mark_viewed: bool,
    ) -> Result<Option<Candidatura>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE candidaturas SET
                status_id = $3,
                visualizada_em = CASE WHEN $4::BOOLEAN THEN COALESCE(visualizada_em, NOW())
                                      ELSE visualizada_em END
             WHERE id = $1 AND status_id = $2
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Candidatura>(&query)
            .bind(id)
            .bind(from.id())
            .bind(to.id())
            .bind(mark_viewed)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(candidatura) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO candidatura_eventos
                (candidatura_id, status_anterior, status_novo, autor_id, observacao)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(from.id())
        .bind(to.id())
        .bind(autor_id)
        .bind(observacao)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(candidatura))
    }

    /// Flip every `INSCRITO` application of a posting to `VISUALIZADA`,
    /// logging one event each. Returns how many changed.
    pub async fn mark_visualizadas(
        pool: &PgPool,
        vaga_id: DbId,
        autor_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "WITH changed AS (
                UPDATE candidaturas SET status_id = $3
                WHERE vaga_id = $1 AND status_id = $2
                RETURNING id
             )
             INSERT INTO candidatura_eventos (candidatura_id, status_anterior, status_novo, autor_id)
             SELECT id, $2, $3, $4 FROM changed",
        )
        .bind(vaga_id)
        .bind(CandidaturaStatus::Inscrito.id())
        .bind(CandidaturaStatus::Visualizada.id())
        .bind(autor_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Application counts per status code, optionally for one candidate or
    /// one company. Statuses with no rows are omitted.
    pub async fn count_by_status(
        pool: &PgPool,
        usuario_id: Option<DbId>,
        empresa_id: Option<DbId>,
    ) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT cs.code AS status, COUNT(*) AS total
             FROM candidaturas c
             JOIN candidatura_statuses cs ON cs.id = c.status_id
             JOIN vagas v ON v.id = c.vaga_id
             WHERE ($1::BIGINT IS NULL OR c.usuario_id = $1)
               AND ($2::BIGINT IS NULL OR v.empresa_id = $2)
             GROUP BY cs.id, cs.code
             ORDER BY cs.id",
        )
        .bind(usuario_id)
        .bind(empresa_id)
        .fetch_all(pool)
        .await
    }
}
