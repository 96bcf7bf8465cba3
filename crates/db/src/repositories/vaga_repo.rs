//! Repository for the `vagas` table.
//!
//! Scoped writes take `empresa_id: Option<DbId>`: `Some` restricts the
//! statement to that company's postings (recruiters), `None` is unrestricted
//! (admins).

use sqlx::PgPool;
use vagas_core::search::{clamp_limit, clamp_offset, ilike_pattern, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use vagas_core::types::DbId;

use crate::models::status::VagaStatus;
use crate::models::vaga::{CreateVaga, UpdateVaga, Vaga, VagaDetalhe, VagaFilter};

const COLUMNS: &str = "id, empresa_id, recrutador_id, titulo, descricao, requisitos, beneficios, \
                       tipo_contrato, modalidade, localizacao, salario_min, salario_max, \
                       status_id, data_limite, created_at, updated_at";

/// Joined select for [`VagaDetalhe`]; callers append `WHERE`/`ORDER BY`.
const DETALHE_SELECT: &str = "SELECT v.id, v.empresa_id, v.recrutador_id, v.titulo, v.descricao, \
        v.requisitos, v.beneficios, v.tipo_contrato, v.modalidade, v.localizacao, \
        v.salario_min, v.salario_max, v.status_id, v.data_limite, v.created_at, v.updated_at, \
        s.name AS status, e.nome AS empresa_nome, \
        (SELECT COUNT(*) FROM candidaturas c WHERE c.vaga_id = v.id) AS total_candidaturas \
    FROM vagas v \
    JOIN empresas e ON e.id = v.empresa_id \
    JOIN vaga_statuses s ON s.id = v.status_id";

/// Predicate over `v`: open and not past its deadline. "Today" is always the
/// database's `CURRENT_DATE`.
fn accepting_applications() -> String {
    format!(
        "v.status_id = {} AND (v.data_limite IS NULL OR v.data_limite >= CURRENT_DATE)",
        VagaStatus::Aberta.id()
    )
}

/// Provides CRUD and search for job postings.
pub struct VagaRepo;

impl VagaRepo {
    /// Insert a posting owned by `empresa_id`. New postings start `aberta`.
    pub async fn create(
        pool: &PgPool,
        empresa_id: DbId,
        recrutador_id: Option<DbId>,
        input: &CreateVaga,
    ) -> Result<Vaga, sqlx::Error> {
        let query = format!(
            "INSERT INTO vagas
                (empresa_id, recrutador_id, titulo, descricao, requisitos, beneficios,
                 tipo_contrato, modalidade, localizacao, salario_min, salario_max, data_limite)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vaga>(&query)
            .bind(empresa_id)
            .bind(recrutador_id)
            .bind(&input.titulo)
            .bind(&input.descricao)
            .bind(&input.requisitos)
            .bind(&input.beneficios)
            .bind(&input.tipo_contrato)
            .bind(&input.modalidade)
            .bind(&input.localizacao)
            .bind(input.salario_min)
            .bind(input.salario_max)
            .bind(input.data_limite)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vaga>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vagas WHERE id = $1");
        sqlx::query_as::<_, Vaga>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the posting can take a new application right now. `None` when
    /// the posting does not exist.
    pub async fn accepts_applications(pool: &PgPool, id: DbId) -> Result<Option<bool>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM vagas v WHERE v.id = $1",
            accepting_applications()
        );
        sqlx::query_scalar::<_, bool>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A posting with company name, status name and applicant count.
    pub async fn find_detalhe(pool: &PgPool, id: DbId) -> Result<Option<VagaDetalhe>, sqlx::Error> {
        let query = format!("{DETALHE_SELECT} WHERE v.id = $1");
        sqlx::query_as::<_, VagaDetalhe>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Public search over open postings whose deadline has not passed.
    ///
    /// `q` matches title or description, `localizacao` is a substring match,
    /// the other filters are exact. Paging is clamped to
    /// [`DEFAULT_PAGE_LIMIT`] / [`MAX_PAGE_LIMIT`].
    pub async fn search(pool: &PgPool, filter: &VagaFilter) -> Result<Vec<VagaDetalhe>, sqlx::Error> {
        let accepting = accepting_applications();
        let query = format!(
            "{DETALHE_SELECT}
             WHERE {accepting}
               AND ($1::TEXT IS NULL OR v.titulo ILIKE $1 OR v.descricao ILIKE $1)
               AND ($2::TEXT IS NULL OR v.modalidade = $2)
               AND ($3::TEXT IS NULL OR v.tipo_contrato = $3)
               AND ($4::TEXT IS NULL OR v.localizacao ILIKE $4)
               AND ($5::BIGINT IS NULL OR v.empresa_id = $5)
             ORDER BY v.created_at DESC, v.id DESC
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, VagaDetalhe>(&query)
            .bind(filter.q.as_deref().and_then(ilike_pattern))
            .bind(filter.modalidade.as_deref().map(str::to_uppercase))
            .bind(filter.tipo_contrato.as_deref().map(str::to_uppercase))
            .bind(filter.localizacao.as_deref().and_then(ilike_pattern))
            .bind(filter.empresa_id)
            .bind(clamp_limit(filter.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Every posting of a company in any status, newest first.
    pub async fn list_by_empresa(
        pool: &PgPool,
        empresa_id: DbId,
    ) -> Result<Vec<VagaDetalhe>, sqlx::Error> {
        let query = format!(
            "{DETALHE_SELECT} WHERE v.empresa_id = $1 ORDER BY v.created_at DESC, v.id DESC"
        );
        sqlx::query_as::<_, VagaDetalhe>(&query)
            .bind(empresa_id)
            .fetch_all(pool)
            .await
    }

    /// Apply the non-`None` fields of `input`.
    pub async fn update_scoped(
        pool: &PgPool,
        id: DbId,
        empresa_id: Option<DbId>,
        input: &UpdateVaga,
    ) -> Result<Option<Vaga>, sqlx::Error> {
        let query = format!(
            "UPDATE vagas SET
                titulo = COALESCE($3, titulo),
                descricao = COALESCE($4, descricao),
                requisitos = COALESCE($5, requisitos),
                beneficios = COALESCE($6, beneficios),
                tipo_contrato = COALESCE($7, tipo_contrato),
                modalidade = COALESCE($8, modalidade),
                localizacao = COALESCE($9, localizacao),
                salario_min = COALESCE($10, salario_min),
                salario_max = COALESCE($11, salario_max),
                data_limite = COALESCE($12, data_limite)
             WHERE id = $1 AND ($2::BIGINT IS NULL OR empresa_id = $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vaga>(&query)
            .bind(id)
            .bind(empresa_id)
            .bind(&input.titulo)
            .bind(&input.descricao)
            .bind(&input.requisitos)
            .bind(&input.beneficios)
            .bind(&input.tipo_contrato)
            .bind(&input.modalidade)
            .bind(&input.localizacao)
            .bind(input.salario_min)
            .bind(input.salario_max)
            .bind(input.data_limite)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        empresa_id: Option<DbId>,
        status: VagaStatus,
    ) -> Result<Option<Vaga>, sqlx::Error> {
        let query = format!(
            "UPDATE vagas SET status_id = $3
             WHERE id = $1 AND ($2::BIGINT IS NULL OR empresa_id = $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vaga>(&query)
            .bind(id)
            .bind(empresa_id)
            .bind(status.id())
            .fetch_optional(pool)
            .await
    }

    /// Delete a posting. Fails with a foreign-key violation while it has
    /// applications.
    pub async fn delete_scoped(
        pool: &PgPool,
        id: DbId,
        empresa_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM vagas WHERE id = $1 AND ($2::BIGINT IS NULL OR empresa_id = $2)")
                .bind(id)
                .bind(empresa_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
