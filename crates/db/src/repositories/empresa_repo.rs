//! Repository for the `empresas` table.

use sqlx::{PgExecutor, PgPool};
use vagas_core::types::DbId;

use crate::models::empresa::{CreateEmpresa, Empresa, UpdateEmpresa};

const COLUMNS: &str = "id, nome, cnpj, descricao, site, setor, cidade, estado, \
                       created_at, updated_at";

/// Provides CRUD operations for companies.
pub struct EmpresaRepo;

impl EmpresaRepo {
    /// Insert a company. `cnpj` must already be normalized to digits.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateEmpresa,
        cnpj: &str,
    ) -> Result<Empresa, sqlx::Error> {
        let query = format!(
            "INSERT INTO empresas (nome, cnpj, descricao, site, setor, cidade, estado)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Empresa>(&query)
            .bind(&input.nome)
            .bind(cnpj)
            .bind(&input.descricao)
            .bind(&input.site)
            .bind(&input.setor)
            .bind(&input.cidade)
            .bind(&input.estado)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Empresa>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM empresas WHERE id = $1");
        sqlx::query_as::<_, Empresa>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a company by normalized CNPJ.
    pub async fn find_by_cnpj<'e>(
        executor: impl PgExecutor<'e>,
        cnpj: &str,
    ) -> Result<Option<Empresa>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM empresas WHERE cnpj = $1");
        sqlx::query_as::<_, Empresa>(&query)
            .bind(cnpj)
            .fetch_optional(executor)
            .await
    }

    /// List companies alphabetically.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Empresa>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM empresas ORDER BY nome, id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Empresa>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a company. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEmpresa,
    ) -> Result<Option<Empresa>, sqlx::Error> {
        let query = format!(
            "UPDATE empresas SET
                nome = COALESCE($2, nome),
                descricao = COALESCE($3, descricao),
                site = COALESCE($4, site),
                setor = COALESCE($5, setor),
                cidade = COALESCE($6, cidade),
                estado = COALESCE($7, estado)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Empresa>(&query)
            .bind(id)
            .bind(&input.nome)
            .bind(&input.descricao)
            .bind(&input.site)
            .bind(&input.setor)
            .bind(&input.cidade)
            .bind(&input.estado)
            .fetch_optional(pool)
            .await
    }

    /// Delete a company. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while postings or recruiters
    /// still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM empresas WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
