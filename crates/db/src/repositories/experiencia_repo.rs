//! Repository for the `experiencias_profissionais` table.

use sqlx::PgPool;
use vagas_core::types::DbId;

use crate::models::curriculo::{Experiencia, ExperienciaInput};

const COLUMNS: &str = "id, curriculo_id, empresa, cargo, descricao, data_inicio, data_fim, \
                       atual, created_at, updated_at";

/// Work history entries, scoped by `curriculo_id`.
pub struct ExperienciaRepo;

impl ExperienciaRepo {
    /// Current job first, then most recent start date.
    pub async fn list_by_curriculo(
        pool: &PgPool,
        curriculo_id: DbId,
    ) -> Result<Vec<Experiencia>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM experiencias_profissionais
             WHERE curriculo_id = $1
             ORDER BY atual DESC, data_inicio DESC, id DESC"
        );
        sqlx::query_as::<_, Experiencia>(&query)
            .bind(curriculo_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_scoped(
        pool: &PgPool,
        id: DbId,
        curriculo_id: DbId,
    ) -> Result<Option<Experiencia>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM experiencias_profissionais WHERE id = $1 AND curriculo_id = $2"
        );
        sqlx::query_as::<_, Experiencia>(&query)
            .bind(id)
            .bind(curriculo_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        curriculo_id: DbId,
        input: &ExperienciaInput,
    ) -> Result<Experiencia, sqlx::Error> {
        let query = format!(
            "INSERT INTO experiencias_profissionais
                (curriculo_id, empresa, cargo, descricao, data_inicio, data_fim, atual)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Experiencia>(&query)
            .bind(curriculo_id)
            .bind(&input.empresa)
            .bind(&input.cargo)
            .bind(&input.descricao)
            .bind(input.data_inicio)
            .bind(input.data_fim)
            .bind(input.atual)
            .fetch_one(pool)
            .await
    }

    /// Replace every field of an entry. `None` if it is not in this résumé.
    pub async fn update_scoped(
        pool: &PgPool,
        id: DbId,
        curriculo_id: DbId,
        input: &ExperienciaInput,
    ) -> Result<Option<Experiencia>, sqlx::Error> {
        let query = format!(
            "UPDATE experiencias_profissionais SET
                empresa = $3, cargo = $4, descricao = $5,
                data_inicio = $6, data_fim = $7, atual = $8
             WHERE id = $1 AND curriculo_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Experiencia>(&query)
            .bind(id)
            .bind(curriculo_id)
            .bind(&input.empresa)
            .bind(&input.cargo)
            .bind(&input.descricao)
            .bind(input.data_inicio)
            .bind(input.data_fim)
            .bind(input.atual)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete_scoped(
        pool: &PgPool,
        id: DbId,
        curriculo_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM experiencias_profissionais WHERE id = $1 AND curriculo_id = $2",
        )
        .bind(id)
        .bind(curriculo_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
