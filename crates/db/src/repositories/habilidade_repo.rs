//! Repository for the `habilidades` table.
//!
//! Skill names are unique per résumé (`uq_habilidades_curriculo_nome`).

use sqlx::PgPool;
use vagas_core::types::DbId;

use crate::models::curriculo::{Habilidade, HabilidadeInput};

const COLUMNS: &str = "id, curriculo_id, nome, nivel, created_at, updated_at";

pub struct HabilidadeRepo;

impl HabilidadeRepo {
    pub async fn list_by_curriculo(
        pool: &PgPool,
        curriculo_id: DbId,
    ) -> Result<Vec<Habilidade>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM habilidades WHERE curriculo_id = $1 ORDER BY nome");
        sqlx::query_as::<_, Habilidade>(&query)
            .bind(curriculo_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_scoped(
        pool: &PgPool,
        id: DbId,
        curriculo_id: DbId,
    ) -> Result<Option<Habilidade>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM habilidades WHERE id = $1 AND curriculo_id = $2");
        sqlx::query_as::<_, Habilidade>(&query)
            .bind(id)
            .bind(curriculo_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        curriculo_id: DbId,
        input: &HabilidadeInput,
    ) -> Result<Habilidade, sqlx::Error> {
        let query = format!(
            "INSERT INTO habilidades (curriculo_id, nome, nivel)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Habilidade>(&query)
            .bind(curriculo_id)
            .bind(input.nome.trim())
            .bind(&input.nivel)
            .fetch_one(pool)
            .await
    }

    pub async fn update_scoped(
        pool: &PgPool,
        id: DbId,
        curriculo_id: DbId,
        input: &HabilidadeInput,
    ) -> Result<Option<Habilidade>, sqlx::Error> {
        let query = format!(
            "UPDATE habilidades SET nome = $3, nivel = $4
             WHERE id = $1 AND curriculo_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Habilidade>(&query)
            .bind(id)
            .bind(curriculo_id)
            .bind(input.nome.trim())
            .bind(&input.nivel)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete_scoped(
        pool: &PgPool,
        id: DbId,
        curriculo_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM habilidades WHERE id = $1 AND curriculo_id = $2")
            .bind(id)
            .bind(curriculo_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
