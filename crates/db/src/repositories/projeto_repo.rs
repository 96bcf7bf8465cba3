//! Repository for the `projetos` table.

use sqlx::PgPool;
use vagas_core::types::DbId;

use crate::models::curriculo::{Projeto, ProjetoInput};

const COLUMNS: &str = "id, curriculo_id, nome, descricao, url, data_inicio, data_fim, \
                       created_at, updated_at";

pub struct ProjetoRepo;

impl ProjetoRepo {
    /// Undated projects sort last.
    pub async fn list_by_curriculo(
        pool: &PgPool,
        curriculo_id: DbId,
    ) -> Result<Vec<Projeto>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projetos
             WHERE curriculo_id = $1
             ORDER BY data_inicio DESC NULLS LAST, id DESC"
        );
        sqlx::query_as::<_, Projeto>(&query)
            .bind(curriculo_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_scoped(
        pool: &PgPool,
        id: DbId,
        curriculo_id: DbId,
    ) -> Result<Option<Projeto>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projetos WHERE id = $1 AND curriculo_id = $2");
        sqlx::query_as::<_, Projeto>(&query)
            .bind(id)
            .bind(curriculo_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        curriculo_id: DbId,
        input: &ProjetoInput,
    ) -> Result<Projeto, sqlx::Error> {
        let query = format!(
            "INSERT INTO projetos (curriculo_id, nome, descricao, url, data_inicio, data_fim)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Projeto>(&query)
            .bind(curriculo_id)
            .bind(&input.nome)
            .bind(&input.descricao)
            .bind(&input.url)
            .bind(input.data_inicio)
            .bind(input.data_fim)
            .fetch_one(pool)
            .await
    }

    pub async fn update_scoped(
        pool: &PgPool,
        id: DbId,
        curriculo_id: DbId,
        input: &ProjetoInput,
    ) -> Result<Option<Projeto>, sqlx::Error> {
        let query = format!(
            "UPDATE projetos SET
                nome = $3, descricao = $4, url = $5, data_inicio = $6, data_fim = $7
             WHERE id = $1 AND curriculo_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Projeto>(&query)
            .bind(id)
            .bind(curriculo_id)
            .bind(&input.nome)
            .bind(&input.descricao)
            .bind(&input.url)
            .bind(input.data_inicio)
            .bind(input.data_fim)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete_scoped(
        pool: &PgPool,
        id: DbId,
        curriculo_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projetos WHERE id = $1 AND curriculo_id = $2")
            .bind(id)
            .bind(curriculo_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
