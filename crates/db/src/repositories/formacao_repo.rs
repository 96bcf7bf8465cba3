//! Repository for the `formacoes_academicas` table.

use sqlx::PgPool;
use vagas_core::types::DbId;

use crate::models::curriculo::{Formacao, FormacaoInput};

const COLUMNS: &str = "id, curriculo_id, instituicao, curso, grau, data_inicio, data_fim, \
                       em_andamento, created_at, updated_at";

pub struct FormacaoRepo;

impl FormacaoRepo {
    pub async fn list_by_curriculo(
        pool: &PgPool,
        curriculo_id: DbId,
    ) -> Result<Vec<Formacao>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM formacoes_academicas
             WHERE curriculo_id = $1
             ORDER BY em_andamento DESC, data_inicio DESC, id DESC"
        );
        sqlx::query_as::<_, Formacao>(&query)
            .bind(curriculo_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_scoped(
        pool: &PgPool,
        id: DbId,
        curriculo_id: DbId,
    ) -> Result<Option<Formacao>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM formacoes_academicas WHERE id = $1 AND curriculo_id = $2"
        );
        sqlx::query_as::<_, Formacao>(&query)
            .bind(id)
            .bind(curriculo_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        curriculo_id: DbId,
        input: &FormacaoInput,
    ) -> Result<Formacao, sqlx::Error> {
        let query = format!(
            "INSERT INTO formacoes_academicas
                (curriculo_id, instituicao, curso, grau, data_inicio, data_fim, em_andamento)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Formacao>(&query)
            .bind(curriculo_id)
            .bind(&input.instituicao)
            .bind(&input.curso)
            .bind(&input.grau)
            .bind(input.data_inicio)
            .bind(input.data_fim)
            .bind(input.em_andamento)
            .fetch_one(pool)
            .await
    }

    pub async fn update_scoped(
        pool: &PgPool,
        id: DbId,
        curriculo_id: DbId,
        input: &FormacaoInput,
    ) -> Result<Option<Formacao>, sqlx::Error> {
        let query = format!(
            "UPDATE formacoes_academicas SET
                instituicao = $3, curso = $4, grau = $5,
                data_inicio = $6, data_fim = $7, em_andamento = $8
             WHERE id = $1 AND curriculo_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Formacao>(&query)
            .bind(id)
            .bind(curriculo_id)
            .bind(&input.instituicao)
            .bind(&input.curso)
            .bind(&input.grau)
            .bind(input.data_inicio)
            .bind(input.data_fim)
            .bind(input.em_andamento)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete_scoped(
        pool: &PgPool,
        id: DbId,
        curriculo_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM formacoes_academicas WHERE id = $1 AND curriculo_id = $2")
                .bind(id)
                .bind(curriculo_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
