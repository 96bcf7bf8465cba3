//! Repository for the `certificacoes` table.

use sqlx::PgPool;
use vagas_core::types::DbId;

use crate::models::curriculo::{Certificacao, CertificacaoInput};

const COLUMNS: &str = "id, curriculo_id, nome, instituicao, data_emissao, data_expiracao, \
                       credencial_url, created_at, updated_at";

pub struct CertificacaoRepo;

impl CertificacaoRepo {
    pub async fn list_by_curriculo(
        pool: &PgPool,
        curriculo_id: DbId,
    ) -> Result<Vec<Certificacao>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM certificacoes
             WHERE curriculo_id = $1
             ORDER BY data_emissao DESC, id DESC"
        );
        sqlx::query_as::<_, Certificacao>(&query)
            .bind(curriculo_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_scoped(
        pool: &PgPool,
        id: DbId,
        curriculo_id: DbId,
    ) -> Result<Option<Certificacao>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM certificacoes WHERE id = $1 AND curriculo_id = $2");
        sqlx::query_as::<_, Certificacao>(&query)
            .bind(id)
            .bind(curriculo_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        curriculo_id: DbId,
        input: &CertificacaoInput,
    ) -> Result<Certificacao, sqlx::Error> {
        let query = format!(
            "INSERT INTO certificacoes
                (curriculo_id, nome, instituicao, data_emissao, data_expiracao, credencial_url)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Certificacao>(&query)
            .bind(curriculo_id)
            .bind(&input.nome)
            .bind(&input.instituicao)
            .bind(input.data_emissao)
            .bind(input.data_expiracao)
            .bind(&input.credencial_url)
            .fetch_one(pool)
            .await
    }

    pub async fn update_scoped(
        pool: &PgPool,
        id: DbId,
        curriculo_id: DbId,
        input: &CertificacaoInput,
    ) -> Result<Option<Certificacao>, sqlx::Error> {
        let query = format!(
            "UPDATE certificacoes SET
                nome = $3, instituicao = $4, data_emissao = $5,
                data_expiracao = $6, credencial_url = $7
             WHERE id = $1 AND curriculo_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Certificacao>(&query)
            .bind(id)
            .bind(curriculo_id)
            .bind(&input.nome)
            .bind(&input.instituicao)
            .bind(input.data_emissao)
            .bind(input.data_expiracao)
            .bind(&input.credencial_url)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete_scoped(
        pool: &PgPool,
        id: DbId,
        curriculo_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM certificacoes WHERE id = $1 AND curriculo_id = $2")
            .bind(id)
            .bind(curriculo_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
