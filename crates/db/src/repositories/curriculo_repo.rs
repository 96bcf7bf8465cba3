//! Repository for the `curriculos` table and the assembled résumé view.

use sqlx::{PgExecutor, PgPool};
use vagas_core::types::DbId;

use crate::models::curriculo::{Curriculo, CurriculoCompleto, UpsertCurriculo};
use crate::repositories::{
    CertificacaoRepo, ExperienciaRepo, FormacaoRepo, HabilidadeRepo, IdiomaRepo, ProjetoRepo,
};

const COLUMNS: &str = "id, usuario_id, titulo, resumo, telefone, cidade, estado, \
                       linkedin_url, github_url, portfolio_url, created_at, updated_at";

/// One résumé header per candidate (`uq_curriculos_usuario`).
pub struct CurriculoRepo;

impl CurriculoRepo {
    pub async fn find_by_usuario(
        pool: &PgPool,
        usuario_id: DbId,
    ) -> Result<Option<Curriculo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM curriculos WHERE usuario_id = $1");
        sqlx::query_as::<_, Curriculo>(&query)
            .bind(usuario_id)
            .fetch_optional(pool)
            .await
    }

    /// Create an empty header if the user has none. Returns `None` when one
    /// already existed.
    pub async fn create_empty<'e>(
        executor: impl PgExecutor<'e>,
        usuario_id: DbId,
    ) -> Result<Option<Curriculo>, sqlx::Error> {
        let query = format!(
            "INSERT INTO curriculos (usuario_id) VALUES ($1)
             ON CONFLICT (usuario_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Curriculo>(&query)
            .bind(usuario_id)
            .fetch_optional(executor)
            .await
    }

    /// Return the user's header, creating an empty one on first use.
    pub async fn ensure_for_usuario(
        pool: &PgPool,
        usuario_id: DbId,
    ) -> Result<Curriculo, sqlx::Error> {
        if let Some(curriculo) = Self::find_by_usuario(pool, usuario_id).await? {
            return Ok(curriculo);
        }
        if let Some(created) = Self::create_empty(pool, usuario_id).await? {
            return Ok(created);
        }
        // Lost an insert race; the other request's row is there now.
        Self::find_by_usuario(pool, usuario_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Insert or fully replace the header fields.
    pub async fn upsert_for_usuario(
        pool: &PgPool,
        usuario_id: DbId,
        input: &UpsertCurriculo,
    ) -> Result<Curriculo, sqlx::Error> {
        let query = format!(
            "INSERT INTO curriculos
                (usuario_id, titulo, resumo, telefone, cidade, estado,
                 linkedin_url, github_url, portfolio_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (usuario_id) DO UPDATE SET
                titulo = EXCLUDED.titulo,
                resumo = EXCLUDED.resumo,
                telefone = EXCLUDED.telefone,
                cidade = EXCLUDED.cidade,
                estado = EXCLUDED.estado,
                linkedin_url = EXCLUDED.linkedin_url,
                github_url = EXCLUDED.github_url,
                portfolio_url = EXCLUDED.portfolio_url
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Curriculo>(&query)
            .bind(usuario_id)
            .bind(&input.titulo)
            .bind(&input.resumo)
            .bind(&input.telefone)
            .bind(&input.cidade)
            .bind(&input.estado)
            .bind(&input.linkedin_url)
            .bind(&input.github_url)
            .bind(&input.portfolio_url)
            .fetch_one(pool)
            .await
    }

    /// Delete the user's résumé. Sections go with it (`ON DELETE CASCADE`).
    pub async fn delete_for_usuario(pool: &PgPool, usuario_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM curriculos WHERE usuario_id = $1")
            .bind(usuario_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Header plus all six sections, or `None` if the user has no résumé.
    pub async fn find_completo_by_usuario(
        pool: &PgPool,
        usuario_id: DbId,
    ) -> Result<Option<CurriculoCompleto>, sqlx::Error> {
        let Some(curriculo) = Self::find_by_usuario(pool, usuario_id).await? else {
            return Ok(None);
        };
        let id = curriculo.id;
        Ok(Some(CurriculoCompleto {
            experiencias: ExperienciaRepo::list_by_curriculo(pool, id).await?,
            formacoes: FormacaoRepo::list_by_curriculo(pool, id).await?,
            habilidades: HabilidadeRepo::list_by_curriculo(pool, id).await?,
            idiomas: IdiomaRepo::list_by_curriculo(pool, id).await?,
            projetos: ProjetoRepo::list_by_curriculo(pool, id).await?,
            certificacoes: CertificacaoRepo::list_by_curriculo(pool, id).await?,
            curriculo,
        }))
    }
}
