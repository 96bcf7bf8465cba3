//! Handlers for `/curriculo`: the signed-in candidate's own résumé.
//!
//! Section routes resolve the caller's `curriculo_id` first and pass it to
//! the repositories' `_scoped` methods, so ids from another résumé are 404.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use vagas_db::models::curriculo::{Curriculo, CurriculoCompleto, UpsertCurriculo};
use vagas_db::repositories::CurriculoRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireCandidato;
use crate::state::AppState;

/// GET /api/v1/curriculo
pub async fn get_curriculo(
    State(state): State<AppState>,
    RequireCandidato(user): RequireCandidato,
) -> AppResult<Json<CurriculoCompleto>> {
    let completo = CurriculoRepo::find_completo_by_usuario(&state.pool, user.usuario_id)
        .await?
        .ok_or_else(|| AppError::not_found("Curriculo", user.usuario_id))?;
    Ok(Json(completo))
}

/// PUT /api/v1/curriculo
///
/// Creates the header if missing, otherwise replaces every header field.
pub async fn upsert_curriculo(
    State(state): State<AppState>,
    RequireCandidato(user): RequireCandidato,
    Json(input): Json<UpsertCurriculo>,
) -> AppResult<Json<Curriculo>> {
    input.validate()?;
    let curriculo = CurriculoRepo::upsert_for_usuario(&state.pool, user.usuario_id, &input).await?;
    Ok(Json(curriculo))
}

/// DELETE /api/v1/curriculo
pub async fn delete_curriculo(
    State(state): State<AppState>,
    RequireCandidato(user): RequireCandidato,
) -> AppResult<StatusCode> {
    if CurriculoRepo::delete_for_usuario(&state.pool, user.usuario_id).await? {
        tracing::info!(usuario_id = user.usuario_id, "Curriculo deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Curriculo", user.usuario_id))
    }
}

/// List/get/create/update/delete handlers for one résumé section.
///
/// Listing without a header returns an empty list; creating makes the
/// header on demand.
macro_rules! section_handlers {
    ($module:ident, $repo:ident, $entity:ident, $input:ident, $label:literal) => {
        pub mod $module {
            use axum::extract::{Path, State};
            use axum::http::StatusCode;
            use axum::Json;
            use validator::Validate;
            use vagas_core::types::DbId;
            use vagas_db::models::curriculo::{$entity, $input};
            use vagas_db::repositories::{CurriculoRepo, $repo};

            use crate::error::{AppError, AppResult};
            use crate::middleware::rbac::RequireCandidato;
            use crate::response::DataResponse;
            use crate::state::AppState;

            pub async fn list(
                State(state): State<AppState>,
                RequireCandidato(user): RequireCandidato,
            ) -> AppResult<Json<DataResponse<Vec<$entity>>>> {
                let data = match CurriculoRepo::find_by_usuario(&state.pool, user.usuario_id).await? {
                    Some(curriculo) => $repo::list_by_curriculo(&state.pool, curriculo.id).await?,
                    None => Vec::new(),
                };
                Ok(Json(DataResponse { data }))
            }

            pub async fn create(
                State(state): State<AppState>,
                RequireCandidato(user): RequireCandidato,
                Json(input): Json<$input>,
            ) -> AppResult<(StatusCode, Json<$entity>)> {
                input.validate()?;
                let curriculo = CurriculoRepo::ensure_for_usuario(&state.pool, user.usuario_id).await?;
                let created = $repo::create(&state.pool, curriculo.id, &input).await?;
                Ok((StatusCode::CREATED, Json(created)))
            }

            pub async fn get(
                State(state): State<AppState>,
                RequireCandidato(user): RequireCandidato,
                Path(id): Path<DbId>,
            ) -> AppResult<Json<$entity>> {
                let curriculo = CurriculoRepo::find_by_usuario(&state.pool, user.usuario_id)
                    .await?
                    .ok_or_else(|| AppError::not_found($label, id))?;
                let entry = $repo::find_scoped(&state.pool, id, curriculo.id)
                    .await?
                    .ok_or_else(|| AppError::not_found($label, id))?;
                Ok(Json(entry))
            }

            pub async fn update(
                State(state): State<AppState>,
                RequireCandidato(user): RequireCandidato,
                Path(id): Path<DbId>,
                Json(input): Json<$input>,
            ) -> AppResult<Json<$entity>> {
                input.validate()?;
                let curriculo = CurriculoRepo::find_by_usuario(&state.pool, user.usuario_id)
                    .await?
                    .ok_or_else(|| AppError::not_found($label, id))?;
                let updated = $repo::update_scoped(&state.pool, id, curriculo.id, &input)
                    .await?
                    .ok_or_else(|| AppError::not_found($label, id))?;
                Ok(Json(updated))
            }

            pub async fn delete(
                State(state): State<AppState>,
                RequireCandidato(user): RequireCandidato,
                Path(id): Path<DbId>,
            ) -> AppResult<StatusCode> {
                let curriculo = CurriculoRepo::find_by_usuario(&state.pool, user.usuario_id)
                    .await?
                    .ok_or_else(|| AppError::not_found($label, id))?;
                if $repo::delete_scoped(&state.pool, id, curriculo.id).await? {
                    Ok(StatusCode::NO_CONTENT)
                } else {
                    Err(AppError::not_found($label, id))
                }
            }
        }
    };
}

section_handlers!(experiencias, ExperienciaRepo, Experiencia, ExperienciaInput, "Experiencia");
section_handlers!(formacoes, FormacaoRepo, Formacao, FormacaoInput, "Formacao");
section_handlers!(habilidades, HabilidadeRepo, Habilidade, HabilidadeInput, "Habilidade");
section_handlers!(idiomas, IdiomaRepo, Idioma, IdiomaInput, "Idioma");
section_handlers!(projetos, ProjetoRepo, Projeto, ProjetoInput, "Projeto");
section_handlers!(certificacoes, CertificacaoRepo, Certificacao, CertificacaoInput, "Certificacao");
