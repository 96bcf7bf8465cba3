//! Handlers for `/vagas` (public search, detail, recruiter management).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use vagas_core::roles::Role;
use vagas_core::search::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use vagas_core::types::DbId;
use vagas_db::models::status::VagaStatus;
use vagas_db::models::vaga::{
    CreateVaga, UpdateVaga, UpdateVagaStatus, Vaga, VagaDetalhe, VagaFilter,
};
use vagas_db::repositories::{EmpresaRepo, VagaRepo};

use super::empresas::own_empresa_id;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireRecrutador;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// GET /api/v1/vagas
///
/// Open postings whose deadline has not passed.
pub async fn search_vagas(
    State(state): State<AppState>,
    Query(filter): Query<VagaFilter>,
) -> AppResult<Json<PageResponse<VagaDetalhe>>> {
    let data = VagaRepo::search(&state.pool, &filter).await?;
    Ok(Json(PageResponse {
        data,
        limit: clamp_limit(filter.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
        offset: clamp_offset(filter.offset),
    }))
}

/// GET /api/v1/vagas/{id}
///
/// Paused or closed postings are only shown to the owning company's
/// recruiters and to admins. Everyone else gets 404.
pub async fn get_vaga(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<DbId>,
) -> AppResult<Json<VagaDetalhe>> {
    let detalhe = VagaRepo::find_detalhe(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Vaga", id))?;

    if detalhe.vaga.status() != Some(VagaStatus::Aberta) {
        let visible = match user {
            Some(AuthUser { role: Role::Admin, .. }) => true,
            Some(AuthUser {
                role: Role::Recrutador,
                empresa_id,
                ..
            }) => empresa_id == Some(detalhe.vaga.empresa_id),
            _ => false,
        };
        if !visible {
            return Err(AppError::not_found("Vaga", id));
        }
    }

    Ok(Json(detalhe))
}

/// POST /api/v1/vagas
///
/// Recruiters always post for their own company. Admins must name one.
pub async fn create_vaga(
    State(state): State<AppState>,
    recrutador: RequireRecrutador,
    Json(input): Json<CreateVaga>,
) -> AppResult<(StatusCode, Json<Vaga>)> {
    input.validate()?;

    let (empresa_id, recrutador_id) = match recrutador.empresa_id {
        Some(empresa_id) => (empresa_id, Some(recrutador.user.usuario_id)),
        None => {
            let empresa_id = input
                .empresa_id
                .ok_or_else(|| AppError::validation("empresa_id is required for admins"))?;
            EmpresaRepo::find_by_id(&state.pool, empresa_id)
                .await?
                .ok_or_else(|| AppError::not_found("Empresa", empresa_id))?;
            (empresa_id, None)
        }
    };

    let vaga = VagaRepo::create(&state.pool, empresa_id, recrutador_id, &input).await?;
    tracing::info!(
        vaga_id = vaga.id,
        empresa_id,
        usuario_id = recrutador.user.usuario_id,
        "Vaga created"
    );
    Ok((StatusCode::CREATED, Json(vaga)))
}

/// PUT /api/v1/vagas/{id}
pub async fn update_vaga(
    State(state): State<AppState>,
    recrutador: RequireRecrutador,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVaga>,
) -> AppResult<Json<Vaga>> {
    input.validate()?;
    let vaga = VagaRepo::update_scoped(&state.pool, id, recrutador.empresa_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Vaga", id))?;
    Ok(Json(vaga))
}

/// PATCH /api/v1/vagas/{id}/status
pub async fn set_vaga_status(
    State(state): State<AppState>,
    recrutador: RequireRecrutador,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVagaStatus>,
) -> AppResult<Json<Vaga>> {
    let vaga = VagaRepo::set_status(&state.pool, id, recrutador.empresa_id, input.status)
        .await?
        .ok_or_else(|| AppError::not_found("Vaga", id))?;
    tracing::info!(vaga_id = id, status = input.status.name(), "Vaga status changed");
    Ok(Json(vaga))
}

/// DELETE /api/v1/vagas/{id}
///
/// A posting with applications cannot be deleted (409); close it instead.
pub async fn delete_vaga(
    State(state): State<AppState>,
    recrutador: RequireRecrutador,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if VagaRepo::delete_scoped(&state.pool, id, recrutador.empresa_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Vaga", id))
    }
}

/// GET /api/v1/recrutador/vagas
///
/// Every posting of the recruiter's company, in any status.
pub async fn list_own_vagas(
    State(state): State<AppState>,
    recrutador: RequireRecrutador,
) -> AppResult<Json<DataResponse<Vec<VagaDetalhe>>>> {
    let empresa_id = own_empresa_id(&recrutador)?;
    let data = VagaRepo::list_by_empresa(&state.pool, empresa_id).await?;
    Ok(Json(DataResponse { data }))
}
