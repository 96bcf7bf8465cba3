//! Handlers for public company profiles and the recruiter's own company.

use axum::extract::{Path, State};
use axum::Json;
use validator::Validate;
use vagas_core::types::DbId;
use vagas_db::models::empresa::{Empresa, UpdateEmpresa};
use vagas_db::repositories::EmpresaRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireRecrutador;
use crate::state::AppState;

/// GET /api/v1/empresas/{id}
pub async fn get_empresa(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Empresa>> {
    let empresa = EmpresaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Empresa", id))?;
    Ok(Json(empresa))
}

/// GET /api/v1/recrutador/empresa
pub async fn get_own_empresa(
    State(state): State<AppState>,
    recrutador: RequireRecrutador,
) -> AppResult<Json<Empresa>> {
    let empresa_id = own_empresa_id(&recrutador)?;
    let empresa = EmpresaRepo::find_by_id(&state.pool, empresa_id)
        .await?
        .ok_or_else(|| AppError::not_found("Empresa", empresa_id))?;
    Ok(Json(empresa))
}

/// PUT /api/v1/recrutador/empresa
pub async fn update_own_empresa(
    State(state): State<AppState>,
    recrutador: RequireRecrutador,
    Json(input): Json<UpdateEmpresa>,
) -> AppResult<Json<Empresa>> {
    input.validate()?;
    let empresa_id = own_empresa_id(&recrutador)?;
    let empresa = EmpresaRepo::update(&state.pool, empresa_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Empresa", empresa_id))?;
    tracing::info!(
        empresa_id,
        usuario_id = recrutador.user.usuario_id,
        "Company profile updated"
    );
    Ok(Json(empresa))
}

/// The `/recrutador/*` routes act on one company; admins have none.
pub(crate) fn own_empresa_id(recrutador: &RequireRecrutador) -> AppResult<DbId> {
    recrutador.empresa_id.ok_or_else(|| {
        AppError::BadRequest("Admins are not linked to a company; use the admin routes".into())
    })
}
