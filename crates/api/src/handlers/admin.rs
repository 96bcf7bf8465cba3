//! Handlers for the `/admin` resource (user and company management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use vagas_core::empresa::normalize_cnpj;
use vagas_core::roles::Role;
use vagas_core::types::DbId;
use vagas_db::models::empresa::{CreateEmpresa, Empresa, UpdateEmpresa};
use vagas_db::models::usuario::{CreateUsuario, UpdateUsuario, Usuario, UsuarioResponse};
use vagas_db::repositories::{EmpresaRepo, RoleRepo, SessionRepo, UsuarioRepo};

use super::normalize_email;
use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{PaginationParams, UsuarioListParams};
use crate::response::PageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/usuarios`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUsuarioRequest {
    #[validate(length(min = 1, max = 200))]
    pub nome: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub role_id: DbId,
    /// Required for recruiters, rejected for other roles.
    pub empresa_id: Option<DbId>,
    #[validate(length(max = 30))]
    pub telefone: Option<String>,
}

/// Request body for `POST /admin/usuarios/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Usuarios
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/usuarios
pub async fn create_usuario(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUsuarioRequest>,
) -> AppResult<(StatusCode, Json<UsuarioResponse>)> {
    input.validate()?;

    let role = Role::from_id(input.role_id)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown role_id {}", input.role_id)))?;
    match (role, input.empresa_id) {
        (Role::Recrutador, None) => {
            return Err(AppError::validation("A recruiter must have an empresa_id"))
        }
        (Role::Candidato | Role::Admin, Some(_)) => {
            return Err(AppError::validation("Only recruiters belong to a company"))
        }
        _ => {}
    }
    if let Some(empresa_id) = input.empresa_id {
        EmpresaRepo::find_by_id(&state.pool, empresa_id)
            .await?
            .ok_or_else(|| AppError::not_found("Empresa", empresa_id))?;
    }

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::validation)?;
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let usuario = UsuarioRepo::create(
        &state.pool,
        &CreateUsuario {
            nome: input.nome.trim().to_string(),
            email: normalize_email(&input.email),
            password_hash,
            role_id: role.id(),
            empresa_id: input.empresa_id,
            telefone: input.telefone,
        },
    )
    .await?;

    tracing::info!(
        usuario_id = usuario.id,
        role = %role,
        created_by = admin.usuario_id,
        "Admin created user"
    );

    let response = usuario_to_response(&state, &usuario).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/admin/usuarios?role=&limit=&offset=
pub async fn list_usuarios(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<UsuarioListParams>,
) -> AppResult<Json<PageResponse<UsuarioResponse>>> {
    let role_id = match params.role.as_deref() {
        Some(name) => Some(
            Role::parse(name)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown role '{name}'")))?
                .id(),
        ),
        None => None,
    };
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .clamped();

    let usuarios = UsuarioRepo::list(&state.pool, role_id, limit, offset).await?;

    // One roles query instead of one per row.
    let roles = RoleRepo::list(&state.pool).await?;
    let data = usuarios
        .iter()
        .map(|u| {
            let role_name = roles
                .iter()
                .find(|r| r.id == u.role_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "unknown".to_string());
            UsuarioResponse::from_usuario(u, role_name)
        })
        .collect();

    Ok(Json(PageResponse {
        data,
        limit,
        offset,
    }))
}

/// GET /api/v1/admin/usuarios/{id}
pub async fn get_usuario(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UsuarioResponse>> {
    let usuario = UsuarioRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Usuario", id))?;
    Ok(Json(usuario_to_response(&state, &usuario).await?))
}

/// PUT /api/v1/admin/usuarios/{id}
///
/// Profile fields only; passwords go through `reset-password`. Turning a
/// user into a recruiter without a company trips `ck_usuarios_recrutador_empresa`.
/// Deactivating a user or changing their role signs them out everywhere.
pub async fn update_usuario(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateUsuario>,
) -> AppResult<Json<UsuarioResponse>> {
    input.validate()?;
    if let Some(role_id) = input.role_id {
        Role::from_id(role_id)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown role_id {role_id}")))?;
    }
    input.email = input.email.as_deref().map(normalize_email);

    let before = UsuarioRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Usuario", id))?;
    let usuario = UsuarioRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Usuario", id))?;

    if !usuario.is_active || usuario.role_id != before.role_id {
        let revoked = SessionRepo::revoke_all_for_usuario(&state.pool, id).await?;
        tracing::info!(usuario_id = id, revoked, "Sessions revoked after account change");
    }

    Ok(Json(usuario_to_response(&state, &usuario).await?))
}

/// DELETE /api/v1/admin/usuarios/{id}
///
/// Soft-deactivate a user and revoke their sessions. Returns 204 No Content.
pub async fn deactivate_usuario(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.usuario_id {
        return Err(AppError::BadRequest(
            "Admins cannot deactivate their own account".into(),
        ));
    }
    if !UsuarioRepo::deactivate(&state.pool, id).await? {
        return Err(AppError::not_found("Usuario", id));
    }
    SessionRepo::revoke_all_for_usuario(&state.pool, id).await?;
    tracing::info!(usuario_id = id, deactivated_by = admin.usuario_id, "User deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/usuarios/{id}/reset-password
///
/// Also clears any lockout and signs the user out everywhere.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::validation)?;
    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    if !UsuarioRepo::update_password(&state.pool, id, &hashed).await? {
        return Err(AppError::not_found("Usuario", id));
    }
    SessionRepo::revoke_all_for_usuario(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Empresas
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/empresas
pub async fn list_empresas(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PageResponse<Empresa>>> {
    let (limit, offset) = params.clamped();
    let data = EmpresaRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(PageResponse {
        data,
        limit,
        offset,
    }))
}

/// POST /api/v1/admin/empresas
pub async fn create_empresa(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateEmpresa>,
) -> AppResult<(StatusCode, Json<Empresa>)> {
    input.validate()?;
    let empresa = EmpresaRepo::create(&state.pool, &input, &normalize_cnpj(&input.cnpj)).await?;
    Ok((StatusCode::CREATED, Json(empresa)))
}

/// GET /api/v1/admin/empresas/{id}
pub async fn get_empresa(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Empresa>> {
    let empresa = EmpresaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Empresa", id))?;
    Ok(Json(empresa))
}

/// PUT /api/v1/admin/empresas/{id}
pub async fn update_empresa(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEmpresa>,
) -> AppResult<Json<Empresa>> {
    input.validate()?;
    let empresa = EmpresaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Empresa", id))?;
    Ok(Json(empresa))
}

/// DELETE /api/v1/admin/empresas/{id}
///
/// A company that still has postings or recruiters fails with 409.
pub async fn delete_empresa(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if EmpresaRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Empresa", id))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn usuario_to_response(state: &AppState, usuario: &Usuario) -> AppResult<UsuarioResponse> {
    let role = RoleRepo::find_by_id(&state.pool, usuario.role_id)
        .await?
        .ok_or_else(|| AppError::not_found("Role", usuario.role_id))?;
    Ok(UsuarioResponse::from_usuario(usuario, role.name))
}
