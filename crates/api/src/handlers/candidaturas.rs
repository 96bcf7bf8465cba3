//! Handlers for applications (`/candidaturas`, `/vagas/{id}/candidaturas`).
//!
//! Visibility follows the caller's role: candidates see their own rows,
//! recruiters their company's, admins everything. Anything outside that
//! scope is reported as 404.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use vagas_core::candidatura::{
    allowed_for_actor, on_recruiter_list, on_recruiter_view, validate_transition,
    CandidaturaStatus,
};
use vagas_core::roles::Role;
use vagas_core::search::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use vagas_core::types::DbId;
use vagas_db::models::candidatura::{
    Candidatura, CandidaturaDetalhe, CandidaturaEvento, CandidaturaFilter, CreateCandidatura,
    UpdateCandidaturaStatus,
};
use vagas_db::models::curriculo::CurriculoCompleto;
use vagas_db::repositories::{CandidaturaEventoRepo, CandidaturaRepo, CurriculoRepo, VagaRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{recruiter_empresa_id, RequireCandidato, RequireRecrutador};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Body of `POST /candidaturas/{id}/cancelar`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CancelarRequest {
    #[validate(length(max = 2000))]
    pub observacao: Option<String>,
}

/// Which applications a caller may see.
#[derive(Debug, Clone, Copy)]
enum Visibility {
    Own(DbId),
    Empresa(DbId),
    All,
}

impl Visibility {
    fn of(user: &AuthUser) -> AppResult<Self> {
        Ok(match user.role {
            Role::Candidato => Visibility::Own(user.usuario_id),
            Role::Recrutador => Visibility::Empresa(recruiter_empresa_id(user)?),
            Role::Admin => Visibility::All,
        })
    }

    fn sees(self, detalhe: &CandidaturaDetalhe) -> bool {
        match self {
            Visibility::Own(usuario_id) => detalhe.candidatura.usuario_id == usuario_id,
            Visibility::Empresa(empresa_id) => detalhe.empresa_id == empresa_id,
            Visibility::All => true,
        }
    }
}

/// Load an application the caller is allowed to see, or 404.
async fn find_visible(
    state: &AppState,
    visibility: Visibility,
    id: DbId,
) -> AppResult<CandidaturaDetalhe> {
    CandidaturaRepo::find_detalhe(&state.pool, id)
        .await?
        .filter(|d| visibility.sees(d))
        .ok_or_else(|| AppError::not_found("Candidatura", id))
}

fn current_status(candidatura: &Candidatura) -> AppResult<CandidaturaStatus> {
    candidatura.status().ok_or_else(|| {
        AppError::InternalError(format!(
            "Candidatura {} has unknown status_id {}",
            candidatura.id, candidatura.status_id
        ))
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/vagas/{id}/candidaturas
///
/// The posting must be open and within its deadline, and the candidate must
/// have a curriculo. Applying twice is rejected by `uq_candidaturas_usuario_vaga`.
pub async fn apply(
    State(state): State<AppState>,
    RequireCandidato(user): RequireCandidato,
    Path(vaga_id): Path<DbId>,
    body: Option<Json<CreateCandidatura>>,
) -> AppResult<(StatusCode, Json<Candidatura>)> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    input.validate()?;

    let accepting = VagaRepo::accepts_applications(&state.pool, vaga_id)
        .await?
        .ok_or_else(|| AppError::not_found("Vaga", vaga_id))?;
    if !accepting {
        return Err(AppError::conflict("This vaga is not accepting applications"));
    }

    if CurriculoRepo::find_by_usuario(&state.pool, user.usuario_id)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest(
            "Create a curriculo before applying".into(),
        ));
    }

    let candidatura = CandidaturaRepo::create(
        &state.pool,
        user.usuario_id,
        vaga_id,
        input.mensagem.as_deref(),
    )
    .await?;

    tracing::info!(
        candidatura_id = candidatura.id,
        vaga_id,
        usuario_id = user.usuario_id,
        "Application submitted"
    );
    Ok((StatusCode::CREATED, Json(candidatura)))
}

/// GET /api/v1/vagas/{id}/candidaturas
///
/// When a recruiter opens the list, new (`INSCRITO`) applications become
/// `VISUALIZADA`. Admin views leave statuses alone.
pub async fn list_for_vaga(
    State(state): State<AppState>,
    recrutador: RequireRecrutador,
    Path(vaga_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CandidaturaDetalhe>>>> {
    let vaga = VagaRepo::find_by_id(&state.pool, vaga_id)
        .await?
        .filter(|v| recrutador.empresa_id.map_or(true, |e| e == v.empresa_id))
        .ok_or_else(|| AppError::not_found("Vaga", vaga_id))?;

    let mut data = CandidaturaRepo::list_by_vaga(&state.pool, vaga.id).await?;

    if !recrutador.is_admin() {
        let unseen = data
            .iter()
            .any(|d| d.candidatura.status().and_then(on_recruiter_list).is_some());
        if unseen {
            let marked =
                CandidaturaRepo::mark_visualizadas(&state.pool, vaga.id, recrutador.user.usuario_id)
                    .await?;
            tracing::debug!(vaga_id, marked, "Applications marked as seen");
            data = CandidaturaRepo::list_by_vaga(&state.pool, vaga.id).await?;
        }
    }

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/candidaturas?status=&limit=&offset=
pub async fn list_candidaturas(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<CandidaturaFilter>,
) -> AppResult<Json<PageResponse<CandidaturaDetalhe>>> {
    let status = match filter.status.as_deref() {
        Some(code) => Some(CandidaturaStatus::from_code(code).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown candidatura status '{code}'"))
        })?),
        None => None,
    };
    let limit = clamp_limit(filter.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(filter.offset);

    let data = match Visibility::of(&user)? {
        Visibility::Own(usuario_id) => {
            CandidaturaRepo::list_by_usuario(&state.pool, usuario_id, status, limit, offset).await?
        }
        Visibility::Empresa(empresa_id) => {
            CandidaturaRepo::list_by_empresa(&state.pool, empresa_id, status, limit, offset).await?
        }
        Visibility::All => CandidaturaRepo::list_all(&state.pool, status, limit, offset).await?,
    };

    Ok(Json(PageResponse {
        data,
        limit,
        offset,
    }))
}

/// GET /api/v1/candidaturas/{id}
///
/// The first time a recruiter opens an application it moves to
/// `EM_PROCESSO` and `visualizada_em` is stamped.
pub async fn get_candidatura(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<CandidaturaDetalhe>> {
    let visibility = Visibility::of(&user)?;
    let detalhe = find_visible(&state, visibility, id).await?;

    if user.role != Role::Recrutador {
        return Ok(Json(detalhe));
    }

    let from = current_status(&detalhe.candidatura)?;
    let Some(to) = on_recruiter_view(from) else {
        return Ok(Json(detalhe));
    };

    // `None` means someone else moved it first; show whatever is there now.
    let moved = CandidaturaRepo::update_status(
        &state.pool,
        id,
        from,
        to,
        user.usuario_id,
        None,
        true,
    )
    .await?;
    if moved.is_some() {
        tracing::info!(candidatura_id = id, from = %from, to = %to, "Application opened by recruiter");
    }

    Ok(Json(find_visible(&state, visibility, id).await?))
}

/// GET /api/v1/candidaturas/{id}/curriculo
///
/// The applicant's full résumé, for the posting's company or an admin.
pub async fn get_applicant_curriculo(
    State(state): State<AppState>,
    recrutador: RequireRecrutador,
    Path(id): Path<DbId>,
) -> AppResult<Json<CurriculoCompleto>> {
    let visibility = match recrutador.empresa_id {
        Some(empresa_id) => Visibility::Empresa(empresa_id),
        None => Visibility::All,
    };
    let detalhe = find_visible(&state, visibility, id).await?;
    let usuario_id = detalhe.candidatura.usuario_id;

    let completo = CurriculoRepo::find_completo_by_usuario(&state.pool, usuario_id)
        .await?
        .ok_or_else(|| AppError::not_found("Curriculo", usuario_id))?;
    Ok(Json(completo))
}

/// PATCH /api/v1/candidaturas/{id}/status
///
/// 403 when the caller's role may not request that status, 409 when the
/// move is illegal from the current status or the row changed meanwhile.
pub async fn update_candidatura_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCandidaturaStatus>,
) -> AppResult<Json<Candidatura>> {
    input.validate()?;
    let candidatura =
        transition(&state, &user, id, input.status, input.observacao.as_deref()).await?;
    Ok(Json(candidatura))
}

/// POST /api/v1/candidaturas/{id}/cancelar
pub async fn cancel_candidatura(
    State(state): State<AppState>,
    RequireCandidato(user): RequireCandidato,
    Path(id): Path<DbId>,
    body: Option<Json<CancelarRequest>>,
) -> AppResult<Json<Candidatura>> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    input.validate()?;
    let candidatura = transition(
        &state,
        &user,
        id,
        CandidaturaStatus::Cancelada,
        input.observacao.as_deref(),
    )
    .await?;
    Ok(Json(candidatura))
}

/// GET /api/v1/candidaturas/{id}/historico
pub async fn historico(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CandidaturaEvento>>>> {
    let visibility = Visibility::of(&user)?;
    find_visible(&state, visibility, id).await?;
    let data = CandidaturaEventoRepo::list_by_candidatura(&state.pool, id).await?;
    Ok(Json(DataResponse { data }))
}

async fn transition(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
    to: CandidaturaStatus,
    observacao: Option<&str>,
) -> AppResult<Candidatura> {
    let visibility = Visibility::of(user)?;
    let detalhe = find_visible(state, visibility, id).await?;

    allowed_for_actor(user.role, to)?;
    let from = current_status(&detalhe.candidatura)?;
    validate_transition(from, to)?;

    let updated = CandidaturaRepo::update_status(
        &state.pool,
        id,
        from,
        to,
        user.usuario_id,
        observacao,
        user.role == Role::Recrutador,
    )
    .await?
    .ok_or_else(|| AppError::conflict("Candidatura status changed concurrently; reload and retry"))?;

    tracing::info!(
        candidatura_id = id,
        from = %from,
        to = %to,
        autor_id = user.usuario_id,
        "Candidatura status changed"
    );
    Ok(updated)
}
