//! `GET /dashboard`: one endpoint, a different layout per role.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use vagas_core::roles::Role;
use vagas_db::models::dashboard::{PlatformTotals, StatusCount};
use vagas_db::models::empresa::Empresa;
use vagas_db::repositories::{CandidaturaRepo, CurriculoRepo, DashboardRepo, EmpresaRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{recruiter_empresa_id, RequireAuth};
use crate::state::AppState;

/// Serialized with a `layout` tag (`candidato`, `recrutador`, `admin`) so
/// the frontend can pick the matching view.
#[derive(Debug, Serialize)]
#[serde(tag = "layout", rename_all = "lowercase")]
pub enum DashboardResponse {
    Candidato {
        tem_curriculo: bool,
        total_candidaturas: i64,
        candidaturas_por_status: Vec<StatusCount>,
    },
    Recrutador {
        empresa: Empresa,
        vagas_por_status: Vec<StatusCount>,
        candidaturas_por_status: Vec<StatusCount>,
    },
    Admin {
        totais: PlatformTotals,
        usuarios_por_role: Vec<StatusCount>,
    },
}

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DashboardResponse>> {
    let response = match user.role {
        Role::Candidato => {
            let candidaturas_por_status =
                CandidaturaRepo::count_by_status(&state.pool, Some(user.usuario_id), None).await?;
            let tem_curriculo = CurriculoRepo::find_by_usuario(&state.pool, user.usuario_id)
                .await?
                .is_some();
            DashboardResponse::Candidato {
                tem_curriculo,
                total_candidaturas: candidaturas_por_status.iter().map(|c| c.total).sum(),
                candidaturas_por_status,
            }
        }
        Role::Recrutador => {
            let empresa_id = recruiter_empresa_id(&user)?;
            let empresa = EmpresaRepo::find_by_id(&state.pool, empresa_id)
                .await?
                .ok_or_else(|| AppError::not_found("Empresa", empresa_id))?;
            DashboardResponse::Recrutador {
                empresa,
                vagas_por_status: DashboardRepo::vagas_by_status(&state.pool, empresa_id).await?,
                candidaturas_por_status: CandidaturaRepo::count_by_status(
                    &state.pool,
                    None,
                    Some(empresa_id),
                )
                .await?,
            }
        }
        Role::Admin => DashboardResponse::Admin {
            totais: DashboardRepo::totals(&state.pool).await?,
            usuarios_por_role: DashboardRepo::usuarios_by_role(&state.pool).await?,
        },
    };
    Ok(Json(response))
}
