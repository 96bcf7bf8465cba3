//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! match. Use these in handler signatures to enforce authorization at the
//! type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vagas_core::roles::Role;
use vagas_core::types::DbId;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            return Err(AppError::forbidden("Admin role required"));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `recrutador` or `admin`.
///
/// The handler gets the recruiter's company. A recruiter without a company
/// is rejected with 403. Admins get `empresa_id: None`, which repository `_scoped` methods
/// read as "any company".
pub struct RequireRecrutador {
    pub user: AuthUser,
    pub empresa_id: Option<DbId>,
}

impl RequireRecrutador {
    pub fn is_admin(&self) -> bool {
        self.user.role == Role::Admin
    }
}

impl FromRequestParts<AppState> for RequireRecrutador {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role {
            Role::Admin => Ok(RequireRecrutador {
                user,
                empresa_id: None,
            }),
            Role::Recrutador => {
                let empresa_id = recruiter_empresa_id(&user)?;
                Ok(RequireRecrutador {
                    user,
                    empresa_id: Some(empresa_id),
                })
            }
            Role::Candidato => Err(AppError::forbidden("Recruiter or Admin role required")),
        }
    }
}

/// Company of a recruiter, or 403 when they are not linked to one.
pub(crate) fn recruiter_empresa_id(user: &AuthUser) -> Result<DbId, AppError> {
    user.empresa_id
        .ok_or_else(|| AppError::forbidden("Recruiter is not linked to a company"))
}

/// Requires the `candidato` role. Rejects with 403 Forbidden otherwise.
pub struct RequireCandidato(pub AuthUser);

impl FromRequestParts<AppState> for RequireCandidato {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Candidato {
            return Err(AppError::forbidden("Candidate role required"));
        }
        Ok(RequireCandidato(user))
    }
}

/// Requires any authenticated user (any valid role).
///
/// Same as [`AuthUser`], named for route definitions where "this route
/// requires authentication" should read explicitly.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
