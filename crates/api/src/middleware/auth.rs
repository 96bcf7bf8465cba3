//! JWT-based authentication extractor for Axum handlers.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use vagas_core::roles::Role;
use vagas_core::types::DbId;
use vagas_db::repositories::UsuarioRepo;

use crate::auth::cookies;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user taken from the access token.
///
/// The user row is loaded on every request: inactive accounts get 403 and
/// the role comes from the database.
///
/// The `vagas_token` cookie wins over an `Authorization: Bearer` header, so
/// browser sessions and API clients both work.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(usuario_id = user.usuario_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// `usuarios.id` (from `claims.sub`).
    pub usuario_id: DbId,
    /// Current role from `usuarios.role_id`, not the one baked into the token.
    pub role: Role,
    /// Company of a recruiter. `None` for other roles.
    pub empresa_id: Option<DbId>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match cookies::access_token(&CookieJar::from_headers(&parts.headers)) {
            Some(token) => token,
            None => bearer_token(parts)?,
        };

        let claims = validate_token(&token, &state.config.jwt)
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

        let usuario = UsuarioRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;
        if !usuario.is_active {
            return Err(AppError::forbidden("Account is deactivated"));
        }
        let role = Role::from_id(usuario.role_id).ok_or_else(|| {
            AppError::InternalError(format!(
                "Usuario {} has unknown role_id {}",
                usuario.id, usuario.role_id
            ))
        })?;

        Ok(AuthUser {
            usuario_id: usuario.id,
            role,
            empresa_id: usuario.empresa_id,
        })
    }
}

/// `Option<AuthUser>` for public routes that show more to signed-in users.
/// A missing or invalid token reads as anonymous.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(<AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state)
            .await
            .ok())
    }
}

fn bearer_token(parts: &Parts) -> Result<String, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing session cookie or Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::unauthorized("Invalid Authorization format. Expected: Bearer <token>")
        })
}
