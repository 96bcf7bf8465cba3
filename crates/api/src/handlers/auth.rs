//! Handlers for the `/auth` resource (registration, login, refresh, logout).

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;
use vagas_core::empresa::normalize_cnpj;
use vagas_core::roles::Role;
use vagas_db::models::empresa::CreateEmpresa;
use vagas_db::models::session::CreateSession;
use vagas_db::models::usuario::{CreateUsuario, Usuario, UsuarioResponse};
use vagas_db::repositories::{CurriculoRepo, EmpresaRepo, SessionRepo, UsuarioRepo};

use super::normalize_email;
use crate::auth::cookies::{self, clear_session_cookies, set_session_cookies};
use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register/candidato`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterCandidatoRequest {
    #[validate(length(min = 1, max = 200))]
    pub nome: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[validate(length(max = 30))]
    pub telefone: Option<String>,
}

/// Request body for `POST /auth/register/recrutador`.
///
/// The recruiter joins the company with this CNPJ, creating it if needed.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRecrutadorRequest {
    #[validate(length(min = 1, max = 200))]
    pub nome: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[validate(length(max = 30))]
    pub telefone: Option<String>,
    #[validate(nested)]
    pub empresa: CreateEmpresa,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`. Optional when the refresh cookie is sent.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Returned by registration, login and refresh.
///
/// The same tokens are also set as cookies; the body copy serves clients
/// that send `Authorization: Bearer`.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UsuarioResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register/candidato
///
/// Creates the account and its empty curriculo in one transaction, then
/// starts a session.
pub async fn register_candidato(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(input): Json<RegisterCandidatoRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<AuthResponse>)> {
    input.validate()?;
    let role = self_registration_role(Role::Candidato)?;
    let password_hash = hash_new_password(&input.password)?;

    let mut tx = state.pool.begin().await?;
    let usuario = UsuarioRepo::create(
        &mut *tx,
        &CreateUsuario {
            nome: input.nome.trim().to_string(),
            email: normalize_email(&input.email),
            password_hash,
            role_id: role.id(),
            empresa_id: None,
            telefone: input.telefone,
        },
    )
    .await?;
    CurriculoRepo::create_empty(&mut *tx, usuario.id).await?;
    tx.commit().await?;

    tracing::info!(usuario_id = usuario.id, "Candidate registered");

    let (jar, response) = start_session(&state, jar, &headers, &usuario, role).await?;
    Ok((StatusCode::CREATED, jar, Json(response)))
}

/// POST /api/v1/auth/register/recrutador
///
/// Looks the company up by normalized CNPJ and creates it when missing. The
/// company and the user are written in one transaction.
pub async fn register_recrutador(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(input): Json<RegisterRecrutadorRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<AuthResponse>)> {
    input.validate()?;
    let role = self_registration_role(Role::Recrutador)?;
    let password_hash = hash_new_password(&input.password)?;
    let cnpj = normalize_cnpj(&input.empresa.cnpj);

    let mut tx = state.pool.begin().await?;
    let empresa = match EmpresaRepo::find_by_cnpj(&mut *tx, &cnpj).await? {
        Some(existing) => existing,
        None => EmpresaRepo::create(&mut *tx, &input.empresa, &cnpj).await?,
    };
    let usuario = UsuarioRepo::create(
        &mut *tx,
        &CreateUsuario {
            nome: input.nome.trim().to_string(),
            email: normalize_email(&input.email),
            password_hash,
            role_id: role.id(),
            empresa_id: Some(empresa.id),
            telefone: input.telefone,
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        usuario_id = usuario.id,
        empresa_id = empresa.id,
        "Recruiter registered"
    );

    let (jar, response) = start_session(&state, jar, &headers, &usuario, role).await?;
    Ok((StatusCode::CREATED, jar, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Sets the session cookies and returns
/// the tokens.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    let usuario = UsuarioRepo::find_by_email(&state.pool, &normalize_email(&input.email))
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

    if !usuario.is_active {
        return Err(AppError::forbidden("Account is deactivated"));
    }

    if let Some(locked_until) = usuario.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::forbidden(
                "Account is temporarily locked. Try again later.",
            ));
        }
    }

    let password_valid = verify_password(&input.password, &usuario.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        let failures = UsuarioRepo::increment_failed_login(&state.pool, usuario.id).await?;
        if failures >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            UsuarioRepo::lock_account(&state.pool, usuario.id, lock_until).await?;
            tracing::warn!(usuario_id = usuario.id, failures, "Account locked");
        }
        return Err(AppError::unauthorized("Invalid email or password"));
    }

    UsuarioRepo::record_successful_login(&state.pool, usuario.id).await?;

    let role = resolve_role(&usuario)?;
    let (jar, response) = start_session(&state, jar, &headers, &usuario, role).await?;
    Ok((jar, Json(response)))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token (cookie first, then body) for a new pair. The
/// old session is revoked; presenting it again fails.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    body: Option<Json<RefreshRequest>>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    let token = cookies::refresh_token(&jar)
        .or_else(|| body.and_then(|Json(b)| b.refresh_token))
        .ok_or_else(|| AppError::unauthorized("Missing refresh token"))?;

    let session = SessionRepo::find_active_by_hash(&state.pool, &hash_refresh_token(&token))
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid or expired refresh token"))?;

    if !SessionRepo::revoke(&state.pool, session.id).await? {
        return Err(AppError::unauthorized("Invalid or expired refresh token"));
    }

    let usuario = UsuarioRepo::find_by_id(&state.pool, session.usuario_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

    if !usuario.is_active {
        return Err(AppError::forbidden("Account is deactivated"));
    }

    let role = resolve_role(&usuario)?;
    let (jar, response) = start_session(&state, jar, &headers, &usuario, role).await?;
    Ok((jar, Json(response)))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user and clear the cookies.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    jar: CookieJar,
) -> AppResult<(StatusCode, CookieJar)> {
    let revoked = SessionRepo::revoke_all_for_usuario(&state.pool, auth_user.usuario_id).await?;
    tracing::info!(usuario_id = auth_user.usuario_id, revoked, "Logged out");
    Ok((StatusCode::NO_CONTENT, clear_session_cookies(jar)))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UsuarioResponse>> {
    let usuario = UsuarioRepo::find_by_id(&state.pool, auth_user.usuario_id)
        .await?
        .ok_or_else(|| AppError::not_found("Usuario", auth_user.usuario_id))?;
    let role = resolve_role(&usuario)?;
    Ok(Json(UsuarioResponse::from_usuario(&usuario, role.as_str())))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn hash_new_password(password: &str) -> AppResult<String> {
    validate_password_strength(password, MIN_PASSWORD_LENGTH).map_err(AppError::validation)?;
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

/// Gate for the public `register/*` endpoints.
fn self_registration_role(role: Role) -> AppResult<Role> {
    if role.can_self_register() {
        Ok(role)
    } else {
        Err(AppError::forbidden(format!("Role {role} cannot self-register")))
    }
}

fn resolve_role(usuario: &Usuario) -> AppResult<Role> {
    Role::from_id(usuario.role_id).ok_or_else(|| {
        AppError::InternalError(format!(
            "Usuario {} has unknown role_id {}",
            usuario.id, usuario.role_id
        ))
    })
}

/// Issue an access token and a new refresh session, and set both cookies.
async fn start_session(
    state: &AppState,
    jar: CookieJar,
    headers: &HeaderMap,
    usuario: &Usuario,
    role: Role,
) -> AppResult<(CookieJar, AuthResponse)> {
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(usuario.id, role.as_str(), jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            usuario_id: usuario.id,
            refresh_token_hash: refresh_hash,
            expires_at: Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days),
            user_agent,
        },
    )
    .await?;

    let jar = set_session_cookies(
        jar,
        &access_token,
        &refresh_plaintext,
        state.config.cookie_secure,
    );

    Ok((
        jar,
        AuthResponse {
            access_token,
            refresh_token: refresh_plaintext,
            expires_in: jwt.access_token_expiry_mins * 60,
            user: UsuarioResponse::from_usuario(usuario, role.as_str()),
        },
    ))
}
