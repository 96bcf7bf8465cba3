//! Startup admin account.

use vagas_core::roles::Role;
use vagas_db::models::usuario::CreateUsuario;
use vagas_db::repositories::UsuarioRepo;
use vagas_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::config::AdminBootstrap;
use crate::error::{AppError, AppResult};
use crate::handlers::normalize_email;

/// Create the configured admin unless a user with that email already exists.
///
/// Returns `true` when an account was created. An existing account is left
/// untouched, whatever its role or password.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminBootstrap) -> AppResult<bool> {
    let email = normalize_email(&admin.email);
    if UsuarioRepo::find_by_email(pool, &email).await?.is_some() {
        tracing::debug!(%email, "Bootstrap admin already present");
        return Ok(false);
    }

    validate_password_strength(&admin.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::validation)?;
    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let usuario = UsuarioRepo::create(
        pool,
        &CreateUsuario {
            nome: "Administrador".to_string(),
            email,
            password_hash,
            role_id: Role::Admin.id(),
            empresa_id: None,
            telefone: None,
        },
    )
    .await?;

    tracing::info!(usuario_id = usuario.id, "Bootstrap admin created");
    Ok(true)
}
