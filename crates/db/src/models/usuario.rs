//! Usuario (account) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vagas_core::types::{DbId, Timestamp};

/// Full user row from the `usuarios` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UsuarioResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Usuario {
    pub id: DbId,
    pub nome: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub empresa_id: Option<DbId>,
    pub telefone: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UsuarioResponse {
    pub id: DbId,
    pub nome: String,
    pub email: String,
    /// Resolved role name (`"candidato"`, `"recrutador"`, `"admin"`).
    pub role: String,
    pub role_id: DbId,
    pub empresa_id: Option<DbId>,
    pub telefone: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl UsuarioResponse {
    pub fn from_usuario(usuario: &Usuario, role: impl Into<String>) -> Self {
        Self {
            id: usuario.id,
            nome: usuario.nome.clone(),
            email: usuario.email.clone(),
            role: role.into(),
            role_id: usuario.role_id,
            empresa_id: usuario.empresa_id,
            telefone: usuario.telefone.clone(),
            is_active: usuario.is_active,
            last_login_at: usuario.last_login_at,
            created_at: usuario.created_at,
        }
    }
}

/// DTO for inserting a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUsuario {
    pub nome: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub empresa_id: Option<DbId>,
    pub telefone: Option<String>,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUsuario {
    #[validate(length(min = 1, max = 200))]
    pub nome: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub role_id: Option<DbId>,
    pub empresa_id: Option<DbId>,
    #[validate(length(max = 30))]
    pub telefone: Option<String>,
    pub is_active: Option<bool>,
}
