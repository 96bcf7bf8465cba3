//! Well-known role names and ids.
//!
//! These must match the seed data in `20260301000001_create_roles.sql`.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

pub const ROLE_CANDIDATO: &str = "candidato";
pub const ROLE_RECRUTADOR: &str = "recrutador";
pub const ROLE_ADMIN: &str = "admin";

pub const ROLE_ID_CANDIDATO: DbId = 1;
pub const ROLE_ID_RECRUTADOR: DbId = 2;
pub const ROLE_ID_ADMIN: DbId = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidato,
    Recrutador,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Candidato => ROLE_CANDIDATO,
            Role::Recrutador => ROLE_RECRUTADOR,
            Role::Admin => ROLE_ADMIN,
        }
    }

    pub fn id(self) -> DbId {
        match self {
            Role::Candidato => ROLE_ID_CANDIDATO,
            Role::Recrutador => ROLE_ID_RECRUTADOR,
            Role::Admin => ROLE_ID_ADMIN,
        }
    }

    /// Parse a role name as stored in the `roles` table or a JWT claim.
    pub fn parse(name: &str) -> Option<Role> {
        match name {
            ROLE_CANDIDATO => Some(Role::Candidato),
            ROLE_RECRUTADOR => Some(Role::Recrutador),
            ROLE_ADMIN => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn from_id(id: DbId) -> Option<Role> {
        match id {
            ROLE_ID_CANDIDATO => Some(Role::Candidato),
            ROLE_ID_RECRUTADOR => Some(Role::Recrutador),
            ROLE_ID_ADMIN => Some(Role::Admin),
            _ => None,
        }
    }

    /// Admin accounts are only created by another admin or the startup bootstrap.
    pub fn can_self_register(self) -> bool {
        !matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
