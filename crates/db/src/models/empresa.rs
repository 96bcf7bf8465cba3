//! Empresa (company) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vagas_core::types::{DbId, Timestamp};

/// A company row from the `empresas` table. `cnpj` is stored digits-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Empresa {
    pub id: DbId,
    pub nome: String,
    pub cnpj: String,
    pub descricao: Option<String>,
    pub site: Option<String>,
    pub setor: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a company.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEmpresa {
    #[validate(length(min = 1, max = 200))]
    pub nome: String,
    #[validate(custom(function = "super::validators::cnpj"))]
    pub cnpj: String,
    #[validate(length(max = 5000))]
    pub descricao: Option<String>,
    #[validate(url)]
    pub site: Option<String>,
    #[validate(length(max = 100))]
    pub setor: Option<String>,
    #[validate(length(max = 100))]
    pub cidade: Option<String>,
    #[validate(length(equal = 2))]
    pub estado: Option<String>,
}

/// DTO for updating a company. All fields are optional; the CNPJ is immutable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEmpresa {
    #[validate(length(min = 1, max = 200))]
    pub nome: Option<String>,
    #[validate(length(max = 5000))]
    pub descricao: Option<String>,
    #[validate(url)]
    pub site: Option<String>,
    #[validate(length(max = 100))]
    pub setor: Option<String>,
    #[validate(length(max = 100))]
    pub cidade: Option<String>,
    #[validate(length(equal = 2))]
    pub estado: Option<String>,
}
