//! Vaga (job posting) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};
use vagas_core::types::{Date, DbId, Timestamp};

use super::status::{StatusId, VagaStatus};
use super::validators;

/// A job posting row from the `vagas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vaga {
    pub id: DbId,
    pub empresa_id: DbId,
    pub recrutador_id: Option<DbId>,
    pub titulo: String,
    pub descricao: String,
    pub requisitos: Option<String>,
    pub beneficios: Option<String>,
    pub tipo_contrato: String,
    pub modalidade: String,
    pub localizacao: Option<String>,
    pub salario_min: Option<i32>,
    pub salario_max: Option<i32>,
    pub status_id: StatusId,
    pub data_limite: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Vaga {
    pub fn status(&self) -> Option<VagaStatus> {
        VagaStatus::from_id(self.status_id)
    }
}

/// A posting joined with its company name, status name and applicant count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VagaDetalhe {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub vaga: Vaga,
    pub status: String,
    pub empresa_nome: String,
    pub total_candidaturas: i64,
}

/// DTO for creating a posting.
///
/// `empresa_id` is ignored for recruiters (their own company is used) and
/// required for admins.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_create_salary"))]
pub struct CreateVaga {
    pub empresa_id: Option<DbId>,
    #[validate(length(min = 3, max = 200))]
    pub titulo: String,
    #[validate(length(min = 1, max = 10000))]
    pub descricao: String,
    #[validate(length(max = 5000))]
    pub requisitos: Option<String>,
    #[validate(length(max = 5000))]
    pub beneficios: Option<String>,
    #[validate(custom(function = "validators::tipo_contrato"))]
    pub tipo_contrato: String,
    #[validate(custom(function = "validators::modalidade"))]
    pub modalidade: String,
    #[validate(length(max = 200))]
    pub localizacao: Option<String>,
    pub salario_min: Option<i32>,
    pub salario_max: Option<i32>,
    pub data_limite: Option<Date>,
}

fn validate_create_salary(input: &CreateVaga) -> Result<(), ValidationError> {
    validators::salary_range(input.salario_min, input.salario_max)
}

/// DTO for updating a posting. All fields are optional.
///
/// Only the values present in the request are cross-checked here; the
/// `ck_vagas_salario` constraint catches a new minimum above the stored maximum.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_update_salary"))]
pub struct UpdateVaga {
    #[validate(length(min = 3, max = 200))]
    pub titulo: Option<String>,
    #[validate(length(min = 1, max = 10000))]
    pub descricao: Option<String>,
    #[validate(length(max = 5000))]
    pub requisitos: Option<String>,
    #[validate(length(max = 5000))]
    pub beneficios: Option<String>,
    #[validate(custom(function = "validators::tipo_contrato"))]
    pub tipo_contrato: Option<String>,
    #[validate(custom(function = "validators::modalidade"))]
    pub modalidade: Option<String>,
    #[validate(length(max = 200))]
    pub localizacao: Option<String>,
    pub salario_min: Option<i32>,
    pub salario_max: Option<i32>,
    pub data_limite: Option<Date>,
}

fn validate_update_salary(input: &UpdateVaga) -> Result<(), ValidationError> {
    validators::salary_range(input.salario_min, input.salario_max)
}

/// Body of `PATCH /vagas/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVagaStatus {
    pub status: VagaStatus,
}

/// Public search filters for `GET /vagas`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VagaFilter {
    pub q: Option<String>,
    pub modalidade: Option<String>,
    pub tipo_contrato: Option<String>,
    pub localizacao: Option<String>,
    pub empresa_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(min: Option<i32>, max: Option<i32>) -> CreateVaga {
        CreateVaga {
            empresa_id: None,
            titulo: "Desenvolvedor Rust".into(),
            descricao: "Backend".into(),
            requisitos: None,
            beneficios: None,
            tipo_contrato: "CLT".into(),
            modalidade: "REMOTO".into(),
            localizacao: None,
            salario_min: min,
            salario_max: max,
            data_limite: None,
        }
    }

    #[test]
    fn create_checks_salary_and_enums() {
        assert!(create(Some(3000), Some(5000)).validate().is_ok());
        assert!(create(Some(6000), Some(5000)).validate().is_err());

        let mut bad = create(None, None);
        bad.modalidade = "HOME_OFFICE".into();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn update_validates_only_present_fields() {
        assert!(UpdateVaga::default().validate().is_ok());
        let bad = UpdateVaga {
            tipo_contrato: Some("CONSULTOR".into()),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
