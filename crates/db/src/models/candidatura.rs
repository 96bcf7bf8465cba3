//! Candidatura (application) entity model, history events and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vagas_core::types::{DbId, Timestamp};

use super::status::{CandidaturaStatus, StatusId};

/// A row from the `candidaturas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Candidatura {
    pub id: DbId,
    pub usuario_id: DbId,
    pub vaga_id: DbId,
    pub status_id: StatusId,
    pub mensagem: Option<String>,
    pub visualizada_em: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Candidatura {
    pub fn status(&self) -> Option<CandidaturaStatus> {
        CandidaturaStatus::from_id(self.status_id)
    }
}

/// An application joined with its status code, posting and applicant.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CandidaturaDetalhe {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub candidatura: Candidatura,
    pub status: String,
    pub vaga_titulo: String,
    pub empresa_id: DbId,
    pub empresa_nome: String,
    pub candidato_nome: String,
    pub candidato_email: String,
}

/// Body of `POST /vagas/{id}/candidaturas`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateCandidatura {
    #[validate(length(max = 5000))]
    pub mensagem: Option<String>,
}

/// Body of `PATCH /candidaturas/{id}/status`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCandidaturaStatus {
    pub status: CandidaturaStatus,
    #[validate(length(max = 2000))]
    pub observacao: Option<String>,
}

/// Listing filters for `GET /candidaturas`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidaturaFilter {
    /// Status code, e.g. `EM_PROCESSO` (case-insensitive).
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// One status change from `candidatura_eventos`, with codes resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CandidaturaEvento {
    pub id: DbId,
    pub candidatura_id: DbId,
    pub status_anterior: Option<String>,
    pub status_novo: String,
    pub autor_id: Option<DbId>,
    pub autor_nome: Option<String>,
    pub observacao: Option<String>,
    pub created_at: Timestamp,
}
