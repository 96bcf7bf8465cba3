//! Candidacy (application) status lifecycle.
//!
//! ```text
//! INSCRITO ──► VISUALIZADA ──► EM_PROCESSO ──► APROVADO
//!    │              │               │
//!    └──────────────┴───────────────┴────────► REJEITADO | CANCELADA
//! ```
//!
//! Discriminants match the seed data in the `candidatura_statuses` table.
//! APROVADO, REJEITADO and CANCELADA are terminal.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;

#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandidaturaStatus {
    Inscrito = 1,
    Visualizada = 2,
    EmProcesso = 3,
    Aprovado = 4,
    Rejeitado = 5,
    Cancelada = 6,
}

/// Every status in id order.
pub const ALL_STATUSES: [CandidaturaStatus; 6] = [
    CandidaturaStatus::Inscrito,
    CandidaturaStatus::Visualizada,
    CandidaturaStatus::EmProcesso,
    CandidaturaStatus::Aprovado,
    CandidaturaStatus::Rejeitado,
    CandidaturaStatus::Cancelada,
];

impl CandidaturaStatus {
    /// Return the database status ID.
    pub fn id(self) -> i16 {
        self as i16
    }

    pub fn code(self) -> &'static str {
        match self {
            CandidaturaStatus::Inscrito => "INSCRITO",
            CandidaturaStatus::Visualizada => "VISUALIZADA",
            CandidaturaStatus::EmProcesso => "EM_PROCESSO",
            CandidaturaStatus::Aprovado => "APROVADO",
            CandidaturaStatus::Rejeitado => "REJEITADO",
            CandidaturaStatus::Cancelada => "CANCELADA",
        }
    }

    pub fn from_id(id: i16) -> Option<Self> {
        ALL_STATUSES.into_iter().find(|s| s.id() == id)
    }

    /// Case-insensitive lookup by code (`"em_processo"` works too).
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        ALL_STATUSES
            .into_iter()
            .find(|s| s.code().eq_ignore_ascii_case(code))
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            CandidaturaStatus::Aprovado
                | CandidaturaStatus::Rejeitado
                | CandidaturaStatus::Cancelada
        )
    }

    pub fn can_transition_to(self, next: CandidaturaStatus) -> bool {
        use CandidaturaStatus::*;
        match self {
            Inscrito => matches!(next, Visualizada | EmProcesso | Rejeitado | Cancelada),
            Visualizada => matches!(next, EmProcesso | Rejeitado | Cancelada),
            EmProcesso => matches!(next, Aprovado | Rejeitado | Cancelada),
            Aprovado | Rejeitado | Cancelada => false,
        }
    }
}

impl std::fmt::Display for CandidaturaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Check that `from -> to` is a legal move.
pub fn validate_transition(
    from: CandidaturaStatus,
    to: CandidaturaStatus,
) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot move candidatura from {from} to {to}"
        )))
    }
}

/// Check that `role` is allowed to request a move into `to`.
///
/// Candidates can only withdraw. Recruiters drive the selection process but
/// cannot cancel on the candidate's behalf. Admins can do anything legal.
pub fn allowed_for_actor(role: Role, to: CandidaturaStatus) -> Result<(), CoreError> {
    use CandidaturaStatus::*;
    let allowed = match role {
        Role::Candidato => matches!(to, Cancelada),
        Role::Recrutador => matches!(to, Visualizada | EmProcesso | Aprovado | Rejeitado),
        Role::Admin => true,
    };
    if allowed {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Role {role} cannot set candidatura status to {to}"
        )))
    }
}

/// Status change applied when a recruiter lists the applicants of a vaga.
pub fn on_recruiter_list(current: CandidaturaStatus) -> Option<CandidaturaStatus> {
    match current {
        CandidaturaStatus::Inscrito => Some(CandidaturaStatus::Visualizada),
        _ => None,
    }
}

/// Status change applied the first time a recruiter opens a candidatura.
pub fn on_recruiter_view(current: CandidaturaStatus) -> Option<CandidaturaStatus> {
    match current {
        CandidaturaStatus::Inscrito | CandidaturaStatus::Visualizada => {
            Some(CandidaturaStatus::EmProcesso)
        }
        _ => None,
    }
}
