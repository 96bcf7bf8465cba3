//! Adapters from the `vagas_core` field validators to `validator` custom rules.

use std::borrow::Cow;

use validator::ValidationError;
use vagas_core::{curriculo, empresa, vaga};

fn lift(code: &'static str, result: Result<(), String>) -> Result<(), ValidationError> {
    result.map_err(|msg| ValidationError::new(code).with_message(Cow::Owned(msg)))
}

pub(crate) fn tipo_contrato(value: &str) -> Result<(), ValidationError> {
    lift("tipo_contrato", vaga::validate_tipo_contrato(value))
}

pub(crate) fn modalidade(value: &str) -> Result<(), ValidationError> {
    lift("modalidade", vaga::validate_modalidade(value))
}

pub(crate) fn habilidade_nivel(value: &str) -> Result<(), ValidationError> {
    lift("nivel", curriculo::validate_habilidade_nivel(value))
}

pub(crate) fn idioma_nivel(value: &str) -> Result<(), ValidationError> {
    lift("nivel", curriculo::validate_idioma_nivel(value))
}

pub(crate) fn grau(value: &str) -> Result<(), ValidationError> {
    lift("grau", curriculo::validate_grau(value))
}

pub(crate) fn cnpj(value: &str) -> Result<(), ValidationError> {
    lift("cnpj", empresa::validate_cnpj(value))
}

pub(crate) fn date_range(
    inicio: Option<vagas_core::types::Date>,
    fim: Option<vagas_core::types::Date>,
) -> Result<(), ValidationError> {
    lift("date_range", curriculo::validate_date_range(inicio, fim))
}

pub(crate) fn current_flag(
    current: bool,
    fim: Option<vagas_core::types::Date>,
) -> Result<(), ValidationError> {
    lift("current_flag", curriculo::validate_current_flag(current, fim))
}

pub(crate) fn salary_range(min: Option<i32>, max: Option<i32>) -> Result<(), ValidationError> {
    lift("salary_range", vaga::validate_salary_range(min, max))
}
