//! Job posting (vaga) field values and validation.

/// Contract types accepted for `vagas.tipo_contrato`.
pub const TIPOS_CONTRATO: &[&str] = &["CLT", "PJ", "ESTAGIO", "TEMPORARIO", "FREELANCER", "TRAINEE"];

/// Work modes accepted for `vagas.modalidade`.
pub const MODALIDADES: &[&str] = &["PRESENCIAL", "REMOTO", "HIBRIDO"];

/// Validate a contract type against [`TIPOS_CONTRATO`].
pub fn validate_tipo_contrato(tipo: &str) -> Result<(), String> {
    one_of("tipo_contrato", tipo, TIPOS_CONTRATO)
}

/// Validate a work mode against [`MODALIDADES`].
pub fn validate_modalidade(modalidade: &str) -> Result<(), String> {
    one_of("modalidade", modalidade, MODALIDADES)
}

/// Salaries are whole reais. Both bounds are optional; when both are set the
/// minimum must not exceed the maximum.
pub fn validate_salary_range(min: Option<i32>, max: Option<i32>) -> Result<(), String> {
    if min.is_some_and(|v| v < 0) || max.is_some_and(|v| v < 0) {
        return Err("Salary values must not be negative".to_string());
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(format!(
                "salario_min ({min}) must not exceed salario_max ({max})"
            ));
        }
    }
    Ok(())
}

pub(crate) fn one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), String> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            allowed.join(", ")
        ))
    }
}
