//! Résumé section field values and validation.

use crate::types::Date;
use crate::vaga::one_of;

pub const NIVEIS_HABILIDADE: &[&str] = &["BASICO", "INTERMEDIARIO", "AVANCADO", "ESPECIALISTA"];

pub const NIVEIS_IDIOMA: &[&str] = &["BASICO", "INTERMEDIARIO", "AVANCADO", "FLUENTE", "NATIVO"];

pub const GRAUS_FORMACAO: &[&str] = &[
    "ENSINO_MEDIO",
    "TECNICO",
    "GRADUACAO",
    "POS_GRADUACAO",
    "MESTRADO",
    "DOUTORADO",
];

pub fn validate_habilidade_nivel(nivel: &str) -> Result<(), String> {
    one_of("nivel", nivel, NIVEIS_HABILIDADE)
}

pub fn validate_idioma_nivel(nivel: &str) -> Result<(), String> {
    one_of("nivel", nivel, NIVEIS_IDIOMA)
}

pub fn validate_grau(grau: &str) -> Result<(), String> {
    one_of("grau", grau, GRAUS_FORMACAO)
}

/// An end date, when present, must not precede the start date.
pub fn validate_date_range(inicio: Option<Date>, fim: Option<Date>) -> Result<(), String> {
    match (inicio, fim) {
        (Some(inicio), Some(fim)) if fim < inicio => Err(format!(
            "End date {fim} is before start date {inicio}"
        )),
        _ => Ok(()),
    }
}

/// A current job (`atual`) or ongoing course (`em_andamento`) has no end date.
pub fn validate_current_flag(current: bool, fim: Option<Date>) -> Result<(), String> {
    if current && fim.is_some() {
        return Err("An ongoing entry must not have an end date".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn levels_and_degrees() {
        assert!(validate_habilidade_nivel("ESPECIALISTA").is_ok());
        assert!(validate_habilidade_nivel("FLUENTE").is_err());
        assert!(validate_idioma_nivel("FLUENTE").is_ok());
        assert!(validate_idioma_nivel("ESPECIALISTA").is_err());
        assert!(validate_grau("GRADUACAO").is_ok());
        assert!(validate_grau("BACHARELADO").is_err());
    }

    #[test]
    fn end_before_start_fails() {
        let err = validate_date_range(Some(d(2024, 5, 1)), Some(d(2023, 1, 1))).unwrap_err();
        assert!(err.contains("before start date"));
    }

    #[test]
    fn open_or_ordered_ranges_pass() {
        assert!(validate_date_range(Some(d(2020, 1, 1)), None).is_ok());
        assert!(validate_date_range(None, Some(d(2020, 1, 1))).is_ok());
        assert!(validate_date_range(Some(d(2020, 1, 1)), Some(d(2020, 1, 1))).is_ok());
    }

    #[test]
    fn ongoing_entry_cannot_have_end_date() {
        assert!(validate_current_flag(true, None).is_ok());
        assert!(validate_current_flag(false, Some(d(2022, 2, 2))).is_ok());
        assert!(validate_current_flag(true, Some(d(2022, 2, 2))).is_err());
    }
}
