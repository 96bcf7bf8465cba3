//! Company (empresa) helpers.

/// Strip the usual CNPJ punctuation (`12.345.678/0001-90` -> `12345678000190`).
pub fn normalize_cnpj(cnpj: &str) -> String {
    cnpj.chars()
        .filter(|c| !matches!(c, '.' | '/' | '-' | ' '))
        .collect()
}

/// A CNPJ is 14 digits once punctuation is removed.
///
/// Check digits are not verified; the registry is the source of truth for
/// whether a number is actually assigned.
pub fn validate_cnpj(cnpj: &str) -> Result<(), String> {
    let digits = normalize_cnpj(cnpj);
    if digits.len() == 14 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(format!("Invalid CNPJ '{cnpj}': expected 14 digits"))
    }
}
