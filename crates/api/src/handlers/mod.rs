pub mod admin;
pub mod auth;
pub mod candidaturas;
pub mod curriculo;
pub mod dashboard;
pub mod empresas;
pub mod vagas;

/// Emails are compared and stored trimmed and lowercased.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
