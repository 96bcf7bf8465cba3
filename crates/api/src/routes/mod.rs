pub mod admin;
pub mod auth;
pub mod candidaturas;
pub mod curriculo;
pub mod empresas;
pub mod health;
pub mod recrutador;
pub mod vagas;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register/candidato                 register a candidate (public)
/// /auth/register/recrutador                register a recruiter + company (public)
/// /auth/login                              login (public)
/// /auth/refresh                            refresh (cookie or body)
/// /auth/logout                             logout (requires auth)
/// /auth/me                                 current user
///
/// /admin/usuarios                          list, create (admin only)
/// /admin/usuarios/{id}                     get, update, deactivate
/// /admin/usuarios/{id}/reset-password      reset password
/// /admin/empresas                          list, create
/// /admin/empresas/{id}                     get, update, delete
///
/// /empresas/{id}                           public company profile
/// /recrutador/empresa                      own company (get, update)
/// /recrutador/vagas                        own postings, any status
///
/// /curriculo                               own résumé (get, upsert, delete)
/// /curriculo/{section}                     list, create
/// /curriculo/{section}/{id}                get, update, delete
///
/// /vagas                                   search (public), create
/// /vagas/{id}                              get, update, delete
/// /vagas/{id}/status                       open, pause, close
/// /vagas/{id}/candidaturas                 applicants, apply
///
/// /candidaturas                            list (scoped by role)
/// /candidaturas/{id}                       detail
/// /candidaturas/{id}/curriculo             applicant résumé
/// /candidaturas/{id}/status                status transition
/// /candidaturas/{id}/cancelar              candidate withdrawal
/// /candidaturas/{id}/historico             status history
///
/// /dashboard                               role-specific summary
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/empresas", empresas::router())
        .nest("/recrutador", recrutador::router())
        .nest("/curriculo", curriculo::router())
        .nest("/vagas", vagas::router())
        .nest("/candidaturas", candidaturas::router())
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
}
