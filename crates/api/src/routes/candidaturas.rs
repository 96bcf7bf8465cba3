//! Route definitions for the `/candidaturas` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::candidaturas;
use crate::state::AppState;

/// Routes mounted at `/candidaturas`. Visibility depends on the caller's role.
///
/// ```text
/// GET   /                 -> list_candidaturas
/// GET   /{id}             -> get_candidatura
/// GET   /{id}/curriculo   -> get_applicant_curriculo (recruiter/admin)
/// PATCH /{id}/status      -> update_candidatura_status
/// POST  /{id}/cancelar    -> cancel_candidatura (candidate)
/// GET   /{id}/historico   -> historico
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(candidaturas::list_candidaturas))
        .route("/{id}", get(candidaturas::get_candidatura))
        .route("/{id}/curriculo", get(candidaturas::get_applicant_curriculo))
        .route("/{id}/status", patch(candidaturas::update_candidatura_status))
        .route("/{id}/cancelar", post(candidaturas::cancel_candidatura))
        .route("/{id}/historico", get(candidaturas::historico))
}
