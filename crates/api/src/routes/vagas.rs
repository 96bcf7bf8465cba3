//! Route definitions for the `/vagas` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{candidaturas, vagas};
use crate::state::AppState;

/// Routes mounted at `/vagas`.
///
/// ```text
/// GET    /                    -> search_vagas (public)
/// POST   /                    -> create_vaga (recruiter/admin)
/// GET    /{id}                -> get_vaga (public; closed ones owner/admin only)
/// PUT    /{id}                -> update_vaga
/// DELETE /{id}                -> delete_vaga
/// PATCH  /{id}/status         -> set_vaga_status
/// GET    /{id}/candidaturas   -> candidaturas::list_for_vaga
/// POST   /{id}/candidaturas   -> candidaturas::apply (candidate)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(vagas::search_vagas).post(vagas::create_vaga))
        .route(
            "/{id}",
            get(vagas::get_vaga)
                .put(vagas::update_vaga)
                .delete(vagas::delete_vaga),
        )
        .route("/{id}/status", patch(vagas::set_vaga_status))
        .route(
            "/{id}/candidaturas",
            get(candidaturas::list_for_vaga).post(candidaturas::apply),
        )
}
