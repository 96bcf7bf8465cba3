//! Route definitions for `/recrutador`: the caller's own company.

use axum::routing::get;
use axum::Router;

use crate::handlers::{empresas, vagas};
use crate::state::AppState;

/// Routes mounted at `/recrutador`.
///
/// ```text
/// GET /empresa  -> get_own_empresa
/// PUT /empresa  -> update_own_empresa
/// GET /vagas    -> list_own_vagas
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/empresa",
            get(empresas::get_own_empresa).put(empresas::update_own_empresa),
        )
        .route("/vagas", get(vagas::list_own_vagas))
}
