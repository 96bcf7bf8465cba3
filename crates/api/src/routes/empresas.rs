use axum::routing::get;
use axum::Router;

use crate::handlers::empresas;
use crate::state::AppState;

/// Routes mounted at `/empresas`.
///
/// ```text
/// GET /{id}  -> get_empresa (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(empresas::get_empresa))
}
