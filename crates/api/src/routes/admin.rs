//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /usuarios                     -> list_usuarios
/// POST   /usuarios                     -> create_usuario
/// GET    /usuarios/{id}                -> get_usuario
/// PUT    /usuarios/{id}                -> update_usuario
/// DELETE /usuarios/{id}                -> deactivate_usuario
/// POST   /usuarios/{id}/reset-password -> reset_password
/// GET    /empresas                     -> list_empresas
/// POST   /empresas                     -> create_empresa
/// GET    /empresas/{id}                -> get_empresa
/// PUT    /empresas/{id}                -> update_empresa
/// DELETE /empresas/{id}                -> delete_empresa
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/usuarios",
            get(admin::list_usuarios).post(admin::create_usuario),
        )
        .route(
            "/usuarios/{id}",
            get(admin::get_usuario)
                .put(admin::update_usuario)
                .delete(admin::deactivate_usuario),
        )
        .route("/usuarios/{id}/reset-password", post(admin::reset_password))
        .route(
            "/empresas",
            get(admin::list_empresas).post(admin::create_empresa),
        )
        .route(
            "/empresas/{id}",
            get(admin::get_empresa)
                .put(admin::update_empresa)
                .delete(admin::delete_empresa),
        )
}
