//! Route definitions for the `/curriculo` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::curriculo::{
    self, certificacoes, experiencias, formacoes, habilidades, idiomas, projetos,
};
use crate::state::AppState;

/// Routes mounted at `/curriculo`. Candidate only.
///
/// ```text
/// GET    /                      -> get_curriculo
/// PUT    /                      -> upsert_curriculo
/// DELETE /                      -> delete_curriculo
/// GET    /{section}             -> list
/// POST   /{section}             -> create
/// GET    /{section}/{id}        -> get
/// PUT    /{section}/{id}        -> update
/// DELETE /{section}/{id}        -> delete
/// ```
///
/// Sections: `experiencias`, `formacoes`, `habilidades`, `idiomas`,
/// `projetos`, `certificacoes`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(curriculo::get_curriculo)
                .put(curriculo::upsert_curriculo)
                .delete(curriculo::delete_curriculo),
        )
        .route("/experiencias", get(experiencias::list).post(experiencias::create))
        .route(
            "/experiencias/{id}",
            get(experiencias::get).put(experiencias::update).delete(experiencias::delete),
        )
        .route("/formacoes", get(formacoes::list).post(formacoes::create))
        .route(
            "/formacoes/{id}",
            get(formacoes::get).put(formacoes::update).delete(formacoes::delete),
        )
        .route("/habilidades", get(habilidades::list).post(habilidades::create))
        .route(
            "/habilidades/{id}",
            get(habilidades::get).put(habilidades::update).delete(habilidades::delete),
        )
        .route("/idiomas", get(idiomas::list).post(idiomas::create))
        .route(
            "/idiomas/{id}",
            get(idiomas::get).put(idiomas::update).delete(idiomas::delete),
        )
        .route("/projetos", get(projetos::list).post(projetos::create))
        .route(
            "/projetos/{id}",
            get(projetos::get).put(projetos::update).delete(projetos::delete),
        )
        .route("/certificacoes", get(certificacoes::list).post(certificacoes::create))
        .route(
            "/certificacoes/{id}",
            get(certificacoes::get)
                .put(certificacoes::update)
                .delete(certificacoes::delete),
        )
}
