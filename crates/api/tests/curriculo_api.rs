//! HTTP-level tests for the candidate's own curriculo and its sections.

mod common;

use axum::http::StatusCode;
use common::{
    delete_auth, expect_json, get_auth, insert_usuario, login, post_json_auth, put_json_auth,
    register_candidato, register_recrutador, PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;
use vagas_core::roles::Role;

fn experiencia() -> serde_json::Value {
    json!({
        "empresa": "UNA",
        "cargo": "Desenvolvedora Backend",
        "data_inicio": "2022-02-01",
        "atual": true
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_full_view_after_registration(pool: PgPool) {
    let app = common::build_test_app(pool);
    let candidato = register_candidato(&app, "cv@exemplo.com").await;

    let json = expect_json(get_auth(&app, "/api/v1/curriculo", &candidato.token).await, StatusCode::OK).await;
    assert_eq!(json["usuario_id"], candidato.id);
    for section in ["experiencias", "formacoes", "habilidades", "idiomas", "projetos", "certificacoes"] {
        assert_eq!(json[section], json!([]), "{section} must start empty");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_section_create_makes_header_on_demand(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    insert_usuario(&pool, "semcv@exemplo.com", Role::Candidato).await;
    let token = expect_json(login(&app, "semcv@exemplo.com", PASSWORD).await, StatusCode::OK).await
        ["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get_auth(&app, "/api/v1/curriculo", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let list = expect_json(get_auth(&app, "/api/v1/curriculo/habilidades", &token).await, StatusCode::OK).await;
    assert_eq!(list["data"], json!([]));

    let created = expect_json(
        post_json_auth(&app, "/api/v1/curriculo/experiencias", &token, experiencia()).await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(created["atual"], true);

    let json = expect_json(get_auth(&app, "/api/v1/curriculo", &token).await, StatusCode::OK).await;
    assert_eq!(json["experiencias"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_upsert_header_and_delete_cascades(pool: PgPool) {
    let app = common::build_test_app(pool);
    let candidato = register_candidato(&app, "header@exemplo.com").await;

    let header = json!({
        "titulo": "Engenheira de Software",
        "cidade": "Belo Horizonte",
        "estado": "MG",
        "github_url": "https://github.com/ana"
    });
    let json = expect_json(
        put_json_auth(&app, "/api/v1/curriculo", &candidato.token, header).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["titulo"], "Engenheira de Software");

    let response = put_json_auth(
        &app,
        "/api/v1/curriculo",
        &candidato.token,
        json!({ "linkedin_url": "not a url" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    post_json_auth(
        &app,
        "/api/v1/curriculo/idiomas",
        &candidato.token,
        json!({ "nome": "Inglês", "nivel": "FLUENTE" }),
    )
    .await;

    let response = delete_auth(&app, "/api/v1/curriculo", &candidato.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get_auth(&app, "/api/v1/curriculo", &candidato.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = delete_auth(&app, "/api/v1/curriculo", &candidato.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_section_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let candidato = register_candidato(&app, "val@exemplo.com").await;

    let ended_before_start = json!({
        "empresa": "UNA", "cargo": "Dev",
        "data_inicio": "2023-05-01", "data_fim": "2022-01-01"
    });
    let response = post_json_auth(&app, "/api/v1/curriculo/experiencias", &candidato.token, ended_before_start).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let current_with_end = json!({
        "instituicao": "UNA", "curso": "Sistemas", "grau": "GRADUACAO",
        "data_inicio": "2020-02-01", "data_fim": "2024-12-01", "em_andamento": true
    });
    let response = post_json_auth(&app, "/api/v1/curriculo/formacoes", &candidato.token, current_with_end).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        &app,
        "/api/v1/curriculo/habilidades",
        &candidato.token,
        json!({ "nome": "Rust", "nivel": "GURU" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let rust = json!({ "nome": "Rust", "nivel": "AVANCADO" });
    let response = post_json_auth(&app, "/api/v1/curriculo/habilidades", &candidato.token, rust.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = post_json_auth(&app, "/api/v1/curriculo/habilidades", &candidato.token, rust).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_sections_are_scoped_to_owner(pool: PgPool) {
    let app = common::build_test_app(pool);
    let dona = register_candidato(&app, "dona@exemplo.com").await;
    let outra = register_candidato(&app, "outra@exemplo.com").await;

    let projeto = expect_json(
        post_json_auth(
            &app,
            "/api/v1/curriculo/projetos",
            &dona.token,
            json!({ "nome": "Vagas UNA", "url": "https://vagas.una.br" }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let id = projeto["id"].as_i64().unwrap();
    let uri = format!("/api/v1/curriculo/projetos/{id}");

    let json = expect_json(get_auth(&app, &uri, &dona.token).await, StatusCode::OK).await;
    assert_eq!(json["url"], "https://vagas.una.br");
    let response = get_auth(&app, &uri, &outra.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json_auth(&app, &uri, &outra.token, json!({ "nome": "Roubado" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = delete_auth(&app, &uri, &outra.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let updated = expect_json(
        put_json_auth(&app, &uri, &dona.token, json!({ "nome": "Vagas UNA v2" })).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(updated["nome"], "Vagas UNA v2");
    assert!(updated["url"].is_null(), "update replaces the whole entry");

    let response = delete_auth(&app, &uri, &dona.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_curriculo_is_candidate_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    let recrutador = register_recrutador(&app, "rh@exemplo.com", "12345678000190").await;

    let response = get_auth(&app, "/api/v1/curriculo", &recrutador.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = post_json_auth(&app, "/api/v1/curriculo/experiencias", &recrutador.token, experiencia()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
