#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use vagas_api::auth::jwt::JwtConfig;
use vagas_api::auth::password::hash_password;
use vagas_api::config::ServerConfig;
use vagas_api::router::build_app_router;
use vagas_api::state::AppState;
use vagas_core::roles::Role;
use vagas_core::types::DbId;
use vagas_db::models::usuario::{CreateUsuario, Usuario};
use vagas_db::repositories::UsuarioRepo;

pub const PASSWORD: &str = "senha-segura-123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        cookie_secure: false,
        jwt: JwtConfig {
            secret: "integration-test-secret-with-enough-length".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 7,
        },
    }
}

/// The production router and middleware stack over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn post_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), None)).await
}

pub async fn put_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn patch_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, request(Method::PATCH, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::DELETE, uri, Some(token), None)).await
}

/// Send a request carrying only a `Cookie` header.
pub async fn send_with_cookies(
    app: &Router,
    method: Method,
    uri: &str,
    cookies: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(COOKIE, cookies)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the JSON body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

/// Raw `Set-Cookie` header values.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// Value of the named cookie from the response's `Set-Cookie` headers.
pub fn cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    set_cookies(response).into_iter().find_map(|header| {
        let pair = header.split(';').next()?.trim().to_string();
        pair.strip_prefix(&prefix).map(str::to_string)
    })
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A signed-in user as seen by the tests.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: DbId,
    pub token: String,
    pub refresh_token: String,
}

fn session_from(json: &Value) -> Session {
    Session {
        id: json["user"]["id"].as_i64().unwrap(),
        token: json["access_token"].as_str().unwrap().to_string(),
        refresh_token: json["refresh_token"].as_str().unwrap().to_string(),
    }
}

pub async fn register_candidato(app: &Router, email: &str) -> Session {
    let body = json!({ "nome": "Ana Candidata", "email": email, "password": PASSWORD });
    let response = post_json(app, "/api/v1/auth/register/candidato", body).await;
    session_from(&expect_json(response, StatusCode::CREATED).await)
}

pub async fn register_recrutador(app: &Router, email: &str, cnpj: &str) -> Session {
    let body = json!({
        "nome": "Rui Recrutador",
        "email": email,
        "password": PASSWORD,
        "empresa": { "nome": format!("Empresa {cnpj}"), "cnpj": cnpj }
    });
    let response = post_json(app, "/api/v1/auth/register/recrutador", body).await;
    session_from(&expect_json(response, StatusCode::CREATED).await)
}

pub async fn login(app: &Router, email: &str, password: &str) -> Response<Body> {
    post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": email, "password": password }),
    )
    .await
}

/// Insert a user straight into the database (no curriculo, no company).
pub async fn insert_usuario(pool: &PgPool, email: &str, role: Role) -> Usuario {
    UsuarioRepo::create(
        pool,
        &CreateUsuario {
            nome: format!("Teste {role}"),
            email: email.to_string(),
            password_hash: hash_password(PASSWORD).unwrap(),
            role_id: role.id(),
            empresa_id: None,
            telefone: None,
        },
    )
    .await
    .unwrap()
}

pub async fn admin_session(app: &Router, pool: &PgPool) -> Session {
    insert_usuario(pool, "admin@vagas.test", Role::Admin).await;
    let response = login(app, "admin@vagas.test", PASSWORD).await;
    session_from(&expect_json(response, StatusCode::OK).await)
}

/// Create an open posting as `recrutador` and return its id.
pub async fn create_vaga(app: &Router, recrutador: &Session, titulo: &str) -> DbId {
    let body = json!({
        "titulo": titulo,
        "descricao": "Desenvolvimento de APIs em Rust",
        "tipo_contrato": "CLT",
        "modalidade": "REMOTO",
        "localizacao": "Belo Horizonte",
        "salario_min": 5000,
        "salario_max": 9000
    });
    let response = post_json_auth(app, "/api/v1/vagas", &recrutador.token, body).await;
    expect_json(response, StatusCode::CREATED).await["id"]
        .as_i64()
        .unwrap()
}
