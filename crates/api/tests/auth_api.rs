//! HTTP-level tests for registration, login, sessions and admin user
//! management.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    admin_session, body_json, cookie_value, delete_auth, expect_json, get, get_auth, login,
    post_auth, post_json, post_json_auth, put_json_auth, register_candidato, register_recrutador,
    send_with_cookies, set_cookies, PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;
use vagas_core::roles::Role;
use vagas_db::repositories::{CurriculoRepo, UsuarioRepo};

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_candidato_creates_curriculo_and_session(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = json!({
        "nome": "Ana",
        "email": "Ana@Exemplo.com",
        "password": PASSWORD,
        "telefone": "31999990000"
    });
    let response = post_json(&app, "/api/v1/auth/register/candidato", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(cookie_value(&response, "vagas_token").is_some());
    assert!(cookie_value(&response, "vagas_refresh").is_some());

    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "ana@exemplo.com");
    assert_eq!(json["user"]["role"], "candidato");
    assert!(json["user"].get("password_hash").is_none());
    assert_eq!(json["expires_in"], 3600);

    let usuario_id = json["user"]["id"].as_i64().unwrap();
    let curriculo = CurriculoRepo::find_by_usuario(&pool, usuario_id).await.unwrap();
    assert!(curriculo.is_some(), "registration must create an empty curriculo");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_candidato(&app, "dup@exemplo.com").await;

    let body = json!({ "nome": "Outra", "email": "DUP@exemplo.com", "password": PASSWORD });
    let response = post_json(&app, "/api/v1/auth/register/candidato", body).await;
    let json = expect_json(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_rejects_short_password_and_bad_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "nome": "Ana", "email": "ana@exemplo.com", "password": "curta" });
    let response = post_json(&app, "/api/v1/auth/register/candidato", body).await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let body = json!({ "nome": "Ana", "email": "sem-arroba", "password": PASSWORD });
    let response = post_json(&app, "/api/v1/auth/register/candidato", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_recruiters_with_same_cnpj_share_company(pool: PgPool) {
    let app = common::build_test_app(pool);

    let first = register_recrutador(&app, "rh1@empresa.com", "12.345.678/0001-90").await;
    let second = register_recrutador(&app, "rh2@empresa.com", "12345678000190").await;

    let me1 = expect_json(get_auth(&app, "/api/v1/auth/me", &first.token).await, StatusCode::OK).await;
    let me2 = expect_json(get_auth(&app, "/api/v1/auth/me", &second.token).await, StatusCode::OK).await;
    assert_eq!(me1["role"], "recrutador");
    assert!(me1["empresa_id"].is_i64());
    assert_eq!(me1["empresa_id"], me2["empresa_id"]);

    let empresa_id = me1["empresa_id"].as_i64().unwrap();
    let empresa = expect_json(
        get(&app, &format!("/api/v1/empresas/{empresa_id}")).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(empresa["cnpj"], "12345678000190");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_recrutador_rejects_invalid_cnpj(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "nome": "Rui",
        "email": "rui@empresa.com",
        "password": PASSWORD,
        "empresa": { "nome": "Empresa", "cnpj": "123" }
    });
    let response = post_json(&app, "/api/v1/auth/register/recrutador", body).await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert!(json["error"].as_str().unwrap().contains("empresa.cnpj"));
}

// ---------------------------------------------------------------------------
// Login and lockout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success_and_failures(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_candidato(&app, "login@exemplo.com").await;

    let response = login(&app, "LOGIN@exemplo.com", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("vagas_token=") && c.contains("HttpOnly")));

    let response = login(&app, "login@exemplo.com", "senha-errada").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = login(&app, "ninguem@exemplo.com", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_five_failures_lock_the_account(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    register_candidato(&app, "lock@exemplo.com").await;

    for _ in 0..5 {
        let response = login(&app, "lock@exemplo.com", "senha-errada").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = login(&app, "lock@exemplo.com", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let usuario = UsuarioRepo::find_by_email(&pool, "lock@exemplo.com")
        .await
        .unwrap()
        .unwrap();
    assert!(usuario.locked_until.is_some());
    assert_eq!(usuario.failed_login_count, 5);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_expired_lock_restarts_failure_count(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    register_candidato(&app, "volta@exemplo.com").await;
    for _ in 0..5 {
        login(&app, "volta@exemplo.com", "senha-errada").await;
    }
    sqlx::query("UPDATE usuarios SET locked_until = NOW() - INTERVAL '1 minute' WHERE email = $1")
        .bind("volta@exemplo.com")
        .execute(&pool)
        .await
        .unwrap();

    let response = login(&app, "volta@exemplo.com", "senha-errada").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let usuario = UsuarioRepo::find_by_email(&pool, "volta@exemplo.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(usuario.failed_login_count, 1);
    assert!(usuario.locked_until.is_none());

    let response = login(&app, "volta@exemplo.com", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deactivated_account_cannot_login(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let session = register_candidato(&app, "off@exemplo.com").await;
    UsuarioRepo::deactivate(&pool, session.id).await.unwrap();

    let response = login(&app, "off@exemplo.com", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_accepts_cookie_or_bearer(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        &app,
        "/api/v1/auth/register/candidato",
        json!({ "nome": "Bia", "email": "bia@exemplo.com", "password": PASSWORD }),
    )
    .await;
    let access = cookie_value(&response, "vagas_token").unwrap();

    let response = send_with_cookies(
        &app,
        Method::GET,
        "/api/v1/auth/me",
        &format!("vagas_token={access}"),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["email"], "bia@exemplo.com");

    let json = expect_json(get_auth(&app, "/api/v1/auth/me", &access).await, StatusCode::OK).await;
    assert_eq!(json["email"], "bia@exemplo.com");

    let response = get(&app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(&app, "/api/v1/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_from_cookie_rotates_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_candidato(&app, "rot@exemplo.com").await;
    let response = login(&app, "rot@exemplo.com", PASSWORD).await;
    let refresh = cookie_value(&response, "vagas_refresh").unwrap();

    let cookie = format!("vagas_refresh={refresh}");
    let response = send_with_cookies(&app, Method::POST, "/api/v1/auth/refresh", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = cookie_value(&response, "vagas_refresh").unwrap();
    assert_ne!(rotated, refresh, "refresh token must rotate on use");

    // The old token was revoked by the rotation.
    let response = send_with_cookies(&app, Method::POST, "/api/v1/auth/refresh", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_from_body_and_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let session = register_candidato(&app, "body@exemplo.com").await;

    let response = post_json(
        &app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": session.refresh_token }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert!(json["access_token"].is_string());

    let response = post_json(
        &app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": "garbage" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(&app, "/api/v1/auth/refresh", json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_sessions_and_clears_cookies(pool: PgPool) {
    let app = common::build_test_app(pool);
    let session = register_candidato(&app, "bye@exemplo.com").await;

    let response = post_auth(&app, "/api/v1/auth/logout", &session.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("vagas_token=;")));
    assert!(cookies.iter().any(|c| c.starts_with("vagas_refresh=;")));

    let response = post_json(
        &app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": session.refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Admin user management
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_routes_require_admin(pool: PgPool) {
    let app = common::build_test_app(pool);
    let candidato = register_candidato(&app, "nope@exemplo.com").await;

    let response = get_auth(&app, "/api/v1/admin/usuarios", &candidato.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(&app, "/api/v1/admin/usuarios").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_creates_lists_and_deactivates_users(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = admin_session(&app, &pool).await;

    // A recruiter needs a company.
    let response = post_json_auth(
        &app,
        "/api/v1/admin/usuarios",
        &admin.token,
        json!({
            "nome": "Rec", "email": "rec@exemplo.com", "password": PASSWORD,
            "role_id": Role::Recrutador.id()
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let empresa = expect_json(
        post_json_auth(
            &app,
            "/api/v1/admin/empresas",
            &admin.token,
            json!({ "nome": "Acme", "cnpj": "11.222.333/0001-44" }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    let created = expect_json(
        post_json_auth(
            &app,
            "/api/v1/admin/usuarios",
            &admin.token,
            json!({
                "nome": "Rec", "email": "Rec@Exemplo.com", "password": PASSWORD,
                "role_id": Role::Recrutador.id(), "empresa_id": empresa["id"]
            }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(created["role"], "recrutador");
    assert_eq!(created["email"], "rec@exemplo.com");
    let rec_id = created["id"].as_i64().unwrap();

    let list = expect_json(
        get_auth(&app, "/api/v1/admin/usuarios?role=recrutador", &admin.token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
    assert_eq!(list["limit"], 20);

    let response = get_auth(&app, "/api/v1/admin/usuarios?role=chefe", &admin.token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = delete_auth(&app, &format!("/api/v1/admin/usuarios/{rec_id}"), &admin.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = login(&app, "rec@exemplo.com", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The company still has a recruiter referencing it.
    let empresa_id = empresa["id"].as_i64().unwrap();
    let response = delete_auth(&app, &format!("/api/v1/admin/empresas/{empresa_id}"), &admin.token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_reset_password_clears_lock(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = admin_session(&app, &pool).await;
    let candidato = register_candidato(&app, "esqueci@exemplo.com").await;
    for _ in 0..5 {
        login(&app, "esqueci@exemplo.com", "senha-errada").await;
    }

    let response = post_json_auth(
        &app,
        &format!("/api/v1/admin/usuarios/{}/reset-password", candidato.id),
        &admin.token,
        json!({ "new_password": "nova-senha-456" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = login(&app, "esqueci@exemplo.com", "nova-senha-456").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(
        &app,
        "/api/v1/admin/usuarios/999999/reset-password",
        &admin.token,
        json!({ "new_password": "nova-senha-456" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_gets_and_updates_user(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = admin_session(&app, &pool).await;
    let candidato = register_candidato(&app, "perfil@exemplo.com").await;
    let uri = format!("/api/v1/admin/usuarios/{}", candidato.id);

    let json = expect_json(get_auth(&app, &uri, &admin.token).await, StatusCode::OK).await;
    assert_eq!(json["email"], "perfil@exemplo.com");
    assert_eq!(json["role"], "candidato");
    assert!(json.get("password_hash").is_none());

    let response = get_auth(&app, "/api/v1/admin/usuarios/999999", &admin.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let updated = expect_json(
        put_json_auth(
            &app,
            &uri,
            &admin.token,
            json!({ "nome": "Perfil Novo", "email": "Novo@Exemplo.com" }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(updated["nome"], "Perfil Novo");
    assert_eq!(updated["email"], "novo@exemplo.com");

    // A profile edit keeps the user signed in.
    let response = get_auth(&app, "/api/v1/auth/me", &candidato.token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json_auth(&app, &uri, &admin.token, json!({ "role_id": 9 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = put_json_auth(
        &app,
        &uri,
        &admin.token,
        json!({ "role_id": Role::Recrutador.id() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST, "recruiters need a company");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deactivation_rejects_issued_tokens(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = admin_session(&app, &pool).await;
    let rh = register_recrutador(&app, "rh@acme.com", "12345678000190").await;
    let candidato = register_candidato(&app, "saiu@exemplo.com").await;
    let vaga = common::create_vaga(&app, &rh, "Desenvolvedor Rust").await;

    let response = delete_auth(
        &app,
        &format!("/api/v1/admin/usuarios/{}", candidato.id),
        &admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_auth(
        &app,
        &format!("/api/v1/vagas/{vaga}/candidaturas"),
        &candidato.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = get_auth(&app, "/api/v1/auth/me", &candidato.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Deactivating through PUT behaves the same.
    let response = put_json_auth(
        &app,
        &format!("/api/v1/admin/usuarios/{}", rh.id),
        &admin.token,
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get_auth(&app, "/api/v1/recrutador/vagas", &rh.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = post_json(
        &app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": rh.refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_role_change_applies_to_issued_tokens(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = admin_session(&app, &pool).await;
    UsuarioRepo::create(
        &pool,
        &vagas_db::models::usuario::CreateUsuario {
            nome: "Segunda Admin".into(),
            email: "admin2@vagas.test".into(),
            password_hash: vagas_api::auth::password::hash_password(PASSWORD).unwrap(),
            role_id: Role::Admin.id(),
            empresa_id: None,
            telefone: None,
        },
    )
    .await
    .unwrap();
    let json = expect_json(login(&app, "admin2@vagas.test", PASSWORD).await, StatusCode::OK).await;
    let token = json["access_token"].as_str().unwrap().to_string();
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();
    let id = json["user"]["id"].as_i64().unwrap();

    let response = get_auth(&app, "/api/v1/admin/usuarios", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let demoted = expect_json(
        put_json_auth(
            &app,
            &format!("/api/v1/admin/usuarios/{id}"),
            &admin.token,
            json!({ "role_id": Role::Candidato.id() }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(demoted["role"], "candidato");

    let response = get_auth(&app, "/api/v1/admin/usuarios", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let me = expect_json(get_auth(&app, "/api/v1/auth/me", &token).await, StatusCode::OK).await;
    assert_eq!(me["role"], "candidato");

    let response = post_json(
        &app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
