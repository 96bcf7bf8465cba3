//! `AppError` to HTTP response mapping, called through `IntoResponse`
//! directly without a server.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use validator::Validate;
use vagas_api::error::AppError;
use vagas_core::error::CoreError;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let (status, json) = error_to_response(AppError::not_found("Vaga", 42)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Vaga with id 42 not found");
}

#[tokio::test]
async fn core_variants_map_to_their_status() {
    let cases = [
        (CoreError::Validation("bad".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        (CoreError::Conflict("dup".into()), StatusCode::CONFLICT, "CONFLICT"),
        (CoreError::Unauthorized("who".into()), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        (CoreError::Forbidden("no".into()), StatusCode::FORBIDDEN, "FORBIDDEN"),
    ];
    for (err, expected_status, expected_code) in cases {
        let (status, json) = error_to_response(AppError::Core(err)).await;
        assert_eq!(status, expected_status);
        assert_eq!(json["code"], expected_code);
    }
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Internal("db password leaked".into()))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");

    let (status, json) = error_to_response(AppError::InternalError("secret".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!json["error"].as_str().unwrap().contains("secret"));
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("campo inválido".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "campo inválido");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[derive(Validate)]
struct Contato {
    #[validate(length(min = 3))]
    nome: String,
    #[validate(email)]
    email: String,
}

#[tokio::test]
async fn validator_errors_list_fields_in_order() {
    let contato = Contato {
        nome: "x".into(),
        email: "not-an-email".into(),
    };
    let err = contato.validate().unwrap_err();

    let (status, json) = error_to_response(AppError::from(err)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let message = json["error"].as_str().unwrap();
    assert!(message.starts_with("email: "), "got {message}");
    assert!(message.contains("nome: length"), "got {message}");
}

#[test]
fn sqlx_and_validator_errors_convert_into_their_variants() {
    assert_matches!(AppError::from(sqlx::Error::RowNotFound), AppError::Database(sqlx::Error::RowNotFound));
    assert_matches!(
        AppError::from(CoreError::conflict("dup")),
        AppError::Core(CoreError::Conflict(msg)) if msg == "dup"
    );

    let contato = Contato {
        nome: "Ana".into(),
        email: "x".into(),
    };
    let err = contato.validate().unwrap_err();
    assert_matches!(AppError::from(err), AppError::Validation(errors) if errors.field_errors().contains_key("email"));
}
