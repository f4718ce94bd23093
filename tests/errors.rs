use axum::{http::StatusCode, response::IntoResponse};
use marketplace_api::{
    error::AppError,
    middleware::auth::decode_session,
    models::Role,
    services::auth_service::issue_token,
};

#[test]
fn errors_map_to_http_statuses() {
    let cases = [
        (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        (AppError::Forbidden, StatusCode::FORBIDDEN),
        (AppError::NoSellerItems, StatusCode::FORBIDDEN),
        (AppError::NotFound, StatusCode::NOT_FOUND),
        (AppError::Conflict("dup".into()), StatusCode::CONFLICT),
        (
            AppError::Internal(anyhow::anyhow!("boom")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];
    for (err, status) in cases {
        assert_eq!(err.status(), status);
        assert_eq!(err.into_response().status(), status);
    }
}

#[test]
fn seller_error_message_is_stable() {
    assert_eq!(
        AppError::NoSellerItems.to_string(),
        "No items from this seller in the order"
    );
}

#[test]
fn issued_token_decodes_to_the_same_session() {
    let token = issue_token(42, Role::Seller, true, "test-secret").unwrap();
    let session = decode_session(&token, "test-secret").unwrap();
    assert_eq!(session.user_id, 42);
    assert_eq!(session.role, Role::Seller);
    assert!(session.is_admin);
    assert!(session.has_admin_rights());
}

#[test]
fn token_signed_with_other_secret_is_unauthorized() {
    let token = issue_token(42, Role::Customer, false, "one-secret").unwrap();
    assert!(matches!(
        decode_session(&token, "another-secret"),
        Err(AppError::Unauthorized)
    ));
}
