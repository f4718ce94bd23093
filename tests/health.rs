use axum::http::Request;
use marketplace_api::{
    middleware::request_id::{REQUEST_ID_HEADER, request_id},
    routes::health::health_check,
};

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
}

#[test]
fn request_id_falls_back_to_dash() {
    let tagged = Request::builder()
        .header(REQUEST_ID_HEADER, "3f0c1a7e")
        .body(())
        .unwrap();
    assert_eq!(request_id(&tagged), "3f0c1a7e");

    let bare = Request::builder().body(()).unwrap();
    assert_eq!(request_id(&bare), "-");
}
