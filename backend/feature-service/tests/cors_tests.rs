//! CORS policy as seen by browsers

mod common;

use actix_web::http::{header, Method, StatusCode};
use actix_web::test;
use common::{admin, default_context, DEFAULT_PATH, VERSIONED_PATH};
use feature_service::build_app;

const ORIGIN: &str = "https://app.example.org";

fn preflight(uri: &str, method: &str) -> test::TestRequest {
    test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri(uri)
        .insert_header((header::ORIGIN, ORIGIN))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, method))
}

#[actix_web::test]
async fn test_preflight_for_post_is_answered_without_credentials() {
    let (ctx, _store) = default_context();
    let app = test::init_service(build_app(ctx)).await;

    let req = preflight(DEFAULT_PATH, "POST")
        .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization, content-type"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let headers = resp.headers();
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), ORIGIN);
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
    assert_eq!(headers.get(header::ACCESS_CONTROL_MAX_AGE).unwrap(), "3600");

    let methods = headers
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    for method in ["GET", "POST", "PUT"] {
        assert!(methods.contains(method), "{} missing from {}", method, methods);
    }
    assert!(!methods.contains("DELETE"));
}

#[actix_web::test]
async fn test_preflight_for_disallowed_method_fails() {
    let (ctx, _store) = default_context();
    let app = test::init_service(build_app(ctx)).await;

    let req = preflight(VERSIONED_PATH, "DELETE").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_client_error());
}

#[actix_web::test]
async fn test_actual_request_echoes_origin() {
    let (ctx, _store) = default_context();
    let app = test::init_service(build_app(ctx)).await;

    let req = test::TestRequest::post()
        .uri(DEFAULT_PATH)
        .insert_header((header::ORIGIN, ORIGIN))
        .insert_header((header::AUTHORIZATION, admin()))
        .set_payload("hello")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        ORIGIN
    );
}

#[actix_web::test]
async fn test_unauthorized_response_still_carries_cors_headers() {
    let (ctx, _store) = default_context();
    let app = test::init_service(build_app(ctx)).await;

    let req = test::TestRequest::post()
        .uri(DEFAULT_PATH)
        .insert_header((header::ORIGIN, ORIGIN))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        ORIGIN
    );
}
