//! Behaviour while the record storage cannot be read or written.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use reqwest::StatusCode;

use fleetmaster_integration_tests::{TestPortal, UnavailableStorage};
use fleetmaster_portal::forms::messages;

async fn unavailable_portal() -> TestPortal {
    TestPortal::with_storage(Arc::new(UnavailableStorage)).await
}

#[tokio::test]
async fn test_login_shows_generic_error() {
    let portal = unavailable_portal().await;
    let client = portal.client();

    let resp = client.login("a@x.com", "secret1").await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.body.contains(messages::UNEXPECTED_ERROR));
    assert!(!resp.body.contains(messages::INVALID_CREDENTIALS));
    assert!(!resp.body.contains("storage offline"));
    assert!(resp.body.contains(r#"value="a@x.com""#));
    assert!(!client.has_session());
}

#[tokio::test]
async fn test_register_shows_generic_error() {
    let portal = unavailable_portal().await;
    let client = portal.client();

    let resp = client.register("a@x.com", "Acme Haulage", "secret1").await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.body.contains(messages::UNEXPECTED_ERROR));
    assert!(!resp.body.contains(messages::REGISTER_SUCCESS));
    assert!(!resp.body.contains("storage offline"));
    assert!(!client.has_session());
}

#[tokio::test]
async fn test_validation_errors_do_not_touch_storage() {
    let portal = unavailable_portal().await;
    let client = portal.client();

    let resp = client.login("a@x", "12345").await;

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains(messages::INVALID_EMAIL));
    assert!(!resp.body.contains(messages::UNEXPECTED_ERROR));
}

#[tokio::test]
async fn test_readiness_reports_unavailable_storage() {
    let portal = unavailable_portal().await;
    let client = portal.client();

    assert_eq!(client.get("/health").await.status, StatusCode::OK);
    assert_eq!(
        client.get("/health/ready").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
}
