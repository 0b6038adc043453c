//! Landing page, health checks, static assets and response headers.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use reqwest::{StatusCode, header};

use fleetmaster_integration_tests::TestPortal;

#[tokio::test]
async fn test_landing_page() {
    let portal = TestPortal::new().await;
    let client = portal.client();

    let resp = client.get("/").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Manage Your Fleet with Confidence"));
    assert!(resp.body.contains("Why Choose FleetMaster?"));
    assert!(resp.body.contains("Real-time Tracking"));
    assert!(resp.body.contains("Maintenance Management"));
    assert!(resp.body.contains("Comprehensive Reports"));
    assert!(resp.body.contains("FleetMaster. All rights reserved."));
    assert!(resp.body.contains(r#"href="/register""#));
}

#[tokio::test]
async fn test_landing_page_links_dashboard_when_signed_in() {
    let portal = TestPortal::new().await;
    let client = portal.client();
    client.register("a@x.com", "Acme Haulage", "secret1").await;

    let resp = client.get("/").await;
    assert!(resp.body.contains(r#"href="/dashboard""#));
}

#[tokio::test]
async fn test_form_pages_render() {
    let portal = TestPortal::new().await;
    let client = portal.client();

    let resp = client.get("/login").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"action="/login""#));

    let resp = client.get("/register").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"name="confirmPassword""#));
}

#[tokio::test]
async fn test_health_checks() {
    let portal = TestPortal::new().await;
    let client = portal.client();

    let resp = client.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");

    let resp = client.get("/health/ready").await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_stylesheet_is_served() {
    let portal = TestPortal::new().await;
    let client = portal.client();

    let resp = client.get("/static/css/main.css").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(".dashboard"));
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let portal = TestPortal::new().await;
    let client = portal.client();

    let resp = client.get("/").await;

    let csp = resp.headers.get(header::CONTENT_SECURITY_POLICY).unwrap();
    assert!(csp.to_str().unwrap().starts_with("default-src 'none'"));
    assert_eq!(resp.headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
    assert_eq!(
        resp.headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
        "nosniff"
    );
    assert!(resp.headers.get("x-request-id").is_some());
}
