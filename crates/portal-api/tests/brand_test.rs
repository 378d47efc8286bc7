//! Brand cascade integration tests.
//!
//! Run with: `cargo test -p portal-api --test brand_test`

mod helpers;

use helpers::{
    api_path, mock_brand_by_host_missing, mock_owner_of_org_1, session_cookie,
    setup_test_app, setup_test_app_with, unreachable_backend_server, TOKEN,
};
use mockito::Matcher;
use portal_core::BrandResolutionMode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_anonymous_unknown_host_gets_default_theme() {
    let mut app = setup_test_app().await;
    let _host = mock_brand_by_host_missing(&mut app.backend, "app.example.com").await;

    let response = app
        .client()
        .get(&api_path("/brand/by-host"))
        .add_query_param("host", "app.example.com")
        .add_header("X-Forwarded-Host", "app.example.com")
        .add_header("X-Forwarded-Proto", "https")
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("x-brand-source"), "default");

    let theme: Value = response.json();
    assert_eq!(theme["logo_url"], "https://app.example.com/logo.svg");
    assert_eq!(theme["favicon_url"], "https://app.example.com/favicon.ico");
    assert_eq!(theme["agency_id"], "dev-agency-id");
    assert_eq!(theme["primary_color"], "#2563eb");
    assert_eq!(theme["secondary_color"], "#6b7280");
    assert_eq!(theme["hide_powered_by"], false);
    assert_eq!(theme["theme_json"]["version"], "1.0.0");
}

#[tokio::test]
async fn test_repeated_lookup_returns_same_payload() {
    let mut app = setup_test_app().await;
    let _host = app
        .backend
        .mock("GET", "/api/v1/brand/by-host")
        .match_query(Matcher::UrlEncoded("host".into(), "agency.example.com".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r##"{"agency_id":"ag_1","primary_color":"#101010","hide_powered_by":true}"##)
        .expect(2)
        .create_async()
        .await;

    let first: Value = app
        .client()
        .get(&api_path("/brand/by-host"))
        .add_query_param("host", "agency.example.com")
        .await
        .json();
    let second: Value = app
        .client()
        .get(&api_path("/brand/by-host"))
        .add_query_param("host", "agency.example.com")
        .await
        .json();

    assert_eq!(first, second);
    assert_eq!(first["agency_id"], "ag_1");
    assert_eq!(first["primary_color"], "#101010");
    assert_eq!(first["secondary_color"], "#6b7280");
    assert_eq!(first["hide_powered_by"], true);
}

#[tokio::test]
async fn test_localhost_port_is_stripped_for_lookup() {
    let mut app = setup_test_app().await;
    let host = app
        .backend
        .mock("GET", "/api/v1/brand/by-host")
        .match_query(Matcher::UrlEncoded("host".into(), "localhost".into()))
        .with_status(200)
        .with_body(r##"{"primary_color":"#abcdef"}"##)
        .expect(2)
        .create_async()
        .await;

    for port in ["3001", "4000"] {
        let response = app
            .client()
            .get(&api_path("/brand/by-host"))
            .add_query_param("host", format!("localhost:{}", port))
            .await;
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.header("x-brand-source"), "host");
    }

    host.assert_async().await;
}

#[tokio::test]
async fn test_non_local_port_is_preserved_for_lookup() {
    let mut app = setup_test_app().await;
    let host = app
        .backend
        .mock("GET", "/api/v1/brand/by-host")
        .match_query(Matcher::UrlEncoded("host".into(), "example.com:8443".into()))
        .with_status(404)
        .create_async()
        .await;

    let response = app
        .client()
        .get(&api_path("/brand/by-host"))
        .add_query_param("host", "example.com:8443")
        .await;

    assert_eq!(response.status_code(), 200);
    host.assert_async().await;
}

#[tokio::test]
async fn test_token_brand_wins_over_host() {
    let mut app = setup_test_app().await;
    let _orgs = mock_owner_of_org_1(&mut app.backend).await;
    let _brand = app
        .backend
        .mock("GET", "/api/v1/tenants/org_1/brand")
        .match_header("x-tenant-id", "org_1")
        .with_status(200)
        .with_body(r##"{"agency_id":"org_1","primary_color":"#00ff00","logo_url":"https://cdn.acme.test/logo.png"}"##)
        .create_async()
        .await;
    let _tenant = app
        .backend
        .mock("GET", "/api/v1/tenants/org_1")
        .with_status(200)
        .with_body(r#"{"id":"org_1","name":"Acme Agency","slug":"acme","status":"active"}"#)
        .create_async()
        .await;
    let host = app
        .backend
        .mock("GET", "/api/v1/brand/by-host")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let response = app
        .client()
        .get(&api_path("/brand/by-host"))
        .add_query_param("host", "foreign.example.com")
        .add_header("Cookie", session_cookie())
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("x-brand-source"), "token");
    let theme: Value = response.json();
    assert_eq!(theme["primary_color"], "#00ff00");
    assert_eq!(theme["logo_url"], "https://cdn.acme.test/logo.png");
    assert_eq!(theme["tenant_name"], "Acme Agency");
    assert_eq!(theme["tenant_slug"], "acme");
    assert_eq!(theme["tenant_status"], "active");
    host.assert_async().await;
}

#[tokio::test]
async fn test_rejected_token_falls_through_to_host() {
    let mut app = setup_test_app().await;
    let _orgs = app
        .backend
        .mock("GET", "/api/v1/tenants")
        .with_status(401)
        .create_async()
        .await;
    let _host = app
        .backend
        .mock("GET", "/api/v1/brand/by-host")
        .match_query(Matcher::UrlEncoded("host".into(), "agency.example.com".into()))
        .with_status(200)
        .with_body(r##"{"primary_color":"#222222"}"##)
        .create_async()
        .await;

    let response = app
        .client()
        .get(&api_path("/brand/by-host"))
        .add_query_param("host", "agency.example.com")
        .add_header("Authorization", format!("Bearer {}", TOKEN))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("x-brand-source"), "host");
    assert_eq!(response.json::<Value>()["primary_color"], "#222222");
}

#[tokio::test]
async fn test_missing_tenant_brand_falls_through() {
    let mut app = setup_test_app().await;
    let _orgs = mock_owner_of_org_1(&mut app.backend).await;
    let _brand = app
        .backend
        .mock("GET", "/api/v1/tenants/org_1/brand")
        .with_status(404)
        .create_async()
        .await;
    let _host = mock_brand_by_host_missing(&mut app.backend, "app.example.com").await;

    let response = app
        .client()
        .get(&api_path("/brand/by-host"))
        .add_query_param("host", "app.example.com")
        .add_header("Cookie", session_cookie())
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("x-brand-source"), "default");
}

#[tokio::test]
async fn test_unreachable_backend_still_returns_theme() {
    let server = unreachable_backend_server();

    let response = server
        .get(&api_path("/brand"))
        .add_header("Cookie", session_cookie())
        .add_header("X-Forwarded-Host", "localhost:3001")
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("x-brand-source"), "default");
    let theme: Value = response.json();
    assert_eq!(theme["logo_url"], "http://localhost:3001/logo.svg");
    assert!(theme["primary_color"].as_str().is_some_and(|c| !c.is_empty()));
}

#[tokio::test]
async fn test_domain_mode_uses_domain_lookup() {
    let mut app = setup_test_app_with(|config| {
        config.brand_resolution_mode = BrandResolutionMode::Domain;
    })
    .await;
    let domain = app
        .backend
        .mock("GET", "/api/v1/brand/by-domain")
        .match_query(Matcher::UrlEncoded("domain".into(), "portal.acme.test".into()))
        .with_status(200)
        .with_body(r##"{"domain":"portal.acme.test","primary_color":"#333333"}"##)
        .create_async()
        .await;

    let response = app
        .client()
        .get(&api_path("/brand"))
        .add_header("X-Forwarded-Host", "portal.acme.test")
        .await;

    assert_eq!(response.header("x-brand-source"), "domain");
    assert_eq!(response.json::<Value>()["domain"], "portal.acme.test");
    domain.assert_async().await;
}

#[tokio::test]
async fn test_cdn_base_replaces_origin_for_default_assets() {
    let mut app = setup_test_app_with(|config| {
        config.cdn_base_url = Some("https://cdn.example.com".to_string());
    })
    .await;
    let _host = mock_brand_by_host_missing(&mut app.backend, "app.example.com").await;

    let theme: Value = app
        .client()
        .get(&api_path("/brand"))
        .add_header("X-Forwarded-Host", "app.example.com")
        .await
        .json();

    assert_eq!(theme, {
        let mut expected = theme.clone();
        expected["logo_url"] = json!("https://cdn.example.com/logo.svg");
        expected
    });
}

#[tokio::test]
async fn test_repeated_host_param_still_returns_theme() {
    let mut app = setup_test_app().await;
    let _host = mock_brand_by_host_missing(&mut app.backend, "app.example.com").await;

    let response = app
        .client()
        .get(&api_path("/brand/by-host"))
        .add_query_param("host", "app.example.com")
        .add_query_param("host", "b.example.com")
        .add_header("X-Forwarded-Host", "app.example.com")
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("x-brand-source"), "default");
    let theme: Value = response.json();
    assert_eq!(theme["primary_color"], "#2563eb");
}

#[tokio::test]
async fn test_repeated_domain_param_uses_request_host() {
    let mut app = setup_test_app().await;
    let domain = app
        .backend
        .mock("GET", "/api/v1/brand/by-domain")
        .match_query(Matcher::UrlEncoded("domain".into(), "portal.acme.test".into()))
        .with_status(200)
        .with_body(r##"{"domain":"portal.acme.test","primary_color":"#444444"}"##)
        .create_async()
        .await;

    let response = app
        .client()
        .get(&api_path("/brand/by-domain"))
        .add_query_param("domain", "a.com")
        .add_query_param("domain", "b.com")
        .add_header("X-Forwarded-Host", "portal.acme.test")
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("x-brand-source"), "domain");
    assert_eq!(response.json::<Value>()["primary_color"], "#444444");
    domain.assert_async().await;
}
