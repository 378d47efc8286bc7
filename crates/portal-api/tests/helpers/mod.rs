//! Test helpers: build the router against a mockito backend.
//!
//! Run from workspace root: `cargo test -p portal-api`.

#![allow(dead_code)]

use axum_test::TestServer;
use mockito::{Matcher, Mock, ServerGuard};
use portal_api::constants;
use portal_core::Config;
use serde_json::json;

pub const TOKEN: &str = "tok_owner";

/// API path prefix for tests (e.g. `/api/v1`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus the mocked backend it talks to.
pub struct TestApp {
    pub server: TestServer,
    pub backend: ServerGuard,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Setup test app, letting the caller adjust configuration first.
pub async fn setup_test_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let backend = mockito::Server::new_async().await;
    let mut config = Config::for_backend(backend.url());
    configure(&mut config);

    let (_state, router) = portal_api::setup::build_app(config).expect("build app");
    let server = TestServer::new(router).expect("test server");

    TestApp { server, backend }
}

/// Router pointed at a port nothing listens on
pub fn unreachable_backend_server() -> TestServer {
    let config = Config::for_backend("http://127.0.0.1:9");
    let (_state, router) = portal_api::setup::build_app(config).expect("build app");
    TestServer::new(router).expect("test server")
}

pub fn org_json(id: &str, slug: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": slug.to_uppercase(),
        "slug": slug,
        "role": "owner",
        "status": "active"
    })
}

/// `GET /api/v1/tenants` for [`TOKEN`] returning `orgs`
pub async fn mock_memberships(backend: &mut ServerGuard, orgs: serde_json::Value) -> Mock {
    backend
        .mock("GET", "/api/v1/tenants")
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(orgs.to_string())
        .create_async()
        .await
}

/// Identity that belongs to `org_1` only
pub async fn mock_owner_of_org_1(backend: &mut ServerGuard) -> Mock {
    mock_memberships(backend, json!([org_json("org_1", "acme")])).await
}

pub async fn mock_brand_by_host_missing(backend: &mut ServerGuard, host: &str) -> Mock {
    backend
        .mock("GET", "/api/v1/brand/by-host")
        .match_query(Matcher::UrlEncoded("host".into(), host.into()))
        .with_status(404)
        .create_async()
        .await
}

pub fn session_cookie() -> String {
    format!("__session={}", TOKEN)
}
