//! Domain route groups. Each function returns a router that is merged in setup_routes.

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, patch, put},
    Router,
};
use std::sync::Arc;

pub(super) fn auth_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        &format!("{}/auth/me", API_PREFIX),
        get(handlers::auth::get_me),
    )
}

pub(super) fn brand_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/brand", API_PREFIX),
            get(handlers::brand::get_brand),
        )
        .route(
            &format!("{}/brand/by-host", API_PREFIX),
            get(handlers::brand::get_brand_by_host),
        )
        .route(
            &format!("{}/brand/by-domain", API_PREFIX),
            get(handlers::brand::get_brand_by_domain),
        )
}

pub(super) fn tenant_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/tenants", API_PREFIX),
            get(handlers::tenants::list_tenants),
        )
        .route(
            &format!("{}/tenants/current", API_PREFIX),
            get(handlers::tenants::current_tenant),
        )
        .route(
            &format!("{}/tenants/{{id}}/clients", API_PREFIX),
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            &format!("{}/tenants/{{id}}/clients/{{client_id}}/activate", API_PREFIX),
            patch(handlers::clients::activate_client),
        )
        .route(
            &format!("{}/tenants/{{id}}/invites", API_PREFIX),
            get(handlers::invites::list_invites).post(handlers::invites::create_invite),
        )
}

pub(super) fn conversation_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        &format!("{}/conversations", API_PREFIX),
        get(handlers::conversations::list_conversations)
            .post(handlers::conversations::create_conversation),
    )
}

pub(super) fn location_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        &format!("{}/locations/{{id}}/whatsapp", API_PREFIX),
        put(handlers::locations::connect_whatsapp)
            .delete(handlers::locations::disconnect_whatsapp),
    )
}

pub(super) fn file_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        &format!("{}/files/{{id}}/photo", API_PREFIX),
        get(handlers::files::get_photo),
    )
}

pub(super) fn integration_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/gbp/oauth/start", API_PREFIX),
            get(handlers::integrations::gbp_oauth_start),
        )
        .route(
            &format!("{}/smb/places/search", API_PREFIX),
            get(handlers::integrations::search_places),
        )
}
