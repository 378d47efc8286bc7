//! OpenAPI documentation, served at `/api/openapi.json` and rendered by RapiDoc at `/docs`.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use portal_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portal API",
        version = "0.1.0",
        description = "Backend-for-frontend of the multi-tenant agency portal. Resolves the caller's tenant and brand theme, and forwards tenant-scoped requests to the backend API with the session credential and X-Tenant-ID injected."
    ),
    paths(
        // Auth
        handlers::auth::get_me,
        // Brand
        handlers::brand::get_brand,
        handlers::brand::get_brand_by_host,
        handlers::brand::get_brand_by_domain,
        // Tenants
        handlers::tenants::list_tenants,
        handlers::tenants::current_tenant,
        // Clients
        handlers::clients::list_clients,
        handlers::clients::create_client,
        handlers::clients::activate_client,
        // Invites
        handlers::invites::list_invites,
        handlers::invites::create_invite,
        // Conversations
        handlers::conversations::list_conversations,
        handlers::conversations::create_conversation,
        // Locations
        handlers::locations::connect_whatsapp,
        handlers::locations::disconnect_whatsapp,
        // Files
        handlers::files::get_photo,
        // Integrations
        handlers::integrations::gbp_oauth_start,
        handlers::integrations::search_places,
    ),
    components(
        schemas(
            ErrorResponse,
            models::BrandTheme,
            models::BrandSource,
            models::Organization,
            models::TenantStatus,
            models::TenantSelection,
            models::ResolvedTenant,
            models::CurrentUser,
            models::ServiceLayer,
            models::ClientSummary,
            models::ActivateClientRequest,
        )
    ),
    tags(
        (name = "auth", description = "Session identity"),
        (name = "brand", description = "Brand theme resolution (token, host or domain, default)"),
        (name = "tenants", description = "Organization memberships and active tenant"),
        (name = "clients", description = "Tenant clients and service layer activation"),
        (name = "invites", description = "Tenant member invitations"),
        (name = "conversations", description = "Conversations of the active tenant"),
        (name = "locations", description = "Location messaging channels"),
        (name = "files", description = "File access via backend redirects"),
        (name = "integrations", description = "Google Business Profile and place search"),
    )
)]
pub struct ApiDoc;
