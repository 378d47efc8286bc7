use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity behind a session credential, as returned by `GET /auth/me`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct CurrentUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}
