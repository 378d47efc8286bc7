use crate::AppError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;

/// Activation tier for a tenant's client
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ServiceLayer {
    Basic,
    Plus,
    Pro,
    Elite,
}

impl ServiceLayer {
    pub const ALL: [ServiceLayer; 4] = [
        ServiceLayer::Basic,
        ServiceLayer::Plus,
        ServiceLayer::Pro,
        ServiceLayer::Elite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceLayer::Basic => "basic",
            ServiceLayer::Plus => "plus",
            ServiceLayer::Pro => "pro",
            ServiceLayer::Elite => "elite",
        }
    }
}

impl Display for ServiceLayer {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceLayer {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceLayer::ALL
            .into_iter()
            .find(|layer| layer.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = ServiceLayer::ALL.iter().map(|l| l.as_str()).collect();
                AppError::Validation(format!(
                    "Invalid layer '{}'. Must be one of: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

/// Body of `PATCH /tenants/{id}/clients/{client_id}/activate`.
///
/// `layer` is kept as a raw string so an unknown value yields a validation
/// message listing the accepted layers instead of a generic JSON error.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivateClientRequest {
    pub layer: String,
}

impl ActivateClientRequest {
    pub fn parsed_layer(&self) -> Result<ServiceLayer, AppError> {
        self.layer.trim().parse()
    }
}

/// Client summary as listed by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ClientSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub layer: Option<ServiceLayer>,
    #[serde(default)]
    pub status: Option<String>,
}
