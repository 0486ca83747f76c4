//! OpenAPI Specification for the Agilix API
//!
//! Generated by utoipa from route annotations and schema derives.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error::{ApiError, ErrorCode};
use crate::routes::{contacts, health};

/// OpenAPI document for the Agilix API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agilix API",
        version = "0.4.0",
        description = "Contact list backing the Agilix dashboard",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local Development")
    ),
    tags(
        (name = "Contacts", description = "Agency contact directory"),
        (name = "Health", description = "Liveness checks")
    ),
    paths(
        contacts::list_contacts,
        health::ping,
        health::liveness,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        agilix_core::ContactRecord,
        health::HealthResponse,
        health::HealthStatus,
    )),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Security scheme modifier for OpenAPI document.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token; `sub` is the user id"))
                        .build(),
                ),
            );
        }
    }
}

impl ApiDoc {
    /// Generate OpenAPI spec as JSON string.
    pub fn to_json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::openapi())
    }
}
