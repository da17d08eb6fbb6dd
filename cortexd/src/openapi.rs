//! OpenAPI documentation for the admin API.
//!
//! The generated spec is embedded in a Scalar UI mounted at `/admin/docs`.

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::api;

/// Security scheme: the authenticating proxy injects the caller's email in a
/// trusted header.
struct ProxyHeaderAddon;

impl Modify for ProxyHeaderAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "X-Cortexd-User".to_string(),
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "x-cortexd-user",
                    "Caller identity set by the authenticating proxy. \
                     Admin endpoints require this to match the configured administrator email.",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    servers(
        (url = "/api/admin", description = "CortexDeploy admin API")
    ),
    modifiers(&ProxyHeaderAddon),
    paths(
        api::handlers::users::list_users,
        api::handlers::users::update_user_profile,
        api::handlers::users::delete_user,
        api::handlers::marketplace::list_marketplace,
        api::handlers::marketplace::create_model,
        api::handlers::marketplace::update_model_availability,
        api::handlers::provider_keys::create_provider_key,
    ),
    tags(
        (name = "users", description = "User account administration"),
        (name = "marketplace", description = "Marketplace model catalog"),
        (name = "provider_keys", description = "Upstream key provisioning"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_contains_every_admin_operation() {
        let spec = ApiDoc::openapi();
        let paths: Vec<&String> = spec.paths.paths.keys().collect();
        for expected in ["/users", "/users/{id}", "/marketplace", "/marketplace/{id}", "/openrouter/keys"] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing path {expected}");
        }
    }
}
