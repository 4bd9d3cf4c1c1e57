//! Account endpoints on the private API.

use crate::client::{Target, UddrClient};
use serde_json::json;
use uddr_core::{ApiResponse, OrganizationsResponse, Result};

/// Account API endpoints
pub struct AccountApi<'a> {
    client: &'a UddrClient,
}

impl<'a> AccountApi<'a> {
    pub(crate) fn new(client: &'a UddrClient) -> Self {
        Self { client }
    }

    /// Endpoints scoped to the API key's organization
    #[must_use]
    pub const fn organization(&self) -> OrganizationApi<'a> {
        OrganizationApi {
            client: self.client,
        }
    }

    /// Endpoints scoped to the API key's user
    #[must_use]
    pub const fn user(&self) -> UserApi<'a> {
        UserApi {
            client: self.client,
        }
    }
}

/// `/account/organization` endpoints
pub struct OrganizationApi<'a> {
    client: &'a UddrClient,
}

impl OrganizationApi<'_> {
    /// Organization settings
    pub async fn settings(&self) -> Result<ApiResponse> {
        self.post("settings").await
    }

    /// Products the organization subscribes to
    pub async fn products(&self) -> Result<ApiResponse> {
        self.post("products").await
    }

    /// Packages the organization subscribes to
    pub async fn packages(&self) -> Result<ApiResponse> {
        self.post("packages").await
    }

    async fn post(&self, what: &str) -> Result<ApiResponse> {
        self.client
            .post(
                Target::Private,
                &format!("/account/organization/{what}"),
                &json!({}),
            )
            .await
    }
}

/// `/account/user` endpoints
pub struct UserApi<'a> {
    client: &'a UddrClient,
}

impl UserApi<'_> {
    /// Organizations the user belongs to
    pub async fn organizations(&self) -> Result<OrganizationsResponse> {
        self.client
            .post(Target::Private, "/account/user/organizations", &json!({}))
            .await?
            .deserialize()
    }
}
