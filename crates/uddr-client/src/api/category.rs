//! Domain categorization.

use crate::client::{Target, UddrClient};
use serde_json::json;
use uddr_core::{validate_domain, ApiResponse, Result};

/// Category API endpoint
pub struct CategoryApi<'a> {
    client: &'a UddrClient,
}

impl<'a> CategoryApi<'a> {
    pub(crate) fn new(client: &'a UddrClient) -> Self {
        Self { client }
    }

    /// Look up the content categories of a domain
    pub async fn domain(&self, domain: &str) -> Result<ApiResponse> {
        validate_domain(domain)?;
        self.client
            .post(Target::Private, "/category/v1", &json!({ "domain": domain }))
            .await
    }
}
