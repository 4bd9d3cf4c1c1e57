//! Decision engine endpoints on the private API.

use crate::client::{Target, UddrClient};
use uddr_core::{ApiResponse, Result};

/// Decision API endpoints
pub struct DecisionApi<'a> {
    client: &'a UddrClient,
}

impl<'a> DecisionApi<'a> {
    pub(crate) fn new(client: &'a UddrClient) -> Self {
        Self { client }
    }

    /// Baseline traffic endpoints
    #[must_use]
    pub const fn baseline(&self) -> BaselineApi<'a> {
        BaselineApi {
            client: self.client,
        }
    }
}

/// `/decision/baseline` endpoints
pub struct BaselineApi<'a> {
    client: &'a UddrClient,
}

impl BaselineApi<'_> {
    /// Countries seen in the organization's baseline traffic
    pub async fn countries(&self) -> Result<ApiResponse> {
        self.client
            .get(Target::Private, "/decision/baseline/countries")
            .await
    }
}
