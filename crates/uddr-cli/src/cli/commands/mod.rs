//! Command implementations.

pub mod account;
pub mod category;
pub mod config;
pub mod decision;
pub mod logs;
pub mod lookup;
pub mod normalize;
pub mod overview;
pub mod reports;

use uddr::{ApiResponse, Endpoints, UddrClient};

use crate::output::{self, OutputFormat};

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// UDDR API key
    pub api_key: Option<String>,

    /// DOH client id override
    pub client_id: Option<String>,

    /// Organization to select for lookups
    pub organization: Option<String>,

    /// Service base URLs
    pub endpoints: Endpoints,

    /// Output format
    pub output_format: OutputFormat,
}

impl Context {
    /// Get the API key, returning an error if not set.
    pub fn require_api_key(&self) -> anyhow::Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "API key required.\n\n\
                 Set it with one of:\n  \
                 1. --api-key <KEY>\n  \
                 2. UDDR_API_KEY environment variable\n  \
                 3. uddr config set api_key <KEY>"
            )
        })
    }

    /// Create a UDDR client with the configured API key.
    pub fn client(&self) -> anyhow::Result<UddrClient> {
        let key = self.require_api_key()?;
        self.builder().api_key(key).build().map_err(Into::into)
    }

    /// Client builder carrying everything but the API key.
    pub fn builder(&self) -> uddr::UddrClientBuilder {
        let mut builder = UddrClient::builder().endpoints(self.endpoints.clone());
        if let Some(id) = &self.client_id {
            builder = builder.client_id(id);
        }
        if let Some(org) = &self.organization {
            builder = builder.organization(org);
        }
        builder
    }

    /// Print a response in the selected format.
    pub fn print(&self, response: &ApiResponse) -> anyhow::Result<()> {
        output::print(response, self.output_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(api_key: Option<&str>) -> Context {
        Context {
            api_key: api_key.map(String::from),
            client_id: None,
            organization: None,
            endpoints: Endpoints::default(),
            output_format: OutputFormat::Json,
        }
    }

    #[test]
    fn test_require_api_key_explains_sources() {
        let err = ctx(None).require_api_key().unwrap_err();
        assert!(err.to_string().contains("UDDR_API_KEY"));
        assert!(ctx(Some("k")).client().is_ok());
    }
}
