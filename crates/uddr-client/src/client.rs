//! Main UDDR API client implementation.

use crate::api::*;
use crate::config::{Endpoints, DEFAULT_TIMEOUT};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client as HttpClient, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uddr_core::{ApiResponse, ProtectSettings, RecordType, Result, UddrError};
use url::Url;

const API_KEY_HEADER: &str = "X-API-Key";
const JSON: &str = "application/json";
const PDF: &str = "application/pdf";
const DNS_JSON: &str = "application/dns+json";
const FORM: &str = "application/x-www-form-urlencoded";

/// Which REST service a request goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Public,
    Private,
}

/// Main UDDR API client
#[derive(Clone)]
pub struct UddrClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    api_key: Option<String>,
    client_id: Option<String>,
    organization: Option<String>,
    endpoints: Endpoints,
}

impl UddrClient {
    /// Create a new client with the given API key using default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        UddrClientBuilder::new().api_key(api_key).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> UddrClientBuilder {
        UddrClientBuilder::new()
    }

    /// Configured base URLs
    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }

    /// Access overview endpoints (aggregates, bar, histogram, summary)
    #[must_use]
    pub fn overview(&self) -> OverviewApi<'_> {
        OverviewApi::new(self)
    }

    /// Access executive report endpoints
    #[must_use]
    pub fn reports(&self) -> ReportsApi<'_> {
        ReportsApi::new(self)
    }

    /// Access log, artifact histogram and passthrough endpoints
    #[must_use]
    pub fn logs(&self) -> LogsApi<'_> {
        LogsApi::new(self)
    }

    /// Access the domain category endpoint
    #[must_use]
    pub fn category(&self) -> CategoryApi<'_> {
        CategoryApi::new(self)
    }

    /// Access account endpoints
    #[must_use]
    pub fn account(&self) -> AccountApi<'_> {
        AccountApi::new(self)
    }

    /// Access decision engine endpoints
    #[must_use]
    pub fn decision(&self) -> DecisionApi<'_> {
        DecisionApi::new(self)
    }

    /// Build a DOH client for the configured organization.
    ///
    /// Looks up the user's organizations to find the client id and block
    /// page settings. A client id set on the builder takes precedence over
    /// the one reported by the account.
    pub async fn doh(&self) -> Result<DohClient> {
        self.doh_for(self.inner.organization.as_deref()).await
    }

    /// Build a DOH client for a named organization
    pub async fn doh_for(&self, organization: Option<&str>) -> Result<DohClient> {
        let orgs = self.account().user().organizations().await?;
        let org = orgs.select(organization)?;
        debug!(
            organization = org.organization_name.as_deref().unwrap_or("-"),
            "selected organization for DOH lookups"
        );

        let client_id = self.inner.client_id.clone().or_else(|| org.client_id.clone());
        Ok(DohClient::new(
            self.clone(),
            client_id,
            org.settings.protect_settings.clone(),
        ))
    }

    /// Build a DOH client from a known client id, skipping the account lookup
    #[must_use]
    pub fn doh_with(&self, client_id: impl Into<String>, settings: ProtectSettings) -> DohClient {
        DohClient::new(self.clone(), Some(client_id.into()), settings)
    }

    /// Perform a GET request against a REST service
    pub(crate) async fn get(&self, target: Target, path: &str) -> Result<ApiResponse> {
        let url = self.build_url(target, path)?;
        let key = self.require_api_key()?;
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url)
            .header(API_KEY_HEADER, key)
            .header(CONTENT_TYPE, FORM)
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(|e| UddrError::Http(e.to_string()))?;

        self.handle_response(response, false).await
    }

    /// Perform a POST request with a JSON body
    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        target: Target,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse> {
        self.post_accepting(target, path, body, JSON).await
    }

    /// Perform a POST request with a JSON body, expecting a PDF back
    pub(crate) async fn post_pdf<B: Serialize + ?Sized>(
        &self,
        target: Target,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse> {
        self.post_accepting(target, path, body, PDF).await
    }

    async fn post_accepting<B: Serialize + ?Sized>(
        &self,
        target: Target,
        path: &str,
        body: &B,
        accept: &str,
    ) -> Result<ApiResponse> {
        let url = self.build_url(target, path)?;
        let key = self.require_api_key()?;
        debug!(url = %url, accept, "POST request");

        let response = self
            .inner
            .http
            .post(url)
            .header(API_KEY_HEADER, key)
            .header(ACCEPT, accept)
            .json(body)
            .send()
            .await
            .map_err(|e| UddrError::Http(e.to_string()))?;

        self.handle_response(response, accept == PDF).await
    }

    /// Query the organization's DOH resolver.
    ///
    /// The client id is part of the path; no API key is sent.
    pub(crate) async fn doh_query(
        &self,
        client_id: Option<&str>,
        name: &str,
        record_type: Option<RecordType>,
    ) -> Result<ApiResponse> {
        let client_id = client_id.ok_or_else(|| {
            UddrError::Config(
                "no client id available; set it on the client builder or select an organization"
                    .into(),
            )
        })?;

        let mut params = vec![("name", name)];
        if let Some(rtype) = record_type {
            params.push(("type", rtype.as_str()));
        }

        let base = format!("{}/{}", self.inner.endpoints.doh.trim_end_matches('/'), client_id);
        let url = Url::parse_with_params(&base, &params)
            .map_err(|e| UddrError::InvalidUrl(format!("{base}: {e}")))?;
        debug!(name, record_type = ?record_type, "DOH query");

        let response = self
            .inner
            .http
            .get(url)
            .header(CONTENT_TYPE, FORM)
            .header(ACCEPT, DNS_JSON)
            .send()
            .await
            .map_err(|e| UddrError::Http(e.to_string()))?;

        self.handle_response(response, false).await
    }

    fn require_api_key(&self) -> Result<&str> {
        self.inner.api_key.as_deref().ok_or_else(|| {
            UddrError::Config("no API key provided; pass one to the client builder".into())
        })
    }

    /// Join a service base URL and a path
    fn build_url(&self, target: Target, path: &str) -> Result<Url> {
        let base = match target {
            Target::Public => &self.inner.endpoints.api,
            Target::Private => &self.inner.endpoints.private_api,
        };
        let raw = format!("{}{}", base.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| UddrError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// Decode a response: empty object on 204, bytes when `binary`, else
    /// JSON falling back to text. Non-2xx statuses become errors.
    async fn handle_response(&self, response: reqwest::Response, binary: bool) -> Result<ApiResponse> {
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(ApiResponse::empty());
        }

        if status.is_success() {
            let body = response
                .bytes()
                .await
                .map_err(|e| UddrError::Http(e.to_string()))?;
            Ok(ApiResponse::from_body(body.to_vec(), binary))
        } else {
            self.handle_error(status.as_u16(), response).await
        }
    }

    /// Convert an error response to a UddrError
    async fn handle_error<T>(&self, status: u16, response: reqwest::Response) -> Result<T> {
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();

        // Try to parse error message from JSON
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                ["error", "message", "detail"]
                    .iter()
                    .find_map(|k| v.get(*k).and_then(|e| e.as_str()).map(String::from))
            })
            .unwrap_or(body);

        warn!(status, url = %url, "UDDR API returned an error");

        match status {
            401 | 403 => Err(UddrError::Unauthorized),
            404 => Err(UddrError::NotFound { resource: url }),
            _ => Err(UddrError::Api {
                code: status,
                message,
            }),
        }
    }
}

/// Builder for configuring a [`UddrClient`]
pub struct UddrClientBuilder {
    api_key: Option<String>,
    client_id: Option<String>,
    organization: Option<String>,
    endpoints: Endpoints,
    timeout: Duration,
    user_agent: String,
}

impl Default for UddrClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UddrClientBuilder {
    /// Create a new builder with default endpoints and no credentials
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_key: None,
            client_id: None,
            organization: None,
            endpoints: Endpoints::default(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("uddr-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the API key sent to the REST services
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the client id used in DOH resolver paths
    #[must_use]
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// Set the organization [`UddrClient::doh`] selects when the account
    /// has several
    #[must_use]
    pub fn organization(mut self, name: impl Into<String>) -> Self {
        self.organization = Some(name.into());
        self
    }

    /// Set the service base URLs (useful for testing)
    #[must_use]
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<UddrClient> {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| UddrError::Http(e.to_string()))?;

        Ok(UddrClient {
            inner: Arc::new(ClientInner {
                http,
                api_key: self.api_key,
                client_id: self.client_id,
                organization: self.organization,
                endpoints: self.endpoints,
            }),
        })
    }
}
