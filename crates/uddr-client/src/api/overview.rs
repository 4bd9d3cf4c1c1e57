//! Overview endpoints: aggregates, bar charts, histograms and summaries.

use crate::client::{Target, UddrClient};
use serde_json::json;
use uddr_core::{
    AggregateQueryType, ApiResponse, BarQueryType, Choice, HistogramQueryType, Result,
    SummaryQueryType,
};

/// Overview API endpoints
pub struct OverviewApi<'a> {
    client: &'a UddrClient,
}

impl<'a> OverviewApi<'a> {
    pub(crate) fn new(client: &'a UddrClient) -> Self {
        Self { client }
    }

    /// Top occurrences of domains, FQDNs, countries, TLDs or registrars
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let top = client.overview().aggregates("domain").top_count(5).send().await?;
    /// ```
    #[must_use]
    pub fn aggregates(&self, query_type: impl Into<String>) -> AggregatesRequestBuilder<'a> {
        AggregatesRequestBuilder::new(self.client, query_type.into())
    }

    /// Bar chart data for one query class
    pub async fn bar(&self, query_type: impl AsRef<str>) -> Result<ApiResponse> {
        let query_type = BarQueryType::parse_for("bar", "query_type", query_type.as_ref())?;
        self.post("/bar", query_type).await
    }

    /// Query counts over time
    pub async fn histogram(&self, query_type: impl AsRef<str>) -> Result<ApiResponse> {
        let query_type =
            HistogramQueryType::parse_for("histogram", "query_type", query_type.as_ref())?;
        self.post("/histogram", query_type).await
    }

    /// Totals for the organization
    pub async fn summary(&self, query_type: impl AsRef<str>) -> Result<ApiResponse> {
        let query_type = SummaryQueryType::parse_for("summary", "query_type", query_type.as_ref())?;
        self.post("/summary", query_type).await
    }

    async fn post<C: Choice>(&self, path: &str, query_type: C) -> Result<ApiResponse> {
        let body = json!({ "applied_filters": { "query_type": query_type.wire() } });
        self.client.post(Target::Public, path, &body).await
    }
}

/// Builder for `/aggregates` requests
pub struct AggregatesRequestBuilder<'a> {
    client: &'a UddrClient,
    query_type: String,
    top_count: Option<u32>,
}

impl<'a> AggregatesRequestBuilder<'a> {
    fn new(client: &'a UddrClient, query_type: String) -> Self {
        Self {
            client,
            query_type,
            top_count: None,
        }
    }

    /// Limit the number of items returned
    #[must_use]
    pub const fn top_count(mut self, count: u32) -> Self {
        self.top_count = Some(count);
        self
    }

    /// Execute the request
    pub async fn send(self) -> Result<ApiResponse> {
        let query_type =
            AggregateQueryType::parse_for("aggregates", "query_type", &self.query_type)?;

        let mut filters = serde_json::Map::new();
        filters.insert("query_type".into(), query_type.wire().into());
        if let Some(count) = self.top_count {
            filters.insert("top_count".into(), count.into());
        }

        self.client
            .post(
                Target::Public,
                "/aggregates",
                &json!({ "applied_filters": filters }),
            )
            .await
    }
}
