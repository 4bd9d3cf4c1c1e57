//! Query log endpoints.

use crate::client::{Target, UddrClient};
use serde_json::json;
use uddr_core::date::validate_date;
use uddr_core::{
    prepare_log_filters, prepare_passthrough_filters, ApiResponse, ArtifactQueryType,
    ArtifactType, Choice, Filter, Result,
};

/// Logs API endpoints
pub struct LogsApi<'a> {
    client: &'a UddrClient,
}

impl<'a> LogsApi<'a> {
    pub(crate) fn new(client: &'a UddrClient) -> Self {
        Self { client }
    }

    /// Histogram of queries involving a single artifact.
    ///
    /// `start_date` and `end_date` take `YYYY-MM-DD` or
    /// `YYYY-MM-DDTHH:MM:SS.sssZ`. `interval` is passed through as-is.
    #[must_use]
    pub fn histogram_artifact(
        &self,
        artifact: impl Into<String>,
        artifact_type: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        interval: impl Into<String>,
    ) -> ArtifactHistogramBuilder<'a> {
        ArtifactHistogramBuilder {
            client: self.client,
            artifact: artifact.into(),
            artifact_type: artifact_type.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            interval: interval.into(),
            query_type: None,
        }
    }

    /// Search the query logs
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use uddr_core::Filter;
    ///
    /// let logs = client
    ///     .logs()
    ///     .logs(&[Filter::range("DATETIME", "2024-01-01", "2024-01-31")])
    ///     .await?;
    /// ```
    pub async fn logs(&self, filters: &[Filter]) -> Result<ApiResponse> {
        let filters = prepare_log_filters(filters)?;
        self.client
            .post(Target::Public, "/logs", &json!({ "applied_filters": filters }))
            .await
    }

    /// Search passthrough (allowed) traffic
    pub async fn passthrough(&self, filters: &[Filter]) -> Result<ApiResponse> {
        let filters = prepare_passthrough_filters(filters)?;
        self.client
            .post(
                Target::Public,
                "/passthrough",
                &json!({ "applied_filters": filters }),
            )
            .await
    }
}

/// Builder for `/histogram/artifact` requests
pub struct ArtifactHistogramBuilder<'a> {
    client: &'a UddrClient,
    artifact: String,
    artifact_type: String,
    start_date: String,
    end_date: String,
    interval: String,
    query_type: Option<String>,
}

impl ArtifactHistogramBuilder<'_> {
    /// Choose the series: QUERIES, QUERIES_OVER_DAY or QUERIES_OVER_HOUR
    #[must_use]
    pub fn query_type(mut self, query_type: impl Into<String>) -> Self {
        self.query_type = Some(query_type.into());
        self
    }

    /// Execute the request
    pub async fn send(self) -> Result<ApiResponse> {
        const OP: &str = "histogram_artifact";

        let artifact_type = ArtifactType::parse_for(OP, "artifact_type", &self.artifact_type)?;
        validate_date("start_date", &self.start_date)?;
        validate_date("end_date", &self.end_date)?;
        let query_type = self
            .query_type
            .as_deref()
            .map(|q| ArtifactQueryType::parse_for(OP, "query_type", q))
            .transpose()?;

        let mut filters = serde_json::Map::new();
        filters.insert("artifact".into(), self.artifact.into());
        filters.insert("artifact_type".into(), artifact_type.wire().into());
        filters.insert("start_date".into(), self.start_date.into());
        filters.insert("end_date".into(), self.end_date.into());
        filters.insert("interval".into(), self.interval.into());
        if let Some(query_type) = query_type {
            filters.insert("query_type".into(), query_type.wire().into());
        }

        self.client
            .post(
                Target::Public,
                "/histogram/artifact",
                &json!({ "applied_filters": filters }),
            )
            .await
    }
}
