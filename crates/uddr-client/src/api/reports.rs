//! Executive report endpoints.

use crate::client::{Target, UddrClient};
use serde::Serialize;
use serde_json::{json, Value};
use uddr_core::date::validate_date;
use uddr_core::{ApiResponse, Result, UddrError};

/// Reports API endpoints
pub struct ReportsApi<'a> {
    client: &'a UddrClient,
}

impl<'a> ReportsApi<'a> {
    pub(crate) fn new(client: &'a UddrClient) -> Self {
        Self { client }
    }

    /// Download one executive report as PDF bytes.
    ///
    /// A no-content reply yields an empty buffer.
    pub async fn report(&self, report_id: &str) -> Result<Vec<u8>> {
        let body = json!({ "applied_filters": { "report_id": report_id } });
        match self.client.post_pdf(Target::Public, "/report", &body).await? {
            ApiResponse::Binary(pdf) => Ok(pdf),
            ApiResponse::Json(Value::Object(map)) if map.is_empty() => Ok(Vec::new()),
            other => Err(UddrError::Format(format!(
                "expected a PDF report, got: {other}"
            ))),
        }
    }

    /// List available reports
    #[must_use]
    pub fn list(&self) -> ReportsListBuilder<'a> {
        ReportsListBuilder::new(self.client)
    }
}

#[derive(Serialize)]
struct ReportsQuery<'q> {
    #[serde(skip_serializing_if = "Option::is_none")]
    datetime_start: Option<&'q str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    datetime_end: Option<&'q str>,
}

/// Builder for `/reports` requests
pub struct ReportsListBuilder<'a> {
    client: &'a UddrClient,
    datetime_start: Option<String>,
    datetime_end: Option<String>,
}

impl<'a> ReportsListBuilder<'a> {
    fn new(client: &'a UddrClient) -> Self {
        Self {
            client,
            datetime_start: None,
            datetime_end: None,
        }
    }

    /// Only reports from this date on
    #[must_use]
    pub fn start(mut self, date: impl Into<String>) -> Self {
        self.datetime_start = Some(date.into());
        self
    }

    /// Only reports up to this date
    #[must_use]
    pub fn end(mut self, date: impl Into<String>) -> Self {
        self.datetime_end = Some(date.into());
        self
    }

    /// Execute the request
    pub async fn send(self) -> Result<ApiResponse> {
        if let Some(start) = &self.datetime_start {
            validate_date("datetime_start", start)?;
        }
        if let Some(end) = &self.datetime_end {
            validate_date("datetime_end", end)?;
        }

        let body = ReportsQuery {
            datetime_start: self.datetime_start.as_deref(),
            datetime_end: self.datetime_end.as_deref(),
        };
        self.client.post(Target::Public, "/reports", &body).await
    }
}
