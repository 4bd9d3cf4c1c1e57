use serde::{Deserialize, Serialize};

use super::choice::{Choice, LogFilterId, PassthroughFilterId};
use crate::date::validate_date;
use crate::{Result, UddrError};

/// One entry of `applied_filters` for the `/logs` and `/passthrough` endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// Field the filter applies to
    pub id: String,

    /// Exclude matches instead of keeping them
    #[serde(default)]
    pub exclude: bool,

    /// `range_value` is used instead of `value`
    #[serde(default)]
    pub is_range: bool,

    /// Partial (substring) matching
    #[serde(default)]
    pub partial: bool,

    /// Start/end bounds for range filters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_value: Option<RangeValue>,

    /// Exact value for non-range filters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Bounds of a range filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeValue {
    /// Lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    /// Upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl Filter {
    /// Filter matching a single value
    #[must_use]
    pub fn value(id: impl AsRef<str>, value: impl Into<String>) -> Self {
        Self {
            id: id.as_ref().to_string(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Filter matching a range of values
    #[must_use]
    pub fn range(id: impl AsRef<str>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: id.as_ref().to_string(),
            is_range: true,
            range_value: Some(RangeValue {
                start: Some(start.into()),
                end: Some(end.into()),
            }),
            ..Self::default()
        }
    }

    /// Exclude matches
    #[must_use]
    pub fn exclude(mut self, exclude: bool) -> Self {
        self.exclude = exclude;
        self
    }

    /// Match partially
    #[must_use]
    pub fn partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }
}

/// Validate `/logs` filters and return them in wire form.
///
/// Ids are checked against [`LogFilterId`] and sent lower-case. Range
/// filters need both bounds, each a valid date.
pub fn prepare_log_filters(filters: &[Filter]) -> Result<Vec<Filter>> {
    filters
        .iter()
        .map(|filter| -> Result<Filter> {
            let id = LogFilterId::parse_for("logs", "id", &filter.id)?;

            if filter.is_range {
                let range = filter.range_value.as_ref().ok_or_else(|| {
                    UddrError::InvalidFilter(format!("range filter '{id}' has no rangeValue"))
                })?;
                for (key, bound) in [("start", &range.start), ("end", &range.end)] {
                    let bound = bound.as_deref().ok_or_else(|| {
                        UddrError::InvalidFilter(format!("range filter '{id}' has no '{key}' date"))
                    })?;
                    validate_date(&format!("rangeValue.{key}"), bound)?;
                }
            }

            Ok(Filter {
                id: id.wire(),
                ..filter.clone()
            })
        })
        .collect()
}

/// Validate `/passthrough` filters and return them in wire form.
///
/// Ids are checked against [`PassthroughFilterId`]. Range bounds are
/// optional, but those present must be valid dates.
pub fn prepare_passthrough_filters(filters: &[Filter]) -> Result<Vec<Filter>> {
    filters
        .iter()
        .map(|filter| -> Result<Filter> {
            let id = PassthroughFilterId::parse_for("passthrough", "id", &filter.id)?;

            if filter.is_range {
                if let Some(range) = &filter.range_value {
                    if let Some(start) = &range.start {
                        validate_date("rangeValue.start", start)?;
                    }
                    if let Some(end) = &range.end {
                        validate_date("rangeValue.end", end)?;
                    }
                }
            }

            Ok(Filter {
                id: id.wire(),
                ..filter.clone()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_wire_shape() {
        let f = Filter::range("datetime", "2023-06-01", "2023-06-02T00:00:00.000Z").exclude(true);
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(
            v,
            json!({
                "id": "datetime",
                "exclude": true,
                "isRange": true,
                "partial": false,
                "rangeValue": {"start": "2023-06-01", "end": "2023-06-02T00:00:00.000Z"}
            })
        );
    }

    #[test]
    fn test_log_filters_lowercase_ids() {
        let prepared = prepare_log_filters(&[Filter::value("Domain", "example.com").partial(true)]).unwrap();
        assert_eq!(prepared[0].id, "domain");
        assert!(prepared[0].partial);
        assert_eq!(prepared[0].value.as_deref(), Some("example.com"));
    }

    #[test]
    fn test_log_filters_reject_unknown_id() {
        let err = prepare_log_filters(&[Filter::value("FOO", "x")]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("logs: id 'FOO'"), "{msg}");
        assert!(msg.contains("REPUTATION"), "{msg}");
    }

    #[test]
    fn test_log_range_needs_valid_bounds() {
        let bad = Filter::range("DATETIME", "2023-06-01", "June 2nd");
        assert!(matches!(
            prepare_log_filters(&[bad]).unwrap_err(),
            UddrError::InvalidDate { .. }
        ));

        let missing = Filter {
            id: "DATETIME".into(),
            is_range: true,
            ..Filter::default()
        };
        assert!(matches!(
            prepare_log_filters(&[missing]).unwrap_err(),
            UddrError::InvalidFilter(_)
        ));
    }

    #[test]
    fn test_passthrough_filters() {
        let prepared = prepare_passthrough_filters(&[Filter::value("query_count", "10")]).unwrap();
        assert_eq!(prepared[0].id, "QUERY_COUNT");

        let open_range = Filter {
            id: "last_seen".into(),
            is_range: true,
            range_value: Some(RangeValue {
                start: Some("2023-06-01".into()),
                end: None,
            }),
            ..Filter::default()
        };
        assert!(prepare_passthrough_filters(&[open_range]).is_ok());

        let err = prepare_passthrough_filters(&[Filter::value("DOMAIN", "x")]).unwrap_err();
        assert!(err.to_string().contains("LAST_SEEN, ARTIFACT, HYAS_STATUS, ALT_STATUS, QUERY_COUNT"));
    }

    #[test]
    fn test_deserialize_from_camel_case() {
        let f: Filter = serde_json::from_value(json!({
            "id": "ttl",
            "isRange": false,
            "value": "300"
        }))
        .unwrap();
        assert_eq!(f.id, "ttl");
        assert!(!f.exclude);
        assert_eq!(f.value.as_deref(), Some("300"));
    }
}
