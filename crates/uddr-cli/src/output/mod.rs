//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uddr::ApiResponse;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// CSV, one table per row source
    Csv,
    /// XML document rooted at <response>
    Xml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "xml" => Ok(Self::Xml),
            _ => anyhow::bail!(
                "Unknown output format: {s}\n\
                 Valid formats: json, csv, xml"
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Xml => write!(f, "xml"),
        }
    }
}

/// Render a response in the chosen format.
pub fn render(response: &ApiResponse, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Json => match response {
            ApiResponse::Json(value) => serde_json::to_string_pretty(value)?,
            other => other.to_string(),
        },
        OutputFormat::Csv => response.to_csv()?.into_tables().join("\n"),
        OutputFormat::Xml => response.to_xml()?,
    };
    Ok(text)
}

/// Print a response in the chosen format.
pub fn print(response: &ApiResponse, format: OutputFormat) -> Result<()> {
    let text = render(response, format)?;
    println!("{}", text.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_output_format() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Xml.to_string(), "xml");
    }

    #[test]
    fn test_render_formats() {
        let response = ApiResponse::from(json!({ "top_items": [{ "key": "a.com", "count": 2 }] }));

        let json = render(&response, OutputFormat::Json).unwrap();
        assert!(json.contains("\"top_items\""));

        let csv = render(&response, OutputFormat::Csv).unwrap();
        assert!(csv.starts_with(",key,count"));

        let xml = render(&response, OutputFormat::Xml).unwrap();
        assert!(xml.contains("<top_items>"));
    }

    #[test]
    fn test_binary_cannot_be_rendered_as_xml() {
        let response = ApiResponse::Binary(vec![1, 2, 3]);
        assert!(render(&response, OutputFormat::Xml).is_err());
    }
}
