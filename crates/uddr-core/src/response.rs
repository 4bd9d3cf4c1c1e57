//! API response payloads and their CSV/XML renderings.

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::LazyLock;

use crate::{Result, UddrError};

static XML_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9._-]*$").expect("XML name pattern compiles"));

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Body of an API response
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// A JSON document (also used for empty "no content" replies)
    Json(Value),
    /// Raw bytes, e.g. a PDF report
    Binary(Vec<u8>),
    /// A body that was not valid JSON
    Text(String),
}

/// CSV rendering of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvOutput {
    /// One table
    Single(String),
    /// Responses carrying both `aggregates` and `logs` produce two tables
    Paired {
        /// Table built from `aggregates`
        aggregates: String,
        /// Table built from `logs`
        logs: String,
    },
}

impl CsvOutput {
    /// All tables, in order
    #[must_use]
    pub fn into_tables(self) -> Vec<String> {
        match self {
            Self::Single(table) => vec![table],
            Self::Paired { aggregates, logs } => vec![aggregates, logs],
        }
    }
}

impl ApiResponse {
    /// An empty JSON object, what a 204 reply turns into
    #[must_use]
    pub fn empty() -> Self {
        Self::Json(Value::Object(Map::new()))
    }

    /// Decode a successful response body.
    ///
    /// With `binary` set the bytes are kept as-is. Otherwise JSON is tried
    /// first, falling back to text.
    #[must_use]
    pub fn from_body(body: Vec<u8>, binary: bool) -> Self {
        if binary {
            return Self::Binary(body);
        }
        match serde_json::from_slice(&body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(String::from_utf8_lossy(&body).into_owned()),
        }
    }

    /// The JSON document, if this is one
    #[must_use]
    pub const fn json(&self) -> Option<&Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Raw bytes, if this is a binary payload
    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    /// Look up a top-level key of a JSON object response
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.json()?.get(key)
    }

    /// Deserialize a JSON response into a typed value
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        match self {
            Self::Json(v) => T::deserialize(v).map_err(UddrError::Json),
            Self::Text(t) => serde_json::from_str(t).map_err(UddrError::Json),
            Self::Binary(_) => Err(UddrError::Format("binary payload is not JSON".into())),
        }
    }

    /// Flatten the response into CSV.
    ///
    /// Rows come from the first of `top_items`, `logs` (alone), `reports`
    /// found in the object; an object holding both `aggregates` and `logs`
    /// gives one table each. Anything else is flattened whole.
    pub fn to_csv(&self) -> Result<CsvOutput> {
        let data = match self {
            Self::Json(v) => v,
            Self::Text(_) => return Err(UddrError::Format("text payload cannot be tabulated".into())),
            Self::Binary(_) => {
                return Err(UddrError::Format("binary payload cannot be tabulated".into()))
            }
        };

        let has = |key: &str| data.get(key).is_some();

        if let Some(items) = data.get("top_items") {
            Ok(CsvOutput::Single(to_table(items)?))
        } else if has("logs") && !has("aggregates") {
            Ok(CsvOutput::Single(to_table(&data["logs"])?))
        } else if let Some(reports) = data.get("reports") {
            Ok(CsvOutput::Single(to_table(reports)?))
        } else if has("aggregates") && has("logs") {
            Ok(CsvOutput::Paired {
                aggregates: to_table(&data["aggregates"])?,
                logs: to_table(&data["logs"])?,
            })
        } else {
            Ok(CsvOutput::Single(to_table(data)?))
        }
    }

    /// Serialize the response as an XML document rooted at `<response>`.
    ///
    /// Object keys become element names and must be valid XML names.
    pub fn to_xml(&self) -> Result<String> {
        let mut out = String::from(XML_DECLARATION);
        out.push('\n');
        match self {
            Self::Json(Value::Array(items)) => {
                out.push_str("<response>");
                for item in items {
                    write_element(&mut out, "item", item)?;
                }
                out.push_str("</response>");
            }
            Self::Json(v) => write_element(&mut out, "response", v)?,
            Self::Text(t) => {
                out.push_str("<response>");
                out.push_str(&escape_xml(t));
                out.push_str("</response>");
            }
            Self::Binary(_) => {
                return Err(UddrError::Format("binary payload cannot be converted to XML".into()))
            }
        }
        Ok(out)
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(v) => write!(f, "{v}"),
            Self::Text(t) => write!(f, "{}", Value::String(t.clone())),
            Self::Binary(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<Value> for ApiResponse {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

// ----------------------------------------------------------------------------
// CSV
// ----------------------------------------------------------------------------

fn to_table(value: &Value) -> Result<String> {
    let rows: Vec<Vec<(String, String)>> = match value {
        Value::Array(items) => items.iter().map(flatten_row).collect(),
        other => vec![flatten_row(other)],
    };

    let mut columns: Vec<&str> = Vec::new();
    for (key, _) in rows.iter().flatten() {
        if !columns.contains(&key.as_str()) {
            columns.push(key);
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(std::iter::once("").chain(columns.iter().copied()))?;

    for (index, row) in rows.iter().enumerate() {
        let mut record = vec![index.to_string()];
        for column in &columns {
            let cell = row
                .iter()
                .find(|(k, _)| k.as_str() == *column)
                .map(|(_, v)| v.clone())
                .unwrap_or_default();
            record.push(cell);
        }
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| UddrError::Format(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| UddrError::Format(e.to_string()))
}

fn flatten_row(value: &Value) -> Vec<(String, String)> {
    let mut cells = Vec::new();
    match value {
        Value::Object(map) => flatten_into(&mut cells, None, map),
        scalar => cells.push(("value".to_string(), cell_text(scalar))),
    }
    cells
}

/// Nested object keys are joined with `.`.
fn flatten_into(cells: &mut Vec<(String, String)>, prefix: Option<&str>, map: &Map<String, Value>) {
    for (key, value) in map {
        let name = prefix.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
        match value {
            Value::Object(inner) if !inner.is_empty() => flatten_into(cells, Some(&name), inner),
            other => cells.push((name, cell_text(other))),
        }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ----------------------------------------------------------------------------
// XML
// ----------------------------------------------------------------------------

fn write_element(out: &mut String, name: &str, value: &Value) -> Result<()> {
    if !is_xml_name(name) {
        return Err(UddrError::Format(format!("invalid XML element name: '{name}'")));
    }

    match value {
        Value::Array(items) => {
            for item in items {
                write_element(out, name, item)?;
            }
        }
        Value::Object(map) => {
            out.push_str(&format!("<{name}>"));
            for (key, child) in map {
                write_element(out, key, child)?;
            }
            out.push_str(&format!("</{name}>"));
        }
        scalar => {
            out.push_str(&format!("<{name}>{}</{name}>", escape_xml(&cell_text(scalar))));
        }
    }
    Ok(())
}

fn is_xml_name(name: &str) -> bool {
    XML_NAME.is_match(name) && !name.to_ascii_lowercase().starts_with("xml")
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_body() {
        assert_eq!(
            ApiResponse::from_body(br#"{"a":1}"#.to_vec(), false),
            ApiResponse::Json(json!({"a": 1}))
        );
        assert_eq!(
            ApiResponse::from_body(b"not json".to_vec(), false),
            ApiResponse::Text("not json".into())
        );
        assert_eq!(
            ApiResponse::from_body(b"%PDF-1.7".to_vec(), true),
            ApiResponse::Binary(b"%PDF-1.7".to_vec())
        );
    }

    #[test]
    fn test_csv_from_top_items() {
        let resp = ApiResponse::Json(json!({
            "query_type": "domain",
            "top_items": [
                {"key": "debug.opendns.com", "current_doc_count": 9116, "previous_doc_count": 7151},
                {"key": "example.com", "current_doc_count": 12}
            ]
        }));
        let csv = resp.to_csv().unwrap();
        assert_eq!(
            csv,
            CsvOutput::Single(
                ",key,current_doc_count,previous_doc_count\n\
                 0,debug.opendns.com,9116,7151\n\
                 1,example.com,12,\n"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_csv_flattens_nested_objects() {
        let resp = ApiResponse::Json(json!({
            "logs": [{"domain": "a.example", "response": {"a": "192.0.2.1", "ttl": 60}, "tags": ["x", "y"]}]
        }));
        let CsvOutput::Single(table) = resp.to_csv().unwrap() else {
            panic!("expected one table");
        };
        assert_eq!(
            table,
            ",domain,response.a,response.ttl,tags\n0,a.example,192.0.2.1,60,\"[\"\"x\"\",\"\"y\"\"]\"\n"
        );
    }

    #[test]
    fn test_csv_paired_tables() {
        let resp = ApiResponse::Json(json!({
            "aggregates": [{"key": "k", "count": 1}],
            "logs": [{"domain": "d"}]
        }));
        let tables = resp.to_csv().unwrap().into_tables();
        assert_eq!(tables, vec![",key,count\n0,k,1\n".to_string(), ",domain\n0,d\n".to_string()]);
    }

    #[test]
    fn test_csv_whole_object() {
        let resp = ApiResponse::Json(json!({"day_count": 1, "query_type": "BLOCKED", "total_count": 0}));
        assert_eq!(
            resp.to_csv().unwrap(),
            CsvOutput::Single(",day_count,query_type,total_count\n0,1,BLOCKED,0\n".into())
        );
        assert!(ApiResponse::Binary(vec![1]).to_csv().is_err());
    }

    #[test]
    fn test_xml_document() {
        let resp = ApiResponse::Json(json!({
            "query_type": "tld",
            "top_items": [{"key": "com"}, {"key": "a&b"}],
            "empty": null
        }));
        assert_eq!(
            resp.to_xml().unwrap(),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <response><query_type>tld</query_type>\
             <top_items><key>com</key></top_items>\
             <top_items><key>a&amp;b</key></top_items>\
             <empty></empty></response>"
        );
    }

    #[test]
    fn test_xml_rejects_bad_names() {
        let resp = ApiResponse::Json(json!({"2023-06-01": 5}));
        let err = resp.to_xml().unwrap_err();
        assert!(err.to_string().contains("'2023-06-01'"), "{err}");

        let resp = ApiResponse::Json(json!({"has space": 1}));
        assert!(resp.to_xml().is_err());
    }

    #[test]
    fn test_get_and_deserialize() {
        let resp = ApiResponse::Json(json!({"organizations": []}));
        assert_eq!(resp.get("organizations"), Some(&json!([])));
        assert_eq!(resp.get("missing"), None);
        let v: Value = resp.deserialize().unwrap();
        assert!(v.is_object());
        assert_eq!(resp.to_string(), r#"{"organizations":[]}"#);
    }
}
