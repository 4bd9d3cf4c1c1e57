//! `uddr artifact|logs|passthrough` - log search.

use anyhow::{Context as _, Result};
use uddr::Filter;

use super::Context;
use crate::cli::args::{ArtifactArgs, FilterArgs};

pub async fn artifact(ctx: Context, args: ArtifactArgs) -> Result<()> {
    let client = ctx.client()?;

    let mut request = client.logs().histogram_artifact(
        args.artifact,
        args.artifact_type,
        args.start,
        args.end,
        args.interval,
    );
    if let Some(query_type) = args.query_type {
        request = request.query_type(query_type);
    }

    ctx.print(&request.send().await?)
}

pub async fn logs(ctx: Context, args: FilterArgs) -> Result<()> {
    let filters = parse_filters(&args.filters)?;
    let client = ctx.client()?;
    ctx.print(&client.logs().logs(&filters).await?)
}

pub async fn passthrough(ctx: Context, args: FilterArgs) -> Result<()> {
    let filters = parse_filters(&args.filters)?;
    let client = ctx.client()?;
    ctx.print(&client.logs().passthrough(&filters).await?)
}

/// Accept either one filter object or an array of them.
fn parse_filters(text: &str) -> Result<Vec<Filter>> {
    let value: serde_json::Value =
        serde_json::from_str(text).context("filters must be valid JSON")?;

    let filters = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|f: Filter| vec![f])
    };

    filters.context("filters must look like {\"id\": ..., \"value\": ...}")
}
