//! `uddr lookup` - resolve an indicator through the organization's resolver.

use anyhow::Result;
use serde_json::{json, Map, Value};
use tracing::debug;
use uddr::{ApiResponse, DohClient, ProtectSettings, RecordType};

use super::Context;
use crate::cli::args::LookupArgs;

pub async fn execute(ctx: Context, args: LookupArgs) -> Result<()> {
    let record_types = args
        .record_types
        .iter()
        .map(|t| t.parse::<RecordType>())
        .collect::<Result<Vec<_>, _>>()?;

    let doh = doh_client(&ctx).await?;
    let mut lookup = doh.lookup(&args.ioc).await?;

    let mut records = Map::new();
    for record_type in record_types {
        let answer = lookup.records(record_type).await?;
        records.insert(record_type.to_string(), serde_json::to_value(answer)?);
    }

    let report = json!({
        "indicator": lookup.indicator().as_str(),
        "query_type": lookup.query_type(),
        "status": lookup.status(),
        "block": lookup.block_info(),
        "answer": lookup.answer(),
        "authority": lookup.authority(),
        "records": Value::Object(records),
    });

    ctx.print(&ApiResponse::from(report))
}

/// With an API key the organization is looked up for its client id and
/// block page settings. A bare client id is enough to resolve, but block
/// detection is then unavailable.
async fn doh_client(ctx: &Context) -> Result<DohClient> {
    match (&ctx.api_key, &ctx.client_id) {
        (None, Some(client_id)) => {
            debug!("no API key, resolving without organization settings");
            let client = ctx.builder().build()?;
            Ok(client.doh_with(client_id.clone(), ProtectSettings::default()))
        }
        _ => Ok(ctx.client()?.doh().await?),
    }
}
