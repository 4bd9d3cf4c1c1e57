//! `uddr aggregates|bar|histogram|summary` - overview reporting.

use anyhow::Result;

use super::Context;
use crate::cli::args::{AggregatesArgs, QueryTypeArgs};

pub async fn aggregates(ctx: Context, args: AggregatesArgs) -> Result<()> {
    let client = ctx.client()?;

    let mut request = client.overview().aggregates(args.query_type);
    if let Some(count) = args.top_count {
        request = request.top_count(count);
    }

    ctx.print(&request.send().await?)
}

pub async fn bar(ctx: Context, args: QueryTypeArgs) -> Result<()> {
    let client = ctx.client()?;
    ctx.print(&client.overview().bar(&args.query_type).await?)
}

pub async fn histogram(ctx: Context, args: QueryTypeArgs) -> Result<()> {
    let client = ctx.client()?;
    ctx.print(&client.overview().histogram(&args.query_type).await?)
}

pub async fn summary(ctx: Context, args: QueryTypeArgs) -> Result<()> {
    let client = ctx.client()?;
    ctx.print(&client.overview().summary(&args.query_type).await?)
}
