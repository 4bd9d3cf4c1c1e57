//! `uddr category` - domain categorization.

use anyhow::Result;

use super::Context;
use crate::cli::args::CategoryArgs;

pub async fn execute(ctx: Context, args: CategoryArgs) -> Result<()> {
    let client = ctx.client()?;
    ctx.print(&client.category().domain(&args.domain).await?)
}
