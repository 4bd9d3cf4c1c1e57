//! `uddr decision` - decision engine data.

use anyhow::Result;

use super::Context;
use crate::cli::args::{DecisionArgs, DecisionCommands};

pub async fn execute(ctx: Context, args: DecisionArgs) -> Result<()> {
    let client = ctx.client()?;

    let response = match args.command {
        DecisionCommands::Countries => client.decision().baseline().countries().await?,
    };

    ctx.print(&response)
}
