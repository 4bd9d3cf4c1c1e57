//! `uddr account` - account and organization information.

use anyhow::Result;
use uddr::ApiResponse;

use super::Context;
use crate::cli::args::{AccountArgs, AccountCommands};

pub async fn execute(ctx: Context, args: AccountArgs) -> Result<()> {
    let client = ctx.client()?;
    let account = client.account();

    let response = match args.command {
        AccountCommands::Orgs => {
            let orgs = account.user().organizations().await?;
            ApiResponse::from(serde_json::to_value(orgs)?)
        }
        AccountCommands::Settings => account.organization().settings().await?,
        AccountCommands::Products => account.organization().products().await?,
        AccountCommands::Packages => account.organization().packages().await?,
    };

    ctx.print(&response)
}
