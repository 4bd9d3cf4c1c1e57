//! `uddr reports` - executive reports.

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use super::Context;
use crate::cli::args::{ReportsArgs, ReportsCommands};

pub async fn execute(ctx: Context, args: ReportsArgs) -> Result<()> {
    match args.command {
        ReportsCommands::List { start, end } => list(ctx, start, end).await,
        ReportsCommands::Get { report_id, out } => get(ctx, &report_id, out).await,
    }
}

async fn list(ctx: Context, start: Option<String>, end: Option<String>) -> Result<()> {
    let client = ctx.client()?;

    let mut request = client.reports().list();
    if let Some(start) = start {
        request = request.start(start);
    }
    if let Some(end) = end {
        request = request.end(end);
    }

    ctx.print(&request.send().await?)
}

async fn get(ctx: Context, report_id: &str, out: Option<PathBuf>) -> Result<()> {
    let client = ctx.client()?;
    let pdf = client.reports().report(report_id).await?;

    let path = out.unwrap_or_else(|| PathBuf::from(format!("{report_id}.pdf")));
    std::fs::write(&path, &pdf)?;

    eprintln!(
        "{} wrote {} bytes to {}",
        "Saved:".green().bold(),
        pdf.len(),
        path.display()
    );
    Ok(())
}
