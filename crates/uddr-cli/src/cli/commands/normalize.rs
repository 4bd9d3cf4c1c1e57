//! `uddr normalize` - turn indicators into DNS query names.

use anyhow::Result;
use colored::Colorize;
use uddr::Indicator;

use crate::cli::args::NormalizeArgs;

/// Print one normalized name per indicator. Every indicator is tried; the
/// command fails if any was rejected.
pub fn execute(args: &NormalizeArgs) -> Result<()> {
    let mut rejected = 0usize;

    for raw in &args.iocs {
        match Indicator::parse(raw) {
            Ok(ioc) => println!("{ioc}"),
            Err(e) => {
                eprintln!("{} {e}", "Rejected:".red().bold());
                rejected += 1;
            }
        }
    }

    if rejected > 0 {
        anyhow::bail!("{rejected} of {} indicators could not be normalized", args.iocs.len());
    }
    Ok(())
}
