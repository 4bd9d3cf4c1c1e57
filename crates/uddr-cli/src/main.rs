//! uddr - UDDR DNS security API from the command line.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    uddr_cli::run().await
}
