//! # uddr-cli
//!
//! Command-line interface for the UDDR DNS security API.
//!
//! ## Features
//!
//! - **Reporting**: aggregates, charts, summaries, executive reports
//! - **Log search**: query logs, passthrough traffic, artifact histograms
//! - **Indicator lookups**: normalize IOCs and resolve them through the
//!   organization's DNS-over-HTTPS resolver with block detection
//! - **Multiple output formats**: JSON, CSV, XML

pub mod cli;
pub mod config;
pub mod log;
pub mod output;

pub use cli::run;
