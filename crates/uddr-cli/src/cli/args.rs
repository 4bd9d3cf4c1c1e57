//! Command-line argument definitions using clap.

use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface for the UDDR DNS security API
///
/// Report on DNS activity, search query logs, and check indicators of
/// compromise against your organization's resolver.
#[derive(Parser, Debug)]
#[command(name = "uddr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// UDDR API key (or set UDDR_API_KEY env var)
    #[arg(short = 'k', long, env = "UDDR_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// DOH client id, skips the organization lookup
    #[arg(long, env = "UDDR_CLIENT_ID", global = true)]
    pub client_id: Option<String>,

    /// Organization to use when the account has several
    #[arg(long, env = "DEFAULT_ORG_NAME", global = true)]
    pub org: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Public API base URL
    #[arg(long, env = "UDDR_API_URL", global = true, hide = true)]
    pub api_url: Option<String>,

    /// Private API base URL
    #[arg(long, env = "UDDR_PRIVATE_API_URL", global = true, hide = true)]
    pub private_api_url: Option<String>,

    /// DOH resolver base URL
    #[arg(long, env = "UDDR_DOH_URL", global = true, hide = true)]
    pub doh_url: Option<String>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Top domains, FQDNs, countries, TLDs or registrars
    Aggregates(AggregatesArgs),

    /// Bar chart data for a query class
    Bar(QueryTypeArgs),

    /// Query counts over time
    Histogram(QueryTypeArgs),

    /// Organization totals
    Summary(QueryTypeArgs),

    /// Executive reports
    Reports(ReportsArgs),

    /// Histogram of queries involving one artifact
    Artifact(ArtifactArgs),

    /// Search query logs
    Logs(FilterArgs),

    /// Search passthrough traffic
    Passthrough(FilterArgs),

    /// Content categories of a domain
    Category(CategoryArgs),

    /// Account and organization information
    Account(AccountArgs),

    /// Decision engine data
    Decision(DecisionArgs),

    /// Normalize indicators into DNS query names (offline)
    Normalize(NormalizeArgs),

    /// Resolve an indicator through the organization's DOH resolver
    Lookup(LookupArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Overview commands
// ============================================================================

#[derive(Args, Debug)]
pub struct AggregatesArgs {
    /// DOMAIN, FQDN, COUNTRY, TLD or REGISTRAR
    pub query_type: String,

    /// Number of items to return
    #[arg(short = 'n', long)]
    pub top_count: Option<u32>,
}

#[derive(Args, Debug)]
pub struct QueryTypeArgs {
    /// Query type (run with an invalid value to list the accepted ones)
    pub query_type: String,
}

// ============================================================================
// Reports command
// ============================================================================

#[derive(Args, Debug)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub command: ReportsCommands,
}

#[derive(Subcommand, Debug)]
pub enum ReportsCommands {
    /// List available reports
    List {
        /// Only reports from this date (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS.sssZ)
        #[arg(long)]
        start: Option<String>,

        /// Only reports up to this date
        #[arg(long)]
        end: Option<String>,
    },

    /// Download a report as PDF
    Get {
        /// Report id
        report_id: String,

        /// File to write (defaults to <REPORT_ID>.pdf)
        #[arg(short = 'O', long)]
        out: Option<PathBuf>,
    },
}

// ============================================================================
// Logs commands
// ============================================================================

#[derive(Args, Debug)]
pub struct ArtifactArgs {
    /// The artifact, e.g. a domain or IP
    pub artifact: String,

    /// Artifact field, e.g. DOMAIN.KEYWORD or RESPONSE.A.KEYWORD
    #[arg(short = 't', long = "type")]
    pub artifact_type: String,

    /// Start date (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS.sssZ)
    #[arg(long)]
    pub start: String,

    /// End date
    #[arg(long)]
    pub end: String,

    /// Bucket interval, e.g. 1h or 1d
    #[arg(long)]
    pub interval: String,

    /// QUERIES, QUERIES_OVER_DAY or QUERIES_OVER_HOUR
    #[arg(long)]
    pub query_type: Option<String>,
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Filters as a JSON array, e.g.
    /// '[{"id":"DATETIME","isRange":true,"rangeValue":{"start":"2024-01-01","end":"2024-01-31"}}]'
    #[arg(default_value = "[]")]
    pub filters: String,
}

// ============================================================================
// Private API commands
// ============================================================================

#[derive(Args, Debug)]
pub struct CategoryArgs {
    /// Domain to categorize
    pub domain: String,
}

#[derive(Args, Debug)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommands,
}

#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// Organizations you belong to
    Orgs,
    /// Organization settings
    Settings,
    /// Subscribed products
    Products,
    /// Subscribed packages
    Packages,
}

#[derive(Args, Debug)]
pub struct DecisionArgs {
    #[command(subcommand)]
    pub command: DecisionCommands,
}

#[derive(Subcommand, Debug)]
pub enum DecisionCommands {
    /// Countries in the organization's baseline traffic
    Countries,
}

// ============================================================================
// Indicator commands
// ============================================================================

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Indicators: domains, URLs, emails or IPs, defanged or not
    #[arg(required = true)]
    pub iocs: Vec<String>,
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Indicator to resolve
    pub ioc: String,

    /// Also fetch records of these types (A, AAAA, CNAME, MX, NS, SOA, SRV,
    /// TXT, CAA, DS, DNSKEY, PTR)
    #[arg(short = 't', long = "type")]
    pub record_types: Vec<String>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (api_key, organization, client_id, output_format)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show configuration file path
    Path,
}
