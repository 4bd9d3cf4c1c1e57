//! Rust client for the UDDR DNS security API.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use uddr::{Filter, RecordType, UddrClient};
//!
//! #[tokio::main]
//! async fn main() -> uddr::Result<()> {
//!     let client = UddrClient::new("your-api-key")?;
//!
//!     // Top blocked domains
//!     let top = client.overview().aggregates("DOMAIN").top_count(10).send().await?;
//!     println!("{}", top.to_csv()?.into_tables().join("\n"));
//!
//!     // Query logs for January
//!     let logs = client
//!         .logs()
//!         .logs(&[Filter::range("DATETIME", "2024-01-01", "2024-01-31")])
//!         .await?;
//!     println!("{}", logs.to_xml()?);
//!
//!     // Resolve a defanged indicator through the organization's resolver
//!     let doh = client.doh().await?;
//!     let mut lookup = doh.lookup("hxxps://evil[.]example.com/payload").await?;
//!     println!("{} {:?}", lookup.status(), lookup.block_info());
//!     println!("{:?}", lookup.records(RecordType::Mx).await?);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/uddr/0.3.0")]

// Re-export core types
pub use uddr_core::*;

// Re-export client
pub use uddr_client::{api, DohClient, Endpoints, Lookup, UddrClient, UddrClientBuilder};

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
