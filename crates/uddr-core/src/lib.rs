//! Core types and validation for the UDDR API client.
//!
//! This crate provides the foundational pieces used across the UDDR library:
//!
//! - **Types**: request filters, accepted parameter sets, DNS-over-HTTPS
//!   payloads and account/organization responses
//! - **Indicators**: [`Indicator`] turns threat-intel style IOCs into DNS
//!   query names
//! - **Responses**: [`ApiResponse`] with CSV and XML reshaping
//! - **Errors**: Comprehensive error handling with [`UddrError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use uddr_core::{Indicator, Result};
//!
//! fn query_name(raw: &str) -> Result<String> {
//!     let ioc: Indicator = raw.parse()?;
//!     Ok(ioc.to_string())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/uddr-core/0.3.0")]

mod error;
pub mod date;
pub mod ioc;
pub mod response;
pub mod types;

pub use error::{Result, UddrError};
pub use ioc::{validate_domain, Indicator};
pub use response::{ApiResponse, CsvOutput};
pub use types::*;
