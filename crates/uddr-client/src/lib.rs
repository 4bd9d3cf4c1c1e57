//! HTTP client for the UDDR API.
//!
//! This crate provides the main [`UddrClient`] for interacting with the UDDR
//! public and private REST APIs, and [`DohClient`] for DNS-over-HTTPS lookups
//! against an organization's resolver.

#![doc(html_root_url = "https://docs.rs/uddr-client/0.3.0")]

mod client;
mod config;
pub mod api;

pub use api::{DohClient, Lookup};
pub use client::{UddrClient, UddrClientBuilder};
pub use config::*;
pub use uddr_core::{Result, UddrError};
