//! DNS-over-HTTPS lookups against an organization's resolver.
//!
//! A [`DohClient`] knows the organization's client id and block page
//! settings. Each [`DohClient::lookup`] normalizes an indicator, resolves it
//! once, and then answers per-type record questions from a cache so every
//! record type hits the network at most once per lookup.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::client::UddrClient;
use tracing::debug;
use uddr_core::{
    BlockInfo, DohResponse, Indicator, ProtectSettings, RecordType, ResourceRecord, Result,
    StatusReason,
};

/// Resolver client bound to one organization
#[derive(Clone)]
pub struct DohClient {
    client: UddrClient,
    client_id: Option<String>,
    settings: ProtectSettings,
}

impl DohClient {
    pub(crate) fn new(
        client: UddrClient,
        client_id: Option<String>,
        settings: ProtectSettings,
    ) -> Self {
        Self {
            client,
            client_id,
            settings,
        }
    }

    /// Client id used in resolver paths
    #[must_use]
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// IPv4 address the resolver hands out for blocked names
    #[must_use]
    pub fn block_page_ip(&self) -> Option<&str> {
        self.settings.block_portal_ipv4.as_deref()
    }

    /// Returns true if the organization has its block page turned on
    #[must_use]
    pub fn block_page_enabled(&self) -> bool {
        self.settings.block_page_enabled()
    }

    /// Resolve an indicator.
    ///
    /// The indicator is normalized first; reverse names are queried for
    /// `PTR`. When a block page IP is configured the `A` records are fetched
    /// as well to work out whether the name is blocked.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let doh = client.doh().await?;
    /// let mut lookup = doh.lookup("hxxps://evil[.]example.com/x").await?;
    /// println!("{}", lookup.status());
    /// let mx = lookup.records(RecordType::Mx).await?;
    /// ```
    pub async fn lookup(&self, ioc: &str) -> Result<Lookup<'_>> {
        let indicator = Indicator::parse(ioc)?;
        let query_type = indicator.implicit_record_type();
        let response = self.query(&indicator, query_type).await?;

        let mut lookup = Lookup {
            doh: self,
            indicator,
            query_type,
            response,
            cache: HashMap::new(),
            blocked: None,
        };

        if let Some(block_ip) = self.block_page_ip() {
            let blocked = lookup
                .records(RecordType::A)
                .await?
                .iter()
                .any(|record| record.data == block_ip);
            lookup.blocked = Some(blocked);
        }

        Ok(lookup)
    }

    async fn query(
        &self,
        indicator: &Indicator,
        record_type: Option<RecordType>,
    ) -> Result<DohResponse> {
        self.client
            .doh_query(self.client_id.as_deref(), indicator.as_str(), record_type)
            .await?
            .deserialize()
    }
}

/// Result of resolving one indicator
pub struct Lookup<'a> {
    doh: &'a DohClient,
    indicator: Indicator,
    query_type: Option<RecordType>,
    response: DohResponse,
    cache: HashMap<RecordType, Vec<ResourceRecord>>,
    blocked: Option<bool>,
}

impl Lookup<'_> {
    /// The normalized indicator that was queried
    #[must_use]
    pub const fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    /// Type sent with the initial query, if any
    #[must_use]
    pub const fn query_type(&self) -> Option<RecordType> {
        self.query_type
    }

    /// The initial response
    #[must_use]
    pub const fn response(&self) -> &DohResponse {
        &self.response
    }

    /// Answer section of the initial response
    #[must_use]
    pub fn answer(&self) -> &[ResourceRecord] {
        &self.response.answer
    }

    /// Authority section of the initial response
    #[must_use]
    pub fn authority(&self) -> &[ResourceRecord] {
        &self.response.authority
    }

    /// Classify the initial response's status
    #[must_use]
    pub fn status(&self) -> StatusReason {
        self.response.status_reason()
    }

    /// `Some(true)` if an `A` record points at the block page, `None` when no
    /// block page IP is configured
    #[must_use]
    pub const fn blocked(&self) -> Option<bool> {
        self.blocked
    }

    /// Answer records of one type.
    ///
    /// The first call per type queries the resolver; later calls are served
    /// from the cache. A response without an answer section caches as empty.
    pub async fn records(&mut self, record_type: RecordType) -> Result<&[ResourceRecord]> {
        match self.cache.entry(record_type) {
            Entry::Occupied(cached) => {
                debug!(name = %self.indicator, %record_type, "record cache hit");
                Ok(cached.into_mut().as_slice())
            }
            Entry::Vacant(slot) => {
                debug!(name = %self.indicator, %record_type, "record cache miss");
                let response = self.doh.query(&self.indicator, Some(record_type)).await?;
                Ok(slot.insert(response.answer).as_slice())
            }
        }
    }

    /// Summarize block status for display
    #[must_use]
    pub fn block_info(&self) -> BlockInfo {
        let (blocked, message) = if !self.doh.block_page_enabled() {
            (None, "Block page is not enabled")
        } else {
            match self.blocked {
                Some(true) => (Some(true), "Blocked by UDDR"),
                Some(false) => (Some(false), "Not blocked by UDDR"),
                None => (None, "Block page IP not specified"),
            }
        };

        BlockInfo {
            blocked,
            domain: self.indicator.to_string(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doh(settings: ProtectSettings) -> DohClient {
        let client = UddrClient::builder().build().unwrap();
        client.doh_with("abc123", settings)
    }

    fn lookup(doh: &DohClient, blocked: Option<bool>) -> Lookup<'_> {
        Lookup {
            doh,
            indicator: Indicator::parse("example.com").unwrap(),
            query_type: None,
            response: DohResponse::default(),
            cache: HashMap::new(),
            blocked,
        }
    }

    #[test]
    fn test_block_info_messages() {
        let enabled = doh(ProtectSettings {
            block_portal_ipv4: Some("10.0.0.1".into()),
            portal_enabled: Some(true),
        });

        let info = lookup(&enabled, Some(true)).block_info();
        assert_eq!(info.blocked, Some(true));
        assert_eq!(info.message, "Blocked by UDDR");
        assert_eq!(info.domain, "example.com");

        let info = lookup(&enabled, Some(false)).block_info();
        assert_eq!(info.message, "Not blocked by UDDR");

        let info = lookup(&enabled, None).block_info();
        assert_eq!(info.blocked, None);
        assert_eq!(info.message, "Block page IP not specified");

        let disabled = doh(ProtectSettings::default());
        let info = lookup(&disabled, Some(true)).block_info();
        assert_eq!(info.blocked, None);
        assert_eq!(info.message, "Block page is not enabled");
    }

    #[test]
    fn test_empty_response_sections() {
        let d = doh(ProtectSettings::default());
        let l = lookup(&d, None);
        assert!(l.answer().is_empty());
        assert!(l.authority().is_empty());
        assert_eq!(l.status().message, "UNKNOWN");
    }
}
