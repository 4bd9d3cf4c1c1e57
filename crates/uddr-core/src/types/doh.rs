use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::UddrError;

/// DNS record types the DOH resolver can be asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Ns,
    Soa,
    Srv,
    Txt,
    Caa,
    Ds,
    Dnskey,
    Ptr,
}

impl RecordType {
    /// Every supported record type
    pub const ALL: [Self; 12] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Ns,
        Self::Soa,
        Self::Srv,
        Self::Txt,
        Self::Caa,
        Self::Ds,
        Self::Dnskey,
        Self::Ptr,
    ];

    /// Mnemonic used in the `type` query parameter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Soa => "SOA",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
            Self::Caa => "CAA",
            Self::Ds => "DS",
            Self::Dnskey => "DNSKEY",
            Self::Ptr => "PTR",
        }
    }

    /// Numeric RR type as it appears in DOH JSON answers
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::A => 1,
            Self::Ns => 2,
            Self::Cname => 5,
            Self::Soa => 6,
            Self::Ptr => 12,
            Self::Mx => 15,
            Self::Txt => 16,
            Self::Aaaa => 28,
            Self::Srv => 33,
            Self::Ds => 43,
            Self::Dnskey => 48,
            Self::Caa => 257,
        }
    }

    /// Look up a record type by numeric code
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = UddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UddrError::InvalidChoice {
                operation: "lookup".to_string(),
                field: "record_type",
                value: s.to_string(),
                accepted: Self::ALL.map(Self::as_str).join(", "),
            })
    }
}

/// A resource record from a DOH JSON answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Owner name
    pub name: String,

    /// Numeric record type
    #[serde(rename = "type")]
    pub record_type: u16,

    /// Time to live in seconds
    #[serde(default, rename = "TTL")]
    pub ttl: Option<u32>,

    /// Record data in presentation format
    #[serde(default)]
    pub data: String,
}

impl ResourceRecord {
    /// The record type, if it is one this crate knows
    #[must_use]
    pub fn kind(&self) -> Option<RecordType> {
        RecordType::from_code(self.record_type)
    }
}

/// Question section echoed back by the resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DohQuestion {
    /// Queried name
    pub name: String,

    /// Numeric record type queried
    #[serde(rename = "type")]
    pub record_type: u16,
}

/// A DNS-over-HTTPS JSON response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DohResponse {
    /// DNS RCODE
    #[serde(default, rename = "Status")]
    pub status: Option<i64>,

    /// Truncated
    #[serde(default, rename = "TC")]
    pub truncated: Option<bool>,

    /// Recursion desired
    #[serde(default, rename = "RD")]
    pub recursion_desired: Option<bool>,

    /// Recursion available
    #[serde(default, rename = "RA")]
    pub recursion_available: Option<bool>,

    /// Answer authenticated by DNSSEC
    #[serde(default, rename = "AD")]
    pub authenticated_data: Option<bool>,

    /// DNSSEC checking disabled
    #[serde(default, rename = "CD")]
    pub checking_disabled: Option<bool>,

    #[serde(default, rename = "Question")]
    pub question: Vec<DohQuestion>,

    #[serde(default, rename = "Answer")]
    pub answer: Vec<ResourceRecord>,

    #[serde(default, rename = "Authority")]
    pub authority: Vec<ResourceRecord>,

    #[serde(default, rename = "Additional")]
    pub additional: Vec<ResourceRecord>,

    /// Free-form resolver comment
    #[serde(default, rename = "Comment", skip_serializing_if = "Option::is_none")]
    pub comment: Option<serde_json::Value>,
}

impl DohResponse {
    /// Classify the response status
    #[must_use]
    pub fn status_reason(&self) -> StatusReason {
        StatusReason::from_rcode(self.status)
    }
}

/// Human-readable classification of a DNS RCODE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusReason {
    /// The raw status, if the response carried one
    pub rcode: Option<i64>,
    /// Mnemonic, e.g. `NXDOMAIN`
    pub message: &'static str,
    /// One-line description
    pub desc: &'static str,
}

impl StatusReason {
    /// Map an RCODE through the standard table; anything outside 0-9 is
    /// `UNKNOWN`.
    #[must_use]
    pub const fn from_rcode(rcode: Option<i64>) -> Self {
        let (message, desc) = match rcode {
            Some(0) => ("NOERROR", "DNS Query received by server"),
            Some(1) => ("FORMERR", "DNS Query Format Error"),
            Some(2) => ("SERVFAIL", "Server failed to complete the DNS request"),
            Some(3) => ("NXDOMAIN", "Domain name does not exist"),
            Some(4) => ("NOTIMP", "Function not implemented"),
            Some(5) => ("REFUSED", "The server refused to answer for the query"),
            Some(6) => ("YXDOMAIN", "Name that should not exist, does exist"),
            Some(7) => ("XRRSET", "RRset that should not exist, does exist"),
            Some(8) => ("NOTAUTH", "Server not authoritative for the zone"),
            Some(9) => ("NOTZONE", "Name not in zone"),
            _ => ("UNKNOWN", "Unknown/unexpected status"),
        };
        Self {
            rcode,
            message,
            desc,
        }
    }

    /// Returns true for NOERROR
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.rcode, Some(0))
    }
}

impl fmt::Display for StatusReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.desc)
    }
}

/// Whether the organization's block page answered for a domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockInfo {
    /// `None` when block status can't be determined
    pub blocked: Option<bool>,
    /// The normalized indicator
    pub domain: String,
    /// Explanation
    pub message: &'static str,
}
