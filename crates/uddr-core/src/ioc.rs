//! Indicator-of-compromise normalization.
//!
//! Threat-intel feeds write indicators in many shapes: defanged domains
//! (`evil[.]com`), URLs (`hxxps://evil.com/payload`), mailbox addresses and
//! bare IPs. [`Indicator`] reduces all of them to the name that should be
//! sent in a DNS query. IP addresses become their reverse-lookup names:
//!
//! - `192.0.2.1` -> `1.2.0.192.in-addr.arpa`
//! - `2001:db8::1` -> `1.0.0.0. ... .8.b.d.0.1.0.0.2.ip6.arpa`

use regex::Regex;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::LazyLock;

use crate::types::RecordType;
use crate::{Result, UddrError};

const IPV4_REVERSE_ZONE: &str = ".in-addr.arpa";
const IPV6_REVERSE_ZONE: &str = ".ip6.arpa";

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^h[tx]{2}ps?://").expect("scheme pattern compiles"));

static HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z0-9]([a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}$").expect("hostname pattern compiles")
});

/// A normalized indicator, ready to be used as a DNS query name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Indicator(String);

impl Indicator {
    /// Normalize a raw indicator.
    ///
    /// Fails with [`UddrError::InvalidIndicator`] when what remains after
    /// cleanup is neither an IP address nor a hostname.
    pub fn parse(raw: &str) -> Result<Self> {
        let cleaned = strip_decorations(raw);

        if let Ok(ip) = cleaned.parse::<IpAddr>() {
            return Ok(Self(reverse_name(ip)));
        }

        if HOSTNAME.is_match(&cleaned) {
            Ok(Self(cleaned))
        } else {
            Err(UddrError::InvalidIndicator(cleaned))
        }
    }

    /// The normalized query name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is an `in-addr.arpa` or `ip6.arpa` name
    #[must_use]
    pub fn is_reverse(&self) -> bool {
        self.0.ends_with(IPV4_REVERSE_ZONE) || self.0.ends_with(IPV6_REVERSE_ZONE)
    }

    /// Record type a lookup of this indicator should ask for by default.
    ///
    /// Reverse names are queried for `PTR`; anything else leaves the choice
    /// to the resolver.
    #[must_use]
    pub fn implicit_record_type(&self) -> Option<RecordType> {
        self.is_reverse().then_some(RecordType::Ptr)
    }

    /// Consume into the inner string
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Everything before the IP/hostname decision: whitespace, root dot, case,
/// defanging, scheme, path and mailbox.
fn strip_decorations(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    let mut ioc = trimmed.to_lowercase().replace("[.]", ".");

    if let Some(m) = SCHEME.find(&ioc) {
        ioc.replace_range(..m.end(), "");
    }

    if let Some(slash) = ioc.find('/') {
        ioc.truncate(slash);
    }

    if let Some(at) = ioc.rfind('@') {
        ioc.replace_range(..=at, "");
    }

    ioc
}

fn reverse_name(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => reverse_ipv4(v4),
        IpAddr::V6(v6) => reverse_ipv6(v6),
    }
}

fn reverse_ipv4(ip: Ipv4Addr) -> String {
    let [a, b, c, d] = ip.octets();
    format!("{d}.{c}.{b}.{a}{IPV4_REVERSE_ZONE}")
}

fn reverse_ipv6(ip: Ipv6Addr) -> String {
    let nibbles: String = ip.segments().iter().map(|s| format!("{s:04x}")).collect();
    let mut name = nibbles
        .chars()
        .rev()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(".");
    name.push_str(IPV6_REVERSE_ZONE);
    name
}

/// Check that `domain` is a plausible registrable domain name.
///
/// At most 253 characters (one trailing dot allowed), two or more labels of
/// 1-63 letters, digits or hyphens that don't start or end with a hyphen,
/// and an alphabetic top-level label of 2-6 characters.
pub fn validate_domain(domain: &str) -> Result<()> {
    let invalid = || UddrError::InvalidDomain(domain.to_string());

    let name = domain.strip_suffix('.').unwrap_or(domain);
    if name.is_empty() || name.len() > 253 {
        return Err(invalid());
    }

    let labels: Vec<&str> = name.split('.').collect();
    let Some((tld, rest)) = labels.split_last() else {
        return Err(invalid());
    };

    let tld_ok = (2..=6).contains(&tld.len()) && tld.chars().all(|c| c.is_ascii_alphabetic());
    let labels_ok = !rest.is_empty()
        && rest.iter().all(|label| {
            (1..=63).contains(&label.len())
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });

    if tld_ok && labels_ok {
        Ok(())
    } else {
        Err(invalid())
    }
}

impl FromStr for Indicator {
    type Err = UddrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Indicator {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(raw: &str) -> String {
        Indicator::parse(raw).unwrap().into_inner()
    }

    #[test]
    fn test_ipv4_reverse_name() {
        assert_eq!(normalize("192.0.2.1"), "1.2.0.192.in-addr.arpa");
        assert_eq!(normalize(" 10.20.30.40 "), "40.30.20.10.in-addr.arpa");
    }

    #[test]
    fn test_ipv6_reverse_name() {
        assert_eq!(
            normalize("2001:db8::1"),
            "1.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa"
        );
        assert_eq!(
            normalize("2001:DB8::567:89AB"),
            "b.a.9.8.7.6.5.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa"
        );
    }

    #[test]
    fn test_defanged_domain() {
        assert_eq!(normalize("evil[.]example.com"), "evil.example.com");
        assert_eq!(normalize("evil[.]example[.]com"), "evil.example.com");
    }

    #[test]
    fn test_urls() {
        assert_eq!(normalize("hxxps://bad.example.com/path?x=1"), "bad.example.com");
        assert_eq!(normalize("http://bad.example.com"), "bad.example.com");
        assert_eq!(normalize("HTTPS://Bad.Example.COM/a/b"), "bad.example.com");
        assert_eq!(normalize("hxxp://203.0.113.9/drop.exe"), "9.113.0.203.in-addr.arpa");
    }

    #[test]
    fn test_email() {
        assert_eq!(normalize("user@example.com"), "example.com");
        assert_eq!(normalize("\"a@b\"@mail.example.org"), "mail.example.org");
    }

    #[test]
    fn test_fqdn_root_dot_and_case() {
        assert_eq!(normalize("  WWW.Example.COM.  "), "www.example.com");
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "www.example.com",
            "192.0.2.1",
            "2001:db8::1",
            "hxxps://evil[.]example.net/x",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not a fixed point: {raw}");
        }
    }

    #[test]
    fn test_invalid_indicators() {
        for raw in ["", "localhost", "-bad.example.com", "exa mple.com", "example.c0m", "999.1.1.1"] {
            let err = Indicator::parse(raw).unwrap_err();
            assert!(matches!(err, UddrError::InvalidIndicator(_)), "{raw} accepted");
        }
    }

    #[test]
    fn test_implicit_record_type() {
        let ptr = Indicator::parse("192.0.2.1").unwrap();
        assert!(ptr.is_reverse());
        assert_eq!(ptr.implicit_record_type(), Some(RecordType::Ptr));

        let v6 = Indicator::parse("::1").unwrap();
        assert_eq!(v6.implicit_record_type(), Some(RecordType::Ptr));

        let host = Indicator::parse("example.com").unwrap();
        assert_eq!(host.implicit_record_type(), None);
    }

    #[test]
    fn test_validate_domain() {
        for ok in ["example.com", "Sub.Example.CO", "a-b.example.museum", "example.com."] {
            assert!(validate_domain(ok).is_ok(), "{ok} rejected");
        }
        for bad in ["", "com", "localhost", "-a.example.com", "a-.example.com", "exa_mple.com", "example.c0m", "example.abcdefg"] {
            assert!(
                matches!(validate_domain(bad), Err(UddrError::InvalidDomain(_))),
                "{bad} accepted"
            );
        }
        let long = format!("{}.com", "a".repeat(64));
        assert!(validate_domain(&long).is_err());
    }

    #[test]
    fn test_from_str() {
        let ioc: Indicator = "evil[.]example.com".parse().unwrap();
        assert_eq!(ioc.to_string(), "evil.example.com");
    }
}
