//! Parameter values the API accepts from a fixed set.
//!
//! Each set is an enum implementing [`Choice`]. Callers may pass either the
//! enum or a string; strings are matched case-insensitively and rejected
//! with an error listing the accepted values before any request is built.

use std::fmt;

use crate::{Result, UddrError};

/// Casing a choice is sent with on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireCase {
    /// `domain_2tld`
    Lower,
    /// `DOMAIN_2TLD`
    Upper,
}

/// A value drawn from a fixed, named set.
pub trait Choice: Sized + Copy + 'static {
    /// Every accepted value, in documentation order
    const ALL: &'static [Self];

    /// How the value is cased in request bodies
    const WIRE_CASE: WireCase;

    /// Canonical upper-case name
    fn name(self) -> &'static str;

    /// The value as it appears in a request body
    fn wire(self) -> String {
        match Self::WIRE_CASE {
            WireCase::Lower => self.name().to_lowercase(),
            WireCase::Upper => self.name().to_string(),
        }
    }

    /// Comma-separated list of accepted names
    fn accepted() -> String {
        Self::ALL
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Match `value` case-insensitively against the set.
    ///
    /// `operation` and `field` only feed the error message.
    fn parse_for(operation: &str, field: &'static str, value: &str) -> Result<Self> {
        let trimmed = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UddrError::InvalidChoice {
                operation: operation.to_string(),
                field,
                value: value.to_string(),
                accepted: Self::accepted(),
            })
    }
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $case:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];
            const WIRE_CASE: WireCase = WireCase::$case;

            fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.name()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UddrError;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_for(stringify!($name), "value", s)
            }
        }
    };
}

choice_enum! {
    /// What `/aggregates` counts occurrences of
    AggregateQueryType, Lower {
        /// Registered domain
        Domain => "DOMAIN",
        /// Fully qualified name
        Fqdn => "FQDN",
        /// Country code
        Country => "COUNTRY",
        /// Top-level domain
        Tld => "TLD",
        /// Registrar
        Registrar => "REGISTRAR",
    }
}

choice_enum! {
    /// Query classes charted by `/bar`
    BarQueryType, Lower {
        BlockQueries => "BLOCK_QUERIES",
        NoAnswerQueries => "NO_ANSWER_QUERIES",
        TorProxVpnQueries => "TOR_PROX_VPN_QUERIES",
        SuspiciousNameserverQueries => "SUSPICIOUS_NAMESERVER_QUERIES",
    }
}

choice_enum! {
    /// Series available from `/histogram`
    HistogramQueryType, Lower {
        /// All queries
        Queries => "QUERIES",
        /// Queries that were blocked
        BlockedQueries => "BLOCKED_QUERIES",
    }
}

choice_enum! {
    /// Counters available from `/summary`
    SummaryQueryType, Upper {
        Total => "TOTAL",
        Blocked => "BLOCKED",
        Indicators => "INDICATORS",
    }
}

choice_enum! {
    /// Artifact fields for `/histogram/artifact`
    ArtifactType, Lower {
        Domain => "DOMAIN.KEYWORD",
        Domain2Tld => "DOMAIN_2TLD.KEYWORD",
        NameserverTld => "NAMESERVER_TLD.KEYWORD",
        Nameserver => "NAMESERVER.KEYWORD",
        NameserverIp => "NAMESERVER_IP.KEYWORD",
        ResponseA => "RESPONSE.A.KEYWORD",
        ResponseAaaa => "RESPONSE.AAAA.KEYWORD",
        ResponseCname => "RESPONSE.CNAME.KEYWORD",
        ResponseCname2Tld => "RESPONSE.CNAME_2TLD.KEYWORD",
    }
}

choice_enum! {
    /// Bucketing for `/histogram/artifact`
    ArtifactQueryType, Lower {
        Queries => "QUERIES",
        QueriesOverDay => "QUERIES_OVER_DAY",
        QueriesOverHour => "QUERIES_OVER_HOUR",
    }
}

choice_enum! {
    /// Fields a `/logs` filter can target
    LogFilterId, Lower {
        Domain => "DOMAIN",
        Domain2Tld => "DOMAIN_2TLD",
        DomainTld => "DOMAIN_TLD",
        DomainAge => "DOMAIN_AGE",
        QueryType => "QUERY_TYPE",
        ResponseCode => "RESPONSE_CODE",
        Ttl => "TTL",
        Nameserver => "NAMESERVER",
        Nameserver2Tld => "NAMESERVER_2TLD",
        NameserverTld => "NAMESERVER_TLD",
        NameserverIp => "NAMESERVER_IP",
        ARecord => "A_RECORD",
        AaaaRecord => "AAAA_RECORD",
        CName => "C_NAME",
        CName2Tld => "C_NAME_2TLD",
        CNameTld => "C_NAME_TLD",
        Registrar => "REGISTRAR",
        Reputation => "REPUTATION",
        Datetime => "DATETIME",
    }
}

choice_enum! {
    /// Fields a `/passthrough` filter can target
    PassthroughFilterId, Upper {
        LastSeen => "LAST_SEEN",
        Artifact => "ARTIFACT",
        HyasStatus => "HYAS_STATUS",
        AltStatus => "ALT_STATUS",
        QueryCount => "QUERY_COUNT",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_match() {
        let q = AggregateQueryType::parse_for("aggregates", "query_type", "fqdn").unwrap();
        assert_eq!(q, AggregateQueryType::Fqdn);
        assert_eq!(q.wire(), "fqdn");

        let a = ArtifactType::parse_for("histogram_artifact", "artifact_type", "Response.Cname.Keyword")
            .unwrap();
        assert_eq!(a.wire(), "response.cname.keyword");
    }

    #[test]
    fn test_upper_wire_case() {
        assert_eq!(SummaryQueryType::Indicators.wire(), "INDICATORS");
        assert_eq!(PassthroughFilterId::LastSeen.wire(), "LAST_SEEN");
        assert_eq!(LogFilterId::CName2Tld.wire(), "c_name_2tld");
    }

    #[test]
    fn test_rejection_names_accepted_set() {
        let err = HistogramQueryType::parse_for("histogram", "query_type", "FOO").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("histogram: query_type 'FOO'"), "{msg}");
        assert!(msg.contains("QUERIES, BLOCKED_QUERIES"), "{msg}");
    }

    #[test]
    fn test_from_str_and_display() {
        let b: BarQueryType = "tor_prox_vpn_queries".parse().unwrap();
        assert_eq!(b, BarQueryType::TorProxVpnQueries);
        assert_eq!(b.to_string(), "TOR_PROX_VPN_QUERIES");
        assert!("nope".parse::<BarQueryType>().is_err());
    }

    #[test]
    fn test_all_sets_are_complete() {
        assert_eq!(AggregateQueryType::ALL.len(), 5);
        assert_eq!(BarQueryType::ALL.len(), 4);
        assert_eq!(HistogramQueryType::ALL.len(), 2);
        assert_eq!(SummaryQueryType::ALL.len(), 3);
        assert_eq!(ArtifactType::ALL.len(), 9);
        assert_eq!(ArtifactQueryType::ALL.len(), 3);
        assert_eq!(LogFilterId::ALL.len(), 19);
        assert_eq!(PassthroughFilterId::ALL.len(), 5);
    }
}
