use serde::{Deserialize, Serialize};

use crate::{Result, UddrError};

/// Response of `/account/user/organizations`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationsResponse {
    /// Organizations the API key's user belongs to
    #[serde(default)]
    pub organizations: Vec<Organization>,
}

impl OrganizationsResponse {
    /// Names of every organization that has one
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.organizations
            .iter()
            .filter_map(|o| o.organization_name.as_deref())
            .collect()
    }

    /// Pick the organization a DOH client should use.
    ///
    /// A single organization is always chosen. With several, `name` must
    /// match one of them.
    pub fn select(&self, name: Option<&str>) -> Result<&Organization> {
        match (self.organizations.as_slice(), name) {
            ([], _) => Err(UddrError::NoOrganizations),
            ([only], _) => Ok(only),
            (orgs, Some(name)) => orgs
                .iter()
                .find(|o| o.organization_name.as_deref() == Some(name))
                .ok_or_else(|| UddrError::UnknownOrganization(name.to_string())),
            (_, None) => Err(UddrError::AmbiguousOrganization(
                self.names().into_iter().map(String::from).collect(),
            )),
        }
    }
}

/// An organization as listed for the current user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Organization {
    /// Identifier embedded in the DOH resolver path
    #[serde(default)]
    pub client_id: Option<String>,

    /// Display name
    #[serde(default)]
    pub organization_name: Option<String>,

    /// Organization settings
    #[serde(default)]
    pub settings: OrganizationSettings,
}

/// Settings attached to an organization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationSettings {
    /// Protective DNS settings
    #[serde(default)]
    pub protect_settings: ProtectSettings,
}

/// Block page configuration used to recognize blocked answers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectSettings {
    /// IPv4 address the resolver answers with for blocked names
    #[serde(default)]
    pub block_portal_ipv4: Option<String>,

    /// Whether the block page is turned on
    #[serde(default)]
    pub portal_enabled: Option<bool>,
}

impl ProtectSettings {
    /// Returns true if the block page is enabled
    #[must_use]
    pub fn block_page_enabled(&self) -> bool {
        self.portal_enabled.unwrap_or(false)
    }
}
