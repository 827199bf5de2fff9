//! Network address of a site's chart server.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::selector::BackendPath;

/// Port every site chart server listens on.
pub const BACKEND_PORT: u16 = 8080;

/// Host (name or IP) of a site's chart server.
///
/// Never empty: blank configuration values are treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Wrap a host, returning `None` when it is empty or only whitespace.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Option<Self> {
        let host = host.into();
        let trimmed = host.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.0
    }

    /// Full URL for `path` on this host: `http://{host}:{port}{path}`.
    #[must_use]
    pub fn url(&self, port: u16, path: &BackendPath) -> String {
        format!("http://{}:{port}{path}", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("address must not be empty")
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::TimeSelector;

    #[test]
    fn should_treat_blank_host_as_absent() {
        assert!(Address::new("").is_none());
        assert!(Address::new("   ").is_none());
    }

    #[test]
    fn should_trim_surrounding_whitespace() {
        let address = Address::new(" 10.0.0.7 ").unwrap();
        assert_eq!(address.host(), "10.0.0.7");
    }

    #[test]
    fn should_build_url_with_fixed_port() {
        let address = Address::new("10.0.0.7").unwrap();
        let path = TimeSelector::Last.backend_path();
        assert_eq!(
            address.url(BACKEND_PORT, &path),
            "http://10.0.0.7:8080/data/chart/last/all/"
        );
    }

    #[test]
    fn should_reject_empty_address_when_deserializing() {
        let result: Result<Address, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
