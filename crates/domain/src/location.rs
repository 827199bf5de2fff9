//! Sites and locations.
//!
//! A [`Site`] is one of the four power plants that run a local chart server.
//! A [`Location`] is what a caller asks for: a single site, or [`Location::All`]
//! to fan out over every site.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One of the fixed power-generation sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Site {
    JscTpp,
    TashkentTtc,
    SirdaryaTpp,
    MubarekTpp,
}

impl Site {
    pub const COUNT: usize = 4;

    /// Every site, in registry order. Fan-out results follow this order.
    pub const ALL: [Site; Site::COUNT] = [
        Site::JscTpp,
        Site::TashkentTtc,
        Site::SirdaryaTpp,
        Site::MubarekTpp,
    ];

    /// Wire identifier, also the name of the environment variable holding the
    /// site's address.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::JscTpp => "JSC_TPP",
            Self::TashkentTtc => "TASHKENT_TTC",
            Self::SirdaryaTpp => "SIRDARYA_TPP",
            Self::MubarekTpp => "MUBAREK_TPP",
        }
    }

    /// Position of this site in [`Site::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::JscTpp => 0,
            Self::TashkentTtc => 1,
            Self::SirdaryaTpp => 2,
            Self::MubarekTpp => 3,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Site {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Site::ALL
            .into_iter()
            .find(|site| site.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownLocation(s.to_owned()))
    }
}

/// Requested location: a concrete site or the `ALL` wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Site(Site),
    All,
}

impl Location {
    const ALL_IDENT: &'static str = "ALL";
}

impl From<Site> for Location {
    fn from(site: Site) -> Self {
        Self::Site(site)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Site(site) => site.fmt(f),
            Self::All => f.write_str(Self::ALL_IDENT),
        }
    }
}

impl FromStr for Location {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::ALL_IDENT {
            return Ok(Self::All);
        }
        s.parse().map(Self::Site)
    }
}
