//! Time selectors and the canonical backend paths they translate to.
//!
//! A request picks one dataset on a site's chart server: the last known value,
//! one day, one month, or one year. [`build_path`] resolves the raw request
//! fields into a [`BackendPath`] with a fixed priority:
//!
//! 1. `last` wins over everything, date fields are ignored
//! 2. year + month + day → day
//! 3. year + month → month
//! 4. year → year
//! 5. anything else is [`ValidationError::InvalidSelector`]
//!
//! Range checks are not part of the translation. They run at the request
//! boundary with [`check_range`] and the bounds defined here.

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};

use crate::error::ValidationError;

/// Years accepted by the query-string endpoint.
pub const QUERY_YEARS: RangeInclusive<i64> = 2024..=2100;

/// Years accepted by the path-segment endpoints.
pub const PATH_YEARS: RangeInclusive<i64> = 2000..=2100;

pub const MONTHS: RangeInclusive<i64> = 1..=12;

pub const DAYS: RangeInclusive<i64> = 1..=31;

/// Length of a `YYYY-MM-DD` date.
const ISO_DATE_LEN: usize = 10;

/// Ensure `value` lies in `range`.
///
/// # Errors
///
/// Returns [`ValidationError::OutOfRange`] naming `field` otherwise.
pub fn check_range(
    field: &'static str,
    value: impl Into<i64>,
    range: &RangeInclusive<i64>,
) -> Result<(), ValidationError> {
    let value = value.into();
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Which time range of chart data to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSelector {
    Last,
    Day { year: i32, month: u32, day: u32 },
    Month { year: i32, month: u32 },
    Year { year: i32 },
}

impl TimeSelector {
    /// Resolve raw request fields into a selector.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSelector`] when neither `last` nor a
    /// year is supplied.
    pub fn from_parts(
        last: bool,
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
    ) -> Result<Self, ValidationError> {
        if last {
            return Ok(Self::Last);
        }
        match (year, month, day) {
            (Some(year), Some(month), Some(day)) => Ok(Self::Day { year, month, day }),
            (Some(year), Some(month), None) => Ok(Self::Month { year, month }),
            // a day without a month does not narrow the year
            (Some(year), None, _) => Ok(Self::Year { year }),
            (None, _, _) => Err(ValidationError::InvalidSelector),
        }
    }

    /// Parse a `YYYY-MM-DD` calendar date into a day selector.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDate`] if `value` is not a valid,
    /// zero-padded date.
    pub fn from_iso_date(value: &str) -> Result<Self, ValidationError> {
        // chrono also takes unpadded fields such as `2024-3-5`
        if value.len() != ISO_DATE_LEN {
            return Err(ValidationError::InvalidDate(value.to_owned()));
        }
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(value.to_owned()))?;
        Ok(Self::Day {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        })
    }

    /// Year this selector refers to, if any.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        match self {
            Self::Last => None,
            Self::Day { year, .. } | Self::Month { year, .. } | Self::Year { year } => Some(*year),
        }
    }

    /// Canonical path of the dataset on a site's chart server.
    #[must_use]
    pub fn backend_path(&self) -> BackendPath {
        let path = match self {
            Self::Last => "/data/chart/last/all/".to_owned(),
            Self::Day { year, month, day } => {
                format!("/data/chart/day/all/{year}-{month:02}-{day:02}")
            }
            Self::Month { year, month } => format!("/data/chart/month/all/{year}/{month:02}"),
            Self::Year { year } => format!("/data/chart/year/all/{year}"),
        };
        BackendPath(path)
    }
}

/// Translate raw request fields straight into a [`BackendPath`].
///
/// # Errors
///
/// Returns [`ValidationError::InvalidSelector`] when no usable selector was
/// supplied.
pub fn build_path(
    last: bool,
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
) -> Result<BackendPath, ValidationError> {
    TimeSelector::from_parts(last, year, month, day).map(|selector| selector.backend_path())
}

/// Path component of a chart server URL. Carries no site information.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackendPath(String);

impl BackendPath {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackendPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
