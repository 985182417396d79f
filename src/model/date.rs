//! Instants as the delivery API writes them.
//!
//! The API emits UTC timestamps with millisecond precision, dropping the
//! fractional part entirely when it is zero: `2014-08-11T08:30:42.559Z`,
//! `2013-06-27T22:46:14Z`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::model::ModelError;

/// A UTC instant with the API's canonical string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiDateTime(DateTime<Utc>);

impl ApiDateTime {
    pub fn new(inner: DateTime<Utc>) -> Self {
        Self(inner)
    }

    pub fn inner(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for ApiDateTime {
    fn from(inner: DateTime<Utc>) -> Self {
        Self(inner)
    }
}

impl fmt::Display for ApiDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))?;
        let millis = self.0.nanosecond() / 1_000_000;
        if millis > 0 {
            write!(f, ".{:03}", millis)?;
        }
        write!(f, "Z")
    }
}

impl FromStr for ApiDateTime {
    type Err = ModelError;

    /// Accepts full RFC 3339 timestamps as well as the shorter forms editors
    /// may store in Date fields (`2015-01-01`, `2015-01-01T10:00`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, pattern) {
                return Ok(Self(naive.and_utc()));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
            .ok_or_else(|| ModelError::InvalidDate(s.to_string()))
    }
}

impl Serialize for ApiDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ApiDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_milliseconds() {
        let dt: ApiDateTime = "2014-08-11T08:30:42.559Z".parse().unwrap();
        assert_eq!(dt.to_string(), "2014-08-11T08:30:42.559Z");
    }

    #[test]
    fn drops_zero_fraction() {
        let dt: ApiDateTime = "2013-06-27T22:46:14.000Z".parse().unwrap();
        assert_eq!(dt.to_string(), "2013-06-27T22:46:14Z");
    }

    #[test]
    fn normalizes_offsets_to_utc() {
        let dt: ApiDateTime = "2015-01-01T02:00:00+02:00".parse().unwrap();
        assert_eq!(dt.to_string(), "2015-01-01T00:00:00Z");
    }

    #[test]
    fn accepts_date_only() {
        let dt: ApiDateTime = "2015-01-01".parse().unwrap();
        assert_eq!(dt.to_string(), "2015-01-01T00:00:00Z");
    }

    #[test]
    fn rejects_garbage() {
        assert!("yesterday".parse::<ApiDateTime>().is_err());
    }
}
