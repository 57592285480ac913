//! Mandrill's timestamp format.
//!
//! Mandrill sends UTC times as `"2013-01-01 15:30:27"`, sometimes with a
//! fractional suffix (`"2013-01-01 15:30:27.36582"`). Some records carry an
//! empty string or `null` instead; those decode to the zero time, which
//! encodes back as `""`. Sub-second precision is written back only when
//! present, so decoded values re-encode to an equal value.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ApiError;

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FORMAT_FRACTIONAL: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A point in time as reported by Mandrill. `Default` is the zero time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiTime(Option<DateTime<Utc>>);

impl ApiTime {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(Some(at))
    }

    pub fn now() -> Self {
        Self(Some(Utc::now()))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        self.0
    }
}

impl From<DateTime<Utc>> for ApiTime {
    fn from(at: DateTime<Utc>) -> Self {
        Self::new(at)
    }
}

impl FromStr for ApiTime {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::default());
        }
        NaiveDateTime::parse_from_str(s, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, FORMAT_FRACTIONAL))
            .map(|naive| Self(Some(naive.and_utc())))
            .map_err(|e| ApiError::DeserializationError(format!("invalid timestamp {s:?}: {e}")))
    }
}

impl fmt::Display for ApiTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(at) if at.nanosecond() != 0 => write!(f, "{}", at.format(FORMAT_FRACTIONAL)),
            Some(at) => write!(f, "{}", at.format(FORMAT)),
            None => Ok(()),
        }
    }
}

impl Serialize for ApiTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ApiTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(s) => s.parse().map_err(serde::de::Error::custom),
            None => Ok(Self::default()),
        }
    }
}
