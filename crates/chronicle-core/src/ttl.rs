//! Token lifetimes expressed as short duration strings
//!
//! Tokens are minted with a validity window such as `"7d"` for sessions or
//! `"1h"` for emailed verification links. `Ttl` parses and prints that form.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing a duration string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TtlParseError {
    #[error("duration string is empty")]
    Empty,

    #[error("invalid duration amount in {0:?}")]
    InvalidAmount(String),

    #[error("unknown duration unit in {0:?} (expected s, m, h or d)")]
    UnknownUnit(String),

    #[error("duration must be greater than zero")]
    Zero,

    #[error("duration {0:?} exceeds the maximum of 36500d")]
    Overflow(String),
}

/// A positive token lifetime with whole-second precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ttl {
    secs: u64,
}

impl Ttl {
    /// Default lifetime of session tokens
    pub const SESSION: Ttl = Ttl::from_days(7);

    /// Default lifetime of emailed verification, reset and approval tokens
    pub const ACTION: Ttl = Ttl::from_hours(1);

    /// Longest lifetime a duration string may name (100 years)
    pub const MAX_SECS: u64 = 36_500 * 86_400;

    pub const fn from_secs(secs: u64) -> Self {
        Self { secs }
    }

    pub const fn from_hours(hours: u64) -> Self {
        Self { secs: hours * 3600 }
    }

    pub const fn from_days(days: u64) -> Self {
        Self {
            secs: days * 86_400,
        }
    }

    pub fn as_secs(&self) -> u64 {
        self.secs
    }

    /// Clamped to [`Self::MAX_SECS`] for values built with [`Self::from_secs`]
    pub fn as_chrono(&self) -> chrono::Duration {
        let secs = self.secs.min(Self::MAX_SECS) as i64;
        chrono::Duration::try_seconds(secs).unwrap_or(chrono::Duration::zero())
    }
}

impl FromStr for Ttl {
    type Err = TtlParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let unit = s.chars().last().ok_or(TtlParseError::Empty)?;

        let multiplier: u64 = match unit {
            's' => 1,
            'm' => 60,
            'h' => 3600,
            'd' => 86_400,
            _ => return Err(TtlParseError::UnknownUnit(s.to_string())),
        };

        let amount: u64 = s[..s.len() - unit.len_utf8()]
            .parse()
            .map_err(|_| TtlParseError::InvalidAmount(s.to_string()))?;

        if amount == 0 {
            return Err(TtlParseError::Zero);
        }

        let secs = amount
            .checked_mul(multiplier)
            .filter(|secs| *secs <= Self::MAX_SECS)
            .ok_or_else(|| TtlParseError::Overflow(s.to_string()))?;

        Ok(Self { secs })
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.secs;
        if secs % 86_400 == 0 {
            write!(f, "{}d", secs / 86_400)
        } else if secs % 3600 == 0 {
            write!(f, "{}h", secs / 3600)
        } else if secs % 60 == 0 {
            write!(f, "{}m", secs / 60)
        } else {
            write!(f, "{secs}s")
        }
    }
}

impl Serialize for Ttl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ttl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
