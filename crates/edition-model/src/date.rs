//! Edition date keys.
//!
//! Every edition is addressed by its publication date written as
//! `DD-MM-YYYY`. That text is used verbatim for directory names, catalog
//! keys and download names, so parsing is strict: exactly two day digits,
//! two month digits and four year digits separated by hyphens.
//!
//! Ordering is by calendar date. The textual form does not sort
//! chronologically (`02-01-2024` < `31-12-2023` as strings), so callers
//! must never compare the rendered strings.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ModelError, Result};

const KEY_LEN: usize = 10;
const SEPARATOR_POSITIONS: [usize; 2] = [2, 5];
const MAX_YEAR: i32 = 9999;

/// Calendar date identifying one edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Textual layout accepted by [`DateKey::parse`].
    pub const FORMAT: &'static str = "DD-MM-YYYY";

    /// Build a key from calendar fields.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidDateKey`] when the fields do not name a
    /// real date or the year does not fit in four digits.
    pub fn from_dmy(day: u32, month: u32, year: i32) -> Result<Self> {
        let input = format!("{day:02}-{month:02}-{year:04}");
        if !(0..=MAX_YEAR).contains(&year) {
            return Err(ModelError::InvalidDateKey {
                input,
                reason: "year must have four digits",
            });
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(ModelError::InvalidDateKey {
                input,
                reason: "not a calendar date",
            })
    }

    /// Parse `DD-MM-YYYY` text.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidDateKey`] for any other layout, and for
    /// well-formed text naming an impossible date such as `30-02-2024`.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = |reason| ModelError::InvalidDateKey {
            input: text.to_string(),
            reason,
        };
        let bytes = text.as_bytes();
        if bytes.len() != KEY_LEN {
            return Err(invalid("expected DD-MM-YYYY"));
        }
        for (index, byte) in bytes.iter().enumerate() {
            let ok = if SEPARATOR_POSITIONS.contains(&index) {
                *byte == b'-'
            } else {
                byte.is_ascii_digit()
            };
            if !ok {
                return Err(invalid("expected DD-MM-YYYY"));
            }
        }

        let day = digits(&bytes[0..2]);
        let month = digits(&bytes[3..5]);
        let year = digits(&bytes[6..10]);
        let year = i32::try_from(year).map_err(|_| invalid("year out of range"))?;
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| invalid("not a calendar date"))
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

fn digits(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0, |acc, byte| acc * 10 + u32::from(byte - b'0'))
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}-{:02}-{:04}",
            self.0.day(),
            self.0.month(),
            self.0.year()
        )
    }
}

impl FromStr for DateKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<NaiveDate> for DateKey {
    type Error = ModelError;

    fn try_from(date: NaiveDate) -> Result<Self> {
        Self::from_dmy(date.day(), date.month(), date.year())
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
