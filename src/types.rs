use crate::consts::{FALLBACK_LOCALE, LOCALE_ENV_VARS};
use crate::prelude::*;
use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;

/// Time zone a `DateValue` is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// The system's local time zone
    #[default]
    #[display(fmt = "local")]
    Local,
    /// Coordinated Universal Time
    #[display(fmt = "UTC")]
    Utc,
}

impl Zone {
    /// Wall-clock reading of `instant` in this zone.
    pub(crate) fn wall_clock(self, instant: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Utc => instant.naive_utc(),
            Self::Local => instant.with_timezone(&Local).naive_local(),
        }
    }

    /// Resolves a wall-clock reading to an instant.
    ///
    /// Local readings that fall into a daylight-saving gap are pushed forward
    /// by an hour, the way clocks are.
    pub(crate) fn resolve(self, wall: &NaiveDateTime) -> Option<DateTime<chrono::FixedOffset>> {
        match self {
            Self::Utc => Some(Utc.from_utc_datetime(wall).fixed_offset()),
            Self::Local => Local
                .from_local_datetime(wall)
                .earliest()
                .or_else(|| {
                    let shifted = wall.checked_add_signed(TimeDelta::hours(1))?;
                    Local.from_local_datetime(&shifted).earliest()
                })
                .map(|instant| instant.fixed_offset()),
        }
    }

    pub(crate) fn now(self) -> NaiveDateTime {
        self.wall_clock(&Utc::now())
    }
}

/// Width of a month or weekday name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameStyle {
    /// e.g. "January", "Sunday"
    #[display(fmt = "long")]
    Long,
    /// e.g. "Jan", "Sun"
    #[display(fmt = "short")]
    Short,
    /// e.g. "J", "S"
    #[display(fmt = "narrow")]
    Narrow,
}

impl NameStyle {
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Long => 0,
            Self::Short => 1,
            Self::Narrow => 2,
        }
    }
}

/// A BCP 47 style locale tag such as `en`, `ja-JP` or `ar-AE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, Into, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().trim().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag, e.g. `ja` for `ja-JP`
    pub fn language(&self) -> &str {
        language_of(&self.0)
    }

    /// Converts a POSIX locale name (`fr_FR.UTF-8@euro`) into a tag (`fr-FR`).
    ///
    /// Returns `None` for the `C` and `POSIX` pseudo-locales and empty input.
    pub fn from_posix(raw: &str) -> Option<Self> {
        let name = raw.split(['.', '@']).next().unwrap_or_default().trim();
        if name.is_empty() || name == "C" || name == "POSIX" {
            return None;
        }
        Some(Self(name.replace('_', "-")))
    }

    /// Resolves the process locale from `LC_ALL`, `LC_TIME` and `LANG`,
    /// falling back to `en-US`.
    pub fn system() -> Self {
        LOCALE_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|raw| Self::from_posix(&raw))
            .unwrap_or_else(|| Self(FALLBACK_LOCALE.to_owned()))
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self(FALLBACK_LOCALE.to_owned())
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Self::new(tag)
    }
}

impl PartialEq<str> for Locale {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Locale {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Lowercases a tag and turns POSIX underscores into hyphens.
pub(crate) fn normalize_tag(tag: &str) -> String {
    tag.trim().replace('_', "-").to_ascii_lowercase()
}

pub(crate) fn language_of(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}

/// A calendar date given as separate fields; `month` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateFields {
    pub year: i32,
    pub month: i32,
    pub date: i32,
}

/// Anything the adapter can build a date from.
pub enum DateInput<'a, D> {
    /// Text, parsed with a pattern or as ISO 8601
    Text(&'a str),
    /// A platform timestamp
    SystemTime(SystemTime),
    /// Milliseconds since the Unix epoch
    Timestamp(i64),
    /// An existing date value
    Date(&'a D),
    /// Year, zero-based month and day of month
    Fields(DateFields),
}

impl<D> Clone for DateInput<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for DateInput<'_, D> {}

impl<D: fmt::Debug> fmt::Debug for DateInput<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::SystemTime(time) => f.debug_tuple("SystemTime").field(time).finish(),
            Self::Timestamp(millis) => f.debug_tuple("Timestamp").field(millis).finish(),
            Self::Date(date) => f.debug_tuple("Date").field(date).finish(),
            Self::Fields(fields) => f.debug_tuple("Fields").field(fields).finish(),
        }
    }
}

impl<'a, D> From<&'a str> for DateInput<'a, D> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<D> From<SystemTime> for DateInput<'_, D> {
    fn from(time: SystemTime) -> Self {
        Self::SystemTime(time)
    }
}

impl<D> From<i64> for DateInput<'_, D> {
    fn from(millis: i64) -> Self {
        Self::Timestamp(millis)
    }
}

impl<D> From<DateFields> for DateInput<'_, D> {
    fn from(fields: DateFields) -> Self {
        Self::Fields(fields)
    }
}

/// One parse pattern, or candidates tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFormat<'a> {
    Single(&'a str),
    Many(&'a [&'a str]),
}

impl<'a> From<&'a str> for ParseFormat<'a> {
    fn from(pattern: &'a str) -> Self {
        Self::Single(pattern)
    }
}

impl<'a> From<&'a String> for ParseFormat<'a> {
    fn from(pattern: &'a String) -> Self {
        Self::Single(pattern)
    }
}

impl<'a> From<&'a [&'a str]> for ParseFormat<'a> {
    fn from(patterns: &'a [&'a str]) -> Self {
        Self::Many(patterns)
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for ParseFormat<'a> {
    fn from(patterns: &'a [&'a str; N]) -> Self {
        Self::Many(patterns)
    }
}
