use std::fmt;
use std::time::SystemTime;

use chrono::{
    DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime,
    SecondsFormat, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};

use crate::consts::{INVALID_DATE_TEXT, LIBRARY_SUNDAY};
use crate::info::LocaleInfo;
use crate::pattern;
use crate::types::{Locale, Zone};

/// Why a `DateValue` does not hold a date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidReason {
    /// Text did not match the pattern it was parsed with.
    #[error("the input \"{input}\" can't be parsed as {format}")]
    Unparsable { input: String, format: String },

    /// A field was outside its calendar range.
    #[error("unit out of range: {0}")]
    UnitOutOfRange(String),

    /// Text named a weekday that disagrees with its date.
    #[error("weekday {weekday} does not match the date {date}")]
    MismatchedWeekday { weekday: u32, date: NaiveDate },

    /// Explicitly constructed invalid value.
    #[error("{0}")]
    Explicit(String),
}

/// An immutable, zone-anchored, locale-tagged point in time, or an invalid
/// marker that remembers why it is invalid.
///
/// Every transformation returns a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateValue {
    moment: Result<NaiveDateTime, InvalidReason>,
    zone: Zone,
    locale: Locale,
}

impl DateValue {
    fn from_moment(moment: Result<NaiveDateTime, InvalidReason>, zone: Zone) -> Self {
        Self {
            moment,
            zone,
            locale: Locale::default(),
        }
    }

    /// Midnight of the given calendar day; `month` is one-based.
    pub fn from_ymd(year: i32, month: i32, day: i32, zone: Zone) -> Self {
        let date = u32::try_from(month)
            .ok()
            .zip(u32::try_from(day).ok())
            .and_then(|(month, day)| NaiveDate::from_ymd_opt(year, month, day));
        let moment = date
            .map(|date| date.and_time(NaiveTime::MIN))
            .ok_or_else(|| {
                InvalidReason::UnitOutOfRange(format!(
                    "year {year}, month {month}, day {day}"
                ))
            });
        Self::from_moment(moment, zone)
    }

    pub fn from_instant(instant: &DateTime<Utc>, zone: Zone) -> Self {
        Self::from_moment(Ok(zone.wall_clock(instant)), zone)
    }

    pub fn from_timestamp_millis(millis: i64, zone: Zone) -> Self {
        match DateTime::from_timestamp_millis(millis) {
            Some(instant) => Self::from_instant(&instant, zone),
            None => Self::from_moment(
                Err(InvalidReason::UnitOutOfRange(format!("timestamp {millis}"))),
                zone,
            ),
        }
    }

    pub fn from_system_time(time: SystemTime, zone: Zone) -> Self {
        Self::from_instant(&DateTime::<Utc>::from(time), zone)
    }

    pub fn now(zone: Zone) -> Self {
        Self::from_moment(Ok(zone.now()), zone)
    }

    /// Parses ISO 8601 text. Text with an offset is converted into `zone`;
    /// text without one is read as wall-clock time in `zone`.
    pub fn from_iso(text: &str, zone: Zone) -> Self {
        Self::from_moment(parse_iso(text.trim(), zone), zone)
    }

    /// Parses `text` with a pattern, reading names and digits of `locale`.
    pub fn from_format(text: &str, pattern: &str, zone: Zone, locale: &Locale) -> Self {
        let info = LocaleInfo::for_locale(locale);
        let moment = pattern::parse(text, pattern, &info, zone.now().year()).and_then(|parsed| {
            match parsed.offset {
                None => Ok(parsed.moment),
                Some(offset) => offset
                    .from_local_datetime(&parsed.moment)
                    .single()
                    .map(|instant| zone.wall_clock(&instant.with_timezone(&Utc)))
                    .ok_or_else(|| InvalidReason::UnitOutOfRange(format!("offset {offset}"))),
            }
        });
        Self::from_moment(moment, zone).with_locale(locale)
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::from_moment(Err(InvalidReason::Explicit(reason.into())), Zone::default())
    }

    /// Same moment and zone, tagged with `locale`.
    #[must_use]
    pub fn with_locale(&self, locale: &Locale) -> Self {
        Self {
            locale: locale.clone(),
            ..self.clone()
        }
    }

    pub const fn zone(&self) -> Zone {
        self.zone
    }

    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    pub const fn is_valid(&self) -> bool {
        self.moment.is_ok()
    }

    pub fn invalid_reason(&self) -> Option<&InvalidReason> {
        self.moment.as_ref().err()
    }

    /// Wall-clock reading in this value's zone
    pub fn naive(&self) -> Option<NaiveDateTime> {
        self.moment.as_ref().ok().copied()
    }

    pub fn instant(&self) -> Option<DateTime<FixedOffset>> {
        self.zone.resolve(self.moment.as_ref().ok()?)
    }

    pub fn timestamp_millis(&self) -> Option<i64> {
        self.instant().map(|instant| instant.timestamp_millis())
    }

    pub fn year(&self) -> Option<i32> {
        self.naive().map(|m| m.year())
    }

    /// One-based month
    pub fn month(&self) -> Option<u32> {
        self.naive().map(|m| m.month())
    }

    pub fn day(&self) -> Option<u32> {
        self.naive().map(|m| m.day())
    }

    /// 1 = Monday ..= 7 = Sunday
    pub fn weekday(&self) -> Option<u32> {
        self.naive().map(|m| m.weekday().number_from_monday())
    }

    pub fn days_in_month(&self) -> Option<u32> {
        let moment = self.naive()?;
        let first = moment.date().with_day(1)?;
        let next = first.checked_add_months(Months::new(1))?;
        u32::try_from(next.signed_duration_since(first).num_days()).ok()
    }

    pub fn is_sunday(&self) -> bool {
        self.weekday() == Some(LIBRARY_SUNDAY)
    }

    /// Adds calendar years; Feb 29 lands on Feb 28 in common years.
    #[must_use]
    pub fn plus_years(&self, years: i32) -> Self {
        match years.checked_mul(12) {
            Some(months) => self.plus_months(months),
            None => self.shift(|_| None),
        }
    }

    /// Adds calendar months, clamping to the last day of the target month.
    #[must_use]
    pub fn plus_months(&self, months: i32) -> Self {
        let delta = Months::new(months.unsigned_abs());
        self.shift(|moment| {
            if months >= 0 {
                moment.checked_add_months(delta)
            } else {
                moment.checked_sub_months(delta)
            }
        })
    }

    #[must_use]
    pub fn plus_days(&self, days: i64) -> Self {
        let delta = Days::new(days.unsigned_abs());
        self.shift(|moment| {
            if days >= 0 {
                moment.checked_add_days(delta)
            } else {
                moment.checked_sub_days(delta)
            }
        })
    }

    fn shift(&self, step: impl FnOnce(NaiveDateTime) -> Option<NaiveDateTime>) -> Self {
        let moment = match &self.moment {
            Ok(moment) => step(*moment).ok_or_else(|| {
                InvalidReason::UnitOutOfRange(format!("shifting {moment} leaves the calendar"))
            }),
            Err(reason) => Err(reason.clone()),
        };
        Self {
            moment,
            zone: self.zone,
            locale: self.locale.clone(),
        }
    }

    /// ISO 8601 with milliseconds, e.g. `2017-01-02T00:00:00.000Z`.
    pub fn to_iso(&self) -> Option<String> {
        let instant = self.instant()?;
        Some(instant.to_rfc3339_opts(SecondsFormat::Millis, self.zone == Zone::Utc))
    }

    /// Renders with `pattern` using the names and digits of `locale`.
    pub fn to_format(&self, pattern: &str, locale: &Locale) -> Option<String> {
        pattern::format(&self.instant()?, pattern, &LocaleInfo::for_locale(locale))
    }
}

fn parse_iso(text: &str, zone: Zone) -> Result<NaiveDateTime, InvalidReason> {
    const LOCAL_LAYOUTS: [&str; 3] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
    ];

    // RFC 3339 has four-digit years only; signed and five-digit years
    // still carry an offset or a `Z`.
    if let Ok(instant) = DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%#z"))
    {
        return Ok(zone.wall_clock(&instant.with_timezone(&Utc)));
    }
    if let Some(moment) = LOCAL_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
    {
        return Ok(moment);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| InvalidReason::Unparsable {
            input: text.to_owned(),
            format: "ISO 8601".to_owned(),
        })
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_iso() {
            Some(iso) => f.write_str(&iso),
            None => f.write_str(INVALID_DATE_TEXT),
        }
    }
}

impl Serialize for DateValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let value = Self::from_iso(&s, Zone::Utc);
        match value.invalid_reason() {
            Some(reason) => Err(serde::de::Error::custom(reason)),
            None => Ok(value),
        }
    }
}
