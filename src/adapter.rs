use std::any::Any;

use chrono::Utc;
use log::{debug, trace};

use crate::config::AdapterOptions;
use crate::consts::{
    INVALID_DATE_TEXT, INVALID_REASON, ISO8601_FORMAT, JAPANESE_LOCALE, JAPANESE_REGIONAL_LOCALE,
    MAX_MONTH_INDEX, MIN_DAY,
};
use crate::locale_table::LocaleTable;
use crate::types::{DateFields, DateInput, Locale, NameStyle, ParseFormat, Zone};
use crate::value::DateValue;
use crate::{AdapterError, DateAdapter, default_deserialize};

/// [`DateAdapter`] over [`DateValue`].
///
/// Holds the active locale and its precomputed [`LocaleTable`]; every
/// returned date is a new value tagged with the active locale.
#[derive(Debug, Clone)]
pub struct ChronoDateAdapter {
    locale: Locale,
    options: AdapterOptions,
    locale_data: LocaleTable,
}

impl ChronoDateAdapter {
    /// Creates an adapter for `locale`, or for the process locale when
    /// `locale` is `None` or blank.
    pub fn new(locale: Option<&str>, options: AdapterOptions) -> Self {
        let requested = locale
            .filter(|tag| !tag.trim().is_empty())
            .map_or_else(Locale::system, Locale::new);
        let (locale, locale_data) = load_locale(&requested);
        Self {
            locale,
            options,
            locale_data,
        }
    }

    pub const fn options(&self) -> AdapterOptions {
        self.options
    }

    pub const fn locale_data(&self) -> &LocaleTable {
        &self.locale_data
    }

    const fn zone(&self) -> Zone {
        if self.options.use_utc {
            Zone::Utc
        } else {
            Zone::Local
        }
    }

    /// Builds a value in the configured zone, tagged with the active locale.
    /// Absent input means now.
    fn create_date_time(
        &self,
        input: Option<DateInput<'_, DateValue>>,
        format: Option<ParseFormat<'_>>,
    ) -> DateValue {
        let zone = self.zone();
        let value = match input {
            None => DateValue::now(zone),
            Some(DateInput::SystemTime(time)) => DateValue::from_system_time(time, zone),
            Some(DateInput::Timestamp(millis)) => DateValue::from_timestamp_millis(millis, zone),
            Some(DateInput::Date(date)) => match date.instant() {
                Some(instant) => DateValue::from_instant(&instant.with_timezone(&Utc), zone),
                None => date.clone(),
            },
            Some(DateInput::Fields(fields)) => match fields.month.checked_add(1) {
                Some(month) => DateValue::from_ymd(fields.year, month, fields.date, zone),
                None => DateValue::invalid(INVALID_REASON),
            },
            Some(DateInput::Text(text)) => self.parse_text(text, format, zone),
        };
        value.with_locale(&self.locale)
    }

    fn parse_text(&self, text: &str, format: Option<ParseFormat<'_>>, zone: Zone) -> DateValue {
        match format {
            None | Some(ParseFormat::Single(ISO8601_FORMAT)) => DateValue::from_iso(text, zone),
            Some(ParseFormat::Single(pattern)) => {
                DateValue::from_format(text, pattern, zone, &self.locale)
            }
            Some(ParseFormat::Many(patterns)) => {
                let mut last = None;
                for pattern in patterns {
                    let parsed = DateValue::from_format(text, pattern, zone, &self.locale);
                    if parsed.is_valid() {
                        return parsed;
                    }
                    trace!("{text:?} does not match {pattern:?}");
                    last = Some(parsed);
                }
                last.unwrap_or_else(|| DateValue::from_iso(text, zone))
            }
        }
    }
}

impl Default for ChronoDateAdapter {
    fn default() -> Self {
        Self::new(None, AdapterOptions::default())
    }
}

/// Resolves the stored locale for a requested tag and builds its table.
/// Week rules are looked up under the tag as requested, then its language.
fn load_locale(requested: &Locale) -> (Locale, LocaleTable) {
    let locale = if *requested == JAPANESE_REGIONAL_LOCALE {
        Locale::new(JAPANESE_LOCALE)
    } else {
        requested.clone()
    };
    let table = LocaleTable::build(requested, &locale);
    debug!(
        "loaded locale data for {requested} as {locale} (first day of week {})",
        table.first_day_of_week()
    );
    (locale, table)
}

impl DateAdapter for ChronoDateAdapter {
    type Date = DateValue;

    fn locale(&self) -> &Locale {
        &self.locale
    }

    fn set_locale(&mut self, locale: &str) {
        let (locale, locale_data) = load_locale(&Locale::new(locale));
        self.locale = locale;
        self.locale_data = locale_data;
    }

    fn get_year(&self, date: &DateValue) -> Option<i32> {
        date.year()
    }

    fn get_month(&self, date: &DateValue) -> Option<i32> {
        date.month()
            .and_then(|month| i32::try_from(month).ok())
            .map(|month| month - 1)
    }

    fn get_date(&self, date: &DateValue) -> Option<i32> {
        date.day().and_then(|day| i32::try_from(day).ok())
    }

    fn get_day_of_week(&self, date: &DateValue) -> Option<u32> {
        if date.is_sunday() {
            Some(0)
        } else {
            date.weekday()
        }
    }

    fn get_month_names(&self, style: NameStyle) -> &[String] {
        self.locale_data.month_names(style)
    }

    fn get_date_names(&self) -> &[String] {
        self.locale_data.date_names()
    }

    fn get_day_of_week_names(&self, style: NameStyle) -> &[String] {
        self.locale_data.day_of_week_names(style)
    }

    fn get_year_name(&self, date: &DateValue) -> String {
        date.to_format("yyyy", &self.locale)
            .unwrap_or_else(|| INVALID_DATE_TEXT.to_owned())
    }

    fn get_first_day_of_week(&self) -> u32 {
        self.locale_data.first_day_of_week()
    }

    fn get_num_days_in_month(&self, date: &DateValue) -> Option<u32> {
        date.days_in_month()
    }

    fn clone_date(&self, date: &DateValue) -> DateValue {
        date.with_locale(&self.locale)
    }

    fn create_date(&self, year: i32, month: i32, date: i32) -> Result<DateValue, AdapterError> {
        if !(0..=MAX_MONTH_INDEX).contains(&month) {
            return Err(AdapterError::InvalidMonthIndex(month));
        }
        if date < MIN_DAY {
            return Err(AdapterError::InvalidDate(date));
        }

        let fields = DateFields { year, month, date };
        let result = self.create_date_time(Some(fields.into()), None);
        if !result.is_valid() {
            return Err(AdapterError::InvalidDateForMonth { date, month });
        }
        Ok(result)
    }

    fn today(&self) -> DateValue {
        self.create_date_time(None, None)
    }

    fn parse<'a>(
        &self,
        value: impl Into<DateInput<'a, DateValue>>,
        format: impl Into<ParseFormat<'a>>,
    ) -> Option<DateValue> {
        match value.into() {
            DateInput::Text("") => None,
            input @ DateInput::Text(_) => {
                Some(self.create_date_time(Some(input), Some(format.into())))
            }
            input => Some(self.create_date_time(Some(input), None)),
        }
    }

    fn format(&self, date: &DateValue, display_format: &str) -> Result<String, AdapterError> {
        date.to_format(display_format, &self.locale)
            .ok_or(AdapterError::CannotFormatInvalidDate)
    }

    fn add_calendar_years(&self, date: &DateValue, years: i32) -> DateValue {
        self.clone_date(date).plus_years(years)
    }

    fn add_calendar_months(&self, date: &DateValue, months: i32) -> DateValue {
        self.clone_date(date).plus_months(months)
    }

    fn add_calendar_days(&self, date: &DateValue, days: i64) -> DateValue {
        self.clone_date(date).plus_days(days)
    }

    fn to_iso8601(&self, date: &DateValue) -> String {
        self.clone_date(date).to_string()
    }

    fn is_date_instance(&self, obj: &dyn Any) -> bool {
        obj.is::<DateValue>()
    }

    fn is_valid(&self, date: &DateValue) -> bool {
        date.is_valid()
    }

    fn invalid(&self) -> DateValue {
        DateValue::invalid(INVALID_REASON)
    }

    /// Accepts ISO 8601 text, system times and existing dates; empty text
    /// and `None` yield `None`, anything unusable an invalid date.
    fn deserialize(&self, value: Option<DateInput<'_, DateValue>>) -> Option<DateValue> {
        let candidate = match value {
            Some(DateInput::Date(date)) => return Some(self.clone_date(date)),
            Some(DateInput::Text("")) => return None,
            Some(input @ DateInput::SystemTime(_)) => Some(self.create_date_time(Some(input), None)),
            Some(input @ DateInput::Text(_)) => Some(
                self.create_date_time(Some(input), Some(ParseFormat::Single(ISO8601_FORMAT))),
            ),
            _ => None,
        };
        if let Some(date) = candidate.filter(DateValue::is_valid) {
            return Some(self.create_date_time(Some(DateInput::Date(&date)), None));
        }
        default_deserialize(self, value)
    }
}
