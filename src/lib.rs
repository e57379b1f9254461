//! A locale-aware date adapter for date-picker components, built on `chrono`.
//!
//! [`DateAdapter`] is the contract a date picker drives: field accessors,
//! localized name lists, construction, parsing, formatting, calendar
//! arithmetic and validity checks. [`ChronoDateAdapter`] implements it over
//! [`DateValue`], an immutable, zone-anchored, locale-tagged date.
//!
//! ```
//! use chrono_date_adapter::{AdapterOptions, ChronoDateAdapter, DateAdapter};
//!
//! let adapter = ChronoDateAdapter::new(Some("fr"), AdapterOptions::default());
//! let date = adapter.create_date(2017, 0, 2).unwrap();
//! assert_eq!(adapter.format(&date, "DD").unwrap(), "2 janv. 2017");
//! assert_eq!(adapter.get_first_day_of_week(), 1);
//! ```

mod adapter;
mod config;
mod consts;
mod info;
mod locale_table;
mod pattern;
mod prelude;
mod types;
mod value;
mod week;

pub use adapter::ChronoDateAdapter;
pub use config::{AdapterOptions, DateFormats, DisplayFormats, ParseFormats};
pub use consts::*;
pub use info::{Info, LocaleInfo};
pub use locale_table::LocaleTable;
pub use types::{DateFields, DateInput, Locale, NameStyle, ParseFormat, Zone};
pub use value::{DateValue, InvalidReason};
pub use week::{WeekRule, week_rule};

use std::any::Any;
use std::cmp::Ordering;

/// Errors raised by [`DateAdapter`] operations.
///
/// Text that fails to parse is not an error; it yields an invalid date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// Month index outside `0..=11`.
    #[error("Invalid month index \"{0}\". Month index has to be between 0 and 11.")]
    InvalidMonthIndex(i32),

    /// Day of month below 1.
    #[error("Invalid date \"{0}\". Date has to be greater than 0.")]
    InvalidDate(i32),

    /// Day of month past the end of the month.
    #[error("Invalid date \"{date}\" for month with index \"{month}\".")]
    InvalidDateForMonth { date: i32, month: i32 },

    #[error("Cannot format invalid date.")]
    CannotFormatInvalidDate,
}

/// The contract a date picker uses to work with a date type.
///
/// Months are zero-based and weekdays run 0 = Sunday ..= 6 = Saturday.
/// Accessors return `None` for invalid dates.
pub trait DateAdapter {
    type Date: Clone + 'static;

    /// Active locale
    fn locale(&self) -> &Locale;

    /// Makes `locale` active and rebuilds the cached name tables.
    fn set_locale(&mut self, locale: &str);

    fn get_year(&self, date: &Self::Date) -> Option<i32>;

    /// Zero-based month
    fn get_month(&self, date: &Self::Date) -> Option<i32>;

    /// One-based day of month
    fn get_date(&self, date: &Self::Date) -> Option<i32>;

    /// 0 = Sunday ..= 6 = Saturday
    fn get_day_of_week(&self, date: &Self::Date) -> Option<u32>;

    fn get_month_names(&self, style: NameStyle) -> &[String];

    /// Labels for days 1 through 31
    fn get_date_names(&self) -> &[String];

    /// Weekday names, starting at the first day of the week.
    fn get_day_of_week_names(&self, style: NameStyle) -> &[String];

    fn get_year_name(&self, date: &Self::Date) -> String;

    fn get_first_day_of_week(&self) -> u32;

    fn get_num_days_in_month(&self, date: &Self::Date) -> Option<u32>;

    /// Copies `date`, tagged with the active locale.
    fn clone_date(&self, date: &Self::Date) -> Self::Date;

    /// Builds a date from a year, a zero-based month and a day of month.
    ///
    /// # Errors
    ///
    /// Returns an error when the month index, the day, or their combination
    /// is out of range.
    fn create_date(&self, year: i32, month: i32, date: i32) -> Result<Self::Date, AdapterError>;

    fn today(&self) -> Self::Date;

    /// Parses user input.
    ///
    /// Empty text yields `None`. Other text is parsed with `format`; text
    /// that does not match yields an invalid date, not `None`.
    fn parse<'a>(
        &self,
        value: impl Into<DateInput<'a, Self::Date>>,
        format: impl Into<ParseFormat<'a>>,
    ) -> Option<Self::Date>;

    /// Renders `date` with `display_format` under the active locale.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::CannotFormatInvalidDate`] for invalid dates.
    fn format(&self, date: &Self::Date, display_format: &str) -> Result<String, AdapterError>;

    fn add_calendar_years(&self, date: &Self::Date, years: i32) -> Self::Date;

    fn add_calendar_months(&self, date: &Self::Date, months: i32) -> Self::Date;

    fn add_calendar_days(&self, date: &Self::Date, days: i64) -> Self::Date;

    fn to_iso8601(&self, date: &Self::Date) -> String;

    fn is_date_instance(&self, obj: &dyn Any) -> bool;

    fn is_valid(&self, date: &Self::Date) -> bool;

    fn invalid(&self) -> Self::Date;

    /// Turns a serialized or native value into a date.
    ///
    /// `None` stays `None`; a valid date is returned as is; anything else
    /// becomes [`DateAdapter::invalid`].
    fn deserialize(&self, value: Option<DateInput<'_, Self::Date>>) -> Option<Self::Date> {
        default_deserialize(self, value)
    }

    fn get_valid_date_or_null<'d>(&self, date: &'d Self::Date) -> Option<&'d Self::Date> {
        self.is_valid(date).then_some(date)
    }

    /// Orders two dates by year, then month, then day. Invalid dates sort
    /// before valid ones.
    fn compare_date(&self, first: &Self::Date, second: &Self::Date) -> Ordering {
        let key = |date: &Self::Date| {
            (
                self.get_year(date),
                self.get_month(date),
                self.get_date(date),
            )
        };
        key(first).cmp(&key(second))
    }

    /// Both absent, both invalid, or both valid on the same day.
    fn same_date(&self, first: Option<&Self::Date>, second: Option<&Self::Date>) -> bool {
        match (first, second) {
            (Some(first), Some(second)) => {
                match (self.is_valid(first), self.is_valid(second)) {
                    (true, true) => self.compare_date(first, second) == Ordering::Equal,
                    (first_valid, second_valid) => first_valid == second_valid,
                }
            }
            (None, None) => true,
            _ => false,
        }
    }

    /// Clamps `date` into `[min, max]`; either bound may be absent.
    fn clamp_date(
        &self,
        date: &Self::Date,
        min: Option<&Self::Date>,
        max: Option<&Self::Date>,
    ) -> Self::Date {
        if let Some(min) = min.filter(|min| self.compare_date(date, min) == Ordering::Less) {
            return min.clone();
        }
        if let Some(max) = max.filter(|max| self.compare_date(date, max) == Ordering::Greater) {
            return max.clone();
        }
        date.clone()
    }
}

/// Fallback deserialization shared by every adapter: valid dates pass
/// through, absent input stays absent, everything else is invalid.
pub fn default_deserialize<A: DateAdapter + ?Sized>(
    adapter: &A,
    value: Option<DateInput<'_, A::Date>>,
) -> Option<A::Date> {
    match value? {
        DateInput::Date(date) if adapter.is_valid(date) => Some(date.clone()),
        _ => Some(adapter.invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal adapter over plain day numbers, exercising the provided methods.
    struct DayAdapter {
        locale: Locale,
    }

    impl DayAdapter {
        fn new() -> Self {
            Self {
                locale: Locale::default(),
            }
        }
    }

    /// Negative day numbers are invalid.
    type Day = i64;

    impl DateAdapter for DayAdapter {
        type Date = Day;

        fn locale(&self) -> &Locale {
            &self.locale
        }

        fn set_locale(&mut self, locale: &str) {
            self.locale = Locale::new(locale);
        }

        fn get_year(&self, date: &Day) -> Option<i32> {
            (*date >= 0).then(|| i32::try_from(date / 372).unwrap())
        }

        fn get_month(&self, date: &Day) -> Option<i32> {
            (*date >= 0).then(|| i32::try_from(date % 372 / 31).unwrap())
        }

        fn get_date(&self, date: &Day) -> Option<i32> {
            (*date >= 0).then(|| i32::try_from(date % 31 + 1).unwrap())
        }

        fn get_day_of_week(&self, date: &Day) -> Option<u32> {
            (*date >= 0).then(|| u32::try_from(date % 7).unwrap())
        }

        fn get_month_names(&self, _style: NameStyle) -> &[String] {
            &[]
        }

        fn get_date_names(&self) -> &[String] {
            &[]
        }

        fn get_day_of_week_names(&self, _style: NameStyle) -> &[String] {
            &[]
        }

        fn get_year_name(&self, date: &Day) -> String {
            format!("{:?}", self.get_year(date))
        }

        fn get_first_day_of_week(&self) -> u32 {
            0
        }

        fn get_num_days_in_month(&self, _date: &Day) -> Option<u32> {
            Some(31)
        }

        fn clone_date(&self, date: &Day) -> Day {
            *date
        }

        fn create_date(&self, year: i32, month: i32, date: i32) -> Result<Day, AdapterError> {
            Ok(i64::from(year) * 372 + i64::from(month) * 31 + i64::from(date) - 1)
        }

        fn today(&self) -> Day {
            0
        }

        fn parse<'a>(
            &self,
            value: impl Into<DateInput<'a, Day>>,
            _format: impl Into<ParseFormat<'a>>,
        ) -> Option<Day> {
            match value.into() {
                DateInput::Timestamp(day) => Some(day),
                _ => None,
            }
        }

        fn format(&self, date: &Day, _display_format: &str) -> Result<String, AdapterError> {
            Ok(date.to_string())
        }

        fn add_calendar_years(&self, date: &Day, years: i32) -> Day {
            date + i64::from(years) * 372
        }

        fn add_calendar_months(&self, date: &Day, months: i32) -> Day {
            date + i64::from(months) * 31
        }

        fn add_calendar_days(&self, date: &Day, days: i64) -> Day {
            date + days
        }

        fn to_iso8601(&self, date: &Day) -> String {
            date.to_string()
        }

        fn is_date_instance(&self, obj: &dyn Any) -> bool {
            obj.is::<Day>()
        }

        fn is_valid(&self, date: &Day) -> bool {
            *date >= 0
        }

        fn invalid(&self) -> Day {
            -1
        }
    }

    #[test]
    fn test_compare_date() {
        let adapter = DayAdapter::new();
        let jan1 = adapter.create_date(2017, 0, 1).unwrap();
        let jan2 = adapter.create_date(2017, 0, 2).unwrap();
        let feb1 = adapter.create_date(2017, 1, 1).unwrap();
        assert_eq!(adapter.compare_date(&jan1, &jan2), Ordering::Less);
        assert_eq!(adapter.compare_date(&feb1, &jan2), Ordering::Greater);
        assert_eq!(adapter.compare_date(&jan1, &jan1), Ordering::Equal);
        assert_eq!(adapter.compare_date(&-1, &jan1), Ordering::Less);
    }

    #[test]
    fn test_same_date() {
        let adapter = DayAdapter::new();
        assert!(adapter.same_date(None, None));
        assert!(adapter.same_date(Some(&5), Some(&5)));
        assert!(adapter.same_date(Some(&-1), Some(&-2)));
        assert!(!adapter.same_date(Some(&5), Some(&6)));
        assert!(!adapter.same_date(Some(&5), Some(&-1)));
        assert!(!adapter.same_date(Some(&5), None));
        assert!(!adapter.same_date(None, Some(&5)));
    }

    #[test]
    fn test_clamp_date() {
        let adapter = DayAdapter::new();
        assert_eq!(adapter.clamp_date(&1, Some(&10), Some(&20)), 10);
        assert_eq!(adapter.clamp_date(&30, Some(&10), Some(&20)), 20);
        assert_eq!(adapter.clamp_date(&15, Some(&10), Some(&20)), 15);
        assert_eq!(adapter.clamp_date(&1, None, Some(&20)), 1);
        assert_eq!(adapter.clamp_date(&30, Some(&10), None), 30);
    }

    #[test]
    fn test_get_valid_date_or_null() {
        let adapter = DayAdapter::new();
        assert_eq!(adapter.get_valid_date_or_null(&3), Some(&3));
        assert_eq!(adapter.get_valid_date_or_null(&-1), None);
    }

    #[test]
    fn test_default_deserialize() {
        let adapter = DayAdapter::new();
        assert_eq!(adapter.deserialize(None), None);
        assert_eq!(adapter.deserialize(Some(DateInput::Date(&4))), Some(4));
        assert_eq!(adapter.deserialize(Some(DateInput::Date(&-5))), Some(-1));
        assert_eq!(adapter.deserialize(Some(DateInput::Text("4"))), Some(-1));
        assert_eq!(adapter.deserialize(Some(DateInput::Timestamp(4))), Some(-1));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AdapterError::InvalidMonthIndex(12).to_string(),
            "Invalid month index \"12\". Month index has to be between 0 and 11."
        );
        assert_eq!(
            AdapterError::InvalidDate(0).to_string(),
            "Invalid date \"0\". Date has to be greater than 0."
        );
        assert_eq!(
            AdapterError::InvalidDateForMonth { date: 31, month: 3 }.to_string(),
            "Invalid date \"31\" for month with index \"3\"."
        );
        assert_eq!(
            AdapterError::CannotFormatInvalidDate.to_string(),
            "Cannot format invalid date."
        );
    }
}
