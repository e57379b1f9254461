use crate::consts::{
    DATE_NAMES_REFERENCE_MONTH, DATE_NAMES_REFERENCE_YEAR, DAYS_IN_WEEK, JAPANESE_LOCALE,
    JAPANESE_MONTH_SUFFIX, MAX_DAYS_IN_MONTH,
};
use crate::info::Info;
use crate::types::{Locale, NameStyle, Zone};
use crate::value::DateValue;
use crate::week::week_rule;

/// Names and week rules of the active locale, precomputed for the adapter.
///
/// Weekday lists are rotated so that index 0 is `first_day_of_week`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTable {
    first_day_of_week: u32,
    long_months: Vec<String>,
    short_months: Vec<String>,
    narrow_months: Vec<String>,
    dates: Vec<String>,
    long_days_of_week: Vec<String>,
    short_days_of_week: Vec<String>,
    narrow_days_of_week: Vec<String>,
}

impl LocaleTable {
    /// Builds the table for `locale`.
    ///
    /// The week rule is looked up under `requested`, the tag exactly as the
    /// caller gave it; names are read under the normalized `locale`.
    pub fn build(requested: &str, locale: &Locale) -> Self {
        let first_day_of_week = week_rule(requested).map_or(0, |rule| rule.first_day_of_week);
        let months = |style| month_names(style, locale);
        let days = |style| weekday_names(style, locale, first_day_of_week);

        Self {
            first_day_of_week,
            long_months: months(NameStyle::Long),
            short_months: months(NameStyle::Short),
            narrow_months: months(NameStyle::Narrow),
            dates: date_names(locale),
            long_days_of_week: days(NameStyle::Long),
            short_days_of_week: days(NameStyle::Short),
            narrow_days_of_week: days(NameStyle::Narrow),
        }
    }

    /// 0 = Sunday ..= 6 = Saturday
    pub const fn first_day_of_week(&self) -> u32 {
        self.first_day_of_week
    }

    pub fn month_names(&self, style: NameStyle) -> &[String] {
        match style {
            NameStyle::Long => &self.long_months,
            NameStyle::Short => &self.short_months,
            NameStyle::Narrow => &self.narrow_months,
        }
    }

    pub fn day_of_week_names(&self, style: NameStyle) -> &[String] {
        match style {
            NameStyle::Long => &self.long_days_of_week,
            NameStyle::Short => &self.short_days_of_week,
            NameStyle::Narrow => &self.narrow_days_of_week,
        }
    }

    /// Day-of-month labels "1" through "31" in the locale's digits
    pub fn date_names(&self) -> &[String] {
        &self.dates
    }
}

fn month_names(style: NameStyle, locale: &Locale) -> Vec<String> {
    let names = Info::months(style, locale);
    if locale.as_str() != JAPANESE_LOCALE {
        return names;
    }
    names
        .into_iter()
        .map(|mut name| {
            if !name.ends_with(JAPANESE_MONTH_SUFFIX) {
                name.push(JAPANESE_MONTH_SUFFIX);
            }
            name
        })
        .collect()
}

/// Names run Sunday first; start them at `first_day_of_week`.
fn weekday_names(style: NameStyle, locale: &Locale, first_day_of_week: u32) -> Vec<String> {
    let mut names = Info::weekdays(style, locale);
    let start = usize::try_from(first_day_of_week).map_or(0, |day| day % DAYS_IN_WEEK);
    names.rotate_left(start);
    names
}

fn date_names(locale: &Locale) -> Vec<String> {
    let first = DateValue::from_ymd(
        DATE_NAMES_REFERENCE_YEAR,
        DATE_NAMES_REFERENCE_MONTH + 1,
        1,
        Zone::Utc,
    );
    (0..MAX_DAYS_IN_MONTH)
        .filter_map(|offset| {
            let offset = i64::try_from(offset).ok()?;
            first.plus_days(offset).to_format("d", locale)
        })
        .collect()
}
