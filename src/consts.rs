/// Number of months in a year
pub const MONTHS_IN_YEAR: usize = 12;

/// Number of days in a week
pub const DAYS_IN_WEEK: usize = 7;

/// Largest day-of-month across all months, used to size the date-name table
pub const MAX_DAYS_IN_MONTH: usize = 31;

/// Largest valid zero-based month index (December)
pub const MAX_MONTH_INDEX: i32 = 11;

/// First day of month, used for lower bounds
pub const MIN_DAY: i32 = 1;

/// Library weekday number for Sunday (weekdays run 1 = Monday ..= 7 = Sunday)
pub const LIBRARY_SUNDAY: u32 = 7;

/// Reserved parse format meaning "parse as ISO 8601"
pub const ISO8601_FORMAT: &str = "ISO8601";

/// Year and month used to render the 31 day-of-month names
pub const DATE_NAMES_REFERENCE_YEAR: i32 = 2017;
/// Zero-based month (January) used to render the day-of-month names
pub const DATE_NAMES_REFERENCE_MONTH: i32 = 0;

/// Locale tag normalized to `JAPANESE_LOCALE` by `set_locale`
pub const JAPANESE_REGIONAL_LOCALE: &str = "ja-JP";
/// Japanese locale tag; month names get `JAPANESE_MONTH_SUFFIX` appended
pub const JAPANESE_LOCALE: &str = "ja";
/// Character for "month" missing from numeric Japanese month names
pub const JAPANESE_MONTH_SUFFIX: char = '月';

/// Locale used when neither the caller nor the environment provides one
pub const FALLBACK_LOCALE: &str = "en-US";

/// Environment variables consulted, in order, for the default locale
pub const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

/// Text rendered for invalid values by `to_iso8601` and `Display`
pub const INVALID_DATE_TEXT: &str = "Invalid DateTime";

/// Reason recorded by `DateAdapter::invalid`
pub const INVALID_REASON: &str = "invalid";

/// Two-digit years above this parse into the 1900s, others into the 2000s
pub const TWO_DIGIT_CUTOFF_YEAR: i32 = 60;
