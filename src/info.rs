//! Locale-dependent calendar vocabulary: month and weekday names, day
//! periods, digit glyphs and the localized date layouts behind the `D`
//! pattern macros.
//!
//! Names come from the glibc locale data chrono formats with. Narrow names,
//! native digits and the `D` layouts are not part of that data and are
//! supplied here. Weekday lists run Sunday first, as in the locale data.

use pure_rust_locales::{Locale, locale_match};

use crate::types::{NameStyle, language_of, normalize_tag};

/// Locale used when a tag names nothing the data knows
const FALLBACK: Locale = Locale::en_US;

/// Day periods for locales whose data leaves them blank
const AM_PM: [&str; 2] = ["AM", "PM"];

/// Calendar vocabulary of one locale.
#[derive(Debug, Clone)]
pub struct LocaleInfo {
    locale: Locale,
    /// Long, short and narrow month names
    months: [Vec<String>; 3],
    /// Long, short and narrow weekday names, Sunday first
    weekdays: [Vec<String>; 3],
    meridiems: [String; 2],
    /// Native digits zero through nine, when the locale does not use ASCII
    digits: Option<[char; 10]>,
    /// Layouts for `D`, `DD`, `DDD` and `DDDD`
    date_formats: [String; 4],
}

impl LocaleInfo {
    fn build(tag: &str, locale: Locale) -> Self {
        let long_months = trimmed(locale_match!(locale => LC_TIME::MON));
        let short_months = trimmed(locale_match!(locale => LC_TIME::ABMON));
        let long_days = trimmed(locale_match!(locale => LC_TIME::DAY));
        let short_days = trimmed(locale_match!(locale => LC_TIME::ABDAY));

        let meridiems = match locale_match!(locale => LC_TIME::AM_PM) {
            [am, pm] if !am.trim().is_empty() && !pm.trim().is_empty() => {
                [am.trim().to_owned(), pm.trim().to_owned()]
            }
            _ => AM_PM.map(str::to_owned),
        };

        let normalized = normalize_tag(tag);
        let language = language_of(&normalized);
        let digits = NATIVE_DIGITS
            .iter()
            .find(|(candidate, _)| *candidate == language)
            .map(|(_, digits)| *digits);
        let date_formats = match DATE_LAYOUTS
            .iter()
            .find(|(candidate, _)| *candidate == normalized)
            .or_else(|| DATE_LAYOUTS.iter().find(|(candidate, _)| *candidate == language))
        {
            Some((_, layouts)) => layouts.map(str::to_owned),
            None => [
                layout_from_strftime(locale_match!(locale => LC_TIME::D_FMT)),
                DEFAULT_LAYOUTS[0].to_owned(),
                DEFAULT_LAYOUTS[1].to_owned(),
                DEFAULT_LAYOUTS[2].to_owned(),
            ],
        };

        let narrow_months = narrowed(&long_months, &short_months);
        let narrow_days = narrowed(&long_days, &short_days);
        Self {
            locale,
            months: [long_months, short_months, narrow_months],
            weekdays: [long_days, short_days, narrow_days],
            meridiems,
            digits,
            date_formats,
        }
    }

    /// Entry for `tag`, matching the full tag first and then its language.
    pub fn lookup(tag: &str) -> Option<Self> {
        resolve(tag).map(|locale| Self::build(tag, locale))
    }

    /// Like `lookup`, falling back to US English.
    pub fn for_locale(tag: &str) -> Self {
        Self::lookup(tag).unwrap_or_else(|| Self::build(tag, FALLBACK))
    }

    /// The locale data entry, as chrono names it
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    pub fn month_names(&self, style: NameStyle) -> &[String] {
        &self.months[style.index()]
    }

    /// Weekday names, Sunday first.
    pub fn weekday_names(&self, style: NameStyle) -> &[String] {
        &self.weekdays[style.index()]
    }

    /// Before-noon and after-noon markers
    pub const fn meridiems(&self) -> &[String; 2] {
        &self.meridiems
    }

    /// Layout behind a `D` macro of the given width (1 through 4).
    pub fn date_format(&self, width: usize) -> Option<&str> {
        width
            .checked_sub(1)
            .and_then(|index| self.date_formats.get(index))
            .map(String::as_str)
    }

    /// Rewrites ASCII digits in `text` with the locale's native digits.
    pub fn localize_digits(&self, text: &str) -> String {
        match self.digits {
            None => text.to_owned(),
            Some(digits) => text
                .chars()
                .map(|c| {
                    c.to_digit(10)
                        .and_then(|d| digits.get(d as usize).copied())
                        .unwrap_or(c)
                })
                .collect(),
        }
    }

    /// Rewrites the locale's native digits in `text` as ASCII digits.
    pub fn delocalize_digits(&self, text: &str) -> String {
        match self.digits {
            None => text.to_owned(),
            Some(digits) => text
                .chars()
                .map(|c| {
                    digits
                        .iter()
                        .position(|&native| native == c)
                        .and_then(|d| u32::try_from(d).ok())
                        .and_then(|d| char::from_digit(d, 10))
                        .unwrap_or(c)
                })
                .collect(),
        }
    }
}

/// Name lists in the shape the adapter consumes.
pub struct Info;

impl Info {
    /// The twelve month names, January first.
    pub fn months(style: NameStyle, locale: &str) -> Vec<String> {
        LocaleInfo::for_locale(locale).month_names(style).to_vec()
    }

    /// The seven weekday names, Sunday first.
    pub fn weekdays(style: NameStyle, locale: &str) -> Vec<String> {
        LocaleInfo::for_locale(locale).weekday_names(style).to_vec()
    }
}

/// Maps a tag such as `fr`, `fr-CA` or `ja_JP` onto a locale data entry.
///
/// The region is tried first, then the language's usual territory, then
/// the language doubled (`ru` to `ru_RU`).
fn resolve(tag: &str) -> Option<Locale> {
    let normalized = normalize_tag(tag);
    let language = language_of(&normalized);
    if language.is_empty() {
        return None;
    }

    let regional = normalized
        .split('-')
        .nth(1)
        .filter(|region| region.len() == 2)
        .map(|region| format!("{language}_{}", region.to_ascii_uppercase()));
    let territory = DEFAULT_TERRITORIES
        .binary_search_by(|(candidate, _)| (*candidate).cmp(language))
        .ok()
        .map(|index| DEFAULT_TERRITORIES[index].1.to_owned());
    let doubled = format!("{language}_{}", language.to_ascii_uppercase());

    regional
        .into_iter()
        .chain(territory)
        .chain(std::iter::once(doubled))
        .find_map(|name| Locale::try_from(name.as_str()).ok())
}

fn trimmed(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.trim().to_owned()).collect()
}

/// One-letter forms: a one-letter short name as is, the leading number of
/// a numeric name, otherwise the first letter of the long name.
fn narrowed(long: &[String], short: &[String]) -> Vec<String> {
    long.iter()
        .zip(short)
        .map(|(long, short)| {
            if short.chars().count() == 1 {
                return short.clone();
            }
            let number: String = long.chars().take_while(char::is_ascii_digit).collect();
            if !number.is_empty() {
                return number;
            }
            long.chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default()
        })
        .collect()
}

/// Turns a strftime date layout (`%d.%m.%Y`) into a pattern (`dd.MM.yyyy`).
fn layout_from_strftime(layout: &str) -> String {
    let mut pattern = String::new();
    let mut quoted = false;
    let mut chars = layout.chars();
    while let Some(c) = chars.next() {
        if c.is_ascii_alphabetic() != quoted && c != '\'' {
            pattern.push('\'');
            quoted = !quoted;
        }
        if c != '%' {
            match c {
                '\'' => pattern.push_str("''"),
                c => pattern.push(c),
            }
            continue;
        }
        let mut conversion = chars.next();
        while let Some('-' | '_' | '0' | 'E' | 'O') = conversion {
            conversion = chars.next();
        }
        let field = match conversion {
            Some('d') => "dd",
            Some('e') => "d",
            Some('m') => "MM",
            Some('Y') => "yyyy",
            Some('y') => "yy",
            Some('b' | 'h') => "MMM",
            Some('B') => "MMMM",
            Some('a') => "EEE",
            Some('A') => "EEEE",
            Some('%') => "%",
            _ => "",
        };
        pattern.push_str(field);
    }
    if quoted {
        pattern.push('\'');
    }
    pattern
}

/// Usual territory of a language, where it is not the language doubled.
/// Sorted by language for binary search.
static DEFAULT_TERRITORIES: [(&str, &str); 24] = [
    ("ar", "ar_AE"),
    ("be", "be_BY"),
    ("bn", "bn_IN"),
    ("ca", "ca_ES"),
    ("cs", "cs_CZ"),
    ("cy", "cy_GB"),
    ("da", "da_DK"),
    ("el", "el_GR"),
    ("en", "en_US"),
    ("et", "et_EE"),
    ("eu", "eu_ES"),
    ("fa", "fa_IR"),
    ("gl", "gl_ES"),
    ("he", "he_IL"),
    ("hi", "hi_IN"),
    ("ja", "ja_JP"),
    ("ko", "ko_KR"),
    ("nb", "nb_NO"),
    ("pt", "pt_BR"),
    ("sl", "sl_SI"),
    ("sv", "sv_SE"),
    ("uk", "uk_UA"),
    ("vi", "vi_VN"),
    ("zh", "zh_CN"),
];

static NATIVE_DIGITS: [(&str, [char; 10]); 2] = [
    ("ar", ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩']),
    ("fa", ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹']),
];

/// `DD`, `DDD` and `DDDD` for locales without their own layouts; `D`
/// comes from the locale's strftime date layout.
const DEFAULT_LAYOUTS: [&str; 3] = ["d MMM yyyy", "d MMMM yyyy", "EEEE, d MMMM yyyy"];

static DATE_LAYOUTS: [(&str, [&str; 4]); 10] = [
    ("en", ["M/d/yyyy", "MMM d, yyyy", "MMMM d, yyyy", "EEEE, MMMM d, yyyy"]),
    ("en-gb", ["dd/MM/yyyy", "d MMM yyyy", "d MMMM yyyy", "EEEE d MMMM yyyy"]),
    ("fr", ["dd/MM/yyyy", "d MMM yyyy", "d MMMM yyyy", "EEEE d MMMM yyyy"]),
    ("de", ["d.M.yyyy", "dd.MM.yyyy", "d. MMMM yyyy", "EEEE, d. MMMM yyyy"]),
    (
        "es",
        ["d/M/yyyy", "d MMM yyyy", "d 'de' MMMM 'de' yyyy", "EEEE, d 'de' MMMM 'de' yyyy"],
    ),
    ("it", ["d/M/yyyy", "d MMM yyyy", "d MMMM yyyy", "EEEE d MMMM yyyy"]),
    (
        "pt",
        ["dd/MM/yyyy", "d 'de' MMM 'de' yyyy", "d 'de' MMMM 'de' yyyy", "EEEE, d 'de' MMMM 'de' yyyy"],
    ),
    ("ja", ["yyyy/M/d", "yyyy年M月d日", "yyyy年M月d日", "yyyy年M月d日EEEE"]),
    ("zh", ["yyyy/M/d", "yyyy年M月d日", "yyyy年M月d日", "yyyy年M月d日EEEE"]),
    ("ar", ["d/M/yyyy", "dd/MM/yyyy", "d MMMM yyyy", "EEEE، d MMMM yyyy"]),
];
