//! Date patterns: tokenizing, rendering and parsing.
//!
//! A pattern is a run of field tokens (`yyyy`, `MM`, `d`, ...) and literal
//! text. Text inside single quotes is literal and `''` is a quote. The `D`
//! through `DDDD` macros stand for the locale's date layouts and are
//! expanded first.
//!
//! Each token maps onto chrono format items, which do the rendering and the
//! reading; `Parsed` does the range checks and resolves the date. Localized
//! names are matched here, since chrono reads English names only.

use std::fmt::Write;

use chrono::format::{Fixed, Item, Numeric, Pad, ParseErrorKind, Parsed as Fields};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Timelike, Weekday};

use crate::consts::TWO_DIGIT_CUTOFF_YEAR;
use crate::info::LocaleInfo;
use crate::types::NameStyle;
use crate::value::InvalidReason;

const QUOTE: char = '\'';
const MACRO_LETTER: char = 'D';
const NANOS_PER_MILLI: u32 = 1_000_000;

const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// A run of `width` identical letters
    Field { letter: char, width: usize },
    Literal(String),
}

pub(crate) fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut quoted = false;
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c == QUOTE {
            if chars.next_if_eq(&QUOTE).is_some() {
                literal.push(QUOTE);
            } else {
                quoted = !quoted;
            }
            continue;
        }
        if quoted || !c.is_ascii_alphabetic() {
            literal.push(c);
            continue;
        }

        let mut width = 1;
        while chars.next_if_eq(&c).is_some() {
            width += 1;
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(&mut literal)));
        }
        tokens.push(Token::Field { letter: c, width });
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

/// Tokenizes `pattern`, replacing date macros with the locale's layouts.
fn expand(pattern: &str, info: &LocaleInfo) -> Vec<Token> {
    tokenize(pattern)
        .into_iter()
        .flat_map(|token| match token {
            Token::Field {
                letter: MACRO_LETTER,
                width,
            } => match info.date_format(width) {
                Some(layout) => tokenize(layout),
                None => vec![token],
            },
            other => vec![other],
        })
        .collect()
}

/// What a token stands for.
#[derive(Debug, Clone)]
enum Step {
    /// Rendered and read by chrono
    Item(Item<'static>),
    MonthName(NameStyle),
    WeekdayName(NameStyle),
    /// Day of week as a number, 1 = Monday
    WeekdayNumber,
    Meridiem,
    /// Two-digit year, read against the cutoff
    ShortYear,
    Millis { padded: bool },
    /// `Z` is narrow (`+5`), `ZZ` has a colon, `ZZZ` has none
    Offset { width: usize },
}

fn numeric(numeric: Numeric, width: usize) -> Step {
    let pad = if width == 1 { Pad::None } else { Pad::Zero };
    Step::Item(Item::Numeric(numeric, pad))
}

fn step(token: Token) -> Option<Step> {
    let (letter, width) = match token {
        Token::Literal(text) => return Some(Step::Item(Item::OwnedLiteral(text.into()))),
        Token::Field { letter, width } => (letter, width),
    };
    let step = match (letter, width) {
        ('d', _) => numeric(Numeric::Day, width),
        ('M' | 'L', 1 | 2) => numeric(Numeric::Month, width),
        ('M' | 'L', 3) => Step::MonthName(NameStyle::Short),
        ('M' | 'L', 4) => Step::MonthName(NameStyle::Long),
        ('M' | 'L', 5) => Step::MonthName(NameStyle::Narrow),
        ('y', 2) => Step::ShortYear,
        ('y', 1..=3) => numeric(Numeric::Year, 1),
        ('y', _) => numeric(Numeric::Year, width),
        ('E' | 'c', 1) => Step::WeekdayNumber,
        ('E' | 'c', 3) => Step::WeekdayName(NameStyle::Short),
        ('E' | 'c', 4) => Step::WeekdayName(NameStyle::Long),
        ('E' | 'c', 5) => Step::WeekdayName(NameStyle::Narrow),
        ('H', _) => numeric(Numeric::Hour, width),
        ('h', _) => numeric(Numeric::Hour12, width),
        ('m', _) => numeric(Numeric::Minute, width),
        ('s', _) => numeric(Numeric::Second, width),
        ('S', 1) => Step::Millis { padded: false },
        ('S', _) => Step::Millis { padded: true },
        ('a', _) => Step::Meridiem,
        ('o', _) => numeric(Numeric::Ordinal, width),
        ('q', _) => numeric(Numeric::Quarter, width),
        ('Z', 1..=3) => Step::Offset { width },
        _ => return None,
    };
    Some(step)
}

// --- rendering ---

/// Renders `instant` with `pattern`, in the names and digits of `info`.
///
/// Letters that are not fields are written as they are.
pub(crate) fn format(
    instant: &DateTime<FixedOffset>,
    pattern: &str,
    info: &LocaleInfo,
) -> Option<String> {
    let items: Vec<Item<'static>> = expand(pattern, info)
        .into_iter()
        .map(|token| match step(token.clone()) {
            Some(step) => render_item(step, instant, info),
            None => Item::OwnedLiteral(literal_text(&token).into()),
        })
        .collect();

    let mut out = String::new();
    let rendered = instant.format_localized_with_items(items.iter(), info.locale());
    write!(out, "{rendered}").ok()?;
    Some(info.localize_digits(&out))
}

fn literal_text(token: &Token) -> String {
    match token {
        Token::Literal(text) => text.clone(),
        Token::Field { letter, width } => std::iter::repeat_n(*letter, *width).collect(),
    }
}

fn render_item(step: Step, instant: &DateTime<FixedOffset>, info: &LocaleInfo) -> Item<'static> {
    let month = instant.month0() as usize;
    let weekday = instant.weekday().num_days_from_sunday() as usize;
    let owned = |text: &str| Item::OwnedLiteral(text.into());

    match step {
        Step::Item(item) => item,
        Step::MonthName(NameStyle::Short) => Item::Fixed(Fixed::ShortMonthName),
        Step::MonthName(NameStyle::Long) => Item::Fixed(Fixed::LongMonthName),
        Step::MonthName(style) => owned(&info.month_names(style)[month]),
        Step::WeekdayName(NameStyle::Short) => Item::Fixed(Fixed::ShortWeekdayName),
        Step::WeekdayName(NameStyle::Long) => Item::Fixed(Fixed::LongWeekdayName),
        Step::WeekdayName(style) => owned(&info.weekday_names(style)[weekday]),
        Step::WeekdayNumber => Item::Numeric(Numeric::WeekdayFromMon, Pad::None),
        Step::Meridiem => owned(&info.meridiems()[usize::from(instant.hour12().0)]),
        Step::ShortYear => Item::Numeric(Numeric::YearMod100, Pad::Zero),
        Step::Millis { padded } => {
            let millis = instant.nanosecond() / NANOS_PER_MILLI % 1_000;
            if padded {
                owned(&format!("{millis:03}"))
            } else {
                owned(&millis.to_string())
            }
        }
        Step::Offset { width: 1 } => owned(&narrow_offset(*instant.offset())),
        Step::Offset { width: 2 } => Item::Fixed(Fixed::TimezoneOffsetColon),
        Step::Offset { .. } => Item::Fixed(Fixed::TimezoneOffset),
    }
}

/// `+5` for whole hours, `+5:30` otherwise.
fn narrow_offset(offset: FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let hours = seconds.unsigned_abs() / 3600;
    let minutes = seconds.unsigned_abs() % 3600 / 60;
    if minutes == 0 {
        format!("{sign}{hours}")
    } else {
        format!("{sign}{hours}:{minutes:02}")
    }
}

// --- parsing ---

/// Result of parsing text with a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Parsed {
    /// Wall-clock reading as written
    pub(crate) moment: NaiveDateTime,
    /// Offset the text carried, if it had an offset token
    pub(crate) offset: Option<FixedOffset>,
}

/// Parses `text` with `pattern`. Fields the pattern lacks default to
/// `default_year`, January, day 1 and midnight.
pub(crate) fn parse(
    text: &str,
    pattern: &str,
    info: &LocaleInfo,
    default_year: i32,
) -> Result<Parsed, InvalidReason> {
    let rejected = |kind: ParseErrorKind| match kind {
        ParseErrorKind::OutOfRange => {
            InvalidReason::UnitOutOfRange(format!("\"{text}\" read as {pattern}"))
        }
        _ => InvalidReason::Unparsable {
            input: text.to_owned(),
            format: pattern.to_owned(),
        },
    };

    let ascii = info.delocalize_digits(text);
    let mut rest = ascii.as_str();
    let mut fields = Fields::new();
    let mut weekday = None;
    for token in expand(pattern, info) {
        let step = step(token).ok_or(ParseErrorKind::BadFormat).map_err(rejected)?;
        rest = read(rest, step, info, &mut fields, &mut weekday).map_err(rejected)?;
    }
    if !rest.is_empty() {
        return Err(rejected(ParseErrorKind::TooLong));
    }

    fill_defaults(&mut fields, default_year).map_err(rejected)?;
    let date = fields.to_naive_date().map_err(|e| rejected(e.kind()))?;
    let time = fields.to_naive_time().map_err(|e| rejected(e.kind()))?;
    if let Some(weekday) = weekday {
        if date.weekday() != weekday {
            return Err(InvalidReason::MismatchedWeekday {
                weekday: weekday.number_from_monday(),
                date,
            });
        }
    }

    Ok(Parsed {
        moment: date.and_time(time),
        offset: fields.offset().and_then(FixedOffset::east_opt),
    })
}

/// Reads one step off the front of `text` and returns what is left.
fn read<'t>(
    text: &'t str,
    step: Step,
    info: &LocaleInfo,
    fields: &mut Fields,
    weekday: &mut Option<Weekday>,
) -> Result<&'t str, ParseErrorKind> {
    match step {
        Step::Item(item) => chrono_read(text, fields, item),
        Step::MonthName(NameStyle::Narrow) | Step::WeekdayName(NameStyle::Narrow) => {
            Err(ParseErrorKind::BadFormat)
        }
        Step::MonthName(style) => {
            let (index, rest) = name(text, info.month_names(style))?;
            let month = i64::try_from(index + 1).map_err(|_| ParseErrorKind::OutOfRange)?;
            fields.set_month(month).map_err(|e| e.kind())?;
            Ok(rest)
        }
        Step::WeekdayName(style) => {
            let (index, rest) = name(text, info.weekday_names(style))?;
            *weekday = SUNDAY_FIRST.get(index).copied();
            Ok(rest)
        }
        Step::WeekdayNumber => {
            let mut scratch = Fields::new();
            let item = Item::Numeric(Numeric::WeekdayFromMon, Pad::None);
            let rest = chrono_read(text, &mut scratch, item)?;
            *weekday = scratch.weekday();
            Ok(rest)
        }
        Step::Meridiem => {
            let (index, rest) = name(text, info.meridiems())?;
            fields.set_ampm(index == 1).map_err(|e| e.kind())?;
            Ok(rest)
        }
        Step::ShortYear => {
            let mut scratch = Fields::new();
            let item = Item::Numeric(Numeric::YearMod100, Pad::Zero);
            let rest = chrono_read(text, &mut scratch, item)?;
            let year = scratch.year_mod_100().ok_or(ParseErrorKind::Invalid)?;
            fields.set_year(untruncate_year(year).into()).map_err(|e| e.kind())?;
            Ok(rest)
        }
        Step::Millis { .. } => {
            let mut scratch = Fields::new();
            let item = Item::Numeric(Numeric::Nanosecond, Pad::None);
            let rest = chrono_read(text, &mut scratch, item)?;
            let millis = scratch.nanosecond().ok_or(ParseErrorKind::Invalid)?;
            if millis >= 1_000 {
                return Err(ParseErrorKind::OutOfRange);
            }
            fields
                .set_nanosecond(i64::from(millis * NANOS_PER_MILLI))
                .map_err(|e| e.kind())?;
            Ok(rest)
        }
        Step::Offset { .. } => {
            chrono_read(text, fields, Item::Fixed(Fixed::TimezoneOffsetColonZ))
        }
    }
}

fn chrono_read<'t>(
    text: &'t str,
    fields: &mut Fields,
    item: Item<'_>,
) -> Result<&'t str, ParseErrorKind> {
    chrono::format::parse_and_remainder(fields, text, std::iter::once(item)).map_err(|e| e.kind())
}

/// Matches the longest of `names` at the front of `text`, ignoring case.
fn name<'t>(text: &'t str, names: &[String]) -> Result<(usize, &'t str), ParseErrorKind> {
    let (index, consumed) = names
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.is_empty())
        .filter_map(|(index, name)| {
            let len = name.chars().count();
            let end = text.char_indices().nth(len).map_or(text.len(), |(at, _)| at);
            let candidate = &text[..end];
            (candidate.to_lowercase() == name.to_lowercase()).then_some((index, end))
        })
        .max_by_key(|&(_, consumed)| consumed)
        .ok_or(ParseErrorKind::Invalid)?;
    Ok((index, &text[consumed..]))
}

/// Two-digit years above the cutoff land in the 1900s, the rest in the 2000s.
const fn untruncate_year(year: i32) -> i32 {
    if year > TWO_DIGIT_CUTOFF_YEAR {
        1900 + year
    } else {
        2000 + year
    }
}

/// Fills what the text left out: the default year, January (or the first
/// month of a given quarter), day 1 and midnight. A lone meridiem means
/// noon or midnight; a 12-hour clock without one reads 12 as noon and the
/// rest as morning.
fn fill_defaults(fields: &mut Fields, default_year: i32) -> Result<(), ParseErrorKind> {
    let kind = |e: chrono::format::ParseError| e.kind();
    if fields.year().is_none() {
        fields.set_year(default_year.into()).map_err(kind)?;
    }
    if fields.ordinal().is_none() {
        if fields.month().is_none() {
            let month = fields.quarter().map_or(1, |quarter| (quarter - 1) * 3 + 1);
            fields.set_month(month.into()).map_err(kind)?;
        }
        if fields.day().is_none() {
            fields.set_day(1).map_err(kind)?;
        }
    }
    match (fields.hour_div_12(), fields.hour_mod_12()) {
        (None, None) => fields.set_hour(0).map_err(kind)?,
        (Some(_), None) => fields.set_hour12(12).map_err(kind)?,
        (None, Some(hour)) => fields.set_ampm(hour == 0).map_err(kind)?,
        (Some(_), Some(_)) => {}
    }
    if fields.minute().is_none() {
        fields.set_minute(0).map_err(kind)?;
    }
    if fields.second().is_none() {
        fields.set_second(0).map_err(kind)?;
    }
    Ok(())
}
