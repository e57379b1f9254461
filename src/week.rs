use crate::prelude::*;
use crate::types::{language_of, normalize_tag};

/// Week rules of a locale.
/// Converts from a `(first_day_of_week, first_day_of_year)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From)]
pub struct WeekRule {
    /// First day of the week, 0 = Sunday ..= 6 = Saturday
    pub first_day_of_week: u32,
    /// The week containing January `first_day_of_year` is week one
    pub first_day_of_year: u32,
}

/// Returns the week rule for `locale`, trying the full tag before its language.
pub fn week_rule(locale: &str) -> Option<WeekRule> {
    let tag = normalize_tag(locale);
    find(&tag).or_else(|| find(language_of(&tag)))
}

fn find(tag: &str) -> Option<WeekRule> {
    WEEK_RULES
        .binary_search_by(|(candidate, ..)| (*candidate).cmp(tag))
        .ok()
        .map(|index| {
            let (_, first_day_of_week, first_day_of_year) = WEEK_RULES[index];
            WeekRule::from((first_day_of_week, first_day_of_year))
        })
}

// Sorted by tag for binary search.
static WEEK_RULES: [(&str, u32, u32); 79] = [
    ("af", 1, 4),
    ("ar", 6, 12),
    ("ar-dz", 0, 4),
    ("ar-kw", 0, 12),
    ("ar-ly", 6, 12),
    ("ar-ma", 6, 12),
    ("ar-sa", 0, 6),
    ("ar-tn", 1, 4),
    ("az", 1, 7),
    ("be", 1, 7),
    ("bg", 1, 7),
    ("bn", 0, 6),
    ("bs", 1, 7),
    ("ca", 1, 4),
    ("cs", 1, 4),
    ("cy", 1, 4),
    ("da", 1, 4),
    ("de", 1, 4),
    ("de-at", 1, 4),
    ("de-ch", 1, 4),
    ("el", 1, 4),
    ("en", 0, 6),
    ("en-au", 0, 4),
    ("en-ca", 0, 6),
    ("en-gb", 1, 4),
    ("en-ie", 1, 4),
    ("en-in", 0, 6),
    ("en-nz", 1, 4),
    ("en-sg", 1, 4),
    ("eo", 1, 7),
    ("es", 1, 4),
    ("es-do", 1, 4),
    ("es-mx", 0, 4),
    ("es-us", 0, 6),
    ("et", 1, 4),
    ("eu", 1, 7),
    ("fa", 6, 12),
    ("fi", 1, 4),
    ("fo", 1, 4),
    ("fr", 1, 4),
    ("fr-ca", 0, 6),
    ("fr-ch", 1, 4),
    ("fy", 1, 4),
    ("ga", 1, 4),
    ("gd", 1, 4),
    ("gl", 1, 4),
    ("he", 0, 6),
    ("hi", 0, 6),
    ("hr", 1, 7),
    ("hu", 1, 4),
    ("hy-am", 1, 7),
    ("id", 0, 6),
    ("is", 1, 4),
    ("it", 1, 4),
    ("ja", 0, 6),
    ("ka", 1, 7),
    ("kk", 1, 7),
    ("ko", 0, 6),
    ("lt", 1, 4),
    ("lv", 1, 4),
    ("mk", 1, 7),
    ("nb", 1, 4),
    ("nl", 1, 4),
    ("pl", 1, 4),
    ("pt", 1, 4),
    ("pt-br", 0, 6),
    ("ro", 1, 7),
    ("ru", 1, 4),
    ("sk", 1, 4),
    ("sl", 1, 7),
    ("sr", 1, 7),
    ("sv", 1, 4),
    ("th", 0, 6),
    ("tr", 1, 7),
    ("uk", 1, 7),
    ("vi", 1, 4),
    ("zh-cn", 1, 4),
    ("zh-hk", 0, 6),
    ("zh-tw", 1, 4),
];
