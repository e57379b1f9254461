use serde::{Deserialize, Serialize};

/// Options fixed when the adapter is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdapterOptions {
    /// Produce UTC dates instead of local ones. Defaults to `false`.
    pub use_utc: bool,
}

impl AdapterOptions {
    pub const fn utc() -> Self {
        Self { use_utc: true }
    }
}

/// The host's date-format record: which patterns to parse input with and
/// which to render the picker's labels with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateFormats {
    pub parse: ParseFormats,
    pub display: DisplayFormats,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseFormats {
    pub date_input: String,
}

impl Default for ParseFormats {
    fn default() -> Self {
        Self {
            date_input: "D".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayFormats {
    pub date_input: String,
    pub month_year_label: String,
    pub date_a11y_label: String,
    pub month_year_a11y_label: String,
}

impl Default for DisplayFormats {
    fn default() -> Self {
        Self {
            date_input: "D".to_owned(),
            month_year_label: "MMM yyyy".to_owned(),
            date_a11y_label: "DDD".to_owned(),
            month_year_a11y_label: "MMMM yyyy".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default_to_local() {
        assert!(!AdapterOptions::default().use_utc);
        assert!(AdapterOptions::utc().use_utc);
    }

    #[test]
    fn test_options_deserialize() {
        let options: AdapterOptions = serde_json::from_str(r#"{"useUtc": true}"#).unwrap();
        assert_eq!(options, AdapterOptions::utc());

        let options: AdapterOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, AdapterOptions::default());
    }

    #[test]
    fn test_date_formats_defaults() {
        let formats = DateFormats::default();
        assert_eq!(formats.parse.date_input, "D");
        assert_eq!(formats.display.date_input, "D");
        assert_eq!(formats.display.month_year_label, "MMM yyyy");
        assert_eq!(formats.display.date_a11y_label, "DDD");
        assert_eq!(formats.display.month_year_a11y_label, "MMMM yyyy");
    }

    #[test]
    fn test_date_formats_serde_names() {
        let json = serde_json::to_value(DateFormats::default()).unwrap();
        assert_eq!(json["parse"]["dateInput"], "D");
        assert_eq!(json["display"]["monthYearLabel"], "MMM yyyy");
        assert_eq!(json["display"]["dateA11yLabel"], "DDD");
        assert_eq!(json["display"]["monthYearA11yLabel"], "MMMM yyyy");
    }

    #[test]
    fn test_date_formats_partial_override() {
        let formats: DateFormats =
            serde_json::from_str(r#"{"display": {"monthYearLabel": "MM/yyyy"}}"#).unwrap();
        assert_eq!(formats.display.month_year_label, "MM/yyyy");
        assert_eq!(formats.display.date_a11y_label, "DDD");
        assert_eq!(formats.parse, ParseFormats::default());
    }
}
