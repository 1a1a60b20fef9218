//! Date formatting with an explicit locale
//!
//! Formatting configuration is a value threaded into each call, never
//! process-wide state. Patterns use date-fns style tokens ("dd MMM yyyy")
//! and are translated to chrono format strings.

use chrono::{DateTime, Datelike, TimeZone};
use std::str::FromStr;

/// Month name tables for a display locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    /// Brazilian Portuguese
    PtBr,
    /// English
    En,
}

impl Locale {
    /// Abbreviated month names, January first
    pub fn months_abbr(&self) -> [&'static str; 12] {
        match self {
            Locale::PtBr => [
                "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
            ],
            Locale::En => [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ],
        }
    }

    /// Full month names, January first
    pub fn months_full(&self) -> [&'static str; 12] {
        match self {
            Locale::PtBr => [
                "janeiro",
                "fevereiro",
                "março",
                "abril",
                "maio",
                "junho",
                "julho",
                "agosto",
                "setembro",
                "outubro",
                "novembro",
                "dezembro",
            ],
            Locale::En => [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ],
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pt-br" | "pt_br" | "ptbr" => Ok(Locale::PtBr),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(format!("unknown locale: {}", other)),
        }
    }
}

/// A reusable date display format: pattern + locale
#[derive(Debug, Clone)]
pub struct DateFormat {
    pattern: String,
    locale: Locale,
}

impl DateFormat {
    /// Create a format from a date-fns style pattern and a locale
    pub fn new(pattern: impl Into<String>, locale: Locale) -> Self {
        Self {
            pattern: pattern.into(),
            locale,
        }
    }

    /// Format a date according to the pattern
    pub fn format<Tz: TimeZone>(&self, date: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        let month_idx = date.month0() as usize;
        // Month name tokens become literal text before the remaining
        // tokens are turned into chrono specifiers.
        let pattern = self
            .pattern
            .replace("MMMM", self.locale.months_full()[month_idx])
            .replace("MMM", self.locale.months_abbr()[month_idx]);
        let chrono_format = datefns_to_chrono_format(&pattern);
        date.format(&chrono_format).to_string()
    }

    /// Format an optional date; `None` renders as an empty string
    pub fn format_opt<Tz: TimeZone>(&self, date: &Option<DateTime<Tz>>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        date.as_ref().map(|d| self.format(d)).unwrap_or_default()
    }
}

/// Convert date-fns style tokens to chrono format specifiers
fn datefns_to_chrono_format(pattern: &str) -> String {
    // Longest tokens first within each category
    let replacements = [
        ("yyyy", "%Y"),
        ("yy", "%y"),
        ("MM", "%m"),
        ("dd", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
    ];

    let mut result = pattern.to_string();
    for (from, to) in replacements {
        result = result.replace(from, to);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_pt_br_abbreviated_month() {
        let fmt = DateFormat::new("dd MMM yyyy", Locale::PtBr);
        assert_eq!(fmt.format(&date(2021, 3, 15)), "15 mar 2021");
        assert_eq!(fmt.format(&date(2021, 2, 1)), "01 fev 2021");
        assert_eq!(fmt.format(&date(2021, 12, 25)), "25 dez 2021");
    }

    #[test]
    fn test_full_month_name() {
        let fmt = DateFormat::new("dd MMMM yyyy", Locale::PtBr);
        assert_eq!(fmt.format(&date(2021, 3, 15)), "15 março 2021");
    }

    #[test]
    fn test_english_locale() {
        let fmt = DateFormat::new("dd MMM yyyy", Locale::En);
        assert_eq!(fmt.format(&date(2021, 8, 9)), "09 Aug 2021");
    }

    #[test]
    fn test_numeric_tokens() {
        let fmt = DateFormat::new("yyyy-MM-dd HH:mm:ss", Locale::En);
        assert_eq!(fmt.format(&date(2021, 8, 9)), "2021-08-09 12:00:00");
    }

    #[test]
    fn test_format_opt_none_is_empty() {
        let fmt = DateFormat::new("dd MMM yyyy", Locale::PtBr);
        assert_eq!(fmt.format_opt::<Utc>(&None), "");
        assert_eq!(fmt.format_opt(&Some(date(2021, 3, 15))), "15 mar 2021");
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("pt-BR".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert!("xx".parse::<Locale>().is_err());
    }
}
