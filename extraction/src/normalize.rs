//! Type-aware normalization contracts shared by the extractor and the
//! consistency validator.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial normalization helpers for currency,
//!   duration, date, and text fields.

/// Normalizes a currency string (`"$45M"`, `"45 million"`, `"1,200.50"`) to
/// a dollar amount. Returns `None` if no numeric form could be recognized.
pub fn normalize_currency(raw: &str) -> std::option::Option<f64> {
    let trimmed = raw.trim().to_lowercase();
    let digits_pattern = regex::Regex::new(r"[\$]?\s*([\d,]+(?:\.\d+)?)\s*(million|m|billion|b|thousand|k)?").unwrap();
    let captures = digits_pattern.captures(&trimmed)?;
    let number_str = captures.get(1)?.as_str().replace(',', "");
    let base: f64 = number_str.parse().ok()?;
    let multiplier = match captures.get(2).map(|m| m.as_str()) {
        std::option::Option::Some("million") | std::option::Option::Some("m") => 1_000_000.0,
        std::option::Option::Some("billion") | std::option::Option::Some("b") => 1_000_000_000.0,
        std::option::Option::Some("thousand") | std::option::Option::Some("k") => 1_000.0,
        _ => 1.0,
    };
    std::option::Option::Some(base * multiplier)
}

/// Normalizes a duration string (`"3 years"`, `"18 months"`, `"2 weeks"`) to
/// a whole number of months.
pub fn normalize_duration_months(raw: &str) -> std::option::Option<i64> {
    let trimmed = raw.trim().to_lowercase();
    let pattern = regex::Regex::new(r"(\d+(?:\.\d+)?)\s*(year|yr|month|mo|week|wk|day)s?").unwrap();
    let captures = pattern.captures(&trimmed)?;
    let amount: f64 = captures.get(1)?.as_str().parse().ok()?;
    let months = match captures.get(2)?.as_str() {
        "year" | "yr" => amount * 12.0,
        "month" | "mo" => amount,
        "week" | "wk" => amount / 4.345,
        "day" => amount / 30.44,
        _ => return std::option::Option::None,
    };
    std::option::Option::Some(months.round() as i64)
}

/// Parses a date from any of several commonly seen formats.
pub fn normalize_date(raw: &str) -> std::option::Option<chrono::NaiveDate> {
    let trimmed = raw.trim();
    const FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];
    for format in FORMATS {
        if let std::result::Result::Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, format) {
            return std::option::Option::Some(date);
        }
    }
    std::option::Option::None
}

/// Normalizes free text: strips markdown emphasis markers, collapses
/// whitespace, lowercases, and trims trailing punctuation.
pub fn normalize_text(raw: &str) -> String {
    let emphasis_stripped = raw.replace(['*', '_', '`'], "");
    let collapsed = emphasis_stripped.split_whitespace().collect::<std::vec::Vec<_>>().join(" ");
    collapsed.to_lowercase().trim_end_matches(|c: char| c.is_ascii_punctuation()).to_string()
}
