use chrono::{Local, NaiveDate};

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_DATE_FORMAT: &str = "%Y-%m-%d";

    /// English month names (full + common abbreviations) -> month number.
    /// Both "sep" and "sept" appear because journals use either.
    pub const MONTH_TABLE: &[(&str, u32)] = &[
        ("january", 1),
        ("jan", 1),
        ("february", 2),
        ("feb", 2),
        ("march", 3),
        ("mar", 3),
        ("april", 4),
        ("apr", 4),
        ("may", 5),
        ("june", 6),
        ("jun", 6),
        ("july", 7),
        ("jul", 7),
        ("august", 8),
        ("aug", 8),
        ("september", 9),
        ("sept", 9),
        ("sep", 9),
        ("october", 10),
        ("oct", 10),
        ("november", 11),
        ("nov", 11),
        ("december", 12),
        ("dec", 12),
    ];

    /// Resolve a month name (any case) to its 1-12 number.
    pub fn month_to_number(name: &str) -> Option<u32> {
        let lowered = name.trim().to_lowercase();
        Self::MONTH_TABLE
            .iter()
            .find(|(label, _)| *label == lowered)
            .map(|(_, n)| *n)
    }
}

// Date helper functions

/// The current processing date in local time.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(TimeUtils::STANDARD_DATE_FORMAT).to_string()
}
