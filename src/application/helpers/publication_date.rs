use chrono::{DateTime, Locale, Utc};

/// Two-digit day, long month name, numeric year, e.g. `01 de abril de 2021`.
pub const PUBLICATION_DATE_FORMAT: &str = "%d de %B de %Y";
pub const PUBLICATION_DATE_LOCALE: Locale = Locale::pt_BR;

/// Formats a post's last publication date for display. Dates are rendered in UTC.
pub fn format_publication_date(date: DateTime<Utc>) -> String {
    date.format_localized(PUBLICATION_DATE_FORMAT, PUBLICATION_DATE_LOCALE)
        .to_string()
}
