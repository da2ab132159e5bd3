use chrono::NaiveDate;
use crate::utils::formatting::PLACEHOLDER;

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn format_date(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn format_optional_date(d: Option<&NaiveDate>) -> String {
    d.map(format_date).unwrap_or_else(|| PLACEHOLDER.to_string())
}
