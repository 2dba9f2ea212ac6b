//! Cell sanitization for spreadsheet ingestion.
//!
//! Campaign exports mix typed cells with formatted text ("$1,234.56",
//! "99.05%", "2,431"). These helpers convert a raw cell into the canonical
//! value its field expects. An unparseable cell resolves to `None` rather
//! than an error; whether a NULL is acceptable is the caller's concern.

use calamine::{Data, DataType};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static NUMERIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)?$").unwrap());

/// Number-rule fields ("2,431" -> 2431). Strings lose their thousands
/// separators; anything left that is not all digits resolves to None.
pub fn clean_number(cell: &Data) -> Option<i32> {
    match cell {
        Data::String(s) => {
            let stripped = s.trim().replace(',', "");
            if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
                stripped.parse().ok()
            } else {
                None
            }
        }
        other => cell_int(other),
    }
}

/// Currency-rule fields ("$1,234.56" -> 1234.56). A leading dollar sign and
/// thousands separators are stripped before the numeric-pattern check.
pub fn clean_currency(cell: &Data) -> Option<f64> {
    match cell {
        Data::String(s) => {
            let stripped = s.trim().trim_start_matches('$').replace(',', "");
            if NUMERIC_RE.is_match(&stripped) {
                stripped.parse().ok()
            } else {
                None
            }
        }
        other => cell_float(other),
    }
}

/// Percentage-rule fields ("99.05%" -> 99.05). The stored value is the bare
/// magnitude, not a 0-1 fraction.
pub fn clean_percentage(cell: &Data) -> Option<f64> {
    match cell {
        Data::String(s) => {
            let stripped = s.trim().trim_end_matches('%');
            if NUMERIC_RE.is_match(stripped) {
                stripped.parse().ok()
            } else {
                None
            }
        }
        other => cell_float(other),
    }
}

/// Generic integer coercion for count fields outside the number-rule list.
/// No separator stripping, plain parse only.
pub fn cell_int(cell: &Data) -> Option<i32> {
    match cell {
        Data::Int(i) => i32::try_from(*i).ok(),
        Data::Float(f) if f.fract() == 0.0 => Some(*f as i32),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Generic float coercion for amount fields outside the currency-rule list.
pub fn cell_float(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) => Some(*f),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Text fields pass through untouched; non-text cells render to their
/// display form, blanks become empty strings.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.as_string().unwrap_or_default(),
    }
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

/// Mail dates arrive either as Excel serial dates or as text. Returns None
/// for cells no format matches; the ingestion layer treats that as a row
/// validation failure since the date is required.
pub fn cell_date(cell: &Data) -> Option<NaiveDate> {
    if let Some(date) = cell.as_date() {
        return Some(date);
    }
    match cell {
        Data::String(s) => {
            let s = s.trim();
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    #[test]
    fn number_strips_thousands_separators() {
        assert_eq!(clean_number(&s("2,431")), Some(2431));
        assert_eq!(clean_number(&s("1,234,567")), Some(1_234_567));
        assert_eq!(clean_number(&s("17")), Some(17));
    }

    #[test]
    fn number_rejects_non_digit_remainder() {
        assert_eq!(clean_number(&s("12a")), None);
        assert_eq!(clean_number(&s("abc")), None);
        assert_eq!(clean_number(&s("")), None);
        assert_eq!(clean_number(&s("12.5")), None);
    }

    #[test]
    fn number_passes_typed_cells_through() {
        assert_eq!(clean_number(&Data::Int(42)), Some(42));
        assert_eq!(clean_number(&Data::Float(42.0)), Some(42));
        assert_eq!(clean_number(&Data::Empty), None);
    }

    #[test]
    fn currency_strips_symbol_and_separators() {
        assert_eq!(clean_currency(&s("$1,234.56")), Some(1234.56));
        assert_eq!(clean_currency(&s("$433.44")), Some(433.44));
        assert_eq!(clean_currency(&s("1234.56")), Some(1234.56));
        assert_eq!(clean_currency(&s("$12")), Some(12.0));
    }

    #[test]
    fn currency_rejects_malformed_values() {
        assert_eq!(clean_currency(&s("abc")), None);
        assert_eq!(clean_currency(&s("$12.34.56")), None);
        assert_eq!(clean_currency(&s("$")), None);
    }

    #[test]
    fn currency_passes_typed_cells_through() {
        assert_eq!(clean_currency(&Data::Float(99.5)), Some(99.5));
        assert_eq!(clean_currency(&Data::Int(7)), Some(7.0));
    }

    #[test]
    fn percentage_keeps_bare_magnitude() {
        assert_eq!(clean_percentage(&s("99.05%")), Some(99.05));
        assert_eq!(clean_percentage(&s("15%")), Some(15.0));
        assert_eq!(clean_percentage(&s("0.5%")), Some(0.5));
    }

    #[test]
    fn percentage_rejects_malformed_values() {
        assert_eq!(clean_percentage(&s("abc%")), None);
        assert_eq!(clean_percentage(&s("%")), None);
    }

    #[test]
    fn percentage_passes_typed_cells_through() {
        // Already-typed values are trusted as-is, even above 100 or negative.
        assert_eq!(clean_percentage(&Data::Float(140.2)), Some(140.2));
        assert_eq!(clean_percentage(&Data::Float(-3.1)), Some(-3.1));
    }

    #[test]
    fn text_renders_blank_for_empty_cells() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&s("Acme Direct")), "Acme Direct");
        assert_eq!(cell_text(&Data::Int(12)), "12");
    }

    #[test]
    fn date_parses_common_text_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        assert_eq!(cell_date(&s("2023-01-15")), Some(expected));
        assert_eq!(cell_date(&s("01/15/2023")), Some(expected));
        assert_eq!(cell_date(&s("01/15/23")), Some(expected));
        assert_eq!(cell_date(&s("not a date")), None);
        assert_eq!(cell_date(&Data::Empty), None);
    }
}
