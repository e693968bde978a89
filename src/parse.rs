//! Field parsers: normalize loosely-typed record fields into scalars

use crate::types::{Coordinates, YearField};

/// Parse a year field into an integer year
///
/// Strings are read the way a lenient string-to-integer coercion reads them:
/// leading whitespace and an optional sign are accepted, then the leading run of
/// ASCII digits is taken and anything after it is ignored ("1916 (est.)" -> 1916).
/// No leading digits, an empty string, or a value outside `i32` yields `None`.
/// Numbers are truncated toward zero.
pub fn parse_year(field: &YearField) -> Option<i32> {
    match field {
        YearField::Text(s) => parse_year_str(s),
        YearField::Number(n) => {
            if let Some(i) = n.as_i64() {
                return i32::try_from(i).ok();
            }
            let f = n.as_f64()?;
            if !f.is_finite() {
                return None;
            }
            let t = f.trunc();
            if t < i32::MIN as f64 || t > i32::MAX as f64 {
                return None;
            }
            Some(t as i32)
        }
        YearField::Other(_) => None,
    }
}

/// String half of [`parse_year`]
pub fn parse_year_str(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for b in digits[..end].bytes() {
        value = value.checked_mul(10)?.checked_add(i64::from(b - b'0'))?;
    }
    if negative {
        value = -value;
    }
    i32::try_from(value).ok()
}

/// Parse `lat:<number> ... long:<number>` out of a location string
///
/// Returns `None` if either key is missing or not followed by a number.
/// Coordinate ranges are not validated here; see [`Coordinates::in_range`].
pub fn parse_coordinates(location: &str) -> Option<Coordinates> {
    let lat = find_number_after(location, "lat:")?;
    let lng = find_number_after(location, "long:")?;
    Some(Coordinates { lat, lng })
}

/// First occurrence of `key` that is immediately followed by a well-formed number
fn find_number_after(haystack: &str, key: &str) -> Option<f64> {
    haystack
        .match_indices(key)
        .find_map(|(idx, _)| leading_number(&haystack[idx + key.len()..]))
}

/// Read `-?digits[.digits]` from the start of `s`
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digit_count = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digit_count += frac_end - frac_start;
        end = frac_end;
    }

    if digit_count == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok()
}
