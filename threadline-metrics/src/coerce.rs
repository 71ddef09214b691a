//! Safe scalar coercion for raw spreadsheet cells.
//!
//! Weekly report exports are full of blanks, dashes, currency formatting, and
//! stray text. Every measure passes through here before any arithmetic, so
//! the rest of the pipeline only ever sees real numbers. Coercion never
//! fails: anything unparseable becomes the caller's default.

/// Cell markers that mean "no value" in the weekly report exports.
const MISSING_MARKERS: &[&str] = &["", "-", "--", "n/a", "na", "nan", "null"];

/// Convert an arbitrary cell value to `f64`, falling back to `default`.
///
/// Handles currency symbols, thousands separators, percent signs, and
/// parenthesized negatives (`"(1,204.50)"` -> `-1204.5`). A `None` cell, a
/// missing-marker, or a parse failure all yield `default`.
pub fn coerce_float(value: Option<&str>, default: f64) -> f64 {
    let raw = match value {
        Some(v) => v.trim(),
        None => return default,
    };
    if MISSING_MARKERS.contains(&raw.to_ascii_lowercase().as_str()) {
        return default;
    }

    // Parenthesized values are accounting-style negatives.
    let (body, negate) = if raw.starts_with('(') && raw.ends_with(')') {
        (&raw[1..raw.len() - 1], true)
    } else {
        (raw, false)
    };

    let cleaned: String = body
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%' | ' '))
        .collect();

    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => {
            if negate {
                -v
            } else {
                v
            }
        }
        _ => default,
    }
}

/// Convert an arbitrary cell value to `i64`, falling back to `default`.
///
/// Accepts plain integers as well as float-formatted cells (`"12.0"` -> 12,
/// truncating toward zero), since spreadsheet exports routinely render
/// counts as floats.
pub fn coerce_int(value: Option<&str>, default: i64) -> i64 {
    let raw = match value {
        Some(v) => v.trim(),
        None => return default,
    };
    if let Ok(v) = raw.parse::<i64>() {
        return v;
    }
    let f = coerce_float(Some(raw), f64::NAN);
    if f.is_finite() {
        f.trunc() as i64
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers_parse() {
        assert_eq!(coerce_float(Some("12.5"), 0.0), 12.5);
        assert_eq!(coerce_float(Some("-3"), 0.0), -3.0);
        assert_eq!(coerce_int(Some("42"), 0), 42);
    }

    #[test]
    fn missing_and_garbage_fall_back() {
        assert_eq!(coerce_float(None, 0.0), 0.0);
        assert_eq!(coerce_float(Some(""), 0.0), 0.0);
        assert_eq!(coerce_float(Some("-"), 1.5), 1.5);
        assert_eq!(coerce_float(Some("N/A"), 0.0), 0.0);
        assert_eq!(coerce_float(Some("total"), 7.0), 7.0);
        assert_eq!(coerce_int(Some("abc"), -1), -1);
    }

    #[test]
    fn currency_formatting_is_stripped() {
        assert_eq!(coerce_float(Some("$1,204.50"), 0.0), 1204.50);
        assert_eq!(coerce_float(Some("(1,204.50)"), 0.0), -1204.50);
        assert_eq!(coerce_float(Some("37.5%"), 0.0), 37.5);
    }

    #[test]
    fn float_formatted_counts_truncate() {
        assert_eq!(coerce_int(Some("12.0"), 0), 12);
        assert_eq!(coerce_int(Some("4,700"), 0), 4700);
        assert_eq!(coerce_int(Some("12.9"), 0), 12);
    }

    #[test]
    fn non_finite_cells_fall_back() {
        assert_eq!(coerce_float(Some("inf"), 0.0), 0.0);
        assert_eq!(coerce_float(Some("NaN"), 2.0), 2.0);
    }
}
