//! Raw input validation at the presentation boundary.
//!
//! The engine works on numbers only. Front ends call [`parse_value`] first
//! and skip the engine entirely when it returns `None`.

/// Parse user-entered text into a value
///
/// Returns `None` for blank text, text that is not a number, and NaN.
/// Infinite values are accepted; they format as the sentinel.
pub fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_nan() => None,
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Rejected input {:?}: {}", raw, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_value("1"), Some(1.0));
        assert_eq!(parse_value("-2.5"), Some(-2.5));
        assert_eq!(parse_value("1e3"), Some(1000.0));
        assert_eq!(parse_value(".5"), Some(0.5));
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(parse_value("  42\n"), Some(42.0));
    }

    #[test]
    fn test_blank_is_none() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("   "), None);
    }

    #[test]
    fn test_non_numeric_is_none() {
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("12abc"), None);
        assert_eq!(parse_value("1,5"), None);
        assert_eq!(parse_value("NaN"), None);
    }

    #[test]
    fn test_infinity_accepted() {
        assert_eq!(parse_value("inf"), Some(f64::INFINITY));
        assert_eq!(parse_value("-infinity"), Some(f64::NEG_INFINITY));
    }
}
