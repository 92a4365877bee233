//! Total coercion helpers backing [`super::Value`] conversions.
//!
//! Malformed input never fails: it degrades to the zero value of the
//! target type.

/// Floats at or above this magnitude are rendered in exponent notation.
const EXPONENT_UPPER: f64 = 1e15;
/// Non-zero floats below this magnitude are rendered in exponent notation.
const EXPONENT_LOWER: f64 = 1e-4;

/// Leading numeric portion of a string.
struct NumericPrefix<'a> {
    text: &'a str,
    integral: bool,
}

/// Scans the numeric prefix of `input` after optional leading whitespace.
///
/// Accepts an optional sign, digits, an optional fraction and an optional
/// exponent. Returns `None` when no digit is found.
fn numeric_prefix(input: &str) -> Option<NumericPrefix<'_>> {
    let trimmed = input.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    let mut integral = true;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
            integral = false;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
            integral = false;
        }
    }

    Some(NumericPrefix {
        text: &trimmed[..end],
        integral,
    })
}

/// Parses the leading integer of a string (`"12abc"` → 12, `"abc"` → 0).
///
/// Fractional or exponent forms are truncated toward zero. Out-of-range
/// integers saturate.
pub(crate) fn parse_integer_prefix(input: &str) -> i64 {
    let Some(prefix) = numeric_prefix(input) else {
        return 0;
    };

    if prefix.integral {
        match prefix.text.parse::<i64>() {
            Ok(value) => value,
            Err(_) if prefix.text.starts_with('-') => i64::MIN,
            Err(_) => i64::MAX,
        }
    } else {
        float_to_integer(prefix.text.parse::<f64>().unwrap_or(0.0))
    }
}

/// Parses the leading float of a string (`"1.5kg"` → 1.5, `"abc"` → 0.0).
pub(crate) fn parse_float_prefix(input: &str) -> f64 {
    numeric_prefix(input)
        .and_then(|prefix| prefix.text.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Truncates toward zero; non-finite values become 0, out-of-range values saturate.
pub(crate) fn float_to_integer(value: f64) -> i64 {
    if value.is_finite() {
        value as i64
    } else {
        0
    }
}

/// Renders a float the way it appears inside derived keys and string fields.
///
/// Integral values drop the fraction (`2.0` → `"2"`), very large or very
/// small magnitudes use `1.5E+20` notation.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(EXPONENT_LOWER..EXPONENT_UPPER).contains(&magnitude) {
        let rendered = format!("{:e}", value);
        if let Some((mantissa, exponent)) = rendered.split_once('e') {
            let mantissa = if mantissa.contains('.') {
                mantissa.to_string()
            } else {
                format!("{mantissa}.0")
            };
            let exponent = if exponent.starts_with('-') {
                exponent.to_string()
            } else {
                format!("+{exponent}")
            };
            return format!("{mantissa}E{exponent}");
        }
        return rendered;
    }

    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}
