//! Number display and entry parsing
//!
//! Results are rounded to [`DISPLAY_PRECISION`] fractional digits and then
//! printed in their shortest form, which hides binary floating-point noise
//! such as `0.1 + 0.2` without switching to decimal arithmetic.

/// Fractional digits kept when a result becomes the new entry
pub const DISPLAY_PRECISION: usize = 7;

/// Rounds a result to [`DISPLAY_PRECISION`] digits and formats it.
///
/// Trailing zeros and a dangling decimal point are dropped.
#[must_use]
pub fn round_to_display(value: f64) -> String {
    if !value.is_finite() {
        return format_operand(value);
    }
    let fixed = to_fixed(value, DISPLAY_PRECISION);
    let rounded = fixed.parse::<f64>().unwrap_or(value);
    format_operand(rounded)
}

/// Fixed-point text of `value` with `places` fractional digits.
///
/// Rounds the exact binary value, with ties going away from zero, so
/// `1/256 = 0.00390625` becomes `0.0039063`.
#[must_use]
pub fn to_fixed(value: f64, places: usize) -> String {
    // a finite f64 has at most 1074 fractional digits, so this is exact
    let exact = format!("{:.1074}", value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(places))
        .map(|b| b - b'0')
        .collect();

    if frac_part.as_bytes().get(places).is_some_and(|&b| b >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let int_len = digits.len() - places;
    let mut text = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() {
        text.push('-');
    }
    text.extend(digits[..int_len].iter().map(|d| char::from(b'0' + d)));
    if places > 0 {
        text.push('.');
        text.extend(digits[int_len..].iter().map(|d| char::from(b'0' + d)));
    }
    text
}

/// Formats an operand without rounding, as shown in the history line
#[must_use]
pub fn format_operand(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value == 0.0 {
        // covers -0.0
        "0".to_string()
    } else {
        format!("{value}")
    }
}

/// Parses the entry string; anything unparseable reads as zero
#[must_use]
pub fn parse_entry(entry: &str) -> f64 {
    entry.parse::<f64>().unwrap_or(0.0)
}
