//! Sanitizing of user-typed amounts before they reach the engine.
//!
//! Parsing is lenient the way a text field is: the longest numeric prefix is
//! read (`"12abc"` is `12`), blank input is zero, and negatives clamp to zero.

/// True for what an amount field accepts while typing: empty, or digits with at
/// most one decimal point.
#[must_use]
pub fn accepts_amount_input(input: &str) -> bool {
    let mut seen_point = false;
    input.chars().all(|c| match c {
        '0'..='9' => true,
        '.' if !seen_point => {
            seen_point = true;
            true
        }
        _ => false,
    })
}

/// True if `input` holds a finite, non-negative number.
#[must_use]
pub fn is_valid_amount(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return false;
    }
    parse_prefix(trimmed).is_some_and(|n| n.is_finite() && n >= 0.0)
}

/// Parses an amount, returning `0` for blank or unparseable input and clamping
/// negatives to `0`.
#[must_use]
pub fn parse_amount(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    parse_prefix(trimmed).map_or(0.0, |n| n.max(0.0))
}

/// Reads the longest prefix of `s` that forms a decimal number.
fn parse_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return s[..end + "Infinity".len()].replace("Infinity", "inf").parse().ok();
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
