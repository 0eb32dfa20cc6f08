//! Number and currency formatting in the `tr-TR` style: `.` groups thousands,
//! `,` separates decimals and the currency symbol leads (`₺8.500,00`).

use crate::Currency;

/// Currency amount with 2 to 4 fraction digits.
#[must_use]
pub fn format_currency(value: f64, currency: Currency) -> String {
    with_symbol(value, currency, 2, 4)
}

/// Currency amount with exactly `fraction_digits` fraction digits.
#[must_use]
pub fn format_currency_with_precision(
    value: f64,
    currency: Currency,
    fraction_digits: usize,
) -> String {
    with_symbol(value, currency, fraction_digits, fraction_digits)
}

/// Currency amount without trailing fraction zeros, at most `max_fraction_digits`.
#[must_use]
pub fn format_currency_trim_zeros(
    value: f64,
    currency: Currency,
    max_fraction_digits: usize,
) -> String {
    with_symbol(value, currency, 0, max_fraction_digits)
}

/// Plain number with at most 2 fraction digits.
#[must_use]
pub fn format_number(value: f64) -> String {
    let (negative, digits) = grouped(value, 0, 2);
    if negative {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Signed percentage with 2 decimals, e.g. `+3.25%`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}%");
    }
    let sign = if value >= 0.0 { "+" } else { "-" };
    let (int_part, frac_part) = fixed_digits(value, 2);
    format!("{sign}{int_part}.{frac_part}%")
}

fn with_symbol(value: f64, currency: Currency, min: usize, max: usize) -> String {
    let (negative, digits) = grouped(value, min, max);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{}{digits}", currency.symbol())
}

/// Integer and fraction digits of `|value|` at `digits` decimals, halves
/// rounded away from zero.
fn fixed_digits(value: f64, digits: usize) -> (String, String) {
    let scaled = (value.abs() * 10f64.powi(digits as i32)).round();
    if !scaled.is_finite() {
        let fixed = format!("{:.*}", digits, value.abs());
        return match fixed.split_once('.') {
            Some((int_part, frac_part)) => (int_part.to_string(), frac_part.to_string()),
            None => (fixed, String::new()),
        };
    }
    let mut int_part = format!("{scaled:.0}");
    if int_part.len() <= digits {
        int_part = format!("{int_part:0>width$}", width = digits + 1);
    }
    let frac_part = int_part.split_off(int_part.len() - digits);
    (int_part, frac_part)
}

/// Returns the sign and the unsigned, grouped digits of `value`.
fn grouped(value: f64, min: usize, max: usize) -> (bool, String) {
    if !value.is_finite() {
        return (false, value.to_string());
    }
    let (int_part, mut frac) = fixed_digits(value, max.max(min));
    let is_zero = int_part == "0" && frac.bytes().all(|b| b == b'0');
    while frac.len() > min && frac.ends_with('0') {
        frac.pop();
    }

    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3 + frac.len() + 1);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if !frac.is_empty() {
        out.push(',');
        out.push_str(&frac);
    }

    (value < 0.0 && !is_zero, out)
}
