//! Fixed US-English number formatting for dashboard figures
//!
//! All rounding is half away from zero on exact decimals, so a figure such as
//! `1234567.895` renders as `$1,234,567.90` regardless of float representation.

use crate::constants::HIGH_PRECISION_PRICE_DIGITS;
use crate::indicator::round_half_away;
use rust_decimal::Decimal;

/// Rounds and pads to exactly `digits` fractional digits.
///
/// Returns whether the rounded value is negative alongside the unsigned
/// digits, so callers decide where the minus sign goes.
fn fixed_unsigned(value: Decimal, digits: u32) -> (bool, String) {
    let rounded = round_half_away(value, digits);
    let negative = !rounded.is_zero() && rounded.is_sign_negative();

    // `rescale` caps the scale once the mantissa is full, so pad by hand
    let text = rounded.abs().to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    if digits == 0 {
        return (negative, integer.to_string());
    }

    let pad = (digits as usize).saturating_sub(fraction.len());
    (
        negative,
        format!("{}.{}{}", integer, fraction, "0".repeat(pad)),
    )
}

/// Inserts `,` between every group of three integer digits
fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a USD amount as `$1,234,567.90`
///
/// Negative amounts render as `-$12.50`. Amounts that round to zero never
/// carry a minus sign.
pub fn format_currency_usd(value: Decimal) -> String {
    let (negative, digits) = fixed_unsigned(value, 2);
    let sign = if negative { "-" } else { "" };

    match digits.split_once('.') {
        Some((integer, fraction)) => {
            format!("{}${}.{}", sign, group_thousands(integer), fraction)
        }
        None => format!("{}${}", sign, group_thousands(&digits)),
    }
}

/// Formats a price with ten fractional digits and no grouping or symbol
pub fn format_high_precision_price(value: Decimal) -> String {
    let (negative, digits) = fixed_unsigned(value, HIGH_PRECISION_PRICE_DIGITS);
    if negative {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// Formats a percentage magnitude with a fixed number of fractional digits.
///
/// No `%` is appended; direction is rendered separately from the indicator.
pub fn format_percent(magnitude: Decimal, precision: u32) -> String {
    let (negative, digits) = fixed_unsigned(magnitude, precision);
    if negative {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// Formats a count as a plain integer
pub fn format_count(count: u64) -> String {
    count.to_string()
}
