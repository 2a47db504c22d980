//! Direction, magnitude and color for signed percentage changes

use crate::types::{ColorClass, Indicator, Sign};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to `precision` fractional digits, halves away from zero
pub fn round_half_away(value: Decimal, precision: u32) -> Decimal {
    value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}

/// Derives the badge for a signed percentage
///
/// The value is rounded first and the sign is read from the rounded value, so
/// `-0.04` at one digit becomes `0.0` and points up. Zero is always `Up`.
pub fn indicator_for(value: Decimal, precision: u32) -> Indicator {
    let rounded = round_half_away(value, precision);

    // A rounded negative zero still carries the sign bit
    let sign = if !rounded.is_zero() && rounded.is_sign_negative() {
        Sign::Down
    } else {
        Sign::Up
    };

    let color_class = match sign {
        Sign::Up => ColorClass::Positive,
        Sign::Down => ColorClass::Negative,
    };

    Indicator {
        sign,
        magnitude: rounded.abs(),
        color_class,
        precision,
    }
}
