//! Lossless bridge between machine times and arbitrary-precision decimals
//!
//! Multiplication and division promote the duration into a [`BigDecimal`],
//! operate there and come back through the floor split in [`from_decimal`].
//! The same canonical number feeds the diagnostic `Display` representation:
//! the fraction contributes exactly nine digits when non-zero and is omitted
//! when zero.

use std::cmp::Ordering;

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::core::{Error, Result, FRACTION_DIGITS, NANOS_PER_SECOND};

use super::duration::{MachineTime, TimeScale};

/// Converts a machine time into its exact decimal number of seconds.
pub(crate) fn to_decimal(value: &MachineTime) -> BigDecimal {
    let (seconds, nanos) = value.raw();
    if nanos == 0 {
        return BigDecimal::from(seconds);
    }

    let unscaled = BigInt::from(seconds) * NANOS_PER_SECOND + BigInt::from(nanos);
    BigDecimal::new(unscaled, FRACTION_DIGITS)
}

/// Splits an exact decimal seconds value into a normalized machine time.
///
/// The whole part is taken with floor semantics; digits beyond the ninth
/// fraction digit are truncated toward zero.
pub(crate) fn from_decimal(value: &BigDecimal, scale: TimeScale) -> Result<MachineTime> {
    let whole = value.with_scale_round(0, RoundingMode::Floor);
    let seconds = whole
        .to_i64()
        .ok_or_else(|| Error::overflow("decimal seconds out of i64 range"))?;

    // The remainder after the floor lies in [0, 1), so the scaled fraction
    // always fits the nanosecond range.
    let fraction = ((value - &whole) * BigDecimal::from(NANOS_PER_SECOND))
        .with_scale_round(0, RoundingMode::Down)
        .to_i64()
        .ok_or_else(|| Error::overflow("decimal fraction out of range"))?;

    MachineTime::normalize(seconds, fraction, scale)
}

/// Divides a decimal seconds value at nine fraction digits.
///
/// The dividend is floored to nanosecond precision first; the rounding mode
/// then acts on the ninth fraction digit of the quotient, exactly as integer
/// division of the unscaled value.
pub(crate) fn div_at_nano_scale(value: &BigDecimal, divisor: i64, mode: RoundingMode) -> BigDecimal {
    let (unscaled, _) = value
        .with_scale_round(FRACTION_DIGITS, RoundingMode::Floor)
        .into_bigint_and_exponent();
    BigDecimal::new(
        div_round(unscaled, BigInt::from(divisor), mode),
        FRACTION_DIGITS,
    )
}

/// Integer division with decimal rounding-mode control.
fn div_round(n: BigInt, d: BigInt, mode: RoundingMode) -> BigInt {
    let (q, r) = n.div_rem(&d);
    if r.is_zero() {
        return q;
    }

    let negative = n.is_negative() != d.is_negative();
    let round_away = match mode {
        RoundingMode::Up => true,
        RoundingMode::Down => false,
        RoundingMode::Ceiling => !negative,
        RoundingMode::Floor => negative,
        RoundingMode::HalfUp | RoundingMode::HalfDown | RoundingMode::HalfEven => {
            let doubled = r.magnitude() * 2u32;
            match doubled.cmp(d.magnitude()) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => match mode {
                    RoundingMode::HalfUp => true,
                    RoundingMode::HalfDown => false,
                    // HalfEven: step away only if the truncated quotient is odd
                    _ => q.is_odd(),
                },
            }
        }
    };

    if round_away {
        if negative {
            q - 1
        } else {
            q + 1
        }
    } else {
        q
    }
}
