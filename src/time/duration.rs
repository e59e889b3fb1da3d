use std::cmp::Ordering;
use std::fmt;

use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result, NANOS_PER_SECOND};

use super::decimal;
use super::point::UnitArithmetic;

/// Time scale on which a machine time duration is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeScale {
    /// Continuous scale without leap seconds (POSIX-like)
    Posix,
    /// Scale counting true elapsed SI seconds including leap seconds
    Utc,
}

impl TimeScale {
    /// Returns the scale name used in the diagnostic representation
    pub fn name(&self) -> &'static str {
        match self {
            TimeScale::Posix => "POSIX",
            TimeScale::Utc => "UTC",
        }
    }
}

/// Time units accepted when constructing or adjusting a machine time
///
/// On the POSIX scale all units are usable; on the UTC scale only
/// [`Unit::Seconds`] and [`Unit::Nanoseconds`] are meaningful and every
/// other unit is rejected with an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

/// How an amount of a unit maps onto the seconds/nanoseconds pair
enum UnitKind {
    /// Seconds-or-larger unit, with its length in whole seconds
    Seconds(i64),
    /// Sub-second unit, with its length in nanoseconds
    Nanos(i64),
}

impl Unit {
    fn kind(&self) -> UnitKind {
        match self {
            Unit::Days => UnitKind::Seconds(86_400),
            Unit::Hours => UnitKind::Seconds(3_600),
            Unit::Minutes => UnitKind::Seconds(60),
            Unit::Seconds => UnitKind::Seconds(1),
            Unit::Milliseconds => UnitKind::Nanos(1_000_000),
            Unit::Microseconds => UnitKind::Nanos(1_000),
            Unit::Nanoseconds => UnitKind::Nanos(1),
        }
    }
}

/// One component of a duration's total length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    /// Absolute amount of units
    pub amount: u64,
    /// The unit the amount counts
    pub unit: Unit,
}

/// A machine time duration in decimal seconds with nanosecond precision
///
/// The value is immutable; every operation yields a new duration. After
/// construction the fraction always lies in `(-1_000_000_000, 1_000_000_000)`
/// and its sign is never opposite to the sign of the seconds part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MachineTime {
    seconds: i64,
    nanos: i32,
    scale: TimeScale,
}

/// The empty duration on the POSIX scale
pub const POSIX_ZERO: MachineTime = MachineTime {
    seconds: 0,
    nanos: 0,
    scale: TimeScale::Posix,
};

/// The empty duration on the UTC scale
pub const UTC_ZERO: MachineTime = MachineTime {
    seconds: 0,
    nanos: 0,
    scale: TimeScale::Utc,
};

impl MachineTime {
    /// Builds a normalized machine time from a raw seconds/fraction pair.
    ///
    /// The fraction is taken in nanoseconds and may lie anywhere in the i64
    /// range; whole seconds are carried into the seconds part with a checked
    /// addition. After the carry, a negative total with a positive fraction
    /// borrows one second so that the stored fraction sign agrees with the
    /// seconds sign.
    pub(crate) fn normalize(seconds: i64, fraction: i64, scale: TimeScale) -> Result<Self> {
        let carry = fraction.div_euclid(NANOS_PER_SECOND);
        let mut nanos = fraction.rem_euclid(NANOS_PER_SECOND) as i32;
        let mut secs = seconds
            .checked_add(carry)
            .ok_or_else(|| Error::overflow("seconds out of range after fraction carry"))?;

        if secs < 0 && nanos > 0 {
            secs += 1;
            nanos -= NANOS_PER_SECOND as i32;
        }

        Ok(MachineTime {
            seconds: secs,
            nanos,
            scale,
        })
    }

    /// Creates a machine time duration on the POSIX scale.
    pub fn of_posix(amount: i64, unit: Unit) -> Result<Self> {
        match unit.kind() {
            UnitKind::Seconds(per_unit) => {
                let secs = amount
                    .checked_mul(per_unit)
                    .ok_or_else(|| Error::overflow("amount out of range for unit"))?;
                Self::of_posix_units(secs, 0)
            }
            UnitKind::Nanos(per_unit) => {
                let total = amount
                    .checked_mul(per_unit)
                    .ok_or_else(|| Error::overflow("amount out of range for unit"))?;
                Self::normalize(0, total, TimeScale::Posix)
            }
        }
    }

    /// Creates a machine time duration on the UTC scale.
    ///
    /// Only [`Unit::Seconds`] and [`Unit::Nanoseconds`] are legal here; the
    /// UTC scale has no well-defined larger units.
    pub fn of_utc(amount: i64, unit: Unit) -> Result<Self> {
        match unit {
            Unit::Seconds => Self::of_utc_units(amount, 0),
            Unit::Nanoseconds => Self::normalize(0, amount, TimeScale::Utc),
            other => Err(Error::unsupported_unit(format!(
                "{:?} is not usable on the UTC scale",
                other
            ))),
        }
    }

    /// Creates a machine time duration on the POSIX scale from a raw pair.
    pub fn of_posix_units(seconds: i64, fraction: i32) -> Result<Self> {
        if seconds == 0 && fraction == 0 {
            return Ok(POSIX_ZERO);
        }
        Self::normalize(seconds, i64::from(fraction), TimeScale::Posix)
    }

    /// Creates a machine time duration on the UTC scale from a raw pair.
    pub fn of_utc_units(seconds: i64, fraction: i32) -> Result<Self> {
        if seconds == 0 && fraction == 0 {
            return Ok(UTC_ZERO);
        }
        Self::normalize(seconds, i64::from(fraction), TimeScale::Utc)
    }

    /// Creates a POSIX machine time from a floating-point number of seconds.
    pub fn of_posix_seconds(seconds: f64) -> Result<Self> {
        Self::of_float(seconds, TimeScale::Posix)
    }

    /// Creates a UTC machine time from a floating-point number of seconds.
    pub fn of_utc_seconds(seconds: f64) -> Result<Self> {
        Self::of_float(seconds, TimeScale::Utc)
    }

    fn of_float(seconds: f64, scale: TimeScale) -> Result<Self> {
        if seconds.is_infinite() || seconds.is_nan() {
            return Err(Error::invalid_value(format!(
                "not a finite number: {}",
                seconds
            )));
        }

        let floor = seconds.floor();
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
        if floor < i64::MIN as f64 || floor >= i64::MAX as f64 {
            return Err(Error::overflow("seconds out of i64 range"));
        }

        let secs = floor as i64;
        let fraction = ((seconds - floor) * NANOS_PER_SECOND as f64) as i64;
        Self::normalize(secs, fraction, scale)
    }

    /// Creates a POSIX machine time from an exact decimal number of seconds.
    ///
    /// The split is lossless down to nanosecond precision; digits beyond the
    /// ninth fraction digit are truncated toward zero.
    pub fn of_posix_decimal(seconds: &BigDecimal) -> Result<Self> {
        decimal::from_decimal(seconds, TimeScale::Posix)
    }

    /// Creates a UTC machine time from an exact decimal number of seconds.
    pub fn of_utc_decimal(seconds: &BigDecimal) -> Result<Self> {
        decimal::from_decimal(seconds, TimeScale::Utc)
    }

    /// Whole seconds with floor semantics: a negative fraction reduces the
    /// reported seconds count by one.
    pub fn seconds(&self) -> i64 {
        if self.nanos < 0 {
            // Cannot underflow: a negative fraction only arises from the
            // borrow in normalize, which incremented the seconds.
            self.seconds - 1
        } else {
            self.seconds
        }
    }

    /// Sub-second part in nanoseconds, always in `[0, 1_000_000_000)`.
    pub fn fraction(&self) -> i32 {
        if self.nanos < 0 {
            self.nanos + NANOS_PER_SECOND as i32
        } else {
            self.nanos
        }
    }

    /// Returns the time scale this duration is measured on.
    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    /// Internal signed pair, for the decimal bridge and point application.
    pub(crate) fn raw(&self) -> (i64, i32) {
        (self.seconds, self.nanos)
    }

    /// True if this duration is negative.
    pub fn is_negative(&self) -> bool {
        self.seconds < 0 || self.nanos < 0
    }

    /// True if this duration is positive.
    pub fn is_positive(&self) -> bool {
        self.seconds > 0 || self.nanos > 0
    }

    /// True if this duration is zero.
    pub fn is_empty(&self) -> bool {
        self.seconds == 0 && self.nanos == 0
    }

    /// Adds the given amount of units to this machine time.
    ///
    /// The unit is interpreted on this value's scale; on the UTC scale only
    /// seconds and nanoseconds are accepted.
    pub fn plus(&self, amount: i64, unit: Unit) -> Result<Self> {
        let mut secs = self.seconds;
        let mut frac = i64::from(self.nanos);

        match self.scale {
            TimeScale::Posix => match unit.kind() {
                UnitKind::Seconds(per_unit) => {
                    let delta = amount
                        .checked_mul(per_unit)
                        .ok_or_else(|| Error::overflow("amount out of range for unit"))?;
                    secs = secs
                        .checked_add(delta)
                        .ok_or_else(|| Error::overflow("seconds out of range"))?;
                }
                UnitKind::Nanos(per_unit) => {
                    let delta = amount
                        .checked_mul(per_unit)
                        .ok_or_else(|| Error::overflow("amount out of range for unit"))?;
                    frac = frac
                        .checked_add(delta)
                        .ok_or_else(|| Error::overflow("fraction out of range"))?;
                }
            },
            TimeScale::Utc => match unit {
                Unit::Seconds => {
                    secs = secs
                        .checked_add(amount)
                        .ok_or_else(|| Error::overflow("seconds out of range"))?;
                }
                Unit::Nanoseconds => {
                    frac = frac
                        .checked_add(amount)
                        .ok_or_else(|| Error::overflow("fraction out of range"))?;
                }
                other => {
                    return Err(Error::unsupported_unit(format!(
                        "{:?} is not usable on the UTC scale",
                        other
                    )))
                }
            },
        }

        Self::normalize(secs, frac, self.scale)
    }

    /// Subtracts the given amount of units from this machine time.
    pub fn minus(&self, amount: i64, unit: Unit) -> Result<Self> {
        let negated = amount
            .checked_neg()
            .ok_or_else(|| Error::overflow("cannot negate i64::MIN"))?;
        self.plus(negated, unit)
    }

    /// Adds another machine time duration measured on the same scale.
    pub fn plus_duration(&self, other: &MachineTime) -> Result<Self> {
        self.check_scale(other)?;
        if other.is_empty() {
            return Ok(*self);
        }
        if self.is_empty() {
            return Ok(*other);
        }

        let secs = self
            .seconds
            .checked_add(other.seconds)
            .ok_or_else(|| Error::overflow("seconds out of range"))?;
        let frac = i64::from(self.nanos) + i64::from(other.nanos);
        Self::normalize(secs, frac, self.scale)
    }

    /// Subtracts another machine time duration measured on the same scale.
    pub fn minus_duration(&self, other: &MachineTime) -> Result<Self> {
        self.check_scale(other)?;
        if other.is_empty() {
            return Ok(*self);
        }
        if self.is_empty() {
            return other.inverse();
        }

        let secs = self
            .seconds
            .checked_sub(other.seconds)
            .ok_or_else(|| Error::overflow("seconds out of range"))?;
        let frac = i64::from(self.nanos) - i64::from(other.nanos);
        Self::normalize(secs, frac, self.scale)
    }

    fn check_scale(&self, other: &MachineTime) -> Result<()> {
        if self.scale != other.scale {
            return Err(Error::incompatible_scale(format!(
                "{} vs {}",
                self.scale.name(),
                other.scale.name()
            )));
        }
        Ok(())
    }

    /// Absolute amount of this duration, always non-negative.
    pub fn abs(&self) -> Result<Self> {
        if self.is_negative() {
            self.inverse()
        } else {
            Ok(*self)
        }
    }

    /// Copy of this duration with inverted sign.
    pub fn inverse(&self) -> Result<Self> {
        if self.is_empty() {
            return Ok(*self);
        }

        let secs = self
            .seconds
            .checked_neg()
            .ok_or_else(|| Error::overflow("cannot negate i64::MIN seconds"))?;
        Self::normalize(secs, -i64::from(self.nanos), self.scale)
    }

    /// Multiplies this duration by the given factor, exactly.
    ///
    /// The value is promoted to an arbitrary-precision decimal, multiplied
    /// without loss and converted back.
    pub fn multiplied_by(&self, factor: i64) -> Result<Self> {
        if factor == 1 {
            return Ok(*self);
        }

        let value = self.to_big_decimal() * BigDecimal::from(factor);
        decimal::from_decimal(&value, self.scale)
    }

    /// Divides this duration by the given divisor.
    ///
    /// The dividend is taken at nine fraction digits and the rounding mode
    /// decides the fate of the ninth fraction digit of the quotient.
    pub fn divided_by(&self, divisor: i64, mode: RoundingMode) -> Result<Self> {
        if divisor == 1 {
            return Ok(*self);
        }
        if divisor == 0 {
            return Err(Error::DivisionByZero);
        }

        let value = decimal::div_at_nano_scale(&self.to_big_decimal(), divisor, mode);
        decimal::from_decimal(&value, self.scale)
    }

    /// Converts this duration into an exact decimal number of seconds.
    ///
    /// The fraction contributes exactly nine digits when non-zero and is
    /// omitted entirely when zero, so `1.5s` renders as `1.500000000` and
    /// `-5s` as `-5`.
    pub fn to_big_decimal(&self) -> BigDecimal {
        decimal::to_decimal(self)
    }

    /// Totally orders two durations of the same scale.
    ///
    /// Thanks to the normalization invariant a plain field-by-field
    /// comparison is already sign-correct.
    pub fn compare(&self, other: &MachineTime) -> Result<Ordering> {
        self.check_scale(other)?;
        Ok(self
            .seconds
            .cmp(&other.seconds)
            .then(self.nanos.cmp(&other.nanos)))
    }

    /// Compares absolute lengths: `|self| < |other|`.
    pub fn is_shorter_than(&self, other: &MachineTime) -> Result<bool> {
        Ok(self.abs()?.compare(&other.abs()?)? == Ordering::Less)
    }

    /// Compares absolute lengths: `|self| > |other|`.
    pub fn is_longer_than(&self, other: &MachineTime) -> Result<bool> {
        Ok(self.abs()?.compare(&other.abs()?)? == Ordering::Greater)
    }

    /// Decomposes this duration into its non-zero seconds and nanoseconds
    /// items, with absolute amounts.
    pub fn total_length(&self) -> Vec<Item> {
        let mut items = Vec::with_capacity(2);
        if self.seconds != 0 {
            items.push(Item {
                amount: self.seconds.unsigned_abs(),
                unit: Unit::Seconds,
            });
        }
        if self.nanos != 0 {
            items.push(Item {
                amount: u64::from(self.nanos.unsigned_abs()),
                unit: Unit::Nanoseconds,
            });
        }
        items
    }

    /// True if the given unit carries a non-zero amount in this duration.
    ///
    /// Only the seconds and nanoseconds units can ever be contained; coarser
    /// units are usable in construction but are not stored.
    pub fn contains(&self, unit: Unit) -> bool {
        match unit {
            Unit::Seconds => self.seconds != 0,
            Unit::Nanoseconds => self.nanos != 0,
            _ => false,
        }
    }

    /// Absolute partial amount stored for the given unit.
    pub fn partial_amount(&self, unit: Unit) -> u64 {
        match unit {
            Unit::Seconds => self.seconds.unsigned_abs(),
            Unit::Nanoseconds => u64::from(self.nanos.unsigned_abs()),
            _ => 0,
        }
    }

    /// Applies this duration to a time point by delegating a seconds
    /// adjustment followed by a nanoseconds adjustment to the point's own
    /// arithmetic.
    pub fn add_to<T: UnitArithmetic>(&self, time: T) -> Result<T> {
        time.plus(self.seconds, Unit::Seconds)?
            .plus(i64::from(self.nanos), Unit::Nanoseconds)
    }

    /// Subtracts this duration from a time point, seconds first.
    pub fn subtract_from<T: UnitArithmetic>(&self, time: T) -> Result<T> {
        time.minus(self.seconds, Unit::Seconds)?
            .minus(i64::from(self.nanos), Unit::Nanoseconds)
    }
}

impl PartialOrd for MachineTime {
    /// Ordering is only defined between durations of the same scale.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl fmt::Display for MachineTime {
    /// Formats in technical notation, like `-5s [POSIX]` or
    /// `4.123456789s [UTC]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s [{}]", self.to_big_decimal(), self.scale.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use rand::Rng;

    fn posix(seconds: i64, fraction: i32) -> MachineTime {
        MachineTime::of_posix_units(seconds, fraction).unwrap()
    }

    fn utc(seconds: i64, fraction: i32) -> MachineTime {
        MachineTime::of_utc_units(seconds, fraction).unwrap()
    }

    #[test]
    fn test_normalization_carries_fraction() {
        let mt = posix(1, 1_500_000_000);
        assert_eq!(mt.seconds(), 2);
        assert_eq!(mt.fraction(), 500_000_000);
    }

    #[test]
    fn test_normalization_negative_fraction() {
        let mt = posix(0, -500_000_000);
        assert!(mt.is_negative());
        assert_eq!(mt.seconds(), -1);
        assert_eq!(mt.fraction(), 500_000_000);
        assert_eq!(mt.raw(), (0, -500_000_000));
    }

    #[test]
    fn test_normalization_mixed_signs_borrow() {
        // -2s + 0.25s must store as (-1, -750ms), not (-2, +250ms)
        let mt = MachineTime::normalize(-2, 250_000_000, TimeScale::Posix).unwrap();
        assert_eq!(mt.raw(), (-1, -750_000_000));
        assert_eq!(mt.seconds(), -2);
        assert_eq!(mt.fraction(), 250_000_000);
    }

    #[test]
    fn test_normalization_extreme_fraction() {
        let mt = MachineTime::normalize(0, i64::MIN, TimeScale::Posix).unwrap();
        assert_eq!(mt.seconds(), i64::MIN / NANOS_PER_SECOND - 1);
        let back = i128::from(mt.seconds()) * i128::from(NANOS_PER_SECOND)
            + i128::from(mt.fraction());
        assert_eq!(back, i128::from(i64::MIN));
    }

    #[test]
    fn test_construct_overflow() {
        assert!(matches!(
            MachineTime::normalize(i64::MAX, NANOS_PER_SECOND, TimeScale::Posix),
            Err(Error::Overflow(_))
        ));
        assert!(matches!(
            MachineTime::normalize(i64::MIN, -1, TimeScale::Utc),
            Err(Error::Overflow(_))
        ));
    }

    #[test]
    fn test_zero_singletons() {
        assert_eq!(posix(0, 0), POSIX_ZERO);
        assert_eq!(utc(0, 0), UTC_ZERO);
        assert!(POSIX_ZERO.is_empty());
        assert_ne!(POSIX_ZERO, UTC_ZERO);
    }

    #[test]
    fn test_of_posix_with_coarse_units() {
        let mt = MachineTime::of_posix(1, Unit::Hours).unwrap();
        assert_eq!(mt.seconds(), 3_600);
        assert!(!mt.contains(Unit::Hours));
        assert!(mt.contains(Unit::Seconds));

        let mt = MachineTime::of_posix(1_500, Unit::Milliseconds).unwrap();
        assert_eq!(mt.seconds(), 1);
        assert_eq!(mt.fraction(), 500_000_000);
    }

    #[test]
    fn test_of_posix_overflow() {
        assert!(matches!(
            MachineTime::of_posix(i64::MAX, Unit::Hours),
            Err(Error::Overflow(_))
        ));
    }

    #[test]
    fn test_of_utc_rejects_coarse_units() {
        assert!(matches!(
            MachineTime::of_utc(1, Unit::Hours),
            Err(Error::UnsupportedUnit(_))
        ));
        assert!(MachineTime::of_utc(1, Unit::Seconds).is_ok());
        let mt = MachineTime::of_utc(-1, Unit::Nanoseconds).unwrap();
        assert_eq!(mt.raw(), (0, -1));
    }

    #[test]
    fn test_of_float_rejects_non_finite() {
        assert!(matches!(
            MachineTime::of_posix_seconds(f64::NAN),
            Err(Error::InvalidValue(_))
        ));
        assert!(matches!(
            MachineTime::of_utc_seconds(f64::INFINITY),
            Err(Error::InvalidValue(_))
        ));
        assert!(matches!(
            MachineTime::of_posix_seconds(1e300),
            Err(Error::Overflow(_))
        ));
    }

    #[test]
    fn test_of_float_splits_with_floor() {
        let mt = MachineTime::of_posix_seconds(-1.5).unwrap();
        assert_eq!(mt.seconds(), -2);
        assert_eq!(mt.fraction(), 500_000_000);

        let mt = MachineTime::of_utc_seconds(0.25).unwrap();
        assert_eq!(mt.raw(), (0, 250_000_000));
        assert_eq!(mt.scale(), TimeScale::Utc);
    }

    #[test]
    fn test_plus_minus_units() {
        let mt = posix(10, 0).plus(5, Unit::Minutes).unwrap();
        assert_eq!(mt.seconds(), 310);

        let mt = posix(0, 0).minus(1, Unit::Nanoseconds).unwrap();
        assert_eq!(mt.raw(), (0, -1));

        let mt = utc(3, 0).plus(2, Unit::Nanoseconds).unwrap();
        assert_eq!(mt.raw(), (3, 2));
        assert!(matches!(
            utc(3, 0).plus(1, Unit::Days),
            Err(Error::UnsupportedUnit(_))
        ));
    }

    #[test]
    fn test_minus_min_amount_fails() {
        assert!(matches!(
            posix(0, 0).minus(i64::MIN, Unit::Seconds),
            Err(Error::Overflow(_))
        ));
    }

    #[test]
    fn test_minus_duration_to_negative() {
        let mt = posix(0, 0).minus_duration(&posix(5, 0)).unwrap();
        assert_eq!(mt.raw(), (-5, 0));
        assert_eq!(mt.to_big_decimal().to_string(), "-5");
        assert_eq!(mt.to_string(), "-5s [POSIX]");
    }

    #[test]
    fn test_plus_duration_empty_fast_path() {
        let a = posix(7, 250_000_000);
        assert_eq!(a.plus_duration(&POSIX_ZERO).unwrap(), a);
        assert_eq!(POSIX_ZERO.plus_duration(&a).unwrap(), a);
        assert_eq!(
            POSIX_ZERO.minus_duration(&a).unwrap(),
            a.inverse().unwrap()
        );
    }

    #[test]
    fn test_cross_scale_combination_fails() {
        assert!(matches!(
            posix(1, 0).plus_duration(&utc(1, 0)),
            Err(Error::IncompatibleScale(_))
        ));
        assert!(matches!(
            utc(1, 0).minus_duration(&posix(1, 0)),
            Err(Error::IncompatibleScale(_))
        ));
    }

    #[test]
    fn test_abs_and_inverse() {
        let neg = posix(-3, -500_000_000);
        let abs = neg.abs().unwrap();
        assert_eq!(abs.raw(), (3, 500_000_000));
        assert_eq!(abs.abs().unwrap(), abs);

        let inv = abs.inverse().unwrap();
        assert_eq!(inv, neg);
        assert_eq!(POSIX_ZERO.inverse().unwrap(), POSIX_ZERO);
    }

    #[test]
    fn test_additive_inverse_law() {
        for mt in [
            posix(0, 0),
            posix(5, 999_999_999),
            posix(-17, -1),
            utc(42, 123_456_789),
        ] {
            let sum = mt.plus_duration(&mt.inverse().unwrap()).unwrap();
            assert!(sum.is_empty(), "{} + inverse not empty", mt);
        }
    }

    #[test]
    fn test_multiplied_by() {
        let mt = posix(2, 500_000_000).multiplied_by(3).unwrap();
        assert_eq!(mt.raw(), (7, 500_000_000));

        let mt = posix(1, 500_000_000).multiplied_by(-2).unwrap();
        assert_eq!(mt.raw(), (-3, 0));

        let mt = utc(4, 1).multiplied_by(1).unwrap();
        assert_eq!(mt.raw(), (4, 1));

        assert!(matches!(
            posix(i64::MAX, 0).multiplied_by(2),
            Err(Error::Overflow(_))
        ));
    }

    #[test]
    fn test_divided_by_rounding_modes() {
        let one = posix(1, 0);
        let third_down = one.divided_by(3, RoundingMode::HalfUp).unwrap();
        assert_eq!(third_down.raw(), (0, 333_333_333));

        let third_up = one.divided_by(3, RoundingMode::Ceiling).unwrap();
        assert_eq!(third_up.raw(), (0, 333_333_334));

        let half = posix(7, 0).divided_by(2, RoundingMode::HalfUp).unwrap();
        assert_eq!(half.raw(), (3, 500_000_000));

        let neg = posix(-1, 0).divided_by(2, RoundingMode::Floor).unwrap();
        assert_eq!(neg.raw(), (0, -500_000_000));
    }

    #[test]
    fn test_divided_by_half_even_tie() {
        let tiny = posix(0, 1);
        let even = tiny.divided_by(2, RoundingMode::HalfEven).unwrap();
        assert!(even.is_empty());
        let up = tiny.divided_by(2, RoundingMode::HalfUp).unwrap();
        assert_eq!(up.raw(), (0, 1));
    }

    #[test]
    fn test_divided_by_identity_and_zero() {
        let mt = utc(9, 0);
        assert_eq!(mt.divided_by(1, RoundingMode::Floor).unwrap(), mt);
        assert!(matches!(
            mt.divided_by(0, RoundingMode::HalfUp),
            Err(Error::DivisionByZero)
        ));
    }

    #[test]
    fn test_big_decimal_rendering() {
        assert_eq!(posix(1, 500_000_000).to_big_decimal().to_string(), "1.500000000");
        assert_eq!(posix(0, -500_000_000).to_big_decimal().to_string(), "-0.500000000");
        assert_eq!(utc(4, 1).to_string(), "4.000000001s [UTC]");
    }

    #[test]
    fn test_compare_total_order() {
        let a = posix(1, 0);
        let b = posix(1, 1);
        let c = posix(-1, -999_999_999);

        assert_eq!(a.compare(&b).unwrap(), Ordering::Less);
        assert_eq!(b.compare(&a).unwrap(), Ordering::Greater);
        assert_eq!(a.compare(&a).unwrap(), Ordering::Equal);
        assert_eq!(c.compare(&a).unwrap(), Ordering::Less);
        assert!(a < b);
        assert!(posix(1, 0).partial_cmp(&utc(1, 0)).is_none());
    }

    #[test]
    fn test_compare_cross_scale_fails() {
        assert!(matches!(
            posix(1, 0).compare(&utc(1, 0)),
            Err(Error::IncompatibleScale(_))
        ));
    }

    #[test]
    fn test_ordering_consistent_with_difference() {
        let pairs = [
            (posix(3, 100), posix(3, 200)),
            (posix(-2, 0), posix(1, 0)),
            (posix(5, 5), posix(5, 5)),
        ];
        for (a, b) in pairs {
            let diff = a.minus_duration(&b).unwrap();
            match a.compare(&b).unwrap() {
                Ordering::Less => assert!(diff.is_negative()),
                Ordering::Equal => assert!(diff.is_empty()),
                Ordering::Greater => assert!(diff.is_positive()),
            }
        }
    }

    #[test]
    fn test_shorter_longer_use_absolute_length() {
        let short = posix(-1, 0);
        let long = posix(2, 0);
        assert!(short.is_shorter_than(&long).unwrap());
        assert!(long.is_longer_than(&short).unwrap());
        assert!(!posix(-2, 0).is_shorter_than(&long).unwrap());
    }

    #[test]
    fn test_total_length_and_partial_amounts() {
        let mt = posix(-5, -250_000_000);
        let items = mt.total_length();
        assert_eq!(
            items,
            vec![
                Item { amount: 5, unit: Unit::Seconds },
                Item { amount: 250_000_000, unit: Unit::Nanoseconds },
            ]
        );
        assert_eq!(mt.partial_amount(Unit::Seconds), 5);
        assert_eq!(mt.partial_amount(Unit::Nanoseconds), 250_000_000);
        assert_eq!(mt.partial_amount(Unit::Minutes), 0);
        assert!(!mt.contains(Unit::Days));
        assert!(posix(0, 1).total_length().len() == 1);
    }

    #[test]
    fn test_normalization_invariant_randomized() {
        let mut rng = rand::thread_rng();
        for _ in 0..1_000 {
            let seconds = rng.gen_range(i64::MIN / 2..i64::MAX / 2);
            let fraction = rng.gen::<i64>();
            if let Ok(mt) = MachineTime::normalize(seconds, fraction, TimeScale::Posix) {
                let (s, n) = mt.raw();
                assert!(n.unsigned_abs() < NANOS_PER_SECOND as u32);
                if s > 0 {
                    assert!(n >= 0, "positive seconds with negative fraction");
                }
                if s < 0 {
                    assert!(n <= 0, "negative seconds with positive fraction");
                }
            }
        }
    }
}
