//! Time point abstractions consumed by the distance metric
//!
//! A point type advertises up to two capability views: the plain POSIX view
//! (elapsed seconds since 1970 plus sub-second nanoseconds) and the
//! leap-aware UTC view (true elapsed SI seconds since 1972). The metric
//! picks its code path from whichever views are available.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, TimeZone};

use crate::core::{Error, Result, NANOS_PER_SECOND};

use super::duration::Unit;

/// Plain view of a time point on the continuous scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosixView {
    /// Seconds elapsed since 1970-01-01T00:00Z, ignoring leap seconds;
    /// negative for points before the epoch
    pub seconds: i64,
    /// Sub-second part in nanoseconds, in `[0, 1_000_000_000)`
    pub nanos: i32,
}

/// Leap-aware view of a time point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcView {
    /// True elapsed SI seconds since 1972-01-01T00:00Z, including inserted
    /// leap seconds; negative for points predating that epoch
    pub seconds: i64,
    /// Sub-second part in nanoseconds, in `[0, 1_000_000_000)`
    pub nanos: i32,
}

/// A time point the distance metric can measure between.
///
/// The plain capability is optional because not every point type has an
/// absolute epoch (a bare wall-clock time does not); the leap-aware
/// capability is optional because most point types do not track leap
/// seconds.
pub trait TimePoint {
    /// Plain elapsed-time view, if this point type has one.
    fn posix_view(&self) -> Option<PosixView>;

    /// Leap-aware elapsed-time view, if this point type tracks leap seconds.
    fn utc_view(&self) -> Option<UtcView> {
        None
    }
}

impl TimePoint for SystemTime {
    fn posix_view(&self) -> Option<PosixView> {
        match self.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => Some(PosixView {
                seconds: elapsed.as_secs() as i64,
                nanos: elapsed.subsec_nanos() as i32,
            }),
            Err(before) => {
                // Before the epoch: floor the seconds so nanos stay in range.
                let elapsed = before.duration();
                let mut seconds = -(elapsed.as_secs() as i64);
                let mut nanos = elapsed.subsec_nanos() as i32;
                if nanos > 0 {
                    seconds -= 1;
                    nanos = NANOS_PER_SECOND as i32 - nanos;
                }
                Some(PosixView { seconds, nanos })
            }
        }
    }
}

impl<Tz: TimeZone> TimePoint for DateTime<Tz> {
    fn posix_view(&self) -> Option<PosixView> {
        Some(PosixView {
            seconds: self.timestamp(),
            nanos: self.timestamp_subsec_nanos() as i32,
        })
    }
}

/// Unit-level arithmetic a time point offers so a machine time can be
/// applied to it via `add_to` / `subtract_from`.
pub trait UnitArithmetic: Sized {
    /// Moves this point forward by the given amount of units.
    fn plus(&self, amount: i64, unit: Unit) -> Result<Self>;

    /// Moves this point backward by the given amount of units.
    fn minus(&self, amount: i64, unit: Unit) -> Result<Self> {
        let negated = amount
            .checked_neg()
            .ok_or_else(|| Error::overflow("cannot negate i64::MIN"))?;
        self.plus(negated, unit)
    }
}
