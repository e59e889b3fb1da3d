//! Distance metric between two time points on a chosen scale

use tracing::trace;

use crate::core::{Error, Result};

use super::duration::{MachineTime, TimeScale};
use super::point::TimePoint;

/// Computes machine time durations as the distance between two time points.
///
/// A metric is a pure value; `between` never mutates its inputs and may be
/// called concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metric {
    scale: TimeScale,
}

impl Metric {
    /// Metric on the POSIX scale (without leap seconds).
    pub fn posix() -> Self {
        Metric {
            scale: TimeScale::Posix,
        }
    }

    /// Metric on the UTC scale (inclusive leap seconds).
    ///
    /// Time points before 1972-01-01 are not supported on this scale.
    pub fn utc() -> Self {
        Metric {
            scale: TimeScale::Utc,
        }
    }

    /// Returns the scale this metric measures on.
    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    /// Computes the duration elapsed from `start` to `end`.
    ///
    /// On the UTC scale, points that carry a leap-aware view are measured in
    /// true SI seconds; points without one fall back to the continuous
    /// computation while keeping the metric's scale tag.
    pub fn between<T: TimePoint>(&self, start: &T, end: &T) -> Result<MachineTime> {
        if self.scale == TimeScale::Utc {
            if let (Some(t1), Some(t2)) = (start.utc_view(), end.utc_view()) {
                if t1.seconds < 0 || t2.seconds < 0 {
                    return Err(Error::unsupported_before_epoch(
                        "cannot calculate an SI duration before 1972-01-01",
                    ));
                }
                trace!(scale = "UTC", "leap-aware distance");
                // Both elapsed values are non-negative, so the difference
                // cannot overflow.
                return MachineTime::normalize(
                    t2.seconds - t1.seconds,
                    i64::from(t2.nanos) - i64::from(t1.nanos),
                    TimeScale::Utc,
                );
            }
        }

        let t1 = start.posix_view().ok_or_else(|| {
            Error::unsupported_point_type("machine time requires a point with a POSIX view")
        })?;
        let t2 = end.posix_view().ok_or_else(|| {
            Error::unsupported_point_type("machine time requires a point with a POSIX view")
        })?;

        trace!(scale = self.scale.name(), "continuous distance");
        let seconds = t2
            .seconds
            .checked_sub(t1.seconds)
            .ok_or_else(|| Error::overflow("elapsed seconds difference out of range"))?;
        MachineTime::normalize(
            seconds,
            i64::from(t2.nanos) - i64::from(t1.nanos),
            self.scale,
        )
    }
}
