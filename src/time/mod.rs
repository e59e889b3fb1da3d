//! Machine time durations and the distance metric over time points

mod decimal;
pub mod duration;
pub mod metric;
pub mod point;

pub use self::duration::{Item, MachineTime, TimeScale, Unit, POSIX_ZERO, UTC_ZERO};
pub use self::metric::Metric;
pub use self::point::{PosixView, TimePoint, UnitArithmetic, UtcView};
