//! machtime: fixed-point machine time durations with nanosecond precision
//!
//! A [`MachineTime`] measures elapsed machine time between two instants on
//! one of two scales: the continuous POSIX scale that ignores leap seconds,
//! and the UTC scale that counts true elapsed SI seconds. The [`Metric`]
//! computes such durations as distances between time points; arithmetic,
//! comparison and the decimal bridge operate on the resulting values.

pub mod core;
pub mod protocol;
pub mod time;

// Re-export commonly used items
pub use crate::core::{Error, Result};
pub use crate::time::{MachineTime, Metric, TimeScale, Unit};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
