//! Core types shared throughout the library
//!
//! This module contains the error type, common constants and serde support.

pub mod error;
pub mod serde;

pub use self::error::{Error, Result};

/// Nanoseconds per second
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Number of fraction digits in the canonical decimal representation
pub const FRACTION_DIGITS: i64 = 9;
