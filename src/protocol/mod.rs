//! Bit-exact wire form for machine time durations

pub mod codec;

pub use self::codec::{decode, encode, MachineTimeCodec};
