//! Serde support for machine times
//!
//! A machine time serializes through a small proxy carrying the floor
//! seconds, the non-negative fraction and the scale tag; deserialization
//! goes back through the normalizing factories, so malformed input can
//! never produce a denormalized value.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::time::{MachineTime, TimeScale};

/// On-the-wire shape of a machine time
#[derive(Serialize, Deserialize)]
struct MachineTimeProxy {
    seconds: i64,
    fraction: i32,
    scale: TimeScale,
}

impl Serialize for MachineTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        MachineTimeProxy {
            seconds: self.seconds(),
            fraction: self.fraction(),
            scale: self.scale(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MachineTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let proxy = MachineTimeProxy::deserialize(deserializer)?;
        let value = match proxy.scale {
            TimeScale::Posix => MachineTime::of_posix_units(proxy.seconds, proxy.fraction),
            TimeScale::Utc => MachineTime::of_utc_units(proxy.seconds, proxy.fraction),
        };
        value.map_err(de::Error::custom)
    }
}
