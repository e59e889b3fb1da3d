use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

use crate::core::{Error, Result};
use crate::time::{MachineTime, TimeScale};

/// Type tag carried in the six most significant bits of the header byte
const TYPE_TAG: u8 = 7;

/// Header bit set when the duration is measured on the UTC scale
const UTC_BIT: u8 = 0b01;

/// Header bit set when a fraction payload follows the seconds
const FRACTION_BIT: u8 = 0b10;

/// Encodes a machine time into its bit-exact wire form.
///
/// Layout: one header byte with the type tag in the six most significant
/// bits, the UTC flag in bit 0 and the fraction-present flag in bit 1; the
/// floor seconds as a big-endian i64; and, only when the flag is set, the
/// non-negative fraction as a big-endian i32.
pub fn encode(value: &MachineTime, dst: &mut impl BufMut) {
    let fraction = value.fraction();
    let mut header = TYPE_TAG << 2;
    if value.scale() == TimeScale::Utc {
        header |= UTC_BIT;
    }
    if fraction > 0 {
        header |= FRACTION_BIT;
    }

    dst.put_u8(header);
    dst.put_i64(value.seconds());
    if fraction > 0 {
        dst.put_i32(fraction);
    }
}

/// Full frame length implied by a header byte, header included
fn frame_len(header: u8) -> usize {
    if header & FRACTION_BIT != 0 {
        13
    } else {
        9
    }
}

/// Decodes a machine time from its wire form.
///
/// Fails on an unknown type tag and on truncated input.
pub fn decode(src: &mut impl Buf) -> Result<MachineTime> {
    if src.remaining() < 1 {
        return Err(Error::malformed_encoding("missing header byte"));
    }

    let header = src.get_u8();
    if header >> 2 != TYPE_TAG {
        return Err(Error::malformed_encoding(format!(
            "unknown type tag: {}",
            header >> 2
        )));
    }
    if src.remaining() < frame_len(header) - 1 {
        return Err(Error::malformed_encoding("truncated payload"));
    }

    let seconds = src.get_i64();
    let fraction = if header & FRACTION_BIT != 0 {
        src.get_i32()
    } else {
        0
    };

    if header & UTC_BIT != 0 {
        MachineTime::of_utc_units(seconds, fraction)
    } else {
        MachineTime::of_posix_units(seconds, fraction)
    }
}

/// Frame codec for streaming machine times over a transport
#[derive(Debug, Clone, Copy, Default)]
pub struct MachineTimeCodec;

impl MachineTimeCodec {
    /// Creates a new machine time codec
    pub fn new() -> Self {
        MachineTimeCodec
    }
}

impl Decoder for MachineTimeCodec {
    type Item = MachineTime;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<MachineTime>> {
        if src.is_empty() {
            return Ok(None);
        }

        let header = src[0];
        if header >> 2 != TYPE_TAG {
            return Err(Error::malformed_encoding(format!(
                "unknown type tag: {}",
                header >> 2
            )));
        }

        let needed = frame_len(header);
        if src.len() < needed {
            // Wait for the rest of the frame
            return Ok(None);
        }

        let mut frame = src.split_to(needed);
        trace!(len = needed, "decoding machine time frame");
        decode(&mut frame).map(Some)
    }
}

impl Encoder<MachineTime> for MachineTimeCodec {
    type Error = Error;

    fn encode(&mut self, item: MachineTime, dst: &mut BytesMut) -> Result<()> {
        encode(&item, dst);
        Ok(())
    }
}
