//! Signed variable-length integers.
//!
//! A value is shifted into an unsigned range by a per-tier offset (this is
//! not zigzag) and written as 7-bit groups, least significant first. A byte
//! with the high bit set means more bytes follow. The fourth byte is always
//! the last one and carries its 8 bits whole.
//!
//! | Bytes | Range                        | Offset      |
//! |-------|------------------------------|-------------|
//! | 1     | -64 ..= 63                   | 64          |
//! | 2     | -8192 ..= 8191               | 8192        |
//! | 3     | -1048576 ..= 1048575         | 1048576     |
//! | 4     | -268435456 ..= 268435455     | 268435456   |

use crate::error::{CodecError, CodecResult};

/// Longest encoding of a single number.
pub const MAX_VARINT_LEN: usize = 4;

/// Smallest value that can be packed.
pub const MIN_PACKED: i64 = -TIER_OFFSETS[MAX_VARINT_LEN - 1];

/// Largest value that can be packed.
pub const MAX_PACKED: i64 = TIER_OFFSETS[MAX_VARINT_LEN - 1] - 1;

const TIER_OFFSETS: [i64; MAX_VARINT_LEN] = [1 << 6, 1 << 13, 1 << 20, 1 << 28];

const CONTINUATION: u8 = 0x80;
const PAYLOAD_MASK: i64 = 0x7f;

/// Returns the number of bytes `value` packs into, or `None` if it is out of range.
pub fn packed_len(value: i64) -> Option<usize> {
    TIER_OFFSETS
        .iter()
        .position(|&offset| value >= -offset && value < offset)
        .map(|tier| tier + 1)
}

/// Appends the packed form of `value` to `out` and returns its length.
///
/// # Errors
///
/// Returns [`CodecError::OutOfRange`] if `value` is outside
/// [`MIN_PACKED`]`..=`[`MAX_PACKED`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn pack_number(value: i64, out: &mut Vec<u8>) -> CodecResult<usize> {
    let len = packed_len(value).ok_or_else(|| CodecError::out_of_range(value))?;
    let mut n = value + TIER_OFFSETS[len - 1];
    for _ in 1..len {
        out.push((n & PAYLOAD_MASK) as u8 | CONTINUATION);
        n >>= 7;
    }
    out.push(n as u8);
    Ok(len)
}

/// Unpacks the number starting at `pos`, returning it with the count of
/// bytes consumed.
///
/// # Errors
///
/// Returns [`CodecError::Incomplete`] if `data` ends before the terminal byte.
pub fn unpack_number(data: &[u8], pos: usize) -> CodecResult<(i64, usize)> {
    let mut n = 0i64;
    let mut len = 0;
    loop {
        let byte = *data.get(pos + len).ok_or(CodecError::Incomplete)?;
        let shift = 7 * len;
        len += 1;
        if byte < CONTINUATION || len == MAX_VARINT_LEN {
            n |= i64::from(byte) << shift;
            return Ok((n - TIER_OFFSETS[len - 1], len));
        }
        n |= (i64::from(byte) & PAYLOAD_MASK) << shift;
    }
}
