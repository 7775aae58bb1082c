//! Packed (LEB128-style) integer codec and the self-describing length
//! resolver built on top of it.
//!
//! Values are signed 64-bit integers encoded little-endian in 7-bit groups,
//! the high bit of each byte flagging continuation. A group terminates the
//! sequence once the remainder fits a sign-extended 7-bit value, so small
//! magnitudes of either sign collapse to a single byte: `0` is `[0x00]`, `-1`
//! is `[0x7F]`, `128` is `[0x80, 0x01]`. After eight continuation groups (56
//! bits) the ninth byte carries the remaining 8 bits verbatim — it is final by
//! position, so a full-range value never exceeds [`MAX_WIDTH`] bytes.

use crate::error::{Error, Result};
use crate::storage::Storage;

/// Widest possible packed integer, in bytes.
pub const MAX_WIDTH: usize = 9;

const CONTINUATION_BIT: u8 = 0x80;

/// True when `v` survives a round-trip through a sign-extended 7-bit group,
/// i.e. the group carrying its low bits can terminate the sequence.
#[inline]
fn final_group(v: i64) -> bool {
    v == (v << 57) >> 57
}

/// Encode `value` into `sink` starting at `offset`, returning the offset just
/// past the written bytes. This is the canonical positional encoder; every
/// other integer write in the crate funnels through it.
pub fn encode_into<S: Storage>(sink: &mut S, mut offset: usize, value: i64) -> usize {
    let mut remaining = value;
    for _ in 1..MAX_WIDTH {
        if final_group(remaining) {
            return sink.put_u8(offset, (remaining as u8) & 0x7F);
        }
        offset = sink.put_u8(offset, (remaining as u8 & 0x7F) | CONTINUATION_BIT);
        remaining >>= 7;
    }
    // Ninth byte: the remaining 8 bits verbatim, final by position.
    sink.put_u8(offset, remaining as u8)
}

/// Decode a packed integer from `src` at `offset`, returning the value and
/// the offset just past the consumed bytes.
///
/// Fails with [`Error::MalformedPackedInt`] when the source ends while a
/// continuation bit is still set. An over-long sequence cannot occur: the
/// ninth byte is always consumed as the terminator regardless of its high bit
/// (it has to be — `i64::MIN`'s ninth byte is `0x80`).
pub fn decode(src: &[u8], offset: usize) -> Result<(i64, usize)> {
    let mut acc = 0u64;
    let mut pos = offset;
    for group in 0..MAX_WIDTH {
        let byte = *src
            .get(pos)
            .ok_or(Error::MalformedPackedInt { offset: pos })?;
        pos += 1;
        if group == MAX_WIDTH - 1 {
            acc |= (byte as u64) << 56;
            return Ok((acc as i64, pos));
        }
        acc |= ((byte & 0x7F) as u64) << (7 * group);
        if byte & CONTINUATION_BIT == 0 {
            // Sign-extend from the top of the final group.
            let unused = 64 - 7 * (group + 1);
            return Ok((((acc << unused) as i64) >> unused, pos));
        }
    }
    unreachable!("packed integer loop exits within MAX_WIDTH groups")
}

/// Number of bytes [`encode_into`] would emit for `value`, without emitting.
pub fn width(value: i64) -> usize {
    let mut remaining = value;
    for w in 1..MAX_WIDTH {
        if final_group(remaining) {
            return w;
        }
        remaining >>= 7;
    }
    MAX_WIDTH
}

/// Resolve the total serialized length of a record whose trailer is a packed
/// integer encoding that very total.
///
/// `total = raw_len + width(total)` is self-referential, so it is solved by
/// fixed-point iteration on the trailer width. `width` is a step function
/// that moves by at most one per update while the argument grows by at most
/// [`MAX_WIDTH`], so the iteration settles within two updates; anything else
/// is an internal invariant violation, not a data error.
pub fn total_length(raw_len: usize) -> usize {
    let mut extra = 0usize;
    let mut updates = 0;
    loop {
        let next = width((raw_len + extra) as i64);
        if next == extra {
            return raw_len + extra;
        }
        extra = next;
        updates += 1;
        debug_assert!(updates <= 2, "length trailer fixed point failed to converge");
    }
}
