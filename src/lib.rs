//! trace-pack is the byte-level codec for a compact profiling/trace wire
//! format: a LEB128-style packed integer scheme, fixed-width and string
//! encodings derived from it, and the self-describing length computation used
//! when a stream's packed length trailer must describe a total that includes
//! the trailer itself.
//!
//! The codec is pure and synchronous. It decides *how* values become bytes;
//! what gets recorded, how the backing buffer grows, and where the bytes go
//! afterwards all belong to other layers.
//!
//! # Wire format
//!
//! - **Packed integer**: signed 64-bit domain, little-endian 7-bit groups,
//!   high bit of each byte flagging continuation. A value terminates in the
//!   group where its remainder fits a sign-extended 7-bit value, so small
//!   magnitudes of either sign cost one byte (`0` is `[0x00]`, `-1` is
//!   `[0x7F]`, `128` is `[0x80, 0x01]`), and the decoder sign-extends the
//!   final group. After eight continuation groups the ninth byte carries the
//!   remaining 8 bits verbatim, capping every value at 9 bytes.
//! - **Sub-64-bit integral fields** (16/32 bits) are zero-extended bit
//!   patterns: masking, not sign preservation, is the contract. Writing
//!   `-1i16` as a 16-bit field reads back as `65535`.
//! - **Raw fixed-width fields** (16/32/64-bit integers, f32/f64 IEEE-754 bit
//!   patterns, booleans as one byte) are big-endian network order and never
//!   packed; their guaranteed width is what makes in-place patching safe.
//! - **UTF string**: packed byte length, then raw UTF-8. Null and empty
//!   collapse to the same lone zero length here; only the compact form below
//!   can tell them apart.
//! - **Compact UTF string**: one sentinel byte — [`COMPACT_NULL`],
//!   [`COMPACT_EMPTY`], or [`COMPACT_STRING`] followed by packed length and
//!   raw UTF-8. Sentinel 2 is reserved and rejected on read.
//! - **Length trailer**: a stream that ends with a packed integer encoding
//!   its own total length reports that total via
//!   [`packed::total_length`] / [`Writer::length`], the fixed point of
//!   `total = content + width(total)`.
//!
//! ```
//! use trace_pack::{Reader, Writer};
//!
//! let mut w = Writer::new();
//! w.write_i64(-1)
//!     .write_utf("main")
//!     .write_compact_utf(None);
//! assert_eq!(w.as_bytes(), &[0x7F, 4, b'm', b'a', b'i', b'n', 0]);
//!
//! let mut r = Reader::new(w.as_bytes());
//! assert_eq!(r.read_i64().unwrap(), -1);
//! assert_eq!(r.read_utf().unwrap(), "main");
//! assert_eq!(r.read_compact_utf().unwrap(), None);
//! ```

mod error;
mod reader;
mod storage;
mod writer;

pub mod packed;

pub use self::error::{Error, Result};
pub use self::packed::MAX_WIDTH;
pub use self::reader::Reader;
pub use self::storage::Storage;
pub use self::writer::Writer;

/// Compact string sentinel: no string at all.
pub const COMPACT_NULL: u8 = 0;
/// Compact string sentinel: the empty string.
pub const COMPACT_EMPTY: u8 = 1;
/// Compact string sentinel: packed length and UTF-8 bytes follow. Sentinel 2
/// is reserved for future use and never written.
pub const COMPACT_STRING: u8 = 3;
