use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Decoding failures. Every variant carries the byte offset at which the
/// decoder gave up, counted from the start of the source slice. A failed
/// decode never returns partial results; the reader stays usable for further
/// independent reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A packed integer's continuation sequence ran off the end of the source.
    MalformedPackedInt { offset: usize },
    /// A declared length (or a fixed-width read) needs more bytes than remain.
    TruncatedSource {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    /// A packed length field decoded to a negative value.
    NegativeLength { offset: usize },
    /// A string payload was not valid UTF-8.
    InvalidUtf8 { offset: usize },
    /// A compact string sentinel outside the recognized set {0, 1, 3}.
    InvalidSentinel { offset: usize, value: u8 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::MalformedPackedInt { offset } => {
                write!(f, "Packed integer truncated mid-sequence at offset {}", offset)
            }
            Error::TruncatedSource {
                offset,
                needed,
                remaining,
            } => write!(
                f,
                "Needed {} bytes at offset {}, but only {} remain",
                needed, offset, remaining
            ),
            Error::NegativeLength { offset } => {
                write!(f, "Declared length at offset {} is negative", offset)
            }
            Error::InvalidUtf8 { offset } => {
                write!(f, "String at offset {} is not valid UTF-8", offset)
            }
            Error::InvalidSentinel { offset, value } => write!(
                f,
                "Compact string sentinel {:#04x} at offset {} (expected 0, 1, or 3)",
                value, offset
            ),
        }
    }
}

impl std::error::Error for Error {}
