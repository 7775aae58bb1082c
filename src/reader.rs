use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};
use crate::packed;
use crate::{COMPACT_EMPTY, COMPACT_NULL, COMPACT_STRING};

/// Position-tracking decoder over a byte slice, mirroring every encoding
/// decision of [`Writer`](crate::Writer).
///
/// Strings are borrowed out of the source rather than copied. A failed read
/// returns an [`Error`] and no partial value; the reader itself stays usable
/// after a [`seek`](Self::seek).
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Reader { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, offset: usize) {
        self.pos = offset;
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len == 0 {
            // The cursor may sit past the end after a seek; an empty read is
            // still answerable without touching the slice.
            return Ok(&[]);
        }
        let remaining = self.remaining();
        if len > remaining {
            return Err(Error::TruncatedSource {
                offset: self.pos,
                needed: len,
                remaining,
            });
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Packed signed 64-bit integer; the final group is sign-extended, so
    /// negative values come back negative.
    pub fn read_i64(&mut self) -> Result<i64> {
        let (value, next) = packed::decode(self.buf, self.pos)?;
        self.pos = next;
        Ok(value)
    }

    /// Packed 32-bit field: decoded as 64 bits, then truncated to the natural
    /// width. The inverse of the writer's masking, not sign recovery.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(self.read_i64()? as u32)
    }

    /// Packed 16-bit field, truncating like [`read_u32`](Self::read_u32).
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(self.read_i64()? as u16)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// One byte; anything nonzero reads as true.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }

    pub fn read_u16_raw(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    pub fn read_u32_raw(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.take(4)?))
    }

    pub fn read_i64_raw(&mut self) -> Result<i64> {
        Ok(BigEndian::read_i64(self.take(8)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(BigEndian::read_f32(self.take(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(BigEndian::read_f64(self.take(8)?))
    }

    /// Packed byte length followed by exactly that many bytes of UTF-8.
    /// A negative decoded length is malformed data, reported as
    /// [`Error::NegativeLength`], not a caller error.
    pub fn read_utf(&mut self) -> Result<&'a str> {
        let length_offset = self.pos;
        let len = self.read_i64()?;
        let len = usize::try_from(len).map_err(|_| Error::NegativeLength {
            offset: length_offset,
        })?;
        let payload_offset = self.pos;
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
            offset: payload_offset,
        })
    }

    /// Owned-copy convenience over [`read_utf`](Self::read_utf).
    pub fn read_string(&mut self) -> Result<String> {
        Ok(self.read_utf()?.to_string())
    }

    /// Sentinel-prefixed string: 0 reads as `None`, 1 as `Some("")`, 3 as a
    /// length-prefixed string. Sentinel 2 is reserved and rejected, as is
    /// anything above 3.
    pub fn read_compact_utf(&mut self) -> Result<Option<&'a str>> {
        let sentinel_offset = self.pos;
        match self.read_u8()? {
            COMPACT_NULL => Ok(None),
            COMPACT_EMPTY => Ok(Some("")),
            COMPACT_STRING => Ok(Some(self.read_utf()?)),
            value => Err(Error::InvalidSentinel {
                offset: sentinel_offset,
                value,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::Writer;
    use rand::Rng;

    #[test]
    fn mirrors_writer() {
        let mut w = Writer::new();
        w.write_i64(-300)
            .write_u16(0xFFFF)
            .write_u32(7)
            .write_u8(0x42)
            .write_bool(true)
            .write_u16_raw(0xBEEF)
            .write_u32_raw(123456789)
            .write_i64_raw(i64::MIN)
            .write_f32(3.5)
            .write_f64(-1.25e300)
            .write_utf("stack.frame")
            .write_compact_utf(None)
            .write_compact_utf(Some(""))
            .write_compact_utf(Some("thread"));

        let mut r = Reader::new(w.as_bytes());
        assert_eq!(r.read_i64().unwrap(), -300);
        assert_eq!(r.read_u16().unwrap(), 0xFFFF);
        assert_eq!(r.read_u32().unwrap(), 7);
        assert_eq!(r.read_u8().unwrap(), 0x42);
        assert!(r.read_bool().unwrap());
        assert_eq!(r.read_u16_raw().unwrap(), 0xBEEF);
        assert_eq!(r.read_u32_raw().unwrap(), 123456789);
        assert_eq!(r.read_i64_raw().unwrap(), i64::MIN);
        assert_eq!(r.read_f32().unwrap(), 3.5);
        assert_eq!(r.read_f64().unwrap(), -1.25e300);
        assert_eq!(r.read_utf().unwrap(), "stack.frame");
        assert_eq!(r.read_compact_utf().unwrap(), None);
        assert_eq!(r.read_compact_utf().unwrap(), Some(""));
        assert_eq!(r.read_compact_utf().unwrap(), Some("thread"));
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn sub_width_fields_mask_not_sign_extend() {
        // A 16-bit field written from -1 decodes to 65535, never back to -1.
        let mut w = Writer::new();
        w.write_u16(-1i16 as u16);
        let mut r = Reader::new(w.as_bytes());
        assert_eq!(r.read_u16().unwrap(), 65535);

        r.seek(0);
        assert_eq!(r.read_i64().unwrap(), 65535);
    }

    #[test]
    fn reserved_sentinel_rejected() {
        let mut r = Reader::new(&[2]);
        assert_eq!(
            r.read_compact_utf(),
            Err(Error::InvalidSentinel {
                offset: 0,
                value: 2
            })
        );
        let mut r = Reader::new(&[0x90]);
        assert_eq!(
            r.read_compact_utf(),
            Err(Error::InvalidSentinel {
                offset: 0,
                value: 0x90
            })
        );
    }

    #[test]
    fn invalid_utf8_rejected() {
        // Length 2, then an orphaned continuation byte pair.
        let mut r = Reader::new(&[2, 0x80, 0x80]);
        assert_eq!(r.read_utf(), Err(Error::InvalidUtf8 { offset: 1 }));
    }

    #[test]
    fn declared_length_past_end() {
        let mut r = Reader::new(&[5, b'a', b'b']);
        assert_eq!(
            r.read_utf(),
            Err(Error::TruncatedSource {
                offset: 1,
                needed: 5,
                remaining: 2
            })
        );
    }

    #[test]
    fn negative_declared_length() {
        // Packed -1 where a string length belongs. The varint itself is well
        // formed; the error has to say the length was negative.
        let mut r = Reader::new(&[0x7F, b'a']);
        let err = r.read_utf().unwrap_err();
        assert_eq!(err, Error::NegativeLength { offset: 0 });
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn zero_length_read_after_seek_past_end() {
        let mut r = Reader::new(&[1, 2, 3]);
        r.seek(10);
        assert_eq!(r.read_bytes(0).unwrap(), &[] as &[u8]);
        assert_eq!(r.remaining(), 0);
        // Non-empty reads out there still report truncation rather than panic.
        assert_eq!(
            r.read_u8(),
            Err(Error::TruncatedSource {
                offset: 10,
                needed: 1,
                remaining: 0
            })
        );
        // And the reader is still good after seeking back in range.
        r.seek(1);
        assert_eq!(r.read_u8().unwrap(), 2);
    }

    #[test]
    fn fixed_width_truncation() {
        let mut r = Reader::new(&[0x00, 0x01]);
        assert_eq!(
            r.read_u32_raw(),
            Err(Error::TruncatedSource {
                offset: 0,
                needed: 4,
                remaining: 2
            })
        );
        // The failed read must not have consumed anything.
        assert_eq!(r.position(), 0);
        assert_eq!(r.read_u16_raw().unwrap(), 1);
    }

    #[test]
    fn bool_nonzero_is_true() {
        let mut r = Reader::new(&[0, 1, 7]);
        assert!(!r.read_bool().unwrap());
        assert!(r.read_bool().unwrap());
        assert!(r.read_bool().unwrap());
    }

    #[test]
    fn random_string_round_trips() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let len = rng.gen_range(0..300);
            let s: String = (0..len).map(|_| rng.gen::<char>()).collect();

            let mut w = Writer::new();
            w.write_utf(&s).write_compact_utf(Some(&s));
            let mut r = Reader::new(w.as_bytes());
            assert_eq!(r.read_utf().unwrap(), s);
            if s.is_empty() {
                assert_eq!(r.read_compact_utf().unwrap(), Some(""));
            } else {
                assert_eq!(r.read_compact_utf().unwrap(), Some(s.as_str()));
            }
        }
    }
}
