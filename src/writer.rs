use crate::packed;
use crate::storage::Storage;
use crate::{COMPACT_EMPTY, COMPACT_NULL, COMPACT_STRING};

/// Position-tracking encoder over a [`Storage`] sink.
///
/// Every encoding comes in two forms. The positional `put_*` form writes at
/// an explicit offset and returns the offset just past the written bytes,
/// leaving the cursor alone; it is the single source of truth for each
/// encoding. The sequential `write_*` form writes at the cursor, advances it,
/// and returns `&mut Self` so calls chain:
///
/// ```
/// use trace_pack::Writer;
///
/// let mut w = Writer::new();
/// w.write_i64(300).write_bool(true).write_utf("jvm");
/// assert_eq!(w.as_bytes(), &[0xAC, 0x02, 1, 3, b'j', b'v', b'm']);
/// ```
///
/// Packed widths vary with the value, so a field that will be patched later
/// must be written through one of the raw fixed-width forms and overwritten
/// with the matching `put_*_raw` at the recorded offset.
#[derive(Clone, Debug)]
pub struct Writer<S: Storage = Vec<u8>> {
    storage: S,
    pos: usize,
}

impl Writer<Vec<u8>> {
    pub fn new() -> Self {
        Self::with_storage(Vec::new())
    }
}

impl Default for Writer<Vec<u8>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Storage> Writer<S> {
    /// Wrap an existing sink. The cursor starts at 0; writes overwrite
    /// whatever the sink already holds there.
    pub fn with_storage(storage: S) -> Self {
        Writer { storage, pos: 0 }
    }

    /// Current cursor position, equal to the number of bytes written
    /// sequentially so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Rewind the cursor to 0 without releasing the sink's memory.
    pub fn reset(&mut self) {
        self.pos = 0;
    }

    /// Total serialized size of the stream once its self-describing packed
    /// length trailer is appended: the fixed point of
    /// `total = position + packed width of total`.
    pub fn length(&self) -> usize {
        packed::total_length(self.pos)
    }

    /// The bytes written sequentially so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage.as_bytes()[..self.pos]
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    // Positional forms. Each returns the offset just past the written bytes
    // and never touches the cursor.

    /// Packed signed 64-bit integer, 1 to 9 bytes.
    pub fn put_i64(&mut self, offset: usize, value: i64) -> usize {
        packed::encode_into(&mut self.storage, offset, value)
    }

    /// Packed 32-bit field. The bit pattern is zero-extended before packing,
    /// so a negative `i32` cast in reads back as its unsigned masked value.
    pub fn put_u32(&mut self, offset: usize, value: u32) -> usize {
        self.put_i64(offset, value as i64)
    }

    /// Packed 16-bit field (shorts and UTF-16 code units). Masked, like
    /// [`put_u32`](Self::put_u32).
    pub fn put_u16(&mut self, offset: usize, value: u16) -> usize {
        self.put_i64(offset, value as i64)
    }

    pub fn put_u8(&mut self, offset: usize, value: u8) -> usize {
        self.storage.put_u8(offset, value)
    }

    /// One byte, 1 for true and 0 for false.
    pub fn put_bool(&mut self, offset: usize, value: bool) -> usize {
        self.storage.put_u8(offset, value as u8)
    }

    pub fn put_slice(&mut self, offset: usize, data: &[u8]) -> usize {
        self.storage.put_slice(offset, data)
    }

    /// Raw big-endian 16-bit field, always 2 bytes.
    pub fn put_u16_raw(&mut self, offset: usize, value: u16) -> usize {
        self.storage.put_slice(offset, &value.to_be_bytes())
    }

    /// Raw big-endian 32-bit field, always 4 bytes.
    pub fn put_u32_raw(&mut self, offset: usize, value: u32) -> usize {
        self.storage.put_slice(offset, &value.to_be_bytes())
    }

    /// Raw big-endian 64-bit field, always 8 bytes.
    pub fn put_i64_raw(&mut self, offset: usize, value: i64) -> usize {
        self.storage.put_slice(offset, &value.to_be_bytes())
    }

    /// IEEE-754 bit pattern, big-endian, 4 bytes. Floats are never packed.
    pub fn put_f32(&mut self, offset: usize, value: f32) -> usize {
        self.storage.put_slice(offset, &value.to_be_bytes())
    }

    /// IEEE-754 bit pattern, big-endian, 8 bytes.
    pub fn put_f64(&mut self, offset: usize, value: f64) -> usize {
        self.storage.put_slice(offset, &value.to_be_bytes())
    }

    /// Packed byte length followed by raw UTF-8. The empty string writes a
    /// lone zero length; this form has no way to express "no string" — use
    /// [`put_compact_utf`](Self::put_compact_utf) when that distinction
    /// matters.
    pub fn put_utf(&mut self, offset: usize, value: &str) -> usize {
        let bytes = value.as_bytes();
        let offset = self.put_i64(offset, bytes.len() as i64);
        if bytes.is_empty() {
            offset
        } else {
            self.storage.put_slice(offset, bytes)
        }
    }

    /// Sentinel-prefixed string: `None` is a lone 0 byte, `Some("")` a lone
    /// 1, anything else a 3 followed by packed length and raw UTF-8.
    /// Sentinel 2 is reserved and never written.
    pub fn put_compact_utf(&mut self, offset: usize, value: Option<&str>) -> usize {
        match value {
            None => self.storage.put_u8(offset, COMPACT_NULL),
            Some("") => self.storage.put_u8(offset, COMPACT_EMPTY),
            Some(s) => {
                let offset = self.storage.put_u8(offset, COMPACT_STRING);
                let offset = self.put_i64(offset, s.len() as i64);
                self.storage.put_slice(offset, s.as_bytes())
            }
        }
    }

    // Sequential forms: thin cursor wrappers over the positional forms.

    pub fn write_i64(&mut self, value: i64) -> &mut Self {
        self.pos = self.put_i64(self.pos, value);
        self
    }

    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.pos = self.put_u32(self.pos, value);
        self
    }

    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        self.pos = self.put_u16(self.pos, value);
        self
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.pos = self.put_u8(self.pos, value);
        self
    }

    pub fn write_bool(&mut self, value: bool) -> &mut Self {
        self.pos = self.put_bool(self.pos, value);
        self
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.pos = self.put_slice(self.pos, data);
        self
    }

    pub fn write_u16_raw(&mut self, value: u16) -> &mut Self {
        self.pos = self.put_u16_raw(self.pos, value);
        self
    }

    pub fn write_u32_raw(&mut self, value: u32) -> &mut Self {
        self.pos = self.put_u32_raw(self.pos, value);
        self
    }

    pub fn write_i64_raw(&mut self, value: i64) -> &mut Self {
        self.pos = self.put_i64_raw(self.pos, value);
        self
    }

    pub fn write_f32(&mut self, value: f32) -> &mut Self {
        self.pos = self.put_f32(self.pos, value);
        self
    }

    pub fn write_f64(&mut self, value: f64) -> &mut Self {
        self.pos = self.put_f64(self.pos, value);
        self
    }

    pub fn write_utf(&mut self, value: &str) -> &mut Self {
        self.pos = self.put_utf(self.pos, value);
        self
    }

    pub fn write_compact_utf(&mut self, value: Option<&str>) -> &mut Self {
        self.pos = self.put_compact_utf(self.pos, value);
        self
    }
}
