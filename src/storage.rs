/// Byte sink backing a [`Writer`](crate::Writer).
///
/// The codec never owns storage growth policy; it only asks for bytes to be
/// placed at explicit offsets. Writing at or past the current end must extend
/// the sink (any gap zero-filled). Both `put` forms return the offset
/// immediately after the written bytes so positional writes chain naturally.
pub trait Storage {
    fn put_u8(&mut self, offset: usize, value: u8) -> usize;

    fn put_slice(&mut self, offset: usize, data: &[u8]) -> usize;

    /// View of everything written so far.
    fn as_bytes(&self) -> &[u8];

    /// Number of bytes the sink currently holds.
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for Vec<u8> {
    fn put_u8(&mut self, offset: usize, value: u8) -> usize {
        if offset < self.len() {
            self[offset] = value;
        } else {
            self.resize(offset, 0);
            self.push(value);
        }
        offset + 1
    }

    fn put_slice(&mut self, offset: usize, data: &[u8]) -> usize {
        let end = offset + data.len();
        if end > self.len() {
            self.resize(end, 0);
        }
        self[offset..end].copy_from_slice(data);
        end
    }

    fn as_bytes(&self) -> &[u8] {
        self
    }
}
