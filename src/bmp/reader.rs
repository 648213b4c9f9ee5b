//! Forward-only little-endian cursor over the input bytes.

use crate::error::BmpError;

pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes consumed so far.
    pub(crate) fn consumed(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn truncated(&self, needed: usize) -> BmpError {
        BmpError::TruncatedStream {
            offset: self.pos,
            needed,
            available: self.remaining(),
        }
    }

    /// Borrow the next `n` bytes. The cursor does not move on failure.
    pub(crate) fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], BmpError> {
        if n > self.remaining() {
            return Err(self.truncated(n));
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_bytes(N)?);
        Ok(buf)
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<(), BmpError> {
        self.read_bytes(n).map(|_| ())
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, BmpError> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    pub(crate) fn read_u16_le(&mut self) -> Result<u16, BmpError> {
        self.read_array().map(u16::from_le_bytes)
    }

    pub(crate) fn read_u32_le(&mut self) -> Result<u32, BmpError> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub(crate) fn read_i32_le(&mut self) -> Result<i32, BmpError> {
        self.read_array().map(i32::from_le_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian() {
        let data = [0x42, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xff, 0xff, 0xff, 0xff];
        let mut r = ByteReader::new(&data);
        assert_eq!(r.read_u8().unwrap(), 0x42);
        assert_eq!(r.read_u16_le().unwrap(), 0x1234);
        assert_eq!(r.read_u32_le().unwrap(), 0x1234_5678);
        assert_eq!(r.read_i32_le().unwrap(), -1);
        assert_eq!(r.consumed(), data.len());
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn short_read_reports_position_and_keeps_cursor() {
        let data = [1, 2, 3];
        let mut r = ByteReader::new(&data);
        r.skip(1).unwrap();
        match r.read_u32_le() {
            Err(BmpError::TruncatedStream {
                offset: 1,
                needed: 4,
                available: 2,
            }) => {}
            other => panic!("expected TruncatedStream, got {other:?}"),
        }
        assert_eq!(r.consumed(), 1);
        assert_eq!(r.read_bytes(2).unwrap(), &[2, 3]);
        assert!(r.skip(1).is_err());
    }

    #[test]
    fn zero_length_reads_succeed_at_end() {
        let mut r = ByteReader::new(&[]);
        assert_eq!(r.read_bytes(0).unwrap(), &[] as &[u8]);
        r.skip(0).unwrap();
        assert!(r.read_u8().is_err());
    }
}
