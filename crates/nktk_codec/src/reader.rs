//! Cursor over a packed byte stream.

use crate::error::{CodecError, CodecResult};
use crate::quantize::GridPoint;
use crate::varint::unpack_number;

/// Sequential reader for packed numbers and length-prefixed text.
///
/// A failed read leaves the position where it was.
#[derive(Debug, Clone)]
pub struct PackedReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PackedReader<'a> {
    /// Create a new reader for the given bytes.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset into the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Check if all bytes have been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Get remaining bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos.min(self.data.len())..]
    }

    /// Read one packed number.
    pub fn read_number(&mut self) -> CodecResult<i64> {
        let (value, len) = unpack_number(self.data, self.pos)?;
        self.pos += len;
        Ok(value)
    }

    /// Read a count prefix. Negative counts are rejected.
    pub fn read_count(&mut self) -> CodecResult<u64> {
        let start = self.pos;
        let count = self.read_number()?;
        u64::try_from(count).map_err(|_| {
            self.pos = start;
            CodecError::invalid_length(count)
        })
    }

    /// Read a 0/1 flag. Any non-zero value reads as `true`.
    pub fn read_flag(&mut self) -> CodecResult<bool> {
        self.read_number().map(|n| n != 0)
    }

    /// Read a `(lng, lat)` pair of grid numbers.
    pub fn read_grid_point(&mut self) -> CodecResult<GridPoint> {
        let start = self.pos;
        let x = self.read_number()?;
        match self.read_number() {
            Ok(y) => Ok(GridPoint::new(x, y)),
            Err(err) => {
                self.pos = start;
                Err(err)
            }
        }
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_text(&mut self) -> CodecResult<String> {
        let start = self.pos;
        let len = self.read_count()?;
        let text = usize::try_from(len)
            .map_err(|_| CodecError::Incomplete)
            .and_then(|len| self.read_bytes(len))
            .and_then(|bytes| std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8));
        match text {
            Ok(text) => Ok(text.to_owned()),
            Err(err) => {
                self.pos = start;
                Err(err)
            }
        }
    }

    #[inline]
    fn read_bytes(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or(CodecError::Incomplete)?;
        let bytes = self.data.get(self.pos..end).ok_or(CodecError::Incomplete)?;
        self.pos = end;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::varint::pack_number;

    fn packed(values: &[i64]) -> Vec<u8> {
        let mut out = Vec::new();
        for &value in values {
            pack_number(value, &mut out).unwrap();
        }
        out
    }

    #[test]
    fn reads_numbers_in_sequence() {
        let bytes = packed(&[1, -200, 300_000]);
        let mut reader = PackedReader::new(&bytes);
        assert_eq!(reader.read_number().unwrap(), 1);
        assert_eq!(reader.read_number().unwrap(), -200);
        assert_eq!(reader.read_number().unwrap(), 300_000);
        assert!(reader.is_empty());
        assert_eq!(reader.read_number(), Err(CodecError::Incomplete));
    }

    #[test]
    fn reads_text() {
        let mut bytes = packed(&[3]);
        bytes.extend_from_slice("Öl".as_bytes());
        bytes.extend(packed(&[0]));
        let mut reader = PackedReader::new(&bytes);
        assert_eq!(reader.read_text().unwrap(), "Öl");
        assert_eq!(reader.read_text().unwrap(), "");
        assert!(reader.is_empty());
    }

    #[test]
    fn short_text_is_incomplete_and_rewinds() {
        let mut bytes = packed(&[10]);
        bytes.extend_from_slice(b"abc");
        let mut reader = PackedReader::new(&bytes);
        assert_eq!(reader.read_text(), Err(CodecError::Incomplete));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn invalid_utf8_text() {
        let mut bytes = packed(&[2]);
        bytes.extend_from_slice(&[0xff, 0xfe]);
        let mut reader = PackedReader::new(&bytes);
        assert_eq!(reader.read_text(), Err(CodecError::InvalidUtf8));
    }

    #[test]
    fn negative_count_rejected() {
        let bytes = packed(&[-1]);
        let mut reader = PackedReader::new(&bytes);
        assert_eq!(reader.read_count(), Err(CodecError::invalid_length(-1)));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn grid_point_reads_lng_first() {
        let bytes = packed(&[7, -9]);
        let mut reader = PackedReader::new(&bytes);
        assert_eq!(reader.read_grid_point().unwrap(), GridPoint::new(7, -9));
    }

    #[test]
    fn half_grid_point_rewinds() {
        let bytes = packed(&[7]);
        let mut reader = PackedReader::new(&bytes);
        assert_eq!(reader.read_grid_point(), Err(CodecError::Incomplete));
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.remaining(), &bytes[..]);
    }

    #[test]
    fn flags() {
        let bytes = packed(&[0, 1, 2]);
        let mut reader = PackedReader::new(&bytes);
        assert!(!reader.read_flag().unwrap());
        assert!(reader.read_flag().unwrap());
        assert!(reader.read_flag().unwrap());
    }
}
