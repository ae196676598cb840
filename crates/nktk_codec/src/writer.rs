//! Packed byte stream writer.

use crate::error::{CodecError, CodecResult};
use crate::quantize::GridPoint;
use crate::varint::pack_number;

/// Builds a packed byte stream field by field.
#[derive(Debug, Clone)]
pub struct PackedWriter {
    buffer: Vec<u8>,
}

impl PackedWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Create a new writer with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Append one packed number.
    pub fn write_number(&mut self, value: i64) -> CodecResult<()> {
        pack_number(value, &mut self.buffer).map(|_| ())
    }

    /// Append a count prefix.
    pub fn write_count(&mut self, count: usize) -> CodecResult<()> {
        let count = i64::try_from(count).map_err(|_| CodecError::out_of_range(i64::MAX))?;
        self.write_number(count)
    }

    /// Append a 0/1 flag.
    pub fn write_flag(&mut self, flag: bool) -> CodecResult<()> {
        self.write_number(i64::from(flag))
    }

    /// Append a `(lng, lat)` pair of grid numbers.
    pub fn write_grid_point(&mut self, point: GridPoint) -> CodecResult<()> {
        self.write_number(point.x)?;
        self.write_number(point.y)
    }

    /// Append a length-prefixed UTF-8 string.
    pub fn write_text(&mut self, text: &str) -> CodecResult<()> {
        self.write_count(text.len())?;
        self.buffer.extend_from_slice(text.as_bytes());
        Ok(())
    }

    /// Consume this writer and return the packed bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Get a reference to the packed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}

impl Default for PackedWriter {
    fn default() -> Self {
        Self::new()
    }
}
