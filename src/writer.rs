use core::mem::size_of;

use zerocopy::byteorder::{BE, LE, U16, U32, U64};
use zerocopy::IntoBytes;

use crate::buffer::{Access, Buffer, Result, Word};

/// Byte-oriented writes.
///
/// Writes overwrite bytes in place and never grow the buffer. Multi-byte integer writes store the
/// values of the slice in order, the first value at the lowest offset.
impl Buffer {
    /// Writes one byte at `offset`.
    #[inline(always)]
    pub fn write_byte(&mut self, offset: i64, value: u8) -> Result<()> {
        let range = self.byte_span(offset, 1, Access::Write)?;
        self.data[range.start] = value;
        Ok(())
    }

    /// Writes one byte at the byte cursor and advances the cursor by 1.
    #[inline(always)]
    pub fn write_byte_next(&mut self, value: u8) -> Result<()> {
        self.write_byte(self.byte_offset, value)?;
        self.advance_byte(1);
        Ok(())
    }

    /// Writes `bytes` starting at `offset`.
    pub fn write_bytes(&mut self, offset: i64, bytes: &[u8]) -> Result<()> {
        let range = self.byte_span(offset, bytes.len(), Access::Write)?;
        self.data[range].copy_from_slice(bytes);
        Ok(())
    }

    /// Writes `bytes` at the byte cursor and advances the cursor past them.
    pub fn write_bytes_next(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_bytes(self.byte_offset, bytes)?;
        self.advance_byte(bytes.len());
        Ok(())
    }

    fn write_words<W: Word>(&mut self, offset: i64, values: &[W::Native]) -> Result<()> {
        let width = size_of::<W>();
        let range = self.byte_span(offset, values.len().saturating_mul(width), Access::Write)?;
        for (chunk, &value) in self.data[range].chunks_exact_mut(width).zip(values) {
            chunk.copy_from_slice(W::from_native(value).as_bytes());
        }
        Ok(())
    }

    fn write_words_next<W: Word>(&mut self, values: &[W::Native]) -> Result<()> {
        self.write_words::<W>(self.byte_offset, values)?;
        self.advance_byte(values.len() * size_of::<W>());
        Ok(())
    }

    /// Writes `values` as `u16` in little-endian byte order, starting at `offset`.
    pub fn write_u16_le(&mut self, offset: i64, values: &[u16]) -> Result<()> {
        self.write_words::<U16<LE>>(offset, values)
    }

    /// Writes `values` as `u16` in little-endian byte order at the byte cursor.
    pub fn write_u16_le_next(&mut self, values: &[u16]) -> Result<()> {
        self.write_words_next::<U16<LE>>(values)
    }

    /// Writes `values` as `u16` in big-endian byte order, starting at `offset`.
    pub fn write_u16_be(&mut self, offset: i64, values: &[u16]) -> Result<()> {
        self.write_words::<U16<BE>>(offset, values)
    }

    /// Writes `values` as `u16` in big-endian byte order at the byte cursor.
    pub fn write_u16_be_next(&mut self, values: &[u16]) -> Result<()> {
        self.write_words_next::<U16<BE>>(values)
    }

    /// Writes `values` as `u32` in little-endian byte order, starting at `offset`.
    pub fn write_u32_le(&mut self, offset: i64, values: &[u32]) -> Result<()> {
        self.write_words::<U32<LE>>(offset, values)
    }

    /// Writes `values` as `u32` in little-endian byte order at the byte cursor.
    pub fn write_u32_le_next(&mut self, values: &[u32]) -> Result<()> {
        self.write_words_next::<U32<LE>>(values)
    }

    /// Writes `values` as `u32` in big-endian byte order, starting at `offset`.
    pub fn write_u32_be(&mut self, offset: i64, values: &[u32]) -> Result<()> {
        self.write_words::<U32<BE>>(offset, values)
    }

    /// Writes `values` as `u32` in big-endian byte order at the byte cursor.
    pub fn write_u32_be_next(&mut self, values: &[u32]) -> Result<()> {
        self.write_words_next::<U32<BE>>(values)
    }

    /// Writes `values` as `u64` in little-endian byte order, starting at `offset`.
    pub fn write_u64_le(&mut self, offset: i64, values: &[u64]) -> Result<()> {
        self.write_words::<U64<LE>>(offset, values)
    }

    /// Writes `values` as `u64` in little-endian byte order at the byte cursor.
    pub fn write_u64_le_next(&mut self, values: &[u64]) -> Result<()> {
        self.write_words_next::<U64<LE>>(values)
    }

    /// Writes `values` as `u64` in big-endian byte order, starting at `offset`.
    pub fn write_u64_be(&mut self, offset: i64, values: &[u64]) -> Result<()> {
        self.write_words::<U64<BE>>(offset, values)
    }

    /// Writes `values` as `u64` in big-endian byte order at the byte cursor.
    pub fn write_u64_be_next(&mut self, values: &[u64]) -> Result<()> {
        self.write_words_next::<U64<BE>>(values)
    }
}
