use core::mem::size_of;

use zerocopy::byteorder::{BE, LE, U16, U32, U64};
use zerocopy::FromBytes;

extern crate alloc;
use alloc::vec::Vec;

use crate::buffer::{Access, Buffer, BufferError, Result, Word};

/// Byte-oriented reads.
///
/// Multi-byte integers are read as a run of `count` consecutive values. The first value comes from
/// the lowest offset; the byte order only applies within each value. All of these functions copy
/// the data out of the buffer.
impl Buffer {
    /// Reads the byte at `offset`.
    #[inline(always)]
    pub fn read_byte(&self, offset: i64) -> Result<u8> {
        let range = self.byte_span(offset, 1, Access::Read)?;
        Ok(self.data[range.start])
    }

    /// Reads the byte under the byte cursor and advances the cursor by 1.
    #[inline(always)]
    pub fn read_byte_next(&mut self) -> Result<u8> {
        let value = self.read_byte(self.byte_offset)?;
        self.advance_byte(1);
        Ok(value)
    }

    /// Reads `len` bytes starting at `offset`.
    pub fn read_bytes(&self, offset: i64, len: usize) -> Result<Vec<u8>> {
        let range = self.byte_span(offset, len, Access::Read)?;
        Ok(self.data[range].to_vec())
    }

    /// Reads `len` bytes at the byte cursor and advances the cursor by `len`.
    pub fn read_bytes_next(&mut self, len: usize) -> Result<Vec<u8>> {
        let value = self.read_bytes(self.byte_offset, len)?;
        self.advance_byte(len);
        Ok(value)
    }

    fn read_words<W: Word>(&self, offset: i64, count: usize) -> Result<Vec<W::Native>> {
        let range = self.byte_span(offset, count.saturating_mul(size_of::<W>()), Access::Read)?;
        // The span is an exact multiple of an unaligned type, so this cannot fail.
        let Ok(words) = <[W]>::ref_from_bytes(&self.data[range]) else {
            return Err(BufferError::Overread);
        };
        Ok(words.iter().map(|w| w.to_native()).collect())
    }

    fn read_words_next<W: Word>(&mut self, count: usize) -> Result<Vec<W::Native>> {
        let values = self.read_words::<W>(self.byte_offset, count)?;
        self.advance_byte(count * size_of::<W>());
        Ok(values)
    }

    /// Reads `count` `u16` values in little-endian byte order, starting at `offset`.
    pub fn read_u16_le(&self, offset: i64, count: usize) -> Result<Vec<u16>> {
        self.read_words::<U16<LE>>(offset, count)
    }

    /// Reads `count` `u16` values in little-endian byte order at the byte cursor.
    pub fn read_u16_le_next(&mut self, count: usize) -> Result<Vec<u16>> {
        self.read_words_next::<U16<LE>>(count)
    }

    /// Reads `count` `u16` values in big-endian byte order, starting at `offset`.
    pub fn read_u16_be(&self, offset: i64, count: usize) -> Result<Vec<u16>> {
        self.read_words::<U16<BE>>(offset, count)
    }

    /// Reads `count` `u16` values in big-endian byte order at the byte cursor.
    pub fn read_u16_be_next(&mut self, count: usize) -> Result<Vec<u16>> {
        self.read_words_next::<U16<BE>>(count)
    }

    /// Reads `count` `u32` values in little-endian byte order, starting at `offset`.
    pub fn read_u32_le(&self, offset: i64, count: usize) -> Result<Vec<u32>> {
        self.read_words::<U32<LE>>(offset, count)
    }

    /// Reads `count` `u32` values in little-endian byte order at the byte cursor.
    pub fn read_u32_le_next(&mut self, count: usize) -> Result<Vec<u32>> {
        self.read_words_next::<U32<LE>>(count)
    }

    /// Reads `count` `u32` values in big-endian byte order, starting at `offset`.
    pub fn read_u32_be(&self, offset: i64, count: usize) -> Result<Vec<u32>> {
        self.read_words::<U32<BE>>(offset, count)
    }

    /// Reads `count` `u32` values in big-endian byte order at the byte cursor.
    pub fn read_u32_be_next(&mut self, count: usize) -> Result<Vec<u32>> {
        self.read_words_next::<U32<BE>>(count)
    }

    /// Reads `count` `u64` values in little-endian byte order, starting at `offset`.
    pub fn read_u64_le(&self, offset: i64, count: usize) -> Result<Vec<u64>> {
        self.read_words::<U64<LE>>(offset, count)
    }

    /// Reads `count` `u64` values in little-endian byte order at the byte cursor.
    pub fn read_u64_le_next(&mut self, count: usize) -> Result<Vec<u64>> {
        self.read_words_next::<U64<LE>>(count)
    }

    /// Reads `count` `u64` values in big-endian byte order, starting at `offset`.
    pub fn read_u64_be(&self, offset: i64, count: usize) -> Result<Vec<u64>> {
        self.read_words::<U64<BE>>(offset, count)
    }

    /// Reads `count` `u64` values in big-endian byte order at the byte cursor.
    pub fn read_u64_be_next(&mut self, count: usize) -> Result<Vec<u64>> {
        self.read_words_next::<U64<BE>>(count)
    }
}
