//! Bit-level access.
//!
//! Bits are numbered from the most significant bit of each byte: bit `i` lives in byte `i / 8` at
//! mask `0x80 >> (i % 8)`. Multi-bit fields are also most-significant-bit first, so the first bit
//! of a field (the lowest bit offset) is the most significant bit of its value.

use crate::buffer::{Access, Buffer, BufferError, Result};

#[inline(always)]
fn mask(bit: usize) -> u8 {
    0x80 >> (bit % 8)
}

fn field_width(n: u32) -> Result<usize> {
    if n > u64::BITS {
        return Err(BufferError::InvalidCount);
    }
    Ok(n as usize)
}

impl Buffer {
    #[inline(always)]
    fn bit_at(&self, bit: usize) -> u8 {
        (self.data[bit / 8] & mask(bit) != 0) as u8
    }

    #[inline(always)]
    fn put_bit(&mut self, bit: usize, value: bool) {
        if value {
            self.data[bit / 8] |= mask(bit);
        } else {
            self.data[bit / 8] &= !mask(bit);
        }
    }

    /// Reads the bit at `offset`. Returns 0 or 1.
    #[inline(always)]
    pub fn read_bit(&self, offset: i64) -> Result<u8> {
        let span = self.bit_span(offset, 1, Access::Read)?;
        Ok(self.bit_at(span.start))
    }

    /// Reads the bit under the bit cursor and advances the cursor by 1.
    pub fn read_bit_next(&mut self) -> Result<u8> {
        let value = self.read_bit(self.bit_offset)?;
        self.bit_offset += 1;
        Ok(value)
    }

    /// Reads an `n`-bit field starting at `offset`, where `n` is at most 64.
    ///
    /// The first bit read becomes the most significant bit of the result. A zero-width read
    /// returns 0.
    pub fn read_bits(&self, offset: i64, n: u32) -> Result<u64> {
        let span = self.bit_span(offset, field_width(n)?, Access::Read)?;
        Ok(span.fold(0, |value, bit| (value << 1) | u64::from(self.bit_at(bit))))
    }

    /// Reads an `n`-bit field at the bit cursor and advances the cursor by `n`.
    pub fn read_bits_next(&mut self, n: u32) -> Result<u64> {
        let value = self.read_bits(self.bit_offset, n)?;
        self.bit_offset += i64::from(n);
        Ok(value)
    }

    /// Sets the bit at `offset` to 1.
    pub fn set_bit(&mut self, offset: i64) -> Result<()> {
        let span = self.bit_span(offset, 1, Access::Write)?;
        self.put_bit(span.start, true);
        Ok(())
    }

    /// Sets the bit under the bit cursor to 1 and advances the cursor by 1.
    pub fn set_bit_next(&mut self) -> Result<()> {
        self.set_bit(self.bit_offset)?;
        self.bit_offset += 1;
        Ok(())
    }

    /// Clears the bit at `offset` to 0.
    pub fn clear_bit(&mut self, offset: i64) -> Result<()> {
        let span = self.bit_span(offset, 1, Access::Write)?;
        self.put_bit(span.start, false);
        Ok(())
    }

    /// Clears the bit under the bit cursor and advances the cursor by 1.
    pub fn clear_bit_next(&mut self) -> Result<()> {
        self.clear_bit(self.bit_offset)?;
        self.bit_offset += 1;
        Ok(())
    }

    /// Inverts the bit at `offset`.
    pub fn flip_bit(&mut self, offset: i64) -> Result<()> {
        let span = self.bit_span(offset, 1, Access::Write)?;
        self.data[span.start / 8] ^= mask(span.start);
        Ok(())
    }

    /// Inverts the bit under the bit cursor and advances the cursor by 1.
    pub fn flip_bit_next(&mut self) -> Result<()> {
        self.flip_bit(self.bit_offset)?;
        self.bit_offset += 1;
        Ok(())
    }

    /// Stores the low `n` bits of `value` in the `n` bits starting at `offset`, where `n` is at
    /// most 64. The most significant of those bits goes to `offset`. Higher bits of `value` are
    /// ignored.
    pub fn set_bits(&mut self, offset: i64, value: u64, n: u32) -> Result<()> {
        let span = self.bit_span(offset, field_width(n)?, Access::Write)?;
        for (i, bit) in span.enumerate() {
            let shift = n - 1 - i as u32;
            self.put_bit(bit, (value >> shift) & 1 != 0);
        }
        Ok(())
    }

    /// Stores the low `n` bits of `value` at the bit cursor and advances the cursor by `n`.
    pub fn set_bits_next(&mut self, value: u64, n: u32) -> Result<()> {
        self.set_bits(self.bit_offset, value, n)?;
        self.bit_offset += i64::from(n);
        Ok(())
    }

    /// Sets every byte to `0x00`.
    pub fn clear_all_bits(&mut self) {
        self.data.fill(0x00);
    }

    /// Sets every byte to `0xff`.
    pub fn set_all_bits(&mut self) {
        self.data.fill(0xff);
    }

    /// Inverts every bit.
    pub fn flip_all_bits(&mut self) {
        for b in self.data.iter_mut() {
            *b = !*b;
        }
    }
}
