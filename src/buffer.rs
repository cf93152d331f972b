use core::fmt;
use core::ops::Range;

use zerocopy::byteorder::{ByteOrder, U16, U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

extern crate alloc;
use alloc::vec::Vec;

/// Result type for fallible `Buffer` operations.
pub type Result<T> = core::result::Result<T, BufferError>;

/// A growable byte buffer with two independent cursors: one counted in bytes and one counted in
/// bits. Both cursors address the same backing store.
///
/// Every read or write exists in two forms. The explicit form takes an offset and leaves the
/// cursors alone. The `_next` form operates at the current cursor and, if it succeeds, advances
/// the cursor past the bytes or bits that it touched.
///
/// All accesses are bounds-checked against the capacity fields. An access that does not fit fails
/// with a [`BufferError`] and leaves the buffer unchanged; the buffer never grows on its own. Call
/// [`Buffer::grow`] first if you need more room.
///
/// Seeking is never validated. A cursor may point anywhere, including before the start of the
/// buffer, and the problem is reported by the next access that uses it.
pub struct Buffer {
    pub(crate) data: Vec<u8>,
    pub(crate) byte_offset: i64,
    pub(crate) byte_capacity: i64,
    pub(crate) bit_offset: i64,
    pub(crate) bit_capacity: i64,
}

impl Buffer {
    /// Creates an empty buffer. Both capacities are zero.
    pub fn new() -> Self {
        Self::from(Vec::new())
    }

    /// Creates a buffer by concatenating `chunks` in order.
    pub fn from_chunks<I>(chunks: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut data = Vec::new();
        for chunk in chunks {
            data.extend_from_slice(chunk.as_ref());
        }
        Self::from(data)
    }

    /// The backing bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Gives direct access to the backing store.
    ///
    /// The capacity fields are cached. If you change the length of the returned `Vec`, call
    /// [`Buffer::refresh`] before using the buffer again. Until then, accesses are checked against
    /// the stale capacities (and against the real length, so nothing can index out of range).
    pub fn bytes_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }

    /// Extracts the backing store.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Number of bytes in the buffer.
    #[inline(always)]
    pub fn byte_capacity(&self) -> i64 {
        self.byte_capacity
    }

    /// Number of addressable bits in the buffer. Always `byte_capacity() * 8`.
    #[inline(always)]
    pub fn bit_capacity(&self) -> i64 {
        self.bit_capacity
    }

    /// Current position of the byte cursor.
    #[inline(always)]
    pub fn byte_offset(&self) -> i64 {
        self.byte_offset
    }

    /// Current position of the bit cursor.
    #[inline(always)]
    pub fn bit_offset(&self) -> i64 {
        self.bit_offset
    }

    /// Recomputes both capacities from the length of the backing store.
    pub fn refresh(&mut self) {
        let len = self.data.len() as i64;
        self.byte_capacity = len;
        self.bit_capacity = len * 8;
        log::trace!("refreshed buffer capacity to {len} bytes");
    }

    /// Discards all content. Both capacities become zero.
    ///
    /// The cursors are not touched. Seek before using them again.
    pub fn reset(&mut self) {
        self.data.clear();
        self.refresh();
    }

    /// Appends `n` zero bytes.
    pub fn grow(&mut self, n: i64) -> Result<()> {
        let n = usize::try_from(n).map_err(|_| BufferError::InvalidCount)?;
        let new_len = self
            .data
            .len()
            .checked_add(n)
            .ok_or(BufferError::InvalidCount)?;
        self.data.resize(new_len, 0);
        log::trace!("grew buffer by {n} bytes");
        self.refresh();
        Ok(())
    }

    /// Removes `n` bytes from the start of the buffer.
    ///
    /// The remaining bytes move down to offset 0. The cursors keep their values, except that a
    /// cursor beyond the new capacity is pulled back to it.
    pub fn truncate_left(&mut self, n: i64) -> Result<()> {
        let n = self.truncate_count(n)?;
        self.data.copy_within(n.., 0);
        self.data.truncate(self.data.len() - n);
        log::trace!("truncated {n} bytes from the left");
        self.refresh();
        self.clamp_offsets();
        Ok(())
    }

    /// Removes `n` bytes from the end of the buffer.
    ///
    /// A cursor beyond the new capacity is pulled back to it.
    pub fn truncate_right(&mut self, n: i64) -> Result<()> {
        let n = self.truncate_count(n)?;
        self.data.truncate(self.data.len() - n);
        log::trace!("truncated {n} bytes from the right");
        self.refresh();
        self.clamp_offsets();
        Ok(())
    }

    fn truncate_count(&self, n: i64) -> Result<usize> {
        match usize::try_from(n) {
            Ok(n) if n <= self.data.len() => Ok(n),
            _ => Err(BufferError::InvalidCount),
        }
    }

    fn clamp_offsets(&mut self) {
        if self.byte_offset > self.byte_capacity {
            self.byte_offset = self.byte_capacity;
        }
        if self.bit_offset > self.bit_capacity {
            self.bit_offset = self.bit_capacity;
        }
    }

    /// Moves the byte cursor to `offset`, or by `offset` if `relative` is true.
    ///
    /// A relative seek saturates at the ends of the `i64` range.
    pub fn seek_byte(&mut self, offset: i64, relative: bool) {
        if relative {
            self.byte_offset = self.byte_offset.saturating_add(offset);
        } else {
            self.byte_offset = offset;
        }
    }

    /// Moves the bit cursor to `offset`, or by `offset` if `relative` is true.
    ///
    /// A relative seek saturates at the ends of the `i64` range.
    pub fn seek_bit(&mut self, offset: i64, relative: bool) {
        if relative {
            self.bit_offset = self.bit_offset.saturating_add(offset);
        } else {
            self.bit_offset = offset;
        }
    }

    /// Moves the byte cursor to the byte that contains the bit cursor.
    pub fn align_byte(&mut self) {
        self.byte_offset = self.bit_offset / 8;
    }

    /// Moves the bit cursor to the first bit of the byte under the byte cursor.
    pub fn align_bit(&mut self) {
        self.bit_offset = self.byte_offset.saturating_mul(8);
    }

    /// Number of bytes after the byte cursor.
    pub fn after_byte(&self) -> i64 {
        self.after_byte_at(self.byte_offset)
    }

    /// Number of bytes after `offset`, not counting the byte at `offset`.
    pub fn after_byte_at(&self, offset: i64) -> i64 {
        self.byte_capacity.saturating_sub(offset).saturating_sub(1)
    }

    /// Number of bits after the bit cursor.
    pub fn after_bit(&self) -> i64 {
        self.after_bit_at(self.bit_offset)
    }

    /// Number of bits after `offset`, not counting the bit at `offset`.
    pub fn after_bit_at(&self, offset: i64) -> i64 {
        self.bit_capacity.saturating_sub(offset).saturating_sub(1)
    }

    /// Validates a span of `len` bytes at `offset` and returns it as an index range.
    pub(crate) fn byte_span(
        &self,
        offset: i64,
        len: usize,
        access: Access,
    ) -> Result<Range<usize>> {
        let range = span(offset, len, self.byte_capacity, access)?;
        if range.end > self.data.len() {
            return Err(access.over());
        }
        Ok(range)
    }

    /// Validates a span of `len` bits at `offset` and returns it as a range of bit indices.
    pub(crate) fn bit_span(
        &self,
        offset: i64,
        len: usize,
        access: Access,
    ) -> Result<Range<usize>> {
        let range = span(offset, len, self.bit_capacity, access)?;
        if range.end.div_ceil(8) > self.data.len() {
            return Err(access.over());
        }
        Ok(range)
    }

    /// Advances the byte cursor past a span that has already been validated.
    #[inline(always)]
    pub(crate) fn advance_byte(&mut self, len: usize) {
        self.byte_offset += len as i64;
    }
}

fn span(offset: i64, len: usize, capacity: i64, access: Access) -> Result<Range<usize>> {
    if offset < 0 {
        return Err(access.under());
    }
    let end = i64::try_from(len)
        .ok()
        .and_then(|len| offset.checked_add(len))
        .ok_or(access.over())?;
    if end > capacity {
        return Err(access.over());
    }
    Ok(offset as usize..end as usize)
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Self {
        let mut buffer = Self {
            data,
            byte_offset: 0,
            byte_capacity: 0,
            bit_offset: 0,
            bit_capacity: 0,
        };
        buffer.refresh();
        buffer
    }
}

impl From<&[u8]> for Buffer {
    fn from(data: &[u8]) -> Self {
        Self::from(data.to_vec())
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Buffer {{ bytes = {}/{}; bits = {}/{}; {:02x?} }}",
            self.byte_offset, self.byte_capacity, self.bit_offset, self.bit_capacity, &self.data
        )
    }
}

/// Which side of the error taxonomy a bounds failure belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Access {
    Read,
    Write,
}

impl Access {
    fn over(self) -> BufferError {
        match self {
            Self::Read => BufferError::Overread,
            Self::Write => BufferError::Overwrite,
        }
    }

    fn under(self) -> BufferError {
        match self {
            Self::Read => BufferError::Underread,
            Self::Write => BufferError::Underwrite,
        }
    }
}

/// A fixed-width integer with a fixed byte order, as stored in the buffer.
pub(crate) trait Word: FromBytes + IntoBytes + Immutable + KnownLayout + Unaligned + Copy {
    type Native: Copy;

    fn from_native(value: Self::Native) -> Self;
    fn to_native(self) -> Self::Native;
}

impl<O: ByteOrder> Word for U16<O> {
    type Native = u16;

    fn from_native(value: u16) -> Self {
        Self::new(value)
    }

    fn to_native(self) -> u16 {
        self.get()
    }
}

impl<O: ByteOrder> Word for U32<O> {
    type Native = u32;

    fn from_native(value: u32) -> Self {
        Self::new(value)
    }

    fn to_native(self) -> u32 {
        self.get()
    }
}

impl<O: ByteOrder> Word for U64<O> {
    type Native = u64;

    fn from_native(value: u64) -> Self {
        Self::new(value)
    }

    fn to_native(self) -> u64 {
        self.get()
    }
}

/// Error type for `Buffer`.
///
/// When an operation returns one of these, it has not modified the buffer.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BufferError {
    /// A read extends past the end of the buffer.
    Overread,

    /// A read starts at a negative offset.
    Underread,

    /// A write extends past the end of the buffer.
    Overwrite,

    /// A write starts at a negative offset.
    Underwrite,

    /// A count is negative or otherwise unusable. This is returned by `grow`, `truncate_left` and
    /// `truncate_right` for negative counts (and when truncating more bytes than the buffer
    /// holds), and by the bit-field functions for widths greater than 64.
    InvalidCount,
}

impl core::error::Error for BufferError {}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overread => f.write_str("read extends past the end of the buffer"),
            Self::Underread => f.write_str("read starts before the beginning of the buffer"),
            Self::Overwrite => f.write_str("write extends past the end of the buffer"),
            Self::Underwrite => f.write_str("write starts before the beginning of the buffer"),
            Self::InvalidCount => f.write_str("invalid byte or bit count"),
        }
    }
}
