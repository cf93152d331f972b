//! A growable in-memory byte buffer that can be addressed both in bytes and in bits.
//!
//! [`Buffer`] keeps a byte cursor and a bit cursor over the same backing store. Reads and writes of
//! bytes, byte runs, fixed-width unsigned integers (16, 32 and 64 bits, either byte order) and
//! bit fields of up to 64 bits are bounds-checked; a failed access returns a [`BufferError`] and
//! changes nothing.
//!
//! Bits are addressed most-significant-bit first within each byte, so bit 0 of the buffer is the
//! high bit of byte 0.
//!
//! ```
//! use bitbyte_buffer::Buffer;
//!
//! let mut buf = Buffer::from_chunks([[0x01u8, 0x02], [0x03, 0x04]]);
//! assert_eq!(buf.read_u16_be(0, 1), Ok(vec![0x0102]));
//! assert_eq!(buf.read_u16_le_next(2), Ok(vec![0x0201, 0x0403]));
//! assert_eq!(buf.byte_offset(), 4);
//!
//! buf.seek_bit(12, false);
//! assert_eq!(buf.read_bits_next(4), Ok(0x2));
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

mod bits;
mod buffer;
#[cfg(feature = "std")]
mod io;
mod reader;
mod writer;


pub use buffer::{Buffer, BufferError, Result};
