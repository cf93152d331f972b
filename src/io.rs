use std::io;

use crate::buffer::{Access, Buffer, BufferError};

impl Buffer {
    /// Number of bytes between the byte cursor and the end of the buffer.
    fn remaining(&self, under: BufferError) -> io::Result<usize> {
        if self.byte_offset < 0 {
            return Err(under.into());
        }
        Ok(usize::try_from(self.byte_capacity - self.byte_offset).unwrap_or(0))
    }
}

/// Reads from the byte cursor and advances it. Reading at or past the end returns `Ok(0)`.
impl io::Read for Buffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len().min(self.remaining(BufferError::Underread)?);
        if len == 0 {
            return Ok(0);
        }
        let range = self.byte_span(self.byte_offset, len, Access::Read)?;
        buf[..len].copy_from_slice(&self.data[range]);
        self.advance_byte(len);
        Ok(len)
    }
}

/// Overwrites bytes at the byte cursor and advances it. The buffer is never grown, so a write near
/// the end is short, and a write at or past the end returns `Ok(0)`.
impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len().min(self.remaining(BufferError::Underwrite)?);
        if len == 0 {
            return Ok(0);
        }
        self.write_bytes_next(&buf[..len])?;
        Ok(len)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl From<BufferError> for io::Error {
    fn from(e: BufferError) -> Self {
        let kind = match e {
            BufferError::Overread => io::ErrorKind::UnexpectedEof,
            BufferError::Overwrite => io::ErrorKind::WriteZero,
            BufferError::Underread | BufferError::Underwrite | BufferError::InvalidCount => {
                io::ErrorKind::InvalidInput
            }
        };
        io::Error::new(kind, e)
    }
}
