use crate::{Endian, Error, Result, SIZE_OF_U32};

/// Cursor-based reader over a contiguous byte region.
///
/// Reads are all-or-nothing: a call that fails consumes nothing.
/// Sources only ever move forward, [`peek`](ByteSource::peek) never moves.
pub trait ByteSource {
    /// Current read offset, relative to the start of the source.
    fn position(&self) -> usize;

    /// Byte order used by [`read_u32`](ByteSource::read_u32).
    fn endian(&self) -> Endian;

    /// Bytes left between the cursor and the end of the source.
    fn remaining(&self) -> usize;

    /// Returns the next `len` bytes without consuming them.
    fn peek(&self, len: usize) -> Result<&[u8]>;

    /// Consumes `len` bytes without looking at them.
    fn skip(&mut self, len: usize) -> Result<()>;

    /// Consumes and returns the next `len` bytes.
    fn read_bytes(&mut self, len: usize) -> Result<&[u8]>;

    #[inline]
    fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Decodes the next `u32` in the source's byte order without consuming it.
    #[inline]
    fn peek_u32(&self) -> Result<u32> {
        let mut bytes = [0u8; SIZE_OF_U32];
        bytes.copy_from_slice(self.peek(SIZE_OF_U32)?);
        Ok(self.endian().read_u32(bytes))
    }

    /// Decodes the next `u32` in the source's byte order and advances by 4.
    #[inline]
    fn read_u32(&mut self) -> Result<u32> {
        let value = self.peek_u32()?;
        self.skip(SIZE_OF_U32)?;
        Ok(value)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn position(&self) -> usize {
        (**self).position()
    }

    #[inline]
    fn endian(&self) -> Endian {
        (**self).endian()
    }

    #[inline]
    fn remaining(&self) -> usize {
        (**self).remaining()
    }

    #[inline]
    fn peek(&self, len: usize) -> Result<&[u8]> {
        (**self).peek(len)
    }

    #[inline]
    fn skip(&mut self, len: usize) -> Result<()> {
        (**self).skip(len)
    }

    #[inline]
    fn read_bytes(&mut self, len: usize) -> Result<&[u8]> {
        (**self).read_bytes(len)
    }
}

/// Fails with [`Error::Exhausted`] unless `needed` bytes are left after `position`.
#[inline]
pub(crate) fn check_available(position: usize, needed: usize, remaining: usize) -> Result<()> {
    if needed > remaining {
        return Err(Error::Exhausted {
            position,
            needed,
            remaining,
        });
    }
    Ok(())
}
