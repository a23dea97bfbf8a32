use crate::{Endian, Error, Result};

/// Cursor-based writer over a contiguous byte region.
///
/// Writes are all-or-nothing: a call that fails leaves [`position`](ByteSink::position)
/// exactly where it was and no bytes of the failed call in the region.
/// Sinks only ever move forward.
pub trait ByteSink {
    /// Current write offset, relative to the start of the sink.
    fn position(&self) -> usize;

    /// Byte order used by [`write_u32`](ByteSink::write_u32).
    fn endian(&self) -> Endian;

    /// Bytes that can still be written, or `None` if the sink grows on demand.
    fn remaining_capacity(&self) -> Option<usize>;

    /// Makes sure `additional` bytes can be written without failing.
    ///
    /// Growable sinks reserve space, fixed sinks return [`Error::Overflow`].
    /// Never moves the cursor.
    fn ensure_capacity(&mut self, additional: usize) -> Result<()> {
        match self.remaining_capacity() {
            Some(available) if available < additional => Err(Error::Overflow {
                position: self.position(),
                requested: additional,
                available,
            }),
            _ => Ok(()),
        }
    }

    /// Writes the whole slice and advances by `bytes.len()`.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;

    /// Writes a `u32` in the sink's byte order and advances by 4.
    #[inline]
    fn write_u32(&mut self, value: u32) -> Result<()> {
        let bytes = self.endian().write_u32(value);
        self.write_bytes(&bytes)
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    #[inline]
    fn position(&self) -> usize {
        (**self).position()
    }

    #[inline]
    fn endian(&self) -> Endian {
        (**self).endian()
    }

    #[inline]
    fn remaining_capacity(&self) -> Option<usize> {
        (**self).remaining_capacity()
    }

    #[inline]
    fn ensure_capacity(&mut self, additional: usize) -> Result<()> {
        (**self).ensure_capacity(additional)
    }

    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_bytes(bytes)
    }
}
