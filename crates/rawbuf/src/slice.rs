use crate::{ByteSink, ByteSource, Endian, Error, Result, source::check_available};

/// Reader over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
    endian: Endian,
}

impl<'a> SliceSource<'a> {
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_endian(bytes, Endian::default())
    }

    #[inline]
    pub fn with_endian(bytes: &'a [u8], endian: Endian) -> Self {
        Self {
            bytes,
            pos: 0,
            endian,
        }
    }

    /// Starts reading at `position` instead of the beginning of the slice.
    pub fn with_position(mut self, position: usize) -> Result<Self> {
        if position > self.bytes.len() {
            return Err(Error::PositionOutOfBounds {
                position,
                len: self.bytes.len(),
            });
        }
        self.pos = position;
        Ok(self)
    }

    /// The bytes that have not been consumed yet.
    #[inline]
    pub fn remaining_slice(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn endian(&self) -> Endian {
        self.endian
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    #[inline]
    fn peek(&self, len: usize) -> Result<&[u8]> {
        check_available(self.pos, len, self.remaining())?;
        Ok(&self.bytes[self.pos..self.pos + len])
    }

    #[inline]
    fn skip(&mut self, len: usize) -> Result<()> {
        check_available(self.pos, len, self.remaining())?;
        self.pos += len;
        Ok(())
    }

    #[inline]
    fn read_bytes(&mut self, len: usize) -> Result<&[u8]> {
        check_available(self.pos, len, self.remaining())?;
        let start = self.pos;
        self.pos += len;
        Ok(&self.bytes[start..self.pos])
    }
}

/// Fixed-capacity writer over a borrowed mutable slice.
///
/// Used when the storage engine has already sized the destination region.
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    pos: usize,
    endian: Endian,
}

impl<'a> SliceSink<'a> {
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self::with_endian(buf, Endian::default())
    }

    #[inline]
    pub fn with_endian(buf: &'a mut [u8], endian: Endian) -> Self {
        Self {
            buf,
            pos: 0,
            endian,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The bytes written so far.
    #[inline]
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}

impl ByteSink for SliceSink<'_> {
    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn endian(&self) -> Endian {
        self.endian
    }

    #[inline]
    fn remaining_capacity(&self) -> Option<usize> {
        Some(self.buf.len() - self.pos)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_capacity(bytes.len())?;
        let end = self.pos + bytes.len();
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}
