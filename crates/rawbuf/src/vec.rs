use crate::{ByteSink, Endian, Error, Result};

/// Growable in-memory sink backed by a `Vec<u8>`.
///
/// The cursor is always at the end of the vector.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VecSink {
    buf: Vec<u8>,
    endian: Endian,
}

impl VecSink {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_endian(endian: Endian) -> Self {
        Self {
            buf: Vec::new(),
            endian,
        }
    }

    /// Continues writing after the existing contents of `buf`.
    #[inline]
    pub fn from_vec(buf: Vec<u8>, endian: Endian) -> Self {
        Self { buf, endian }
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

impl ByteSink for VecSink {
    #[inline]
    fn position(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    fn endian(&self) -> Endian {
        self.endian
    }

    #[inline]
    fn remaining_capacity(&self) -> Option<usize> {
        None
    }

    fn ensure_capacity(&mut self, additional: usize) -> Result<()> {
        self.buf
            .try_reserve(additional)
            .map_err(|_| Error::SizeOverflow {
                current: self.buf.len(),
                requested: additional,
            })
    }

    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_capacity(bytes.len())?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }
}
