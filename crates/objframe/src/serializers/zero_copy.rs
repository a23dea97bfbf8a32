use std::{fmt, marker::PhantomData};

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Error, ObjectSerializer, Result};

/// Serializer copying the in-memory representation of `T`.
///
/// Native byte order: NOT portable across architectures of different endianness.
pub struct ZeroCopySerializer<T>(PhantomData<fn() -> T>);

impl<T> ZeroCopySerializer<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for ZeroCopySerializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ZeroCopySerializer<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ZeroCopySerializer<T> {}

impl<T> fmt::Debug for ZeroCopySerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ZeroCopySerializer")
    }
}

impl<T> ObjectSerializer<T> for ZeroCopySerializer<T>
where
    T: FromBytes + IntoBytes + Immutable + KnownLayout + 'static,
{
    fn name(&self) -> &'static str {
        "zerocopy"
    }

    #[inline]
    fn serialize_into(&self, value: &T, buf: &mut Vec<u8>) -> Result<()> {
        buf.extend_from_slice(value.as_bytes());
        Ok(())
    }

    #[inline]
    fn deserialize(&self, bytes: &[u8]) -> Result<Option<T>> {
        if bytes.is_empty() && size_of::<T>() != 0 {
            return Ok(None);
        }
        T::read_from_bytes(bytes)
            .map(Some)
            .map_err(|_| Error::ZeroCopyError)
    }
}
