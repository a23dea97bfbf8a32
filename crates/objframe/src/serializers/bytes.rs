use std::{fmt, marker::PhantomData};

use crate::{Error, ObjectSerializer, Result};

/// Trait for types with an explicit, variable-length little-endian byte encoding.
pub trait Bytes: Sized {
    /// Appends the encoding of `self` to `buf`.
    fn append_bytes(&self, buf: &mut Vec<u8>);

    /// Decodes a value from exactly the bytes produced by [`append_bytes`](Bytes::append_bytes).
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// The value an empty payload stands for, `None` when the type has no empty encoding.
    #[inline]
    fn from_empty() -> Option<Self> {
        None
    }

    #[inline]
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.append_bytes(&mut buf);
        buf
    }
}

macro_rules! impl_bytes_for_numeric {
    ($($t:ty),*) => {
        $(
            impl Bytes for $t {
                #[inline]
                fn append_bytes(&self, buf: &mut Vec<u8>) {
                    buf.extend_from_slice(&self.to_le_bytes());
                }

                #[inline]
                fn from_bytes(bytes: &[u8]) -> Result<Self> {
                    let arr: [u8; size_of::<$t>()] =
                        bytes.try_into().map_err(|_| Error::WrongLength {
                            expected: size_of::<$t>(),
                            actual: bytes.len(),
                        })?;
                    Ok(<$t>::from_le_bytes(arr))
                }
            }
        )*
    };
}

impl_bytes_for_numeric!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

impl Bytes for bool {
    #[inline]
    fn append_bytes(&self, buf: &mut Vec<u8>) {
        buf.push(u8::from(*self));
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match u8::from_bytes(bytes)? {
            0 => Ok(false),
            1 => Ok(true),
            b => Err(Error::InvalidBool(b)),
        }
    }
}

impl Bytes for String {
    #[inline]
    fn append_bytes(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_bytes());
    }

    #[inline]
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    #[inline]
    fn from_empty() -> Option<Self> {
        Some(String::new())
    }
}

impl Bytes for Vec<u8> {
    #[inline]
    fn append_bytes(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self);
    }

    #[inline]
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bytes.to_vec())
    }

    #[inline]
    fn from_empty() -> Option<Self> {
        Some(Vec::new())
    }
}

/// Serializer for any [`Bytes`] type.
pub struct BytesSerializer<T>(PhantomData<fn() -> T>);

impl<T> BytesSerializer<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for BytesSerializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for BytesSerializer<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BytesSerializer<T> {}

impl<T> fmt::Debug for BytesSerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BytesSerializer")
    }
}

impl<T> ObjectSerializer<T> for BytesSerializer<T>
where
    T: Bytes + 'static,
{
    fn name(&self) -> &'static str {
        "bytes"
    }

    #[inline]
    fn serialize_into(&self, value: &T, buf: &mut Vec<u8>) -> Result<()> {
        value.append_bytes(buf);
        Ok(())
    }

    #[inline]
    fn deserialize(&self, bytes: &[u8]) -> Result<Option<T>> {
        if bytes.is_empty() {
            return Ok(T::from_empty());
        }
        T::from_bytes(bytes).map(Some)
    }
}
