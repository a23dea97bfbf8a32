use std::fmt;

use crate::{ObjectSerializer, Result};

type SerializeFn<T> = dyn Fn(&T, &mut Vec<u8>) -> Result<()> + Send + Sync;
type DeserializeFn<T> = dyn Fn(&[u8]) -> Result<Option<T>> + Send + Sync;

/// Serializer assembled from a pair of closures.
///
/// Handy for one-off encodings, and for wrapping a serializer with extra checks.
pub struct FnSerializer<T> {
    name: &'static str,
    serialize: Box<SerializeFn<T>>,
    deserialize: Box<DeserializeFn<T>>,
}

impl<T> FnSerializer<T> {
    pub fn new<S, D>(name: &'static str, serialize: S, deserialize: D) -> Self
    where
        S: Fn(&T, &mut Vec<u8>) -> Result<()> + Send + Sync + 'static,
        D: Fn(&[u8]) -> Result<Option<T>> + Send + Sync + 'static,
    {
        Self {
            name,
            serialize: Box::new(serialize),
            deserialize: Box::new(deserialize),
        }
    }
}

impl<T> fmt::Debug for FnSerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSerializer")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> ObjectSerializer<T> for FnSerializer<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    fn serialize_into(&self, value: &T, buf: &mut Vec<u8>) -> Result<()> {
        (self.serialize)(value, buf)
    }

    #[inline]
    fn deserialize(&self, bytes: &[u8]) -> Result<Option<T>> {
        (self.deserialize)(bytes)
    }
}
