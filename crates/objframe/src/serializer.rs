use std::{any::type_name, sync::Arc};

use crate::Result;

/// A serializer turning values of `T` into byte payloads and back.
///
/// Both directions may fail for any value outside the serializer's domain.
/// Implementations hold no per-call state, so one instance serves any number of
/// threads at once.
pub trait ObjectSerializer<T>: Send + Sync + 'static {
    /// Human-readable name used in errors and logs.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// Appends the payload for `value` to `buf`.
    fn serialize_into(&self, value: &T, buf: &mut Vec<u8>) -> Result<()>;

    /// Rebuilds a value from a complete payload.
    ///
    /// `Ok(None)` means the payload encodes no value, which is what an empty payload
    /// means for every serializer in this crate unless `T` has an empty encoding.
    fn deserialize(&self, bytes: &[u8]) -> Result<Option<T>>;

    /// Like [`deserialize`](ObjectSerializer::deserialize), with an old value that may
    /// be reused as scratch space. The default ignores it.
    fn deserialize_using(&self, bytes: &[u8], using: Option<T>) -> Result<Option<T>> {
        drop(using);
        self.deserialize(bytes)
    }

    fn serialize(&self, value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.serialize_into(value, &mut buf)?;
        Ok(buf)
    }
}

/// Type-erased serializer shared between codecs.
pub type SharedSerializer<T> = Arc<dyn ObjectSerializer<T>>;
