use std::{fmt, marker::PhantomData};

use serde::{Serialize, de::DeserializeOwned};

use crate::{ObjectSerializer, Result};

/// Serializer storing values as JSON documents.
///
/// Any `serde` type works, so this is the general-purpose choice when the
/// stored types are not known up front.
pub struct JsonSerializer<T>(PhantomData<fn() -> T>);

impl<T> JsonSerializer<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for JsonSerializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonSerializer<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for JsonSerializer<T> {}

impl<T> fmt::Debug for JsonSerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JsonSerializer")
    }
}

impl<T> ObjectSerializer<T> for JsonSerializer<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    fn name(&self) -> &'static str {
        "json"
    }

    #[inline]
    fn serialize_into(&self, value: &T, buf: &mut Vec<u8>) -> Result<()> {
        serde_json::to_writer(buf, value)?;
        Ok(())
    }

    #[inline]
    fn deserialize(&self, bytes: &[u8]) -> Result<Option<T>> {
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(bytes)?))
    }
}
