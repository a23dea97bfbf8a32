use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    sync::{Arc, OnceLock},
};

use log::debug;
use parking_lot::RwLock;
use rawbuf::ByteSource;

use crate::{Error, FrameCodec, Marshallable, Result};

type AnyCodec = Arc<dyn Any + Send + Sync>;

/// Codecs keyed by the type they are bound to.
///
/// When a container deserializes a codec descriptor it only learns the value type;
/// [`resolve`](CodecRegistry::resolve) turns that back into the fully bound codec
/// registered for it.
#[derive(Debug, Default)]
pub struct CodecRegistry {
    codecs: RwLock<HashMap<TypeId, AnyCodec>>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<CodecRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Binds `codec` to `T`, returning the codec it replaces.
    pub fn register<T: 'static>(&self, codec: FrameCodec<T>) -> Option<FrameCodec<T>> {
        debug!(
            "Registering {} codec for {}.",
            codec.serializer().name(),
            type_name::<T>()
        );
        self.codecs
            .write()
            .insert(TypeId::of::<T>(), Arc::new(codec))
            .and_then(|previous| Self::downcast(&previous))
    }

    /// Returns the codec bound to `T`, registering the one built by `f` if there is none.
    pub fn get_or_register<T: 'static>(&self, f: impl FnOnce() -> FrameCodec<T>) -> FrameCodec<T> {
        if let Some(codec) = self.get::<T>() {
            return codec;
        }

        let mut codecs = self.codecs.write();
        if let Some(codec) = codecs.get(&TypeId::of::<T>()).and_then(Self::downcast) {
            return codec;
        }

        let codec = f();
        codecs.insert(TypeId::of::<T>(), Arc::new(codec.clone()));
        codec
    }

    pub fn get<T: 'static>(&self) -> Option<FrameCodec<T>> {
        self.codecs
            .read()
            .get(&TypeId::of::<T>())
            .and_then(Self::downcast)
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.codecs.read().contains_key(&TypeId::of::<T>())
    }

    pub fn remove<T: 'static>(&self) -> Option<FrameCodec<T>> {
        self.codecs
            .write()
            .remove(&TypeId::of::<T>())
            .and_then(|codec| Self::downcast(&codec))
    }

    pub fn len(&self) -> usize {
        self.codecs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.read().is_empty()
    }

    /// Rebuilds the codec for `T` from its persisted description.
    ///
    /// Reads the codec's metadata through its [`Marshallable`] hook, which consumes
    /// nothing, and hands back the registered codec sharing the registered serializer.
    /// Resolving any number of times yields equivalent codecs.
    pub fn resolve<T: 'static>(&self, input: &mut dyn ByteSource) -> Result<FrameCodec<T>> {
        let mut codec = self
            .get::<T>()
            .ok_or(Error::UnregisteredType(type_name::<T>()))?;
        codec.read_marshallable(input)?;
        Ok(codec)
    }

    #[inline]
    fn downcast<T: 'static>(codec: &AnyCodec) -> Option<FrameCodec<T>> {
        codec.downcast_ref::<FrameCodec<T>>().cloned()
    }
}
