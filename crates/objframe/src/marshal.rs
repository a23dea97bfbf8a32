use rawbuf::{ByteSink, ByteSource};

use crate::{FrameCodec, Result};

/// Hooks for components embedded in a self-describing container.
///
/// The container calls [`write_marshallable`](Marshallable::write_marshallable) when it
/// persists its own description, and [`read_marshallable`](Marshallable::read_marshallable)
/// on a freshly resolved instance when it loads that description back.
pub trait Marshallable {
    fn write_marshallable(&self, out: &mut dyn ByteSink) -> Result<()>;

    fn read_marshallable(&mut self, input: &mut dyn ByteSource) -> Result<()>;
}

/// A codec has no fields to persist: both hooks move the cursor by zero bytes.
/// Its serializer binding is restored by [`CodecRegistry::resolve`](crate::CodecRegistry::resolve).
impl<T: 'static> Marshallable for FrameCodec<T> {
    #[inline]
    fn write_marshallable(&self, _out: &mut dyn ByteSink) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn read_marshallable(&mut self, _input: &mut dyn ByteSource) -> Result<()> {
        Ok(())
    }
}
