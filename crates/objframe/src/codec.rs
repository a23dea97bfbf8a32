use std::{fmt, sync::Arc};

use log::error;
use rawbuf::{ByteSink, ByteSource, SliceSource, VecSink};

use crate::{CodecOptions, Error, LENGTH_PREFIX_SIZE, ObjectSerializer, Result, SharedSerializer};

/// Adapter between an [`ObjectSerializer`] and a cursor-based byte buffer.
///
/// Each value is written as a frame: a 4-byte unsigned payload length, in the
/// buffer's byte order, followed by exactly that many payload bytes.
///
/// Cursor contract:
/// - a successful encode advances the sink by `4 + len`, a failed one by nothing;
/// - a successful decode consumes exactly one frame;
/// - a missing prefix, an oversized length or a truncated payload consumes nothing;
/// - a well-framed payload the serializer rejects is consumed, so the next frame stays aligned.
///
/// The codec holds nothing but its serializer binding and options: clones are
/// cheap, and a single instance can be used from any number of threads.
pub struct FrameCodec<T> {
    serializer: SharedSerializer<T>,
    options: CodecOptions,
}

impl<T> Clone for FrameCodec<T> {
    fn clone(&self) -> Self {
        Self {
            serializer: self.serializer.clone(),
            options: self.options,
        }
    }
}

impl<T: 'static> fmt::Debug for FrameCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameCodec")
            .field("serializer", &self.serializer.name())
            .field("options", &self.options)
            .finish()
    }
}

impl<T: 'static> FrameCodec<T> {
    pub fn new(serializer: impl ObjectSerializer<T>) -> Self {
        Self::with_options(serializer, CodecOptions::default())
    }

    pub fn with_options(serializer: impl ObjectSerializer<T>, options: CodecOptions) -> Self {
        Self::from_shared(Arc::new(serializer), options)
    }

    pub fn from_shared(serializer: SharedSerializer<T>, options: CodecOptions) -> Self {
        Self {
            serializer,
            options,
        }
    }

    #[inline]
    pub fn serializer(&self) -> &SharedSerializer<T> {
        &self.serializer
    }

    #[inline]
    pub fn options(&self) -> CodecOptions {
        self.options
    }

    /// Writes one frame for `value`, returning the number of bytes written.
    ///
    /// Failures are logged and reported as `0`: nothing was written and the sink's
    /// cursor has not moved.
    pub fn encode<S>(&self, value: &T, out: &mut S) -> usize
    where
        S: ByteSink + ?Sized,
    {
        match self.try_encode(value, out) {
            Ok(written) => written,
            Err(e) => {
                error!(
                    "Failed to encode frame at position {}: {e}",
                    out.position()
                );
                0
            }
        }
    }

    /// Reads one frame and rebuilds its value.
    ///
    /// Failures are logged and reported as `None`, which callers must treat as
    /// "nothing recovered for this slot", never as a default value.
    pub fn decode<S>(&self, input: &mut S, hint: Option<T>) -> Option<T>
    where
        S: ByteSource + ?Sized,
    {
        match self.try_decode(input, hint) {
            Ok(value) => value,
            Err(e) => {
                error!(
                    "Failed to decode frame at position {}: {e}",
                    input.position()
                );
                None
            }
        }
    }

    /// Like [`encode`](Self::encode), returning the failure instead of logging it.
    pub fn try_encode<S>(&self, value: &T, out: &mut S) -> Result<usize>
    where
        S: ByteSink + ?Sized,
    {
        let payload = self.serialize(value)?;
        self.write_frame(&payload, out)
    }

    /// Like [`decode`](Self::decode), returning the failure instead of logging it.
    ///
    /// `Ok(None)` is a payload the serializer maps to no value (typically an empty one).
    pub fn try_decode<S>(&self, input: &mut S, hint: Option<T>) -> Result<Option<T>>
    where
        S: ByteSource + ?Sized,
    {
        let declared = self.check_frame(input)?;

        input.skip(LENGTH_PREFIX_SIZE)?;
        let payload = input.read_bytes(declared)?;

        self.serializer
            .deserialize_using(payload, hint)
            .map_err(|e| Error::Deserialization {
                serializer: self.serializer.name(),
                len: declared,
                source: Box::new(e),
            })
    }

    /// Size of the frame `value` would produce.
    pub fn frame_len(&self, value: &T) -> Result<usize> {
        Ok(LENGTH_PREFIX_SIZE + self.serialize(value)?.len())
    }

    /// Encodes `value` into a standalone frame, in the configured byte order.
    pub fn to_frame(&self, value: &T) -> Result<Vec<u8>> {
        let mut sink = VecSink::with_endian(self.options.endian());
        self.try_encode(value, &mut sink)?;
        Ok(sink.into_inner())
    }

    /// Decodes a standalone frame produced by [`to_frame`](Self::to_frame).
    ///
    /// The slice must hold exactly one frame.
    pub fn from_frame(&self, bytes: &[u8]) -> Result<Option<T>> {
        let mut source = SliceSource::with_endian(bytes, self.options.endian());
        let value = self.try_decode(&mut source, None)?;
        if !source.is_exhausted() {
            return Err(Error::TrailingBytes {
                len: source.remaining(),
            });
        }
        Ok(value)
    }

    pub(crate) fn serialize(&self, value: &T) -> Result<Vec<u8>> {
        let mut payload = Vec::new();
        self.serializer
            .serialize_into(value, &mut payload)
            .map_err(|e| Error::Serialization {
                serializer: self.serializer.name(),
                source: Box::new(e),
            })?;

        let max = self.options.max_payload_len();
        if payload.len() > max {
            return Err(Error::PayloadTooLarge {
                len: payload.len(),
                max,
            });
        }

        Ok(payload)
    }

    /// Writes prefix and payload. Capacity is secured first so a short sink fails
    /// before any byte lands.
    pub(crate) fn write_frame<S>(&self, payload: &[u8], out: &mut S) -> Result<usize>
    where
        S: ByteSink + ?Sized,
    {
        let frame_len = LENGTH_PREFIX_SIZE + payload.len();
        out.ensure_capacity(frame_len)?;
        out.write_u32(payload.len() as u32)?;
        out.write_bytes(payload)?;
        Ok(frame_len)
    }

    /// Validates the frame at the cursor without consuming it, returning its payload length.
    fn check_frame<S>(&self, input: &S) -> Result<usize>
    where
        S: ByteSource + ?Sized,
    {
        let available = input.remaining();
        if available < LENGTH_PREFIX_SIZE {
            return Err(Error::MissingLengthPrefix { available });
        }

        let declared = input.peek_u32()? as usize;

        let max = self.options.max_payload_len();
        if declared > max {
            return Err(Error::OversizedFrame { declared, max });
        }

        let available = available - LENGTH_PREFIX_SIZE;
        if declared > available {
            return Err(Error::TruncatedFrame {
                declared,
                available,
            });
        }

        Ok(declared)
    }
}
