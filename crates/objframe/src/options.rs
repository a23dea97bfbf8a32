use rawbuf::Endian;

use crate::MAX_PAYLOAD_LEN;

/// Construction-time configuration of a [`FrameCodec`](crate::FrameCodec).
///
/// The length prefix always follows the endianness declared by the buffer being
/// written or read. `endian` only applies to buffers the codec creates itself, as in
/// [`to_frame`](crate::FrameCodec::to_frame) and [`from_frame`](crate::FrameCodec::from_frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    endian: Endian,
    max_payload_len: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            endian: Endian::default(),
            max_payload_len: MAX_PAYLOAD_LEN,
        }
    }
}

impl CodecOptions {
    pub fn with_endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// Caps payload sizes, on both encode and decode. Clamped to what the prefix can express.
    pub fn with_max_payload_len(mut self, max_payload_len: usize) -> Self {
        self.max_payload_len = max_payload_len.min(MAX_PAYLOAD_LEN);
        self
    }

    #[inline]
    pub fn endian(&self) -> Endian {
        self.endian
    }

    #[inline]
    pub fn max_payload_len(&self) -> usize {
        self.max_payload_len
    }
}

impl From<Endian> for CodecOptions {
    fn from(endian: Endian) -> Self {
        Self::default().with_endian(endian)
    }
}
