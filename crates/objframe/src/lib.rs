#![doc = include_str!("../README.md")]

pub use rawbuf::{
    ByteSink, ByteSource, Endian, Error as RawBufError, MmapBuffer, MmapSink, MmapSource,
    SliceSink, SliceSource, VecSink,
};

mod batch;
mod codec;
mod error;
mod marshal;
mod options;
mod registry;
mod serializer;
mod serializers;

pub use codec::*;
pub use error::*;
pub use marshal::*;
pub use options::*;
pub use registry::*;
pub use serializer::*;
pub use serializers::*;

/// Width of the frame's length prefix.
pub const LENGTH_PREFIX_SIZE: usize = rawbuf::SIZE_OF_U32;

/// Largest payload a length prefix can describe.
pub const MAX_PAYLOAD_LEN: usize = u32::MAX as usize;
