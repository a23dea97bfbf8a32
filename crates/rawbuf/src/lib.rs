#![doc = include_str!("../README.md")]

mod endian;
pub mod error;
mod mmap;
mod sink;
mod slice;
mod source;
mod vec;

pub use endian::*;
pub use error::*;
pub use mmap::*;
pub use sink::*;
pub use slice::*;
pub use source::*;
pub use vec::*;

pub const PAGE_SIZE: usize = 4096;
pub const PAGE_SIZE_MINUS_1: usize = PAGE_SIZE - 1;

/// Width of the fixed-width integers written by sinks and read by sources.
pub const SIZE_OF_U32: usize = size_of::<u32>();
