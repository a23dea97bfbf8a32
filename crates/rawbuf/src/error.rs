use std::{fs, io, result};

use thiserror::Error;

use crate::Endian;

pub type Result<T, E = Error> = result::Result<T, E>;

/// Error types for rawbuf operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] io::Error),

    #[error("Buffer file is locked by another process")]
    TryLock(#[from] fs::TryLockError),

    // Read errors
    #[error("Source exhausted: needed {needed} bytes at position {position}, {remaining} remaining")]
    Exhausted {
        position: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("Position {position} is beyond buffer length {len}")]
    PositionOutOfBounds { position: usize, len: usize },

    // Write errors
    #[error("Sink overflow: cannot write {requested} bytes at position {position}, {available} available")]
    Overflow {
        position: usize,
        requested: usize,
        available: usize,
    },

    #[error("Buffer size would overflow: current={current}, requested={requested}")]
    SizeOverflow { current: usize, requested: usize },

    // Mmap errors
    #[error("Corrupted length header: {len} bytes recorded, capacity is {capacity}")]
    CorruptedHeader { len: usize, capacity: usize },

    #[error("Buffer was created {stored:?}-endian, opened as {requested:?}-endian")]
    EndianMismatch { stored: Endian, requested: Endian },

    #[error("Invalid endian tag {0} in buffer header")]
    InvalidEndianTag(u8),

    #[error("Cannot truncate to {to} bytes (current length: {current_len})")]
    TruncateInvalid { to: usize, current_len: usize },
}
