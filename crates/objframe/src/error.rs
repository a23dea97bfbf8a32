use std::{io, result, string::FromUtf8Error};

use thiserror::Error;

pub type Result<T, E = Error> = result::Result<T, E>;

/// Error types for objframe operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] io::Error),
    #[error(transparent)]
    RawBuf(#[from] rawbuf::Error),
    #[cfg(feature = "serde_json")]
    #[error(transparent)]
    SerdeJSON(#[from] serde_json::Error),
    #[cfg(feature = "zerocopy")]
    #[error("ZeroCopy error")]
    ZeroCopyError,
    #[error(transparent)]
    InvalidUtf8(#[from] FromUtf8Error),

    // Serializer boundary
    #[error("Serializer {serializer} failed to serialize value: {source}")]
    Serialization {
        serializer: &'static str,
        source: Box<Error>,
    },
    #[error("Serializer {serializer} failed to deserialize {len} bytes: {source}")]
    Deserialization {
        serializer: &'static str,
        len: usize,
        source: Box<Error>,
    },
    #[error("Payload of {len} bytes exceeds the maximum of {max}")]
    PayloadTooLarge { len: usize, max: usize },

    // Framing
    #[error("Missing length prefix: {available} bytes available")]
    MissingLengthPrefix { available: usize },
    #[error("Truncated frame: {declared} payload bytes declared, {available} available")]
    TruncatedFrame { declared: usize, available: usize },
    #[error("Oversized frame: {declared} payload bytes declared, maximum is {max}")]
    OversizedFrame { declared: usize, max: usize },
    #[error("Trailing bytes after frame: {len}")]
    TrailingBytes { len: usize },

    // Value encodings
    #[error("Wrong length: expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("Invalid bool byte: {0}")]
    InvalidBool(u8),
    #[error("{0}")]
    Custom(String),

    // Registry
    #[error("No codec registered for {0}")]
    UnregisteredType(&'static str),
}

/// Coarse classification of failures at the codec boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The serializer rejected a value, or its payload cannot be framed.
    Serialization,
    /// The length prefix is missing, out of range, or promises more bytes than exist.
    TruncatedFrame,
    /// The serializer rejected a well-framed payload.
    Deserialization,
    Other,
}

impl Error {
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Serialization { .. } | Self::PayloadTooLarge { .. } => FailureKind::Serialization,
            Self::MissingLengthPrefix { .. }
            | Self::TruncatedFrame { .. }
            | Self::OversizedFrame { .. }
            | Self::TrailingBytes { .. } => FailureKind::TruncatedFrame,
            Self::Deserialization { .. } => FailureKind::Deserialization,
            _ => FailureKind::Other,
        }
    }

    #[inline]
    pub fn is_truncation(&self) -> bool {
        self.kind() == FailureKind::TruncatedFrame
    }
}
