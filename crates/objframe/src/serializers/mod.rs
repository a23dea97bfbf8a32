mod bytes;
mod func;
#[cfg(feature = "serde_json")]
mod json;
#[cfg(feature = "zerocopy")]
mod zero_copy;

pub use bytes::*;
pub use func::*;
#[cfg(feature = "serde_json")]
pub use json::*;
#[cfg(feature = "zerocopy")]
pub use zero_copy::*;
