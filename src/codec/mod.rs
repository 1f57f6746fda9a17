//! Wire-level value codecs.

pub mod date;
pub mod dynamic;

pub use dynamic::{DynamicFieldCodec, KeyIdentity, sanitize};
