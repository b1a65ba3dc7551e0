//! Structural binary codec for the simple RPC wire format.
//!
//! Values are read and written against a [`serde::Descriptor`], which is
//! known to both sides out of band. Nothing about the shape of a value is
//! encoded in the stream itself.

pub mod config;
mod error;
pub mod io_utils;
pub mod serde;

pub use config::{CodecConfig, Endianness, SizeTag};
pub use error::*;
