//! # Serialization format
//!
//! A value is encoded against a [`Descriptor`]. The descriptor is never encoded;
//! the reader must already hold the same descriptor the writer used.
//!
//! Multi-byte primitives use the call's [`Endianness`](crate::Endianness).
//! Element counts use the call's [`SizeTag`](crate::SizeTag), an unsigned
//! integer of a width both ends agreed upon during the handshake.
//!
//! The below pseudocode depicts the encoding of each descriptor shape.
//!
//! ```text
//! struct Scalar (fixed width) {
//!     body:       [u8; width],
//! }
//!
//! struct Scalar (`s`) {
//!     body:       [u8; ..],       // no NUL within
//!     terminator: u8 = 0x00,
//! }
//!
//! struct Tuple {
//!     member_0:   <descriptor 0>,
//!     member_1:   <descriptor 1>,
//!     ...         // no count, no separators
//! }
//!
//! struct List {
//!     count:      size_tag,
//!     unit_0:     {
//!         item_0:     <descriptor 0>,
//!         item_1:     <descriptor 1>,
//!         ...
//!     },
//!     ...         // `count` repeat units
//! }
//!
//! struct Array {
//!     count:      size_tag,
//!     body:       [u8; count * item_width],   // in the array's own byte order
//! }
//! ```
//!
//! Byte strings optionally carry an embedded integer; see [`byte_string`].

pub mod basic;
pub mod byte_string;
pub mod composite;
mod descriptor;
mod scalar_type;
mod value;

pub use byte_string::{EscapedString, Piece, END_OF_STRING, ESCAPE};
pub use composite::{read, write};
pub use descriptor::*;
pub use scalar_type::*;
pub use value::*;
