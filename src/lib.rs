//! A compact codec for the protobuf wire format.
//!
//! Messages are plain structs that implement [`codec::ProtoMessage`] by hand,
//! on top of a bounds-checked [`Reader`], an append-only [`Writer`] and the
//! exact size functions in [`sizer`]. The [`schema`] module holds the plugin
//! messages the `statusline` binary exchanges with its host.

#![deny(clippy::as_conversions)]

pub mod codec;
pub mod error;
// Publically export `leb128` because the functions are useful on their own.
pub mod leb128;
pub mod options;
pub mod reader;
pub mod schema;
pub mod sizer;
pub mod wire;
pub mod writer;

pub use codec::ProtoMessage;
pub use error::{DecodeError, DecodeErrorKind};
pub use options::DecodeOptions;
pub use reader::Reader;
pub use writer::Writer;
