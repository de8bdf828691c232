//! Oneof field support for protobuf.
//!
//! Protobuf oneofs map naturally to Rust enums. This module provides the
//! [`ProtoOneof`] trait for oneof encode/decode.
//!
//! # Wire Format
//!
//! Oneofs have no wire representation of their own. Each variant is encoded
//! as a regular field with its own tag. The mutual exclusivity is enforced
//! at the Rust type level, and "last one wins" semantics apply during decode.
//! The one exception is a message member that is seen again while it is still
//! the set member: the new record is merged into it, as for a plain message
//! field.
//!
//! A message holds its oneof as `Option<Enum>`, with `None` meaning no member
//! is set.

use bytes::BufMut;

use crate::error::DecodeError;
use crate::reader::Reader;
use crate::wire::ProtoKey;
use crate::writer::Writer;

/// Trait for protobuf oneof types.
///
/// Oneofs are represented as Rust enums where each variant corresponds to
/// a possible field. Only one field can be set at a time.
pub trait ProtoOneof: Sized {
    /// Decode the member `key` belongs to into `dst`.
    ///
    /// A scalar member replaces whatever was set. A message member is merged
    /// into `dst` if it is already the set member, and replaces it otherwise.
    ///
    /// # Returns
    /// - `Ok(true)` if the tag matches a variant in this oneof
    /// - `Ok(false)` if the tag doesn't match any variant, nothing is consumed
    /// - `Err(...)` if decoding fails
    fn merge_variant(
        dst: &mut Option<Self>,
        key: ProtoKey,
        reader: &mut Reader<'_>,
    ) -> Result<bool, DecodeError>;

    /// Encode this oneof variant, including its field key.
    fn encode_variant<B: BufMut>(&self, writer: &mut Writer<B>);

    /// Returns the encoded length of this variant (including field key).
    fn encoded_variant_len(&self) -> usize;
}

/// Decode a oneof member into `dst`.
///
/// Returns `false` if the key belongs to none of the oneof's members, in which
/// case the caller still has to skip the field.
#[inline]
pub fn decode_oneof_field<T: ProtoOneof>(
    dst: &mut Option<T>,
    key: ProtoKey,
    reader: &mut Reader<'_>,
) -> Result<bool, DecodeError> {
    T::merge_variant(dst, key, reader)
}

/// Helper to encode an `Option<T>` oneof field.
#[inline]
pub fn encode_oneof_field<T: ProtoOneof, B: BufMut>(field: &Option<T>, writer: &mut Writer<B>) {
    if let Some(value) = field {
        value.encode_variant(writer);
    }
}

/// Helper to get the encoded length of an `Option<T>` oneof field.
#[inline]
pub fn encoded_oneof_field_len<T: ProtoOneof>(field: &Option<T>) -> usize {
    match field {
        Some(value) => value.encoded_variant_len(),
        None => 0,
    }
}
