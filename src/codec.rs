//! Encoding and decoding traits for protobuf wire format.

mod default_check;
mod delimited;
mod enumeration;
mod message;
mod oneof;
mod optional;
mod packed;
mod repeated;
mod scalar;
mod unknown;

use bytes::BufMut;

use crate::error::DecodeError;
use crate::reader::Reader;
use crate::sizer;
use crate::wire::{ProtoKey, WireType};
use crate::writer::Writer;

pub trait ProtoType: Sized {
    /// The wire type used to encode this type.
    const WIRE_TYPE: WireType;
}

/// A type that can be decoded from protobuf wire format.
///
/// The `decode_into` method follows protobuf merging semantics:
/// - Scalars: last value wins (overwrite)
/// - Optional values: set, merging into an existing value
pub trait ProtoDecode: ProtoType + Default {
    /// Decode the value that follows a field key into `dst`.
    fn decode_into(reader: &mut Reader<'_>, dst: &mut Self) -> Result<(), DecodeError>;
}

/// A type that can be encoded to protobuf wire format.
pub trait ProtoEncode: ProtoType {
    /// Encode this value, without its field key.
    fn encode<B: BufMut>(&self, writer: &mut Writer<B>);

    /// Returns the encoded length of this value (not including field key).
    fn encoded_len(&self) -> usize;
}

/// Decodes a singular field whose key was just read.
///
/// In strict mode the key's wire type must match `T`.
#[inline]
pub fn decode_field<T: ProtoDecode>(
    key: ProtoKey,
    reader: &mut Reader<'_>,
    dst: &mut T,
) -> Result<(), DecodeError> {
    reader.check_wire_type(key, T::WIRE_TYPE)?;
    T::decode_into(reader, dst)
}

/// Decodes the value of a field whose key was just read into a new `T`.
#[inline]
pub fn decode_value<T: ProtoDecode>(key: ProtoKey, reader: &mut Reader<'_>) -> Result<T, DecodeError> {
    let mut value = T::default();
    decode_field(key, reader, &mut value)?;
    Ok(value)
}

/// Encodes a field with its key, whatever its value. Oneof members are
/// written like this.
#[inline]
pub fn encode_value<T: ProtoEncode, B: BufMut>(tag: u32, value: &T, writer: &mut Writer<B>) {
    writer.key(T::WIRE_TYPE, tag);
    value.encode(writer);
}

#[inline]
pub fn encoded_value_len<T: ProtoEncode>(tag: u32, value: &T) -> usize {
    sizer::key_size(tag) + value.encoded_len()
}

/// Encodes a singular field, omitting it when it holds its default value.
#[inline]
pub fn encode_field<T, B>(tag: u32, value: &T, writer: &mut Writer<B>)
where
    T: ProtoEncode + IsProtoDefault,
    B: BufMut,
{
    if !value.is_proto_default() {
        encode_value(tag, value, writer);
    }
}

/// Returns the encoded length of a singular field, key included.
#[inline]
pub fn encoded_field_len<T: ProtoEncode + IsProtoDefault>(tag: u32, value: &T) -> usize {
    if value.is_proto_default() {
        0
    } else {
        encoded_value_len(tag, value)
    }
}

// Re-export scalar types
pub use scalar::{Fixed32, Fixed64, Sfixed32, Sfixed64, Sint32, Sint64};

pub use default_check::IsProtoDefault;
pub use enumeration::ProtoEnum;
pub(crate) use enumeration::proto_enum;
pub use message::{
    decode_message_field, encode_message_field, encoded_message_field_len, merge_message_field,
    merge_optional_message_field, ProtoMessage,
};
pub use oneof::{decode_oneof_field, encode_oneof_field, encoded_oneof_field_len, ProtoOneof};
pub use packed::PackedDecode;
pub use repeated::{
    decode_repeated_field, encode_packed_field, encode_repeated_field, encode_repeated_messages,
    encoded_packed_field_len, encoded_repeated_field_len, encoded_repeated_messages_len,
    push_repeated_field, push_repeated_message,
};
pub use unknown::UnknownFields;
