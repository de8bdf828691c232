//! Repeated fields.
//!
//! Repeated scalars (numbers, bools and enums) are written packed: a single
//! length-delimited record with no per-element keys, omitted when empty. On
//! decode both the packed and the one-key-per-element layouts are accepted,
//! and may even be mixed, every occurrence appends.
//!
//! Repeated strings, bytes and messages are never packed, each element is a
//! field of its own.

use bytes::BufMut;

use super::{merge_message_field, PackedDecode, ProtoDecode, ProtoEncode, ProtoMessage};
use crate::error::DecodeError;
use crate::reader::Reader;
use crate::sizer;
use crate::wire::{ProtoKey, WireType};
use crate::writer::Writer;

/// Appends one occurrence of a repeated scalar field to `dst`.
///
/// A length-delimited occurrence is a packed record and may hold any number
/// of elements, any other is a single element. In strict mode the wire type
/// must be one of those two.
#[inline]
pub fn decode_repeated_field<T: PackedDecode>(
    key: ProtoKey,
    reader: &mut Reader<'_>,
    dst: &mut Vec<T>,
) -> Result<(), DecodeError> {
    if key.wire_type() == WireType::Len {
        let mut packed = reader.delimited()?;
        return T::decode_packed_into(&mut packed, dst);
    }

    reader.check_wire_type(key, T::WIRE_TYPE)?;
    let mut value = T::default();
    T::decode_into(reader, &mut value)?;
    dst.push(value);
    Ok(())
}

/// Appends one element of a repeated, length-delimited field (`string`,
/// `bytes`) to `dst`.
#[inline]
pub fn push_repeated_field<T: ProtoDecode>(
    key: ProtoKey,
    reader: &mut Reader<'_>,
    dst: &mut Vec<T>,
) -> Result<(), DecodeError> {
    reader.check_wire_type(key, T::WIRE_TYPE)?;
    let mut value = T::default();
    T::decode_into(reader, &mut value)?;
    dst.push(value);
    Ok(())
}

/// Appends one element of a repeated message field to `dst`.
#[inline]
pub fn push_repeated_message<T: ProtoMessage>(
    key: ProtoKey,
    reader: &mut Reader<'_>,
    dst: &mut Vec<T>,
) -> Result<(), DecodeError> {
    let mut message = T::default();
    merge_message_field(key, reader, &mut message)?;
    dst.push(message);
    Ok(())
}

#[inline]
fn packed_body_len<T: ProtoEncode>(values: &[T]) -> usize {
    values.iter().map(ProtoEncode::encoded_len).sum()
}

/// Encodes a repeated scalar field as a single packed record.
#[inline]
pub fn encode_packed_field<T: ProtoEncode, B: BufMut>(
    tag: u32,
    values: &[T],
    writer: &mut Writer<B>,
) {
    if values.is_empty() {
        return;
    }
    writer.key(WireType::Len, tag);
    writer.length(packed_body_len(values));
    for value in values {
        value.encode(writer);
    }
}

#[inline]
pub fn encoded_packed_field_len<T: ProtoEncode>(tag: u32, values: &[T]) -> usize {
    if values.is_empty() {
        return 0;
    }
    sizer::key_size(tag) + sizer::len_delimited_size(packed_body_len(values))
}

/// Encodes every element of a repeated field with its own key.
///
/// Unlike singular fields, elements holding the default value are written.
#[inline]
pub fn encode_repeated_field<T: ProtoEncode, B: BufMut>(
    tag: u32,
    values: &[T],
    writer: &mut Writer<B>,
) {
    for value in values {
        writer.key(T::WIRE_TYPE, tag);
        value.encode(writer);
    }
}

#[inline]
pub fn encoded_repeated_field_len<T: ProtoEncode>(tag: u32, values: &[T]) -> usize {
    values.len() * sizer::key_size(tag) + packed_body_len(values)
}

/// Encodes every message of a repeated message field.
#[inline]
pub fn encode_repeated_messages<T: ProtoMessage, B: BufMut>(
    tag: u32,
    messages: &[T],
    writer: &mut Writer<B>,
) {
    for message in messages {
        super::encode_message_field(tag, message, writer);
    }
}

#[inline]
pub fn encoded_repeated_messages_len<T: ProtoMessage>(tag: u32, messages: &[T]) -> usize {
    messages
        .iter()
        .map(|message| super::encoded_message_field_len(tag, message))
        .sum()
}
