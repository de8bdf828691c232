//! Message-level types and helpers.

use bytes::{BufMut, Bytes};

use crate::error::DecodeError;
use crate::options::DecodeOptions;
use crate::reader::Reader;
use crate::sizer;
use crate::wire::{ProtoKey, WireType};
use crate::writer::Writer;

/// Trait for protobuf message types.
///
/// A message only has to dispatch its own fields, framing of the message
/// body and of nested messages is handled by the provided methods and the
/// `*_message_field` helpers.
///
/// ```
/// use bytes::BufMut;
/// use protolite::codec::{self, ProtoMessage};
/// use protolite::error::DecodeError;
/// use protolite::reader::Reader;
/// use protolite::wire::ProtoKey;
/// use protolite::writer::Writer;
///
/// /// `message Counter { uint32 count = 1; }`
/// #[derive(Debug, Default, PartialEq)]
/// struct Counter {
///     count: u32,
/// }
///
/// impl ProtoMessage for Counter {
///     fn merge_field(&mut self, key: ProtoKey, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
///         match key.tag() {
///             1 => codec::decode_field(key, reader, &mut self.count),
///             _ => reader.skip_field(key),
///         }
///     }
///
///     fn encode_message<B: BufMut>(&self, writer: &mut Writer<B>) {
///         codec::encode_field(1, &self.count, writer);
///     }
///
///     fn encoded_message_len(&self) -> usize {
///         codec::encoded_field_len(1, &self.count)
///     }
/// }
///
/// let counter = Counter { count: 300 };
/// assert_eq!(&counter.encode()[..], &[0x08, 0xAC, 0x02]);
/// assert_eq!(Counter::decode(&[0x08, 0xAC, 0x02]).unwrap(), counter);
/// ```
pub trait ProtoMessage: Default {
    /// Decode the value of a single field into `self`.
    ///
    /// Called with the key that was just read. Fields this message doesn't
    /// know about must be skipped (or captured) so decoding can continue.
    fn merge_field(&mut self, key: ProtoKey, reader: &mut Reader<'_>) -> Result<(), DecodeError>;

    /// Encode the message body (without length prefix), fields in ascending
    /// field number order.
    fn encode_message<B: BufMut>(&self, writer: &mut Writer<B>);

    /// Returns the encoded length of the message body (without length prefix).
    fn encoded_message_len(&self) -> usize;

    /// Merge every remaining field of `reader` into `self`.
    fn merge(&mut self, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
        while !reader.eof() {
            let key = reader.tag()?;
            self.merge_field(key, reader)?;
        }
        Ok(())
    }

    /// Decode a message from the remainder of `reader`.
    fn decode_message(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut message = Self::default();
        message.merge(reader)?;
        Ok(message)
    }

    /// Decode a message that spans all of `buf`.
    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        Self::decode_with(buf, DecodeOptions::default())
    }

    fn decode_with(buf: &[u8], options: DecodeOptions) -> Result<Self, DecodeError> {
        Self::decode_message(&mut Reader::with_options(buf, options))
    }

    fn encode(&self) -> Bytes {
        let mut writer = Writer::with_capacity(self.encoded_message_len());
        self.encode_message(&mut writer);
        writer.finish()
    }

    fn encode_to_vec(&self) -> Vec<u8> {
        let mut writer = Writer::new(Vec::with_capacity(self.encoded_message_len()));
        self.encode_message(&mut writer);
        writer.into_inner()
    }
}

/// Merges a length-delimited nested message into `dst`.
///
/// A message field that occurs more than once is merged, not replaced.
#[inline]
pub fn merge_message_field<T: ProtoMessage>(
    key: ProtoKey,
    reader: &mut Reader<'_>,
    dst: &mut T,
) -> Result<(), DecodeError> {
    reader.check_wire_type(key, WireType::Len)?;
    reader.nested(|nested| dst.merge(nested))
}

/// Merges a nested message into an optional field, setting it if unset.
#[inline]
pub fn merge_optional_message_field<T: ProtoMessage>(
    key: ProtoKey,
    reader: &mut Reader<'_>,
    dst: &mut Option<T>,
) -> Result<(), DecodeError> {
    merge_message_field(key, reader, dst.get_or_insert_with(T::default))
}

/// Decodes a length-delimited nested message.
#[inline]
pub fn decode_message_field<T: ProtoMessage>(
    key: ProtoKey,
    reader: &mut Reader<'_>,
) -> Result<T, DecodeError> {
    let mut message = T::default();
    merge_message_field(key, reader, &mut message)?;
    Ok(message)
}

/// Encodes a message as a length-delimited field.
///
/// Writes the key and length prefix followed by the message body. Messages
/// are written even when empty, their presence is meaningful.
#[inline]
pub fn encode_message_field<T: ProtoMessage, B: BufMut>(
    tag: u32,
    message: &T,
    writer: &mut Writer<B>,
) {
    writer.key(WireType::Len, tag);
    writer.length(message.encoded_message_len());
    message.encode_message(writer);
}

/// Returns the encoded length of a message as a length-delimited field.
#[inline]
pub fn encoded_message_field_len<T: ProtoMessage>(tag: u32, message: &T) -> usize {
    sizer::key_size(tag) + sizer::len_delimited_size(message.encoded_message_len())
}
