//! Length-delimited protobuf types (bytes, string).
//!
//! Decoding always copies out of the input, so decoded messages never borrow
//! from the buffer they were read from.

use bytes::{BufMut, Bytes};

use super::{ProtoDecode, ProtoEncode, ProtoType};
use crate::error::DecodeError;
use crate::reader::Reader;
use crate::sizer;
use crate::wire::WireType;
use crate::writer::Writer;

impl ProtoType for String {
    const WIRE_TYPE: WireType = WireType::Len;
}

impl ProtoDecode for String {
    #[inline]
    fn decode_into(reader: &mut Reader<'_>, dst: &mut Self) -> Result<(), DecodeError> {
        let value = reader.string()?;
        // It's possible for a field to show up multiple times in an encoded
        // payload, reuse the allocation from the previous occurrence.
        dst.clear();
        dst.push_str(value);
        Ok(())
    }
}

impl ProtoEncode for String {
    #[inline]
    fn encode<B: BufMut>(&self, writer: &mut Writer<B>) {
        writer.length(self.len());
        writer.string(self);
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        sizer::len_delimited_size(self.len())
    }
}

impl ProtoType for Vec<u8> {
    const WIRE_TYPE: WireType = WireType::Len;
}

impl ProtoDecode for Vec<u8> {
    #[inline]
    fn decode_into(reader: &mut Reader<'_>, dst: &mut Self) -> Result<(), DecodeError> {
        let value = reader.bytes()?;
        dst.clear();
        dst.extend_from_slice(value);
        Ok(())
    }
}

impl ProtoEncode for Vec<u8> {
    #[inline]
    fn encode<B: BufMut>(&self, writer: &mut Writer<B>) {
        writer.length(self.len());
        writer.bytes(self);
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        sizer::len_delimited_size(self.len())
    }
}

impl ProtoType for Bytes {
    const WIRE_TYPE: WireType = WireType::Len;
}

impl ProtoDecode for Bytes {
    #[inline]
    fn decode_into(reader: &mut Reader<'_>, dst: &mut Self) -> Result<(), DecodeError> {
        *dst = Bytes::copy_from_slice(reader.bytes()?);
        Ok(())
    }
}

impl ProtoEncode for Bytes {
    #[inline]
    fn encode<B: BufMut>(&self, writer: &mut Writer<B>) {
        writer.length(self.len());
        writer.bytes(self);
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        sizer::len_delimited_size(self.len())
    }
}
