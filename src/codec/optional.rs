//! Optional field support for protobuf.
//!
//! A proto3 `optional` field tracks presence: `None` is never written, while
//! `Some` is written even when it holds the default value.

use bytes::BufMut;

use super::{ProtoDecode, ProtoEncode, ProtoType};
use crate::error::DecodeError;
use crate::reader::Reader;
use crate::wire::WireType;
use crate::writer::Writer;

impl<T: ProtoType> ProtoType for Option<T> {
    const WIRE_TYPE: WireType = T::WIRE_TYPE;
}

impl<T: ProtoDecode> ProtoDecode for Option<T> {
    #[inline]
    fn decode_into(reader: &mut Reader<'_>, dst: &mut Self) -> Result<(), DecodeError> {
        T::decode_into(reader, dst.get_or_insert_with(T::default))
    }
}

impl<T: ProtoEncode> ProtoEncode for Option<T> {
    #[inline]
    fn encode<B: BufMut>(&self, writer: &mut Writer<B>) {
        if let Some(value) = self {
            value.encode(writer);
        }
    }

    #[inline]
    fn encoded_len(&self) -> usize {
        match self {
            Some(value) => value.encoded_len(),
            None => 0,
        }
    }
}
