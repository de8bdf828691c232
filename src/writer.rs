//! Append-only encoder over any [`bytes::BufMut`].

use bytes::{BufMut, Bytes, BytesMut};

use crate::leb128::{zigzag_encode_32, zigzag_encode_64, LebCodec};
use crate::wire::{self, WireType};

/// Writes protobuf primitives to an underlying buffer.
///
/// Writing can not fail. Length-delimited values are written in two steps,
/// [`Writer::length`] with a size computed through [`crate::sizer`] and then
/// the payload itself, so nothing is ever buffered twice.
#[derive(Debug, Default)]
pub struct Writer<B = BytesMut> {
    buf: B,
}

impl Writer<BytesMut> {
    pub fn with_capacity(capacity: usize) -> Self {
        Writer::new(BytesMut::with_capacity(capacity))
    }

    /// Freeze the written bytes.
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

impl<B: BufMut> Writer<B> {
    pub fn new(buf: B) -> Self {
        Writer { buf }
    }

    pub fn get_ref(&self) -> &B {
        &self.buf
    }

    pub fn into_inner(self) -> B {
        self.buf
    }

    /// Writes the key (field number and wire type) that precedes every field.
    #[inline]
    pub fn key(&mut self, wire_type: WireType, tag: u32) {
        wire::encode_key(wire_type, tag, &mut self.buf);
    }

    #[inline]
    pub fn varint(&mut self, value: u64) {
        value.encode_leb128(&mut self.buf);
    }

    /// Negative values are sign-extended to 64 bits.
    #[inline]
    #[allow(clippy::as_conversions)]
    pub fn int32(&mut self, value: i32) {
        self.varint(value as i64 as u64);
    }

    #[inline]
    #[allow(clippy::as_conversions)]
    pub fn int64(&mut self, value: i64) {
        self.varint(value as u64);
    }

    #[inline]
    pub fn sint32(&mut self, value: i32) {
        self.varint(u64::from(zigzag_encode_32(value)));
    }

    #[inline]
    pub fn sint64(&mut self, value: i64) {
        self.varint(zigzag_encode_64(value));
    }

    #[inline]
    pub fn bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    #[inline]
    pub fn fixed32(&mut self, value: u32) {
        self.buf.put_u32_le(value);
    }

    #[inline]
    pub fn fixed64(&mut self, value: u64) {
        self.buf.put_u64_le(value);
    }

    #[inline]
    pub fn sfixed32(&mut self, value: i32) {
        self.buf.put_i32_le(value);
    }

    #[inline]
    pub fn sfixed64(&mut self, value: i64) {
        self.buf.put_i64_le(value);
    }

    #[inline]
    pub fn float(&mut self, value: f32) {
        self.buf.put_f32_le(value);
    }

    #[inline]
    pub fn double(&mut self, value: f64) {
        self.buf.put_f64_le(value);
    }

    /// Writes the length prefix of a length-delimited value.
    #[inline]
    #[allow(clippy::as_conversions)]
    pub fn length(&mut self, len: usize) {
        self.varint(len as u64);
    }

    /// Writes a raw payload. The caller has already written its length.
    #[inline]
    pub fn bytes(&mut self, data: &[u8]) {
        self.buf.put_slice(data);
    }

    /// Writes a raw UTF-8 payload. The caller has already written its length.
    #[inline]
    pub fn string(&mut self, data: &str) {
        self.buf.put_slice(data.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::Reader;
    use crate::sizer;

    #[test]
    fn test_uint32_example() {
        let mut writer = Writer::new(Vec::new());
        writer.key(WireType::Varint, 1);
        writer.varint(300);
        assert_eq!(writer.into_inner(), [0x08, 0xAC, 0x02]);
    }

    #[test]
    fn test_string_example() {
        let mut writer = Writer::with_capacity(4);
        writer.key(WireType::Len, 1);
        writer.length("hi".len());
        writer.string("hi");
        assert_eq!(&writer.finish()[..], &[0x0A, 0x02, 0x68, 0x69]);
    }

    #[test]
    fn test_zero_is_one_byte() {
        let mut writer = Writer::new(Vec::new());
        writer.varint(0);
        writer.bool(false);
        writer.bool(true);
        assert_eq!(writer.into_inner(), [0x00, 0x00, 0x01]);
    }

    #[test]
    fn test_writer_reader_agree() {
        let mut writer = Writer::new(Vec::new());
        writer.int32(-5);
        writer.int64(i64::MIN);
        writer.sint32(i32::MIN);
        writer.sint64(-3);
        writer.fixed32(7);
        writer.fixed64(u64::MAX);
        writer.sfixed32(-7);
        writer.sfixed64(i64::MIN);
        writer.float(1.5);
        writer.double(-0.25);
        let buf = writer.into_inner();

        let expected_len = sizer::int32_size(-5)
            + sizer::int64_size(i64::MIN)
            + sizer::sint32_size(i32::MIN)
            + sizer::sint64_size(-3)
            + 2 * sizer::FIXED32_SIZE
            + 2 * sizer::FIXED64_SIZE
            + sizer::FIXED32_SIZE
            + sizer::FIXED64_SIZE;
        assert_eq!(buf.len(), expected_len);

        let mut reader = Reader::new(&buf);
        assert_eq!(reader.int32().unwrap(), -5);
        assert_eq!(reader.int64().unwrap(), i64::MIN);
        assert_eq!(reader.sint32().unwrap(), i32::MIN);
        assert_eq!(reader.sint64().unwrap(), -3);
        assert_eq!(reader.fixed32().unwrap(), 7);
        assert_eq!(reader.fixed64().unwrap(), u64::MAX);
        assert_eq!(reader.sfixed32().unwrap(), -7);
        assert_eq!(reader.sfixed64().unwrap(), i64::MIN);
        assert_eq!(reader.float().unwrap(), 1.5);
        assert_eq!(reader.double().unwrap(), -0.25);
        assert!(reader.eof());
    }
}
