//! Bounds-checked cursor over an encoded buffer.

use bytes::Buf;
use tracing::{debug, trace};

use crate::error::{DecodeError, DecodeErrorKind};
use crate::leb128::{zigzag_decode_32, zigzag_decode_64, LebCodec};
use crate::options::DecodeOptions;
use crate::wire::{ProtoKey, WireType};

/// A cursor over a borrowed, immutable byte buffer.
///
/// Every read advances the cursor by exactly the number of bytes it consumed,
/// or fails with [`DecodeErrorKind::Truncated`] without reading past the end.
///
/// Nested messages and packed fields are read through sub-readers that borrow
/// a sub-range of the same buffer, see [`Reader::nested`]. Error offsets are
/// always reported relative to the start of the outermost buffer.
#[derive(Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    /// Offset of `buf` within the outermost buffer, for error reporting.
    base: usize,
    /// Where the key of the most recently read field started.
    field_start: usize,
    depth: u32,
    options: DecodeOptions,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_options(buf, DecodeOptions::default())
    }

    pub fn with_options(buf: &'a [u8], options: DecodeOptions) -> Self {
        Reader {
            buf,
            pos: 0,
            base: 0,
            field_start: 0,
            depth: 0,
            options,
        }
    }

    /// Returns `true` once every byte of this reader's span has been consumed.
    #[inline]
    pub fn eof(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Current position of the cursor within this reader's span.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// How many messages deep this reader is.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[cold]
    fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(kind, self.base + self.pos)
    }

    /// Fail unless at least `len` more bytes are available.
    #[inline]
    fn ensure(&self, len: usize) -> Result<(), DecodeError> {
        if self.buf.len() - self.pos < len {
            return Err(self.error(DecodeErrorKind::Truncated));
        }
        Ok(())
    }

    /// Reads the key of the next field.
    ///
    /// This is what drives every message decode loop:
    ///
    /// ```
    /// # use protolite::reader::Reader;
    /// # fn main() -> Result<(), protolite::error::DecodeError> {
    /// let mut reader = Reader::new(&[0x08, 0x96, 0x01]);
    /// while !reader.eof() {
    ///     let key = reader.tag()?;
    ///     match key.tag() {
    ///         1 => assert_eq!(reader.varint()?, 150),
    ///         _ => reader.skip_field(key)?,
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    pub fn tag(&mut self) -> Result<ProtoKey, DecodeError> {
        self.field_start = self.pos;
        let raw = self.varint()?;
        ProtoKey::try_from_raw(raw)
            .map_err(|kind| DecodeError::new(kind, self.base + self.field_start))
    }

    #[inline]
    pub fn varint(&mut self) -> Result<u64, DecodeError> {
        let (value, len) =
            u64::decode_leb128(&self.buf[self.pos..]).map_err(|kind| self.error(kind))?;
        self.pos += len;
        Ok(value)
    }

    /// Reads a `uint32`, keeping only the low 32 bits of the varint.
    #[inline]
    #[allow(clippy::as_conversions)]
    pub fn varint32(&mut self) -> Result<u32, DecodeError> {
        self.varint().map(|v| v as u32)
    }

    /// Reads an `int32`, which is sign extended to 64 bits on the wire.
    #[inline]
    #[allow(clippy::as_conversions)]
    pub fn int32(&mut self) -> Result<i32, DecodeError> {
        self.varint().map(|v| v as i32)
    }

    #[inline]
    #[allow(clippy::as_conversions)]
    pub fn int64(&mut self) -> Result<i64, DecodeError> {
        self.varint().map(|v| v as i64)
    }

    #[inline]
    pub fn sint32(&mut self) -> Result<i32, DecodeError> {
        self.varint32().map(zigzag_decode_32)
    }

    #[inline]
    pub fn sint64(&mut self) -> Result<i64, DecodeError> {
        self.varint().map(zigzag_decode_64)
    }

    #[inline]
    pub fn bool(&mut self) -> Result<bool, DecodeError> {
        self.varint().map(|v| v != 0)
    }

    #[inline]
    pub fn fixed32(&mut self) -> Result<u32, DecodeError> {
        self.ensure(4)?;
        Ok(self.get_u32_le())
    }

    #[inline]
    pub fn fixed64(&mut self) -> Result<u64, DecodeError> {
        self.ensure(8)?;
        Ok(self.get_u64_le())
    }

    #[inline]
    pub fn sfixed32(&mut self) -> Result<i32, DecodeError> {
        self.ensure(4)?;
        Ok(self.get_i32_le())
    }

    #[inline]
    pub fn sfixed64(&mut self) -> Result<i64, DecodeError> {
        self.ensure(8)?;
        Ok(self.get_i64_le())
    }

    #[inline]
    pub fn float(&mut self) -> Result<f32, DecodeError> {
        self.ensure(4)?;
        Ok(self.get_f32_le())
    }

    #[inline]
    pub fn double(&mut self) -> Result<f64, DecodeError> {
        self.ensure(8)?;
        Ok(self.get_f64_le())
    }

    /// Reads a length prefix, checking that the payload it announces fits in
    /// the remainder of this reader's span.
    #[inline]
    pub fn length(&mut self) -> Result<usize, DecodeError> {
        let len = self.varint()?;
        match usize::try_from(len) {
            Ok(len) if len <= self.buf.len() - self.pos => Ok(len),
            _ => Err(self.error(DecodeErrorKind::Truncated)),
        }
    }

    /// Reads a length-delimited payload, borrowing it from the buffer.
    #[inline]
    pub fn bytes(&mut self) -> Result<&'a [u8], DecodeError> {
        let len = self.length()?;
        let start = self.pos;
        self.pos += len;
        Ok(&self.buf[start..self.pos])
    }

    /// Reads a length-delimited UTF-8 payload, borrowing it from the buffer.
    #[inline]
    pub fn string(&mut self) -> Result<&'a str, DecodeError> {
        let start = self.base + self.pos;
        let data = self.bytes()?;
        core::str::from_utf8(data).map_err(|_| DecodeError::new(DecodeErrorKind::InvalidUtf8, start))
    }

    /// Reads a length prefix and returns a reader scoped to the payload,
    /// advancing this reader past it.
    ///
    /// The returned reader borrows the same buffer, nothing is copied. It is
    /// positioned at the start of the payload and reports `eof()` at its end,
    /// so reads through it can never observe bytes that follow the payload.
    #[inline]
    pub fn delimited(&mut self) -> Result<Reader<'a>, DecodeError> {
        let len = self.length()?;
        Ok(self.split_span(len, self.depth))
    }

    fn split_span(&mut self, len: usize, depth: u32) -> Reader<'a> {
        let start = self.pos;
        self.pos += len;
        Reader {
            buf: &self.buf[start..self.pos],
            pos: 0,
            base: self.base + start,
            field_start: 0,
            depth,
            options: self.options,
        }
    }

    /// Decodes a nested, length-delimited message with `f`.
    ///
    /// `f` runs on a sub-reader bounded by the decoded length. This reader
    /// is advanced by the declared length, not by however much `f` consumed.
    pub fn nested<T, F>(&mut self, f: F) -> Result<T, DecodeError>
    where
        F: FnOnce(&mut Reader<'a>) -> Result<T, DecodeError>,
    {
        let len = self.length()?;
        self.enter()?;
        let mut sub = self.split_span(len, self.depth + 1);
        f(&mut sub)
    }

    #[inline]
    fn enter(&self) -> Result<(), DecodeError> {
        let limit = self.options.recursion_limit;
        if self.depth >= limit {
            debug!(limit, "recursion limit exceeded");
            return Err(self.error(DecodeErrorKind::RecursionLimitExceeded { limit }));
        }
        Ok(())
    }

    /// In strict mode, fail if `key` does not carry the `expected` wire type.
    ///
    /// Without strict mode the wire type is trusted and this always succeeds.
    #[inline]
    pub fn check_wire_type(&self, key: ProtoKey, expected: WireType) -> Result<(), DecodeError> {
        if self.options.strict_wire_types && key.wire_type() != expected {
            debug!(tag = key.tag(), ?expected, actual = ?key.wire_type(), "wire type mismatch");
            return Err(DecodeError::new(
                DecodeErrorKind::TypeMismatch {
                    field: key.tag(),
                    expected,
                    actual: key.wire_type(),
                },
                self.base + self.field_start,
            ));
        }
        Ok(())
    }

    /// Skips over the value of the field whose key was just read.
    ///
    /// Protobuf supports backwards and forwards compatibility by skipping
    /// fields we don't know about. We "skip" a field by advancing past it.
    pub fn skip_field(&mut self, key: ProtoKey) -> Result<(), DecodeError> {
        trace!(tag = key.tag(), wire_type = ?key.wire_type(), "skipping field");
        match key.wire_type() {
            WireType::SGroup => self.skip_group(Some(key.tag())),
            wire_type => self.skip(wire_type),
        }
    }

    /// Like [`Reader::skip_field`], but returns the raw bytes of the whole
    /// field, key included.
    pub fn skip_field_raw(&mut self, key: ProtoKey) -> Result<&'a [u8], DecodeError> {
        let start = self.field_start;
        self.skip_field(key)?;
        Ok(&self.buf[start..self.pos])
    }

    /// Skips over a value of the given wire type.
    ///
    /// A group started with [`WireType::SGroup`] is skipped up to the next
    /// end-group marker at the same depth. Prefer [`Reader::skip_field`], which
    /// also checks that the end-group marker closes the right field.
    pub fn skip(&mut self, wire_type: WireType) -> Result<(), DecodeError> {
        let skip_len = match wire_type {
            WireType::Varint => {
                self.varint()?;
                return Ok(());
            }
            WireType::I64 => 8,
            WireType::Len => self.length()?,
            WireType::I32 => 4,
            WireType::SGroup => return self.skip_group(None),
            WireType::EGroup => {
                return Err(self.error(DecodeErrorKind::InvalidWireType {
                    value: WireType::EGroup.into_val(),
                }));
            }
        };

        self.ensure(skip_len)?;
        self.pos += skip_len;
        Ok(())
    }

    /// Skips every field up to and including the end-group marker.
    fn skip_group(&mut self, tag: Option<u32>) -> Result<(), DecodeError> {
        trace!(?tag, "skipping group");
        self.enter()?;
        self.depth += 1;
        let result = self.skip_group_fields(tag);
        self.depth -= 1;
        result
    }

    fn skip_group_fields(&mut self, tag: Option<u32>) -> Result<(), DecodeError> {
        loop {
            if self.eof() {
                return Err(self.error(DecodeErrorKind::Truncated));
            }
            let key = self.tag()?;
            match key.wire_type() {
                WireType::EGroup => {
                    return match tag {
                        Some(expected) if expected != key.tag() => Err(DecodeError::new(
                            DecodeErrorKind::GroupMismatch {
                                expected,
                                actual: key.tag(),
                            },
                            self.base + self.field_start,
                        )),
                        _ => Ok(()),
                    };
                }
                WireType::SGroup => self.skip_group(Some(key.tag()))?,
                wire_type => self.skip(wire_type)?,
            }
        }
    }
}

impl Buf for Reader<'_> {
    #[inline]
    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.remaining(),
            "cannot advance past the end of the reader"
        );
        self.pos += cnt;
    }
}

impl core::fmt::Debug for Reader<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Reader")
            .field("len", &self.buf.len())
            .field("pos", &self.pos)
            .field("base", &self.base)
            .field("depth", &self.depth)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wire::encode_key;

    fn kind(result: Result<impl core::fmt::Debug, DecodeError>) -> DecodeErrorKind {
        result.expect_err("expected an error").kind()
    }

    #[test]
    fn test_tag_and_varint() {
        // Field 1, varint 300.
        let mut reader = Reader::new(&[0x08, 0xAC, 0x02]);
        let key = reader.tag().unwrap();
        assert_eq!(key.into_parts(), (WireType::Varint, 1));
        assert_eq!(reader.varint32().unwrap(), 300);
        assert!(reader.eof());

        let mut reader = Reader::new(&[0x08, 0xAC]);
        reader.tag().unwrap();
        let err = reader.varint().unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::Truncated);
        assert_eq!(err.offset(), 1);
    }

    #[test]
    fn test_string() {
        let mut reader = Reader::new(&[0x0A, 0x02, 0x68, 0x69]);
        let key = reader.tag().unwrap();
        assert_eq!(key.into_parts(), (WireType::Len, 1));
        assert_eq!(reader.string().unwrap(), "hi");
        assert!(reader.eof());

        let mut reader = Reader::new(&[0x02, 0xFF, 0xFE]);
        assert_eq!(kind(reader.string()), DecodeErrorKind::InvalidUtf8);
    }

    #[test]
    fn test_length_past_end() {
        let mut reader = Reader::new(&[0x05, 1, 2, 3]);
        assert_eq!(kind(reader.bytes()), DecodeErrorKind::Truncated);

        // A length that doesn't fit in memory is still just truncated input.
        let mut buf = Vec::new();
        u64::MAX.encode_leb128(&mut buf);
        let mut reader = Reader::new(&buf);
        assert_eq!(kind(reader.length()), DecodeErrorKind::Truncated);
    }

    #[test]
    fn test_fixed_width() {
        let data = [1, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xF0, 0x3F];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.fixed32().unwrap(), 1);
        assert_eq!(reader.fixed64().unwrap(), 2);
        assert_eq!(kind(reader.double()), DecodeErrorKind::Truncated);
        // A failed read doesn't move the cursor.
        assert_eq!(reader.position(), 12);
        assert_eq!(reader.remaining(), 4);

        let mut reader = Reader::new(&data[8..]);
        assert_eq!(reader.double().unwrap(), 1.0);
    }

    #[test]
    #[allow(clippy::as_conversions)]
    fn test_signed() {
        let mut buf = Vec::new();
        (-1i64 as u64).encode_leb128(&mut buf);
        1u64.encode_leb128(&mut buf);
        let mut reader = Reader::new(&buf);
        assert_eq!(reader.int32().unwrap(), -1);
        assert_eq!(reader.sint32().unwrap(), -1);
    }

    #[test]
    fn test_skip_field_varint() {
        let mut reader = Reader::new(&[42u8, 99]);
        reader.skip(WireType::Varint).unwrap();
        assert_eq!(reader.chunk(), &[99]);

        let mut reader = Reader::new(&[0x80, 0x01, 99]);
        reader.skip(WireType::Varint).unwrap();
        assert_eq!(reader.chunk(), &[99]);
    }

    #[test]
    fn test_skip_field_fixed() {
        let mut reader = Reader::new(&[1, 2, 3, 4, 99]);
        reader.skip(WireType::I32).unwrap();
        assert_eq!(reader.chunk(), &[99]);

        let mut reader = Reader::new(&[1, 2, 3, 4, 5, 6, 7, 8, 99]);
        reader.skip(WireType::I64).unwrap();
        assert_eq!(reader.chunk(), &[99]);

        let mut reader = Reader::new(&[1, 2, 3]);
        assert_eq!(kind(reader.skip(WireType::I32)), DecodeErrorKind::Truncated);
    }

    #[test]
    fn test_skip_field_len() {
        let mut reader = Reader::new(&[3, 1, 2, 3, 99]);
        reader.skip(WireType::Len).unwrap();
        assert_eq!(reader.chunk(), &[99]);

        let mut reader = Reader::new(&[0, 99]);
        reader.skip(WireType::Len).unwrap();
        assert_eq!(reader.chunk(), &[99]);
    }

    #[test]
    fn test_skip_group() {
        let mut buf = Vec::new();
        encode_key(WireType::SGroup, 5, &mut buf);
        encode_key(WireType::Varint, 1, &mut buf);
        buf.push(7);
        // A group within the group.
        encode_key(WireType::SGroup, 2, &mut buf);
        encode_key(WireType::Len, 1, &mut buf);
        buf.extend_from_slice(&[2, b'h', b'i']);
        encode_key(WireType::EGroup, 2, &mut buf);
        encode_key(WireType::EGroup, 5, &mut buf);
        buf.push(99);

        let mut reader = Reader::new(&buf);
        let key = reader.tag().unwrap();
        let raw = reader.skip_field_raw(key).unwrap();
        assert_eq!(raw, &buf[..buf.len() - 1]);
        assert_eq!(reader.chunk(), &[99]);
        assert_eq!(reader.depth(), 0);
    }

    #[test]
    fn test_skip_group_errors() {
        // Mismatched end group.
        let mut buf = Vec::new();
        encode_key(WireType::SGroup, 5, &mut buf);
        encode_key(WireType::EGroup, 6, &mut buf);
        let mut reader = Reader::new(&buf);
        let key = reader.tag().unwrap();
        assert_eq!(
            kind(reader.skip_field(key)),
            DecodeErrorKind::GroupMismatch {
                expected: 5,
                actual: 6
            }
        );

        // Unterminated group.
        let mut buf = Vec::new();
        encode_key(WireType::SGroup, 5, &mut buf);
        encode_key(WireType::Varint, 1, &mut buf);
        buf.push(1);
        let mut reader = Reader::new(&buf);
        let key = reader.tag().unwrap();
        assert_eq!(kind(reader.skip_field(key)), DecodeErrorKind::Truncated);

        // End group with nothing open.
        let mut reader = Reader::new(&[]);
        assert_eq!(
            kind(reader.skip(WireType::EGroup)),
            DecodeErrorKind::InvalidWireType { value: 4 }
        );
    }

    #[test]
    fn test_nested_is_contained() {
        // A nested span of 2 bytes followed by a sibling varint field.
        let data = [0x02, 0x08, 0x01, 0x10, 0x05];
        let mut reader = Reader::new(&data);
        let value = reader
            .nested(|sub| {
                let key = sub.tag()?;
                assert_eq!(key.tag(), 1);
                let value = sub.varint()?;
                assert!(sub.eof());
                Ok(value)
            })
            .unwrap();
        assert_eq!(value, 1);
        assert_eq!(reader.position(), 3);

        // The inner reader doesn't consume everything, the outer one still
        // lands right after the declared span.
        let mut reader = Reader::new(&data);
        reader.nested(|_sub| Ok(())).unwrap();
        assert_eq!(reader.tag().unwrap().tag(), 2);

        // A nested varint that runs into the sibling bytes is truncated at the
        // end of the span instead.
        let data = [0x02, 0x08, 0x81, 0x10, 0x05];
        let mut reader = Reader::new(&data);
        let err = reader
            .nested(|sub| {
                sub.tag()?;
                sub.varint()
            })
            .unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::Truncated);
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn test_recursion_limit() {
        // Three levels of empty-ish nesting: 02 [02 [00]]
        let data = [0x02, 0x01, 0x00];
        let options = DecodeOptions::new().recursion_limit(1);
        let mut reader = Reader::with_options(&data, options);
        let err = reader
            .nested(|sub| sub.nested(|_| Ok(())))
            .unwrap_err();
        assert_eq!(
            err.kind(),
            DecodeErrorKind::RecursionLimitExceeded { limit: 1 }
        );

        let mut reader = Reader::new(&data);
        reader.nested(|sub| sub.nested(|_| Ok(()))).unwrap();
        assert!(reader.eof());
    }

    #[test]
    fn test_strict_wire_types() {
        let data = [0x08, 0x01];
        let mut reader = Reader::new(&data);
        let key = reader.tag().unwrap();
        reader.check_wire_type(key, WireType::Len).unwrap();

        let mut reader = Reader::with_options(&data, DecodeOptions::new().strict_wire_types(true));
        let key = reader.tag().unwrap();
        reader.check_wire_type(key, WireType::Varint).unwrap();
        assert_eq!(
            kind(reader.check_wire_type(key, WireType::Len)),
            DecodeErrorKind::TypeMismatch {
                field: 1,
                expected: WireType::Len,
                actual: WireType::Varint,
            }
        );
    }
}
