//! Packed repeated field decoding.
//!
//! A packed field is a single length-delimited record holding the elements
//! back to back, without keys. Decoding runs over a sub-reader bounded by
//! that length and stops once it is exhausted. An element that straddles the
//! end of the record fails with [`Truncated`](crate::error::DecodeErrorKind::Truncated).

use bytes::Buf;

use super::{Fixed32, Fixed64, ProtoDecode, Sfixed32, Sfixed64, Sint32, Sint64};
use crate::error::DecodeError;
use crate::reader::Reader;

/// Types that can appear as the elements of a packed repeated field.
pub trait PackedDecode: ProtoDecode {
    /// Decode every element left in `reader`, appending them to `dst`.
    fn decode_packed_into(reader: &mut Reader<'_>, dst: &mut Vec<Self>) -> Result<(), DecodeError> {
        while !reader.eof() {
            let mut value = Self::default();
            Self::decode_into(reader, &mut value)?;
            dst.push(value);
        }
        Ok(())
    }
}

impl PackedDecode for u32 {}
impl PackedDecode for u64 {}
impl PackedDecode for i32 {}
impl PackedDecode for i64 {}
impl PackedDecode for bool {}
impl PackedDecode for Sint32 {}
impl PackedDecode for Sint64 {}

/// Fixed-width elements are sized up front and decoded in one pass over the
/// whole chunks of the record.
macro_rules! impl_packed_fixed {
    ($($ty:ty => $size:expr, |$chunk:ident| $read:expr);+ $(;)?) => {$(
        impl PackedDecode for $ty {
            #[inline]
            fn decode_packed_into(
                reader: &mut Reader<'_>,
                dst: &mut Vec<Self>,
            ) -> Result<(), DecodeError> {
                let data = reader.chunk();
                let whole = data.len() - data.len() % $size;
                dst.reserve(whole / $size);
                dst.extend(data[..whole].chunks_exact($size).map(|mut $chunk| $read));
                reader.advance(whole);

                // Anything left over is a partial element, this fails.
                while !reader.eof() {
                    let mut value = Self::default();
                    Self::decode_into(reader, &mut value)?;
                    dst.push(value);
                }
                Ok(())
            }
        }
    )+};
}

impl_packed_fixed! {
    Fixed32 => 4, |chunk| Fixed32(chunk.get_u32_le());
    Sfixed32 => 4, |chunk| Sfixed32(chunk.get_i32_le());
    f32 => 4, |chunk| chunk.get_f32_le();
    Fixed64 => 8, |chunk| Fixed64(chunk.get_u64_le());
    Sfixed64 => 8, |chunk| Sfixed64(chunk.get_i64_le());
    f64 => 8, |chunk| chunk.get_f64_le();
}
