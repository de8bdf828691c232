//! Scalar protobuf types and their encoding/decoding implementations.

use bytes::BufMut;

use super::{ProtoDecode, ProtoEncode, ProtoType};
use crate::error::DecodeError;
use crate::reader::Reader;
use crate::sizer;
use crate::wire::WireType;
use crate::writer::Writer;

/// Implements the codec traits for a scalar in terms of a [`Reader`] and
/// [`Writer`] method pair.
macro_rules! impl_scalar {
    ($ty:ty, $wire_type:expr, $read:ident, $write:ident, |$v:ident| $size:expr) => {
        impl ProtoType for $ty {
            const WIRE_TYPE: WireType = $wire_type;
        }

        impl ProtoDecode for $ty {
            #[inline]
            #[allow(clippy::useless_conversion)]
            fn decode_into(reader: &mut Reader<'_>, dst: &mut Self) -> Result<(), DecodeError> {
                *dst = reader.$read()?.into();
                Ok(())
            }
        }

        impl ProtoEncode for $ty {
            #[inline]
            #[allow(clippy::useless_conversion)]
            fn encode<B: BufMut>(&self, writer: &mut Writer<B>) {
                let $v = *self;
                writer.$write($v.into());
            }

            #[inline]
            fn encoded_len(&self) -> usize {
                let $v = *self;
                $size
            }
        }
    };
}

impl_scalar!(u64, WireType::Varint, varint, varint, |v| sizer::varint_size(v));
impl_scalar!(u32, WireType::Varint, varint32, varint, |v| sizer::varint_size(u64::from(v)));
impl_scalar!(i64, WireType::Varint, int64, int64, |v| sizer::int64_size(v));
impl_scalar!(i32, WireType::Varint, int32, int32, |v| sizer::int32_size(v));
impl_scalar!(bool, WireType::Varint, bool, bool, |_v| sizer::BOOL_SIZE);
impl_scalar!(f32, WireType::I32, float, float, |_v| sizer::FIXED32_SIZE);
impl_scalar!(f64, WireType::I64, double, double, |_v| sizer::FIXED64_SIZE);

/// Declares a newtype that selects a different wire encoding for a primitive.
macro_rules! scalar_wrapper {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[repr(transparent)]
        pub struct $name(pub $inner);

        impl core::ops::Deref for $name {
            type Target = $inner;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                $name(value)
            }
        }

        impl From<$name> for $inner {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

scalar_wrapper!(
    /// Wrapper for protobuf `sint32` (zigzag-encoded signed 32-bit integer).
    Sint32(i32)
);
scalar_wrapper!(
    /// Wrapper for protobuf `sint64` (zigzag-encoded signed 64-bit integer).
    Sint64(i64)
);
scalar_wrapper!(
    /// Wrapper for protobuf `fixed32` (little-endian unsigned 32-bit integer).
    Fixed32(u32)
);
scalar_wrapper!(
    /// Wrapper for protobuf `fixed64` (little-endian unsigned 64-bit integer).
    Fixed64(u64)
);
scalar_wrapper!(
    /// Wrapper for protobuf `sfixed32` (little-endian signed 32-bit integer).
    Sfixed32(i32)
);
scalar_wrapper!(
    /// Wrapper for protobuf `sfixed64` (little-endian signed 64-bit integer).
    Sfixed64(i64)
);

impl_scalar!(Sint32, WireType::Varint, sint32, sint32, |v| sizer::sint32_size(v.0));
impl_scalar!(Sint64, WireType::Varint, sint64, sint64, |v| sizer::sint64_size(v.0));
impl_scalar!(Fixed32, WireType::I32, fixed32, fixed32, |_v| sizer::FIXED32_SIZE);
impl_scalar!(Fixed64, WireType::I64, fixed64, fixed64, |_v| sizer::FIXED64_SIZE);
impl_scalar!(Sfixed32, WireType::I32, sfixed32, sfixed32, |_v| sizer::FIXED32_SIZE);
impl_scalar!(Sfixed64, WireType::I64, sfixed64, sfixed64, |_v| sizer::FIXED64_SIZE);
