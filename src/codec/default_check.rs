//! Default value checks for protobuf types.
//!
//! In proto3, fields holding their default value are not encoded.

/// Trait for checking if a value is the protobuf default without building a
/// default value to compare against.
pub trait IsProtoDefault {
    /// Returns true if this value is the protobuf default value.
    fn is_proto_default(&self) -> bool;
}

macro_rules! impl_zero_default {
    ($($ty:ty),+ $(,)?) => {$(
        impl IsProtoDefault for $ty {
            #[inline(always)]
            fn is_proto_default(&self) -> bool {
                *self == 0
            }
        }
    )+};
}

macro_rules! impl_wrapper_default {
    ($($ty:ty),+ $(,)?) => {$(
        impl IsProtoDefault for $ty {
            #[inline(always)]
            fn is_proto_default(&self) -> bool {
                self.0 == 0
            }
        }
    )+};
}

impl_zero_default!(u32, u64, i32, i64);
impl_wrapper_default!(
    super::Sint32,
    super::Sint64,
    super::Fixed32,
    super::Fixed64,
    super::Sfixed32,
    super::Sfixed64,
);

impl IsProtoDefault for bool {
    #[inline(always)]
    fn is_proto_default(&self) -> bool {
        !*self
    }
}

// Floating point - default is 0.0
impl IsProtoDefault for f32 {
    #[inline(always)]
    fn is_proto_default(&self) -> bool {
        *self == 0.0
    }
}

impl IsProtoDefault for f64 {
    #[inline(always)]
    fn is_proto_default(&self) -> bool {
        *self == 0.0
    }
}

impl IsProtoDefault for String {
    #[inline(always)]
    fn is_proto_default(&self) -> bool {
        self.is_empty()
    }
}

impl IsProtoDefault for Vec<u8> {
    #[inline(always)]
    fn is_proto_default(&self) -> bool {
        self.is_empty()
    }
}

impl IsProtoDefault for bytes::Bytes {
    #[inline(always)]
    fn is_proto_default(&self) -> bool {
        self.is_empty()
    }
}

/// An unset optional field is omitted, a set one is always written, even if
/// it holds a zero value.
impl<T> IsProtoDefault for Option<T> {
    #[inline(always)]
    fn is_proto_default(&self) -> bool {
        self.is_none()
    }
}
