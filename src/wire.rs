//! Wire format for Google's Protocol Buffers, aka [protobuf](https://protobuf.dev).

use core::num::NonZeroU32;

use crate::error::DecodeErrorKind;
use crate::leb128::LebCodec;
use crate::sizer;

/// Minimum value of a protobuf field number.
pub const MINIMUM_TAG_VAL: u32 = 1;
/// Maximum value of a protobuf field number.
pub const MAXIMUM_TAG_VAL: u32 = (1 << 29) - 1;

/// A decoded protobuf field key containing a wire type and field number.
///
/// The layout mirrors the protobuf wire format:
/// * Bits 0-2: wire type (0-5)
/// * Bits 3-31: field number (1 to 2^29-1)
///
/// Since field numbers start at 1, the minimum raw value is 8 (`1 << 3`),
/// guaranteeing the value is always non-zero. The max key value is
/// `(2^29-1) << 3 | 7` which is exactly `u32::MAX`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ProtoKey(NonZeroU32);

static_assertions::assert_eq_size!(ProtoKey, Option<ProtoKey>);

#[allow(clippy::as_conversions)]
impl ProtoKey {
    /// Creates a key from its parts.
    ///
    /// # Panics
    ///
    /// If `tag` is outside of [`MINIMUM_TAG_VAL`]`..=`[`MAXIMUM_TAG_VAL`].
    #[inline]
    pub fn new(tag: u32, wire_type: WireType) -> Self {
        assert!(
            (MINIMUM_TAG_VAL..=MAXIMUM_TAG_VAL).contains(&tag),
            "field number {tag} out of range"
        );
        let raw = (tag << 3) | u32::from(wire_type.into_val());
        match NonZeroU32::new(raw) {
            Some(raw) => ProtoKey(raw),
            None => unreachable!("field numbers start at 1"),
        }
    }

    /// Creates a new [`ProtoKey`] from a raw key value, validating the wire type
    /// and field number.
    #[inline]
    pub fn try_from_raw(raw_key: u64) -> Result<Self, DecodeErrorKind> {
        let Ok(raw) = u32::try_from(raw_key) else {
            return Err(DecodeErrorKind::InvalidTag { value: raw_key });
        };

        // Validate wire type.
        WireType::try_from_val((raw & 0b111) as u8)?;

        // Validate tag is in valid range.
        let tag = raw >> 3;
        if tag < MINIMUM_TAG_VAL {
            return Err(DecodeErrorKind::InvalidTag { value: raw_key });
        }

        match NonZeroU32::new(raw) {
            Some(raw) => Ok(ProtoKey(raw)),
            None => Err(DecodeErrorKind::InvalidTag { value: raw_key }),
        }
    }

    /// Returns the [`WireType`] component of this key.
    #[inline]
    pub fn wire_type(self) -> WireType {
        match WireType::try_from_val((self.0.get() & 0b111) as u8) {
            Ok(wire_type) => wire_type,
            Err(_) => unreachable!("wire type validated on construction"),
        }
    }

    /// Returns the field number component of this key.
    #[inline]
    pub const fn tag(self) -> u32 {
        self.0.get() >> 3
    }

    /// Decomposes this key into its [`WireType`] and field number components.
    #[inline]
    pub fn into_parts(self) -> (WireType, u32) {
        (self.wire_type(), self.tag())
    }

    /// The raw key as it appears on the wire, before varint encoding.
    #[inline]
    pub const fn into_raw(self) -> u32 {
        self.0.get()
    }
}

impl core::fmt::Debug for ProtoKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProtoKey")
            .field("wire_type", &self.wire_type())
            .field("tag", &self.tag())
            .finish()
    }
}

/// Encodes the provided tag and wire_type as a protobuf field key.
///
/// See the "Message Structure" section of
/// <https://protobuf.dev/programming-guides/encoding>.
#[inline]
pub fn encode_key<B: bytes::BufMut>(wire_type: WireType, tag: u32, buf: &mut B) {
    ProtoKey::new(tag, wire_type).into_raw().encode_leb128(buf);
}

/// Returns the encoded length of a field key (tag + wire type).
#[inline]
pub fn encoded_key_len(tag: u32) -> usize {
    sizer::key_size(tag)
}

/// Denotes the type of a field in an encoded protobuf message.
///
/// Protobuf messages are a series of key-value pairs. When encoded each key-value pair
/// is turned into a record consisting of a field number, a [`WireType`], and a payload.
/// The [`WireType`] indicates how large the proceeding payload is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum WireType {
    /// Variable length integer.
    ///
    /// Used for: `int32`, `int64`, `uint32`, `uint64`, `sint32`, `sint64`, `bool`, `enum`.
    Varint = 0,
    /// 64-bit integer.
    ///
    /// Used for: `fixed64`, `sfixed64`, `double`.
    I64 = 1,
    /// Variable length field.
    ///
    /// Used for: `string`, `bytes`, `message`, packed `repeated` fields.
    Len = 2,
    /// Group start (deprecated). Skipped on decode, never emitted.
    SGroup = 3,
    /// Group end (deprecated). Skipped on decode, never emitted.
    EGroup = 4,
    /// 32-bit integer.
    ///
    /// Used for: `fixed32`, `sfixed32`, `float`.
    I32 = 5,
}

static_assertions::assert_eq_size!(WireType, u8);

#[allow(clippy::as_conversions)]
impl WireType {
    /// Maximum value an [`WireType`] can be.
    pub const MAX_VAL: u8 = WireType::I32 as u8;

    /// Try to decode a [`WireType`] from the provided raw value.
    #[inline]
    pub const fn try_from_val(value: u8) -> Result<Self, DecodeErrorKind> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::I64),
            2 => Ok(WireType::Len),
            3 => Ok(WireType::SGroup),
            4 => Ok(WireType::EGroup),
            5 => Ok(WireType::I32),
            value => Err(DecodeErrorKind::InvalidWireType { value }),
        }
    }

    /// Return the raw value for this [`WireType`].
    #[inline]
    pub const fn into_val(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for WireType {
    type Error = DecodeErrorKind;

    #[inline]
    fn try_from(value: u8) -> Result<Self, DecodeErrorKind> {
        WireType::try_from_val(value)
    }
}
