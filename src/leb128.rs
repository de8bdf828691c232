//! LEB128 variable-length integer encoding/decoding, and the zig-zag mapping
//! used by `sint32`/`sint64`.

// This module uses `as` casts which have been reviewed for correctness.
#![allow(clippy::as_conversions)]

use crate::error::DecodeErrorKind;

/// Types that can be encoded as, and decoded from, a LEB128 integer.
pub trait LebCodec: Sized + Copy {
    /// Maximum number of bytes a value of this type occupies on the wire.
    const MAX_LEB_BYTES: usize;

    /// Decode a LEB128 variable length integer from the front of `data`.
    ///
    /// Returns a tuple of the decoded value and the number of bytes read to
    /// decode said value.
    ///
    /// # Errors
    ///
    /// * [`DecodeErrorKind::Truncated`] if `data` ends before a byte with the
    ///   continuation bit cleared is found.
    /// * [`DecodeErrorKind::VarintOverflow`] if the encoding is longer than
    ///   [`LebCodec::MAX_LEB_BYTES`] or sets bits outside of `Self`.
    fn decode_leb128(data: &[u8]) -> Result<(Self, usize), DecodeErrorKind>;

    /// Encode `self` as a LEB128 variable length integer into the provided
    /// buffer, returning the number of bytes written.
    fn encode_leb128<B: bytes::BufMut>(self, buf: &mut B) -> usize;
}

macro_rules! impl_leb_codec {
    ($ty:ty, $max_bytes:expr, $last_byte_limit:expr) => {
        impl LebCodec for $ty {
            const MAX_LEB_BYTES: usize = $max_bytes;

            #[inline]
            fn decode_leb128(data: &[u8]) -> Result<(Self, usize), DecodeErrorKind> {
                // Fast path, most varints on the wire are a single byte.
                match data.first() {
                    Some(&b) if b < 0x80 => return Ok((<$ty>::from(b), 1)),
                    Some(_) => (),
                    None => return Err(DecodeErrorKind::Truncated),
                }

                let mut value: $ty = 0;
                for (i, &b) in data.iter().take(Self::MAX_LEB_BYTES).enumerate() {
                    // The final byte can only carry the bits that are left over.
                    if i == Self::MAX_LEB_BYTES - 1 && b >= $last_byte_limit {
                        return Err(DecodeErrorKind::VarintOverflow);
                    }
                    value |= <$ty>::from(b & 0x7f) << (7 * i);
                    if b < 0x80 {
                        return Ok((value, i + 1));
                    }
                }

                // Every byte we saw had the continuation bit set.
                Err(DecodeErrorKind::Truncated)
            }

            #[inline]
            fn encode_leb128<B: bytes::BufMut>(self, buf: &mut B) -> usize {
                let mut value = self;
                let mut written = 1;
                while value >= 0x80 {
                    buf.put_u8((value as u8 & 0x7f) | 0x80);
                    value >>= 7;
                    written += 1;
                }
                buf.put_u8(value as u8);
                written
            }
        }
    };
}

// 9 * 7 = 63 bits, the 10th byte holds the single remaining bit.
impl_leb_codec!(u64, 10, 0x02);
// 4 * 7 = 28 bits, the 5th byte holds the remaining 4 bits.
impl_leb_codec!(u32, 5, 0x10);

#[inline]
pub const fn zigzag_encode_32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

#[inline]
pub const fn zigzag_decode_32(n: u32) -> i32 {
    ((n >> 1) as i32) ^ (-((n & 1) as i32))
}

#[inline]
pub const fn zigzag_encode_64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

#[inline]
pub const fn zigzag_decode_64(n: u64) -> i64 {
    ((n >> 1) as i64) ^ (-((n & 1) as i64))
}
