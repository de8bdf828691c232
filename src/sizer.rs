//! Exact encoded sizes, computed without encoding anything.
//!
//! Every `encoded_len` in the crate is built from these functions, which is
//! what lets a parent write the length prefix of a nested message or packed
//! field before writing its body.

// Widening casts only; `From` is not usable in a `const fn`.
#![allow(clippy::as_conversions)]

use crate::leb128::{zigzag_encode_32, zigzag_encode_64};

/// Encoded size of a `fixed32`, `sfixed32` or `float`.
pub const FIXED32_SIZE: usize = 4;
/// Encoded size of a `fixed64`, `sfixed64` or `double`.
pub const FIXED64_SIZE: usize = 8;
/// Encoded size of a `bool`.
pub const BOOL_SIZE: usize = 1;

/// Number of bytes the LEB128 encoding of `value` occupies, `1..=10`.
#[inline]
pub const fn varint_size(value: u64) -> usize {
    if value < 1 << 7 {
        1
    } else if value < 1 << 14 {
        2
    } else if value < 1 << 21 {
        3
    } else if value < 1 << 28 {
        4
    } else if value < 1 << 35 {
        5
    } else if value < 1 << 42 {
        6
    } else if value < 1 << 49 {
        7
    } else if value < 1 << 56 {
        8
    } else if value < 1 << 63 {
        9
    } else {
        10
    }
}

/// Size of the key for field number `tag`.
///
/// The wire type occupies the low 3 bits and never changes the length.
#[inline]
pub const fn key_size(tag: u32) -> usize {
    varint_size((tag as u64) << 3)
}

/// Size of a length prefix followed by `len` bytes of payload.
#[inline]
pub const fn len_delimited_size(len: usize) -> usize {
    varint_size(len as u64) + len
}

/// `int32` values are sign extended, so every negative value takes 10 bytes.
#[inline]
pub const fn int32_size(value: i32) -> usize {
    varint_size(value as i64 as u64)
}

#[inline]
pub const fn int64_size(value: i64) -> usize {
    varint_size(value as u64)
}

#[inline]
pub const fn sint32_size(value: i32) -> usize {
    varint_size(zigzag_encode_32(value) as u64)
}

#[inline]
pub const fn sint64_size(value: i64) -> usize {
    varint_size(zigzag_encode_64(value))
}
