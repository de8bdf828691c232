use crate::wire::WireType;

/// Error returned when a buffer can not be decoded.
///
/// Carries the [`DecodeErrorKind`] and the byte offset at which it was
/// detected, counted from the start of the buffer passed to the outermost
/// [`Reader`](crate::reader::Reader).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} (at byte offset {offset})")]
pub struct DecodeError {
    kind: DecodeErrorKind,
    offset: usize,
}

impl DecodeError {
    pub const fn new(kind: DecodeErrorKind, offset: usize) -> Self {
        DecodeError { kind, offset }
    }

    /// The reason decoding failed.
    pub const fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    /// Offset into the buffer where the failure was detected.
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeErrorKind {
    /// A read needed more bytes than remain in the buffer.
    #[error("unexpected end of buffer")]
    Truncated,
    /// The wire type is not one we know how to frame.
    #[error("invalid 'wire type' value: {value}")]
    InvalidWireType { value: u8 },
    /// Field number of `0`, larger than `2^29 - 1`, or a key that overflows `u32`.
    #[error("invalid field key: {value}")]
    InvalidTag { value: u64 },
    #[error("invalid leb128 varint")]
    VarintOverflow,
    #[error("invalid UTF-8 in string field")]
    InvalidUtf8,
    /// An end-group marker closed a different group than the one that is open.
    #[error("end group for field {actual} does not match open group {expected}")]
    GroupMismatch { expected: u32, actual: u32 },
    #[error("nested messages exceed the recursion limit of {limit}")]
    RecursionLimitExceeded { limit: u32 },
    /// Only produced when strict wire type checking is enabled.
    #[error("field {field} expected wire type {expected:?}, found {actual:?}")]
    TypeMismatch {
        field: u32,
        expected: WireType,
        actual: WireType,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = DecodeError::new(DecodeErrorKind::Truncated, 3);
        assert_eq!(err.to_string(), "unexpected end of buffer (at byte offset 3)");

        let err = DecodeError::new(
            DecodeErrorKind::TypeMismatch {
                field: 2,
                expected: WireType::Varint,
                actual: WireType::Len,
            },
            0,
        );
        assert_eq!(
            err.to_string(),
            "field 2 expected wire type Varint, found Len (at byte offset 0)"
        );
    }
}
