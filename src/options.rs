//! Configuration for decoding.

/// Default maximum nesting depth of length-delimited messages.
pub const DEFAULT_RECURSION_LIMIT: u32 = 100;

/// Options that control how a [`Reader`](crate::reader::Reader) decodes.
///
/// The defaults match the permissive behavior of other implementations of the
/// same wire format: field wire types are trusted and not checked against the
/// schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject known fields whose wire type does not match the schema.
    pub(crate) strict_wire_types: bool,
    /// Maximum depth of nested length-delimited messages.
    pub(crate) recursion_limit: u32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict_wire_types: false,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl DecodeOptions {
    /// Create a new set of options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`TypeMismatch`](crate::error::DecodeErrorKind::TypeMismatch)
    /// when a known field arrives with a wire type its schema type can't have.
    pub fn strict_wire_types(mut self, strict: bool) -> Self {
        self.strict_wire_types = strict;
        self
    }

    /// Set the maximum nesting depth of messages.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict_wire_types
    }
}
