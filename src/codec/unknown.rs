//! Preservation of fields a message doesn't know about.

use bytes::BufMut;

use crate::error::DecodeError;
use crate::reader::Reader;
use crate::wire::ProtoKey;
use crate::writer::Writer;

/// Raw bytes of the unknown fields of a message, keys included, in the order
/// they were decoded.
///
/// A message that embeds this captures unknown fields instead of skipping
/// them and writes them back after its known fields, so a message from a
/// newer schema survives a decode/encode round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnknownFields {
    raw: Vec<u8>,
}

impl UnknownFields {
    /// Skip over the field whose `key` was just read, keeping its bytes.
    pub fn capture(&mut self, key: ProtoKey, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
        let field = reader.skip_field_raw(key)?;
        self.raw.extend_from_slice(field);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Write the captured fields verbatim.
    pub fn encode<B: BufMut>(&self, writer: &mut Writer<B>) {
        writer.bytes(&self.raw);
    }

    pub fn encoded_len(&self) -> usize {
        self.raw.len()
    }
}
