//! Commands a plugin sends to the host.

use bytes::BufMut;

use super::EventType;
use crate::codec::{self, proto_enum, ProtoEnum, ProtoMessage, ProtoOneof};
use crate::error::DecodeError;
use crate::reader::Reader;
use crate::wire::ProtoKey;
use crate::writer::Writer;

proto_enum! {
    pub enum CommandName {
        Subscribe = 0,
        Unsubscribe = 1,
        SetSelectable = 2,
    }
}

/// ```protobuf
/// message PluginCommand {
///   CommandName name = 1;
///   oneof payload {
///     SubscribePayload subscribe_payload = 2;
///     UnsubscribePayload unsubscribe_payload = 3;
///     bool set_selectable_payload = 4;
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PluginCommand {
    pub name: i32,
    pub payload: Option<CommandPayload>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandPayload {
    Subscribe(SubscribePayload),
    Unsubscribe(UnsubscribePayload),
    SetSelectable(bool),
}

impl PluginCommand {
    /// Ask the host to start sending `events`.
    pub fn subscribe(events: &[EventType]) -> Self {
        PluginCommand {
            name: CommandName::Subscribe.to_i32(),
            payload: Some(CommandPayload::Subscribe(SubscribePayload {
                subscriptions: Some(EventNameList::new(events)),
            })),
        }
    }

    pub fn unsubscribe(events: &[EventType]) -> Self {
        PluginCommand {
            name: CommandName::Unsubscribe.to_i32(),
            payload: Some(CommandPayload::Unsubscribe(UnsubscribePayload {
                subscriptions: Some(EventNameList::new(events)),
            })),
        }
    }

    pub fn set_selectable(selectable: bool) -> Self {
        PluginCommand {
            name: CommandName::SetSelectable.to_i32(),
            payload: Some(CommandPayload::SetSelectable(selectable)),
        }
    }

    pub fn name(&self) -> Option<CommandName> {
        CommandName::from_i32(self.name)
    }
}

impl ProtoMessage for PluginCommand {
    fn merge_field(&mut self, key: ProtoKey, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
        match key.tag() {
            1 => codec::decode_field(key, reader, &mut self.name),
            _ => {
                if !codec::decode_oneof_field(&mut self.payload, key, reader)? {
                    reader.skip_field(key)?;
                }
                Ok(())
            }
        }
    }

    fn encode_message<B: BufMut>(&self, writer: &mut Writer<B>) {
        codec::encode_field(1, &self.name, writer);
        codec::encode_oneof_field(&self.payload, writer);
    }

    fn encoded_message_len(&self) -> usize {
        codec::encoded_field_len(1, &self.name) + codec::encoded_oneof_field_len(&self.payload)
    }
}

impl ProtoOneof for CommandPayload {
    fn merge_variant(
        dst: &mut Option<Self>,
        key: ProtoKey,
        reader: &mut Reader<'_>,
    ) -> Result<bool, DecodeError> {
        match key.tag() {
            2 => match dst {
                Some(CommandPayload::Subscribe(payload)) => {
                    codec::merge_message_field(key, reader, payload)?
                }
                _ => {
                    let payload = codec::decode_message_field(key, reader)?;
                    *dst = Some(CommandPayload::Subscribe(payload));
                }
            },
            3 => match dst {
                Some(CommandPayload::Unsubscribe(payload)) => {
                    codec::merge_message_field(key, reader, payload)?
                }
                _ => {
                    let payload = codec::decode_message_field(key, reader)?;
                    *dst = Some(CommandPayload::Unsubscribe(payload));
                }
            },
            4 => *dst = Some(CommandPayload::SetSelectable(codec::decode_value(key, reader)?)),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn encode_variant<B: BufMut>(&self, writer: &mut Writer<B>) {
        match self {
            CommandPayload::Subscribe(payload) => codec::encode_message_field(2, payload, writer),
            CommandPayload::Unsubscribe(payload) => codec::encode_message_field(3, payload, writer),
            CommandPayload::SetSelectable(value) => codec::encode_value(4, value, writer),
        }
    }

    fn encoded_variant_len(&self) -> usize {
        match self {
            CommandPayload::Subscribe(payload) => codec::encoded_message_field_len(2, payload),
            CommandPayload::Unsubscribe(payload) => codec::encoded_message_field_len(3, payload),
            CommandPayload::SetSelectable(value) => codec::encoded_value_len(4, value),
        }
    }
}

/// Declares a payload wrapping a single `EventNameList subscriptions = 1;`.
macro_rules! subscriptions_payload {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $name {
            pub subscriptions: Option<EventNameList>,
        }

        impl ProtoMessage for $name {
            fn merge_field(
                &mut self,
                key: ProtoKey,
                reader: &mut Reader<'_>,
            ) -> Result<(), DecodeError> {
                match key.tag() {
                    1 => codec::merge_optional_message_field(key, reader, &mut self.subscriptions),
                    _ => reader.skip_field(key),
                }
            }

            fn encode_message<B: BufMut>(&self, writer: &mut Writer<B>) {
                if let Some(subscriptions) = &self.subscriptions {
                    codec::encode_message_field(1, subscriptions, writer);
                }
            }

            fn encoded_message_len(&self) -> usize {
                self.subscriptions
                    .as_ref()
                    .map_or(0, |subscriptions| codec::encoded_message_field_len(1, subscriptions))
            }
        }
    };
}

subscriptions_payload!(SubscribePayload);
subscriptions_payload!(UnsubscribePayload);

/// `message EventNameList { repeated EventType event_types = 1; }`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventNameList {
    /// Raw [`EventType`] values, packed on the wire.
    pub event_types: Vec<i32>,
}

impl EventNameList {
    pub fn new(events: &[EventType]) -> Self {
        EventNameList {
            event_types: events.iter().map(|event| event.to_i32()).collect(),
        }
    }

    /// The event types this schema knows, in order.
    pub fn event_types(&self) -> impl Iterator<Item = EventType> + '_ {
        self.event_types.iter().copied().filter_map(EventType::from_i32)
    }
}

impl ProtoMessage for EventNameList {
    fn merge_field(&mut self, key: ProtoKey, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
        match key.tag() {
            1 => codec::decode_repeated_field(key, reader, &mut self.event_types),
            _ => reader.skip_field(key),
        }
    }

    fn encode_message<B: BufMut>(&self, writer: &mut Writer<B>) {
        codec::encode_packed_field(1, &self.event_types, writer);
    }

    fn encoded_message_len(&self) -> usize {
        codec::encoded_packed_field_len(1, &self.event_types)
    }
}
