//! Events the host pushes to a plugin.
//!
//! ```protobuf
//! message Event {
//!   EventType name = 1;
//!   oneof payload {
//!     ModeUpdatePayload mode_update_payload = 2;
//!     TabUpdatePayload tab_update_payload = 3;
//!     float timer_payload = 7;
//!     CopyDestination copy_to_clipboard_payload = 8;
//!     bool visible_payload = 9;
//!   }
//! }
//! ```

use bytes::BufMut;

use crate::codec::{self, proto_enum, ProtoEnum, ProtoMessage, ProtoOneof, UnknownFields};
use crate::error::DecodeError;
use crate::reader::Reader;
use crate::wire::ProtoKey;
use crate::writer::Writer;

proto_enum! {
    /// Kinds of events, also what a plugin subscribes to.
    pub enum EventType {
        ModeUpdate = 0,
        TabUpdate = 1,
        PaneUpdate = 2,
        Key = 3,
        Mouse = 4,
        Timer = 5,
        CopyToClipboard = 6,
        SystemClipboardFailure = 7,
        InputReceived = 8,
        Visible = 9,
    }
}

proto_enum! {
    pub enum InputMode {
        /// Input is written to the terminal.
        Normal = 0,
        /// Input is written to the terminal, but no mode switching is allowed.
        Locked = 1,
        Resize = 2,
        Pane = 3,
        Tab = 4,
        Scroll = 5,
        EnterSearch = 6,
        Search = 7,
        RenameTab = 8,
        RenamePane = 9,
        Session = 10,
        Move = 11,
        Prompt = 12,
        Tmux = 13,
    }
}

proto_enum! {
    /// Where copied text ended up.
    pub enum CopyDestination {
        Command = 0,
        Primary = 1,
        System = 2,
    }
}

impl InputMode {
    /// Short upper case label, as shown in a status bar.
    pub fn label(self) -> &'static str {
        match self {
            InputMode::Normal => "NORMAL",
            InputMode::Locked => "LOCKED",
            InputMode::Resize => "RESIZE",
            InputMode::Pane => "PANE",
            InputMode::Tab => "TAB",
            InputMode::Scroll => "SCROLL",
            InputMode::EnterSearch => "ENT-SEARCH",
            InputMode::Search => "SEARCH",
            InputMode::RenameTab => "RENAME-TAB",
            InputMode::RenamePane => "RENAME-PANE",
            InputMode::Session => "SESSION",
            InputMode::Move => "MOVE",
            InputMode::Prompt => "PROMPT",
            InputMode::Tmux => "TMUX",
        }
    }
}

/// An event, tagged by [`EventType`], with an optional payload.
///
/// Fields this schema doesn't know are kept and written back on encode.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Event {
    pub name: i32,
    pub payload: Option<EventPayload>,
    pub unknown_fields: UnknownFields,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    ModeUpdate(ModeUpdatePayload),
    TabUpdate(TabUpdatePayload),
    Timer(f32),
    /// A raw [`CopyDestination`].
    CopyToClipboard(i32),
    Visible(bool),
}

impl Event {
    pub fn new(name: EventType, payload: Option<EventPayload>) -> Self {
        Event {
            name: name.to_i32(),
            payload,
            unknown_fields: UnknownFields::default(),
        }
    }

    /// The event type, `None` if the host sent one this schema doesn't have.
    pub fn name(&self) -> Option<EventType> {
        EventType::from_i32(self.name)
    }
}

impl ProtoMessage for Event {
    fn merge_field(&mut self, key: ProtoKey, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
        match key.tag() {
            1 => codec::decode_field(key, reader, &mut self.name),
            _ => {
                if !codec::decode_oneof_field(&mut self.payload, key, reader)? {
                    self.unknown_fields.capture(key, reader)?;
                }
                Ok(())
            }
        }
    }

    fn encode_message<B: BufMut>(&self, writer: &mut Writer<B>) {
        codec::encode_field(1, &self.name, writer);
        codec::encode_oneof_field(&self.payload, writer);
        self.unknown_fields.encode(writer);
    }

    fn encoded_message_len(&self) -> usize {
        codec::encoded_field_len(1, &self.name)
            + codec::encoded_oneof_field_len(&self.payload)
            + self.unknown_fields.encoded_len()
    }
}

impl ProtoOneof for EventPayload {
    fn merge_variant(
        dst: &mut Option<Self>,
        key: ProtoKey,
        reader: &mut Reader<'_>,
    ) -> Result<bool, DecodeError> {
        match key.tag() {
            2 => match dst {
                Some(EventPayload::ModeUpdate(payload)) => {
                    codec::merge_message_field(key, reader, payload)?
                }
                _ => {
                    let payload = codec::decode_message_field(key, reader)?;
                    *dst = Some(EventPayload::ModeUpdate(payload));
                }
            },
            3 => match dst {
                Some(EventPayload::TabUpdate(payload)) => {
                    codec::merge_message_field(key, reader, payload)?
                }
                _ => {
                    let payload = codec::decode_message_field(key, reader)?;
                    *dst = Some(EventPayload::TabUpdate(payload));
                }
            },
            7 => *dst = Some(EventPayload::Timer(codec::decode_value(key, reader)?)),
            8 => *dst = Some(EventPayload::CopyToClipboard(codec::decode_value(key, reader)?)),
            9 => *dst = Some(EventPayload::Visible(codec::decode_value(key, reader)?)),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn encode_variant<B: BufMut>(&self, writer: &mut Writer<B>) {
        match self {
            EventPayload::ModeUpdate(payload) => codec::encode_message_field(2, payload, writer),
            EventPayload::TabUpdate(payload) => codec::encode_message_field(3, payload, writer),
            EventPayload::Timer(value) => codec::encode_value(7, value, writer),
            EventPayload::CopyToClipboard(value) => codec::encode_value(8, value, writer),
            EventPayload::Visible(value) => codec::encode_value(9, value, writer),
        }
    }

    fn encoded_variant_len(&self) -> usize {
        match self {
            EventPayload::ModeUpdate(payload) => codec::encoded_message_field_len(2, payload),
            EventPayload::TabUpdate(payload) => codec::encoded_message_field_len(3, payload),
            EventPayload::Timer(value) => codec::encoded_value_len(7, value),
            EventPayload::CopyToClipboard(value) => codec::encoded_value_len(8, value),
            EventPayload::Visible(value) => codec::encoded_value_len(9, value),
        }
    }
}

/// ```protobuf
/// message ModeUpdatePayload {
///   InputMode current_mode = 1;
///   repeated InputModeKeybinds keybinds = 2;
///   Style style = 3;
///   bool arrow_fonts_support = 4;
///   optional string session_name = 5;
///   optional InputMode base_mode = 6;
/// }
/// ```
///
/// Keybinds are skipped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModeUpdatePayload {
    pub current_mode: i32,
    pub style: Option<Style>,
    pub arrow_fonts_support: bool,
    pub session_name: Option<String>,
    pub base_mode: Option<i32>,
}

impl ModeUpdatePayload {
    pub fn current_mode(&self) -> Option<InputMode> {
        InputMode::from_i32(self.current_mode)
    }

    pub fn base_mode(&self) -> Option<InputMode> {
        self.base_mode.and_then(InputMode::from_i32)
    }
}

impl ProtoMessage for ModeUpdatePayload {
    fn merge_field(&mut self, key: ProtoKey, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
        match key.tag() {
            1 => codec::decode_field(key, reader, &mut self.current_mode),
            3 => codec::merge_optional_message_field(key, reader, &mut self.style),
            4 => codec::decode_field(key, reader, &mut self.arrow_fonts_support),
            5 => codec::decode_field(key, reader, &mut self.session_name),
            6 => codec::decode_field(key, reader, &mut self.base_mode),
            _ => reader.skip_field(key),
        }
    }

    fn encode_message<B: BufMut>(&self, writer: &mut Writer<B>) {
        codec::encode_field(1, &self.current_mode, writer);
        if let Some(style) = &self.style {
            codec::encode_message_field(3, style, writer);
        }
        codec::encode_field(4, &self.arrow_fonts_support, writer);
        codec::encode_field(5, &self.session_name, writer);
        codec::encode_field(6, &self.base_mode, writer);
    }

    fn encoded_message_len(&self) -> usize {
        let style_len = self
            .style
            .as_ref()
            .map_or(0, |style| codec::encoded_message_field_len(3, style));
        codec::encoded_field_len(1, &self.current_mode)
            + style_len
            + codec::encoded_field_len(4, &self.arrow_fonts_support)
            + codec::encoded_field_len(5, &self.session_name)
            + codec::encoded_field_len(6, &self.base_mode)
    }
}

/// The presentation settings a status bar cares about. Colors are skipped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub rounded_corners: bool,
    pub hide_session_name: bool,
}

impl ProtoMessage for Style {
    fn merge_field(&mut self, key: ProtoKey, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
        match key.tag() {
            2 => codec::decode_field(key, reader, &mut self.rounded_corners),
            3 => codec::decode_field(key, reader, &mut self.hide_session_name),
            _ => reader.skip_field(key),
        }
    }

    fn encode_message<B: BufMut>(&self, writer: &mut Writer<B>) {
        codec::encode_field(2, &self.rounded_corners, writer);
        codec::encode_field(3, &self.hide_session_name, writer);
    }

    fn encoded_message_len(&self) -> usize {
        codec::encoded_field_len(2, &self.rounded_corners)
            + codec::encoded_field_len(3, &self.hide_session_name)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabUpdatePayload {
    pub tab_info: Vec<TabInfo>,
}

impl TabUpdatePayload {
    /// The tab that has focus, if any.
    pub fn active_tab(&self) -> Option<&TabInfo> {
        self.tab_info.iter().find(|tab| tab.active)
    }
}

impl ProtoMessage for TabUpdatePayload {
    fn merge_field(&mut self, key: ProtoKey, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
        match key.tag() {
            1 => codec::push_repeated_message(key, reader, &mut self.tab_info),
            _ => reader.skip_field(key),
        }
    }

    fn encode_message<B: BufMut>(&self, writer: &mut Writer<B>) {
        codec::encode_repeated_messages(1, &self.tab_info, writer);
    }

    fn encoded_message_len(&self) -> usize {
        codec::encoded_repeated_messages_len(1, &self.tab_info)
    }
}

/// ```protobuf
/// message TabInfo {
///   uint32 position = 1;
///   string name = 2;
///   bool active = 3;
///   uint32 panes_to_hide = 4;
///   bool is_fullscreen_active = 5;
///   bool is_sync_panes_active = 6;
///   bool are_floating_panes_visible = 7;
///   repeated uint32 other_focused_clients = 8;
///   optional string active_swap_layout_name = 9;
///   bool is_swap_layout_dirty = 10;
/// }
/// ```
///
/// Fields this schema doesn't know are kept and written back on encode.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabInfo {
    pub position: u32,
    pub name: String,
    pub active: bool,
    pub panes_to_hide: u32,
    pub is_fullscreen_active: bool,
    pub is_sync_panes_active: bool,
    pub are_floating_panes_visible: bool,
    pub other_focused_clients: Vec<u32>,
    pub active_swap_layout_name: Option<String>,
    pub is_swap_layout_dirty: bool,
    pub unknown_fields: UnknownFields,
}

impl ProtoMessage for TabInfo {
    fn merge_field(&mut self, key: ProtoKey, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
        match key.tag() {
            1 => codec::decode_field(key, reader, &mut self.position),
            2 => codec::decode_field(key, reader, &mut self.name),
            3 => codec::decode_field(key, reader, &mut self.active),
            4 => codec::decode_field(key, reader, &mut self.panes_to_hide),
            5 => codec::decode_field(key, reader, &mut self.is_fullscreen_active),
            6 => codec::decode_field(key, reader, &mut self.is_sync_panes_active),
            7 => codec::decode_field(key, reader, &mut self.are_floating_panes_visible),
            8 => codec::decode_repeated_field(key, reader, &mut self.other_focused_clients),
            9 => codec::decode_field(key, reader, &mut self.active_swap_layout_name),
            10 => codec::decode_field(key, reader, &mut self.is_swap_layout_dirty),
            _ => self.unknown_fields.capture(key, reader),
        }
    }

    fn encode_message<B: BufMut>(&self, writer: &mut Writer<B>) {
        codec::encode_field(1, &self.position, writer);
        codec::encode_field(2, &self.name, writer);
        codec::encode_field(3, &self.active, writer);
        codec::encode_field(4, &self.panes_to_hide, writer);
        codec::encode_field(5, &self.is_fullscreen_active, writer);
        codec::encode_field(6, &self.is_sync_panes_active, writer);
        codec::encode_field(7, &self.are_floating_panes_visible, writer);
        codec::encode_packed_field(8, &self.other_focused_clients, writer);
        codec::encode_field(9, &self.active_swap_layout_name, writer);
        codec::encode_field(10, &self.is_swap_layout_dirty, writer);
        self.unknown_fields.encode(writer);
    }

    fn encoded_message_len(&self) -> usize {
        codec::encoded_field_len(1, &self.position)
            + codec::encoded_field_len(2, &self.name)
            + codec::encoded_field_len(3, &self.active)
            + codec::encoded_field_len(4, &self.panes_to_hide)
            + codec::encoded_field_len(5, &self.is_fullscreen_active)
            + codec::encoded_field_len(6, &self.is_sync_panes_active)
            + codec::encoded_field_len(7, &self.are_floating_panes_visible)
            + codec::encoded_packed_field_len(8, &self.other_focused_clients)
            + codec::encoded_field_len(9, &self.active_swap_layout_name)
            + codec::encoded_field_len(10, &self.is_swap_layout_dirty)
            + self.unknown_fields.encoded_len()
    }
}
