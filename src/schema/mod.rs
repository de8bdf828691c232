//! Plugin messages exchanged between a terminal multiplexer and its status
//! bar plugin.
//!
//! Only the subset a status line needs is implemented. Everything else the
//! host sends is skipped, or kept verbatim where noted.

mod command;
mod event;

pub use command::{CommandName, CommandPayload, EventNameList, PluginCommand, SubscribePayload, UnsubscribePayload};
pub use event::{
    CopyDestination, Event, EventPayload, EventType, InputMode, ModeUpdatePayload, Style,
    TabInfo, TabUpdatePayload,
};
