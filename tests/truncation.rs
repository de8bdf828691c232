//! Decoding cut-off or corrupted input must fail cleanly.

use proptest::prelude::*;
use proptest::property_test;

use protolite::error::DecodeErrorKind;
use protolite::schema::{
    Event, EventPayload, EventType, InputMode, ModeUpdatePayload, PluginCommand, Style, TabInfo,
    TabUpdatePayload,
};
use protolite::ProtoMessage;

fn tab(position: u32, name: &str) -> TabInfo {
    TabInfo {
        position,
        name: name.to_string(),
        other_focused_clients: vec![1, 300, 70_000],
        active_swap_layout_name: Some("default".to_string()),
        ..Default::default()
    }
}

fn sample_events() -> Vec<Event> {
    vec![
        Event::new(
            EventType::ModeUpdate,
            Some(EventPayload::ModeUpdate(ModeUpdatePayload {
                current_mode: i32::from(InputMode::Tmux),
                style: Some(Style {
                    rounded_corners: true,
                    hide_session_name: true,
                }),
                arrow_fonts_support: true,
                session_name: Some("work".to_string()),
                base_mode: Some(-1),
            })),
        ),
        Event::new(
            EventType::TabUpdate,
            Some(EventPayload::TabUpdate(TabUpdatePayload {
                tab_info: vec![tab(0, "editor"), tab(1, "logs")],
            })),
        ),
        Event::new(EventType::Timer, Some(EventPayload::Timer(1.5))),
        Event::new(EventType::CopyToClipboard, Some(EventPayload::CopyToClipboard(2))),
    ]
}

#[test]
fn test_missing_last_byte_is_truncated() {
    for event in sample_events() {
        let buf = event.encode_to_vec();
        assert_eq!(Event::decode(&buf).unwrap(), event);

        let err = Event::decode(&buf[..buf.len() - 1]).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::Truncated, "{event:?}");
    }

    let command = PluginCommand::subscribe(&[EventType::ModeUpdate, EventType::TabUpdate]);
    let buf = command.encode_to_vec();
    let err = PluginCommand::decode(&buf[..buf.len() - 1]).unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::Truncated);
}

#[test]
fn test_every_prefix_is_handled() {
    for event in sample_events() {
        let buf = event.encode_to_vec();
        for len in 0..buf.len() {
            // Some prefixes end on a field boundary and decode to fewer fields,
            // all of them have to return.
            match Event::decode(&buf[..len]) {
                Ok(decoded) => assert_ne!(decoded, event, "prefix of {len} bytes"),
                Err(err) => assert!(err.offset() <= len, "{err} for prefix of {len} bytes"),
            }
        }
    }
}

#[test]
fn test_corrupted_lengths() {
    let buf = sample_events()[1].encode_to_vec();
    // Bump every byte in turn. Whatever comes out, decoding returns.
    for i in 0..buf.len() {
        let mut corrupted = buf.clone();
        corrupted[i] = corrupted[i].wrapping_add(0x40);
        let _ = Event::decode(&corrupted);
    }
}

#[property_test]
fn proptest_arbitrary_bytes_never_panic(bytes: Vec<u8>) {
    let _ = Event::decode(&bytes);
    let _ = PluginCommand::decode(&bytes);
}

#[property_test]
fn proptest_tab_info_truncation(position: u32, name: String, active: bool, clients: Vec<u32>) {
    let info = TabInfo {
        position,
        name,
        active,
        other_focused_clients: clients,
        ..Default::default()
    };
    let buf = info.encode_to_vec();
    prop_assert_eq!(buf.len(), info.encoded_message_len());
    prop_assert_eq!(&TabInfo::decode(&buf).unwrap(), &info);
    prop_assume!(!buf.is_empty());

    let err = TabInfo::decode(&buf[..buf.len() - 1]).unwrap_err();
    prop_assert_eq!(err.kind(), DecodeErrorKind::Truncated);
}
