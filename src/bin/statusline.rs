//! A status bar plugin.
//!
//! Speaks the host's line framing: every line is a JSON array of byte values
//! holding one encoded message. Events are read from stdin, and the status
//! line is printed to stdout after every mode or tab update. The subscribe
//! command is the first line written.
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `warn`). Setting
//! `STATUSLINE_STRICT=1` rejects events whose fields carry the wrong wire type.

use std::io::{self, BufRead, Write};

use protolite::schema::{Event, EventPayload, EventType, InputMode, PluginCommand, TabInfo};
use protolite::{DecodeError, DecodeOptions, ProtoMessage};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const STRICT_ENV: &str = "STATUSLINE_STRICT";

#[derive(Debug, thiserror::Error)]
enum FrameError {
    #[error("malformed frame: {0}")]
    Json(#[from] serde_json::Error),
    #[error("undecodable event: {0}")]
    Decode(#[from] DecodeError),
}

fn parse_frame(line: &str, options: DecodeOptions) -> Result<Event, FrameError> {
    let bytes: Vec<u8> = serde_json::from_str(line)?;
    Ok(Event::decode_with(&bytes, options)?)
}

fn write_frame<W: Write, M: ProtoMessage>(out: &mut W, message: &M) -> io::Result<()> {
    let frame = serde_json::to_string(&message.encode_to_vec())?;
    writeln!(out, "{frame}")?;
    out.flush()
}

fn decode_options(strict: Option<&str>) -> DecodeOptions {
    let strict = strict.is_some_and(|value| value == "1" || value.eq_ignore_ascii_case("true"));
    DecodeOptions::new().strict_wire_types(strict)
}

#[derive(Debug, Default)]
struct StatusLine {
    mode: Option<InputMode>,
    session_name: Option<String>,
    hide_session_name: bool,
    arrow_fonts: bool,
    tabs: Vec<TabInfo>,
}

impl StatusLine {
    /// Apply `event`, returning whether the line changed.
    fn update(&mut self, event: Event) -> bool {
        match event.payload {
            Some(EventPayload::ModeUpdate(payload)) => {
                self.mode = payload.current_mode();
                self.arrow_fonts = payload.arrow_fonts_support;
                self.hide_session_name = payload
                    .style
                    .as_ref()
                    .is_some_and(|style| style.hide_session_name);
                if payload.session_name.is_some() {
                    self.session_name = payload.session_name;
                }
                true
            }
            Some(EventPayload::TabUpdate(payload)) => {
                self.tabs = payload.tab_info;
                true
            }
            _ => {
                debug!(name = event.name, "ignoring event");
                false
            }
        }
    }

    fn render(&self) -> String {
        let separator = if self.arrow_fonts { " \u{E0B1} " } else { " | " };

        let mut parts = Vec::with_capacity(self.tabs.len() + 2);
        if let Some(session_name) = &self.session_name {
            if !self.hide_session_name {
                parts.push(session_name.clone());
            }
        }
        parts.push(self.mode.unwrap_or_default().label().to_string());
        parts.extend(self.tabs.iter().map(render_tab));

        format!(" {} ", parts.join(separator))
    }
}

fn render_tab(tab: &TabInfo) -> String {
    let mut label = format!("{}:{}", u64::from(tab.position) + 1, tab.name);
    if tab.is_fullscreen_active {
        label.push_str(" (FULLSCREEN)");
    }
    if tab.is_sync_panes_active {
        label.push_str(" (SYNC)");
    }
    if tab.active {
        format!("[{label}]")
    } else {
        label
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let options = decode_options(std::env::var(STRICT_ENV).ok().as_deref());
    info!(strict = options.is_strict(), "starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_frame(
        &mut out,
        &PluginCommand::subscribe(&[EventType::ModeUpdate, EventType::TabUpdate]),
    )?;

    let mut status = StatusLine::default();
    for (index, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_frame(&line, options) {
            Ok(event) => {
                if status.update(event) {
                    writeln!(out, "{}", status.render())?;
                    out.flush()?;
                }
            }
            Err(err) => warn!(line = index + 1, %err, "skipping frame"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use protolite::schema::{ModeUpdatePayload, Style, TabUpdatePayload};
    use protolite::DecodeErrorKind;

    fn frame(event: &Event) -> String {
        let mut out = Vec::new();
        write_frame(&mut out, event).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn mode_event(mode: InputMode, session_name: Option<&str>) -> Event {
        Event::new(
            EventType::ModeUpdate,
            Some(EventPayload::ModeUpdate(ModeUpdatePayload {
                current_mode: i32::from(mode),
                session_name: session_name.map(str::to_string),
                ..Default::default()
            })),
        )
    }

    fn tab_event(tabs: Vec<TabInfo>) -> Event {
        Event::new(
            EventType::TabUpdate,
            Some(EventPayload::TabUpdate(TabUpdatePayload { tab_info: tabs })),
        )
    }

    #[test]
    fn test_subscribe_frame() {
        let mut out = Vec::new();
        let command = PluginCommand::subscribe(&[EventType::ModeUpdate, EventType::TabUpdate]);
        write_frame(&mut out, &command).unwrap();
        assert_eq!(out, b"[18,6,10,4,10,2,0,1]\n");
    }

    #[test]
    fn test_frame_roundtrip() {
        let event = mode_event(InputMode::Tab, Some("main"));
        let line = frame(&event);
        let decoded = parse_frame(line.trim_end(), DecodeOptions::default()).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn test_bad_frames() {
        let options = DecodeOptions::default();
        assert!(matches!(parse_frame("not json", options), Err(FrameError::Json(_))));
        // 256 is not a byte.
        assert!(matches!(parse_frame("[256]", options), Err(FrameError::Json(_))));

        // A length prefix that runs past the end.
        match parse_frame("[18,5,8,1]", options) {
            Err(FrameError::Decode(err)) => assert_eq!(err.kind(), DecodeErrorKind::Truncated),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_decode_options() {
        assert!(!decode_options(None).is_strict());
        assert!(!decode_options(Some("0")).is_strict());
        assert!(decode_options(Some("1")).is_strict());
        assert!(decode_options(Some("TRUE")).is_strict());
    }

    #[test]
    fn test_render() {
        let mut status = StatusLine::default();
        assert_eq!(status.render(), " NORMAL ");

        assert!(status.update(mode_event(InputMode::Pane, Some("main"))));
        let mut logs = TabInfo {
            position: 1,
            name: "logs".to_string(),
            active: true,
            ..Default::default()
        };
        logs.is_sync_panes_active = true;
        let editor = TabInfo {
            position: 0,
            name: "editor".to_string(),
            ..Default::default()
        };
        assert!(status.update(tab_event(vec![editor, logs])));
        assert_eq!(status.render(), " main | PANE | 1:editor | [2:logs (SYNC)] ");

        // Session name is kept when an update doesn't carry one.
        assert!(status.update(mode_event(InputMode::Locked, None)));
        assert_eq!(status.render(), " main | LOCKED | 1:editor | [2:logs (SYNC)] ");
    }

    #[test]
    fn test_render_last_position() {
        let tab = TabInfo {
            position: u32::MAX,
            name: "x".to_string(),
            ..Default::default()
        };
        let decoded = TabInfo::decode(&tab.encode_to_vec()).unwrap();
        assert_eq!(render_tab(&decoded), "4294967296:x");
    }

    #[test]
    fn test_hidden_session_name() {
        let mut status = StatusLine::default();
        let event = Event::new(
            EventType::ModeUpdate,
            Some(EventPayload::ModeUpdate(ModeUpdatePayload {
                current_mode: i32::from(InputMode::Scroll),
                style: Some(Style {
                    rounded_corners: false,
                    hide_session_name: true,
                }),
                session_name: Some("main".to_string()),
                ..Default::default()
            })),
        );
        assert!(status.update(event));
        assert_eq!(status.render(), " SCROLL ");
    }

    #[test]
    fn test_other_events_are_ignored() {
        let mut status = StatusLine::default();
        let event = Event::new(EventType::Visible, Some(EventPayload::Visible(true)));
        assert!(!status.update(event));
    }
}
