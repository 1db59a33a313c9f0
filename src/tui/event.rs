use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseEventKind};

/// TUI-specific input events.
///
/// Control-key chords map to the intents the activity bar and header expose;
/// everything else stays low-level and is interpreted by whichever component
/// currently has focus.
pub enum TuiEvent {
    /// Ctrl+C: quit unconditionally.
    ForceQuit,
    Escape,
    /// Enter.
    Submit,
    Backspace,
    InputChar(char),
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,

    /// Ctrl+P: pin/unpin the sidebar.
    TogglePin,
    /// Ctrl+N: start a fresh conversation.
    NewChat,
    /// Ctrl+F: focus the conversation search field.
    FocusSearch,
    /// Ctrl+U: open the user/profile menu.
    Profile,
    /// Ctrl+L: toggle the interface locale.
    ToggleLanguage,
    /// Ctrl+B: open/close the weather alerts dropdown.
    ToggleAlerts,
    /// Ctrl+T: open/close the price trend chart.
    ToggleChart,
    /// Ctrl+X: log out.
    Logout,
    /// Tab: move focus between the sidebar and the main area.
    FocusNext,

    MouseClick(u16, u16),
    ScrollUp,
    ScrollDown,
    Resize,
}

/// Poll for an event with the given timeout.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).unwrap_or(false) {
        return None;
    }
    let raw = event::read().ok()?;
    match raw {
        Event::Key(key_event) => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (KeyModifiers::CONTROL, KeyCode::Char('p')) => Some(TuiEvent::TogglePin),
                (KeyModifiers::CONTROL, KeyCode::Char('n')) => Some(TuiEvent::NewChat),
                (KeyModifiers::CONTROL, KeyCode::Char('f')) => Some(TuiEvent::FocusSearch),
                (KeyModifiers::CONTROL, KeyCode::Char('u')) => Some(TuiEvent::Profile),
                (KeyModifiers::CONTROL, KeyCode::Char('l')) => Some(TuiEvent::ToggleLanguage),
                (KeyModifiers::CONTROL, KeyCode::Char('b')) => Some(TuiEvent::ToggleAlerts),
                (KeyModifiers::CONTROL, KeyCode::Char('t')) => Some(TuiEvent::ToggleChart),
                (KeyModifiers::CONTROL, KeyCode::Char('x')) => Some(TuiEvent::Logout),
                (_, KeyCode::Tab) => Some(TuiEvent::FocusNext),
                (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
                (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(_) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Poll for an event without blocking (returns immediately).
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}
