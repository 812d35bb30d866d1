use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

/// Terminal events produced by the runtime's event loop.
///
/// On a touch kiosk the terminal reports every finger tap as a mouse event, so
/// [`Pointer`](TerminalEvent::Pointer) is the variant most applications care
/// about. `TerminalEvent` reaches an application through the
/// [`terminal_events`](crate::subscriptions::terminal_events) subscription,
/// mapped into the application's own `Message` type.
///
/// # Example
///
/// ```rust,ignore
/// use tapkey_core::{subscriptions::terminal_events, TerminalEvent, Subscription};
///
/// fn subscriptions() -> Vec<Subscription<Msg>> {
///     vec![terminal_events(|ev| match ev {
///         TerminalEvent::Pointer(m) => Some(Msg::Pointer(m)),
///         _ => None,
///     })]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A keyboard event (maintenance console only; kiosks have no keyboard).
    Key(KeyEvent),
    /// A pointer (touch or mouse) event.
    Pointer(MouseEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
}

impl TerminalEvent {
    /// Convert a crossterm event, dropping the kinds a kiosk never uses.
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        match event {
            crossterm::event::Event::Key(k) => Some(TerminalEvent::Key(k)),
            crossterm::event::Event::Mouse(m) => Some(TerminalEvent::Pointer(m)),
            crossterm::event::Event::Resize(w, h) => Some(TerminalEvent::Resize(w, h)),
            _ => None,
        }
    }
}

/// Return the cell touched by `event` if it is the start of a tap.
///
/// Only a primary-button press counts. Releases, drags, wheel and hover
/// reports return `None`, so a finger held on the glass yields exactly one
/// tap.
pub fn tap_position(event: &MouseEvent) -> Option<Position> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Position::new(event.column, event.row)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 7,
            row: 3,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn left_down_is_a_tap() {
        let pos = tap_position(&mouse(MouseEventKind::Down(MouseButton::Left)));
        assert_eq!(pos, Some(Position::new(7, 3)));
    }

    #[test]
    fn release_drag_and_wheel_are_not_taps() {
        assert!(tap_position(&mouse(MouseEventKind::Up(MouseButton::Left))).is_none());
        assert!(tap_position(&mouse(MouseEventKind::Drag(MouseButton::Left))).is_none());
        assert!(tap_position(&mouse(MouseEventKind::ScrollDown)).is_none());
        assert!(tap_position(&mouse(MouseEventKind::Down(MouseButton::Right))).is_none());
    }

    #[test]
    fn focus_and_paste_are_dropped() {
        assert!(TerminalEvent::from_crossterm(crossterm::event::Event::FocusGained).is_none());
        assert!(
            TerminalEvent::from_crossterm(crossterm::event::Event::Paste("x".into())).is_none()
        );
        assert_eq!(
            TerminalEvent::from_crossterm(crossterm::event::Event::Resize(80, 24)),
            Some(TerminalEvent::Resize(80, 24))
        );
    }
}
