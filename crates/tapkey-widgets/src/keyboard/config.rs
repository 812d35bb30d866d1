//! Appearance and layout options for the virtual keyboard.

use ratatui::style::{Color, Modifier, Style};

use super::layout::Keymap;
use super::symbol::{KeyKind, KeySymbol};

/// Captions for the special keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLabels {
    pub shift: String,
    pub backspace: String,
    pub space: String,
    pub close: String,
}

impl Default for KeyLabels {
    fn default() -> Self {
        Self {
            shift: "Shift".into(),
            backspace: "Retour".into(),
            space: "Espace".into(),
            close: "Fermer".into(),
        }
    }
}

impl KeyLabels {
    /// Caption drawn on `symbol`.
    pub fn label(&self, symbol: KeySymbol) -> String {
        match symbol {
            KeySymbol::Character(c) => c.to_string(),
            KeySymbol::Shift => self.shift.clone(),
            KeySymbol::Backspace => self.backspace.clone(),
            KeySymbol::Space => self.space.clone(),
            KeySymbol::Close => self.close.clone(),
        }
    }
}

/// Style configuration for the keyboard overlay.
#[derive(Debug, Clone)]
pub struct KeyboardStyle {
    /// Border and caption of ordinary character keys.
    pub key: Style,
    /// The space bar.
    pub wide_key: Style,
    /// Backspace.
    pub destructive_key: Style,
    /// The close key.
    pub action_key: Style,
    /// Shift while inactive.
    pub modifier_key: Style,
    /// Shift while the shifted layout is showing.
    pub active_modifier_key: Style,
    /// Border around the whole keyboard panel.
    pub panel_border: Style,
    /// Applied over the background while the overlay is up.
    pub backdrop: Style,
    /// The line echoing the buffer being edited.
    pub readout: Style,
}

impl Default for KeyboardStyle {
    fn default() -> Self {
        Self {
            key: Style::default().fg(Color::White),
            wide_key: Style::default().fg(Color::White),
            destructive_key: Style::default().fg(Color::Red),
            action_key: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            modifier_key: Style::default().fg(Color::Yellow),
            active_modifier_key: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            panel_border: Style::default().fg(Color::Cyan),
            backdrop: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            readout: Style::default().add_modifier(Modifier::BOLD),
        }
    }
}

impl KeyboardStyle {
    /// Style for a key, taking the shift state into account.
    pub fn for_key(&self, symbol: KeySymbol, shifted: bool) -> Style {
        match symbol.kind() {
            KeyKind::Normal => self.key,
            KeyKind::Wide => self.wide_key,
            KeyKind::Destructive => self.destructive_key,
            KeyKind::Action => self.action_key,
            KeyKind::Modifier if shifted => self.active_modifier_key,
            KeyKind::Modifier => self.modifier_key,
        }
    }
}

/// Everything configurable about a [`VirtualKeyboard`](super::VirtualKeyboard).
///
/// ```rust,ignore
/// let config = KeyboardConfig {
///     max_width: 72,
///     ..KeyboardConfig::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct KeyboardConfig {
    pub keymap: Keymap,
    pub labels: KeyLabels,
    pub style: KeyboardStyle,
    /// Widest the panel gets, in columns.
    pub max_width: u16,
    /// Rows per key, borders included. Three is the minimum for a caption.
    pub key_height: u16,
    /// Echo the buffer above the keys.
    pub show_readout: bool,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            keymap: Keymap::default(),
            labels: KeyLabels::default(),
            style: KeyboardStyle::default(),
            max_width: 80,
            key_height: 3,
            show_readout: true,
        }
    }
}
