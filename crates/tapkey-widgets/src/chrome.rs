//! Convenience helpers for common widget chrome patterns.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

/// Create a bordered block with focus-dependent border color.
///
/// Cyan and thick when focused, dark gray when not. On a touch screen
/// "focused" means the thing currently being acted on: the field the
/// keyboard edits, the selected sidebar section.
pub fn focus_block(title: &str, focused: bool) -> Block<'_> {
    let (color, border) = if focused {
        (Color::Cyan, BorderType::Thick)
    } else {
        (Color::DarkGray, BorderType::Plain)
    };
    Block::new()
        .borders(Borders::ALL)
        .border_type(border)
        .title(title)
        .border_style(Style::default().fg(color))
}

/// A large tappable button outline. Captions go inside, bold.
pub fn button_block(color: Color) -> Block<'static> {
    Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}
