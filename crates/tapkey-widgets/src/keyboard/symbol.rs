//! Key symbols: the closed set of things a keyboard tap can mean.

use super::edit::EditKey;

/// One pressable key.
///
/// Layout tables are written as whitespace-separated tokens; see
/// [`KeySymbol::from_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySymbol {
    /// Append this character to the buffer.
    Character(char),
    /// Toggle between the default and shifted text layouts.
    Shift,
    /// Remove the last character.
    Backspace,
    /// Append a space.
    Space,
    /// End the editing session.
    Close,
}

/// Visual family of a key. Only affects styling and width, never behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Normal,
    Wide,
    Destructive,
    Action,
    Modifier,
}

impl KeySymbol {
    /// Parse a layout token.
    ///
    /// `{shift}`, `{bksp}`, `{space}` and `{close}` name the special keys;
    /// any other token must be exactly one character.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "{shift}" => Some(KeySymbol::Shift),
            "{bksp}" => Some(KeySymbol::Backspace),
            "{space}" => Some(KeySymbol::Space),
            "{close}" => Some(KeySymbol::Close),
            _ => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_whitespace() && !c.is_control() => {
                        Some(KeySymbol::Character(c))
                    }
                    _ => None,
                }
            }
        }
    }

    /// The buffer edit this key performs, if any.
    ///
    /// `Shift` and `Close` are routing keys and never reach the edit engine.
    pub fn as_edit(self) -> Option<EditKey> {
        match self {
            KeySymbol::Character(c) => Some(EditKey::Character(c)),
            KeySymbol::Backspace => Some(EditKey::Backspace),
            KeySymbol::Space => Some(EditKey::Space),
            KeySymbol::Shift | KeySymbol::Close => None,
        }
    }

    pub fn kind(self) -> KeyKind {
        match self {
            KeySymbol::Character(_) => KeyKind::Normal,
            KeySymbol::Space => KeyKind::Wide,
            KeySymbol::Backspace => KeyKind::Destructive,
            KeySymbol::Close => KeyKind::Action,
            KeySymbol::Shift => KeyKind::Modifier,
        }
    }

    /// Relative width of the key within its row.
    pub fn weight(self) -> u16 {
        match self.kind() {
            KeyKind::Normal => 2,
            KeyKind::Destructive | KeyKind::Modifier => 3,
            KeyKind::Action => 4,
            KeyKind::Wide => 8,
        }
    }
}
