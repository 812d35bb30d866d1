//! Key layouts and the shift state machine.
//!
//! A [`Keymap`] holds three constant layouts: text, shifted text, and the
//! numeric pad. [`LayoutState`] tracks which text layout is showing; numeric
//! mode always serves its single pad and ignores the state.

use super::symbol::KeySymbol;

/// Which family of layout a field asks for. Fixed for a routing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyboardMode {
    /// Letters, digits and punctuation with a shift layer.
    #[default]
    Text,
    /// Digits, minus and decimal point.
    Numeric,
}

/// Text layout currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutName {
    #[default]
    Default,
    Shift,
}

/// The two-state shift machine. Starts at [`LayoutName::Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutState {
    name: LayoutName,
}

impl LayoutState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> LayoutName {
        self.name
    }

    pub fn is_shifted(&self) -> bool {
        self.name == LayoutName::Shift
    }

    /// Flip between default and shift.
    pub fn toggle(&mut self) {
        self.name = match self.name {
            LayoutName::Default => LayoutName::Shift,
            LayoutName::Shift => LayoutName::Default,
        };
    }

    pub fn reset(&mut self) {
        self.name = LayoutName::Default;
    }
}

/// Errors from building a custom [`Keymap`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("{layout} layout: row {row} has no keys")]
    EmptyRow { layout: &'static str, row: usize },
    #[error("{layout} layout: unknown key token {token:?} in row {row}")]
    UnknownToken {
        layout: &'static str,
        row: usize,
        token: String,
    },
    #[error("{layout} layout has no {{close}} key")]
    MissingClose { layout: &'static str },
}

/// Rows of keys, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout {
    rows: Vec<Vec<KeySymbol>>,
}

impl KeyLayout {
    /// Parse whitespace-separated token rows such as `"{shift} w x {bksp}"`.
    pub fn parse(layout: &'static str, rows: &[&str]) -> Result<Self, LayoutError> {
        let mut keys_by_row = Vec::with_capacity(rows.len());
        for (row, line) in rows.iter().enumerate() {
            let keys = line
                .split_whitespace()
                .map(|token| {
                    KeySymbol::from_token(token).ok_or_else(|| LayoutError::UnknownToken {
                        layout,
                        row,
                        token: token.to_owned(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if keys.is_empty() {
                return Err(LayoutError::EmptyRow { layout, row });
            }
            keys_by_row.push(keys);
        }

        let parsed = Self { rows: keys_by_row };
        if !parsed.contains(KeySymbol::Close) {
            return Err(LayoutError::MissingClose { layout });
        }
        Ok(parsed)
    }

    /// Build one of the constant tables below. They hold only valid tokens.
    fn builtin(rows: &[&str]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|line| {
                    line.split_whitespace()
                        .filter_map(KeySymbol::from_token)
                        .collect()
                })
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<KeySymbol>] {
        &self.rows
    }

    pub fn contains(&self, symbol: KeySymbol) -> bool {
        self.rows.iter().flatten().any(|k| *k == symbol)
    }
}

const TEXT_DEFAULT: [&str; 5] = [
    "1 2 3 4 5 6 7 8 9 0",
    "a z e r t y u i o p",
    "q s d f g h j k l m",
    "{shift} w x c v b n {bksp}",
    "{space} {close}",
];

const TEXT_SHIFT: [&str; 5] = [
    "/ - _ @ # : , . $ &",
    "A Z E R T Y U I O P",
    "Q S D F G H J K L M",
    "{shift} W X C V B N {bksp}",
    "{space} {close}",
];

const NUMERIC: [&str; 5] = ["1 2 3", "4 5 6", "7 8 9", "- 0 .", "{bksp} {close}"];

/// The three layouts a keyboard serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    text_default: KeyLayout,
    text_shift: KeyLayout,
    numeric: KeyLayout,
}

impl Keymap {
    /// Build a keymap from token rows, validating every layout.
    pub fn from_rows(
        text_default: &[&str],
        text_shift: &[&str],
        numeric: &[&str],
    ) -> Result<Self, LayoutError> {
        Ok(Self {
            text_default: KeyLayout::parse("default", text_default)?,
            text_shift: KeyLayout::parse("shift", text_shift)?,
            numeric: KeyLayout::parse("numeric", numeric)?,
        })
    }

    /// French AZERTY text layers plus a phone-style numeric pad.
    pub fn azerty() -> Self {
        Self {
            text_default: KeyLayout::builtin(&TEXT_DEFAULT),
            text_shift: KeyLayout::builtin(&TEXT_SHIFT),
            numeric: KeyLayout::builtin(&NUMERIC),
        }
    }

    /// The layout to display for `mode` in `state`.
    pub fn layout(&self, mode: KeyboardMode, state: LayoutState) -> &KeyLayout {
        match (mode, state.name()) {
            (KeyboardMode::Numeric, _) => &self.numeric,
            (KeyboardMode::Text, LayoutName::Default) => &self.text_default,
            (KeyboardMode::Text, LayoutName::Shift) => &self.text_shift,
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::azerty()
    }
}
