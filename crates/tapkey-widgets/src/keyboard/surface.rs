//! Drawing the key grid and mapping taps back to keys.
//!
//! Both directions go through [`key_rects`], so a key is pressable exactly
//! where it is drawn.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::widgets::{Block, Paragraph, Widget};

use super::config::{KeyLabels, KeyboardStyle};
use super::layout::KeyLayout;
use super::symbol::KeySymbol;

/// Height in rows of a layout drawn with `key_height`-row keys.
pub fn surface_height(layout: &KeyLayout, key_height: u16) -> u16 {
    let rows = u16::try_from(layout.rows().len()).unwrap_or(u16::MAX);
    rows.saturating_mul(key_height)
}

/// Screen rectangle of every key in `layout` drawn inside `area`.
///
/// Rows get `key_height` lines each, or an equal share of `area` when that
/// does not fit; keys in a row share its width in proportion to
/// [`KeySymbol::weight`].
pub fn key_rects(layout: &KeyLayout, area: Rect, key_height: u16) -> Vec<(KeySymbol, Rect)> {
    let rows = layout.rows();
    let row_height = if surface_height(layout, key_height) <= area.height {
        Constraint::Length(key_height)
    } else {
        Constraint::Fill(1)
    };
    let row_areas = Layout::vertical(rows.iter().map(|_| row_height)).split(area);

    let mut rects = Vec::with_capacity(rows.iter().map(Vec::len).sum());
    for (keys, row_area) in rows.iter().zip(row_areas.iter()) {
        let key_areas =
            Layout::horizontal(keys.iter().map(|k| Constraint::Fill(k.weight()))).split(*row_area);
        for (key, key_area) in keys.iter().zip(key_areas.iter()) {
            if !key_area.is_empty() {
                rects.push((*key, *key_area));
            }
        }
    }
    rects
}

/// The key under `position`, if any.
pub fn hit_test(
    layout: &KeyLayout,
    area: Rect,
    key_height: u16,
    position: Position,
) -> Option<KeySymbol> {
    key_rects(layout, area, key_height)
        .into_iter()
        .find(|(_, rect)| rect.contains(position))
        .map(|(key, _)| key)
}

/// Stateless key grid. Everything it draws comes from its arguments.
pub struct KeySurface<'a> {
    layout: &'a KeyLayout,
    labels: &'a KeyLabels,
    style: &'a KeyboardStyle,
    shifted: bool,
    key_height: u16,
}

impl<'a> KeySurface<'a> {
    pub fn new(layout: &'a KeyLayout, labels: &'a KeyLabels, style: &'a KeyboardStyle) -> Self {
        Self {
            layout,
            labels,
            style,
            shifted: false,
            key_height: 3,
        }
    }

    /// Highlight the shift key.
    pub fn shifted(mut self, shifted: bool) -> Self {
        self.shifted = shifted;
        self
    }

    pub fn key_height(mut self, key_height: u16) -> Self {
        self.key_height = key_height;
        self
    }
}

impl Widget for KeySurface<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (key, rect) in key_rects(self.layout, area, self.key_height) {
            let style = self.style.for_key(key, self.shifted);
            let body = if rect.height < 3 {
                // No room for a border; the key is a filled caption.
                buf.set_style(rect, style);
                rect
            } else {
                let block = Block::bordered().border_style(style).style(style);
                let inner = block.inner(rect);
                block.render(rect, buf);
                inner
            };
            let caption = Rect {
                y: body.y + body.height.saturating_sub(1) / 2,
                height: body.height.min(1),
                ..body
            };

            Paragraph::new(self.labels.label(key))
                .alignment(Alignment::Center)
                .style(style)
                .render(caption, buf);
        }
    }
}
