//! Overlay positioning and rendering utilities.
//!
//! Overlays are drawn against the whole frame, not against the layout area of
//! whoever owns them, so a narrow parent pane cannot clip them. A
//! [`MountSurface`] decides where in the frame an overlay lives.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Clear, Widget};

/// Where overlays are attached, resolved against the full frame each render.
pub trait MountSurface: Send {
    fn resolve(&self, frame_area: Rect) -> Rect;
}

/// Mount overlays over the entire frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullFrame;

impl MountSurface for FullFrame {
    fn resolve(&self, frame_area: Rect) -> Rect {
        frame_area
    }
}

/// Mount overlays inside a fixed region, clamped to the frame.
///
/// Useful when the host reserves a status strip that must stay visible.
#[derive(Debug, Clone, Copy)]
pub struct Region(pub Rect);

impl MountSurface for Region {
    fn resolve(&self, frame_area: Rect) -> Rect {
        self.0.intersection(frame_area)
    }
}

/// A rect of at most `max_width` x `height`, horizontally centered and
/// resting on the bottom edge of `area`.
pub fn docked_bottom(max_width: u16, height: u16, area: Rect) -> Rect {
    let w = max_width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.bottom().saturating_sub(h);
    Rect::new(x, y, w, h)
}

/// Dim everything already drawn in `area`, keeping the glyphs.
pub fn render_backdrop(buf: &mut Buffer, area: Rect, dim: Style) {
    buf.set_style(area, dim);
}

/// Clear the overlay area and render its border.
///
/// Returns the inner area.
pub fn clear_with_block(buf: &mut Buffer, area: Rect, block: Block<'_>) -> Rect {
    Clear.render(area, buf);
    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Modifier};
    use ratatui::widgets::Borders;

    #[test]
    fn full_frame_resolves_to_frame() {
        let frame = Rect::new(0, 0, 80, 24);
        assert_eq!(FullFrame.resolve(frame), frame);
    }

    #[test]
    fn region_is_clamped() {
        let region = Region(Rect::new(0, 2, 100, 100));
        assert_eq!(region.resolve(Rect::new(0, 0, 80, 24)), Rect::new(0, 2, 80, 22));
    }

    #[test]
    fn docked_bottom_sits_on_the_edge() {
        let area = Rect::new(0, 0, 100, 30);
        assert_eq!(docked_bottom(60, 12, area), Rect::new(20, 18, 60, 12));
    }

    #[test]
    fn docked_bottom_clamps_to_small_frames() {
        let area = Rect::new(0, 0, 20, 5);
        assert_eq!(docked_bottom(60, 12, area), Rect::new(0, 0, 20, 5));
    }

    #[test]
    fn backdrop_keeps_content_and_dims_it() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        buf.set_string(0, 0, "4.0C", Style::default());
        let dim = Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM);
        render_backdrop(&mut buf, area, dim);
        assert_eq!(buf[(0, 0)].symbol(), "4");
        assert_eq!(buf[(0, 0)].fg, Color::DarkGray);
        assert!(buf[(3, 0)].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn clear_with_block_returns_inner() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        buf.set_string(1, 1, "xx", Style::default());
        let inner = clear_with_block(&mut buf, area, Block::new().borders(Borders::ALL));
        assert_eq!(inner, Rect::new(1, 1, 8, 3));
        assert_eq!(buf[(1, 1)].symbol(), " ");
        assert_eq!(buf[(0, 0)].symbol(), "┌");
    }
}
