//! Scroll state for a column of rows taller than the screen.
//!
//! The viewport owns the offset and draws the scrollbar; the caller draws
//! the rows that fall inside [`Viewport::visible_rows`]. Scrolling can be
//! frozen through [`ScrollControl`], which is how the keyboard overlay keeps
//! the form still underneath it.

use std::cell::Cell;
use std::ops::Range;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;
use tapkey_core::command::Command;
use tapkey_core::component::Component;

use crate::keyboard::ScrollControl;

/// Messages for the viewport component.
#[derive(Debug, Clone)]
pub enum Message {
    /// Scroll up by the given number of rows.
    ScrollUp(u16),
    /// Scroll down by the given number of rows.
    ScrollDown(u16),
    /// Scroll to the very top of the content.
    ScrollToTop,
    /// Scroll to the very bottom of the content.
    ScrollToBottom,
    /// Mouse wheel or swipe. `up` is true for scroll-up.
    MouseWheel { up: bool },
    /// Scroll up by one full visible page.
    ViewUp,
    /// Scroll down by one full visible page.
    ViewDown,
}

/// Style configuration for the viewport.
#[derive(Debug, Clone)]
pub struct ViewportStyle {
    /// Scrollbar while scrolling is allowed.
    pub scrollbar: Style,
    /// Scrollbar while scrolling is frozen.
    pub frozen_scrollbar: Style,
}

impl Default for ViewportStyle {
    fn default() -> Self {
        Self {
            scrollbar: Style::default().fg(Color::Cyan),
            frozen_scrollbar: Style::default().fg(Color::DarkGray),
        }
    }
}

/// Vertical scroll offset over `content_height` rows.
///
/// # Example
///
/// ```ignore
/// let mut vp = Viewport::new(fields.len() as u16 * 3);
/// vp.update(Message::MouseWheel { up: false });
/// for row in vp.visible_rows() {
///     // draw row
/// }
/// ```
pub struct Viewport {
    offset: u16,
    content_height: u16,
    scroll_enabled: bool,
    mouse_wheel_delta: u16,
    style: ViewportStyle,
    /// Updated during each `view()` call via interior mutability.
    visible_height: Cell<u16>,
}

impl Viewport {
    pub fn new(content_height: u16) -> Self {
        Self {
            offset: 0,
            content_height,
            scroll_enabled: true,
            mouse_wheel_delta: 3,
            style: ViewportStyle::default(),
            visible_height: Cell::new(24),
        }
    }

    /// Set the viewport style configuration.
    pub fn with_style(mut self, style: ViewportStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the number of rows scrolled per wheel tick.
    pub fn with_mouse_wheel_delta(mut self, delta: u16) -> Self {
        self.mouse_wheel_delta = delta;
        self
    }

    /// Replace the content height, e.g. after switching sections.
    ///
    /// The offset resets to the top.
    pub fn set_content_height(&mut self, height: u16) {
        self.content_height = height;
        self.offset = 0;
    }

    /// Current vertical scroll offset, clamped to the content.
    pub fn y_offset(&self) -> u16 {
        self.offset.min(self.max_offset())
    }

    pub fn at_top(&self) -> bool {
        self.y_offset() == 0
    }

    pub fn at_bottom(&self) -> bool {
        self.y_offset() >= self.max_offset()
    }

    /// Content rows currently on screen.
    pub fn visible_rows(&self) -> Range<u16> {
        let start = self.y_offset();
        let end = start
            .saturating_add(self.visible_height.get())
            .min(self.content_height);
        start..end
    }

    /// The part of `area` left for content once the scrollbar column is
    /// reserved.
    pub fn content_area(area: Rect) -> Rect {
        Rect {
            width: area.width.saturating_sub(1),
            ..area
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.visible_height.get())
    }

    fn scroll_by(&mut self, delta: i32) {
        if !self.scroll_enabled {
            tracing::trace!("scroll ignored while frozen");
            return;
        }
        let next = (i32::from(self.y_offset()) + delta).clamp(0, i32::from(self.max_offset()));
        self.offset = u16::try_from(next).unwrap_or(0);
    }
}

impl ScrollControl for Viewport {
    fn scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }
}

impl Component for Viewport {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        let page = i32::from(self.visible_height.get());
        match msg {
            Message::ScrollUp(n) => self.scroll_by(-i32::from(n)),
            Message::ScrollDown(n) => self.scroll_by(i32::from(n)),
            Message::ScrollToTop => self.scroll_by(-i32::from(u16::MAX)),
            Message::ScrollToBottom => self.scroll_by(i32::from(u16::MAX)),
            Message::MouseWheel { up } => {
                let delta = i32::from(self.mouse_wheel_delta);
                self.scroll_by(if up { -delta } else { delta });
            }
            Message::ViewUp => self.scroll_by(-page),
            Message::ViewDown => self.scroll_by(page),
        }
        Command::none()
    }

    /// Record the visible height and draw the scrollbar in the rightmost
    /// column of `area`.
    fn view(&self, frame: &mut Frame, area: Rect) {
        self.visible_height.set(area.height);

        if self.content_height > area.height {
            let style = if self.scroll_enabled {
                self.style.scrollbar
            } else {
                self.style.frozen_scrollbar
            };
            let mut state = ScrollbarState::new(usize::from(self.max_offset()))
                .position(usize::from(self.y_offset()));
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight).style(style);
            frame.render_stateful_widget(scrollbar, area, &mut state);
        }
    }
}
