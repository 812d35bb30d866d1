//! Priority-based input routing for layered kiosk screens.
//!
//! A touch screen has a single pointer, so exactly one layer may consume a
//! tap. When an overlay such as the on-screen keyboard is up it captures
//! every pointer event, including taps that land outside it; otherwise the
//! screen underneath handles them.
//!
//! The [`LayeredModel`] trait extends [`Model`](crate::Model) with an
//! `active_layer()` method that the top-level `update()` consults:
//!
//! ```ignore
//! fn update(&mut self, msg: Msg) -> Command<Msg> {
//!     match msg {
//!         Msg::Pointer(ev) => match self.active_layer() {
//!             InputLayer::Overlay => self.route_overlay(ev),
//!             InputLayer::Screen => self.route_screen(ev),
//!         },
//!         // ...
//!     }
//! }
//! ```

/// Input routing priority layers, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputLayer {
    /// A full-screen overlay is mounted and owns all pointer input.
    Overlay,

    /// The regular screen: sidebar, form fields, buttons.
    Screen,
}

impl InputLayer {
    /// Pick the layer for the current overlay visibility.
    pub fn for_overlay(visible: bool) -> Self {
        if visible {
            InputLayer::Overlay
        } else {
            InputLayer::Screen
        }
    }
}

/// Extension trait for [`Model`](crate::Model) that adds input layer routing.
///
/// The runtime does not enforce this; it is a convention for `update()`.
pub trait LayeredModel: crate::Model {
    /// Return the layer that should receive the next pointer event.
    fn active_layer(&self) -> InputLayer;
}
