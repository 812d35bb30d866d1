//! **tapkey** -- a shared on-screen keyboard for touch kiosk UIs built on
//! [`ratatui`].
//!
//! This is the umbrella crate that re-exports everything needed to build a
//! kiosk screen from a single dependency:
//!
//! ```toml
//! [dependencies]
//! tapkey = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`tapkey_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Subscription`], [`Program`],
//!   [`run_with`], etc.).
//! * The [`widgets`] module re-exports everything from [`tapkey_widgets`]
//!   (the virtual keyboard, keyboard-backed fields, the scroll viewport).
//! * [`ratatui`], [`crossterm`], [`tokio`] and [`tracing`] are re-exported so
//!   downstream crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use tapkey::widgets::keyboard::{self, KeyboardHost, VirtualKeyboard};
//! use tapkey::widgets::overlay::FullFrame;
//!
//! struct Screen {
//!     form: Form, // implements KeyboardHost
//!     keyboard: VirtualKeyboard,
//! }
//!
//! enum Msg {
//!     Keyboard(keyboard::Message),
//! }
//!
//! impl Model for Screen {
//!     type Message = Msg;
//!     type Flags = ();
//!
//!     fn init(_: ()) -> (Self, Command<Msg>) {
//!         let screen = Screen {
//!             form: Form::default(),
//!             keyboard: VirtualKeyboard::new(FullFrame),
//!         };
//!         (screen, Command::none())
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Command<Msg> {
//!         match msg {
//!             Msg::Keyboard(m) => {
//!                 self.keyboard.update(m, &mut self.form);
//!             }
//!         }
//!         Command::none()
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         self.form.view(frame, frame.area());
//!         self.keyboard.view(frame);
//!     }
//! }
//! ```

pub use tapkey_core::*;
pub mod widgets {
    pub use tapkey_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;
pub use tokio;
pub use tracing;
