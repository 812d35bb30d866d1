//! Touch widgets for **tapkey** kiosk applications.
//!
//! The centerpiece is [`keyboard::VirtualKeyboard`], one on-screen keyboard
//! shared by every editable field of a screen. The other modules are what a
//! screen needs around it.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`keyboard`] | Shared virtual keyboard: routing, layouts, overlay, key grid |
//! | [`field`] | Read-only field that opens the keyboard when tapped |
//! | [`viewport`] | Scroll state for a tall form, freezable by overlays |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`overlay`] | Mount surfaces, docking and backdrop helpers |
//! | [`chrome`] | Bordered blocks for focused items and buttons |

pub mod chrome;
pub mod field;
pub mod keyboard;
pub mod overlay;
pub mod viewport;
