//! Core runtime for **tapkey** kiosk applications.
//!
//! `tapkey-core` provides the traits, types, and runtime that drive a
//! touch-first terminal UI. The design follows the [Elm Architecture]: the
//! screen is a pure **init -> update -> view** cycle, with side effects pushed
//! to the edges through [`Command`]s and [`Subscription`]s.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Reusable sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Describes a side effect to be executed by the runtime |
//! | [`Subscription`] | Long-lived event source (taps, resizes) |
//! | [`Program`] | Wires a [`Model`] to a real terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for unit-testing a [`Model`] |
//!
//! # Architecture
//!
//! 1. **init** -- [`Model::init`] creates the initial state and may return a
//!    [`Command`] to kick off early work.
//! 2. **view** -- the runtime calls [`Model::view`] to render the state.
//! 3. **event** -- taps arrive as pointer presses via [`terminal_events`] and
//!    are mapped into the model's `Message` type.
//! 4. **update** -- [`Model::update`] receives a message, mutates state, and
//!    optionally returns a [`Command`].
//! 5. **repeat** -- steps 2-4 repeat until the program exits.
//!
//! Diagnostics go through [`tracing`]; pass
//! [`ProgramOptions::log_file`] to send them to a file, since the UI owns
//! the terminal.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod input_layer;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::{Command, TerminalCommand};
pub use component::Component;
pub use event::{tap_position, TerminalEvent};
pub use input_layer::{InputLayer, LayeredModel};
pub use logging::init_file_logging;
pub use model::Model;
pub use runtime::{Program, ProgramError, ProgramOptions};
pub use subscription::{subscribe, Subscription, SubscriptionId, SubscriptionSource};
pub use subscriptions::{terminal_events, TerminalEvents};

/// Run `M` on the terminal until it quits and return the final model.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
