//! Built-in subscription sources.
//!
//! - **Terminal events** ([`terminal_events`], [`TerminalEvents`]): taps,
//!   resizes and maintenance-console keys.
//!
//! One-shot delays are commands rather than subscriptions; see
//! [`Command::after`](crate::Command::after).

mod terminal;

pub use terminal::*;
