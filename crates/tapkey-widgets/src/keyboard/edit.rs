//! Buffer edits as pure functions.
//!
//! The buffer is an opaque string: numeric fields get no validation here,
//! that belongs to whoever owns the field.

/// An edit the engine can apply. Routing keys are not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Character(char),
    Backspace,
    Space,
}

/// Return `buffer` with `key` applied.
///
/// Backspace removes the last `char` and leaves an empty buffer unchanged.
pub fn apply(buffer: &str, key: EditKey) -> String {
    let mut next = buffer.to_owned();
    match key {
        EditKey::Character(c) => next.push(c),
        EditKey::Space => next.push(' '),
        EditKey::Backspace => {
            next.pop();
        }
    }
    next
}
