//! Which field the keyboard is editing, and what each key does to it.
//!
//! [`Router`] owns at most one [`RoutedField`]. Every transition returns the
//! [`Effect`]s the caller must apply (mount the overlay, push a value to the
//! host, unmount), so the router itself never touches the host.

use std::fmt;
use std::sync::Arc;

use super::edit;
use super::layout::{KeyboardMode, LayoutState};
use super::symbol::KeySymbol;

/// Identity of an editable field. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldId(Arc<str>);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldIdError {
    #[error("field id must not be empty")]
    Empty,
}

impl FieldId {
    pub fn new(id: impl Into<String>) -> Result<Self, FieldIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(FieldIdError::Empty);
        }
        Ok(Self(Arc::from(id)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a field sends when tapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub field: FieldId,
    pub value: String,
    pub mode: KeyboardMode,
    pub masked: bool,
}

impl OpenRequest {
    pub fn new(field: FieldId, mode: KeyboardMode) -> Self {
        Self {
            field,
            value: String::new(),
            mode,
            masked: false,
        }
    }

    /// Current field value, handed to the keyboard as its starting buffer.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Hide the buffer in the keyboard readout (passwords).
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }
}

/// The one field currently being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedField {
    field: FieldId,
    mode: KeyboardMode,
    buffer: String,
    masked: bool,
}

impl RoutedField {
    pub fn field(&self) -> &FieldId {
        &self.field
    }

    pub fn mode(&self) -> KeyboardMode {
        self.mode
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn masked(&self) -> bool {
        self.masked
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The `{close}` key was pressed.
    CloseKey,
    /// A tap landed outside the keyboard panel.
    Backdrop,
    /// The host closed the keyboard (save, cancel, navigation).
    Programmatic,
    /// Another field opened the keyboard.
    Superseded,
    /// The routed field left the screen.
    FieldUnmounted,
    /// The host could no longer accept values for the routed field.
    TargetGone,
}

impl CloseReason {
    /// Whether the field receives a final copy of the buffer on close.
    ///
    /// Skipped when the field is gone or another field took over.
    pub fn notifies(self) -> bool {
        matches!(
            self,
            CloseReason::CloseKey | CloseReason::Backdrop | CloseReason::Programmatic
        )
    }
}

/// A side effect of a router transition, applied in order by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A session started: mount the overlay.
    Mounted,
    /// Push `value` into `field`.
    Notify { field: FieldId, value: String },
    /// The session for `field` ended: unmount the overlay.
    Unmounted { field: FieldId, reason: CloseReason },
}

/// The routing state machine.
#[derive(Debug, Default)]
pub struct Router {
    active: Option<RoutedField>,
    layout: LayoutState,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `req.field`, replacing any current session.
    ///
    /// The previous buffer is discarded and the layout starts unshifted.
    pub fn open(&mut self, req: OpenRequest) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(2);
        if let Some(prev) = self.active.take() {
            tracing::debug!(from = %prev.field, to = %req.field, "keyboard re-routed");
            effects.push(Effect::Unmounted {
                field: prev.field,
                reason: CloseReason::Superseded,
            });
        }

        tracing::debug!(field = %req.field, mode = ?req.mode, "keyboard opened");
        self.layout.reset();
        self.active = Some(RoutedField {
            field: req.field,
            mode: req.mode,
            buffer: req.value,
            masked: req.masked,
        });
        effects.push(Effect::Mounted);
        effects
    }

    /// End the session, if any. Calling it again is a no-op.
    pub fn close(&mut self, reason: CloseReason) -> Vec<Effect> {
        let Some(routed) = self.active.take() else {
            tracing::debug!(?reason, "close with nothing routed");
            return Vec::new();
        };
        self.layout.reset();
        tracing::debug!(field = %routed.field, ?reason, "keyboard closed");

        let mut effects = Vec::with_capacity(2);
        if reason.notifies() {
            effects.push(Effect::Notify {
                field: routed.field.clone(),
                value: routed.buffer,
            });
        }
        effects.push(Effect::Unmounted {
            field: routed.field,
            reason,
        });
        effects
    }

    /// Apply one key press to the routed field.
    pub fn on_key(&mut self, symbol: KeySymbol) -> Vec<Effect> {
        let Some(routed) = self.active.as_mut() else {
            tracing::debug!(?symbol, "key with nothing routed");
            return Vec::new();
        };

        match symbol {
            KeySymbol::Close => self.close(CloseReason::CloseKey),
            KeySymbol::Shift => {
                if routed.mode == KeyboardMode::Numeric {
                    tracing::debug!("shift ignored on numeric pad");
                } else {
                    self.layout.toggle();
                    tracing::trace!(layout = ?self.layout.name(), "shift");
                }
                Vec::new()
            }
            KeySymbol::Character(_) | KeySymbol::Backspace | KeySymbol::Space => {
                let Some(key) = symbol.as_edit() else {
                    return Vec::new();
                };
                let next = edit::apply(&routed.buffer, key);
                if next == routed.buffer {
                    tracing::debug!(field = %routed.field, "backspace on empty buffer");
                    return Vec::new();
                }
                tracing::trace!(field = %routed.field, ?symbol, "key");
                routed.buffer = next;
                vec![Effect::Notify {
                    field: routed.field.clone(),
                    value: routed.buffer.clone(),
                }]
            }
        }
    }

    /// Close the session if `field` is the one being edited.
    pub fn field_unmounted(&mut self, field: &FieldId) -> Vec<Effect> {
        match &self.active {
            Some(routed) if routed.field == *field => self.close(CloseReason::FieldUnmounted),
            _ => Vec::new(),
        }
    }

    /// The live buffer, or `""` when nothing is routed.
    pub fn current_value(&self) -> &str {
        self.active.as_ref().map_or("", |r| r.buffer.as_str())
    }

    pub fn active(&self) -> Option<&RoutedField> {
        self.active.as_ref()
    }

    /// The overlay is visible exactly while a field is routed.
    pub fn is_visible(&self) -> bool {
        self.active.is_some()
    }

    pub fn layout(&self) -> LayoutState {
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::layout::LayoutName;

    fn id(s: &str) -> FieldId {
        FieldId::new(s).unwrap()
    }

    fn notify(field: &str, value: &str) -> Effect {
        Effect::Notify {
            field: id(field),
            value: value.into(),
        }
    }

    fn unmounted(field: &str, reason: CloseReason) -> Effect {
        Effect::Unmounted {
            field: id(field),
            reason,
        }
    }

    #[test]
    fn field_id_rejects_empty() {
        assert_eq!(FieldId::new(""), Err(FieldIdError::Empty));
        assert_eq!(id("tempLow").as_str(), "tempLow");
        assert_eq!(id("tempLow").to_string(), "tempLow");
    }

    #[test]
    fn numeric_edit_then_close_key() {
        let mut router = Router::new();
        let effects = router
            .open(OpenRequest::new(id("tempMax"), KeyboardMode::Numeric).with_value("7.0"));
        assert_eq!(effects, vec![Effect::Mounted]);

        assert_eq!(
            router.on_key(KeySymbol::Backspace),
            vec![notify("tempMax", "7.")]
        );
        assert_eq!(
            router.on_key(KeySymbol::Character('5')),
            vec![notify("tempMax", "7.5")]
        );
        assert_eq!(
            router.on_key(KeySymbol::Close),
            vec![
                notify("tempMax", "7.5"),
                unmounted("tempMax", CloseReason::CloseKey)
            ]
        );
        assert!(!router.is_visible());
        assert_eq!(router.current_value(), "");
    }

    #[test]
    fn text_shift_round_trip() {
        let mut router = Router::new();
        router.open(OpenRequest::new(id("wifiSsid"), KeyboardMode::Text));

        assert!(router.on_key(KeySymbol::Shift).is_empty());
        assert_eq!(router.layout().name(), LayoutName::Shift);
        assert_eq!(
            router.on_key(KeySymbol::Character('A')),
            vec![notify("wifiSsid", "A")]
        );
        router.on_key(KeySymbol::Shift);
        assert_eq!(router.layout().name(), LayoutName::Default);
        router.on_key(KeySymbol::Character('b'));
        assert_eq!(router.current_value(), "Ab");
    }

    #[test]
    fn open_replaces_previous_session() {
        let mut router = Router::new();
        router.open(OpenRequest::new(id("tempLow"), KeyboardMode::Numeric).with_value("2.0"));
        router.on_key(KeySymbol::Character('5'));

        let effects =
            router.open(OpenRequest::new(id("tempHigh"), KeyboardMode::Numeric).with_value("8.0"));
        assert_eq!(
            effects,
            vec![
                unmounted("tempLow", CloseReason::Superseded),
                Effect::Mounted
            ]
        );
        let active = router.active().unwrap();
        assert_eq!(active.field(), &id("tempHigh"));
        assert_eq!(active.buffer(), "8.0");
    }

    #[derive(Debug, Clone, Copy)]
    enum Step {
        Open(&'static str),
        Key(char),
        Close,
        Unmount(&'static str),
    }

    #[test]
    fn single_target_over_every_short_sequence() {
        let steps = [
            Step::Open("tempLow"),
            Step::Open("apn4g"),
            Step::Key('9'),
            Step::Close,
            Step::Unmount("tempLow"),
        ];
        let len = 4;

        for code in 0..steps.len().pow(len) {
            let mut router = Router::new();
            let mut expected: Option<(&str, String)> = None;
            let mut rest = code;
            let mut trace = Vec::new();

            for _ in 0..len {
                let step = steps[rest % steps.len()];
                rest /= steps.len();
                trace.push(step);

                match step {
                    Step::Open(field) => {
                        let effects = router.open(
                            OpenRequest::new(id(field), KeyboardMode::Text).with_value(field),
                        );
                        let replaced = usize::from(expected.is_some());
                        assert_eq!(effects.len(), 1 + replaced, "{trace:?}");
                        assert_eq!(router.layout().name(), LayoutName::Default);
                        expected = Some((field, field.to_owned()));
                    }
                    Step::Key(c) => {
                        router.on_key(KeySymbol::Character(c));
                        if let Some((_, buffer)) = &mut expected {
                            buffer.push(c);
                        }
                    }
                    Step::Close => {
                        router.close(CloseReason::Programmatic);
                        expected = None;
                    }
                    Step::Unmount(field) => {
                        router.field_unmounted(&id(field));
                        if expected.as_ref().is_some_and(|(routed, _)| *routed == field) {
                            expected = None;
                        }
                    }
                }

                match &expected {
                    Some((field, buffer)) => {
                        let active = router.active().unwrap();
                        assert_eq!(active.field(), &id(field), "{trace:?}");
                        assert_eq!(active.buffer(), buffer, "{trace:?}");
                    }
                    None => assert!(router.active().is_none(), "{trace:?}"),
                }
                assert_eq!(router.is_visible(), expected.is_some());
                assert_eq!(router.current_value(), expected.as_ref().map_or("", |(_, b)| b));
            }
        }
    }

    #[test]
    fn reopening_the_same_field_starts_fresh() {
        let mut router = Router::new();
        router.open(OpenRequest::new(id("apn4g"), KeyboardMode::Text).with_value("orange"));
        router.on_key(KeySymbol::Character('x'));
        let effects =
            router.open(OpenRequest::new(id("apn4g"), KeyboardMode::Text).with_value("free"));
        assert_eq!(effects.len(), 2);
        assert_eq!(router.current_value(), "free");
    }

    #[test]
    fn close_is_idempotent() {
        let mut router = Router::new();
        router.open(OpenRequest::new(id("tempMid"), KeyboardMode::Numeric).with_value("4"));
        assert_eq!(router.close(CloseReason::Programmatic).len(), 2);
        assert!(router.close(CloseReason::Programmatic).is_empty());
        assert!(router.close(CloseReason::Backdrop).is_empty());
        assert!(!router.is_visible());
    }

    #[test]
    fn keys_without_session_are_ignored() {
        let mut router = Router::new();
        assert!(router.on_key(KeySymbol::Character('1')).is_empty());
        assert!(router.on_key(KeySymbol::Shift).is_empty());
        assert!(router.on_key(KeySymbol::Close).is_empty());
        assert_eq!(router.current_value(), "");
        assert_eq!(router.layout().name(), LayoutName::Default);
    }

    #[test]
    fn backspace_floor_emits_nothing() {
        let mut router = Router::new();
        router.open(OpenRequest::new(id("tevapThreshold"), KeyboardMode::Numeric));
        assert!(router.on_key(KeySymbol::Backspace).is_empty());
        assert_eq!(router.current_value(), "");
    }

    #[test]
    fn shift_is_ignored_on_numeric_pad() {
        let mut router = Router::new();
        router.open(OpenRequest::new(id("hystDiff"), KeyboardMode::Numeric).with_value("1.0"));
        assert!(router.on_key(KeySymbol::Shift).is_empty());
        assert_eq!(router.layout().name(), LayoutName::Default);
        assert_eq!(router.current_value(), "1.0");
    }

    #[test]
    fn layout_resets_between_sessions() {
        let mut router = Router::new();
        router.open(OpenRequest::new(id("wifiSsid"), KeyboardMode::Text));
        router.on_key(KeySymbol::Shift);
        router.close(CloseReason::Backdrop);
        router.open(OpenRequest::new(id("wifiSsid"), KeyboardMode::Text));
        assert_eq!(router.layout().name(), LayoutName::Default);

        router.on_key(KeySymbol::Shift);
        router.open(OpenRequest::new(id("apn4g"), KeyboardMode::Text));
        assert_eq!(router.layout().name(), LayoutName::Default);
    }

    #[test]
    fn unmounting_closes_only_the_routed_field() {
        let mut router = Router::new();
        router.open(OpenRequest::new(id("tempLow"), KeyboardMode::Numeric).with_value("2"));
        assert!(router.field_unmounted(&id("tempHigh")).is_empty());
        assert!(router.is_visible());

        assert_eq!(
            router.field_unmounted(&id("tempLow")),
            vec![unmounted("tempLow", CloseReason::FieldUnmounted)]
        );
        assert!(!router.is_visible());
    }

    #[test]
    fn masked_flag_survives_routing() {
        let mut router = Router::new();
        router.open(OpenRequest::new(id("wifiPassword"), KeyboardMode::Text).masked());
        assert!(router.active().unwrap().masked());
    }
}
