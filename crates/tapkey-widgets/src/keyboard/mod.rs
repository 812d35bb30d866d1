//! A shared on-screen keyboard for touch kiosks.
//!
//! One [`VirtualKeyboard`] serves every editable field on screen. A field
//! asks for it with [`Message::Open`]; from then on each tap on a key edits
//! that field's value and the new value is pushed straight back to the host
//! through [`KeyboardHost::deliver`]. Opening another field, tapping outside
//! the panel, the close key, or the host closing it all end the session.
//!
//! While the keyboard is up it is drawn over the whole frame and swallows
//! every pointer event, and the host's background scrolling is frozen.
//!
//! ```rust,ignore
//! fn update(&mut self, msg: Msg) -> Command<Msg> {
//!     match msg {
//!         Msg::Keyboard(m) => {
//!             self.keyboard.update(m, &mut self.form);
//!         }
//!         // ...
//!     }
//!     Command::none()
//! }
//!
//! fn view(&self, frame: &mut Frame) {
//!     self.form.view(frame, frame.area());
//!     self.keyboard.view(frame);
//! }
//! ```

mod config;
mod edit;
mod layout;
mod lifecycle;
mod router;
mod surface;
mod symbol;

use std::cell::Cell;

use crossterm::event::MouseEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Widget};
use ratatui::Frame;
use tapkey_core::event::tap_position;
use unicode_width::UnicodeWidthChar;

use crate::overlay::{self, MountSurface};

pub use config::{KeyLabels, KeyboardConfig, KeyboardStyle};
pub use edit::{apply, EditKey};
pub use layout::{KeyLayout, KeyboardMode, Keymap, LayoutError, LayoutName, LayoutState};
pub use lifecycle::{MountPoint, OverlayLifecycle, ScrollControl};
pub use router::{
    CloseReason, Effect, FieldId, FieldIdError, OpenRequest, RoutedField, Router,
};
pub use surface::{hit_test, key_rects, surface_height, KeySurface};
pub use symbol::{KeyKind, KeySymbol};

/// Returned by a host that can no longer accept a value for a field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("field {0} is no longer mounted")]
    FieldGone(FieldId),
}

/// The screen that owns the fields the keyboard edits.
pub trait KeyboardHost {
    /// Store `value` as the current value of `field`.
    fn deliver(&mut self, field: &FieldId, value: &str) -> Result<(), DeliveryError>;

    /// The background whose scrolling is frozen while the keyboard is up.
    fn scroll(&mut self) -> &mut dyn ScrollControl;
}

/// Messages for the virtual keyboard.
#[derive(Debug, Clone)]
pub enum Message {
    /// A field was tapped and wants to be edited.
    Open(OpenRequest),
    /// A key was pressed by some means other than a tap on the surface.
    Key(KeySymbol),
    /// A raw pointer event while the keyboard may be visible.
    Pointer(MouseEvent),
    /// The host wants the keyboard gone (save, cancel, navigation).
    Close,
    /// A field left the screen.
    FieldUnmounted(FieldId),
}

struct Geometry {
    mount: Rect,
    panel: Rect,
    readout: Rect,
    keys: Rect,
}

/// The shared keyboard: router, overlay lifecycle, and surface in one.
pub struct VirtualKeyboard {
    router: Router,
    lifecycle: OverlayLifecycle,
    config: KeyboardConfig,
    /// Updated during each `view()` call via interior mutability.
    frame_area: Cell<Rect>,
}

impl VirtualKeyboard {
    /// Create a keyboard that mounts through `surface`.
    pub fn new(surface: impl MountSurface + 'static) -> Self {
        Self::with_config(surface, KeyboardConfig::default())
    }

    pub fn with_config(surface: impl MountSurface + 'static, config: KeyboardConfig) -> Self {
        Self {
            router: Router::new(),
            lifecycle: OverlayLifecycle::new(Box::new(surface)),
            config,
            frame_area: Cell::new(Rect::default()),
        }
    }

    /// Handle one message, pushing any resulting value changes to `host`.
    ///
    /// Returns `true` if the message was consumed. Pointer events are
    /// consumed whenever the keyboard was visible when they arrived, even if
    /// they closed it, so the caller must not forward them to the background.
    pub fn update(&mut self, msg: Message, host: &mut impl KeyboardHost) -> bool {
        let effects = match msg {
            Message::Open(req) => self.router.open(req),
            Message::Key(symbol) => self.router.on_key(symbol),
            Message::Close => self.router.close(CloseReason::Programmatic),
            Message::FieldUnmounted(field) => self.router.field_unmounted(&field),
            Message::Pointer(event) => {
                if !self.router.is_visible() {
                    return false;
                }
                self.on_pointer(&event)
            }
        };
        self.apply(effects, host);
        true
    }

    fn on_pointer(&mut self, event: &MouseEvent) -> Vec<Effect> {
        let Some(position) = tap_position(event) else {
            return Vec::new();
        };
        let Some(geometry) = self.geometry(self.frame_area.get()) else {
            return Vec::new();
        };
        if geometry.panel.is_empty() {
            // Not drawn yet, so there is nothing the tap could have aimed at.
            tracing::debug!("tap before the keyboard was drawn");
            return Vec::new();
        }

        if !geometry.panel.contains(position) {
            return self.router.close(CloseReason::Backdrop);
        }
        let key = hit_test(
            self.current_layout(),
            geometry.keys,
            self.config.key_height,
            position,
        );
        match key {
            Some(key) => self.router.on_key(key),
            None => Vec::new(),
        }
    }

    fn apply(&mut self, effects: Vec<Effect>, host: &mut impl KeyboardHost) {
        for effect in effects {
            match effect {
                Effect::Mounted => self.lifecycle.mount(host.scroll()),
                Effect::Unmounted { .. } => self.lifecycle.unmount(host.scroll()),
                Effect::Notify { field, value } => {
                    if let Err(err) = host.deliver(&field, &value) {
                        tracing::warn!(%err, "value not delivered, closing keyboard");
                        let forced = self.router.close(CloseReason::TargetGone);
                        self.apply(forced, host);
                    }
                }
            }
        }
        debug_assert_eq!(self.router.is_visible(), self.lifecycle.is_mounted());
    }

    /// Whether the overlay is showing. True exactly while a field is routed.
    pub fn is_visible(&self) -> bool {
        self.router.is_visible()
    }

    /// The field being edited, if any.
    pub fn active(&self) -> Option<&RoutedField> {
        self.router.active()
    }

    /// The live buffer, or `""` when nothing is routed.
    pub fn current_value(&self) -> &str {
        self.router.current_value()
    }

    pub fn layout_state(&self) -> LayoutState {
        self.router.layout()
    }

    pub fn config(&self) -> &KeyboardConfig {
        &self.config
    }

    pub fn mount_points_created(&self) -> usize {
        self.lifecycle.mount_points_created()
    }

    fn current_layout(&self) -> &KeyLayout {
        let mode = self.router.active().map_or(KeyboardMode::Text, |r| r.mode());
        self.config.keymap.layout(mode, self.router.layout())
    }

    fn geometry(&self, frame_area: Rect) -> Option<Geometry> {
        let mount = self.lifecycle.mount_area(frame_area)?;
        let readout_height = u16::from(self.config.show_readout);
        let keys_height = surface_height(self.current_layout(), self.config.key_height);
        let panel_height = keys_height.saturating_add(readout_height).saturating_add(2);

        let panel = overlay::docked_bottom(self.config.max_width, panel_height, mount);
        let inner = Block::bordered().inner(panel);
        let [readout, keys] =
            Layout::vertical([Constraint::Length(readout_height), Constraint::Fill(1)])
                .areas(inner);
        Some(Geometry {
            mount,
            panel,
            readout,
            keys,
        })
    }

    /// Render the overlay over the whole frame. Draws nothing while hidden.
    ///
    /// Call this last in the host's `view` so the keyboard sits on top.
    pub fn view(&self, frame: &mut Frame) {
        let frame_area = frame.area();
        self.frame_area.set(frame_area);
        let Some(geometry) = self.geometry(frame_area) else {
            return;
        };
        self.render(&geometry, frame.buffer_mut());
    }

    fn render(&self, geometry: &Geometry, buf: &mut Buffer) {
        let style = &self.config.style;
        overlay::render_backdrop(buf, geometry.mount, style.backdrop);

        let block = Block::bordered().border_style(style.panel_border);
        overlay::clear_with_block(buf, geometry.panel, block);

        if let (true, Some(routed)) = (self.config.show_readout, self.router.active()) {
            let text = readout_text(routed.buffer(), routed.masked(), geometry.readout.width);
            Line::styled(text, style.readout).render(geometry.readout, buf);
        }

        KeySurface::new(self.current_layout(), &self.config.labels, style)
            .shifted(self.router.layout().is_shifted())
            .key_height(self.config.key_height)
            .render(geometry.keys, buf);
    }
}

/// The buffer as shown above the keys: masked with bullets if asked, and
/// cut from the left with an ellipsis so the end stays visible.
fn readout_text(buffer: &str, masked: bool, width: u16) -> String {
    let shown: String = if masked {
        buffer.chars().map(|_| '•').collect()
    } else {
        buffer.to_owned()
    };

    let width = usize::from(width);
    let total: usize = shown.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return shown;
    }
    if width == 0 {
        return String::new();
    }

    let mut used = 1;
    let mut tail = Vec::new();
    for c in shown.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        tail.push(c);
    }
    std::iter::once('…').chain(tail.into_iter().rev()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::FullFrame;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEventKind};
    use ratatui::backend::TestBackend;
    use ratatui::layout::Position;
    use ratatui::widgets::Paragraph;
    use ratatui::Terminal;
    use std::collections::{HashMap, HashSet};
    use tapkey_core::command::Command;
    use tapkey_core::input_layer::InputLayer;
    use tapkey_core::model::Model;
    use tapkey_core::testing::TestProgram;

    struct Scroll {
        enabled: bool,
    }

    impl ScrollControl for Scroll {
        fn scroll_enabled(&self) -> bool {
            self.enabled
        }

        fn set_scroll_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }
    }

    struct Host {
        values: HashMap<FieldId, String>,
        gone: HashSet<FieldId>,
        deliveries: Vec<(String, String)>,
        scroll: Scroll,
    }

    impl Host {
        fn new(scroll_enabled: bool) -> Self {
            Self {
                values: HashMap::new(),
                gone: HashSet::new(),
                deliveries: Vec::new(),
                scroll: Scroll {
                    enabled: scroll_enabled,
                },
            }
        }

        fn delivered(&self) -> Vec<&str> {
            self.deliveries.iter().map(|(_, v)| v.as_str()).collect()
        }
    }

    impl KeyboardHost for Host {
        fn deliver(&mut self, field: &FieldId, value: &str) -> Result<(), DeliveryError> {
            if self.gone.contains(field) {
                return Err(DeliveryError::FieldGone(field.clone()));
            }
            self.deliveries.push((field.to_string(), value.to_owned()));
            self.values.insert(field.clone(), value.to_owned());
            Ok(())
        }

        fn scroll(&mut self) -> &mut dyn ScrollControl {
            &mut self.scroll
        }
    }

    fn id(s: &str) -> FieldId {
        FieldId::new(s).unwrap()
    }

    fn open(field: &str, mode: KeyboardMode, value: &str) -> Message {
        Message::Open(OpenRequest::new(id(field), mode).with_value(value))
    }

    fn mouse(kind: MouseEventKind, at: Position) -> MouseEvent {
        MouseEvent {
            kind,
            column: at.x,
            row: at.y,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn pointer(kind: MouseEventKind, at: Position) -> Message {
        Message::Pointer(mouse(kind, at))
    }

    fn tap(at: Position) -> Message {
        pointer(MouseEventKind::Down(MouseButton::Left), at)
    }

    fn draw(kb: &VirtualKeyboard, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| kb.view(frame)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn key_center(kb: &VirtualKeyboard, key: KeySymbol) -> Position {
        let geometry = kb.geometry(kb.frame_area.get()).unwrap();
        let (_, rect) = key_rects(kb.current_layout(), geometry.keys, kb.config.key_height)
            .into_iter()
            .find(|(k, _)| *k == key)
            .unwrap();
        Position::new(rect.x + rect.width / 2, rect.y + rect.height / 2)
    }

    fn screen_text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in buf.area.top()..buf.area.bottom() {
            for x in buf.area.left()..buf.area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn numeric_session_ends_with_final_value() {
        let mut kb = VirtualKeyboard::new(FullFrame);
        let mut host = Host::new(true);

        kb.update(open("tempMax", KeyboardMode::Numeric, "7.0"), &mut host);
        assert!(kb.is_visible());
        assert!(!host.scroll.enabled);

        kb.update(Message::Key(KeySymbol::Backspace), &mut host);
        assert_eq!(host.values[&id("tempMax")], "7.");
        kb.update(Message::Key(KeySymbol::Character('5')), &mut host);
        assert_eq!(host.values[&id("tempMax")], "7.5");
        kb.update(Message::Key(KeySymbol::Close), &mut host);

        assert_eq!(host.delivered(), vec!["7.", "7.5", "7.5"]);
        assert!(!kb.is_visible());
        assert!(host.scroll.enabled);
        assert_eq!(kb.current_value(), "");
    }

    #[test]
    fn text_session_with_shift() {
        let mut kb = VirtualKeyboard::new(FullFrame);
        let mut host = Host::new(true);

        kb.update(open("wifiSsid", KeyboardMode::Text, ""), &mut host);
        kb.update(Message::Key(KeySymbol::Shift), &mut host);
        assert!(kb.layout_state().is_shifted());
        kb.update(Message::Key(KeySymbol::Character('A')), &mut host);
        kb.update(Message::Key(KeySymbol::Shift), &mut host);
        assert_eq!(kb.layout_state().name(), LayoutName::Default);
        kb.update(Message::Key(KeySymbol::Character('b')), &mut host);

        assert_eq!(host.values[&id("wifiSsid")], "Ab");
        assert_eq!(kb.current_value(), "Ab");
    }

    #[test]
    fn second_open_discards_first_buffer() {
        let mut kb = VirtualKeyboard::new(FullFrame);
        let mut host = Host::new(true);

        kb.update(open("tempLow", KeyboardMode::Numeric, "2.0"), &mut host);
        kb.update(Message::Key(KeySymbol::Character('5')), &mut host);
        kb.update(open("apn4g", KeyboardMode::Text, "orange"), &mut host);

        assert_eq!(kb.active().unwrap().field(), &id("apn4g"));
        assert_eq!(kb.current_value(), "orange");
        assert_eq!(host.delivered(), vec!["2.05"]);
        assert!(kb.is_visible());
    }

    #[test]
    fn scroll_restored_over_many_cycles() {
        for initially in [true, false] {
            let mut kb = VirtualKeyboard::new(FullFrame);
            let mut host = Host::new(initially);

            for _ in 0..3 {
                kb.update(open("tempLow", KeyboardMode::Numeric, "2"), &mut host);
                assert!(!host.scroll.enabled);
                kb.update(Message::Key(KeySymbol::Close), &mut host);
                assert_eq!(host.scroll.enabled, initially);
            }

            kb.update(open("tempLow", KeyboardMode::Numeric, "2"), &mut host);
            kb.update(open("tempHigh", KeyboardMode::Numeric, "8"), &mut host);
            assert!(!host.scroll.enabled);
            kb.update(Message::Close, &mut host);
            assert_eq!(host.scroll.enabled, initially);

            kb.update(open("wifiSsid", KeyboardMode::Text, ""), &mut host);
            kb.update(Message::FieldUnmounted(id("wifiSsid")), &mut host);
            assert_eq!(host.scroll.enabled, initially);
        }
    }

    #[test]
    fn close_is_idempotent() {
        let mut kb = VirtualKeyboard::new(FullFrame);
        let mut host = Host::new(true);
        kb.update(open("hystDiff", KeyboardMode::Numeric, "1.0"), &mut host);

        kb.update(Message::Close, &mut host);
        kb.update(Message::Close, &mut host);
        kb.update(Message::Key(KeySymbol::Close), &mut host);

        assert_eq!(host.delivered(), vec!["1.0"]);
        assert!(host.scroll.enabled);
    }

    #[test]
    fn unmounted_field_closes_without_delivery() {
        let mut kb = VirtualKeyboard::new(FullFrame);
        let mut host = Host::new(true);
        kb.update(open("tempMid", KeyboardMode::Numeric, "4.0"), &mut host);

        kb.update(Message::FieldUnmounted(id("tempLow")), &mut host);
        assert!(kb.is_visible());

        kb.update(Message::FieldUnmounted(id("tempMid")), &mut host);
        assert!(!kb.is_visible());
        assert!(host.deliveries.is_empty());
    }

    #[test]
    fn missing_target_forces_close() {
        let mut kb = VirtualKeyboard::new(FullFrame);
        let mut host = Host::new(true);
        kb.update(open("apn4g", KeyboardMode::Text, ""), &mut host);
        host.gone.insert(id("apn4g"));

        kb.update(Message::Key(KeySymbol::Character('x')), &mut host);

        assert!(!kb.is_visible());
        assert!(host.scroll.enabled);
        assert!(host.deliveries.is_empty());
    }

    #[test]
    fn mount_point_created_once() {
        let mut kb = VirtualKeyboard::new(FullFrame);
        let mut host = Host::new(true);
        assert_eq!(kb.mount_points_created(), 0);
        for n in 0..20 {
            kb.update(open("tempLow", KeyboardMode::Numeric, ""), &mut host);
            if n % 2 == 0 {
                kb.update(Message::Close, &mut host);
            }
        }
        assert_eq!(kb.mount_points_created(), 1);
    }

    #[test]
    fn tap_on_a_key_presses_it() {
        let mut kb = VirtualKeyboard::new(FullFrame);
        let mut host = Host::new(true);
        kb.update(open("doorOpenAlarmDelay", KeyboardMode::Numeric, "5"), &mut host);
        draw(&kb, 80, 30);

        let five = key_center(&kb, KeySymbol::Character('5'));
        assert!(kb.update(tap(five), &mut host));
        let bksp = key_center(&kb, KeySymbol::Backspace);
        assert!(kb.update(tap(bksp), &mut host));
        assert!(kb.update(tap(five), &mut host));

        assert_eq!(host.delivered(), vec!["55", "5", "55"]);
    }

    #[test]
    fn drags_and_releases_do_nothing() {
        let mut kb = VirtualKeyboard::new(FullFrame);
        let mut host = Host::new(true);
        kb.update(open("tempLow", KeyboardMode::Numeric, "2"), &mut host);
        draw(&kb, 80, 30);

        let one = key_center(&kb, KeySymbol::Character('1'));
        assert!(kb.update(pointer(MouseEventKind::Drag(MouseButton::Left), one), &mut host));
        assert!(kb.update(pointer(MouseEventKind::Up(MouseButton::Left), one), &mut host));
        assert!(kb.update(pointer(MouseEventKind::Moved, Position::new(0, 0)), &mut host));

        assert!(host.deliveries.is_empty());
        assert!(kb.is_visible());
    }

    #[test]
    fn tap_outside_panel_closes_via_backdrop() {
        let mut kb = VirtualKeyboard::new(FullFrame);
        let mut host = Host::new(true);
        kb.update(open("tempMaxAlarm", KeyboardMode::Numeric, "7.0"), &mut host);
        draw(&kb, 80, 30);

        assert!(kb.update(tap(Position::new(0, 0)), &mut host));
        assert!(!kb.is_visible());
        assert_eq!(host.delivered(), vec!["7.0"]);
        assert!(host.scroll.enabled);
    }

    #[test]
    fn tap_before_first_frame_keeps_session() {
        let mut kb = VirtualKeyboard::new(FullFrame);
        let mut host = Host::new(true);
        kb.update(open("tempLow", KeyboardMode::Numeric, "2"), &mut host);

        assert!(kb.update(tap(Position::new(40, 25)), &mut host));
        assert!(kb.is_visible());
        assert!(host.deliveries.is_empty());
        assert!(!host.scroll.enabled);

        draw(&kb, 80, 30);
        kb.update(tap(Position::new(0, 0)), &mut host);
        assert!(!kb.is_visible());
        assert_eq!(host.delivered(), vec!["2"]);
    }

    #[test]
    fn short_frame_still_shows_and_presses_every_key() {
        let mut kb = VirtualKeyboard::new(FullFrame);
        let mut host = Host::new(true);
        kb.update(open("apn4g", KeyboardMode::Text, ""), &mut host);

        let screen = screen_text(&draw(&kb, 80, 8));
        assert!(screen.contains("Espace"));
        assert!(screen.contains("Fermer"));
        assert!(screen.contains("Retour"));

        let geometry = kb.geometry(kb.frame_area.get()).unwrap();
        let keys = key_rects(kb.current_layout(), geometry.keys, kb.config.key_height);
        assert_eq!(keys.len(), kb.current_layout().rows().iter().map(Vec::len).sum::<usize>());

        kb.update(tap(key_center(&kb, KeySymbol::Character('z'))), &mut host);
        kb.update(tap(key_center(&kb, KeySymbol::Close)), &mut host);
        assert_eq!(host.delivered(), vec!["z", "z"]);
        assert!(!kb.is_visible());
    }

    #[test]
    fn edit_engine_is_exported_beside_its_key_type() {
        assert_eq!(crate::keyboard::apply("7.", crate::keyboard::EditKey::Character('5')), "7.5");
    }

    #[test]
    fn pointer_passes_through_when_hidden() {
        let mut kb = VirtualKeyboard::new(FullFrame);
        let mut host = Host::new(true);
        assert!(!kb.update(tap(Position::new(3, 3)), &mut host));
        assert!(host.deliveries.is_empty());
    }

    #[test]
    fn shift_tap_switches_surface() {
        let mut kb = VirtualKeyboard::new(FullFrame);
        let mut host = Host::new(true);
        kb.update(open("wifiSsid", KeyboardMode::Text, ""), &mut host);
        draw(&kb, 80, 30);

        let shift = key_center(&kb, KeySymbol::Shift);
        kb.update(tap(shift), &mut host);
        let screen = screen_text(&draw(&kb, 80, 30));
        assert!(screen.contains('A'));
        assert!(screen.contains('@'));

        let upper_a = key_center(&kb, KeySymbol::Character('A'));
        kb.update(tap(upper_a), &mut host);
        assert_eq!(host.delivered(), vec!["A"]);
    }

    #[test]
    fn renders_nothing_while_hidden() {
        let kb = VirtualKeyboard::new(FullFrame);
        let buf = draw(&kb, 40, 20);
        assert!(screen_text(&buf).trim().is_empty());
    }

    #[test]
    fn renders_readout_and_keys() {
        let mut kb = VirtualKeyboard::new(FullFrame);
        let mut host = Host::new(true);
        kb.update(open("wifiSsid", KeyboardMode::Text, "Kiosk-42"), &mut host);

        let screen = screen_text(&draw(&kb, 80, 30));
        assert!(screen.contains("Kiosk-42"));
        assert!(screen.contains("Espace"));
        assert!(screen.contains("Fermer"));
        assert!(screen.contains("Shift"));
    }

    #[test]
    fn masked_readout_hides_the_secret() {
        let mut kb = VirtualKeyboard::new(FullFrame);
        let mut host = Host::new(true);
        kb.update(
            Message::Open(
                OpenRequest::new(id("wifiPassword"), KeyboardMode::Text)
                    .with_value("hunter2")
                    .masked(),
            ),
            &mut host,
        );

        let screen = screen_text(&draw(&kb, 80, 30));
        assert!(!screen.contains("hunter2"));
        assert!(screen.contains("•••••••"));
    }

    #[test]
    fn readout_keeps_the_tail() {
        assert_eq!(readout_text("abc", false, 10), "abc");
        assert_eq!(readout_text("abcdefgh", false, 5), "…efgh");
        assert_eq!(readout_text("secret", true, 3), "…••");
        assert_eq!(readout_text("abc", false, 0), "");
    }

    struct Screen {
        host: Host,
        keyboard: VirtualKeyboard,
    }

    enum ScreenMsg {
        TapField(&'static str),
        Pointer(MouseEvent),
        Save,
    }

    impl Model for Screen {
        type Message = ScreenMsg;
        type Flags = ();

        fn init(_: ()) -> (Self, Command<ScreenMsg>) {
            let screen = Screen {
                host: Host::new(true),
                keyboard: VirtualKeyboard::new(FullFrame),
            };
            (screen, Command::none())
        }

        fn update(&mut self, msg: ScreenMsg) -> Command<ScreenMsg> {
            let msg = match msg {
                ScreenMsg::TapField(field) => open(field, KeyboardMode::Numeric, "4.0"),
                ScreenMsg::Pointer(event) => {
                    match InputLayer::for_overlay(self.keyboard.is_visible()) {
                        InputLayer::Overlay => Message::Pointer(event),
                        InputLayer::Screen => return Command::none(),
                    }
                }
                ScreenMsg::Save => Message::Close,
            };
            self.keyboard.update(msg, &mut self.host);
            Command::none()
        }

        fn view(&self, frame: &mut Frame) {
            frame.render_widget(Paragraph::new("Reglages"), frame.area());
            self.keyboard.view(frame);
        }
    }

    #[test]
    fn drives_a_host_model_headlessly() {
        let mut prog = TestProgram::<Screen>::new(());
        prog.send(ScreenMsg::TapField("tempMid"));

        let screen = prog.render_string(80, 30);
        assert!(screen.contains("4.0"));
        assert!(screen.contains("Fermer"));

        let seven = key_center(&prog.model().keyboard, KeySymbol::Character('7'));
        let down = MouseEventKind::Down(MouseButton::Left);
        prog.send(ScreenMsg::Pointer(mouse(down, seven)));
        assert_eq!(prog.model().host.values[&id("tempMid")], "4.07");

        prog.send(ScreenMsg::Save);
        assert!(!prog.model().keyboard.is_visible());
        assert!(prog.model().host.scroll.enabled);
        assert_eq!(prog.model().host.delivered(), vec!["4.07", "4.07"]);
        assert!(!prog.render_string(80, 30).contains("Fermer"));
        assert!(!prog.quit_requested());
    }
}
