//! # Kiosk Settings Example
//!
//! A refrigerated-cabinet settings screen driven entirely by taps:
//! - One shared `VirtualKeyboard` edits every field on every section
//! - Numeric pad for setpoints and delays, AZERTY layout for network fields
//! - The form implements `KeyboardHost`, so each key press lands in the field
//!   immediately and the form stops scrolling while the keyboard is up
//! - Pointer routing through `InputLayer`: the overlay captures every tap
//! - Save / Cancel / Defaults close the keyboard first; a toast confirms the
//!   save and disappears after two seconds
//!
//! Run with: `cargo run --example kiosk_settings`
//! Diagnostics go to `kiosk_settings.log` (`RUST_LOG=debug` for key traces).

use std::cell::Cell;
use std::time::Duration;

use tapkey::crossterm::event::{KeyCode, KeyModifiers, MouseEvent, MouseEventKind};
use tapkey::ratatui::layout::{Alignment, Constraint, Layout, Rect};
use tapkey::ratatui::style::{Color, Modifier, Style};
use tapkey::ratatui::text::{Line, Span};
use tapkey::ratatui::widgets::{Block, Borders, Paragraph};
use tapkey::ratatui::Frame;
use tapkey::widgets::chrome::{button_block, focus_block};
use tapkey::widgets::field::{self, EchoMode, TextField};
use tapkey::widgets::keyboard::{
    self, DeliveryError, FieldId, FieldIdError, KeyboardHost, KeyboardMode, ScrollControl,
    VirtualKeyboard,
};
use tapkey::widgets::overlay::FullFrame;
use tapkey::widgets::viewport::{self, Viewport};
use tapkey::{
    tap_position, terminal_events, Command, Component, InputLayer, LayeredModel, Model,
    ProgramOptions, Subscription, TerminalEvent,
};

const FIELD_HEIGHT: u16 = 3;
const FIELD_WIDTH: u16 = 44;
const SIDEBAR_WIDTH: u16 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Temperature,
    Defrost,
    Alarms,
    CompressorDoor,
    Network,
    Info,
}

impl Section {
    const ALL: [Section; 6] = [
        Section::Temperature,
        Section::Defrost,
        Section::Alarms,
        Section::CompressorDoor,
        Section::Network,
        Section::Info,
    ];

    fn title(self) -> &'static str {
        match self {
            Section::Temperature => "Reglages Temperature",
            Section::Defrost => "Degivrage",
            Section::Alarms => "Reglages Alarmes",
            Section::CompressorDoor => "Compresseur & Porte",
            Section::Network => "Reseau (WiFi / 4G)",
            Section::Info => "Informations appareil",
        }
    }
}

struct FieldSpec {
    key: &'static str,
    label: &'static str,
    section: Section,
    mode: KeyboardMode,
    default: &'static str,
    unit: Option<&'static str>,
    masked: bool,
}

const fn numeric(
    key: &'static str,
    label: &'static str,
    section: Section,
    default: &'static str,
    unit: &'static str,
) -> FieldSpec {
    FieldSpec {
        key,
        label,
        section,
        mode: KeyboardMode::Numeric,
        default,
        unit: Some(unit),
        masked: false,
    }
}

const fn text(key: &'static str, label: &'static str, masked: bool) -> FieldSpec {
    FieldSpec {
        key,
        label,
        section: Section::Network,
        mode: KeyboardMode::Text,
        default: "",
        unit: None,
        masked,
    }
}

const FIELDS: [FieldSpec; 13] = [
    numeric("tempLow", "Temp Low", Section::Temperature, "2.0", "°C"),
    numeric("tempMid", "Temp Mid", Section::Temperature, "4.0", "°C"),
    numeric("tempHigh", "Temp High", Section::Temperature, "8.0", "°C"),
    numeric("hystDiff", "Hyst_diff", Section::Temperature, "1.0", "°C"),
    numeric("defrostDuration", "Defrost_duration", Section::Defrost, "5", "min"),
    numeric("tevapThreshold", "Tevap threshold", Section::Defrost, "0", "°C"),
    numeric("tempMaxAlarm", "Temp_max_alarm", Section::Alarms, "7.0", "°C"),
    numeric("tempMinAlarm", "Temp_min_alarm", Section::Alarms, "2.0", "°C"),
    numeric("antiShortCycleDelay", "Anti_short_cycle_delay", Section::CompressorDoor, "180", "s"),
    numeric("doorOpenAlarmDelay", "Door open alarm delay", Section::CompressorDoor, "5", "min"),
    text("wifiSsid", "SSID", false),
    text("wifiPassword", "Password", true),
    text("apn4g", "APN", false),
];

const DEVICE_INFO: [(&str, &str); 3] = [
    ("Adresse IP", "—"),
    ("Adresse MAC", "00:11:22:33:44:55"),
    ("Firmware", "1.4.2"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Defaults,
    Cancel,
    Save,
}

impl Action {
    const ALL: [Action; 3] = [Action::Defaults, Action::Cancel, Action::Save];

    fn label(self) -> &'static str {
        match self {
            Action::Defaults => "Restore defaults",
            Action::Cancel => "Cancel",
            Action::Save => "Save",
        }
    }

    fn color(self) -> Color {
        match self {
            Action::Defaults => Color::Yellow,
            Action::Cancel => Color::Gray,
            Action::Save => Color::Cyan,
        }
    }
}

/// Every settings field plus the panel scroll state. The keyboard writes
/// into it through `KeyboardHost`.
struct Form {
    section: Section,
    fields: Vec<(Section, TextField)>,
    saved: Vec<String>,
    viewport: Viewport,
}

impl Form {
    fn new() -> Result<Self, FieldIdError> {
        let mut fields = Vec::with_capacity(FIELDS.len());
        for spec in &FIELDS {
            let mut field = TextField::new(FieldId::new(spec.key)?, spec.label, spec.mode)
                .with_value(spec.default);
            if let Some(unit) = spec.unit {
                field = field.with_unit(unit);
            }
            if spec.masked {
                field = field.with_echo_mode(EchoMode::Password('*'));
            }
            fields.push((spec.section, field));
        }
        let saved = fields.iter().map(|(_, f)| f.value().to_owned()).collect();

        let mut form = Form {
            section: Section::Temperature,
            fields,
            saved,
            viewport: Viewport::new(0),
        };
        form.viewport.set_content_height(form.content_height());
        Ok(form)
    }

    /// Indices into `fields` of the fields shown for the current section.
    fn mounted(&self) -> impl Iterator<Item = usize> + '_ {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, (section, _))| *section == self.section)
            .map(|(n, _)| n)
    }

    fn content_height(&self) -> u16 {
        if self.section == Section::Info {
            return DEVICE_INFO.len() as u16;
        }
        (self.mounted().count() as u16).saturating_mul(FIELD_HEIGHT)
    }

    fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|(_, f)| f.id().as_str() == key)
            .map_or("", |(_, f)| f.value())
    }

    fn set_all(&mut self, values: Vec<String>) {
        for ((_, field), value) in self.fields.iter_mut().zip(values) {
            field.update(field::Message::Set(value));
        }
    }

    /// `Temp Low <= Temp Mid <= Temp High`, checked by the form, not the keyboard.
    fn validation(&self) -> Option<&'static str> {
        let parse = |key: &str| self.value(key).trim().parse::<f32>().ok();
        match (parse("tempLow"), parse("tempMid"), parse("tempHigh")) {
            (Some(low), Some(mid), Some(high)) if low <= mid && mid <= high => None,
            (Some(_), Some(_), Some(_)) => Some("Temp Low ≤ Temp Mid ≤ Temp High requis"),
            _ => Some("Valeurs numeriques requises"),
        }
    }
}

impl KeyboardHost for Form {
    fn deliver(&mut self, id: &FieldId, value: &str) -> Result<(), DeliveryError> {
        let section = self.section;
        let (_, field) = self
            .fields
            .iter_mut()
            .find(|(s, f)| *s == section && f.id() == id)
            .ok_or_else(|| DeliveryError::FieldGone(id.clone()))?;
        field.set_value(value);
        Ok(())
    }

    fn scroll(&mut self) -> &mut dyn ScrollControl {
        &mut self.viewport
    }
}

struct ScreenLayout {
    header: Rect,
    sidebar: Vec<(Section, Rect)>,
    panel: Rect,
    notice: Rect,
    content: Rect,
    actions: Vec<(Action, Rect)>,
}

fn screen_layout(area: Rect) -> ScreenLayout {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(3),
    ])
    .areas(area);
    let [sidebar, panel] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)]).areas(body);

    let sidebar_rows =
        Layout::vertical(Section::ALL.iter().map(|_| Constraint::Length(3))).split(sidebar);
    let sidebar = Section::ALL.iter().copied().zip(sidebar_rows.iter().copied()).collect();

    let inner = Block::new().borders(Borders::ALL).inner(panel);
    let [notice, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);

    let [_, buttons] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(60)]).areas(footer);
    let button_rects =
        Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2), Constraint::Fill(2)])
            .split(buttons);
    let actions = Action::ALL.iter().copied().zip(button_rects.iter().copied()).collect();

    ScreenLayout {
        header,
        sidebar,
        panel,
        notice,
        content,
        actions,
    }
}

struct Settings {
    form: Form,
    keyboard: VirtualKeyboard,
    toast: Option<(u64, String)>,
    toast_seq: u64,
    /// Updated during each `view()` call via interior mutability.
    frame_area: Cell<Rect>,
}

#[derive(Debug)]
enum Msg {
    Pointer(MouseEvent),
    Keyboard(keyboard::Message),
    Scroll(viewport::Message),
    GoSection(Section),
    Act(Action),
    HideToast(u64),
    Redraw,
    Quit,
}

impl Settings {
    fn route_keyboard(&mut self, msg: keyboard::Message) {
        self.keyboard.update(msg, &mut self.form);
        self.sync_routed();
    }

    fn sync_routed(&mut self) {
        let routed = self.keyboard.active().map(|r| r.field().clone());
        for (_, field) in &mut self.form.fields {
            let is_routed = routed.as_ref() == Some(field.id());
            if field.is_routed() != is_routed {
                field.update(field::Message::Routed(is_routed));
            }
        }
    }

    fn go_section(&mut self, next: Section) {
        if next == self.form.section {
            return;
        }
        let leaving: Vec<FieldId> = self
            .form
            .mounted()
            .map(|n| self.form.fields[n].1.id().clone())
            .collect();
        for id in leaving {
            self.route_keyboard(keyboard::Message::FieldUnmounted(id));
        }
        self.form.section = next;
        let height = self.form.content_height();
        self.form.viewport.set_content_height(height);
    }

    fn act(&mut self, action: Action) -> Command<Msg> {
        self.route_keyboard(keyboard::Message::Close);
        match action {
            Action::Save => {
                self.form.saved = self
                    .form
                    .fields
                    .iter()
                    .map(|(_, f)| f.value().to_owned())
                    .collect();
                tapkey::tracing::info!("settings saved");
                self.toast_seq += 1;
                let seq = self.toast_seq;
                self.toast = Some((seq, "Saved successfully".into()));
                Command::after(Duration::from_secs(2), move |_| Msg::HideToast(seq))
            }
            Action::Cancel => {
                let saved = self.form.saved.clone();
                self.form.set_all(saved);
                Command::none()
            }
            Action::Defaults => {
                self.form.set_all(FIELDS.iter().map(|s| s.default.to_owned()).collect());
                Command::none()
            }
        }
    }

    /// Rects of the fields currently scrolled into view.
    fn field_rects(&self, content: Rect) -> Vec<(usize, Rect)> {
        let rows = self.form.viewport.visible_rows();
        let area = Viewport::content_area(content);
        self.form
            .mounted()
            .enumerate()
            .filter_map(|(slot, n)| {
                let top = u16::try_from(slot).ok()?.checked_mul(FIELD_HEIGHT)?;
                if top < rows.start || top + FIELD_HEIGHT > rows.end {
                    return None;
                }
                let rect = Rect::new(
                    area.x,
                    area.y + top - rows.start,
                    area.width.min(FIELD_WIDTH),
                    FIELD_HEIGHT,
                );
                Some((n, rect))
            })
            .collect()
    }

    fn on_screen_pointer(&mut self, event: MouseEvent) -> Command<Msg> {
        match event.kind {
            MouseEventKind::ScrollUp => {
                return self.update(Msg::Scroll(viewport::Message::MouseWheel { up: true }));
            }
            MouseEventKind::ScrollDown => {
                return self.update(Msg::Scroll(viewport::Message::MouseWheel { up: false }));
            }
            _ => {}
        }
        let Some(at) = tap_position(&event) else {
            return Command::none();
        };
        let layout = screen_layout(self.frame_area.get());

        if let Some((section, _)) = layout.sidebar.iter().find(|(_, r)| r.contains(at)) {
            return self.update(Msg::GoSection(*section));
        }
        if let Some((action, _)) = layout.actions.iter().find(|(_, r)| r.contains(at)) {
            return self.update(Msg::Act(*action));
        }
        let tapped = self
            .field_rects(layout.content)
            .into_iter()
            .find(|(_, r)| r.contains(at))
            .map(|(n, _)| self.form.fields[n].1.open_request());
        if let Some(req) = tapped {
            self.route_keyboard(keyboard::Message::Open(req));
        }
        Command::none()
    }

    fn view_panel(&self, frame: &mut Frame, layout: &ScreenLayout) {
        frame.render_widget(focus_block(self.form.section.title(), false), layout.panel);

        if self.form.section == Section::Temperature {
            if let Some(problem) = self.form.validation() {
                let notice = Paragraph::new(problem).style(Style::default().fg(Color::Red));
                frame.render_widget(notice, layout.notice);
            }
        }

        self.form.viewport.view(frame, layout.content);
        if self.form.section == Section::Info {
            let lines: Vec<Line> = DEVICE_INFO
                .iter()
                .map(|(name, value)| {
                    Line::from(vec![
                        Span::styled(format!("{name}: "), Style::default().fg(Color::Gray)),
                        Span::raw(*value),
                    ])
                })
                .collect();
            frame.render_widget(Paragraph::new(lines), Viewport::content_area(layout.content));
            return;
        }
        for (n, rect) in self.field_rects(layout.content) {
            self.form.fields[n].1.view(frame, rect);
        }
    }
}

impl Model for Settings {
    type Message = Msg;
    type Flags = Form;

    fn init(form: Form) -> (Self, Command<Msg>) {
        let settings = Settings {
            form,
            keyboard: VirtualKeyboard::new(FullFrame),
            toast: None,
            toast_seq: 0,
            frame_area: Cell::new(Rect::default()),
        };
        (settings, Command::set_title("Reglages"))
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Pointer(event) => match self.active_layer() {
                InputLayer::Overlay => {
                    self.route_keyboard(keyboard::Message::Pointer(event));
                    Command::none()
                }
                InputLayer::Screen => self.on_screen_pointer(event),
            },
            Msg::Keyboard(m) => {
                self.route_keyboard(m);
                Command::none()
            }
            Msg::Scroll(m) => self.form.viewport.update(m).map(Msg::Scroll),
            Msg::GoSection(section) => {
                self.go_section(section);
                Command::none()
            }
            Msg::Act(action) => self.act(action),
            Msg::HideToast(seq) => {
                if self.toast.as_ref().is_some_and(|(s, _)| *s == seq) {
                    self.toast = None;
                }
                Command::none()
            }
            Msg::Redraw => Command::none(),
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        self.frame_area.set(area);
        let layout = screen_layout(area);

        let mut header = vec![Span::styled(
            "Parametres",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        if let Some((_, toast)) = &self.toast {
            header.push(Span::raw("   "));
            header.push(Span::styled(
                toast.as_str(),
                Style::default().fg(Color::Black).bg(Color::Green),
            ));
        }
        let title = Paragraph::new(Line::from(header)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(title, layout.header);

        for (section, rect) in &layout.sidebar {
            let selected = *section == self.form.section;
            let item = Paragraph::new(section.title()).block(focus_block("", selected));
            frame.render_widget(item, *rect);
        }

        self.view_panel(frame, &layout);

        for (action, rect) in &layout.actions {
            let button = Paragraph::new(action.label())
                .alignment(Alignment::Center)
                .block(button_block(action.color()));
            frame.render_widget(button, *rect);
        }

        // Drawn last so it covers everything.
        self.keyboard.view(frame);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        vec![terminal_events(|ev| match ev {
            TerminalEvent::Pointer(m) => Some(Msg::Pointer(m)),
            TerminalEvent::Resize(..) => Some(Msg::Redraw),
            // Maintenance console only.
            TerminalEvent::Key(key) => match (key.code, key.modifiers) {
                (KeyCode::Esc, _) => Some(Msg::Quit),
                (KeyCode::Enter, _) => Some(Msg::Keyboard(keyboard::Message::Close)),
                (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(Msg::Quit),
                _ => None,
            },
        })]
    }
}

impl LayeredModel for Settings {
    fn active_layer(&self) -> InputLayer {
        InputLayer::for_overlay(self.keyboard.is_visible())
    }
}

#[tapkey::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let form = Form::new()?;
    let options = ProgramOptions {
        title: Some("Reglages".into()),
        log_file: Some("kiosk_settings.log".into()),
        ..ProgramOptions::default()
    };
    let settings = tapkey::run_with::<Settings>(form, options).await?;
    tapkey::tracing::info!(saved = ?settings.form.saved, "exited");
    Ok(())
}
