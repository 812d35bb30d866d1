//! Read-only field whose value is edited through the virtual keyboard.
//!
//! A [`TextField`] never takes keystrokes itself. Tapping it produces an
//! [`OpenRequest`]; the keyboard then writes the new value back through the
//! host, which stores it with [`TextField::set_value`].

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tapkey_core::command::Command;
use tapkey_core::component::Component;

use crate::chrome::focus_block;
use crate::keyboard::{FieldId, KeyboardMode, OpenRequest};

/// Controls how the value is displayed.
#[derive(Debug, Clone, Default)]
pub enum EchoMode {
    /// Display the value as is.
    #[default]
    Normal,
    /// Display each character as the given mask character.
    Password(char),
}

/// Style configuration for the field.
#[derive(Debug, Clone)]
pub struct TextFieldStyle {
    pub value: Style,
    pub unit: Style,
    /// Shown instead of an empty value.
    pub placeholder: Style,
}

impl Default for TextFieldStyle {
    fn default() -> Self {
        Self {
            value: Style::default().add_modifier(Modifier::BOLD),
            unit: Style::default().fg(Color::Gray),
            placeholder: Style::default().fg(Color::DarkGray),
        }
    }
}

/// Messages for the field.
#[derive(Debug, Clone)]
pub enum Message {
    /// Replace the value.
    Set(String),
    /// The keyboard started or stopped editing this field.
    Routed(bool),
}

/// A labelled value that opens the keyboard when tapped.
///
/// # Example
///
/// ```ignore
/// let field = TextField::new(FieldId::new("tempLow")?, "Low setpoint", KeyboardMode::Numeric)
///     .with_value("2.0")
///     .with_unit("°C");
/// keyboard.update(keyboard::Message::Open(field.open_request()), &mut host);
/// ```
pub struct TextField {
    id: FieldId,
    label: String,
    value: String,
    mode: KeyboardMode,
    echo_mode: EchoMode,
    unit: Option<String>,
    placeholder: String,
    routed: bool,
    style: TextFieldStyle,
}

impl TextField {
    pub fn new(id: FieldId, label: impl Into<String>, mode: KeyboardMode) -> Self {
        Self {
            id,
            label: label.into(),
            value: String::new(),
            mode,
            echo_mode: EchoMode::default(),
            unit: None,
            placeholder: "—".into(),
            routed: false,
            style: TextFieldStyle::default(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Suffix shown after the value, e.g. `°C` or `min`.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_echo_mode(mut self, mode: EchoMode) -> Self {
        self.echo_mode = mode;
        self
    }

    pub fn with_style(mut self, style: TextFieldStyle) -> Self {
        self.style = style;
        self
    }

    pub fn id(&self) -> &FieldId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn mode(&self) -> KeyboardMode {
        self.mode
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_routed(&self) -> bool {
        self.routed
    }

    /// The request to send to the keyboard when this field is tapped.
    pub fn open_request(&self) -> OpenRequest {
        let req = OpenRequest::new(self.id.clone(), self.mode).with_value(self.value.clone());
        match self.echo_mode {
            EchoMode::Normal => req,
            EchoMode::Password(_) => req.masked(),
        }
    }

    fn display_value(&self) -> String {
        match self.echo_mode {
            EchoMode::Normal => self.value.clone(),
            EchoMode::Password(mask) => self.value.chars().map(|_| mask).collect(),
        }
    }
}

impl Component for TextField {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Set(value) => self.value = value,
            Message::Routed(routed) => self.routed = routed,
        }
        Command::none()
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let block = focus_block(&self.label, self.routed);

        let line = if self.value.is_empty() {
            Line::from(Span::styled(self.placeholder.as_str(), self.style.placeholder))
        } else {
            let mut spans = vec![Span::styled(self.display_value(), self.style.value)];
            if let Some(unit) = &self.unit {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(unit.as_str(), self.style.unit));
            }
            Line::from(spans)
        };

        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn focused(&self) -> bool {
        self.routed
    }
}
