//! Text input routing
//!
//! One `tui-textarea` is shared by every screen with a text field. It is
//! stateful, so it lives outside `AppState`: the event loop hands it keys
//! while a field is focused and reports the new text as
//! `Action::InputChanged`. After every reduction `sync` rebuilds it when
//! the focused field changed or the reducer rewrote the text.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use libkrishi::i18n::TextKey;
use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
};
use tui_textarea::TextArea;

use crate::app::{AppState, InputTarget};

pub struct TextInput {
    textarea: TextArea<'static>,
    target: Option<InputTarget>,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput {
    pub fn new() -> Self {
        Self {
            textarea: TextArea::default(),
            target: None,
        }
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Whether `key` should be typed into the field rather than reduced
    ///
    /// Navigation, submit and function keys always go to the reducer, as
    /// does everything while an overlay is open.
    pub fn accepts(&self, state: &AppState, key: &KeyEvent) -> bool {
        if state.input_target().is_none() || state.help_visible || state.error.is_some() {
            return false;
        }
        if key.kind == KeyEventKind::Release {
            return false;
        }

        let reserved = matches!(
            (key.code, key.modifiers),
            (KeyCode::F(_), _)
                | (KeyCode::Esc, _)
                | (KeyCode::Enter, _)
                | (KeyCode::Tab, _)
                | (KeyCode::BackTab, _)
                | (KeyCode::Up, _)
                | (KeyCode::Down, _)
                | (KeyCode::Char('c'), KeyModifiers::CONTROL)
                | (KeyCode::Char('s'), KeyModifiers::CONTROL)
                | (KeyCode::Char('1'..='5'), KeyModifiers::ALT)
        );
        !reserved
    }

    /// Type a key into the field, returning the new text
    pub fn input(&mut self, key: KeyEvent) -> String {
        self.textarea.input(key);
        self.text()
    }

    /// Bring the textarea in line with the state's focused field
    pub fn sync(&mut self, state: &AppState) {
        let target = state.input_target();
        if target == self.target && self.text() == state.input_value() {
            return;
        }

        let mut textarea = TextArea::new(vec![state.input_value().to_string()]);
        textarea.move_cursor(tui_textarea::CursorMove::End);
        if let Some(target) = target {
            let (title, placeholder) = labels(state, target);
            textarea.set_placeholder_text(placeholder);
            textarea.set_block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(if state.config.colors_enabled {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default()
                    }),
            );
        }
        textarea.set_cursor_line_style(Style::default());

        self.textarea = textarea;
        self.target = target;
    }
}

fn labels(state: &AppState, target: InputTarget) -> (String, &'static str) {
    let t = state.translator();
    match target {
        InputTarget::Profile(field) => {
            let marker = if field.is_required() { " *" } else { "" };
            (
                format!(" {}{} ", t.get(field.label_key()), marker),
                "",
            )
        }
        InputTarget::ImagePath => (
            format!(" {} ", t.get(TextKey::UploadImage)),
            "Path to a soil photo (leave empty to use the camera)",
        ),
        InputTarget::SchemeSearch => (" Search ".to_string(), "Search schemes..."),
        InputTarget::ChatMessage => (
            " Message ".to_string(),
            "Ask about crops, soil, weather or schemes...",
        ),
    }
}
