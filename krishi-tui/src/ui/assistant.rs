//! Assistant chat screen

use libkrishi::service::assistant::Role;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use super::Theme;
use crate::app::AppState;

pub(super) fn render_assistant(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    theme: Theme,
    textarea: &TextArea,
) {
    let screen = &state.screens.assistant;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Transcript
            Constraint::Length(1), // Quick prompts
            Constraint::Length(3), // Input
        ])
        .split(area);

    let mut lines = Vec::new();
    for message in screen.conversation.messages() {
        let time = message.timestamp.format("%H:%M").to_string();
        let (who, style, alignment) = match message.role {
            Role::Assistant => ("KrishiMitra", theme.accent(), Alignment::Left),
            Role::User => ("You", theme.fg(Color::Cyan), Alignment::Right),
        };
        lines.push(
            Line::from(vec![
                Span::styled(who, style.add_modifier(ratatui::style::Modifier::BOLD)),
                Span::styled(format!(" {}", time), theme.muted()),
            ])
            .alignment(alignment),
        );
        lines.push(Line::from(message.content.clone()).alignment(alignment));
        lines.push(Line::from(""));
    }
    if screen.conversation.is_waiting() {
        lines.push(Line::from(Span::styled("KrishiMitra is typing…", theme.muted())));
    }
    if screen.voice.is_listening() {
        lines.push(Line::from(Span::styled("🎤 Listening…", theme.fg(Color::Red))));
    }

    // Keep the newest messages in view
    let inner_height = chunks[0].height.saturating_sub(2);
    let overflow = (lines.len() as u16).saturating_sub(inner_height);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((overflow, 0))
            .block(theme.block(format!(" {} ", state.translator().get(libkrishi::i18n::TextKey::Assistant)))),
        chunks[0],
    );

    let prompts = state.catalog.quick_prompts(state.language());
    let mut spans = vec![Span::styled("Tab: ", theme.muted())];
    for prompt in prompts {
        spans.push(Span::styled(format!("[{}] ", prompt), theme.fg(Color::Cyan)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);

    frame.render_widget(textarea, chunks[2]);
}
