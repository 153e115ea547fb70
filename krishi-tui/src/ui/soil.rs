//! Soil entry screens: method choice, manual form, image analysis, voice

use libkrishi::i18n::TextKey;
use libkrishi::service::analysis::{AnalysisPhase, AnalysisStage};
use libkrishi::service::soil_entry::SoilEntryMethod;
use libkrishi::service::validation::{soil_warnings, SoilField};
use libkrishi::types::SoilTexture;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use super::{bar, Theme};
use crate::app::AppState;

pub(super) fn render_methods(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let t = state.translator();
    let items: Vec<ListItem> = SoilEntryMethod::ALL
        .iter()
        .map(|method| {
            ListItem::new(vec![
                Line::from(Span::styled(t.get(method.title_key()), theme.bold())),
                Line::from(Span::styled(format!("  {}", method.description()), theme.muted())),
                Line::from(""),
            ])
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.screens.soil_method_selected));
    let list = List::new(items)
        .block(theme.block(" Choose how to enter soil data "))
        .highlight_style(theme.selected())
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, area, &mut list_state);
}

pub(super) fn render_manual(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let form = &state.screens.manual;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(9), Constraint::Length(3)])
        .split(area);

    let mut lines: Vec<Line> = SoilField::ALL
        .iter()
        .enumerate()
        .map(|(row, field)| {
            let value = form.draft.get(*field);
            let domain = field.domain();
            let shown = if domain.step < 1.0 {
                format!("{:.1}{}", value, field.unit())
            } else {
                format!("{:.0}{}", value, field.unit())
            };
            let style = if form.focus == row {
                theme.selected()
            } else {
                ratatui::style::Style::default()
            };
            Line::from(vec![
                Span::styled(format!(" {:<16}", field.label()), style),
                Span::raw(" "),
                Span::styled(bar(value - domain.min, domain.max - domain.min, 20), theme.accent()),
                Span::raw(format!("  {:>6}", shown)),
            ])
        })
        .collect();

    let texture_row = SoilField::ALL.len();
    let texture_style = if form.focus == texture_row {
        theme.selected()
    } else {
        ratatui::style::Style::default()
    };
    let mut texture_spans = vec![Span::styled(format!(" {:<16}", "Soil Texture"), texture_style), Span::raw(" ")];
    for texture in SoilTexture::ALL {
        let style = if texture == form.draft.texture() {
            theme.accent().add_modifier(ratatui::style::Modifier::BOLD)
        } else {
            theme.muted()
        };
        texture_spans.push(Span::styled(format!("[{}] ", texture.label()), style));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(texture_spans));

    let title = format!(" {} ", state.translator().get(TextKey::ManualEntry));
    frame.render_widget(Paragraph::new(lines).block(theme.block(title)), chunks[0]);

    let warnings = soil_warnings(&form.draft.to_soil_data());
    let footer = if warnings.is_empty() {
        Line::from(Span::styled("Enter: analyze these values", theme.muted()))
    } else {
        Line::from(Span::styled(warnings.join("; "), theme.fg(Color::Yellow)))
    };
    frame.render_widget(
        Paragraph::new(footer).wrap(Wrap { trim: true }).block(theme.block("")),
        chunks[1],
    );
}

pub(super) fn render_image(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    theme: Theme,
    textarea: &TextArea,
) {
    let t = state.translator();
    let screen = &state.screens.image;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Path input or picked image
            Constraint::Length(3), // Progress
            Constraint::Min(4),    // Stages
        ])
        .split(area);

    match &screen.image {
        None if !screen.analysis.is_running() => frame.render_widget(textarea, chunks[0]),
        None => {}
        Some(image) => {
            let line = Line::from(vec![
                Span::styled("📷 ", theme.accent()),
                Span::raw(image.location.clone()),
                Span::styled(format!("  ({})", image.mime_type), theme.muted()),
            ]);
            frame.render_widget(
                Paragraph::new(line).block(theme.block(format!(" {} ", t.get(TextKey::UploadImage)))),
                chunks[0],
            );
        }
    }

    let analysis = &screen.analysis;
    let label = match analysis.phase() {
        AnalysisPhase::Idle if screen.image.is_some() => "Press Enter to analyze".to_string(),
        AnalysisPhase::Idle => "Enter a path, or press Enter for the camera".to_string(),
        AnalysisPhase::Running { .. } => format!("{} {}%", t.get(TextKey::Analyzing), analysis.progress()),
        AnalysisPhase::Done => "Analysis complete".to_string(),
        AnalysisPhase::Cancelled => "Analysis cancelled".to_string(),
    };
    frame.render_widget(
        Gauge::default()
            .block(theme.block(""))
            .gauge_style(theme.accent())
            .percent(u16::from(analysis.progress()))
            .label(label),
        chunks[1],
    );

    let stages: Vec<Line> = AnalysisStage::ALL
        .iter()
        .map(|stage| {
            let (symbol, style) = if analysis.stage_complete(*stage) {
                ("✓", theme.accent())
            } else {
                ("·", theme.muted())
            };
            Line::from(vec![
                Span::styled(format!(" {} ", symbol), style),
                Span::styled(stage.name(), theme.bold()),
                Span::styled(format!("  {}", stage.name_local()), theme.muted()),
                Span::styled(format!(" | {}", stage.description()), theme.muted()),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(stages).block(theme.block(" Stages ")),
        chunks[2],
    );
}

pub(super) fn render_voice(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let voice = &state.screens.voice;
    let mut lines = vec![Line::from("")];

    if voice.is_listening() {
        lines.push(Line::from(Span::styled("🎤 Listening...", theme.fg(Color::Red))));
        lines.push(Line::from(Span::styled(
            "Speak your soil readings: pH, nitrogen, phosphorus, potassium, moisture",
            theme.muted(),
        )));
    } else {
        lines.push(Line::from(Span::styled("🎤 Press Enter to start", theme.accent())));
    }

    if let Some(transcript) = voice.transcript() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Heard:", theme.bold())));
        lines.push(Line::from(transcript.to_string()));
    }

    let title = format!(" {} ", state.translator().get(TextKey::VoiceInput));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(theme.block(title)),
        area,
    );
}
