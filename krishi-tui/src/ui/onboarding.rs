//! Splash, language selection and profile screens

use libkrishi::i18n::{Language, TextKey};
use libkrishi::types::LandUnit;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use super::{centered_rect, Theme};
use crate::app::state::ProfileField;
use crate::app::AppState;

pub(super) fn render_splash(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let popup = centered_rect(60, 50, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(1)])
        .split(popup);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("🌾 KrishiMitra", theme.accent().add_modifier(ratatui::style::Modifier::BOLD))),
        Line::from(""),
        Line::from("Your smart farming companion"),
        Line::from(Span::styled(
            "வரவேற்கிறோம் · स्वागत है · Welcome",
            theme.muted(),
        )),
        Line::from(""),
        Line::from(Span::styled("Press Enter to continue", theme.muted())),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        chunks[0],
    );

    let total = state.config.timing.splash_ticks.max(1);
    let elapsed = total.saturating_sub(state.screens.splash_ticks_left);
    let ratio = f64::from(elapsed) / f64::from(total);
    frame.render_widget(
        Gauge::default()
            .gauge_style(theme.accent())
            .ratio(ratio.clamp(0.0, 1.0))
            .label(""),
        chunks[1],
    );
}

pub(super) fn render_language(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let popup = centered_rect(60, 70, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(2)])
        .split(popup);

    let items: Vec<ListItem> = Language::ALL
        .iter()
        .map(|language| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("  {:<12}", language.native_name())),
                Span::styled(format!("  {}", language.name()), theme.muted()),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.screens.language_selected));

    let title = format!(" {} ", state.translator().get(TextKey::SelectLanguage));
    let list = List::new(items)
        .block(theme.block(title))
        .highlight_style(theme.selected())
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    // The hint is shown in the highlighted language, so the farmer can read it
    let highlighted = Language::ALL
        .get(state.screens.language_selected)
        .copied()
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Span::styled(highlighted.continue_hint(), theme.accent()))
            .alignment(Alignment::Center),
        chunks[1],
    );
}

pub(super) fn render_profile(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    theme: Theme,
    textarea: &TextArea,
) {
    let t = state.translator();
    let form = &state.screens.profile;

    let mut constraints: Vec<Constraint> = ProfileField::ALL
        .iter()
        .map(|_| Constraint::Length(3))
        .collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (index, field) in ProfileField::ALL.iter().enumerate() {
        let focused = form.focus == *field;
        let marker = if field.is_required() { " *" } else { "" };
        let label = match field {
            ProfileField::LandUnit => " Unit ".to_string(),
            _ => format!(" {}{} ", t.get(field.label_key()), marker),
        };

        if focused && field.is_text() {
            frame.render_widget(textarea, rows[index]);
            continue;
        }

        let content = match field {
            ProfileField::LandUnit => land_unit_toggle(form.draft.land_unit, theme),
            _ => Line::from(form.value(*field).to_string()),
        };
        let block = if focused {
            theme.block(label).border_style(theme.accent())
        } else {
            theme.block(label)
        };
        frame.render_widget(Paragraph::new(content).block(block), rows[index]);
    }

    if !form.errors.is_empty() {
        let lines: Vec<Line> = form
            .errors
            .iter()
            .map(|e| Line::from(Span::styled(format!("✗ {}", e), theme.fg(Color::Red))))
            .collect();
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }),
            rows[ProfileField::ALL.len()],
        );
    }
}

fn land_unit_toggle(unit: LandUnit, theme: Theme) -> Line<'static> {
    let option = |candidate: LandUnit| {
        let style = if candidate == unit {
            theme.selected()
        } else {
            theme.muted()
        };
        Span::styled(format!(" {} ", candidate.as_str()), style)
    };
    Line::from(vec![option(LandUnit::Acres), Span::raw(" "), option(LandUnit::Hectares)])
}
