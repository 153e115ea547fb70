//! Dashboard and not-found screens

use libkrishi::i18n::TextKey;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use super::{bar, Theme};
use crate::app::state::DASHBOARD_ACTIONS;
use crate::app::AppState;

pub(super) fn render_dashboard(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let t = state.translator();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Greeting
            Constraint::Length(5), // Cards
            Constraint::Min(4),    // Quick actions
        ])
        .split(area);

    let greeting = match &state.store.profile {
        Some(profile) => format!("{}, {} 👋", t.get(TextKey::Welcome), profile.name),
        None => t.get(TextKey::Welcome).to_string(),
    };
    let location = state
        .store
        .profile
        .as_ref()
        .map(|p| format!("{}, {}", p.village, p.district))
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(greeting, theme.bold())),
            Line::from(Span::styled(location, theme.muted())),
        ]),
        chunks[0],
    );

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(chunks[1]);

    let soil = match &state.store.soil_data {
        Some(data) => {
            let score = data.health_score();
            vec![
                Line::from(Span::styled(format!("{}%", score), theme.accent())),
                Line::from(bar(score as f64, 100.0, 12)),
                Line::from(Span::styled(format!("pH {:.1}", data.ph), theme.muted())),
            ]
        }
        None => vec![
            Line::from("No soil data yet"),
            Line::from(Span::styled("Run a soil analysis", theme.muted())),
        ],
    };
    frame.render_widget(
        Paragraph::new(soil).block(theme.block(format!(" {} ", t.get(TextKey::SoilHealth)))),
        cards[0],
    );

    let climate = state.catalog.climate();
    let weather = vec![
        Line::from(Span::styled(
            format!("{}°C {}", climate.current.temp, climate.current.condition),
            theme.fg(Color::Cyan),
        )),
        Line::from(format!("Rain {}%", climate.rain_chance)),
        Line::from(Span::styled(
            format!("Humidity {}%", climate.current.humidity),
            theme.muted(),
        )),
    ];
    frame.render_widget(
        Paragraph::new(weather).block(theme.block(format!(" {} ", t.get(TextKey::Climate)))),
        cards[1],
    );

    let top_crop = state
        .store
        .recommendations
        .first()
        .map(|crop| format!("Top crop: {}", crop.name))
        .unwrap_or_else(|| "No recommendations yet".to_string());
    let summary = vec![
        Line::from(format!("{} schemes matched", state.store.schemes.len())),
        Line::from(top_crop),
        Line::from(Span::styled(
            if state.store.online { "Synced" } else { t.get(TextKey::Offline) },
            theme.muted(),
        )),
    ];
    frame.render_widget(
        Paragraph::new(summary).block(theme.block(" Summary ")),
        cards[2],
    );

    let items: Vec<ListItem> = DASHBOARD_ACTIONS
        .iter()
        .map(|(_, key)| ListItem::new(format!("  {}", t.get(*key))))
        .collect();
    let mut list_state = ListState::default();
    list_state.select(Some(state.screens.dashboard_selected));
    let list = List::new(items)
        .block(theme.block(" Quick Actions "))
        .highlight_style(theme.selected())
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, chunks[2], &mut list_state);
}

pub(super) fn render_not_found(frame: &mut Frame, area: Rect, theme: Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("404", theme.fg(Color::Yellow))),
        Line::from(""),
        Line::from("Page not found"),
        Line::from(Span::styled("Press Enter to return to the dashboard", theme.muted())),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(theme.block("")),
        area,
    );
}
