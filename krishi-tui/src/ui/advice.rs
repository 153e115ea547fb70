//! Climate, crop recommendation and government scheme screens

use libkrishi::i18n::TextKey;
use libkrishi::service::schemes::filter_schemes;
use libkrishi::types::{AlertKind, Level};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use super::{bar, Theme};
use crate::app::state::ClimateTab;
use crate::app::AppState;

// ============================================================================
// Climate
// ============================================================================

pub(super) fn render_climate(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let climate = state.catalog.climate();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(6),    // Tab content
            Constraint::Length(6), // Alerts
        ])
        .split(area);

    let selected = ClimateTab::ALL
        .iter()
        .position(|tab| *tab == state.screens.climate_tab)
        .unwrap_or(0);
    let tabs = Tabs::new(ClimateTab::ALL.iter().map(|tab| tab.title()).collect::<Vec<_>>())
        .block(theme.block(""))
        .select(selected)
        .highlight_style(theme.selected());
    frame.render_widget(tabs, chunks[0]);

    let content: Vec<Line> = match state.screens.climate_tab {
        ClimateTab::Current => {
            let now = &climate.current;
            vec![
                Line::from(Span::styled(
                    format!("{}°C  {}", now.temp, now.condition),
                    theme.fg(Color::Cyan).add_modifier(ratatui::style::Modifier::BOLD),
                )),
                Line::from(format!("Feels like {}°C", now.feels_like)),
                Line::from(""),
                Line::from(format!("Humidity   {}%", now.humidity)),
                Line::from(format!("Wind       {} km/h", now.wind_speed)),
                Line::from(format!("Rainfall   {} mm", now.rainfall)),
                Line::from(format!("UV index   {}", now.uv)),
                Line::from(format!("Rain today {}%", climate.rain_chance)),
            ]
        }
        ClimateTab::Forecast => climate
            .forecast
            .iter()
            .map(|day| {
                Line::from(vec![
                    Span::styled(format!("{:<10}", day.day), theme.bold()),
                    Span::raw(format!("{:>3}° / {:>3}°  ", day.high, day.low)),
                    Span::styled(bar(f64::from(day.rain), 100.0, 10), theme.fg(Color::Blue)),
                    Span::raw(format!(" {:>3}% rain", day.rain)),
                ])
            })
            .collect(),
        ClimateTab::Trends => {
            let peak = climate
                .trends
                .iter()
                .map(|t| t.rainfall)
                .max()
                .unwrap_or(1)
                .max(1);
            climate
                .trends
                .iter()
                .map(|trend| {
                    Line::from(vec![
                        Span::styled(format!("{:<4}", trend.month), theme.bold()),
                        Span::styled(
                            bar(f64::from(trend.rainfall), f64::from(peak), 24),
                            theme.fg(Color::Blue),
                        ),
                        Span::raw(format!(" {:>4} mm  {:>3}°C", trend.rainfall, trend.avg_temp)),
                    ])
                })
                .collect()
        }
    };
    let title = format!(" {} ", state.translator().get(TextKey::Climate));
    frame.render_widget(Paragraph::new(content).block(theme.block(title)), chunks[1]);

    let alerts: Vec<Line> = climate
        .alerts
        .iter()
        .flat_map(|alert| {
            let (symbol, style) = match alert.kind {
                AlertKind::Warning => ("⚠", theme.fg(Color::Yellow)),
                AlertKind::Info => ("ℹ", theme.fg(Color::Cyan)),
            };
            [
                Line::from(vec![
                    Span::styled(format!("{} {}", symbol, alert.title), style),
                    Span::styled(format!("  {}", alert.title_local), theme.muted()),
                ]),
                Line::from(Span::styled(format!("  {}", alert.description), theme.muted())),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(alerts)
            .wrap(Wrap { trim: false })
            .block(theme.block(format!(" {} ", state.translator().get(TextKey::RiskLevel)))),
        chunks[2],
    );
}

// ============================================================================
// Recommendations
// ============================================================================

fn level_style(level: Level, theme: Theme) -> ratatui::style::Style {
    match level {
        Level::Low => theme.fg(Color::Green),
        Level::Medium => theme.fg(Color::Yellow),
        Level::High => theme.fg(Color::Red),
    }
}

pub(super) fn render_recommendations(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let t = state.translator();
    let crops = &state.screens.crops;
    let recommendations = &state.store.recommendations;

    if recommendations.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from("No recommendations yet."),
            Line::from(Span::styled(
                "Press s to enter soil data and get crop suggestions",
                theme.muted(),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(theme.block(format!(" {} ", t.get(TextKey::Recommendations)))),
            area,
        );
        return;
    }

    let eliminated_height = if crops.show_eliminated {
        (state.catalog.eliminated_crops().len() as u16) + 2
    } else {
        1
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(eliminated_height)])
        .split(area);

    let items: Vec<ListItem> = recommendations
        .iter()
        .enumerate()
        .map(|(index, crop)| {
            let mut lines = vec![Line::from(vec![
                Span::styled(format!("{:<10}", crop.name), theme.bold()),
                Span::styled(format!(" {:<14}", crop.name_local), theme.muted()),
                Span::styled(bar(crop.confidence, 100.0, 10), theme.accent()),
                Span::raw(format!(" {:.0}% {}", crop.confidence, t.get(TextKey::Confidence))),
            ])];
            if crops.expanded == Some(index) {
                lines.push(Line::from(format!(
                    "  {} · {} · Yield {} · {}",
                    crop.season, crop.duration, crop.expected_yield, crop.market_price
                )));
                lines.push(Line::from(vec![
                    Span::raw("  Water "),
                    Span::styled("💧".repeat(crop.water_need.drops()), level_style(crop.water_need, theme)),
                    Span::raw(format!("  {} ", t.get(TextKey::RiskLevel))),
                    Span::styled(crop.risk_level.as_str(), level_style(crop.risk_level, theme)),
                ]));
                for reason in &crop.reasoning {
                    lines.push(Line::from(Span::styled(format!("  • {}", reason), theme.muted())));
                }
            }
            ListItem::new(lines)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(crops.selected));
    let list = List::new(items)
        .block(theme.block(format!(" {} ", t.get(TextKey::Recommendations))))
        .highlight_style(theme.bold())
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    if crops.show_eliminated {
        let lines: Vec<Line> = state
            .catalog
            .eliminated_crops()
            .iter()
            .map(|crop| {
                Line::from(vec![
                    Span::styled(format!("✗ {} ({})", crop.name, crop.name_local), theme.fg(Color::Red)),
                    Span::styled(format!(": {}", crop.reason), theme.muted()),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(lines).block(theme.block(" Not recommended ")),
            chunks[1],
        );
    } else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("e: show {} crops ruled out", state.catalog.eliminated_crops().len()),
                theme.muted(),
            )),
            chunks[1],
        );
    }
}

// ============================================================================
// Schemes
// ============================================================================

pub(super) fn render_schemes(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    theme: Theme,
    textarea: &TextArea,
) {
    let t = state.translator();
    let screen = &state.screens.schemes;
    let matches = filter_schemes(&state.store.schemes, &screen.query);

    if screen.detail {
        if let Some(scheme) = matches.get(screen.selected) {
            let mut lines = vec![
                Line::from(Span::styled(scheme.name.clone(), theme.bold())),
                Line::from(Span::styled(scheme.name_local.clone(), theme.muted())),
                Line::from(""),
                Line::from(scheme.description.clone()),
                Line::from(""),
                Line::from(Span::styled(t.get(TextKey::Eligibility), theme.accent())),
            ];
            for item in &scheme.eligibility {
                lines.push(Line::from(format!("  ✓ {}", item)));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", t.get(TextKey::Benefits)), theme.accent()),
                Span::raw(scheme.benefits.clone()),
            ]));
            if let Some(deadline) = &scheme.deadline {
                lines.push(Line::from(Span::styled(
                    format!("Deadline: {}", deadline),
                    theme.fg(Color::Yellow),
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("{} | F3: Read aloud | Esc: {}", t.get(TextKey::Apply), t.get(TextKey::Back)),
                theme.muted(),
            )));
            frame.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .block(theme.block(format!(" {:.0}% match ", scheme.match_score))),
                area,
            );
            return;
        }
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);
    frame.render_widget(textarea, chunks[0]);

    if matches.is_empty() {
        let message = if state.store.schemes.is_empty() {
            "No schemes yet. Complete your profile to see matched schemes."
        } else {
            "No schemes match your search."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, theme.muted()))
                .block(theme.block(format!(" {} ", t.get(TextKey::Schemes)))),
            chunks[1],
        );
        return;
    }

    let items: Vec<ListItem> = matches
        .iter()
        .map(|scheme| {
            let mut header = vec![
                Span::styled(format!("{:<38}", scheme.name), theme.bold()),
                Span::styled(format!("{:>4.0}% match", scheme.match_score), theme.accent()),
            ];
            if scheme.deadline.is_some() {
                header.push(Span::styled("  ⏰", theme.fg(Color::Yellow)));
            }
            ListItem::new(vec![
                Line::from(header),
                Line::from(Span::styled(format!("  {}", scheme.description), theme.muted())),
            ])
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(screen.selected.min(matches.len() - 1)));
    let title = format!(" {} ({}) ", t.get(TextKey::Schemes), matches.len());
    let list = List::new(items)
        .block(theme.block(title))
        .highlight_style(theme.selected())
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}
