//! UI rendering
//!
//! Pure rendering functions that transform state into terminal frames.
//! The only outside input is the textarea, which the event loop owns and
//! which is drawn wherever the current screen has a text input.

mod advice;
mod assistant;
mod home;
mod onboarding;
mod soil;

use libkrishi::i18n::TextKey;
use libkrishi::router::Route;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use crate::app::AppState;

/// Styles that honor the colors setting
#[derive(Debug, Clone, Copy)]
pub(crate) struct Theme {
    colors: bool,
}

impl Theme {
    pub(crate) fn new(state: &AppState) -> Self {
        Self {
            colors: state.config.colors_enabled,
        }
    }

    pub(crate) fn fg(&self, color: Color) -> Style {
        if self.colors {
            Style::default().fg(color)
        } else {
            Style::default()
        }
    }

    pub(crate) fn accent(&self) -> Style {
        self.fg(Color::Green)
    }

    pub(crate) fn muted(&self) -> Style {
        self.fg(Color::Gray)
    }

    pub(crate) fn bold(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Selected row in a list
    pub(crate) fn selected(&self) -> Style {
        if self.colors {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        }
    }

    pub(crate) fn block<'a>(&self, title: impl Into<Line<'a>>) -> Block<'a> {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.muted())
    }
}

/// Render the application UI
///
/// Pure function: Takes state, returns nothing, but draws to frame.
/// This is the main rendering entry point.
pub fn render(frame: &mut Frame, state: &AppState, textarea: &TextArea) {
    let area = frame.size();
    let theme = Theme::new(state);

    if state.route == Route::Splash {
        onboarding::render_splash(frame, area, state, theme);
        return;
    }

    let nav_height = if state.route.has_bottom_nav() { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),          // Header
            Constraint::Min(3),             // Screen
            Constraint::Length(nav_height), // Bottom navigation
            Constraint::Length(1),          // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], state, theme);

    let body = chunks[1];
    match state.route {
        Route::Splash => {}
        Route::Language => onboarding::render_language(frame, body, state, theme),
        Route::Profile => onboarding::render_profile(frame, body, state, theme, textarea),
        Route::Dashboard => home::render_dashboard(frame, body, state, theme),
        Route::NotFound => home::render_not_found(frame, body, theme),
        Route::SoilInput => soil::render_methods(frame, body, state, theme),
        Route::SoilManual => soil::render_manual(frame, body, state, theme),
        Route::SoilImage => soil::render_image(frame, body, state, theme, textarea),
        Route::SoilVoice => soil::render_voice(frame, body, state, theme),
        Route::Climate => advice::render_climate(frame, body, state, theme),
        Route::Recommendations => advice::render_recommendations(frame, body, state, theme),
        Route::Schemes => advice::render_schemes(frame, body, state, theme, textarea),
        Route::Assistant => assistant::render_assistant(frame, body, state, theme, textarea),
    }

    if state.route.has_bottom_nav() {
        render_bottom_nav(frame, chunks[2], state, theme);
    }
    render_status_bar(frame, chunks[3], state, theme);

    if state.help_visible {
        render_help_overlay(frame, area, theme);
    }

    if let Some(ref error) = state.error {
        render_error_overlay(frame, area, error, theme);
    }
}

/// Heading for a screen in the session language
pub fn screen_title(state: &AppState) -> String {
    let t = state.translator();
    match state.route {
        Route::Splash => "KrishiMitra".to_string(),
        Route::Language => t.get(TextKey::SelectLanguage).to_string(),
        Route::Profile => t.get(TextKey::Profile).to_string(),
        Route::Dashboard => t.get(TextKey::Dashboard).to_string(),
        Route::SoilInput => t.get(TextKey::SoilAnalysis).to_string(),
        Route::SoilManual => t.get(TextKey::ManualEntry).to_string(),
        Route::SoilImage => t.get(TextKey::UploadImage).to_string(),
        Route::SoilVoice => t.get(TextKey::VoiceInput).to_string(),
        Route::Climate => t.get(TextKey::Climate).to_string(),
        Route::Recommendations => t.get(TextKey::Recommendations).to_string(),
        Route::Schemes => t.get(TextKey::Schemes).to_string(),
        Route::Assistant => t.get(TextKey::Assistant).to_string(),
        Route::NotFound => "404".to_string(),
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let t = state.translator();
    let connectivity = if state.store.online {
        Span::styled("● online", theme.accent())
    } else {
        Span::styled(
            format!("○ {}", t.get(TextKey::Offline)),
            theme.fg(Color::Yellow),
        )
    };

    let header = Line::from(vec![
        Span::styled(" KrishiMitra ", theme.accent().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(screen_title(state), theme.bold()),
        Span::raw("  "),
        Span::styled(state.language().native_name(), theme.muted()),
        Span::raw("  "),
        connectivity,
    ]);

    frame.render_widget(Paragraph::new(header), area);
}

fn render_bottom_nav(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let t = state.translator();
    let mut spans = Vec::new();
    for (index, (route, key)) in Route::BOTTOM_NAV.iter().enumerate() {
        let label = format!(" {} {} ", index + 1, t.get(*key));
        let style = if *route == state.route {
            theme.selected()
        } else {
            theme.muted()
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

/// Key hints for the current screen
fn hints(state: &AppState) -> &'static str {
    match state.route {
        Route::Splash => "Enter: Continue",
        Route::Language => "↑↓: Choose | Enter: Continue | q: Quit",
        Route::Profile => "Tab: Next field | ←→: Unit | Ctrl+S: Save | Esc: Back",
        Route::Dashboard => "↑↓: Choose | Enter: Open | 1-5: Navigate | F2: Online | q: Quit",
        Route::SoilInput => "↑↓: Choose method | Enter: Open | Esc: Back",
        Route::SoilManual => "↑↓: Field | ←→: Adjust (Shift: x10) | Enter: Analyze | Esc: Back",
        Route::SoilImage => "Enter: Pick path (empty: camera) / Analyze | Backspace: Remove | Esc: Back",
        Route::SoilVoice => "Enter: Start/stop listening | Esc: Back",
        Route::Climate => "←→: Switch tab | Esc: Back",
        Route::Recommendations => "↑↓: Choose | Enter: Details | e: Eliminated | Esc: Back",
        Route::Schemes => "Type: Search | ↑↓: Choose | Enter: Details | F3: Read aloud | Esc: Back",
        Route::Assistant => "Enter: Send | Tab: Quick prompt | F4: Mic | F3: Read reply | Esc: Back",
        Route::NotFound => "Enter: Dashboard",
    }
}

/// Render status bar with the latest message, or key hints
fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: Theme) {
    let line = match &state.status.message {
        Some(message) => Line::from(vec![
            Span::styled(message.clone(), theme.fg(Color::Cyan)),
            Span::styled("  F1: Help", theme.muted()),
        ]),
        None => Line::from(Span::styled(hints(state), theme.muted())),
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect, theme: Theme) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = vec![
        Line::from(Span::styled("Keyboard Shortcuts", theme.bold())),
        Line::from(""),
        Line::from("Global:"),
        Line::from("  q          - Quit (when not typing)"),
        Line::from("  Ctrl+C     - Quit"),
        Line::from("  F1         - Toggle help"),
        Line::from("  F2         - Toggle online/offline"),
        Line::from("  1-5, Alt+N - Bottom navigation"),
        Line::from("  Esc        - Dismiss overlays / Back"),
        Line::from(""),
        Line::from("Screens:"),
        Line::from("  ↑↓ / Tab   - Move selection or focus"),
        Line::from("  Enter      - Confirm"),
        Line::from("  F3         - Read aloud"),
        Line::from("  F4         - Microphone (assistant)"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(theme.fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(ratatui::widgets::Clear, popup_area);
    frame.render_widget(help, popup_area);
}

/// Render error overlay
fn render_error_overlay(frame: &mut Frame, area: Rect, error: &str, theme: Theme) {
    let popup_area = centered_rect(70, 30, area);

    let error_text = vec![
        Line::from(Span::styled("Error", theme.fg(Color::Red).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(error),
        Line::from(""),
        Line::from("Press Esc to dismiss"),
    ];

    let error_widget = Paragraph::new(error_text)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(theme.fg(Color::Red)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);

    frame.render_widget(ratatui::widgets::Clear, popup_area);
    frame.render_widget(error_widget, popup_area);
}

/// Helper to create centered rectangle
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Textual bar for a value within `max`, e.g. `████░░░░`
pub(crate) fn bar(value: f64, max: f64, width: usize) -> String {
    let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::UiConfig;
    use libkrishi::catalog::Catalog;
    use libkrishi::store::StoreSnapshot;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn state_at(route: Route) -> AppState {
        let mut state = AppState::new(
            Arc::new(Catalog::embedded().unwrap()),
            UiConfig::default(),
            StoreSnapshot::default(),
        );
        state.route = route;
        state
    }

    fn rendered(state: &AppState) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let textarea = TextArea::default();
        terminal
            .draw(|frame| render(frame, state, &textarea))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_every_route_renders() {
        for route in Route::ROUTABLE.iter().copied().chain([Route::NotFound]) {
            let output = rendered(&state_at(route));
            assert!(!output.trim().is_empty(), "{} rendered nothing", route);
        }
    }

    #[test]
    fn test_bottom_nav_shown_on_nav_routes() {
        let output = rendered(&state_at(Route::Climate));
        assert!(output.contains("Dashboard"));
        assert!(output.contains("Assistant"));

        let output = rendered(&state_at(Route::SoilManual));
        assert!(!output.contains("5 AI Assistant"));
    }

    #[test]
    fn test_offline_indicator() {
        let mut state = state_at(Route::Dashboard);
        state.store.online = false;
        assert!(rendered(&state).contains("Offline"));
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(bar(50.0, 100.0, 10).chars().count(), 10);
        assert_eq!(bar(200.0, 100.0, 4), "████");
        assert_eq!(bar(0.0, 100.0, 4), "░░░░");
    }
}
