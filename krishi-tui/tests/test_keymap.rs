//! Test keybinding mappings to actions
//!
//! Verifies that keyboard input is correctly mapped to state changes and
//! effects through the reducer.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use krishi_tui::app::{reduce, Action, AppState, Effect, UiConfig};
use libkrishi::catalog::Catalog;
use libkrishi::i18n::Language;
use libkrishi::router::Route;
use libkrishi::store::StoreSnapshot;

fn new_state() -> AppState {
    AppState::new(
        Arc::new(Catalog::embedded().unwrap()),
        UiConfig::default(),
        StoreSnapshot::default(),
    )
}

fn at(route: Route) -> AppState {
    reduce(new_state(), Action::NavigateTo(route))
}

fn press(state: AppState, code: KeyCode) -> AppState {
    reduce(state, Action::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

fn press_with(state: AppState, code: KeyCode, modifiers: KeyModifiers) -> AppState {
    reduce(state, Action::Key(KeyEvent::new(code, modifiers)))
}

#[test]
fn test_q_quits_application() {
    let state = press(at(Route::Dashboard), KeyCode::Char('q'));
    assert!(state.should_quit);
}

#[test]
fn test_q_is_typed_not_quit_in_text_fields() {
    let state = press(at(Route::Assistant), KeyCode::Char('q'));
    assert!(!state.should_quit);

    let state = press(at(Route::Profile), KeyCode::Char('q'));
    assert!(!state.should_quit);
}

#[test]
fn test_ctrl_c_always_quits() {
    let state = press_with(at(Route::Assistant), KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(state.should_quit);
}

#[test]
fn test_f1_toggles_help() {
    let state = at(Route::Dashboard);
    let state = press(state, KeyCode::F(1));
    assert!(state.help_visible);

    let state = press(state, KeyCode::F(1));
    assert!(!state.help_visible);
}

#[test]
fn test_esc_closes_overlays_before_going_back() {
    let state = reduce(at(Route::SoilManual), Action::ShowError("boom".to_string()));
    let state = press(state, KeyCode::Esc);
    assert!(state.error.is_none());
    assert_eq!(state.route, Route::SoilManual);

    let state = press(state, KeyCode::Esc);
    assert_eq!(state.route, Route::SoilInput);

    let state = press(state, KeyCode::Esc);
    assert_eq!(state.route, Route::Dashboard);
}

#[test]
fn test_help_overlay_swallows_keys() {
    let state = press(at(Route::Dashboard), KeyCode::F(1));
    let state = press(state, KeyCode::Enter);
    assert_eq!(state.route, Route::Dashboard);
}

#[test]
fn test_number_keys_follow_bottom_nav() {
    let state = press(at(Route::Dashboard), KeyCode::Char('3'));
    assert_eq!(state.route, Route::Climate);

    let state = press(state, KeyCode::Char('5'));
    assert_eq!(state.route, Route::Assistant);

    // Plain digits are typed into the chat box; Alt+digit still navigates
    let state = press(state, KeyCode::Char('1'));
    assert_eq!(state.route, Route::Assistant);
    let state = press_with(state, KeyCode::Char('1'), KeyModifiers::ALT);
    assert_eq!(state.route, Route::Dashboard);
}

#[test]
fn test_no_bottom_nav_on_soil_forms() {
    let state = press(at(Route::SoilManual), KeyCode::Char('1'));
    assert_eq!(state.route, Route::SoilManual);
}

#[test]
fn test_f2_toggles_connectivity_effect() {
    let mut state = press(at(Route::Dashboard), KeyCode::F(2));
    assert_eq!(state.take_effects(), vec![Effect::SetOnline(false)]);
}

#[test]
fn test_language_enter_chooses_and_moves_on() {
    let state = at(Route::Language);
    let state = press(state, KeyCode::Down);
    let mut state = press(state, KeyCode::Enter);

    assert_eq!(state.take_effects(), vec![Effect::ChooseLanguage(Language::Tamil)]);
    assert_eq!(state.route, Route::Profile);
}

#[test]
fn test_language_selection_wraps() {
    let state = press(at(Route::Language), KeyCode::Up);
    assert_eq!(state.screens.language_selected, Language::ALL.len() - 1);
}

#[test]
fn test_splash_enter_skips_countdown() {
    let state = press(new_state(), KeyCode::Enter);
    assert_eq!(state.route, Route::Language);
}

#[test]
fn test_dashboard_enter_opens_selected_action() {
    let state = press(at(Route::Dashboard), KeyCode::Down);
    let state = press(state, KeyCode::Enter);
    assert_eq!(state.route, Route::Recommendations);
}

#[test]
fn test_soil_input_opens_method() {
    let state = press(at(Route::SoilInput), KeyCode::Down);
    let state = press(state, KeyCode::Enter);
    assert_eq!(state.route, Route::SoilManual);
}

#[test]
fn test_climate_tabs_cycle() {
    let state = press(at(Route::Climate), KeyCode::Right);
    let state = press(state, KeyCode::Right);
    let state = press(state, KeyCode::Right);
    assert_eq!(state.screens.climate_tab, Default::default());

    let state = press(state, KeyCode::Left);
    assert_eq!(state.screens.climate_tab.title(), "Trends");
}
