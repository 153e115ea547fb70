//! Test application initialization and boot sequence
//!
//! Verifies that the app starts on the splash screen with defaults taken
//! from config, environment and the store.

use std::sync::Arc;

use krishi_tui::app::{reduce, Action, AppState, UiConfig};
use libkrishi::catalog::Catalog;
use libkrishi::config::Config;
use libkrishi::i18n::Language;
use libkrishi::router::Route;
use libkrishi::store::StoreSnapshot;
use serial_test::serial;

fn boot(config: &Config, store: StoreSnapshot) -> AppState {
    AppState::new(
        Arc::new(Catalog::embedded().unwrap()),
        UiConfig::from_config(config),
        store,
    )
}

#[test]
fn test_app_initializes_to_splash() {
    let state = boot(&Config::default(), StoreSnapshot::default());

    assert_eq!(state.route, Route::Splash);
    assert!(!state.should_quit);
    assert!(!state.help_visible);
    assert!(state.error.is_none());
    assert!(state.outbox.is_empty());
}

#[test]
fn test_durations_become_ticks() {
    let mut config = Config::default();
    config.ui.tick_rate_ms = 250;
    config.ui.splash_ms = 1000;
    config.analysis.stage_ms = 1;

    let state = boot(&config, StoreSnapshot::default());
    assert_eq!(state.config.timing.splash_ticks, 4);
    assert_eq!(state.config.timing.stage_ticks, 1);
    assert_eq!(state.screens.splash_ticks_left, 4);
}

#[test]
fn test_language_screen_preselects_store_language() {
    let store = StoreSnapshot {
        language: Language::Hindi,
        ..StoreSnapshot::default()
    };
    let state = boot(&Config::default(), store);
    assert_eq!(state.screens.language_selected, 2);
    assert_eq!(state.translator().language(), Language::Hindi);
}

#[test]
fn test_open_path_skips_splash() {
    let state = boot(&Config::default(), StoreSnapshot::default());
    let state = reduce(state, Action::OpenPath("/climate".to_string()));
    assert_eq!(state.route, Route::Climate);

    let state = reduce(state, Action::OpenPath("/nowhere".to_string()));
    assert_eq!(state.route, Route::NotFound);
}

#[test]
#[serial]
fn test_no_color_env_disables_colors() {
    std::env::set_var("NO_COLOR", "1");
    let state = boot(&Config::default(), StoreSnapshot::default());
    std::env::remove_var("NO_COLOR");

    assert!(!state.config.colors_enabled);
}

#[test]
#[serial]
fn test_colors_follow_config() {
    std::env::remove_var("NO_COLOR");
    std::env::remove_var("KRISHI_TUI_NO_COLOR");

    let mut config = Config::default();
    assert!(boot(&config, StoreSnapshot::default()).config.colors_enabled);

    config.ui.colors = false;
    assert!(!boot(&config, StoreSnapshot::default()).config.colors_enabled);
}
