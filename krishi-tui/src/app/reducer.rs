//! Pure reducer function for state transitions
//!
//! The reducer is a function `(State, Action) -> State`. It never touches
//! the store, the terminal or the filesystem. When an action calls for a
//! side effect it queues an [`Effect`] in `state.outbox` and the event
//! loop carries it out, feeding the outcome back as another action.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use libkrishi::i18n::Language;
use libkrishi::router::Route;
use libkrishi::service::analysis::TickOutcome;
use libkrishi::service::schemes::filter_schemes;
use libkrishi::service::soil_entry::{SoilEntryMethod, SoilSubmission, VoiceSoilEntry};
use libkrishi::service::validation::ProfileDraft;
use libkrishi::store::StoreField;

use super::actions::{Action, Effect};
use super::state::{
    language_index, AppState, CropsScreen, InputTarget, ManualSoilForm, ProfileField, ProfileForm,
    SchemesScreen, Screens, StatusBarState, DASHBOARD_ACTIONS,
};

/// Pure reducer function
///
/// Takes current state and an action, returns new state.
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => handle_key(state, key),
        Action::Tick => handle_tick(state),
        Action::Resize(_, _) => state,

        // === Navigation ===
        Action::NavigateTo(route) => navigate(state, route),

        Action::OpenPath(path) => navigate(state, Route::from_path(&path)),

        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        // === Input ===
        Action::InputChanged(text) => apply_input(state, text),

        // === Results from the event loop ===
        Action::StoreChanged(event) => {
            let status = match event.field {
                StoreField::Online if event.snapshot.online => {
                    StatusBarState { message: Some("Back online".to_string()) }
                }
                StoreField::Online => StatusBarState {
                    message: Some("Offline mode: showing saved data".to_string()),
                },
                _ => state.status.clone(),
            };
            AppState {
                store: event.snapshot,
                status,
                ..state
            }
        }

        Action::ImagePicked(image) => {
            let mut state = state;
            state.screens.image.path.clear();
            state.status.message = Some(format!("Image ready: {}", image.location));
            state.screens.image.image = Some(image);
            state
        }

        // === Error Handling ===
        Action::ShowError(error) => AppState {
            error: Some(error),
            ..state
        },

        Action::DismissError => AppState {
            error: None,
            ..state
        },

        // === Status Bar ===
        Action::SetStatus(message) => AppState {
            status: StatusBarState {
                message: Some(message),
            },
            ..state
        },

        Action::ClearStatus => AppState {
            status: StatusBarState { message: None },
            ..state
        },
    }
}

/// Switch screens, rebuilding the local state of the screen being entered
fn navigate(mut state: AppState, route: Route) -> AppState {
    // Leaving or re-entering the image screen halts any analysis in flight
    if state.route == Route::SoilImage {
        state.screens.image.analysis.cancel();
    }

    let catalog = Arc::clone(&state.catalog);
    let timing = state.config.timing;
    let screens = &mut state.screens;
    match route {
        Route::Splash => screens.splash_ticks_left = timing.splash_ticks,
        Route::Language => screens.language_selected = language_index(state.store.language),
        Route::Profile => {
            screens.profile = ProfileForm::new(
                state
                    .store
                    .profile
                    .as_ref()
                    .map(ProfileDraft::from_profile)
                    .unwrap_or_default(),
            )
        }
        Route::Dashboard => screens.dashboard_selected = 0,
        Route::SoilInput => screens.soil_method_selected = 0,
        Route::SoilManual => screens.manual = ManualSoilForm::default(),
        Route::SoilImage => screens.image = Screens::image_screen(&catalog, timing),
        Route::SoilVoice => {
            screens.voice = VoiceSoilEntry::new(
                catalog.analysis_result().clone(),
                timing.listen_ticks,
            )
        }
        Route::Climate => screens.climate_tab = Default::default(),
        Route::Recommendations => screens.crops = CropsScreen::default(),
        Route::Schemes => screens.schemes = SchemesScreen::default(),
        Route::Assistant => {
            screens.assistant = Screens::assistant_screen(&catalog, timing, state.store.language)
        }
        Route::NotFound => {}
    }

    tracing::debug!(from = %state.route, to = %route, "navigate");
    AppState {
        route,
        status: StatusBarState::default(),
        ..state
    }
}

fn apply_input(mut state: AppState, text: String) -> AppState {
    match state.input_target() {
        Some(InputTarget::Profile(field)) => state.screens.profile.set_value(field, text),
        Some(InputTarget::ImagePath) => state.screens.image.path = text,
        Some(InputTarget::SchemeSearch) => {
            state.screens.schemes.query = text;
            state.screens.schemes.selected = 0;
        }
        Some(InputTarget::ChatMessage) => state.screens.assistant.input = text,
        None => {}
    }
    state
}

// ============================================================================
// Timers
// ============================================================================

fn handle_tick(mut state: AppState) -> AppState {
    match state.route {
        Route::Splash => {
            state.screens.splash_ticks_left = state.screens.splash_ticks_left.saturating_sub(1);
            if state.screens.splash_ticks_left == 0 {
                return navigate(state, Route::Language);
            }
            state
        }
        Route::SoilImage => match state.screens.image.analysis.tick() {
            TickOutcome::Completed(data) => {
                state
                    .outbox
                    .push(Effect::SubmitSoil(SoilSubmission::new(SoilEntryMethod::Image, data)));
                navigate(state, Route::Recommendations)
            }
            TickOutcome::Halted => AppState {
                status: StatusBarState {
                    message: Some("Analysis cancelled".to_string()),
                },
                ..state
            },
            TickOutcome::Advanced { .. } | TickOutcome::Unchanged => state,
        },
        Route::SoilVoice => match state.screens.voice.tick() {
            Some(submission) => {
                state.outbox.push(Effect::SubmitSoil(submission));
                navigate(state, Route::Recommendations)
            }
            None => state,
        },
        Route::Assistant => {
            let catalog = Arc::clone(&state.catalog);
            let language = state.store.language;
            let assistant = &mut state.screens.assistant;
            // What was heard lands in the input box for the farmer to send
            if let Some(heard) = assistant.voice.tick() {
                assistant.input = heard;
            }
            assistant.conversation.tick(&catalog, language);
            state
        }
        _ => state,
    }
}

// ============================================================================
// Keys
// ============================================================================

/// Map keys to high-level actions. This is where keybindings are defined.
fn handle_key(mut state: AppState, key: KeyEvent) -> AppState {
    if key.kind == KeyEventKind::Release {
        return state;
    }

    // Global keybindings (work everywhere)
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            return reduce(state, Action::Quit);
        }

        (KeyCode::Char('q'), KeyModifiers::NONE) if state.shortcuts_enabled() => {
            return reduce(state, Action::Quit);
        }

        (KeyCode::F(1), _) => {
            let action = if state.help_visible {
                Action::HideHelp
            } else {
                Action::ShowHelp
            };
            return reduce(state, action);
        }

        (KeyCode::Esc, _) if state.error.is_some() => {
            return reduce(state, Action::DismissError);
        }

        (KeyCode::Esc, _) if state.help_visible => {
            return reduce(state, Action::HideHelp);
        }

        _ => {}
    }

    // Overlays swallow everything else
    if state.help_visible || state.error.is_some() {
        return state;
    }

    match (key.code, key.modifiers) {
        // Simulated network status
        (KeyCode::F(2), _) => {
            let online = !state.store.online;
            state.outbox.push(Effect::SetOnline(online));
            return state;
        }

        // Bottom navigation
        (KeyCode::Char(c @ '1'..='5'), modifiers)
            if state.route.has_bottom_nav()
                && (modifiers == KeyModifiers::ALT
                    || (modifiers == KeyModifiers::NONE && state.shortcuts_enabled())) =>
        {
            let index = (c as usize) - ('1' as usize);
            let (route, _) = Route::BOTTOM_NAV[index];
            return navigate(state, route);
        }

        (KeyCode::Esc, _) if state.route == Route::Schemes && state.screens.schemes.detail => {
            state.screens.schemes.detail = false;
            return state;
        }

        (KeyCode::Esc, _) => {
            let parent = state.route.parent();
            return navigate(state, parent);
        }

        _ => {}
    }

    // Screen-specific keybindings
    match state.route {
        Route::Splash => handle_splash_key(state, key),
        Route::Language => handle_language_key(state, key),
        Route::Profile => handle_profile_key(state, key),
        Route::Dashboard => handle_dashboard_key(state, key),
        Route::SoilInput => handle_soil_input_key(state, key),
        Route::SoilManual => handle_manual_key(state, key),
        Route::SoilImage => handle_image_key(state, key),
        Route::SoilVoice => handle_voice_key(state, key),
        Route::Climate => handle_climate_key(state, key),
        Route::Recommendations => handle_crops_key(state, key),
        Route::Schemes => handle_schemes_key(state, key),
        Route::Assistant => handle_assistant_key(state, key),
        Route::NotFound => match key.code {
            KeyCode::Enter => navigate(state, Route::Dashboard),
            _ => state,
        },
    }
}

/// Move a selection index by one within `len` entries, wrapping around
fn step_selection(selected: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (selected + 1) % len
    } else {
        (selected + len - 1) % len
    }
}

fn handle_splash_key(state: AppState, key: KeyEvent) -> AppState {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => navigate(state, Route::Language),
        _ => state,
    }
}

fn handle_language_key(mut state: AppState, key: KeyEvent) -> AppState {
    let len = Language::ALL.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.screens.language_selected = step_selection(state.screens.language_selected, len, false);
            state
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.screens.language_selected = step_selection(state.screens.language_selected, len, true);
            state
        }
        KeyCode::Enter => {
            let language = Language::ALL[state.screens.language_selected.min(len - 1)];
            state.outbox.push(Effect::ChooseLanguage(language));
            navigate(state, Route::Profile)
        }
        _ => state,
    }
}

fn handle_profile_key(mut state: AppState, key: KeyEvent) -> AppState {
    let form = &mut state.screens.profile;
    match (key.code, key.modifiers) {
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => submit_profile(state),
        (KeyCode::Enter, _) if form.focus == ProfileField::Phone => submit_profile(state),
        (KeyCode::Tab | KeyCode::Down | KeyCode::Enter, _) => {
            form.focus = form.focus.next();
            state
        }
        (KeyCode::BackTab | KeyCode::Up, _) => {
            form.focus = form.focus.prev();
            state
        }
        (KeyCode::Left | KeyCode::Right | KeyCode::Char(' '), _) if !form.focus.is_text() => {
            form.draft.land_unit = form.draft.land_unit.toggled();
            state
        }
        _ => state,
    }
}

fn submit_profile(mut state: AppState) -> AppState {
    let validation = state.screens.profile.draft.validate();
    if !validation.valid {
        state.status.message = Some(validation.errors.join(", "));
        state.screens.profile.errors = validation.errors;
        return state;
    }

    state
        .outbox
        .push(Effect::SaveProfile(state.screens.profile.draft.clone()));
    navigate(state, Route::Dashboard)
}

fn handle_dashboard_key(mut state: AppState, key: KeyEvent) -> AppState {
    let len = DASHBOARD_ACTIONS.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.screens.dashboard_selected = step_selection(state.screens.dashboard_selected, len, false);
            state
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.screens.dashboard_selected = step_selection(state.screens.dashboard_selected, len, true);
            state
        }
        KeyCode::Enter => {
            let (route, _) = DASHBOARD_ACTIONS[state.screens.dashboard_selected.min(len - 1)];
            navigate(state, route)
        }
        KeyCode::Char('p') => navigate(state, Route::Profile),
        _ => state,
    }
}

fn handle_soil_input_key(mut state: AppState, key: KeyEvent) -> AppState {
    let len = SoilEntryMethod::ALL.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.screens.soil_method_selected = step_selection(state.screens.soil_method_selected, len, false);
            state
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.screens.soil_method_selected = step_selection(state.screens.soil_method_selected, len, true);
            state
        }
        KeyCode::Enter => {
            let method = SoilEntryMethod::ALL[state.screens.soil_method_selected.min(len - 1)];
            navigate(state, method.route())
        }
        _ => state,
    }
}

fn handle_manual_key(mut state: AppState, key: KeyEvent) -> AppState {
    let form = &mut state.screens.manual;
    let steps = if key.modifiers.contains(KeyModifiers::SHIFT) { 10 } else { 1 };
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) | (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
            let data = form.draft.to_soil_data();
            state
                .outbox
                .push(Effect::SubmitSoil(SoilSubmission::new(SoilEntryMethod::Manual, data)));
            navigate(state, Route::Recommendations)
        }
        (KeyCode::Up | KeyCode::BackTab, _) => {
            form.focus = step_selection(form.focus, ManualSoilForm::ROWS, false);
            state
        }
        (KeyCode::Down | KeyCode::Tab, _) => {
            form.focus = step_selection(form.focus, ManualSoilForm::ROWS, true);
            state
        }
        (KeyCode::Left | KeyCode::Right, _) => {
            let forward = key.code == KeyCode::Right;
            match form.focused_field() {
                Some(field) => form.draft.adjust(field, if forward { steps } else { -steps }),
                None => {
                    let texture = form.draft.texture();
                    form.draft
                        .set_texture(if forward { texture.next() } else { texture.prev() });
                }
            }
            state
        }
        _ => state,
    }
}

fn handle_image_key(mut state: AppState, key: KeyEvent) -> AppState {
    let screen = &mut state.screens.image;
    if screen.analysis.is_running() {
        return state;
    }

    let image = screen.image.clone();
    match (key.code, image) {
        (KeyCode::Enter, None) => {
            let path = screen.path.trim().to_string();
            let effect = if path.is_empty() {
                Effect::CaptureImage
            } else {
                Effect::PickImage(path)
            };
            state.outbox.push(effect);
            state
        }
        (KeyCode::Enter, Some(image)) => {
            screen.analysis.start(Some(image));
            state
        }
        (KeyCode::Backspace | KeyCode::Delete, Some(_)) => {
            screen.image = None;
            screen.analysis.reset();
            state
        }
        _ => state,
    }
}

fn handle_voice_key(mut state: AppState, key: KeyEvent) -> AppState {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::F(4) => {
            state.screens.voice.toggle();
            state
        }
        _ => state,
    }
}

fn handle_climate_key(mut state: AppState, key: KeyEvent) -> AppState {
    match key.code {
        KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => {
            state.screens.climate_tab = state.screens.climate_tab.next();
            state
        }
        KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => {
            state.screens.climate_tab = state.screens.climate_tab.prev();
            state
        }
        _ => state,
    }
}

fn handle_crops_key(mut state: AppState, key: KeyEvent) -> AppState {
    let len = state.store.recommendations.len();
    let crops = &mut state.screens.crops;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            crops.selected = step_selection(crops.selected, len, false);
            state
        }
        KeyCode::Down | KeyCode::Char('j') => {
            crops.selected = step_selection(crops.selected, len, true);
            state
        }
        KeyCode::Enter if len > 0 => {
            crops.expanded = if crops.expanded == Some(crops.selected) {
                None
            } else {
                Some(crops.selected)
            };
            state
        }
        KeyCode::Char('e') => {
            crops.show_eliminated = !crops.show_eliminated;
            state
        }
        KeyCode::Char('s') if len == 0 => navigate(state, Route::SoilInput),
        _ => state,
    }
}

fn handle_schemes_key(mut state: AppState, key: KeyEvent) -> AppState {
    let matches = filter_schemes(&state.store.schemes, &state.screens.schemes.query);
    let len = matches.len();
    let selected = matches
        .get(state.screens.schemes.selected)
        .map(|scheme| format!("{}. {}. {}", scheme.name, scheme.description, scheme.benefits));

    let schemes = &mut state.screens.schemes;
    match key.code {
        KeyCode::Up => {
            schemes.selected = step_selection(schemes.selected, len, false);
            state
        }
        KeyCode::Down => {
            schemes.selected = step_selection(schemes.selected, len, true);
            state
        }
        KeyCode::Enter if len > 0 => {
            schemes.detail = !schemes.detail;
            state
        }
        KeyCode::F(3) => {
            if let Some(text) = selected {
                state.outbox.push(Effect::Speak(text));
            }
            state
        }
        _ => state,
    }
}

fn handle_assistant_key(mut state: AppState, key: KeyEvent) -> AppState {
    let prompts = state.catalog.quick_prompts(state.store.language).to_vec();
    let assistant = &mut state.screens.assistant;
    match key.code {
        KeyCode::Enter => {
            if assistant.conversation.send(&assistant.input).is_some() {
                assistant.input.clear();
            }
            state
        }
        KeyCode::Tab if !prompts.is_empty() => {
            assistant.input = prompts[assistant.prompt_index % prompts.len()].clone();
            assistant.prompt_index = (assistant.prompt_index + 1) % prompts.len();
            state
        }
        KeyCode::F(3) => {
            if let Some(reply) = assistant.conversation.last_reply() {
                let text = reply.content.clone();
                state.outbox.push(Effect::Speak(text));
            }
            state
        }
        KeyCode::F(4) => {
            if assistant.voice.is_listening() {
                assistant.voice.stop();
            } else if let Some(first) = prompts.first() {
                assistant.voice.start(first.clone());
            }
            state
        }
        _ => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::UiConfig;
    use libkrishi::catalog::Catalog;
    use libkrishi::store::{StoreEvent, StoreSnapshot};

    fn new_state() -> AppState {
        AppState::new(
            Arc::new(Catalog::embedded().unwrap()),
            UiConfig::default(),
            StoreSnapshot::default(),
        )
    }

    fn key(code: KeyCode) -> Action {
        Action::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_reducer_is_pure() {
        let state = new_state();
        let state_clone = state.clone();

        let new_state = reduce(state_clone.clone(), Action::SetStatus("Test".to_string()));

        assert!(state_clone.status.message.is_none());
        assert_eq!(new_state.status.message, Some("Test".to_string()));
    }

    #[test]
    fn test_quit_action() {
        let state = new_state();
        assert!(!state.should_quit);
        assert!(reduce(state, Action::Quit).should_quit);
    }

    #[test]
    fn test_splash_times_out() {
        let mut state = new_state();
        let ticks = state.config.timing.splash_ticks;
        for _ in 0..ticks - 1 {
            state = reduce(state, Action::Tick);
        }
        assert_eq!(state.route, Route::Splash);
        state = reduce(state, Action::Tick);
        assert_eq!(state.route, Route::Language);
    }

    #[test]
    fn test_store_changed_replaces_snapshot() {
        let state = new_state();
        let snapshot = StoreSnapshot {
            language: Language::Hindi,
            step: 1,
            ..StoreSnapshot::default()
        };
        let state = reduce(
            state,
            Action::StoreChanged(StoreEvent {
                seq: 1,
                field: StoreField::Language,
                snapshot: snapshot.clone(),
            }),
        );
        assert_eq!(state.store, snapshot);
        assert_eq!(state.translator().language(), Language::Hindi);
    }

    #[test]
    fn test_offline_status_message() {
        let state = new_state();
        let state = reduce(
            state,
            Action::StoreChanged(StoreEvent {
                seq: 1,
                field: StoreField::Online,
                snapshot: StoreSnapshot {
                    online: false,
                    ..StoreSnapshot::default()
                },
            }),
        );
        assert!(state.status.message.unwrap().starts_with("Offline"));
    }

    #[test]
    fn test_image_analysis_submits_once() {
        let mut state = reduce(new_state(), Action::NavigateTo(Route::SoilImage));
        state.config.timing.stage_ticks = 1;
        state.screens.image = Screens::image_screen(&state.catalog.clone(), state.config.timing);

        state = reduce(state, key(KeyCode::Enter));
        assert_eq!(state.take_effects(), vec![Effect::CaptureImage]);

        let image = libkrishi::types::ImageRef {
            location: "mock://camera/soil-sample.jpg".to_string(),
            mime_type: libkrishi::types::ImageMimeType::Jpeg,
        };
        state = reduce(state, Action::ImagePicked(image.clone()));
        state = reduce(state, key(KeyCode::Enter));
        assert!(state.screens.image.analysis.is_running());

        for _ in 0..10 {
            state = reduce(state, Action::Tick);
        }

        assert_eq!(state.route, Route::Recommendations);
        let effects = state.take_effects();
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::SubmitSoil(submission) => {
                assert_eq!(submission.method, SoilEntryMethod::Image);
                assert_eq!(submission.data.image, Some(image));
            }
            other => panic!("Expected SubmitSoil, got {:?}", other),
        }
    }

    #[test]
    fn test_leaving_image_screen_cancels_analysis() {
        let mut state = reduce(new_state(), Action::NavigateTo(Route::SoilImage));
        state = reduce(
            state,
            Action::ImagePicked(libkrishi::types::ImageRef {
                location: "/tmp/a.png".to_string(),
                mime_type: libkrishi::types::ImageMimeType::Png,
            }),
        );
        state = reduce(state, key(KeyCode::Enter));
        assert!(state.screens.image.analysis.is_running());

        state = reduce(state, key(KeyCode::Esc));
        assert_eq!(state.route, Route::SoilInput);
        for _ in 0..100 {
            state = reduce(state, Action::Tick);
        }
        assert!(state.outbox.is_empty());
    }
}
