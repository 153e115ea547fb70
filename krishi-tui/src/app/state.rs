//! Application state
//!
//! All state transitions happen through the reducer (see `reducer.rs`).
//! Shared data lives in the store; `AppState::store` is the latest
//! snapshot delivered by a store notification. Everything under
//! [`Screens`] is per-screen transient state, rebuilt when its screen is
//! entered.

use std::sync::Arc;

use libkrishi::catalog::Catalog;
use libkrishi::config::Config;
use libkrishi::i18n::{Language, TextKey, Translator};
use libkrishi::platform::VoiceCapture;
use libkrishi::router::Route;
use libkrishi::service::analysis::SoilAnalysis;
use libkrishi::service::assistant::Conversation;
use libkrishi::service::soil_entry::VoiceSoilEntry;
use libkrishi::service::validation::{ProfileDraft, SoilDraft, SoilField};
use libkrishi::store::StoreSnapshot;
use libkrishi::types::ImageRef;

use super::actions::Effect;

/// Root application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub should_quit: bool,

    /// Screen currently shown
    pub route: Route,

    pub help_visible: bool,

    /// Error overlay state
    pub error: Option<String>,

    pub status: StatusBarState,

    pub config: UiConfig,

    /// Latest store snapshot
    pub store: StoreSnapshot,

    /// Mock data shared by every screen
    pub catalog: Arc<Catalog>,

    pub screens: Screens,

    /// Effects queued by the reducer, drained by the event loop
    pub outbox: Vec<Effect>,
}

/// Status bar state
#[derive(Debug, Clone, Default)]
pub struct StatusBarState {
    pub message: Option<String>,
}

/// Screen timers, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub splash_ticks: u32,
    pub stage_ticks: u32,
    pub reply_ticks: u32,
    pub listen_ticks: u32,
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    pub colors_enabled: bool,
    pub tick_rate_ms: u64,
    pub timing: Timing,
}

impl UiConfig {
    /// Derive UI settings, converting millisecond durations to ticks
    ///
    /// `NO_COLOR` or `KRISHI_TUI_NO_COLOR` in the environment turns colors
    /// off regardless of the config file.
    pub fn from_config(config: &Config) -> Self {
        let colors_enabled = config.ui.colors
            && std::env::var("NO_COLOR").is_err()
            && std::env::var("KRISHI_TUI_NO_COLOR").is_err();

        Self {
            colors_enabled,
            tick_rate_ms: config.ui.tick_rate_ms,
            timing: Timing {
                splash_ticks: config.ticks_for(config.ui.splash_ms),
                stage_ticks: config.ticks_for(config.analysis.stage_ms),
                reply_ticks: config.ticks_for(config.assistant.reply_delay_ms),
                listen_ticks: config.ticks_for(config.assistant.listen_ms),
            },
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

// ============================================================================
// Text inputs
// ============================================================================

/// Which text input currently receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Profile(ProfileField),
    ImagePath,
    SchemeSearch,
    ChatMessage,
}

/// Profile form fields, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Village,
    District,
    State,
    LandSize,
    LandUnit,
    Phone,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        ProfileField::Name,
        ProfileField::Village,
        ProfileField::District,
        ProfileField::State,
        ProfileField::LandSize,
        ProfileField::LandUnit,
        ProfileField::Phone,
    ];

    pub fn label_key(&self) -> TextKey {
        match self {
            ProfileField::Name => TextKey::Name,
            ProfileField::Village => TextKey::Village,
            ProfileField::District => TextKey::District,
            ProfileField::State => TextKey::State,
            ProfileField::LandSize | ProfileField::LandUnit => TextKey::LandSize,
            ProfileField::Phone => TextKey::Phone,
        }
    }

    /// The land unit is a toggle, every other field is typed
    pub fn is_text(&self) -> bool {
        !matches!(self, ProfileField::LandUnit)
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            ProfileField::Name | ProfileField::Village | ProfileField::LandSize
        )
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ============================================================================
// Screen states
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileForm {
    pub draft: ProfileDraft,
    pub focus: ProfileField,
    /// Errors from the last submit attempt
    pub errors: Vec<String>,
}

impl ProfileForm {
    pub fn new(draft: ProfileDraft) -> Self {
        Self {
            draft,
            focus: ProfileField::Name,
            errors: Vec::new(),
        }
    }

    pub fn value(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.draft.name,
            ProfileField::Village => &self.draft.village,
            ProfileField::District => &self.draft.district,
            ProfileField::State => &self.draft.state,
            ProfileField::LandSize => &self.draft.land_size,
            ProfileField::LandUnit => self.draft.land_unit.as_str(),
            ProfileField::Phone => &self.draft.phone,
        }
    }

    pub fn set_value(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::Name => self.draft.name = value,
            ProfileField::Village => self.draft.village = value,
            ProfileField::District => self.draft.district = value,
            ProfileField::State => self.draft.state = value,
            ProfileField::LandSize => self.draft.land_size = value,
            ProfileField::LandUnit => {}
            ProfileField::Phone => self.draft.phone = value,
        }
    }
}

/// Manual soil form; focus runs over the numeric fields, then texture
#[derive(Debug, Clone, PartialEq)]
pub struct ManualSoilForm {
    pub draft: SoilDraft,
    pub focus: usize,
}

impl ManualSoilForm {
    /// Number of focusable rows
    pub const ROWS: usize = SoilField::ALL.len() + 1;

    /// Focused numeric field, `None` when texture is focused
    pub fn focused_field(&self) -> Option<SoilField> {
        SoilField::ALL.get(self.focus).copied()
    }
}

impl Default for ManualSoilForm {
    fn default() -> Self {
        Self {
            draft: SoilDraft::default(),
            focus: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageScreen {
    /// Typed image path
    pub path: String,
    pub image: Option<ImageRef>,
    pub analysis: SoilAnalysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClimateTab {
    #[default]
    Current,
    Forecast,
    Trends,
}

impl ClimateTab {
    pub const ALL: [ClimateTab; 3] = [ClimateTab::Current, ClimateTab::Forecast, ClimateTab::Trends];

    pub fn title(&self) -> &'static str {
        match self {
            ClimateTab::Current => "Current",
            ClimateTab::Forecast => "Forecast",
            ClimateTab::Trends => "Trends",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ClimateTab::Current => ClimateTab::Forecast,
            ClimateTab::Forecast => ClimateTab::Trends,
            ClimateTab::Trends => ClimateTab::Current,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            ClimateTab::Current => ClimateTab::Trends,
            ClimateTab::Forecast => ClimateTab::Current,
            ClimateTab::Trends => ClimateTab::Forecast,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropsScreen {
    pub selected: usize,
    pub expanded: Option<usize>,
    pub show_eliminated: bool,
}

impl Default for CropsScreen {
    fn default() -> Self {
        // The top recommendation starts expanded
        Self {
            selected: 0,
            expanded: Some(0),
            show_eliminated: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemesScreen {
    pub query: String,
    /// Index into the filtered list
    pub selected: usize,
    /// Detail view of the selected scheme is open
    pub detail: bool,
}

#[derive(Debug, Clone)]
pub struct AssistantScreen {
    pub conversation: Conversation,
    pub input: String,
    pub voice: VoiceCapture,
    /// Next quick prompt offered by Tab
    pub prompt_index: usize,
}

/// Per-screen transient state
#[derive(Debug, Clone)]
pub struct Screens {
    pub splash_ticks_left: u32,
    pub language_selected: usize,
    pub profile: ProfileForm,
    pub dashboard_selected: usize,
    pub soil_method_selected: usize,
    pub manual: ManualSoilForm,
    pub image: ImageScreen,
    pub voice: VoiceSoilEntry,
    pub climate_tab: ClimateTab,
    pub crops: CropsScreen,
    pub schemes: SchemesScreen,
    pub assistant: AssistantScreen,
}

impl Screens {
    pub fn new(catalog: &Catalog, timing: Timing, store: &StoreSnapshot) -> Self {
        Self {
            splash_ticks_left: timing.splash_ticks,
            language_selected: language_index(store.language),
            profile: ProfileForm::new(
                store
                    .profile
                    .as_ref()
                    .map(ProfileDraft::from_profile)
                    .unwrap_or_default(),
            ),
            dashboard_selected: 0,
            soil_method_selected: 0,
            manual: ManualSoilForm::default(),
            image: Self::image_screen(catalog, timing),
            voice: VoiceSoilEntry::new(catalog.analysis_result().clone(), timing.listen_ticks),
            climate_tab: ClimateTab::default(),
            crops: CropsScreen::default(),
            schemes: SchemesScreen::default(),
            assistant: Self::assistant_screen(catalog, timing, store.language),
        }
    }

    pub fn image_screen(catalog: &Catalog, timing: Timing) -> ImageScreen {
        ImageScreen {
            path: String::new(),
            image: None,
            analysis: SoilAnalysis::new(catalog.analysis_result().clone(), timing.stage_ticks),
        }
    }

    pub fn assistant_screen(catalog: &Catalog, timing: Timing, language: Language) -> AssistantScreen {
        AssistantScreen {
            conversation: Conversation::new(catalog.greeting(language), timing.reply_ticks),
            input: String::new(),
            voice: VoiceCapture::new(timing.listen_ticks),
            prompt_index: 0,
        }
    }
}

pub fn language_index(language: Language) -> usize {
    Language::ALL
        .iter()
        .position(|l| *l == language)
        .unwrap_or(0)
}

impl AppState {
    /// Create state showing the splash screen
    pub fn new(catalog: Arc<Catalog>, config: UiConfig, store: StoreSnapshot) -> Self {
        let screens = Screens::new(&catalog, config.timing, &store);
        Self {
            should_quit: false,
            route: Route::Splash,
            help_visible: false,
            error: None,
            status: StatusBarState::default(),
            config,
            store,
            catalog,
            screens,
            outbox: Vec::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.store.language
    }

    pub fn translator(&self) -> Translator {
        Translator::new(self.store.language)
    }

    /// Text input that typed characters go to, if any
    pub fn input_target(&self) -> Option<InputTarget> {
        match self.route {
            Route::Profile if self.screens.profile.focus.is_text() => {
                Some(InputTarget::Profile(self.screens.profile.focus))
            }
            Route::SoilImage
                if self.screens.image.image.is_none() && !self.screens.image.analysis.is_running() =>
            {
                Some(InputTarget::ImagePath)
            }
            Route::Schemes if !self.screens.schemes.detail => Some(InputTarget::SchemeSearch),
            Route::Assistant => Some(InputTarget::ChatMessage),
            _ => None,
        }
    }

    /// Current content of the focused text input
    pub fn input_value(&self) -> &str {
        match self.input_target() {
            Some(InputTarget::Profile(field)) => self.screens.profile.value(field),
            Some(InputTarget::ImagePath) => &self.screens.image.path,
            Some(InputTarget::SchemeSearch) => &self.screens.schemes.query,
            Some(InputTarget::ChatMessage) => &self.screens.assistant.input,
            None => "",
        }
    }

    /// Whether plain letter and digit keys act as shortcuts on this screen
    pub fn shortcuts_enabled(&self) -> bool {
        self.input_target().is_none() && self.route != Route::Profile
    }

    /// Take queued effects, leaving the outbox empty
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.outbox)
    }
}

/// Dashboard quick actions, in display order
pub const DASHBOARD_ACTIONS: [(Route, TextKey); 6] = [
    (Route::SoilInput, TextKey::SoilAnalysis),
    (Route::Recommendations, TextKey::Recommendations),
    (Route::Climate, TextKey::Climate),
    (Route::Schemes, TextKey::Schemes),
    (Route::Assistant, TextKey::Assistant),
    (Route::Profile, TextKey::Profile),
];
