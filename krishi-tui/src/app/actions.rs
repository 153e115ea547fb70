//! Actions and effects for the reducer pattern
//!
//! Actions describe what happened. Effects describe what the reducer wants
//! done outside itself: store writes, speech, image picking. The reducer
//! queues effects in the state's outbox and the event loop carries them out.

use crossterm::event::KeyEvent;
use libkrishi::i18n::Language;
use libkrishi::router::Route;
use libkrishi::service::soil_entry::SoilSubmission;
use libkrishi::service::validation::ProfileDraft;
use libkrishi::store::StoreEvent;
use libkrishi::types::ImageRef;

/// Actions that trigger state transitions
#[derive(Debug, Clone)]
pub enum Action {
    // === UI Events ===
    /// Keyboard input event
    Key(KeyEvent),

    /// Periodic tick driving timers, analysis and mock speech
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    // === Navigation ===
    NavigateTo(Route),

    /// Navigate by path; unknown paths show the not-found screen
    OpenPath(String),

    Quit,

    ShowHelp,

    HideHelp,

    // === Input ===
    /// Content of the focused text input changed
    InputChanged(String),

    // === Results from the event loop ===
    /// The store changed; carries the fresh snapshot
    StoreChanged(StoreEvent),

    /// An image was picked for analysis
    ImagePicked(ImageRef),

    // === Error Handling ===
    ShowError(String),

    DismissError,

    // === Status Bar ===
    SetStatus(String),

    ClearStatus,
}

/// Side effects requested by the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Language selection finished
    ChooseLanguage(Language),

    /// Profile form submitted (already validated)
    SaveProfile(ProfileDraft),

    /// A soil reading is ready
    SubmitSoil(SoilSubmission),

    /// Simulated connectivity change
    SetOnline(bool),

    /// Read text aloud in the session language
    Speak(String),

    /// Pick an image file by path
    PickImage(String),

    /// Take a photo with the (mock) camera
    CaptureImage,
}
