//! Service layer for KrishiMitra
//!
//! Screen-side logic that any front end can reuse: form rules, the staged
//! soil analysis, the assistant, scheme search and soil entry.
//!
//! # Architecture
//!
//! `KrishiService` is the facade. It owns the session store, the mock data
//! catalog, the configuration and the platform collaborators, and offers
//! the few flows that touch more than one store field:
//!
//! - `choose_language`: language selection finished
//! - `complete_profile`: profile form submitted
//! - `submit_soil`: any soil entry method produced a reading
//!
//! # Example
//!
//! ```no_run
//! use libkrishi::service::KrishiService;
//! use libkrishi::service::validation::ProfileDraft;
//!
//! # fn example() -> libkrishi::Result<()> {
//! let service = KrishiService::new()?;
//!
//! let draft = ProfileDraft {
//!     name: "Ravi".to_string(),
//!     village: "Thanjavur".to_string(),
//!     land_size: "2".to_string(),
//!     ..ProfileDraft::default()
//! };
//! let profile = service.complete_profile(&draft)?;
//! println!("Welcome {}", profile.name);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod assistant;
pub mod schemes;
pub mod soil_entry;
pub mod validation;

use std::sync::Arc;

use self::soil_entry::SoilSubmission;
use self::validation::ProfileDraft;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::i18n::Language;
use crate::platform::{ImagePicker, PathImagePicker, Speaker};
use crate::router::Route;
use crate::store::{EventReceiver, Session, StoreHandle};
use crate::types::FarmerProfile;
use crate::Result;

/// Wizard step reached after choosing a language
pub const STEP_LANGUAGE_CHOSEN: i64 = 1;
/// Wizard step reached after saving the profile
pub const STEP_PROFILE_SAVED: i64 = 2;

/// Main service facade
///
/// Holds the only strong reference to the session. Store handles given out
/// by [`KrishiService::store`] stop working once the service is ended or
/// dropped.
pub struct KrishiService {
    session: Session,
    catalog: Arc<Catalog>,
    config: Arc<Config>,
    speaker: Option<Arc<dyn Speaker>>,
    image_picker: Arc<dyn ImagePicker>,
}

impl KrishiService {
    /// Create a service from the default configuration file
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::from_config(config)
    }

    /// Create a service with a custom configuration
    ///
    /// The store starts from its defaults. A configured language other than
    /// the primary one is then applied as an ordinary language write, which
    /// leaves the wizard step untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled catalog fails to parse.
    pub fn from_config(config: Config) -> Result<Self> {
        let catalog = Catalog::embedded()?;
        let session = Session::start(config.session.event_capacity);
        let language = config.session.default_language;
        if language != Language::default() {
            session.handle().set_language(language)?;
        }
        tracing::info!(session = %session.id(), %language, "session started");

        Ok(Self {
            session,
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            speaker: None,
            image_picker: Arc::new(PathImagePicker),
        })
    }

    pub fn with_speaker(mut self, speaker: Arc<dyn Speaker>) -> Self {
        self.speaker = Some(speaker);
        self
    }

    pub fn with_image_picker(mut self, picker: Arc<dyn ImagePicker>) -> Self {
        self.image_picker = picker;
        self
    }

    /// A handle onto the session store
    pub fn store(&self) -> StoreHandle {
        self.session.handle()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared handle on the catalog, for front ends that keep their own copy of state
    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn speaker(&self) -> Option<&dyn Speaker> {
        self.speaker.as_deref()
    }

    pub fn image_picker(&self) -> &dyn ImagePicker {
        self.image_picker.as_ref()
    }

    /// Subscribe to store change notifications
    pub fn subscribe(&self) -> Result<EventReceiver> {
        self.store().subscribe()
    }

    /// Speak `text` in the session language, if a speaker is attached
    pub fn speak(&self, text: &str) -> Result<()> {
        let language = self.store().language()?;
        match &self.speaker {
            Some(speaker) => speaker.speak(language, text),
            None => tracing::debug!("no speaker attached, skipping speech"),
        }
        Ok(())
    }

    /// Record the chosen language and advance the wizard
    pub fn choose_language(&self, language: Language) -> Result<()> {
        let store = self.store();
        store.set_language(language)?;
        store.set_step(STEP_LANGUAGE_CHOSEN)?;
        Ok(())
    }

    /// Validate and save the profile form
    ///
    /// Saving also fills the matched schemes from the catalog and advances
    /// the wizard. Nothing is written when the form is invalid.
    pub fn complete_profile(&self, draft: &ProfileDraft) -> Result<FarmerProfile> {
        let profile = draft.to_profile()?;
        let store = self.store();
        store.set_profile(profile.clone())?;
        store.set_schemes(self.catalog.schemes().to_vec())?;
        store.set_step(STEP_PROFILE_SAVED)?;
        tracing::info!(village = %profile.village, "profile saved");
        Ok(profile)
    }

    /// Store a soil reading and the recommendations that go with it
    ///
    /// Returns where to navigate next.
    pub fn submit_soil(&self, submission: SoilSubmission) -> Result<Route> {
        for warning in validation::soil_warnings(&submission.data) {
            tracing::warn!(method = submission.method.as_str(), "{}", warning);
        }

        let store = self.store();
        store.set_soil_data(submission.data)?;
        store.set_recommendations(self.catalog.recommendations().to_vec())?;
        tracing::info!(method = submission.method.as_str(), "soil data submitted");
        Ok(Route::Recommendations)
    }

    /// End the session; outstanding store handles become inactive
    pub fn end(self) {
        tracing::info!(session = %self.session.id(), "session ended");
        self.session.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{KrishiError, SessionError};
    use crate::platform::{MockImagePicker, SilentSpeaker};
    use crate::service::soil_entry::SoilEntryMethod;
    use crate::store::StoreSnapshot;

    fn service() -> KrishiService {
        KrishiService::from_config(Config::default()).unwrap()
    }

    fn draft() -> ProfileDraft {
        ProfileDraft {
            name: "Ravi".to_string(),
            village: "X".to_string(),
            district: "Y".to_string(),
            state: "Z".to_string(),
            land_size: "2".to_string(),
            phone: "999".to_string(),
            ..ProfileDraft::default()
        }
    }

    #[test]
    fn test_initial_language_from_config() {
        let mut config = Config::default();
        config.session.default_language = Language::Hindi;
        let service = KrishiService::from_config(config).unwrap();
        assert_eq!(service.store().language().unwrap(), Language::Hindi);
        assert_eq!(service.store().step().unwrap(), 0);
    }

    #[test]
    fn test_primary_language_config_keeps_defaults() {
        let service = service();
        assert_eq!(service.store().snapshot().unwrap(), StoreSnapshot::default());
    }

    #[test]
    fn test_configured_language_only_changes_language() {
        let mut config = Config::default();
        config.session.default_language = Language::Tamil;
        let service = KrishiService::from_config(config).unwrap();

        let expected = StoreSnapshot {
            language: Language::Tamil,
            ..StoreSnapshot::default()
        };
        assert_eq!(service.store().snapshot().unwrap(), expected);
    }

    #[test]
    fn test_choose_language_advances_step() {
        let service = service();
        service.choose_language(Language::Tamil).unwrap();
        assert_eq!(service.store().language().unwrap(), Language::Tamil);
        assert_eq!(service.store().step().unwrap(), STEP_LANGUAGE_CHOSEN);
    }

    #[test]
    fn test_complete_profile_fills_schemes() {
        let service = service();
        let profile = service.complete_profile(&draft()).unwrap();

        let store = service.store();
        assert_eq!(store.profile().unwrap(), Some(profile));
        assert_eq!(store.schemes().unwrap().len(), 5);
        assert_eq!(store.step().unwrap(), STEP_PROFILE_SAVED);
    }

    #[test]
    fn test_invalid_profile_writes_nothing() {
        let service = service();
        let mut events = service.subscribe().unwrap();
        let mut bad = draft();
        bad.village = "  ".to_string();

        let result = service.complete_profile(&bad);
        assert!(matches!(result, Err(KrishiError::InvalidInput(_))));
        assert!(service.store().profile().unwrap().is_none());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_submit_soil_from_any_method() {
        for method in SoilEntryMethod::ALL {
            let service = service();
            let data = service.catalog().analysis_result().clone();
            let next = service
                .submit_soil(SoilSubmission::new(method, data.clone()))
                .unwrap();

            assert_eq!(next, Route::Recommendations);
            assert_eq!(service.store().soil_data().unwrap(), Some(data));
            assert_eq!(service.store().recommendations().unwrap().len(), 3);
        }
    }

    #[test]
    fn test_speak_without_speaker_is_ok() {
        let service = service();
        assert!(service.speaker().is_none());
        service.speak("hello").unwrap();

        let service = service.with_speaker(Arc::new(SilentSpeaker));
        assert!(service.speaker().is_some());
        service.speak("hello").unwrap();
    }

    #[test]
    fn test_custom_image_picker() {
        let service = service().with_image_picker(Arc::new(MockImagePicker::default()));
        assert!(service.image_picker().pick("ignored").is_ok());
    }

    #[test]
    fn test_end_invalidates_handles() {
        let service = service();
        let store = service.store();
        service.end();

        assert!(matches!(
            store.language(),
            Err(KrishiError::Session(SessionError::Inactive))
        ));
    }
}
