//! Service layer adapter for TUI
//!
//! Bridges the `KrishiService` facade and the synchronous TUI event loop.
//!
//! # Architecture
//!
//! - `ServiceHandle`: owns the KrishiService and a tokio runtime
//! - Effects: `apply` carries out one reducer effect and reports the
//!   outcome as an optional follow-up action
//! - Events: store notifications travel over a tokio broadcast channel;
//!   `subscribe` forwards them to a crossbeam channel the loop can poll
//!
//! # Example
//!
//! ```no_run
//! use krishi_tui::services::ServiceHandle;
//! use krishi_tui::app::Effect;
//! use libkrishi::i18n::Language;
//! use libkrishi::service::KrishiService;
//!
//! # fn example() -> krishi_tui::error::Result<()> {
//! let services = ServiceHandle::new(KrishiService::new()?)?;
//! let store_events = services.subscribe()?;
//!
//! services.apply(Effect::ChooseLanguage(Language::Tamil))?;
//! if let Ok(event) = store_events.recv() {
//!     println!("store changed: {:?}", event.field);
//! }
//! # Ok(())
//! # }
//! ```

use crossbeam_channel::{unbounded, Receiver};
use libkrishi::platform::{ImagePicker, MockImagePicker};
use libkrishi::service::KrishiService;
use libkrishi::store::StoreEvent;
use libkrishi::KrishiError;
use tokio::sync::broadcast::error::RecvError;

use crate::app::{Action, Effect};
use crate::error::Result;

/// Service handle for TUI operations
pub struct ServiceHandle {
    service: KrishiService,
    runtime: tokio::runtime::Runtime,
}

impl ServiceHandle {
    /// Wrap a service, creating the runtime that forwards store events
    ///
    /// # Errors
    ///
    /// Returns an error if the tokio runtime cannot be created.
    pub fn new(service: KrishiService) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("krishi-events")
            .enable_all()
            .build()?;

        Ok(Self { service, runtime })
    }

    pub fn service(&self) -> &KrishiService {
        &self.service
    }

    /// Subscribe to store notifications
    ///
    /// Returns a receiver fed by a task bridging the tokio broadcast
    /// channel to crossbeam. Forwarding stops when the receiver is dropped
    /// or the session ends.
    pub fn subscribe(&self) -> Result<Receiver<StoreEvent>> {
        let (tx, rx) = unbounded();

        let mut event_rx = self.service.subscribe()?;
        self.runtime.spawn(async move {
            loop {
                match event_rx.recv().await {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        // Later events carry full snapshots, so nothing is lost for rendering
                        tracing::warn!("Store event receiver lagged, skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Ok(rx)
    }

    /// Carry out one effect queued by the reducer
    ///
    /// Returns the action to feed back into the reducer, if any. Failures
    /// the user can fix (a bad image path, say) come back as
    /// `Action::ShowError`.
    ///
    /// # Errors
    ///
    /// Only a store used outside its session is returned as an error;
    /// the caller treats it as fatal.
    pub fn apply(&self, effect: Effect) -> Result<Option<Action>> {
        let outcome = match effect {
            Effect::ChooseLanguage(language) => self.service.choose_language(language).map(|_| None),
            Effect::SaveProfile(draft) => self
                .service
                .complete_profile(&draft)
                .map(|profile| Some(Action::SetStatus(format!("Welcome, {}", profile.name)))),
            Effect::SubmitSoil(submission) => self.service.submit_soil(submission).map(|route| {
                tracing::debug!(next = %route, "soil submission stored");
                None
            }),
            Effect::SetOnline(online) => self.service.store().set_online(online).map(|_| None),
            Effect::Speak(text) => self.service.speak(&text).map(|_| None),
            Effect::PickImage(path) => self
                .service
                .image_picker()
                .pick(&path)
                .map(|image| Some(Action::ImagePicked(image))),
            Effect::CaptureImage => MockImagePicker::default()
                .pick("camera")
                .map(|image| Some(Action::ImagePicked(image))),
        };

        match outcome {
            Ok(action) => Ok(action),
            Err(e @ KrishiError::Session(_)) => Err(e.into()),
            Err(e) => {
                tracing::warn!(error = %e, "effect failed");
                Ok(Some(Action::ShowError(e.to_string())))
            }
        }
    }

    /// End the session and stop the runtime
    pub fn shutdown(self) {
        self.service.end();
        self.runtime.shutdown_background();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libkrishi::config::Config;
    use libkrishi::i18n::Language;
    use libkrishi::store::StoreField;
    use std::time::Duration;

    fn handle() -> ServiceHandle {
        ServiceHandle::new(KrishiService::from_config(Config::default()).unwrap()).unwrap()
    }

    #[test]
    fn test_store_events_are_forwarded() {
        let services = handle();
        let rx = services.subscribe().unwrap();

        services.apply(Effect::SetOnline(false)).unwrap();

        let event = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(event.field, StoreField::Online);
        assert!(!event.snapshot.online);
    }

    #[test]
    fn test_choose_language_effect() {
        let services = handle();
        let action = services.apply(Effect::ChooseLanguage(Language::Hindi)).unwrap();
        assert!(action.is_none());
        assert_eq!(services.service().store().language().unwrap(), Language::Hindi);
    }

    #[test]
    fn test_bad_image_path_becomes_error_action() {
        let services = handle();
        let action = services
            .apply(Effect::PickImage("/definitely/not/here.jpg".to_string()))
            .unwrap();
        assert!(matches!(action, Some(Action::ShowError(msg)) if msg.contains("not found")));
    }

    #[test]
    fn test_capture_uses_mock_camera() {
        let services = handle();
        match services.apply(Effect::CaptureImage).unwrap() {
            Some(Action::ImagePicked(image)) => {
                assert!(image.location.starts_with("mock://"));
            }
            other => panic!("Expected ImagePicked, got {:?}", other),
        }
    }
}
