//! Integration tests for KrishiService
//!
//! Walks the onboarding and soil flows the way a front end drives them,
//! checking both the store and the notifications it emits.

use std::sync::{Arc, Mutex};

use libkrishi::catalog::Catalog;
use libkrishi::config::Config;
use libkrishi::i18n::Language;
use libkrishi::platform::{MockImagePicker, Speaker};
use libkrishi::router::Route;
use libkrishi::service::analysis::{SoilAnalysis, TickOutcome};
use libkrishi::service::soil_entry::{SoilEntryMethod, SoilSubmission, VoiceSoilEntry};
use libkrishi::service::validation::{ProfileDraft, SoilDraft, SoilField};
use libkrishi::service::{KrishiService, STEP_LANGUAGE_CHOSEN, STEP_PROFILE_SAVED};
use libkrishi::store::StoreField;

#[derive(Default)]
struct RecordingSpeaker {
    spoken: Mutex<Vec<(Language, String)>>,
}

impl Speaker for RecordingSpeaker {
    fn speak(&self, language: Language, text: &str) {
        self.spoken.lock().unwrap().push((language, text.to_string()));
    }
}

fn setup_test_service() -> KrishiService {
    KrishiService::from_config(Config::default()).unwrap()
}

fn profile_draft() -> ProfileDraft {
    ProfileDraft {
        name: "Ravi".to_string(),
        village: "Kumbakonam".to_string(),
        district: "Thanjavur".to_string(),
        land_size: "2.5".to_string(),
        phone: "+91 98765 43210".to_string(),
        ..ProfileDraft::default()
    }
}

#[tokio::test]
async fn test_onboarding_notifications_in_order() {
    let service = setup_test_service();
    let mut events = service.subscribe().unwrap();

    service.choose_language(Language::Tamil).unwrap();
    service.complete_profile(&profile_draft()).unwrap();

    let mut fields = Vec::new();
    let mut last_seq = 0;
    for _ in 0..5 {
        let event = events.recv().await.unwrap();
        assert!(event.seq > last_seq);
        last_seq = event.seq;
        fields.push(event.field);
    }
    assert_eq!(
        fields,
        vec![
            StoreField::Language,
            StoreField::Step,
            StoreField::Profile,
            StoreField::Schemes,
            StoreField::Step,
        ]
    );

    let snapshot = service.store().snapshot().unwrap();
    assert_eq!(snapshot.language, Language::Tamil);
    assert_eq!(snapshot.step, STEP_PROFILE_SAVED);
    assert_eq!(snapshot.profile.unwrap().state, "Tamil Nadu");
}

#[test]
fn test_manual_soil_flow() {
    let service = setup_test_service();
    service.choose_language(Language::English).unwrap();
    assert_eq!(service.store().step().unwrap(), STEP_LANGUAGE_CHOSEN);

    let mut draft = SoilDraft::default();
    draft.adjust(SoilField::Ph, -5);
    draft.set(SoilField::Nitrogen, 250.0);

    let next = service
        .submit_soil(SoilSubmission::new(SoilEntryMethod::Manual, draft.to_soil_data()))
        .unwrap();
    assert_eq!(next, Route::Recommendations);

    let stored = service.store().soil_data().unwrap().unwrap();
    assert!((stored.ph - 6.5).abs() < 1e-9);
    assert_eq!(stored.nitrogen, 100.0);
}

#[test]
fn test_image_soil_flow_completes_once() {
    let service =
        setup_test_service().with_image_picker(Arc::new(MockImagePicker::default()));
    let image = service.image_picker().pick("camera").unwrap();

    let mut analysis = SoilAnalysis::new(service.catalog().analysis_result().clone(), 1);
    analysis.start(Some(image.clone()));

    let mut submissions = 0;
    for _ in 0..20 {
        if let TickOutcome::Completed(data) = analysis.tick() {
            submissions += 1;
            service
                .submit_soil(SoilSubmission::new(SoilEntryMethod::Image, data))
                .unwrap();
        }
    }

    assert_eq!(submissions, 1);
    let stored = service.store().soil_data().unwrap().unwrap();
    assert_eq!(stored.image, Some(image));
    assert_eq!(stored.health_score(), 49);
}

#[test]
fn test_voice_soil_flow() {
    let service = setup_test_service();
    let mut entry = VoiceSoilEntry::new(service.catalog().analysis_result().clone(), 3);
    entry.toggle();

    let submission = std::iter::repeat_with(|| entry.tick())
        .take(10)
        .flatten()
        .next()
        .unwrap();
    service.submit_soil(submission).unwrap();

    assert_eq!(service.store().recommendations().unwrap()[0].name, "Paddy");
}

#[test]
fn test_speak_uses_session_language() {
    let speaker = Arc::new(RecordingSpeaker::default());
    let service = setup_test_service().with_speaker(speaker.clone());

    service.choose_language(Language::Hindi).unwrap();
    let greeting = service.catalog().greeting(Language::Hindi).to_string();
    service.speak(&greeting).unwrap();

    let spoken = speaker.spoken.lock().unwrap();
    assert_eq!(spoken.len(), 1);
    assert_eq!(spoken[0].0, Language::Hindi);
    assert_eq!(spoken[0].1, greeting);
}

#[test]
fn test_catalog_is_shared_fixture() {
    let service = setup_test_service();
    let embedded = Catalog::embedded().unwrap();
    assert_eq!(service.catalog().schemes(), embedded.schemes());
}
