//! Soil data entry methods
//!
//! Manual, image and voice entry are alternative ways to arrive at one
//! [`SoilData`] value. Whichever variant produced it, submission is the
//! same: store the reading, store the crop recommendations, and move on
//! to the recommendations screen.

use crate::i18n::TextKey;
use crate::platform::VoiceCapture;
use crate::router::Route;
use crate::types::SoilData;

/// How the farmer supplies soil readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilEntryMethod {
    Image,
    Manual,
    Voice,
}

impl SoilEntryMethod {
    /// Chooser order
    pub const ALL: [SoilEntryMethod; 3] = [
        SoilEntryMethod::Image,
        SoilEntryMethod::Manual,
        SoilEntryMethod::Voice,
    ];

    pub fn route(&self) -> Route {
        match self {
            SoilEntryMethod::Image => Route::SoilImage,
            SoilEntryMethod::Manual => Route::SoilManual,
            SoilEntryMethod::Voice => Route::SoilVoice,
        }
    }

    pub fn title_key(&self) -> TextKey {
        match self {
            SoilEntryMethod::Image => TextKey::UploadImage,
            SoilEntryMethod::Manual => TextKey::ManualEntry,
            SoilEntryMethod::Voice => TextKey::VoiceInput,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SoilEntryMethod::Image => "AI-powered soil analysis",
            SoilEntryMethod::Manual => "Enter soil test values",
            SoilEntryMethod::Voice => "Speak in your language",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilEntryMethod::Image => "image",
            SoilEntryMethod::Manual => "manual",
            SoilEntryMethod::Voice => "voice",
        }
    }
}

/// A finished soil reading, tagged with the method that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct SoilSubmission {
    pub method: SoilEntryMethod,
    pub data: SoilData,
}

impl SoilSubmission {
    pub fn new(method: SoilEntryMethod, data: SoilData) -> Self {
        Self { method, data }
    }
}

/// Spoken summary of a soil reading, as the mock recognizer "hears" it
pub fn spoken_readout(data: &SoilData) -> String {
    format!(
        "pH {:.1}, nitrogen {:.0}, phosphorus {:.0}, potassium {:.0}, moisture {:.0}, organic matter {:.1}, {} soil",
        data.ph,
        data.nitrogen,
        data.phosphorus,
        data.potassium,
        data.moisture,
        data.organic_matter,
        data.texture
    )
}

/// Voice soil entry
///
/// Listens for a while and then produces the fixed reading it was built
/// with. The transcript is kept so the screen can show what was "heard".
#[derive(Debug, Clone)]
pub struct VoiceSoilEntry {
    capture: VoiceCapture,
    reading: SoilData,
    transcript: Option<String>,
}

impl VoiceSoilEntry {
    pub fn new(reading: SoilData, listen_ticks: u32) -> Self {
        Self {
            capture: VoiceCapture::new(listen_ticks),
            reading,
            transcript: None,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.capture.is_listening()
    }

    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    /// Start listening, or stop if already listening
    pub fn toggle(&mut self) {
        if self.capture.is_listening() {
            self.capture.stop();
        } else {
            self.transcript = None;
            self.capture.start(spoken_readout(&self.reading));
        }
    }

    /// Advance one tick; yields the submission once listening finishes
    pub fn tick(&mut self) -> Option<SoilSubmission> {
        let heard = self.capture.tick()?;
        self.transcript = Some(heard);
        Some(SoilSubmission::new(SoilEntryMethod::Voice, self.reading.clone()))
    }
}
