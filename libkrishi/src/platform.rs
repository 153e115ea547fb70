//! Platform collaborators
//!
//! Text-to-speech, image picking and speech input are device features the
//! application only borrows. Each one sits behind a small trait so the
//! terminal front end, tests and future platforms can plug in their own.
//! None of them is required: callers hold them as `Option` and carry on
//! without them.

use std::path::Path;

use crate::error::{KrishiError, Result};
use crate::i18n::Language;
use crate::types::{ImageMimeType, ImageRef};

// ============================================================================
// Text-to-speech
// ============================================================================

/// Fire-and-forget speech output
pub trait Speaker: Send + Sync {
    fn speak(&self, language: Language, text: &str);
}

/// Speaker that records utterances in the log instead of producing audio
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSpeaker;

impl Speaker for LogSpeaker {
    fn speak(&self, language: Language, text: &str) {
        tracing::info!(
            locale = language.speech_locale(),
            chars = text.chars().count(),
            "speak: {}",
            text
        );
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&self, _language: Language, _text: &str) {}
}

// ============================================================================
// Image picking
// ============================================================================

/// Source of soil photos
pub trait ImagePicker: Send + Sync {
    /// Resolve `location` to an image reference
    fn pick(&self, location: &str) -> Result<ImageRef>;
}

/// Picks image files from the local filesystem
///
/// The file must exist and carry a supported image extension. `~` and
/// environment variables in the path are expanded.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathImagePicker;

impl ImagePicker for PathImagePicker {
    fn pick(&self, location: &str) -> Result<ImageRef> {
        let location = location.trim();
        if location.is_empty() {
            return Err(KrishiError::InvalidInput("No image path given".to_string()));
        }

        let expanded = shellexpand::full(location)
            .map_err(|e| KrishiError::InvalidInput(format!("Invalid image path '{}': {}", location, e)))?
            .to_string();
        let path = Path::new(&expanded);

        if !path.is_file() {
            return Err(KrishiError::InvalidInput(format!(
                "Image file not found: {}",
                expanded
            )));
        }

        let mime_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageMimeType::from_extension)
            .ok_or_else(|| {
                KrishiError::InvalidInput(format!(
                    "Unsupported image format: {} (expected jpeg, png, gif or webp)",
                    expanded
                ))
            })?;

        tracing::debug!(path = %expanded, mime = %mime_type, "image picked");
        Ok(ImageRef {
            location: expanded,
            mime_type,
        })
    }
}

/// Camera stand-in that always returns the same sample photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockImagePicker {
    image: ImageRef,
}

impl Default for MockImagePicker {
    fn default() -> Self {
        Self {
            image: ImageRef {
                location: "mock://camera/soil-sample.jpg".to_string(),
                mime_type: ImageMimeType::Jpeg,
            },
        }
    }
}

impl ImagePicker for MockImagePicker {
    fn pick(&self, _location: &str) -> Result<ImageRef> {
        Ok(self.image.clone())
    }
}

// ============================================================================
// Speech input
// ============================================================================

/// Mock speech recognizer
///
/// Listening lasts a fixed number of ticks and then "hears" the transcript
/// it was started with. No audio is captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceCapture {
    listen_ticks: u32,
    remaining: u32,
    transcript: Option<String>,
}

impl VoiceCapture {
    pub fn new(listen_ticks: u32) -> Self {
        Self {
            listen_ticks: listen_ticks.max(1),
            remaining: 0,
            transcript: None,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.transcript.is_some()
    }

    /// Begin listening; restarting discards the previous capture
    pub fn start(&mut self, transcript: impl Into<String>) {
        self.remaining = self.listen_ticks;
        self.transcript = Some(transcript.into());
    }

    pub fn stop(&mut self) {
        self.remaining = 0;
        self.transcript = None;
    }

    /// Advance one tick; yields the transcript when listening ends
    pub fn tick(&mut self) -> Option<String> {
        if self.transcript.is_none() {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return None;
        }
        self.transcript.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_path_picker_accepts_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("field.PNG");
        fs::write(&path, b"not really a png").unwrap();

        let image = PathImagePicker.pick(path.to_str().unwrap()).unwrap();
        assert_eq!(image.mime_type, ImageMimeType::Png);
        assert_eq!(image.location, path.to_str().unwrap());
    }

    #[test]
    fn test_path_picker_rejects_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.jpg");

        let result = PathImagePicker.pick(path.to_str().unwrap());
        assert!(matches!(result, Err(KrishiError::InvalidInput(msg)) if msg.contains("not found")));
    }

    #[test]
    fn test_path_picker_rejects_non_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"soil notes").unwrap();

        let result = PathImagePicker.pick(path.to_str().unwrap());
        assert!(matches!(result, Err(KrishiError::InvalidInput(msg)) if msg.contains("Unsupported")));
    }

    #[test]
    fn test_path_picker_rejects_blank() {
        assert!(PathImagePicker.pick("  ").is_err());
    }

    #[test]
    fn test_mock_picker_is_fixed() {
        let picker = MockImagePicker::default();
        assert_eq!(picker.pick("anything").unwrap(), picker.pick("").unwrap());
    }

    #[test]
    fn test_voice_capture_yields_after_ticks() {
        let mut voice = VoiceCapture::new(3);
        assert_eq!(voice.tick(), None);

        voice.start("weather forecast");
        assert!(voice.is_listening());
        assert_eq!(voice.tick(), None);
        assert_eq!(voice.tick(), None);
        assert_eq!(voice.tick().as_deref(), Some("weather forecast"));
        assert!(!voice.is_listening());
        assert_eq!(voice.tick(), None);
    }

    #[test]
    fn test_voice_capture_stop_discards() {
        let mut voice = VoiceCapture::new(1);
        voice.start("hello");
        voice.stop();
        assert_eq!(voice.tick(), None);
    }
}
