//! Translation table
//!
//! Every supported [`Language`] supplies a string for every [`TextKey`].
//! Both sets are closed enums and [`lookup`] matches exhaustively, so a
//! missing translation is a compile error rather than a runtime gap.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// Primary language
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ta")]
    Tamil,
    #[serde(rename = "hi")]
    Hindi,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Tamil, Language::Hindi];

    /// Short tag used in config files and on the command line
    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Tamil => "ta",
            Language::Hindi => "hi",
        }
    }

    /// English name of the language
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Tamil => "Tamil",
            Language::Hindi => "Hindi",
        }
    }

    /// Name of the language written in the language itself
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Tamil => "தமிழ்",
            Language::Hindi => "हिन्दी",
        }
    }

    /// Prompt shown under the native name on the language screen
    pub fn continue_hint(&self) -> &'static str {
        match self {
            Language::English => "Continue in English",
            Language::Tamil => "தமிழில் தொடரவும்",
            Language::Hindi => "हिंदी में जारी रखें",
        }
    }

    /// Locale handed to text-to-speech engines
    pub fn speech_locale(&self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Tamil => "ta-IN",
            Language::Hindi => "hi-IN",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "ta" | "tamil" => Ok(Language::Tamil),
            "hi" | "hindi" => Ok(Language::Hindi),
            _ => Err(format!(
                "Invalid language: '{}'. Valid options: en, ta, hi",
                s
            )),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Named interface strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    Welcome,
    SelectLanguage,
    Continue,
    Profile,
    Name,
    Village,
    District,
    State,
    LandSize,
    Phone,
    Save,
    SoilAnalysis,
    ManualEntry,
    UploadImage,
    VoiceInput,
    Analyzing,
    Recommendations,
    Schemes,
    Dashboard,
    Climate,
    Offline,
    Sync,
    Help,
    Assistant,
    SoilHealth,
    Moisture,
    Nutrients,
    RiskLevel,
    Confidence,
    Eligibility,
    Benefits,
    Apply,
    Back,
    Next,
    Finish,
    Skip,
}

impl TextKey {
    pub const ALL: [TextKey; 36] = [
        TextKey::Welcome,
        TextKey::SelectLanguage,
        TextKey::Continue,
        TextKey::Profile,
        TextKey::Name,
        TextKey::Village,
        TextKey::District,
        TextKey::State,
        TextKey::LandSize,
        TextKey::Phone,
        TextKey::Save,
        TextKey::SoilAnalysis,
        TextKey::ManualEntry,
        TextKey::UploadImage,
        TextKey::VoiceInput,
        TextKey::Analyzing,
        TextKey::Recommendations,
        TextKey::Schemes,
        TextKey::Dashboard,
        TextKey::Climate,
        TextKey::Offline,
        TextKey::Sync,
        TextKey::Help,
        TextKey::Assistant,
        TextKey::SoilHealth,
        TextKey::Moisture,
        TextKey::Nutrients,
        TextKey::RiskLevel,
        TextKey::Confidence,
        TextKey::Eligibility,
        TextKey::Benefits,
        TextKey::Apply,
        TextKey::Back,
        TextKey::Next,
        TextKey::Finish,
        TextKey::Skip,
    ];
}

/// Look up the display string for `key` in `language`
pub fn lookup(language: Language, key: TextKey) -> &'static str {
    match language {
        Language::English => english(key),
        Language::Tamil => tamil(key),
        Language::Hindi => hindi(key),
    }
}

/// Translator bound to a single language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn get(&self, key: TextKey) -> &'static str {
        lookup(self.language, key)
    }
}

fn english(key: TextKey) -> &'static str {
    match key {
        TextKey::Welcome => "Welcome",
        TextKey::SelectLanguage => "Select Your Language",
        TextKey::Continue => "Continue",
        TextKey::Profile => "Farmer Profile",
        TextKey::Name => "Name",
        TextKey::Village => "Village",
        TextKey::District => "District",
        TextKey::State => "State",
        TextKey::LandSize => "Land Size",
        TextKey::Phone => "Phone Number",
        TextKey::Save => "Save Profile",
        TextKey::SoilAnalysis => "Soil Analysis",
        TextKey::ManualEntry => "Manual Entry",
        TextKey::UploadImage => "Upload Image",
        TextKey::VoiceInput => "Voice Input",
        TextKey::Analyzing => "Analyzing...",
        TextKey::Recommendations => "Crop Recommendations",
        TextKey::Schemes => "Government Schemes",
        TextKey::Dashboard => "Dashboard",
        TextKey::Climate => "Climate Intelligence",
        TextKey::Offline => "Offline Mode",
        TextKey::Sync => "Sync Data",
        TextKey::Help => "Help",
        TextKey::Assistant => "AI Assistant",
        TextKey::SoilHealth => "Soil Health",
        TextKey::Moisture => "Moisture",
        TextKey::Nutrients => "Nutrients",
        TextKey::RiskLevel => "Risk Level",
        TextKey::Confidence => "Confidence",
        TextKey::Eligibility => "Eligibility",
        TextKey::Benefits => "Benefits",
        TextKey::Apply => "Apply Now",
        TextKey::Back => "Back",
        TextKey::Next => "Next",
        TextKey::Finish => "Finish",
        TextKey::Skip => "Skip",
    }
}

fn tamil(key: TextKey) -> &'static str {
    match key {
        TextKey::Welcome => "வரவேற்கிறோம்",
        TextKey::SelectLanguage => "உங்கள் மொழியை தேர்வு செய்யவும்",
        TextKey::Continue => "தொடரவும்",
        TextKey::Profile => "விவசாயி சுயவிவரம்",
        TextKey::Name => "பெயர்",
        TextKey::Village => "கிராமம்",
        TextKey::District => "மாவட்டம்",
        TextKey::State => "மாநிலம்",
        TextKey::LandSize => "நிலத்தின் அளவு",
        TextKey::Phone => "தொலைபேசி எண்",
        TextKey::Save => "சுயவிவரத்தை சேமிக்கவும்",
        TextKey::SoilAnalysis => "மண் பகுப்பாய்வு",
        TextKey::ManualEntry => "கைமுறை உள்ளீடு",
        TextKey::UploadImage => "படத்தை பதிவேற்றம் செய்யவும்",
        TextKey::VoiceInput => "குரல் உள்ளீடு",
        TextKey::Analyzing => "பகுப்பாய்வு செய்கிறது...",
        TextKey::Recommendations => "பயிர் பரிந்துரைகள்",
        TextKey::Schemes => "அரசு திட்டங்கள்",
        TextKey::Dashboard => "டாஷ்போர்டு",
        TextKey::Climate => "காலநிலை நுண்ணறிவு",
        TextKey::Offline => "ஆஃப்லைன் பயன்முறை",
        TextKey::Sync => "தரவை ஒத்திசைக்கவும்",
        TextKey::Help => "உதவி",
        TextKey::Assistant => "AI உதவியாளர்",
        TextKey::SoilHealth => "மண் ஆரோக்கியம்",
        TextKey::Moisture => "ஈரப்பதம்",
        TextKey::Nutrients => "ஊட்டச்சத்துக்கள்",
        TextKey::RiskLevel => "ஆபத்து நிலை",
        TextKey::Confidence => "நம்பிக்கை",
        TextKey::Eligibility => "தகுதி",
        TextKey::Benefits => "நன்மைகள்",
        TextKey::Apply => "இப்போது விண்ணப்பிக்கவும்",
        TextKey::Back => "பின்செல்",
        TextKey::Next => "அடுத்து",
        TextKey::Finish => "முடி",
        TextKey::Skip => "தவிர்க்க",
    }
}

fn hindi(key: TextKey) -> &'static str {
    match key {
        TextKey::Welcome => "स्वागत है",
        TextKey::SelectLanguage => "अपनी भाषा चुनें",
        TextKey::Continue => "जारी रखें",
        TextKey::Profile => "किसान प्रोफाइल",
        TextKey::Name => "नाम",
        TextKey::Village => "गाँव",
        TextKey::District => "जिला",
        TextKey::State => "राज्य",
        TextKey::LandSize => "भूमि का आकार",
        TextKey::Phone => "फोन नंबर",
        TextKey::Save => "प्रोफाइल सेव करें",
        TextKey::SoilAnalysis => "मिट्टी विश्लेषण",
        TextKey::ManualEntry => "मैन्युअल एंट्री",
        TextKey::UploadImage => "छवि अपलोड करें",
        TextKey::VoiceInput => "वॉयस इनपुट",
        TextKey::Analyzing => "विश्लेषण हो रहा है...",
        TextKey::Recommendations => "फसल सिफारिशें",
        TextKey::Schemes => "सरकारी योजनाएं",
        TextKey::Dashboard => "डैशबोर्ड",
        TextKey::Climate => "जलवायु जानकारी",
        TextKey::Offline => "ऑफलाइन मोड",
        TextKey::Sync => "डेटा सिंक करें",
        TextKey::Help => "मदद",
        TextKey::Assistant => "AI सहायक",
        TextKey::SoilHealth => "मिट्टी स्वास्थ्य",
        TextKey::Moisture => "नमी",
        TextKey::Nutrients => "पोषक तत्व",
        TextKey::RiskLevel => "जोखिम स्तर",
        TextKey::Confidence => "विश्वास",
        TextKey::Eligibility => "पात्रता",
        TextKey::Benefits => "लाभ",
        TextKey::Apply => "अभी आवेदन करें",
        TextKey::Back => "वापस",
        TextKey::Next => "आगे",
        TextKey::Finish => "समाप्त",
        TextKey::Skip => "छोड़ें",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_translated_in_every_language() {
        for language in Language::ALL {
            for key in TextKey::ALL {
                assert!(
                    !lookup(language, key).trim().is_empty(),
                    "{:?} has an empty string for {:?}",
                    language,
                    key
                );
            }
        }
    }

    #[test]
    fn test_dashboard_lookup() {
        assert_eq!(lookup(Language::English, TextKey::Dashboard), "Dashboard");
        assert_eq!(lookup(Language::Tamil, TextKey::Dashboard), "டாஷ்போர்டு");
        assert_eq!(lookup(Language::Hindi, TextKey::Dashboard), "डैशबोर्ड");
    }

    #[test]
    fn test_key_list_has_no_duplicates() {
        let unique: std::collections::HashSet<_> = TextKey::ALL.iter().collect();
        assert_eq!(unique.len(), TextKey::ALL.len());
    }

    #[test]
    fn test_translator_follows_language() {
        let t = Translator::new(Language::Tamil);
        assert_eq!(t.language(), Language::Tamil);
        assert_eq!(t.get(TextKey::Continue), "தொடரவும்");
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!("TA".parse::<Language>().unwrap(), Language::Tamil);
        assert_eq!("hindi".parse::<Language>().unwrap(), Language::Hindi);

        let result = "fr".parse::<Language>();
        assert!(result.unwrap_err().contains("Invalid language: 'fr'"));
    }

    #[test]
    fn test_language_default_is_english() {
        assert_eq!(Language::default(), Language::English);
    }

    #[test]
    fn test_language_serde_uses_tags() {
        let json = serde_json::to_string(&Language::Hindi).unwrap();
        assert_eq!(json, "\"hi\"");
        let parsed: Language = serde_json::from_str("\"ta\"").unwrap();
        assert_eq!(parsed, Language::Tamil);
    }
}
