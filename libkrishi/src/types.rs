//! Core types for KrishiMitra
//!
//! Value records shared across screens. None of them carry identity beyond
//! their fields, and none of them validate themselves: range checks belong
//! to the screen that produces a value (see `service::validation`).

use serde::{Deserialize, Serialize};

pub use crate::i18n::Language;

// ============================================================================
// Farmer Profile
// ============================================================================

/// Unit the land size is measured in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LandUnit {
    #[default]
    Acres,
    Hectares,
}

impl LandUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Acres => "acres",
            Self::Hectares => "hectares",
        }
    }

    /// The other unit, used by the profile form's toggle
    pub fn toggled(&self) -> Self {
        match self {
            Self::Acres => Self::Hectares,
            Self::Hectares => Self::Acres,
        }
    }
}

impl std::fmt::Display for LandUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerProfile {
    pub name: String,
    pub village: String,
    pub district: String,
    pub state: String,
    pub land_size: f64,
    pub land_unit: LandUnit,
    pub phone: String,
}

// ============================================================================
// Soil
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SoilTexture {
    Sandy,
    #[default]
    Loamy,
    Clay,
    Silty,
}

impl SoilTexture {
    pub const ALL: [SoilTexture; 4] = [
        SoilTexture::Sandy,
        SoilTexture::Loamy,
        SoilTexture::Clay,
        SoilTexture::Silty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sandy => "sandy",
            Self::Loamy => "loamy",
            Self::Clay => "clay",
            Self::Silty => "silty",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sandy => "Sandy",
            Self::Loamy => "Loamy",
            Self::Clay => "Clay",
            Self::Silty => "Silty",
        }
    }

    /// Next texture in display order, wrapping around
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous texture in display order, wrapping around
    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for SoilTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Supported image MIME types for soil photos
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ImageMimeType {
    Jpeg,
    Png,
    Gif,
    WebP,
}

impl ImageMimeType {
    /// Detect MIME type from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
        }
    }
}

impl std::fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opaque reference to a captured or picked soil image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub location: String,
    pub mime_type: ImageMimeType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilData {
    pub ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub moisture: f64,
    pub organic_matter: f64,
    pub texture: SoilTexture,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

impl SoilData {
    /// Soil health percentage shown on the dashboard
    ///
    /// Derived from pH alone on a 0-14 scale. Out-of-range pH values are
    /// not clamped, matching the store's acceptance of them.
    pub fn health_score(&self) -> i64 {
        ((self.ph / 14.0) * 100.0).round() as i64
    }
}

// ============================================================================
// Recommendations and Schemes
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Number of water drops shown for a water-need level
    pub fn drops(&self) -> usize {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ranked crop suggestion, most relevant first in its sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRecommendation {
    pub name: String,
    pub name_local: String,
    pub confidence: f64,
    pub season: String,
    pub duration: String,
    pub water_need: Level,
    pub risk_level: Level,
    pub expected_yield: String,
    pub market_price: String,
    pub reasoning: Vec<String>,
}

/// A crop ruled out for the current conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EliminatedCrop {
    pub name: String,
    pub name_local: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernmentScheme {
    pub id: String,
    pub name: String,
    pub name_local: String,
    pub description: String,
    pub eligibility: Vec<String>,
    pub benefits: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    pub match_score: f64,
}

// ============================================================================
// Climate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub temp: i32,
    pub feels_like: i32,
    pub humidity: u8,
    pub wind_speed: u32,
    pub rainfall: u32,
    pub condition: String,
    pub uv: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub day: String,
    pub high: i32,
    pub low: i32,
    /// Chance of rain in percent
    pub rain: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAlert {
    pub kind: AlertKind,
    pub title: String,
    pub title_local: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalTrend {
    pub month: String,
    /// Rainfall in millimetres
    pub rainfall: u32,
    pub avg_temp: i32,
}

/// Static climate information shown on the dashboard and climate screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateOutlook {
    pub current: CurrentWeather,
    /// Chance of rain today, as shown on the dashboard card
    pub rain_chance: u8,
    pub forecast: Vec<ForecastDay>,
    pub alerts: Vec<RiskAlert>,
    pub trends: Vec<SeasonalTrend>,
}
