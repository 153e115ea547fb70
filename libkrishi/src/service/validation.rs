//! Form validation used by the producing screens
//!
//! The store accepts whatever it is given. The rules here belong to the
//! screens that build values: the profile form refuses to submit without
//! a name, a village and a positive land size, and the manual soil form
//! keeps each reading inside its input range while it is being edited.
//! Values produced elsewhere are never rejected; [`soil_warnings`] only
//! describes what is out of range.

use std::collections::HashSet;

use crate::error::{KrishiError, Result};
use crate::types::{FarmerProfile, GovernmentScheme, LandUnit, SoilData, SoilTexture};

/// Default state pre-filled on the profile form
pub const DEFAULT_STATE: &str = "Tamil Nadu";

/// Result of checking a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidation {
    /// Whether the form may be submitted
    pub valid: bool,
    /// Blocking problems
    pub errors: Vec<String>,
    /// Non-blocking notes
    pub warnings: Vec<String>,
}

// ============================================================================
// Profile
// ============================================================================

/// Editable profile form contents
///
/// Land size is kept as typed text until submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDraft {
    pub name: String,
    pub village: String,
    pub district: String,
    pub state: String,
    pub land_size: String,
    pub land_unit: LandUnit,
    pub phone: String,
}

impl Default for ProfileDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            village: String::new(),
            district: String::new(),
            state: DEFAULT_STATE.to_string(),
            land_size: String::new(),
            land_unit: LandUnit::Acres,
            phone: String::new(),
        }
    }
}

impl ProfileDraft {
    /// Start a draft from an existing profile
    pub fn from_profile(profile: &FarmerProfile) -> Self {
        Self {
            name: profile.name.clone(),
            village: profile.village.clone(),
            district: profile.district.clone(),
            state: profile.state.clone(),
            land_size: format_number(profile.land_size),
            land_unit: profile.land_unit,
            phone: profile.phone.clone(),
        }
    }

    /// Parsed land size; unparsable text counts as zero
    pub fn land_size_value(&self) -> f64 {
        self.land_size.trim().parse::<f64>().unwrap_or(0.0)
    }

    pub fn validate(&self) -> FormValidation {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("Name is required".to_string());
        }
        if self.village.trim().is_empty() {
            errors.push("Village is required".to_string());
        }
        let land_size = self.land_size_value();
        if !(land_size > 0.0) || !land_size.is_finite() {
            errors.push("Land size must be greater than zero".to_string());
        }
        if self.district.trim().is_empty() {
            warnings.push("District is empty".to_string());
        }
        if !self.phone.is_empty() && !self.phone.chars().all(|c| c.is_ascii_digit() || c == '+' || c == ' ') {
            warnings.push("Phone number contains unexpected characters".to_string());
        }

        FormValidation {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Build the profile, refusing to do so when required fields are missing
    pub fn to_profile(&self) -> Result<FarmerProfile> {
        let validation = self.validate();
        if !validation.valid {
            return Err(KrishiError::InvalidInput(validation.errors.join(", ")));
        }

        Ok(FarmerProfile {
            name: self.name.trim().to_string(),
            village: self.village.trim().to_string(),
            district: self.district.trim().to_string(),
            state: self.state.trim().to_string(),
            land_size: self.land_size_value(),
            land_unit: self.land_unit,
            phone: self.phone.trim().to_string(),
        })
    }
}

// ============================================================================
// Soil
// ============================================================================

/// Numeric fields of the manual soil form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoilField {
    Ph,
    Nitrogen,
    Phosphorus,
    Potassium,
    Moisture,
    OrganicMatter,
}

/// Input range of a soil field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDomain {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SoilField {
    pub const ALL: [SoilField; 6] = [
        SoilField::Ph,
        SoilField::Nitrogen,
        SoilField::Phosphorus,
        SoilField::Potassium,
        SoilField::Moisture,
        SoilField::OrganicMatter,
    ];

    pub fn domain(&self) -> FieldDomain {
        match self {
            SoilField::Ph => FieldDomain { min: 0.0, max: 14.0, step: 0.1 },
            SoilField::OrganicMatter => FieldDomain { min: 0.0, max: 10.0, step: 0.1 },
            _ => FieldDomain { min: 0.0, max: 100.0, step: 1.0 },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SoilField::Ph => "pH Level",
            SoilField::Nitrogen => "Nitrogen (N)",
            SoilField::Phosphorus => "Phosphorus (P)",
            SoilField::Potassium => "Potassium (K)",
            SoilField::Moisture => "Moisture",
            SoilField::OrganicMatter => "Organic Matter",
        }
    }

    /// Unit suffix for display
    pub fn unit(&self) -> &'static str {
        match self {
            SoilField::Ph => "",
            _ => "%",
        }
    }

    fn read(&self, data: &SoilData) -> f64 {
        match self {
            SoilField::Ph => data.ph,
            SoilField::Nitrogen => data.nitrogen,
            SoilField::Phosphorus => data.phosphorus,
            SoilField::Potassium => data.potassium,
            SoilField::Moisture => data.moisture,
            SoilField::OrganicMatter => data.organic_matter,
        }
    }
}

/// Editable manual soil form
#[derive(Debug, Clone, PartialEq)]
pub struct SoilDraft {
    data: SoilData,
}

impl Default for SoilDraft {
    fn default() -> Self {
        Self {
            data: SoilData {
                ph: 7.0,
                nitrogen: 50.0,
                phosphorus: 50.0,
                potassium: 50.0,
                moisture: 40.0,
                organic_matter: 2.5,
                texture: SoilTexture::Loamy,
                image: None,
            },
        }
    }
}

impl SoilDraft {
    pub fn get(&self, field: SoilField) -> f64 {
        field.read(&self.data)
    }

    /// Set a field, clamped to its input range and rounded to its step
    pub fn set(&mut self, field: SoilField, value: f64) {
        let domain = field.domain();
        let value = if value.is_finite() { value } else { domain.min };
        let stepped = (value / domain.step).round() * domain.step;
        let clamped = stepped.clamp(domain.min, domain.max);
        // Re-round to one decimal to shed float noise from the step multiply
        let clean = (clamped * 10.0).round() / 10.0;
        match field {
            SoilField::Ph => self.data.ph = clean,
            SoilField::Nitrogen => self.data.nitrogen = clean,
            SoilField::Phosphorus => self.data.phosphorus = clean,
            SoilField::Potassium => self.data.potassium = clean,
            SoilField::Moisture => self.data.moisture = clean,
            SoilField::OrganicMatter => self.data.organic_matter = clean,
        }
    }

    /// Move a field by a number of steps
    pub fn adjust(&mut self, field: SoilField, steps: i32) {
        let current = self.get(field);
        self.set(field, current + f64::from(steps) * field.domain().step);
    }

    pub fn texture(&self) -> SoilTexture {
        self.data.texture
    }

    pub fn set_texture(&mut self, texture: SoilTexture) {
        self.data.texture = texture;
    }

    pub fn to_soil_data(&self) -> SoilData {
        self.data.clone()
    }
}

/// Describe readings that fall outside their input ranges
///
/// Informational only; nothing is rejected or altered.
pub fn soil_warnings(data: &SoilData) -> Vec<String> {
    SoilField::ALL
        .iter()
        .filter_map(|field| {
            let value = field.read(data);
            let domain = field.domain();
            if value < domain.min || value > domain.max || !value.is_finite() {
                Some(format!(
                    "{} reading {} is outside {}-{}",
                    field.label(),
                    value,
                    domain.min,
                    domain.max
                ))
            } else {
                None
            }
        })
        .collect()
}

/// Identifiers that occur more than once, in order of first repetition
pub fn duplicate_scheme_ids(schemes: &[GovernmentScheme]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for scheme in schemes {
        if !seen.insert(scheme.id.as_str()) && !duplicates.contains(&scheme.id) {
            duplicates.push(scheme.id.clone());
        }
    }
    duplicates
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
