//! Mock data catalog
//!
//! Crop lists, schemes, climate data and assistant replies are fixed
//! constants supplied with the application, not computed results. They
//! ship as an embedded JSON document that is parsed and checked once when
//! the service starts.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{CatalogError, Result};
use crate::i18n::Language;
use crate::service::assistant::ResponseKey;
use crate::types::{ClimateOutlook, CropRecommendation, EliminatedCrop, GovernmentScheme, SoilData};

const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    recommendations: Vec<CropRecommendation>,
    eliminated_crops: Vec<EliminatedCrop>,
    schemes: Vec<GovernmentScheme>,
    climate: ClimateOutlook,
    analysis_result: SoilData,
    greeting: HashMap<Language, String>,
    quick_prompts: HashMap<Language, Vec<String>>,
    replies: HashMap<ResponseKey, HashMap<Language, String>>,
}

impl Catalog {
    /// Load the catalog bundled with the library
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Parse a catalog document and check that every language is covered
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json).map_err(CatalogError::Parse)?;
        catalog.check_coverage()?;
        tracing::debug!(
            recommendations = catalog.recommendations.len(),
            schemes = catalog.schemes.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    fn check_coverage(&self) -> std::result::Result<(), CatalogError> {
        for language in Language::ALL {
            if !self.greeting.contains_key(&language) {
                return Err(CatalogError::Missing(format!("greeting for {}", language)));
            }
            match self.quick_prompts.get(&language) {
                Some(prompts) if !prompts.is_empty() => {}
                _ => {
                    return Err(CatalogError::Missing(format!(
                        "quick prompts for {}",
                        language
                    )))
                }
            }
            for key in ResponseKey::ALL {
                let covered = self
                    .replies
                    .get(&key)
                    .is_some_and(|by_language| by_language.contains_key(&language));
                if !covered {
                    return Err(CatalogError::Missing(format!(
                        "{} reply for {}",
                        key.as_str(),
                        language
                    )));
                }
            }
        }
        Ok(())
    }

    /// Ranked crop recommendations, most relevant first
    pub fn recommendations(&self) -> &[CropRecommendation] {
        &self.recommendations
    }

    pub fn eliminated_crops(&self) -> &[EliminatedCrop] {
        &self.eliminated_crops
    }

    /// Matched schemes in match-rank order
    pub fn schemes(&self) -> &[GovernmentScheme] {
        &self.schemes
    }

    pub fn climate(&self) -> &ClimateOutlook {
        &self.climate
    }

    /// Fixed payload produced by the mock image and voice soil flows
    pub fn analysis_result(&self) -> &SoilData {
        &self.analysis_result
    }

    pub fn greeting(&self, language: Language) -> &str {
        self.greeting
            .get(&language)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn quick_prompts(&self, language: Language) -> &[String] {
        self.quick_prompts
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn reply(&self, key: ResponseKey, language: Language) -> &str {
        self.replies
            .get(&key)
            .and_then(|by_language| by_language.get(&language))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KrishiError;
    use crate::types::SoilTexture;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.recommendations().len(), 3);
        assert_eq!(catalog.recommendations()[0].name, "Paddy");
        assert_eq!(catalog.eliminated_crops().len(), 2);
        assert_eq!(catalog.schemes().len(), 5);
        assert_eq!(catalog.climate().forecast.len(), 6);
    }

    #[test]
    fn test_analysis_result_payload() {
        let catalog = Catalog::embedded().unwrap();
        let soil = catalog.analysis_result();
        assert_eq!(soil.ph, 6.8);
        assert_eq!(soil.nitrogen, 75.0);
        assert_eq!(soil.texture, SoilTexture::Loamy);
        assert!(soil.image.is_none());
    }

    #[test]
    fn test_every_language_has_replies() {
        let catalog = Catalog::embedded().unwrap();
        for language in Language::ALL {
            assert!(!catalog.greeting(language).is_empty());
            assert_eq!(catalog.quick_prompts(language).len(), 4);
            for key in ResponseKey::ALL {
                assert!(!catalog.reply(key, language).is_empty());
            }
        }
    }

    #[test]
    fn test_scheme_ids_unique_in_embedded_catalog() {
        let catalog = Catalog::embedded().unwrap();
        let ids: std::collections::HashSet<_> =
            catalog.schemes().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.schemes().len());
    }

    #[test]
    fn test_malformed_catalog_rejected() {
        let result = Catalog::from_json("{ not json");
        assert!(matches!(
            result,
            Err(KrishiError::Catalog(CatalogError::Parse(_)))
        ));
    }

    #[test]
    fn test_missing_language_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(EMBEDDED_CATALOG).unwrap();
        value["greeting"]
            .as_object_mut()
            .unwrap()
            .remove("hi");

        let result = Catalog::from_json(&value.to_string());
        match result {
            Err(KrishiError::Catalog(CatalogError::Missing(what))) => {
                assert_eq!(what, "greeting for hi");
            }
            other => panic!("Expected missing greeting, got {:?}", other.map(|_| ())),
        }
    }
}
