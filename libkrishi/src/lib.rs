//! KrishiMitra - farming companion core
//!
//! This library holds everything a KrishiMitra front end needs apart from
//! drawing: the session store shared between screens, the translation
//! table, the route table, the mock data catalog, and the screen-side
//! services (form rules, soil analysis, assistant, scheme search).

pub mod catalog;
pub mod config;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod platform;
pub mod router;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use catalog::Catalog;
pub use config::Config;
pub use error::{KrishiError, Result};
pub use i18n::{Language, TextKey, Translator};
pub use router::Route;
pub use service::KrishiService;
pub use store::{Session, StoreHandle, StoreSnapshot};
pub use types::{CropRecommendation, FarmerProfile, GovernmentScheme, SoilData};
