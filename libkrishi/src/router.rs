//! Route table
//!
//! Maps the fixed set of paths to screens. Routing is pure: no guards, no
//! parameters, no data loading.

use serde::{Deserialize, Serialize};

use crate::i18n::TextKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Splash,
    Language,
    Profile,
    Dashboard,
    SoilInput,
    SoilImage,
    SoilManual,
    SoilVoice,
    Climate,
    Recommendations,
    Schemes,
    Assistant,
    NotFound,
}

impl Route {
    /// Every route with a concrete path
    pub const ROUTABLE: [Route; 12] = [
        Route::Splash,
        Route::Language,
        Route::Profile,
        Route::Dashboard,
        Route::SoilInput,
        Route::SoilImage,
        Route::SoilManual,
        Route::SoilVoice,
        Route::Climate,
        Route::Recommendations,
        Route::Schemes,
        Route::Assistant,
    ];

    /// Bottom navigation destinations, in display order
    pub const BOTTOM_NAV: [(Route, TextKey); 5] = [
        (Route::Dashboard, TextKey::Dashboard),
        (Route::SoilInput, TextKey::SoilAnalysis),
        (Route::Climate, TextKey::Climate),
        (Route::Schemes, TextKey::Schemes),
        (Route::Assistant, TextKey::Assistant),
    ];

    /// Resolve a path; anything unknown is the catch-all
    pub fn from_path(path: &str) -> Route {
        match path {
            "/" => Route::Splash,
            "/language" => Route::Language,
            "/profile" => Route::Profile,
            "/dashboard" => Route::Dashboard,
            "/soil" => Route::SoilInput,
            "/soil/image" => Route::SoilImage,
            "/soil/manual" => Route::SoilManual,
            "/soil/voice" => Route::SoilVoice,
            "/climate" => Route::Climate,
            "/recommendations" => Route::Recommendations,
            "/schemes" => Route::Schemes,
            "/assistant" => Route::Assistant,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Splash => "/",
            Route::Language => "/language",
            Route::Profile => "/profile",
            Route::Dashboard => "/dashboard",
            Route::SoilInput => "/soil",
            Route::SoilImage => "/soil/image",
            Route::SoilManual => "/soil/manual",
            Route::SoilVoice => "/soil/voice",
            Route::Climate => "/climate",
            Route::Recommendations => "/recommendations",
            Route::Schemes => "/schemes",
            Route::Assistant => "/assistant",
            Route::NotFound => "*",
        }
    }

    /// Screen reached by the "back" action
    pub fn parent(&self) -> Route {
        match self {
            Route::Splash | Route::Language => Route::Language,
            Route::Profile => Route::Language,
            Route::SoilImage | Route::SoilManual | Route::SoilVoice => Route::SoilInput,
            _ => Route::Dashboard,
        }
    }

    /// Whether the screen shows the bottom navigation bar
    pub fn has_bottom_nav(&self) -> bool {
        Self::BOTTOM_NAV.iter().any(|(route, _)| route == self)
            || *self == Route::Recommendations
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for route in Route::ROUTABLE {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(Route::from_path("/soil/twin"), Route::NotFound);
        assert_eq!(Route::from_path(""), Route::NotFound);
        assert_eq!(Route::from_path("/dashboard/"), Route::NotFound);
    }

    #[test]
    fn test_soil_variants_go_back_to_chooser() {
        assert_eq!(Route::SoilManual.parent(), Route::SoilInput);
        assert_eq!(Route::SoilImage.parent(), Route::SoilInput);
        assert_eq!(Route::SoilVoice.parent(), Route::SoilInput);
        assert_eq!(Route::SoilInput.parent(), Route::Dashboard);
    }

    #[test]
    fn test_bottom_nav() {
        assert!(Route::Dashboard.has_bottom_nav());
        assert!(Route::Recommendations.has_bottom_nav());
        assert!(!Route::Profile.has_bottom_nav());
        assert_eq!(Route::BOTTOM_NAV[0].0, Route::Dashboard);
    }
}
