// src/models/search.rs
// DOCUMENTATION: Search request and response DTOs
// PURPOSE: Shapes accepted and returned by the search endpoints

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use super::{Category, LocationSource, PlaceResult, UserLocation};

/// Body of POST /search
/// DOCUMENTATION: Either a free-text query or a category must be given.
/// Coordinates are optional; missing ones fall back to the city center.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    /// Free-text query, e.g. "ကော်ဖီဆိုင်" (coffee shop)
    #[serde(default)]
    #[validate(length(max = 500))]
    pub query: Option<String>,

    /// Quick-filter category; takes precedence over `query`
    #[serde(default)]
    pub category: Option<Category>,

    /// Device latitude
    #[serde(default)]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    /// Device longitude
    #[serde(default)]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl SearchRequest {
    /// Term sent to the model, or None when nothing searchable was given
    pub fn search_term(&self) -> Option<String> {
        if let Some(category) = self.category {
            return Some(category.label().to_string());
        }

        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string)
    }
}

/// Canned searches behind the app's shortcut buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Interesting places in Myitkyina
    Explore,
    /// Notable places nearby
    Nearby,
}

impl Preset {
    pub fn term(self) -> &'static str {
        match self {
            Preset::Explore => "မြစ်ကြီးနားရှိ စိတ်ဝင်စားဖွယ်နေရာများ",
            Preset::Nearby => "အနီးနားရှိ ထင်ရှားသောနေရာများ",
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "explore" => Ok(Preset::Explore),
            "nearby" => Ok(Preset::Nearby),
            other => Err(format!("unknown preset: {}", other)),
        }
    }
}

/// Body of POST /search/preset/{preset}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PresetRequest {
    #[serde(default)]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[serde(default)]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl PresetRequest {
    pub fn into_search(self, preset: Preset) -> SearchRequest {
        SearchRequest {
            query: Some(preset.term().to_string()),
            category: None,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Search result returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Natural-language summary from the model (Burmese)
    pub text: String,

    /// Deduplicated grounding results
    pub places: Vec<PlaceResult>,

    /// Term that was actually searched
    pub query: String,

    /// Coordinates sent to the model
    pub location: UserLocation,

    /// Whether `location` came from the device or the city-center default
    pub location_source: LocationSource,

    /// Google Maps search link for the same term
    pub maps_search_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_overrides_query() {
        let req = SearchRequest {
            query: Some("coffee".to_string()),
            category: Some(Category::Hotel),
            ..Default::default()
        };
        assert_eq!(req.search_term().as_deref(), Some(Category::Hotel.label()));
    }

    #[test]
    fn test_blank_query_has_no_term() {
        let req = SearchRequest {
            query: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(req.search_term(), None);
        assert_eq!(SearchRequest::default().search_term(), None);
    }

    #[test]
    fn test_query_is_trimmed() {
        let req = SearchRequest {
            query: Some("  ကော်ဖီဆိုင် ".to_string()),
            ..Default::default()
        };
        assert_eq!(req.search_term().as_deref(), Some("ကော်ဖီဆိုင်"));
    }

    #[test]
    fn test_coordinate_ranges_are_validated() {
        let req = SearchRequest {
            query: Some("atm".to_string()),
            latitude: Some(91.0),
            longitude: Some(97.0),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = SearchRequest {
            query: Some("atm".to_string()),
            latitude: Some(25.38),
            longitude: Some(97.39),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_preset_parses_from_path_segment() {
        assert_eq!("nearby".parse::<Preset>(), Ok(Preset::Nearby));
        assert_eq!("Explore".parse::<Preset>(), Ok(Preset::Explore));
        assert!("random".parse::<Preset>().is_err());

        let search = PresetRequest::default().into_search(Preset::Explore);
        assert_eq!(search.search_term().as_deref(), Some(Preset::Explore.term()));
    }
}
