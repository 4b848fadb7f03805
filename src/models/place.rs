// src/models/place.rs
// DOCUMENTATION: Core data structures for places and caller location
// PURPOSE: Display-ready place results handed to clients

use serde::{Deserialize, Serialize};

/// One discoverable location or web reference
/// DOCUMENTATION: Built by the grounding normalizer from one AI response.
/// `title` is the deduplication key and is not guaranteed unique upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    /// Place or page name
    pub title: String,

    /// Google Maps or web link
    pub uri: String,

    /// Short label for non-map results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Review snippets, in upstream order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippets: Option<Vec<String>>,
}

/// Geographic position of the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Where the coordinates of a search came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    /// Both coordinates were supplied by the device
    Gps,
    /// At least one coordinate fell back to the city center
    CityCenter,
}

impl UserLocation {
    /// Whether both coordinates are finite and inside WGS84 bounds
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Combine caller-supplied coordinates with a fallback location
    /// DOCUMENTATION: Each coordinate is taken from the caller when present,
    /// finite and non-zero; otherwise the fallback's coordinate is used.
    /// A zero coordinate counts as "no fix".
    pub fn resolve(
        latitude: Option<f64>,
        longitude: Option<f64>,
        fallback: UserLocation,
    ) -> (UserLocation, LocationSource) {
        let usable = |v: Option<f64>| v.filter(|v| v.is_finite() && *v != 0.0);

        match (usable(latitude), usable(longitude)) {
            (Some(latitude), Some(longitude)) => {
                (UserLocation { latitude, longitude }, LocationSource::Gps)
            }
            (latitude, longitude) => (
                UserLocation {
                    latitude: latitude.unwrap_or(fallback.latitude),
                    longitude: longitude.unwrap_or(fallback.longitude),
                },
                LocationSource::CityCenter,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: UserLocation = UserLocation {
        latitude: 25.3831,
        longitude: 97.3955,
    };

    #[test]
    fn test_resolve_uses_gps_when_complete() {
        let (loc, source) = UserLocation::resolve(Some(25.39), Some(97.40), CENTER);
        assert_eq!(source, LocationSource::Gps);
        assert_eq!(loc.latitude, 25.39);
        assert_eq!(loc.longitude, 97.40);
    }

    #[test]
    fn test_resolve_falls_back_when_missing() {
        let (loc, source) = UserLocation::resolve(None, None, CENTER);
        assert_eq!(source, LocationSource::CityCenter);
        assert_eq!(loc, CENTER);
    }

    #[test]
    fn test_resolve_falls_back_per_coordinate() {
        let (loc, source) = UserLocation::resolve(Some(25.40), Some(0.0), CENTER);
        assert_eq!(source, LocationSource::CityCenter);
        assert_eq!(loc.latitude, 25.40);
        assert_eq!(loc.longitude, CENTER.longitude);

        let (loc, _) = UserLocation::resolve(Some(f64::NAN), Some(97.41), CENTER);
        assert_eq!(loc.latitude, CENTER.latitude);
        assert_eq!(loc.longitude, 97.41);
    }

    #[test]
    fn test_place_result_omits_empty_optionals() {
        let place = PlaceResult {
            title: "Clock Tower".to_string(),
            uri: "https://maps.google.com/?cid=1".to_string(),
            description: None,
            snippets: None,
        };
        let value = serde_json::to_value(&place).unwrap();
        assert!(value.get("description").is_none());
        assert!(value.get("snippets").is_none());
    }
}
