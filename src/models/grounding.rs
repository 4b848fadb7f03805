// src/models/grounding.rs
// DOCUMENTATION: Grounding metadata returned by the Gemini API
// PURPOSE: Convert untyped grounding chunks into a tagged source type

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept any JSON for a field, keeping it only when it has the expected shape.
/// A field of the wrong type reads as absent instead of failing the chunk.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// One grounding chunk as it appears on the wire
/// DOCUMENTATION: Exactly one of `maps` / `web` is expected to be set, but
/// nothing upstream guarantees it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGroundingChunk {
    #[serde(default, deserialize_with = "lenient")]
    pub maps: Option<MapsChunk>,
    #[serde(default, deserialize_with = "lenient")]
    pub web: Option<WebChunk>,
}

/// Google Maps grounding payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsChunk {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub uri: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub place_answer_sources: Option<Vec<PlaceAnswerSource>>,
}

/// Source backing a Maps answer; carries an optional review excerpt
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceAnswerSource {
    #[serde(default, deserialize_with = "lenient")]
    pub review_snippet: Option<String>,
}

/// Google Search grounding payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WebChunk {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub uri: Option<String>,
}

/// Tagged form of a grounding chunk
/// DOCUMENTATION: Produced once at the API boundary so the normalizer
/// never inspects raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum GroundingSource {
    Maps(MapsChunk),
    Web(WebChunk),
    Unknown,
}

impl From<RawGroundingChunk> for GroundingSource {
    fn from(chunk: RawGroundingChunk) -> Self {
        match (chunk.maps, chunk.web) {
            (Some(maps), _) => GroundingSource::Maps(maps),
            (None, Some(web)) => GroundingSource::Web(web),
            (None, None) => GroundingSource::Unknown,
        }
    }
}

impl GroundingSource {
    /// Classify a raw JSON chunk; anything that is not an object becomes Unknown
    pub fn from_value(value: &Value) -> Self {
        match RawGroundingChunk::deserialize(value) {
            Ok(chunk) => chunk.into(),
            Err(e) => {
                log::debug!("Skipping malformed grounding chunk: {}", e);
                GroundingSource::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_maps_chunk_is_classified() {
        let source = GroundingSource::from_value(&json!({
            "maps": {
                "title": "Myitkyina Clock Tower",
                "uri": "https://maps.google.com/?cid=42",
                "placeAnswerSources": [{ "reviewSnippet": "Nice at night" }]
            }
        }));

        match source {
            GroundingSource::Maps(maps) => {
                assert_eq!(maps.title.as_deref(), Some("Myitkyina Clock Tower"));
                let sources = maps.place_answer_sources.unwrap();
                assert_eq!(sources[0].review_snippet.as_deref(), Some("Nice at night"));
            }
            other => panic!("expected maps source, got {:?}", other),
        }
    }

    #[test]
    fn test_web_chunk_is_classified() {
        let source = GroundingSource::from_value(&json!({
            "web": { "title": "Myitkyina - Wikipedia", "uri": "https://en.wikipedia.org/wiki/Myitkyina" }
        }));
        assert_eq!(
            source,
            GroundingSource::Web(WebChunk {
                title: Some("Myitkyina - Wikipedia".to_string()),
                uri: Some("https://en.wikipedia.org/wiki/Myitkyina".to_string()),
            })
        );
    }

    #[test]
    fn test_maps_wins_when_both_present() {
        let source = GroundingSource::from_value(&json!({
            "maps": { "title": "A" },
            "web": { "title": "B" }
        }));
        assert!(matches!(source, GroundingSource::Maps(_)));
    }

    #[test]
    fn test_unrecognized_shapes_are_unknown() {
        assert_eq!(GroundingSource::from_value(&json!({})), GroundingSource::Unknown);
        assert_eq!(
            GroundingSource::from_value(&json!({ "retrievedContext": { "uri": "x" } })),
            GroundingSource::Unknown
        );
        assert_eq!(GroundingSource::from_value(&json!("maps")), GroundingSource::Unknown);
        assert_eq!(
            GroundingSource::from_value(&json!({ "maps": null, "web": null })),
            GroundingSource::Unknown
        );
    }

    #[test]
    fn test_odd_fields_do_not_drop_chunk() {
        let source = GroundingSource::from_value(&json!({
            "maps": {
                "title": "Hotel",
                "uri": 17,
                "placeAnswerSources": { "reviewSnippets": [] }
            }
        }));

        match source {
            GroundingSource::Maps(maps) => {
                assert_eq!(maps.title.as_deref(), Some("Hotel"));
                assert_eq!(maps.uri, None);
                assert_eq!(maps.place_answer_sources, None);
            }
            other => panic!("expected maps source, got {:?}", other),
        }
    }
}
