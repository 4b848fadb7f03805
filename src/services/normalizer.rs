// src/services/normalizer.rs
// DOCUMENTATION: Grounding chunk normalizer
// PURPOSE: Turn one response's grounding chunks into deduplicated place results

use crate::models::{GroundingSource, MapsChunk, PlaceResult, WebChunk};
use serde_json::Value;
use std::collections::HashMap;

/// Description attached to every search (non-Maps) result
pub const WEB_RESULT_DESCRIPTION: &str = "Web result";

/// Normalize raw grounding chunks straight from a response body
/// DOCUMENTATION: An absent chunk list behaves like an empty one.
pub fn normalize_raw(chunks: Option<&[Value]>) -> Vec<PlaceResult> {
    normalize(
        chunks
            .unwrap_or_default()
            .iter()
            .map(GroundingSource::from_value),
    )
}

/// Build the display list from classified grounding sources
/// DOCUMENTATION: Unknown sources are skipped. Results are deduplicated by
/// title: a later result replaces an earlier one with the same title but
/// keeps the position where that title first appeared. A missing title is a
/// key of its own, distinct from the empty string.
pub fn normalize<I>(sources: I) -> Vec<PlaceResult>
where
    I: IntoIterator<Item = GroundingSource>,
{
    let mut slots: HashMap<Option<String>, usize> = HashMap::new();
    let mut places: Vec<PlaceResult> = Vec::new();

    for source in sources {
        let Some((key, place)) = to_place(source) else {
            continue;
        };

        match slots.get(&key) {
            Some(&slot) => places[slot] = place,
            None => {
                slots.insert(key, places.len());
                places.push(place);
            }
        }
    }

    places
}

fn to_place(source: GroundingSource) -> Option<(Option<String>, PlaceResult)> {
    match source {
        GroundingSource::Maps(maps) => Some(from_maps(maps)),
        GroundingSource::Web(web) => Some(from_web(web)),
        GroundingSource::Unknown => None,
    }
}

fn from_maps(maps: MapsChunk) -> (Option<String>, PlaceResult) {
    let snippets = maps.place_answer_sources.map(|sources| {
        sources
            .into_iter()
            .filter_map(|s| s.review_snippet)
            .filter(|s| !s.is_empty())
            .collect()
    });

    let place = PlaceResult {
        title: maps.title.clone().unwrap_or_default(),
        uri: maps.uri.unwrap_or_default(),
        description: None,
        snippets,
    };
    (maps.title, place)
}

fn from_web(web: WebChunk) -> (Option<String>, PlaceResult) {
    let place = PlaceResult {
        title: web.title.clone().unwrap_or_default(),
        uri: web.uri.unwrap_or_default(),
        description: Some(WEB_RESULT_DESCRIPTION.to_string()),
        snippets: None,
    };
    (web.title, place)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> Vec<PlaceResult> {
        let chunks = value.as_array().cloned().unwrap_or_default();
        normalize_raw(Some(&chunks))
    }

    #[test]
    fn test_maps_chunk_with_snippet() {
        let places = raw(json!([
            { "maps": { "title": "A", "uri": "u1", "placeAnswerSources": [{ "reviewSnippet": "great" }] } }
        ]));

        assert_eq!(
            places,
            vec![PlaceResult {
                title: "A".to_string(),
                uri: "u1".to_string(),
                description: None,
                snippets: Some(vec!["great".to_string()]),
            }]
        );
    }

    #[test]
    fn test_web_chunk_gets_fixed_description() {
        let places = raw(json!([{ "web": { "title": "B", "uri": "u2" } }]));

        assert_eq!(
            places,
            vec![PlaceResult {
                title: "B".to_string(),
                uri: "u2".to_string(),
                description: Some("Web result".to_string()),
                snippets: None,
            }]
        );
    }

    #[test]
    fn test_later_duplicate_wins() {
        let places = raw(json!([
            { "maps": { "title": "A", "uri": "u1", "placeAnswerSources": [] } },
            { "web": { "title": "A", "uri": "u2" } }
        ]));

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].uri, "u2");
        assert_eq!(places[0].description.as_deref(), Some(WEB_RESULT_DESCRIPTION));
        assert_eq!(places[0].snippets, None);
    }

    #[test]
    fn test_duplicate_keeps_first_seen_position() {
        let places = raw(json!([
            { "web": { "title": "A", "uri": "a1" } },
            { "web": { "title": "B", "uri": "b1" } },
            { "web": { "title": "C", "uri": "c1" } },
            { "web": { "title": "A", "uri": "a2" } }
        ]));

        let titles: Vec<&str> = places.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(places[0].uri, "a2");
    }

    #[test]
    fn test_empty_and_absent_input() {
        assert!(normalize_raw(None).is_empty());
        assert!(normalize_raw(Some(&[])).is_empty());
        assert!(normalize(Vec::new()).is_empty());
    }

    #[test]
    fn test_absent_and_empty_snippets_are_dropped() {
        let places = raw(json!([
            { "maps": { "title": "A", "uri": "u1", "placeAnswerSources": [
                { "reviewSnippet": "first" },
                {},
                { "reviewSnippet": "" },
                { "reviewSnippet": null },
                { "reviewSnippet": "second" }
            ] } },
            { "maps": { "title": "B", "uri": "u2", "placeAnswerSources": [{}, { "reviewSnippet": null }] } }
        ]));

        assert_eq!(
            places[0].snippets,
            Some(vec!["first".to_string(), "second".to_string()])
        );
        assert_eq!(places[1].snippets, Some(Vec::new()));
    }

    #[test]
    fn test_missing_answer_sources_leave_snippets_absent() {
        let places = raw(json!([{ "maps": { "title": "A", "uri": "u1" } }]));
        assert_eq!(places[0].snippets, None);
    }

    #[test]
    fn test_unknown_chunks_are_skipped() {
        let places = raw(json!([
            { "retrievedContext": { "title": "doc", "uri": "gs://x" } },
            42,
            { "web": { "title": "B", "uri": "u2" } }
        ]));

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].title, "B");
    }

    #[test]
    fn test_missing_titles_collapse_together() {
        let places = raw(json!([
            { "web": { "uri": "u1" } },
            { "web": { "title": "", "uri": "u2" } },
            { "maps": { "uri": "u3" } }
        ]));

        assert_eq!(places.len(), 2);
        // untitled entries share one slot, "" is a separate key
        assert_eq!(places[0].uri, "u3");
        assert_eq!(places[0].title, "");
        assert_eq!(places[1].uri, "u2");
    }

    #[test]
    fn test_output_has_unique_titles_and_never_grows() {
        let inputs = vec![
            json!([]),
            json!([{ "web": { "title": "A", "uri": "1" } }, { "web": { "title": "A", "uri": "2" } }]),
            json!([
                { "maps": { "title": "X", "uri": "1" } },
                { "web": { "title": "Y", "uri": "2" } },
                {},
                { "maps": { "title": "Y", "uri": "3" } },
                { "web": { "title": "Z", "uri": "4" } },
                { "web": { "title": "X", "uri": "5" } }
            ]),
        ];

        for input in inputs {
            let len = input.as_array().map(|a| a.len()).unwrap_or(0);
            let places = raw(input);
            assert!(places.len() <= len);

            let mut titles: Vec<&str> = places.iter().map(|p| p.title.as_str()).collect();
            titles.sort();
            titles.dedup();
            assert_eq!(titles.len(), places.len());
        }
    }
}
