// src/services/search_service.rs
// DOCUMENTATION: Business logic for grounded place search
// PURPOSE: Resolve location, compose the prompt, call Gemini, normalize results

use crate::config::Config;
use crate::errors::GuideError;
use crate::models::{SearchRequest, SearchResponse, UserLocation};
use crate::services::normalizer;
use crate::services::GeminiClient;
use reqwest::Url;

/// Summary used when the model returns no text ("No information found.")
pub const NO_RESULTS_TEXT: &str = "အချက်အလက် ရှာမတွေ့ပါ။";

const MAPS_SEARCH_BASE: &str = "https://www.google.com/maps/search/";

pub struct SearchService;

impl SearchService {
    /// Search places around the caller
    /// DOCUMENTATION: The only suspension point is the Gemini call; the
    /// normalization that follows runs to completion synchronously.
    pub async fn search(
        client: &GeminiClient,
        config: &Config,
        req: SearchRequest,
    ) -> Result<SearchResponse, GuideError> {
        let term = req.search_term().ok_or_else(|| {
            GuideError::ValidationError("query or category is required".to_string())
        })?;

        let (location, location_source) =
            UserLocation::resolve(req.latitude, req.longitude, config.default_location);

        log::info!(
            "Searching \"{}\" at {:.4},{:.4} ({:?})",
            term,
            location.latitude,
            location.longitude,
            location_source
        );

        let prompt = Self::build_prompt(&term, location);
        let response = client.generate_grounded(&prompt, location).await?;

        if let Some(queries) = response
            .candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .and_then(|m| m.web_search_queries.as_ref())
        {
            log::debug!("Model issued web searches: {:?}", queries);
        }

        let text = response.text();
        let chunks = response.grounding_chunks();
        let chunk_count = chunks.map(|c| c.len()).unwrap_or(0);
        let places = normalizer::normalize_raw(chunks);

        log::info!(
            "Search \"{}\" returned {} grounding chunks, {} places",
            term,
            chunk_count,
            places.len()
        );

        Ok(SearchResponse {
            text: Self::summary_text(text),
            places,
            maps_search_url: Self::maps_search_url(&term),
            query: term,
            location,
            location_source,
        })
    }

    /// Prompt sent to the model for one search
    pub fn build_prompt(term: &str, location: UserLocation) -> String {
        format!(
            "You are a local expert guide for Myitkyina, Myanmar.\n\
             User is currently at latitude {lat}, longitude {lng}.\n\
             Search query: \"{term}\"\n\
             \n\
             Please provide:\n\
             1. A brief helpful summary in Myanmar language about these places in Myitkyina.\n\
             2. A list of specific places with their names and locations.\n\
             \n\
             Focus only on Myitkyina city and surrounding areas. Use Google Maps and Search to find the most accurate and up-to-date information.",
            lat = location.latitude,
            lng = location.longitude,
            term = term,
        )
    }

    /// Model text, or the "no information" message when there is none
    pub fn summary_text(text: Option<String>) -> String {
        text.filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_RESULTS_TEXT.to_string())
    }

    /// Google Maps search link for a term, scoped to Myitkyina
    pub fn maps_search_url(term: &str) -> String {
        let term = term.trim();
        let term = if term.is_empty() { "landmark" } else { term };
        let segment = format!("Myitkyina+{}", term);

        match Url::parse(MAPS_SEARCH_BASE) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push(&segment);
                }
                url.to_string()
            }
            Err(_) => format!("{}{}", MAPS_SEARCH_BASE, segment),
        }
    }
}
