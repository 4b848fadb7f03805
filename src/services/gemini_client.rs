// src/services/gemini_client.rs
// DOCUMENTATION: Gemini API client
// PURPOSE: Send grounded generateContent requests (Google Maps + Google Search tools)

use crate::config::Config;
use crate::errors::GuideError;
use crate::models::UserLocation;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Gemini API client
/// DOCUMENTATION: Holds one pooled HTTP client, shared by all requests
pub struct GeminiClient {
    /// HTTP client for making requests
    client: Client,
    /// Gemini API key
    api_key: String,
    /// Model name, e.g. "gemini-2.5-flash"
    model: String,
    /// Root of the REST API
    base_url: String,
}

/// Request body for models/{model}:generateContent
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<ToolConfig>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

/// Grounding tool declaration; exactly one field is set per entry
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_maps: Option<ToolOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_search: Option<ToolOptions>,
}

/// Tools are enabled with an empty options object
#[derive(Debug, Default, Serialize)]
pub struct ToolOptions {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    pub retrieval_config: RetrievalConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfig {
    pub lat_lng: LatLng,
}

#[derive(Debug, Serialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// Response from generateContent
/// DOCUMENTATION: Only the fields the guide reads are modelled
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub grounding_metadata: Option<GroundingMetadata>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
    /// Set on reasoning parts, which are not part of the answer
    pub thought: Option<bool>,
}

/// Grounding metadata; chunks stay raw until the normalizer classifies them
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    pub grounding_chunks: Option<Vec<Value>>,
    pub web_search_queries: Option<Vec<String>>,
}

impl GenerateContentResponse {
    /// Concatenated answer text of the first candidate, thought parts excluded
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter(|p| p.thought != Some(true))
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Grounding chunks of the first candidate, if any were returned
    pub fn grounding_chunks(&self) -> Option<&[Value]> {
        self.candidates
            .first()?
            .grounding_metadata
            .as_ref()?
            .grounding_chunks
            .as_deref()
    }
}

impl GeminiClient {
    /// Create new Gemini API client
    /// DOCUMENTATION: `timeout` bounds a whole generateContent round trip
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, GuideError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .map_err(|e| {
                GuideError::ConfigurationError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url: crate::config::env::DEFAULT_GEMINI_BASE_URL.to_string(),
        })
    }

    /// Create client from application configuration
    pub fn from_config(config: &Config) -> Result<Self, GuideError> {
        Ok(Self::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            Duration::from_secs(config.gemini_timeout_secs),
        )?
        .with_base_url(&config.gemini_base_url))
    }

    /// Point the client at another API root (proxies, tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build a request with Maps and Search grounding centered on `location`
    pub fn build_request(prompt: &str, location: UserLocation) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            tools: vec![
                Tool {
                    google_maps: Some(ToolOptions {}),
                    ..Default::default()
                },
                Tool {
                    google_search: Some(ToolOptions {}),
                    ..Default::default()
                },
            ],
            tool_config: Some(ToolConfig {
                retrieval_config: RetrievalConfig {
                    lat_lng: LatLng {
                        latitude: location.latitude,
                        longitude: location.longitude,
                    },
                },
            }),
        }
    }

    /// Run a grounded generateContent call
    /// DOCUMENTATION: Maps transport, status and parse failures to GuideError
    ///
    /// # Arguments
    /// * `prompt` - Full prompt text
    /// * `location` - Coordinates used for Maps retrieval
    pub async fn generate_grounded(
        &self,
        prompt: &str,
        location: UserLocation,
    ) -> Result<GenerateContentResponse, GuideError> {
        if !self.has_api_key() {
            return Err(GuideError::ConfigurationError(
                "Gemini API key not configured".to_string(),
            ));
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request = Self::build_request(prompt, location);

        log::debug!(
            "Gemini grounded request: model={}, lat={}, lng={}",
            self.model,
            location.latitude,
            location.longitude
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                log::error!("Gemini API request failed: {}", e);
                GuideError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Gemini API error {}: {}", status, body);

            return Err(match status.as_u16() {
                429 => GuideError::RateLimitExceeded,
                401 | 403 => GuideError::Unauthorized,
                _ => GuideError::ExternalApiError(format!("API error {}: {}", status, body)),
            });
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse Gemini response: {}", e);
            GuideError::ExternalApiError(format!("Parse error: {}", e))
        })?;

        if let Some(reason) = api_response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            if reason != "STOP" {
                log::warn!("Gemini finished with reason {}", reason);
            }
        }

        Ok(api_response)
    }
}
