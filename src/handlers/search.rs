// src/handlers/search.rs
// DOCUMENTATION: HTTP handlers for search operations
// PURPOSE: Parse requests, call services, return responses

use crate::config::Config;
use crate::errors::GuideError;
use crate::models::{Category, CategoryResponse, Preset, PresetRequest, SearchRequest};
use crate::services::{GeminiClient, SearchService};
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// POST /search
/// Grounded search for a free-text query or category
pub async fn search(
    client: web::Data<GeminiClient>,
    config: web::Data<Config>,
    req: web::Json<SearchRequest>,
) -> Result<impl Responder, GuideError> {
    if let Err(e) = req.validate() {
        return Err(GuideError::ValidationError(e.to_string()));
    }

    let result = SearchService::search(client.get_ref(), config.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// POST /search/preset/{preset}
/// One of the canned shortcut searches ("explore", "nearby")
pub async fn search_preset(
    client: web::Data<GeminiClient>,
    config: web::Data<Config>,
    path: web::Path<String>,
    req: web::Json<PresetRequest>,
) -> Result<impl Responder, GuideError> {
    let preset: Preset = path.into_inner().parse().map_err(GuideError::InvalidInput)?;

    if let Err(e) = req.validate() {
        return Err(GuideError::ValidationError(e.to_string()));
    }

    let search = req.into_inner().into_search(preset);
    let result = SearchService::search(client.get_ref(), config.get_ref(), search).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /categories
/// Quick-filter categories in display order
pub async fn list_categories() -> impl Responder {
    let categories: Vec<CategoryResponse> =
        Category::ALL.iter().map(|c| c.to_response()).collect();
    HttpResponse::Ok().json(categories)
}

/// GET /share
/// Link users share with each other (rendered as a QR code by clients)
pub async fn share_link(config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok().json(json!({ "url": config.public_url }))
}

/// Configuration for search routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/search", web::post().to(search))
        .route("/search/preset/{preset}", web::post().to(search_preset))
        .route("/categories", web::get().to(list_categories))
        .route("/share", web::get().to(share_link));
}
