// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod gemini_client;
pub mod normalizer;
pub mod search_service;

pub use gemini_client::*;
pub use search_service::*;
