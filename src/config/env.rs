// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use crate::models::UserLocation;
use dotenv::dotenv;
use std::env;
use std::str::FromStr;

/// Clock Tower area, used whenever the caller has no GPS fix
pub const CITY_CENTER: UserLocation = UserLocation {
    latitude: 25.3831,
    longitude: 97.3955,
};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 8080)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Gemini API key
    pub gemini_api_key: String,

    /// Gemini model used for grounded search
    pub gemini_model: String,

    /// Root of the Gemini REST API
    pub gemini_base_url: String,

    /// Timeout for a single generateContent call, in seconds
    pub gemini_timeout_secs: u64,

    /// Location used when the caller sends no usable coordinates
    pub default_location: UserLocation,

    /// Public URL of the app, handed out by the share endpoint
    pub public_url: String,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();

        let server_port = parsed_or("SERVER_PORT", 8080);

        Config {
            server_address: var_or("SERVER_ADDRESS", "127.0.0.1"),
            server_port,
            environment: var_or("ENVIRONMENT", "development"),
            log_level: var_or("LOG_LEVEL", "info"),

            // API_KEY is the name the web build of the app used
            gemini_api_key: env::var("GEMINI_API_KEY")
                .or_else(|_| env::var("API_KEY"))
                .unwrap_or_default(),

            gemini_model: var_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_base_url: var_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            gemini_timeout_secs: parsed_or("GEMINI_TIMEOUT_SECS", 60),

            default_location: UserLocation {
                latitude: parsed_or("DEFAULT_LATITUDE", CITY_CENTER.latitude),
                longitude: parsed_or("DEFAULT_LONGITUDE", CITY_CENTER.longitude),
            },

            public_url: env::var("PUBLIC_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", server_port)),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.server_port == 0 {
            return Err("SERVER_PORT must be between 1 and 65535".to_string());
        }

        if !self.default_location.is_valid() {
            return Err(format!(
                "DEFAULT_LATITUDE/DEFAULT_LONGITUDE out of range: {}, {}",
                self.default_location.latitude, self.default_location.longitude
            ));
        }

        if self.gemini_timeout_secs == 0 {
            return Err("GEMINI_TIMEOUT_SECS must be greater than zero".to_string());
        }

        if self.gemini_api_key.is_empty() {
            log::warn!("GEMINI_API_KEY not configured - searches will be rejected");
        }

        Ok(())
    }
}

#[cfg(test)]
impl Config {
    /// Fixed configuration for tests, independent of the process environment
    pub fn for_tests() -> Self {
        Config {
            server_address: "127.0.0.1".to_string(),
            server_port: 8080,
            environment: "test".to_string(),
            log_level: "debug".to_string(),
            gemini_api_key: String::new(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_timeout_secs: 60,
            default_location: CITY_CENTER,
            public_url: "https://guide.example.org".to_string(),
        }
    }
}
