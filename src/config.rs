use std::net::IpAddr;
use std::time::Duration;
use clap::Parser;
use thiserror::Error;

pub const DEFAULT_PLACES_BASE_URL: &str = "https://places.googleapis.com/v1";

#[derive(Parser, Clone, Debug)]
pub struct Config {
    #[clap(env, long, default_value = "development")]
    pub environment: String,

    #[clap(env, long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[clap(env, long, default_value_t = 3000)]
    pub port: u16,

    /// Comma separated list of origins allowed by CORS
    #[clap(env, long, default_value = "http://localhost:3001")]
    pub origin_urls: String,

    #[clap(env, long)]
    pub google_api_key: Option<String>,

    #[clap(env, long, default_value = DEFAULT_PLACES_BASE_URL)]
    pub places_base_url: String,

    /// Upper bound for every outbound call to the places provider
    #[clap(env, long, default_value_t = 5000)]
    pub upstream_timeout_ms: u64,

    #[clap(env, long, default_value_t = 400)]
    pub photo_max_px: u32,

    #[clap(env, long, default_value_t = 256)]
    pub max_concurrent_requests: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("GOOGLE_API_KEY is not set, refusing to serve requests without a places credential")]
    MissingApiKey,

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),
}

/// Settings the places adapters need once the raw config has been checked.
#[derive(Clone, Debug)]
pub struct PlacesSettings {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub photo_max_px: u32,
}

impl Config {
    pub fn places_settings(&self) -> Result<PlacesSettings, ConfigurationError> {
        let api_key = self
            .google_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigurationError::MissingApiKey)?;

        if self.upstream_timeout_ms == 0 {
            return Err(ConfigurationError::ZeroValue("upstream_timeout_ms"));
        }
        if self.photo_max_px == 0 {
            return Err(ConfigurationError::ZeroValue("photo_max_px"));
        }

        Ok(PlacesSettings {
            api_key: api_key.to_string(),
            base_url: self.places_base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(self.upstream_timeout_ms),
            photo_max_px: self.photo_max_px,
        })
    }
}
