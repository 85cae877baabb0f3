use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url, Validate,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cafe-scout")]
#[command(about = "Nearby cafes still open for at least three more hours")]
pub struct AppConfig {
    #[arg(long, env = "PORT", default_value = "3001")]
    pub port: u16,

    /// Google Places API 金鑰，啟動時必須提供
    #[arg(long, env = "GOOGLE_API_KEY")]
    pub google_api_key: String,

    #[arg(
        long,
        env = "DECRYPT_API",
        default_value = "https://decrypt-api-gait.onrender.com/api/decrypt"
    )]
    pub decrypt_api: String,

    #[arg(
        long,
        env = "PLACES_API_BASE",
        default_value = "https://maps.googleapis.com/maps/api/place"
    )]
    pub places_api_base: String,

    /// PEM 公鑰路徑；未設定時不啟用加密回應端點
    #[arg(long, env = "PUBLIC_KEY_PATH")]
    pub public_key_path: Option<PathBuf>,

    #[arg(long, env = "SEARCH_RADIUS_M", default_value = "2000")]
    pub search_radius_m: u32,

    #[arg(long, env = "CONCURRENT_REQUESTS", default_value = "5")]
    pub concurrent_requests: usize,

    #[arg(long, env = "REQUEST_TIMEOUT_SECONDS", default_value = "10")]
    pub request_timeout_seconds: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("google_api_key", &self.google_api_key)?;
        validate_url("decrypt_api", &self.decrypt_api)?;
        validate_url("places_api_base", &self.places_api_base)?;
        validate_range("search_radius_m", self.search_radius_m, 1, 50_000)?;
        validate_range("concurrent_requests", self.concurrent_requests, 1, 100)?;
        validate_range("request_timeout_seconds", self.request_timeout_seconds, 1, 300)?;
        Ok(())
    }
}
