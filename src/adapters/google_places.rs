use crate::config::AppConfig;
use crate::domain::model::{DetailsResponse, LatLng, NearbyPlace, NearbyResponse, PlaceDetails};
use crate::domain::ports::PlaceSource;
use crate::utils::error::{Result, ScoutError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const DETAIL_FIELDS: &str = "name,rating,formatted_address,opening_hours,geometry";
const LANGUAGE: &str = "zh-TW";
const KEYWORD: &str = "咖啡";

/// 逾時或傳輸失敗時重試一次
const MAX_RETRIES: u32 = 1;
const RETRY_BACKOFF: Duration = Duration::from_millis(300);

/// Google Places API 的 reqwest 介接
pub struct GooglePlaces {
    client: Client,
    base_url: String,
    api_key: String,
    radius_m: u32,
    timeout: Duration,
}

impl GooglePlaces {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.places_api_base.trim_end_matches('/').to_string(),
            api_key: config.google_api_key.clone(),
            radius_m: config.search_radius_m,
            timeout: Duration::from_secs(config.request_timeout_seconds),
        }
    }

    async fn get_with_retry(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Response> {
        let url = format!("{}/{}", self.base_url, path);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = self
                .client
                .get(&url)
                .query(query)
                .timeout(self.timeout)
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_server_error() && attempt <= MAX_RETRIES => {
                    tracing::warn!(
                        "Places API {} returned {}, retrying",
                        path,
                        response.status()
                    );
                }
                Ok(response) => {
                    if !response.status().is_success() {
                        return Err(ScoutError::UpstreamError {
                            message: format!("places API {} returned {}", path, response.status()),
                        });
                    }
                    return Ok(response);
                }
                Err(e) if attempt <= MAX_RETRIES => {
                    tracing::warn!("Places API {} failed ({}), retrying", path, e);
                }
                Err(e) => return Err(e.into()),
            }

            tokio::time::sleep(RETRY_BACKOFF * attempt).await;
        }
    }
}

#[async_trait]
impl PlaceSource for GooglePlaces {
    async fn nearby(&self, origin: LatLng) -> Result<Vec<NearbyPlace>> {
        let location = format!("{},{}", origin.lat, origin.lng);
        let radius = self.radius_m.to_string();

        tracing::debug!("Nearby search around {}", location);
        let response = self
            .get_with_retry(
                "nearbysearch/json",
                &[
                    ("location", location.as_str()),
                    ("radius", radius.as_str()),
                    ("type", "establishment"),
                    ("keyword", KEYWORD),
                    ("language", LANGUAGE),
                    ("key", self.api_key.as_str()),
                ],
            )
            .await?;

        let body: NearbyResponse = response.json().await?;
        Ok(body.results)
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetails> {
        let response = self
            .get_with_retry(
                "details/json",
                &[
                    ("place_id", place_id),
                    ("fields", DETAIL_FIELDS),
                    ("language", LANGUAGE),
                    ("key", self.api_key.as_str()),
                ],
            )
            .await?;

        let body: DetailsResponse = response.json().await?;
        body.result.ok_or_else(|| ScoutError::UpstreamError {
            message: format!("details response for {} has no result", place_id),
        })
    }
}
