use crate::config::AppConfig;
use crate::domain::model::PlaceQuery;
use crate::domain::ports::PayloadDecryptor;
use crate::utils::error::{Result, ScoutError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// 前端加密 payload 的解密協作者；原文照轉，不在本服務內解密
pub struct DecryptApi {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl DecryptApi {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.decrypt_api.clone(),
            timeout: Duration::from_secs(config.request_timeout_seconds),
        }
    }
}

#[async_trait]
impl PayloadDecryptor for DecryptApi {
    async fn decrypt(&self, payload: &serde_json::Value) -> Result<PlaceQuery> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .timeout(self.timeout)
            .send()
            .await?;

        // 非 2xx：解密被拒，上游錯誤內容原樣回傳給呼叫端
        if !response.status().is_success() {
            let detail: serde_json::Value = response.json().await?;
            return Err(ScoutError::DecryptRejected { detail });
        }

        Ok(response.json::<PlaceQuery>().await?)
    }
}
