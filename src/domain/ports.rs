use crate::domain::model::{LatLng, NearbyPlace, PlaceDetails, PlaceQuery};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 附近搜尋與細節查詢的外部協作者
#[async_trait]
pub trait PlaceSource: Send + Sync {
    async fn nearby(&self, origin: LatLng) -> Result<Vec<NearbyPlace>>;
    async fn details(&self, place_id: &str) -> Result<PlaceDetails>;
}

/// 將加密 payload 還原成查詢欄位的外部協作者
#[async_trait]
pub trait PayloadDecryptor: Send + Sync {
    async fn decrypt(&self, payload: &serde_json::Value) -> Result<PlaceQuery>;
}
