use serde::{Deserialize, Serialize};

/// 單一端點收到的查詢內容（解密後亦為同一形狀）
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "currentTime")]
    pub current_time: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// 每個請求建立一次，之後不再變動
#[derive(Debug, Clone, Copy)]
pub struct QueryContext {
    pub origin: LatLng,
    /// 午夜起算的分鐘數，0..=1439
    pub current_minutes: u32,
    /// 週一為 0、週日為 6，對齊 weekday_text 的排列
    pub weekday_index: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NearbyResponse {
    #[serde(default)]
    pub results: Vec<NearbyPlace>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NearbyPlace {
    pub place_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailsResponse {
    pub result: Option<PlaceDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetails {
    pub name: String,
    pub rating: Option<f64>,
    pub formatted_address: String,
    pub opening_hours: Option<OpeningHours>,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpeningHours {
    pub weekday_text: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

/// 通過篩選的候選咖啡廳，僅存活於單一請求內
#[derive(Debug, Clone, Serialize)]
pub struct Cafe {
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub distance_km: f64,
    pub closing_time: String,
}

/// 五段式加密信封，各段為無填充的 base64url
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    pub protected: String,
    pub encrypted_key: String,
    pub iv: String,
    pub ciphertext: String,
    pub tag: String,
}
