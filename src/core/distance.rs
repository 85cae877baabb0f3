use crate::domain::model::LatLng;

const EARTH_RADIUS_KM: f64 = 6371.0088;

/// 等距柱狀投影近似（非完整 Haversine），在 2 公里搜尋半徑內誤差可忽略
pub fn distance_km(from: LatLng, to: LatLng) -> f64 {
    let x = (to.lng - from.lng).to_radians() * ((from.lat + to.lat) / 2.0).to_radians().cos();
    let y = (to.lat - from.lat).to_radians();
    (x * x + y * y).sqrt() * EARTH_RADIUS_KM
}

/// 輸出一律取到小數兩位
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
