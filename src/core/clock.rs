use crate::domain::model::{LatLng, PlaceQuery, QueryContext};
use crate::utils::error::{Result, ScoutError};
use chrono::{Datelike, Local, NaiveDate, NaiveTime, Timelike};
use serde_json::{json, Value};

/// 驗證查詢欄位並建立 QueryContext。
///
/// `strict_time` 為 true 時 currentTime 必填（解密後的 payload），
/// 否則缺少 currentTime 以當下牆鐘時間代替。
/// 驗證失敗時回傳逐欄位的錯誤標記，合法欄位照原值回顯。
pub fn resolve_query(query: &PlaceQuery, strict_time: bool) -> Result<QueryContext> {
    let now = Local::now();
    let mut fields = serde_json::Map::new();

    match query.latitude {
        Some(v) => fields.insert("latitude".to_string(), json!(v)),
        None => fields.insert("latitude".to_string(), json!("缺少 latitude")),
    };
    match query.longitude {
        Some(v) => fields.insert("longitude".to_string(), json!(v)),
        None => fields.insert("longitude".to_string(), json!("缺少 longitude")),
    };

    let time = match &query.current_time {
        Some(raw) => match NaiveTime::parse_from_str(raw, "%H:%M") {
            Ok(t) => {
                fields.insert("currentTime".to_string(), json!(raw));
                Some(t)
            }
            Err(_) => {
                fields.insert("currentTime".to_string(), json!("currentTime 格式錯誤"));
                None
            }
        },
        None if strict_time => {
            fields.insert("currentTime".to_string(), json!("缺少 currentTime"));
            None
        }
        None => Some(now.time()),
    };

    match (query.latitude, query.longitude, time) {
        (Some(lat), Some(lng), Some(t)) => {
            Ok(context_at(now.date_naive(), t, LatLng { lat, lng }))
        }
        _ => Err(ScoutError::ValidationError {
            fields: Value::Object(fields),
        }),
    }
}

/// 以指定日期與時刻建立 QueryContext
pub fn context_at(date: NaiveDate, time: NaiveTime, origin: LatLng) -> QueryContext {
    QueryContext {
        origin,
        current_minutes: time.hour() * 60 + time.minute(),
        // 週日為首的原生編號轉成週一為首的索引
        weekday_index: date.weekday().num_days_from_monday() as usize,
    }
}
