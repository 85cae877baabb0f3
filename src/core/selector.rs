use crate::core::distance::{distance_km, round2};
use crate::core::hours;
use crate::domain::model::{Cafe, NearbyPlace, QueryContext};
use crate::domain::ports::PlaceSource;
use crate::utils::error::Result;
use futures::future::join_all;

/// 累積滿 20 筆合格候選即停止排程後續細節查詢
pub const MAX_CANDIDATES: usize = 20;
/// 最終只回傳最近的三筆
pub const TOP_RESULTS: usize = 3;

#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// 附近搜尋完全沒有結果（成功狀態，非錯誤）
    NoNearby,
    /// 依距離遞增排序、至多三筆
    Ranked(Vec<Cafe>),
}

pub struct CandidateSelector<'a, P: PlaceSource> {
    source: &'a P,
    concurrency: usize,
}

impl<'a, P: PlaceSource> CandidateSelector<'a, P> {
    pub fn new(source: &'a P, concurrency: usize) -> Self {
        Self {
            source,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn select(&self, ctx: &QueryContext) -> Result<SearchOutcome> {
        let nearby = self.source.nearby(ctx.origin).await?;
        if nearby.is_empty() {
            return Ok(SearchOutcome::NoNearby);
        }
        tracing::debug!("Evaluating {} nearby places", nearby.len());

        let mut candidates: Vec<Cafe> = Vec::new();

        // 依 API 回傳順序分批查細節；這是有界工作量保證，
        // 不保證第 20 筆之後更近的店家會被考慮
        for batch in nearby.chunks(self.concurrency) {
            let evaluated = join_all(batch.iter().map(|p| self.evaluate(p, ctx))).await;
            for cafe in evaluated {
                if let Some(cafe) = cafe? {
                    candidates.push(cafe);
                }
            }
            if candidates.len() >= MAX_CANDIDATES {
                candidates.truncate(MAX_CANDIDATES);
                break;
            }
        }

        tracing::debug!("{} candidates passed the time-window filter", candidates.len());

        candidates.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        candidates.truncate(TOP_RESULTS);
        Ok(SearchOutcome::Ranked(candidates))
    }

    /// 單一店家的細節查詢與營業時間評估；資料不全就跳過，不影響整體請求
    async fn evaluate(&self, place: &NearbyPlace, ctx: &QueryContext) -> Result<Option<Cafe>> {
        let details = self.source.details(&place.place_id).await?;

        // 未公布營業時間的店家直接跳過
        let Some(weekday_text) = details
            .opening_hours
            .as_ref()
            .and_then(|h| h.weekday_text.as_ref())
        else {
            return Ok(None);
        };
        let Some(line) = weekday_text.get(ctx.weekday_index) else {
            return Ok(None);
        };
        let Some((closing_label, closing_minutes)) = hours::closing_time(line) else {
            return Ok(None);
        };

        let closing_time = closing_label.to_string();

        let remaining = closing_minutes as i64 - ctx.current_minutes as i64;
        if remaining < hours::MIN_REMAINING_MINUTES {
            return Ok(None);
        }

        // 只有合格店家才計算距離
        let distance = round2(distance_km(ctx.origin, details.geometry.location));
        Ok(Some(Cafe {
            name: details.name,
            address: details.formatted_address,
            rating: details.rating,
            distance_km: distance,
            closing_time,
        }))
    }
}
