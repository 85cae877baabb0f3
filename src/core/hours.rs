use regex::Regex;
use std::sync::OnceLock;

/// 合格門檻：距打烊至少還有三小時
pub const MIN_REMAINING_MINUTES: i64 = 180;

static HOURS_LINE: OnceLock<Regex> = OnceLock::new();

// 預期形狀 "<標籤>: <開店> – <打烊>"，分隔符為 en dash。
// "24 小時營業"、"休息" 等行不符合，該店家直接跳過。
fn hours_line_re() -> &'static Regex {
    HOURS_LINE.get_or_init(|| Regex::new(": (.+) – (.+)").expect("hours pattern is valid"))
}

/// 從當日營業時間行取出打烊時間字串與其分鐘數
pub fn closing_time(line: &str) -> Option<(&str, u32)> {
    let caps = hours_line_re().captures(line)?;
    let raw = caps.get(2)?.as_str();
    Some((raw, time_to_minutes(raw)?))
}

/// 距打烊的剩餘分鐘數；打烊時間數值上早於目前時間時為負。
/// 跨夜打烊（例如凌晨一點）因此落在負值而被排除，為已知限制。
pub fn remaining_minutes(line: &str, current_minutes: u32) -> Option<i64> {
    let (_, closing) = closing_time(line)?;
    Some(closing as i64 - current_minutes as i64)
}

// "H:MM" 或 "HH:MM" 轉成午夜起算分鐘數
fn time_to_minutes(s: &str) -> Option<u32> {
    let (h, m) = s.trim().split_once(':')?;
    let h: u32 = h.trim().parse().ok()?;
    let m: u32 = m.trim().parse().ok()?;
    Some(h * 60 + m)
}
