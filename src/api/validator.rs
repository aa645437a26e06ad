// ==========================================
// 机场运行状态引擎 - 输入解析与校验
// ==========================================
// 职责: 将传输层的字符串输入转换为引擎输入
// 说明: 字段缺失交由引擎报 ValidationError，格式错误在此报 ValidationError
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::flight::FlightDraft;
use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime};

/// 支持的日期时间格式（按顺序尝试）
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// 解析起飞时间
///
/// 支持:
/// - RFC 3339（保留原时区的墙上时间）
/// - `YYYY-MM-DDTHH:MM[:SS]` / `YYYY-MM-DD HH:MM[:SS]`
/// - `HH:MM`：取当天该时刻，若不晚于 `now` 则顺延一天
///
/// # 返回
/// - Ok(None): 输入为空
/// - Ok(Some(ts)): 解析成功
/// - Err(ApiError::ValidationError): 格式错误
pub fn parse_departure_time(raw: &str, now: NaiveDateTime) -> ApiResult<Option<NaiveDateTime>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(dt.naive_local()));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(Some(ts));
        }
    }

    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M") {
        let mut ts = now.date().and_time(time);
        if ts <= now {
            ts += Duration::days(1);
        }
        return Ok(Some(ts));
    }

    Err(ApiError::ValidationError(format!(
        "起飞时间格式错误（应为 HH:MM 或 YYYY-MM-DDTHH:MM）: {}",
        raw
    )))
}

/// 构造待登记航班
pub fn build_flight_draft(
    flight_number: &str,
    destination: &str,
    departure_time: &str,
    emergency: bool,
    now: NaiveDateTime,
) -> ApiResult<FlightDraft> {
    Ok(FlightDraft {
        flight_number: flight_number.to_string(),
        destination: destination.to_string(),
        departure_time: parse_departure_time(departure_time, now)?,
        emergency,
    })
}
