// ==========================================
// 机场运行状态引擎 - 领域类型定义
// ==========================================
// 职责: 航班状态枚举、航班号/机场代码规范化
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 航班状态 (Flight Status)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与前端一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightStatus {
    Waiting,        // 排队等待分配跑道
    RunwayAssigned, // 已占用跑道
    Cancelled,      // 已取消（位于取消栈）
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightStatus::Waiting => write!(f, "WAITING"),
            FlightStatus::RunwayAssigned => write!(f, "RUNWAY_ASSIGNED"),
            FlightStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

// ==========================================
// 跑道编号
// ==========================================
pub type RunwayId = u32;

// ==========================================
// 规范化工具
// ==========================================

/// 规范化航班号（去首尾空白 + 大写）
///
/// 规范化后为空字符串表示输入无效，由调用方决定如何报错
pub fn normalize_flight_number(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// 规范化机场代码（去首尾空白 + 大写）
pub fn normalize_airport_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}
