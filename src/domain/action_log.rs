// ==========================================
// 机场运行状态引擎 - 操作日志领域模型
// ==========================================
// 红线: 所有成功的写操作必须记录
// 用途: 审计追踪
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

// ==========================================
// ActionLog - 操作日志
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    pub action_id: String,         // 日志ID (uuid v4)
    pub action_type: ActionType,   // 操作类型
    pub action_ts: NaiveDateTime,  // 操作时间戳

    // ===== 操作负载 =====
    pub payload_json: Option<JsonValue>, // 操作参数 (JSON)

    pub detail: Option<String>, // 详细描述
}

impl ActionLog {
    pub fn new(
        action_type: ActionType,
        action_ts: NaiveDateTime,
        payload_json: Option<JsonValue>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            action_id: uuid::Uuid::new_v4().to_string(),
            action_type,
            action_ts,
            payload_json,
            detail: Some(detail.into()),
        }
    }
}

// ==========================================
// ActionType - 操作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    AddFlight,       // 登记航班
    CancelFlight,    // 取消航班
    UndoCancel,      // 撤销取消
    AssignRunway,    // 分配跑道
    ReleaseRunway,   // 释放跑道
    ReleaseDeparted, // 批量释放已离场航班
    AddAirport,      // 新增机场
    AddRoute,        // 新增航线
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::AddFlight => "ADD_FLIGHT",
            ActionType::CancelFlight => "CANCEL_FLIGHT",
            ActionType::UndoCancel => "UNDO_CANCEL",
            ActionType::AssignRunway => "ASSIGN_RUNWAY",
            ActionType::ReleaseRunway => "RELEASE_RUNWAY",
            ActionType::ReleaseDeparted => "RELEASE_DEPARTED",
            ActionType::AddAirport => "ADD_AIRPORT",
            ActionType::AddRoute => "ADD_ROUTE",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
