use crate::app::state::AppState;

use super::common::{map_api_error, to_json};

// ==========================================
// 状态与审计相关命令
// ==========================================

pub async fn status_summary(state: &AppState) -> Result<String, String> {
    let result = state.airport_api.status_summary().map_err(map_api_error)?;
    to_json(&result)
}

/// 时点一致的完整快照
pub async fn snapshot(state: &AppState) -> Result<String, String> {
    let result = state.airport_api.snapshot().map_err(map_api_error)?;
    to_json(&result)
}

/// 最近的操作日志（最新在前）
pub async fn list_action_logs(state: &AppState, limit: usize) -> Result<String, String> {
    let result = state
        .airport_api
        .list_action_logs(limit)
        .map_err(map_api_error)?;

    to_json(&result)
}
