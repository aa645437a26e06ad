use crate::app::state::AppState;
use crate::domain::types::RunwayId;

use super::common::{map_api_error, to_json};

// ==========================================
// 跑道相关命令
// ==========================================

/// 为最高优先级航班分配跑道
pub async fn assign_runway(state: &AppState) -> Result<String, String> {
    let outcome = state.airport_api.assign_runway().map_err(map_api_error)?;
    to_json(&outcome)
}

/// 释放跑道（空闲跑道释放为无操作）
pub async fn release_runway(state: &AppState, runway_id: RunwayId) -> Result<String, String> {
    let outcome = state
        .airport_api
        .release_runway(runway_id)
        .map_err(map_api_error)?;

    to_json(&outcome)
}

pub async fn release_departed(state: &AppState) -> Result<String, String> {
    let outcome = state
        .airport_api
        .release_departed()
        .map_err(map_api_error)?;

    to_json(&outcome)
}

pub async fn list_runways(state: &AppState) -> Result<String, String> {
    let result = state.airport_api.list_runways().map_err(map_api_error)?;
    to_json(&result)
}
