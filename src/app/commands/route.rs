use crate::app::state::AppState;

use super::common::{map_api_error, to_json};

// ==========================================
// 航线网络相关命令
// ==========================================

pub async fn add_airport(state: &AppState, code: String) -> Result<String, String> {
    let outcome = state
        .airport_api
        .add_airport(&code)
        .map_err(map_api_error)?;

    to_json(&outcome)
}

/// 添加双向航线（端点不存在时自动创建）
pub async fn add_route(state: &AppState, from: String, to: String) -> Result<String, String> {
    let outcome = state
        .airport_api
        .add_route(&from, &to)
        .map_err(map_api_error)?;

    to_json(&outcome)
}

pub async fn list_graph(state: &AppState) -> Result<String, String> {
    let result = state.airport_api.list_graph().map_err(map_api_error)?;
    to_json(&result)
}

/// 连通性查询，连通时附带一条最少经停路径
pub async fn is_connected(state: &AppState, from: String, to: String) -> Result<String, String> {
    let result = state
        .airport_api
        .is_connected(&from, &to)
        .map_err(map_api_error)?;

    to_json(&result)
}

pub async fn shortest_route(state: &AppState, from: String, to: String) -> Result<String, String> {
    let result = state
        .airport_api
        .shortest_route(&from, &to)
        .map_err(map_api_error)?;

    to_json(&result)
}
