use crate::api::AddFlightRequest;
use crate::app::state::AppState;

use super::common::{map_api_error, to_json};

// ==========================================
// 航班相关命令
// ==========================================

/// 登记航班
pub async fn add_flight(state: &AppState, request: AddFlightRequest) -> Result<String, String> {
    let outcome = state
        .airport_api
        .add_flight(&request)
        .map_err(map_api_error)?;

    to_json(&outcome)
}

/// 取消排队航班
pub async fn cancel_flight(state: &AppState, flight_number: String) -> Result<String, String> {
    let outcome = state
        .airport_api
        .cancel_flight(&flight_number)
        .map_err(map_api_error)?;

    to_json(&outcome)
}

/// 撤销最近一次取消
pub async fn undo_cancel(state: &AppState) -> Result<String, String> {
    let outcome = state.airport_api.undo_cancel().map_err(map_api_error)?;
    to_json(&outcome)
}

/// 航班列表（排队在前，跑道上在后）
pub async fn list_flights(state: &AppState) -> Result<String, String> {
    let result = state.airport_api.list_flights().map_err(map_api_error)?;
    to_json(&result)
}

/// 全部航班（含已取消航班）
pub async fn list_all_flights(state: &AppState) -> Result<String, String> {
    let result = state.airport_api.list_all_flights().map_err(map_api_error)?;
    to_json(&result)
}

pub async fn list_cancelled(state: &AppState) -> Result<String, String> {
    let result = state.airport_api.list_cancelled().map_err(map_api_error)?;
    to_json(&result)
}
