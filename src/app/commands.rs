// ==========================================
// 机场运行状态引擎 - 命令层（按域拆分）
// ==========================================
// 职责: 解析单行 JSON 命令，调用 API，返回 JSON 响应
// 协议: 请求 {"op": "...", ...}
//       响应 {"ok": true, "data": ...} 或 {"ok": false, "error": {code, message, details}}
// ==========================================

mod common;
mod flight;
mod route;
mod runway;
mod status;

pub use common::error_code;
pub use flight::*;
pub use route::*;
pub use runway::*;
pub use status::*;

use serde::Deserialize;

use crate::api::{AddFlightRequest, ApiError};
use crate::app::state::AppState;
use crate::domain::types::RunwayId;

fn default_log_limit() -> usize {
    50
}

/// 命令请求
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CommandRequest {
    AddFlight(AddFlightRequest),
    CancelFlight {
        #[serde(alias = "flight_no")]
        flight_number: String,
    },
    UndoCancel,
    ListFlights,
    ListAllFlights,
    ListCancelled,
    AssignRunway,
    ReleaseRunway {
        runway_id: RunwayId,
    },
    ReleaseDeparted,
    ListRunways,
    AddAirport {
        code: String,
    },
    AddRoute {
        from: String,
        to: String,
    },
    ListGraph,
    IsConnected {
        from: String,
        to: String,
    },
    ShortestRoute {
        from: String,
        to: String,
    },
    StatusSummary,
    Snapshot,
    ListActionLogs {
        #[serde(default = "default_log_limit")]
        limit: usize,
    },
}

/// 执行已解析的命令
///
/// # 返回
/// - Ok(String): 结果 JSON
/// - Err(String): ErrorResponse JSON
pub async fn execute(state: &AppState, request: CommandRequest) -> Result<String, String> {
    match request {
        CommandRequest::AddFlight(req) => add_flight(state, req).await,
        CommandRequest::CancelFlight { flight_number } => cancel_flight(state, flight_number).await,
        CommandRequest::UndoCancel => undo_cancel(state).await,
        CommandRequest::ListFlights => list_flights(state).await,
        CommandRequest::ListAllFlights => list_all_flights(state).await,
        CommandRequest::ListCancelled => list_cancelled(state).await,
        CommandRequest::AssignRunway => assign_runway(state).await,
        CommandRequest::ReleaseRunway { runway_id } => release_runway(state, runway_id).await,
        CommandRequest::ReleaseDeparted => release_departed(state).await,
        CommandRequest::ListRunways => list_runways(state).await,
        CommandRequest::AddAirport { code } => add_airport(state, code).await,
        CommandRequest::AddRoute { from, to } => add_route(state, from, to).await,
        CommandRequest::ListGraph => list_graph(state).await,
        CommandRequest::IsConnected { from, to } => is_connected(state, from, to).await,
        CommandRequest::ShortestRoute { from, to } => shortest_route(state, from, to).await,
        CommandRequest::StatusSummary => status_summary(state).await,
        CommandRequest::Snapshot => snapshot(state).await,
        CommandRequest::ListActionLogs { limit } => list_action_logs(state, limit).await,
    }
}

/// 错误响应行
pub fn error_line(err: ApiError) -> String {
    format!(r#"{{"ok":false,"error":{}}}"#, common::map_api_error(err))
}

/// 处理一行命令文本，返回一行响应文本
pub async fn handle_command(state: &AppState, line: &str) -> String {
    let request: CommandRequest = match serde_json::from_str(line.trim()) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("无法解析命令: {}", e);
            return error_line(ApiError::InvalidInput(format!("无法解析命令: {}", e)));
        }
    };

    match execute(state, request).await {
        Ok(data) => format!(r#"{{"ok":true,"data":{}}}"#, data),
        Err(err) => format!(r#"{{"ok":false,"error":{}}}"#, err),
    }
}
