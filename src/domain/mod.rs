// ==========================================
// 机场运行状态引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含引擎逻辑
// ==========================================

pub mod action_log;
pub mod flight;
pub mod route;
pub mod runway;
pub mod types;

// 重导出核心类型
pub use action_log::{ActionLog, ActionType};
pub use flight::{Flight, FlightDraft, FlightView};
pub use route::{Connectivity, GraphListing, RouteEdge};
pub use runway::{Runway, RunwayView};
pub use types::{normalize_airport_code, normalize_flight_number, FlightStatus, RunwayId};
