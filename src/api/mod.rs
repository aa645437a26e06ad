// ==========================================
// 机场运行状态引擎 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令层调用
// ==========================================

pub mod airport_api;
pub mod error;
pub mod validator;

// 重导出核心类型
pub use airport_api::{local_clock, AddFlightRequest, AirportApi, Clock};
pub use error::{ApiError, ApiResult};
pub use validator::{build_flight_draft, parse_departure_time};
