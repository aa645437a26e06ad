// ==========================================
// 机场运行状态引擎 - 核心库
// ==========================================
// 组件: 航班排队 / 跑道分配 / 取消撤销 / 航线网络
// 约束: 单写者，所有动作经状态机分派，要么完整生效要么完整拒绝
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 耗时统计
pub mod perf;

// API 层 - 业务接口
pub mod api;

// 应用层 - 命令分派
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{FlightStatus, RunwayId};

// 领域实体
pub use domain::{
    ActionLog, ActionType, Connectivity, Flight, FlightDraft, FlightView, GraphListing, Runway,
    RunwayView,
};

// 引擎
pub use engine::{
    AirportAction, AirportStateMachine, CancellationStack, EngineError, FlightScheduler,
    RouteGraph, RunwayAllocator,
};

// API
pub use api::{AirportApi, ApiError};

// 配置
pub use config::AirportConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "机场运行状态引擎";
