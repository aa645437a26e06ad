// ==========================================
// 机场运行状态引擎 - 引擎层
// ==========================================
// 职责: 排队排序、跑道分配、取消撤销、航线连通规则
// 红线: 引擎无 I/O、无阻塞，所有动作同步且有界
// ==========================================

pub mod cancellation;
pub mod error;
pub mod events;
pub mod route_graph;
pub mod runway_allocator;
pub mod scheduler;
pub mod state_machine;

// 重导出核心引擎
pub use cancellation::CancellationStack;
pub use error::{EngineError, EngineResult};
pub use events::{
    AirportEvent, AirportEventPublisher, AirportEventType, NoOpEventPublisher,
    OptionalEventPublisher,
};
pub use route_graph::RouteGraph;
pub use runway_allocator::RunwayAllocator;
pub use scheduler::{priority_cmp, FlightScheduler};
pub use state_machine::{
    ActionOutcome, AirportAction, AirportSnapshot, AirportStateMachine, StatusSummary,
};
