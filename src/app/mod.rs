// ==========================================
// 机场运行状态引擎 - 应用层
// ==========================================
// 职责: 共享状态与命令分派，连接传输层与 API
// ==========================================

pub mod commands;
pub mod server;
pub mod state;

// 重导出
pub use commands::{error_line, handle_command, CommandRequest};
pub use server::serve;
pub use state::{AppState, TracingEventPublisher};
