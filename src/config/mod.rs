// ==========================================
// 机场运行状态引擎 - 配置层
// ==========================================
// 职责: 系统配置加载与校验
// 存储: JSON 文件 + 环境变量
// ==========================================

pub mod airport_config;

// 重导出核心配置
pub use airport_config::{AirportConfig, ConfigError, ConfigLoader};
