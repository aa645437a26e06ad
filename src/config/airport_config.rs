// ==========================================
// 机场运行状态引擎 - 配置管理
// ==========================================
// 职责: 配置加载（JSON 文件 + 环境变量覆写）、校验
// 环境变量:
// - AIRPORT_OPS_CONFIG: JSON 配置文件路径
// - AIRPORT_OPS_RUNWAYS: 跑道数量覆写
// ==========================================

use crate::domain::types::normalize_airport_code;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "AIRPORT_OPS_CONFIG";
pub const RUNWAYS_ENV: &str = "AIRPORT_OPS_RUNWAYS";

/// 默认跑道数量
pub const DEFAULT_RUNWAY_COUNT: u32 = 3;

/// 默认操作日志保留条数
pub const DEFAULT_ACTION_LOG_CAPACITY: usize = 500;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("环境变量 {key} 无效: {value}")]
    InvalidEnv { key: String, value: String },

    #[error("配置无效: {0}")]
    Invalid(String),
}

// ==========================================
// AirportConfig - 系统配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirportConfig {
    /// 跑道数量（编号 1..=runway_count）
    pub runway_count: u32,

    /// 启动时登记的孤立机场
    pub seed_airports: Vec<String>,

    /// 启动时登记的航线 [from, to]
    pub seed_routes: Vec<(String, String)>,

    /// 操作日志保留条数（超出后丢弃最旧记录）
    pub action_log_capacity: usize,
}

impl Default for AirportConfig {
    fn default() -> Self {
        Self {
            runway_count: DEFAULT_RUNWAY_COUNT,
            seed_airports: Vec::new(),
            seed_routes: Vec::new(),
            action_log_capacity: DEFAULT_ACTION_LOG_CAPACITY,
        }
    }
}

impl AirportConfig {
    /// 带示例航线网络的配置
    pub fn sample_network() -> Self {
        let routes = [
            ("JFK", "LAX"),
            ("JFK", "LHR"),
            ("LAX", "SFO"),
            ("LHR", "CDG"),
            ("SFO", "NRT"),
            ("CDG", "FRA"),
        ];
        Self {
            seed_routes: routes
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// 从 JSON 文件加载（缺省字段取默认值）
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: AirportConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 应用跑道数量覆写
    pub fn with_runway_override(mut self, raw: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(value) = raw {
            self.runway_count = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: RUNWAYS_ENV.to_string(),
                value: value.to_string(),
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runway_count == 0 {
            return Err(ConfigError::Invalid("runway_count 必须大于 0".to_string()));
        }
        for code in &self.seed_airports {
            if normalize_airport_code(code).is_empty() {
                return Err(ConfigError::Invalid("seed_airports 含空机场代码".to_string()));
            }
        }
        for (from, to) in &self.seed_routes {
            let a = normalize_airport_code(from);
            let b = normalize_airport_code(to);
            if a.is_empty() || b.is_empty() || a == b {
                return Err(ConfigError::Invalid(format!(
                    "seed_routes 含无效航线: {} -> {}",
                    from, to
                )));
            }
        }
        Ok(())
    }
}

// ==========================================
// ConfigLoader - 配置加载器
// ==========================================
pub struct ConfigLoader;

impl ConfigLoader {
    /// 按 环境变量文件 -> 默认值 -> 跑道数量覆写 的顺序加载
    pub fn load() -> Result<AirportConfig, ConfigError> {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                tracing::info!("加载配置文件: {}", path);
                AirportConfig::from_file(path.trim())?
            }
            _ => AirportConfig::default(),
        };
        let runways = std::env::var(RUNWAYS_ENV).ok();
        base.with_runway_override(runways.as_deref())
    }
}
