// ==========================================
// 机场运行状态引擎 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 任何错误返回前不得修改状态
// ==========================================

use crate::domain::types::RunwayId;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    // ===== 输入校验 =====
    #[error("数据验证失败: {0}")]
    ValidationError(String),

    // ===== 唯一性 =====
    #[error("航班号重复: {flight_number}")]
    DuplicateFlight { flight_number: String },

    // ===== 引用不存在 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    // ===== 集合为空 =====
    #[error("没有待分配的航班")]
    EmptyQueue,

    #[error("没有可撤销的取消记录")]
    EmptyStack,

    // ===== 资源耗尽 =====
    #[error("没有空闲跑道{}", next_free_hint(.next_free_in_minutes))]
    NoRunwayAvailable { next_free_in_minutes: Option<i64> },
}

fn next_free_hint(minutes: &Option<i64>) -> String {
    match minutes {
        Some(m) => format!("（预计约 {} 分钟后释放）", m),
        None => String::new(),
    }
}

impl EngineError {
    pub fn flight_not_found(flight_number: &str) -> Self {
        EngineError::NotFound {
            entity: "Flight".to_string(),
            id: flight_number.to_string(),
        }
    }

    pub fn runway_not_found(runway_id: RunwayId) -> Self {
        EngineError::NotFound {
            entity: "Runway".to_string(),
            id: runway_id.to_string(),
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
