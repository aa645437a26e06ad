// ==========================================
// 机场运行状态引擎 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换引擎错误为用户友好的错误消息
// ==========================================

use crate::engine::error::EngineError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("航班号已存在: {0}")]
    DuplicateFlight(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("没有待分配的航班")]
    EmptyQueue,

    #[error("没有可撤销的取消记录")]
    EmptyStack,

    #[error("所有跑道均被占用{}", next_free_hint(.next_free_in_minutes))]
    NoRunwayAvailable { next_free_in_minutes: Option<i64> },

    // ==========================================
    // 传输层错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

fn next_free_hint(minutes: &Option<i64>) -> String {
    match minutes {
        Some(m) => format!("，预计约 {} 分钟后有跑道释放", m),
        None => String::new(),
    }
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::ValidationError(msg) => ApiError::ValidationError(msg),
            EngineError::DuplicateFlight { flight_number } => {
                ApiError::DuplicateFlight(flight_number)
            }
            EngineError::NotFound { entity, id } => {
                let entity = match entity.as_str() {
                    "Flight" => "排队航班",
                    "Runway" => "跑道",
                    other => other,
                };
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            EngineError::EmptyQueue => ApiError::EmptyQueue,
            EngineError::EmptyStack => ApiError::EmptyStack,
            EngineError::NoRunwayAvailable {
                next_free_in_minutes,
            } => ApiError::NoRunwayAvailable {
                next_free_in_minutes,
            },
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
