use serde::Serialize;

use crate::api::ApiError;

/// 错误响应结构
#[derive(Debug, Serialize)]
pub(super) struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,

    /// 详细信息（可选）
    pub details: Option<serde_json::Value>,
}

/// 错误代码（供调用方按类型分支）
pub fn error_code(err: &ApiError) -> &'static str {
    match err {
        ApiError::ValidationError(_) => "VALIDATION_ERROR",
        ApiError::DuplicateFlight(_) => "DUPLICATE_FLIGHT",
        ApiError::NotFound(_) => "NOT_FOUND",
        ApiError::EmptyQueue => "EMPTY_QUEUE",
        ApiError::EmptyStack => "EMPTY_STACK",
        ApiError::NoRunwayAvailable { .. } => "NO_RUNWAY_AVAILABLE",
        ApiError::InvalidInput(_) => "INVALID_INPUT",
        ApiError::InternalError(_) => "INTERNAL_ERROR",
    }
}

/// 将ApiError转换为JSON字符串
pub(super) fn map_api_error(err: ApiError) -> String {
    let error_response = ErrorResponse {
        code: error_code(&err).to_string(),
        message: err.to_string(),
        details: match &err {
            ApiError::NoRunwayAvailable {
                next_free_in_minutes,
            } => Some(serde_json::json!({ "next_free_in_minutes": next_free_in_minutes })),
            _ => None,
        },
    };

    serde_json::to_string(&error_response).unwrap_or_else(|_| {
        format!(
            r#"{{"code":"{}","message":"","details":null}}"#,
            error_code(&err)
        )
    })
}

/// 序列化命令结果；失败时返回 INTERNAL_ERROR 响应
pub(super) fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value)
        .map_err(|e| map_api_error(ApiError::InternalError(format!("序列化失败: {}", e))))
}
