// ==========================================
// 机场运行状态引擎 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::error::Error;
use std::sync::Arc;

use crate::api::{ApiResult, AirportApi, Clock};
use crate::config::AirportConfig;
use crate::engine::{AirportEvent, AirportEventPublisher, OptionalEventPublisher};

/// 应用状态
///
/// 包含API实例和启动配置，可在多个任务间通过 Arc 共享
pub struct AppState {
    /// 启动配置
    pub config: AirportConfig,

    /// 机场运行API
    pub airport_api: Arc<AirportApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - config: 已校验的配置
    ///
    /// # 返回
    /// - Ok(AppState): 成功创建
    /// - Err(ApiError): 种子航线非法等初始化错误
    pub fn new(config: AirportConfig) -> ApiResult<Self> {
        tracing::info!("初始化AppState，跑道数量: {}", config.runway_count);

        let publisher =
            OptionalEventPublisher::with_publisher(Arc::new(TracingEventPublisher));
        let airport_api = Arc::new(AirportApi::new(&config, publisher)?);

        tracing::info!("AppState初始化完成");
        Ok(Self {
            config,
            airport_api,
        })
    }

    /// 使用注入时钟创建（测试用固定时间）
    pub fn with_clock(config: AirportConfig, clock: Clock) -> ApiResult<Self> {
        let airport_api = Arc::new(AirportApi::with_clock(
            &config,
            OptionalEventPublisher::none(),
            clock,
        )?);
        Ok(Self {
            config,
            airport_api,
        })
    }
}

/// 将状态变更事件写入日志
pub struct TracingEventPublisher;

impl AirportEventPublisher for TracingEventPublisher {
    fn publish(&self, event: AirportEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::info!(
            target: "airport_events",
            event_type = event.event_type.as_str(),
            source = event.source.as_deref().unwrap_or(""),
            occurred_at = %event.occurred_at,
            "state changed"
        );
        Ok(())
    }
}
