// ==========================================
// 机场运行状态引擎 - 引擎层事件发布
// ==========================================
// 职责: 定义状态变更事件发布 trait，实现依赖倒置
// 说明: Engine 层定义 trait，传输层/宿主实现适配器
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;

// ==========================================
// 事件类型
// ==========================================

/// 状态变更事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AirportEventType {
    /// 排队区变更（登记/取消/撤销）
    ScheduleChanged,
    /// 跑道占用变更
    RunwayChanged,
    /// 航线网络变更
    RouteNetworkChanged,
}

impl AirportEventType {
    pub fn as_str(&self) -> &str {
        match self {
            AirportEventType::ScheduleChanged => "ScheduleChanged",
            AirportEventType::RunwayChanged => "RunwayChanged",
            AirportEventType::RouteNetworkChanged => "RouteNetworkChanged",
        }
    }
}

/// 状态变更事件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportEvent {
    pub event_type: AirportEventType,
    /// 事件来源描述（如 "cancel_flight: AA101"）
    pub source: Option<String>,
    pub occurred_at: NaiveDateTime,
}

impl AirportEvent {
    pub fn new(
        event_type: AirportEventType,
        source: impl Into<String>,
        occurred_at: NaiveDateTime,
    ) -> Self {
        Self {
            event_type,
            source: Some(source.into()),
            occurred_at,
        }
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 状态变更事件发布者 Trait
///
/// 发布失败只记录告警，不回滚已提交的动作
pub trait AirportEventPublisher: Send + Sync {
    fn publish(&self, event: AirportEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// 空操作事件发布者
///
/// 用于不需要事件发布的场景（如单元测试）
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl AirportEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: AirportEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::debug!(
            "NoOpEventPublisher: 跳过事件发布 - event_type={}",
            event.event_type.as_str()
        );
        Ok(())
    }
}

/// 可选的事件发布者包装
pub struct OptionalEventPublisher {
    inner: Option<Arc<dyn AirportEventPublisher>>,
}

impl OptionalEventPublisher {
    pub fn with_publisher(publisher: Arc<dyn AirportEventPublisher>) -> Self {
        Self {
            inner: Some(publisher),
        }
    }

    pub fn none() -> Self {
        Self { inner: None }
    }

    /// 发布事件（如果有发布者）
    pub fn publish(&self, event: AirportEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        match &self.inner {
            Some(publisher) => publisher.publish(event),
            None => Ok(()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

impl Default for OptionalEventPublisher {
    fn default() -> Self {
        Self::none()
    }
}
