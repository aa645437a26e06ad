// ==========================================
// 机场运行状态引擎 - 跑道领域模型
// ==========================================
// 红线: 跑道数量初始化后固定，只切换占用状态
// ==========================================

use crate::domain::flight::Flight;
use crate::domain::types::RunwayId;
use serde::{Deserialize, Serialize};

// ==========================================
// Runway - 跑道
// ==========================================
// 占用状态由 assigned 派生: occupied ⇔ assigned.is_some()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runway {
    pub id: RunwayId,
    assigned: Option<Flight>,
}

impl Runway {
    pub fn new(id: RunwayId) -> Self {
        Self { id, assigned: None }
    }

    pub fn is_occupied(&self) -> bool {
        self.assigned.is_some()
    }

    pub fn assigned_flight(&self) -> Option<&Flight> {
        self.assigned.as_ref()
    }

    pub fn assigned_flight_number(&self) -> Option<&str> {
        self.assigned.as_ref().map(|f| f.flight_number.as_str())
    }

    /// 占用跑道
    ///
    /// 调用方保证跑道空闲；返回被替换的航班（正常流程应为 None）
    pub(crate) fn occupy(&mut self, flight: Flight) -> Option<Flight> {
        self.assigned.replace(flight)
    }

    /// 释放跑道，返回离场航班
    pub(crate) fn vacate(&mut self) -> Option<Flight> {
        self.assigned.take()
    }
}

// ==========================================
// RunwayView - 跑道状态视图（对外输出）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunwayView {
    pub runway_id: RunwayId,
    pub occupied: bool,
    pub flight_number: Option<String>,
}

impl From<&Runway> for RunwayView {
    fn from(runway: &Runway) -> Self {
        Self {
            runway_id: runway.id,
            occupied: runway.is_occupied(),
            flight_number: runway.assigned_flight_number().map(str::to_string),
        }
    }
}
