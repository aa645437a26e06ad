// ==========================================
// 机场运行状态引擎 - 航班领域模型
// ==========================================
// 红线: 同一航班号在 排队区/跑道/取消栈 中至多出现一次
// ==========================================

use crate::domain::types::{FlightStatus, RunwayId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// FlightDraft - 待登记航班（未分配插入序号）
// ==========================================
// 用途: addFlight 的输入，字段尚未校验
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightDraft {
    pub flight_number: String,                 // 航班号（原始输入）
    pub destination: String,                   // 目的地（原始输入）
    pub departure_time: Option<NaiveDateTime>, // 计划起飞时间 (None 表示未填写)
    pub emergency: bool,                       // 是否紧急航班
}

impl FlightDraft {
    pub fn new(
        flight_number: impl Into<String>,
        destination: impl Into<String>,
        departure_time: NaiveDateTime,
        emergency: bool,
    ) -> Self {
        Self {
            flight_number: flight_number.into(),
            destination: destination.into(),
            departure_time: Some(departure_time),
            emergency,
        }
    }
}

// ==========================================
// Flight - 已登记航班
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    // ===== 主键 =====
    pub flight_number: String, // 航班号（已规范化）

    // ===== 业务字段 =====
    pub destination: String,
    pub departure_time: NaiveDateTime,
    pub emergency: bool,

    // ===== 排序辅助 =====
    pub insertion_sequence: u64, // 登记序号，仅用于同优先级排序
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.emergency { "EMERGENCY" } else { "NORMAL" };
        write!(
            f,
            "{} -> {} ({}) {}",
            self.flight_number,
            self.destination,
            kind,
            self.departure_time.format("%Y-%m-%d %H:%M")
        )
    }
}

// ==========================================
// FlightView - 航班视图（listFlights 输出）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightView {
    pub flight_number: String,
    pub destination: String,
    pub departure_time: NaiveDateTime,
    pub emergency: bool,
    pub assigned_runway: Option<RunwayId>, // 排队中为 None
    pub status: FlightStatus,
}

impl FlightView {
    pub fn from_flight(
        flight: &Flight,
        assigned_runway: Option<RunwayId>,
        status: FlightStatus,
    ) -> Self {
        Self {
            flight_number: flight.flight_number.clone(),
            destination: flight.destination.clone(),
            departure_time: flight.departure_time,
            emergency: flight.emergency,
            assigned_runway,
            status,
        }
    }
}
