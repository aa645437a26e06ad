// ==========================================
// 机场运行状态引擎 - 航班排队调度器
// ==========================================
// 职责: 按优先级维护待分配跑道的航班序列
// 红线: 序列任何时刻都保持有序（不做惰性排序）
// ==========================================

use crate::domain::flight::{Flight, FlightDraft};
use crate::domain::types::normalize_flight_number;
use crate::engine::error::{EngineError, EngineResult};
use std::cmp::Ordering;
use tracing::debug;

// ==========================================
// 比较方法
// ==========================================

/// 比较两个航班的优先级
///
/// 排序键:
/// 1. emergency 优先
/// 2. departure_time 升序
/// 3. insertion_sequence 升序（先登记者优先）
///
/// # 返回
/// Ordering::Less 表示 a 优先于 b
pub fn priority_cmp(a: &Flight, b: &Flight) -> Ordering {
    // 1. 紧急航班优先
    match b.emergency.cmp(&a.emergency) {
        Ordering::Equal => {}
        other => return other,
    }

    // 2. 起飞时间升序
    match a.departure_time.cmp(&b.departure_time) {
        Ordering::Equal => {}
        other => return other,
    }

    // 3. 登记序号升序
    a.insertion_sequence.cmp(&b.insertion_sequence)
}

// ==========================================
// FlightScheduler - 航班排队调度器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct FlightScheduler {
    flights: Vec<Flight>,
    next_sequence: u64,
}

impl FlightScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================
    // 写操作
    // ==========================================

    /// 登记新航班
    ///
    /// # 参数
    /// - `draft`: 待登记航班
    ///
    /// # 返回
    /// - `Ok(&Flight)`: 已插入的航班（已规范化、已分配序号）
    /// - `Err(ValidationError)`: 航班号/目的地/起飞时间缺失
    /// - `Err(DuplicateFlight)`: 航班号已在排队区
    ///
    /// 跨组件（跑道、取消栈）的重复检查由 AirportStateMachine 负责
    pub fn add(&mut self, draft: FlightDraft) -> EngineResult<&Flight> {
        let flight = self.validate(draft)?;
        if self.contains(&flight.flight_number) {
            return Err(EngineError::DuplicateFlight {
                flight_number: flight.flight_number,
            });
        }

        let flight = Flight {
            insertion_sequence: self.next_sequence,
            ..flight
        };
        self.next_sequence += 1;
        let index = self.insert_sorted(flight);
        Ok(&self.flights[index])
    }

    /// 校验并规范化输入，不修改状态
    pub fn validate(&self, draft: FlightDraft) -> EngineResult<Flight> {
        let flight_number = normalize_flight_number(&draft.flight_number);
        if flight_number.is_empty() {
            return Err(EngineError::ValidationError("航班号不能为空".to_string()));
        }

        let destination = draft.destination.trim().to_string();
        if destination.is_empty() {
            return Err(EngineError::ValidationError("目的地不能为空".to_string()));
        }

        let departure_time = draft
            .departure_time
            .ok_or_else(|| EngineError::ValidationError("起飞时间不能为空".to_string()))?;

        Ok(Flight {
            flight_number,
            destination,
            departure_time,
            emergency: draft.emergency,
            insertion_sequence: 0,
        })
    }

    /// 按航班号移除航班，其余航班相对顺序不变
    pub fn remove_by_number(&mut self, flight_number: &str) -> EngineResult<Flight> {
        let key = normalize_flight_number(flight_number);
        let index = self
            .flights
            .iter()
            .position(|f| f.flight_number == key)
            .ok_or_else(|| EngineError::flight_not_found(&key))?;
        Ok(self.flights.remove(index))
    }

    /// 取出最高优先级航班
    pub fn pop_front(&mut self) -> EngineResult<Flight> {
        if self.flights.is_empty() {
            return Err(EngineError::EmptyQueue);
        }
        Ok(self.flights.remove(0))
    }

    /// 重新插入航班（撤销取消时使用）
    ///
    /// 保留原登记序号；调用方保证该航班已从其他持有者中移除
    pub fn reinsert(&mut self, flight: Flight) {
        debug!(flight_number = %flight.flight_number, "重新插入航班");
        self.insert_sorted(flight);
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn peek_front(&self) -> EngineResult<&Flight> {
        self.flights.first().ok_or(EngineError::EmptyQueue)
    }

    pub fn contains(&self, flight_number: &str) -> bool {
        self.flights.iter().any(|f| f.flight_number == flight_number)
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// 检查序列是否严格有序
    pub fn is_sorted(&self) -> bool {
        self.flights
            .windows(2)
            .all(|w| priority_cmp(&w[0], &w[1]) == Ordering::Less)
    }

    // ==========================================
    // 内部方法
    // ==========================================

    /// 二分查找插入位置（上界），返回插入下标
    fn insert_sorted(&mut self, flight: Flight) -> usize {
        let index = self
            .flights
            .partition_point(|existing| priority_cmp(existing, &flight) != Ordering::Greater);
        self.flights.insert(index, flight);
        index
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 20)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn draft(number: &str, hour: u32, emergency: bool) -> FlightDraft {
        FlightDraft::new(number, "LAX", at(hour, 0), emergency)
    }

    fn numbers(scheduler: &FlightScheduler) -> Vec<&str> {
        scheduler
            .flights()
            .iter()
            .map(|f| f.flight_number.as_str())
            .collect()
    }

    // ==========================================
    // 排序测试
    // ==========================================

    #[test]
    fn test_emergency_before_earlier_normal() {
        let mut scheduler = FlightScheduler::new();
        scheduler.add(draft("EM1", 10, true)).unwrap();
        scheduler.add(draft("N1", 9, false)).unwrap();

        assert_eq!(numbers(&scheduler), vec!["EM1", "N1"]);
    }

    #[test]
    fn test_departure_time_then_insertion_order() {
        let mut scheduler = FlightScheduler::new();
        scheduler.add(draft("B", 9, false)).unwrap();
        scheduler.add(draft("A", 8, false)).unwrap();
        scheduler.add(draft("C", 9, false)).unwrap();
        scheduler.add(draft("E2", 23, true)).unwrap();
        scheduler.add(draft("E1", 21, true)).unwrap();

        assert_eq!(numbers(&scheduler), vec!["E1", "E2", "A", "B", "C"]);
        assert!(scheduler.is_sorted());
    }

    #[test]
    fn test_add_normalizes_and_assigns_sequence() {
        let mut scheduler = FlightScheduler::new();
        let first = scheduler.add(draft(" aa101 ", 9, false)).unwrap().clone();
        let second = scheduler.add(draft("ba202", 9, false)).unwrap().clone();

        assert_eq!(first.flight_number, "AA101");
        assert_eq!(first.insertion_sequence, 0);
        assert_eq!(second.insertion_sequence, 1);
    }

    // ==========================================
    // 校验测试
    // ==========================================

    #[test]
    fn test_add_rejects_missing_fields() {
        let mut scheduler = FlightScheduler::new();

        let err = scheduler.add(draft("  ", 9, false)).unwrap_err();
        assert!(matches!(err, EngineError::ValidationError(_)));

        let err = scheduler
            .add(FlightDraft::new("AA1", "   ", at(9, 0), false))
            .unwrap_err();
        assert!(matches!(err, EngineError::ValidationError(_)));

        let mut no_time = draft("AA1", 9, false);
        no_time.departure_time = None;
        let err = scheduler.add(no_time).unwrap_err();
        assert!(matches!(err, EngineError::ValidationError(_)));

        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_add_rejects_duplicate_case_insensitive() {
        let mut scheduler = FlightScheduler::new();
        scheduler.add(draft("AA101", 9, false)).unwrap();

        let err = scheduler.add(draft("aa101", 10, true)).unwrap_err();
        assert_eq!(
            err,
            EngineError::DuplicateFlight {
                flight_number: "AA101".to_string()
            }
        );
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_failed_add_does_not_consume_sequence() {
        let mut scheduler = FlightScheduler::new();
        scheduler.add(draft("A", 9, false)).unwrap();
        let _ = scheduler.add(draft("", 9, false));
        let b = scheduler.add(draft("B", 9, false)).unwrap();
        assert_eq!(b.insertion_sequence, 1);
    }

    // ==========================================
    // 移除/取出测试
    // ==========================================

    #[test]
    fn test_remove_by_number_preserves_order() {
        let mut scheduler = FlightScheduler::new();
        for (n, h) in [("A", 8), ("B", 9), ("C", 10)] {
            scheduler.add(draft(n, h, false)).unwrap();
        }

        let removed = scheduler.remove_by_number("b").unwrap();
        assert_eq!(removed.flight_number, "B");
        assert_eq!(numbers(&scheduler), vec!["A", "C"]);

        let err = scheduler.remove_by_number("B").unwrap_err();
        assert_eq!(err, EngineError::flight_not_found("B"));
    }

    #[test]
    fn test_pop_and_peek_on_empty() {
        let mut scheduler = FlightScheduler::new();
        assert_eq!(scheduler.peek_front().unwrap_err(), EngineError::EmptyQueue);
        assert_eq!(scheduler.pop_front().unwrap_err(), EngineError::EmptyQueue);

        scheduler.add(draft("A", 8, false)).unwrap();
        assert_eq!(scheduler.peek_front().unwrap().flight_number, "A");
        assert_eq!(scheduler.pop_front().unwrap().flight_number, "A");
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_reinsert_restores_comparator_slot() {
        let mut scheduler = FlightScheduler::new();
        for (n, h) in [("A", 8), ("B", 9), ("C", 10)] {
            scheduler.add(draft(n, h, false)).unwrap();
        }

        let b = scheduler.remove_by_number("B").unwrap();
        scheduler.add(draft("D", 9, false)).unwrap();
        scheduler.reinsert(b);

        // B 与 D 同一时刻，B 登记更早
        assert_eq!(numbers(&scheduler), vec!["A", "B", "D", "C"]);
        assert!(scheduler.is_sorted());
    }
}
