// ==========================================
// 机场运行状态引擎 - 跑道分配器
// ==========================================
// 职责: 将排队航班绑定到固定数量的跑道
// 红线: 分配是单一事务，任一前置条件不满足则不做任何修改
// ==========================================

use crate::domain::flight::Flight;
use crate::domain::runway::Runway;
use crate::domain::types::RunwayId;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::scheduler::FlightScheduler;
use chrono::{NaiveDateTime, TimeDelta};
use tracing::info;

// ==========================================
// RunwayAllocator - 跑道分配器
// ==========================================
#[derive(Debug, Clone)]
pub struct RunwayAllocator {
    runways: Vec<Runway>, // 按 id 升序
}

impl RunwayAllocator {
    /// 创建跑道池，编号 1..=count
    pub fn new(count: u32) -> Self {
        Self {
            runways: (1..=count).map(Runway::new).collect(),
        }
    }

    /// 为最高优先级航班分配编号最小的空闲跑道
    ///
    /// # 返回
    /// - `Ok((RunwayId, String))`: 分配的跑道编号与航班号
    /// - `Err(NoRunwayAvailable)`: 所有跑道均被占用
    /// - `Err(EmptyQueue)`: 没有待分配航班
    pub fn assign_next(
        &mut self,
        scheduler: &mut FlightScheduler,
    ) -> EngineResult<(RunwayId, String)> {
        // 前置检查全部完成后才修改状态
        let index = self
            .runways
            .iter()
            .position(|r| !r.is_occupied())
            .ok_or(EngineError::NoRunwayAvailable {
                next_free_in_minutes: None,
            })?;
        scheduler.peek_front()?;

        let flight = scheduler.pop_front()?;
        let runway = &mut self.runways[index];
        info!(
            runway_id = runway.id,
            flight_number = %flight.flight_number,
            "跑道已分配"
        );
        let flight_number = flight.flight_number.clone();
        runway.occupy(flight);
        Ok((runway.id, flight_number))
    }

    /// 释放跑道
    ///
    /// # 返回
    /// - `Ok(Some(Flight))`: 离场航班
    /// - `Ok(None)`: 跑道本就空闲
    /// - `Err(NotFound)`: 跑道编号不存在
    pub fn release(&mut self, runway_id: RunwayId) -> EngineResult<Option<Flight>> {
        let runway = self
            .runways
            .iter_mut()
            .find(|r| r.id == runway_id)
            .ok_or_else(|| EngineError::runway_not_found(runway_id))?;
        Ok(runway.vacate())
    }

    /// 释放所有起飞时间不晚于 `now` 的航班占用的跑道
    ///
    /// # 返回
    /// 已释放的跑道编号（升序）
    pub fn release_departed(&mut self, now: NaiveDateTime) -> Vec<RunwayId> {
        let mut released = Vec::new();
        for runway in &mut self.runways {
            let departed = runway
                .assigned_flight()
                .is_some_and(|f| f.departure_time <= now);
            if departed {
                runway.vacate();
                released.push(runway.id);
            }
        }
        released
    }

    /// 最早释放的跑道距 `now` 还有多少分钟（仅统计起飞时间在未来的航班）
    ///
    /// 不足一分钟按一分钟计
    pub fn minutes_until_next_free(&self, now: NaiveDateTime) -> Option<i64> {
        self.runways
            .iter()
            .filter_map(Runway::assigned_flight)
            .filter(|f| f.departure_time > now)
            .map(|f| ceil_minutes(f.departure_time - now))
            .min()
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn runways(&self) -> &[Runway] {
        &self.runways
    }

    pub fn contains_flight(&self, flight_number: &str) -> bool {
        self.runway_of(flight_number).is_some()
    }

    /// 查询航班所在跑道
    pub fn runway_of(&self, flight_number: &str) -> Option<RunwayId> {
        self.runways
            .iter()
            .find(|r| r.assigned_flight_number() == Some(flight_number))
            .map(|r| r.id)
    }

    pub fn free_count(&self) -> usize {
        self.runways.iter().filter(|r| !r.is_occupied()).count()
    }

    pub fn len(&self) -> usize {
        self.runways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runways.is_empty()
    }
}

fn ceil_minutes(delta: TimeDelta) -> i64 {
    let minutes = delta.num_minutes();
    if delta > TimeDelta::minutes(minutes) {
        minutes + 1
    } else {
        minutes
    }
}
