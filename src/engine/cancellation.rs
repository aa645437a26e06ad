// ==========================================
// 机场运行状态引擎 - 取消栈
// ==========================================
// 职责: 记录被取消的排队航班，支持后进先出撤销
// 红线: 只有排队区中的航班可以取消，已占用跑道的航班不可取消
// ==========================================

use crate::domain::flight::Flight;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::scheduler::FlightScheduler;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct CancellationStack {
    entries: Vec<Flight>, // 末尾为栈顶
}

impl CancellationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取消排队航班并入栈
    pub fn cancel(
        &mut self,
        scheduler: &mut FlightScheduler,
        flight_number: &str,
    ) -> EngineResult<&Flight> {
        let flight = scheduler.remove_by_number(flight_number)?;
        info!(flight_number = %flight.flight_number, "航班已取消");
        self.entries.push(flight);
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// 撤销最近一次取消，航班按优先级重新插入排队区
    ///
    /// # 返回
    /// 恢复的航班号
    pub fn undo(&mut self, scheduler: &mut FlightScheduler) -> EngineResult<String> {
        let flight = self.entries.pop().ok_or(EngineError::EmptyStack)?;
        let flight_number = flight.flight_number.clone();
        scheduler.reinsert(flight);
        info!(flight_number = %flight_number, "撤销取消");
        Ok(flight_number)
    }

    pub fn contains(&self, flight_number: &str) -> bool {
        self.entries.iter().any(|f| f.flight_number == flight_number)
    }

    pub fn entries(&self) -> &[Flight] {
        &self.entries
    }

    /// 已取消航班号，最近一次取消在最后
    pub fn flight_numbers(&self) -> Vec<String> {
        self.entries.iter().map(|f| f.flight_number.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
