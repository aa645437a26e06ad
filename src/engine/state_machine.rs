// ==========================================
// 机场运行状态引擎 - 状态机（统一动作入口）
// ==========================================
// 职责: 独占持有 排队区/跑道池/取消栈/航线网络，
//       每个动作分派到唯一组件，要么完整生效要么完整拒绝
// ==========================================

use crate::domain::flight::{Flight, FlightDraft, FlightView};
use crate::domain::route::{Connectivity, GraphListing};
use crate::domain::runway::RunwayView;
use crate::domain::types::{
    normalize_airport_code, normalize_flight_number, FlightStatus, RunwayId,
};
use crate::engine::cancellation::CancellationStack;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::route_graph::RouteGraph;
use crate::engine::runway_allocator::RunwayAllocator;
use crate::engine::scheduler::FlightScheduler;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

// ==========================================
// AirportAction - 动作
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AirportAction {
    AddFlight(FlightDraft),
    CancelFlight { flight_number: String },
    UndoCancel,
    /// `now` 仅用于在无空闲跑道时估算释放时间
    AssignRunway { now: Option<NaiveDateTime> },
    ReleaseRunway { runway_id: RunwayId },
    ReleaseDeparted { now: NaiveDateTime },
    AddAirport { code: String },
    AddRoute { from: String, to: String },
}

impl AirportAction {
    pub fn name(&self) -> &'static str {
        match self {
            AirportAction::AddFlight(_) => "add_flight",
            AirportAction::CancelFlight { .. } => "cancel_flight",
            AirportAction::UndoCancel => "undo_cancel",
            AirportAction::AssignRunway { .. } => "assign_runway",
            AirportAction::ReleaseRunway { .. } => "release_runway",
            AirportAction::ReleaseDeparted { .. } => "release_departed",
            AirportAction::AddAirport { .. } => "add_airport",
            AirportAction::AddRoute { .. } => "add_route",
        }
    }
}

// ==========================================
// ActionOutcome - 动作结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionOutcome {
    FlightAdded { flight_number: String },
    FlightCancelled { flight_number: String },
    CancelUndone { flight_number: String },
    RunwayAssigned { runway_id: RunwayId, flight_number: String },
    RunwayReleased { runway_id: RunwayId, departed: Option<String> },
    DepartedReleased { runway_ids: Vec<RunwayId> },
    AirportAdded { code: String, created: bool },
    RouteAdded { from: String, to: String, created: bool },
}

// ==========================================
// 查询输出
// ==========================================

/// 系统状态摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub scheduled_count: usize,
    pub cancelled_count: usize,
    pub free_runways: usize,
    pub total_runways: usize,
    pub airport_count: usize,
    pub route_count: usize,
}

/// 时点一致快照（只读查询可脱离锁使用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportSnapshot {
    pub flights: Vec<FlightView>,
    pub cancelled: Vec<String>,
    pub runways: Vec<RunwayView>,
    pub graph: GraphListing,
    pub summary: StatusSummary,
}

// ==========================================
// AirportStateMachine - 状态机
// ==========================================
#[derive(Debug, Clone)]
pub struct AirportStateMachine {
    scheduler: FlightScheduler,
    runways: RunwayAllocator,
    cancellations: CancellationStack,
    routes: RouteGraph,
}

impl AirportStateMachine {
    /// 创建状态机
    ///
    /// # 参数
    /// - runway_count: 跑道数量（编号 1..=runway_count）
    pub fn new(runway_count: u32) -> Self {
        Self {
            scheduler: FlightScheduler::new(),
            runways: RunwayAllocator::new(runway_count),
            cancellations: CancellationStack::new(),
            routes: RouteGraph::new(),
        }
    }

    // ==========================================
    // 统一分派
    // ==========================================

    /// 执行动作
    pub fn dispatch(&mut self, action: AirportAction) -> EngineResult<ActionOutcome> {
        let name = action.name();
        let result = match action {
            AirportAction::AddFlight(draft) => self
                .add_flight(draft)
                .map(|f| ActionOutcome::FlightAdded {
                    flight_number: f.flight_number,
                }),
            AirportAction::CancelFlight { flight_number } => self
                .cancel_flight(&flight_number)
                .map(|f| ActionOutcome::FlightCancelled {
                    flight_number: f.flight_number,
                }),
            AirportAction::UndoCancel => self
                .undo_cancel()
                .map(|flight_number| ActionOutcome::CancelUndone { flight_number }),
            AirportAction::AssignRunway { now } => {
                self.assign_runway(now)
                    .map(|(runway_id, flight_number)| ActionOutcome::RunwayAssigned {
                        runway_id,
                        flight_number,
                    })
            }
            AirportAction::ReleaseRunway { runway_id } => {
                self.release_runway(runway_id)
                    .map(|departed| ActionOutcome::RunwayReleased {
                        runway_id,
                        departed: departed.map(|f| f.flight_number),
                    })
            }
            AirportAction::ReleaseDeparted { now } => Ok(ActionOutcome::DepartedReleased {
                runway_ids: self.release_departed(now),
            }),
            AirportAction::AddAirport { code } => {
                self.add_airport(&code)
                    .map(|created| ActionOutcome::AirportAdded {
                        code: normalize_airport_code(&code),
                        created,
                    })
            }
            AirportAction::AddRoute { from, to } => {
                self.add_route(&from, &to)
                    .map(|created| ActionOutcome::RouteAdded {
                        from: normalize_airport_code(&from),
                        to: normalize_airport_code(&to),
                        created,
                    })
            }
        };

        if let Err(ref e) = result {
            warn!(action = name, error = %e, "动作被拒绝");
        }
        result
    }

    // ==========================================
    // 航班动作
    // ==========================================

    /// 登记航班
    ///
    /// 航班号在排队区、跑道、取消栈三者中均不得已存在
    pub fn add_flight(&mut self, draft: FlightDraft) -> EngineResult<Flight> {
        let candidate = self.scheduler.validate(draft.clone())?;
        let number = &candidate.flight_number;
        if self.runways.contains_flight(number) || self.cancellations.contains(number) {
            return Err(EngineError::DuplicateFlight {
                flight_number: candidate.flight_number,
            });
        }

        let flight = self.scheduler.add(draft)?.clone();
        info!(
            flight_number = %flight.flight_number,
            emergency = flight.emergency,
            "航班已登记"
        );
        self.debug_check();
        Ok(flight)
    }

    /// 取消排队航班
    pub fn cancel_flight(&mut self, flight_number: &str) -> EngineResult<Flight> {
        let key = normalize_flight_number(flight_number);
        if let Some(runway_id) = self.runways.runway_of(&key) {
            debug!(flight_number = %key, runway_id, "航班已占用跑道，不可取消");
        }
        let flight = self
            .cancellations
            .cancel(&mut self.scheduler, &key)?
            .clone();
        self.debug_check();
        Ok(flight)
    }

    /// 撤销最近一次取消
    pub fn undo_cancel(&mut self) -> EngineResult<String> {
        let flight_number = self.cancellations.undo(&mut self.scheduler)?;
        self.debug_check();
        Ok(flight_number)
    }

    // ==========================================
    // 跑道动作
    // ==========================================

    /// 为最高优先级航班分配跑道
    ///
    /// # 返回
    /// (跑道编号, 航班号)
    pub fn assign_runway(
        &mut self,
        now: Option<NaiveDateTime>,
    ) -> EngineResult<(RunwayId, String)> {
        let (runway_id, flight_number) = match self.runways.assign_next(&mut self.scheduler) {
            Ok(assigned) => assigned,
            Err(EngineError::NoRunwayAvailable { .. }) => {
                return Err(EngineError::NoRunwayAvailable {
                    next_free_in_minutes: now
                        .and_then(|n| self.runways.minutes_until_next_free(n)),
                });
            }
            Err(e) => return Err(e),
        };

        self.debug_check();
        Ok((runway_id, flight_number))
    }

    /// 释放跑道，返回离场航班（跑道原本空闲时为 None）
    pub fn release_runway(&mut self, runway_id: RunwayId) -> EngineResult<Option<Flight>> {
        let departed = self.runways.release(runway_id)?;
        info!(
            runway_id,
            departed = departed.as_ref().map(|f| f.flight_number.as_str()),
            "跑道已释放"
        );
        Ok(departed)
    }

    /// 释放所有已到起飞时间的航班占用的跑道
    pub fn release_departed(&mut self, now: NaiveDateTime) -> Vec<RunwayId> {
        let released = self.runways.release_departed(now);
        if !released.is_empty() {
            info!(?released, "已离场航班的跑道已释放");
        }
        released
    }

    // ==========================================
    // 航线动作
    // ==========================================

    pub fn add_airport(&mut self, code: &str) -> EngineResult<bool> {
        let created = self.routes.add_airport(code)?;
        self.debug_check();
        Ok(created)
    }

    pub fn add_route(&mut self, from: &str, to: &str) -> EngineResult<bool> {
        let created = self.routes.add_route(from, to)?;
        self.debug_check();
        Ok(created)
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 航班列表: 排队航班（优先级顺序）后接跑道上的航班（跑道编号顺序）
    pub fn list_flights(&self) -> Vec<FlightView> {
        let pending = self
            .scheduler
            .flights()
            .iter()
            .map(|f| FlightView::from_flight(f, None, FlightStatus::Waiting));
        let on_runway = self.runways.runways().iter().filter_map(|r| {
            r.assigned_flight()
                .map(|f| FlightView::from_flight(f, Some(r.id), FlightStatus::RunwayAssigned))
        });
        pending.chain(on_runway).collect()
    }

    /// 全部航班: 排队航班、跑道上的航班，再接已取消航班（最近一次取消在最后）
    pub fn list_all_flights(&self) -> Vec<FlightView> {
        let mut flights = self.list_flights();
        flights.extend(
            self.cancellations
                .entries()
                .iter()
                .map(|f| FlightView::from_flight(f, None, FlightStatus::Cancelled)),
        );
        flights
    }

    /// 排队航班（优先级顺序）
    pub fn pending_flights(&self) -> &[Flight] {
        self.scheduler.flights()
    }

    /// 已取消航班号，最近一次在最后
    pub fn list_cancelled(&self) -> Vec<String> {
        self.cancellations.flight_numbers()
    }

    pub fn list_runways(&self) -> Vec<RunwayView> {
        self.runways.runways().iter().map(RunwayView::from).collect()
    }

    pub fn list_graph(&self) -> GraphListing {
        self.routes.list_graph()
    }

    pub fn is_connected(&self, from: &str, to: &str) -> Connectivity {
        self.routes.is_connected(from, to)
    }

    pub fn shortest_route(&self, from: &str, to: &str) -> Connectivity {
        self.routes.shortest_route(from, to)
    }

    pub fn summary(&self) -> StatusSummary {
        StatusSummary {
            scheduled_count: self.scheduler.len(),
            cancelled_count: self.cancellations.len(),
            free_runways: self.runways.free_count(),
            total_runways: self.runways.len(),
            airport_count: self.routes.airport_count(),
            route_count: self.routes.route_count(),
        }
    }

    pub fn snapshot(&self) -> AirportSnapshot {
        AirportSnapshot {
            flights: self.list_flights(),
            cancelled: self.list_cancelled(),
            runways: self.list_runways(),
            graph: self.list_graph(),
            summary: self.summary(),
        }
    }

    // ==========================================
    // 不变量检查
    // ==========================================

    /// 返回所有被破坏的不变量描述（健康时为空）
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        // 1 & 5: 航班号在三类持有者中唯一
        let mut seen = HashSet::new();
        let holders = self
            .scheduler
            .flights()
            .iter()
            .map(|f| f.flight_number.as_str())
            .chain(
                self.runways
                    .runways()
                    .iter()
                    .filter_map(|r| r.assigned_flight_number()),
            )
            .chain(
                self.cancellations
                    .entries()
                    .iter()
                    .map(|f| f.flight_number.as_str()),
            );
        for number in holders {
            if !seen.insert(number) {
                violations.push(format!("航班号重复持有: {}", number));
            }
        }

        // 2: 排队区有序
        if !self.scheduler.is_sorted() {
            violations.push("排队区未按优先级排序".to_string());
        }

        // 4: 航线对称无自环
        violations.extend(self.routes.symmetry_violations());

        violations
    }

    fn debug_check(&self) {
        debug_assert!(
            self.invariant_violations().is_empty(),
            "不变量被破坏: {:?}",
            self.invariant_violations()
        );
    }
}
