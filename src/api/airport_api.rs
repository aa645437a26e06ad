// ==========================================
// 机场运行状态引擎 - 机场运行 API
// ==========================================
// 职责: 对外暴露航班/跑道/取消/航线操作
// 红线: 单写者纪律，一把锁保护全部状态（状态机 + 操作日志）
// ==========================================

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::build_flight_draft;
use crate::config::AirportConfig;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::flight::FlightView;
use crate::domain::route::{Connectivity, GraphListing};
use crate::domain::runway::RunwayView;
use crate::domain::types::RunwayId;
use crate::engine::{
    ActionOutcome, AirportAction, AirportEvent, AirportEventType, AirportSnapshot,
    AirportStateMachine, OptionalEventPublisher, StatusSummary,
};
use crate::perf::PerfGuard;

/// 时钟（便于测试注入固定时间）
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// 系统本地时钟
pub fn local_clock() -> Clock {
    Arc::new(|| chrono::Local::now().naive_local())
}

// ==========================================
// 请求 DTO
// ==========================================

/// 登记航班请求（兼容旧前端字段名）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFlightRequest {
    #[serde(alias = "flight_no")]
    pub flight_number: String,
    pub destination: String,
    /// HH:MM 或 YYYY-MM-DDTHH:MM[:SS] 或 RFC 3339
    #[serde(alias = "time_str")]
    pub departure_time: String,
    #[serde(default, alias = "is_emergency")]
    pub emergency: bool,
}

// ==========================================
// AirportApi - 机场运行 API
// ==========================================

struct ApiInner {
    machine: AirportStateMachine,
    action_logs: VecDeque<ActionLog>, // 末尾为最新
}

/// 机场运行API
///
/// 职责：
/// 1. 输入解析（起飞时间等）
/// 2. 串行化所有动作
/// 3. ActionLog记录
/// 4. 状态变更事件发布
pub struct AirportApi {
    inner: Mutex<ApiInner>,
    log_capacity: usize,
    publisher: OptionalEventPublisher,
    clock: Clock,
}

impl AirportApi {
    /// 创建新的AirportApi实例
    ///
    /// 按配置初始化跑道池并登记种子机场/航线
    pub fn new(config: &AirportConfig, publisher: OptionalEventPublisher) -> ApiResult<Self> {
        Self::with_clock(config, publisher, local_clock())
    }

    pub fn with_clock(
        config: &AirportConfig,
        publisher: OptionalEventPublisher,
        clock: Clock,
    ) -> ApiResult<Self> {
        let mut machine = AirportStateMachine::new(config.runway_count);
        for code in &config.seed_airports {
            machine.add_airport(code)?;
        }
        for (from, to) in &config.seed_routes {
            machine.add_route(from, to)?;
        }
        tracing::info!(
            runway_count = config.runway_count,
            seed_routes = config.seed_routes.len(),
            "AirportApi 初始化完成"
        );

        Ok(Self {
            inner: Mutex::new(ApiInner {
                machine,
                action_logs: VecDeque::new(),
            }),
            log_capacity: config.action_log_capacity,
            publisher,
            clock,
        })
    }

    // ==========================================
    // 航班
    // ==========================================

    /// 航班列表（排队航班在前，跑道上的航班在后）
    pub fn list_flights(&self) -> ApiResult<Vec<FlightView>> {
        Ok(self.lock()?.machine.list_flights())
    }

    /// 登记航班
    ///
    /// # 返回
    /// - Ok(ActionOutcome::FlightAdded)
    /// - Err(ApiError::ValidationError / DuplicateFlight)
    pub fn add_flight(&self, request: &AddFlightRequest) -> ApiResult<ActionOutcome> {
        let now = (self.clock)();
        let draft = build_flight_draft(
            &request.flight_number,
            &request.destination,
            &request.departure_time,
            request.emergency,
            now,
        )?;
        self.execute(AirportAction::AddFlight(draft), now)
    }

    /// 全部航班（含已取消航班，状态为 CANCELLED）
    pub fn list_all_flights(&self) -> ApiResult<Vec<FlightView>> {
        Ok(self.lock()?.machine.list_all_flights())
    }

    /// 取消排队航班
    pub fn cancel_flight(&self, flight_number: &str) -> ApiResult<ActionOutcome> {
        self.execute(
            AirportAction::CancelFlight {
                flight_number: flight_number.to_string(),
            },
            (self.clock)(),
        )
    }

    /// 已取消航班号（最近一次在最后）
    pub fn list_cancelled(&self) -> ApiResult<Vec<String>> {
        Ok(self.lock()?.machine.list_cancelled())
    }

    /// 撤销最近一次取消
    pub fn undo_cancel(&self) -> ApiResult<ActionOutcome> {
        self.execute(AirportAction::UndoCancel, (self.clock)())
    }

    // ==========================================
    // 跑道
    // ==========================================

    /// 为最高优先级航班分配跑道
    pub fn assign_runway(&self) -> ApiResult<ActionOutcome> {
        let now = (self.clock)();
        self.execute(AirportAction::AssignRunway { now: Some(now) }, now)
    }

    /// 释放跑道
    pub fn release_runway(&self, runway_id: RunwayId) -> ApiResult<ActionOutcome> {
        self.execute(AirportAction::ReleaseRunway { runway_id }, (self.clock)())
    }

    /// 释放已到起飞时间的航班占用的跑道
    pub fn release_departed(&self) -> ApiResult<ActionOutcome> {
        let now = (self.clock)();
        self.execute(AirportAction::ReleaseDeparted { now }, now)
    }

    pub fn list_runways(&self) -> ApiResult<Vec<RunwayView>> {
        Ok(self.lock()?.machine.list_runways())
    }

    // ==========================================
    // 航线网络
    // ==========================================

    pub fn add_airport(&self, code: &str) -> ApiResult<ActionOutcome> {
        self.execute(
            AirportAction::AddAirport {
                code: code.to_string(),
            },
            (self.clock)(),
        )
    }

    pub fn add_route(&self, from: &str, to: &str) -> ApiResult<ActionOutcome> {
        self.execute(
            AirportAction::AddRoute {
                from: from.to_string(),
                to: to.to_string(),
            },
            (self.clock)(),
        )
    }

    pub fn list_graph(&self) -> ApiResult<GraphListing> {
        Ok(self.lock()?.machine.list_graph())
    }

    /// 连通性查询（机场不存在时返回不连通）
    pub fn is_connected(&self, from: &str, to: &str) -> ApiResult<Connectivity> {
        Ok(self.lock()?.machine.is_connected(from, to))
    }

    pub fn shortest_route(&self, from: &str, to: &str) -> ApiResult<Connectivity> {
        Ok(self.lock()?.machine.shortest_route(from, to))
    }

    // ==========================================
    // 状态与审计
    // ==========================================

    pub fn status_summary(&self) -> ApiResult<StatusSummary> {
        Ok(self.lock()?.machine.summary())
    }

    pub fn snapshot(&self) -> ApiResult<AirportSnapshot> {
        Ok(self.lock()?.machine.snapshot())
    }

    /// 最近的操作日志（最新在前）
    pub fn list_action_logs(&self, limit: usize) -> ApiResult<Vec<ActionLog>> {
        let inner = self.lock()?;
        Ok(inner.action_logs.iter().rev().take(limit).cloned().collect())
    }

    /// 被破坏的不变量（健康时为空）
    pub fn invariant_violations(&self) -> ApiResult<Vec<String>> {
        Ok(self.lock()?.machine.invariant_violations())
    }

    // ==========================================
    // 内部方法
    // ==========================================

    fn lock(&self) -> ApiResult<MutexGuard<'_, ApiInner>> {
        self.inner
            .lock()
            .map_err(|e| ApiError::InternalError(format!("状态锁获取失败: {}", e)))
    }

    /// 在锁内执行动作并记录日志，锁外发布事件
    fn execute(&self, action: AirportAction, now: NaiveDateTime) -> ApiResult<ActionOutcome> {
        let op = action.name();
        let _perf = PerfGuard::new(op);
        let action_type = action_type_of(&action);

        let outcome = {
            let mut inner = self.lock()?;
            let outcome = inner.machine.dispatch(action)?;

            let log = ActionLog::new(
                action_type,
                now,
                serde_json::to_value(&outcome).ok(),
                describe(&outcome),
            );
            inner.action_logs.push_back(log);
            while inner.action_logs.len() > self.log_capacity {
                inner.action_logs.pop_front();
            }
            outcome
        };

        let event = AirportEvent::new(event_type_of(action_type), op, now);
        if let Err(e) = self.publisher.publish(event) {
            tracing::warn!("发布 {} 事件失败: {}", op, e);
        }
        Ok(outcome)
    }
}

fn action_type_of(action: &AirportAction) -> ActionType {
    match action {
        AirportAction::AddFlight(_) => ActionType::AddFlight,
        AirportAction::CancelFlight { .. } => ActionType::CancelFlight,
        AirportAction::UndoCancel => ActionType::UndoCancel,
        AirportAction::AssignRunway { .. } => ActionType::AssignRunway,
        AirportAction::ReleaseRunway { .. } => ActionType::ReleaseRunway,
        AirportAction::ReleaseDeparted { .. } => ActionType::ReleaseDeparted,
        AirportAction::AddAirport { .. } => ActionType::AddAirport,
        AirportAction::AddRoute { .. } => ActionType::AddRoute,
    }
}

fn event_type_of(action_type: ActionType) -> AirportEventType {
    match action_type {
        ActionType::AddFlight | ActionType::CancelFlight | ActionType::UndoCancel => {
            AirportEventType::ScheduleChanged
        }
        ActionType::AssignRunway | ActionType::ReleaseRunway | ActionType::ReleaseDeparted => {
            AirportEventType::RunwayChanged
        }
        ActionType::AddAirport | ActionType::AddRoute => AirportEventType::RouteNetworkChanged,
    }
}

/// 操作结果的用户提示
pub fn describe(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::FlightAdded { flight_number } => format!("航班 {} 已登记", flight_number),
        ActionOutcome::FlightCancelled { flight_number } => {
            format!("航班 {} 已取消", flight_number)
        }
        ActionOutcome::CancelUndone { flight_number } => {
            format!("撤销成功，航班 {} 已重新排队", flight_number)
        }
        ActionOutcome::RunwayAssigned {
            runway_id,
            flight_number,
        } => format!("航班 {} 已分配跑道 {}", flight_number, runway_id),
        ActionOutcome::RunwayReleased {
            runway_id,
            departed,
        } => match departed {
            Some(n) => format!("跑道 {} 已释放，航班 {} 已离场", runway_id, n),
            None => format!("跑道 {} 已释放", runway_id),
        },
        ActionOutcome::DepartedReleased { runway_ids } => {
            format!("已释放 {} 条跑道", runway_ids.len())
        }
        ActionOutcome::AirportAdded { code, created } => {
            if *created {
                format!("机场 {} 已添加", code)
            } else {
                format!("机场 {} 已存在", code)
            }
        }
        ActionOutcome::RouteAdded { from, to, created } => {
            if *created {
                format!("航线 {} <-> {} 已添加", from, to)
            } else {
                format!("航线 {} <-> {} 已存在", from, to)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AirportEventPublisher;
    use chrono::NaiveDate;
    use std::error::Error;

    fn fixed_clock(hour: u32, minute: u32) -> Clock {
        let ts = NaiveDate::from_ymd_opt(2026, 1, 20)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap();
        Arc::new(move || ts)
    }

    fn request(number: &str, time: &str, emergency: bool) -> AddFlightRequest {
        AddFlightRequest {
            flight_number: number.to_string(),
            destination: "LHR".to_string(),
            departure_time: time.to_string(),
            emergency,
        }
    }

    #[derive(Default)]
    struct RecordingPublisher {
        events: Mutex<Vec<AirportEventType>>,
    }

    impl AirportEventPublisher for RecordingPublisher {
        fn publish(&self, event: AirportEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
            self.events.lock().unwrap().push(event.event_type);
            Ok(())
        }
    }

    #[test]
    fn test_seed_routes_loaded() {
        let api = AirportApi::new(&AirportConfig::sample_network(), OptionalEventPublisher::none())
            .unwrap();
        let result = api.shortest_route("sfo", "cdg").unwrap();
        assert_eq!(result.path, vec!["SFO", "LAX", "JFK", "LHR", "CDG"]);
    }

    #[test]
    fn test_action_log_records_successes_only() {
        let api = AirportApi::with_clock(
            &AirportConfig::default(),
            OptionalEventPublisher::none(),
            fixed_clock(8, 0),
        )
        .unwrap();

        api.add_flight(&request("AA1", "09:00", false)).unwrap();
        assert!(api.cancel_flight("ZZ9").is_err());
        api.cancel_flight("aa1").unwrap();

        let logs = api.list_action_logs(10).unwrap();
        let types: Vec<_> = logs.iter().map(|l| l.action_type).collect();
        assert_eq!(types, vec![ActionType::CancelFlight, ActionType::AddFlight]);
        assert_eq!(logs[0].detail.as_deref(), Some("航班 AA1 已取消"));
    }

    #[test]
    fn test_action_log_capacity_bound() {
        let config = AirportConfig {
            action_log_capacity: 2,
            ..AirportConfig::default()
        };
        let api =
            AirportApi::with_clock(&config, OptionalEventPublisher::none(), fixed_clock(8, 0))
                .unwrap();
        for code in ["A", "B", "C"] {
            api.add_airport(code).unwrap();
        }
        let logs = api.list_action_logs(10).unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].detail.as_deref(), Some("机场 C 已添加"));
    }

    #[test]
    fn test_events_published_after_commit() {
        let recorder = Arc::new(RecordingPublisher::default());
        let api = AirportApi::with_clock(
            &AirportConfig::default(),
            OptionalEventPublisher::with_publisher(recorder.clone()),
            fixed_clock(8, 0),
        )
        .unwrap();

        api.add_flight(&request("AA1", "09:00", false)).unwrap();
        api.assign_runway().unwrap();
        api.add_route("SFO", "LAX").unwrap();
        assert!(api.undo_cancel().is_err());

        let events = recorder.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                AirportEventType::ScheduleChanged,
                AirportEventType::RunwayChanged,
                AirportEventType::RouteNetworkChanged,
            ]
        );
    }

    #[test]
    fn test_assign_runway_full_reports_hint() {
        let config = AirportConfig {
            runway_count: 1,
            ..AirportConfig::default()
        };
        let api =
            AirportApi::with_clock(&config, OptionalEventPublisher::none(), fixed_clock(8, 0))
                .unwrap();
        api.add_flight(&request("AA1", "09:30", false)).unwrap();
        api.add_flight(&request("AA2", "10:00", false)).unwrap();
        api.assign_runway().unwrap();

        match api.assign_runway() {
            Err(ApiError::NoRunwayAvailable {
                next_free_in_minutes,
            }) => assert_eq!(next_free_in_minutes, Some(90)),
            other => panic!("Expected NoRunwayAvailable, got {:?}", other),
        }
    }

    #[test]
    fn test_add_flight_bad_time_is_validation_error() {
        let api = AirportApi::new(&AirportConfig::default(), OptionalEventPublisher::none())
            .unwrap();
        assert!(matches!(
            api.add_flight(&request("AA1", "noon", false)),
            Err(ApiError::ValidationError(_))
        ));
        assert!(matches!(
            api.add_flight(&request("AA1", "", false)),
            Err(ApiError::ValidationError(_))
        ));
        assert!(api.list_flights().unwrap().is_empty());
    }

    #[test]
    fn test_list_all_flights_reports_cancelled_status() {
        let api = AirportApi::with_clock(
            &AirportConfig::default(),
            OptionalEventPublisher::none(),
            fixed_clock(8, 0),
        )
        .unwrap();
        api.add_flight(&request("AA1", "09:00", false)).unwrap();
        api.add_flight(&request("AA2", "10:00", false)).unwrap();
        api.cancel_flight("AA2").unwrap();

        let all = api.list_all_flights().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].flight_number, "AA2");
        assert_eq!(all[1].status, crate::domain::types::FlightStatus::Cancelled);
        assert_eq!(api.list_flights().unwrap().len(), 1);
    }

    #[test]
    fn test_add_flight_request_accepts_legacy_field_names() {
        let json = r#"{"flight_no":"aa101","destination":"LAX","time_str":"23:00","is_emergency":true}"#;
        let req: AddFlightRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.flight_number, "aa101");
        assert_eq!(req.departure_time, "23:00");
        assert!(req.emergency);
    }
}
