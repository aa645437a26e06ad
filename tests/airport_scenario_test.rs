// ==========================================
// 状态机场景测试
// ==========================================
// 职责: 航班排队 → 跑道分配 → 取消/撤销 → 航线连通 全流程
// ==========================================


use airport_ops::engine::{ActionOutcome, AirportAction, AirportStateMachine, EngineError};
use airport_ops::FlightStatus;
use airport_ops::logging;

use test_helpers::{draft, pending_numbers, ts};

// ==========================================
// 排队与分配
// ==========================================

#[test]
fn test_emergency_flight_ahead_of_earlier_normal_flight() {
    logging::init_test();
    let mut machine = AirportStateMachine::new(1);
    machine.add_flight(draft("EM1", 10, 0, true)).unwrap();
    machine.add_flight(draft("N1", 9, 0, false)).unwrap();

    assert_eq!(pending_numbers(&machine), vec!["EM1", "N1"]);
}

#[test]
fn test_assign_runway_takes_emergency_flight() {
    logging::init_test();
    let mut machine = AirportStateMachine::new(1);
    machine.add_flight(draft("EM1", 10, 0, true)).unwrap();
    machine.add_flight(draft("N1", 9, 0, false)).unwrap();

    let (runway_id, flight_number) = machine.assign_runway(None).unwrap();
    assert_eq!(runway_id, 1);
    assert_eq!(flight_number, "EM1");
    assert_eq!(pending_numbers(&machine), vec!["N1"]);

    let runways = machine.list_runways();
    assert!(runways[0].occupied);
    assert_eq!(runways[0].flight_number.as_deref(), Some("EM1"));

    // 跑道上的航班排在列表末尾并带有跑道号
    let flights = machine.list_flights();
    assert_eq!(flights.len(), 2);
    assert_eq!(flights[1].flight_number, "EM1");
    assert_eq!(flights[1].assigned_runway, Some(1));
    assert_eq!(flights[1].status, FlightStatus::RunwayAssigned);
    assert!(machine.invariant_violations().is_empty());
}

#[test]
fn test_cancel_then_undo_restores_sorted_slot() {
    logging::init_test();
    let mut machine = AirportStateMachine::new(1);
    machine.add_flight(draft("N0", 8, 0, false)).unwrap();
    machine.add_flight(draft("N1", 9, 0, false)).unwrap();
    machine.add_flight(draft("N2", 11, 0, false)).unwrap();

    machine.cancel_flight("N1").unwrap();
    assert_eq!(machine.list_cancelled(), vec!["N1"]);

    // 撤销前插入更早的航班，N1 应回到按比较器决定的位置
    machine.add_flight(draft("E1", 8, 30, false)).unwrap();

    assert_eq!(machine.undo_cancel().unwrap(), "N1");
    assert_eq!(pending_numbers(&machine), vec!["N0", "E1", "N1", "N2"]);
    assert!(machine.list_cancelled().is_empty());
}

#[test]
fn test_connected_path_through_intermediate_airport() {
    logging::init_test();
    let mut machine = AirportStateMachine::new(1);
    machine.add_route("SFO", "LAX").unwrap();
    machine.add_route("LAX", "JFK").unwrap();

    let result = machine.is_connected("SFO", "JFK");
    assert!(result.connected);
    assert_eq!(result.path, vec!["SFO", "LAX", "JFK"]);
}

#[test]
fn test_release_unknown_runway_is_not_found() {
    logging::init_test();
    let mut machine = AirportStateMachine::new(3);
    let err = machine.release_runway(99).unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }));
    assert_eq!(machine.summary().free_runways, 3);
}

#[test]
fn test_assign_with_empty_queue_leaves_runways_untouched() {
    logging::init_test();
    let mut machine = AirportStateMachine::new(2);
    let before = machine.snapshot();

    assert_eq!(machine.assign_runway(None).unwrap_err(), EngineError::EmptyQueue);
    assert_eq!(machine.snapshot(), before);
}

// ==========================================
// 拒绝动作不改变状态
// ==========================================

#[test]
fn test_rejected_actions_do_not_mutate() {
    logging::init_test();
    let mut machine = AirportStateMachine::new(1);
    machine.add_flight(draft("AA1", 9, 0, false)).unwrap();
    machine.add_flight(draft("AA2", 9, 30, false)).unwrap();
    machine.assign_runway(None).unwrap();
    machine.cancel_flight("AA2").unwrap();
    let before = machine.snapshot();

    let rejected = [
        AirportAction::AddFlight(draft("aa1", 12, 0, false)),
        AirportAction::AddFlight(draft("AA2", 12, 0, false)),
        AirportAction::CancelFlight {
            flight_number: "AA1".to_string(),
        },
        AirportAction::AssignRunway { now: Some(ts(8, 0)) },
        AirportAction::ReleaseRunway { runway_id: 7 },
        AirportAction::AddRoute {
            from: "JFK".to_string(),
            to: " jfk ".to_string(),
        },
        AirportAction::AddAirport {
            code: "   ".to_string(),
        },
    ];

    for action in rejected {
        assert!(machine.dispatch(action).is_err());
        assert_eq!(machine.snapshot(), before);
    }
}

#[test]
fn test_no_runway_available_with_hint() {
    logging::init_test();
    let mut machine = AirportStateMachine::new(1);
    machine.add_flight(draft("AA1", 9, 0, false)).unwrap();
    machine.add_flight(draft("AA2", 9, 30, false)).unwrap();
    machine.assign_runway(None).unwrap();

    assert_eq!(
        machine.assign_runway(Some(ts(8, 40))).unwrap_err(),
        EngineError::NoRunwayAvailable {
            next_free_in_minutes: Some(20)
        }
    );
    assert_eq!(pending_numbers(&machine), vec!["AA2"]);
}

// ==========================================
// 全流程
// ==========================================

#[test]
fn test_full_turnaround_flow() {
    logging::init_test();
    let mut machine = AirportStateMachine::new(2);
    for action in [
        AirportAction::AddFlight(draft("AA1", 9, 0, false)),
        AirportAction::AddFlight(draft("AA2", 9, 15, false)),
        AirportAction::AddFlight(draft("EM9", 11, 0, true)),
    ] {
        machine.dispatch(action).unwrap();
    }

    let outcome = machine
        .dispatch(AirportAction::AssignRunway { now: None })
        .unwrap();
    assert_eq!(
        outcome,
        ActionOutcome::RunwayAssigned {
            runway_id: 1,
            flight_number: "EM9".to_string()
        }
    );
    machine
        .dispatch(AirportAction::AssignRunway { now: None })
        .unwrap();

    // 09:10: AA1 已到起飞时间，EM9 尚未
    let released = machine.release_departed(ts(9, 10));
    assert_eq!(released, vec![2]);

    let outcome = machine
        .dispatch(AirportAction::ReleaseRunway { runway_id: 1 })
        .unwrap();
    assert_eq!(
        outcome,
        ActionOutcome::RunwayReleased {
            runway_id: 1,
            departed: Some("EM9".to_string())
        }
    );

    // 已离场航班号可重新登记
    machine.add_flight(draft("AA1", 18, 0, false)).unwrap();
    assert_eq!(pending_numbers(&machine), vec!["AA2", "AA1"]);

    let summary = machine.summary();
    assert_eq!(summary.scheduled_count, 2);
    assert_eq!(summary.free_runways, 2);
    assert!(machine.invariant_violations().is_empty());
}
