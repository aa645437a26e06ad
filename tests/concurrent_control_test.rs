// ==========================================
// 并发控制测试
// ==========================================
// 职责: 多任务并发提交动作时保持单写者语义
// ==========================================


use std::sync::Arc;

use airport_ops::app::{handle_command, AppState};
use serde_json::Value;

use test_helpers::{config_with_runways, fixed_clock};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_and_assigns() {
    let state = Arc::new(AppState::with_clock(config_with_runways(4), fixed_clock(6, 0)).unwrap());

    let mut handles = Vec::new();
    for i in 0..40 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            let line = format!(
                r#"{{"op":"add_flight","flight_number":"CN{}","destination":"PEK","departure_time":"{:02}:{:02}","emergency":{}}}"#,
                i,
                7 + i / 10,
                i % 60,
                i % 7 == 0
            );
            handle_command(&state, &line).await
        }));
    }
    for handle in handles {
        let resp: Value = serde_json::from_str(&handle.await.unwrap()).unwrap();
        assert_eq!(resp["ok"], true);
    }

    // 并发分配: 只有 4 条跑道成功
    let mut handles = Vec::new();
    for _ in 0..10 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            handle_command(&state, r#"{"op":"assign_runway"}"#).await
        }));
    }
    let mut assigned = 0;
    let mut rejected = 0;
    for handle in handles {
        let resp: Value = serde_json::from_str(&handle.await.unwrap()).unwrap();
        if resp["ok"] == true {
            assigned += 1;
        } else {
            assert_eq!(resp["error"]["code"], "NO_RUNWAY_AVAILABLE");
            rejected += 1;
        }
    }
    assert_eq!(assigned, 4);
    assert_eq!(rejected, 6);

    let summary = state.airport_api.status_summary().unwrap();
    assert_eq!(summary.scheduled_count, 36);
    assert_eq!(summary.free_runways, 0);
    assert!(state.airport_api.invariant_violations().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_flight_registers_once() {
    let state = Arc::new(AppState::with_clock(config_with_runways(1), fixed_clock(6, 0)).unwrap());

    let mut handles = Vec::new();
    for _ in 0..16 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            handle_command(
                &state,
                r#"{"op":"add_flight","flight_number":"DUP1","destination":"HND","departure_time":"09:00"}"#,
            )
            .await
        }));
    }

    let mut ok = 0;
    for handle in handles {
        let resp: Value = serde_json::from_str(&handle.await.unwrap()).unwrap();
        if resp["ok"] == true {
            ok += 1;
        } else {
            assert_eq!(resp["error"]["code"], "DUPLICATE_FLIGHT");
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(state.airport_api.list_flights().unwrap().len(), 1);
}

#[tokio::test]
async fn test_readers_see_whole_actions() {
    let state = Arc::new(AppState::with_clock(config_with_runways(2), fixed_clock(6, 0)).unwrap());

    let writer = {
        let state = state.clone();
        tokio::spawn(async move {
            for i in 0..50 {
                let line = format!(r#"{{"op":"add_route","from":"A{}","to":"B{}"}}"#, i, i);
                handle_command(&state, &line).await;
            }
        })
    };
    let reader = {
        let state = state.clone();
        tokio::spawn(async move {
            for _ in 0..50 {
                let snapshot = state.airport_api.snapshot().unwrap();
                // 每条航线都带来两个新机场
                assert_eq!(snapshot.graph.airports.len(), snapshot.summary.route_count * 2);
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();
    assert_eq!(state.airport_api.status_summary().unwrap().route_count, 50);
}
