use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static PERF_ENABLED: AtomicBool = AtomicBool::new(true);

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 根据环境变量配置耗时统计
///
/// 开关：
/// - Debug 默认开启；Release 默认关闭
/// - `AIRPORT_OPS_PERF=1` 强制开启，`AIRPORT_OPS_PERF=0` 强制关闭
pub fn configure_from_env() {
    let enabled = match std::env::var("AIRPORT_OPS_PERF") {
        Ok(v) => is_true(&v),
        Err(_) => cfg!(debug_assertions),
    };
    PERF_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    PERF_ENABLED.load(Ordering::Relaxed)
}

/// 性能统计 Guard：在 drop 时记录 elapsed_us
///
/// 使用方式：
/// ```ignore
/// let _perf = airport_ops::perf::PerfGuard::new("assign_runway");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_us = self.start.elapsed().as_micros() as u64;
        tracing::info!(target: "perf", op = self.op, elapsed_us, "done");
    }
}
