//! The execution strategy shipped with the crate, driven by the tokio
//! runtime: one spawned task per submission, `sleep_until` for the
//! initial delay and a `tokio::time::interval` ticker for periodic work
//! (fixed-rate cadence). Must be used from within a tokio runtime.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;

use crate::error::{Result, ScheduleError};
use crate::interval::Interval;
use crate::strategy::{NanoScheduler, ScheduledHandle, Scheduler, Task};
use crate::time_unit::TimeUnit;

/// Tokio-backed [`Scheduler`] and [`NanoScheduler`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl TokioScheduler {
    pub fn new() -> Self {
        Self
    }
}

struct HandleState {
    /// When the first invocation fires.
    fire_at: Instant,
    cancelled: AtomicBool,
    notify: Notify,
}

/// Handle to work submitted on a [`TokioScheduler`].
///
/// `cancel(true)` wakes the driving task cooperatively so an invocation
/// already running completes; `cancel(false)` aborts the driving task.
pub struct TokioHandle {
    state: Arc<HandleState>,
    driver: JoinHandle<()>,
}

impl ScheduledHandle for TokioHandle {
    fn remaining_delay(&self, unit: TimeUnit) -> Interval {
        let now = Instant::now();
        let nanos = if now >= self.state.fire_at {
            -((now - self.state.fire_at).as_nanos().min(i64::MAX as u128) as i64)
        } else {
            (self.state.fire_at - now).as_nanos().min(i64::MAX as u128) as i64
        };
        Interval::nanos(nanos).to_unit(unit)
    }

    fn cancel(&self, allow_in_flight: bool) -> bool {
        let was_cancelled = self.state.cancelled.swap(true, Ordering::SeqCst);
        if allow_in_flight {
            self.state.notify.notify_one();
        } else {
            self.driver.abort();
        }
        debug!(allow_in_flight, already_cancelled = was_cancelled, "cancel requested");
        !was_cancelled
    }

    fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TokioHandle;

    fn execute(&self, mut task: Task) {
        tokio::spawn(async move {
            task();
        });
    }

    fn schedule_once(&self, mut task: Task, delay: Interval) -> Result<TokioHandle> {
        // Past instants clamp to an immediate firing via to_duration.
        let state = Arc::new(HandleState {
            fire_at: Instant::now() + delay.to_duration(),
            cancelled: AtomicBool::new(false),
            notify: Notify::new(),
        });
        debug!(delay_ms = delay.to_millis(), "registering one-shot task");

        let st = Arc::clone(&state);
        let driver = tokio::spawn(async move {
            tokio::select! {
                _ = st.notify.notified() => return,
                _ = time::sleep_until(st.fire_at) => {}
            }
            if !st.cancelled.load(Ordering::SeqCst) {
                task();
            }
        });

        Ok(TokioHandle { state, driver })
    }

    fn schedule_periodic(
        &self,
        mut task: Task,
        initial_delay: Interval,
        period: Interval,
    ) -> Result<TokioHandle> {
        if period.to_nanos() <= 0 {
            return Err(ScheduleError::InvalidConfiguration(format!(
                "periodic submission requires a positive period, got {:?}",
                period
            )));
        }

        let state = Arc::new(HandleState {
            fire_at: Instant::now() + initial_delay.to_duration(),
            cancelled: AtomicBool::new(false),
            notify: Notify::new(),
        });
        debug!(
            initial_delay_ms = initial_delay.to_millis(),
            period_ms = period.to_millis(),
            "registering periodic task"
        );

        let st = Arc::clone(&state);
        let period = period.to_duration();
        let driver = tokio::spawn(async move {
            tokio::select! {
                _ = st.notify.notified() => return,
                _ = time::sleep_until(st.fire_at) => {}
            }

            let mut ticker = time::interval(period);
            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                if st.cancelled.load(Ordering::SeqCst) {
                    return;
                }
                task();
                tokio::select! {
                    _ = st.notify.notified() => return,
                    _ = ticker.tick() => {}
                }
            }
        });

        Ok(TokioHandle { state, driver })
    }
}

impl NanoScheduler for TokioScheduler {
    fn schedule_once_nanos(&self, task: Task, delay_nanos: i64) -> Result<TokioHandle> {
        self.schedule_once(task, Interval::nanos(delay_nanos))
    }

    fn schedule_periodic_nanos(
        &self,
        task: Task,
        initial_delay_nanos: i64,
        period_nanos: i64,
    ) -> Result<TokioHandle> {
        self.schedule_periodic(
            task,
            Interval::nanos(initial_delay_nanos),
            Interval::nanos(period_nanos),
        )
    }
}
