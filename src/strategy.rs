//! Execution strategy interface.
//!
//! The DSL core never runs timers or threads itself. A terminal builder
//! call hands the deferred action to a [`Scheduler`] and from then on all
//! concurrency (worker threads, timer wheels, continuation after a failed
//! invocation) is the strategy's business. [`crate::TokioScheduler`] is
//! the strategy shipped with the crate; anything satisfying these traits
//! plugs in the same way.

use crate::error::Result;
use crate::interval::Interval;
use crate::time_unit::TimeUnit;

/// A deferred action: zero arguments, no return value, captured once when
/// the schedule chain begins and invoked exactly once per firing.
pub type Task = Box<dyn FnMut() + Send + 'static>;

/// A live, cancellable reference to a submitted piece of work.
pub trait ScheduledHandle: Send + Sync + 'static {
    /// Delay until the first firing, expressed in `unit`. Non-positive
    /// once the work is overdue or has already started.
    fn remaining_delay(&self, unit: TimeUnit) -> Interval;

    /// Cancel future firings. Returns `true` if this call transitioned
    /// the handle to cancelled.
    ///
    /// With `allow_in_flight` an invocation already running completes
    /// normally; without it the strategy may abort it best-effort.
    fn cancel(&self, allow_in_flight: bool) -> bool;

    fn is_cancelled(&self) -> bool;
}

/// The two scheduling entry points plus immediate execution.
///
/// Whether a periodic submission is fixed-rate or fixed-delay is the
/// strategy's choice; delays for instants already in the past are clamped
/// to zero by the strategy, not by the core.
pub trait Scheduler {
    type Handle: ScheduledHandle;

    /// Run `task` as soon as possible, with no handle.
    fn execute(&self, task: Task);

    /// Run `task` once after `delay`.
    fn schedule_once(&self, task: Task, delay: Interval) -> Result<Self::Handle>;

    /// Run `task` every `period` after an `initial_delay`.
    fn schedule_periodic(
        &self,
        task: Task,
        initial_delay: Interval,
        period: Interval,
    ) -> Result<Self::Handle>;
}

/// Scheduling over raw nanosecond counts, for strategies wanting
/// sub-millisecond precision without unit-conversion loss.
pub trait NanoScheduler: Scheduler {
    /// Run `task` once after `delay_nanos` nanoseconds.
    fn schedule_once_nanos(&self, task: Task, delay_nanos: i64) -> Result<Self::Handle>;

    /// Run `task` every `period_nanos` after `initial_delay_nanos`.
    fn schedule_periodic_nanos(
        &self,
        task: Task,
        initial_delay_nanos: i64,
        period_nanos: i64,
    ) -> Result<Self::Handle>;
}
