//! The fluent builder turning a deferred action plus a temporal trigger
//! into a single submission against an execution strategy.
//!
//! A chain starts at [`schedule`], which captures the action once. The
//! [`Schedule`] either terminates directly (one-shot submission or
//! immediate execution) or promotes to a [`RepeatingSchedule`], which
//! terminates when a period is supplied. Builders are transient values
//! owned by one call chain; nothing is submitted before the terminal
//! call.

use std::cmp::Ordering;

use tracing::debug;

use crate::capability::{InstantLike, TimeLike, ZonedTimeLike};
use crate::error::{Result, ScheduleError};
use crate::interval::Interval;
use crate::strategy::{NanoScheduler, Scheduler, Task};
use crate::time_unit::TimeUnit;

/// Begin a schedule chain: capture `action` and the strategy it will be
/// submitted to.
pub fn schedule<S, F>(strategy: S, action: F) -> Schedule<S>
where
    S: Scheduler,
    F: FnMut() + Send + 'static,
{
    Schedule {
        strategy,
        action: Box::new(action),
    }
}

/// A captured action awaiting its temporal trigger.
pub struct Schedule<S: Scheduler> {
    strategy: S,
    action: Task,
}

impl<S: Scheduler> Schedule<S> {
    /// Execute the action as soon as possible. No handle is produced.
    pub fn now(self) {
        self.strategy.execute(self.action);
    }

    /// Run the action once at `instant`. The delay is computed in
    /// milliseconds from the capability's current instant; instants in
    /// the past are clamped to an immediate firing by the strategy.
    pub fn once_at<I, C>(self, clock: &C, instant: &I) -> Result<S::Handle>
    where
        C: InstantLike<I>,
    {
        let delay = clock.delay(&clock.now(), instant, TimeUnit::Milliseconds);
        debug!(delay_ms = delay.to_millis(), "submitting one-shot schedule");
        self.strategy.schedule_once(self.action, delay)
    }

    /// Run the action once after `delay` from now.
    pub fn once_in<I, C>(self, clock: &C, delay: Interval) -> Result<S::Handle>
    where
        C: InstantLike<I>,
    {
        let at = delay.from_now(clock);
        self.once_at(clock, &at)
    }

    /// Run the action once at the next occurrence of the time of day `t`
    /// in `zone`.
    pub fn once_at_next<T, D, I, C>(
        self,
        clock: &C,
        t: &T,
        zone: &<C as TimeLike<T, D, I>>::Zone,
    ) -> Result<S::Handle>
    where
        C: TimeLike<T, D, I> + InstantLike<I>,
    {
        let at = clock.next_occurrence(t, zone);
        self.once_at(clock, &at)
    }

    /// Like [`Schedule::once_at_next`] for a time of day carrying its own
    /// zone.
    pub fn once_at_next_zoned<Z, D, I, C>(self, clock: &C, t: &Z) -> Result<S::Handle>
    where
        C: ZonedTimeLike<Z, D, I> + InstantLike<I>,
    {
        let zone = clock.zone_of(t);
        let at = clock.next_occurrence(t, &zone);
        self.once_at(clock, &at)
    }

    /// Promote to a repeating schedule whose first invocation happens
    /// immediately on submission.
    pub fn immediately(self) -> RepeatingSchedule<S> {
        RepeatingSchedule {
            strategy: self.strategy,
            action: self.action,
            first_delay: None,
        }
    }

    /// Promote to a repeating schedule first firing at `instant`.
    ///
    /// The initial delay is not computed here: it is evaluated at the
    /// terminal call, using the capability's native-precision delay.
    pub fn starting_at<I, C>(self, clock: &C, instant: &I) -> RepeatingSchedule<S>
    where
        C: InstantLike<I> + Clone + Send + 'static,
        I: Clone + Send + 'static,
    {
        let clock = clock.clone();
        let instant = instant.clone();
        RepeatingSchedule {
            strategy: self.strategy,
            action: self.action,
            first_delay: Some(Box::new(move || {
                Interval::nanos(clock.delay_nanos(&clock.now(), &instant))
            })),
        }
    }

    /// Promote to a repeating schedule first firing `delay` from now.
    pub fn starting_in<I, C>(self, clock: &C, delay: Interval) -> RepeatingSchedule<S>
    where
        C: InstantLike<I> + Clone + Send + 'static,
        I: Clone + Send + 'static,
    {
        let at = delay.from_now(clock);
        self.starting_at(clock, &at)
    }

    /// Promote to a repeating schedule first firing at the next
    /// occurrence of the time of day `t` in `zone`.
    pub fn starting_at_next<T, D, I, C>(
        self,
        clock: &C,
        t: &T,
        zone: &<C as TimeLike<T, D, I>>::Zone,
    ) -> RepeatingSchedule<S>
    where
        C: TimeLike<T, D, I> + InstantLike<I> + Clone + Send + 'static,
        I: Clone + Send + 'static,
    {
        let at = clock.next_occurrence(t, zone);
        self.starting_at(clock, &at)
    }

    /// Like [`Schedule::starting_at_next`] for a time of day carrying its
    /// own zone.
    pub fn starting_at_next_zoned<Z, D, I, C>(self, clock: &C, t: &Z) -> RepeatingSchedule<S>
    where
        C: ZonedTimeLike<Z, D, I> + InstantLike<I> + Clone + Send + 'static,
        I: Clone + Send + 'static,
    {
        let zone = clock.zone_of(t);
        let at = clock.next_occurrence(t, &zone);
        self.starting_at(clock, &at)
    }

    /// Shorthand for `immediately().then_every(period)`.
    pub fn immediately_then_every(self, period: Interval) -> Result<S::Handle> {
        self.immediately().then_every(period)
    }

    /// Run the action every day at the time of day `t` in `zone`.
    ///
    /// When `run_now_if_past` and `t` has already passed today (a tie
    /// with the current time counts as not yet passed), the action is
    /// additionally executed once, synchronously, before submission. The
    /// recurring job always starts at the next occurrence of `t`.
    pub fn daily_at<T, D, I, C>(
        mut self,
        clock: &C,
        t: &T,
        zone: &<C as TimeLike<T, D, I>>::Zone,
        run_now_if_past: bool,
    ) -> Result<S::Handle>
    where
        C: TimeLike<T, D, I> + InstantLike<I> + Clone + Send + 'static,
        I: Clone + Send + 'static,
    {
        if run_now_if_past {
            let current = clock.current(zone);
            if clock.compare(&current, t) == Ordering::Greater {
                debug!("time of day already passed, running action now");
                (self.action)();
            }
        }
        self.starting_at_next(clock, t, zone).then_every(Interval::days(1))
    }

    /// Like [`Schedule::daily_at`] for a time of day carrying its own
    /// zone.
    pub fn daily_at_zoned<Z, D, I, C>(
        self,
        clock: &C,
        t: &Z,
        run_now_if_past: bool,
    ) -> Result<S::Handle>
    where
        C: ZonedTimeLike<Z, D, I> + InstantLike<I> + Clone + Send + 'static,
        I: Clone + Send + 'static,
    {
        let zone = clock.zone_of(t);
        self.daily_at(clock, t, &zone, run_now_if_past)
    }
}

/// A captured action plus an optional first-invocation instant, awaiting
/// its period. Produced only from [`Schedule`].
pub struct RepeatingSchedule<S: Scheduler> {
    strategy: S,
    action: Task,
    first_delay: Option<Box<dyn FnOnce() -> Interval + Send>>,
}

impl<S: Scheduler> RepeatingSchedule<S> {
    /// Submit as a periodic job with the given `period`.
    ///
    /// The initial delay is zero when no first-invocation instant was
    /// set, otherwise the delay from now to that instant. Non-positive
    /// periods are rejected before reaching the strategy.
    pub fn then_every(self, period: Interval) -> Result<S::Handle> {
        if period.to_nanos() <= 0 {
            return Err(ScheduleError::InvalidConfiguration(format!(
                "period must be positive, got {:?}",
                period
            )));
        }
        let initial = match self.first_delay {
            Some(first) => first(),
            None => Interval::nanos(0),
        };
        debug!(
            initial_delay_ms = initial.to_millis(),
            period_ms = period.to_millis(),
            "submitting periodic schedule"
        );
        self.strategy.schedule_periodic(self.action, initial, period)
    }

    /// Alias of [`RepeatingSchedule::then_every`].
    pub fn with_period(self, period: Interval) -> Result<S::Handle> {
        self.then_every(period)
    }

    /// Submit as a periodic job with a raw nanosecond period, for
    /// strategies with sub-millisecond precision.
    pub fn then_every_nanos(self, period_nanos: i64) -> Result<S::Handle>
    where
        S: NanoScheduler,
    {
        if period_nanos <= 0 {
            return Err(ScheduleError::InvalidConfiguration(format!(
                "period must be positive, got {}ns",
                period_nanos
            )));
        }
        let initial_nanos = match self.first_delay {
            Some(first) => first().magnitude(),
            None => 0,
        };
        debug!(initial_nanos, period_nanos, "submitting periodic schedule (nanos)");
        self.strategy
            .schedule_periodic_nanos(self.action, initial_nanos, period_nanos)
    }
}
