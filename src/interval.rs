//! The concrete temporal value of the crate.
//!
//! Everything else in the DSL is either capability-polymorphic (instants,
//! dates, times of day) or a pure function of [`Interval`].

use std::ops::{Mul, Neg};
use std::sync::{Condvar, Mutex};
use std::thread;
use std::time::Duration;

use crate::capability::InstantLike;
use crate::error::{Result, ScheduleError};
use crate::time_unit::TimeUnit;

/// An immutable duration: a signed magnitude paired with a [`TimeUnit`].
///
/// All arithmetic produces a new `Interval`; conversions go through the
/// single canonical [`TimeUnit::convert`] so that re-converting at the
/// same unit is idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    magnitude: i64,
    unit: TimeUnit,
}

impl Interval {
    pub const fn new(magnitude: i64, unit: TimeUnit) -> Self {
        Self { magnitude, unit }
    }

    pub const fn nanos(magnitude: i64) -> Self {
        Self::new(magnitude, TimeUnit::Nanoseconds)
    }

    pub const fn micros(magnitude: i64) -> Self {
        Self::new(magnitude, TimeUnit::Microseconds)
    }

    pub const fn millis(magnitude: i64) -> Self {
        Self::new(magnitude, TimeUnit::Milliseconds)
    }

    pub const fn seconds(magnitude: i64) -> Self {
        Self::new(magnitude, TimeUnit::Seconds)
    }

    pub const fn minutes(magnitude: i64) -> Self {
        Self::new(magnitude, TimeUnit::Minutes)
    }

    pub const fn hours(magnitude: i64) -> Self {
        Self::new(magnitude, TimeUnit::Hours)
    }

    pub const fn days(magnitude: i64) -> Self {
        Self::new(magnitude, TimeUnit::Days)
    }

    pub const fn magnitude(&self) -> i64 {
        self.magnitude
    }

    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Convert to `unit`. Downward conversions truncate toward zero.
    pub const fn to_unit(self, unit: TimeUnit) -> Interval {
        Interval::new(TimeUnit::convert(self.magnitude, self.unit, unit), unit)
    }

    /// Total length in nanoseconds, widened to avoid overflow for coarse
    /// units with large magnitudes.
    pub const fn to_nanos(self) -> i128 {
        self.magnitude as i128 * self.unit.nanos_per_unit()
    }

    /// Total length in milliseconds, truncated toward zero.
    pub const fn to_millis(self) -> i64 {
        TimeUnit::convert(self.magnitude, self.unit, TimeUnit::Milliseconds)
    }

    /// Same magnitude with the sign flipped, same unit.
    pub const fn negated(self) -> Interval {
        Interval::new(-self.magnitude, self.unit)
    }

    /// Magnitude scaled by `factor`, same unit. The building block for
    /// linear and exponential backoff compositions.
    pub const fn scaled(self, factor: i64) -> Interval {
        Interval::new(self.magnitude * factor, self.unit)
    }

    /// As a `std::time::Duration`; negative intervals clamp to zero.
    pub fn to_duration(self) -> Duration {
        let nanos = self.to_nanos();
        if nanos <= 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(nanos.min(u64::MAX as i128) as u64)
        }
    }

    /// The instant this interval after `x`.
    pub fn after<I, C: InstantLike<I>>(self, clock: &C, x: &I) -> I {
        clock.plus(x, self)
    }

    /// The instant this interval before `x`.
    pub fn before<I, C: InstantLike<I>>(self, clock: &C, x: &I) -> I {
        clock.minus(x, self)
    }

    /// The instant this interval from now.
    pub fn from_now<I, C: InstantLike<I>>(self, clock: &C) -> I {
        let now = clock.now();
        clock.plus(&now, self)
    }

    /// The instant this interval ago.
    pub fn ago<I, C: InstantLike<I>>(self, clock: &C) -> I {
        let now = clock.now();
        clock.minus(&now, self)
    }

    /// Block the calling thread for this interval.
    pub fn sleep(self) {
        thread::sleep(self.to_duration());
    }

    /// Block on `signal` for at most this interval.
    ///
    /// Returns `Ok(())` when the full interval elapsed and
    /// `Err(Interrupted)` when the wait was cut short by a notification
    /// (or the lock was poisoned). Blocks only the calling thread.
    pub fn wait_on<T>(self, lock: &Mutex<T>, signal: &Condvar) -> Result<()> {
        let guard = lock.lock().map_err(|_| ScheduleError::Interrupted)?;
        let (_guard, timeout) = signal
            .wait_timeout(guard, self.to_duration())
            .map_err(|_| ScheduleError::Interrupted)?;
        if timeout.timed_out() {
            Ok(())
        } else {
            Err(ScheduleError::Interrupted)
        }
    }

    /// Wait at most this interval for `handle`'s thread to finish.
    ///
    /// Joins the thread and returns its value when it finished in time;
    /// returns `Ok(None)` on timeout, leaving the thread running
    /// detached. A panicked thread surfaces as `Err(Interrupted)`.
    pub fn join_to<T>(self, handle: thread::JoinHandle<T>) -> Result<Option<T>> {
        let deadline = std::time::Instant::now() + self.to_duration();
        while !handle.is_finished() {
            let now = std::time::Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            thread::sleep((deadline - now).min(Duration::from_millis(1)));
        }
        handle.join().map(Some).map_err(|_| ScheduleError::Interrupted)
    }
}

impl Neg for Interval {
    type Output = Interval;

    fn neg(self) -> Interval {
        self.negated()
    }
}

impl Mul<i64> for Interval {
    type Output = Interval;

    fn mul(self, factor: i64) -> Interval {
        self.scaled(factor)
    }
}
