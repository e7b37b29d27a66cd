//! Bounding an already-running periodic submission by a future instant
//! or a total duration.
//!
//! [`LimitedScheduledFuture`] composes the submitted handle with the
//! strategy it came from: the bounding operations schedule a brand-new
//! one-shot job whose only work is to cancel the wrapped handle, leaving
//! any in-flight invocation to complete. The wrapped handle itself is
//! never mutated.

use std::sync::Arc;

use crate::capability::{InstantLike, TimeLike, ZonedTimeLike};
use crate::error::Result;
use crate::schedule::schedule;
use crate::strategy::{ScheduledHandle, Scheduler};
use crate::time_unit::TimeUnit;
use crate::interval::Interval;

/// A submitted periodic handle plus the strategy needed to bound it.
pub struct LimitedScheduledFuture<S: Scheduler> {
    handle: Arc<S::Handle>,
    strategy: S,
}

impl<S> LimitedScheduledFuture<S>
where
    S: Scheduler + Clone + Send + 'static,
{
    /// Wrap `handle`, keeping the strategy for the cancellation jobs the
    /// bounding operations will submit.
    pub fn new(handle: S::Handle, strategy: S) -> Self {
        Self {
            handle: Arc::new(handle),
            strategy,
        }
    }

    /// The wrapped handle.
    pub fn handle(&self) -> Arc<S::Handle> {
        Arc::clone(&self.handle)
    }

    /// The instant of the first invocation, or `None` once it has
    /// already started.
    pub fn start_time<I, C>(&self, clock: &C) -> Option<I>
    where
        C: InstantLike<I>,
    {
        let remaining = self.handle.remaining_delay(TimeUnit::Milliseconds);
        if remaining.magnitude() <= 0 {
            None
        } else {
            let now = clock.now();
            Some(clock.plus(&now, remaining))
        }
    }

    /// The remaining delay until the first invocation in `unit`, or
    /// `None` once it has already started.
    pub fn delay(&self, unit: TimeUnit) -> Option<Interval> {
        let remaining = self.handle.remaining_delay(unit);
        if remaining.magnitude() <= 0 {
            None
        } else {
            Some(remaining)
        }
    }

    /// Cancel the wrapped handle at `instant`, without interrupting an
    /// invocation in flight at that point.
    ///
    /// Cancellation is a side effect scheduled for the future: a new
    /// one-shot job is submitted and the original handle is returned
    /// unchanged.
    pub fn until<I, C>(&self, clock: &C, instant: &I) -> Result<Arc<S::Handle>>
    where
        C: InstantLike<I>,
    {
        let wrapped = Arc::clone(&self.handle);
        schedule(self.strategy.clone(), move || {
            wrapped.cancel(true);
        })
        .once_at(clock, instant)?;
        Ok(Arc::clone(&self.handle))
    }

    /// Cancel the wrapped handle at the next occurrence of the time of
    /// day `t` in `zone`.
    pub fn until_next<T, D, I, C>(
        &self,
        clock: &C,
        t: &T,
        zone: &<C as TimeLike<T, D, I>>::Zone,
    ) -> Result<Arc<S::Handle>>
    where
        C: TimeLike<T, D, I> + InstantLike<I>,
    {
        let at = clock.next_occurrence(t, zone);
        self.until(clock, &at)
    }

    /// Like [`LimitedScheduledFuture::until_next`] for a time of day
    /// carrying its own zone.
    pub fn until_next_zoned<Z, D, I, C>(&self, clock: &C, t: &Z) -> Result<Arc<S::Handle>>
    where
        C: ZonedTimeLike<Z, D, I> + InstantLike<I>,
    {
        let zone = clock.zone_of(t);
        let at = clock.next_occurrence(t, &zone);
        self.until(clock, &at)
    }

    /// Cancel the wrapped handle `span` after its first invocation.
    ///
    /// The cutoff is measured from the handle's own first firing, not
    /// from now: a handle still waiting out its initial delay is never
    /// cut short before it fires at all.
    pub fn for_the_next<I, C>(&self, clock: &C, span: Interval) -> Result<Arc<S::Handle>>
    where
        C: InstantLike<I>,
    {
        let remaining = self.handle.remaining_delay(TimeUnit::Milliseconds);
        let now = clock.now();
        let first_firing = if remaining.magnitude() > 0 {
            clock.plus(&now, remaining)
        } else {
            now
        };
        let at = clock.plus(&first_firing, span);
        self.until(clock, &at)
    }
}
