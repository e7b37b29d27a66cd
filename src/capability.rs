//! Clock capability traits.
//!
//! The scheduling DSL never names a concrete date/time type. Instead a
//! caller supplies a capability object implementing the traits below for
//! whatever representation it uses (chrono, std, a test clock). Capability
//! instances are stateless pure functions: cheap to clone and safe to call
//! concurrently from any thread.

use std::cmp::Ordering;

use crate::interval::Interval;
use crate::time_unit::TimeUnit;

/// Capability over a zone-agnostic point in time.
///
/// Contract: `plus(x, delay(x, y, unit)) == y` for any `y` reachable from
/// `x` by a whole number of `unit`s.
pub trait InstantLike<I> {
    /// The current instant from the wall clock.
    fn now(&self) -> I;

    /// `x` shifted forward by `amount` (backward for negative magnitudes).
    fn plus(&self, x: &I, amount: Interval) -> I;

    /// `x` shifted backward by `amount`.
    fn minus(&self, x: &I, amount: Interval) -> I {
        self.plus(x, amount.negated())
    }

    /// The interval from `from` to `to`, expressed in `unit`.
    fn delay(&self, from: &I, to: &I, unit: TimeUnit) -> Interval;

    /// Construct an instant from milliseconds since the Unix epoch.
    fn from_epoch_millis(&self, millis: i64) -> I;

    /// Milliseconds since the Unix epoch.
    fn millis_since_epoch(&self, x: &I) -> i64;

    /// The interval from `from` to `to` in nanoseconds, at the finest
    /// precision the representation supports. The default derives it from
    /// the millisecond delay; adapters with sub-millisecond instants
    /// should override it.
    fn delay_nanos(&self, from: &I, to: &I) -> i64 {
        self.delay(from, to, TimeUnit::Milliseconds)
            .to_unit(TimeUnit::Nanoseconds)
            .magnitude()
    }
}

/// Capability over a zone-agnostic year-month-day value.
pub trait DateLike<D> {
    /// The zone representation dates are resolved in.
    type Zone;

    /// Today's date in `zone`.
    fn today(&self, zone: &Self::Zone) -> D;

    /// `x` shifted forward by `days`.
    fn plus_days(&self, x: &D, days: i64) -> D;

    /// `x` shifted backward by `days`.
    fn minus_days(&self, x: &D, days: i64) -> D {
        self.plus_days(x, -days)
    }
}

/// Capability over a zone-agnostic clock time with no date component.
pub trait TimeLike<T, D, I> {
    /// The zone representation times are resolved in.
    type Zone;

    /// Total order on times of day.
    fn compare(&self, x: &T, y: &T) -> Ordering;

    /// The current time of day in `zone`.
    fn current(&self, zone: &Self::Zone) -> T;

    /// The soonest future instant whose time of day in `zone` equals `t`.
    ///
    /// Never returns an instant in the past: if `t` has not yet passed
    /// today (a tie with "now" counts as not yet passed) the result is
    /// today's occurrence, otherwise tomorrow's.
    fn next_occurrence(&self, t: &T, zone: &Self::Zone) -> I;

    /// The instant at time `t` on date `d` in `zone`.
    fn on_date(&self, t: &T, d: &D, zone: &Self::Zone) -> I;
}

/// A time-of-day value that carries its own zone, so zone-qualified
/// operations need no explicit zone argument.
pub trait ZonedTimeLike<Z, D, I>: TimeLike<Z, D, I> {
    /// The zone carried by `z`.
    fn zone_of(&self, z: &Z) -> Self::Zone;
}
