//! Std capability set: `SystemTime` instants straight off the system
//! clock. Instant-only; date and time-of-day scheduling needs a richer
//! representation such as [`super::ChronoClock`].

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::capability::InstantLike;
use crate::interval::Interval;
use crate::time_unit::TimeUnit;

/// Stateless capability object over `std::time::SystemTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

fn signed_span_nanos(from: &SystemTime, to: &SystemTime) -> i64 {
    match to.duration_since(*from) {
        Ok(span) => span.as_nanos().min(i64::MAX as u128) as i64,
        Err(err) => -(err.duration().as_nanos().min(i64::MAX as u128) as i64),
    }
}

impl InstantLike<SystemTime> for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }

    fn plus(&self, x: &SystemTime, amount: Interval) -> SystemTime {
        let nanos = amount.to_nanos();
        if nanos >= 0 {
            *x + Duration::from_nanos(nanos.min(u64::MAX as i128) as u64)
        } else {
            *x - Duration::from_nanos((-nanos).min(u64::MAX as i128) as u64)
        }
    }

    fn delay(&self, from: &SystemTime, to: &SystemTime, unit: TimeUnit) -> Interval {
        Interval::nanos(signed_span_nanos(from, to)).to_unit(unit)
    }

    fn from_epoch_millis(&self, millis: i64) -> SystemTime {
        if millis >= 0 {
            UNIX_EPOCH + Duration::from_millis(millis as u64)
        } else {
            UNIX_EPOCH - Duration::from_millis(millis.unsigned_abs())
        }
    }

    fn millis_since_epoch(&self, x: &SystemTime) -> i64 {
        Interval::nanos(signed_span_nanos(&UNIX_EPOCH, x))
            .to_unit(TimeUnit::Milliseconds)
            .magnitude()
    }

    fn delay_nanos(&self, from: &SystemTime, to: &SystemTime) -> i64 {
        signed_span_nanos(from, to)
    }
}
