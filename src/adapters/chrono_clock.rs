//! Chrono capability set: `DateTime<Utc>` instants, `NaiveDate` dates,
//! `NaiveTime` times of day, `FixedOffset` zones.

use std::cmp::Ordering;

use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, NaiveDate, NaiveTime, Utc};

use crate::capability::{DateLike, InstantLike, TimeLike, ZonedTimeLike};
use crate::interval::Interval;
use crate::time_unit::TimeUnit;

/// Stateless capability object over chrono's types.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoClock;

/// A time of day carrying its own fixed-offset zone, for the
/// zone-qualified DSL operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonedTime {
    pub time: NaiveTime,
    pub offset: FixedOffset,
}

impl ZonedTime {
    pub fn new(time: NaiveTime, offset: FixedOffset) -> Self {
        Self { time, offset }
    }
}

fn span_nanos(span: ChronoDuration) -> i64 {
    span.num_nanoseconds()
        .unwrap_or_else(|| span.num_milliseconds().saturating_mul(1_000_000))
}

impl InstantLike<DateTime<Utc>> for ChronoClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn plus(&self, x: &DateTime<Utc>, amount: Interval) -> DateTime<Utc> {
        let nanos = amount.to_nanos().clamp(i64::MIN as i128, i64::MAX as i128) as i64;
        *x + ChronoDuration::nanoseconds(nanos)
    }

    fn delay(&self, from: &DateTime<Utc>, to: &DateTime<Utc>, unit: TimeUnit) -> Interval {
        Interval::nanos(span_nanos(*to - *from)).to_unit(unit)
    }

    fn from_epoch_millis(&self, millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
    }

    fn millis_since_epoch(&self, x: &DateTime<Utc>) -> i64 {
        x.timestamp_millis()
    }

    fn delay_nanos(&self, from: &DateTime<Utc>, to: &DateTime<Utc>) -> i64 {
        span_nanos(*to - *from)
    }
}

impl DateLike<NaiveDate> for ChronoClock {
    type Zone = FixedOffset;

    fn today(&self, zone: &FixedOffset) -> NaiveDate {
        Utc::now().with_timezone(zone).date_naive()
    }

    fn plus_days(&self, x: &NaiveDate, days: i64) -> NaiveDate {
        *x + ChronoDuration::days(days)
    }
}

impl TimeLike<NaiveTime, NaiveDate, DateTime<Utc>> for ChronoClock {
    type Zone = FixedOffset;

    fn compare(&self, x: &NaiveTime, y: &NaiveTime) -> Ordering {
        x.cmp(y)
    }

    fn current(&self, zone: &FixedOffset) -> NaiveTime {
        Utc::now().with_timezone(zone).time()
    }

    fn next_occurrence(&self, t: &NaiveTime, zone: &FixedOffset) -> DateTime<Utc> {
        let now_local = Utc::now().with_timezone(zone);
        // A tie with "now" counts as not yet passed.
        let date = if now_local.time() <= *t {
            now_local.date_naive()
        } else {
            now_local.date_naive() + ChronoDuration::days(1)
        };
        self.on_date(t, &date, zone)
    }

    fn on_date(&self, t: &NaiveTime, d: &NaiveDate, zone: &FixedOffset) -> DateTime<Utc> {
        let local = d.and_time(*t);
        let utc_naive = local - ChronoDuration::seconds(zone.local_minus_utc() as i64);
        DateTime::<Utc>::from_naive_utc_and_offset(utc_naive, Utc)
    }
}

impl TimeLike<ZonedTime, NaiveDate, DateTime<Utc>> for ChronoClock {
    type Zone = FixedOffset;

    fn compare(&self, x: &ZonedTime, y: &ZonedTime) -> Ordering {
        x.time.cmp(&y.time)
    }

    fn current(&self, zone: &FixedOffset) -> ZonedTime {
        ZonedTime::new(Utc::now().with_timezone(zone).time(), *zone)
    }

    fn next_occurrence(&self, t: &ZonedTime, zone: &FixedOffset) -> DateTime<Utc> {
        <Self as TimeLike<NaiveTime, NaiveDate, DateTime<Utc>>>::next_occurrence(
            self, &t.time, zone,
        )
    }

    fn on_date(&self, t: &ZonedTime, d: &NaiveDate, zone: &FixedOffset) -> DateTime<Utc> {
        <Self as TimeLike<NaiveTime, NaiveDate, DateTime<Utc>>>::on_date(self, &t.time, d, zone)
    }
}

impl ZonedTimeLike<ZonedTime, NaiveDate, DateTime<Utc>> for ChronoClock {
    fn zone_of(&self, z: &ZonedTime) -> FixedOffset {
        z.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn plus_and_delay_round_trip() {
        let clock = ChronoClock;
        let x = clock.from_epoch_millis(1_700_000_000_000);
        let y = clock.plus(&x, Interval::millis(123_456));
        let measured = clock.delay(&x, &y, TimeUnit::Milliseconds);
        assert_eq!(clock.plus(&x, measured), y);
        assert_eq!(measured.magnitude(), 123_456);
    }

    #[test]
    fn epoch_millis_round_trip() {
        let clock = ChronoClock;
        let x = clock.from_epoch_millis(86_400_123);
        assert_eq!(clock.millis_since_epoch(&x), 86_400_123);
    }

    #[test]
    fn minus_defaults_to_negated_plus() {
        let clock = ChronoClock;
        let x = clock.from_epoch_millis(1_000_000);
        assert_eq!(clock.minus(&x, Interval::seconds(10)), clock.from_epoch_millis(990_000));
    }

    #[test]
    fn delay_nanos_is_native_precision() {
        let clock = ChronoClock;
        let x = clock.from_epoch_millis(0);
        let y = clock.plus(&x, Interval::nanos(1_500));
        assert_eq!(clock.delay_nanos(&x, &y), 1_500);
    }

    #[test]
    fn on_date_combines_in_the_given_zone() {
        let clock = ChronoClock;
        let d = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let t = NaiveTime::from_hms_opt(6, 30, 0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let at = clock.on_date(&t, &d, &plus_two);
        // 06:30 at UTC+2 is 04:30 UTC.
        assert_eq!(at, clock.from_epoch_millis(1_710_045_000_000));
        assert_eq!(at.with_timezone(&plus_two).time(), t);
    }

    #[test]
    fn next_occurrence_is_never_in_the_past() {
        let clock = ChronoClock;
        for offset_hours in [-11, -5, 0, 3, 11] {
            let zone = FixedOffset::east_opt(offset_hours * 3600).unwrap();
            for t in [
                NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(23, 59, 59).unwrap(),
                clock.current(&zone),
            ] {
                let at = clock.next_occurrence(&t, &zone);
                assert!(at >= Utc::now() - ChronoDuration::seconds(1), "{:?} in {:?}", t, zone);
                assert!(at <= Utc::now() + ChronoDuration::days(1));
                assert_eq!(at.with_timezone(&zone).time(), t);
            }
        }
    }

    #[test]
    fn zoned_next_occurrence_uses_the_carried_zone() {
        let clock = ChronoClock;
        let plus_nine = FixedOffset::east_opt(9 * 3600).unwrap();
        let z = ZonedTime::new(NaiveTime::from_hms_opt(9, 0, 0).unwrap(), plus_nine);
        let zone = clock.zone_of(&z);
        assert_eq!(zone, plus_nine);
        let at = clock.next_occurrence(&z, &zone);
        assert_eq!(at.with_timezone(&plus_nine).time(), z.time);
    }

    #[test]
    fn today_respects_the_zone() {
        let clock = ChronoClock;
        let d = clock.today(&utc());
        assert_eq!(d, Utc::now().date_naive());
        assert_eq!(clock.plus_days(&d, 1), d + ChronoDuration::days(1));
        assert_eq!(clock.minus_days(&d, 1), d - ChronoDuration::days(1));
    }
}
