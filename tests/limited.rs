//! Bounding running periodic submissions with LimitedScheduledFuture.
//!
//! Runs with the tokio clock paused; cutoffs are placed between ticks so
//! the expected invocation counts are deterministic.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cadenza::{
    schedule, ChronoClock, InstantLike, Interval, LimitedScheduledFuture, ScheduledHandle,
    SystemClock, TimeUnit, TokioScheduler,
};

fn counting() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
    let counter = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&counter);
    (counter, move || {
        inner.fetch_add(1, Ordering::SeqCst);
    })
}

#[tokio::test(start_paused = true)]
async fn for_the_next_allows_the_span_then_cancels() {
    let strategy = TokioScheduler::new();
    let clock = SystemClock;
    let (count, action) = counting();
    let handle = schedule(strategy, action)
        .immediately_then_every(Interval::millis(100))
        .unwrap();

    // Cutoff between the third and fourth tick.
    let limited = LimitedScheduledFuture::new(handle, strategy);
    let original = limited.for_the_next(&clock, Interval::millis(250)).unwrap();

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(count.load(Ordering::SeqCst), 3, "expected firings at 0/100/200ms");
    assert!(original.is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn for_the_next_counts_from_the_first_firing() {
    let strategy = TokioScheduler::new();
    let clock = SystemClock;
    let (count, action) = counting();
    let handle = schedule(strategy, action)
        .starting_in(&clock, Interval::millis(200))
        .then_every(Interval::millis(100))
        .unwrap();

    // Span shorter than the initial delay: the cutoff lands at ~350ms,
    // after the 200ms and 300ms firings. The handle is not cut short
    // before it fires at all.
    let limited = LimitedScheduledFuture::new(handle, strategy);
    limited.for_the_next(&clock, Interval::millis(150)).unwrap();

    tokio::time::sleep(Duration::from_millis(800)).await;
    assert_eq!(count.load(Ordering::SeqCst), 2, "expected firings at 200/300ms");
}

#[tokio::test(start_paused = true)]
async fn until_cancels_at_the_given_instant() {
    let strategy = TokioScheduler::new();
    let clock = SystemClock;
    let (count, action) = counting();
    let handle = schedule(strategy, action)
        .immediately_then_every(Interval::millis(100))
        .unwrap();

    let limited = LimitedScheduledFuture::new(handle, strategy);
    let cutoff = Interval::millis(250).from_now(&clock);
    let original = limited.until(&clock, &cutoff).unwrap();
    assert!(!original.is_cancelled(), "cancellation is deferred, not synchronous");

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(count.load(Ordering::SeqCst), 3);
    assert!(original.is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn until_next_cancels_at_the_next_time_of_day() {
    let strategy = TokioScheduler::new();
    let clock = ChronoClock;
    let zone = chrono::FixedOffset::east_opt(0).unwrap();
    let now_t = cadenza::TimeLike::<chrono::NaiveTime, _, _>::current(&clock, &zone);
    let (cutoff, wrapped) = now_t.overflowing_add_signed(chrono::Duration::minutes(1));
    if wrapped != 0 {
        // Within a minute of midnight the addition wraps; skip.
        return;
    }

    let (count, action) = counting();
    let handle = schedule(strategy, action)
        .immediately_then_every(Interval::seconds(25))
        .unwrap();

    let limited = LimitedScheduledFuture::new(handle, strategy);
    limited.until_next(&clock, &cutoff, &zone).unwrap();

    tokio::time::sleep(Duration::from_secs(120)).await;
    // Cutoff at ~60s: firings at 0/25/50s.
    assert_eq!(count.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn until_next_zoned_uses_the_carried_zone() {
    let strategy = TokioScheduler::new();
    let clock = ChronoClock;
    let offset = chrono::FixedOffset::east_opt(5 * 3600).unwrap();
    let now_t = cadenza::TimeLike::<chrono::NaiveTime, _, _>::current(&clock, &offset);
    let (cutoff, wrapped) = now_t.overflowing_add_signed(chrono::Duration::minutes(1));
    if wrapped != 0 {
        return;
    }
    let cutoff = cadenza::ZonedTime::new(cutoff, offset);

    let (count, action) = counting();
    let handle = schedule(strategy, action)
        .immediately_then_every(Interval::seconds(25))
        .unwrap();

    let limited = LimitedScheduledFuture::new(handle, strategy);
    limited.until_next_zoned(&clock, &cutoff).unwrap();

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(count.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn start_time_and_delay_report_the_pending_first_firing() {
    let strategy = TokioScheduler::new();
    let clock = SystemClock;
    let handle = schedule(strategy, || {})
        .starting_in(&clock, Interval::millis(500))
        .then_every(Interval::millis(100))
        .unwrap();
    let limited = LimitedScheduledFuture::new(handle, strategy);

    let delay = limited.delay(TimeUnit::Milliseconds).expect("still pending");
    assert!((400..=600).contains(&delay.magnitude()), "delay {}ms", delay.magnitude());

    let start = limited.start_time(&clock).expect("still pending");
    let until_start = clock.delay(&clock.now(), &start, TimeUnit::Milliseconds);
    assert!((400..=600).contains(&until_start.magnitude()));

    tokio::time::sleep(Duration::from_millis(700)).await;
    assert!(limited.delay(TimeUnit::Milliseconds).is_none(), "already started");
    assert!(limited.start_time(&clock).is_none());
    limited.handle().cancel(true);
}
