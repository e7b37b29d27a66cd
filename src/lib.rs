//! # Cadenza - Fluent Deferred and Periodic Scheduling for Rust
//!
//! A small builder DSL for expressing "run this action once at time X"
//! and "run it every Y starting at Z, stop it at next midnight", agnostic
//! to both the date/time library and the execution engine underneath.
//!
//! ## Features
//!
//! - **One-shot scheduling**: at an instant, after an interval, or at the
//!   next occurrence of a time of day
//! - **Periodic scheduling**: immediately or from a first instant, with
//!   any period down to raw nanoseconds
//! - **Bounded periodics**: cancel a running periodic at an instant or
//!   after a span, without cutting an in-flight invocation short
//! - **Clock-agnostic**: the DSL is generic over capability traits;
//!   chrono and std adapters ship in [`adapters`]
//! - **Strategy-agnostic**: work is submitted through the [`Scheduler`]
//!   trait; the tokio-backed [`TokioScheduler`] ships in the crate
//!
//! ## Quick Start
//!
//! ```no_run
//! use cadenza::{schedule, ChronoClock, Interval, LimitedScheduledFuture, TokioScheduler};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cadenza::ScheduleError> {
//!     let strategy = TokioScheduler::new();
//!     let clock = ChronoClock;
//!
//!     // Run once, five seconds from now.
//!     schedule(strategy, || println!("later")).once_in(&clock, Interval::seconds(5))?;
//!
//!     // Run every minute, starting in ten seconds.
//!     let handle = schedule(strategy, || println!("tick"))
//!         .starting_in(&clock, Interval::seconds(10))
//!         .then_every(Interval::minutes(1))?;
//!
//!     // Let it run for an hour after its first firing, then stop.
//!     LimitedScheduledFuture::new(handle, strategy)
//!         .for_the_next(&clock, Interval::hours(1))?;
//!
//!     tokio::signal::ctrl_c().await.ok();
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod capability;
pub mod error;
pub mod interval;
pub mod limited;
pub mod schedule;
pub mod strategy;
pub mod time_unit;
pub mod tokio_strategy;

pub use adapters::{ChronoClock, SystemClock, ZonedTime};
pub use capability::{DateLike, InstantLike, TimeLike, ZonedTimeLike};
pub use error::{Result, ScheduleError};
pub use interval::Interval;
pub use limited::LimitedScheduledFuture;
pub use schedule::{schedule, RepeatingSchedule, Schedule};
pub use strategy::{NanoScheduler, ScheduledHandle, Scheduler, Task};
pub use time_unit::TimeUnit;
pub use tokio_strategy::{TokioHandle, TokioScheduler};
