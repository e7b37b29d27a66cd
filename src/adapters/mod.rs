//! Concrete clock capability sets.
//!
//! One module per date/time representation; each is a stateless struct
//! implementing the traits in [`crate::capability`]. The DSL itself
//! only ever sees the traits.

mod chrono_clock;
mod system_clock;

pub use chrono_clock::{ChronoClock, ZonedTime};
pub use system_clock::SystemClock;
