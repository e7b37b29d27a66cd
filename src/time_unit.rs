/// Time unit for interval-based scheduling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Length of one unit in nanoseconds.
    pub const fn nanos_per_unit(&self) -> i128 {
        match self {
            TimeUnit::Nanoseconds => 1,
            TimeUnit::Microseconds => 1_000,
            TimeUnit::Milliseconds => 1_000_000,
            TimeUnit::Seconds => 1_000_000_000,
            TimeUnit::Minutes => 60 * 1_000_000_000,
            TimeUnit::Hours => 3_600 * 1_000_000_000,
            TimeUnit::Days => 86_400 * 1_000_000_000,
        }
    }

    /// Convert a magnitude between units.
    ///
    /// All conversions in the crate go through this single function so that
    /// re-converting at the same unit is idempotent. Downward conversions
    /// truncate toward zero (1500ms -> 1s).
    pub const fn convert(magnitude: i64, from: TimeUnit, to: TimeUnit) -> i64 {
        (magnitude as i128 * from.nanos_per_unit() / to.nanos_per_unit()) as i64
    }
}
