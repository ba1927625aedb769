//! Time sources for `iat` and `expires`.

/// Supplies the current time in whole seconds since the Unix epoch.
pub trait Clock {
    fn now(&self) -> i64;
}

/// Wall clock, UTC.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}
