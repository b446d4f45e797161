use chrono::Utc;

/// Supplies the `oauth_timestamp` value of a request.
pub trait Clock {
    /// Seconds since the Unix epoch.
    fn timestamp(&self) -> i64;
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A clock stopped at a given Unix time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn timestamp(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.timestamp() > 1_577_836_800);
    }

    #[test]
    fn fixed_clock() {
        assert_eq!(FixedClock(1_318_622_958).timestamp(), 1_318_622_958);
    }
}
