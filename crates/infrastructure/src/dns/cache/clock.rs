use std::sync::OnceLock;
use std::time::{Duration, Instant};

static ORIGIN: OnceLock<Instant> = OnceLock::new();

/// Time elapsed on the process-wide monotonic clock. Wall-clock steps do not
/// move it.
#[inline]
fn elapsed() -> Duration {
    ORIGIN.get_or_init(Instant::now).elapsed()
}

/// Whole seconds on the monotonic clock; used for TTL decay.
#[inline]
pub fn now_secs() -> u64 {
    elapsed().as_secs()
}

/// Microseconds on the monotonic clock; used to stamp query issue order.
#[inline]
pub fn now_micros() -> u64 {
    u64::try_from(elapsed().as_micros()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_never_goes_backwards() {
        let first = now_micros();
        let second = now_micros();
        assert!(second >= first);
        assert!(now_secs() <= now_micros() / 1_000_000 + 1);
    }
}
