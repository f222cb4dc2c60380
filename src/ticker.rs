use std::time::Duration;

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Upper bound so the undo countdown still updates every second
const MAX_TICK_MS: u64 = 1000;

/// Poll interval for the event loop, clamped to something that keeps timers responsive
pub fn tick_duration(configured_ms: u64) -> Duration {
    if configured_ms == 0 {
        return Duration::from_millis(DEFAULT_TICK_MS);
    }
    Duration::from_millis(configured_ms.min(MAX_TICK_MS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        assert_eq!(tick_duration(250), Duration::from_millis(250));
        assert_eq!(tick_duration(0), Duration::from_millis(DEFAULT_TICK_MS));
        assert_eq!(tick_duration(5000), Duration::from_millis(1000));
    }
}
