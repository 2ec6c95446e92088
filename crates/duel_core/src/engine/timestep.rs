/// timestep.rs
/// Fixed Timestep Constants
///
/// One tick is one simulation step. All speeds in the engine are expressed
/// per tick, so the rate below only matters to callers that drive the loop
/// in real time or convert tick counts to match clock time.

/// Simulation steps per second when driven in real time
pub const TICKS_PER_SECOND: u32 = 60;

/// Convert a tick count into elapsed seconds
pub fn ticks_to_seconds(ticks: u64) -> f64 {
    ticks as f64 / TICKS_PER_SECOND as f64
}

/// Ticks needed to cover `seconds` of match time (rounded up)
pub fn seconds_to_ticks(seconds: f64) -> u64 {
    if seconds <= 0.0 {
        return 0;
    }
    (seconds * TICKS_PER_SECOND as f64).ceil() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestep_consistency() {
        assert_eq!(TICKS_PER_SECOND, 60);
        assert!((ticks_to_seconds(1) * TICKS_PER_SECOND as f64 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ticks_per_minute() {
        assert_eq!(seconds_to_ticks(60.0), 3600);
        assert!((ticks_to_seconds(3600) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_duration() {
        assert_eq!(seconds_to_ticks(0.0), 0);
        assert_eq!(seconds_to_ticks(-3.0), 0);
    }
}
