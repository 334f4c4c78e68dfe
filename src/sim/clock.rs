//! Frame clock: turns external timestamps into clamped simulation deltas

use crate::consts::MAX_FRAME_DT;

/// Tracks the previous frame timestamp. There is no sub-stepping: a long gap
/// (backgrounded tab, debugger) collapses into a single `MAX_FRAME_DT` step.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous timestamp; the next frame yields a zero delta
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Seconds since the previous call, clamped to `[0, MAX_FRAME_DT]`.
    /// A non-finite timestamp yields zero and is not remembered.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, MAX_FRAME_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(12_345.0), 0.0);
        assert!((clock.delta(12_361.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_long_gap_is_clamped() {
        let mut clock = FrameClock::new();
        clock.delta(0.0);
        assert_eq!(clock.delta(5_000.0), MAX_FRAME_DT);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = FrameClock::new();
        clock.delta(1_000.0);
        assert_eq!(clock.delta(900.0), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.delta(0.0);
        clock.reset();
        assert_eq!(clock.delta(10_000.0), 0.0);
    }

    #[test]
    fn test_non_finite_timestamp() {
        let mut clock = FrameClock::new();
        clock.delta(1_000.0);
        assert_eq!(clock.delta(f64::NAN), 0.0);
        assert_eq!(clock.delta(f64::INFINITY), 0.0);
        assert!((clock.delta(1_020.0) - 0.02).abs() < 1e-6);
    }
}
