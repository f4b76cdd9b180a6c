use fnet_application::ports::Clock;
use std::time::Instant;

/// Tick counter derived from [`Instant`]. Ticks wrap like a hardware
/// timer counter.
pub struct MonotonicClock {
    start: Instant,
    period_ms: u64,
}

impl MonotonicClock {
    pub fn new(period_ms: u64) -> Self {
        Self {
            start: Instant::now(),
            period_ms: period_ms.max(1),
        }
    }
}

impl Clock for MonotonicClock {
    fn ticks(&self) -> u32 {
        (self.start.elapsed().as_millis() as u64 / self.period_ms) as u32
    }

    fn period_ms(&self) -> u64 {
        self.period_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_elapsed_covers_sleep() {
        let clock = MonotonicClock::new(5);
        let start = clock.ticks();
        std::thread::sleep(Duration::from_millis(30));
        assert!(clock.elapsed_ms(start) >= 25);
    }

    #[test]
    fn test_elapsed_across_wrap() {
        let clock = MonotonicClock::new(10);
        let now = clock.ticks();
        let before_wrap = now.wrapping_sub(3);
        assert!(clock.elapsed_ms(before_wrap) >= 30);
    }
}
