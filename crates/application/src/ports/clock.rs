/// Monotonic tick source.
pub trait Clock {
    /// Ticks since start. Wraps around; compare with [`Clock::elapsed_ms`].
    fn ticks(&self) -> u32;

    fn period_ms(&self) -> u64;

    /// Milliseconds from `since` to now, tolerating one wrap of the counter.
    fn elapsed_ms(&self, since: u32) -> u64 {
        self.ticks().wrapping_sub(since) as u64 * self.period_ms()
    }
}
