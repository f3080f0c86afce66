//! Time source for the cooperative loop.

use embedded_hal::delay::DelayNs;

/// Monotonic milliseconds plus busy-wait delays.
///
/// Clones must share one timeline: the score scanner holds its own copy to
/// time digit holds while the main loop measures waits with another.
pub trait Clock: DelayNs + Clone {
    fn now_ms(&self) -> u64;

    /// Milliseconds since `start`.
    fn elapsed_ms(&self, start: u64) -> u64 {
        self.now_ms().saturating_sub(start)
    }
}
