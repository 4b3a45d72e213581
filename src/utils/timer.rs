//! Scoped wall-clock stopwatch.
//!
//! Every measurement owns its own [`TimerHandle`]: there is no shared
//! "last timestamp", so nested or overlapping measurements are independent.
//! The clock is [`Instant`], which is monotonic and unaffected by wall-clock
//! adjustments. Resolution is platform dependent but well below a millisecond
//! on every supported OS.

use std::time::Instant;

/// Entry point for measurements
pub struct Timer;

/// A started measurement. Consumed by [`Timer::stop`].
#[derive(Clone, Copy, Debug)]
#[must_use = "a timer handle does nothing unless stopped"]
pub struct TimerHandle {
    started: Instant,
}

impl Timer {
    /// Capture a monotonic clock reading.
    #[inline(always)]
    pub fn start() -> TimerHandle {
        TimerHandle {
            started: Instant::now(),
        }
    }

    /// Elapsed seconds since `handle` was started.
    #[inline(always)]
    pub fn stop(handle: TimerHandle) -> f64 {
        handle.stop()
    }

    /// Time exactly one call of `f`, returning `(seconds, result)`.
    #[inline(always)]
    pub fn measure<F, R>(f: F) -> (f64, R)
    where
        F: FnOnce() -> R,
    {
        let handle = Self::start();
        let result = f();
        (Self::stop(handle), result)
    }
}

impl TimerHandle {
    #[inline(always)]
    pub fn stop(self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hint::black_box;
    use std::time::Duration;

    #[test]
    fn test_elapsed_is_non_negative() {
        let handle = Timer::start();
        let seconds = Timer::stop(handle);
        assert!(seconds >= 0.0);
    }

    #[test]
    fn test_measures_sleep() {
        let (seconds, ()) = Timer::measure(|| std::thread::sleep(Duration::from_millis(5)));
        assert!(seconds >= 0.005, "measured {seconds}s for a 5ms sleep");
    }

    #[test]
    fn test_nested_handles_are_independent() {
        let outer = Timer::start();
        let inner = Timer::start();
        let inner_s = inner.stop();
        let outer_s = outer.stop();
        assert!(outer_s >= inner_s);
    }

    #[test]
    fn test_measure_returns_result() {
        let (_, value) = Timer::measure(|| black_box(21) * 2);
        assert_eq!(value, 42);
    }
}
