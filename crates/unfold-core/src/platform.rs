//! Platform abstraction traits for the Unfold runtime.
//!
//! The runtime never talks to a windowing system or a browser directly. The
//! host hands it a scheduler to poke when work is queued, and drives frames
//! itself using whatever clock it owns.

use web_time::Instant;

/// Schedules work for the runtime.
///
/// Implementations are responsible for arranging that the host calls
/// [`RuntimeHandle::run_frame`](crate::RuntimeHandle::run_frame) soon. They
/// must be safe to use from multiple threads because task wakers may be
/// cloned across threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Provides timing information for the runtime.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of milliseconds elapsed since `since`.
    fn elapsed_millis(&self, since: Self::Instant) -> u64;
}

/// Wall clock backed by `web_time`, usable both natively and on wasm.
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: Instant,
}

impl StdClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Monotonic frame timestamp in nanoseconds since the clock was created.
    pub fn frame_time_nanos(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, since: Instant) -> u64 {
        u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
