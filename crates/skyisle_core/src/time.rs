use std::time::{Duration, Instant};

/// One sample of the frame clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock was created.
    pub elapsed: f32,
    /// Seconds since the previous tick.
    pub delta: f32,
    /// Number of ticks taken so far, including this one.
    pub frame: u64,
}

/// Monotonic frame clock.
///
/// Every animated entity reads its time from the same clock, so their motions
/// stay phase-locked. Elapsed time never decreases and delta is never
/// negative, even if the caller feeds an instant older than the last sample.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start_time: Instant,
    last_update: Instant,
    /// Time since last tick
    pub delta: Duration,
    /// Total elapsed time since creation
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Creates a new clock starting from now.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Creates a clock whose origin is `start`.
    #[must_use]
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start_time: start,
            last_update: start,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Samples wall-clock time. Call once per rendered frame.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Samples the clock at an explicit instant.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let now = now.max(self.last_update);
        self.delta = now - self.last_update;
        self.elapsed = now - self.start_time;
        self.last_update = now;
        self.frame_count += 1;
        self.sample()
    }

    /// The most recent sample, without advancing.
    #[must_use]
    pub fn sample(&self) -> FrameTime {
        FrameTime {
            elapsed: self.elapsed.as_secs_f32(),
            delta: self.delta.as_secs_f32(),
            frame: self.frame_count,
        }
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}
