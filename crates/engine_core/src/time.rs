//! Frame timing for the render loop.

use std::time::{Duration, Instant};

/// How often the frame clock reports throughput to the log.
const REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Tracks per-frame delta time and total elapsed time.
#[derive(Debug)]
pub struct FrameClock {
    /// Time when the clock started.
    start: Instant,
    /// Time of the last tick.
    last_tick: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Frames counted since start.
    frame_count: u64,
    /// Frames counted since the last log report.
    frames_since_report: u32,
    /// Time of the last log report.
    last_report: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Start a new clock at the current instant.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            start: now,
            last_tick: now,
            delta: Duration::ZERO,
            frame_count: 0,
            frames_since_report: 0,
            last_report: now,
        }
    }

    /// Advance the clock. Call once per redraw.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        self.delta = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        self.frame_count += 1;
        self.frames_since_report += 1;

        let since_report = now.saturating_duration_since(self.last_report);
        if since_report >= REPORT_INTERVAL {
            let fps = self.frames_since_report as f32 / since_report.as_secs_f32();
            log::debug!("{} frames, {:.1} fps", self.frame_count, fps);
            self.frames_since_report = 0;
            self.last_report = now;
        }
    }

    /// Delta time of the last frame in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Seconds between clock start and the last tick.
    pub fn elapsed_seconds(&self) -> f32 {
        self.last_tick.saturating_duration_since(self.start).as_secs_f32()
    }

    /// Number of ticks so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Mean frames per second since the clock started.
    pub fn average_fps(&self) -> f32 {
        let elapsed = self.elapsed_seconds();
        if elapsed > 0.0 {
            self.frame_count as f32 / elapsed
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clock_is_at_rest() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.delta_seconds(), 0.0);
        assert_eq!(clock.average_fps(), 0.0);
    }

    #[test]
    fn tick_accumulates_delta_and_elapsed() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        clock.tick_at(t0 + Duration::from_millis(20));
        clock.tick_at(t0 + Duration::from_millis(50));

        assert_eq!(clock.frame_count(), 2);
        assert!((clock.delta_seconds() - 0.030).abs() < 1e-6);
        assert!((clock.elapsed_seconds() - 0.050).abs() < 1e-6);
        assert!((clock.average_fps() - 2.0 / 0.050).abs() < 0.01);
    }

    #[test]
    fn report_resets_window() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        clock.tick_at(t0 + REPORT_INTERVAL);
        assert_eq!(clock.frames_since_report, 0);
        clock.tick_at(t0 + REPORT_INTERVAL + Duration::from_millis(16));
        assert_eq!(clock.frames_since_report, 1);
    }
}
