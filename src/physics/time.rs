//! Frame timing. The host supplies timestamps; the core only measures deltas.

use std::time::Duration;

use crate::error::{PhysicsError, Result};

/// How the frame delta scales translations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeScale {
    /// Ignore the frame delta: every step moves bodies by one velocity unit.
    #[default]
    Unit,
    /// Scale by `delta_seconds * fps`, so a frame of exactly `1/fps`
    /// seconds scales by 1.
    FrameRate { fps: f32 },
}

impl TimeScale {
    /// Checks that a frame rate is finite and positive.
    pub fn validate(&self) -> Result<()> {
        match *self {
            TimeScale::Unit => Ok(()),
            TimeScale::FrameRate { fps } if fps.is_finite() && fps > 0.0 => Ok(()),
            TimeScale::FrameRate { fps } => Err(PhysicsError::InvalidFrameRate(fps)),
        }
    }

    pub fn factor(&self, delta: Duration) -> f32 {
        match *self {
            TimeScale::Unit => 1.0,
            TimeScale::FrameRate { fps } => delta.as_secs_f32() * fps,
        }
    }
}

/// Tracks the last frame timestamp and the last delta.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_frame: Option<Duration>,
    delta: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `now` and return the time elapsed since the previous tick.
    ///
    /// The first tick, and any timestamp earlier than the previous one,
    /// yields a zero delta.
    pub fn tick(&mut self, now: Duration) -> Duration {
        self.delta = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_frame = Some(now);
        self.delta
    }

    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    #[inline]
    pub fn last_frame(&self) -> Option<Duration> {
        self.last_frame
    }
}
