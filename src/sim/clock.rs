//! Wall-clock spawn timer
//!
//! Pipe pairs appear on a fixed real-time cadence that is independent of
//! the frame rate. The timer keeps running while the game is over; the
//! spawn callback decides whether a firing does anything.

use crate::consts::{MAX_FRAME_SECS, MAX_SPAWNS_PER_FRAME};

/// Accumulates elapsed seconds and reports whole intervals
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    interval: f32,
    elapsed: f32,
}

impl SpawnTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Advance by `dt` seconds and return how many times the timer fired.
    ///
    /// A stalled frame is clamped and fires at most
    /// [`MAX_SPAWNS_PER_FRAME`] times; any remaining backlog is dropped
    /// but the phase within the interval is kept.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.elapsed += dt.min(MAX_FRAME_SECS);
        let mut fired = 0;
        while self.elapsed >= self.interval && fired < MAX_SPAWNS_PER_FRAME {
            self.elapsed -= self.interval;
            fired += 1;
        }
        if self.elapsed >= self.interval {
            let missed = (self.elapsed / self.interval).floor();
            log::debug!("Spawn timer dropped {missed:.0} missed interval(s)");
            self.elapsed %= self.interval;
        }
        fired
    }
}
