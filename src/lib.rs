//! Gap Glider - a side-scrolling gap-dodging reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, collisions, game state)
//! - `input`: Platform event to command translation
//! - `present`: Per-frame snapshot consumed by whatever draws the game
//! - `session`: Host glue driving ticks and the spawn timer
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod present;
pub mod session;
pub mod sim;
pub mod tuning;

pub use input::{InputAdapter, Key, RawEvent};
pub use present::{Frame, PipeSprite};
pub use session::Session;
pub use tuning::{ConfigError, Tuning};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Bird sprite size (408x228 source art scaled down, 17:12)
    pub const BIRD_WIDTH: f32 = 34.0;
    pub const BIRD_HEIGHT: f32 = 24.0;

    /// Pipe sprite size (384x3072 source art, 1:8)
    pub const PIPE_WIDTH: f32 = 64.0;
    pub const PIPE_HEIGHT: f32 = 512.0;
    /// Baseline the random gap offset is measured from
    pub const PIPE_BASELINE_Y: f32 = 0.0;

    /// Leftward pipe speed at score 0 (pixels per tick)
    pub const BASE_SCROLL_SPEED: f32 = -4.0;
    /// Speed-up per point of score
    pub const SPEED_UP_PER_POINT: f32 = 0.03;
    /// Maximum speed multiplier over the base speed
    pub const MAX_SPEED_FACTOR: f32 = 2.5;

    /// Downward acceleration (pixels per tick²)
    pub const GRAVITY: f32 = 0.4;
    /// Velocity set by a jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -6.0;

    /// Pipe pair spawn cadence
    pub const SPAWN_INTERVAL_SECS: f32 = 1.5;
    /// Longest frame the spawn timer will account for (stalls are clamped)
    pub const MAX_FRAME_SECS: f32 = 10.0;
    /// Most pipe pairs one frame may spawn while catching up
    pub const MAX_SPAWNS_PER_FRAME: u32 = 2;

    /// Board width as a fraction of viewport height (9:16)
    pub const BOARD_ASPECT: f32 = 0.5625;

    /// Tilt input tuning
    pub const TILT_COOLDOWN_MS: f64 = 300.0;
    pub const TILT_TOTAL_THRESHOLD: f32 = 15.0;
    pub const TILT_Y_THRESHOLD: f32 = 12.0;
}
