//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, commands drained in arrival order
//! - Seeded RNG only
//! - Stable iteration order (pipe pairs oldest first)
//! - No rendering or platform dependencies

pub mod clock;
pub mod geometry;
pub mod pipes;
pub mod state;
pub mod tick;

pub use clock::SpawnTimer;
pub use geometry::{Aabb, intersects};
pub use pipes::{Pipe, PipeHalf, PipePair, PipePool};
pub use state::{Bird, GamePhase, GameState, PlayField};
pub use tick::{Command, CommandQueue, apply_command, on_spawn_timer, scroll_speed_for, tick};
