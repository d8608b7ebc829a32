//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; there is no
//! ambient global state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::pipes::PipePool;
use crate::tuning::{ConfigError, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended, simulation frozen until the next jump
    GameOver,
}

/// Board dimensions (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

impl PlayField {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        let field = Self { width, height };
        if field.is_valid() {
            Ok(field)
        } else {
            Err(ConfigError::NonPositiveField { width, height })
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Where the bird starts: one eighth in, vertically centred
    pub fn bird_spawn(&self) -> Vec2 {
        Vec2::new(self.width / 8.0, self.height / 2.0)
    }

    /// Vertical opening between a pipe pair (scales with the board)
    #[inline]
    pub fn opening(&self) -> f32 {
        self.height / 4.0
    }
}

/// The player-controlled bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity in pixels per tick (negative is up)
    pub vel_y: f32,
}

impl Bird {
    pub fn new(spawn: Vec2, size: Vec2) -> Self {
        Self {
            pos: spawn,
            size,
            vel_y: 0.0,
        }
    }

    /// Apply one tick of gravity, clamping at the ceiling.
    ///
    /// The clamp only limits position. Velocity keeps its value, so a bird
    /// pinned at the top still has to wait for gravity to cancel the jump.
    pub fn integrate(&mut self, gravity: f32) {
        self.vel_y += gravity;
        self.pos.y = (self.pos.y + self.vel_y).max(0.0);
    }

    /// Overwrite velocity with the jump impulse
    pub fn jump(&mut self, jump_velocity: f32) {
        self.vel_y = jump_velocity;
    }

    /// Put the bird back at its spawn point, at rest
    pub fn reset(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel_y = 0.0;
    }

    pub fn as_aabb(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Fell through the bottom of the board
    #[inline]
    pub fn is_below(&self, field: &PlayField) -> bool {
        self.pos.y > field.height
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub field: PlayField,
    /// X coordinate new pipe pairs appear at (right edge of the board)
    pub spawn_x: f32,
    pub bird: Bird,
    pub pipes: PipePool,
    /// Score in half points; each pipe half passed is worth one
    pub score_halves: u32,
    /// Current signed horizontal pipe velocity
    pub scroll_speed: f32,
    pub phase: GamePhase,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new game on a board of the given size
    pub fn new(width: f32, height: f32, tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let field = PlayField::new(width, height)?;
        let bird = Bird::new(
            field.bird_spawn(),
            Vec2::new(tuning.bird_width, tuning.bird_height),
        );

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            scroll_speed: tuning.base_scroll_speed,
            tuning,
            field,
            spawn_x: field.width,
            bird,
            pipes: PipePool::new(),
            score_halves: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
        })
    }

    /// Score as shown to the player (steps of 0.5)
    #[inline]
    pub fn score(&self) -> f32 {
        self.score_halves as f32 * 0.5
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Start a fresh run on the current board
    pub fn restart(&mut self) {
        self.bird.reset(self.field.bird_spawn());
        self.pipes.clear();
        self.score_halves = 0;
        self.scroll_speed = self.tuning.base_scroll_speed;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_starts_playing_at_spawn() {
        let state = GameState::new(450.0, 800.0, Tuning::default(), 1).unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bird.pos, Vec2::new(450.0 / 8.0, 400.0));
        assert_eq!(state.bird.vel_y, 0.0);
        assert_eq!(state.score(), 0.0);
        assert_eq!(state.spawn_x, 450.0);
        assert_eq!(state.scroll_speed, Tuning::default().base_scroll_speed);
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_rejects_degenerate_field() {
        assert!(matches!(
            GameState::new(0.0, 800.0, Tuning::default(), 1),
            Err(ConfigError::NonPositiveField { .. })
        ));
        assert!(matches!(
            GameState::new(450.0, -1.0, Tuning::default(), 1),
            Err(ConfigError::NonPositiveField { .. })
        ));
        assert!(PlayField::new(f32::NAN, 10.0).is_err());
    }

    #[test]
    fn test_gravity_accumulates() {
        let mut bird = Bird::new(Vec2::new(10.0, 400.0), Vec2::new(34.0, 24.0));
        let mut expected_y = 400.0;
        for n in 1..=10 {
            bird.integrate(0.4);
            expected_y += 0.4 * n as f32;
            assert!((bird.vel_y - 0.4 * n as f32).abs() < 1e-4);
            assert!((bird.pos.y - expected_y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_ceiling_clamps_position_not_velocity() {
        let mut bird = Bird::new(Vec2::new(10.0, 2.0), Vec2::new(34.0, 24.0));
        bird.jump(-6.0);
        bird.integrate(0.4);
        assert_eq!(bird.pos.y, 0.0);
        assert!((bird.vel_y - -5.6).abs() < 1e-5);

        // Still moving up, still pinned
        bird.integrate(0.4);
        assert_eq!(bird.pos.y, 0.0);
        assert!((bird.vel_y - -5.2).abs() < 1e-5);
    }

    #[test]
    fn test_jump_overwrites_velocity() {
        let mut bird = Bird::new(Vec2::new(10.0, 300.0), Vec2::new(34.0, 24.0));
        bird.vel_y = 12.0;
        bird.jump(-6.0);
        assert_eq!(bird.vel_y, -6.0);
    }

    #[test]
    fn test_score_counts_halves() {
        let mut state = GameState::new(450.0, 800.0, Tuning::default(), 1).unwrap();
        state.score_halves = 3;
        assert_eq!(state.score(), 1.5);
    }
}
