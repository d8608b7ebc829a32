//! Per-frame simulation tick
//!
//! Input arrives as [`Command`]s queued by the platform layer and drained
//! at the start of each tick, so ordering is deterministic.

use std::collections::VecDeque;

use super::state::{GamePhase, GameState, PlayField};
use crate::tuning::Tuning;

/// Abstract input commands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Flap (or restart after game over)
    Jump,
    /// Board resized to new dimensions
    Resize { width: f32, height: f32 },
}

/// FIFO of commands waiting for the next tick
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    commands: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    pub fn pop(&mut self) -> Option<Command> {
        self.commands.pop_front()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Horizontal pipe speed for a given score (capped speed-up over base)
pub fn scroll_speed_for(score: f32, tuning: &Tuning) -> f32 {
    let factor = (1.0 + score * tuning.speed_up_per_point).min(tuning.max_speed_factor);
    tuning.base_scroll_speed * factor
}

/// Apply a single command immediately
pub fn apply_command(state: &mut GameState, command: Command) {
    match command {
        Command::Jump => match state.phase {
            GamePhase::Playing => state.bird.jump(state.tuning.jump_velocity),
            GamePhase::GameOver => {
                state.restart();
                log::info!("Restarted run (seed {})", state.seed);
            }
        },
        Command::Resize { width, height } => resize(state, width, height),
    }
}

fn resize(state: &mut GameState, width: f32, height: f32) {
    let new_field = match PlayField::new(width, height) {
        Ok(field) => field,
        Err(e) => {
            log::warn!("Ignoring resize: {e}");
            return;
        }
    };

    let old = state.field;
    if old.is_valid() {
        state.bird.pos.x = state.bird.pos.x / old.width * new_field.width;
        state.bird.pos.y = state.bird.pos.y / old.height * new_field.height;
    }
    // Live pipes keep their positions; only new spawns see the new board
    state.field = new_field;
    state.spawn_x = new_field.width;
    log::debug!(
        "Resized board {}x{} -> {}x{}",
        old.width,
        old.height,
        new_field.width,
        new_field.height
    );
}

/// Spawn-timer callback: adds a pipe pair while playing.
/// Returns true if a pair was spawned.
pub fn on_spawn_timer(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing || !state.field.is_valid() {
        return false;
    }
    let GameState {
        pipes,
        spawn_x,
        field,
        tuning,
        rng,
        ..
    } = state;
    pipes.spawn_pair(*spawn_x, field, tuning, rng);
    true
}

fn end_run(state: &mut GameState, reason: &str) {
    if state.phase == GamePhase::Playing {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over ({reason}) after {} ticks with score {}",
            state.time_ticks,
            state.score()
        );
    }
}

/// Apply queued resizes to an invalid board, leaving every other command
/// queued in order. Returns true once the board is valid again.
fn repair_field(state: &mut GameState, commands: &mut CommandQueue) -> bool {
    let mut deferred = VecDeque::with_capacity(commands.len());
    while let Some(command) = commands.pop() {
        match command {
            Command::Resize { width, height } => resize(state, width, height),
            other => deferred.push_back(other),
        }
    }
    commands.commands = deferred;
    state.field.is_valid()
}

/// Advance the game by one frame, draining queued commands first
pub fn tick(state: &mut GameState, commands: &mut CommandQueue) {
    if !state.field.is_valid() && !repair_field(state, commands) {
        log::warn!(
            "Skipping tick: invalid board {}x{}",
            state.field.width,
            state.field.height
        );
        return;
    }

    while let Some(command) = commands.pop() {
        apply_command(state, command);
    }

    // Frozen until a jump restarts the run
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    state.bird.integrate(state.tuning.gravity);
    if state.bird.is_below(&state.field) {
        end_run(state, "fell");
    }

    state.pipes.advance(state.scroll_speed);
    state.pipes.cull_offscreen();

    if state.pipes.collides_with(&state.bird.as_aabb()) {
        end_run(state, "hit pipe");
    }

    let newly_passed = state.pipes.mark_passed(state.bird.pos.x);
    if newly_passed > 0 {
        let before = state.score_halves / 2;
        state.score_halves += newly_passed;
        let after = state.score_halves / 2;
        if after != before && after % 10 == 0 {
            log::info!("Score {after}");
        }
    }

    state.scroll_speed = scroll_speed_for(state.score(), &state.tuning);
}
