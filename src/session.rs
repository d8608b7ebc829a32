//! Host glue
//!
//! A [`Session`] is what the platform's frame callback talks to: raw events
//! go in through [`Session::handle_event`], and [`Session::frame`] runs the
//! spawn timer and one simulation tick.

use crate::input::{InputAdapter, RawEvent, board_size_for_viewport};
use crate::present::Frame;
use crate::sim::{Command, CommandQueue, GameState, SpawnTimer, on_spawn_timer, tick};
use crate::tuning::{ConfigError, Tuning};

/// A running game plus its input plumbing and spawn timer
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    commands: CommandQueue,
    spawn_timer: SpawnTimer,
    input: InputAdapter,
    /// Wall-clock time since the session started (ms)
    now_ms: f64,
}

impl Session {
    /// Start a session on a board of the given size
    pub fn new(width: f32, height: f32, tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        let spawn_timer = SpawnTimer::new(tuning.spawn_interval_secs);
        let input = InputAdapter::new(&tuning);
        let state = GameState::new(width, height, tuning, seed)?;
        log::info!(
            "Session started on {}x{} board with seed {seed}",
            state.field.width,
            state.field.height
        );
        Ok(Self {
            state,
            commands: CommandQueue::new(),
            spawn_timer,
            input,
            now_ms: 0.0,
        })
    }

    /// Start a session sized for a viewport (portrait board)
    pub fn from_viewport(
        viewport_width: f32,
        viewport_height: f32,
        tuning: Tuning,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let (width, height) =
            board_size_for_viewport(viewport_width, viewport_height, tuning.board_aspect);
        Self::new(width, height, tuning, seed)
    }

    /// Feed a raw platform event; returns true if it produced a command
    pub fn handle_event(&mut self, event: RawEvent) -> bool {
        let game_over = self.state.is_game_over();
        self.input
            .handle(event, self.now_ms, game_over, &mut self.commands)
    }

    /// Queue a command directly, bypassing the input adapter
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Run one frame: fire any due spawns, then tick once
    pub fn frame(&mut self, dt: f32) {
        for _ in 0..self.spawn_timer.advance(dt) {
            on_spawn_timer(&mut self.state);
        }
        tick(&mut self.state, &mut self.commands);
        if dt.is_finite() && dt > 0.0 {
            self.now_ms += f64::from(dt) * 1000.0;
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Snapshot for drawing
    pub fn frame_snapshot(&self) -> Frame {
        Frame::capture(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_SPAWNS_PER_FRAME;
    use crate::input::Key;
    use crate::sim::GamePhase;

    const DT: f32 = 1.0 / 60.0;

    fn session() -> Session {
        Session::new(450.0, 800.0, Tuning::default(), 2024).unwrap()
    }

    #[test]
    fn test_spawns_on_wall_clock_cadence() {
        let mut s = session();
        // Keep the bird alive without inputs
        s.state.tuning.gravity = 0.0;
        for _ in 0..89 {
            s.frame(DT);
        }
        assert!(s.state().pipes.is_empty());
        s.frame(DT * 2.0);
        assert_eq!(s.state().pipes.len(), 1);
    }

    #[test]
    fn test_timer_keeps_running_but_does_not_spawn_during_game_over() {
        let mut s = session();
        s.state.phase = GamePhase::GameOver;
        s.frame(3.0);
        assert!(s.state().pipes.is_empty());

        // Next interval boundary is 1.5 s after the stalled frame
        s.push(Command::Jump);
        s.frame(1.0);
        assert_eq!(s.state().phase, GamePhase::Playing);
        assert!(s.state().pipes.is_empty());
        s.frame(0.5);
        assert_eq!(s.state().pipes.len(), 1);
    }

    #[test]
    fn test_stalled_frame_spawns_bounded_pairs() {
        let mut s = session();
        s.frame(86_400.0);
        assert_eq!(s.state().pipes.len(), MAX_SPAWNS_PER_FRAME as usize);
        assert_eq!(s.state().time_ticks, 1);

        // Backlog was dropped, not replayed on the next frame
        s.frame(DT);
        assert_eq!(s.state().pipes.len(), MAX_SPAWNS_PER_FRAME as usize);
    }

    #[test]
    fn test_events_become_commands() {
        let mut s = session();
        for _ in 0..10 {
            s.frame(DT);
        }
        assert!(s.handle_event(RawEvent::KeyDown(Key::Space)));
        s.frame(DT);
        assert!(s.state().bird.vel_y < 0.0);
    }

    #[test]
    fn test_viewport_sizing() {
        let s = Session::from_viewport(1920.0, 1080.0, Tuning::default(), 1).unwrap();
        assert!((s.state().field.width - 607.5).abs() < 1e-3);
        assert_eq!(s.state().field.height, 1080.0);
        assert!(Session::from_viewport(1920.0, 0.0, Tuning::default(), 1).is_err());
    }

    #[test]
    fn test_restart_cycle() {
        let mut s = session();
        while !s.state().is_game_over() {
            s.frame(DT);
        }
        let frame = s.frame_snapshot();
        assert!(frame.game_over);

        s.handle_event(RawEvent::PointerDown);
        s.frame(DT);
        let state = s.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score(), 0.0);
        assert!(state.pipes.is_empty());
        assert!(state.bird.pos.y < state.field.height);
    }
}
