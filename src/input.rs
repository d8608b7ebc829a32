//! Platform event translation
//!
//! Keyboard, pointer, touch, tilt and viewport events are reduced to the
//! two commands the simulation understands.

use glam::Vec3;

use crate::sim::{Command, CommandQueue};
use crate::tuning::Tuning;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    ArrowUp,
    KeyX,
    Other,
}

impl Key {
    /// Map a DOM-style `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" => Key::Space,
            "ArrowUp" => Key::ArrowUp,
            "KeyX" => Key::KeyX,
            _ => Key::Other,
        }
    }

    pub fn is_jump(&self) -> bool {
        matches!(self, Key::Space | Key::ArrowUp | Key::KeyX)
    }
}

/// Raw events delivered by the host platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    KeyDown(Key),
    PointerDown,
    TouchStart,
    /// Device acceleration including gravity (m/s²), if the sensor reported one
    Motion { acceleration: Option<Vec3> },
    /// Browser window / surface size
    ViewportResized { width: f32, height: f32 },
}

/// Board size for a viewport: full height, width capped at `aspect` × height
pub fn board_size_for_viewport(width: f32, height: f32, aspect: f32) -> (f32, f32) {
    (width.min(height * aspect), height)
}

/// Turns raw events into queued commands
#[derive(Debug, Clone)]
pub struct InputAdapter {
    /// Time of the last accepted jump from any source (ms)
    last_jump_ms: Option<f64>,
    cooldown_ms: f64,
    total_threshold: f32,
    y_threshold: f32,
    board_aspect: f32,
}

impl Default for InputAdapter {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}

impl InputAdapter {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            last_jump_ms: None,
            cooldown_ms: tuning.tilt_cooldown_ms,
            total_threshold: tuning.tilt_total_threshold,
            y_threshold: tuning.tilt_y_threshold,
            board_aspect: tuning.board_aspect,
        }
    }

    /// Translate one event. `game_over` is the current simulation phase,
    /// used to drop tilt jumps between runs. Returns true if a command
    /// was queued.
    pub fn handle(
        &mut self,
        event: RawEvent,
        now_ms: f64,
        game_over: bool,
        queue: &mut CommandQueue,
    ) -> bool {
        match event {
            RawEvent::KeyDown(key) if key.is_jump() => self.jump(now_ms, queue),
            RawEvent::KeyDown(_) => false,
            RawEvent::PointerDown | RawEvent::TouchStart => self.jump(now_ms, queue),
            RawEvent::Motion { acceleration } => {
                if game_over {
                    return false;
                }
                let Some(accel) = acceleration else {
                    return false;
                };
                if self.in_cooldown(now_ms) {
                    return false;
                }
                let shaken = accel.length() > self.total_threshold;
                let tilted = accel.y.abs() > self.y_threshold;
                if shaken || tilted {
                    log::debug!("Tilt jump (|a|={:.1}, ay={:.1})", accel.length(), accel.y);
                    self.jump(now_ms, queue)
                } else {
                    false
                }
            }
            RawEvent::ViewportResized { width, height } => {
                let (width, height) = board_size_for_viewport(width, height, self.board_aspect);
                queue.push(Command::Resize { width, height });
                true
            }
        }
    }

    fn in_cooldown(&self, now_ms: f64) -> bool {
        self.last_jump_ms
            .is_some_and(|last| now_ms - last < self.cooldown_ms)
    }

    fn jump(&mut self, now_ms: f64, queue: &mut CommandQueue) -> bool {
        self.last_jump_ms = Some(now_ms);
        queue.push(Command::Jump);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut CommandQueue) -> Vec<Command> {
        std::iter::from_fn(|| queue.pop()).collect()
    }

    #[test]
    fn test_jump_keys() {
        let mut input = InputAdapter::default();
        let mut queue = CommandQueue::new();
        for code in ["Space", "ArrowUp", "KeyX"] {
            assert!(input.handle(RawEvent::KeyDown(Key::from_code(code)), 0.0, false, &mut queue));
        }
        assert!(!input.handle(RawEvent::KeyDown(Key::from_code("KeyA")), 0.0, false, &mut queue));
        assert_eq!(drain(&mut queue), vec![Command::Jump; 3]);
    }

    #[test]
    fn test_pointer_and_touch_jump_even_when_game_over() {
        let mut input = InputAdapter::default();
        let mut queue = CommandQueue::new();
        assert!(input.handle(RawEvent::PointerDown, 0.0, true, &mut queue));
        assert!(input.handle(RawEvent::TouchStart, 10.0, true, &mut queue));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_tilt_thresholds() {
        let mut input = InputAdapter::default();
        let mut queue = CommandQueue::new();
        let resting = RawEvent::Motion {
            acceleration: Some(Vec3::new(0.0, 9.8, 0.5)),
        };
        assert!(!input.handle(resting, 0.0, false, &mut queue));

        let tilted = RawEvent::Motion {
            acceleration: Some(Vec3::new(0.0, -12.5, 0.0)),
        };
        assert!(input.handle(tilted, 1000.0, false, &mut queue));

        let shaken = RawEvent::Motion {
            acceleration: Some(Vec3::new(10.0, 8.0, 8.0)),
        };
        assert!(input.handle(shaken, 2000.0, false, &mut queue));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_tilt_cooldown_includes_other_jumps() {
        let mut input = InputAdapter::default();
        let mut queue = CommandQueue::new();
        let shake = RawEvent::Motion {
            acceleration: Some(Vec3::new(20.0, 0.0, 0.0)),
        };
        assert!(input.handle(RawEvent::KeyDown(Key::Space), 1000.0, false, &mut queue));
        assert!(!input.handle(shake, 1299.0, false, &mut queue));
        assert!(input.handle(shake, 1300.0, false, &mut queue));
        assert!(!input.handle(shake, 1400.0, false, &mut queue));
    }

    #[test]
    fn test_tilt_ignored_when_game_over_or_missing() {
        let mut input = InputAdapter::default();
        let mut queue = CommandQueue::new();
        let shake = RawEvent::Motion {
            acceleration: Some(Vec3::new(20.0, 0.0, 0.0)),
        };
        assert!(!input.handle(shake, 0.0, true, &mut queue));
        assert!(!input.handle(RawEvent::Motion { acceleration: None }, 0.0, false, &mut queue));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_tuned_tilt_overrides_defaults() {
        let tuning = Tuning {
            tilt_cooldown_ms: 50.0,
            tilt_y_threshold: 5.0,
            ..Tuning::default()
        };
        let mut input = InputAdapter::new(&tuning);
        let mut queue = CommandQueue::new();
        let gentle = RawEvent::Motion {
            acceleration: Some(Vec3::new(0.0, 6.0, 0.0)),
        };
        // Below the default 12 m/s² but above the tuned 5 m/s²
        assert!(!InputAdapter::default().handle(gentle, 0.0, false, &mut CommandQueue::new()));
        assert!(input.handle(gentle, 0.0, false, &mut queue));
        // Default cooldown would still block this one
        assert!(input.handle(gentle, 60.0, false, &mut queue));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_tuned_board_aspect() {
        let tuning = Tuning {
            board_aspect: 0.75,
            ..Tuning::default()
        };
        let mut input = InputAdapter::new(&tuning);
        let mut queue = CommandQueue::new();
        input.handle(
            RawEvent::ViewportResized { width: 1920.0, height: 1000.0 },
            0.0,
            false,
            &mut queue,
        );
        assert_eq!(queue.pop(), Some(Command::Resize { width: 750.0, height: 1000.0 }));
    }

    #[test]
    fn test_viewport_resize_keeps_portrait_aspect() {
        let mut input = InputAdapter::default();
        let mut queue = CommandQueue::new();
        input.handle(
            RawEvent::ViewportResized { width: 1920.0, height: 1000.0 },
            0.0,
            false,
            &mut queue,
        );
        input.handle(
            RawEvent::ViewportResized { width: 400.0, height: 1000.0 },
            0.0,
            false,
            &mut queue,
        );
        assert_eq!(
            drain(&mut queue),
            vec![
                Command::Resize { width: 562.5, height: 1000.0 },
                Command::Resize { width: 400.0, height: 1000.0 },
            ]
        );
    }
}
