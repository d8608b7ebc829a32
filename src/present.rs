//! Per-frame snapshot for whatever draws the game
//!
//! Drawing itself lives outside this crate. A [`Frame`] holds every box and
//! string a renderer needs, in draw order.

use serde::{Deserialize, Serialize};

use crate::sim::{Aabb, GameState, PipeHalf, PlayField};

/// One pipe half to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeSprite {
    pub half: PipeHalf,
    pub rect: Aabb,
}

/// Everything visible this frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub field: PlayField,
    pub bird: Aabb,
    /// Oldest pair first, top before bottom
    pub pipes: Vec<PipeSprite>,
    pub score: f32,
    pub game_over: bool,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        Self {
            field: state.field,
            bird: state.bird.as_aabb(),
            pipes: state
                .pipes
                .iter_halves()
                .map(|(half, pipe)| PipeSprite {
                    half,
                    rect: pipe.as_aabb(),
                })
                .collect(),
            score: state.score(),
            game_over: state.is_game_over(),
        }
    }

    /// Score text: whole numbers without a decimal point
    pub fn score_label(&self) -> String {
        if self.score.fract() == 0.0 {
            format!("{}", self.score as u32)
        } else {
            format!("{:.1}", self.score)
        }
    }

    /// Banner shown under the score
    pub fn banner(&self) -> Option<&'static str> {
        self.game_over.then_some("GAME OVER")
    }
}
