//! Pipe pairs: spawning, scrolling, culling and pass tracking
//!
//! Pairs are kept oldest-first in a ring buffer. Both halves of a pair live
//! in one [`PipePair`], so they are always spawned and removed together.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::state::PlayField;
use crate::tuning::Tuning;

/// Which half of a pair a pipe is (picks the sprite)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipeHalf {
    Top,
    Bottom,
}

/// One pipe half
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    pub pos: Vec2,
    pub size: Vec2,
    /// Already scored (each half scores once)
    pub passed: bool,
}

impl Pipe {
    fn new(x: f32, y: f32, size: Vec2) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size,
            passed: false,
        }
    }

    pub fn as_aabb(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Mark passed if the bird is clear of the right edge.
    /// Returns true only on the tick the pipe first counts.
    fn try_pass(&mut self, bird_x: f32) -> bool {
        if !self.passed && bird_x > self.right() {
            self.passed = true;
            true
        } else {
            false
        }
    }
}

/// Top and bottom pipe sharing one spawn and one gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipePair {
    pub top: Pipe,
    pub bottom: Pipe,
}

impl PipePair {
    /// Both halves, top first
    pub fn halves(&self) -> [(PipeHalf, &Pipe); 2] {
        [(PipeHalf::Top, &self.top), (PipeHalf::Bottom, &self.bottom)]
    }

    /// Shared x of the pair
    #[inline]
    pub fn x(&self) -> f32 {
        self.top.pos.x
    }

    /// Vertical centre of the opening
    pub fn gap_center(&self) -> f32 {
        let gap_top = self.top.pos.y + self.top.size.y;
        (gap_top + self.bottom.pos.y) / 2.0
    }
}

/// Ordered pool of live pipe pairs (oldest first)
#[derive(Debug, Clone, Default)]
pub struct PipePool {
    pairs: VecDeque<PipePair>,
}

impl PipePool {
    pub fn new() -> Self {
        Self {
            pairs: VecDeque::new(),
        }
    }

    /// Spawn a new pair at `spawn_x` with a random gap height
    pub fn spawn_pair<R: Rng>(
        &mut self,
        spawn_x: f32,
        field: &PlayField,
        tuning: &Tuning,
        rng: &mut R,
    ) -> &PipePair {
        let size = Vec2::new(tuning.pipe_width, tuning.pipe_height);
        let r: f32 = rng.random();
        let top_y = tuning.pipe_baseline_y - tuning.pipe_height / 4.0 - r * (tuning.pipe_height / 2.0);
        let bottom_y = top_y + tuning.pipe_height + field.opening();

        self.pairs.push_back(PipePair {
            top: Pipe::new(spawn_x, top_y, size),
            bottom: Pipe::new(spawn_x, bottom_y, size),
        });
        log::debug!(
            "Spawned pipe pair at x={spawn_x} (top_y={top_y:.1}, opening={:.1}), {} live",
            field.opening(),
            self.pairs.len()
        );
        &self.pairs[self.pairs.len() - 1]
    }

    /// Shift every pipe horizontally by `dx` (negative moves left)
    pub fn advance(&mut self, dx: f32) {
        for pair in &mut self.pairs {
            pair.top.pos.x += dx;
            pair.bottom.pos.x += dx;
        }
    }

    /// Drop pairs from the front once fully past the left edge.
    /// Returns how many pairs were removed.
    pub fn cull_offscreen(&mut self) -> usize {
        let mut removed = 0;
        while let Some(front) = self.pairs.front() {
            if front.x() < -front.top.size.x {
                self.pairs.pop_front();
                removed += 1;
            } else {
                break;
            }
        }
        if removed > 0 {
            log::debug!("Culled {removed} pipe pair(s), {} live", self.pairs.len());
        }
        removed
    }

    /// Flag every unpassed half the bird has cleared.
    /// Returns the number of halves newly passed (half a point each).
    pub fn mark_passed(&mut self, bird_x: f32) -> u32 {
        let mut newly_passed = 0;
        for pair in &mut self.pairs {
            if pair.top.try_pass(bird_x) {
                newly_passed += 1;
            }
            if pair.bottom.try_pass(bird_x) {
                newly_passed += 1;
            }
        }
        newly_passed
    }

    /// True if any pipe half overlaps the box
    pub fn collides_with(&self, aabb: &Aabb) -> bool {
        self.iter_halves()
            .any(|(_, pipe)| super::geometry::intersects(aabb, &pipe.as_aabb()))
    }

    /// All halves, oldest pair first, top before bottom
    pub fn iter_halves(&self) -> impl Iterator<Item = (PipeHalf, &Pipe)> {
        self.pairs.iter().flat_map(|pair| pair.halves())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PipePair> {
        self.pairs.iter()
    }

    /// First pair the given x has not yet cleared
    pub fn next_ahead_of(&self, x: f32) -> Option<&PipePair> {
        self.pairs.iter().find(|pair| pair.top.right() >= x)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }
}
