//! Wall and self-collision checks

use super::config::GameConfig;
use super::state::{SnakeBody, Vec2};

/// Segments closest to the head that are never tested for self-collision
pub const SELF_COLLISION_SKIP: usize = 4;

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionDetector {
    width: f64,
    height: f64,
    /// Per-axis distance under which the head overlaps a body segment
    self_threshold: f64,
}

impl CollisionDetector {
    pub fn new(width: f64, height: f64, segment_size: f64) -> Self {
        Self {
            width,
            height,
            self_threshold: segment_size / 2.0,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.arena_width, config.arena_height, config.segment_size)
    }

    /// Check the head against the walls, then against the body
    pub fn check(&self, body: &SnakeBody) -> Option<CollisionType> {
        let head = body.head().position;

        if !self.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }
        if self.hits_body(body) {
            return Some(CollisionType::SelfCollision);
        }
        None
    }

    /// Inside `[0, width) x [0, height)`
    pub fn is_in_bounds(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x < self.width && point.y >= 0.0 && point.y < self.height
    }

    pub fn hits_body(&self, body: &SnakeBody) -> bool {
        let head = body.head().position;
        body.segments()
            .iter()
            .skip(SELF_COLLISION_SKIP)
            .any(|segment| head.within_box(segment.position, self.self_threshold))
    }
}
