use std::ops::{Add, AddAssign, Sub};

use super::action::Direction;

/// Continuous 2D vector, used for both positions and velocities
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Velocity of magnitude `speed` along `direction`
    pub fn along(direction: Direction, speed: f64) -> Self {
        let (dx, dy) = direction.unit();
        Self::new(dx * speed, dy * speed)
    }

    /// True if `other` is closer than `threshold` on both axes
    pub fn within_box(&self, other: Vec2, threshold: f64) -> bool {
        (self.x - other.x).abs() < threshold && (self.y - other.y).abs() < threshold
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A cell on the item grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f64, self.y as f64)
    }
}

/// One piece of the snake with its own position and velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Segment {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }
}

/// The snake body, head at index 0.
///
/// Segments live in a buffer preallocated to `capacity`; the body only ever
/// grows at the tail.
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeBody {
    segments: Vec<Segment>,
    direction: Direction,
    /// Distance a follower may drift from its leader before it turns towards it
    spacing: f64,
    capacity: usize,
}

impl SnakeBody {
    /// Lay out `length` segments in a straight line behind `head`.
    ///
    /// Every segment starts with velocity `(speed, 0)`, whatever the direction;
    /// followers straighten out on their own once stretched.
    pub fn new(
        head: Vec2,
        direction: Direction,
        length: usize,
        spacing: f64,
        speed: f64,
        capacity: usize,
    ) -> Self {
        let length = length.clamp(1, capacity.max(1));
        let (dx, dy) = direction.unit();
        let mut segments = Vec::with_capacity(capacity.max(length));

        for i in 0..length {
            let offset = i as f64 * spacing;
            segments.push(Segment::new(
                Vec2::new(head.x - dx * offset, head.y - dy * offset),
                Vec2::new(speed, 0.0),
            ));
        }

        let mut body = Self {
            segments,
            direction,
            spacing,
            capacity: capacity.max(length),
        };
        body.retarget_head(speed);
        body
    }

    /// Build a body from explicit segments. Returns `None` if `segments` is empty.
    pub fn from_segments(
        segments: Vec<Segment>,
        direction: Direction,
        spacing: f64,
        capacity: usize,
    ) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        let capacity = capacity.max(segments.len());
        let mut buffer = Vec::with_capacity(capacity);
        buffer.extend(segments);

        Some(Self {
            segments: buffer,
            direction,
            spacing,
            capacity,
        })
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn tail(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.segments.iter().map(|s| s.position)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Turn the head and recompute its velocity
    pub fn set_direction(&mut self, direction: Direction, speed: f64) {
        self.direction = direction;
        self.retarget_head(speed);
    }

    /// Make the head velocity axis-aligned with magnitude `speed`
    pub fn retarget_head(&mut self, speed: f64) {
        self.segments[0].velocity = Vec2::along(self.direction, speed);
    }

    /// Advance every segment by one tick.
    ///
    /// Segments are processed head to tail, so each follower measures against a
    /// leader that has already moved this tick. A follower always moves on its
    /// existing velocity and only turns towards its leader once it has fallen
    /// more than `spacing` behind.
    pub fn advance(&mut self, speed: f64) {
        let head = &mut self.segments[0];
        head.position += head.velocity;

        for i in 1..self.segments.len() {
            let leader = self.segments[i - 1].position;
            let follower = &mut self.segments[i];

            follower.position += follower.velocity;

            let offset = leader - follower.position;
            let distance = offset.length();
            if distance > self.spacing {
                follower.velocity = offset.scaled(speed / distance);
            }
        }
    }

    /// Append a segment on top of the tail, inheriting its velocity.
    ///
    /// Returns false without growing once the body is at capacity.
    pub fn grow(&mut self) -> bool {
        if self.segments.len() >= self.capacity {
            return false;
        }
        let tail = *self.tail();
        self.segments.push(tail);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn straight_body() -> SnakeBody {
        SnakeBody::new(Vec2::new(300.0, 300.0), Direction::Right, 3, 10.0, 3.0, 900)
    }

    #[test]
    fn test_vec2_ops() {
        let a = Vec2::new(3.0, 4.0);
        assert_eq!(a.length(), 5.0);
        assert_eq!(a + Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0));
        assert_eq!(a - Vec2::new(1.0, 1.0), Vec2::new(2.0, 3.0));
        assert_eq!(a.scaled(2.0), Vec2::new(6.0, 8.0));
        assert!(a.within_box(Vec2::new(7.9, 0.1), 5.0));
        assert!(!a.within_box(Vec2::new(8.0, 4.0), 5.0));
    }

    #[test]
    fn test_body_creation() {
        let body = straight_body();
        assert_eq!(body.len(), 3);
        assert_eq!(body.head().position, Vec2::new(300.0, 300.0));
        assert_eq!(body.segments()[1].position, Vec2::new(290.0, 300.0));
        assert_eq!(body.tail().position, Vec2::new(280.0, 300.0));
        for segment in body.segments() {
            assert_eq!(segment.velocity, Vec2::new(3.0, 0.0));
        }
    }

    #[test]
    fn test_body_creation_facing_left() {
        let body = SnakeBody::new(Vec2::new(0.0, 0.0), Direction::Left, 3, 10.0, 3.0, 900);
        assert_eq!(body.segments()[1].position, Vec2::new(10.0, 0.0));
        assert_eq!(body.head().velocity, Vec2::new(-3.0, 0.0));
    }

    #[test]
    fn test_straight_advance() {
        let mut body = straight_body();
        body.advance(3.0);

        assert_eq!(body.head().position, Vec2::new(303.0, 300.0));
        assert_eq!(body.segments()[1].position, Vec2::new(293.0, 300.0));
        assert_eq!(body.tail().position, Vec2::new(283.0, 300.0));
    }

    #[test]
    fn test_follower_keeps_heading_until_stretched() {
        let mut body = straight_body();
        body.set_direction(Direction::Up, 3.0);

        // Head moves to (300, 297); follower to (293, 300): distance ~7.6 < 10
        body.advance(3.0);
        assert_eq!(body.segments()[1].velocity, Vec2::new(3.0, 0.0));

        // Head (300, 294); follower (296, 300): distance ~7.2, still under spacing
        body.advance(3.0);
        assert_eq!(body.segments()[1].velocity, Vec2::new(3.0, 0.0));

        // Keep going until the follower falls behind and swings towards the head
        for _ in 0..3 {
            body.advance(3.0);
        }
        let follower = body.segments()[1];
        assert!(follower.velocity.y < 0.0);
        assert!((follower.velocity.length() - 3.0).abs() < EPS);
    }

    #[test]
    fn test_retarget_uses_current_speed() {
        let mut body = straight_body();
        body.set_direction(Direction::Down, 3.0);
        for _ in 0..10 {
            body.advance(6.0);
        }
        let follower = body.segments()[1];
        assert!((follower.velocity.length() - 6.0).abs() < EPS);
    }

    #[test]
    fn test_grow_copies_tail() {
        let mut body = straight_body();
        let tail = *body.tail();
        assert!(body.grow());
        assert_eq!(body.len(), 4);
        assert_eq!(*body.tail(), tail);
    }

    #[test]
    fn test_grow_stops_at_capacity() {
        let mut body = SnakeBody::new(Vec2::new(50.0, 50.0), Direction::Right, 3, 10.0, 3.0, 4);
        assert!(body.grow());
        assert!(!body.grow());
        assert_eq!(body.len(), 4);
    }

    #[test]
    fn test_from_segments_rejects_empty() {
        assert!(SnakeBody::from_segments(Vec::new(), Direction::Up, 10.0, 10).is_none());
    }
}
