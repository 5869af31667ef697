use serde::{Deserialize, Serialize};

/// Direction the snake head can travel in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns true if `other` is a quarter turn away from self
    pub fn is_perpendicular(&self, other: Direction) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Unit vector (dx, dy) in screen coordinates, y grows downwards
    pub fn unit(&self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }
}

/// Discrete input event fed into the game by the host.
///
/// The host is responsible for mapping raw keys onto these; the core never sees
/// key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameInput {
    Up,
    Down,
    Left,
    Right,
    Pause,
    Escape,
    Enter,
    Space,
    Mute,
    Quit,
}

impl GameInput {
    /// The steering direction carried by this input, if any
    pub fn direction(&self) -> Option<Direction> {
        match self {
            GameInput::Up => Some(Direction::Up),
            GameInput::Down => Some(Direction::Down),
            GameInput::Left => Some(Direction::Left),
            GameInput::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

impl From<Direction> for GameInput {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => GameInput::Up,
            Direction::Down => GameInput::Down,
            Direction::Left => GameInput::Left,
            Direction::Right => GameInput::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_perpendicular_directions() {
        assert!(Direction::Up.is_perpendicular(Direction::Left));
        assert!(Direction::Up.is_perpendicular(Direction::Right));
        assert!(Direction::Left.is_perpendicular(Direction::Down));

        assert!(!Direction::Up.is_perpendicular(Direction::Up));
        assert!(!Direction::Up.is_perpendicular(Direction::Down));
        assert!(!Direction::Right.is_perpendicular(Direction::Left));
    }

    #[test]
    fn test_direction_unit() {
        assert_eq!(Direction::Up.unit(), (0.0, -1.0));
        assert_eq!(Direction::Down.unit(), (0.0, 1.0));
        assert_eq!(Direction::Left.unit(), (-1.0, 0.0));
        assert_eq!(Direction::Right.unit(), (1.0, 0.0));
    }

    #[test]
    fn test_input_direction() {
        assert_eq!(GameInput::Left.direction(), Some(Direction::Left));
        assert_eq!(GameInput::Enter.direction(), None);
        assert_eq!(GameInput::from(Direction::Down), GameInput::Down);
    }
}
