//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Movement is continuous: the head travels a fixed distance per tick and every
//! body segment chases the one in front of it.

pub mod action;
pub mod collision;
pub mod config;
pub mod controller;
pub mod difficulty;
pub mod effects;
pub mod engine;
pub mod events;
pub mod input_queue;
pub mod item;
pub mod machine;
pub mod score;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, GameInput};
pub use collision::{CollisionDetector, CollisionType};
pub use config::{ConfigError, GameConfig};
pub use controller::{Flow, GameController, Snapshot};
pub use difficulty::Difficulty;
pub use effects::StatusEffects;
pub use engine::{GameSession, TickResult};
pub use events::{GameEvent, SoundCue};
pub use input_queue::InputQueue;
pub use item::{Item, ItemKind, ItemSpawner, SpawnError};
pub use machine::{Command, GameState, GameStateMachine, MenuItem, MenuScreen};
pub use score::{BestScoreStore, ScoreTracker};
pub use state::{Position, Segment, SnakeBody, Vec2};
