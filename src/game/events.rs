//! Events emitted by the simulation for the render and audio layers

use super::action::Direction;
use super::collision::CollisionType;
use super::item::ItemKind;
use super::state::Position;

/// Sound the audio collaborator should play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Move,
    Eat,
    Start,
    Crash,
}

impl SoundCue {
    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::Move => "move",
            SoundCue::Eat => "eat",
            SoundCue::Start => "start",
            SoundCue::Crash => "crash",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A new session began
    SessionStarted,
    /// A queued turn was applied to the head
    DirectionChanged(Direction),
    /// The head picked up the active item
    ItemEaten {
        kind: ItemKind,
        points: i32,
        score: i32,
    },
    /// The body could not grow any further
    CapacityReached,
    /// The previous best was overtaken
    BestScoreBeaten(i32),
    /// A replacement item was placed
    ItemSpawned { kind: ItemKind, position: Position },
    /// The current speed changed because an effect started or ended
    SpeedChanged(f64),
    /// Fatal collision, the session is over
    Collision(CollisionType),
    /// No free cell was left for a new item, the session is over
    BoardFull,
}

impl GameEvent {
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::SessionStarted => Some(SoundCue::Start),
            GameEvent::DirectionChanged(_) => Some(SoundCue::Move),
            GameEvent::ItemEaten { .. } => Some(SoundCue::Eat),
            GameEvent::Collision(_) => Some(SoundCue::Crash),
            _ => None,
        }
    }

    /// True for events that end the session
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameEvent::Collision(_) | GameEvent::BoardFull)
    }
}
