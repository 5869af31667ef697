use serde::{Deserialize, Serialize};

/// Speed and scoring parameters of one difficulty level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Base travel distance per tick
    pub speed: f64,
    /// Factor applied to item points
    pub score_multiplier: f64,
    pub label: &'static str,
}

/// Difficulty chosen from the menu before a session starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// All levels in menu order
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                speed: 2.0,
                score_multiplier: 1.0,
                label: "Easy",
            },
            Difficulty::Medium => DifficultyProfile {
                speed: 3.0,
                score_multiplier: 1.2,
                label: "Medium",
            },
            Difficulty::Hard => DifficultyProfile {
                speed: 4.0,
                score_multiplier: 1.5,
                label: "Hard",
            },
            Difficulty::Expert => DifficultyProfile {
                speed: 5.0,
                score_multiplier: 2.0,
                label: "Expert",
            },
        }
    }

    pub fn speed(&self) -> f64 {
        self.profile().speed
    }

    pub fn score_multiplier(&self) -> f64 {
        self.profile().score_multiplier
    }

    pub fn label(&self) -> &'static str {
        self.profile().label
    }

    /// Position in [`Difficulty::ALL`]
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|d| d == self)
            .unwrap_or_default()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}
