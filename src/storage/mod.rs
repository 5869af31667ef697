//! Best-score persistence
//!
//! The score file holds a single integer on one line. Anything else reads back
//! as 0.

pub mod best_score;

pub use best_score::{FileScoreStore, MemoryScoreStore, StorageError, DEFAULT_SCORE_FILE};
