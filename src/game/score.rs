use tracing::info;

/// Persistence collaborator for the best score.
///
/// Implementations own their failure handling: a load that cannot read a valid
/// value returns 0, and a failed save is logged and otherwise ignored.
pub trait BestScoreStore: Send {
    fn load_best_score(&mut self) -> i32;
    fn save_best_score(&mut self, score: i32);
}

/// Outcome of one award
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub gained: i32,
    pub current: i32,
    pub new_best: bool,
}

/// Current and best score.
///
/// `best` is loaded once on construction and written back through the store
/// every time `current` overtakes it.
pub struct ScoreTracker {
    current: i32,
    best: i32,
    store: Box<dyn BestScoreStore>,
}

impl ScoreTracker {
    pub fn new(mut store: Box<dyn BestScoreStore>) -> Self {
        let best = store.load_best_score().max(0);
        Self {
            current: 0,
            best,
            store,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn best(&self) -> i32 {
        self.best
    }

    /// Add `points * multiplier`, rounded once at the point of addition
    pub fn award(&mut self, points: i32, multiplier: f64) -> ScoreUpdate {
        let gained = (points as f64 * multiplier).round() as i32;
        self.current += gained;

        let new_best = self.current > self.best;
        if new_best {
            self.best = self.current;
            info!(best = self.best, "new best score");
            self.store.save_best_score(self.best);
        }

        ScoreUpdate {
            gained,
            current: self.current,
            new_best,
        }
    }

    /// Start a new session from zero; `best` is kept
    pub fn reset_current(&mut self) {
        self.current = 0;
    }
}

impl std::fmt::Debug for ScoreTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreTracker")
            .field("current", &self.current)
            .field("best", &self.best)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::difficulty::Difficulty;
    use crate::game::item::ItemKind;
    use crate::storage::MemoryScoreStore;
    use proptest::prelude::*;

    #[test]
    fn test_loads_best_on_creation() {
        let tracker = ScoreTracker::new(Box::new(MemoryScoreStore::with_best(42)));
        assert_eq!(tracker.current(), 0);
        assert_eq!(tracker.best(), 42);
    }

    #[test]
    fn test_rounds_once_per_award() {
        let mut tracker = ScoreTracker::new(Box::new(MemoryScoreStore::default()));

        // 1 * 1.5 rounds to 2 each time, not 1.5 + 1.5 = 3
        tracker.award(1, Difficulty::Hard.score_multiplier());
        tracker.award(1, Difficulty::Hard.score_multiplier());
        assert_eq!(tracker.current(), 4);

        // 1 * 1.2 rounds to 1
        let update = tracker.award(1, Difficulty::Medium.score_multiplier());
        assert_eq!(update.gained, 1);
        assert_eq!(update.current, 5);
    }

    #[test]
    fn test_saves_when_best_is_beaten() {
        let store = MemoryScoreStore::with_best(2);
        let mut tracker = ScoreTracker::new(Box::new(store.clone()));

        let update = tracker.award(1, 1.0);
        assert!(!update.new_best);
        assert!(store.saved().is_empty());

        tracker.award(1, 1.0);
        assert!(store.saved().is_empty());

        let update = tracker.award(3, 2.0);
        assert!(update.new_best);
        assert_eq!(tracker.best(), 8);
        assert_eq!(store.saved(), vec![8]);
    }

    #[test]
    fn test_reset_keeps_best() {
        let mut tracker = ScoreTracker::new(Box::new(MemoryScoreStore::default()));
        tracker.award(3, 1.0);
        tracker.reset_current();
        assert_eq!(tracker.current(), 0);
        assert_eq!(tracker.best(), 3);
    }

    #[test]
    fn test_rainbow_has_no_extra_multiplier() {
        let mut tracker = ScoreTracker::new(Box::new(MemoryScoreStore::default()));
        tracker.award(ItemKind::Rainbow.points(), Difficulty::Easy.score_multiplier());
        tracker.award(ItemKind::Basic.points(), Difficulty::Easy.score_multiplier());
        assert_eq!(tracker.current(), 3);
    }

    proptest! {
        #[test]
        fn test_best_never_below_current(
            initial_best in 0i32..50,
            awards in proptest::collection::vec((0usize..5, 0usize..4), 0..40),
        ) {
            let mut tracker = ScoreTracker::new(Box::new(MemoryScoreStore::with_best(initial_best)));
            for (kind, difficulty) in awards {
                let kind = ItemKind::ALL[kind];
                let difficulty = Difficulty::ALL[difficulty];
                tracker.award(kind.points(), difficulty.score_multiplier());
                prop_assert!(tracker.best() >= tracker.current());
            }
        }
    }
}
