//! Item kinds, the active item, and the weighted spawner that places it.

use std::time::Instant;

use rand::{rngs::StdRng, seq::SliceRandom, Rng};
use thiserror::Error;
use tracing::{trace, warn};

use super::config::GameConfig;
use super::state::{Position, SnakeBody, Vec2};

/// Sum of all spawn weights
pub const TOTAL_SPAWN_WEIGHT: i32 = 100;

/// Kind of pickup. Determines points and status effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Basic,
    Golden,
    Speed,
    Slow,
    Rainbow,
}

impl ItemKind {
    /// All kinds in cumulative-weight order
    pub const ALL: [ItemKind; 5] = [
        ItemKind::Basic,
        ItemKind::Golden,
        ItemKind::Speed,
        ItemKind::Slow,
        ItemKind::Rainbow,
    ];

    pub fn points(&self) -> i32 {
        match self {
            ItemKind::Basic => 1,
            ItemKind::Golden => 3,
            ItemKind::Speed => 1,
            ItemKind::Slow => 1,
            ItemKind::Rainbow => 2,
        }
    }

    pub fn spawn_weight(&self) -> i32 {
        match self {
            ItemKind::Basic => 60,
            ItemKind::Golden => 15,
            ItemKind::Speed => 10,
            ItemKind::Slow => 10,
            ItemKind::Rainbow => 5,
        }
    }

    /// Text shown to the player.
    ///
    /// NOTE: the Rainbow text promises doubled scoring, but scoring only ever
    /// uses `points()` times the difficulty multiplier.
    pub fn description(&self) -> &'static str {
        match self {
            ItemKind::Basic => "Basic (+1 point)",
            ItemKind::Golden => "Golden (+3 points)",
            ItemKind::Speed => "Speed (+1 point, speed x2)",
            ItemKind::Slow => "Slow (+1 point, speed /2)",
            ItemKind::Rainbow => "Rainbow (+2 points, score x2)",
        }
    }

    /// Map a roll in `0..TOTAL_SPAWN_WEIGHT` onto the cumulative weight table
    /// (cut points 60/75/85/95/100).
    pub fn from_roll(roll: i32) -> ItemKind {
        let mut cumulative = 0;
        for kind in Self::ALL {
            cumulative += kind.spawn_weight();
            if roll < cumulative {
                return kind;
            }
        }
        ItemKind::Rainbow
    }
}

/// The pickup currently on the board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item {
    pub position: Position,
    pub kind: ItemKind,
    pub spawn_time: Instant,
    pub active: bool,
}

impl Item {
    pub fn new(position: Position, kind: ItemKind, spawn_time: Instant) -> Self {
        Self {
            position,
            kind,
            spawn_time,
            active: true,
        }
    }

    /// True if `point` is within `size` of the item on both axes
    pub fn touches(&self, point: Vec2, size: f64) -> bool {
        self.active && point.within_box(self.position.to_vec2(), size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("no free cell left on a {columns}x{rows} board")]
    BoardFull { columns: i32, rows: i32 },
}

/// Weighted item chooser with rejection-sampling placement
#[derive(Debug, Clone)]
pub struct ItemSpawner {
    rng: StdRng,
    cell: f64,
    columns: i32,
    rows: i32,
    max_attempts: usize,
}

impl ItemSpawner {
    pub fn new(config: &GameConfig, rng: StdRng) -> Self {
        let cell = config.segment_size;
        let columns = (((config.arena_width - cell) / cell) as i32).max(1);
        let rows = (((config.arena_height - cell) / cell) as i32).max(1);

        Self {
            rng,
            cell,
            columns,
            rows,
            max_attempts: config.max_spawn_attempts,
        }
    }

    /// Grid dimensions (columns, rows)
    pub fn grid(&self) -> (i32, i32) {
        (self.columns, self.rows)
    }

    /// Single weighted draw over the item table
    pub fn choose_kind(&mut self) -> ItemKind {
        ItemKind::from_roll(self.rng.gen_range(0..TOTAL_SPAWN_WEIGHT))
    }

    /// Place a new item on a cell clear of the body.
    ///
    /// Cells are drawn uniformly up to `max_attempts` times. After that every
    /// cell is scanned and one of the free ones is picked, so a crowded board
    /// still gets an item as long as any cell is left.
    pub fn spawn(&mut self, body: &SnakeBody, now: Instant) -> Result<Item, SpawnError> {
        let position = self.place(body)?;
        let kind = self.choose_kind();
        trace!(?position, ?kind, "item spawned");
        Ok(Item::new(position, kind, now))
    }

    fn place(&mut self, body: &SnakeBody) -> Result<Position, SpawnError> {
        for _ in 0..self.max_attempts {
            let col = self.rng.gen_range(0..self.columns);
            let row = self.rng.gen_range(0..self.rows);
            let candidate = self.cell_at(col, row);
            if self.is_free(body, candidate) {
                return Ok(candidate);
            }
        }

        warn!(
            attempts = self.max_attempts,
            segments = body.len(),
            "random placement exhausted, scanning for a free cell"
        );

        let free: Vec<Position> = (0..self.rows)
            .flat_map(|row| (0..self.columns).map(move |col| (col, row)))
            .map(|(col, row)| self.cell_at(col, row))
            .filter(|&cell| self.is_free(body, cell))
            .collect();

        free.choose(&mut self.rng)
            .copied()
            .ok_or(SpawnError::BoardFull {
                columns: self.columns,
                rows: self.rows,
            })
    }

    fn cell_at(&self, col: i32, row: i32) -> Position {
        Position::new(
            (col as f64 * self.cell) as i32,
            (row as f64 * self.cell) as i32,
        )
    }

    fn is_free(&self, body: &SnakeBody, cell: Position) -> bool {
        let point = cell.to_vec2();
        !body.positions().any(|p| p.within_box(point, self.cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Direction;
    use crate::game::state::Segment;
    use rand::SeedableRng;

    fn spawner(seed: u64) -> ItemSpawner {
        ItemSpawner::new(&GameConfig::default(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_cumulative_cut_points() {
        assert_eq!(ItemKind::from_roll(0), ItemKind::Basic);
        assert_eq!(ItemKind::from_roll(59), ItemKind::Basic);
        assert_eq!(ItemKind::from_roll(60), ItemKind::Golden);
        assert_eq!(ItemKind::from_roll(74), ItemKind::Golden);
        assert_eq!(ItemKind::from_roll(75), ItemKind::Speed);
        assert_eq!(ItemKind::from_roll(85), ItemKind::Slow);
        assert_eq!(ItemKind::from_roll(95), ItemKind::Rainbow);
        assert_eq!(ItemKind::from_roll(99), ItemKind::Rainbow);
    }

    #[test]
    fn test_weights_sum_to_total() {
        let total: i32 = ItemKind::ALL.iter().map(|k| k.spawn_weight()).sum();
        assert_eq!(total, TOTAL_SPAWN_WEIGHT);
    }

    #[test]
    fn test_weighted_draw_frequencies() {
        let mut spawner = spawner(7);
        let samples = 100_000;
        let mut counts = [0usize; 5];

        for _ in 0..samples {
            let kind = spawner.choose_kind();
            let idx = ItemKind::ALL.iter().position(|k| *k == kind).unwrap();
            counts[idx] += 1;
        }

        for (kind, count) in ItemKind::ALL.iter().zip(counts) {
            let observed = count as f64 / samples as f64;
            let expected = kind.spawn_weight() as f64 / TOTAL_SPAWN_WEIGHT as f64;
            assert!(
                (observed - expected).abs() < 0.02,
                "{:?}: observed {observed}, expected {expected}",
                kind
            );
        }
    }

    #[test]
    fn test_grid_dimensions() {
        assert_eq!(spawner(1).grid(), (59, 59));
    }

    #[test]
    fn test_spawn_avoids_body() {
        let body = SnakeBody::new(Vec2::new(300.0, 300.0), Direction::Right, 3, 10.0, 3.0, 900);
        let mut spawner = spawner(42);
        let now = Instant::now();

        for _ in 0..500 {
            let item = spawner.spawn(&body, now).unwrap();
            assert!(item.active);
            assert_eq!(item.position.x % 10, 0);
            assert_eq!(item.position.y % 10, 0);
            assert!(item.position.x >= 0 && item.position.x < 590);
            assert!(item.position.y >= 0 && item.position.y < 590);
            for p in body.positions() {
                assert!(!p.within_box(item.position.to_vec2(), 10.0));
            }
        }
    }

    #[test]
    fn test_fallback_scan_finds_last_free_cell() {
        // 3x3 grid, every cell covered except (20, 20)
        let config = GameConfig {
            arena_width: 40.0,
            arena_height: 40.0,
            max_spawn_attempts: 0,
            ..GameConfig::default()
        };
        let segments: Vec<Segment> = [(0, 0), (10, 0), (20, 0), (0, 10), (10, 10), (20, 10), (0, 20), (10, 20)]
            .iter()
            .map(|&(x, y)| Segment::new(Vec2::new(x as f64, y as f64), Vec2::ZERO))
            .collect();
        let body = SnakeBody::from_segments(segments, Direction::Right, 10.0, 900).unwrap();

        let mut spawner = ItemSpawner::new(&config, StdRng::seed_from_u64(3));
        let item = spawner.spawn(&body, Instant::now()).unwrap();
        assert_eq!(item.position, Position::new(20, 20));
    }

    #[test]
    fn test_full_board_reports_error() {
        let config = GameConfig {
            arena_width: 20.0,
            arena_height: 20.0,
            max_spawn_attempts: 5,
            ..GameConfig::default()
        };
        let body = SnakeBody::new(Vec2::new(0.0, 0.0), Direction::Right, 1, 10.0, 3.0, 10);
        let mut spawner = ItemSpawner::new(&config, StdRng::seed_from_u64(3));

        assert_eq!(
            spawner.spawn(&body, Instant::now()),
            Err(SpawnError::BoardFull { columns: 1, rows: 1 })
        );
    }

    #[test]
    fn test_item_touches() {
        let item = Item::new(Position::new(310, 300), ItemKind::Basic, Instant::now());
        assert!(item.touches(Vec2::new(303.0, 300.0), 10.0));
        assert!(!item.touches(Vec2::new(300.0, 300.0), 10.0));

        let mut eaten = item;
        eaten.active = false;
        assert!(!eaten.touches(Vec2::new(310.0, 300.0), 10.0));
    }
}
