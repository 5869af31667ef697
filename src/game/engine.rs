use std::time::Instant;

use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use super::{
    action::Direction,
    collision::{CollisionDetector, CollisionType},
    config::GameConfig,
    difficulty::Difficulty,
    effects::{EffectDurations, StatusEffects},
    events::GameEvent,
    input_queue::InputQueue,
    item::{Item, ItemSpawner, SpawnError},
    score::ScoreTracker,
    state::{SnakeBody, Vec2},
};

/// Result of a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// Events generated this tick, in order
    pub events: Vec<GameEvent>,
    /// Whether the session ended this tick (or had already ended)
    pub terminated: bool,
}

impl TickResult {
    pub fn collision(&self) -> Option<CollisionType> {
        self.events.iter().find_map(|event| match event {
            GameEvent::Collision(kind) => Some(*kind),
            _ => None,
        })
    }

    pub fn ate_item(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, GameEvent::ItemEaten { .. }))
    }
}

/// One round of play, from "new game" to the fatal collision.
///
/// The host calls [`GameSession::tick`] at a fixed cadence while playing; a
/// tick is synchronous and never overlaps another.
#[derive(Debug, Clone)]
pub struct GameSession {
    difficulty: Difficulty,
    segment_size: f64,
    body: SnakeBody,
    queue: InputQueue,
    effects: StatusEffects,
    item: Item,
    spawner: ItemSpawner,
    collisions: CollisionDetector,
    alive: bool,
    ticks: u64,
}

impl GameSession {
    /// Set up a fresh session: a short horizontal snake at the centre heading
    /// right at the difficulty's base speed, and the first item.
    pub fn new(
        config: &GameConfig,
        difficulty: Difficulty,
        rng: StdRng,
        now: Instant,
    ) -> Result<Self, SpawnError> {
        let base_speed = difficulty.speed();
        let body = SnakeBody::new(
            Vec2::new(config.arena_width / 2.0, config.arena_height / 2.0),
            Direction::Right,
            config.initial_snake_length,
            config.segment_size,
            base_speed,
            config.segment_capacity,
        );

        Self::with_body(config, difficulty, body, rng, now)
    }

    /// Set up a session around an existing body
    pub fn with_body(
        config: &GameConfig,
        difficulty: Difficulty,
        mut body: SnakeBody,
        rng: StdRng,
        now: Instant,
    ) -> Result<Self, SpawnError> {
        let effects = StatusEffects::new(difficulty.speed(), EffectDurations::from(config));
        body.retarget_head(effects.current_speed());

        let mut spawner = ItemSpawner::new(config, rng);
        let item = spawner.spawn(&body, now)?;

        info!(
            difficulty = difficulty.label(),
            speed = effects.base_speed(),
            segments = body.len(),
            "session started"
        );

        Ok(Self {
            difficulty,
            segment_size: config.segment_size,
            body,
            queue: InputQueue::new(),
            effects,
            item,
            spawner,
            collisions: CollisionDetector::from_config(config),
            alive: true,
            ticks: 0,
        })
    }

    /// Queue a turn; reversals and overflow are dropped silently
    pub fn steer(&mut self, direction: Direction) -> bool {
        self.queue.enqueue(direction, self.body.direction())
    }

    /// Run one simulation step.
    ///
    /// Order: apply the next queued turn, move the body, check collisions,
    /// pick up the item, then expire effects. A pickup on the same tick as a
    /// collision still counts; the session ends once the tick is scored.
    pub fn tick(&mut self, now: Instant, score: &mut ScoreTracker) -> TickResult {
        let mut result = TickResult::default();

        if !self.alive {
            result.terminated = true;
            return result;
        }

        self.ticks += 1;

        if let Some(direction) = self.queue.dequeue_if_ready(self.body.direction()) {
            self.body.set_direction(direction, self.effects.current_speed());
            debug!(?direction, tick = self.ticks, "turned");
            result.events.push(GameEvent::DirectionChanged(direction));
        }

        self.body.advance(self.effects.current_speed());

        let collision = self.collisions.check(&self.body);

        if self.item.touches(self.body.head().position, self.segment_size) {
            if let Err(e) = self.eat_item(now, score, &mut result.events) {
                warn!(error = %e, "nowhere left to place an item");
                result.events.push(GameEvent::BoardFull);
            }
        }

        if let Some(collision) = collision {
            let head = self.body.head().position;
            info!(
                ?collision,
                x = head.x,
                y = head.y,
                score = score.current(),
                "game over"
            );
            result.events.push(GameEvent::Collision(collision));
        }

        if result.events.iter().any(GameEvent::is_fatal) {
            self.alive = false;
            result.terminated = true;
            return result;
        }

        if self.effects.expire(now) {
            self.body.retarget_head(self.effects.current_speed());
            result
                .events
                .push(GameEvent::SpeedChanged(self.effects.current_speed()));
        }

        result
    }

    fn eat_item(
        &mut self,
        now: Instant,
        score: &mut ScoreTracker,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), SpawnError> {
        let kind = self.item.kind;
        self.item.active = false;

        let update = score.award(kind.points(), self.difficulty.score_multiplier());
        debug!(?kind, gained = update.gained, score = update.current, "item eaten");
        events.push(GameEvent::ItemEaten {
            kind,
            points: update.gained,
            score: update.current,
        });
        if update.new_best {
            events.push(GameEvent::BestScoreBeaten(update.current));
        }

        if self.effects.apply(kind, now) {
            self.body.retarget_head(self.effects.current_speed());
            events.push(GameEvent::SpeedChanged(self.effects.current_speed()));
        }

        if !self.body.grow() {
            debug!(capacity = self.body.capacity(), "body at capacity, not growing");
            events.push(GameEvent::CapacityReached);
        }

        self.item = self.spawner.spawn(&self.body, now)?;
        events.push(GameEvent::ItemSpawned {
            kind: self.item.kind,
            position: self.item.position,
        });
        Ok(())
    }

    pub fn body(&self) -> &SnakeBody {
        &self.body
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn effects(&self) -> &StatusEffects {
        &self.effects
    }

    pub fn input_queue(&self) -> &InputQueue {
        &self.queue
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
