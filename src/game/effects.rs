use std::time::{Duration, Instant};

use super::config::GameConfig;
use super::item::ItemKind;

/// Duration of each timed effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectDurations {
    pub speed_boost: Duration,
    pub slow: Duration,
    pub rainbow: Duration,
}

impl Default for EffectDurations {
    fn default() -> Self {
        Self {
            speed_boost: Duration::from_millis(5000),
            slow: Duration::from_millis(3000),
            rainbow: Duration::from_millis(10000),
        }
    }
}

impl From<&GameConfig> for EffectDurations {
    fn from(config: &GameConfig) -> Self {
        Self {
            speed_boost: Duration::from_millis(config.speed_boost_ms),
            slow: Duration::from_millis(config.slow_ms),
            rainbow: Duration::from_millis(config.rainbow_ms),
        }
    }
}

/// Time-bounded speed and visual modifiers.
///
/// Speed and Slow share one window: picking up either replaces whatever speed
/// effect was running. Rainbow is cosmetic and never touches the speed.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusEffects {
    base_speed: f64,
    current_speed: f64,
    speed_effect_ends_at: Option<Instant>,
    rainbow_active: bool,
    rainbow_ends_at: Option<Instant>,
    durations: EffectDurations,
}

impl StatusEffects {
    pub fn new(base_speed: f64, durations: EffectDurations) -> Self {
        Self {
            base_speed,
            current_speed: base_speed,
            speed_effect_ends_at: None,
            rainbow_active: false,
            rainbow_ends_at: None,
            durations,
        }
    }

    pub fn base_speed(&self) -> f64 {
        self.base_speed
    }

    pub fn current_speed(&self) -> f64 {
        self.current_speed
    }

    pub fn rainbow_active(&self) -> bool {
        self.rainbow_active
    }

    pub fn speed_effect_ends_at(&self) -> Option<Instant> {
        self.speed_effect_ends_at
    }

    pub fn rainbow_ends_at(&self) -> Option<Instant> {
        self.rainbow_ends_at
    }

    /// Start the effect carried by `kind`. Returns true if the speed changed.
    pub fn apply(&mut self, kind: ItemKind, now: Instant) -> bool {
        let before = self.current_speed;

        match kind {
            ItemKind::Speed => {
                self.current_speed = self.base_speed * 2.0;
                self.speed_effect_ends_at = Some(now + self.durations.speed_boost);
            }
            ItemKind::Slow => {
                self.current_speed = self.base_speed / 2.0;
                self.speed_effect_ends_at = Some(now + self.durations.slow);
            }
            ItemKind::Rainbow => {
                self.rainbow_active = true;
                self.rainbow_ends_at = Some(now + self.durations.rainbow);
            }
            ItemKind::Basic | ItemKind::Golden => {}
        }

        self.current_speed != before
    }

    /// Clear every effect whose window has closed. Returns true if the speed changed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.current_speed;

        if self.speed_effect_ends_at.map_or(true, |end| now >= end) {
            self.current_speed = self.base_speed;
            self.speed_effect_ends_at = None;
        }
        if self.rainbow_ends_at.map_or(true, |end| now >= end) {
            self.rainbow_active = false;
            self.rainbow_ends_at = None;
        }

        self.current_speed != before
    }
}
