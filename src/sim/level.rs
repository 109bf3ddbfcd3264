//! Difficulty levels
//!
//! The level is a pure step function of score, and every difficulty knob is
//! a step function of level. Nothing here is cached; callers recompute each
//! frame.

use serde::{Deserialize, Serialize};

use super::corridor::Drift;
use crate::consts::*;

/// Level (1..=5) reached with this score
pub fn level_for_score(score: u64) -> u32 {
    let level = 1 + score / LEVEL_SCORE_STEP;
    level.min(MAX_LEVEL as u64) as u32
}

/// Score at which `level` begins
pub fn level_threshold(level: u32) -> u64 {
    level.saturating_sub(1) as u64 * LEVEL_SCORE_STEP
}

/// Per-frame difficulty knobs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub level: u32,
    /// Ship vertical speed multiplier
    pub ship_mul: f32,
    /// Corridor scroll speed multiplier
    pub scroll_mul: f32,
    pub drift: Drift,
}

impl Difficulty {
    pub fn for_level(level: u32) -> Self {
        let (ship_mul, scroll_mul) = speed_multipliers(level);
        Self {
            level,
            ship_mul,
            scroll_mul,
            drift: wobble(level),
        }
    }

    pub fn ship_speed(&self) -> f32 {
        SHIP_SPEED * self.ship_mul
    }

    pub fn scroll_speed(&self) -> f32 {
        SCROLL_SPEED * self.scroll_mul
    }

    /// Asteroids fly from level 2
    pub fn hazards_enabled(&self) -> bool {
        self.level >= 2
    }

    /// UFOs and heart pickups appear from level 3
    pub fn enemies_enabled(&self) -> bool {
        self.level >= 3
    }
}

fn speed_multipliers(level: u32) -> (f32, f32) {
    match level {
        0..=1 => (1.0, 1.0),
        2..=3 => (1.12, 1.12),
        4 => (1.25, 1.25),
        _ => (1.35, 1.35),
    }
}

fn wobble(level: u32) -> Drift {
    let mut center = CENTER_DRIFT;
    let mut width = WIDTH_DRIFT;
    if level >= 3 {
        center += 1;
    }
    if level >= 4 {
        center += 1;
        width += 1;
    }
    if level >= 5 {
        center += 1;
        width += 1;
    }
    Drift { center, width }
}

/// Banner lines shown while a level transition is running
pub fn level_text(level: u32) -> (String, String) {
    let next = level_threshold(level + 1);
    match level {
        0..=1 => (
            "Now: Planets only".to_string(),
            format!("Next ({next}): + Asteroids + faster"),
        ),
        2 => (
            "Now: Asteroids unlocked + faster".to_string(),
            format!("Next ({next}): + UFOs + heart pickups"),
        ),
        3 => (
            "Now: UFOs + heart pickups".to_string(),
            format!("Next ({next}): Faster + more wobble"),
        ),
        4 => (
            "Now: Faster + more wobble".to_string(),
            format!("Next ({WIN_SCORE}): YOU WIN"),
        ),
        _ => (
            "Now: Max speed + max wobble".to_string(),
            format!("Next ({WIN_SCORE}): YOU WIN"),
        ),
    }
}
