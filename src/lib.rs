//! Tunnel Shooter - a side-scrolling corridor arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (corridor, spawning, collisions, run state)
//! - `config`: Screen geometry and sprite dimensions
//! - `error`: Startup error types

pub mod config;
pub mod error;
pub mod sim;

pub use config::{GameConfig, SpriteDims};
pub use error::ConfigError;

/// Game configuration constants
pub mod consts {
    /// Frame rate cap applied by the runner
    pub const FPS: u32 = 60;
    /// Largest frame delta the runner hands to the simulation
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default screen dimensions (pixels)
    pub const SCREEN_W: f32 = 1200.0;
    pub const SCREEN_H: f32 = 720.0;
    /// Corridor grid cell size (pixels)
    pub const BLOCK: f32 = 24.0;

    /// Win once this score is reached
    pub const WIN_SCORE: u64 = 1200;
    /// Score span of one difficulty level
    pub const LEVEL_SCORE_STEP: u64 = 300;
    pub const MAX_LEVEL: u32 = 5;

    /// Ship
    pub const SHIP_X: f32 = 110.0;
    pub const SHIP_SPEED: f32 = 420.0;

    /// Player shots
    pub const SHOT_SPEED: f32 = 900.0;
    pub const SHOT_COOLDOWN: f32 = 0.12;
    /// Gap between the ship's nose and a fresh shot
    pub const SHOT_MUZZLE_GAP: f32 = 6.0;

    /// Corridor scroll speed before level multipliers (pixels/s)
    pub const SCROLL_SPEED: f32 = 180.0;

    /// Corridor height limits (grid rows)
    pub const MIN_CORRIDOR_H: i32 = 12;
    pub const MAX_CORRIDOR_H: i32 = 16;
    /// Extra columns generated beyond the right screen edge
    pub const CORRIDOR_EXTRA_COLS: usize = 3;

    /// Base corridor wobble (grows with level)
    pub const CENTER_DRIFT: i32 = 1;
    pub const WIDTH_DRIFT: i32 = 1;

    /// Seconds after a (re)start during which nothing can hurt the ship
    pub const SPAWN_GRACE: f32 = 1.0;

    /// Planets (static obstacles)
    pub const PLANET_SPAWN_CHANCE: f32 = 0.18;
    pub const PLANET_MIN_GAP_COLS: u32 = 6;
    pub const PLANET_SAFE_MARGIN: f32 = 10.0;
    pub const PLANET_SPAWN_OFFSET: f32 = 30.0;
    pub const PLANET_SCORE: u64 = 10;

    /// Asteroids (mobile hazards)
    pub const ASTEROID_FRAME_COUNT: u32 = 6;
    pub const ASTEROID_EXPLODE_FPS: f32 = 18.0;
    pub const ASTEROID_SPAWN_CHANCE: f32 = 0.08;
    pub const ASTEROID_MIN_GAP_COLS: u32 = 10;
    pub const ASTEROID_H_MIN: i32 = 26;
    pub const ASTEROID_H_MAX: i32 = 55;
    pub const ASTEROID_VX_MIN: f32 = 80.0;
    pub const ASTEROID_VX_MAX: f32 = 220.0;
    pub const ASTEROID_VY_MAX: f32 = 55.0;
    pub const ASTEROID_SAFE_MARGIN: f32 = 12.0;
    pub const ASTEROID_SPAWN_OFFSET: (i32, i32) = (80, 260);
    pub const ASTEROID_SCORE: u64 = 15;

    /// UFOs (enemies)
    pub const UFO_SPAWN_CHANCE: f32 = 0.11;
    pub const UFO_MIN_GAP_COLS: u32 = 12;
    pub const UFO_SPAWN_MARGIN: f32 = 10.0;
    pub const UFO_BOUNCE_MARGIN: f32 = 8.0;
    pub const UFO_VX_MIN: f32 = 40.0;
    pub const UFO_VX_MAX: f32 = 140.0;
    pub const UFO_VY_MAX: f32 = 45.0;
    pub const UFO_SPAWN_OFFSET: (i32, i32) = (90, 280);
    pub const UFO_FIRE_CHANCE_PER_SEC: f32 = 0.6;
    pub const UFO_SHOT_SPEED: f32 = 520.0;
    pub const UFO_SCORE: u64 = 25;

    /// Heart pickups
    pub const HEART_SPAWN_CHANCE: f32 = 0.06;
    pub const HEART_MIN_GAP_COLS: u32 = 18;
    pub const HEART_SAFE_MARGIN: f32 = 10.0;
    pub const HEART_SPAWN_OFFSET: f32 = 40.0;

    /// Health in half-heart units
    pub const MAX_HEARTS: u8 = 5;
    pub const MAX_HP_UNITS: u8 = MAX_HEARTS * 2;
    pub const DMG_HALF: u8 = 1;
    pub const DMG_FULL: u8 = 2;
    pub const HEAL_UNITS: u8 = 2;
    pub const INVULN_TIME: f32 = 0.55;

    /// Level banner duration (seconds)
    pub const LEVEL_BANNER_TIME: f32 = 2.2;

    /// Off-screen culling thresholds (pixels past the screen edge)
    pub const SHOT_CULL_MARGIN: f32 = 120.0;
    pub const DRIFTER_CULL_MARGIN: f32 = 120.0;
    pub const MOVER_CULL_MARGIN: f32 = 240.0;
    pub const ENEMY_SHOT_CULL_MARGIN: f32 = 60.0;
    /// Drawn radius of a UFO bullet (collision treats it as a point)
    pub const ENEMY_SHOT_RADIUS: f32 = 4.0;

    /// Per-kind spawn counters start here so the first column is always eligible
    pub const SPAWN_COUNTER_START: u32 = 999;
}
