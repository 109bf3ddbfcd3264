//! Game state and core simulation types
//!
//! Everything a run mutates lives in `GameState`; the step function in
//! `tick` takes it by mutable reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::corridor::Corridor;
use super::entities::Populations;
use super::geom::Rect;
use super::level::Difficulty;
use super::spawn::SpawnScheduler;
use crate::config::GameConfig;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Simulation running
    Active,
    /// Level banner showing, simulation paused
    Transition { level: u32, remaining: f32 },
    /// Health ran out; waits for restart
    GameOver,
    /// Win score reached; waits for restart
    Won,
}

impl RunPhase {
    /// Run has ended (only a restart leaves this phase)
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::GameOver | RunPhase::Won)
    }

    /// Banner phase for the start of `level`
    pub fn entering(level: u32) -> Self {
        RunPhase::Transition {
            level,
            remaining: LEVEL_BANNER_TIME,
        }
    }
}

/// The player's ship
///
/// The ship only moves vertically; its horizontal centre is `SHIP_X`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Centre y
    pub y: f32,
    pub size: Vec2,
    /// Health in half-heart units
    pub hp: u8,
    /// Seconds of invulnerability left
    pub invuln: f32,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,
    /// Seconds spent in the active phase this run
    pub alive_time: f32,
}

impl Player {
    pub fn new(y: f32, size: Vec2) -> Self {
        Self {
            y,
            size,
            hp: MAX_HP_UNITS,
            invuln: 0.0,
            fire_cooldown: 0.0,
            alive_time: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(Vec2::new(SHIP_X, self.y), self.size)
    }

    pub fn can_be_hurt(&self) -> bool {
        self.invuln <= 0.0
    }

    /// Take `units` of damage unless invulnerable. Opens a new
    /// invulnerability window on success.
    pub fn damage(&mut self, units: u8) -> bool {
        if !self.can_be_hurt() {
            return false;
        }
        self.hp = self.hp.saturating_sub(units);
        self.invuln = INVULN_TIME;
        true
    }

    /// Restore up to `units`; returns how many were actually restored
    pub fn heal(&mut self, units: u8) -> u8 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(units).min(MAX_HP_UNITS);
        self.hp - before
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    pub fn health_full(&self) -> bool {
        self.hp >= MAX_HP_UNITS
    }

    /// Still inside the start-of-run grace period
    pub fn in_grace(&self) -> bool {
        self.alive_time <= SPAWN_GRACE
    }

    /// Blink while invulnerable: hidden on odd twentieths of a second
    pub fn visible(&self) -> bool {
        self.invuln <= 0.0 || (self.invuln * 20.0) as i32 % 2 == 0
    }

    /// Count down timers for one active frame
    pub fn cool_down(&mut self, dt: f32) {
        self.alive_time += dt;
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        self.invuln = (self.invuln - dt).max(0.0);
    }

    /// Move up/down and keep the ship on screen
    pub fn steer(&mut self, up: bool, down: bool, speed: f32, dt: f32, screen_h: f32) {
        if up {
            self.y -= speed * dt;
        }
        if down {
            self.y += speed * dt;
        }
        let half = self.size.y * 0.5;
        self.y = self.y.clamp(half, screen_h - half);
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    /// The one random source every component draws from
    pub rng: Pcg32,
    pub score: u64,
    /// Level whose banner was last shown
    pub level: u32,
    pub phase: RunPhase,
    /// Frames stepped since the last (re)start
    pub frame: u64,
    pub player: Player,
    pub corridor: Corridor,
    pub spawner: SpawnScheduler,
    pub entities: Populations,
}

impl GameState {
    /// Create a new run. `config` is expected to have passed validation.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let corridor = Corridor::new(
            config.rows(),
            config.cols(),
            config.block,
            Difficulty::for_level(1).drift,
            &mut rng,
        );
        let player = Player::new(config.screen_h / 2.0, config.sprites.ship);
        log::info!("new run, seed {seed}");

        Self {
            seed,
            config,
            rng,
            score: 0,
            level: 1,
            phase: RunPhase::entering(1),
            frame: 0,
            player,
            corridor,
            spawner: SpawnScheduler::new(),
            entities: Populations::new(),
        }
    }

    /// Reset everything to the start of a run, regenerating the corridor
    ///
    /// The random stream is not rewound, so the new corridor differs from the
    /// previous run's.
    pub fn restart(&mut self) {
        log::info!("restart after {} frames, score {}", self.frame, self.score);
        self.score = 0;
        self.level = 1;
        self.phase = RunPhase::entering(1);
        self.frame = 0;
        self.player = Player::new(self.config.screen_h / 2.0, self.config.sprites.ship);
        self.spawner = SpawnScheduler::new();
        self.entities = Populations::new();
        self.corridor
            .reset(Difficulty::for_level(1).drift, &mut self.rng);
    }

    /// Difficulty for the level the current score implies
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::for_level(super::level::level_for_score(self.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship() -> Player {
        Player::new(360.0, Vec2::new(52.0, 35.0))
    }

    #[test]
    fn test_new_run_starts_with_level_one_banner() {
        let state = GameState::new(GameConfig::default(), 12345);
        assert_eq!(state.phase, RunPhase::entering(1));
        assert_eq!(state.score, 0);
        assert_eq!(state.player.hp, MAX_HP_UNITS);
        assert_eq!(state.player.y, 360.0);
        assert_eq!(state.corridor.len(), 53);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_damage_opens_invulnerability_window() {
        let mut p = ship();
        assert!(p.damage(DMG_HALF));
        assert_eq!(p.hp, 9);
        assert_eq!(p.invuln, INVULN_TIME);
        assert!(!p.damage(DMG_FULL));
        assert_eq!(p.hp, 9);
    }

    #[test]
    fn test_damage_never_underflows() {
        let mut p = ship();
        p.hp = 1;
        assert!(p.damage(DMG_FULL));
        assert_eq!(p.hp, 0);
        assert!(p.is_dead());
    }

    #[test]
    fn test_cool_down_saturates_at_zero() {
        let mut p = ship();
        p.invuln = 0.1;
        p.fire_cooldown = 0.05;
        p.cool_down(0.2);
        assert_eq!(p.invuln, 0.0);
        assert_eq!(p.fire_cooldown, 0.0);
        assert!((p.alive_time - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_steer_clamps_to_screen() {
        let mut p = ship();
        p.steer(true, false, 420.0, 10.0, 720.0);
        assert_eq!(p.y, 17.5);
        p.steer(false, true, 420.0, 10.0, 720.0);
        assert_eq!(p.y, 702.5);
        p.steer(true, true, 420.0, 0.5, 720.0);
        assert_eq!(p.y, 702.5);
    }

    #[test]
    fn test_blink_visibility() {
        let mut p = ship();
        assert!(p.visible());
        p.invuln = 0.52; // 10.4 -> even
        assert!(p.visible());
        p.invuln = 0.47; // 9.4 -> odd
        assert!(!p.visible());
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(GameConfig::default(), 7);
        state.score = 640;
        state.level = 3;
        state.phase = RunPhase::GameOver;
        state.player.hp = 0;
        state.entities.fire_player_shot(Vec2::ZERO, Vec2::ONE);
        state.corridor.scroll_by(10.0);

        state.restart();
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.phase, RunPhase::entering(1));
        assert_eq!(state.player.hp, MAX_HP_UNITS);
        assert!(state.entities.is_empty());
        assert_eq!(state.corridor.scroll(), 0.0);
        assert_eq!(state.spawner, SpawnScheduler::new());
    }
}
