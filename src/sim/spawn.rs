//! Per-column spawn scheduler
//!
//! Runs once each time the corridor advances by a column. Every kind keeps a
//! "columns since last spawn" counter; a kind may spawn once its counter has
//! reached the minimum gap and a chance roll succeeds. Placement uses the
//! newly appended column, so spawns always start inside the corridor.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::corridor::CorridorColumn;
use super::entities::{Enemy, Hazard, HazardState, Obstacle, Pickup, Populations};
use super::geom::Rect;
use super::level::Difficulty;
use crate::config::GameConfig;
use crate::consts::*;

/// Kinds the scheduler can introduce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    Obstacle,
    Hazard,
    Enemy,
    Pickup,
}

impl SpawnKind {
    /// Evaluation order within one column
    pub const ALL: [SpawnKind; 4] = [
        SpawnKind::Obstacle,
        SpawnKind::Hazard,
        SpawnKind::Enemy,
        SpawnKind::Pickup,
    ];

    pub fn rule(self) -> SpawnRule {
        match self {
            SpawnKind::Obstacle => SpawnRule {
                chance: PLANET_SPAWN_CHANCE,
                min_gap: PLANET_MIN_GAP_COLS,
                margin: PLANET_SAFE_MARGIN,
            },
            SpawnKind::Hazard => SpawnRule {
                chance: ASTEROID_SPAWN_CHANCE,
                min_gap: ASTEROID_MIN_GAP_COLS,
                margin: ASTEROID_SAFE_MARGIN,
            },
            SpawnKind::Enemy => SpawnRule {
                chance: UFO_SPAWN_CHANCE,
                min_gap: UFO_MIN_GAP_COLS,
                margin: UFO_SPAWN_MARGIN,
            },
            SpawnKind::Pickup => SpawnRule {
                chance: HEART_SPAWN_CHANCE,
                min_gap: HEART_MIN_GAP_COLS,
                margin: HEART_SAFE_MARGIN,
            },
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Spawn tuning for one kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRule {
    /// Probability per eligible column
    pub chance: f32,
    /// Columns that must pass between two spawns
    pub min_gap: u32,
    /// Clearance kept from both corridor walls (pixels)
    pub margin: f32,
}

/// What the scheduler needs to know about the run this column
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext<'a> {
    pub config: &'a GameConfig,
    pub difficulty: Difficulty,
    /// Player is already at full health (suppresses hearts)
    pub health_full: bool,
}

/// Per-kind counters, owned by the game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnScheduler {
    since_last: [u32; 4],
}

impl Default for SpawnScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self {
            since_last: [SPAWN_COUNTER_START; 4],
        }
    }

    /// Columns since `kind` last spawned
    pub fn columns_since(&self, kind: SpawnKind) -> u32 {
        self.since_last[kind.index()]
    }

    /// Handle one corridor advance; `column` is the freshly appended one
    pub fn on_column<R: Rng + ?Sized>(
        &mut self,
        column: CorridorColumn,
        ctx: &SpawnContext<'_>,
        pops: &mut Populations,
        rng: &mut R,
    ) {
        for counter in &mut self.since_last {
            *counter = counter.saturating_add(1);
        }

        for kind in SpawnKind::ALL {
            if !kind_enabled(kind, ctx) {
                continue;
            }
            let rule = kind.rule();
            if self.since_last[kind.index()] < rule.min_gap {
                continue;
            }
            if rng.random::<f32>() >= rule.chance {
                continue;
            }
            if spawn(kind, rule, column, ctx.config, pops, rng) {
                self.since_last[kind.index()] = 0;
            }
        }
    }
}

fn kind_enabled(kind: SpawnKind, ctx: &SpawnContext<'_>) -> bool {
    match kind {
        SpawnKind::Obstacle => true,
        SpawnKind::Hazard => ctx.difficulty.hazards_enabled(),
        SpawnKind::Enemy => ctx.difficulty.enemies_enabled(),
        SpawnKind::Pickup => ctx.difficulty.enemies_enabled() && !ctx.health_full,
    }
}

/// Vertical placement range for a box of `height` in this column
///
/// Returns `None` when the corridor is too narrow for the box plus margins.
pub fn placement_window(column: CorridorColumn, block: f32, height: f32, margin: f32) -> Option<(f32, f32)> {
    let y_min = column.top as f32 * block + margin;
    let y_max = column.bottom as f32 * block - height - margin;
    (y_max > y_min).then_some((y_min, y_max))
}

/// Whole-pixel y inside the window
fn roll_y<R: Rng + ?Sized>((y_min, y_max): (f32, f32), rng: &mut R) -> f32 {
    rng.random_range(y_min as i32..=y_max as i32) as f32
}

/// Place one entity of `kind`. Returns false if the corridor was too narrow.
fn spawn<R: Rng + ?Sized>(
    kind: SpawnKind,
    rule: SpawnRule,
    column: CorridorColumn,
    config: &GameConfig,
    pops: &mut Populations,
    rng: &mut R,
) -> bool {
    let sprites = &config.sprites;
    let block = config.block;

    match kind {
        SpawnKind::Obstacle => {
            let variant = rng.random_range(0..sprites.planets.len());
            let size = sprites.planets[variant];
            let Some(window) = placement_window(column, block, size.y, rule.margin) else {
                return false;
            };
            let y = roll_y(window, rng);
            let x = config.screen_w + PLANET_SPAWN_OFFSET;
            let id = pops.next_entity_id();
            pops.obstacles.push(Obstacle {
                id,
                rect: Rect::new(Vec2::new(x, y), size),
                variant,
            });
            log::debug!("spawned planet #{id} at y={y}");
        }
        SpawnKind::Hazard => {
            let h = rng.random_range(ASTEROID_H_MIN..=ASTEROID_H_MAX) as f32;
            let size = Vec2::new((h * sprites.asteroid_aspect).floor().max(1.0), h);
            let Some(window) = placement_window(column, block, size.y, rule.margin) else {
                return false;
            };
            let y = roll_y(window, rng);
            let (lo, hi) = ASTEROID_SPAWN_OFFSET;
            let x = config.screen_w + rng.random_range(lo..=hi) as f32;
            let vx = rng.random_range(ASTEROID_VX_MIN..=ASTEROID_VX_MAX);
            let vy = rng.random_range(-ASTEROID_VY_MAX..=ASTEROID_VY_MAX);
            let id = pops.next_entity_id();
            pops.hazards.push(Hazard {
                id,
                rect: Rect::new(Vec2::new(x, y), size),
                vel: Vec2::new(vx, vy),
                state: HazardState::Active,
                frames: ASTEROID_FRAME_COUNT,
            });
            log::debug!("spawned asteroid #{id} h={h} at y={y}");
        }
        SpawnKind::Enemy => {
            let size = sprites.ufo;
            let Some(window) = placement_window(column, block, size.y, rule.margin) else {
                return false;
            };
            let y = roll_y(window, rng);
            let (lo, hi) = UFO_SPAWN_OFFSET;
            let x = config.screen_w + rng.random_range(lo..=hi) as f32;
            let vx = rng.random_range(UFO_VX_MIN..=UFO_VX_MAX);
            let vy = rng.random_range(-UFO_VY_MAX..=UFO_VY_MAX);
            let id = pops.next_entity_id();
            pops.enemies.push(Enemy {
                id,
                rect: Rect::new(Vec2::new(x, y), size),
                vel: Vec2::new(vx, vy),
            });
            log::debug!("spawned ufo #{id} at y={y}");
        }
        SpawnKind::Pickup => {
            let size = sprites.heart;
            let Some(window) = placement_window(column, block, size.y, rule.margin) else {
                return false;
            };
            let y = roll_y(window, rng);
            let x = config.screen_w + HEART_SPAWN_OFFSET;
            let id = pops.next_entity_id();
            pops.pickups.push(Pickup {
                id,
                rect: Rect::new(Vec2::new(x, y), size),
            });
            log::debug!("spawned heart #{id} at y={y}");
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const WIDE: CorridorColumn = CorridorColumn { top: 8, bottom: 22 };

    fn ctx(config: &GameConfig, level: u32, health_full: bool) -> SpawnContext<'_> {
        SpawnContext {
            config,
            difficulty: Difficulty::for_level(level),
            health_full,
        }
    }

    fn run_columns(level: u32, health_full: bool, columns: usize, seed: u64) -> Populations {
        let config = GameConfig::default();
        let ctx = ctx(&config, level, health_full);
        let mut scheduler = SpawnScheduler::new();
        let mut pops = Populations::new();
        let mut rng = Pcg32::seed_from_u64(seed);
        for _ in 0..columns {
            scheduler.on_column(WIDE, &ctx, &mut pops, &mut rng);
        }
        pops
    }

    #[test]
    fn test_placement_window() {
        assert_eq!(placement_window(WIDE, 24.0, 40.0, 10.0), Some((202.0, 478.0)));
        // 12 rows * 24 = 288px, a 280px box with 10px margins can't fit
        let narrow = CorridorColumn { top: 0, bottom: 12 };
        assert_eq!(placement_window(narrow, 24.0, 280.0, 10.0), None);
    }

    #[test]
    fn test_level_one_spawns_only_planets() {
        let pops = run_columns(1, false, 500, 1);
        assert!(!pops.obstacles.is_empty());
        assert!(pops.hazards.is_empty());
        assert!(pops.enemies.is_empty());
        assert!(pops.pickups.is_empty());
    }

    #[test]
    fn test_level_two_adds_asteroids() {
        let pops = run_columns(2, false, 500, 2);
        assert!(!pops.hazards.is_empty());
        assert!(pops.enemies.is_empty());
        assert!(pops.pickups.is_empty());
    }

    #[test]
    fn test_level_three_adds_ufos_and_hearts() {
        let pops = run_columns(3, false, 1000, 3);
        assert!(!pops.enemies.is_empty());
        assert!(!pops.pickups.is_empty());
    }

    #[test]
    fn test_full_health_suppresses_hearts() {
        let pops = run_columns(5, true, 1000, 4);
        assert!(pops.pickups.is_empty());
        assert!(!pops.enemies.is_empty());
    }

    #[test]
    fn test_spawns_respect_gap_and_corridor() {
        let config = GameConfig::default();
        let ctx = ctx(&config, 5, false);
        let mut scheduler = SpawnScheduler::new();
        let mut pops = Populations::new();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut last_spawn: Option<usize> = None;

        for col in 0..2000 {
            let before = pops.obstacles.len();
            scheduler.on_column(WIDE, &ctx, &mut pops, &mut rng);
            if pops.obstacles.len() > before {
                if let Some(prev) = last_spawn {
                    assert!(col - prev >= PLANET_MIN_GAP_COLS as usize);
                }
                last_spawn = Some(col);
                assert_eq!(scheduler.columns_since(SpawnKind::Obstacle), 0);
            }
        }

        let (top, bottom) = (WIDE.top as f32 * 24.0, WIDE.bottom as f32 * 24.0);
        for o in &pops.obstacles {
            assert!(o.rect.top() >= top + PLANET_SAFE_MARGIN);
            assert!(o.rect.bottom() <= bottom - PLANET_SAFE_MARGIN);
            assert_eq!(o.rect.left(), config.screen_w + PLANET_SPAWN_OFFSET);
        }
        for h in &pops.hazards {
            assert!(h.rect.left() >= config.screen_w + 80.0);
            assert!(h.rect.left() <= config.screen_w + 260.0);
            assert!(h.vel.x >= ASTEROID_VX_MIN && h.vel.x <= ASTEROID_VX_MAX);
            assert!(h.vel.y.abs() <= ASTEROID_VY_MAX);
            assert!(h.is_active());
        }
    }

    #[test]
    fn test_narrow_corridor_keeps_counter() {
        // Sprites too tall for any window: every roll is skipped
        let mut config = GameConfig::default();
        config.sprites.planets = vec![Vec2::new(40.0, 400.0)];
        let ctx = ctx(&config, 1, true);
        let mut scheduler = SpawnScheduler::new();
        let mut pops = Populations::new();
        let mut rng = Pcg32::seed_from_u64(6);

        for _ in 0..200 {
            scheduler.on_column(WIDE, &ctx, &mut pops, &mut rng);
        }
        assert!(pops.obstacles.is_empty());
        assert_eq!(scheduler.columns_since(SpawnKind::Obstacle), SPAWN_COUNTER_START + 200);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let a = run_columns(4, false, 300, 77);
        let b = run_columns(4, false, 300, 77);
        assert_eq!(a.len(), b.len());
        let ya: Vec<f32> = a.obstacles.iter().map(|o| o.rect.top()).collect();
        let yb: Vec<f32> = b.obstacles.iter().map(|o| o.rect.top()).collect();
        assert_eq!(ya, yb);
    }
}
