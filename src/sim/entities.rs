//! Entity kinds and their populations
//!
//! Every entity lives in exactly one population list. Kinds are separate
//! types with their own fields; `EntityKind` names them for dispatch and
//! for the renderer.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::corridor::Corridor;
use super::geom::Rect;
use crate::consts::*;

pub type EntityId = u32;

/// Closed set of entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Static planet, drifts with the corridor
    Obstacle,
    /// Asteroid, bounces inside the corridor, explodes when shot
    Hazard,
    /// UFO, bounces inside the corridor and fires at the player
    Enemy,
    /// UFO bullet, collides as a point
    EnemyShot,
    /// Heart, heals one heart
    Pickup,
    PlayerShot,
}

/// A shot fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerShot {
    pub id: EntityId,
    pub rect: Rect,
}

/// A planet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    pub rect: Rect,
    /// Which planet sprite to draw
    pub variant: usize,
}

/// Asteroid lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HazardState {
    /// Moving and dangerous
    Active,
    /// Playing the crash animation, harmless
    Exploding {
        /// Current animation frame
        frame: u32,
        /// Time accumulated towards the next frame
        frame_time: f32,
    },
}

/// An asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: EntityId,
    pub rect: Rect,
    /// Own velocity on top of the corridor scroll (x positive = leftward)
    pub vel: Vec2,
    pub state: HazardState,
    /// Frames in the crash animation
    pub frames: u32,
}

impl Hazard {
    pub fn is_active(&self) -> bool {
        matches!(self.state, HazardState::Active)
    }

    /// Animation frame for rendering (0 while active)
    pub fn frame(&self) -> u32 {
        match self.state {
            HazardState::Active => 0,
            HazardState::Exploding { frame, .. } => frame,
        }
    }

    /// Start the crash animation. Returns false if already exploding.
    pub fn explode(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.vel = Vec2::ZERO;
        self.state = HazardState::Exploding {
            frame: 0,
            frame_time: 0.0,
        };
        true
    }

    /// Crash animation has run past its last frame
    pub fn animation_done(&self) -> bool {
        match self.state {
            HazardState::Active => false,
            HazardState::Exploding { frame, .. } => frame >= self.frames,
        }
    }

    fn update(&mut self, scroll_speed: f32, dt: f32, corridor: &Corridor) {
        match &mut self.state {
            HazardState::Active => {
                self.rect.pos.x -= (scroll_speed + self.vel.x) * dt;
                self.rect.pos.y += self.vel.y * dt;
                bounce_in_corridor(&mut self.rect, &mut self.vel, corridor, ASTEROID_SAFE_MARGIN);
            }
            HazardState::Exploding { frame, frame_time } => {
                // Debris keeps drifting with the corridor
                self.rect.pos.x -= scroll_speed * dt;
                *frame_time += dt;
                let step = 1.0 / ASTEROID_EXPLODE_FPS;
                while *frame_time >= step {
                    *frame_time -= step;
                    *frame += 1;
                }
            }
        }
    }
}

/// A UFO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub rect: Rect,
    /// Own velocity on top of the corridor scroll (x positive = leftward)
    pub vel: Vec2,
}

impl Enemy {
    fn update(&mut self, scroll_speed: f32, dt: f32, corridor: &Corridor) {
        self.rect.pos.x -= (scroll_speed + self.vel.x) * dt;
        self.rect.pos.y += self.vel.y * dt;
        bounce_in_corridor(&mut self.rect, &mut self.vel, corridor, UFO_BOUNCE_MARGIN);
    }

    /// Where a fresh UFO bullet appears
    fn muzzle(&self) -> Vec2 {
        Vec2::new(self.rect.left() - 2.0, self.rect.center().y)
    }
}

/// A UFO bullet (point projectile)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyShot {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// A heart pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: EntityId,
    pub rect: Rect,
}

/// Keep a mover inside the corridor, reflecting its vertical velocity
///
/// The corridor is sampled at the mover's horizontal centre. When the
/// corridor there is too narrow for the box plus margins, nothing is clamped.
pub fn bounce_in_corridor(rect: &mut Rect, vel: &mut Vec2, corridor: &Corridor, margin: f32) {
    let (top, bottom) = corridor.bounds_at(rect.center().x);
    let y_min = top + margin;
    let y_max = bottom - rect.size.y - margin;
    if y_max <= y_min {
        return;
    }
    if rect.pos.y < y_min {
        rect.pos.y = y_min;
        vel.y = -vel.y;
    } else if rect.pos.y > y_max {
        rect.pos.y = y_max;
        vel.y = -vel.y;
    }
}

/// Box has scrolled far enough past the left edge to forget
#[inline]
fn gone_left(rect: &Rect, margin: f32) -> bool {
    rect.right() <= -margin
}

/// Per-frame motion inputs shared by every population
#[derive(Debug, Clone, Copy)]
pub struct MotionParams {
    pub dt: f32,
    pub scroll_speed: f32,
    pub screen_w: f32,
    /// Asteroids are flying at this level
    pub hazards_enabled: bool,
    /// UFOs are flying at this level
    pub enemies_enabled: bool,
}

/// All non-player entity lists plus the id allocator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Populations {
    pub player_shots: Vec<PlayerShot>,
    pub obstacles: Vec<Obstacle>,
    pub hazards: Vec<Hazard>,
    pub enemies: Vec<Enemy>,
    pub enemy_shots: Vec<EnemyShot>,
    pub pickups: Vec<Pickup>,
    next_id: EntityId,
}

impl Default for Populations {
    fn default() -> Self {
        Self::new()
    }
}

impl Populations {
    pub fn new() -> Self {
        Self {
            player_shots: Vec::new(),
            obstacles: Vec::new(),
            hazards: Vec::new(),
            enemies: Vec::new(),
            enemy_shots: Vec::new(),
            pickups: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Total live entities across every list
    pub fn len(&self) -> usize {
        self.player_shots.len()
            + self.obstacles.len()
            + self.hazards.len()
            + self.enemies.len()
            + self.enemy_shots.len()
            + self.pickups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fire_player_shot(&mut self, pos: Vec2, size: Vec2) {
        let id = self.next_entity_id();
        self.player_shots.push(PlayerShot {
            id,
            rect: Rect::new(pos, size),
        });
    }

    /// Move every population one frame and cull what has left the screen
    pub fn update<R: Rng + ?Sized>(&mut self, params: &MotionParams, corridor: &Corridor, rng: &mut R) {
        let MotionParams {
            dt,
            scroll_speed,
            screen_w,
            ..
        } = *params;

        for shot in &mut self.player_shots {
            shot.rect.pos.x += SHOT_SPEED * dt;
        }
        self.player_shots
            .retain(|s| s.rect.left() < screen_w + SHOT_CULL_MARGIN);

        for obstacle in &mut self.obstacles {
            obstacle.rect.pos.x -= scroll_speed * dt;
        }
        self.obstacles
            .retain(|o| !gone_left(&o.rect, DRIFTER_CULL_MARGIN));

        for pickup in &mut self.pickups {
            pickup.rect.pos.x -= scroll_speed * dt;
        }
        self.pickups
            .retain(|p| !gone_left(&p.rect, DRIFTER_CULL_MARGIN));

        if params.hazards_enabled {
            for hazard in &mut self.hazards {
                hazard.update(scroll_speed, dt, corridor);
            }
            self.hazards
                .retain(|h| !gone_left(&h.rect, MOVER_CULL_MARGIN) && !h.animation_done());
        } else {
            self.hazards.clear();
        }

        if params.enemies_enabled {
            let mut muzzles = Vec::new();
            for enemy in &mut self.enemies {
                enemy.update(scroll_speed, dt, corridor);
                if rng.random::<f32>() < UFO_FIRE_CHANCE_PER_SEC * dt {
                    muzzles.push(enemy.muzzle());
                }
            }
            for pos in muzzles {
                let id = self.next_entity_id();
                self.enemy_shots.push(EnemyShot {
                    id,
                    pos,
                    vel: Vec2::new(-UFO_SHOT_SPEED, 0.0),
                });
            }
            self.enemies
                .retain(|e| !gone_left(&e.rect, MOVER_CULL_MARGIN));
        } else {
            self.enemies.clear();
            self.enemy_shots.clear();
        }

        for shot in &mut self.enemy_shots {
            shot.pos += shot.vel * dt;
        }
        self.enemy_shots.retain(|s| {
            s.pos.x > -ENEMY_SHOT_CULL_MARGIN && s.pos.x < screen_w + ENEMY_SHOT_CULL_MARGIN
        });
    }
}
