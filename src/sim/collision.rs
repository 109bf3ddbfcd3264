//! Collision resolution
//!
//! Two passes per active frame, after motion:
//! 1. player shots against targets (score)
//! 2. the ship against walls, entities and pickups (health)
//!
//! Damage goes through `Player::damage`, which refuses while the
//! invulnerability window is open, so overlaps never stack.

use glam::Vec2;

use super::corridor::Corridor;
use super::entities::{EntityKind, Populations};
use super::geom::Rect;
use super::state::Player;
use crate::consts::*;

/// Target a player shot connected with (index into its population)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotHit {
    Obstacle(usize),
    Hazard(usize),
    Enemy(usize),
}

impl ShotHit {
    pub fn kind(self) -> EntityKind {
        match self {
            ShotHit::Obstacle(_) => EntityKind::Obstacle,
            ShotHit::Hazard(_) => EntityKind::Hazard,
            ShotHit::Enemy(_) => EntityKind::Enemy,
        }
    }
}

/// First target a shot overlaps, in priority order planet → asteroid → UFO
fn find_shot_target(shot: &Rect, pops: &Populations) -> Option<ShotHit> {
    if let Some(i) = pops.obstacles.iter().position(|o| shot.overlaps(&o.rect)) {
        return Some(ShotHit::Obstacle(i));
    }
    if let Some(i) = pops
        .hazards
        .iter()
        .position(|h| h.is_active() && shot.overlaps(&h.rect))
    {
        return Some(ShotHit::Hazard(i));
    }
    pops.enemies
        .iter()
        .position(|e| shot.overlaps(&e.rect))
        .map(ShotHit::Enemy)
}

/// Apply a hit to its target and return the points it is worth
fn apply_shot_hit(hit: ShotHit, pops: &mut Populations) -> u64 {
    match hit {
        ShotHit::Obstacle(i) => {
            let planet = pops.obstacles.remove(i);
            log::debug!("shot planet #{}", planet.id);
            PLANET_SCORE
        }
        ShotHit::Hazard(i) => {
            let asteroid = &mut pops.hazards[i];
            asteroid.explode();
            log::debug!("shot asteroid #{}", asteroid.id);
            ASTEROID_SCORE
        }
        ShotHit::Enemy(i) => {
            let ufo = pops.enemies.remove(i);
            log::debug!("shot ufo #{}", ufo.id);
            UFO_SCORE
        }
    }
}

/// Resolve every player shot; each shot scores at most one hit and is
/// consumed by it. Returns the points earned this frame.
pub fn resolve_player_shots(pops: &mut Populations) -> u64 {
    let mut points = 0;
    let mut i = 0;
    while i < pops.player_shots.len() {
        let shot = pops.player_shots[i].rect;
        match find_shot_target(&shot, pops) {
            Some(hit) => {
                points += apply_shot_hit(hit, pops);
                pops.player_shots.remove(i);
            }
            None => i += 1,
        }
    }
    points
}

/// Which corridor wall the ship scraped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Top,
    Bottom,
}

/// What happened to the ship this frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipContacts {
    /// Health units lost
    pub damage: u8,
    /// Health units restored
    pub healed: u8,
    pub wall: Option<Wall>,
    /// Kind of the entity whose contact did the damage, if not the wall
    pub hurt_by: Option<EntityKind>,
}

/// Push the ship back inside the corridor, damaging it if it was outside
fn resolve_wall(player: &mut Player, corridor: &Corridor, contacts: &mut ShipContacts) {
    let rect = player.rect();
    let half_h = rect.size.y * 0.5;
    let (top, bottom) = corridor.bounds_at(SHIP_X);

    let wall = if rect.top() < top {
        player.y = top + half_h + 1.0;
        Wall::Top
    } else if rect.bottom() > bottom {
        player.y = bottom - half_h - 1.0;
        Wall::Bottom
    } else {
        return;
    };

    contacts.wall = Some(wall);
    if player.damage(DMG_HALF) {
        contacts.damage += DMG_HALF;
        log::debug!("ship scraped {:?} wall, hp={}", wall, player.hp);
    }
}

fn hurt(player: &mut Player, units: u8, kind: EntityKind, contacts: &mut ShipContacts) {
    if player.damage(units) {
        contacts.damage += units;
        contacts.hurt_by = Some(kind);
        log::debug!("ship hit by {:?}, hp={}", kind, player.hp);
    }
}

/// Ship against every population; at most one damage event gets through
/// per invulnerability window, hearts are always collected
pub fn resolve_ship(player: &mut Player, corridor: &Corridor, pops: &mut Populations) -> ShipContacts {
    let mut contacts = ShipContacts::default();
    resolve_wall(player, corridor, &mut contacts);

    let ship = player.rect();

    if player.can_be_hurt() && pops.obstacles.iter().any(|o| ship.overlaps(&o.rect)) {
        hurt(player, DMG_HALF, EntityKind::Obstacle, &mut contacts);
    }

    if player.can_be_hurt()
        && pops
            .hazards
            .iter()
            .any(|h| h.is_active() && ship.overlaps(&h.rect))
    {
        hurt(player, DMG_HALF, EntityKind::Hazard, &mut contacts);
    }

    if player.can_be_hurt() && pops.enemy_shots.iter().any(|s| ship.contains_point(s.pos)) {
        hurt(player, DMG_HALF, EntityKind::EnemyShot, &mut contacts);
    }

    if player.can_be_hurt() {
        if let Some(i) = pops.enemies.iter().position(|e| ship.overlaps(&e.rect)) {
            hurt(player, DMG_FULL, EntityKind::Enemy, &mut contacts);
            pops.enemies.remove(i);
        }
    }

    if let Some(i) = pops.pickups.iter().position(|p| ship.overlaps(&p.rect)) {
        pops.pickups.remove(i);
        contacts.healed = player.heal(HEAL_UNITS);
        log::debug!("picked up heart, hp={}", player.hp);
    }

    contacts
}

/// Where a fresh player shot appears for a ship box
pub fn muzzle_position(ship: &Rect, shot_size: Vec2) -> Vec2 {
    Vec2::new(
        ship.right() + SHOT_MUZZLE_GAP,
        ship.center().y - shot_size.y * 0.5,
    )
}
