//! Read-only frame snapshots
//!
//! A `FrameView` is everything a renderer or a debugging tool needs to draw
//! one frame. It is built from the state after a tick and never fed back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::corridor::CorridorColumn;
use super::entities::{EntityId, EntityKind};
use super::geom::Rect;
use super::level::level_text;
use super::state::{GameState, RunPhase};
use crate::consts::ENEMY_SHOT_RADIUS;

/// One drawable entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub rect: Rect,
    /// Sprite frame: planet variant, crash animation frame, otherwise 0
    pub frame: u32,
}

/// Centre-screen message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub title: String,
    pub line1: String,
    pub line2: String,
}

impl Banner {
    /// Banner for the current phase, if one is showing
    pub fn for_phase(phase: RunPhase, score: u64) -> Option<Self> {
        match phase {
            RunPhase::Active => None,
            RunPhase::Transition { level, .. } => {
                let (now, next) = level_text(level);
                Some(Self {
                    title: format!("LEVEL {level}"),
                    line1: now,
                    line2: next,
                })
            }
            RunPhase::GameOver => Some(Self {
                title: "GAME OVER".to_string(),
                line1: "Press R to restart".to_string(),
                line2: String::new(),
            }),
            RunPhase::Won => Some(Self {
                title: "YOU WIN!".to_string(),
                line1: format!("Final score: {score}"),
                line2: "Press R to play again".to_string(),
            }),
        }
    }
}

/// The player's ship as drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub rect: Rect,
    /// Health in half-heart units
    pub hp: u8,
    pub invulnerable: bool,
    /// False on the "off" half of an invulnerability blink
    pub visible: bool,
}

/// Snapshot of one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub frame: u64,
    pub score: u64,
    pub level: u32,
    pub phase: RunPhase,
    /// Visible columns, oldest (leftmost) first
    pub columns: Vec<CorridorColumn>,
    /// Horizontal offset of the first column in pixels
    pub scroll: f32,
    pub block: f32,
    pub player: PlayerView,
    /// Sorted by id
    pub entities: Vec<EntityView>,
    pub banner: Option<Banner>,
    /// Show the "no collision yet" hint
    pub grace: bool,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        let pops = &state.entities;
        let mut entities = Vec::with_capacity(pops.len());

        entities.extend(pops.obstacles.iter().map(|o| EntityView {
            id: o.id,
            kind: EntityKind::Obstacle,
            rect: o.rect,
            frame: o.variant as u32,
        }));
        entities.extend(pops.hazards.iter().map(|h| EntityView {
            id: h.id,
            kind: EntityKind::Hazard,
            rect: h.rect,
            frame: h.frame(),
        }));
        entities.extend(pops.enemies.iter().map(|e| EntityView {
            id: e.id,
            kind: EntityKind::Enemy,
            rect: e.rect,
            frame: 0,
        }));
        entities.extend(pops.enemy_shots.iter().map(|s| EntityView {
            id: s.id,
            kind: EntityKind::EnemyShot,
            rect: Rect::from_center(s.pos, Vec2::splat(ENEMY_SHOT_RADIUS * 2.0)),
            frame: 0,
        }));
        entities.extend(pops.pickups.iter().map(|p| EntityView {
            id: p.id,
            kind: EntityKind::Pickup,
            rect: p.rect,
            frame: 0,
        }));
        entities.extend(pops.player_shots.iter().map(|s| EntityView {
            id: s.id,
            kind: EntityKind::PlayerShot,
            rect: s.rect,
            frame: 0,
        }));
        entities.sort_by_key(|e| e.id);

        let player = &state.player;
        Self {
            frame: state.frame,
            score: state.score,
            level: state.level,
            phase: state.phase,
            columns: state.corridor.columns().copied().collect(),
            scroll: state.corridor.scroll(),
            block: state.corridor.block(),
            player: PlayerView {
                rect: player.rect(),
                hp: player.hp,
                invulnerable: !player.can_be_hurt(),
                visible: player.visible(),
            },
            entities,
            banner: Banner::for_phase(state.phase, state.score),
            grace: state.phase == RunPhase::Active && player.in_grace(),
        }
    }

    /// Pretty JSON for debugging dumps
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::entities::{Hazard, HazardState};

    #[test]
    fn test_level_banner_on_new_run() {
        let state = GameState::new(GameConfig::default(), 5);
        let view = FrameView::capture(&state);
        let banner = view.banner.expect("banner");
        assert_eq!(banner.title, "LEVEL 1");
        assert_eq!(banner.line1, "Now: Planets only");
        assert!(banner.line2.starts_with("Next (300)"));
        assert!(!view.grace);
        assert_eq!(view.columns.len(), 53);
    }

    #[test]
    fn test_end_banners() {
        let over = Banner::for_phase(RunPhase::GameOver, 80).expect("banner");
        assert_eq!(over.title, "GAME OVER");
        assert_eq!(over.line1, "Press R to restart");
        assert!(over.line2.is_empty());

        let won = Banner::for_phase(RunPhase::Won, 1203).expect("banner");
        assert_eq!(won.title, "YOU WIN!");
        assert_eq!(won.line1, "Final score: 1203");
        assert_eq!(won.line2, "Press R to play again");

        assert!(Banner::for_phase(RunPhase::Active, 0).is_none());
    }

    #[test]
    fn test_entities_sorted_with_frames() {
        let mut state = GameState::new(GameConfig::default(), 9);
        state.phase = RunPhase::Active;
        state.entities.fire_player_shot(Vec2::new(150.0, 300.0), Vec2::new(28.0, 18.0));
        let id = state.entities.next_entity_id();
        state.entities.hazards.push(Hazard {
            id,
            rect: Rect::new(Vec2::new(600.0, 300.0), Vec2::splat(40.0)),
            vel: Vec2::ZERO,
            state: HazardState::Exploding {
                frame: 3,
                frame_time: 0.0,
            },
            frames: 6,
        });

        let view = FrameView::capture(&state);
        assert_eq!(view.entities.len(), 2);
        assert!(view.entities[0].id < view.entities[1].id);
        assert_eq!(view.entities[0].kind, EntityKind::PlayerShot);
        assert_eq!(view.entities[1].kind, EntityKind::Hazard);
        assert_eq!(view.entities[1].frame, 3);
        assert!(view.grace);
        assert!(view.banner.is_none());
    }

    #[test]
    fn test_blinking_player() {
        let mut state = GameState::new(GameConfig::default(), 9);
        state.player.invuln = 0.47;
        let view = FrameView::capture(&state);
        assert!(view.player.invulnerable);
        assert!(!view.player.visible);
    }

    #[test]
    fn test_serializes_to_json() {
        let state = GameState::new(GameConfig::default(), 1);
        let json = FrameView::capture(&state).to_json().expect("json");
        let back: FrameView = serde_json::from_str(&json).expect("parse");
        assert_eq!(back.score, 0);
        assert_eq!(back.banner.map(|b| b.title).as_deref(), Some("LEVEL 1"));
    }
}
