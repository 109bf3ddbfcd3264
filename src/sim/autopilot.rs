//! Demo-mode pilot
//!
//! Produces the input a cautious player would give: hold the middle of the
//! corridor a little ahead of the ship, slide around whatever is coming
//! down the lane, keep firing, and restart once the run is over.

use super::geom::Rect;
use super::state::GameState;
use super::tick::TickInput;
use crate::consts::SHIP_X;

/// How far ahead of the ship the corridor is sampled
const LOOKAHEAD: f32 = 96.0;
/// How far ahead threats are considered
const THREAT_RANGE: f32 = 220.0;
/// Vertical error tolerated before steering
const DEAD_ZONE: f32 = 6.0;

/// Input for the next frame of a self-playing run
pub fn autopilot_input(state: &GameState) -> TickInput {
    if state.phase.is_terminal() {
        return TickInput {
            restart: true,
            ..Default::default()
        };
    }

    let (top, bottom) = state.corridor.bounds_at(SHIP_X + LOOKAHEAD);
    let ship = state.player.rect();

    let target = match nearest_threat(state, &ship) {
        Some(threat) => {
            let room_above = threat.top() - top;
            let room_below = bottom - threat.bottom();
            if room_above > room_below {
                (top + threat.top()) * 0.5
            } else {
                (threat.bottom() + bottom) * 0.5
            }
        }
        None => (top + bottom) * 0.5,
    };

    let dy = target - state.player.y;
    TickInput {
        up: dy < -DEAD_ZONE,
        down: dy > DEAD_ZONE,
        fire: true,
        restart: false,
    }
}

/// Closest dangerous box ahead that shares the ship's lane
fn nearest_threat(state: &GameState, ship: &Rect) -> Option<Rect> {
    let pops = &state.entities;
    let in_lane = |r: &Rect| {
        r.right() > ship.left()
            && r.left() < ship.right() + THREAT_RANGE
            && r.top() < ship.bottom() + ship.size.y
            && r.bottom() > ship.top() - ship.size.y
    };

    pops.hazards
        .iter()
        .filter(|h| h.is_active())
        .map(|h| h.rect)
        .chain(pops.enemies.iter().map(|e| e.rect))
        .chain(pops.obstacles.iter().map(|o| o.rect))
        .filter(in_lane)
        .min_by(|a, b| a.left().total_cmp(&b.left()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::corridor::Drift;
    use crate::sim::entities::Enemy;
    use crate::sim::state::RunPhase;
    use glam::Vec2;

    fn straight(seed: u64) -> GameState {
        let mut state = GameState::new(GameConfig::default(), seed);
        state.phase = RunPhase::Active;
        state
            .corridor
            .reset(Drift { center: 0, width: 0 }, &mut state.rng);
        state
    }

    #[test]
    fn test_restarts_finished_runs() {
        let mut state = straight(1);
        state.phase = RunPhase::GameOver;
        assert!(autopilot_input(&state).restart);
        state.phase = RunPhase::Won;
        assert!(autopilot_input(&state).restart);
    }

    #[test]
    fn test_steers_toward_corridor_middle() {
        let mut state = straight(2);
        state.player.y = 220.0;
        let input = autopilot_input(&state);
        assert!(input.down && !input.up);
        assert!(input.fire);

        state.player.y = 500.0;
        let input = autopilot_input(&state);
        assert!(input.up && !input.down);

        state.player.y = 360.0;
        let input = autopilot_input(&state);
        assert!(!input.up && !input.down);
    }

    #[test]
    fn test_dodges_ufo_in_lane() {
        let mut state = straight(3);
        let id = state.entities.next_entity_id();
        // UFO dead ahead, slightly above centre: more room below
        state.entities.enemies.push(Enemy {
            id,
            rect: Rect::new(Vec2::new(220.0, 320.0), Vec2::new(56.0, 34.0)),
            vel: Vec2::ZERO,
        });
        let input = autopilot_input(&state);
        assert!(input.down);
    }
}
