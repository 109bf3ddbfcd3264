//! Per-frame simulation step
//!
//! `tick` advances the whole game by one caller-supplied time delta. Order
//! within an active frame: timers, ship, firing, population motion, scroll,
//! column advance and spawning, shot hits, ship contacts, death check.

use serde::{Deserialize, Serialize};

use super::collision::{muzzle_position, resolve_player_shots, resolve_ship};
use super::entities::MotionParams;
use super::level::Difficulty;
use super::spawn::SpawnContext;
use super::state::{GameState, RunPhase};
use crate::consts::*;

/// Logical input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    /// Fire held
    pub fire: bool,
    /// Restart pressed this frame
    pub restart: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.restart {
        state.restart();
    }

    if !state.phase.is_terminal() && state.score >= WIN_SCORE {
        log::info!("won with score {}", state.score);
        state.phase = RunPhase::Won;
    }

    // Recomputed every frame; never cached across transitions
    let difficulty = state.difficulty();

    if !state.phase.is_terminal() && difficulty.level != state.level {
        log::info!("level {} -> {}", state.level, difficulty.level);
        state.level = difficulty.level;
        state.phase = RunPhase::entering(difficulty.level);
    }

    if state.phase == RunPhase::Active {
        simulate(state, input, &difficulty, dt);
    }

    // Banner countdown runs while the simulation is paused
    if let RunPhase::Transition { remaining, .. } = &mut state.phase {
        *remaining -= dt;
        if *remaining <= 0.0 {
            state.phase = RunPhase::Active;
        }
    }
}

/// One active frame. A non-positive `dt` changes nothing.
fn simulate(state: &mut GameState, input: &TickInput, difficulty: &Difficulty, dt: f32) {
    if dt <= 0.0 {
        return;
    }

    let GameState {
        config,
        rng,
        score,
        phase,
        frame,
        player,
        corridor,
        spawner,
        entities,
        ..
    } = state;
    let config = &*config;

    *frame += 1;

    player.cool_down(dt);
    player.steer(input.up, input.down, difficulty.ship_speed(), dt, config.screen_h);

    if input.fire && player.fire_cooldown <= 0.0 {
        player.fire_cooldown = SHOT_COOLDOWN;
        let shot = config.sprites.shot;
        entities.fire_player_shot(muzzle_position(&player.rect(), shot), shot);
    }

    let motion = MotionParams {
        dt,
        scroll_speed: difficulty.scroll_speed(),
        screen_w: config.screen_w,
        hazards_enabled: difficulty.hazards_enabled(),
        enemies_enabled: difficulty.enemies_enabled(),
    };
    entities.update(&motion, corridor, rng);

    corridor.scroll_by(difficulty.scroll_speed() * dt);
    while let Some(column) = corridor.try_advance(difficulty.drift, rng) {
        // Distance score: one point per column flown
        *score += 1;
        let ctx = SpawnContext {
            config,
            difficulty: *difficulty,
            health_full: player.health_full(),
        };
        spawner.on_column(column, &ctx, entities, rng);
    }

    *score += resolve_player_shots(entities);

    if player.in_grace() {
        return;
    }

    resolve_ship(player, corridor, entities);
    if player.is_dead() {
        log::info!("game over at score {}", score);
        *phase = RunPhase::GameOver;
    }
}
