//! Per-frame simulation tick
//!
//! Advances the session by one displayed frame. Order within a tick is fixed:
//! player, spawn, steer/move, projectile flight, collisions, projectile
//! culling, immunity timer.

use serde::{Deserialize, Serialize};

use super::collision;
use super::damage::expire_invincibility;
use super::fire::try_fire;
use super::geometry::Arena;
use super::spawner;
use super::state::{GameState, MoveIntent};
use super::steering;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Monotonic timestamp in milliseconds (any epoch, fixed per session)
    pub now_ms: f64,
    /// Directional keys currently held
    pub movement: MoveIntent,
    /// Fire held or pressed this frame
    pub fire: bool,
}

/// Advance the game state by one frame
///
/// Once the session is over this does nothing until [`restart`].
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.is_terminal() {
        return;
    }
    let now = input.now_ms;
    state.time_ticks += 1;

    update_player(state, input);
    spawner::update(state, now);
    steering::update(state);
    for shot in &mut state.projectiles {
        shot.pos += shot.vel;
    }

    let report = collision::resolve(state, now);
    if report != collision::CollisionReport::default() {
        log::trace!("tick {}: {:?}", state.time_ticks, report);
    }

    cull_projectiles(state);
    expire_invincibility(&mut state.player, now, state.tuning.invincibility_ms);
}

/// Facing, fire, then movement for the player
fn update_player(state: &mut GameState, input: &TickInput) {
    let intent = input.movement;
    state.player.facing = state.player.facing.update(state.last_intent, intent);
    state.last_intent = intent;

    if input.fire {
        try_fire(state, &intent, input.now_ms);
    }

    let player = &mut state.player;
    player.vel = intent.vector() * player.speed;
    player.pos = state.arena.clamp_square(player.pos + player.vel, player.size);
}

/// Drop projectiles that flew past the arena margin
fn cull_projectiles(state: &mut GameState) {
    let arena = state.arena;
    let margin = state.tuning.projectile_cull_margin;
    state
        .projectiles
        .retain(|p| arena.contains_with_margin(p.pos, margin));
}

/// Start a new run from scratch
pub fn restart(state: &mut GameState, now_ms: f64) {
    let final_score = state.score;
    state.reset(now_ms);
    log::info!("Session restarted (previous score {})", final_score);
}

/// Accept new arena bounds from the viewport
///
/// Player and enemies are pulled back inside; projectiles beyond the new
/// margin are dropped.
pub fn resize(state: &mut GameState, arena: Arena) {
    log::info!(
        "Arena resized to {}x{} at y={}",
        arena.width,
        arena.height,
        arena.top
    );
    state.arena = arena;

    let player = &mut state.player;
    player.pos = arena.clamp_square(player.pos, player.size);
    for enemy in &mut state.enemies {
        enemy.pos = arena.clamp_square(enemy.pos, enemy.size);
    }
    cull_projectiles(state);
}

/// Elapsed time of the current run
pub fn survival_ms(state: &GameState, now_ms: f64) -> f64 {
    (now_ms - state.started_at_ms).max(0.0)
}
