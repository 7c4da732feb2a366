//! Enemy pursuit
//!
//! Each tick an enemy keeps most of its velocity and blends in a little of the
//! direct heading toward the player, which gives smooth curving pursuit
//! instead of instant direction snaps.

use glam::Vec2;

use super::geometry::Arena;
use super::state::{Enemy, GameState};

/// Blend the enemy's velocity toward `target`
///
/// `retain` is the fraction of the old velocity kept.
pub fn steer(enemy: &mut Enemy, target: Vec2, retain: f32) {
    let heading = (target - enemy.center()).try_normalize().unwrap_or(Vec2::X);
    let seek = heading * enemy.speed;
    enemy.vel = enemy.vel * retain + seek * (1.0 - retain);
}

/// Apply velocity, then clamp into the arena
///
/// An axis that had to be clamped reverses and loses speed.
pub fn advance(enemy: &mut Enemy, arena: &Arena, damping: f32) {
    let (pos, hit) = arena.clamp_square_flagged(enemy.pos + enemy.vel, enemy.size);
    enemy.pos = pos;
    if hit.x {
        enemy.vel.x *= -damping;
    }
    if hit.y {
        enemy.vel.y *= -damping;
    }
}

/// Steer and move every live enemy toward the player
pub fn update(state: &mut GameState) {
    let target = state.player.center();
    let retain = state.tuning.steering_retain;
    let damping = state.tuning.bounce_damping;
    for enemy in &mut state.enemies {
        steer(enemy, target, retain);
        advance(enemy, &state.arena, damping);
    }
}
