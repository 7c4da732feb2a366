//! Shared fixtures for simulation tests

use glam::Vec2;

use super::geometry::Arena;
use super::spawner;
use super::state::{Enemy, EnemyKind, GameState};
use crate::tuning::Tuning;

/// Session on the default arena whose spawner never fires
pub fn quiet_state(seed: u64) -> GameState {
    let tuning = Tuning {
        base_population: 0,
        max_population: 0,
        ..Default::default()
    };
    GameState::new(seed, tuning, Arena::default(), 0.0)
}

/// Motionless enemy of `kind` at score zero
pub fn enemy_at(id: u32, kind: EnemyKind, pos: Vec2) -> Enemy {
    let tuning = Tuning::default();
    let archetype = kind.archetype();
    let health = (spawner::base_health(0, &tuning) + i64::from(archetype.health_bonus)).max(1) as u32;
    Enemy {
        id,
        pos,
        vel: Vec2::ZERO,
        size: tuning.enemy_size,
        speed: spawner::base_speed(0, &tuning) * archetype.speed_multiplier,
        health,
        max_health: health,
        kind,
        damage: archetype.damage,
        anim_phase: 0,
    }
}
