//! Player fire control
//!
//! Shots leave the player's centre along the held movement direction, or along
//! the facing when no usable direction is held, so a shot always moves.

use glam::Vec2;

use super::state::{Facing, GameState, MoveIntent, Projectile};

/// Unit direction for a shot
pub fn fire_direction(intent: &MoveIntent, facing: Facing) -> Vec2 {
    intent
        .vector()
        .try_normalize()
        .unwrap_or_else(|| facing.vector())
}

/// Whether the cooldown since the last shot has passed
pub fn can_fire(last_shot_ms: Option<f64>, cooldown_ms: f64, now_ms: f64) -> bool {
    match last_shot_ms {
        Some(last) => now_ms - last >= cooldown_ms,
        None => true,
    }
}

/// Fire if the cooldown allows; returns the new projectile's ID
pub fn try_fire(state: &mut GameState, intent: &MoveIntent, now_ms: f64) -> Option<u32> {
    let player = &state.player;
    if !can_fire(player.last_shot_ms, player.fire_cooldown_ms, now_ms) {
        return None;
    }

    let dir = fire_direction(intent, player.facing);
    let pos = player.center();
    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos,
        vel: dir * state.tuning.projectile_speed,
        size: state.tuning.projectile_size,
    });
    state.player.last_shot_ms = Some(now_ms);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::test_support::quiet_state;

    #[test]
    fn test_idle_shot_uses_default_facing() {
        let mut state = quiet_state(1);
        let id = try_fire(&mut state, &MoveIntent::default(), 0.0).expect("first shot fires");

        let shot = state.projectiles.iter().find(|p| p.id == id).expect("projectile");
        assert!((shot.vel.length() - state.tuning.projectile_speed).abs() < 1e-5);
        assert_eq!(shot.vel.normalize(), Facing::Down.vector());
        assert_eq!(shot.pos, state.player.center());
    }

    #[test]
    fn test_cancelled_keys_fall_back_to_facing() {
        let intent = MoveIntent {
            up: true,
            down: true,
            ..Default::default()
        };
        assert_eq!(fire_direction(&intent, Facing::Left), Vec2::NEG_X);
    }

    #[test]
    fn test_diagonal_shot_has_projectile_speed() {
        let mut state = quiet_state(1);
        let intent = MoveIntent {
            down: true,
            left: true,
            ..Default::default()
        };
        try_fire(&mut state, &intent, 0.0);
        let vel = state.projectiles[0].vel;
        assert!((vel.length() - state.tuning.projectile_speed).abs() < 1e-5);
        assert!(vel.x < 0.0 && vel.y > 0.0);
    }

    #[test]
    fn test_cooldown_gates_shots() {
        let mut state = quiet_state(1);
        let intent = MoveIntent::default();
        assert!(try_fire(&mut state, &intent, 1_000.0).is_some());
        assert!(try_fire(&mut state, &intent, 1_100.0).is_none());
        assert!(try_fire(&mut state, &intent, 1_249.0).is_none());
        assert!(try_fire(&mut state, &intent, 1_250.0).is_some());
        assert_eq!(state.projectiles.len(), 2);
    }
}
