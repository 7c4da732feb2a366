//! Read-only view of the session for renderers and HUDs

use glam::Vec2;
use serde::Serialize;

use super::geometry::Arena;
use super::state::{EnemyKind, Facing, GameState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub health: u32,
    pub max_health: u32,
    pub invincible: bool,
    pub facing: Facing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub health: u32,
    pub max_health: u32,
    pub kind: EnemyKind,
    pub anim_phase: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    /// Centre point
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub arena: Arena,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub score: u64,
    pub game_over: bool,
    pub started_at_ms: f64,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let p = &state.player;
        Self {
            arena: state.arena,
            player: PlayerView {
                pos: p.pos,
                size: p.size,
                health: p.health,
                max_health: p.max_health,
                invincible: p.is_invincible(),
                facing: p.facing,
            },
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.pos,
                    size: e.size,
                    health: e.health,
                    max_health: e.max_health,
                    kind: e.kind,
                    anim_phase: e.anim_phase,
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|s| ProjectileView {
                    pos: s.pos,
                    vel: s.vel,
                    size: s.size,
                })
                .collect(),
            score: state.score,
            game_over: state.is_terminal(),
            started_at_ms: state.started_at_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyKind;
    use crate::sim::test_support::{enemy_at, quiet_state};

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = quiet_state(1);
        let enemy = enemy_at(state.next_entity_id(), EnemyKind::Tank, Vec2::new(10.0, 450.0));
        state.enemies.push(enemy);
        state.score = 3;

        let snap = Snapshot::capture(&state);
        assert_eq!(snap.score, 3);
        assert!(!snap.game_over);
        assert_eq!(snap.player.health, state.player.max_health);
        assert_eq!(snap.enemies.len(), 1);
        assert_eq!(snap.enemies[0].kind, EnemyKind::Tank);
        assert_eq!(snap.enemies[0].pos, Vec2::new(10.0, 450.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = quiet_state(2);
        let json = serde_json::to_value(Snapshot::capture(&state)).expect("serializable");
        assert_eq!(json["player"]["facing"], "Down");
        assert_eq!(json["game_over"], false);
        let pos = state.player.pos;
        assert_eq!(json["player"]["pos"], serde_json::json!([pos.x, pos.y]));
    }
}
