//! Collision detection and response
//!
//! Two passes per tick. Projectiles are tested against enemies through a
//! freshly built spatial grid; dead enemies and spent projectiles are only
//! removed once that pass is over, so grid indices stay valid throughout.
//! Enemies are then tested directly against the player.

use super::damage::{HitOutcome, apply_hit};
use super::geometry::circles_overlap;
use super::grid::SpatialGrid;
use super::state::{GamePhase, GameState};

/// What happened during one resolution step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Projectiles that struck an enemy
    pub projectile_hits: u32,
    pub kills: u32,
    /// Enemies overlapping the player, immune or not
    pub contacts: u32,
    /// Health the player actually lost
    pub player_damage: u32,
    pub player_killed: bool,
}

/// Run both collision passes
pub fn resolve(state: &mut GameState, now_ms: f64) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut grid = SpatialGrid::new(state.tuning.grid_cell_size);
    resolve_projectiles(state, &mut grid, &mut report);
    resolve_contacts(state, now_ms, &mut report);
    report
}

/// Projectiles vs enemies
///
/// A projectile is spent on the first enemy it overlaps (lowest index among
/// the grid candidates). Each kill scores one point.
pub fn resolve_projectiles(
    state: &mut GameState,
    grid: &mut SpatialGrid,
    report: &mut CollisionReport,
) {
    if state.enemies.is_empty() || state.projectiles.is_empty() {
        return;
    }

    grid.rebuild(&state.enemies);
    let mut spent = vec![false; state.projectiles.len()];

    for (pi, shot) in state.projectiles.iter().enumerate() {
        let radius = shot.radius();
        for index in grid.query_near(shot.pos.x, shot.pos.y, radius) {
            let enemy = &mut state.enemies[index];
            if enemy.is_dead() {
                continue;
            }
            if !circles_overlap(shot.pos, radius, enemy.center(), enemy.radius()) {
                continue;
            }

            enemy.health -= 1;
            spent[pi] = true;
            report.projectile_hits += 1;
            if enemy.is_dead() {
                state.score += 1;
                report.kills += 1;
                log::debug!("Enemy #{} ({:?}) destroyed, score {}", enemy.id, enemy.kind, state.score);
            }
            break;
        }
    }

    let mut spent = spent.into_iter();
    state
        .projectiles
        .retain(|_| !spent.next().unwrap_or(false));
    state.enemies.retain(|e| !e.is_dead());
}

/// Enemies vs player
///
/// A touching enemy deals its rolled damage every tick it overlaps, unless
/// the player is immune, and shoves the player away from its centre. While
/// immune nothing happens at all.
pub fn resolve_contacts(state: &mut GameState, now_ms: f64, report: &mut CollisionReport) {
    let knockback = state.tuning.knockback;

    for enemy in &state.enemies {
        let player = &state.player;
        if !circles_overlap(enemy.center(), enemy.radius(), player.center(), player.radius()) {
            continue;
        }
        report.contacts += 1;
        if player.is_invincible() {
            continue;
        }

        let amount = enemy.damage.roll(&mut state.rng);
        let outcome = apply_hit(&mut state.player, amount, now_ms);

        let away = (state.player.center() - enemy.center())
            .try_normalize()
            .unwrap_or_else(|| -state.player.facing.vector());
        let shoved = state.player.pos + away * knockback;
        state.player.pos = state.arena.clamp_square(shoved, state.player.size);

        match outcome {
            HitOutcome::Wounded { dealt } => {
                report.player_damage += dealt;
                log::debug!(
                    "Player hit by {:?} enemy #{} for {} ({} left)",
                    enemy.kind,
                    enemy.id,
                    dealt,
                    state.player.health
                );
            }
            HitOutcome::Killed { dealt } => {
                report.player_damage += dealt;
                report.player_killed = true;
                state.phase = GamePhase::GameOver;
                log::info!("Game over - final score {}", state.score);
                break;
            }
            HitOutcome::Suppressed => {}
        }
    }
}
