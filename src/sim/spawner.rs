//! Enemy spawning
//!
//! Keeps the live population topped up to a score-scaled target, at most one
//! enemy per spawn interval. New enemies appear just inside a random arena
//! edge, away from the player.

use glam::Vec2;
use rand::Rng;

use super::geometry::{Arena, distance};
use super::state::{Enemy, EnemyKind, GameState};
use crate::tuning::Tuning;

/// Arena edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    pub fn opposite(self) -> Edge {
        match self {
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
        }
    }

    /// Edges to try when `self` lands too close to the player: the opposite
    /// edge first, then the two perpendicular ones
    pub fn fallbacks(self) -> [Edge; 3] {
        match self {
            Edge::Top | Edge::Bottom => [self.opposite(), Edge::Left, Edge::Right],
            Edge::Left | Edge::Right => [self.opposite(), Edge::Top, Edge::Bottom],
        }
    }
}

/// Live enemy count the spawner aims for at `score`
pub fn desired_population(score: u64, tuning: &Tuning) -> usize {
    let extra = score / u64::from(tuning.score_per_extra_enemy.max(1));
    let extra = usize::try_from(extra).unwrap_or(usize::MAX);
    tuning
        .base_population
        .saturating_add(extra)
        .min(tuning.max_population)
}

/// Score-scaled speed before the archetype multiplier
pub fn base_speed(score: u64, tuning: &Tuning) -> f32 {
    let bonus = (score as f32 * tuning.enemy_speed_per_point).min(tuning.enemy_max_speed_bonus);
    tuning.enemy_base_speed + bonus
}

/// Score-scaled health before the archetype bonus
pub fn base_health(score: u64, tuning: &Tuning) -> i64 {
    let steps = score / u64::from(tuning.score_per_health_step.max(1));
    i64::from(tuning.enemy_base_health).saturating_add(i64::try_from(steps).unwrap_or(i64::MAX))
}

/// Whether the spawner may add an enemy at `now_ms`
pub fn should_spawn(state: &GameState, now_ms: f64) -> bool {
    if state.enemies.len() >= desired_population(state.score, &state.tuning) {
        return false;
    }
    match state.last_spawn_ms {
        Some(last) => now_ms - last > state.tuning.spawn_interval_ms,
        None => true,
    }
}

/// Spawn at most one enemy; returns its ID
pub fn update(state: &mut GameState, now_ms: f64) -> Option<u32> {
    if !should_spawn(state, now_ms) {
        return None;
    }
    let id = spawn_enemy(state);
    state.last_spawn_ms = Some(now_ms);
    Some(id)
}

/// Unconditionally add one random enemy on an arena edge
pub fn spawn_enemy(state: &mut GameState) -> u32 {
    let kind = EnemyKind::ALL[state.rng.random_range(0..EnemyKind::ALL.len())];
    let edge = Edge::ALL[state.rng.random_range(0..Edge::ALL.len())];
    let size = state.tuning.enemy_size;
    let margin = state.tuning.spawn_margin;

    let player_center = state.player.center();
    let half = Vec2::splat(size / 2.0);
    let clearance = state.tuning.spawn_clearance;
    let is_clear = |pos: Vec2| distance(pos + half, player_center) >= clearance;

    let mut pos = edge_position(&mut state.rng, &state.arena, edge, size, margin);
    if !is_clear(pos) {
        pos = edge
            .fallbacks()
            .into_iter()
            .map(|fallback| edge_position(&mut state.rng, &state.arena, fallback, size, margin))
            .find(|&candidate| is_clear(candidate))
            .unwrap_or_else(|| farthest_corner(&state.arena, player_center, size, margin));
    }

    let id = state.next_entity_id();
    let enemy = make_enemy(id, kind, pos, state.score, &state.tuning, &mut state.rng);
    log::debug!(
        "Spawned {:?} enemy #{} at ({:.0}, {:.0}) hp={} speed={:.2}",
        kind,
        id,
        enemy.pos.x,
        enemy.pos.y,
        enemy.health,
        enemy.speed
    );
    state.enemies.push(enemy);
    id
}

/// Build an enemy of `kind` scaled for `score`
pub fn make_enemy(
    id: u32,
    kind: EnemyKind,
    pos: Vec2,
    score: u64,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> Enemy {
    let archetype = kind.archetype();
    let speed = base_speed(score, tuning) * archetype.speed_multiplier;
    let health = (base_health(score, tuning) + i64::from(archetype.health_bonus)).max(1);
    let health = u32::try_from(health).unwrap_or(u32::MAX);

    let heading = Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));

    Enemy {
        id,
        pos,
        vel: heading.normalize_or_zero() * speed,
        size: tuning.enemy_size,
        speed,
        health,
        max_health: health,
        kind,
        damage: archetype.damage,
        anim_phase: rng.random_range(0..12),
    }
}

/// Top-left corner just inside `edge`, randomized along it
fn edge_position(rng: &mut impl Rng, arena: &Arena, edge: Edge, size: f32, margin: f32) -> Vec2 {
    let near_top = arena.top + margin;
    let far_bottom = arena.bottom() - margin - size;
    let pos = match edge {
        Edge::Top => Vec2::new(span(rng, 0.0, arena.width - size), near_top),
        Edge::Bottom => Vec2::new(span(rng, 0.0, arena.width - size), far_bottom),
        Edge::Left => Vec2::new(margin, span(rng, near_top, far_bottom)),
        Edge::Right => Vec2::new(arena.width - margin - size, span(rng, near_top, far_bottom)),
    };
    arena.clamp_square(pos, size)
}

/// Corner of the spawn band whose centre lies farthest from `from`
fn farthest_corner(arena: &Arena, from: Vec2, size: f32, margin: f32) -> Vec2 {
    let near_top = arena.top + margin;
    let far_bottom = arena.bottom() - margin - size;
    let right = arena.width - size;
    let corners = [
        Vec2::new(0.0, near_top),
        Vec2::new(right, near_top),
        Vec2::new(0.0, far_bottom),
        Vec2::new(right, far_bottom),
    ]
    .map(|corner| arena.clamp_square(corner, size));

    let gap = |pos: Vec2| distance(pos + Vec2::splat(size / 2.0), from);
    corners
        .into_iter()
        .fold(corners[0], |best, corner| if gap(corner) > gap(best) { corner } else { best })
}

/// Uniform in `[lo, hi)`, or `lo` when the range is empty
fn span(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Player;
    use crate::sim::test_support::quiet_state;

    #[test]
    fn test_population_scales_and_caps() {
        let tuning = Tuning::default();
        assert_eq!(desired_population(0, &tuning), 5);
        assert_eq!(desired_population(14, &tuning), 5);
        assert_eq!(desired_population(15, &tuning), 6);
        assert_eq!(desired_population(10_000, &tuning), 20);
    }

    #[test]
    fn test_speed_bonus_is_capped() {
        let tuning = Tuning::default();
        assert!((base_speed(0, &tuning) - 1.8).abs() < 1e-6);
        assert!((base_speed(50, &tuning) - 2.8).abs() < 1e-5);
        assert!((base_speed(1_000, &tuning) - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_health_never_below_one() {
        let tuning = Tuning {
            enemy_base_health: 0,
            ..Default::default()
        };
        let mut rng = rand_pcg::Pcg32::new(1, 1);
        let fast = make_enemy(1, EnemyKind::Fast, Vec2::ZERO, 0, &tuning, &mut rng);
        assert_eq!(fast.health, 1);
        let tank = make_enemy(2, EnemyKind::Tank, Vec2::ZERO, 30, &Tuning::default(), &mut rng);
        assert_eq!(tank.health, 2 + 2 + 2);
        assert_eq!(tank.max_health, tank.health);
        assert!((tank.vel.length() - tank.speed).abs() < 1e-4 || tank.vel == Vec2::ZERO);
    }

    #[test]
    fn test_spawn_respects_interval() {
        let mut state = quiet_state(3);
        state.tuning.max_population = 20;
        state.tuning.base_population = 5;

        assert!(update(&mut state, 1_000.0).is_some());
        assert!(update(&mut state, 1_500.0).is_none());
        assert!(update(&mut state, 1_800.0).is_none(), "interval is exclusive");
        assert!(update(&mut state, 1_800.5).is_some());
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_spawn_stops_at_population() {
        let mut state = quiet_state(4);
        state.tuning.base_population = 2;
        state.tuning.max_population = 20;
        let mut now = 0.0;
        for _ in 0..10 {
            update(&mut state, now);
            now += 1_000.0;
        }
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_spawns_inside_arena_and_clear_of_player() {
        let mut state = quiet_state(11);
        let arena = state.arena;
        for _ in 0..200 {
            spawn_enemy(&mut state);
        }
        let player_center = state.player.center();
        for e in &state.enemies {
            assert!(e.pos.x >= 0.0 && e.pos.x <= arena.width - e.size);
            assert!(e.pos.y >= arena.top && e.pos.y <= arena.bottom() - e.size);
            assert!(e.center().distance(player_center) >= state.tuning.spawn_clearance);
        }
        for kind in EnemyKind::ALL {
            assert!(state.enemies.iter().any(|e| e.kind == kind), "{kind:?} never spawned");
        }
    }

    #[test]
    fn test_small_arena_spawns_stay_clear_of_player() {
        let mut state = quiet_state(12);
        state.arena = Arena::new(400.0, 300.0, 0.0);
        state.player = Player::new(&state.tuning, &state.arena);
        let player_center = state.player.center();

        for _ in 0..200 {
            spawn_enemy(&mut state);
        }
        assert_eq!(state.enemies.len(), 200);
        for e in &state.enemies {
            assert!(e.pos.x >= 0.0 && e.pos.x <= 400.0 - e.size);
            assert!(e.pos.y >= 0.0 && e.pos.y <= 300.0 - e.size);
            assert!(
                e.center().distance(player_center) >= state.tuning.spawn_clearance,
                "enemy #{} spawned {:.1} from the player",
                e.id,
                e.center().distance(player_center)
            );
        }
    }

    #[test]
    fn test_cramped_arena_falls_back_to_farthest_corner() {
        let mut state = quiet_state(13);
        state.arena = Arena::new(200.0, 200.0, 0.0);
        state.player = Player::new(&state.tuning, &state.arena);
        let player_center = state.player.center();

        spawn_enemy(&mut state);
        let enemy = &state.enemies[0];
        // Nothing in a 200x200 arena is 150 from its centre
        let corner = farthest_corner(&state.arena, player_center, enemy.size, state.tuning.spawn_margin);
        assert_eq!(enemy.pos, corner);
        assert!(enemy.center().distance(player_center) > 75.0);
    }

    #[test]
    fn test_fallbacks_cover_other_edges() {
        for edge in Edge::ALL {
            let fallbacks = edge.fallbacks();
            assert_eq!(fallbacks[0], edge.opposite());
            assert!(!fallbacks.contains(&edge));
        }
    }
}
