//! Game state and core simulation types
//!
//! Everything a tick mutates lives in [`GameState`]. Entities are squares
//! addressed by their top-left corner, except projectiles which are addressed
//! by their centre.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::damage::Guard;
use super::geometry::{Aabb, Arena};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    /// Player health hit zero; ticks are no-ops until restart
    GameOver,
}

/// Direction the player last moved in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Unit vector in screen space (y grows downward)
    pub fn vector(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::NEG_Y,
            Facing::Down => Vec2::Y,
            Facing::Left => Vec2::NEG_X,
            Facing::Right => Vec2::X,
        }
    }

    /// Facing after this tick's intent
    ///
    /// A key pressed this tick wins, then the current facing while its key is
    /// still held, then any held key. With nothing held the facing sticks.
    pub fn update(self, previous: MoveIntent, current: MoveIntent) -> Facing {
        if let Some(pressed) = current.pressed_since(previous).first_held() {
            return pressed;
        }
        if current.holds(self) {
            return self;
        }
        current.first_held().unwrap_or(self)
    }
}

/// Directional keys held this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub fn is_active(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    pub fn holds(&self, facing: Facing) -> bool {
        match facing {
            Facing::Up => self.up,
            Facing::Down => self.down,
            Facing::Left => self.left,
            Facing::Right => self.right,
        }
    }

    /// Keys held now that were not held in `previous`
    pub fn pressed_since(&self, previous: MoveIntent) -> MoveIntent {
        MoveIntent {
            up: self.up && !previous.up,
            down: self.down && !previous.down,
            left: self.left && !previous.left,
            right: self.right && !previous.right,
        }
    }

    fn first_held(&self) -> Option<Facing> {
        [Facing::Up, Facing::Down, Facing::Left, Facing::Right]
            .into_iter()
            .find(|&f| self.holds(f))
    }

    /// Normalized direction; zero when nothing is held or keys cancel out
    pub fn vector(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }
}

/// Inclusive range of damage units dealt on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
}

impl DamageRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn roll(&self, rng: &mut impl Rng) -> u32 {
        if self.max <= self.min {
            self.min
        } else {
            rng.random_range(self.min..=self.max)
        }
    }
}

/// Fixed parameters of an enemy type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Archetype {
    pub speed_multiplier: f32,
    pub health_bonus: i32,
    pub damage: DamageRange,
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Normal,
    Fast,
    Tank,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Normal, EnemyKind::Fast, EnemyKind::Tank];

    pub const fn archetype(self) -> Archetype {
        match self {
            EnemyKind::Normal => Archetype {
                speed_multiplier: 1.0,
                health_bonus: 0,
                damage: DamageRange::new(1, 3),
            },
            EnemyKind::Fast => Archetype {
                speed_multiplier: 1.5,
                health_bonus: -1,
                damage: DamageRange::new(1, 1),
            },
            EnemyKind::Tank => Archetype {
                speed_multiplier: 0.7,
                health_bonus: 2,
                damage: DamageRange::new(3, 5),
            },
        }
    }
}

/// The player avatar
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub speed: f32,
    pub facing: Facing,
    pub health: u32,
    pub max_health: u32,
    /// Hit-immunity state
    pub guard: Guard,
    pub last_shot_ms: Option<f64>,
    pub fire_cooldown_ms: f64,
}

impl Player {
    /// Fresh player centred in the arena
    pub fn new(tuning: &Tuning, arena: &Arena) -> Self {
        let size = tuning.player_size;
        let pos = arena.clamp_square(arena.center() - Vec2::splat(size / 2.0), size);
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            speed: tuning.player_speed,
            facing: Facing::default(),
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            guard: Guard::Vulnerable,
            last_shot_ms: None,
            fire_cooldown_ms: tuning.fire_cooldown_ms,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    pub fn is_invincible(&self) -> bool {
        self.guard.is_invincible()
    }

    /// Timestamp of the hit that started the current immunity window
    pub fn last_hit_ms(&self) -> Option<f64> {
        self.guard.since_ms()
    }
}

/// A pursuing enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub kind: EnemyKind,
    /// Contact damage, copied from the archetype at spawn
    pub damage: DamageRange,
    /// Sprite frame offset; never read by the simulation
    pub anim_phase: u8,
}

impl Enemy {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_square(self.pos, self.size)
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

/// A player shot
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    /// Centre point
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Projectile {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub arena: Arena,
    pub phase: GamePhase,
    /// One point per enemy killed
    pub score: u64,
    pub player: Player,
    /// Live enemies, in spawn order
    pub enemies: Vec<Enemy>,
    /// Live projectiles, in fire order
    pub projectiles: Vec<Projectile>,
    pub last_spawn_ms: Option<f64>,
    /// Timestamp the current run started at
    pub started_at_ms: f64,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    /// Intent seen on the previous tick, for facing resolution
    pub last_intent: MoveIntent,
    next_id: u32,
}

impl GameState {
    /// Create a new session
    pub fn new(seed: u64, tuning: Tuning, arena: Arena, now_ms: f64) -> Self {
        let player = Player::new(&tuning, &arena);
        log::info!(
            "Session started (seed {}, arena {}x{} at y={})",
            seed,
            arena.width,
            arena.height,
            arena.top
        );
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            arena,
            phase: GamePhase::Playing,
            score: 0,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            last_spawn_ms: None,
            started_at_ms: now_ms,
            time_ticks: 0,
            last_intent: MoveIntent::default(),
            next_id: 1,
        }
    }

    /// Session with default tuning and arena
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, Tuning::default(), Arena::default(), 0.0)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Put every run-scoped field back to its start value
    ///
    /// Tuning, arena, RNG stream and ID counter carry over. All fields are
    /// assigned before returning, so the next tick never sees a partial reset.
    pub fn reset(&mut self, now_ms: f64) {
        self.player = Player::new(&self.tuning, &self.arena);
        self.enemies.clear();
        self.projectiles.clear();
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.last_spawn_ms = None;
        self.started_at_ms = now_ms;
        self.time_ticks = 0;
        self.last_intent = MoveIntent::default();
    }
}
