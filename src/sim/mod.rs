//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! input-binding concerns:
//! - Input arrives as an explicit [`TickInput`] snapshot
//! - Seeded RNG only
//! - Entity removal is deferred to the end of each pass

pub mod collision;
pub mod damage;
pub mod fire;
pub mod geometry;
pub mod grid;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod steering;
pub mod tick;

#[cfg(test)]
pub(crate) mod test_support;

pub use collision::{CollisionReport, resolve};
pub use damage::{Guard, HitOutcome, apply_hit, expire_invincibility};
pub use fire::{fire_direction, try_fire};
pub use geometry::{Aabb, Arena, circles_overlap, clamp, distance};
pub use grid::SpatialGrid;
pub use snapshot::{EnemyView, PlayerView, ProjectileView, Snapshot};
pub use state::{
    Archetype, DamageRange, Enemy, EnemyKind, Facing, GamePhase, GameState, MoveIntent, Player,
    Projectile,
};
pub use tick::{TickInput, restart, resize, survival_ms, tick};
