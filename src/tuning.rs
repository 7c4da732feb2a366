//! Data-driven game balance
//!
//! Every number the simulation reads lives here. Tuning files are JSON and may
//! name only the fields they change; everything else keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to obtain a usable [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game balance knobs
///
/// Speeds are in arena units per tick, durations in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Side of the player's square bounding box
    pub player_size: f32,
    pub player_speed: f32,
    pub player_max_health: u32,
    /// Hit-immunity window after taking damage
    pub invincibility_ms: f64,
    /// Minimum gap between two shots
    pub fire_cooldown_ms: f64,
    /// Distance the player is shoved away from an enemy on contact
    pub knockback: f32,

    // === Projectiles ===
    pub projectile_speed: f32,
    /// Side of the projectile's square; the hit radius is half of it
    pub projectile_size: f32,
    /// Projectiles beyond the arena by more than this are culled
    pub projectile_cull_margin: f32,

    // === Enemies ===
    pub enemy_size: f32,
    pub enemy_base_speed: f32,
    /// Extra base speed per point of score
    pub enemy_speed_per_point: f32,
    /// Cap on the score-driven speed bonus
    pub enemy_max_speed_bonus: f32,
    pub enemy_base_health: u32,
    /// Score needed for each extra point of enemy health
    pub score_per_health_step: u32,
    /// Fraction of the previous velocity kept each tick while steering
    pub steering_retain: f32,
    /// Velocity factor applied to an axis that hit an arena wall
    pub bounce_damping: f32,

    // === Spawner ===
    pub base_population: usize,
    /// Score needed for each extra live enemy
    pub score_per_extra_enemy: u32,
    pub max_population: usize,
    /// Spawns happen only once strictly more than this has elapsed
    pub spawn_interval_ms: f64,
    /// Inward offset from the arena edge for new enemies
    pub spawn_margin: f32,
    /// New enemies never appear closer than this to the player's centre
    pub spawn_clearance: f32,

    // === Broad phase ===
    pub grid_cell_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_size: 80.0,
            player_speed: 5.0,
            player_max_health: 5,
            invincibility_ms: 1000.0,
            fire_cooldown_ms: 250.0,
            knockback: 20.0,

            projectile_speed: 8.0,
            projectile_size: 10.0,
            projectile_cull_margin: 50.0,

            enemy_size: 60.0,
            enemy_base_speed: 1.8,
            enemy_speed_per_point: 0.02,
            enemy_max_speed_bonus: 2.2,
            enemy_base_health: 2,
            score_per_health_step: 15,
            steering_retain: 0.9,
            bounce_damping: 0.6,

            base_population: 5,
            score_per_extra_enemy: 15,
            max_population: 20,
            spawn_interval_ms: 800.0,
            spawn_margin: 40.0,
            spawn_clearance: 150.0,

            // Two enemy widths
            grid_cell_size: 120.0,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("player_size", self.player_size)?;
        positive("player_speed", self.player_speed)?;
        positive("projectile_speed", self.projectile_speed)?;
        positive("projectile_size", self.projectile_size)?;
        positive("enemy_size", self.enemy_size)?;
        positive("grid_cell_size", self.grid_cell_size)?;
        if self.grid_cell_size < self.enemy_size {
            return Err(invalid("grid_cell_size", "must be at least enemy_size"));
        }

        non_negative("knockback", self.knockback)?;
        non_negative("projectile_cull_margin", self.projectile_cull_margin)?;
        non_negative("enemy_base_speed", self.enemy_base_speed)?;
        non_negative("enemy_speed_per_point", self.enemy_speed_per_point)?;
        non_negative("enemy_max_speed_bonus", self.enemy_max_speed_bonus)?;
        non_negative("spawn_margin", self.spawn_margin)?;
        non_negative("spawn_clearance", self.spawn_clearance)?;

        if self.player_max_health == 0 {
            return Err(invalid("player_max_health", "must be at least 1"));
        }
        if self.score_per_health_step == 0 {
            return Err(invalid("score_per_health_step", "must be at least 1"));
        }
        if self.score_per_extra_enemy == 0 {
            return Err(invalid("score_per_extra_enemy", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.steering_retain) {
            return Err(invalid("steering_retain", "must lie in [0, 1]"));
        }
        if self.bounce_damping < 0.0 || !self.bounce_damping.is_finite() {
            return Err(invalid("bounce_damping", "must be a finite non-negative number"));
        }
        for (field, ms) in [
            ("invincibility_ms", self.invincibility_ms),
            ("fire_cooldown_ms", self.fire_cooldown_ms),
            ("spawn_interval_ms", self.spawn_interval_ms),
        ] {
            if ms < 0.0 || !ms.is_finite() {
                return Err(invalid(field, "must be a finite non-negative duration"));
            }
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be a finite positive number"))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be a finite non-negative number"))
    }
}

fn invalid(field: &'static str, reason: &'static str) -> TuningError {
    TuningError::Invalid { field, reason }
}
