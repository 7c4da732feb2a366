//! Player damage and hit-immunity
//!
//! Two states: `Vulnerable` and `Invincible`. A hit while vulnerable lowers
//! health and opens an immunity window; the window closes once strictly more
//! than the configured duration has passed.

use super::state::Player;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Guard {
    #[default]
    Vulnerable,
    /// Immune since the hit at `since_ms`
    Invincible { since_ms: f64 },
}

impl Guard {
    pub fn is_invincible(&self) -> bool {
        matches!(self, Guard::Invincible { .. })
    }

    pub fn since_ms(&self) -> Option<f64> {
        match *self {
            Guard::Invincible { since_ms } => Some(since_ms),
            Guard::Vulnerable => None,
        }
    }
}

/// What a hit did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Player was immune; nothing changed
    Suppressed,
    Wounded { dealt: u32 },
    /// Health reached zero
    Killed { dealt: u32 },
}

impl HitOutcome {
    pub fn landed(&self) -> bool {
        !matches!(self, HitOutcome::Suppressed)
    }
}

/// Deal `amount` damage units as a single hit
///
/// Health saturates at zero. Zero-unit hits are ignored.
pub fn apply_hit(player: &mut Player, amount: u32, now_ms: f64) -> HitOutcome {
    if player.guard.is_invincible() || amount == 0 {
        return HitOutcome::Suppressed;
    }

    let dealt = amount.min(player.health);
    player.health -= dealt;
    player.guard = Guard::Invincible { since_ms: now_ms };

    if player.health == 0 {
        HitOutcome::Killed { dealt }
    } else {
        HitOutcome::Wounded { dealt }
    }
}

/// Close the immunity window once it has run out
///
/// Returns true when the player became vulnerable on this call.
pub fn expire_invincibility(player: &mut Player, now_ms: f64, duration_ms: f64) -> bool {
    match player.guard {
        Guard::Invincible { since_ms } if now_ms - since_ms > duration_ms => {
            player.guard = Guard::Vulnerable;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Arena;
    use crate::tuning::Tuning;

    fn player() -> Player {
        Player::new(&Tuning::default(), &Arena::default())
    }

    #[test]
    fn test_hit_opens_window() {
        let mut p = player();
        assert_eq!(apply_hit(&mut p, 2, 100.0), HitOutcome::Wounded { dealt: 2 });
        assert_eq!(p.health, 3);
        assert_eq!(p.guard, Guard::Invincible { since_ms: 100.0 });
        assert_eq!(p.last_hit_ms(), Some(100.0));
    }

    #[test]
    fn test_invincible_blocks_all_damage() {
        let mut p = player();
        apply_hit(&mut p, 1, 0.0);
        for t in 1..=1000 {
            assert_eq!(apply_hit(&mut p, 3, t as f64), HitOutcome::Suppressed);
            expire_invincibility(&mut p, t as f64, 1000.0);
        }
        assert_eq!(p.health, 4);

        // One millisecond past the window
        assert!(expire_invincibility(&mut p, 1001.0, 1000.0));
        assert_eq!(apply_hit(&mut p, 1, 1001.0), HitOutcome::Wounded { dealt: 1 });
        assert_eq!(p.health, 3);
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let mut p = player();
        apply_hit(&mut p, 1, 500.0);
        assert!(!expire_invincibility(&mut p, 1500.0, 1000.0));
        assert!(p.is_invincible());
        assert!(expire_invincibility(&mut p, 1500.5, 1000.0));
        assert!(!p.is_invincible());
    }

    #[test]
    fn test_overkill_saturates_at_zero() {
        let mut p = player();
        p.health = 2;
        assert_eq!(apply_hit(&mut p, 5, 0.0), HitOutcome::Killed { dealt: 2 });
        assert_eq!(p.health, 0);
    }

    #[test]
    fn test_zero_amount_is_ignored() {
        let mut p = player();
        assert!(!apply_hit(&mut p, 0, 0.0).landed());
        assert!(!p.is_invincible());
    }
}
