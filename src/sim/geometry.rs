//! Geometry helpers for the rectangular arena
//!
//! Entities are squares addressed by their top-left corner; overlap tests treat
//! them as circles inscribed in those squares.

use glam::{BVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Clamp `v` into `[min, max]`
///
/// Unlike `f32::clamp` this never panics: when `min > max` the result is `min`.
#[inline]
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    v.min(max).max(min)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Strict circle-circle overlap (touching circles do not overlap)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) < reach * reach
}

/// Axis-aligned box with inclusive edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of a square entity given its top-left corner
    pub fn from_square(top_left: Vec2, size: f32) -> Self {
        Self {
            min: top_left,
            max: top_left + Vec2::splat(size),
        }
    }

    /// Square of side `2 * half_extent` centred on `center`
    pub fn around(center: Vec2, half_extent: f32) -> Self {
        Self {
            min: center - Vec2::splat(half_extent),
            max: center + Vec2::splat(half_extent),
        }
    }

    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

/// The playable rectangle
///
/// `top` is the vertical offset of the playable band inside a taller display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub top: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::from_viewport(
            DEFAULT_DISPLAY_WIDTH,
            DEFAULT_DISPLAY_HEIGHT,
            TOP_BAND_HEIGHT,
            BOTTOM_BAND_HEIGHT,
        )
    }
}

impl Arena {
    pub fn new(width: f32, height: f32, top: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            top,
        }
    }

    /// Playable band of a display with letterbox bands above and below
    pub fn from_viewport(width: f32, height: f32, top_band: f32, bottom_band: f32) -> Self {
        Self::new(width, height - top_band - bottom_band, top_band)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Keep a square of side `size` fully inside the arena
    pub fn clamp_square(&self, top_left: Vec2, size: f32) -> Vec2 {
        self.clamp_square_flagged(top_left, size).0
    }

    /// Like [`Arena::clamp_square`], also reporting which axes were corrected
    pub fn clamp_square_flagged(&self, top_left: Vec2, size: f32) -> (Vec2, BVec2) {
        let clamped = Vec2::new(
            clamp(top_left.x, 0.0, self.width - size),
            clamp(top_left.y, self.top, self.bottom() - size),
        );
        let hit = BVec2::new(clamped.x != top_left.x, clamped.y != top_left.y);
        (clamped, hit)
    }

    /// Whether a point lies within the arena grown by `margin` on every side
    pub fn contains_with_margin(&self, point: Vec2, margin: f32) -> bool {
        point.x >= -margin
            && point.x <= self.width + margin
            && point.y >= self.top - margin
            && point.y <= self.bottom() + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_degenerate_range_prefers_min() {
        assert_eq!(clamp(5.0, 10.0, 0.0), 10.0);
        assert_eq!(clamp(-3.0, 0.0, 4.0), 0.0);
        assert_eq!(clamp(7.0, 0.0, 4.0), 4.0);
    }

    #[test]
    fn test_circles_touching_do_not_overlap() {
        let a = Vec2::new(0.0, 0.0);
        assert!(!circles_overlap(a, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(circles_overlap(a, 5.0, Vec2::new(9.9, 0.0), 5.0));
        assert!((distance(a, Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_viewport_bands() {
        let arena = Arena::from_viewport(1000.0, 900.0, 400.0, 150.0);
        assert_eq!(arena.top, 400.0);
        assert_eq!(arena.height, 350.0);
        assert_eq!(arena.bottom(), 750.0);
    }

    #[test]
    fn test_clamp_flags_only_corrected_axes() {
        let arena = Arena::new(500.0, 300.0, 100.0);
        let (pos, hit) = arena.clamp_square_flagged(Vec2::new(480.0, 200.0), 60.0);
        assert_eq!(pos, Vec2::new(440.0, 200.0));
        assert!(hit.x);
        assert!(!hit.y);
    }

    #[test]
    fn test_aabb_edges_are_inclusive() {
        let a = Aabb::from_square(Vec2::ZERO, 10.0);
        let b = Aabb::from_square(Vec2::new(10.0, 10.0), 10.0);
        assert!(a.intersects(&b));
        let c = Aabb::around(Vec2::new(25.0, 5.0), 4.0);
        assert!(!a.intersects(&c));
    }

    proptest! {
        #[test]
        fn clamp_keeps_square_inside(
            x in -5000.0f32..5000.0,
            y in -5000.0f32..5000.0,
            width in 100.0f32..2000.0,
            height in 100.0f32..2000.0,
            top in 0.0f32..500.0,
            size in 1.0f32..100.0,
        ) {
            let arena = Arena::new(width, height, top);
            let p = arena.clamp_square(Vec2::new(x, y), size);
            prop_assert!(p.x >= 0.0 && p.x <= width - size);
            prop_assert!(p.y >= top && p.y <= top + height - size);
        }
    }
}
