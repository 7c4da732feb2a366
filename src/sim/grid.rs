//! Uniform spatial hash over the arena
//!
//! Broad phase for projectile-vs-enemy tests. The grid is rebuilt from the live
//! enemy list every tick and stores indices into that list, so an index is only
//! meaningful for the tick that built it.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use glam::Vec2;
use rustc_hash::FxHashMap;

use super::geometry::Aabb;
use super::state::Enemy;

/// Cell coordinate: arena position divided by the cell size, floored
pub type CellKey = (i32, i32);

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: FxHashMap<CellKey, Vec<usize>>,
    /// Bounds of every inserted item, by index
    bounds: Vec<Aabb>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        debug_assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            cell_size: cell_size.max(f32::EPSILON),
            cells: FxHashMap::default(),
            bounds: Vec::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of indexed items
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Number of occupied cells
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Indices stored under a single cell
    pub fn bucket(&self, key: CellKey) -> &[usize] {
        self.cells.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.bounds.clear();
    }

    /// Clear and re-index the live enemy list
    pub fn rebuild(&mut self, enemies: &[Enemy]) {
        self.rebuild_boxes(enemies.iter().map(Enemy::bounds));
    }

    /// Clear and index arbitrary boxes; each box's index is its position in
    /// the iterator.
    ///
    /// A box spanning several cells is listed in every one of them.
    pub fn rebuild_boxes(&mut self, boxes: impl IntoIterator<Item = Aabb>) {
        self.clear();
        for (index, aabb) in boxes.into_iter().enumerate() {
            let (xs, ys) = self.cell_span(&aabb);
            for cy in ys {
                for cx in xs.clone() {
                    self.cells.entry((cx, cy)).or_default().push(index);
                }
            }
            self.bounds.push(aabb);
        }
    }

    /// Indices whose box intersects the square of side `2 * radius` centred on
    /// `(x, y)`, in ascending order
    pub fn query_near(&self, x: f32, y: f32, radius: f32) -> BTreeSet<usize> {
        let query = Aabb::around(Vec2::new(x, y), radius.abs());
        let (xs, ys) = self.cell_span(&query);
        let mut found = BTreeSet::new();

        let span = span_len(&xs).saturating_mul(span_len(&ys));
        if span > self.cells.len() {
            // Walking every occupied bucket is cheaper than probing empty cells
            for (&(cx, cy), bucket) in &self.cells {
                if xs.contains(&cx) && ys.contains(&cy) {
                    self.collect(bucket, &query, &mut found);
                }
            }
        } else {
            for cy in ys {
                for cx in xs.clone() {
                    if let Some(bucket) = self.cells.get(&(cx, cy)) {
                        self.collect(bucket, &query, &mut found);
                    }
                }
            }
        }
        found
    }

    fn collect(&self, bucket: &[usize], query: &Aabb, found: &mut BTreeSet<usize>) {
        for &index in bucket {
            if self.bounds[index].intersects(query) {
                found.insert(index);
            }
        }
    }

    #[inline]
    fn cell_of(&self, v: f32) -> i32 {
        (v / self.cell_size).floor() as i32
    }

    fn cell_span(&self, aabb: &Aabb) -> (RangeInclusive<i32>, RangeInclusive<i32>) {
        (
            self.cell_of(aabb.min.x)..=self.cell_of(aabb.max.x),
            self.cell_of(aabb.min.y)..=self.cell_of(aabb.max.y),
        )
    }
}

fn span_len(range: &RangeInclusive<i32>) -> usize {
    (i64::from(*range.end()) - i64::from(*range.start()) + 1).max(0) as usize
}
