//! Broadphase collision detection using AABB overlap tests.
//!
//! A broadphase only proposes candidates. The narrowphase decides whether a
//! candidate is an actual contact.

use std::collections::HashSet;

use super::aabb::Aabb;
use super::rigid_body::Body;

/// Two body indices proposed for an exact test. Built-in strategies always
/// emit `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyPair {
    pub a: usize,
    pub b: usize,
}

impl BodyPair {
    /// Canonical pair with the lower index first.
    #[inline]
    pub fn new(i: usize, j: usize) -> Self {
        if i <= j {
            Self { a: i, b: j }
        } else {
            Self { a: j, b: i }
        }
    }
}

/// Candidate pair generator.
pub trait Broadphase {
    /// Return candidate pairs for `bodies`. `bounds` are the world bounds;
    /// strategies that do not partition space ignore them.
    fn pair(&mut self, bodies: &[Body], bounds: &Aabb) -> Vec<BodyPair>;
}

/// Every unordered pair, no filtering at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaiveBroadphase;

impl Broadphase for NaiveBroadphase {
    fn pair(&mut self, bodies: &[Body], _bounds: &Aabb) -> Vec<BodyPair> {
        let n = bodies.len();
        let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                pairs.push(BodyPair { a: i, b: j });
            }
        }
        pairs
    }
}

/// O(n^2) pair-wise AABB test.
#[derive(Debug, Default, Clone, Copy)]
pub struct BruteForceBroadphase;

impl Broadphase for BruteForceBroadphase {
    fn pair(&mut self, bodies: &[Body], _bounds: &Aabb) -> Vec<BodyPair> {
        let aabbs: Vec<Aabb> = bodies.iter().map(Body::aabb).collect();
        let indices: Vec<usize> = (0..bodies.len()).collect();
        let mut pairs = Vec::new();
        brute_force(&indices, &aabbs, &mut pairs);
        pairs
    }
}

/// Append every overlapping pair among `indices`.
fn brute_force(indices: &[usize], aabbs: &[Aabb], pairs: &mut Vec<BodyPair>) {
    for (n, &i) in indices.iter().enumerate() {
        for &j in &indices[(n + 1)..] {
            if aabbs[i].intersects(&aabbs[j]) {
                pairs.push(BodyPair::new(i, j));
            }
        }
    }
}

/// One quadrant of the world and the bodies overlapping it.
#[derive(Debug, Clone)]
struct Cell {
    aabb: Aabb,
    bodies: Vec<usize>,
}

/// Quadrant partition: the world bounds are split into four cells and
/// brute-force pairing runs inside each cell.
///
/// Bodies straddling a cell border land in every cell they touch; pairs
/// found in several cells are reported once. Bodies outside every cell are
/// tested against all other bodies.
#[derive(Debug, Default, Clone)]
pub struct SpatialBroadphase {
    bounds: Option<Aabb>,
    cells: Vec<Cell>,
    outside: Vec<usize>,
}

impl SpatialBroadphase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the cell boxes when the bounds change, then empty every cell.
    fn reset_cells(&mut self, bounds: &Aabb) {
        if self.bounds != Some(*bounds) {
            self.cells = bounds
                .quadrants()
                .into_iter()
                .map(|aabb| Cell {
                    aabb,
                    bodies: Vec::new(),
                })
                .collect();
            self.bounds = Some(*bounds);
        }
        for cell in &mut self.cells {
            cell.bodies.clear();
        }
        self.outside.clear();
    }
}

impl Broadphase for SpatialBroadphase {
    fn pair(&mut self, bodies: &[Body], bounds: &Aabb) -> Vec<BodyPair> {
        self.reset_cells(bounds);

        let aabbs: Vec<Aabb> = bodies.iter().map(Body::aabb).collect();

        // Divide the bodies into cells
        for (i, aabb) in aabbs.iter().enumerate() {
            let mut placed = false;
            for cell in &mut self.cells {
                if cell.aabb.intersects(aabb) {
                    cell.bodies.push(i);
                    placed = true;
                }
            }
            if !placed {
                self.outside.push(i);
            }
        }

        let mut pairs = Vec::new();
        for cell in &self.cells {
            brute_force(&cell.bodies, &aabbs, &mut pairs);
        }
        for &i in &self.outside {
            for j in (0..bodies.len()).filter(|&j| j != i) {
                if aabbs[i].intersects(&aabbs[j]) {
                    pairs.push(BodyPair::new(i, j));
                }
            }
        }

        // Straddling bodies show up in several cells
        let mut seen = HashSet::with_capacity(pairs.len());
        pairs.retain(|pair| seen.insert(*pair));
        pairs
    }
}
