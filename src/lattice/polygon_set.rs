use super::LatticePoint;

/// Rule deciding which regions of a set of loops count as filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Filled where a ray to infinity crosses an odd number of loop edges.
    #[default]
    EvenOdd,
    /// Filled where the winding number is non-zero.
    NonZero,
}

/// One closed ring of lattice points. The closing edge is implicit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Loop {
    points: Vec<LatticePoint>,
}

impl Loop {
    /// Builds a loop, dropping consecutive duplicates and a trailing copy of
    /// the first point.
    #[must_use]
    pub fn new(points: impl IntoIterator<Item = LatticePoint>) -> Self {
        let mut ring = Self::default();
        for p in points {
            ring.push(p);
        }
        ring.close();
        ring
    }

    /// Appends a point unless it repeats the previous one.
    pub fn push(&mut self, p: LatticePoint) {
        if self.points.last() != Some(&p) {
            self.points.push(p);
        }
    }

    /// Removes trailing points that repeat the first one.
    pub fn close(&mut self) {
        while self.points.len() > 1 && self.points.first() == self.points.last() {
            self.points.pop();
        }
    }

    /// Returns the points in traversal order.
    #[must_use]
    pub fn points(&self) -> &[LatticePoint] {
        &self.points
    }

    /// Returns the number of stored points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the loop has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Twice the signed enclosed area, in squared grain units.
    ///
    /// Positive for counter-clockwise loops.
    #[must_use]
    pub fn signed_area2(&self) -> i128 {
        let n = self.points.len();
        if n < 3 {
            return 0;
        }
        (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                i128::from(a.x) * i128::from(b.y) - i128::from(b.x) * i128::from(a.y)
            })
            .sum()
    }
}

/// Axis-aligned bounds of a polygon set, in grain units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticeBounds {
    /// Minimum corner.
    pub min: LatticePoint,
    /// Maximum corner.
    pub max: LatticePoint,
}

impl LatticeBounds {
    /// Returns `true` if the two boxes share at least one point.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// The loops of one source face or solid, read under a fill rule.
///
/// Loops carry no hole flag: nesting under the fill rule decides which
/// regions are solid and which are holes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolygonSet {
    loops: Vec<Loop>,
    fill_rule: FillRule,
}

impl PolygonSet {
    /// Creates an empty even-odd polygon set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a polygon set from loops with the given fill rule.
    #[must_use]
    pub fn from_loops(loops: Vec<Loop>, fill_rule: FillRule) -> Self {
        Self { loops, fill_rule }
    }

    /// Adds a loop.
    pub fn push(&mut self, ring: Loop) {
        self.loops.push(ring);
    }

    /// Returns the fill rule.
    #[must_use]
    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    /// Returns the loops in insertion order.
    #[must_use]
    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    /// Iterates over the loops.
    pub fn iter(&self) -> std::slice::Iter<'_, Loop> {
        self.loops.iter()
    }

    /// Returns the number of loops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loops.len()
    }

    /// Returns `true` if the set has no loops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    /// Returns the bounding box of all points, or `None` if there are none.
    #[must_use]
    pub fn bounds(&self) -> Option<LatticeBounds> {
        let mut points = self.loops.iter().flat_map(|l| l.points().iter().copied());
        let first = points.next()?;
        let mut bounds = LatticeBounds {
            min: first,
            max: first,
        };
        for p in points {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }
}

impl<'a> IntoIterator for &'a PolygonSet {
    type Item = &'a Loop;
    type IntoIter = std::slice::Iter<'a, Loop>;

    fn into_iter(self) -> Self::IntoIter {
        self.loops.iter()
    }
}
