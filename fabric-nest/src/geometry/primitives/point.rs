use std::hash::{Hash, Hasher};

/// Geometric primitive representing a point
#[derive(Debug, Clone, PartialEq, Copy)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }

    /// Returns a copy of `self` moved by `(dx, dy)`
    pub fn translate(self, dx: f64, dy: f64) -> Point {
        Point(self.0 + dx, self.1 + dy)
    }

    /// Returns `self` with its coordinates swapped.
    /// Applied to an origin-anchored polygon, this is a 90° rotation followed by a mirror,
    /// the result stays origin-anchored with width and height exchanged.
    pub fn transpose(self) -> Point {
        Point(self.1, self.0)
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite() && self.1.is_finite()
    }

    /// 2D cross product of the vectors `a - self` and `b - self`
    pub fn cross(&self, a: &Point, b: &Point) -> f64 {
        (a.0 - self.0) * (b.1 - self.1) - (a.1 - self.1) * (b.0 - self.0)
    }

    pub fn sq_distance(&self, other: &Point) -> f64 {
        (self.0 - other.0).powi(2) + (self.1 - other.1).powi(2)
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let x = self.0.to_bits();
        let y = self.1.to_bits();
        x.hash(state);
        y.hash(state);
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.0, p.1)
    }
}

impl From<(f64, f64)> for Point {
    fn from(p: (f64, f64)) -> Self {
        Point(p.0, p.1)
    }
}
