//! Planar geometry helpers for plan-view entities.
//!
//! Coordinates are millimeters in model space. Polygons are closed implicitly
//! (the last point connects back to the first) and are expected to be simple;
//! results for self-intersecting polygons are not meaningful.

use serde::{Deserialize, Serialize};

/// A point in model space (mm).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Creates bounds from two corners.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Grows the bounds to include another box.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Expands every side outward by `amount`.
    pub fn padded(&self, amount: f64) -> Bounds {
        Bounds::new(
            self.min_x - amount,
            self.min_y - amount,
            self.max_x + amount,
            self.max_y + amount,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Corner points in counter-clockwise order starting at (min_x, min_y).
    pub fn to_polygon(&self) -> Vec<Point> {
        vec![
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }
}

/// Area of a simple polygon via the shoelace formula.
///
/// ```text
/// area = |Σ (x_i * y_{i+1} - x_{i+1} * y_i)| / 2
/// ```
///
/// The absolute value makes the result independent of winding direction.
/// Fewer than three points yields `0.0`.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    let twice_signed: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice_signed.abs() / 2.0
}

/// Perimeter of a closed polygon, wrapping from the last point to the first.
///
/// Fewer than three points is treated as a degenerate polygon: `0.0`.
pub fn perimeter(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    (0..n)
        .map(|i| points[i].distance_to(&points[(i + 1) % n]))
        .sum()
}

/// Bounding box of a point set, `None` when empty.
pub fn bounds_of(points: &[Point]) -> Option<Bounds> {
    let first = points.first()?;
    let init = Bounds::new(first.x, first.y, first.x, first.y);
    Some(points.iter().fold(init, |b, p| {
        Bounds::new(b.min_x.min(p.x), b.min_y.min(p.y), b.max_x.max(p.x), b.max_y.max(p.y))
    }))
}
