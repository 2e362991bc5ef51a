//! # Geometry Primitives
//!
//! Plain value types shared by the plan and volume builders, plus the
//! rectangle math both of them use. Coordinates are meters; `z = 0` is the
//! ground plane.
//!
//! ```text
//!  (0,W) ────── top ────── (L,W)
//!    │                       │
//!  left                    right
//!    │                       │
//!  (0,0) ───── bottom ───── (L,0)
//! ```
//!
//! Edges always come out in the order bottom, right, top, left, walking the
//! footprint counterclockwise.

use serde::{Deserialize, Serialize};

/// A point in the plan, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Point2D { x, y }
    }

    /// Lift onto a horizontal plane at height `z`.
    pub fn at_height(self, z: f64) -> Point3D {
        Point3D::new(self.x, self.y, z)
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Translate by `(dx, dy) * scale`.
    pub fn offset(self, dx: f64, dy: f64, scale: f64) -> Point2D {
        Point2D::new(self.x + dx * scale, self.y + dy * scale)
    }
}

/// A point in the massing model, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Point3D { x, y, z }
    }
}

/// A directed straight edge between two plan points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub start: Point2D,
    pub end: Point2D,
}

impl Edge {
    pub const fn new(start: Point2D, end: Point2D) -> Self {
        Edge { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// True when start and end coincide, i.e. no wall can be built along it.
    pub fn is_degenerate(&self) -> bool {
        self.length() == 0.0
    }
}

/// Axis-aligned extent of a set of plan points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2D {
    pub min: Point2D,
    pub max: Point2D,
}

impl BoundingBox2D {
    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2D>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| {
            (
                Point2D::new(min.x.min(p.x), min.y.min(p.y)),
                Point2D::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(BoundingBox2D { min, max })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// The four outer edges of a `length x width` footprint anchored at the origin.
///
/// Dimensions are not validated here; callers check them first.
pub fn rectangle_outline(length: f64, width: f64) -> [Edge; 4] {
    let corners = [
        Point2D::new(0.0, 0.0),
        Point2D::new(length, 0.0),
        Point2D::new(length, width),
        Point2D::new(0.0, width),
    ];
    closed_edges(corners)
}

/// The rectangle obtained by moving each outer edge inward by `offset`.
///
/// Returns `None` when the offset meets or crosses the opposite side, so the
/// inset would have zero or negative extent.
pub fn inset_outline(length: f64, width: f64, offset: f64) -> Option<[Edge; 4]> {
    let inner_length = length - 2.0 * offset;
    let inner_width = width - 2.0 * offset;
    if !(inner_length > 0.0 && inner_width > 0.0) {
        return None;
    }
    let corners = [
        Point2D::new(offset, offset),
        Point2D::new(length - offset, offset),
        Point2D::new(length - offset, width - offset),
        Point2D::new(offset, width - offset),
    ];
    Some(closed_edges(corners))
}

fn closed_edges(corners: [Point2D; 4]) -> [Edge; 4] {
    std::array::from_fn(|i| Edge::new(corners[i], corners[(i + 1) % 4]))
}

/// Round to `decimals` places, the way report values are presented.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangle_outline_order() {
        let edges = rectangle_outline(10.0, 8.0);
        assert_eq!(edges[0].start, Point2D::new(0.0, 0.0));
        assert_eq!(edges[0].end, Point2D::new(10.0, 0.0));
        assert_eq!(edges[1].end, Point2D::new(10.0, 8.0));
        assert_eq!(edges[2].end, Point2D::new(0.0, 8.0));
        assert_eq!(edges[3].end, Point2D::new(0.0, 0.0));

        // Closed: each edge starts where the previous one ended
        for i in 0..4 {
            assert_eq!(edges[i].end, edges[(i + 1) % 4].start);
        }
    }

    #[test]
    fn test_rectangle_perimeter() {
        let perimeter: f64 = rectangle_outline(12.0, 10.0).iter().map(Edge::length).sum();
        assert_relative_eq!(perimeter, 44.0);
    }

    #[test]
    fn test_inset_outline() {
        let inner = inset_outline(12.0, 10.0, 0.25).unwrap();
        assert_eq!(inner[0].start, Point2D::new(0.25, 0.25));
        assert_eq!(inner[1].end, Point2D::new(11.75, 9.75));
        assert_relative_eq!(inner[0].length(), 11.5);
        assert_relative_eq!(inner[1].length(), 9.5);
    }

    #[test]
    fn test_inset_outline_consumed() {
        assert!(inset_outline(1.0, 8.0, 0.5).is_none());
        assert!(inset_outline(1.0, 8.0, 0.6).is_none());
    }

    #[test]
    fn test_degenerate_edge() {
        let p = Point2D::new(3.0, 4.0);
        assert!(Edge::new(p, p).is_degenerate());
        assert!(!Edge::new(Point2D::default(), p).is_degenerate());
        assert_relative_eq!(Edge::new(Point2D::default(), p).length(), 5.0);
    }

    #[test]
    fn test_bounding_box() {
        let points = [Point2D::new(-1.0, 2.0), Point2D::new(3.0, -4.0), Point2D::new(0.5, 0.5)];
        let bbox = BoundingBox2D::from_points(&points).unwrap();
        assert_eq!(bbox.min, Point2D::new(-1.0, -4.0));
        assert_eq!(bbox.max, Point2D::new(3.0, 2.0));
        assert_relative_eq!(bbox.width(), 4.0);
        assert_relative_eq!(bbox.height(), 6.0);

        let empty: [Point2D; 0] = [];
        assert!(BoundingBox2D::from_points(&empty).is_none());
    }

    #[test]
    fn test_round_to() {
        assert_relative_eq!(round_to(2.190_89, 2), 2.19);
        assert_relative_eq!(round_to(0.719_089, 2), 0.72);
        assert_relative_eq!(round_to(10.954, 1), 11.0);
    }
}
