//! # Plan Builder
//!
//! Turns a rectangular footprint into thick wall outlines plus two linear
//! dimension annotations.
//!
//! ## Wall construction
//!
//! For an edge from `start` to `end` with thickness `t`:
//!
//! 1. `d = (end - start) / |end - start|` (skip the edge if `|end - start| = 0`)
//! 2. `n = (-d.y, d.x)`, the direction rotated 90° counterclockwise
//! 3. corners `p1 = start + n·t/2`, `p2 = end + n·t/2`, `p3 = end - n·t/2`,
//!    `p4 = start - n·t/2`
//!
//! The wall is centered on the edge, so the outlines of a closed footprint
//! extend `t/2` beyond it on every side.
//!
//! ## Example
//!
//! ```rust
//! use dossier_core::plan::generate_rectangular_plan;
//!
//! let plan = generate_rectangular_plan(10.0, 8.0, 0.2).unwrap();
//! assert_eq!(plan.walls.len(), 4);
//! assert_eq!(plan.dimensions.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::{require_positive_dimension, DossierResult};
use crate::geometry::{rectangle_outline, BoundingBox2D, Edge, Point2D};

/// Distance between the footprint and its dimension baselines, in meters.
pub const DIMENSION_OFFSET: f64 = 2.0;

/// A wall of constant thickness laid along a plan edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub start: Point2D,
    pub end: Point2D,
    pub thickness: f64,
    /// Footprint corners `p1..p4`, see the module docs for their placement
    pub corners: [Point2D; 4],
}

impl WallSegment {
    /// Build a wall along `start -> end`.
    ///
    /// Returns `None` when the two points coincide.
    pub fn new(start: Point2D, end: Point2D, thickness: f64) -> Option<Self> {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let length = dx.hypot(dy);
        if length == 0.0 {
            return None;
        }

        let (ux, uy) = (dx / length, dy / length);
        let (nx, ny) = (-uy, ux);
        let half = thickness / 2.0;

        let corners = [
            start.offset(nx, ny, half),
            end.offset(nx, ny, half),
            end.offset(nx, ny, -half),
            start.offset(nx, ny, -half),
        ];

        Some(WallSegment {
            start,
            end,
            thickness,
            corners,
        })
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Unit vector from start to end.
    pub fn direction(&self) -> (f64, f64) {
        let length = self.length();
        ((self.end.x - self.start.x) / length, (self.end.y - self.start.y) / length)
    }

    /// Unit normal, the direction rotated 90° counterclockwise.
    pub fn perpendicular(&self) -> (f64, f64) {
        let (ux, uy) = self.direction();
        (-uy, ux)
    }

    /// Closed outline `p1, p2, p3, p4, p1`, as drawn by a polyline.
    pub fn outline(&self) -> [Point2D; 5] {
        let [p1, p2, p3, p4] = self.corners;
        [p1, p2, p3, p4, p1]
    }
}

/// A linear dimension: two reference points measured along a baseline
/// passing through `base`.
///
/// Only geometry is stored. The displayed number is a rendering concern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionAnnotation {
    pub base: Point2D,
    pub p1: Point2D,
    pub p2: Point2D,
}

impl DimensionAnnotation {
    /// True when the measured points share a y coordinate.
    pub fn is_horizontal(&self) -> bool {
        self.p1.y == self.p2.y
    }

    /// Distance between the reference points projected on the baseline.
    pub fn measurement(&self) -> f64 {
        if self.is_horizontal() {
            (self.p2.x - self.p1.x).abs()
        } else {
            (self.p2.y - self.p1.y).abs()
        }
    }
}

/// Output of the plan builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    /// Walls in input order (bottom, right, top, left for a rectangle)
    pub walls: Vec<WallSegment>,
    pub dimensions: Vec<DimensionAnnotation>,
    /// Number of zero-length edges that produced no wall
    pub skipped_segments: usize,
}

impl PlanDocument {
    /// Add a wall along `start -> end`, returning false if it was skipped.
    pub fn add_wall(&mut self, start: Point2D, end: Point2D, thickness: f64) -> bool {
        match WallSegment::new(start, end, thickness) {
            Some(wall) => {
                self.walls.push(wall);
                true
            }
            None => {
                debug!(x = start.x, y = start.y, "skipping zero-length wall segment");
                self.skipped_segments += 1;
                false
            }
        }
    }

    /// Extent of every wall corner, or `None` for a plan without walls.
    pub fn bounding_box(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(self.walls.iter().flat_map(|w| w.corners.iter()))
    }
}

/// Generate walls and dimensions for a `length x width` rectangular plan.
///
/// # Errors
///
/// `InvalidDimension` if any argument is not strictly positive.
#[instrument(level = "debug")]
pub fn generate_rectangular_plan(length: f64, width: f64, wall_thickness: f64) -> DossierResult<PlanDocument> {
    require_positive_dimension("length", length)?;
    require_positive_dimension("width", width)?;
    require_positive_dimension("wall_thickness", wall_thickness)?;

    let mut plan = plan_from_edges(&rectangle_outline(length, width), wall_thickness)?;
    plan.dimensions = footprint_dimensions(length, width);

    debug!(walls = plan.walls.len(), "rectangular plan generated");
    Ok(plan)
}

/// Build one wall per edge, skipping and counting zero-length edges.
///
/// No dimension annotations are produced; those belong to a known footprint.
///
/// # Errors
///
/// `InvalidDimension` if `wall_thickness` is not strictly positive.
pub fn plan_from_edges(edges: &[Edge], wall_thickness: f64) -> DossierResult<PlanDocument> {
    require_positive_dimension("wall_thickness", wall_thickness)?;

    let mut plan = PlanDocument::default();
    for edge in edges {
        plan.add_wall(edge.start, edge.end, wall_thickness);
    }
    Ok(plan)
}

/// Horizontal dimension below the footprint, vertical one to its left.
fn footprint_dimensions(length: f64, width: f64) -> Vec<DimensionAnnotation> {
    let origin = Point2D::new(0.0, 0.0);
    vec![
        DimensionAnnotation {
            base: Point2D::new(0.0, -DIMENSION_OFFSET),
            p1: origin,
            p2: Point2D::new(length, 0.0),
        },
        DimensionAnnotation {
            base: Point2D::new(-DIMENSION_OFFSET, 0.0),
            p1: origin,
            p2: Point2D::new(0.0, width),
        },
    ]
}
