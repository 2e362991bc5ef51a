//! # Volume Builder
//!
//! Extrudes the footprint outline into an open-topped shell: one vertical
//! quadrilateral per outer edge, from the ground to `floors x floor_height`.
//!
//! ## Assumptions
//!
//! - Faces have no thickness; wall thickness only shapes the 2D plan and the
//!   interior outline marker.
//! - Interior walls, floor slabs between stories and the roof are not
//!   modeled. Floor count only scales the height.
//!
//! ## Example
//!
//! ```rust
//! use dossier_core::parameters::BuildingParameters;
//! use dossier_core::volume::VolumeBuilder;
//!
//! let params = BuildingParameters {
//!     length: 12.0,
//!     width: 10.0,
//!     floors: 2,
//!     wall_thickness: 0.25,
//!     ..Default::default()
//! };
//!
//! let model = VolumeBuilder::new().generate_building(&params).unwrap();
//! assert_eq!(model.faces.len(), 4);
//! assert_eq!(model.total_height, 6.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::errors::{require_positive_dimension, DossierError, DossierResult};
use crate::geometry::{inset_outline, rectangle_outline, Edge, Point2D, Point3D};
use crate::parameters::BuildingParameters;
use crate::settings::MassingSettings;

/// A vertical wall face: `[start_ground, end_ground, end_top, start_top]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallFace3D {
    pub vertices: [Point3D; 4],
}

impl WallFace3D {
    /// Extrude a plan edge from `z = 0` up to `height`.
    pub fn from_edge(edge: &Edge, height: f64) -> Self {
        WallFace3D {
            vertices: [
                edge.start.at_height(0.0),
                edge.end.at_height(0.0),
                edge.end.at_height(height),
                edge.start.at_height(height),
            ],
        }
    }

    pub fn bottom_z(&self) -> f64 {
        self.vertices[0].z.min(self.vertices[1].z)
    }

    pub fn top_z(&self) -> f64 {
        self.vertices[2].z.max(self.vertices[3].z)
    }
}

/// Output of the volume builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    /// One face per outer edge (bottom, right, top, left)
    pub faces: Vec<WallFace3D>,
    /// `floors x floor_height`, in meters
    pub total_height: f64,
    /// Inner face of the walls at ground level, closed (last point = first).
    /// `None` when the wall thickness leaves no interior.
    pub interior_outline: Option<Vec<Point2D>>,
}

/// Builds massing models at a fixed storey height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeBuilder {
    floor_height: f64,
}

impl Default for VolumeBuilder {
    fn default() -> Self {
        VolumeBuilder::from_settings(&MassingSettings::default())
    }
}

impl VolumeBuilder {
    /// Builder with the default 3.0 m storey height.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &MassingSettings) -> Self {
        VolumeBuilder {
            floor_height: settings.floor_height,
        }
    }

    /// Replace the storey height.
    pub fn with_floor_height(mut self, floor_height: f64) -> Self {
        self.floor_height = floor_height;
        self
    }

    pub fn floor_height(&self) -> f64 {
        self.floor_height
    }

    /// Extrude the rectangular footprint described by `params`.
    ///
    /// # Errors
    ///
    /// - `InvalidDimension` for a non-positive length, width, wall thickness
    ///   or storey height
    /// - `InvalidParameter` when `floors` is zero
    #[instrument(level = "debug", skip(params), fields(length = params.length, width = params.width, floors = params.floors))]
    pub fn generate_building(&self, params: &BuildingParameters) -> DossierResult<ModelDocument> {
        require_positive_dimension("length", params.length)?;
        require_positive_dimension("width", params.width)?;
        require_positive_dimension("wall_thickness", params.wall_thickness)?;
        require_positive_dimension("floor_height", self.floor_height)?;
        if params.floors == 0 {
            return Err(DossierError::invalid_parameter(
                "floors",
                "0",
                "A building needs at least one floor",
            ));
        }

        let total_height = f64::from(params.floors) * self.floor_height;

        let faces = rectangle_outline(params.length, params.width)
            .iter()
            .map(|edge| WallFace3D::from_edge(edge, total_height))
            .collect();

        let interior_outline = match inset_outline(params.length, params.width, params.wall_thickness) {
            Some(edges) => {
                let mut points: Vec<Point2D> = edges.iter().map(|e| e.start).collect();
                points.push(edges[0].start);
                Some(points)
            }
            None => {
                warn!(
                    wall_thickness = params.wall_thickness,
                    "wall thickness leaves no interior, omitting interior outline"
                );
                None
            }
        };

        Ok(ModelDocument {
            faces,
            total_height,
            interior_outline,
        })
    }
}
