//! # DXF Export
//!
//! Writes plan and model documents as ASCII DXF text for CAD viewers.
//! Only a HEADER (AC1015 version and units) and an ENTITIES section are
//! emitted. Entities carry their subclass markers so R2000+ readers can
//! type them:
//!
//! | Document entry | DXF entity |
//! |---|---|
//! | [`WallSegment`] | closed `LWPOLYLINE`, 5 vertices (last = first) |
//! | [`WallFace3D`] | `3DFACE`, 4 corners |
//! | [`DimensionAnnotation`] | linear `DIMENSION` (base point + 2 definition points) |
//!
//! Writing the text to disk is left to the caller.
//!
//! ```rust
//! use dossier_core::dxf::plan_to_dxf;
//! use dossier_core::plan::generate_rectangular_plan;
//!
//! let plan = generate_rectangular_plan(10.0, 8.0, 0.2).unwrap();
//! let dxf = plan_to_dxf(&plan);
//! assert_eq!(dxf.matches("LWPOLYLINE").count(), 4);
//! ```

use std::fmt::Write;

use crate::geometry::{Point2D, Point3D};
use crate::plan::{DimensionAnnotation, PlanDocument, WallSegment};
use crate::volume::{ModelDocument, WallFace3D};

/// AutoCAD 2000, the first release with LWPOLYLINE
const ACAD_VERSION: &str = "AC1015";

/// `$INSUNITS` code for meters
const UNITS_METERS: i32 = 6;

const DIMENSION_STYLE: &str = "STANDARD";

const WALL_LAYER: &str = "WALLS";
const DIMENSION_LAYER: &str = "DIMENSIONS";

/// Accumulates group code / value pairs.
#[derive(Default)]
struct DxfWriter {
    out: String,
    /// Dimensions written so far, for anonymous block names
    dimensions: usize,
}

impl DxfWriter {
    fn pair(&mut self, code: i32, value: impl std::fmt::Display) {
        // Writing into a String cannot fail
        let _ = write!(self.out, "{:>3}\n{}\n", code, value);
    }

    fn real(&mut self, code: i32, value: f64) {
        self.pair(code, format_real(value));
    }

    fn point2(&mut self, code: i32, p: Point2D) {
        self.real(code, p.x);
        self.real(code + 10, p.y);
    }

    fn point3(&mut self, code: i32, p: Point3D) {
        self.real(code, p.x);
        self.real(code + 10, p.y);
        self.real(code + 20, p.z);
    }

    fn header(&mut self) {
        self.pair(0, "SECTION");
        self.pair(2, "HEADER");
        self.pair(9, "$ACADVER");
        self.pair(1, ACAD_VERSION);
        self.pair(9, "$INSUNITS");
        self.pair(70, UNITS_METERS);
        self.pair(0, "ENDSEC");
        self.pair(0, "SECTION");
        self.pair(2, "ENTITIES");
    }

    fn finish(mut self) -> String {
        self.pair(0, "ENDSEC");
        self.pair(0, "EOF");
        self.out
    }

    fn wall(&mut self, wall: &WallSegment) {
        let outline = wall.outline();
        self.pair(0, "LWPOLYLINE");
        self.entity(WALL_LAYER);
        self.pair(100, "AcDbPolyline");
        self.pair(90, outline.len());
        // Closure is explicit in the vertex list, not via the closed flag
        self.pair(70, 0);
        for p in outline {
            self.point2(10, p);
        }
    }

    fn face(&mut self, face: &WallFace3D) {
        self.pair(0, "3DFACE");
        self.entity(WALL_LAYER);
        self.pair(100, "AcDbFace");
        for (i, v) in face.vertices.iter().enumerate() {
            self.point3(10 + i as i32, *v);
        }
    }

    fn dimension(&mut self, dim: &DimensionAnnotation) {
        self.dimensions += 1;
        let block = format!("*D{}", self.dimensions);
        let horizontal = dim.is_horizontal();
        let angle = if horizontal { 0.0 } else { 90.0 };
        // Text sits on the dimension line, halfway between the measured points
        let text_mid = if horizontal {
            Point2D::new((dim.p1.x + dim.p2.x) / 2.0, dim.base.y)
        } else {
            Point2D::new(dim.base.x, (dim.p1.y + dim.p2.y) / 2.0)
        };

        self.pair(0, "DIMENSION");
        self.entity(DIMENSION_LAYER);
        self.pair(100, "AcDbDimension");
        self.pair(2, block);
        self.point3(10, dim.base.at_height(0.0));
        self.point3(11, text_mid.at_height(0.0));
        // Rotated linear dimension
        self.pair(70, 0);
        self.real(42, dim.measurement());
        self.pair(3, DIMENSION_STYLE);
        self.pair(100, "AcDbAlignedDimension");
        self.point3(13, dim.p1.at_height(0.0));
        self.point3(14, dim.p2.at_height(0.0));
        self.real(50, angle);
        self.pair(100, "AcDbRotatedDimension");
    }

    /// Common entity subclass and layer.
    fn entity(&mut self, layer: &str) {
        self.pair(100, "AcDbEntity");
        self.pair(8, layer);
    }
}

/// Shortest round-trippable text, with a decimal point so readers parse a real.
fn format_real(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') || text.contains('e') || !value.is_finite() {
        text
    } else {
        format!("{}.0", text)
    }
}

/// Serialize a plan: one polyline per wall, then the dimensions.
pub fn plan_to_dxf(plan: &PlanDocument) -> String {
    let mut writer = DxfWriter::default();
    writer.header();
    for wall in &plan.walls {
        writer.wall(wall);
    }
    for dim in &plan.dimensions {
        writer.dimension(dim);
    }
    writer.finish()
}

/// Serialize a massing model: one 3D face per wall face.
pub fn model_to_dxf(model: &ModelDocument) -> String {
    let mut writer = DxfWriter::default();
    writer.header();
    for face in &model.faces {
        writer.face(face);
    }
    writer.finish()
}
