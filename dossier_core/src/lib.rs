//! # dossier_core - Building Dossier Engine
//!
//! `dossier_core` turns a handful of coarse building parameters into the
//! technical content of an illustrative dossier: a rectangular floor plan,
//! an extruded massing model and indicative structural sizing.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions or immutable builders, one call per request
//! - **JSON-First**: All inputs and outputs implement Serialize/Deserialize
//! - **Rich Errors**: Invalid dimensions and parameters come back as typed errors
//!   instead of NaN or degenerate geometry
//!
//! ## Quick Start
//!
//! ```rust
//! use dossier_core::parameters::BuildingParameters;
//! use dossier_core::plan::generate_rectangular_plan;
//! use dossier_core::structural::{estimate, EstimatorConfig};
//! use dossier_core::volume::VolumeBuilder;
//!
//! let params = BuildingParameters::from_floor_area(120.0);
//!
//! let plan = generate_rectangular_plan(params.length, params.width, params.wall_thickness).unwrap();
//! let model = VolumeBuilder::new().generate_building(&params).unwrap();
//! let report = estimate(&params.structural_input(), &EstimatorConfig::default()).unwrap();
//!
//! assert_eq!(plan.walls.len(), 4);
//! assert_eq!(model.faces.len(), 4);
//! assert_eq!(report.slab.min_thickness, 5.0 / 30.0);
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Points, edges and the shared rectangle outline
//! - [`plan`] - 2D wall outlines and dimension annotations
//! - [`volume`] - 3D massing model
//! - [`structural`] - Slab, beam, load and foundation estimates
//! - [`dxf`] - ASCII DXF export of plans and models
//! - [`parameters`] - Building parameter record
//! - [`settings`] - Configuration loading
//! - [`errors`] - Structured error types

pub mod dxf;
pub mod errors;
pub mod geometry;
pub mod parameters;
pub mod plan;
pub mod settings;
pub mod structural;
pub mod volume;

// Re-export commonly used types at crate root for convenience
pub use errors::{DossierError, DossierResult};
pub use parameters::BuildingParameters;
pub use plan::{generate_rectangular_plan, PlanDocument};
pub use settings::{load_settings, DossierSettings};
pub use structural::{estimate, EstimatorConfig, StructuralInput, StructuralReport};
pub use volume::{ModelDocument, VolumeBuilder};
