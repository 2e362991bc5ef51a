//! # Building Parameters
//!
//! The coarse description of a building that the builders and the estimator
//! consume. How the record gets filled (text extraction, a form, a file) is up
//! to the caller; missing fields fall back to the defaults below.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "length": 12.0,
//!   "width": 10.0,
//!   "floors": 2,
//!   "wall_thickness": 0.25,
//!   "surface": 120.0,
//!   "span": 6.0,
//!   "concrete_strength": 25.0,
//!   "steel_yield_strength": 500.0
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::round_to;
use crate::structural::StructuralInput;

/// Length-to-width ratio assumed when only a floor area is known
const ASSUMED_ASPECT_RATIO: f64 = 1.2;

/// Smallest derived footprint side, the rounding step of 0.1 m
const MIN_DERIVED_SIDE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingParameters {
    /// Footprint length in meters
    pub length: f64,
    /// Footprint width in meters
    pub width: f64,
    /// Number of storeys (at least one)
    pub floors: u32,
    /// Wall thickness in meters
    pub wall_thickness: f64,
    /// Floor surface in m²
    pub surface: f64,
    /// Typical span in meters
    pub span: f64,
    /// Concrete compressive strength in MPa
    pub concrete_strength: f64,
    /// Reinforcement yield strength in MPa
    pub steel_yield_strength: f64,
}

impl Default for BuildingParameters {
    fn default() -> Self {
        BuildingParameters {
            length: 10.0,
            width: 8.0,
            floors: 1,
            wall_thickness: 0.2,
            surface: 80.0,
            span: 5.0,
            concrete_strength: 25.0,
            steel_yield_strength: 500.0,
        }
    }
}

impl BuildingParameters {
    /// Derive a footprint from a floor area alone.
    ///
    /// `length = sqrt(1.2 · surface)` and `width = surface / length`, each
    /// rounded to 0.1 m and never below 0.1 m, so tiny surfaces still give
    /// a valid footprint. Non-positive surfaces are passed through unchanged
    /// so that validation downstream reports them.
    ///
    /// ```rust
    /// use dossier_core::parameters::BuildingParameters;
    ///
    /// let params = BuildingParameters::from_floor_area(120.0);
    /// assert_eq!(params.length, 12.0);
    /// assert_eq!(params.width, 10.0);
    /// ```
    pub fn from_floor_area(surface: f64) -> Self {
        let mut params = BuildingParameters {
            surface,
            ..Default::default()
        };
        if surface > 0.0 {
            params.length = round_to((surface * ASSUMED_ASPECT_RATIO).sqrt(), 1).max(MIN_DERIVED_SIDE);
            params.width = round_to(surface / params.length, 1).max(MIN_DERIVED_SIDE);
        }
        params
    }

    /// The subset the structural estimator needs.
    pub fn structural_input(&self) -> StructuralInput {
        StructuralInput {
            surface: self.surface,
            floors: self.floors,
            span: self.span,
            concrete_strength: self.concrete_strength,
            steel_yield_strength: self.steel_yield_strength,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = BuildingParameters::default();
        assert_eq!(params.floors, 1);
        assert_eq!(params.wall_thickness, 0.2);
        assert_eq!(params.span, 5.0);
    }

    #[test]
    fn test_from_floor_area() {
        // sqrt(96) = 9.798 -> 9.8, 80 / 9.8 = 8.16 -> 8.2
        let params = BuildingParameters::from_floor_area(80.0);
        assert_eq!(params.length, 9.8);
        assert_eq!(params.width, 8.2);
        assert_eq!(params.surface, 80.0);
    }

    #[test]
    fn test_from_tiny_area() {
        // sqrt(0.0012) rounds to 0.0; the side is held at 0.1 m
        let params = BuildingParameters::from_floor_area(0.001);
        assert_eq!(params.length, 0.1);
        assert_eq!(params.width, 0.1);
        assert!(params.width.is_finite());
        assert!(crate::plan::generate_rectangular_plan(params.length, params.width, 0.01).is_ok());
    }

    #[test]
    fn test_from_non_positive_area() {
        let params = BuildingParameters::from_floor_area(0.0);
        assert_eq!(params.surface, 0.0);
        assert_eq!(params.length, 10.0);
    }

    #[test]
    fn test_partial_json() {
        let params: BuildingParameters = serde_json::from_str(r#"{ "floors": 3, "surface": 150.0 }"#).unwrap();
        assert_eq!(params.floors, 3);
        assert_eq!(params.surface, 150.0);
        assert_eq!(params.length, 10.0);
    }

    #[test]
    fn test_structural_input() {
        let params = BuildingParameters {
            surface: 120.0,
            floors: 2,
            span: 6.0,
            ..Default::default()
        };
        let input = params.structural_input();
        assert_eq!(input.surface, 120.0);
        assert_eq!(input.floors, 2);
        assert_eq!(input.span, 6.0);
        assert_eq!(input.concrete_strength, 25.0);
    }
}
