//! # Structural Estimator
//!
//! Indicative sizing from elementary rules of thumb. Results are illustrative
//! and carry a disclaimer; they are not a code check.
//!
//! ## Formulas
//!
//! | Quantity | Rule |
//! |---|---|
//! | Slab thickness | `max(0.12, span / 30)` m |
//! | Beam height | `span / 12`, width `height / 2`, both to 0.01 m |
//! | Load per floor | `surface x (G + Q)`, G = 2.5 kN/m², Q = 1.5 kN/m² |
//! | Total load | `load per floor x floors` |
//! | Footing area | `total load / soil bearing capacity` (200 kN/m²) |
//! | Footing side | `sqrt(area)` |
//! | Footing depth | `0.5 + side / 10` |
//!
//! Foundation values are rounded to 0.01; the depth uses the unrounded side.
//!
//! ## Example
//!
//! ```rust
//! use dossier_core::structural::{estimate, EstimatorConfig, StructuralInput};
//!
//! let input = StructuralInput {
//!     surface: 120.0,
//!     floors: 2,
//!     span: 6.0,
//!     ..Default::default()
//! };
//!
//! let report = estimate(&input, &EstimatorConfig::default()).unwrap();
//! assert_eq!(report.loads.total_load_building, 960.0);
//! assert_eq!(report.beam.height, 0.5);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::{require_positive_dimension, require_positive_parameter, DossierError, DossierResult};
use crate::geometry::round_to;

/// Design families cited in the compliance section
pub const REFERENCED_STANDARDS: [&str; 2] = [
    "Simplified calculations based on Eurocode",
    "Simplified calculations based on BAEL",
];

/// Disclaimer attached to every report
pub const DISCLAIMER: &str =
    "These calculations are indicative only and must be validated by a qualified structural engineer";

/// Fixed constants of the sizing rules.
///
/// Built once and shared by reference; nothing here changes during a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Permanent load G in kN/m²
    pub dead_load: f64,
    /// Imposed (residential) load Q in kN/m²
    pub live_load: f64,
    /// Allowable soil pressure in kN/m²
    pub soil_bearing_capacity: f64,
    /// Lower bound on slab thickness in meters
    pub min_slab_thickness: f64,
    /// Span-to-thickness ratio for continuous slabs
    pub slab_span_ratio: f64,
    /// Span-to-depth ratio for beams
    pub beam_span_ratio: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            dead_load: 2.5,
            live_load: 1.5,
            soil_bearing_capacity: 200.0,
            min_slab_thickness: 0.12,
            slab_span_ratio: 30.0,
            beam_span_ratio: 12.0,
        }
    }
}

impl EstimatorConfig {
    pub fn validate(&self) -> DossierResult<()> {
        require_positive_parameter("dead_load", self.dead_load)?;
        require_positive_parameter("live_load", self.live_load)?;
        require_positive_parameter("soil_bearing_capacity", self.soil_bearing_capacity)?;
        require_positive_parameter("min_slab_thickness", self.min_slab_thickness)?;
        require_positive_parameter("slab_span_ratio", self.slab_span_ratio)?;
        require_positive_parameter("beam_span_ratio", self.beam_span_ratio)?;
        Ok(())
    }

    /// Combined service load G + Q in kN/m².
    pub fn service_load(&self) -> f64 {
        self.dead_load + self.live_load
    }
}

/// Per-call inputs of the estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralInput {
    /// Floor surface in m²
    pub surface: f64,
    /// Number of storeys
    pub floors: u32,
    /// Typical span in meters
    pub span: f64,
    /// Concrete compressive strength in MPa
    pub concrete_strength: f64,
    /// Reinforcement yield strength in MPa
    pub steel_yield_strength: f64,
}

impl Default for StructuralInput {
    fn default() -> Self {
        StructuralInput {
            surface: 100.0,
            floors: 1,
            span: 5.0,
            concrete_strength: 25.0,
            steel_yield_strength: 500.0,
        }
    }
}

impl StructuralInput {
    pub fn validate(&self) -> DossierResult<()> {
        require_positive_dimension("surface", self.surface)?;
        require_positive_dimension("span", self.span)?;
        if self.floors == 0 {
            return Err(DossierError::invalid_parameter(
                "floors",
                "0",
                "A building needs at least one floor",
            ));
        }
        require_positive_parameter("concrete_strength", self.concrete_strength)?;
        require_positive_parameter("steel_yield_strength", self.steel_yield_strength)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSummary {
    /// kN/m²
    pub dead_load: f64,
    /// kN/m²
    pub live_load: f64,
    /// kN
    pub total_load_per_floor: f64,
    /// kN
    pub total_load_building: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabSizing {
    /// meters
    pub min_thickness: f64,
    pub recommendation_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSizing {
    pub height: f64,
    pub width: f64,
    pub span: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoundationSizing {
    /// m²
    pub area: f64,
    /// meters
    pub side: f64,
    /// meters
    pub depth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSummary {
    /// MPa
    pub concrete_strength: f64,
    /// MPa
    pub steel_yield_strength: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceNotes {
    pub referenced_standards: Vec<String>,
    pub disclaimer: String,
}

impl Default for ComplianceNotes {
    fn default() -> Self {
        ComplianceNotes {
            referenced_standards: REFERENCED_STANDARDS.iter().map(|s| s.to_string()).collect(),
            disclaimer: DISCLAIMER.to_string(),
        }
    }
}

/// Full estimator output. Key names are what downstream documents expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralReport {
    pub loads: LoadSummary,
    pub slab: SlabSizing,
    pub beam: BeamSizing,
    pub foundation: FoundationSizing,
    pub materials: MaterialSummary,
    pub compliance: ComplianceNotes,
}

/// Minimum slab thickness `max(min_thickness, span / ratio)`.
///
/// Total over any span, including zero or negative ones; [`estimate`]
/// validates the span before calling it.
pub fn slab_thickness(span: f64, config: &EstimatorConfig) -> f64 {
    (span / config.slab_span_ratio).max(config.min_slab_thickness)
}

/// Beam section from the span-to-depth rule.
pub fn beam_dimensions(span: f64, config: &EstimatorConfig) -> BeamSizing {
    let height = span / config.beam_span_ratio;
    let width = height / 2.0;
    BeamSizing {
        height: round_to(height, 2),
        width: round_to(width, 2),
        span,
    }
}

/// Service load of one floor in kN.
pub fn load_per_floor(surface: f64, config: &EstimatorConfig) -> f64 {
    surface * config.service_load()
}

/// Service load of the whole building in kN.
pub fn total_load(surface: f64, floors: u32, config: &EstimatorConfig) -> f64 {
    load_per_floor(surface, config) * f64::from(floors)
}

/// Square spread footing carrying `total_load` kN.
///
/// # Errors
///
/// - `InvalidParameter` if `soil_bearing_capacity` is not strictly positive
/// - `InvalidParameter` if `total_load` is negative or not finite
pub fn foundation_size(total_load: f64, soil_bearing_capacity: f64) -> DossierResult<FoundationSizing> {
    require_positive_parameter("soil_bearing_capacity", soil_bearing_capacity)?;
    if !(total_load >= 0.0) || !total_load.is_finite() {
        return Err(DossierError::invalid_parameter(
            "total_load",
            total_load.to_string(),
            "Load must be finite and non-negative",
        ));
    }

    let area = total_load / soil_bearing_capacity;
    let side = area.sqrt();
    Ok(FoundationSizing {
        area: round_to(area, 2),
        side: round_to(side, 2),
        depth: round_to(0.5 + side / 10.0, 2),
    })
}

/// Run every sizing rule and assemble the report.
///
/// # Errors
///
/// - `InvalidDimension` for a non-positive surface or span
/// - `InvalidParameter` for zero floors, non-positive material strengths or
///   an invalid `config`
#[instrument(level = "debug", skip(config))]
pub fn estimate(input: &StructuralInput, config: &EstimatorConfig) -> DossierResult<StructuralReport> {
    input.validate()?;
    config.validate()?;

    let per_floor = load_per_floor(input.surface, config);
    let building = total_load(input.surface, input.floors, config);
    let thickness = slab_thickness(input.span, config);
    let beam = beam_dimensions(input.span, config);
    let foundation = foundation_size(building, config.soil_bearing_capacity)?;

    debug!(total_load = building, slab = thickness, "structural estimate complete");

    Ok(StructuralReport {
        loads: LoadSummary {
            dead_load: config.dead_load,
            live_load: config.live_load,
            total_load_per_floor: per_floor,
            total_load_building: building,
        },
        slab: SlabSizing {
            min_thickness: thickness,
            recommendation_text: format!("Slab of {:.0}cm minimum thickness", thickness * 100.0),
        },
        beam,
        foundation,
        materials: MaterialSummary {
            concrete_strength: input.concrete_strength,
            steel_yield_strength: input.steel_yield_strength,
        },
        compliance: ComplianceNotes::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn config() -> EstimatorConfig {
        EstimatorConfig::default()
    }

    #[test]
    fn test_slab_thickness() {
        assert_relative_eq!(slab_thickness(3.0, &config()), 0.12);
        assert_relative_eq!(slab_thickness(6.0, &config()), 0.2);
        assert_relative_eq!(slab_thickness(9.0, &config()), 0.3);
    }

    #[test]
    fn test_slab_thickness_floor() {
        // The minimum holds however small the span gets
        assert_eq!(slab_thickness(0.0, &config()), 0.12);
        assert_eq!(slab_thickness(1e-9, &config()), 0.12);
        assert_eq!(slab_thickness(-4.0, &config()), 0.12);
    }

    #[test]
    fn test_beam_dimensions() {
        let beam = beam_dimensions(6.0, &config());
        assert_eq!(beam.height, 0.5);
        assert_eq!(beam.width, 0.25);
        assert_eq!(beam.span, 6.0);

        // 5 / 12 = 0.4167 -> 0.42, 0.2083 -> 0.21
        let beam = beam_dimensions(5.0, &config());
        assert_eq!(beam.height, 0.42);
        assert_eq!(beam.width, 0.21);
    }

    #[test]
    fn test_total_load() {
        assert_relative_eq!(load_per_floor(120.0, &config()), 480.0);
        assert_relative_eq!(total_load(120.0, 2, &config()), 960.0);
    }

    #[test]
    fn test_foundation_size() {
        let footing = foundation_size(960.0, 200.0).unwrap();
        assert_abs_diff_eq!(footing.area, 4.8);
        assert_abs_diff_eq!(footing.side, 2.19);
        assert_abs_diff_eq!(footing.depth, 0.72);
    }

    #[test]
    fn test_foundation_zero_bearing() {
        let err = foundation_size(960.0, 0.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
        assert!(foundation_size(f64::NAN, 200.0).is_err());
        assert!(foundation_size(-1.0, 200.0).is_err());
    }

    #[test]
    fn test_full_report() {
        let input = StructuralInput {
            surface: 120.0,
            floors: 2,
            span: 6.0,
            ..Default::default()
        };
        let report = estimate(&input, &config()).unwrap();

        assert_eq!(report.loads.dead_load, 2.5);
        assert_eq!(report.loads.live_load, 1.5);
        assert_relative_eq!(report.loads.total_load_per_floor, 480.0);
        assert_relative_eq!(report.loads.total_load_building, 960.0);
        assert_relative_eq!(report.slab.min_thickness, 0.2);
        assert_eq!(report.slab.recommendation_text, "Slab of 20cm minimum thickness");
        assert_eq!(report.beam.height, 0.5);
        assert_abs_diff_eq!(report.foundation.depth, 0.72);
        assert_eq!(report.materials.concrete_strength, 25.0);
        assert_eq!(report.compliance.referenced_standards.len(), 2);
        assert!(report.compliance.disclaimer.contains("indicative"));
    }

    #[test]
    fn test_report_json_keys() {
        let report = estimate(&StructuralInput::default(), &config()).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        assert!(value["loads"]["totalLoadPerFloor"].is_number());
        assert!(value["loads"]["totalLoadBuilding"].is_number());
        assert!(value["slab"]["minThickness"].is_number());
        assert!(value["slab"]["recommendationText"].is_string());
        assert!(value["beam"]["height"].is_number());
        assert!(value["foundation"]["side"].is_number());
        assert!(value["materials"]["steelYieldStrength"].is_number());
        assert!(value["compliance"]["referencedStandards"].is_array());
        assert!(value["compliance"]["disclaimer"].is_string());
    }

    #[test]
    fn test_invalid_inputs() {
        let zero_span = StructuralInput {
            span: 0.0,
            ..Default::default()
        };
        assert_eq!(estimate(&zero_span, &config()).unwrap_err().error_code(), "INVALID_DIMENSION");

        let zero_floors = StructuralInput {
            floors: 0,
            ..Default::default()
        };
        assert_eq!(estimate(&zero_floors, &config()).unwrap_err().error_code(), "INVALID_PARAMETER");

        let negative_surface = StructuralInput {
            surface: -10.0,
            ..Default::default()
        };
        assert_eq!(
            estimate(&negative_surface, &config()).unwrap_err().error_code(),
            "INVALID_DIMENSION"
        );

        let bad_soil = EstimatorConfig {
            soil_bearing_capacity: 0.0,
            ..Default::default()
        };
        assert_eq!(
            estimate(&StructuralInput::default(), &bad_soil).unwrap_err().error_code(),
            "INVALID_PARAMETER"
        );
    }

    #[test]
    fn test_custom_soil_bearing() {
        let soft_soil = EstimatorConfig {
            soil_bearing_capacity: 100.0,
            ..Default::default()
        };
        let input = StructuralInput {
            surface: 120.0,
            floors: 2,
            span: 6.0,
            ..Default::default()
        };
        let report = estimate(&input, &soft_soil).unwrap();
        assert_abs_diff_eq!(report.foundation.area, 9.6);
    }
}
