//! # Settings
//!
//! Immutable configuration for the builders and the estimator, loadable from
//! a JSON file. Every field has a default, so a file only needs the values it
//! overrides:
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "massing": { "floor_height": 2.8 },
//!   "estimator": { "soil_bearing_capacity": 150.0 }
//! }
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{require_positive_dimension, DossierError, DossierResult};
use crate::structural::EstimatorConfig;

/// Current schema version for settings files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Massing model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MassingSettings {
    /// Storey height in meters
    pub floor_height: f64,
}

impl Default for MassingSettings {
    fn default() -> Self {
        MassingSettings { floor_height: 3.0 }
    }
}

/// Root settings container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DossierSettings {
    /// Schema version (for compatibility checks)
    pub version: String,
    pub massing: MassingSettings,
    pub estimator: EstimatorConfig,
}

impl Default for DossierSettings {
    fn default() -> Self {
        DossierSettings {
            version: SCHEMA_VERSION.to_string(),
            massing: MassingSettings::default(),
            estimator: EstimatorConfig::default(),
        }
    }
}

impl DossierSettings {
    /// Check every value the builders and estimator divide or multiply by.
    pub fn validate(&self) -> DossierResult<()> {
        require_positive_dimension("massing.floor_height", self.massing.floor_height)?;
        self.estimator.validate()
    }
}

/// Parse settings from a JSON string, then validate version and values.
pub fn parse_settings(json: &str) -> DossierResult<DossierSettings> {
    let settings: DossierSettings = serde_json::from_str(json).map_err(|e| DossierError::SerializationError {
        reason: format!("Invalid settings JSON: {}", e),
    })?;
    validate_version(&settings.version)?;
    settings.validate()?;
    Ok(settings)
}

/// Load settings from a JSON file.
///
/// # Returns
///
/// * `Ok(DossierSettings)` - Successfully loaded and validated
/// * `Err(DossierError::FileError)` - I/O error
/// * `Err(DossierError::SerializationError)` - Invalid JSON
/// * `Err(DossierError::VersionMismatch)` - Incompatible schema version
/// * `Err(DossierError::InvalidDimension | InvalidParameter)` - Bad values
pub fn load_settings(path: &Path) -> DossierResult<DossierSettings> {
    let mut file = File::open(path)
        .map_err(|e| DossierError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| DossierError::file_error("read", path.display().to_string(), e.to_string()))?;

    let settings = parse_settings(&contents)?;
    debug!(path = %path.display(), "settings loaded");
    Ok(settings)
}

/// Major version must match; for 0.x the file's minor may not be newer.
fn validate_version(file_version: &str) -> DossierResult<()> {
    let mismatch = || DossierError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    if file_parts.is_empty() || file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    if current_parts[0] == 0 && file_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}
