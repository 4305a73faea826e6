use fuzzycloud_features::{Bandwidth, DistanceMeasure};
use serde::{Deserialize, Serialize};

use crate::error::DownsampleError;

/// Importance a point must exceed to be kept.
pub const DEFAULT_IMPORTANCE_THRESHOLD: f64 = 0.8;

/// Parameters for [`fuzzy_downsample`](crate::fuzzy_downsample).
///
/// Every field has a default, so a TOML document only needs the keys it
/// overrides:
///
/// ```toml
/// importance_threshold = 0.5
/// bandwidth = "silverman"
/// distance = { reference = [0.0, 0.0, 1.5] }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FuzzyDownsampleParams {
    pub importance_threshold: f64,
    pub bandwidth: Bandwidth,
    pub distance: DistanceMeasure,
}

impl Default for FuzzyDownsampleParams {
    fn default() -> Self {
        Self {
            importance_threshold: DEFAULT_IMPORTANCE_THRESHOLD,
            bandwidth: Bandwidth::Scott,
            distance: DistanceMeasure::NearestNeighbor,
        }
    }
}

impl FuzzyDownsampleParams {
    /// Parse and validate parameters from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, DownsampleError> {
        let params: Self = toml::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), DownsampleError> {
        validate_threshold(self.importance_threshold)?;
        if let Bandwidth::Factor(f) = self.bandwidth {
            if !f.is_finite() || f <= 0.0 {
                return Err(fuzzycloud_features::FeatureError::InvalidBandwidth(f).into());
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<(), DownsampleError> {
    if threshold > 0.0 && threshold <= 1.0 {
        Ok(())
    } else {
        Err(DownsampleError::InvalidThreshold(threshold))
    }
}
