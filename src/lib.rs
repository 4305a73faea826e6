//! Importance-driven downsampling of 3D point clouds.
//!
//! Every point is described by two features, its local density (a Gaussian
//! kernel density estimate) and its distance (to its nearest neighbour, the
//! centroid or a reference point). A Mamdani fuzzy engine turns the pair into
//! a crisp importance in `[0, 1]`, and points whose importance exceeds a
//! threshold are kept.
//!
//! ```no_run
//! use fuzzycloud::{fuzzy_downsample, FuzzyDownsampleParams, PointCloud};
//!
//! let cloud = PointCloud::from_points(&[[0.0, 0.0, 0.0], [0.1, 0.2, 0.3]]);
//! let params = FuzzyDownsampleParams { importance_threshold: 0.5, ..Default::default() };
//! let kept = fuzzy_downsample(&cloud, &params)?;
//! # Ok::<(), fuzzycloud::DownsampleError>(())
//! ```

#![forbid(unsafe_code)]

pub use fuzzycloud_core::PointCloud;
pub use fuzzycloud_features::{Bandwidth, DistanceMeasure, FeatureError};
pub use fuzzycloud_filters::{
    fuzzy_downsample, fuzzy_downsample_with_features, score_cloud, DownsampleError,
    FuzzyDownsampleParams, ScoredPoint, DEFAULT_IMPORTANCE_THRESHOLD,
};
pub use fuzzycloud_inference::{FuzzyError, ImportanceEngine, OutputLabel};
