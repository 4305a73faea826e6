use fuzzycloud_features::FeatureError;
use fuzzycloud_inference::FuzzyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownsampleError {
    #[error("importance threshold must lie in (0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error(
        "expected one value per point: {points} points, {densities} densities, \
         {distances} distances"
    )]
    LengthMismatch {
        points: usize,
        densities: usize,
        distances: usize,
    },

    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error(transparent)]
    Inference(#[from] FuzzyError),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}
