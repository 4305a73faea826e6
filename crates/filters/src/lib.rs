#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod fuzzy_downsample;

pub use config::{FuzzyDownsampleParams, DEFAULT_IMPORTANCE_THRESHOLD};
pub use error::DownsampleError;
pub use fuzzy_downsample::{
    fuzzy_downsample, fuzzy_downsample_with_features, score_cloud, score_importance,
    select_important, ScoredPoint,
};
