#![forbid(unsafe_code)]

pub mod density;
pub mod distance;
pub mod error;
pub mod normalize;

pub use density::{estimate_density, estimate_density_normalized, Bandwidth, GaussianKde};
pub use distance::{measure_distances, measure_distances_normalized, DistanceMeasure};
pub use error::FeatureError;
pub use normalize::normalize_min_max;
