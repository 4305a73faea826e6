use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("density estimation needs at least {needed} points, got {got}")]
    TooFewPoints { needed: usize, got: usize },

    /// The kernel covariance has no Cholesky factor, e.g. all points lie on a
    /// plane or a line.
    #[error("kernel covariance is singular; points are degenerate (collinear or coplanar)")]
    SingularCovariance,

    #[error("bandwidth factor must be finite and > 0, got {0}")]
    InvalidBandwidth(f64),

    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
}
