use fuzzycloud_core::PointCloud;
use nalgebra::{Matrix3, Vector3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

use crate::error::FeatureError;
use crate::normalize::normalize_min_max;

const DIM: f64 = 3.0;

/// Bandwidth selection for [`GaussianKde`].
///
/// The factor scales the sample covariance: the kernel covariance is
/// `factor² · Σ`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Bandwidth {
    /// `n^(-1/(d+4))`
    #[default]
    Scott,
    /// `(n(d+2)/4)^(-1/(d+4))`
    Silverman,
    /// A fixed factor.
    Factor(f64),
}

impl Bandwidth {
    pub fn factor(&self, n: usize) -> Result<f64, FeatureError> {
        let n = n as f64;
        let factor = match *self {
            Bandwidth::Scott => n.powf(-1.0 / (DIM + 4.0)),
            Bandwidth::Silverman => (n * (DIM + 2.0) / 4.0).powf(-1.0 / (DIM + 4.0)),
            Bandwidth::Factor(f) => f,
        };
        if !factor.is_finite() || factor <= 0.0 {
            return Err(FeatureError::InvalidBandwidth(factor));
        }
        Ok(factor)
    }
}

/// Gaussian kernel density estimate with a full-covariance kernel.
///
/// The kernel covariance is the unbiased sample covariance of the data scaled
/// by the squared bandwidth factor, so the kernel adapts to the spread and
/// orientation of the cloud.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    points: Vec<Vector3<f64>>,
    inv_cov: Matrix3<f64>,
    norm: f64,
}

impl GaussianKde {
    /// Fit the estimator to every point of `cloud`.
    ///
    /// # Errors
    ///
    /// - [`FeatureError::TooFewPoints`] with fewer than two points.
    /// - [`FeatureError::NonFinitePoint`] if any coordinate is NaN or infinite.
    /// - [`FeatureError::SingularCovariance`] for degenerate (e.g. planar) data.
    pub fn fit(cloud: &PointCloud, bandwidth: Bandwidth) -> Result<Self, FeatureError> {
        let n = cloud.len();
        if n < 2 {
            return Err(FeatureError::TooFewPoints { needed: 2, got: n });
        }

        let mut points = Vec::with_capacity(n);
        for (index, p) in cloud.iter_points().enumerate() {
            if !p.iter().all(|v| v.is_finite()) {
                return Err(FeatureError::NonFinitePoint { index });
            }
            points.push(Vector3::new(p[0] as f64, p[1] as f64, p[2] as f64));
        }

        let mean = points.iter().sum::<Vector3<f64>>() / n as f64;
        let scatter = points
            .iter()
            .map(|p| {
                let d = p - mean;
                d * d.transpose()
            })
            .sum::<Matrix3<f64>>();
        let factor = bandwidth.factor(n)?;
        let cov = scatter / (n as f64 - 1.0) * (factor * factor);

        let chol = cov.cholesky().ok_or(FeatureError::SingularCovariance)?;
        let det = cov.determinant();
        if !(det.is_finite() && det > 0.0) {
            return Err(FeatureError::SingularCovariance);
        }
        let norm = ((2.0 * PI).powi(3) * det).sqrt() * n as f64;

        debug!(points = n, factor, det, "fitted gaussian kde");

        Ok(Self {
            points,
            inv_cov: chol.inverse(),
            norm,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Density at `query`, integrating to 1 over space.
    pub fn evaluate(&self, query: &[f32; 3]) -> f64 {
        let q = Vector3::new(query[0] as f64, query[1] as f64, query[2] as f64);
        let sum: f64 = self
            .points
            .iter()
            .map(|p| {
                let d = p - q;
                (-0.5 * d.dot(&(self.inv_cov * d))).exp()
            })
            .sum();
        sum / self.norm
    }

    /// Density at every point of `cloud`, in cloud order.
    pub fn evaluate_cloud(&self, cloud: &PointCloud) -> Vec<f64> {
        let queries: Vec<[f32; 3]> = cloud.iter_points().collect();
        queries.par_iter().map(|q| self.evaluate(q)).collect()
    }
}

/// Raw KDE density of every point of `cloud`, evaluated on the cloud itself.
pub fn estimate_density(
    cloud: &PointCloud,
    bandwidth: Bandwidth,
) -> Result<Vec<f64>, FeatureError> {
    let kde = GaussianKde::fit(cloud, bandwidth)?;
    Ok(kde.evaluate_cloud(cloud))
}

/// [`estimate_density`] rescaled to `[0, 1]`.
pub fn estimate_density_normalized(
    cloud: &PointCloud,
    bandwidth: Bandwidth,
) -> Result<Vec<f64>, FeatureError> {
    Ok(normalize_min_max(&estimate_density(cloud, bandwidth)?))
}
