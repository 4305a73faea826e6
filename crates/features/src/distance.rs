use fuzzycloud_core::PointCloud;
use fuzzycloud_spatial::KdTree;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::normalize_min_max;

/// Per-point distance measurement fed to the fuzzy engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMeasure {
    /// Distance to the closest other point. Large for isolated points.
    #[default]
    NearestNeighbor,
    /// Distance to the centroid of the cloud. Large on the periphery.
    Centroid,
    /// Distance to a fixed reference point, e.g. the sensor origin.
    Reference([f32; 3]),
}

fn euclidean(p: [f32; 3], q: [f64; 3]) -> f64 {
    let dx = p[0] as f64 - q[0];
    let dy = p[1] as f64 - q[1];
    let dz = p[2] as f64 - q[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Raw distances for every point of `cloud`, in cloud order.
///
/// Points with non-finite coordinates, or with no neighbour to measure
/// against, get a non-finite distance.
pub fn measure_distances(cloud: &PointCloud, measure: DistanceMeasure) -> Vec<f64> {
    if cloud.is_empty() {
        return Vec::new();
    }

    let distances: Vec<f64> = match measure {
        DistanceMeasure::NearestNeighbor => {
            let tree = KdTree::build(cloud);
            tree.nearest_other_distances(cloud)
                .into_iter()
                .map(|d| d as f64)
                .collect()
        }
        DistanceMeasure::Centroid => match cloud.centroid() {
            Some(c) => cloud.iter_points().map(|p| euclidean(p, c)).collect(),
            None => vec![f64::NAN; cloud.len()],
        },
        DistanceMeasure::Reference(r) => {
            let r = [r[0] as f64, r[1] as f64, r[2] as f64];
            cloud.iter_points().map(|p| euclidean(p, r)).collect()
        }
    };

    debug!(points = cloud.len(), ?measure, "measured distances");
    distances
}

/// [`measure_distances`] rescaled to `[0, 1]`.
pub fn measure_distances_normalized(cloud: &PointCloud, measure: DistanceMeasure) -> Vec<f64> {
    normalize_min_max(&measure_distances(cloud, measure))
}
