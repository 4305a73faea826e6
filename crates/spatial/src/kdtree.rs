use fuzzycloud_core::PointCloud;
use kiddo::float::distance::SquaredEuclidean;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use rayon::prelude::*;
use std::num::NonZero;

/// Kd-tree over a point cloud for nearest-neighbour queries.
///
/// Wraps kiddo's `ImmutableKdTree`: built once from the cloud, read-only
/// afterwards, and therefore safe to share across rayon workers. Items are
/// `u32` indices into the source cloud.
#[derive(Debug, Clone)]
pub struct KdTree {
    tree: ImmutableKdTree<f32, u32, 3, 32>,
    num_points: usize,
}

impl KdTree {
    pub fn build(cloud: &PointCloud) -> Self {
        let points: Vec<[f32; 3]> = cloud.iter_points().collect();
        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
            num_points: points.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.num_points
    }

    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }

    /// The `k` nearest neighbours of `query` as `(indices, distances)`.
    ///
    /// Distances are Euclidean, ascending. Empty when `k == 0`, the tree is
    /// empty, or the query is not finite.
    pub fn knn(&self, query: &[f32; 3], k: usize) -> (Vec<usize>, Vec<f32>) {
        let Some(nz_k) = NonZero::new(k) else {
            return (Vec::new(), Vec::new());
        };
        if self.is_empty() || !query.iter().all(|v| v.is_finite()) {
            return (Vec::new(), Vec::new());
        }

        self.tree
            .nearest_n::<SquaredEuclidean>(query, nz_k)
            .into_iter()
            .map(|nn| (nn.item as usize, nn.distance.sqrt()))
            .unzip()
    }

    /// Distance from `query` to the closest tree point other than the query
    /// point itself.
    ///
    /// The query is assumed to be one of the indexed points, so the first hit
    /// (distance 0) is skipped. A duplicate of the query yields 0.
    pub fn nearest_other_distance(&self, query: &[f32; 3]) -> Option<f32> {
        let (_, dists) = self.knn(query, 2);
        dists.get(1).copied()
    }

    /// [`nearest_other_distance`](Self::nearest_other_distance) for every
    /// point of `cloud`, in cloud order.
    ///
    /// Points with no neighbour (single-point cloud, non-finite coordinates)
    /// get `f32::INFINITY`.
    pub fn nearest_other_distances(&self, cloud: &PointCloud) -> Vec<f32> {
        let points: Vec<[f32; 3]> = cloud.iter_points().collect();
        points
            .par_iter()
            .map(|p| self.nearest_other_distance(p).unwrap_or(f32::INFINITY))
            .collect()
    }
}
