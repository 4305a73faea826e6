use fuzzycloud_core::PointCloud;
use fuzzycloud_features::{estimate_density_normalized, measure_distances_normalized};
use fuzzycloud_inference::ImportanceEngine;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::{validate_threshold, FuzzyDownsampleParams};
use crate::error::DownsampleError;

/// A point together with the measurements and score that decided its fate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPoint {
    /// Position in the input cloud.
    pub index: usize,
    pub position: [f32; 3],
    pub density: f64,
    pub distance: f64,
    pub importance: f64,
}

impl ScoredPoint {
    pub fn is_kept(&self, threshold: f64) -> bool {
        self.importance > threshold
    }
}

/// Importance of every point from its (normalised) density and distance.
///
/// Points for which no rule fires score 0. Computed in parallel; the output is
/// in input order.
pub fn score_importance(
    engine: &ImportanceEngine,
    densities: &[f64],
    distances: &[f64],
) -> Result<Vec<f64>, DownsampleError> {
    if densities.len() != distances.len() {
        return Err(DownsampleError::LengthMismatch {
            points: densities.len(),
            densities: densities.len(),
            distances: distances.len(),
        });
    }

    let importances: Vec<f64> = densities
        .par_iter()
        .zip(distances.par_iter())
        .map(|(&d, &v)| engine.score(d, v))
        .collect();

    if !importances.is_empty() && importances.iter().all(|&s| s == 0.0) {
        warn!(
            points = importances.len(),
            "no rule fired for any point; inputs are likely outside [-0.25, 1.25]"
        );
    }
    Ok(importances)
}

/// Indices whose importance strictly exceeds `threshold`, ascending.
pub fn select_important(importances: &[f64], threshold: f64) -> Vec<usize> {
    importances
        .iter()
        .enumerate()
        .filter_map(|(i, &s)| (s > threshold).then_some(i))
        .collect()
}

/// Downsample `cloud` using precomputed per-point density and distance.
///
/// Returns the order-preserving subsequence of points whose importance
/// exceeds `threshold`.
pub fn fuzzy_downsample_with_features(
    cloud: &PointCloud,
    densities: &[f64],
    distances: &[f64],
    threshold: f64,
) -> Result<PointCloud, DownsampleError> {
    validate_threshold(threshold)?;
    check_lengths(cloud, densities, distances)?;

    let engine = ImportanceEngine::standard();
    let importances = score_importance(&engine, densities, distances)?;
    let keep = select_important(&importances, threshold);
    debug!(kept = keep.len(), total = cloud.len(), threshold, "fuzzy downsample");
    Ok(cloud.select(&keep))
}

/// Measure, score and record every point of `cloud`.
pub fn score_cloud(
    cloud: &PointCloud,
    params: &FuzzyDownsampleParams,
) -> Result<Vec<ScoredPoint>, DownsampleError> {
    params.validate()?;
    if cloud.is_empty() {
        return Ok(Vec::new());
    }

    let densities = estimate_density_normalized(cloud, params.bandwidth)?;
    let distances = measure_distances_normalized(cloud, params.distance);
    debug!(points = cloud.len(), "computed density and distance features");

    let engine = ImportanceEngine::standard();
    let importances = score_importance(&engine, &densities, &distances)?;

    Ok(cloud
        .iter_points()
        .zip(densities.iter().zip(&distances).zip(&importances))
        .enumerate()
        .map(|(index, (position, ((&density, &distance), &importance)))| ScoredPoint {
            index,
            position,
            density,
            distance,
            importance,
        })
        .collect())
}

/// Density- and distance-aware downsampling of a raw cloud.
///
/// Density is a Gaussian KDE over the whole cloud and distance follows
/// `params.distance`; both are min-max normalised before inference.
pub fn fuzzy_downsample(
    cloud: &PointCloud,
    params: &FuzzyDownsampleParams,
) -> Result<PointCloud, DownsampleError> {
    let scored = score_cloud(cloud, params)?;
    let keep: Vec<usize> = scored
        .iter()
        .filter(|p| p.is_kept(params.importance_threshold))
        .map(|p| p.index)
        .collect();
    debug!(
        kept = keep.len(),
        total = cloud.len(),
        threshold = params.importance_threshold,
        "fuzzy downsample"
    );
    Ok(cloud.select(&keep))
}

fn check_lengths(
    cloud: &PointCloud,
    densities: &[f64],
    distances: &[f64],
) -> Result<(), DownsampleError> {
    if densities.len() != cloud.len() || distances.len() != cloud.len() {
        return Err(DownsampleError::LengthMismatch {
            points: cloud.len(),
            densities: densities.len(),
            distances: distances.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzzycloud_features::{Bandwidth, DistanceMeasure};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn line_cloud(n: usize) -> PointCloud {
        PointCloud::from_xyz((0..n).map(|i| i as f32).collect(), vec![0.0; n], vec![0.0; n])
    }

    #[test]
    fn keeps_only_points_above_threshold() {
        let cloud = line_cloud(4);
        // importances: 0.65, 0.3, 0.54, 0 (no rule fires)
        let densities = [0.0, 0.75, 0.375, -2.0];
        let distances = [0.0, 1.0, 0.375, -2.0];
        let out = fuzzy_downsample_with_features(&cloud, &densities, &distances, 0.5).unwrap();
        assert_eq!(out.x, vec![0.0, 2.0]);

        let out = fuzzy_downsample_with_features(&cloud, &densities, &distances, 0.6).unwrap();
        assert_eq!(out.x, vec![0.0]);
    }

    #[test]
    fn default_threshold_is_above_every_reachable_score() {
        let cloud = line_cloud(3);
        let out =
            fuzzy_downsample_with_features(&cloud, &[0.0, 0.2, 0.4], &[0.0, 0.1, 0.3], 0.8)
                .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn undefined_points_do_not_abort_the_batch() {
        let engine = ImportanceEngine::standard();
        let scores = score_importance(&engine, &[f64::NAN, 0.0, 9.0], &[0.0, 0.0, 9.0]).unwrap();
        assert_eq!(scores[0], 0.0);
        assert!((scores[1] - 0.65).abs() < 1e-12);
        assert_eq!(scores[2], 0.0);
    }

    #[test]
    fn rejects_bad_threshold() {
        let cloud = line_cloud(1);
        for t in [0.0, -0.5, 1.01, f64::NAN] {
            assert!(matches!(
                fuzzy_downsample_with_features(&cloud, &[0.0], &[0.0], t),
                Err(DownsampleError::InvalidThreshold(_))
            ));
        }
    }

    #[test]
    fn rejects_length_mismatch() {
        let cloud = line_cloud(3);
        let err = fuzzy_downsample_with_features(&cloud, &[0.0; 3], &[0.0; 2], 0.5).unwrap_err();
        assert!(matches!(
            err,
            DownsampleError::LengthMismatch {
                points: 3,
                densities: 3,
                distances: 2
            }
        ));
        let engine = ImportanceEngine::standard();
        assert!(score_importance(&engine, &[0.0], &[]).is_err());
    }

    #[test]
    fn empty_cloud_downsamples_to_empty() {
        let params = FuzzyDownsampleParams::default();
        assert!(fuzzy_downsample(&PointCloud::new(), &params).unwrap().is_empty());
        assert!(score_cloud(&PointCloud::new(), &params).unwrap().is_empty());
    }

    #[test]
    fn scores_every_point_and_drops_the_remote_outlier() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut pts: Vec<[f32; 3]> = (0..300)
            .map(|_| {
                [
                    rng.gen_range(-1.0f32..1.0),
                    rng.gen_range(-1.0f32..1.0),
                    rng.gen_range(-1.0f32..1.0),
                ]
            })
            .collect();
        pts.push([6.0, 6.0, 6.0]);
        let cloud = PointCloud::from_points(&pts);

        let params = FuzzyDownsampleParams {
            importance_threshold: 0.5,
            bandwidth: Bandwidth::Scott,
            distance: DistanceMeasure::Centroid,
        };
        let scored = score_cloud(&cloud, &params).unwrap();
        assert_eq!(scored.len(), cloud.len());
        for (i, p) in scored.iter().enumerate() {
            assert_eq!(p.index, i);
            assert_eq!(p.position, cloud.point(i));
            assert!((0.0..=1.0).contains(&p.density));
            assert!((0.0..=1.0).contains(&p.distance));
        }

        // The outlier has the lowest density and the largest distance, which
        // makes it superfluous (importance 0.3).
        let outlier = scored[300];
        assert_eq!(outlier.density, 0.0);
        assert_eq!(outlier.distance, 1.0);
        assert!((outlier.importance - 0.3).abs() < 1e-12);
        assert!(!outlier.is_kept(params.importance_threshold));

        let out = fuzzy_downsample(&cloud, &params).unwrap();
        assert!(out.len() < cloud.len());
        let expected: Vec<usize> = scored
            .iter()
            .filter(|p| p.importance > 0.5)
            .map(|p| p.index)
            .collect();
        assert_eq!(out, cloud.select(&expected));
    }

    proptest! {
        #[test]
        fn selection_is_ordered_and_above_threshold(
            features in prop::collection::vec((-0.5f64..1.5, -0.5f64..1.5), 0..200),
            threshold in 0.01f64..=1.0,
        ) {
            let densities: Vec<f64> = features.iter().map(|f| f.0).collect();
            let distances: Vec<f64> = features.iter().map(|f| f.1).collect();
            let engine = ImportanceEngine::standard();
            let scores = score_importance(&engine, &densities, &distances).unwrap();
            let keep = select_important(&scores, threshold);
            prop_assert!(keep.windows(2).all(|w| w[0] < w[1]));
            for i in 0..scores.len() {
                prop_assert_eq!(keep.contains(&i), scores[i] > threshold);
            }
        }
    }
}
