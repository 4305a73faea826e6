use fuzzycloud_features::DistanceMeasure;
use fuzzycloud_filters::{DownsampleError, FuzzyDownsampleParams};
use fuzzycloud_inference::ImportanceEngine;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::cloud::PyPointCloud;

fn to_py_err(err: DownsampleError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn parse_distance(name: &str) -> PyResult<DistanceMeasure> {
    match name {
        "nearest_neighbor" | "nn" => Ok(DistanceMeasure::NearestNeighbor),
        "centroid" => Ok(DistanceMeasure::Centroid),
        "origin" => Ok(DistanceMeasure::Reference([0.0; 3])),
        _ => Err(PyValueError::new_err(
            "distance must be 'nearest_neighbor', 'centroid', or 'origin'",
        )),
    }
}

#[pyfunction(name = "fuzzy_downsample")]
#[pyo3(signature = (
    cloud,
    threshold = fuzzycloud_filters::DEFAULT_IMPORTANCE_THRESHOLD,
    distance = "nearest_neighbor",
))]
pub fn fuzzy_downsample_py(
    py: Python<'_>,
    cloud: &PyPointCloud,
    threshold: f64,
    distance: &str,
) -> PyResult<PyPointCloud> {
    let params = FuzzyDownsampleParams {
        importance_threshold: threshold,
        distance: parse_distance(distance)?,
        ..Default::default()
    };
    let out = py
        .allow_threads(|| fuzzycloud_filters::fuzzy_downsample(&cloud.inner, &params))
        .map_err(to_py_err)?;
    Ok(PyPointCloud { inner: out })
}

/// Importance of each `(density, distance)` pair; both inputs in `[0, 1]`.
#[pyfunction(name = "importance_scores")]
pub fn importance_scores_py(
    py: Python<'_>,
    densities: Vec<f64>,
    distances: Vec<f64>,
) -> PyResult<Vec<f64>> {
    let engine = ImportanceEngine::standard();
    py.allow_threads(|| fuzzycloud_filters::score_importance(&engine, &densities, &distances))
        .map_err(to_py_err)
}

/// Crisp importance of a single observation, or `None` when no rule fires.
#[pyfunction(name = "fuzzy_importance")]
pub fn fuzzy_importance_py(density: f64, distance: f64) -> Option<f64> {
    ImportanceEngine::standard().infer(density, distance).ok()
}
