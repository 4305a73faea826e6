#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod cloud;
mod fuzzy;

#[pymodule]
fn fuzzycloud_rs(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<cloud::PyPointCloud>()?;

    m.add_function(wrap_pyfunction!(fuzzy::fuzzy_downsample_py, m)?)?;
    m.add_function(wrap_pyfunction!(fuzzy::importance_scores_py, m)?)?;
    m.add_function(wrap_pyfunction!(fuzzy::fuzzy_importance_py, m)?)?;

    Ok(())
}
