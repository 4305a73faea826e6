use fuzzycloud_core::PointCloud;
use numpy::{PyArray1, PyArray2, PyArrayMethods, PyUntypedArrayMethods};
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;

#[pyclass(name = "PointCloud")]
#[derive(Debug, Clone)]
pub struct PyPointCloud {
    pub(crate) inner: PointCloud,
}

#[pymethods]
impl PyPointCloud {
    #[new]
    pub fn new() -> Self {
        Self {
            inner: PointCloud::new(),
        }
    }

    /// Create a PointCloud from an Nx3 NumPy array.
    ///
    /// Accepts float32 or float64; float64 is narrowed to float32. Fortran-order
    /// arrays are rejected.
    #[staticmethod]
    pub fn from_numpy(array: &Bound<'_, PyAny>) -> PyResult<Self> {
        if let Ok(arr) = array.downcast::<PyArray2<f32>>() {
            let data = read_rows(arr)?;
            return Ok(Self {
                inner: PointCloud::from_array(&data, data.len() / 3),
            });
        }
        if let Ok(arr) = array.downcast::<PyArray2<f64>>() {
            let data: Vec<f32> = read_rows(arr)?.into_iter().map(|v| v as f32).collect();
            return Ok(Self {
                inner: PointCloud::from_array(&data, data.len() / 3),
            });
        }
        Err(PyTypeError::new_err(
            "expected NumPy array with dtype float32 or float64, shape (N, 3)",
        ))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Copy the cloud out as a C-contiguous float32 array of shape (N, 3).
    pub fn to_numpy<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let n = self.inner.len();
        PyArray1::from_vec_bound(py, self.inner.to_array()).reshape([n, 3])
    }

    pub fn __len__(&self) -> usize {
        self.inner.len()
    }

    pub fn __repr__(&self) -> String {
        format!("PointCloud(n={})", self.inner.len())
    }
}

fn read_rows<T: numpy::Element + Copy>(array: &Bound<'_, PyArray2<T>>) -> PyResult<Vec<T>> {
    if !array.is_c_contiguous() {
        return Err(PyValueError::new_err(
            "array must be C-contiguous (row-major). \
             Use numpy.ascontiguousarray(arr) to convert.",
        ));
    }
    let readonly = array.readonly();
    let shape = readonly.shape();
    if shape[1] != 3 {
        return Err(PyValueError::new_err("expected shape (N, 3)"));
    }
    let slice = readonly
        .as_slice()
        .map_err(|_| PyValueError::new_err("failed to read array as contiguous slice"))?;
    Ok(slice.to_vec())
}
