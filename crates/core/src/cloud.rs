/// A 3D point cloud stored as structure-of-arrays.
///
/// Point order is significant: every filter in the workspace returns an
/// order-preserving subsequence of its input, and per-point feature vectors
/// (density, distance, importance) are indexed in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            z: Vec::new(),
        }
    }

    pub fn from_xyz(x: Vec<f32>, y: Vec<f32>, z: Vec<f32>) -> Self {
        assert_eq!(x.len(), y.len(), "x and y must have same length");
        assert_eq!(x.len(), z.len(), "x and z must have same length");
        Self { x, y, z }
    }

    pub fn from_points(points: &[[f32; 3]]) -> Self {
        let mut cloud = Self::with_capacity(points.len());
        for p in points {
            cloud.push(*p);
        }
        cloud
    }

    /// Build a cloud from interleaved `[x0, y0, z0, x1, ...]` data.
    pub fn from_array(data: &[f32], num_points: usize) -> Self {
        assert_eq!(
            data.len(),
            num_points * 3,
            "interleaved xyz input must have num_points * 3 floats"
        );

        let mut cloud = Self::with_capacity(num_points);
        for chunk in data.chunks_exact(3) {
            cloud.push([chunk[0], chunk[1], chunk[2]]);
        }
        cloud
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            z: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, point: [f32; 3]) {
        self.x.push(point[0]);
        self.y.push(point[1]);
        self.z.push(point[2]);
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.x.len(), self.y.len());
        debug_assert_eq!(self.x.len(), self.z.len());
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn point(&self, i: usize) -> [f32; 3] {
        [self.x[i], self.y[i], self.z[i]]
    }

    pub fn iter_points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((x, y), z)| [*x, *y, *z])
    }

    /// Arithmetic mean of all finite points, accumulated in `f64`.
    ///
    /// Returns `None` when the cloud holds no finite point.
    pub fn centroid(&self) -> Option<[f64; 3]> {
        let mut sum = [0.0f64; 3];
        let mut n = 0usize;
        for p in self.iter_points() {
            if !p.iter().all(|v| v.is_finite()) {
                continue;
            }
            for axis in 0..3 {
                sum[axis] += p[axis] as f64;
            }
            n += 1;
        }
        if n == 0 {
            return None;
        }
        let inv = 1.0 / n as f64;
        Some([sum[0] * inv, sum[1] * inv, sum[2] * inv])
    }

    /// Gather the points at `indices`, in the order given.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub fn select(&self, indices: &[usize]) -> Self {
        let mut out = Self::with_capacity(indices.len());
        for &idx in indices {
            assert!(idx < self.len(), "index out of bounds in select");
            out.push(self.point(idx));
        }
        out
    }

    /// Interleaved `[x0, y0, z0, x1, ...]` copy of the cloud, the inverse of
    /// [`from_array`](Self::from_array).
    pub fn to_array(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.len() * 3);
        for p in self.iter_points() {
            out.extend_from_slice(&p);
        }
        out
    }
}

impl Default for PointCloud {
    fn default() -> Self {
        Self::new()
    }
}
