use crate::error::FuzzyError;

/// Fuzzy number with a triangular membership function.
///
/// `a` is the left foot, `b` the peak (membership 1) and `c` the right foot.
/// Both edges use the rising slope `1 / (b - a)`; `c` only bounds the support.
/// For the symmetric triangles used throughout this crate the falling edge
/// therefore reaches zero exactly at `c`. When `c < 2b - a` the falling edge is
/// cut off at `c`, where membership drops to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangularMembership {
    a: f64,
    b: f64,
    c: f64,
    slope: f64,
}

impl TriangularMembership {
    /// Build a triangle with `a < b < c`.
    ///
    /// Either vertical edge (`a == b` or `b == c`), any other ordering and
    /// non-finite input are rejected with
    /// [`FuzzyError::InvalidMembershipGeometry`].
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, FuzzyError> {
        let finite = a.is_finite() && b.is_finite() && c.is_finite();
        if !finite || a >= b || b >= c {
            return Err(FuzzyError::InvalidMembershipGeometry { a, b, c });
        }
        Ok(Self {
            a,
            b,
            c,
            slope: 1.0 / (b - a),
        })
    }

    /// Left foot: membership is 0 at and below `a`.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Peak, the only point with membership 1.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Right foot: membership is 0 above `c`.
    pub fn c(&self) -> f64 {
        self.c
    }

    /// `1 / (b - a)`, shared by both edges.
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Degree of truth of the crisp input `x`, in `[0, 1]`.
    ///
    /// Outside `[a, c]` (and for non-finite `x`) the degree is 0. At `x == b`
    /// it is exactly 1.
    pub fn fuzzify(&self, x: f64) -> f64 {
        if !x.is_finite() || x < self.a || x > self.c {
            return 0.0;
        }
        let y = if x < self.b {
            self.slope * (x - self.b) + 1.0
        } else {
            -self.slope * (x - self.b) + 1.0
        };
        y.max(0.0)
    }

    /// The two abscissas at which membership equals `y`: one on the rising
    /// edge and one on the falling edge, so `x_left <= b <= x_right <= c`.
    ///
    /// Exact inverse of the two linear branches of [`fuzzify`](Self::fuzzify).
    /// If the falling edge is cut off at `c` before it reaches `y`, `x_right`
    /// is `c`, the right end of the set where membership is at least `y`.
    pub fn alpha_cut(&self, y: f64) -> Result<(f64, f64), FuzzyError> {
        if !(0.0..=1.0).contains(&y) {
            return Err(FuzzyError::InvalidAlphaCutInput { y });
        }
        let offset = (y - 1.0) / self.slope;
        Ok((self.b + offset, (self.b - offset).min(self.c)))
    }
}
