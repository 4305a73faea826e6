use thiserror::Error;

/// Errors raised while building or evaluating the fuzzy inference system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    /// Triangle parameters violate `a < b <= c` or are not finite.
    #[error("invalid triangular membership geometry: a={a}, b={b}, c={c} (need a < b <= c)")]
    InvalidMembershipGeometry { a: f64, b: f64, c: f64 },

    /// `alpha_cut` was asked for a degree outside `[0, 1]`.
    #[error("alpha-cut degree {y} is outside [0, 1]")]
    InvalidAlphaCutInput { y: f64 },

    /// Every output firing strength was zero, so the weighted mean has no weight.
    #[error("defuzzification is undefined: no rule fired")]
    UndefinedDefuzzification,

    #[error("linguistic variable `{variable}` has no label `{label}`")]
    UnknownLabel { variable: String, label: String },

    #[error("linguistic variable `{variable}` declares label `{label}` twice")]
    DuplicateLabel { variable: String, label: String },

    #[error("no input variable named `{variable}`")]
    UnknownVariable { variable: String },
}
