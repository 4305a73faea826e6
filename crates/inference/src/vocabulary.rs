//! Linguistic variables: named families of triangular fuzzy sets.

use crate::error::FuzzyError;
use crate::membership::TriangularMembership;

/// Domain shared by the density and distance variables.
pub const INPUT_DOMAIN: (f64, f64) = (-0.25, 1.25);

/// Domain of the output importance variable.
pub const OUTPUT_DOMAIN: (f64, f64) = (0.0, 1.0);

pub const DENSITY: &str = "density";
pub const DISTANCE: &str = "distance";
pub const IMPORTANCE: &str = "importance";

const DENSITY_TERMS: [(&str, [f64; 3]); 5] = [
    ("empty", [-0.25, 0.00, 0.25]),
    ("sparse", [0.00, 0.25, 0.50]),
    ("uniform", [0.25, 0.50, 0.75]),
    ("dense", [0.50, 0.75, 1.00]),
    ("full", [0.75, 1.00, 1.25]),
];

// Same geometry as density, kept as its own namespace.
const DISTANCE_TERMS: [(&str, [f64; 3]); 5] = [
    ("very_close", [-0.25, 0.00, 0.25]),
    ("close", [0.00, 0.25, 0.50]),
    ("halfway", [0.25, 0.50, 0.75]),
    ("far", [0.50, 0.75, 1.00]),
    ("very_far", [0.75, 1.00, 1.25]),
];

const IMPORTANCE_TERMS: [(&str, [f64; 3]); 3] = [
    ("superfluous", [0.00, 0.25, 0.50]),
    ("important", [0.25, 0.50, 0.75]),
    ("essential", [0.50, 0.75, 1.00]),
];

/// A named mapping from label to membership function over a shared domain.
#[derive(Debug, Clone, PartialEq)]
pub struct LinguisticVariable {
    name: String,
    domain: (f64, f64),
    terms: Vec<(String, TriangularMembership)>,
}

impl LinguisticVariable {
    /// An empty variable; add labels with [`with_term`](Self::with_term).
    ///
    /// `domain` documents the intended input range. Inputs outside it are not
    /// rejected, they simply fall outside every term.
    pub fn new(name: impl Into<String>, domain: (f64, f64)) -> Self {
        Self {
            name: name.into(),
            domain,
            terms: Vec::new(),
        }
    }

    /// Add a triangular term. Label order is preserved.
    pub fn with_term(
        mut self,
        label: impl Into<String>,
        a: f64,
        b: f64,
        c: f64,
    ) -> Result<Self, FuzzyError> {
        let label = label.into();
        if self.index_of(&label).is_some() {
            return Err(FuzzyError::DuplicateLabel {
                variable: self.name,
                label,
            });
        }
        let mf = TriangularMembership::new(a, b, c)?;
        self.terms.push((label, mf));
        Ok(self)
    }

    fn from_table(
        name: &str,
        domain: (f64, f64),
        table: &[(&str, [f64; 3])],
    ) -> Result<Self, FuzzyError> {
        table
            .iter()
            .try_fold(Self::new(name, domain), |var, (label, [a, b, c])| {
                var.with_term(*label, *a, *b, *c)
            })
    }

    /// Density: empty, sparse, uniform, dense, full.
    pub fn density() -> Result<Self, FuzzyError> {
        Self::from_table(DENSITY, INPUT_DOMAIN, &DENSITY_TERMS)
    }

    /// Distance: very_close, close, halfway, far, very_far.
    pub fn distance() -> Result<Self, FuzzyError> {
        Self::from_table(DISTANCE, INPUT_DOMAIN, &DISTANCE_TERMS)
    }

    /// Output importance: superfluous, important, essential.
    pub fn importance() -> Result<Self, FuzzyError> {
        Self::from_table(IMPORTANCE, OUTPUT_DOMAIN, &IMPORTANCE_TERMS)
    }

    /// Name used by rules to refer to this variable.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `(min, max)` of the intended input range.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.iter().map(|(label, _)| label.as_str())
    }

    fn index_of(&self, label: &str) -> Option<usize> {
        self.terms.iter().position(|(l, _)| l == label)
    }

    /// Look a term up by label.
    pub fn term(&self, label: &str) -> Result<&TriangularMembership, FuzzyError> {
        self.terms
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, mf)| mf)
            .ok_or_else(|| FuzzyError::UnknownLabel {
                variable: self.name.clone(),
                label: label.to_string(),
            })
    }
}

/// The two input variables and the output variable of the inference system.
///
/// Built once and shared read-only; the engine owns one and hands out
/// references.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    pub inputs: Vec<LinguisticVariable>,
    pub output: LinguisticVariable,
}

impl Vocabulary {
    /// Density and distance inputs (in that order) with the importance output.
    pub fn standard() -> Result<Self, FuzzyError> {
        Ok(Self {
            inputs: vec![LinguisticVariable::density()?, LinguisticVariable::distance()?],
            output: LinguisticVariable::importance()?,
        })
    }

    pub fn input_index(&self, variable: &str) -> Result<usize, FuzzyError> {
        self.inputs
            .iter()
            .position(|v| v.name() == variable)
            .ok_or_else(|| FuzzyError::UnknownVariable {
                variable: variable.to_string(),
            })
    }
}
