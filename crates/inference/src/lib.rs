#![forbid(unsafe_code)]

pub mod aggregate;
pub mod defuzzify;
pub mod engine;
pub mod error;
pub mod membership;
pub mod rules;
pub mod vocabulary;

pub use aggregate::{FiringStrengths, OutputLabel};
pub use defuzzify::{defuzzify, envelope_samples, SAMPLE_ABSCISSAS};
pub use engine::{Explanation, ImportanceEngine};
pub use error::FuzzyError;
pub use membership::TriangularMembership;
pub use rules::{Antecedent, Rule, RuleBase, RuleGroup};
pub use vocabulary::{LinguisticVariable, Vocabulary};
