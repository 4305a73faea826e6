use std::fmt;

use tracing::trace;

use crate::aggregate::{FiringStrengths, OutputLabel};
use crate::defuzzify::{defuzzify, envelope_samples};
use crate::error::FuzzyError;
use crate::rules::RuleBase;
use crate::vocabulary::Vocabulary;

/// Fuzzy inference from `(density, distance)` to a crisp importance in `[0, 1]`.
///
/// Holds the vocabulary and the compiled rule base; both are immutable, so a
/// single engine can be shared by reference across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportanceEngine {
    vocabulary: Vocabulary,
    rules: RuleBase,
}

impl ImportanceEngine {
    /// Pair a vocabulary with a rule base compiled against it.
    pub fn new(vocabulary: Vocabulary, rules: RuleBase) -> Self {
        Self { vocabulary, rules }
    }

    /// The built-in tables, reporting rather than panicking on a bad table.
    pub fn try_standard() -> Result<Self, FuzzyError> {
        let vocabulary = Vocabulary::standard()?;
        let rules = RuleBase::standard(&vocabulary)?;
        Ok(Self::new(vocabulary, rules))
    }

    /// The built-in vocabulary and rule base.
    pub fn standard() -> Self {
        Self::try_standard().expect("built-in fuzzy tables are well-formed")
    }

    /// Input and output variables the rules were compiled against.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The compiled rule base.
    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    /// Aggregated firing strength of each output label for one observation.
    ///
    /// Both inputs are expected in `[0, 1]`. Values outside every term, and
    /// non-finite values, contribute nothing; all-zero strengths mean no rule
    /// fired.
    pub fn strengths(&self, density: f64, distance: f64) -> FiringStrengths {
        self.rules.fire(&[density, distance])
    }

    /// Crisp importance, or [`FuzzyError::UndefinedDefuzzification`] if no
    /// rule fired.
    pub fn infer(&self, density: f64, distance: f64) -> Result<f64, FuzzyError> {
        defuzzify(&self.strengths(density, distance))
    }

    /// Crisp importance with the undefined case resolved to 0.
    pub fn score(&self, density: f64, distance: f64) -> f64 {
        match self.infer(density, distance) {
            Ok(importance) => importance,
            Err(_) => {
                trace!(density, distance, "no rule fired, importance set to 0");
                0.0
            }
        }
    }

    /// Full trace of one inference, for inspection.
    pub fn explain(&self, density: f64, distance: f64) -> Explanation {
        let mut fired = Vec::new();
        self.rules.fire_each(&[density, distance], |name, label, strength| {
            fired.push((name.to_string(), label, strength))
        });
        let strengths: FiringStrengths = fired.iter().map(|(_, l, s)| (*l, *s)).collect();

        // Plateau of each clipped output set: where its triangle reaches the
        // firing strength.
        let plateaus = OutputLabel::ALL
            .into_iter()
            .filter(|label| strengths.get(*label) > 0.0)
            .filter_map(|label| {
                let mf = self.vocabulary.output.term(label.as_str()).ok()?;
                let cut = mf.alpha_cut(strengths.get(label).min(1.0)).ok()?;
                Some((label, cut))
            })
            .collect();

        Explanation {
            density,
            distance,
            fired,
            strengths,
            samples: envelope_samples(&strengths),
            importance: defuzzify(&strengths).ok(),
            plateaus,
        }
    }
}

impl Default for ImportanceEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Result of [`ImportanceEngine::explain`].
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub density: f64,
    pub distance: f64,
    /// `(rule name, consequent, strength)` for each rule with positive strength.
    pub fired: Vec<(String, OutputLabel, f64)>,
    pub strengths: FiringStrengths,
    pub samples: [(f64, f64); 8],
    /// `None` when no rule fired.
    pub importance: Option<f64>,
    /// Alpha-cut of each active output set at its firing strength.
    pub plateaus: Vec<(OutputLabel, (f64, f64))>,
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "density={:.4} distance={:.4}", self.density, self.distance)?;
        for (name, label, strength) in &self.fired {
            writeln!(f, "  {name} -> {label} ({strength:.4})")?;
        }
        for (label, (lo, hi)) in &self.plateaus {
            writeln!(f, "  {label} plateau [{lo:.4}, {hi:.4}]")?;
        }
        match self.importance {
            Some(v) => write!(f, "  importance={v:.4}"),
            None => write!(f, "  importance=undefined"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_density_at_zero_distance() {
        let engine = ImportanceEngine::standard();
        let s = engine.strengths(0.0, 0.0);
        assert_eq!(
            s,
            FiringStrengths {
                superfluous: 0.0,
                important: 0.0,
                essential: 1.0
            }
        );
        // (0.60 + 0.60 + 0.75) / 3
        assert!((engine.infer(0.0, 0.0).unwrap() - 0.65).abs() < 1e-12);
    }

    #[test]
    fn dense_and_very_far_is_dropped() {
        let engine = ImportanceEngine::standard();
        for density in [0.5, 0.75] {
            let s = engine.strengths(density, 1.0);
            assert_eq!(s.superfluous, 1.0);
            let importance = engine.infer(density, 1.0).unwrap();
            assert!((importance - 0.3).abs() < 1e-12);
            assert!(importance <= 0.8);
        }
    }

    #[test]
    fn between_labels() {
        let engine = ImportanceEngine::standard();
        let s = engine.strengths(0.375, 0.375);
        assert_eq!(s.superfluous, 0.0);
        assert_eq!(s.important, 0.5);
        assert_eq!(s.essential, 0.5);
        // y = 0, 0, .5, .5, .5, .5, .5, 0
        let expected = 0.5 * (0.30 + 0.45 + 0.60 + 0.60 + 0.75) / 2.5;
        assert!((engine.infer(0.375, 0.375).unwrap() - expected).abs() < 1e-12);
        assert!((expected - 0.54).abs() < 1e-12);
    }

    #[test]
    fn undefined_scores_zero() {
        let engine = ImportanceEngine::standard();
        assert_eq!(
            engine.infer(-3.0, -3.0),
            Err(FuzzyError::UndefinedDefuzzification)
        );
        assert_eq!(engine.score(-3.0, -3.0), 0.0);
        assert_eq!(engine.score(f64::NAN, f64::INFINITY), 0.0);
    }

    #[test]
    fn explanation_reports_rules_and_plateaus() {
        let engine = ImportanceEngine::standard();
        let ex = engine.explain(0.375, 0.375);
        assert_eq!(ex.fired.len(), 2);
        assert_eq!(ex.strengths, engine.strengths(0.375, 0.375));
        assert_eq!(ex.importance, engine.infer(0.375, 0.375).ok());
        // important (0.25, 0.5, 0.75) cut at 0.5 -> [0.375, 0.625]
        let (_, (lo, hi)) = ex
            .plateaus
            .iter()
            .find(|(l, _)| *l == OutputLabel::Important)
            .copied()
            .unwrap();
        assert!((lo - 0.375).abs() < 1e-12);
        assert!((hi - 0.625).abs() < 1e-12);
        assert!(ex.to_string().contains("moderate-halfway"));
    }

    #[test]
    fn explanation_of_nothing() {
        let ex = ImportanceEngine::standard().explain(5.0, 5.0);
        assert!(ex.fired.is_empty());
        assert!(ex.plateaus.is_empty());
        assert_eq!(ex.importance, None);
        assert!(ex.to_string().ends_with("importance=undefined"));
    }

    proptest! {
        #[test]
        fn score_is_a_unit_interval_value(d in -1.0f64..2.0, v in -1.0f64..2.0) {
            let score = ImportanceEngine::standard().score(d, v);
            prop_assert!((0.0..=1.0).contains(&score));
        }

        #[test]
        fn any_input_inside_the_domain_fires(d in -0.2f64..1.2, v in -0.2f64..1.2) {
            // Neighbouring triangles overlap, so some rule always fires here.
            let engine = ImportanceEngine::standard();
            prop_assert!(engine.infer(d, v).is_ok());
        }
    }
}
