//! Discrete weighted-mean defuzzification over a fixed 8-sample envelope.
//!
//! The union of the three clipped output triangles is approximated by eight
//! samples on `[0, 1]`. The crisp value is `Σ x·y / Σ y` over those samples,
//! a weighted mean of abscissas rather than an integrated centroid of area.
//! The duplicated abscissa at 0.60 marks the step between the important and
//! essential plateaus and counts twice in the mean.

use crate::aggregate::FiringStrengths;
use crate::error::FuzzyError;

pub const SAMPLE_ABSCISSAS: [f64; 8] = [0.00, 0.15, 0.30, 0.45, 0.60, 0.60, 0.75, 1.00];

/// The eight `(x, y)` samples of the aggregated output envelope.
pub fn envelope_samples(strengths: &FiringStrengths) -> [(f64, f64); 8] {
    let s = strengths.superfluous;
    let i = strengths.important;
    let e = strengths.essential;
    let ordinates = [0.0, s, s.max(i), s.max(i), i.max(e), i.max(e), e, 0.0];

    std::array::from_fn(|k| (SAMPLE_ABSCISSAS[k], ordinates[k]))
}

/// Crisp importance in `[0, 1]` for the aggregated strengths.
///
/// # Errors
///
/// [`FuzzyError::UndefinedDefuzzification`] when the samples carry no weight,
/// i.e. no rule fired.
pub fn defuzzify(strengths: &FiringStrengths) -> Result<f64, FuzzyError> {
    let samples = envelope_samples(strengths);
    let weight: f64 = samples.iter().map(|(_, y)| y).sum();
    if weight <= 0.0 || !weight.is_finite() {
        return Err(FuzzyError::UndefinedDefuzzification);
    }
    let moment: f64 = samples.iter().map(|(x, y)| x * y).sum();
    Ok(moment / weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strengths(superfluous: f64, important: f64, essential: f64) -> FiringStrengths {
        FiringStrengths {
            superfluous,
            important,
            essential,
        }
    }

    #[test]
    fn essential_only() {
        let samples = envelope_samples(&strengths(0.0, 0.0, 1.0));
        let ys: Vec<f64> = samples.iter().map(|s| s.1).collect();
        assert_eq!(ys, vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0]);
        // (0.60 + 0.60 + 0.75) / 3
        let crisp = defuzzify(&strengths(0.0, 0.0, 1.0)).unwrap();
        assert!((crisp - 0.65).abs() < 1e-12);
    }

    #[test]
    fn superfluous_only() {
        // (0.15 + 0.30 + 0.45) / 3
        let crisp = defuzzify(&strengths(1.0, 0.0, 0.0)).unwrap();
        assert!((crisp - 0.3).abs() < 1e-12);
    }

    #[test]
    fn important_only() {
        // (0.30 + 0.45 + 0.60 + 0.60) / 4
        let crisp = defuzzify(&strengths(0.0, 0.8, 0.0)).unwrap();
        assert!((crisp - 0.4875).abs() < 1e-12);
    }

    #[test]
    fn mixed_strengths() {
        // y = 0, .2, .5, .5, .5, .5, .4, 0
        let crisp = defuzzify(&strengths(0.2, 0.5, 0.4)).unwrap();
        let expected = (0.15 * 0.2 + 0.30 * 0.5 + 0.45 * 0.5 + 0.60 * 0.5 + 0.60 * 0.5 + 0.75 * 0.4)
            / (0.2 + 0.5 * 4.0 + 0.4);
        assert!((crisp - expected).abs() < 1e-12);
    }

    #[test]
    fn zero_strengths_are_undefined() {
        assert_eq!(
            defuzzify(&FiringStrengths::new()),
            Err(FuzzyError::UndefinedDefuzzification)
        );
    }

    #[test]
    fn duplicate_abscissa_is_kept() {
        assert_eq!(SAMPLE_ABSCISSAS[4], SAMPLE_ABSCISSAS[5]);
        assert_eq!(SAMPLE_ABSCISSAS.len(), 8);
    }

    proptest! {
        #[test]
        fn crisp_value_stays_within_sampled_support(
            s in 0.0f64..=1.0, i in 0.0f64..=1.0, e in 0.0f64..=1.0,
        ) {
            prop_assume!(s + i + e > 0.0);
            let crisp = defuzzify(&strengths(s, i, e)).unwrap();
            prop_assert!(crisp >= 0.15 - 1e-12);
            prop_assert!(crisp <= 0.65 + 1e-12);
        }
    }
}
