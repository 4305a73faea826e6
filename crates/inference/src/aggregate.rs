use std::fmt;

/// Output importance labels, in ascending order of importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputLabel {
    Superfluous,
    Important,
    Essential,
}

impl OutputLabel {
    pub const ALL: [OutputLabel; 3] = [
        OutputLabel::Superfluous,
        OutputLabel::Important,
        OutputLabel::Essential,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputLabel::Superfluous => "superfluous",
            OutputLabel::Important => "important",
            OutputLabel::Essential => "essential",
        }
    }
}

impl fmt::Display for OutputLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated firing strength per output label.
///
/// Every rule contributes through [`update`](Self::update), which keeps the
/// running maximum: the fuzzy union of all rules sharing a consequent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FiringStrengths {
    pub superfluous: f64,
    pub important: f64,
    pub essential: f64,
}

impl FiringStrengths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: OutputLabel) -> f64 {
        match label {
            OutputLabel::Superfluous => self.superfluous,
            OutputLabel::Important => self.important,
            OutputLabel::Essential => self.essential,
        }
    }

    fn slot(&mut self, label: OutputLabel) -> &mut f64 {
        match label {
            OutputLabel::Superfluous => &mut self.superfluous,
            OutputLabel::Important => &mut self.important,
            OutputLabel::Essential => &mut self.essential,
        }
    }

    /// Raise `label`'s strength to `strength` if it is larger. Never lowers it.
    pub fn update(&mut self, label: OutputLabel, strength: f64) {
        let slot = self.slot(label);
        // f64::max ignores a NaN operand
        *slot = slot.max(strength);
    }

    pub fn total(&self) -> f64 {
        self.superfluous + self.important + self.essential
    }

    /// True when no rule fired.
    pub fn is_empty(&self) -> bool {
        self.total() == 0.0
    }
}

impl FromIterator<(OutputLabel, f64)> for FiringStrengths {
    fn from_iter<I: IntoIterator<Item = (OutputLabel, f64)>>(iter: I) -> Self {
        let mut strengths = Self::new();
        for (label, strength) in iter {
            strengths.update(label, strength);
        }
        strengths
    }
}

#[cfg(test)]
mod tests {
    use super::{FiringStrengths, OutputLabel};
    use proptest::prelude::*;

    #[test]
    fn starts_at_zero() {
        let s = FiringStrengths::new();
        assert!(s.is_empty());
        assert_eq!(s.total(), 0.0);
    }

    #[test]
    fn update_keeps_maximum() {
        let mut s = FiringStrengths::new();
        s.update(OutputLabel::Important, 0.4);
        s.update(OutputLabel::Important, 0.2);
        s.update(OutputLabel::Important, 0.7);
        assert_eq!(s.important, 0.7);
        assert_eq!(s.superfluous, 0.0);
        assert_eq!(s.essential, 0.0);
    }

    #[test]
    fn nan_strength_is_ignored() {
        let mut s = FiringStrengths::new();
        s.update(OutputLabel::Essential, 0.3);
        s.update(OutputLabel::Essential, f64::NAN);
        assert_eq!(s.essential, 0.3);
    }

    #[test]
    fn labels_display_their_names() {
        let names: Vec<String> = OutputLabel::ALL.iter().map(|l| l.to_string()).collect();
        assert_eq!(names, vec!["superfluous", "important", "essential"]);
    }

    fn label_strategy() -> impl Strategy<Value = OutputLabel> {
        prop::sample::select(OutputLabel::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn update_never_decreases(
            updates in prop::collection::vec((label_strategy(), 0.0f64..=1.0), 0..40),
            extra in (label_strategy(), 0.0f64..=1.0),
        ) {
            let before: FiringStrengths = updates.iter().copied().collect();
            let mut after = before;
            after.update(extra.0, extra.1);
            for label in OutputLabel::ALL {
                prop_assert!(after.get(label) >= before.get(label));
            }
        }

        #[test]
        fn aggregation_is_order_independent(
            updates in prop::collection::vec((label_strategy(), 0.0f64..=1.0), 0..40),
        ) {
            let forward: FiringStrengths = updates.iter().copied().collect();
            let backward: FiringStrengths = updates.iter().rev().copied().collect();
            prop_assert_eq!(forward, backward);
        }
    }
}
