//! Rule base: antecedents over input labels, each concluding one output label.
//!
//! Rules are authored against variable and label *names* and compiled once
//! against a [`Vocabulary`]; compiled rules hold their membership functions
//! directly, so evaluation is a handful of `min`/`max` calls per point.

use crate::aggregate::{FiringStrengths, OutputLabel};
use crate::error::FuzzyError;
use crate::membership::TriangularMembership;
use crate::vocabulary::{Vocabulary, DENSITY, DISTANCE};

/// Antecedent expression. AND is `min`, OR is `max`.
#[derive(Debug, Clone, PartialEq)]
pub enum Antecedent {
    /// Degree of `variable`'s input in the term `label`.
    Is { variable: String, label: String },
    /// Minimum of the operands (1 when empty).
    All(Vec<Antecedent>),
    /// Maximum of the operands (0 when empty).
    Any(Vec<Antecedent>),
    /// Degree of `when`, but only while `unless` has zero degree.
    ///
    /// A crisp complement: any positive degree of `unless` blocks the rule
    /// entirely, whatever its magnitude.
    Unless {
        when: Box<Antecedent>,
        unless: Box<Antecedent>,
    },
}

impl Antecedent {
    pub fn is(variable: &str, label: &str) -> Self {
        Antecedent::Is {
            variable: variable.to_string(),
            label: label.to_string(),
        }
    }

    pub fn density(label: &str) -> Self {
        Self::is(DENSITY, label)
    }

    pub fn distance(label: &str) -> Self {
        Self::is(DISTANCE, label)
    }

    pub fn and(self, other: Antecedent) -> Self {
        Antecedent::All(vec![self, other])
    }

    pub fn unless(self, blocker: Antecedent) -> Self {
        Antecedent::Unless {
            when: Box::new(self),
            unless: Box::new(blocker),
        }
    }

    fn compile(&self, vocab: &Vocabulary) -> Result<Compiled, FuzzyError> {
        Ok(match self {
            Antecedent::Is { variable, label } => {
                let input = vocab.input_index(variable)?;
                let mf = *vocab.inputs[input].term(label)?;
                Compiled::Is { input, mf }
            }
            Antecedent::All(ops) => Compiled::All(compile_all(ops, vocab)?),
            Antecedent::Any(ops) => Compiled::Any(compile_all(ops, vocab)?),
            Antecedent::Unless { when, unless } => Compiled::Unless {
                when: Box::new(when.compile(vocab)?),
                unless: Box::new(unless.compile(vocab)?),
            },
        })
    }
}

fn compile_all(ops: &[Antecedent], vocab: &Vocabulary) -> Result<Vec<Compiled>, FuzzyError> {
    ops.iter().map(|op| op.compile(vocab)).collect()
}

/// OR over labels of a single variable.
fn any_of(variable: &str, labels: &[&str]) -> Antecedent {
    Antecedent::Any(labels.iter().map(|l| Antecedent::is(variable, l)).collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub name: String,
    pub antecedent: Antecedent,
    pub consequent: OutputLabel,
}

impl Rule {
    pub fn new(name: impl Into<String>, antecedent: Antecedent, consequent: OutputLabel) -> Self {
        Self {
            name: name.into(),
            antecedent,
            consequent,
        }
    }
}

/// How the rules in a group interact.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleGroup {
    /// An independent rule.
    Single(Rule),
    /// Only the first rule with a positive firing strength contributes; the
    /// remaining rules of the group are not evaluated.
    Exclusive(Vec<Rule>),
}

#[derive(Debug, Clone, PartialEq)]
enum Compiled {
    Is {
        input: usize,
        mf: TriangularMembership,
    },
    All(Vec<Compiled>),
    Any(Vec<Compiled>),
    Unless {
        when: Box<Compiled>,
        unless: Box<Compiled>,
    },
}

impl Compiled {
    fn degree(&self, inputs: &[f64]) -> f64 {
        match self {
            Compiled::Is { input, mf } => {
                mf.fuzzify(inputs.get(*input).copied().unwrap_or(f64::NAN))
            }
            Compiled::All(ops) => ops.iter().fold(1.0, |acc, op| acc.min(op.degree(inputs))),
            Compiled::Any(ops) => ops.iter().fold(0.0, |acc, op| acc.max(op.degree(inputs))),
            Compiled::Unless { when, unless } => {
                if unless.degree(inputs) > 0.0 {
                    0.0
                } else {
                    when.degree(inputs)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CompiledRule {
    name: String,
    antecedent: Compiled,
    consequent: OutputLabel,
}

#[derive(Debug, Clone, PartialEq)]
enum CompiledGroup {
    Single(CompiledRule),
    Exclusive(Vec<CompiledRule>),
}

impl CompiledRule {
    fn compile(rule: &Rule, vocab: &Vocabulary) -> Result<Self, FuzzyError> {
        Ok(Self {
            name: rule.name.clone(),
            antecedent: rule.antecedent.compile(vocab)?,
            consequent: rule.consequent,
        })
    }
}

/// A compiled, immutable rule base.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBase {
    groups: Vec<CompiledGroup>,
}

impl RuleBase {
    /// Resolve every `(variable, label)` reference against `vocab`.
    pub fn compile(groups: &[RuleGroup], vocab: &Vocabulary) -> Result<Self, FuzzyError> {
        let groups = groups
            .iter()
            .map(|group| match group {
                RuleGroup::Single(rule) => {
                    CompiledRule::compile(rule, vocab).map(CompiledGroup::Single)
                }
                RuleGroup::Exclusive(rules) => rules
                    .iter()
                    .map(|rule| CompiledRule::compile(rule, vocab))
                    .collect::<Result<Vec<_>, _>>()
                    .map(CompiledGroup::Exclusive),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { groups })
    }

    /// The point-importance rules over density `d` and distance `v`.
    ///
    /// 1. empty(d) AND (very_close OR close OR halfway)(v) → essential
    /// 2. empty(d) AND (far OR very_far)(v) → superfluous, only if 1 did not fire
    /// 3. (sparse OR uniform)(d) AND (very_close OR close)(v) → essential
    /// 4. (sparse OR uniform)(d) AND halfway(v) → important
    /// 5. (sparse OR uniform)(d) AND (far OR very_far)(v) → superfluous
    /// 6. dense(d) AND (very_close OR close)(v) → important
    /// 7. dense(d) unless (very_close OR close)(v) → superfluous
    /// 8. full(d) OR far(v) OR very_far(v) → superfluous
    pub fn standard_rules() -> Vec<RuleGroup> {
        use OutputLabel::*;

        let near = || any_of(DISTANCE, &["very_close", "close"]);
        let remote = || any_of(DISTANCE, &["far", "very_far"]);
        let moderate = || any_of(DENSITY, &["sparse", "uniform"]);
        let not_remote = || any_of(DISTANCE, &["very_close", "close", "halfway"]);

        vec![
            RuleGroup::Exclusive(vec![
                Rule::new(
                    "empty-near",
                    Antecedent::density("empty").and(not_remote()),
                    Essential,
                ),
                Rule::new("empty-remote", Antecedent::density("empty").and(remote()), Superfluous),
            ]),
            RuleGroup::Single(Rule::new("moderate-near", moderate().and(near()), Essential)),
            RuleGroup::Single(Rule::new(
                "moderate-halfway",
                moderate().and(Antecedent::distance("halfway")),
                Important,
            )),
            RuleGroup::Single(Rule::new("moderate-remote", moderate().and(remote()), Superfluous)),
            RuleGroup::Single(Rule::new(
                "dense-near",
                Antecedent::density("dense").and(near()),
                Important,
            )),
            RuleGroup::Single(Rule::new(
                "dense-not-near",
                Antecedent::density("dense").unless(near()),
                Superfluous,
            )),
            RuleGroup::Single(Rule::new(
                "full-or-remote",
                Antecedent::Any(vec![
                    Antecedent::density("full"),
                    Antecedent::distance("far"),
                    Antecedent::distance("very_far"),
                ]),
                Superfluous,
            )),
        ]
    }

    pub fn standard(vocab: &Vocabulary) -> Result<Self, FuzzyError> {
        Self::compile(&Self::standard_rules(), vocab)
    }

    /// Number of rules across all groups.
    pub fn len(&self) -> usize {
        self.groups
            .iter()
            .map(|g| match g {
                CompiledGroup::Single(_) => 1,
                CompiledGroup::Exclusive(rules) => rules.len(),
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evaluate every rule on `inputs` (indexed like `Vocabulary::inputs`) and
    /// call `visit(rule_name, consequent, strength)` for each rule that fired
    /// with a positive strength.
    pub fn fire_each<F>(&self, inputs: &[f64], mut visit: F)
    where
        F: FnMut(&str, OutputLabel, f64),
    {
        for group in &self.groups {
            match group {
                CompiledGroup::Single(rule) => {
                    let strength = rule.antecedent.degree(inputs);
                    if strength > 0.0 {
                        visit(&rule.name, rule.consequent, strength);
                    }
                }
                CompiledGroup::Exclusive(rules) => {
                    let fired = rules
                        .iter()
                        .map(|rule| (rule, rule.antecedent.degree(inputs)))
                        .find(|(_, strength)| *strength > 0.0);
                    if let Some((rule, strength)) = fired {
                        visit(&rule.name, rule.consequent, strength);
                    }
                }
            }
        }
    }

    /// Aggregated firing strengths for `inputs`.
    pub fn fire(&self, inputs: &[f64]) -> FiringStrengths {
        let mut strengths = FiringStrengths::new();
        self.fire_each(inputs, |_, label, strength| strengths.update(label, strength));
        strengths
    }
}
