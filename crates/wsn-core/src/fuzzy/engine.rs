//! The cluster-head inference engine.

use tracing::{debug, trace};

use super::FuzzyError;
use super::defuzz::centroid;
use super::membership::Triangle;
use super::rules::{Fuzzified, Rule, cluster_head_rules};
use super::variable::{Chance, InputVariable, OutputVariable, Universe};

/// Strongest firing strength reaching each output term.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Activation {
    /// Activation of `low`.
    pub low: f64,
    /// Activation of `medium`.
    pub medium: f64,
    /// Activation of `high`.
    pub high: f64,
}

impl Activation {
    /// Activation of one output term.
    pub const fn of(&self, chance: Chance) -> f64 {
        match chance {
            Chance::Low => self.low,
            Chance::Medium => self.medium,
            Chance::High => self.high,
        }
    }

    /// Raise a term's activation to `strength` if it is stronger.
    fn raise(&mut self, chance: Chance, strength: f64) {
        let slot = match chance {
            Chance::Low => &mut self.low,
            Chance::Medium => &mut self.medium,
            Chance::High => &mut self.high,
        };
        *slot = slot.max(strength);
    }

    /// The most strongly activated term, or `None` if no rule fired.
    /// Ties go to the lower term.
    pub fn strongest(&self) -> Option<Chance> {
        Chance::ALL
            .into_iter()
            .filter(|&chance| self.of(chance) > 0.0)
            .fold(None, |best, chance| match best {
                Some(current) if self.of(current) >= self.of(chance) => Some(current),
                _ => Some(chance),
            })
    }
}

/// Mamdani inference system scoring cluster-head suitability.
///
/// Construction is a pure function of fixed parameters, and evaluation only
/// reads the definitions, so one engine can be shared by reference (or
/// `Arc`) across rounds and threads.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyEngine {
    residual_energy: InputVariable,
    distance_to_bs: InputVariable,
    node_density: InputVariable,
    ch_probability: OutputVariable,
    rules: Vec<Rule>,
}

impl FuzzyEngine {
    /// Build the standard cluster-head engine.
    ///
    /// # Errors
    ///
    /// Only fails if one of the fixed universes or shapes is rejected,
    /// which would indicate a programming error in the constants.
    pub fn new() -> Result<Self, FuzzyError> {
        let residual_energy = InputVariable::auto_partition(
            "residual_energy",
            Universe::arange(0.0, 1.1, 0.1)?,
        )?;
        let distance_to_bs = InputVariable::auto_partition(
            "distance_to_bs",
            Universe::arange(0.0, 150.0, 10.0)?,
        )?;
        let node_density =
            InputVariable::auto_partition("node_density", Universe::arange(0.0, 20.0, 1.0)?)?;
        let ch_probability = OutputVariable::new(
            "ch_probability",
            Universe::arange(0.0, 1.1, 0.1)?,
            Triangle::new(0.0, 0.0, 0.5)?,
            Triangle::new(0.2, 0.5, 0.8)?,
            Triangle::new(0.5, 1.0, 1.0)?,
        );

        Ok(Self::from_parts(
            residual_energy,
            distance_to_bs,
            node_density,
            ch_probability,
            cluster_head_rules(),
        ))
    }

    /// Assemble an engine from custom variables and rules.
    pub const fn from_parts(
        residual_energy: InputVariable,
        distance_to_bs: InputVariable,
        node_density: InputVariable,
        ch_probability: OutputVariable,
        rules: Vec<Rule>,
    ) -> Self {
        Self {
            residual_energy,
            distance_to_bs,
            node_density,
            ch_probability,
            rules,
        }
    }

    /// The rule base in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The consequent variable.
    pub const fn output(&self) -> &OutputVariable {
        &self.ch_probability
    }

    /// Grade the three crisp inputs against their terms.
    pub fn fuzzify(&self, residual_energy: f64, distance_to_bs: f64, node_density: f64) -> Fuzzified {
        Fuzzified {
            residual_energy: self.residual_energy.fuzzify(residual_energy),
            distance_to_bs: self.distance_to_bs.fuzzify(distance_to_bs),
            node_density: self.node_density.fuzzify(node_density),
        }
    }

    /// Firing strength of every rule, in rule order.
    pub fn fire(&self, residual_energy: f64, distance_to_bs: f64, node_density: f64) -> Vec<f64> {
        let grades = self.fuzzify(residual_energy, distance_to_bs, node_density);
        self.rules
            .iter()
            .map(|rule| rule.firing_strength(&grades))
            .collect()
    }

    /// Per-term activation: the strongest rule concluding each term.
    pub fn activate(&self, grades: &Fuzzified) -> Activation {
        let mut activation = Activation::default();
        for rule in &self.rules {
            activation.raise(rule.consequent, rule.firing_strength(grades));
        }
        activation
    }

    /// The aggregated output set sampled over the output universe.
    ///
    /// Each term is clipped at its activation and the clipped terms are
    /// merged with a pointwise max.
    pub fn aggregate(&self, activation: &Activation) -> Vec<f64> {
        self.ch_probability
            .universe()
            .samples()
            .iter()
            .map(|&x| {
                Chance::ALL
                    .iter()
                    .map(|&chance| {
                        self.ch_probability
                            .term(chance)
                            .grade(x)
                            .min(activation.of(chance))
                    })
                    .fold(0.0, f64::max)
            })
            .collect()
    }

    /// Crisp cluster-head probability for one node.
    ///
    /// Inputs outside their universes are clipped to the nearest bound.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzyError::DegenerateInference`] if no rule fires.
    pub fn evaluate(
        &self,
        residual_energy: f64,
        distance_to_bs: f64,
        node_density: f64,
    ) -> Result<f64, FuzzyError> {
        let grades = self.fuzzify(residual_energy, distance_to_bs, node_density);
        let activation = self.activate(&grades);
        let aggregated = self.aggregate(&activation);
        let universe = self.ch_probability.universe();

        let crisp = centroid(universe.samples(), &aggregated)
            .map(|crisp| crisp.clamp(universe.min(), universe.max()))
            .ok_or(FuzzyError::DegenerateInference)?;

        trace!(
            output = self.ch_probability.name(),
            strongest_term = activation.strongest().map_or("none", Chance::label),
            crisp,
            "Inference complete"
        );
        Ok(crisp)
    }

    /// Dominant term of each input, as `name=term` pairs.
    ///
    /// For example `residual_energy=average distance_to_bs=poor
    /// node_density=poor`.
    pub fn describe(&self, residual_energy: f64, distance_to_bs: f64, node_density: f64) -> String {
        let grades = self.fuzzify(residual_energy, distance_to_bs, node_density);
        [
            (&self.residual_energy, grades.residual_energy),
            (&self.distance_to_bs, grades.distance_to_bs),
            (&self.node_density, grades.node_density),
        ]
        .iter()
        .map(|(variable, g)| format!("{}={}", variable.name(), g.dominant().label()))
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Like [`evaluate`](Self::evaluate), but a degenerate inference scores
    /// `0.0` instead of failing.
    ///
    /// # Energy response
    ///
    /// Raising the energy never lowers the score when the distance lies in
    /// `(0, 70]` or `[126, 140]`, for any density. Two regions break this:
    ///
    /// - At the base station, average energy fires no rule, so `(0.5, 0, n)`
    ///   scores 0 for any density. At density 0 its neighbours at energy 0.4
    ///   and 0.6 score about 0.23 and 0.77.
    /// - Beyond the distance midpoint and short of the far shoulder, rule 1
    ///   cannot fire and rule 2 fades as energy leaves `average`, while
    ///   rule 3 keeps `low` active through `distance good`. The score peaks
    ///   near average energy and falls towards full energy.
    pub fn score(&self, residual_energy: f64, distance_to_bs: f64, node_density: f64) -> f64 {
        match self.evaluate(residual_energy, distance_to_bs, node_density) {
            Ok(score) => score,
            Err(err) => {
                debug!(
                    residual_energy,
                    distance_to_bs,
                    node_density,
                    terms = %self.describe(residual_energy, distance_to_bs, node_density),
                    error = %err,
                    "No rule fired, scoring node as 0"
                );
                0.0
            }
        }
    }
}
