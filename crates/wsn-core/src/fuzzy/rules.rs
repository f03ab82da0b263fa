//! Rule antecedents, rules, and the cluster-head rule base.

use super::variable::{Chance, Grades, Quality};

/// The crisp measurements fed into the inference engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Input {
    /// Remaining battery energy of the node.
    ResidualEnergy,
    /// Distance from the node to the base station.
    DistanceToBs,
    /// Number of neighbours inside the neighbour radius.
    NodeDensity,
}

/// Term grades of all three inputs for one node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fuzzified {
    /// Grades of the residual energy.
    pub residual_energy: Grades,
    /// Grades of the distance to the base station.
    pub distance_to_bs: Grades,
    /// Grades of the node density.
    pub node_density: Grades,
}

impl Fuzzified {
    /// Degree to which `input` is `quality`.
    pub const fn grade(&self, input: Input, quality: Quality) -> f64 {
        match input {
            Input::ResidualEnergy => self.residual_energy.of(quality),
            Input::DistanceToBs => self.distance_to_bs.of(quality),
            Input::NodeDensity => self.node_density.of(quality),
        }
    }
}

/// A boolean condition over input terms.
///
/// `All` evaluates with the min t-norm, `Any` with the max t-conorm. An
/// empty `All` is fully true and an empty `Any` fully false, matching the
/// identities of the two operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Antecedent {
    /// `input IS quality`.
    Is(Input, Quality),
    /// Conjunction of the children.
    All(Vec<Antecedent>),
    /// Disjunction of the children.
    Any(Vec<Antecedent>),
}

impl Antecedent {
    /// Leaf condition `input IS quality`.
    pub const fn is(input: Input, quality: Quality) -> Self {
        Self::Is(input, quality)
    }

    /// Conjoin `other`, flattening nested conjunctions.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::All(mut children) => {
                children.push(other);
                Self::All(children)
            }
            leaf => Self::All(vec![leaf, other]),
        }
    }

    /// Disjoin `other`, flattening nested disjunctions.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Any(mut children) => {
                children.push(other);
                Self::Any(children)
            }
            leaf => Self::Any(vec![leaf, other]),
        }
    }

    /// Truth degree of the condition for the given grades.
    pub fn truth(&self, grades: &Fuzzified) -> f64 {
        match self {
            Self::Is(input, quality) => grades.grade(*input, *quality),
            Self::All(children) => children
                .iter()
                .map(|c| c.truth(grades))
                .fold(1.0, f64::min),
            Self::Any(children) => children
                .iter()
                .map(|c| c.truth(grades))
                .fold(0.0, f64::max),
        }
    }
}

/// `IF antecedent THEN ch_probability IS consequent`, scaled by `weight`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// The condition.
    pub antecedent: Antecedent,
    /// The output term the rule concludes.
    pub consequent: Chance,
    /// Multiplier on the firing strength, in `[0, 1]`.
    pub weight: f64,
}

impl Rule {
    /// Rule with weight 1.
    pub const fn new(antecedent: Antecedent, consequent: Chance) -> Self {
        Self {
            antecedent,
            consequent,
            weight: 1.0,
        }
    }

    /// Replace the weight, clamped to `[0, 1]`. `NaN` becomes 0.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = if weight.is_nan() {
            0.0
        } else {
            weight.clamp(0.0, 1.0)
        };
        self
    }

    /// Degree to which the rule fires for the given grades.
    pub fn firing_strength(&self, grades: &Fuzzified) -> f64 {
        self.antecedent.truth(grades) * self.weight
    }
}

/// The cluster-head rule base, in evaluation order.
///
/// 1. energy good AND distance poor AND density poor => high
/// 2. energy average AND distance average => medium
/// 3. energy poor OR distance good => low
/// 4. density good AND energy good => medium
pub fn cluster_head_rules() -> Vec<Rule> {
    use Input::{DistanceToBs, NodeDensity, ResidualEnergy};
    use Quality::{Average, Good, Poor};

    vec![
        Rule::new(
            Antecedent::is(ResidualEnergy, Good)
                .and(Antecedent::is(DistanceToBs, Poor))
                .and(Antecedent::is(NodeDensity, Poor)),
            Chance::High,
        ),
        Rule::new(
            Antecedent::is(ResidualEnergy, Average).and(Antecedent::is(DistanceToBs, Average)),
            Chance::Medium,
        ),
        Rule::new(
            Antecedent::is(ResidualEnergy, Poor).or(Antecedent::is(DistanceToBs, Good)),
            Chance::Low,
        ),
        Rule::new(
            Antecedent::is(NodeDensity, Good).and(Antecedent::is(ResidualEnergy, Good)),
            Chance::Medium,
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn grades(poor: f64, average: f64, good: f64) -> Grades {
        Grades {
            poor,
            average,
            good,
        }
    }

    fn sample() -> Fuzzified {
        Fuzzified {
            residual_energy: grades(0.0, 0.4, 0.6),
            distance_to_bs: grades(0.7, 0.3, 0.0),
            node_density: grades(0.9, 0.1, 0.0),
        }
    }

    #[test]
    fn and_is_min() {
        let a = Antecedent::is(Input::ResidualEnergy, Quality::Good)
            .and(Antecedent::is(Input::DistanceToBs, Quality::Poor));
        assert_eq!(a.truth(&sample()), 0.6);
    }

    #[test]
    fn or_is_max() {
        let a = Antecedent::is(Input::ResidualEnergy, Quality::Average)
            .or(Antecedent::is(Input::DistanceToBs, Quality::Poor));
        assert_eq!(a.truth(&sample()), 0.7);
    }

    #[test]
    fn and_chains_flatten() {
        let a = Antecedent::is(Input::ResidualEnergy, Quality::Good)
            .and(Antecedent::is(Input::DistanceToBs, Quality::Poor))
            .and(Antecedent::is(Input::NodeDensity, Quality::Poor));
        assert!(
            matches!(&a, Antecedent::All(children) if children.len() == 3),
            "expected flat conjunction, got {a:?}"
        );
    }

    #[test]
    fn empty_connectives_are_identities() {
        assert_eq!(Antecedent::All(Vec::new()).truth(&sample()), 1.0);
        assert_eq!(Antecedent::Any(Vec::new()).truth(&sample()), 0.0);
    }

    #[test]
    fn weight_scales_and_clamps() {
        let rule = Rule::new(Antecedent::is(Input::NodeDensity, Quality::Poor), Chance::Low);
        assert_eq!(rule.firing_strength(&sample()), 0.9);
        let half = rule.clone().with_weight(0.5);
        assert_eq!(half.firing_strength(&sample()), 0.45);
        assert_eq!(rule.clone().with_weight(3.0).weight, 1.0);
        assert_eq!(rule.with_weight(f64::NAN).weight, 0.0);
    }

    #[test]
    fn rule_base_order_and_consequents() {
        let rules = cluster_head_rules();
        let consequents: Vec<Chance> = rules.iter().map(|r| r.consequent).collect();
        assert_eq!(
            consequents,
            vec![Chance::High, Chance::Medium, Chance::Low, Chance::Medium]
        );
        assert!(rules.iter().all(|r| r.weight == 1.0));
    }

    #[test]
    fn rule_base_strengths_on_sample() {
        let strengths: Vec<f64> = cluster_head_rules()
            .iter()
            .map(|r| r.firing_strength(&sample()))
            .collect();
        // 1: min(0.6, 0.7, 0.9); 2: min(0.4, 0.3); 3: max(0.0, 0.0); 4: min(0.0, 0.6)
        assert_eq!(strengths, vec![0.6, 0.3, 0.0, 0.0]);
    }
}
