//! Universes of discourse and linguistic variables.
//!
//! Antecedent variables are partitioned automatically into three
//! overlapping triangles named after the quality of the measurement
//! ([`Quality`]). The consequent variable carries three explicitly shaped
//! terms ([`Chance`]).

use super::FuzzyError;
use super::membership::Triangle;

/// Upper bound on the number of samples a universe may hold.
pub const MAX_UNIVERSE_SAMPLES: usize = 100_000;

/// A sampled universe of discourse.
///
/// Built like a half-open `arange`: samples are `start + k * step` for every
/// `k` with the sample strictly below `stop`. The sampled minimum and maximum
/// define the variable's nominal range.
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    samples: Vec<f64>,
    min: f64,
    max: f64,
}

impl Universe {
    /// Sample `[start, stop)` with the given step.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzyError::InvalidUniverse`] if the bounds or step are not
    /// finite, the step is not positive, the range is empty, or it would
    /// produce more than [`MAX_UNIVERSE_SAMPLES`] samples.
    pub fn arange(start: f64, stop: f64, step: f64) -> Result<Self, FuzzyError> {
        if !(start.is_finite() && stop.is_finite() && step.is_finite()) || step <= 0.0 {
            return Err(FuzzyError::InvalidUniverse {
                reason: format!("need finite bounds and a positive step, got {start}..{stop} by {step}"),
            });
        }
        if start >= stop {
            return Err(FuzzyError::InvalidUniverse {
                reason: format!("empty range {start}..{stop}"),
            });
        }

        let mut samples = Vec::new();
        let mut k: u32 = 0;
        loop {
            let value = f64::from(k).mul_add(step, start);
            if value >= stop {
                break;
            }
            if samples.len() >= MAX_UNIVERSE_SAMPLES {
                return Err(FuzzyError::InvalidUniverse {
                    reason: format!("more than {MAX_UNIVERSE_SAMPLES} samples"),
                });
            }
            samples.push(value);
            k = k.checked_add(1).ok_or_else(|| FuzzyError::InvalidUniverse {
                reason: String::from("sample counter overflow"),
            })?;
        }

        // `start < stop` guarantees at least one sample.
        let min = samples.first().copied().unwrap_or(start);
        let max = samples.last().copied().unwrap_or(start);
        Ok(Self { samples, min, max })
    }

    /// The sample points in ascending order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Smallest sample.
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Largest sample.
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Clamp a crisp value into `[min, max]`.
    pub fn clip(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// Term labels
// ---------------------------------------------------------------------------

/// Term labels of an automatically partitioned antecedent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quality {
    /// Low end of the universe.
    Poor,
    /// Middle of the universe.
    Average,
    /// High end of the universe.
    Good,
}

impl Quality {
    /// All labels from low to high.
    pub const ALL: [Self; 3] = [Self::Poor, Self::Average, Self::Good];

    /// Lower-case label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::Average => "average",
            Self::Good => "good",
        }
    }
}

/// Term labels of the cluster-head probability output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Chance {
    /// Unlikely cluster head.
    Low,
    /// Plausible cluster head.
    Medium,
    /// Strong cluster head.
    High,
}

impl Chance {
    /// All labels from low to high.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Lower-case label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

// ---------------------------------------------------------------------------
// Antecedent variables
// ---------------------------------------------------------------------------

/// Membership degrees of one crisp value in the three quality terms.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Grades {
    /// Degree in `poor`.
    pub poor: f64,
    /// Degree in `average`.
    pub average: f64,
    /// Degree in `good`.
    pub good: f64,
}

impl Grades {
    /// Degree in the given term.
    pub const fn of(&self, quality: Quality) -> f64 {
        match quality {
            Quality::Poor => self.poor,
            Quality::Average => self.average,
            Quality::Good => self.good,
        }
    }

    /// The term with the highest degree; ties go to the lower term.
    pub fn dominant(&self) -> Quality {
        Quality::ALL
            .into_iter()
            .fold(Quality::Poor, |best, q| if self.of(q) > self.of(best) { q } else { best })
    }
}

/// An antecedent variable partitioned into poor / average / good.
#[derive(Debug, Clone, PartialEq)]
pub struct InputVariable {
    name: &'static str,
    universe: Universe,
    poor: Triangle,
    average: Triangle,
    good: Triangle,
}

impl InputVariable {
    /// Partition a universe into three uniform overlapping triangles.
    ///
    /// With `lo` and `hi` the universe bounds, `r = hi - lo` and
    /// `mid = lo + r / 2`:
    ///
    /// - `poor    = (lo - r/2, lo,  mid)`
    /// - `average = (lo,       mid, hi)`
    /// - `good    = (mid,      hi,  hi + r/2)`
    ///
    /// Every triangle has base width `r`, so neighbouring terms cross at
    /// membership 0.5 (at the quarter points) and at least one term is
    /// non-zero anywhere inside the universe. Inside `[lo, hi]` the outer
    /// terms behave as shoulders.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzyError::InvalidShape`] only if the universe bounds are
    /// so large that the outer feet overflow to infinity.
    pub fn auto_partition(name: &'static str, universe: Universe) -> Result<Self, FuzzyError> {
        let lo = universe.min();
        let hi = universe.max();
        let half = (hi - lo) / 2.0;
        let mid = lo + half;

        let poor = Triangle::new(lo - half, lo, mid)?;
        let average = Triangle::new(lo, mid, hi)?;
        let good = Triangle::new(mid, hi, hi + half)?;

        Ok(Self {
            name,
            universe,
            poor,
            average,
            good,
        })
    }

    /// Variable name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The sampled universe.
    pub const fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Membership function of a term.
    pub const fn term(&self, quality: Quality) -> &Triangle {
        match quality {
            Quality::Poor => &self.poor,
            Quality::Average => &self.average,
            Quality::Good => &self.good,
        }
    }

    /// Grade a crisp value against all three terms.
    ///
    /// Values outside the universe are clipped to the nearest bound first,
    /// so they saturate at the boundary term.
    pub fn fuzzify(&self, x: f64) -> Grades {
        let x = self.universe.clip(x);
        Grades {
            poor: self.poor.grade(x),
            average: self.average.grade(x),
            good: self.good.grade(x),
        }
    }
}

// ---------------------------------------------------------------------------
// Consequent variable
// ---------------------------------------------------------------------------

/// The consequent variable with explicitly shaped low / medium / high terms.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputVariable {
    name: &'static str,
    universe: Universe,
    low: Triangle,
    medium: Triangle,
    high: Triangle,
}

impl OutputVariable {
    /// Build the consequent from its universe and term shapes.
    pub const fn new(
        name: &'static str,
        universe: Universe,
        low: Triangle,
        medium: Triangle,
        high: Triangle,
    ) -> Self {
        Self {
            name,
            universe,
            low,
            medium,
            high,
        }
    }

    /// Variable name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The sampled universe.
    pub const fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Membership function of a term.
    pub const fn term(&self, chance: Chance) -> &Triangle {
        match chance {
            Chance::Low => &self.low,
            Chance::Medium => &self.medium,
            Chance::High => &self.high,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn arange_excludes_stop() {
        let u = Universe::arange(0.0, 150.0, 10.0).unwrap();
        assert_eq!(u.samples().len(), 15);
        assert_eq!(u.min(), 0.0);
        assert_eq!(u.max(), 140.0);
    }

    #[test]
    fn arange_fractional_step() {
        let u = Universe::arange(0.0, 1.1, 0.1).unwrap();
        assert_eq!(u.samples().len(), 11);
        assert!((u.max() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn arange_unit_step() {
        let u = Universe::arange(0.0, 20.0, 1.0).unwrap();
        assert_eq!(u.samples().len(), 20);
        assert_eq!(u.max(), 19.0);
    }

    #[test]
    fn arange_rejects_bad_input() {
        assert!(Universe::arange(0.0, 1.0, 0.0).is_err());
        assert!(Universe::arange(0.0, 1.0, -0.1).is_err());
        assert!(Universe::arange(1.0, 1.0, 0.1).is_err());
        assert!(Universe::arange(0.0, f64::INFINITY, 1.0).is_err());
        assert!(Universe::arange(0.0, 1e9, 1.0).is_err());
    }

    #[test]
    fn clip_saturates() {
        let u = Universe::arange(0.0, 20.0, 1.0).unwrap();
        assert_eq!(u.clip(-3.0), 0.0);
        assert_eq!(u.clip(29.0), 19.0);
        assert_eq!(u.clip(7.5), 7.5);
    }

    #[test]
    fn auto_partition_shapes() {
        let u = Universe::arange(0.0, 150.0, 10.0).unwrap();
        let v = InputVariable::auto_partition("distance_to_bs", u).unwrap();
        let poor = v.term(Quality::Poor);
        let average = v.term(Quality::Average);
        let good = v.term(Quality::Good);
        assert_eq!((poor.left(), poor.peak(), poor.right()), (-70.0, 0.0, 70.0));
        assert_eq!((average.left(), average.peak(), average.right()), (0.0, 70.0, 140.0));
        assert_eq!((good.left(), good.peak(), good.right()), (70.0, 140.0, 210.0));
    }

    #[test]
    fn auto_partition_crosses_at_half() {
        let u = Universe::arange(0.0, 20.0, 1.0).unwrap();
        let v = InputVariable::auto_partition("node_density", u).unwrap();
        // Quarter points of [0, 19].
        let low_cross = v.fuzzify(4.75);
        assert!((low_cross.poor - 0.5).abs() < TOLERANCE);
        assert!((low_cross.average - 0.5).abs() < TOLERANCE);
        assert_eq!(low_cross.good, 0.0);

        let high_cross = v.fuzzify(14.25);
        assert!((high_cross.average - 0.5).abs() < TOLERANCE);
        assert!((high_cross.good - 0.5).abs() < TOLERANCE);
        assert_eq!(high_cross.poor, 0.0);
    }

    #[test]
    fn auto_partition_covers_universe() {
        let u = Universe::arange(0.0, 1.1, 0.1).unwrap();
        let v = InputVariable::auto_partition("residual_energy", u).unwrap();
        for &x in v.universe().samples() {
            let g = v.fuzzify(x);
            assert!(g.poor + g.average + g.good > 0.0, "uncovered at {x}");
            assert!((g.poor + g.average + g.good - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn fuzzify_extremes_saturate() {
        let u = Universe::arange(0.0, 150.0, 10.0).unwrap();
        let v = InputVariable::auto_partition("distance_to_bs", u).unwrap();
        let near = v.fuzzify(-5.0);
        assert_eq!(near, Grades { poor: 1.0, average: 0.0, good: 0.0 });
        let far = v.fuzzify(500.0);
        assert_eq!(far, Grades { poor: 0.0, average: 0.0, good: 1.0 });
    }

    #[test]
    fn grades_lookup_by_quality() {
        let g = Grades { poor: 0.1, average: 0.2, good: 0.3 };
        let values: Vec<f64> = Quality::ALL.iter().map(|&q| g.of(q)).collect();
        assert_eq!(values, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn dominant_term_prefers_lower_on_ties() {
        let crossing = Grades { poor: 0.5, average: 0.5, good: 0.0 };
        assert_eq!(crossing.dominant(), Quality::Poor);
        let high = Grades { poor: 0.0, average: 0.25, good: 0.75 };
        assert_eq!(high.dominant(), Quality::Good);
        assert_eq!(Grades::default().dominant(), Quality::Poor);
    }

    #[test]
    fn labels() {
        assert_eq!(Quality::Average.label(), "average");
        assert_eq!(Chance::High.label(), "high");
        assert_eq!(Chance::ALL.len(), 3);
    }
}
