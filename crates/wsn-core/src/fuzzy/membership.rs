//! Triangular membership functions.

use super::FuzzyError;

/// A triangular membership function with breakpoints `left <= peak <= right`.
///
/// Membership rises linearly from 0 at `left` to 1 at `peak` and falls back
/// to 0 at `right`. Setting `left == peak` (or `peak == right`) produces a
/// shoulder: the function is 1 at that edge and ramps only on one side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    left: f64,
    peak: f64,
    right: f64,
}

impl Triangle {
    /// Create a triangle from its three breakpoints.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzyError::InvalidShape`] if any breakpoint is not finite
    /// or the breakpoints are not ordered.
    pub fn new(left: f64, peak: f64, right: f64) -> Result<Self, FuzzyError> {
        if !(left.is_finite() && peak.is_finite() && right.is_finite()) {
            return Err(FuzzyError::InvalidShape {
                reason: format!("breakpoints must be finite, got ({left}, {peak}, {right})"),
            });
        }
        if left > peak || peak > right {
            return Err(FuzzyError::InvalidShape {
                reason: format!("breakpoints must be ordered, got ({left}, {peak}, {right})"),
            });
        }
        Ok(Self { left, peak, right })
    }

    /// Left foot of the triangle.
    pub const fn left(&self) -> f64 {
        self.left
    }

    /// Point of full membership.
    pub const fn peak(&self) -> f64 {
        self.peak
    }

    /// Right foot of the triangle.
    pub const fn right(&self) -> f64 {
        self.right
    }

    /// Degree of membership of `x`, in `[0, 1]`. `NaN` grades as 0.
    pub fn grade(&self, x: f64) -> f64 {
        if x.is_nan() || x < self.left || x > self.right {
            0.0
        } else if x < self.peak {
            // x >= left and x < peak, so peak > left.
            (x - self.left) / (self.peak - self.left)
        } else if x > self.peak {
            (self.right - x) / (self.right - self.peak)
        } else {
            1.0
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn symmetric_triangle() {
        let t = Triangle::new(0.2, 0.5, 0.8).unwrap();
        assert_eq!(t.grade(0.5), 1.0);
        assert!((t.grade(0.35) - 0.5).abs() < TOLERANCE);
        assert!((t.grade(0.65) - 0.5).abs() < TOLERANCE);
        assert_eq!(t.grade(0.2), 0.0);
        assert_eq!(t.grade(0.8), 0.0);
        assert_eq!(t.grade(0.1), 0.0);
        assert_eq!(t.grade(0.9), 0.0);
    }

    #[test]
    fn left_shoulder() {
        let t = Triangle::new(0.0, 0.0, 0.5).unwrap();
        assert_eq!(t.grade(0.0), 1.0);
        assert!((t.grade(0.25) - 0.5).abs() < TOLERANCE);
        assert_eq!(t.grade(0.5), 0.0);
        assert_eq!(t.grade(-0.1), 0.0);
    }

    #[test]
    fn right_shoulder() {
        let t = Triangle::new(0.5, 1.0, 1.0).unwrap();
        assert_eq!(t.grade(1.0), 1.0);
        assert!((t.grade(0.75) - 0.5).abs() < TOLERANCE);
        assert_eq!(t.grade(1.1), 0.0);
    }

    #[test]
    fn nan_grades_zero() {
        let t = Triangle::new(0.0, 0.5, 1.0).unwrap();
        assert_eq!(t.grade(f64::NAN), 0.0);
    }

    #[test]
    fn unordered_breakpoints_rejected() {
        assert!(matches!(
            Triangle::new(0.5, 0.2, 0.8),
            Err(FuzzyError::InvalidShape { .. })
        ));
        assert!(Triangle::new(0.0, 0.9, 0.8).is_err());
    }

    #[test]
    fn non_finite_breakpoints_rejected() {
        assert!(Triangle::new(f64::NEG_INFINITY, 0.0, 1.0).is_err());
        assert!(Triangle::new(0.0, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn accessors() {
        let t = Triangle::new(1.0, 2.0, 3.0).unwrap();
        assert_eq!((t.left(), t.peak(), t.right()), (1.0, 2.0, 3.0));
    }
}
