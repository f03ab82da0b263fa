//! Centroid defuzzification over a sampled output set.

/// Centre of gravity of a sampled membership curve.
///
/// The curve is treated as piecewise linear between samples: each segment
/// is a trapezoid whose area and centroid are accumulated. Returns `None`
/// when the curve has no area (every grade is zero), since the centroid of
/// an empty set is undefined. A single-sample universe returns that sample
/// when its grade is positive.
///
/// `universe` must be ascending; extra trailing entries in the longer of
/// the two slices are ignored.
pub fn centroid(universe: &[f64], grades: &[f64]) -> Option<f64> {
    if let ([x], [y, ..]) = (universe, grades) {
        return (*y > 0.0).then_some(*x);
    }

    let mut moment = 0.0;
    let mut area = 0.0;
    for (xs, ys) in universe.windows(2).zip(grades.windows(2)) {
        let (&[x1, x2], &[y1, y2]) = (xs, ys) else {
            continue;
        };
        let width = x2 - x1;
        let height = y1 + y2;
        if width <= 0.0 || height <= 0.0 {
            continue;
        }
        let segment_area = 0.5 * width * height;
        // Centroid of a trapezoid with parallel sides y1 (at x1) and y2 (at x2).
        let segment_centroid = x1 + (2.0 / 3.0) * width * 0.5_f64.mul_add(y1, y2) / height;
        moment = segment_centroid.mul_add(segment_area, moment);
        area += segment_area;
    }

    (area > 0.0).then_some(moment / area)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn unit_universe() -> Vec<f64> {
        (0..=10).map(|k| f64::from(k) / 10.0).collect()
    }

    #[test]
    fn empty_set_has_no_centroid() {
        let u = unit_universe();
        assert_eq!(centroid(&u, &[0.0; 11]), None);
        assert_eq!(centroid(&[], &[]), None);
    }

    #[test]
    fn flat_set_centres_on_midpoint() {
        let u = unit_universe();
        let c = centroid(&u, &[0.4; 11]).unwrap();
        assert!((c - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn rising_ramp_centroid_is_two_thirds() {
        // Triangle from (0.5, 0) to (1.0, 1).
        let u = unit_universe();
        let grades: Vec<f64> = u.iter().map(|&x| ((x - 0.5) / 0.5).max(0.0)).collect();
        let c = centroid(&u, &grades).unwrap();
        assert!((c - (0.5 + 0.5 * 2.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn falling_ramp_centroid_is_one_third() {
        // Triangle from (0, 1) to (0.5, 0).
        let u = unit_universe();
        let grades: Vec<f64> = u.iter().map(|&x| (1.0 - x / 0.5).max(0.0)).collect();
        let c = centroid(&u, &grades).unwrap();
        assert!((c - 0.5 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn symmetric_set_centres_on_axis() {
        let u = unit_universe();
        let grades = [0.0, 0.0, 0.0, 0.3, 0.3, 0.3, 0.3, 0.3, 0.0, 0.0, 0.0];
        let c = centroid(&u, &grades).unwrap();
        assert!((c - 0.5).abs() < 1e-9);
    }

    #[test]
    fn single_sample_universe() {
        assert_eq!(centroid(&[0.7], &[0.2]), Some(0.7));
        assert_eq!(centroid(&[0.7], &[0.0]), None);
    }
}
