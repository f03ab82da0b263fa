//! Planar geometry helpers.

use wsn_types::Point;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let p = Point::new(3.5, -2.0);
        assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn three_four_five() {
        assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(12.0, 80.0);
        let b = Point::new(99.0, 1.5);
        assert_eq!(distance(a, b), distance(b, a));
    }
}
