//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;
use std::ops::AddAssign;

/// Euclidean distance between two points of any dimension.
///
/// Returns `None` if the points have different dimensions.
pub fn norm<T>(point_0: &[T], point_1: &[T]) -> Option<T>
where
    T: Float + AddAssign,
{
    if point_0.len() != point_1.len() {
        return None;
    }

    let mut sum_sq = T::zero();
    for (a, b) in point_0.iter().zip(point_1.iter()) {
        sum_sq += (*a - *b).powi(2);
    }

    Some(sum_sq.sqrt())
}

/// Determine if `value` lies within the closed range `[min, max]`.
pub fn in_range<T>(value: T, min: T, max: T) -> bool
where
    T: Float,
{
    value >= min && value <= max
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_norm() {
        assert_eq!(norm(&[0f64, 0.0, 0.0], &[3.0, 4.0, 0.0]), Some(5.0));
        assert_eq!(norm(&[1f64, 2.0, 3.0], &[1.0, 2.0, 3.0]), Some(0.0));
        assert_eq!(norm(&[1f64, 2.0], &[1.0, 2.0, 3.0]), None);
    }

    #[test]
    fn test_in_range() {
        assert!(in_range(0.05f64, 0.05, 20.0));
        assert!(in_range(20f64, 0.05, 20.0));
        assert!(!in_range(20.01f64, 0.05, 20.0));
        assert!(!in_range(f64::NAN, 0.05, 20.0));
    }
}
