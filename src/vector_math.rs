//! Basic vector math helper functions.
//! Small helpers for angles, perpendiculars and normalised directions in the
//! top-down plane.
use glam::Vec2;

/// Squared lengths below this are treated as the zero vector.
const DEGENERATE_LENGTH_SQ: f32 = 1e-12;

/// Returns the unsigned angle between two vectors in degrees.
///
/// The result lies in `0.0..=180.0`. When either vector is degenerate the
/// angle is reported as `0.0`, mirroring how game engines treat zero vectors.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use cursor_pilot::vector_math::angle_between_deg;
/// let right_angle = angle_between_deg(Vec2::X, Vec2::Y);
/// assert!((right_angle - 90.0).abs() < 1e-4);
/// assert_eq!(angle_between_deg(Vec2::ZERO, Vec2::Y), 0.0);
/// ```
#[must_use]
pub fn angle_between_deg(from: Vec2, to: Vec2) -> f32 {
    let denominator = (from.length_squared() * to.length_squared()).sqrt();
    if !denominator.is_finite() || denominator < DEGENERATE_LENGTH_SQ {
        return 0.0;
    }
    let cosine = (from.dot(to) / denominator).clamp(-1.0, 1.0);
    cosine.acos().to_degrees()
}

/// Returns the direction rotated 90 degrees counter-clockwise.
#[must_use]
pub fn perpendicular_left(direction: Vec2) -> Vec2 {
    Vec2::new(-direction.y, direction.x)
}

/// Returns the direction rotated 90 degrees clockwise.
#[must_use]
pub fn perpendicular_right(direction: Vec2) -> Vec2 {
    Vec2::new(direction.y, -direction.x)
}

/// Returns the unit vector in the direction of `vector`.
///
/// Non-finite and zero-length inputs yield [`Vec2::ZERO`].
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use cursor_pilot::vec_normalize;
/// let unit = vec_normalize(Vec2::new(3.0, 4.0));
/// assert!((unit.x - 0.6).abs() < 1e-6);
/// assert!((unit.y - 0.8).abs() < 1e-6);
/// assert_eq!(vec_normalize(Vec2::ZERO), Vec2::ZERO);
/// ```
#[must_use]
pub fn vec_normalize(vector: Vec2) -> Vec2 {
    if !vector.is_finite() {
        return Vec2::ZERO;
    }
    vector.try_normalize().unwrap_or(Vec2::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::same(Vec2::X, Vec2::X, 0.0)]
    #[case::opposite(Vec2::X, Vec2::NEG_X, 180.0)]
    #[case::diagonal(Vec2::X, Vec2::ONE, 45.0)]
    #[case::scale_invariant(Vec2::new(0.0, 5.0), Vec2::new(-0.1, 0.0), 90.0)]
    fn angle_cases(#[case] from: Vec2, #[case] to: Vec2, #[case] expected: f32) {
        assert_relative_eq!(angle_between_deg(from, to), expected, epsilon = 1e-3);
    }

    #[rstest]
    fn perpendiculars_are_orthogonal_and_opposite() {
        let direction = Vec2::new(0.6, 0.8);
        let left = perpendicular_left(direction);
        let right = perpendicular_right(direction);
        assert_relative_eq!(left.dot(direction), 0.0);
        assert_eq!(left, -right);
        assert!(direction.perp_dot(left) > 0.0);
    }

    #[rstest]
    fn normalize_rejects_nan() {
        assert_eq!(vec_normalize(Vec2::new(f32::NAN, 1.0)), Vec2::ZERO);
    }
}
