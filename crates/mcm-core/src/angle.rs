// ABOUTME: Hue angle constants and helpers.
// ABOUTME: Angles are radians normalized into the half-open range (-PI, PI].

use std::f64::consts::{PI, TAU};

pub const PI_60: f64 = PI / 3.0;
pub const PI_120: f64 = PI * 2.0 / 3.0;

/// sin(120 degrees)
pub const SIN_120: f64 = 0.866_025_403_784_438_6;
/// cos(120 degrees), exact
pub const COS_120: f64 = -0.5;

/// Bring an angle into (-PI, PI]. Non-finite input yields NaN.
pub fn normalize(angle: f64) -> f64 {
    if !angle.is_finite() {
        return f64::NAN;
    }
    let mut result = angle % TAU;
    if result > PI {
        result -= TAU;
    } else if result <= -PI {
        result += TAU;
    }
    result
}

/// Signed rotation taking `from` onto `to`
pub fn difference(to: f64, from: f64) -> f64 {
    normalize(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normalize_wraps() {
        assert_abs_diff_eq!(normalize(PI + 0.5), -PI + 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize(-PI - 0.5), PI - 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize(5.0 * TAU + 1.0), 1.0, epsilon = 1e-9);
        assert_eq!(normalize(-PI), PI);
        assert_eq!(normalize(PI), PI);
    }

    #[test]
    fn test_normalize_non_finite() {
        assert!(normalize(f64::INFINITY).is_nan());
        assert!(normalize(f64::NAN).is_nan());
    }

    #[test]
    fn test_difference_crosses_branch_cut() {
        let d = difference(-PI + 0.1, PI - 0.1);
        assert_abs_diff_eq!(d, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_sin_120_constant() {
        assert_abs_diff_eq!(SIN_120, PI_120.sin(), epsilon = 1e-15);
    }
}
