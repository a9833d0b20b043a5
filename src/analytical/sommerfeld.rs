//! Sommerfeld/Penney-Price diffraction for a semi-infinite breakwater.
//!
//! The diffracted field behind a thin semi-infinite barrier is the sum of
//! two half-plane contributions, one for the direct wave and one for the
//! reflected wave, each weighted by the complex Sommerfeld factor
//!
//! ```text
//! F(sigma) = (1 + i)/2 * ( (1 - i)/2 + C(sigma) - i S(sigma) )
//! ```
//!
//! where C, S are the Fresnel integrals. The diffraction coefficient Kd is
//! the modulus of the combined complex amplitude, clamped to [0, 1].

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::special::{fresnel, FresnelPair};

/// Floor applied to the tip distance r to avoid the r = 0 singularity in
/// the geometric-spreading factor. Keeps Kd continuous at the tip.
pub const MIN_TIP_DISTANCE: f64 = 1e-6;

/// Complex Sommerfeld/Penney-Price diffraction factor F(sigma).
///
/// Pure and total; |F(0)| = 0.5, F -> 1 as sigma -> +inf and F -> 0 as
/// sigma -> -inf.
pub fn diffraction_factor(sigma: f64) -> Complex64 {
    let FresnelPair { c, s } = fresnel(sigma);
    let inside = Complex64::new(0.5 + c, -(0.5 + s));
    Complex64::new(0.5, 0.5) * inside
}

/// Diffraction coefficient at one field point behind a semi-infinite
/// breakwater with its tip at the origin.
///
/// `r` and `theta` are polar coordinates of the field point relative to
/// the tip; `theta0` is the incident wave direction. Both angles are in
/// radians and `theta` must already be normalized to [0, 2 pi); see
/// [`crate::analytical::normalize_angle`]. `wavelength` is the local
/// wavelength L from the dispersion solve.
///
/// Never fails: returns a finite value in [0, 1] for finite inputs and
/// propagates NaN otherwise.
pub fn kd_semi_infinite(r: f64, theta: f64, wavelength: f64, theta0: f64) -> f64 {
    // Comparison keeps NaN radii propagating instead of flooring them
    let r = if r < MIN_TIP_DISTANCE { MIN_TIP_DISTANCE } else { r };

    let k = 2.0 * PI / wavelength;
    let fac = 2.0 * (k * r / PI).sqrt();

    let sigma1 = fac * (0.5 * (theta - theta0)).sin();
    let sigma2 = -fac * (0.5 * (theta + theta0)).sin();

    let f1 = diffraction_factor(sigma1);
    let f2 = diffraction_factor(sigma2);

    let phase1 = -k * r * (theta - theta0).cos();
    let phase2 = -k * r * (theta + theta0).cos();

    let total = f1 * Complex64::from_polar(1.0, phase1) + f2 * Complex64::from_polar(1.0, phase2);

    // clamp preserves NaN, so undefined results still propagate
    total.norm().clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_factor_at_zero() {
        let f = diffraction_factor(0.0);
        assert_abs_diff_eq!(f.norm(), 0.5, epsilon = 1e-12);
        // F(0) = (0.5 + 0.5i)(0.5 - 0.5i) = 0.5 exactly
        assert_abs_diff_eq!(f.re, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(f.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_factor_limits() {
        // Fully illuminated: F -> 1; deep shadow: F -> 0
        let lit = diffraction_factor(50.0);
        assert_abs_diff_eq!(lit.norm(), 1.0, epsilon = 1e-2);

        let shadow = diffraction_factor(-50.0);
        assert!(shadow.norm() < 1e-2);
    }

    #[test]
    fn test_kd_bounds() {
        let theta0 = PI / 2.0;
        for i in 0..40 {
            let theta = i as f64 * 2.0 * PI / 40.0;
            for &r in &[0.0, 0.5, 3.0, 25.0, 400.0] {
                let kd = kd_semi_infinite(r, theta, 10.0, theta0);
                assert!(kd.is_finite());
                assert!((0.0..=1.0).contains(&kd), "kd = {} out of range", kd);
            }
        }
    }

    #[test]
    fn test_shadow_boundary() {
        // On the geometric shadow line (theta = theta0), far from the tip,
        // the coefficient tends to 1/2
        let wavelength = 10.0;
        let theta0 = PI / 2.0;
        let kd = kd_semi_infinite(100.0 * wavelength, theta0, wavelength, theta0);
        assert_abs_diff_eq!(kd, 0.5, epsilon = 0.05);
    }

    #[test]
    fn test_illuminated_region() {
        // Deep in the illuminated region the incident wave dominates
        let wavelength = 10.0;
        let theta0 = PI / 2.0;
        let kd = kd_semi_infinite(100.0 * wavelength, PI, wavelength, theta0);
        assert!(kd > 0.85, "kd = {} too small in lit region", kd);
    }

    #[test]
    fn test_deep_shadow() {
        // Close to the barrier on the sheltered side the coefficient is small
        let wavelength = 10.0;
        let theta0 = PI / 2.0;
        let kd = kd_semi_infinite(100.0 * wavelength, 0.05, wavelength, theta0);
        assert!(kd < 0.2, "kd = {} too large in deep shadow", kd);
    }

    #[test]
    fn test_tip_singularity_guarded() {
        let kd = kd_semi_infinite(0.0, PI, 10.0, PI / 2.0);
        assert!(kd.is_finite());
        // Continuity: the floored value matches a nearby small radius
        let near = kd_semi_infinite(MIN_TIP_DISTANCE, PI, 10.0, PI / 2.0);
        assert_abs_diff_eq!(kd, near, epsilon = 1e-9);
    }

    #[test]
    fn test_nan_propagation() {
        assert!(kd_semi_infinite(f64::NAN, PI, 10.0, PI / 2.0).is_nan());
        assert!(kd_semi_infinite(5.0, PI, f64::NAN, PI / 2.0).is_nan());
    }
}
