//! Linear water-wave dispersion relation.
//!
//! Solves `omega^2 = g k tanh(k h)` for the wavenumber `k` given a wave
//! period and water depth, and derives the quantities that the diffraction
//! models need (wavelength, relative depth, deep-water equivalents).

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{DiffractionError, Result};

/// Gravitational acceleration (m/s^2).
pub const GRAVITY: f64 = 9.81;

/// Maximum Newton-Raphson iterations for the dispersion solve.
const MAX_ITER: usize = 60;

/// Relative step tolerance for convergence.
const STEP_TOL: f64 = 1e-12;

/// Solve the dispersion relation for the wavenumber `k` (rad/m).
///
/// Newton-Raphson on `f(k) = g k tanh(kh) - omega^2` starting from the
/// deep-water seed `k0 = omega^2 / g`. The iterate is floored at a tiny
/// positive value whenever an overshoot drives it non-positive, so the
/// solver never leaves the physical branch `k > 0`.
///
/// # Errors
///
/// Returns `InvalidParameter` for non-finite or non-positive inputs and
/// `Divergence` if the iteration produces a non-finite wavenumber.
///
/// # Example
/// ```
/// use wave_diffraction::dispersion::{solve_wavenumber, GRAVITY};
/// use std::f64::consts::PI;
///
/// let k = solve_wavenumber(8.0, 10.0).unwrap();
/// let omega = 2.0 * PI / 8.0;
/// let residual = GRAVITY * k * (k * 10.0).tanh() - omega * omega;
/// assert!(residual.abs() < 1e-9);
/// ```
pub fn solve_wavenumber(period: f64, depth: f64) -> Result<f64> {
    if !period.is_finite() || period <= 0.0 {
        return Err(DiffractionError::InvalidParameter {
            name: "period",
            value: period,
            constraint: "finite and > 0",
        });
    }
    if !depth.is_finite() || depth <= 0.0 {
        return Err(DiffractionError::InvalidParameter {
            name: "depth",
            value: depth,
            constraint: "finite and > 0",
        });
    }

    let omega = 2.0 * PI / period;
    let target = omega * omega;

    // Deep-water guess omega^2 = g k
    let mut k = target / GRAVITY;
    if !k.is_finite() || k <= 0.0 {
        k = 1e-3;
    }

    for _ in 0..MAX_ITER {
        let kh = k * depth;
        let th = kh.tanh();
        let f = GRAVITY * k * th - target;

        let sech = 1.0 / kh.cosh();
        let dfdk = GRAVITY * (th + kh * sech * sech);
        if !dfdk.is_finite() || dfdk == 0.0 {
            break;
        }

        let dk = f / dfdk;
        k -= dk;

        if !k.is_finite() {
            return Err(DiffractionError::Divergence { period, depth });
        }
        if dk.abs() < STEP_TOL * k.abs().max(1.0) {
            break;
        }
        if k <= 0.0 {
            k = 1e-8;
        }
    }

    if !k.is_finite() || k <= 0.0 {
        return Err(DiffractionError::Divergence { period, depth });
    }
    Ok(k)
}

/// A wave condition with all quantities derived from (period, depth).
///
/// Immutable once constructed; nothing is stored redundantly with respect
/// to the dispersion solve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WaveCondition {
    /// Wave period T (s)
    pub period: f64,
    /// Water depth h (m)
    pub depth: f64,
    /// Angular frequency omega = 2 pi / T (rad/s)
    pub omega: f64,
    /// Wavenumber k (rad/m), root of the dispersion relation
    pub wavenumber: f64,
    /// Wavelength L = 2 pi / k (m)
    pub wavelength: f64,
    /// Relative depth kh (dimensionless)
    pub relative_depth: f64,
    /// Deep-water wavelength L0 = g T^2 / (2 pi) (m)
    pub deep_wavelength: f64,
    /// Deep-water wavenumber k0 = 2 pi / L0 (rad/m)
    pub deep_wavenumber: f64,
}

impl WaveCondition {
    /// Solve the dispersion relation and derive all wave quantities.
    ///
    /// # Errors
    ///
    /// Propagates the `solve_wavenumber` errors for invalid inputs or a
    /// diverging solve.
    pub fn new(period: f64, depth: f64) -> Result<Self> {
        let wavenumber = solve_wavenumber(period, depth)?;
        let omega = 2.0 * PI / period;
        let wavelength = 2.0 * PI / wavenumber;
        let deep_wavelength = GRAVITY * period * period / (2.0 * PI);
        let deep_wavenumber = 2.0 * PI / deep_wavelength;

        Ok(Self {
            period,
            depth,
            omega,
            wavenumber,
            wavelength,
            relative_depth: wavenumber * depth,
            deep_wavelength,
            deep_wavenumber,
        })
    }

    /// Phase speed c = omega / k (m/s).
    pub fn phase_speed(&self) -> f64 {
        self.omega / self.wavenumber
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn residual(k: f64, period: f64, depth: f64) -> f64 {
        let omega = 2.0 * PI / period;
        GRAVITY * k * (k * depth).tanh() - omega * omega
    }

    #[test]
    fn test_dispersion_residual() {
        for &(period, depth) in &[
            (4.0, 2.0),
            (8.0, 10.0),
            (12.0, 50.0),
            (6.0, 0.5),
            (15.0, 3000.0),
        ] {
            let k = solve_wavenumber(period, depth).unwrap();
            assert!(k > 0.0);
            let omega = 2.0 * PI / period;
            let tol = 1e-9 * (omega * omega).max(1.0);
            assert!(
                residual(k, period, depth).abs() < tol,
                "residual too large for T={}, h={}",
                period,
                depth
            );
        }
    }

    #[test]
    fn test_deep_water_limit() {
        // kh >> 1: the wavelength approaches L0 = g T^2 / (2 pi)
        let wave = WaveCondition::new(8.0, 5000.0).unwrap();
        assert!(wave.relative_depth > 10.0);
        assert_relative_eq!(wave.wavelength, wave.deep_wavelength, max_relative = 1e-3);
    }

    #[test]
    fn test_shallow_water_limit() {
        // kh << 1: the phase speed approaches sqrt(g h)
        let wave = WaveCondition::new(60.0, 1.0).unwrap();
        assert!(wave.relative_depth < 0.3);
        assert_relative_eq!(
            wave.phase_speed(),
            (GRAVITY * wave.depth).sqrt(),
            max_relative = 1e-2
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(solve_wavenumber(0.0, 10.0).is_err());
        assert!(solve_wavenumber(8.0, -1.0).is_err());
        assert!(solve_wavenumber(f64::NAN, 10.0).is_err());
        assert!(solve_wavenumber(8.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_wave_condition_consistency() {
        let wave = WaveCondition::new(10.0, 8.0).unwrap();
        assert_relative_eq!(wave.wavelength * wave.wavenumber, 2.0 * PI, epsilon = 1e-12);
        assert_relative_eq!(wave.relative_depth, wave.wavenumber * 8.0, epsilon = 1e-12);
        assert_relative_eq!(
            wave.deep_wavenumber * wave.deep_wavelength,
            2.0 * PI,
            epsilon = 1e-12
        );
        // Finite depth shortens the wave relative to deep water
        assert!(wave.wavelength < wave.deep_wavelength);
    }
}
