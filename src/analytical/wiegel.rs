//! Wiegel table-driven diffraction coefficients.
//!
//! Wiegel's diagrams tabulate the diffraction coefficient behind a single
//! breakwater tip as a function of the incidence angle theta, the distance
//! ratio r/L, and the angle beta from the tip to the field point. This
//! module interpolates that table tri-linearly (beta, then r/L, then theta)
//! with endpoint clamping, and combines two tip contributions coherently
//! for finite breakwaters and gaps.
//!
//! The numeric content of the table is an external resource, loaded from
//! JSON keyed by integer incidence angle and validated once at load.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::dispersion::WaveCondition;
use crate::error::{DiffractionError, Result};

/// Tabulated r/L knots.
pub const R_OVER_L_KNOTS: [f64; 6] = [0.0, 0.5, 1.0, 2.0, 5.0, 10.0];

/// Tabulated beta knots (degrees).
pub const BETA_KNOTS_DEG: [f64; 13] = [
    0.0, 15.0, 30.0, 45.0, 60.0, 75.0, 90.0, 105.0, 120.0, 135.0, 150.0, 165.0, 180.0,
];

/// Tabulated incidence-angle knots (degrees).
pub const THETA_KNOTS_DEG: [f64; 12] = [
    15.0, 30.0, 45.0, 60.0, 75.0, 90.0, 105.0, 120.0, 135.0, 150.0, 165.0, 180.0,
];

/// Piecewise-linear interpolation with endpoint clamping.
///
/// `xs` must be strictly increasing and the same length as `ys`. Values
/// outside the knot range clamp to the nearest endpoint; a non-finite
/// query returns NaN.
fn interp_clamped(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    if !x.is_finite() {
        return f64::NAN;
    }

    let n = xs.len();
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }

    let hi = xs.iter().position(|&v| x <= v).unwrap_or(n - 1).max(1);
    let lo = hi - 1;

    let dx = xs[hi] - xs[lo];
    if dx == 0.0 {
        return f64::NAN;
    }
    ys[lo] + (ys[hi] - ys[lo]) * (x - xs[lo]) / dx
}

/// Validated, immutable Wiegel diffraction table.
///
/// One 6 x 13 matrix (rows = r/L knots, columns = beta knots) per tabulated
/// incidence angle. Constructed once from the external JSON resource and
/// never mutated; every lookup is a pure function of the table.
#[derive(Debug, Clone)]
pub struct WiegelTable {
    // indexed [theta knot][r/L knot][beta knot]
    tables: Vec<[[f64; 13]; 6]>,
}

impl WiegelTable {
    /// Build and validate a table from per-angle matrices.
    ///
    /// `rows` maps the integer incidence angle in degrees (15, 30, ..., 180)
    /// to its 6 x 13 coefficient matrix.
    ///
    /// # Errors
    ///
    /// `MissingTable` if any of the 12 required angles is absent,
    /// `TableShape` for a matrix that is not exactly 6 x 13, and
    /// `TableValue` for non-finite or out-of-range entries.
    pub fn from_rows(rows: &BTreeMap<u32, Vec<Vec<f64>>>) -> Result<Self> {
        let mut tables = Vec::with_capacity(THETA_KNOTS_DEG.len());

        for &theta in THETA_KNOTS_DEG.iter() {
            let theta = theta as u32;
            let matrix = rows
                .get(&theta)
                .ok_or(DiffractionError::MissingTable { theta })?;

            if matrix.len() != 6 {
                return Err(DiffractionError::TableShape {
                    theta,
                    rows: matrix.len(),
                    cols: matrix.first().map_or(0, Vec::len),
                });
            }

            let mut entry = [[0.0; 13]; 6];
            for (i, row) in matrix.iter().enumerate() {
                if row.len() != 13 {
                    return Err(DiffractionError::TableShape {
                        theta,
                        rows: matrix.len(),
                        cols: row.len(),
                    });
                }
                for (j, &value) in row.iter().enumerate() {
                    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                        return Err(DiffractionError::TableValue {
                            theta,
                            row: i,
                            col: j,
                            value,
                        });
                    }
                    entry[i][j] = value;
                }
            }
            tables.push(entry);
        }

        Ok(Self { tables })
    }

    /// Parse and validate a table from its JSON text form.
    ///
    /// The document is an object keyed by the incidence angle in degrees:
    /// `{"15": [[...13 values...], ...6 rows...], "30": ..., "180": ...}`.
    /// Unrecognized keys are ignored with a warning.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let doc: BTreeMap<String, Value> = serde_json::from_str(text)?;

        let mut rows = BTreeMap::new();
        for (key, value) in &doc {
            match key.parse::<u32>() {
                Ok(theta) => {
                    let matrix: Vec<Vec<f64>> = serde_json::from_value(value.clone())?;
                    rows.insert(theta, matrix);
                }
                Err(_) => {
                    log::warn!("ignoring non-numeric wiegel table key {:?}", key);
                }
            }
        }

        Self::from_rows(&rows)
    }

    /// Load and validate a table from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Diffraction coefficient for one tip, given a solved wave condition.
    ///
    /// `theta_inc_deg` is clamped to [15, 180] and `beta_deg` to [0, 180];
    /// the distance ratio is `r / L` with L the condition's wavelength.
    /// Returns NaN for non-finite inputs or a negative radius.
    pub fn kd(&self, wave: &WaveCondition, theta_inc_deg: f64, r: f64, beta_deg: f64) -> f64 {
        if !r.is_finite() || r < 0.0 || !theta_inc_deg.is_finite() || !beta_deg.is_finite() {
            return f64::NAN;
        }

        let beta = beta_deg.clamp(0.0, 180.0);
        let theta = theta_inc_deg.clamp(15.0, 180.0);
        let r_over_l = r / wave.wavelength;

        let mut kd_theta = [0.0; 12];
        for (j, matrix) in self.tables.iter().enumerate() {
            // beta interpolation for each tabulated r/L row
            let mut by_rl = [0.0; 6];
            for (i, row) in matrix.iter().enumerate() {
                by_rl[i] = interp_clamped(&BETA_KNOTS_DEG, row, beta);
            }
            kd_theta[j] = interp_clamped(&R_OVER_L_KNOTS, &by_rl, r_over_l);
        }

        interp_clamped(&THETA_KNOTS_DEG, &kd_theta, theta)
    }

    /// Diffraction coefficient for one tip from raw (period, depth).
    ///
    /// Convenience wrapper that runs the dispersion solve internally and
    /// returns NaN when the solve fails, matching the propagation policy
    /// of the other pure point evaluators.
    pub fn kd_at(&self, period: f64, depth: f64, theta_inc_deg: f64, r: f64, beta_deg: f64) -> f64 {
        match WaveCondition::new(period, depth) {
            Ok(wave) => self.kd(&wave, theta_inc_deg, r, beta_deg),
            Err(_) => f64::NAN,
        }
    }
}

/// Coherent interference of two tip contributions.
///
/// Combines the coefficients `kd1`, `kd2` from two breakwater tips at
/// distances `r1`, `r2` from the field point, treating the tips as coherent
/// point diffractors with propagation wavenumber `k`:
///
/// ```text
/// K = sqrt(K1^2 + K2^2 + 2 K1 K2 cos(k (r2 - r1)))
/// ```
///
/// clamped to [0, 1]. Non-finite inputs yield NaN.
pub fn combine_two_tips(kd1: f64, kd2: f64, k: f64, r1: f64, r2: f64) -> f64 {
    if !kd1.is_finite() || !kd2.is_finite() || !k.is_finite() || !r1.is_finite() || !r2.is_finite()
    {
        return f64::NAN;
    }

    let phase = (k * (r2 - r1)).cos();
    let combined = (kd1 * kd1 + kd2 * kd2 + 2.0 * kd1 * kd2 * phase).sqrt();
    combined.clamp(0.0, 1.0)
}
