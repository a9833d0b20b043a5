//! Error types for diffraction-field computation.
//!
//! Structured error handling with `thiserror`: every variant carries the
//! offending values so callers can build a precise user-facing message.
//! Pure numeric components (Fresnel, diffraction factor, point models)
//! never return errors; they propagate NaN instead.

use thiserror::Error;

/// Errors that can occur while setting up or running a diffraction computation.
#[derive(Debug, Error)]
pub enum DiffractionError {
    /// A numeric input is non-finite or violates its sign constraint.
    #[error("invalid parameter {name} = {value} (must be {constraint})")]
    InvalidParameter {
        /// Parameter name as it appears in the public API
        name: &'static str,
        /// The rejected value
        value: f64,
        /// Human-readable constraint, e.g. "finite and > 0"
        constraint: &'static str,
    },

    /// The requested grid exceeds the point-count cap.
    #[error(
        "grid too large: {nx} x {ny} points exceeds the cap of {max_points}; \
         increase dx/dy or reduce x_max/y_max"
    )]
    GridTooLarge {
        /// Number of points along x
        nx: usize,
        /// Number of points along y
        ny: usize,
        /// The configured upper bound on nx * ny
        max_points: usize,
    },

    /// The dispersion solve failed to reach a finite positive wavenumber.
    #[error("dispersion relation diverged for period = {period} s, depth = {depth} m")]
    Divergence {
        /// Wave period (s)
        period: f64,
        /// Water depth (m)
        depth: f64,
    },

    /// A Wiegel lookup table has no entry for a required incidence angle.
    #[error("wiegel table missing entry for theta = {theta} deg")]
    MissingTable {
        /// Incidence angle (degrees) of the absent table
        theta: u32,
    },

    /// A Wiegel lookup table entry has the wrong shape.
    #[error(
        "wiegel table for theta = {theta} deg has shape {rows} x {cols}, expected 6 x 13"
    )]
    TableShape {
        /// Incidence angle (degrees) of the malformed table
        theta: u32,
        /// Observed number of r/L rows
        rows: usize,
        /// Observed number of beta columns
        cols: usize,
    },

    /// A Wiegel lookup table contains a non-finite or out-of-range value.
    #[error("wiegel table for theta = {theta} deg has invalid value {value} at [{row}][{col}]")]
    TableValue {
        /// Incidence angle (degrees)
        theta: u32,
        /// Row index (r/L)
        row: usize,
        /// Column index (beta)
        col: usize,
        /// The invalid value
        value: f64,
    },

    /// A table or configuration file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A table or configuration file could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for diffraction operations.
pub type Result<T> = std::result::Result<T, DiffractionError>;

impl DiffractionError {
    /// Returns `true` if this error was caused by the Wiegel table resource.
    pub fn is_table_error(&self) -> bool {
        matches!(
            self,
            DiffractionError::MissingTable { .. }
                | DiffractionError::TableShape { .. }
                | DiffractionError::TableValue { .. }
        )
    }

    /// Returns `true` if this error was caused by caller-supplied parameters.
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            DiffractionError::InvalidParameter { .. } | DiffractionError::GridTooLarge { .. }
        )
    }
}
