//! JSON parameter configuration.
//!
//! Mirrors the shape of a computation request: wave condition, breakwater
//! geometry, grid resolution and the contour levels to draw. Loaded with
//! serde from a JSON file or string.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Contour levels drawn when the caller supplies none.
pub const DEFAULT_LEVELS: [f64; 7] = [0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8];

/// Full parameter set for one diffraction-field computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffractionConfig {
    /// Wave period T (s)
    pub period: f64,
    /// Water depth h (m)
    pub depth: f64,
    /// Breakwater length B between the two tips (m); 0 for a single tip
    pub breakwater_length: f64,
    /// Wave incidence direction (degrees)
    pub incidence_deg: f64,
    /// Grid step along x (m)
    pub dx: f64,
    /// Grid step along y (m); defaults to `dx` when omitted
    #[serde(default)]
    pub dy: Option<f64>,
    /// Grid extent along x (m)
    pub x_max: f64,
    /// Grid extent along y (m)
    pub y_max: f64,
    /// Contour level specification, e.g. `"0.2:0.1:0.8"` or `"0.3, 0.5"`;
    /// empty or invalid falls back to [`DEFAULT_LEVELS`]
    #[serde(default)]
    pub levels: Option<String>,
}

impl DiffractionConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// The grid step along y, falling back to `dx`.
    pub fn dy(&self) -> f64 {
        self.dy.unwrap_or(self.dx)
    }

    /// The contour levels to draw.
    ///
    /// Parses the `levels` string when present and valid, otherwise
    /// [`DEFAULT_LEVELS`].
    pub fn contour_levels(&self) -> Vec<f64> {
        self.levels
            .as_deref()
            .and_then(parse_levels)
            .unwrap_or_else(|| DEFAULT_LEVELS.to_vec())
    }
}

/// Parse a contour-level specification.
///
/// Two forms are accepted:
/// - a range `"start:step:end"` with step > 0, inclusive of the endpoint
///   within a small tolerance,
/// - a comma-separated list `"0.3, 0.5, 0.7"`.
///
/// Returns `None` for an empty, malformed or non-finite specification, so
/// the caller can fall back to its defaults.
pub fn parse_levels(spec: &str) -> Option<Vec<f64>> {
    let spec = spec.trim();
    if spec.is_empty() {
        return None;
    }

    if spec.contains(':') {
        let parts: Vec<&str> = spec.split(':').collect();
        if parts.len() != 3 {
            return None;
        }
        let start: f64 = parts[0].trim().parse().ok()?;
        let step: f64 = parts[1].trim().parse().ok()?;
        let end: f64 = parts[2].trim().parse().ok()?;
        if !start.is_finite() || !step.is_finite() || !end.is_finite() || step <= 0.0 {
            return None;
        }

        let mut levels = Vec::new();
        let mut v = start;
        while v <= end + 1e-12 {
            levels.push(v);
            v += step;
        }
        if levels.is_empty() {
            return None;
        }
        return Some(levels);
    }

    let mut levels = Vec::new();
    for part in spec.split(',') {
        let v: f64 = part.trim().parse().ok()?;
        if !v.is_finite() {
            return None;
        }
        levels.push(v);
    }
    Some(levels)
}
