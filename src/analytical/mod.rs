//! Analytical diffraction models.
//!
//! Two point models are provided, one per breakwater idealization:
//!
//! - **Sommerfeld/Penney-Price** ([`sommerfeld`]): closed-form solution for
//!   a semi-infinite thin barrier, built from the Fresnel integrals.
//! - **Wiegel** ([`wiegel`]): table-driven interpolation for a single
//!   breakwater tip, with a coherent two-tip interference combiner for
//!   finite breakwaters and gaps.
//!
//! Both models are pure: they return a diffraction coefficient in [0, 1]
//! for valid inputs and propagate NaN for undefined ones.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub mod sommerfeld;
pub mod wiegel;

pub use sommerfeld::{diffraction_factor, kd_semi_infinite};
pub use wiegel::{combine_two_tips, WiegelTable};

/// Point in the horizontal plane (x across, y along the structure).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point2 {
    /// Distance behind the structure (m)
    pub x: f64,
    /// Position along the structure (m)
    pub y: f64,
}

impl Point2 {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Polar coordinates of a field point relative to a breakwater tip on the
/// y-axis at `tip_y`.
///
/// Returns `(r, angle)` with the angle in radians, folded into [0, pi] by
/// mirroring across the x-axis so that both sides of a tip map onto the
/// tabulated half-plane.
pub fn tip_polar(x: f64, y: f64, tip_y: f64) -> (f64, f64) {
    let rel = y - tip_y;
    let r = x.hypot(rel);
    let angle = rel.abs().atan2(x);
    (r, angle)
}

/// Normalize an angle in radians to [0, 2 pi).
pub fn normalize_angle(theta: f64) -> f64 {
    let two_pi = 2.0 * PI;
    let mut t = theta % two_pi;
    if t < 0.0 {
        t += two_pi;
    }
    t
}
