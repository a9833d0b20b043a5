//! Wave diffraction behind breakwaters.
//!
//! Computes the diffraction coefficient field Kd(x, y) on the sheltered
//! side of a breakwater or breakwater gap, and extracts iso-Kd contours
//! from it. The pipeline:
//!
//! 1. solve the linear dispersion relation for the wavenumber
//!    ([`dispersion`]),
//! 2. evaluate a point diffraction model at each grid node, either the
//!    closed-form Sommerfeld/Penney-Price semi-infinite solution built on
//!    the Fresnel integrals ([`special`], [`analytical::sommerfeld`]) or
//!    the Wiegel table interpolation ([`analytical::wiegel`]), with
//!    coherent two-tip interference for finite structures,
//! 3. run the grid in cancellable chunks ([`field::grid`]),
//! 4. extract contour segments with marching squares ([`field::contour`]).
//!
//! # Example
//!
//! ```
//! use wave_diffraction::dispersion::WaveCondition;
//! use wave_diffraction::field::{CancelToken, GridEngine, GridOutcome, PointModel};
//! use wave_diffraction::field::extract_contours;
//!
//! let wave = WaveCondition::new(8.0, 10.0).unwrap();
//! let engine = GridEngine::new(
//!     wave,
//!     PointModel::Sommerfeld,
//!     80.0,  // breakwater length (m)
//!     90.0,  // incidence (deg)
//!     10.0, 10.0, 200.0, 200.0,
//! ).unwrap();
//!
//! match engine.run(&CancelToken::new()).finish() {
//!     GridOutcome::Done(field) => {
//!         let contours = extract_contours(&field, &[0.3, 0.5, 0.7]);
//!         assert_eq!(contours.len(), 3);
//!     }
//!     GridOutcome::Stopped => unreachable!("nobody cancelled"),
//! }
//! ```

#![warn(missing_docs)]

pub mod analytical;
pub mod config;
pub mod dispersion;
pub mod error;
pub mod field;
pub mod special;

pub use analytical::{combine_two_tips, kd_semi_infinite, Point2, WiegelTable};
pub use config::{parse_levels, DiffractionConfig, DEFAULT_LEVELS};
pub use dispersion::{solve_wavenumber, WaveCondition, GRAVITY};
pub use error::{DiffractionError, Result};
pub use field::{CancelToken, FieldGrid, GridEngine, GridOutcome, PointModel};
