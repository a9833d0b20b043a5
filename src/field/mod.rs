//! Field evaluation over a regular grid and contour extraction.
//!
//! [`grid`] evaluates the chosen point model over a rectangular grid behind
//! the structure, in cancellable row chunks, producing a [`FieldGrid`].
//! [`contour`] walks that field with marching squares and returns iso-value
//! segments for plotting.

pub mod contour;
pub mod grid;

pub use contour::{extract_contours, extract_level, ContourLevel, ContourSegment};
pub use grid::{
    CancelToken, FieldGrid, FieldStats, GridEngine, GridOutcome, GridProgress, GridRun, PointModel,
};
