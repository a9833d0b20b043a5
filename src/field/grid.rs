//! Chunked, cancellable evaluation of the diffraction field on a grid.
//!
//! The grid covers the sheltered side of the structure: x across (away from
//! the breakwater line), y along it, with tip 1 at the origin and tip 2 at
//! (0, B) for a breakwater of length B. Evaluation proceeds row by row in
//! small chunks; between chunks the run yields a progress event and polls a
//! cancellation token, so an interactive caller can abort a long field
//! without waiting for it.

use ndarray::Array2;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::analytical::{combine_two_tips, kd_semi_infinite, normalize_angle, tip_polar, WiegelTable};
use crate::dispersion::WaveCondition;
use crate::error::{DiffractionError, Result};

/// Upper bound on the number of grid points.
pub const MAX_GRID_POINTS: usize = 1_200_000;

// Large fields use smaller chunks so cancellation stays responsive.
const LARGE_GRID_POINTS: usize = 600_000;
const CHUNK_ROWS_LARGE: usize = 2;
const CHUNK_ROWS_SMALL: usize = 6;

/// Shared cancellation flag for an in-flight grid run.
///
/// Cloning produces another handle to the same flag, so the caller can keep
/// one handle and hand another to the run. Polled only at chunk boundaries.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The point model evaluated at each grid node.
#[derive(Debug, Clone, Copy)]
pub enum PointModel<'a> {
    /// Sommerfeld/Penney-Price semi-infinite solution per tip.
    Sommerfeld,
    /// Wiegel table interpolation per tip.
    Wiegel(&'a WiegelTable),
}

/// Validated grid computation: geometry, wave condition and point model.
///
/// Construction checks every parameter and the total point count, so a run
/// started from an engine cannot fail; it can only complete or be cancelled.
#[derive(Debug)]
pub struct GridEngine<'a> {
    wave: WaveCondition,
    model: PointModel<'a>,
    breakwater_length: f64,
    theta0: f64,
    incidence_deg: f64,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DiffractionError::InvalidParameter {
            name,
            value,
            constraint: "finite and > 0",
        });
    }
    Ok(())
}

fn check_non_negative(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DiffractionError::InvalidParameter {
            name,
            value,
            constraint: "finite and >= 0",
        });
    }
    Ok(())
}

/// Number of fixed-step samples covering 0..=max.
///
/// Kept in f64: a step far below the extent yields a count beyond usize
/// range, which must reach the cap check instead of wrapping.
fn axis_len(step: f64, max: f64) -> f64 {
    (max / step + 1e-9).floor() + 1.0
}

fn axis_coords(step: f64, max: f64) -> Vec<f64> {
    (0..axis_len(step, max) as usize)
        .map(|i| i as f64 * step)
        .collect()
}

fn chunk_rows_for(points: usize) -> usize {
    if points > LARGE_GRID_POINTS {
        CHUNK_ROWS_LARGE
    } else {
        CHUNK_ROWS_SMALL
    }
}

impl<'a> GridEngine<'a> {
    /// Validate the grid geometry and bind the wave condition and model.
    ///
    /// `breakwater_length` is the distance B between the two tips; zero means
    /// a single semi-infinite tip at the origin. `incidence_deg` is the wave
    /// direction in degrees. `dx`/`dy` are the grid steps and `x_max`/`y_max`
    /// the extents, all in metres.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for non-finite or wrong-sign inputs, and
    /// `GridTooLarge` when nx * ny exceeds [`MAX_GRID_POINTS`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        wave: WaveCondition,
        model: PointModel<'a>,
        breakwater_length: f64,
        incidence_deg: f64,
        dx: f64,
        dy: f64,
        x_max: f64,
        y_max: f64,
    ) -> Result<Self> {
        check_positive("dx", dx)?;
        check_positive("dy", dy)?;
        check_non_negative("x_max", x_max)?;
        check_non_negative("y_max", y_max)?;
        check_non_negative("breakwater_length", breakwater_length)?;
        if !incidence_deg.is_finite() {
            return Err(DiffractionError::InvalidParameter {
                name: "incidence_deg",
                value: incidence_deg,
                constraint: "finite",
            });
        }

        let nx = axis_len(dx, x_max);
        let ny = axis_len(dy, y_max);
        // Compared in f64: the counts may individually exceed usize range
        if nx * ny > MAX_GRID_POINTS as f64 {
            return Err(DiffractionError::GridTooLarge {
                nx: nx as usize,
                ny: ny as usize,
                max_points: MAX_GRID_POINTS,
            });
        }

        Ok(Self {
            wave,
            model,
            breakwater_length,
            theta0: incidence_deg.to_radians(),
            incidence_deg,
            xs: axis_coords(dx, x_max),
            ys: axis_coords(dy, y_max),
        })
    }

    /// Grid dimensions as (nx, ny).
    pub fn shape(&self) -> (usize, usize) {
        (self.xs.len(), self.ys.len())
    }

    /// Start a run against this engine.
    ///
    /// The run borrows the engine; several runs can be started from the same
    /// engine in sequence and produce identical fields.
    pub fn run(&self, token: &CancelToken) -> GridRun<'_> {
        let (nx, ny) = self.shape();
        GridRun {
            engine: self,
            token: token.clone(),
            kd: Array2::from_elem((ny, nx), f64::NAN),
            next_row: 0,
            chunk_rows: chunk_rows_for(nx * ny),
            stopped: false,
        }
    }

    /// Diffraction coefficient at one grid node.
    fn kd_at(&self, x: f64, y: f64) -> f64 {
        let (r1, a1) = tip_polar(x, y, 0.0);
        let kd1 = self.tip_kd(r1, a1);

        if self.breakwater_length > 0.0 {
            let (r2, a2) = tip_polar(x, y, self.breakwater_length);
            let kd2 = self.tip_kd(r2, a2);
            combine_two_tips(kd1, kd2, self.wave.wavenumber, r1, r2)
        } else {
            kd1.clamp(0.0, 1.0)
        }
    }

    fn tip_kd(&self, r: f64, angle: f64) -> f64 {
        match self.model {
            PointModel::Sommerfeld => {
                kd_semi_infinite(r, normalize_angle(angle), self.wave.wavelength, self.theta0)
            }
            PointModel::Wiegel(table) => {
                table.kd(&self.wave, self.incidence_deg, r, angle.to_degrees())
            }
        }
    }
}

/// Progress event emitted after each completed chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridProgress {
    /// Rows computed so far
    pub rows_done: usize,
    /// Total rows in the grid
    pub rows_total: usize,
}

impl GridProgress {
    /// Completed fraction in [0, 1].
    pub fn fraction(&self) -> f64 {
        self.rows_done as f64 / self.rows_total as f64
    }
}

/// Result of driving a [`GridRun`] to the end.
#[derive(Debug)]
pub enum GridOutcome {
    /// The run completed; the field is fully populated.
    Done(FieldGrid),
    /// The run was cancelled; the partial buffer is discarded.
    Stopped,
}

/// An in-flight grid computation.
///
/// Each call to `next()` computes one chunk of rows and yields a progress
/// event; the iterator ends when the grid is complete or cancellation is
/// observed. The field itself is only released by [`GridRun::finish`].
/// Dropping the run discards whatever was computed.
pub struct GridRun<'a> {
    engine: &'a GridEngine<'a>,
    token: CancelToken,
    kd: Array2<f64>,
    next_row: usize,
    chunk_rows: usize,
    stopped: bool,
}

impl GridRun<'_> {
    /// Drive the remaining chunks and return the outcome.
    ///
    /// Can be called at any point: immediately after `run()` for a blocking
    /// computation, or after iterating some chunks by hand.
    pub fn finish(mut self) -> GridOutcome {
        while self.next().is_some() {}
        if self.stopped || self.next_row < self.engine.ys.len() {
            return GridOutcome::Stopped;
        }
        let engine = self.engine;
        GridOutcome::Done(FieldGrid {
            xs: engine.xs.clone(),
            ys: engine.ys.clone(),
            kd: self.kd,
        })
    }
}

impl Iterator for GridRun<'_> {
    type Item = GridProgress;

    fn next(&mut self) -> Option<GridProgress> {
        let rows_total = self.engine.ys.len();
        if self.stopped || self.next_row >= rows_total {
            return None;
        }
        if self.token.is_cancelled() {
            log::debug!("grid run cancelled at row {}/{}", self.next_row, rows_total);
            self.stopped = true;
            return None;
        }

        let end = (self.next_row + self.chunk_rows).min(rows_total);
        for j in self.next_row..end {
            let y = self.engine.ys[j];
            for (i, &x) in self.engine.xs.iter().enumerate() {
                self.kd[[j, i]] = self.engine.kd_at(x, y);
            }
        }
        self.next_row = end;
        log::debug!("grid chunk complete: rows {}/{}", end, rows_total);

        Some(GridProgress {
            rows_done: end,
            rows_total,
        })
    }
}

/// Summary statistics of a field, ignoring NaN entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    /// Total number of grid points
    pub total: usize,
    /// Number of finite entries
    pub finite: usize,
    /// Minimum finite value (NaN when no entry is finite)
    pub min: f64,
    /// Maximum finite value (NaN when no entry is finite)
    pub max: f64,
}

/// A completed diffraction-coefficient field.
///
/// Stored row-major with y as the outer index: `kd[[j, i]]` is the value at
/// `(xs[i], ys[j])`.
#[derive(Debug, Clone)]
pub struct FieldGrid {
    /// Grid x coordinates (m)
    pub xs: Vec<f64>,
    /// Grid y coordinates (m)
    pub ys: Vec<f64>,
    /// Diffraction coefficients, shape (ny, nx)
    pub kd: Array2<f64>,
}

impl FieldGrid {
    /// Number of points along x.
    pub fn nx(&self) -> usize {
        self.xs.len()
    }

    /// Number of points along y.
    pub fn ny(&self) -> usize {
        self.ys.len()
    }

    /// The row nearest y = 0, for line-plot consumers.
    ///
    /// Returns the row's y coordinate and its values along x.
    pub fn centerline(&self) -> (f64, Vec<f64>) {
        let mut best = 0;
        for (j, &y) in self.ys.iter().enumerate() {
            if y.abs() < self.ys[best].abs() {
                best = j;
            }
        }
        (self.ys[best], self.kd.row(best).to_vec())
    }

    /// Count and range of the finite entries.
    pub fn finite_stats(&self) -> FieldStats {
        let mut finite = 0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in self.kd.iter() {
            if v.is_finite() {
                finite += 1;
                if v < min {
                    min = v;
                }
                if v > max {
                    max = v;
                }
            }
        }
        if finite == 0 {
            min = f64::NAN;
            max = f64::NAN;
        }
        FieldStats {
            total: self.kd.len(),
            finite,
            min,
            max,
        }
    }
}
