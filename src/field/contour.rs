//! Marching-squares contour extraction.
//!
//! Walks every 2x2 cell of the field, classifies its corners against the
//! iso level (bottom-left = 1, bottom-right = 2, top-right = 4,
//! top-left = 8) and emits the line segments the level cuts through the
//! cell, with crossing positions linearly interpolated along the edges.
//! Segments are expressed in grid-index space: x in [0, nx-1],
//! y in [0, ny-1]; the caller scales them to physical coordinates.
//!
//! Per-level outputs are independent, unordered segment soups; no joining
//! into polylines is attempted. Cells touching a NaN corner are skipped.

use crate::field::grid::FieldGrid;

/// One contour line segment in grid-index space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourSegment {
    /// Segment start (grid-index coordinates)
    pub x1: f64,
    /// Segment start
    pub y1: f64,
    /// Segment end
    pub x2: f64,
    /// Segment end
    pub y2: f64,
}

impl ContourSegment {
    /// Midpoint of the segment, used as a label anchor.
    pub fn midpoint(&self) -> (f64, f64) {
        (0.5 * (self.x1 + self.x2), 0.5 * (self.y1 + self.y2))
    }
}

/// All segments extracted for one iso level.
#[derive(Debug, Clone)]
pub struct ContourLevel {
    /// The iso value
    pub level: f64,
    /// Unordered segments crossing that value
    pub segments: Vec<ContourSegment>,
}

// Cell edges: 0 = bottom, 1 = right, 2 = top, 3 = left.
// For each marching-squares case, the edge pairs to connect. Cases 0 and 15
// produce nothing; the saddle cases 5 and 10 produce two segments.
const CASE_EDGES: [&[(u8, u8)]; 16] = [
    &[],
    &[(3, 0)],
    &[(0, 1)],
    &[(3, 1)],
    &[(1, 2)],
    &[(3, 2), (0, 1)],
    &[(0, 2)],
    &[(3, 2)],
    &[(2, 3)],
    &[(0, 2)],
    &[(0, 3), (1, 2)],
    &[(1, 2)],
    &[(1, 3)],
    &[(0, 1)],
    &[(3, 0)],
    &[],
];

/// Crossing parameter along an edge from v1 to v2, with a guard for
/// degenerate (equal-value) edges.
fn crossing(level: f64, v1: f64, v2: f64) -> f64 {
    let denom = v2 - v1;
    if denom.abs() < 1e-15 {
        0.5
    } else {
        (level - v1) / denom
    }
}

/// Point on one edge of the cell with bottom-left corner (i, j).
fn edge_point(edge: u8, i: usize, j: usize, level: f64, v: [f64; 4]) -> (f64, f64) {
    let (x, y) = (i as f64, j as f64);
    // v = [bottom-left, bottom-right, top-right, top-left]
    match edge {
        0 => (x + crossing(level, v[0], v[1]), y),
        1 => (x + 1.0, y + crossing(level, v[1], v[2])),
        2 => (x + crossing(level, v[3], v[2]), y + 1.0),
        _ => (x, y + crossing(level, v[0], v[3])),
    }
}

/// Extract the segments of one iso level from the field.
pub fn extract_level(field: &FieldGrid, level: f64) -> ContourLevel {
    let mut segments = Vec::new();
    let (nx, ny) = (field.nx(), field.ny());

    for j in 0..ny.saturating_sub(1) {
        for i in 0..nx.saturating_sub(1) {
            let v = [
                field.kd[[j, i]],
                field.kd[[j, i + 1]],
                field.kd[[j + 1, i + 1]],
                field.kd[[j + 1, i]],
            ];
            if v.iter().any(|c| c.is_nan()) {
                continue;
            }

            let mut case = 0usize;
            if v[0] >= level {
                case |= 1;
            }
            if v[1] >= level {
                case |= 2;
            }
            if v[2] >= level {
                case |= 4;
            }
            if v[3] >= level {
                case |= 8;
            }

            for &(e1, e2) in CASE_EDGES[case] {
                let (x1, y1) = edge_point(e1, i, j, level, v);
                let (x2, y2) = edge_point(e2, i, j, level, v);
                segments.push(ContourSegment { x1, y1, x2, y2 });
            }
        }
    }

    ContourLevel { level, segments }
}

/// Extract contours for a list of iso levels.
///
/// Each level is processed independently; levels that cut nothing come back
/// with an empty segment list.
pub fn extract_contours(field: &FieldGrid, levels: &[f64]) -> Vec<ContourLevel> {
    levels
        .iter()
        .map(|&level| extract_level(field, level))
        .collect()
}
