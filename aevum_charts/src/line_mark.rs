// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trend-line mark generation.

use kurbo::{BezPath, Point};

use aevum_core::{Mark, MarkId};

use crate::axis::StrokeStyle;
use crate::z_order;

/// A smoothed trend line through a sequence of resolved points.
///
/// Generates a single stroked path mark. Smoothing is a Catmull-Rom spline
/// (cardinal curve with tension 0), so the curve passes through every input
/// point.
#[derive(Clone, Debug)]
pub struct TrendLineSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Points in scene coordinates, in draw order.
    pub points: Vec<Point>,
    /// Stroke style for the line.
    pub stroke: StrokeStyle,
    /// Rendering order hint.
    pub z_index: i32,
}

impl TrendLineSpec {
    /// Creates a trend line spec with a black stroke at width 1.
    pub fn new(id: MarkId, points: Vec<Point>) -> Self {
        Self {
            id,
            points,
            stroke: StrokeStyle::default(),
            z_index: z_order::SERIES_STROKE,
        }
    }

    /// Sets the stroke style.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the line mark.
    pub fn mark(&self) -> Mark {
        Mark::path(self.id, cardinal_path(&self.points, 0.0))
            .with_stroke(self.stroke.brush.clone(), self.stroke.stroke_width)
            .with_z_index(self.z_index)
    }
}

/// Builds a cardinal (Catmull-Rom family) spline through `points`.
///
/// `tension` is in `[0, 1]`; 0 is the classic Catmull-Rom curve and 1
/// degenerates to a polyline. Fewer than three points fall back to a
/// straight segment (or a bare move for a single point).
pub fn cardinal_path(points: &[Point], tension: f64) -> BezPath {
    let mut path = BezPath::new();
    match points {
        [] => return path,
        [p] => {
            path.move_to(*p);
            return path;
        }
        [a, b] => {
            path.move_to(*a);
            path.line_to(*b);
            return path;
        }
        _ => {}
    }

    let k = (1.0 - tension.clamp(0.0, 1.0)) / 6.0;
    let n = points.len();
    path.move_to(points[0]);
    for i in 0..n - 1 {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];

        let c1 = Point::new(p1.x + (p2.x - p0.x) * k, p1.y + (p2.y - p0.y) * k);
        let c2 = Point::new(p2.x - (p3.x - p1.x) * k, p2.y - (p3.y - p1.y) * k);
        path.curve_to(c1, c2, p2);
    }
    path
}
