// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bubble mark generation.

use kurbo::{Circle, Point, Shape};
use peniko::Brush;
use peniko::color::palette::css;

use aevum_core::{Mark, MarkId};

use crate::axis::StrokeStyle;
use crate::pattern::Pattern;
use crate::z_order;

/// A circular marker with an optional calendar-motif overlay.
///
/// Generates the filled circle (with a thin outline) and, when a pattern is
/// set, the motif stroked on top scaled to the bubble.
#[derive(Clone, Debug)]
pub struct BubbleMarkSpec {
    /// Stable mark id; the overlay uses `id + 1`.
    pub id: MarkId,
    /// Center in scene coordinates.
    pub center: Point,
    /// Radius in scene coordinates.
    pub radius: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Outline stroke.
    pub outline: StrokeStyle,
    /// Optional motif drawn over the fill.
    pub pattern: Option<Pattern>,
    /// Stroke paint for the motif overlay.
    pub pattern_stroke: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl BubbleMarkSpec {
    /// Creates a bubble spec with a thin black outline and no pattern.
    pub fn new(id: MarkId, center: Point, radius: f64, fill: impl Into<Brush>) -> Self {
        Self {
            id,
            center,
            radius,
            fill: fill.into(),
            outline: StrokeStyle::solid(css::BLACK, 0.5),
            pattern: None,
            pattern_stroke: css::BLACK.with_alpha(0.55).into(),
            z_index: z_order::SERIES_POINTS,
        }
    }

    /// Sets the motif overlay.
    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Sets the motif overlay stroke paint.
    pub fn with_pattern_stroke(mut self, stroke: impl Into<Brush>) -> Self {
        self.pattern_stroke = stroke.into();
        self
    }

    /// Sets the outline stroke.
    pub fn with_outline(mut self, outline: StrokeStyle) -> Self {
        self.outline = outline;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the bubble marks.
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::new();
        out.push(
            Mark::path(self.id, Circle::new(self.center, self.radius).to_path(0.1))
                .with_fill(self.fill.clone())
                .with_stroke(self.outline.brush.clone(), self.outline.stroke_width)
                .with_z_index(self.z_index),
        );

        if let Some(pattern) = &self.pattern {
            // The motif covers the bulk of the disc without touching the rim.
            let size = self.radius * 1.4;
            out.push(
                Mark::path(self.id.offset(1), pattern.instanced(self.center, size))
                    .with_stroke(
                        self.pattern_stroke.clone(),
                        Pattern::stroke_width_for(size),
                    )
                    .with_z_index(self.z_index + 1),
            );
        }

        out
    }
}
