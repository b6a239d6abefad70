// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart composition helpers.
//!
//! A chart is assembled from a plot/data rectangle, guide components (axes),
//! and a set of series marks supplied by the caller. This module owns the
//! measure/arrange pass so frame builders only deal with resolved rectangles
//! and scales.

use kurbo::Rect;

use aevum_core::Mark;

use crate::axis::AxisSpec;
use crate::layout::{ChartLayout, ChartLayoutSpec, Size};
use crate::measure::TextMeasurer;
use crate::scale::ScaleLinear;

/// A composed chart description that owns guide specs and layout inputs.
#[derive(Debug, Default)]
pub struct ChartSpec {
    /// Desired plot size, used when `layout.view_size` is `None`.
    pub plot_size: Size,
    /// Layout options.
    pub layout: ChartLayoutSpec,
    /// Optional left axis.
    pub axis_left: Option<AxisSpec>,
    /// Optional bottom axis.
    pub axis_bottom: Option<AxisSpec>,
}

impl ChartSpec {
    /// Instantiates the x-axis scale for a given plot rectangle.
    pub fn x_scale(&self, plot: Rect) -> Option<ScaleLinear> {
        self.axis_bottom.as_ref().map(|a| a.scale_linear(plot))
    }

    /// Instantiates the y-axis scale for a given plot rectangle.
    pub fn y_scale(&self, plot: Rect) -> Option<ScaleLinear> {
        self.axis_left.as_ref().map(|a| a.scale_linear(plot))
    }

    /// Computes layout for this chart.
    pub fn layout(&self, measurer: &dyn TextMeasurer) -> ChartLayout {
        let mut layout = self.layout;
        layout.plot_size = self.plot_size;
        layout.axis_left = self.axis_left.as_ref().map(|a| a.measure(measurer));
        layout.axis_bottom = self.axis_bottom.as_ref().map(|a| a.measure(measurer));
        ChartLayout::arrange(&layout)
    }

    /// Generates marks for the axes, given a computed layout.
    pub fn guide_marks(&self, layout: &ChartLayout) -> Vec<Mark> {
        let mut out = Vec::new();
        let plot = layout.data;
        if let (Some(axis), Some(axis_rect)) = (self.axis_bottom.as_ref(), layout.axis_bottom) {
            out.extend(axis.marks(plot, axis_rect));
        }
        if let (Some(axis), Some(axis_rect)) = (self.axis_left.as_ref(), layout.axis_left) {
            out.extend(axis.marks(plot, axis_rect));
        }
        out
    }

    /// Convenience to produce a full mark list: series marks + guide marks.
    ///
    /// The series builder is invoked with the resolved data rectangle.
    pub fn marks(
        &self,
        measurer: &dyn TextMeasurer,
        build_series: impl FnOnce(&Self, Rect) -> Vec<Mark>,
    ) -> (ChartLayout, Vec<Mark>) {
        let layout = self.layout(measurer);
        let mut marks = build_series(self, layout.data);
        marks.extend(self.guide_marks(&layout));
        (layout, marks)
    }
}
