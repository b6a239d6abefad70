// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An axis is a guide: it can be measured (for layout) and arranged (to
//! generate marks). Only continuous linear scales are supported, with a
//! bottom or left orientation.

use std::sync::Arc;

use kurbo::{BezPath, Rect};
use peniko::Brush;
use peniko::color::palette::css;

use aevum_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::format::format_tick_with_step;
use crate::measure::{TextMeasurer, TextStyle};
use crate::scale::{ScaleLinear, ScaleLinearSpec};
use crate::z_order;

/// A paint + width pair for stroked paths (domain lines, ticks, gridlines).
#[derive(Clone, Debug)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Fill paint for the axis title.
    pub title_fill: Brush,
    /// Font size for the axis title.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            rule: rule.clone(),
            label_fill: rule.brush.clone(),
            label_font_size: 10.0,
            title_fill: rule.brush,
            title_font_size: 11.0,
        }
    }
}

/// Gridline styling.
#[derive(Clone, Debug)]
pub struct GridStyle {
    /// Stroke style for gridlines.
    pub stroke: StrokeStyle,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            stroke: StrokeStyle {
                brush: Brush::Solid(css::BLACK.with_alpha(40.0 / 255.0)),
                stroke_width: 1.0,
            },
        }
    }
}

/// Axis placement relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis placed below the plot area.
    Bottom,
    /// A vertical axis placed to the left of the plot area.
    Left,
}

/// An axis specification over a linear scale.
#[derive(Clone)]
pub struct AxisSpec {
    /// Stable-id base; each generated mark uses a deterministic offset.
    pub id_base: u64,
    /// The axis scale specification.
    pub scale: ScaleLinearSpec,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks.
    pub tick_count: usize,
    /// Tick line length in scene coordinates.
    pub tick_size: f64,
    /// Whether to draw tick marks.
    pub ticks: bool,
    /// Whether to draw tick labels.
    pub labels: bool,
    /// Whether to draw the axis domain line.
    pub show_domain: bool,
    /// Padding between the tick end and the tick label.
    pub tick_padding: f64,
    /// Extra padding applied between the ticks and tick labels.
    pub label_padding: f64,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional gridline styling; if `Some`, gridline marks span the plot.
    pub grid: Option<GridStyle>,
    /// Optional axis title text.
    pub title: Option<String>,
    /// Distance from tick labels to the title.
    pub title_offset: f64,
    /// Optional tick label formatter `(value, step) -> label`.
    pub tick_formatter: Option<Arc<dyn Fn(f64, f64) -> String>>,
}

impl std::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id_base", &self.id_base)
            .field("scale", &self.scale)
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("ticks", &self.ticks)
            .field("labels", &self.labels)
            .field("show_domain", &self.show_domain)
            .field("grid", &self.grid.is_some())
            .field("title", &self.title)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .finish_non_exhaustive()
    }
}

impl AxisSpec {
    /// Creates a new axis specification with sensible defaults.
    pub fn new(id_base: u64, scale: ScaleLinearSpec, orient: AxisOrient) -> Self {
        let tick_padding = match orient {
            AxisOrient::Bottom => 12.0,
            AxisOrient::Left => 6.0,
        };
        Self {
            id_base,
            scale,
            orient,
            tick_count: 10,
            tick_size: 5.0,
            ticks: true,
            labels: true,
            show_domain: true,
            tick_padding,
            label_padding: 0.0,
            style: AxisStyle::default(),
            grid: None,
            title: None,
            title_offset: 10.0,
            tick_formatter: None,
        }
    }

    /// Convenience constructor for a bottom axis.
    pub fn bottom(id_base: u64, scale: ScaleLinearSpec) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a left axis.
    pub fn left(id_base: u64, scale: ScaleLinearSpec) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Sets the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Enables gridlines using the provided style.
    pub fn with_grid(mut self, grid: GridStyle) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Sets the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the title offset in scene coordinates.
    pub fn with_title_offset(mut self, title_offset: f64) -> Self {
        self.title_offset = title_offset;
        self
    }

    /// Sets a custom tick label formatter.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Enables or disables nice-domain behavior for this axis.
    pub fn with_nice_domain(mut self, nice: bool) -> Self {
        self.scale.nice = nice;
        self
    }

    /// Returns a scale mapping axis values into plot coordinates.
    ///
    /// Vertical axes get an inverted range so larger values render higher.
    pub fn scale_linear(&self, plot: Rect) -> ScaleLinear {
        let range = match self.orient {
            AxisOrient::Bottom => (plot.x0, plot.x1),
            AxisOrient::Left => (plot.y1, plot.y0),
        };
        self.scale.instantiate_resolved(range, self.tick_count)
    }

    fn tick_values(&self) -> (Vec<f64>, f64) {
        let domain = self.scale.resolved_domain(self.tick_count);
        let tmp = ScaleLinear::new(domain, (0.0, 1.0));
        let ticks = tmp.ticks(self.tick_count);
        let step = tick_step(&ticks);
        (ticks, step)
    }

    fn format_tick(&self, v: f64, step: f64) -> String {
        match &self.tick_formatter {
            Some(f) => (f)(v, step),
            None => format_tick_with_step(v, step),
        }
    }

    /// Measures the thickness this axis needs along its normal direction.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> f64 {
        let tick_extent = if self.ticks { self.tick_size.abs() } else { 0.0 };
        let label_gap = self.tick_padding.max(0.0) + self.label_padding.max(0.0);
        let (ticks, step) = self.tick_values();

        let mut max_label_extent = 0.0_f64;
        if self.labels {
            for v in ticks {
                let label = self.format_tick(v, step);
                let metrics =
                    measurer.measure(&label, TextStyle::new(self.style.label_font_size));
                let extent = match self.orient {
                    AxisOrient::Bottom => metrics.line_height(),
                    AxisOrient::Left => metrics.advance_width,
                };
                max_label_extent = max_label_extent.max(extent);
            }
        }

        let label_thickness = if self.labels {
            label_gap + max_label_extent
        } else {
            0.0
        };
        let mut out = tick_extent + label_thickness;
        if let Some(title) = &self.title {
            out += self.title_offset.max(0.0);
            out += match self.orient {
                AxisOrient::Bottom => {
                    let metrics =
                        measurer.measure(title, TextStyle::new(self.style.title_font_size));
                    metrics.line_height()
                }
                // With a rotated title, height maps to width.
                AxisOrient::Left => self.style.title_font_size,
            };
        }
        out
    }

    /// Generates axis marks for the given plot rectangle and arranged axis
    /// rectangle (the reserved region adjacent to `plot`).
    pub fn marks(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        match self.orient {
            AxisOrient::Bottom => self.marks_bottom(plot, axis_rect),
            AxisOrient::Left => self.marks_left(plot, axis_rect),
        }
    }

    fn marks_bottom(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        let y = plot.y1;
        let tick_size = self.tick_size.abs();
        let tick_extent = if self.ticks { tick_size } else { 0.0 };
        let label_gap = (self.tick_padding + self.label_padding).max(0.0);
        let (ticks, step) = self.tick_values();
        let scale = self.scale_linear(plot);

        let mut out = Vec::new();

        if let Some(grid) = &self.grid {
            let mut grid_ticks: Vec<f64> = ticks
                .iter()
                .copied()
                .filter(|v| in_range(scale.map(*v), plot.x0, plot.x1))
                .collect();
            let (d0, d1) = self.scale.resolved_domain(self.tick_count);
            push_if_missing(&mut grid_ticks, d0);
            push_if_missing(&mut grid_ticks, d1);
            for (i, v) in grid_ticks.iter().copied().enumerate() {
                let x = scale.map(v);
                let mut p = BezPath::new();
                p.move_to((x, plot.y0));
                p.line_to((x, plot.y1));
                out.push(
                    Mark::path(MarkId::from_raw(self.id_base + 2000 + i as u64), p)
                        .with_stroke(grid.stroke.brush.clone(), grid.stroke.stroke_width)
                        .with_z_index(z_order::GRID_LINES),
                );
            }
        }

        if self.show_domain {
            let mut domain = BezPath::new();
            domain.move_to((plot.x0, y));
            domain.line_to((plot.x1, y));
            out.push(
                Mark::path(MarkId::from_raw(self.id_base), domain)
                    .with_stroke(self.style.rule.brush.clone(), self.style.rule.stroke_width)
                    .with_z_index(z_order::AXIS_RULES),
            );
        }

        let ticks_len = ticks.len();
        for (i, v) in ticks.iter().copied().enumerate() {
            let x = scale.map(v);
            if !in_range(x, plot.x0, plot.x1) {
                continue;
            }

            if self.ticks {
                let mut tick = BezPath::new();
                tick.move_to((x, y));
                tick.line_to((x, y + tick_size));
                out.push(
                    Mark::path(MarkId::from_raw(self.id_base + 100 + i as u64), tick)
                        .with_stroke(
                            self.style.rule.brush.clone(),
                            self.style.rule.stroke_width,
                        )
                        .with_z_index(z_order::AXIS_RULES),
                );
            }

            if self.labels {
                let (anchor, x) = if i == 0 {
                    (TextAnchor::Start, x.clamp(plot.x0, plot.x1))
                } else if i + 1 == ticks_len {
                    (TextAnchor::End, x.clamp(plot.x0, plot.x1))
                } else {
                    (TextAnchor::Middle, x)
                };
                out.push(
                    Mark::text(
                        MarkId::from_raw(self.id_base + 1000 + i as u64),
                        (x, y + tick_extent + label_gap).into(),
                        self.format_tick(v, step),
                        self.style.label_font_size,
                    )
                    .with_anchor(anchor)
                    .with_baseline(TextBaseline::Hanging)
                    .with_fill(self.style.label_fill.clone())
                    .with_z_index(z_order::AXIS_LABELS),
                );
            }
        }

        if let Some(title) = &self.title {
            // The title sits in the strip at the outer edge of `axis_rect`.
            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + 9000),
                    (
                        0.5 * (plot.x0 + plot.x1),
                        axis_rect.y1 - self.style.title_font_size,
                    )
                        .into(),
                    title.clone(),
                    self.style.title_font_size,
                )
                .with_anchor(TextAnchor::Middle)
                .with_baseline(TextBaseline::Hanging)
                .with_fill(self.style.title_fill.clone())
                .with_z_index(z_order::AXIS_TITLES),
            );
        }

        out
    }

    fn marks_left(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        let x = plot.x0;
        let tick_size = self.tick_size.abs();
        let tick_extent = if self.ticks { tick_size } else { 0.0 };
        let label_gap = (self.tick_padding + self.label_padding).max(0.0);
        let (ticks, step) = self.tick_values();
        let scale = self.scale_linear(plot);

        let mut out = Vec::new();

        if let Some(grid) = &self.grid {
            let mut grid_ticks: Vec<f64> = ticks
                .iter()
                .copied()
                .filter(|v| in_range(scale.map(*v), plot.y0, plot.y1))
                .collect();
            let (d0, d1) = self.scale.resolved_domain(self.tick_count);
            push_if_missing(&mut grid_ticks, d0);
            push_if_missing(&mut grid_ticks, d1);
            for (i, v) in grid_ticks.iter().copied().enumerate() {
                let y = scale.map(v);
                let mut p = BezPath::new();
                p.move_to((plot.x0, y));
                p.line_to((plot.x1, y));
                out.push(
                    Mark::path(MarkId::from_raw(self.id_base + 2000 + i as u64), p)
                        .with_stroke(grid.stroke.brush.clone(), grid.stroke.stroke_width)
                        .with_z_index(z_order::GRID_LINES),
                );
            }
        }

        if self.show_domain {
            let mut domain = BezPath::new();
            domain.move_to((x, plot.y0));
            domain.line_to((x, plot.y1));
            out.push(
                Mark::path(MarkId::from_raw(self.id_base), domain)
                    .with_stroke(self.style.rule.brush.clone(), self.style.rule.stroke_width)
                    .with_z_index(z_order::AXIS_RULES),
            );
        }

        for (i, v) in ticks.iter().copied().enumerate() {
            let y = scale.map(v);
            if !in_range(y, plot.y0, plot.y1) {
                continue;
            }

            if self.ticks {
                let mut tick = BezPath::new();
                tick.move_to((x, y));
                tick.line_to((x - tick_size, y));
                out.push(
                    Mark::path(MarkId::from_raw(self.id_base + 100 + i as u64), tick)
                        .with_stroke(
                            self.style.rule.brush.clone(),
                            self.style.rule.stroke_width,
                        )
                        .with_z_index(z_order::AXIS_RULES),
                );
            }

            if self.labels {
                out.push(
                    Mark::text(
                        MarkId::from_raw(self.id_base + 1000 + i as u64),
                        (x - tick_extent - label_gap, y).into(),
                        self.format_tick(v, step),
                        self.style.label_font_size,
                    )
                    .with_anchor(TextAnchor::End)
                    .with_baseline(TextBaseline::Middle)
                    .with_fill(self.style.label_fill.clone())
                    .with_z_index(z_order::AXIS_LABELS),
                );
            }
        }

        if let Some(title) = &self.title {
            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + 9000),
                    (
                        axis_rect.x0 + 0.5 * self.style.title_font_size,
                        0.5 * (plot.y0 + plot.y1),
                    )
                        .into(),
                    title.clone(),
                    self.style.title_font_size,
                )
                .with_anchor(TextAnchor::Middle)
                .with_baseline(TextBaseline::Middle)
                .with_angle(-90.0)
                .with_fill(self.style.title_fill.clone())
                .with_z_index(z_order::AXIS_TITLES),
            );
        }

        out
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    if ticks.len() >= 2 {
        (ticks[1] - ticks[0]).abs()
    } else {
        0.0
    }
}

fn in_range(v: f64, lo: f64, hi: f64) -> bool {
    v >= lo - 1.0e-9 && v <= hi + 1.0e-9
}

fn push_if_missing(values: &mut Vec<f64>, v: f64) {
    if !values.iter().any(|x| (x - v).abs() < 1.0e-9) {
        values.push(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    #[test]
    fn measure_grows_with_a_title() {
        let base = AxisSpec::bottom(0, ScaleLinearSpec::new((0.0, 10.0)));
        let titled = base.clone().with_title("Year");
        let measurer = HeuristicTextMeasurer;
        assert!(titled.measure(&measurer) > base.measure(&measurer));
    }

    #[test]
    fn bottom_axis_emits_domain_ticks_and_labels() {
        let axis = AxisSpec::bottom(0x10_000, ScaleLinearSpec::new((0.0, 10.0)))
            .with_tick_count(5);
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let axis_rect = Rect::new(0.0, 50.0, 100.0, 80.0);
        let marks = axis.marks(plot, axis_rect);

        let paths = marks
            .iter()
            .filter(|m| matches!(m.payload, aevum_core::MarkPayload::Path(_)))
            .count();
        let texts = marks
            .iter()
            .filter(|m| matches!(m.payload, aevum_core::MarkPayload::Text(_)))
            .count();
        // Domain + one tick per label.
        assert_eq!(paths, 1 + texts);
        assert!(texts >= 2);
    }

    #[test]
    fn custom_formatter_is_used_for_labels() {
        let axis = AxisSpec::bottom(0, ScaleLinearSpec::new((0.0, 10.0)))
            .with_tick_count(2)
            .with_tick_formatter(|v, _| format!("<{v}>"));
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let marks = axis.marks(plot, Rect::new(0.0, 50.0, 100.0, 80.0));
        let has_custom = marks.iter().any(|m| match &m.payload {
            aevum_core::MarkPayload::Text(t) => t.text.starts_with('<'),
            _ => false,
        });
        assert!(has_custom);
    }

    #[test]
    fn left_axis_maps_larger_values_higher() {
        let axis = AxisSpec::left(0, ScaleLinearSpec::new((0.0, 100.0)));
        let plot = Rect::new(0.0, 0.0, 100.0, 200.0);
        let scale = axis.scale_linear(plot);
        assert!(scale.map(100.0) < scale.map(0.0));
    }
}
