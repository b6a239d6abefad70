// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny measure/arrange layout helper for charts.
//!
//! - **Measure**: determine desired extents (margins) for guides (axes) and
//!   the fixed-width side panel.
//! - **Arrange**: place everything relative to the plot rectangle.
//!
//! When `view_size` is set the plot is derived from the available view
//! (fit-to-container behavior), which is what the resizable application
//! shell uses; otherwise `plot_size` is taken as authored.

use kurbo::Rect;

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

/// Layout inputs for a single chart: a plot area, axes, and a side panel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartLayoutSpec {
    /// The desired plot size (fallback when `view_size` is `None`).
    pub plot_size: Size,
    /// Optional explicit view size (outer chart bounds).
    ///
    /// If set, [`ChartLayout::arrange`] computes the largest plot size that
    /// fits after accounting for guides, the panel, and `outer_padding`.
    pub view_size: Option<Size>,
    /// Extra padding around the whole chart (applied on all sides).
    pub outer_padding: f64,
    /// Extra padding applied inside the plot rectangle.
    pub plot_padding: f64,
    /// Whether to include a left axis, and its desired margin thickness.
    pub axis_left: Option<f64>,
    /// Whether to include a bottom axis, and its desired margin thickness.
    pub axis_bottom: Option<f64>,
    /// Optional fixed-width side panel reserved at the right edge.
    pub side_panel: Option<f64>,
    /// Gap between the plot block and the side panel.
    pub panel_gap: f64,
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer chart bounds.
    pub view: Rect,
    /// The plot rectangle.
    pub plot: Rect,
    /// The inner data rectangle (plot inset by `plot_padding`).
    pub data: Rect,
    /// Reserved rectangle for the left axis (if any).
    pub axis_left: Option<Rect>,
    /// Reserved rectangle for the bottom axis (if any).
    pub axis_bottom: Option<Rect>,
    /// Side panel rectangle (if any), spanning the full padded height.
    pub panel: Option<Rect>,
}

impl ChartLayout {
    /// Computes a layout from the provided specification.
    pub fn arrange(spec: &ChartLayoutSpec) -> Self {
        let outer_padding = spec.outer_padding.max(0.0);
        let plot_padding = spec.plot_padding.max(0.0);
        let axis_left_w = spec.axis_left.unwrap_or(0.0).max(0.0);
        let axis_bottom_h = spec.axis_bottom.unwrap_or(0.0).max(0.0);
        let panel_w = spec.side_panel.unwrap_or(0.0).max(0.0);
        let panel_gap = if spec.side_panel.is_some() {
            spec.panel_gap.max(0.0)
        } else {
            0.0
        };

        let margin_left = outer_padding + axis_left_w;
        let margin_right = outer_padding + panel_w + panel_gap;
        let margin_top = outer_padding;
        let margin_bottom = outer_padding + axis_bottom_h;

        let (plot_w, plot_h) = match spec.view_size {
            Some(v) => (
                (v.width.max(0.0) - margin_left - margin_right).max(0.0),
                (v.height.max(0.0) - margin_top - margin_bottom).max(0.0),
            ),
            None => (
                spec.plot_size.width.max(0.0),
                spec.plot_size.height.max(0.0),
            ),
        };

        let plot = Rect::new(
            margin_left,
            margin_top,
            margin_left + plot_w,
            margin_top + plot_h,
        );

        let inset_x = plot_padding.min(0.5 * plot.width());
        let inset_y = plot_padding.min(0.5 * plot.height());
        let data = Rect::new(
            plot.x0 + inset_x,
            plot.y0 + inset_y,
            plot.x1 - inset_x,
            plot.y1 - inset_y,
        );

        // Axes sit adjacent to the *data* rectangle so scale mapping matches marks.
        let axis_left = (axis_left_w > 0.0)
            .then(|| Rect::new(data.x0 - axis_left_w, data.y0, data.x0, data.y1));
        let axis_bottom = (axis_bottom_h > 0.0).then(|| {
            Rect::new(data.x0, data.y1, data.x1, data.y1 + axis_bottom_h)
        });

        let view_size = spec.view_size.unwrap_or(Size {
            width: margin_left + plot_w + margin_right,
            height: margin_top + plot_h + margin_bottom,
        });
        let view = Rect::new(0.0, 0.0, view_size.width, view_size.height);

        let panel = (panel_w > 0.0).then(|| {
            Rect::new(
                view.x1 - outer_padding - panel_w,
                outer_padding,
                view.x1 - outer_padding,
                view.y1 - outer_padding,
            )
        });

        Self {
            view,
            plot,
            data,
            axis_left,
            axis_bottom,
            panel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_and_axes_reserve_margins_inside_the_view() {
        let spec = ChartLayoutSpec {
            view_size: Some(Size {
                width: 1000.0,
                height: 600.0,
            }),
            outer_padding: 20.0,
            axis_left: Some(60.0),
            axis_bottom: Some(40.0),
            side_panel: Some(240.0),
            panel_gap: 20.0,
            ..ChartLayoutSpec::default()
        };

        let layout = ChartLayout::arrange(&spec);
        assert_eq!(layout.view, Rect::new(0.0, 0.0, 1000.0, 600.0));
        // plot.x0 = outer + axis_left, plot.x1 = view - outer - panel - gap.
        assert!((layout.plot.x0 - 80.0).abs() < 1e-9);
        assert!((layout.plot.x1 - 720.0).abs() < 1e-9);
        assert!((layout.plot.y1 - 540.0).abs() < 1e-9);

        let panel = layout.panel.expect("panel rect");
        assert!((panel.x0 - 740.0).abs() < 1e-9);
        assert!((panel.x1 - 980.0).abs() < 1e-9);
        assert!((panel.y0 - 20.0).abs() < 1e-9);
        assert!((panel.y1 - 580.0).abs() < 1e-9);

        let axis_left = layout.axis_left.expect("axis rect");
        assert!((axis_left.x1 - layout.data.x0).abs() < 1e-9);
    }

    #[test]
    fn undersized_view_never_goes_negative() {
        let spec = ChartLayoutSpec {
            view_size: Some(Size {
                width: 100.0,
                height: 30.0,
            }),
            outer_padding: 20.0,
            axis_left: Some(60.0),
            axis_bottom: Some(40.0),
            side_panel: Some(240.0),
            panel_gap: 20.0,
            ..ChartLayoutSpec::default()
        };
        let layout = ChartLayout::arrange(&spec);
        assert!(layout.plot.width() >= 0.0);
        assert!(layout.plot.height() >= 0.0);
    }

    #[test]
    fn authored_plot_size_expands_the_view() {
        let spec = ChartLayoutSpec {
            plot_size: Size {
                width: 200.0,
                height: 100.0,
            },
            outer_padding: 10.0,
            axis_left: Some(30.0),
            axis_bottom: Some(20.0),
            ..ChartLayoutSpec::default()
        };
        let layout = ChartLayout::arrange(&spec);
        assert!((layout.view.x1 - (10.0 + 30.0 + 200.0 + 10.0)).abs() < 1e-9);
        assert!((layout.view.y1 - (10.0 + 100.0 + 20.0 + 10.0)).abs() < 1e-9);
        assert!(layout.panel.is_none());
    }
}
