// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation.
//!
//! A legend is a vertical list of swatches with text labels. Swatches come in
//! three shapes: a solid fill, a stroked line sample (whose width can encode
//! a data-derived weight), and a calendar-motif pattern tile.

use kurbo::{BezPath, Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;

use aevum_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::layout::Size;
use crate::measure::{TextMeasurer, TextStyle};
use crate::pattern::Pattern;
use crate::z_order;

/// The visual sample shown next to a legend label.
#[derive(Clone, Debug)]
pub enum Swatch {
    /// A solid filled square.
    Fill(Brush),
    /// A horizontal line sample with the given stroke width.
    Line {
        /// Stroke paint.
        brush: Brush,
        /// Stroke width in scene coordinates.
        width: f64,
    },
    /// A pattern tile on a white backdrop.
    Pattern(Pattern),
}

/// A legend row: a swatch and its label.
#[derive(Clone, Debug)]
pub struct LegendItem {
    /// The label shown next to the swatch.
    pub label: String,
    /// The swatch sample.
    pub swatch: Swatch,
}

impl LegendItem {
    /// A solid-fill swatch row.
    pub fn solid(label: impl Into<String>, fill: impl Into<Brush>) -> Self {
        Self {
            label: label.into(),
            swatch: Swatch::Fill(fill.into()),
        }
    }

    /// A line-sample swatch row.
    pub fn line(label: impl Into<String>, brush: impl Into<Brush>, width: f64) -> Self {
        Self {
            label: label.into(),
            swatch: Swatch::Line {
                brush: brush.into(),
                width,
            },
        }
    }

    /// A pattern-tile swatch row.
    pub fn pattern(label: impl Into<String>, pattern: Pattern) -> Self {
        Self {
            label: label.into(),
            swatch: Swatch::Pattern(pattern),
        }
    }
}

/// An unpositioned legend specification.
///
/// Measure with [`LegendSpec::measure`], then generate marks for a known
/// origin with [`LegendSpec::marks`].
#[derive(Clone, Debug)]
pub struct LegendSpec {
    /// Stable-id base; each generated mark uses a deterministic offset.
    pub id_base: u64,
    /// Swatch square size (line samples span the same width).
    pub swatch_size: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Horizontal gap between swatch and label.
    pub label_dx: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSpec {
    /// Creates a new legend specification with defaults.
    pub fn new(id_base: u64, items: Vec<LegendItem>) -> Self {
        Self {
            id_base,
            swatch_size: 14.0,
            row_gap: 6.0,
            label_dx: 6.0,
            font_size: 10.0,
            text_fill: css::BLACK.into(),
            items,
        }
    }

    /// Sets the label text paint.
    pub fn with_text_fill(mut self, text_fill: impl Into<Brush>) -> Self {
        self.text_fill = text_fill.into();
        self
    }

    /// Sets the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the swatch size.
    pub fn with_swatch_size(mut self, swatch_size: f64) -> Self {
        self.swatch_size = swatch_size;
        self
    }

    fn row_height(&self) -> f64 {
        self.swatch_size.max(self.font_size)
    }

    /// Measures the desired legend size.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> Size {
        let mut max_label = 0.0_f64;
        for item in &self.items {
            let metrics = measurer.measure(&item.label, TextStyle::new(self.font_size));
            max_label = max_label.max(metrics.advance_width);
        }
        let n = self.items.len();
        let height = if n == 0 {
            0.0
        } else {
            n as f64 * self.row_height() + (n - 1) as f64 * self.row_gap
        };
        Size {
            width: self.swatch_size + self.label_dx + max_label,
            height,
        }
    }

    /// Returns one rectangle per row for the legend placed at `(x, y)`.
    ///
    /// Useful as pointer hover targets; rows span swatch and label.
    pub fn item_rects(&self, x: f64, y: f64, measurer: &dyn TextMeasurer) -> Vec<Rect> {
        let row_h = self.row_height();
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let top = y + i as f64 * (row_h + self.row_gap);
                let metrics = measurer.measure(&item.label, TextStyle::new(self.font_size));
                Rect::new(
                    x,
                    top,
                    x + self.swatch_size + self.label_dx + metrics.advance_width,
                    top + row_h,
                )
            })
            .collect()
    }

    /// Generates legend marks for the given origin (top-left).
    pub fn marks(&self, x: f64, y: f64) -> Vec<Mark> {
        let mut out = Vec::new();
        let row_h = self.row_height();

        for (i, item) in self.items.iter().enumerate() {
            let top = y + i as f64 * (row_h + self.row_gap);
            let swatch_y = top + 0.5 * (row_h - self.swatch_size);
            let cy = top + 0.5 * row_h;
            let swatch_id = MarkId::from_raw(self.id_base + i as u64);

            match &item.swatch {
                Swatch::Fill(fill) => {
                    out.push(
                        Mark::rect(
                            swatch_id,
                            Rect::new(
                                x,
                                swatch_y,
                                x + self.swatch_size,
                                swatch_y + self.swatch_size,
                            ),
                            fill.clone(),
                        )
                        .with_z_index(z_order::LEGEND_SWATCHES),
                    );
                }
                Swatch::Line { brush, width } => {
                    let mut p = BezPath::new();
                    p.move_to((x, cy));
                    p.line_to((x + self.swatch_size, cy));
                    out.push(
                        Mark::path(swatch_id, p)
                            .with_stroke(brush.clone(), *width)
                            .with_z_index(z_order::LEGEND_SWATCHES),
                    );
                }
                Swatch::Pattern(pattern) => {
                    let tile = Rect::new(
                        x,
                        swatch_y,
                        x + self.swatch_size,
                        swatch_y + self.swatch_size,
                    );
                    out.push(
                        Mark::rect(swatch_id, tile, css::WHITE)
                            .with_z_index(z_order::LEGEND_SWATCHES),
                    );
                    let motif_size = 0.9 * self.swatch_size;
                    out.push(
                        Mark::path(
                            MarkId::from_raw(self.id_base + 3000 + i as u64),
                            pattern.instanced(Point::new(tile.center().x, tile.center().y), motif_size),
                        )
                        .with_stroke(css::BLACK, Pattern::stroke_width_for(motif_size))
                        .with_z_index(z_order::LEGEND_SWATCHES),
                    );
                    let mut border = BezPath::new();
                    border.move_to((tile.x0, tile.y0));
                    border.line_to((tile.x1, tile.y0));
                    border.line_to((tile.x1, tile.y1));
                    border.line_to((tile.x0, tile.y1));
                    border.close_path();
                    out.push(
                        Mark::path(MarkId::from_raw(self.id_base + 4000 + i as u64), border)
                            .with_stroke(css::BLACK, 0.5)
                            .with_z_index(z_order::LEGEND_SWATCHES),
                    );
                }
            }

            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + 1000 + i as u64),
                    (x + self.swatch_size + self.label_dx, cy).into(),
                    item.label.clone(),
                    self.font_size,
                )
                .with_anchor(TextAnchor::Start)
                .with_baseline(TextBaseline::Middle)
                .with_fill(self.text_fill.clone())
                .with_z_index(z_order::LEGEND_LABELS),
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    #[test]
    fn measure_tracks_longest_label_and_row_count() {
        let measurer = HeuristicTextMeasurer;
        let short = LegendSpec::new(1, vec![LegendItem::solid("A", css::RED)]);
        let long = LegendSpec::new(
            1,
            vec![
                LegendItem::solid("A", css::RED),
                LegendItem::solid("A much longer label", css::BLUE),
            ],
        );
        let s1 = short.measure(&measurer);
        let s2 = long.measure(&measurer);
        assert!(s2.width > s1.width);
        assert!(s2.height > s1.height);
    }

    #[test]
    fn line_swatch_rows_emit_a_stroked_path() {
        let legend = LegendSpec::new(
            10,
            vec![LegendItem::line("Rome", css::RED, 3.0)],
        );
        let marks = legend.marks(0.0, 0.0);
        assert_eq!(marks.len(), 2);
        match &marks[0].payload {
            aevum_core::MarkPayload::Path(p) => assert_eq!(p.stroke_width, 3.0),
            other => panic!("expected path swatch, got {other:?}"),
        }
    }

    #[test]
    fn pattern_swatch_rows_emit_tile_motif_border_and_label() {
        let legend = LegendSpec::new(
            10,
            vec![LegendItem::pattern(
                "Solar",
                Pattern::for_calendar("Solar", 0),
            )],
        );
        let marks = legend.marks(0.0, 0.0);
        assert_eq!(marks.len(), 4);
    }

    #[test]
    fn item_rects_line_up_with_rows() {
        let measurer = HeuristicTextMeasurer;
        let legend = LegendSpec::new(
            10,
            vec![
                LegendItem::solid("a", css::RED),
                LegendItem::solid("b", css::BLUE),
            ],
        );
        let rects = legend.item_rects(5.0, 10.0, &measurer);
        assert_eq!(rects.len(), 2);
        assert!(rects[1].y0 > rects[0].y1 - 1e-9);
        assert_eq!(rects[0].x0, 5.0);
    }
}
