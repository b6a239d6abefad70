// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved marks and their payloads.

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::Brush;

/// A stable mark identity.
///
/// Generators derive ids deterministically (typically an `id_base` plus a
/// per-item offset) so that the same logical mark keeps the same id across
/// frames and reconciliation can tell updates from enter/exit churn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates a mark id from a raw value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns a derived id at `offset` from this one (wrapping).
    pub fn offset(self, offset: u64) -> Self {
        Self(self.0.wrapping_add(offset))
    }
}

/// Horizontal text anchoring relative to the mark position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Anchor at the start (left) edge.
    Start,
    /// Anchor at the horizontal center.
    Middle,
    /// Anchor at the end (right) edge.
    End,
}

/// Vertical baseline interpretation of the mark position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The alphabetic baseline.
    Alphabetic,
    /// The vertical midline.
    Middle,
    /// The top of the line box.
    Hanging,
    /// The ideographic baseline.
    Ideographic,
}

/// A filled axis-aligned rectangle.
#[derive(Clone, Debug)]
pub struct RectMark {
    /// Rectangle in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
}

/// A path with optional fill and stroke.
#[derive(Clone, Debug)]
pub struct PathMark {
    /// Path in scene coordinates.
    pub path: BezPath,
    /// Fill paint (transparent for stroke-only paths).
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0.0` disables stroking.
    pub stroke_width: f64,
    /// Dash pattern in scene units; empty for a solid stroke.
    pub dash_pattern: Vec<f64>,
}

/// A single line of unshaped text.
#[derive(Clone, Debug)]
pub struct TextMark {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Rotation angle in degrees around `pos`.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// The drawable content of a mark.
#[derive(Clone, Debug)]
pub enum MarkPayload {
    /// A filled rectangle.
    Rect(RectMark),
    /// A filled/stroked path.
    Path(PathMark),
    /// A text line.
    Text(TextMark),
}

impl MarkPayload {
    /// Returns geometric bounds, if the payload has intrinsic geometry.
    ///
    /// Text has no intrinsic bounds here; measuring text is the job of the
    /// renderer or a text-measurement hook.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Path(p) => Some(p.path.bounding_box()),
            Self::Text(_) => None,
        }
    }
}

/// Compares two brushes for reconciliation purposes.
///
/// Solid brushes compare by color components. Gradient and image brushes are
/// conservatively treated as unequal, so marks using them re-emit as updates.
pub fn brush_eq(a: &Brush, b: &Brush) -> bool {
    match (a, b) {
        (Brush::Solid(ca), Brush::Solid(cb)) => ca.components == cb.components,
        _ => false,
    }
}

impl PartialEq for RectMark {
    fn eq(&self, other: &Self) -> bool {
        self.rect == other.rect && brush_eq(&self.fill, &other.fill)
    }
}

impl PartialEq for PathMark {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.stroke_width == other.stroke_width
            && self.dash_pattern == other.dash_pattern
            && brush_eq(&self.fill, &other.fill)
            && brush_eq(&self.stroke, &other.stroke)
    }
}

impl PartialEq for TextMark {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
            && self.text == other.text
            && self.font_size == other.font_size
            && self.angle == other.angle
            && self.anchor == other.anchor
            && self.baseline == other.baseline
            && brush_eq(&self.fill, &other.fill)
    }
}

impl PartialEq for MarkPayload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Rect(a), Self::Rect(b)) => a == b,
            (Self::Path(a), Self::Path(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

/// A resolved mark: identity, render order, and payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Render ordering hint; renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// Drawable content.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a mark with z-index 0.
    pub fn new(id: MarkId, payload: MarkPayload) -> Self {
        Self {
            id,
            z_index: 0,
            payload,
        }
    }

    /// Creates a filled rectangle mark.
    pub fn rect(id: MarkId, rect: Rect, fill: impl Into<Brush>) -> Self {
        Self::new(
            id,
            MarkPayload::Rect(RectMark {
                rect,
                fill: fill.into(),
            }),
        )
    }

    /// Creates a path mark with no fill and no stroke; use the `with_*`
    /// helpers to paint it.
    pub fn path(id: MarkId, path: BezPath) -> Self {
        Self::new(
            id,
            MarkPayload::Path(PathMark {
                path,
                fill: Brush::Solid(peniko::Color::TRANSPARENT),
                stroke: Brush::Solid(peniko::Color::TRANSPARENT),
                stroke_width: 0.0,
                dash_pattern: Vec::new(),
            }),
        )
    }

    /// Creates a text mark with default anchoring (start / middle).
    pub fn text(id: MarkId, pos: Point, text: impl Into<String>, font_size: f64) -> Self {
        Self::new(
            id,
            MarkPayload::Text(TextMark {
                pos,
                text: text.into(),
                font_size,
                angle: 0.0,
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Middle,
                fill: Brush::Solid(peniko::Color::BLACK),
            }),
        )
    }

    /// Sets the z-index.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the fill paint (rect, path, and text payloads).
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        let fill = fill.into();
        match &mut self.payload {
            MarkPayload::Rect(r) => r.fill = fill,
            MarkPayload::Path(p) => p.fill = fill,
            MarkPayload::Text(t) => t.fill = fill,
        }
        self
    }

    /// Sets the stroke paint and width (path payloads only).
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        if let MarkPayload::Path(p) = &mut self.payload {
            p.stroke = stroke.into();
            p.stroke_width = stroke_width;
        }
        self
    }

    /// Sets the dash pattern (path payloads only).
    pub fn with_dash_pattern(mut self, dash_pattern: impl Into<Vec<f64>>) -> Self {
        if let MarkPayload::Path(p) = &mut self.payload {
            p.dash_pattern = dash_pattern.into();
        }
        self
    }

    /// Sets the text anchor (text payloads only).
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.anchor = anchor;
        }
        self
    }

    /// Sets the text baseline (text payloads only).
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.baseline = baseline;
        }
        self
    }

    /// Sets the text rotation angle in degrees (text payloads only).
    pub fn with_angle(mut self, angle: f64) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.angle = angle;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use peniko::Color;
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn rect_bounds_are_the_rect() {
        let m = Mark::rect(MarkId::from_raw(1), Rect::new(1.0, 2.0, 3.0, 4.0), css::RED);
        assert_eq!(m.payload.bounds(), Some(Rect::new(1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn text_has_no_intrinsic_bounds() {
        let m = Mark::text(MarkId::from_raw(2), (0.0, 0.0).into(), "hi", 12.0);
        assert_eq!(m.payload.bounds(), None);
    }

    #[test]
    fn solid_brushes_compare_by_components() {
        assert!(brush_eq(
            &Brush::Solid(css::BLACK),
            &Brush::Solid(Color::from_rgb8(0, 0, 0)),
        ));
        assert!(!brush_eq(
            &Brush::Solid(css::BLACK),
            &Brush::Solid(css::BLACK.with_alpha(0.5)),
        ));
    }

    #[test]
    fn path_marks_compare_stroke_state() {
        let mut p = kurbo::BezPath::new();
        p.move_to((0.0, 0.0));
        p.line_to((1.0, 1.0));
        let a = Mark::path(MarkId::from_raw(3), p.clone()).with_stroke(css::BLUE, 1.0);
        let b = Mark::path(MarkId::from_raw(3), p).with_stroke(css::BLUE, 2.0);
        assert_ne!(a, b);
    }
}
