// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parley-backed text: shaping for Vello glyph runs and shaping-aware
//! measurement for chart guide layout.

use std::cell::RefCell;

use kurbo::{Affine, Vec2};
use parley::style::{FontFamily as ParleyFontFamily, FontStack, GenericFamily, StyleProperty};
use parley::{Alignment, AlignmentOptions, FontContext, LayoutContext};
use vello::Scene as VelloScene;
use vello::peniko::{Fill, FontData};

use aevum_charts::{FontFamily, FontStyle, TextMeasurer, TextMetrics, TextStyle};
use aevum_core::{TextAnchor, TextBaseline, TextMark};

fn parley_font_stack(family: &FontFamily) -> FontStack<'_> {
    let family = match family {
        FontFamily::Serif => ParleyFontFamily::Generic(GenericFamily::Serif),
        FontFamily::SansSerif => ParleyFontFamily::Generic(GenericFamily::SansSerif),
        FontFamily::Monospace => ParleyFontFamily::Generic(GenericFamily::Monospace),
        FontFamily::Named(name) => {
            ParleyFontFamily::Named(std::borrow::Cow::Borrowed(name.as_ref()))
        }
    };
    FontStack::from(family)
}

fn parley_font_style(style: FontStyle) -> parley::FontStyle {
    match style {
        FontStyle::Normal => parley::FontStyle::Normal,
        FontStyle::Italic => parley::FontStyle::Italic,
        FontStyle::Oblique => parley::FontStyle::Oblique(None),
    }
}

fn font_size_f32(font_size: f64) -> f32 {
    if !font_size.is_finite() {
        return 0.0;
    }
    let font_size = font_size.max(0.0);
    if font_size >= f64::from(f32::MAX) {
        f32::MAX
    } else {
        font_size as f32
    }
}

/// Shapes and draws single-line text marks into a Vello scene.
pub(crate) struct TextEngine {
    font_cx: FontContext,
    layout_cx: LayoutContext<()>,
}

impl TextEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
        }
    }

    pub(crate) fn draw(&mut self, scene: &mut VelloScene, global: Affine, mark: &TextMark) {
        let text = mark.text.split('\n').next().unwrap_or("");
        if text.is_empty() {
            return;
        }

        let mut builder = self
            .layout_cx
            .ranged_builder(&mut self.font_cx, text, 1.0, true);
        builder.push_default(StyleProperty::FontSize(font_size_f32(mark.font_size)));
        builder.push_default(StyleProperty::FontStack(FontStack::from(
            ParleyFontFamily::Generic(GenericFamily::SansSerif),
        )));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, Alignment::Start, AlignmentOptions::default());

        let Some(line) = layout.lines().next() else {
            return;
        };

        let metrics = line.metrics();
        let width = metrics.advance as f64;
        let ascent = metrics.ascent as f64;
        let descent = metrics.descent as f64;
        let leading = metrics.leading as f64;
        let baseline_offset = metrics.baseline as f64;
        let height = ascent + descent + leading;

        let ref_x = match mark.anchor {
            TextAnchor::Start => 0.0,
            TextAnchor::Middle => 0.5 * width,
            TextAnchor::End => width,
        };

        let top = baseline_offset - ascent;
        let ref_y = match mark.baseline {
            TextBaseline::Alphabetic | TextBaseline::Ideographic => baseline_offset,
            TextBaseline::Hanging => top,
            TextBaseline::Middle => top + 0.5 * height,
        };

        let angle = mark.angle.to_radians();
        let transform = global
            * (Affine::translate(Vec2::new(mark.pos.x, mark.pos.y))
                * Affine::rotate(angle)
                * Affine::translate(Vec2::new(-ref_x, -ref_y)));

        for item in line.items() {
            let parley::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let font: &FontData = run.run().font();
            let glyphs = run.positioned_glyphs().map(|g| vello::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });

            scene
                .draw_glyphs(font)
                .transform(transform)
                .font_size(run.run().font_size())
                .brush(&mark.fill)
                .draw(Fill::NonZero, glyphs);
        }
    }
}

/// A [`TextMeasurer`] backed by Parley, for shaping-aware guide layout.
pub(crate) struct ParleyTextMeasurer {
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<LayoutContext<()>>,
}

impl ParleyTextMeasurer {
    pub(crate) fn new() -> Self {
        Self {
            font_cx: RefCell::new(FontContext::new()),
            layout_cx: RefCell::new(LayoutContext::new()),
        }
    }
}

impl TextMeasurer for ParleyTextMeasurer {
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
        let empty = TextMetrics {
            advance_width: 0.0,
            ascent: 0.0,
            descent: 0.0,
            leading: 0.0,
        };

        let text = text.split('\n').next().unwrap_or("");
        if text.is_empty() {
            return empty;
        }

        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();

        let mut builder = layout_cx.ranged_builder(&mut font_cx, text, 1.0, true);
        builder.push_default(StyleProperty::FontSize(font_size_f32(style.font_size)));
        builder.push_default(StyleProperty::FontStack(parley_font_stack(
            &style.font_family,
        )));
        builder.push_default(StyleProperty::FontStyle(parley_font_style(
            style.font_style,
        )));
        builder.push_default(StyleProperty::FontWeight(parley::FontWeight::new(
            f32::from(style.font_weight.0),
        )));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, Alignment::Start, AlignmentOptions::default());

        let Some(line) = layout.lines().next() else {
            return empty;
        };

        let m = line.metrics();
        TextMetrics {
            advance_width: m.advance as f64,
            ascent: m.ascent as f64,
            descent: m.descent as f64,
            leading: m.leading as f64,
        }
    }
}
