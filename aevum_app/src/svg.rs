// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG dump of the retained frame, for debugging and snapshots.

use kurbo::Rect;
use peniko::Brush;

use aevum_core::{MarkPayload, TextAnchor, TextBaseline};

use crate::store::MarkSnapshot;

/// Renders sorted mark snapshots as an SVG document over `view_box`.
pub(crate) fn to_svg_string(marks: &[MarkSnapshot], view_box: Rect) -> String {
    let mut out = String::new();

    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    out.push_str(&format!(
        r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
        view_box.x0,
        view_box.y0,
        view_box.width(),
        view_box.height(),
        view_box.width(),
        view_box.height()
    ));
    out.push('\n');

    for mark in marks {
        match &mark.payload {
            MarkPayload::Rect(r) => {
                out.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    r.rect.x0,
                    r.rect.y0,
                    r.rect.width(),
                    r.rect.height(),
                ));
                write_paint_attr(&mut out, "fill", &r.fill);
                out.push_str("/>\n");
            }
            MarkPayload::Text(t) => {
                let baseline = match t.baseline {
                    TextBaseline::Middle => "middle",
                    TextBaseline::Alphabetic => "alphabetic",
                    TextBaseline::Hanging => "hanging",
                    TextBaseline::Ideographic => "ideographic",
                };
                out.push_str(&format!(
                    r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                    t.pos.x, t.pos.y, t.font_size, baseline
                ));
                if t.angle != 0.0 {
                    out.push_str(&format!(
                        r#" transform="rotate({} {} {})""#,
                        t.angle, t.pos.x, t.pos.y
                    ));
                }
                out.push_str(match t.anchor {
                    TextAnchor::Start => r#" text-anchor="start""#,
                    TextAnchor::Middle => r#" text-anchor="middle""#,
                    TextAnchor::End => r#" text-anchor="end""#,
                });
                write_paint_attr(&mut out, "fill", &t.fill);
                out.push('>');
                out.push_str(&escape_xml(&t.text));
                out.push_str("</text>\n");
            }
            MarkPayload::Path(p) => {
                let d = p.path.to_svg();
                out.push_str(&format!(r#"<path d="{d}""#));
                write_paint_attr(&mut out, "fill", &p.fill);
                if p.stroke_width > 0.0 {
                    write_paint_attr(&mut out, "stroke", &p.stroke);
                    out.push_str(&format!(r#" stroke-width="{}""#, p.stroke_width));
                    if !p.dash_pattern.is_empty() {
                        let dashes: Vec<String> =
                            p.dash_pattern.iter().map(|d| d.to_string()).collect();
                        out.push_str(&format!(
                            r#" stroke-dasharray="{}""#,
                            dashes.join(" ")
                        ));
                    }
                }
                out.push_str("/>\n");
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let paint = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            if rgba.a == 0 {
                return ("none".to_string(), None);
            }
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (paint, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use aevum_core::{Mark, MarkId};
    use peniko::color::palette::css;

    use super::*;
    use crate::store::MarkStore;

    #[test]
    fn dump_escapes_free_text_and_emits_dashes() {
        let mut store = MarkStore::default();
        let mut scene = aevum_core::Scene::new();
        let mut dashed = kurbo::BezPath::new();
        dashed.move_to((0.0, 0.0));
        dashed.line_to((10.0, 0.0));
        let diffs = scene.tick([
            Mark::text(MarkId::from_raw(1), (5.0, 5.0).into(), "a<b & c", 10.0),
            Mark::path(MarkId::from_raw(2), dashed)
                .with_stroke(css::BLACK, 1.0)
                .with_dash_pattern([4.0, 4.0]),
        ]);
        store.apply_diffs(&diffs);

        let svg = to_svg_string(&store.sorted(), Rect::new(0.0, 0.0, 20.0, 20.0));
        assert!(svg.contains("a&lt;b &amp; c"));
        assert!(svg.contains(r#"stroke-dasharray="4 4""#));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
