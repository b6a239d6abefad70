// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip payload formatting and overlay marks.

use kurbo::{Point, Rect};
use peniko::color::palette::css;

use aevum_charts::{TextMeasurer, TextMarkSpec, TextStyle, format_year_span};
use aevum_core::{Mark, MarkId, TextAnchor, TextBaseline};
use aevum_data::VisualRecord;

use crate::scales::ScaleSet;

const FONT_SIZE: f64 = 11.0;
const LINE_HEIGHT: f64 = 14.0;
const PADDING: f64 = 6.0;
const ANCHOR_OFFSET: f64 = 10.0;

/// One floating annotation: a screen position and formatted text lines.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipPayload {
    /// Anchor x in scene coordinates.
    pub x: f64,
    /// Anchor y in scene coordinates.
    pub y: f64,
    /// Formatted content, one string per rendered line.
    pub lines: Vec<String>,
}

/// Formats the annotation for one record, anchored at its plot position.
///
/// The free-text fields are rendered as given; the dataset is trusted.
pub fn payload_for(record: &VisualRecord, scales: &ScaleSet) -> TooltipPayload {
    let pos = scales.position(record);
    let score = if record.score.fract() == 0.0 {
        format!("{:.0}", record.score)
    } else {
        format!("{}", record.score)
    };
    TooltipPayload {
        x: pos.x,
        y: pos.y,
        lines: vec![
            record.entity.clone(),
            format!("Period: {}", record.period),
            format!(
                "Years: {}",
                format_year_span(record.start_year as f64, record.end_year as f64)
            ),
            format!("Score: {score}"),
            format!("Calendar Type: {}", record.calendar_type),
            format!("Events: {}", record.events),
        ],
    }
}

/// Payloads for every record belonging to `entity`.
pub fn payloads_for_entity(
    entity: &str,
    records: &[VisualRecord],
    scales: &ScaleSet,
) -> Vec<TooltipPayload> {
    records
        .iter()
        .filter(|r| r.entity == entity)
        .map(|r| payload_for(r, scales))
        .collect()
}

/// Builds overlay marks for the active tooltips.
///
/// Each payload renders a backdrop with its text lines, offset from the
/// anchor and clamped into `view`. The overlay draws above every other layer
/// and is never a pointer target.
pub fn tooltip_marks(
    payloads: &[TooltipPayload],
    view: Rect,
    measurer: &dyn TextMeasurer,
    id_base: u64,
) -> Vec<Mark> {
    let mut out = Vec::new();

    for (t, payload) in payloads.iter().enumerate() {
        let mut width = 0.0_f64;
        for line in &payload.lines {
            width = width.max(measurer.measure(line, TextStyle::new(FONT_SIZE)).advance_width);
        }
        let width = width + 2.0 * PADDING;
        let height = payload.lines.len() as f64 * LINE_HEIGHT + 2.0 * PADDING;

        let mut x0 = payload.x + ANCHOR_OFFSET;
        let mut y0 = payload.y + ANCHOR_OFFSET;
        if x0 + width > view.x1 {
            x0 = (payload.x - ANCHOR_OFFSET - width).max(view.x0);
        }
        if y0 + height > view.y1 {
            y0 = (payload.y - ANCHOR_OFFSET - height).max(view.y0);
        }

        let backdrop = Rect::new(x0, y0, x0 + width, y0 + height);
        let id = id_base + (t as u64) * 64;

        out.push(
            Mark::rect(
                MarkId::from_raw(id),
                backdrop,
                css::WHITE.with_alpha(0.9),
            )
            .with_z_index(aevum_charts::TOOLTIPS),
        );
        let mut border = kurbo::BezPath::new();
        border.move_to((backdrop.x0, backdrop.y0));
        border.line_to((backdrop.x1, backdrop.y0));
        border.line_to((backdrop.x1, backdrop.y1));
        border.line_to((backdrop.x0, backdrop.y1));
        border.close_path();
        out.push(
            Mark::path(MarkId::from_raw(id + 1), border)
                .with_stroke(css::BLACK.with_alpha(0.2), 1.0)
                .with_z_index(aevum_charts::TOOLTIPS),
        );

        for (l, line) in payload.lines.iter().enumerate() {
            out.push(
                TextMarkSpec::new(
                    MarkId::from_raw(id + 2 + l as u64),
                    Point::new(
                        backdrop.x0 + PADDING,
                        backdrop.y0 + PADDING + (l as f64 + 0.5) * LINE_HEIGHT,
                    ),
                    line.clone(),
                )
                .with_font_size(FONT_SIZE)
                .with_fill(css::BLACK)
                .with_anchor(TextAnchor::Start)
                .with_baseline(TextBaseline::Middle)
                .with_z_index(aevum_charts::TOOLTIPS)
                .mark(),
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use aevum_charts::HeuristicTextMeasurer;
    use aevum_data::{RawRecord, group_by_entity, normalize};

    use super::*;

    fn scales_and_records() -> (Vec<VisualRecord>, ScaleSet) {
        let rows = vec![RawRecord {
            civilization: "Rome".into(),
            calendar_system: "Julian".into(),
            calendar_type: "Solar".into(),
            start_year: -500,
            end_year: 476,
            period: "Classical".into(),
            score: 80.0,
            key_events: "Punic Wars".into(),
        }];
        let records = normalize(&rows);
        let groups = group_by_entity(&records);
        let scales = ScaleSet::build(&records, &groups, Rect::new(0.0, 0.0, 100.0, 100.0));
        (records, scales)
    }

    #[test]
    fn payload_lines_cover_all_fields() {
        let (records, scales) = scales_and_records();
        let payload = payload_for(&records[0], &scales);
        assert_eq!(payload.lines[0], "Rome");
        assert_eq!(payload.lines[1], "Period: Classical");
        assert_eq!(payload.lines[2], "Years: 500 BCE - 476 CE");
        assert_eq!(payload.lines[3], "Score: 80");
        assert_eq!(payload.lines[4], "Calendar Type: Solar");
        assert_eq!(payload.lines[5], "Events: Punic Wars");
    }

    #[test]
    fn overlay_marks_stay_inside_the_view() {
        let (records, scales) = scales_and_records();
        // Anchor near the bottom-right corner forces the flip-and-clamp path.
        let payload = TooltipPayload {
            x: 99.0,
            y: 99.0,
            ..payload_for(&records[0], &scales)
        };
        let view = Rect::new(0.0, 0.0, 100.0, 100.0);
        let marks = tooltip_marks(&[payload], view, &HeuristicTextMeasurer, 0x70_000);
        let backdrop = marks[0].payload.bounds().unwrap();
        assert!(backdrop.x0 >= view.x0 - 1e-9);
        assert!(backdrop.y0 >= view.y0 - 1e-9);
    }

    #[test]
    fn one_payload_per_record_of_the_entity() {
        let (records, scales) = scales_and_records();
        let payloads = payloads_for_entity("Rome", &records, &scales);
        assert_eq!(payloads.len(), 1);
        assert!(payloads_for_entity("Atlantis", &records, &scales).is_empty());
    }
}
