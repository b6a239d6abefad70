// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dashboard's scale set.

use kurbo::{Point, Rect};
use peniko::Color;

use aevum_charts::{ScaleLinear, ScaleOrdinal, ScaleSqrt};
use aevum_data::{EntityGroup, VisualRecord};

use crate::theme;

/// Marker radius range in pixels.
pub const RADIUS_RANGE: (f64, f64) = (5.0, 40.0);
/// Trend stroke weight range in pixels.
pub const STROKE_WEIGHT_RANGE: (f64, f64) = (1.0, 5.0);

/// The five mappings derived from one dataset and one data rectangle.
///
/// Domains are pure functions of the record set; ranges come from the
/// arranged layout. A resize rebuilds the set against the same records, so
/// the raw dataset is never reprocessed.
#[derive(Clone, Debug)]
pub struct ScaleSet {
    /// Year → x position.
    pub x: ScaleLinear,
    /// Score → y position (inverted range; higher scores render higher).
    pub y: ScaleLinear,
    /// Duration → marker radius (area-proportional).
    pub radius: ScaleSqrt,
    /// Entity name → color, stable first-seen assignment.
    pub color: ScaleOrdinal,
    /// Total lifespan → trend stroke weight.
    pub stroke_weight: ScaleLinear,
}

/// The year domain: `[min start, max end]`, or `[0, 0]` when empty.
pub fn x_domain(records: &[VisualRecord]) -> (f64, f64) {
    if records.is_empty() {
        return (0.0, 0.0);
    }
    (
        records
            .iter()
            .map(|r| r.start_year as f64)
            .fold(f64::INFINITY, f64::min),
        records
            .iter()
            .map(|r| r.end_year as f64)
            .fold(f64::NEG_INFINITY, f64::max),
    )
}

/// The score domain: `[min score, max score]`, or `[0, 0]` when empty.
pub fn y_domain(records: &[VisualRecord]) -> (f64, f64) {
    if records.is_empty() {
        return (0.0, 0.0);
    }
    (
        records.iter().map(|r| r.score).fold(f64::INFINITY, f64::min),
        records
            .iter()
            .map(|r| r.score)
            .fold(f64::NEG_INFINITY, f64::max),
    )
}

impl ScaleSet {
    /// Builds the scale set for `records`/`groups` against a data rectangle.
    pub fn build(records: &[VisualRecord], groups: &[EntityGroup], data: Rect) -> Self {
        let x_domain = x_domain(records);
        let y_domain = y_domain(records);
        let max_duration = records
            .iter()
            .map(|r| r.duration as f64)
            .fold(0.0_f64, f64::max);
        let max_lifespan = groups
            .iter()
            .map(EntityGroup::total_lifespan)
            .fold(0.0_f64, f64::max);

        Self {
            x: ScaleLinear::new(x_domain, (data.x0, data.x1)),
            y: ScaleLinear::new(y_domain, (data.y1, data.y0)),
            radius: ScaleSqrt::new((0.0, max_duration), RADIUS_RANGE),
            color: ScaleOrdinal::from_domain(
                groups.iter().map(|g| g.entity.clone()),
                &theme::entity_palette(),
            ),
            stroke_weight: ScaleLinear::new((0.0, max_lifespan), STROKE_WEIGHT_RANGE),
        }
    }

    /// The plot position of a record: midpoint of its span vs. its score.
    pub fn position(&self, record: &VisualRecord) -> Point {
        Point::new(self.x.map(record.mid_year()), self.y.map(record.score))
    }

    /// The marker radius of a record.
    pub fn radius_for(&self, record: &VisualRecord) -> f64 {
        self.radius.map(record.duration as f64)
    }

    /// The assigned color of an entity.
    pub fn color_for(&self, entity: &str) -> Color {
        self.color.color(entity)
    }

    /// The trend stroke weight of a group.
    pub fn weight_for(&self, group: &EntityGroup) -> f64 {
        self.stroke_weight.map(group.total_lifespan())
    }
}

#[cfg(test)]
mod tests {
    use aevum_data::{RawRecord, group_by_entity, normalize};

    use super::*;

    fn dataset() -> (Vec<VisualRecord>, Vec<EntityGroup>) {
        let rows = vec![
            RawRecord {
                civilization: "Rome".into(),
                calendar_system: "Julian".into(),
                calendar_type: "Solar".into(),
                start_year: -500,
                end_year: 476,
                period: "Classical".into(),
                score: 80.0,
                key_events: String::new(),
            },
            RawRecord {
                civilization: "Maya".into(),
                calendar_system: "Haab".into(),
                calendar_type: "Lunar".into(),
                start_year: -2000,
                end_year: 900,
                period: "Preclassic".into(),
                score: 60.0,
                key_events: String::new(),
            },
        ];
        let records = normalize(&rows);
        let groups = group_by_entity(&records);
        (records, groups)
    }

    #[test]
    fn domains_follow_the_reference_scenario() {
        let (records, groups) = dataset();
        let scales = ScaleSet::build(&records, &groups, Rect::new(0.0, 0.0, 290.0, 100.0));
        assert_eq!(scales.x.domain_min(), -2000.0);
        assert_eq!(scales.x.domain_max(), 900.0);
        assert_eq!(scales.y.domain_min(), 60.0);
        assert_eq!(scales.y.domain_max(), 80.0);
        assert_eq!(scales.radius.domain_max(), 2900.0);
        // Scores map inverted: the higher score sits higher on screen.
        let rome_y = scales.y.map(80.0);
        let maya_y = scales.y.map(60.0);
        assert!(rome_y < maya_y);
    }

    #[test]
    fn empty_dataset_defaults_domains_to_zero() {
        let scales = ScaleSet::build(&[], &[], Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(scales.x.domain_min(), 0.0);
        assert_eq!(scales.x.domain_max(), 0.0);
        assert_eq!(scales.y.domain_min(), 0.0);
        // Degenerate domains still map without panicking.
        assert_eq!(scales.x.map(123.0), 0.0);
        assert_eq!(scales.radius.map(0.0), RADIUS_RANGE.0);
    }

    #[test]
    fn color_assignment_is_stable_across_rebuilds() {
        let (records, groups) = dataset();
        let a = ScaleSet::build(&records, &groups, Rect::new(0.0, 0.0, 290.0, 100.0));
        let b = ScaleSet::build(&records, &groups, Rect::new(0.0, 0.0, 999.0, 10.0));
        for g in &groups {
            assert_eq!(
                a.color_for(&g.entity).to_rgba8(),
                b.color_for(&g.entity).to_rgba8()
            );
        }
        // First-seen order: Maya starts earlier, so it gets the first color.
        assert_eq!(
            a.color_for("Maya").to_rgba8(),
            theme::entity_palette()[0].to_rgba8()
        );
    }
}
