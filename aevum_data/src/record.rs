// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw rows, normalized records, and entity grouping.

use serde::Deserialize;

/// A raw dataset row, as delivered by the CSV collaborator.
///
/// Field names map onto the dataset's header row. The `end ≥ start` invariant
/// is not validated here; the chart degrades gracefully on nonsense spans.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RawRecord {
    /// Civilization name.
    #[serde(rename = "Civilization")]
    pub civilization: String,
    /// Calendar system description (e.g. "Julian").
    #[serde(rename = "Calendar System")]
    pub calendar_system: String,
    /// Calendar type classification (e.g. "Solar", "Lunar").
    #[serde(rename = "Calendar Type")]
    pub calendar_type: String,
    /// Start year; negative values are BCE.
    #[serde(rename = "Start Date")]
    pub start_year: i32,
    /// End year; negative values are BCE.
    #[serde(rename = "End Date")]
    pub end_year: i32,
    /// Historical period label.
    #[serde(rename = "Historical Period")]
    pub period: String,
    /// Prosperity score.
    #[serde(rename = "Prosperity Score")]
    pub score: f64,
    /// Free-text key events.
    #[serde(rename = "Key Events")]
    pub key_events: String,
}

/// A normalized, render-ready record. Built once per load, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualRecord {
    /// Entity (civilization) name.
    pub entity: String,
    /// Start year; negative values are BCE.
    pub start_year: i32,
    /// End year.
    pub end_year: i32,
    /// Prosperity score.
    pub score: f64,
    /// Historical period label.
    pub period: String,
    /// Free-text key events.
    pub events: String,
    /// `end_year - start_year`.
    pub duration: i32,
    /// Calendar type classification.
    pub calendar_type: String,
}

impl VisualRecord {
    /// Derives a visual record from a raw row.
    pub fn from_raw(raw: &RawRecord) -> Self {
        Self {
            entity: raw.civilization.clone(),
            start_year: raw.start_year,
            end_year: raw.end_year,
            score: raw.score,
            period: raw.period.clone(),
            events: raw.key_events.clone(),
            duration: raw.end_year - raw.start_year,
            calendar_type: raw.calendar_type.clone(),
        }
    }

    /// The midpoint of the record's time span, used for x placement.
    pub fn mid_year(&self) -> f64 {
        (self.start_year as f64 + self.end_year as f64) / 2.0
    }
}

/// Normalizes raw rows into visual records sorted by ascending start year.
///
/// No filtering and no validation happen here; malformed rows are the
/// loader's responsibility. Input order is not preserved (the sort is stable,
/// so rows sharing a start year keep their relative order).
pub fn normalize(rows: &[RawRecord]) -> Vec<VisualRecord> {
    let mut records: Vec<VisualRecord> = rows.iter().map(VisualRecord::from_raw).collect();
    records.sort_by_key(|r| r.start_year);
    records
}

/// All records of one entity, in ascending start-year order.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityGroup {
    /// Entity name.
    pub entity: String,
    /// Member records, ascending by start year.
    pub records: Vec<VisualRecord>,
}

impl EntityGroup {
    /// Sum of member durations.
    ///
    /// This is a visual weighting heuristic for trend stroke width, not a
    /// temporal aggregate; overlapping spans double-count on purpose.
    pub fn total_lifespan(&self) -> f64 {
        self.records.iter().map(|r| r.duration as f64).sum()
    }
}

/// Groups records per entity, keeping entities in first-seen order.
///
/// With `records` already sorted by start year, each group's members are in
/// ascending start-year order too.
pub fn group_by_entity(records: &[VisualRecord]) -> Vec<EntityGroup> {
    let mut groups: Vec<EntityGroup> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|g| g.entity == record.entity) {
            Some(group) => group.records.push(record.clone()),
            None => groups.push(EntityGroup {
                entity: record.entity.clone(),
                records: vec![record.clone()],
            }),
        }
    }
    groups
}

/// Distinct entity names in first-seen order.
pub fn distinct_entities(records: &[VisualRecord]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for record in records {
        if !out.contains(&record.entity) {
            out.push(record.entity.clone());
        }
    }
    out
}

/// Distinct calendar types in first-seen order.
pub fn distinct_calendar_types(records: &[VisualRecord]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for record in records {
        if !out.contains(&record.calendar_type) {
            out.push(record.calendar_type.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, start: i32, end: i32, score: f64) -> RawRecord {
        RawRecord {
            civilization: name.to_owned(),
            calendar_system: "Julian".to_owned(),
            calendar_type: "Solar".to_owned(),
            start_year: start,
            end_year: end,
            period: "Classical".to_owned(),
            score,
            key_events: String::new(),
        }
    }

    #[test]
    fn duration_is_end_minus_start() {
        let rows = vec![raw("Rome", -500, 476, 80.0), raw("Maya", -2000, 900, 60.0)];
        let records = normalize(&rows);
        assert_eq!(records.len(), 2);
        // Sorted ascending by start year: Maya first.
        assert_eq!(records[0].entity, "Maya");
        assert_eq!(records[0].duration, 2900);
        assert_eq!(records[1].entity, "Rome");
        assert_eq!(records[1].duration, 976);
    }

    #[test]
    fn mid_year_handles_bce_spans() {
        let record = VisualRecord::from_raw(&raw("Rome", -500, 476, 80.0));
        assert!((record.mid_year() - (-12.0)).abs() < 1e-9);
    }

    #[test]
    fn grouping_keeps_first_seen_entity_order() {
        let rows = vec![
            raw("Maya", -2000, 900, 60.0),
            raw("Rome", -500, 476, 80.0),
            raw("Maya", 900, 1500, 40.0),
        ];
        let groups = group_by_entity(&normalize(&rows));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].entity, "Maya");
        assert_eq!(groups[0].records.len(), 2);
        assert_eq!(groups[1].entity, "Rome");
        assert_eq!(groups[0].total_lifespan(), 2900.0 + 600.0);
    }

    #[test]
    fn distinct_lists_preserve_first_seen_order() {
        let mut rows = vec![raw("B", 0, 1, 1.0), raw("A", 2, 3, 1.0), raw("B", 4, 5, 1.0)];
        rows[1].calendar_type = "Lunar".to_owned();
        let records: Vec<VisualRecord> = rows.iter().map(VisualRecord::from_raw).collect();
        assert_eq!(distinct_entities(&records), vec!["B", "A"]);
        assert_eq!(distinct_calendar_types(&records), vec!["Solar", "Lunar"]);
    }
}
