// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction state and event application.
//!
//! State is a value: every event produces a new snapshot, and handlers are
//! idempotent with respect to repeated identical events. Nothing here touches
//! the dataset; visibility and highlight only gate what the frame builder
//! emits.

use std::collections::BTreeSet;

use aevum_data::VisualRecord;

use crate::scales::ScaleSet;
use crate::tooltip::{TooltipPayload, payloads_for_entity};

/// A user interaction, as dispatched by the shell.
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionEvent {
    /// Pointer entered a marker or an entity legend entry.
    HoverEnter(String),
    /// Pointer left the hovered element.
    HoverLeave,
    /// The entity's visibility toggle was activated.
    Toggle(String),
    /// Make every entity visible.
    ShowAll,
    /// Hide every entity.
    HideAll,
}

/// Process-local interaction state, reset on data reload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
    /// The currently highlighted entity, if any.
    pub highlighted: Option<String>,
    /// Entities currently eligible for rendering.
    pub visible: BTreeSet<String>,
    /// Active floating annotations.
    pub tooltips: Vec<TooltipPayload>,
}

impl InteractionState {
    /// The initial state: everything visible, nothing highlighted.
    pub fn all_visible(entities: &[String]) -> Self {
        Self {
            highlighted: None,
            visible: entities.iter().cloned().collect(),
            tooltips: Vec::new(),
        }
    }

    /// Whether `entity` is currently visible.
    pub fn is_visible(&self, entity: &str) -> bool {
        self.visible.contains(entity)
    }

    /// Applies one event, returning the next snapshot.
    ///
    /// `records`/`scales` are only consulted to populate tooltips on hover;
    /// `entities` is the full distinct-entity list for the bulk actions.
    pub fn apply(
        &self,
        event: &InteractionEvent,
        records: &[VisualRecord],
        entities: &[String],
        scales: &ScaleSet,
    ) -> Self {
        match event {
            InteractionEvent::HoverEnter(entity) => Self {
                highlighted: Some(entity.clone()),
                visible: self.visible.clone(),
                tooltips: payloads_for_entity(entity, records, scales),
            },
            InteractionEvent::HoverLeave => Self {
                highlighted: None,
                visible: self.visible.clone(),
                tooltips: Vec::new(),
            },
            InteractionEvent::Toggle(entity) => {
                let mut visible = self.visible.clone();
                if !visible.remove(entity) {
                    visible.insert(entity.clone());
                }
                Self {
                    highlighted: self.highlighted.clone(),
                    visible,
                    tooltips: self.tooltips.clone(),
                }
            }
            InteractionEvent::ShowAll => Self {
                highlighted: self.highlighted.clone(),
                visible: entities.iter().cloned().collect(),
                tooltips: self.tooltips.clone(),
            },
            InteractionEvent::HideAll => Self {
                highlighted: self.highlighted.clone(),
                visible: BTreeSet::new(),
                tooltips: self.tooltips.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use aevum_data::{RawRecord, group_by_entity, normalize};

    use super::*;

    fn fixture() -> (Vec<VisualRecord>, Vec<String>, ScaleSet) {
        let mk = |name: &str, start: i32, end: i32| RawRecord {
            civilization: name.to_owned(),
            calendar_system: "Julian".to_owned(),
            calendar_type: "Solar".to_owned(),
            start_year: start,
            end_year: end,
            period: "P".to_owned(),
            score: 50.0,
            key_events: String::new(),
        };
        let records = normalize(&[mk("Rome", -500, 476), mk("Maya", -2000, 900)]);
        let groups = group_by_entity(&records);
        let entities: Vec<String> = groups.iter().map(|g| g.entity.clone()).collect();
        let scales = ScaleSet::build(&records, &groups, Rect::new(0.0, 0.0, 100.0, 100.0));
        (records, entities, scales)
    }

    #[test]
    fn toggling_twice_is_an_involution() {
        let (records, entities, scales) = fixture();
        let start = InteractionState::all_visible(&entities);
        let once = start.apply(
            &InteractionEvent::Toggle("Rome".into()),
            &records,
            &entities,
            &scales,
        );
        assert!(!once.is_visible("Rome"));
        assert!(once.is_visible("Maya"));
        let twice = once.apply(
            &InteractionEvent::Toggle("Rome".into()),
            &records,
            &entities,
            &scales,
        );
        assert_eq!(twice, start);
    }

    #[test]
    fn hide_all_then_show_all_restores_the_full_set() {
        let (records, entities, scales) = fixture();
        let state = InteractionState::all_visible(&entities)
            .apply(
                &InteractionEvent::Toggle("Maya".into()),
                &records,
                &entities,
                &scales,
            )
            .apply(&InteractionEvent::HideAll, &records, &entities, &scales)
            .apply(&InteractionEvent::ShowAll, &records, &entities, &scales);
        assert_eq!(state.visible.len(), entities.len());
        for e in &entities {
            assert!(state.is_visible(e));
        }
    }

    #[test]
    fn hover_populates_one_tooltip_per_record_and_leave_clears() {
        let (records, entities, scales) = fixture();
        let hovered = InteractionState::all_visible(&entities).apply(
            &InteractionEvent::HoverEnter("Maya".into()),
            &records,
            &entities,
            &scales,
        );
        assert_eq!(hovered.highlighted.as_deref(), Some("Maya"));
        assert_eq!(hovered.tooltips.len(), 1);

        let cleared = hovered.apply(&InteractionEvent::HoverLeave, &records, &entities, &scales);
        assert!(cleared.highlighted.is_none());
        assert!(cleared.tooltips.is_empty());
    }

    #[test]
    fn repeated_identical_events_are_idempotent() {
        let (records, entities, scales) = fixture();
        let base = InteractionState::all_visible(&entities);
        let e = InteractionEvent::HoverEnter("Rome".into());
        let once = base.apply(&e, &records, &entities, &scales);
        let twice = once.apply(&e, &records, &entities, &scales);
        assert_eq!(once, twice);

        let hide_once = base.apply(&InteractionEvent::HideAll, &records, &entities, &scales);
        let hide_twice =
            hide_once.apply(&InteractionEvent::HideAll, &records, &entities, &scales);
        assert_eq!(hide_once, hide_twice);
    }

    #[test]
    fn visibility_does_not_disturb_highlight() {
        let (records, entities, scales) = fixture();
        let state = InteractionState::all_visible(&entities)
            .apply(
                &InteractionEvent::HoverEnter("Rome".into()),
                &records,
                &entities,
                &scales,
            )
            .apply(
                &InteractionEvent::Toggle("Maya".into()),
                &records,
                &entities,
                &scales,
            );
        assert_eq!(state.highlighted.as_deref(), Some("Rome"));
        assert!(!state.is_visible("Maya"));
    }
}
