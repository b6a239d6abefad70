// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The civilization prosperity dashboard: data-to-visual mapping.
//!
//! This crate turns the normalized record set into rendered frames:
//! - [`ScaleSet`] derives the five mappings (time, score, radius, color,
//!   stroke weight) from the record set and the arranged data rectangle.
//! - [`InteractionState`] is a value snapshot of highlight, visibility, and
//!   active tooltips; [`InteractionEvent`]s produce new snapshots.
//! - [`Dashboard::build_frame`] is the pure
//!   `(records, scales, interaction state) → marks` function, which also
//!   yields the hover/click regions the windowing shell dispatches against.
//!
//! Data flows one direction: records → scales → marks. Interaction flows
//! back only as new state snapshots; the dataset itself is never touched
//! after load.

mod frame;
mod scales;
mod state;
mod theme;
mod tooltip;

pub use frame::{
    ClickTarget, Dashboard, Frame, HitShape, HoverTarget, PANEL_WIDTH, PanelAction,
};
pub use scales::{RADIUS_RANGE, STROKE_WEIGHT_RANGE, ScaleSet, x_domain, y_domain};
pub use state::{InteractionEvent, InteractionState};
pub use theme::{entity_palette, lighten};
pub use tooltip::{TooltipPayload, payload_for, payloads_for_entity, tooltip_marks};
