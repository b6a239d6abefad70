// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabular data collaborator for `aevum`.
//!
//! This crate owns everything between the raw CSV text and the render-ready
//! record set:
//! - typed row decoding against the expected header set,
//! - row-shape validation (rows whose field count disagrees with the header
//!   are dropped with a non-fatal warning),
//! - normalization into immutable [`VisualRecord`]s sorted by start year,
//! - first-seen-order entity grouping.
//!
//! The chart layers never see raw rows; they consume the normalized records
//! and groups, which are built once per load and never mutated.

mod loader;
mod record;

pub use loader::{DatasetError, LoadOutcome, RowWarning, load_csv_path, parse_csv};
pub use record::{
    EntityGroup, RawRecord, VisualRecord, distinct_calendar_types, distinct_entities,
    group_by_entity, normalize,
};
