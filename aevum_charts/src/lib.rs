// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart building blocks for `aevum`.
//!
//! This crate is a small, reusable layer above `aevum_core`:
//! - **Scales** map data values into screen coordinates or paints.
//! - **Guides** (axes, legends) are built by generating `aevum_core` marks.
//! - **Series generators** (trend lines, bubbles, rules, text) produce
//!   resolved marks from already-scaled geometry.
//! - **Layout** is a measure/arrange pass over guides plus a reserved
//!   side-panel region.
//!
//! Text shaping is out of scope; text marks store unshaped strings and
//! guides measure through the [`TextMeasurer`] hook.

mod axis;
mod bubble_mark;
mod chart_spec;
mod format;
mod layout;
mod legend;
mod line_mark;
mod measure;
mod pattern;
mod rule_mark;
mod scale;
mod text_mark;
mod z_order;

pub use axis::{AxisOrient, AxisSpec, AxisStyle, GridStyle, StrokeStyle};
pub use bubble_mark::BubbleMarkSpec;
pub use chart_spec::ChartSpec;
pub use format::{format_tick_with_step, format_year, format_year_span};
pub use layout::{ChartLayout, ChartLayoutSpec, Size};
pub use legend::{LegendItem, LegendSpec, Swatch};
pub use line_mark::{TrendLineSpec, cardinal_path};
pub use measure::{
    FontFamily, FontStyle, FontWeight, HeuristicTextMeasurer, TextMeasurer, TextMetrics, TextStyle,
};
pub use pattern::{BASE_PATTERN_COUNT, Pattern, PatternKind};
pub use rule_mark::RuleMarkSpec;
pub use scale::{ScaleLinear, ScaleLinearSpec, ScaleOrdinal, ScaleSqrt};
pub use text_mark::TextMarkSpec;
pub use z_order::*;
