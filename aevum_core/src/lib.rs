// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved scene model for `aevum`.
//!
//! This crate is the small foundation the chart layers build on:
//! - **Marks** are fully resolved drawing primitives (rect/path/text) with a
//!   stable [`MarkId`] and an explicit `z_index` for render ordering.
//! - A [`Scene`] retains the marks of the last frame and reconciles each new
//!   frame into [`MarkDiff`]s (Enter/Update/Exit), so renderers only touch
//!   what changed.
//!
//! Mark production is expected to be a pure function of upstream state; the
//! scene never mutates marks, it only compares and stores them.

mod mark;
mod scene;

pub use mark::{
    Mark, MarkId, MarkPayload, PathMark, RectMark, TextAnchor, TextBaseline, TextMark, brush_eq,
};
pub use scene::{MarkDiff, Scene};
