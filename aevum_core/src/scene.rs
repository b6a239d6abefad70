// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained mark store and frame reconciliation.

use hashbrown::{HashMap, HashSet};

use crate::mark::{Mark, MarkId, MarkPayload};

/// A diff between the retained frame and a newly produced one.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark id seen for the first time.
    Enter {
        /// The mark id.
        id: MarkId,
        /// Render order of the new mark.
        z_index: i32,
        /// The new payload.
        new: MarkPayload,
    },
    /// A retained mark whose z-index or payload changed.
    Update {
        /// The mark id.
        id: MarkId,
        /// Render order after the update.
        new_z_index: i32,
        /// The new payload.
        new: MarkPayload,
    },
    /// A retained mark absent from the new frame.
    Exit {
        /// The mark id.
        id: MarkId,
    },
}

/// A retained set of marks keyed by stable id.
///
/// Frame producers hand the full mark list for a frame to [`Scene::tick`];
/// the scene compares it against what it retained and returns only the
/// changes. Producing an identical frame yields no diffs, which is what makes
/// the pure rebuild-everything style of the chart layers cheap to render.
#[derive(Debug, Default)]
pub struct Scene {
    marks: HashMap<MarkId, (i32, MarkPayload)>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of retained marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns whether the scene retains no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Drops all retained marks.
    pub fn clear(&mut self) {
        self.marks.clear();
    }

    /// Reconciles a full new frame against the retained one.
    ///
    /// Diffs for entering/updating marks are emitted in input order; exits
    /// follow, sorted by id for determinism. If an id occurs more than once
    /// in the input, the last occurrence wins.
    pub fn tick(&mut self, frame: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        let mut diffs = Vec::new();
        let mut seen: HashSet<MarkId> = HashSet::new();

        for mark in frame {
            let Mark {
                id,
                z_index,
                payload,
            } = mark;
            if seen.contains(&id) {
                // Replace the diff already emitted for this id this frame.
                diffs.retain(|d| match d {
                    MarkDiff::Enter { id: d_id, .. } | MarkDiff::Update { id: d_id, .. } => {
                        *d_id != id
                    }
                    MarkDiff::Exit { .. } => true,
                });
            }
            seen.insert(id);

            match self.marks.get(&id) {
                None => {
                    diffs.push(MarkDiff::Enter {
                        id,
                        z_index,
                        new: payload.clone(),
                    });
                    self.marks.insert(id, (z_index, payload));
                }
                Some((old_z, old_payload)) => {
                    if *old_z != z_index || *old_payload != payload {
                        diffs.push(MarkDiff::Update {
                            id,
                            new_z_index: z_index,
                            new: payload.clone(),
                        });
                        self.marks.insert(id, (z_index, payload));
                    }
                }
            }
        }

        let mut exits: Vec<MarkId> = self
            .marks
            .keys()
            .copied()
            .filter(|id| !seen.contains(id))
            .collect();
        exits.sort();
        for id in exits {
            self.marks.remove(&id);
            diffs.push(MarkDiff::Exit { id });
        }

        diffs
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use peniko::color::palette::css;

    use super::*;
    use crate::mark::Mark;

    fn frame(ids: &[(u64, f64)]) -> Vec<Mark> {
        ids.iter()
            .map(|&(id, x)| {
                Mark::rect(
                    MarkId::from_raw(id),
                    Rect::new(x, 0.0, x + 1.0, 1.0),
                    css::BLACK,
                )
            })
            .collect()
    }

    #[test]
    fn first_tick_enters_everything() {
        let mut scene = Scene::new();
        let diffs = scene.tick(frame(&[(1, 0.0), (2, 1.0)]));
        assert_eq!(diffs.len(), 2);
        assert!(
            diffs
                .iter()
                .all(|d| matches!(d, MarkDiff::Enter { .. }))
        );
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn identical_frame_yields_no_diffs() {
        let mut scene = Scene::new();
        scene.tick(frame(&[(1, 0.0), (2, 1.0)]));
        let diffs = scene.tick(frame(&[(1, 0.0), (2, 1.0)]));
        assert!(diffs.is_empty());
    }

    #[test]
    fn changed_payload_updates_and_missing_id_exits() {
        let mut scene = Scene::new();
        scene.tick(frame(&[(1, 0.0), (2, 1.0)]));
        let diffs = scene.tick(frame(&[(1, 5.0)]));
        assert_eq!(diffs.len(), 2);
        assert!(matches!(
            diffs[0],
            MarkDiff::Update {
                id: MarkId(1),
                ..
            }
        ));
        assert!(matches!(diffs[1], MarkDiff::Exit { id: MarkId(2) }));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn z_index_change_alone_is_an_update() {
        let mut scene = Scene::new();
        scene.tick(frame(&[(1, 0.0)]));
        let bumped = frame(&[(1, 0.0)])
            .into_iter()
            .map(|m| m.with_z_index(5))
            .collect::<Vec<_>>();
        let diffs = scene.tick(bumped);
        assert_eq!(diffs.len(), 1);
        assert!(matches!(diffs[0], MarkDiff::Update { .. }));
    }

    #[test]
    fn duplicate_ids_keep_the_last_occurrence() {
        let mut scene = Scene::new();
        let diffs = scene.tick(frame(&[(1, 0.0), (1, 9.0)]));
        assert_eq!(diffs.len(), 1);
        match &diffs[0] {
            MarkDiff::Enter { new, .. } => {
                assert_eq!(new.bounds().unwrap().x0, 9.0);
            }
            other => panic!("expected Enter, got {other:?}"),
        }
    }
}
