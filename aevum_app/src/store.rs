// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained render-side mark snapshots, fed by scene diffs.

use std::collections::HashMap;

use aevum_core::{MarkDiff, MarkId, MarkPayload};

/// A resolved mark as the renderer retains it.
#[derive(Clone, Debug)]
pub(crate) struct MarkSnapshot {
    pub(crate) id: MarkId,
    pub(crate) z_index: i32,
    pub(crate) payload: MarkPayload,
}

/// The renderer's retained mark set.
#[derive(Debug, Default)]
pub(crate) struct MarkStore {
    marks: HashMap<MarkId, MarkSnapshot>,
}

impl MarkStore {
    pub(crate) fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        for diff in diffs {
            match diff {
                MarkDiff::Enter { id, z_index, new } => {
                    self.marks.insert(
                        *id,
                        MarkSnapshot {
                            id: *id,
                            z_index: *z_index,
                            payload: new.clone(),
                        },
                    );
                }
                MarkDiff::Update {
                    id,
                    new_z_index,
                    new,
                } => {
                    self.marks.insert(
                        *id,
                        MarkSnapshot {
                            id: *id,
                            z_index: *new_z_index,
                            payload: new.clone(),
                        },
                    );
                }
                MarkDiff::Exit { id } => {
                    self.marks.remove(id);
                }
            }
        }
    }

    /// Snapshots in paint order: `(z_index, id)`.
    pub(crate) fn sorted(&self) -> Vec<MarkSnapshot> {
        let mut out: Vec<_> = self.marks.values().cloned().collect();
        out.sort_by_key(|m| (m.z_index, m.id));
        out
    }
}

#[cfg(test)]
mod tests {
    use aevum_core::{Mark, Scene};
    use kurbo::Rect;
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn store_tracks_scene_diffs_and_sorts_by_z_then_id() {
        let mut scene = Scene::new();
        let mut store = MarkStore::default();

        let frame = vec![
            Mark::rect(MarkId::from_raw(2), Rect::new(0.0, 0.0, 1.0, 1.0), css::RED)
                .with_z_index(5),
            Mark::rect(MarkId::from_raw(1), Rect::new(0.0, 0.0, 1.0, 1.0), css::BLUE)
                .with_z_index(5),
            Mark::rect(MarkId::from_raw(3), Rect::new(0.0, 0.0, 1.0, 1.0), css::GREEN),
        ];
        store.apply_diffs(&scene.tick(frame));
        let sorted = store.sorted();
        assert_eq!(sorted.len(), 3);
        assert_eq!(sorted[0].id, MarkId::from_raw(3));
        assert_eq!(sorted[1].id, MarkId::from_raw(1));
        assert_eq!(sorted[2].id, MarkId::from_raw(2));

        store.apply_diffs(&scene.tick(Vec::new()));
        assert!(store.sorted().is_empty());
    }
}
