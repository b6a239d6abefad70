// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar-motif pattern generation.
//!
//! Each calendar type gets a small stroked motif used to overlay bubbles and
//! fill legend swatches. Classification is by keyword: "solar"-like types get
//! a sun, "lunar"-like types a moon, and everything else cycles through a
//! fixed list of seven geometric motifs. Motifs are authored in a 10×10 unit
//! cell and instanced at any center/size.

use kurbo::{Affine, BezPath, Circle, Point, Shape, Vec2};

/// Number of motifs in the non-solar/non-lunar cycle.
pub const BASE_PATTERN_COUNT: usize = 7;

/// Classification of a generated pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// The fixed sun motif for "solar"-like calendar types.
    Sun,
    /// The fixed moon motif for "lunar"-like calendar types.
    Moon,
    /// One of the seven base motifs, by index.
    Base(usize),
}

/// A stroked motif in a 10×10 unit cell.
#[derive(Clone, Debug)]
pub struct Pattern {
    /// Which motif this is.
    pub kind: PatternKind,
    path: BezPath,
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Pattern {
    /// Returns the pattern for a calendar type.
    ///
    /// Total and deterministic: any string is valid input, and `index` is
    /// reduced modulo [`BASE_PATTERN_COUNT`] for the base cycle.
    pub fn for_calendar(calendar_type: &str, index: usize) -> Self {
        let lower = calendar_type.to_lowercase();
        if lower.contains("solar") {
            Self {
                kind: PatternKind::Sun,
                path: sun_path(),
            }
        } else if lower.contains("lunar") {
            Self {
                kind: PatternKind::Moon,
                path: moon_path(),
            }
        } else {
            let i = index % BASE_PATTERN_COUNT;
            Self {
                kind: PatternKind::Base(i),
                path: base_path(i),
            }
        }
    }

    /// Returns the motif path in its 10×10 unit cell.
    pub fn unit_path(&self) -> &BezPath {
        &self.path
    }

    /// Returns the motif scaled to `size` and centered at `center`.
    pub fn instanced(&self, center: Point, size: f64) -> BezPath {
        let s = size / 10.0;
        let mut path = self.path.clone();
        path.apply_affine(
            Affine::translate(Vec2::new(center.x - 5.0 * s, center.y - 5.0 * s))
                * Affine::scale(s),
        );
        path
    }

    /// Suggested stroke width for a motif instanced at `size`.
    pub fn stroke_width_for(size: f64) -> f64 {
        1.5 * size / 10.0
    }
}

fn line(path: &mut BezPath, from: (f64, f64), to: (f64, f64)) {
    path.move_to(from);
    path.line_to(to);
}

fn sun_path() -> BezPath {
    let mut p = BezPath::new();
    // Disc.
    p.extend(Circle::new((5.0, 5.0), 4.0).path_elements(0.05));
    // Eight rays.
    line(&mut p, (5.0, 1.0), (5.0, 2.0));
    line(&mut p, (8.0, 2.0), (9.0, 1.0));
    line(&mut p, (2.0, 8.0), (1.0, 9.0));
    line(&mut p, (8.0, 8.0), (9.0, 9.0));
    line(&mut p, (2.0, 2.0), (1.0, 1.0));
    line(&mut p, (5.0, 8.0), (5.0, 9.0));
    line(&mut p, (1.0, 5.0), (2.0, 5.0));
    line(&mut p, (8.0, 5.0), (9.0, 5.0));
    // Inner cross.
    line(&mut p, (3.5, 3.5), (6.5, 6.5));
    line(&mut p, (3.5, 6.5), (6.5, 3.5));
    p
}

fn moon_path() -> BezPath {
    // Circle-to-cubic control distance for a quarter arc.
    const K: f64 = 0.552_284_749_831;
    let r = 3.0;
    let k = K * r;

    let mut p = BezPath::new();
    // Crescent: the right half-circle around (5, 5), open to the left,
    // drawn as two quarter arcs.
    p.move_to((5.0, 2.0));
    p.curve_to((5.0 + k, 2.0), (8.0, 5.0 - k), (8.0, 5.0));
    p.curve_to((8.0, 5.0 + k), (5.0 + k, 8.0), (5.0, 8.0));
    line(&mut p, (3.0, 4.0), (3.0, 6.0));
    line(&mut p, (7.0, 4.0), (7.0, 6.0));
    line(&mut p, (4.0, 3.5), (6.0, 3.5));
    line(&mut p, (4.0, 6.5), (6.0, 6.5));
    p
}

fn base_path(index: usize) -> BezPath {
    let mut p = BezPath::new();
    match index {
        // Cross.
        0 => {
            line(&mut p, (0.0, 0.0), (10.0, 10.0));
            line(&mut p, (10.0, 0.0), (0.0, 10.0));
            line(&mut p, (5.0, 0.0), (5.0, 10.0));
            line(&mut p, (0.0, 5.0), (10.0, 5.0));
        }
        // Circle with cross.
        1 => {
            p.extend(Circle::new((5.0, 5.0), 5.0).path_elements(0.05));
            line(&mut p, (5.0, 0.0), (5.0, 10.0));
            line(&mut p, (0.0, 5.0), (10.0, 5.0));
        }
        // Diamond (crossed box).
        2 => {
            line(&mut p, (0.0, 0.0), (10.0, 10.0));
            line(&mut p, (10.0, 0.0), (0.0, 10.0));
            p.move_to((0.0, 0.0));
            p.line_to((10.0, 0.0));
            p.line_to((10.0, 10.0));
            p.line_to((0.0, 10.0));
            p.close_path();
        }
        // Square with X.
        3 => {
            p.move_to((2.0, 2.0));
            p.line_to((8.0, 2.0));
            p.line_to((8.0, 8.0));
            p.line_to((2.0, 8.0));
            p.close_path();
            line(&mut p, (0.0, 0.0), (10.0, 10.0));
            line(&mut p, (10.0, 0.0), (0.0, 10.0));
        }
        // Triangle.
        4 => {
            p.move_to((5.0, 0.0));
            p.line_to((10.0, 10.0));
            p.line_to((0.0, 10.0));
            p.close_path();
            line(&mut p, (0.0, 0.0), (10.0, 0.0));
            line(&mut p, (0.0, 10.0), (10.0, 10.0));
        }
        // Eye.
        5 => {
            p.move_to((0.0, 5.0));
            p.quad_to((5.0, 0.0), (10.0, 5.0));
            p.quad_to((5.0, 10.0), (0.0, 5.0));
            line(&mut p, (0.0, 0.0), (10.0, 10.0));
            line(&mut p, (10.0, 0.0), (0.0, 10.0));
        }
        // Star.
        _ => {
            p.move_to((0.0, 0.0));
            p.line_to((3.0, 5.0));
            p.line_to((0.0, 10.0));
            p.move_to((10.0, 0.0));
            p.line_to((7.0, 5.0));
            p.line_to((10.0, 10.0));
            line(&mut p, (3.0, 0.0), (7.0, 10.0));
            line(&mut p, (7.0, 0.0), (3.0, 10.0));
        }
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solar_strings_get_the_sun_regardless_of_index() {
        for i in 0..20 {
            assert_eq!(
                Pattern::for_calendar("Solar", i).kind,
                PatternKind::Sun
            );
            assert_eq!(
                Pattern::for_calendar("LUNISOLAR", i).kind,
                PatternKind::Sun
            );
        }
    }

    #[test]
    fn lunar_strings_get_the_moon_regardless_of_index() {
        for i in 0..20 {
            assert_eq!(
                Pattern::for_calendar("lunar", i).kind,
                PatternKind::Moon
            );
            assert_eq!(
                Pattern::for_calendar("Strictly Lunar", i).kind,
                PatternKind::Moon
            );
        }
    }

    #[test]
    fn other_strings_cycle_over_seven_motifs() {
        for i in 0..BASE_PATTERN_COUNT * 2 {
            let a = Pattern::for_calendar("ritual", i);
            let b = Pattern::for_calendar("ritual", i + BASE_PATTERN_COUNT);
            assert_eq!(a.kind, b.kind);
        }
        assert_ne!(
            Pattern::for_calendar("ritual", 0).kind,
            Pattern::for_calendar("ritual", 1).kind
        );
    }

    #[test]
    fn instanced_motif_lands_in_the_target_cell() {
        let pattern = Pattern::for_calendar("ritual", 0);
        let path = pattern.instanced(Point::new(100.0, 50.0), 20.0);
        let b = path.bounding_box();
        assert!(b.x0 >= 89.9 && b.x1 <= 110.1);
        assert!(b.y0 >= 39.9 && b.y1 <= 60.1);
    }
}
