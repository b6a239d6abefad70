// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale utilities.
//!
//! Scales are pure mappings from data domains into scene coordinates (or
//! paints). Specs carry the domain and options; instantiating a spec against
//! a concrete output range yields the mapping used by marks and guides, so a
//! resize only re-instantiates ranges and never touches the data.

use peniko::Color;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to "nice" the domain based on tick generation.
    pub nice: bool,
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }

    /// Returns "nice-ish" tick values for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
        }
    }

    /// Enables or disables nice-domain behavior.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Returns the effective domain after applying `nice` (if enabled).
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        if !self.nice {
            return self.domain;
        }
        let ticks = nice_ticks(self.domain.0, self.domain.1, tick_count);
        if ticks.len() >= 2 {
            (*ticks.first().unwrap(), *ticks.last().unwrap())
        } else {
            self.domain
        }
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleLinear {
        ScaleLinear::new(self.domain, range)
    }

    /// Instantiates a concrete scale using the `resolved_domain` (respecting `nice`).
    pub fn instantiate_resolved(&self, range: (f64, f64), tick_count: usize) -> ScaleLinear {
        ScaleLinear::new(self.resolved_domain(tick_count), range)
    }
}

pub(crate) fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    if min > max {
        std::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step0 = span / count.max(1) as f64;
    let step = nice_step(step0);
    if step == 0.0 {
        return vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        n_f.min(10_000.0) as u64
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

pub(crate) fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A square-root mapping from a non-negative domain to a continuous range.
///
/// Point-like marks sized by this scale have *area* proportional to the data
/// value, which is the visually honest way to size them.
#[derive(Clone, Copy, Debug)]
pub struct ScaleSqrt {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleSqrt {
    /// Creates a new square-root scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// Negative inputs and domain endpoints are clamped at zero.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let s0 = d0.max(0.0).sqrt();
        let s1 = d1.max(0.0).sqrt();
        let denom = s1 - s0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x.max(0.0).sqrt() - s0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }
}

/// A categorical color scale with stable first-seen assignment.
///
/// The mapping is an ordered association list built once per dataset, so
/// color assignment is deterministic and reproducible across rebuilds
/// regardless of hash ordering anywhere else.
#[derive(Clone, Debug)]
pub struct ScaleOrdinal {
    entries: Vec<(String, Color)>,
    fallback: Color,
}

impl ScaleOrdinal {
    /// Builds the scale over `domain` in iteration order, cycling through
    /// `palette`. Duplicate keys keep their first assignment.
    ///
    /// `palette` must be non-empty.
    pub fn from_domain<I, S>(domain: I, palette: &[Color]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        assert!(!palette.is_empty(), "ordinal palette must be non-empty");
        let mut entries: Vec<(String, Color)> = Vec::new();
        for key in domain {
            let key = key.into();
            if entries.iter().any(|(k, _)| *k == key) {
                continue;
            }
            let color = palette[entries.len() % palette.len()];
            entries.push((key, color));
        }
        Self {
            entries,
            fallback: palette[0],
        }
    }

    /// Returns the color for `key`, if the key is in the domain.
    pub fn get(&self, key: &str) -> Option<Color> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| *c)
    }

    /// Returns the color for `key`, falling back to the first palette entry.
    pub fn color(&self, key: &str) -> Color {
        self.get(key).unwrap_or(self.fallback)
    }

    /// Returns the domain keys in assignment order.
    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns the number of assigned keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the domain is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn linear_maps_endpoints_and_degenerate_domain() {
        let s = ScaleLinear::new((-2000.0, 900.0), (0.0, 290.0));
        assert!((s.map(-2000.0) - 0.0).abs() < 1e-9);
        assert!((s.map(900.0) - 290.0).abs() < 1e-9);

        let flat = ScaleLinear::new((5.0, 5.0), (10.0, 20.0));
        assert_eq!(flat.map(5.0), 10.0);
        assert_eq!(flat.map(99.0), 10.0);
    }

    #[test]
    fn inverted_range_maps_higher_values_upward() {
        // Screen-y grows downward; an inverted range puts larger scores higher.
        let s = ScaleLinear::new((60.0, 80.0), (100.0, 0.0));
        assert!(s.map(80.0) < s.map(60.0));
    }

    #[test]
    fn sqrt_maps_endpoints_and_area_quarters() {
        let s = ScaleSqrt::new((0.0, 2900.0), (5.0, 40.0));
        assert!((s.map(0.0) - 5.0).abs() < 1e-9);
        assert!((s.map(2900.0) - 40.0).abs() < 1e-9);
        // A quarter of the domain maps to half the radius progression.
        let mid = s.map(2900.0 / 4.0);
        assert!((mid - (5.0 + 0.5 * 35.0)).abs() < 1e-9);
    }

    #[test]
    fn sqrt_clamps_negative_input() {
        let s = ScaleSqrt::new((0.0, 100.0), (0.0, 10.0));
        assert_eq!(s.map(-50.0), 0.0);
    }

    #[test]
    fn ordinal_assignment_is_first_seen_and_cycles() {
        let palette = [css::RED, css::GREEN, css::BLUE];
        let s = ScaleOrdinal::from_domain(["a", "b", "a", "c", "d"], &palette);
        assert_eq!(s.len(), 4);
        assert_eq!(s.get("a"), Some(css::RED));
        assert_eq!(s.get("b"), Some(css::GREEN));
        assert_eq!(s.get("c"), Some(css::BLUE));
        // Cycles back to the start of the palette.
        assert_eq!(s.get("d"), Some(css::RED));
        assert_eq!(s.get("zzz"), None);
    }

    #[test]
    fn nice_ticks_cover_the_domain() {
        let ticks = nice_ticks(0.0, 10.0, 5);
        assert!(ticks.len() >= 2);
        assert!(ticks.first().copied().unwrap() <= 0.0);
        assert!(ticks.last().copied().unwrap() >= 10.0);
    }

    #[test]
    fn spec_instantiation_only_fixes_the_range() {
        let spec = ScaleLinearSpec::new((0.0, 10.0));
        let narrow = spec.instantiate((0.0, 100.0));
        let wide = spec.instantiate((0.0, 200.0));
        assert_eq!(narrow.map(5.0), 50.0);
        assert_eq!(wide.map(5.0), 100.0);
    }
}
